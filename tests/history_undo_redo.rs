use eframe_image_editor::command::{History, Snapshot};
use eframe_image_editor::input::{EditorKey, InputEvent};
use eframe_image_editor::shape::Shape;
use eframe_image_editor::state::EditorContext;
use eframe_image_editor::tools::ToolKind;
use egui::Pos2;
use image::{Rgba, RgbaImage};

// Helper to create an editor with a small gradient loaded
fn create_test_editor() -> EditorContext {
    let mut editor = EditorContext::default();
    let pixels = RgbaImage::from_fn(60, 40, |x, y| Rgba([x as u8 * 4, y as u8 * 6, 90, 255]));
    editor.load_image(pixels).unwrap();
    editor
}

fn drag(editor: &mut EditorContext, from: Pos2, to: Pos2) {
    editor.handle_input(InputEvent::PointerDown(from)).unwrap();
    editor.handle_input(InputEvent::PointerMove(to)).unwrap();
    editor.handle_input(InputEvent::PointerUp(to)).unwrap();
}

fn state_of(editor: &EditorContext) -> (RgbaImage, Vec<Shape>) {
    let doc = editor.document();
    (doc.surface().unwrap().pixels().clone(), doc.shapes().to_vec())
}

fn tiny_snapshot(value: u8) -> Snapshot {
    Snapshot::new(RgbaImage::from_pixel(1, 1, Rgba([value, 0, 0, 255])), Vec::new())
}

#[test]
fn test_undo_then_redo_reproduces_final_state() {
    let mut editor = create_test_editor();

    editor.set_tool(ToolKind::Draw);
    drag(&mut editor, Pos2::new(5.0, 5.0), Pos2::new(30.0, 20.0));
    editor.set_tool(ToolKind::Shape);
    drag(&mut editor, Pos2::new(35.0, 5.0), Pos2::new(55.0, 30.0));
    editor.flip_horizontal().unwrap();
    drag(&mut editor, Pos2::new(10.0, 25.0), Pos2::new(20.0, 35.0));
    editor.rotate_90().unwrap();

    let edits = 5;
    assert_eq!(editor.history().len(), edits + 1);
    let final_state = state_of(&editor);

    for _ in 0..edits {
        assert!(editor.undo().unwrap());
    }
    assert!(!editor.can_undo());
    let (loaded_pixels, loaded_shapes) = state_of(&editor);
    assert_eq!(loaded_pixels.dimensions(), (60, 40));
    assert!(loaded_shapes.is_empty());

    for _ in 0..edits {
        assert!(editor.redo().unwrap());
    }
    assert!(!editor.can_redo());
    assert_eq!(state_of(&editor), final_state);
}

#[test]
fn test_undo_and_redo_at_bounds_are_noops() {
    let mut editor = create_test_editor();
    let before = state_of(&editor);

    assert!(!editor.undo().unwrap());
    assert!(!editor.redo().unwrap());
    assert_eq!(editor.history().cursor(), Some(0));
    assert_eq!(state_of(&editor), before);

    let mut history = History::new(5);
    assert_eq!(history.cursor(), None);
    assert!(history.undo().is_none());
    assert!(history.redo().is_none());
    assert_eq!(history.cursor(), None);
}

#[test]
fn test_keyboard_undo_redo() {
    let mut editor = create_test_editor();
    editor.set_tool(ToolKind::Shape);
    drag(&mut editor, Pos2::new(5.0, 5.0), Pos2::new(25.0, 25.0));

    editor.handle_input(InputEvent::Key(EditorKey::Undo)).unwrap();
    assert!(editor.document().shapes().is_empty());
    editor.handle_input(InputEvent::Key(EditorKey::Redo)).unwrap();
    assert_eq!(editor.document().shapes().len(), 1);
}

#[test]
fn test_push_after_undo_discards_redo_branch() {
    let mut editor = create_test_editor();
    editor.flip_horizontal().unwrap();
    editor.flip_vertical().unwrap();
    editor.undo().unwrap();
    assert!(editor.can_redo());

    editor.rotate_90().unwrap();
    assert!(!editor.can_redo());
    assert_eq!(editor.history().len(), 3);
    assert_eq!(editor.document().dimensions(), (40, 60));
}

#[test]
fn test_capacity_evicts_oldest_and_keeps_position() {
    let mut history = History::new(History::DEFAULT_CAPACITY);
    for i in 0..60u8 {
        history.push(tiny_snapshot(i));
    }
    assert_eq!(history.len(), 50);
    assert_eq!(history.cursor(), Some(49));
    assert_eq!(history.current().unwrap().pixels().get_pixel(0, 0)[0], 59);

    // Oldest surviving entry is the 11th push
    for _ in 0..49 {
        history.undo();
    }
    assert_eq!(history.cursor(), Some(0));
    assert_eq!(history.current().unwrap().pixels().get_pixel(0, 0)[0], 10);
}

#[test]
fn test_eviction_while_undone_keeps_the_same_logical_entry() {
    let mut history = History::new(3);
    for i in 0..3u8 {
        history.push(tiny_snapshot(i));
    }
    history.undo();
    assert_eq!(history.cursor(), Some(1));

    // Branch discard drops entry 2, so nothing is evicted yet
    history.push(tiny_snapshot(7));
    assert_eq!(history.len(), 3);
    history.push(tiny_snapshot(8));
    assert_eq!(history.len(), 3);
    assert_eq!(history.cursor(), Some(2));
    assert_eq!(history.current().unwrap().pixels().get_pixel(0, 0)[0], 8);
}

#[test]
fn test_history_is_bounded_through_the_editor() {
    let mut editor = create_test_editor();
    for _ in 0..60 {
        editor.flip_horizontal().unwrap();
    }
    assert_eq!(editor.history().len(), 50);
    assert_eq!(editor.history().cursor(), Some(49));
}
