use eframe_image_editor::error::EditorError;
use eframe_image_editor::filters::{FilterParams, Preset};
use eframe_image_editor::input::{EditorKey, InputEvent};
use eframe_image_editor::state::EditorContext;
use eframe_image_editor::tools::ToolKind;
use egui::{Color32, Pos2};
use image::{Rgba, RgbaImage};

fn create_test_editor(width: u32, height: u32) -> EditorContext {
    let mut editor = EditorContext::default();
    let pixels = RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8 * 10, y as u8 * 10, 50, 255]));
    editor.load_image(pixels).unwrap();
    editor
}

fn pixel(editor: &EditorContext, x: u32, y: u32) -> [u8; 4] {
    editor.document().surface().unwrap().pixels().get_pixel(x, y).0
}

#[test]
fn test_flips_mirror_pixels() {
    let mut editor = create_test_editor(4, 3);
    editor.flip_horizontal().unwrap();
    assert_eq!(pixel(&editor, 0, 0), [30, 0, 50, 255]);
    editor.flip_vertical().unwrap();
    assert_eq!(pixel(&editor, 0, 0), [30, 20, 50, 255]);
    assert_eq!(editor.history().len(), 3);
}

#[test]
fn test_rotate_swaps_dimensions_clockwise() {
    let mut editor = create_test_editor(4, 3);
    editor.rotate_90().unwrap();
    assert_eq!(editor.document().dimensions(), (3, 4));
    // The old bottom-left corner becomes the new top-left
    assert_eq!(pixel(&editor, 0, 0), [0, 20, 50, 255]);
}

#[test]
fn test_resize_with_aspect() {
    let mut editor = create_test_editor(20, 10);
    let height = editor.aspect_height(50).unwrap();
    assert_eq!(height, 25);
    editor.resize_to(50, height).unwrap();
    assert_eq!(editor.document().dimensions(), (50, 25));

    assert!(matches!(
        editor.resize_to(50, 0),
        Err(EditorError::InvalidDimensions { width: 50, height: 0 })
    ));
    assert_eq!(editor.document().dimensions(), (50, 25));
}

#[test]
fn test_geometric_transform_burns_pending_shapes() {
    let mut editor = create_test_editor(20, 20);
    editor.set_tool(ToolKind::Shape);
    editor.handle_input(InputEvent::PointerDown(Pos2::new(2.0, 2.0))).unwrap();
    editor.handle_input(InputEvent::PointerMove(Pos2::new(8.0, 8.0))).unwrap();
    editor.handle_input(InputEvent::PointerUp(Pos2::new(8.0, 8.0))).unwrap();

    editor.flip_horizontal().unwrap();
    assert!(editor.document().shapes().is_empty());
    let fill = editor.settings().fill_color;
    assert_eq!(pixel(&editor, 14, 5), [fill.r(), fill.g(), fill.b(), 255]);
}

#[test]
fn test_grayscale_preset_is_one_edit() {
    let mut editor = create_test_editor(4, 4);
    editor.apply_preset(Preset::Grayscale).unwrap();
    let [r, g, b, a] = pixel(&editor, 3, 2);
    assert_eq!((r, r), (g, b));
    assert_eq!(a, 255);
    assert_eq!(editor.history().len(), 2);

    editor.undo().unwrap();
    assert_eq!(pixel(&editor, 3, 2), [30, 20, 50, 255]);
}

#[test]
fn test_invert_preset_twice_is_identity() {
    let mut editor = create_test_editor(4, 4);
    let before = pixel(&editor, 1, 3);
    editor.apply_preset(Preset::Invert).unwrap();
    assert_eq!(pixel(&editor, 1, 3), [255 - 10, 255 - 30, 255 - 50, 255]);
    editor.apply_preset(Preset::Invert).unwrap();
    assert_eq!(pixel(&editor, 1, 3), before);
}

#[test]
fn test_filter_preview_then_other_edit_folds_in() {
    let mut editor = create_test_editor(4, 4);
    let params = FilterParams {
        brightness: 40.0,
        ..FilterParams::NEUTRAL
    };
    editor.preview_filters(params).unwrap();
    let previewed = pixel(&editor, 2, 2);
    assert_ne!(previewed, [20, 20, 50, 255]);
    assert_eq!(editor.history().len(), 1);

    editor.flip_horizontal().unwrap();
    assert!(editor.filter_params().is_neutral());
    assert_eq!(pixel(&editor, 1, 2), previewed);
    assert_eq!(editor.history().len(), 2);
}

#[test]
fn test_neutral_filters_change_nothing() {
    let mut editor = create_test_editor(5, 5);
    let before = editor.document().surface().unwrap().pixels().clone();
    editor.preview_filters(FilterParams::NEUTRAL).unwrap();
    assert_eq!(editor.document().surface().unwrap().pixels(), &before);
}

#[test]
fn test_stroke_cancel_restores_pixels() {
    let mut editor = create_test_editor(20, 20);
    editor.set_tool(ToolKind::Draw);
    editor.settings_mut().brush_color = Color32::WHITE;
    let before = editor.document().surface().unwrap().pixels().clone();

    editor.handle_input(InputEvent::PointerDown(Pos2::new(5.0, 5.0))).unwrap();
    editor.handle_input(InputEvent::PointerMove(Pos2::new(15.0, 15.0))).unwrap();
    assert_ne!(editor.document().surface().unwrap().pixels(), &before);

    editor.handle_input(InputEvent::Key(EditorKey::Cancel)).unwrap();
    assert_eq!(editor.document().surface().unwrap().pixels(), &before);
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn test_empty_text_is_rejected() {
    let mut editor = create_test_editor(20, 20);
    editor.set_tool(ToolKind::Text);
    editor.settings_mut().text = "   ".to_owned();
    let err = editor
        .handle_input(InputEvent::PointerDown(Pos2::new(5.0, 15.0)))
        .unwrap_err();
    assert!(matches!(err, EditorError::EmptyText));
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn test_text_stamp_marks_pixels() {
    let mut editor = create_test_editor(120, 60);
    editor.set_tool(ToolKind::Text);
    {
        let settings = editor.settings_mut();
        settings.text = "Hi".to_owned();
        settings.text_color = Color32::from_rgb(255, 0, 255);
        settings.font_size = 40.0;
    }
    let before = editor.document().surface().unwrap().pixels().clone();
    editor.handle_input(InputEvent::PointerDown(Pos2::new(10.0, 50.0))).unwrap();
    assert_ne!(editor.document().surface().unwrap().pixels(), &before);
    assert_eq!(editor.history().len(), 2);
}

#[test]
fn test_operations_need_an_image() {
    let mut editor = EditorContext::default();
    assert!(matches!(editor.flip_horizontal(), Err(EditorError::NoImageLoaded)));
    assert!(matches!(
        editor.preview_filters(FilterParams::NEUTRAL),
        Err(EditorError::NoImageLoaded)
    ));
    assert!(matches!(editor.reset(), Err(EditorError::NoImageLoaded)));
}
