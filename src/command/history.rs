use image::RgbaImage;

use crate::shape::Shape;

/// Full editor state at one point in time: pixels plus a deep copy of the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pixels: RgbaImage,
    shapes: Vec<Shape>,
}

impl Snapshot {
    pub fn new(pixels: RgbaImage, shapes: Vec<Shape>) -> Self {
        Self { pixels, shapes }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Bounded linear snapshot history.
///
/// `cursor` points at the snapshot matching the current document, or is
/// `None` before anything was pushed. Undo never steps below the first
/// snapshot, which is the state right after loading.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: Option<usize>,
    capacity: usize,
}

impl History {
    pub const DEFAULT_CAPACITY: usize = 50;

    /// Creates a new empty history
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: None,
            capacity: capacity.max(1),
        }
    }

    /// Records `snapshot` as the newest state, discarding any redo branch.
    pub fn push(&mut self, snapshot: Snapshot) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push(snapshot);

        if self.snapshots.len() > self.capacity {
            self.snapshots.remove(0);
        }
        self.cursor = Some(self.snapshots.len() - 1);
    }

    /// Steps back one snapshot and returns it, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                self.snapshots.get(c - 1)
            }
            _ => None,
        }
    }

    /// Steps forward one snapshot and returns it, or `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next < self.snapshots.len() && self.cursor.is_some() {
            self.cursor = Some(next);
            self.snapshots.get(next)
        } else {
            None
        }
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.snapshots.len())
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.cursor.and_then(|c| self.snapshots.get(c))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear the history
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = None;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn snap(tag: u8) -> Snapshot {
        Snapshot::new(RgbaImage::from_pixel(1, 1, Rgba([tag, 0, 0, 255])), Vec::new())
    }

    fn tag(s: &Snapshot) -> u8 {
        s.pixels().get_pixel(0, 0)[0]
    }

    #[test]
    fn empty_history_has_nothing_to_step_to() {
        let mut history = History::default();
        assert_eq!(history.cursor(), None);
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn push_after_undo_drops_redo_branch() {
        let mut history = History::new(10);
        history.push(snap(0));
        history.push(snap(1));
        history.push(snap(2));
        assert_eq!(tag(history.undo().unwrap()), 1);

        history.push(snap(9));
        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert_eq!(tag(history.current().unwrap()), 9);
    }

    #[test]
    fn undo_stops_at_first_snapshot() {
        let mut history = History::new(10);
        history.push(snap(0));
        history.push(snap(1));
        assert!(history.undo().is_some());
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn eviction_keeps_cursor_on_newest() {
        let mut history = History::new(3);
        for i in 0..5 {
            history.push(snap(i));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(2));
        assert_eq!(tag(history.current().unwrap()), 4);
    }
}
