use egui::Pos2;

use super::{Shape, ShapeId};
use crate::geometry::hit_testing;

/// Ordered shape overlay. Insertion order is z-order, last is topmost.
///
/// Selection is held by identity so it stays valid while the selected shape
/// is replaced during a drag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeList {
    shapes: Vec<Shape>,
    selected: Option<ShapeId>,
}

impl ShapeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn as_slice(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn push(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id;
        self.shapes.push(shape);
        id
    }

    /// Appends `shape` and makes it the selection.
    pub fn push_selected(&mut self, shape: Shape) -> ShapeId {
        let id = self.push(shape);
        self.selected = Some(id);
        id
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id == id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(self.shapes.remove(index))
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn select(&mut self, id: ShapeId) {
        if self.get(id).is_some() {
            self.selected = Some(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Topmost shape whose body contains `point`.
    pub fn topmost_hit(&self, point: Pos2, tolerance: f32) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|s| hit_testing::hit_test(s, point, tolerance))
            .map(|s| s.id)
    }

    /// Removes every shape, handing them back in z-order.
    pub fn take_all(&mut self) -> Vec<Shape> {
        self.selected = None;
        std::mem::take(&mut self.shapes)
    }

    /// Replaces the whole overlay. Selection is cleared.
    pub fn restore(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
        self.selected = None;
    }

    pub fn to_vec(&self) -> Vec<Shape> {
        self.shapes.clone()
    }
}
