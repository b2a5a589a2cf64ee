use egui::Pos2;

use crate::error::{EditorError, EditorResult};
use crate::shape::{Shape, ShapeStyle};

/// A click this close to the previous vertex, in screen points, is the second
/// half of a double-click, not a new vertex.
const DUPLICATE_VERTEX_POINTS: f32 = 2.0;

/// Accumulates polygon vertices one click at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonBuilder {
    vertices: Vec<Pos2>,
    cursor: Option<Pos2>,
}

impl PolygonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_building(&self) -> bool {
        !self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Pos2] {
        &self.vertices
    }

    /// Appends a vertex. Returns false when `pos` repeats the last vertex.
    ///
    /// `view_scale` is screen points per raster pixel; on a shrunk canvas a
    /// few points of jitter span several raster pixels.
    pub fn add_vertex(&mut self, pos: Pos2, view_scale: f32) -> bool {
        let min_distance = DUPLICATE_VERTEX_POINTS / view_scale.max(f32::EPSILON);
        if self
            .vertices
            .last()
            .is_some_and(|last| last.distance(pos) < min_distance)
        {
            return false;
        }
        self.vertices.push(pos);
        self.cursor = Some(pos);
        true
    }

    pub fn set_cursor(&mut self, pos: Pos2) {
        if self.is_building() {
            self.cursor = Some(pos);
        }
    }

    /// Committed vertices followed by the trailing point under the pointer.
    pub fn preview_path(&self) -> Vec<Pos2> {
        let mut path = self.vertices.clone();
        if let Some(cursor) = self.cursor {
            if self.is_building() {
                path.push(cursor);
            }
        }
        path
    }

    /// Closes the ring into a polygon shape and resets.
    ///
    /// With fewer than three vertices the builder is left untouched.
    pub fn finish(&mut self, style: ShapeStyle) -> EditorResult<Shape> {
        if self.vertices.len() < 3 {
            return Err(EditorError::TooFewPolygonVertices {
                count: self.vertices.len(),
            });
        }
        let vertices = std::mem::take(&mut self.vertices);
        self.cursor = None;
        Shape::polygon(vertices, style)
    }

    pub fn cancel(&mut self) {
        self.vertices.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_click_does_not_duplicate_vertex() {
        let mut builder = PolygonBuilder::new();
        assert!(builder.add_vertex(Pos2::new(0.0, 0.0), 1.0));
        assert!(!builder.add_vertex(Pos2::new(0.5, 0.5), 1.0));
        assert_eq!(builder.vertices().len(), 1);
    }

    #[test]
    fn duplicate_distance_follows_canvas_scale() {
        // Canvas shown at a quarter size: 2 points cover 8 raster pixels
        let mut builder = PolygonBuilder::new();
        assert!(builder.add_vertex(Pos2::new(100.0, 100.0), 0.25));
        assert!(!builder.add_vertex(Pos2::new(105.0, 103.0), 0.25));
        assert!(builder.add_vertex(Pos2::new(110.0, 100.0), 0.25));

        // Zoomed in, nearby raster pixels stay distinct
        let mut builder = PolygonBuilder::new();
        assert!(builder.add_vertex(Pos2::new(10.0, 10.0), 4.0));
        assert!(builder.add_vertex(Pos2::new(11.0, 10.0), 4.0));
    }

    #[test]
    fn failed_finish_keeps_vertices() {
        let mut builder = PolygonBuilder::new();
        builder.add_vertex(Pos2::new(0.0, 0.0), 1.0);
        builder.add_vertex(Pos2::new(10.0, 0.0), 1.0);
        let err = builder.finish(ShapeStyle::default()).unwrap_err();
        assert!(matches!(err, EditorError::TooFewPolygonVertices { count: 2 }));
        assert_eq!(builder.vertices(), &[Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0)]);
        assert!(builder.is_building());
    }

    #[test]
    fn preview_trails_to_pointer() {
        let mut builder = PolygonBuilder::new();
        builder.set_cursor(Pos2::new(3.0, 3.0));
        assert!(builder.preview_path().is_empty());

        builder.add_vertex(Pos2::new(0.0, 0.0), 1.0);
        builder.set_cursor(Pos2::new(20.0, 5.0));
        assert_eq!(builder.preview_path(), vec![Pos2::new(0.0, 0.0), Pos2::new(20.0, 5.0)]);
    }
}
