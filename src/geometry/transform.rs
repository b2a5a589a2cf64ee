//! Move/resize math for shapes.
//!
//! Every drag frame is computed from the geometry captured when the drag
//! began plus the total pointer delta, never from the previous frame.

use egui::{Pos2, Vec2};

use crate::shape::{ShapeBox, ShapeGeometry};
use crate::widgets::{Corner, ShapeHandle};

/// Stretch a shape being drawn so its extent reaches `cursor`.
pub fn update_extent(geometry: &mut ShapeGeometry, cursor: Pos2) {
    if let Some(b) = geometry.shape_box_mut() {
        b.width = cursor.x - b.x;
        b.height = cursor.y - b.y;
    }
}

/// Relocate the origin of area shapes so width and height are non-negative.
///
/// Lines and arrows keep their signed extent: flipping it would swap the
/// endpoints and turn an arrow around.
pub fn normalize(geometry: &mut ShapeGeometry) {
    match geometry {
        ShapeGeometry::Rectangle(b) | ShapeGeometry::Circle(b) => *b = b.normalized(),
        ShapeGeometry::Line(_) | ShapeGeometry::Arrow { .. } | ShapeGeometry::Polygon { .. } => {}
    }
}

pub fn translated(original: &ShapeGeometry, delta: Vec2) -> ShapeGeometry {
    let mut moved = original.clone();
    match &mut moved {
        ShapeGeometry::Polygon { vertices } => {
            for v in vertices.iter_mut() {
                *v += delta;
            }
        }
        other => {
            if let Some(b) = other.shape_box_mut() {
                *b = b.translated(delta);
            }
        }
    }
    moved
}

/// Corner resize keeping the opposite corner fixed.
///
/// The minimum size is enforced after the handle math, against the edge that
/// does not move.
pub fn resize_box(original: ShapeBox, corner: Corner, delta: Vec2, min_size: f32) -> ShapeBox {
    let mut b = original;

    if corner.moves_left() {
        b.x += delta.x;
        b.width -= delta.x;
    } else {
        b.width += delta.x;
    }
    if corner.moves_top() {
        b.y += delta.y;
        b.height -= delta.y;
    } else {
        b.height += delta.y;
    }

    if b.width < min_size {
        if corner.moves_left() {
            b.x = original.x + original.width - min_size;
        }
        b.width = min_size;
    }
    if b.height < min_size {
        if corner.moves_top() {
            b.y = original.y + original.height - min_size;
        }
        b.height = min_size;
    }
    b
}

/// Applies a handle drag of `delta` to the pre-drag geometry.
pub fn apply_handle_drag(
    original: &ShapeGeometry,
    handle: ShapeHandle,
    delta: Vec2,
    min_size: f32,
) -> ShapeGeometry {
    let mut result = original.clone();
    match (&mut result, handle) {
        (ShapeGeometry::Rectangle(b) | ShapeGeometry::Circle(b), ShapeHandle::Corner(corner)) => {
            *b = resize_box(*b, corner, delta, min_size);
        }
        (
            ShapeGeometry::Line(b) | ShapeGeometry::Arrow { bounds: b, .. },
            ShapeHandle::Start,
        ) => {
            b.x += delta.x;
            b.y += delta.y;
            b.width -= delta.x;
            b.height -= delta.y;
        }
        (ShapeGeometry::Line(b) | ShapeGeometry::Arrow { bounds: b, .. }, ShapeHandle::End) => {
            b.width += delta.x;
            b.height += delta.y;
        }
        (ShapeGeometry::Polygon { vertices }, ShapeHandle::Vertex(index)) => {
            if let Some(v) = vertices.get_mut(index) {
                *v += delta;
            }
        }
        _ => {
            log::debug!("handle {handle:?} does not apply to {:?}", original.kind());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: f32 = 10.0;

    #[test]
    fn se_grows_size_only() {
        let b = ShapeBox::new(100.0, 100.0, 50.0, 50.0);
        let r = resize_box(b, Corner::BottomRight, Vec2::new(20.0, 10.0), MIN);
        assert_eq!(r, ShapeBox::new(100.0, 100.0, 70.0, 60.0));
    }

    #[test]
    fn nw_moves_origin_and_shrinks() {
        let b = ShapeBox::new(100.0, 100.0, 50.0, 50.0);
        let r = resize_box(b, Corner::TopLeft, Vec2::new(10.0, 20.0), MIN);
        assert_eq!(r, ShapeBox::new(110.0, 120.0, 40.0, 30.0));
    }

    #[test]
    fn ne_and_sw_invert_one_axis() {
        let b = ShapeBox::new(0.0, 0.0, 50.0, 50.0);
        let ne = resize_box(b, Corner::TopRight, Vec2::new(5.0, 5.0), MIN);
        assert_eq!(ne, ShapeBox::new(0.0, 5.0, 55.0, 45.0));
        let sw = resize_box(b, Corner::BottomLeft, Vec2::new(5.0, 5.0), MIN);
        assert_eq!(sw, ShapeBox::new(5.0, 0.0, 45.0, 55.0));
    }

    #[test]
    fn clamp_keeps_opposite_edge_fixed() {
        let b = ShapeBox::new(100.0, 100.0, 50.0, 50.0);
        let r = resize_box(b, Corner::TopLeft, Vec2::new(100.0, 100.0), MIN);
        assert_eq!(r, ShapeBox::new(140.0, 140.0, MIN, MIN));

        let r = resize_box(b, Corner::BottomRight, Vec2::new(-100.0, -100.0), MIN);
        assert_eq!(r, ShapeBox::new(100.0, 100.0, MIN, MIN));
    }

    #[test]
    fn translate_moves_every_vertex() {
        let poly = ShapeGeometry::Polygon {
            vertices: vec![Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0), Pos2::new(5.0, 5.0)],
        };
        let moved = translated(&poly, Vec2::new(3.0, 4.0));
        assert_eq!(
            moved,
            ShapeGeometry::Polygon {
                vertices: vec![Pos2::new(3.0, 4.0), Pos2::new(13.0, 4.0), Pos2::new(8.0, 9.0)],
            }
        );
    }

    #[test]
    fn endpoint_drag_keeps_other_end() {
        let line = ShapeGeometry::Line(ShapeBox::new(0.0, 0.0, 100.0, 0.0));
        let dragged = apply_handle_drag(&line, ShapeHandle::Start, Vec2::new(10.0, 20.0), MIN);
        let (start, end) = dragged.segment().unwrap();
        assert_eq!(start, Pos2::new(10.0, 20.0));
        assert_eq!(end, Pos2::new(100.0, 0.0));
    }

    #[test]
    fn normalize_leaves_segments_alone() {
        let mut line = ShapeGeometry::Line(ShapeBox::new(50.0, 50.0, -20.0, -20.0));
        normalize(&mut line);
        assert_eq!(line, ShapeGeometry::Line(ShapeBox::new(50.0, 50.0, -20.0, -20.0)));

        let mut rect = ShapeGeometry::Rectangle(ShapeBox::new(50.0, 50.0, -20.0, -20.0));
        normalize(&mut rect);
        assert_eq!(rect, ShapeGeometry::Rectangle(ShapeBox::new(30.0, 30.0, 20.0, 20.0)));
    }
}
