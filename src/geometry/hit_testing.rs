use egui::{Pos2, Rect};

use crate::shape::{Shape, ShapeGeometry};
use crate::widgets::{handle_rect, Corner, ShapeHandle};

/// Points this close to a polygon's ring count as on it.
pub const POLYGON_EDGE_EPSILON: f32 = 0.5;

/// Inclusive containment; points on the border are inside.
pub fn rect_contains(rect: Rect, point: Pos2) -> bool {
    point.x >= rect.min.x && point.x <= rect.max.x && point.y >= rect.min.y && point.y <= rect.max.y
}

/// Ellipse inscribed in `rect`. Degenerate radii fall back to the rect itself.
pub fn ellipse_contains(rect: Rect, point: Pos2) -> bool {
    let rx = rect.width() / 2.0;
    let ry = rect.height() / 2.0;
    if rx <= f32::EPSILON || ry <= f32::EPSILON {
        return rect_contains(rect, point);
    }
    let center = rect.center();
    let dx = (point.x - center.x) / rx;
    let dy = (point.y - center.y) / ry;
    dx * dx + dy * dy <= 1.0
}

/// Distance from `point` to the segment `a -> b`, projection clamped to the segment.
pub fn distance_to_segment(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

/// Even-odd ray cast against the closed ring `vertices`.
pub fn polygon_contains(vertices: &[Pos2], point: Pos2) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > point.y) != (vj.y > point.y) {
            let x_cross = vi.x + (point.y - vi.y) / (vj.y - vi.y) * (vj.x - vi.x);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Shortest distance from `point` to any edge of the closed ring.
pub fn distance_to_ring(vertices: &[Pos2], point: Pos2) -> f32 {
    match vertices.len() {
        0 => f32::INFINITY,
        1 => point.distance(vertices[0]),
        n => (0..n)
            .map(|i| distance_to_segment(point, vertices[i], vertices[(i + 1) % n]))
            .fold(f32::INFINITY, f32::min),
    }
}

/// Does `point` land on the body of `shape`?
///
/// `tolerance` only applies to lines and arrows, which have no area.
pub fn hit_test(shape: &Shape, point: Pos2, tolerance: f32) -> bool {
    match &shape.geometry {
        ShapeGeometry::Rectangle(b) => rect_contains(b.to_rect(), point),
        ShapeGeometry::Circle(b) => ellipse_contains(b.to_rect(), point),
        ShapeGeometry::Line(b) | ShapeGeometry::Arrow { bounds: b, .. } => {
            distance_to_segment(point, b.origin(), b.end()) < tolerance
        }
        ShapeGeometry::Polygon { vertices } => {
            polygon_contains(vertices, point)
                || distance_to_ring(vertices, point) <= POLYGON_EDGE_EPSILON
        }
    }
}

/// Grab points of `shape`, in hit-test order.
pub fn handle_positions(shape: &Shape) -> Vec<(ShapeHandle, Pos2)> {
    match &shape.geometry {
        ShapeGeometry::Rectangle(b) | ShapeGeometry::Circle(b) => {
            let rect = b.to_rect();
            Corner::ALL
                .iter()
                .map(|corner| (ShapeHandle::Corner(*corner), corner.position_on(rect)))
                .collect()
        }
        ShapeGeometry::Line(b) | ShapeGeometry::Arrow { bounds: b, .. } => vec![
            (ShapeHandle::Start, b.origin()),
            (ShapeHandle::End, b.end()),
        ],
        ShapeGeometry::Polygon { vertices } => vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (ShapeHandle::Vertex(i), *v))
            .collect(),
    }
}

/// First handle of `shape` whose square contains `point`.
pub fn handle_test(shape: &Shape, point: Pos2, handle_size: f32) -> Option<ShapeHandle> {
    handle_positions(shape)
        .into_iter()
        .find(|(_, center)| rect_contains(handle_rect(*center, handle_size), point))
        .map(|(handle, _)| handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{ShapeBox, ShapeStyle};

    fn shape(geometry: ShapeGeometry) -> Shape {
        Shape::new(geometry, ShapeStyle::default())
    }

    #[test]
    fn rectangle_border_is_inside() {
        let s = shape(ShapeGeometry::Rectangle(ShapeBox::new(10.0, 10.0, 20.0, 20.0)));
        assert!(hit_test(&s, Pos2::new(10.0, 10.0), 10.0));
        assert!(hit_test(&s, Pos2::new(30.0, 30.0), 10.0));
        assert!(!hit_test(&s, Pos2::new(30.1, 30.0), 10.0));
    }

    #[test]
    fn circle_excludes_bounding_box_corners() {
        let s = shape(ShapeGeometry::Circle(ShapeBox::new(0.0, 0.0, 100.0, 50.0)));
        assert!(hit_test(&s, Pos2::new(50.0, 25.0), 10.0));
        assert!(hit_test(&s, Pos2::new(99.0, 25.0), 10.0));
        assert!(!hit_test(&s, Pos2::new(2.0, 2.0), 10.0));
    }

    #[test]
    fn line_hit_is_clamped_to_segment() {
        let s = shape(ShapeGeometry::Line(ShapeBox::new(0.0, 0.0, 100.0, 0.0)));
        assert!(hit_test(&s, Pos2::new(50.0, 9.0), 10.0));
        assert!(!hit_test(&s, Pos2::new(50.0, 10.0), 10.0));
        // Beyond the end, the projection clamps to the endpoint.
        assert!(!hit_test(&s, Pos2::new(115.0, 0.0), 10.0));
        assert!(hit_test(&s, Pos2::new(105.0, 0.0), 10.0));
    }

    #[test]
    fn polygon_uses_even_odd_and_edges() {
        let triangle = vec![
            Pos2::new(100.0, 100.0),
            Pos2::new(200.0, 100.0),
            Pos2::new(150.0, 200.0),
        ];
        let s = shape(ShapeGeometry::Polygon { vertices: triangle });
        assert!(hit_test(&s, Pos2::new(150.0, 150.0), 10.0));
        assert!(hit_test(&s, Pos2::new(150.0, 100.0), 10.0));
        assert!(!hit_test(&s, Pos2::new(105.0, 190.0), 10.0));
    }

    #[test]
    fn handle_test_finds_corner_squares() {
        let s = shape(ShapeGeometry::Rectangle(ShapeBox::new(100.0, 100.0, 50.0, 50.0)));
        assert_eq!(
            handle_test(&s, Pos2::new(151.0, 149.0), 10.0),
            Some(ShapeHandle::Corner(Corner::BottomRight))
        );
        assert_eq!(
            handle_test(&s, Pos2::new(96.0, 104.0), 10.0),
            Some(ShapeHandle::Corner(Corner::TopLeft))
        );
        assert_eq!(handle_test(&s, Pos2::new(125.0, 125.0), 10.0), None);
    }

    #[test]
    fn segment_shapes_expose_endpoints() {
        let s = shape(ShapeGeometry::Line(ShapeBox::new(0.0, 0.0, 40.0, 30.0)));
        assert_eq!(handle_test(&s, Pos2::new(1.0, 1.0), 10.0), Some(ShapeHandle::Start));
        assert_eq!(handle_test(&s, Pos2::new(40.0, 30.0), 10.0), Some(ShapeHandle::End));
    }
}
