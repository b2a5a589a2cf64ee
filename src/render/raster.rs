//! CPU rasterization of shapes, strokes and overlay marks into an RGBA buffer.
//!
//! Each primitive is a signed-distance function evaluated at pixel centers
//! inside its bounding box, with a one pixel linear ramp for edge coverage.

use egui::{Color32, Pos2, Rect, Vec2};
use image::RgbaImage;

use crate::geometry::hit_testing::{distance_to_ring, distance_to_segment, polygon_contains};
use crate::shape::{ArrowHeads, Shape, ShapeGeometry, ShapeStyle};

const ARROW_HEAD_ANGLE: f32 = std::f32::consts::PI / 6.0;
const MIN_ARROW_HEAD: f32 = 12.0;

pub const HANDLE_FILL: Color32 = Color32::from_rgb(30, 120, 255);
pub const HANDLE_BORDER: Color32 = Color32::WHITE;

/// Source-over blend of `color`, scaled by `coverage`, onto one pixel.
pub fn blend_pixel(img: &mut RgbaImage, x: u32, y: u32, color: Color32, coverage: f32) {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let src_a = a as f32 / 255.0 * coverage.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let dst = img.get_pixel_mut(x, y);
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return;
    }
    let blend = |src: u8, dst: u8| {
        let src_f = src as f32 / 255.0;
        let dst_f = dst as f32 / 255.0;
        ((src_f * src_a + dst_f * dst_a * (1.0 - src_a)) / out_a * 255.0)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    dst.0 = [
        blend(r, dst[0]),
        blend(g, dst[1]),
        blend(b, dst[2]),
        (out_a * 255.0).round() as u8,
    ];
}

/// Coverage of a pixel center at signed distance `d` from an edge.
fn edge_coverage(d: f32) -> f32 {
    (0.5 - d).clamp(0.0, 1.0)
}

fn paint_region(img: &mut RgbaImage, bounds: Rect, color: Color32, coverage: impl Fn(Pos2) -> f32) {
    if !bounds.is_finite() || color.a() == 0 {
        return;
    }
    let min_x = bounds.min.x.floor().max(0.0) as u32;
    let min_y = bounds.min.y.floor().max(0.0) as u32;
    let max_x = bounds.max.x.ceil().min(img.width() as f32).max(0.0) as u32;
    let max_y = bounds.max.y.ceil().min(img.height() as f32).max(0.0) as u32;
    for y in min_y..max_y {
        for x in min_x..max_x {
            let c = coverage(Pos2::new(x as f32 + 0.5, y as f32 + 0.5));
            if c > 0.0 {
                blend_pixel(img, x, y, color, c);
            }
        }
    }
}

fn sdf_box(p: Pos2, rect: Rect) -> f32 {
    let c = rect.center();
    let d = Vec2::new(
        (p.x - c.x).abs() - rect.width() / 2.0,
        (p.y - c.y).abs() - rect.height() / 2.0,
    );
    let outside = Vec2::new(d.x.max(0.0), d.y.max(0.0)).length();
    let inside = d.x.max(d.y).min(0.0);
    outside + inside
}

fn sdf_ellipse(p: Pos2, rect: Rect) -> f32 {
    let rx = rect.width() / 2.0;
    let ry = rect.height() / 2.0;
    if rx < 0.5 || ry < 0.5 {
        return sdf_box(p, rect);
    }
    let c = rect.center();
    let nx = (p.x - c.x) / rx;
    let ny = (p.y - c.y) / ry;
    let len = (nx * nx + ny * ny).sqrt();
    if len < 1e-8 {
        return -rx.min(ry);
    }
    let scale = (rx * rx * ny * ny + ry * ry * nx * nx).sqrt() / (rx * ry * len);
    (len - 1.0) / scale
}

fn sdf_polygon(p: Pos2, vertices: &[Pos2]) -> f32 {
    let d = distance_to_ring(vertices, p);
    if polygon_contains(vertices, p) { -d } else { d }
}

/// Fills and outlines a closed region described by `sdf`.
fn paint_area(img: &mut RgbaImage, bounds: Rect, style: &ShapeStyle, sdf: impl Fn(Pos2) -> f32) {
    let half = style.stroke_width / 2.0;
    let reach = bounds.expand(half + 1.0);
    if style.filled {
        paint_region(img, reach, style.fill_color, |p| edge_coverage(sdf(p)));
    }
    if style.stroke_width > 0.0 {
        paint_region(img, reach, style.stroke_color, |p| {
            edge_coverage(sdf(p).abs() - half)
        });
    }
}

/// Thick segment with round caps.
pub fn stroke_segment(img: &mut RgbaImage, a: Pos2, b: Pos2, width: f32, color: Color32) {
    let half = (width / 2.0).max(0.5);
    let bounds = Rect::from_two_pos(a, b).expand(half + 1.0);
    paint_region(img, bounds, color, |p| {
        edge_coverage(distance_to_segment(p, a, b) - half)
    });
}

pub fn stroke_polyline(img: &mut RgbaImage, points: &[Pos2], width: f32, color: Color32) {
    for pair in points.windows(2) {
        stroke_segment(img, pair[0], pair[1], width, color);
    }
}

fn rotate_vec(vec: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(vec.x * cos - vec.y * sin, vec.x * sin + vec.y * cos)
}

fn arrow_head(img: &mut RgbaImage, tip: Pos2, from: Pos2, width: f32, color: Color32) {
    let dir = tip - from;
    if dir.length() < f32::EPSILON {
        return;
    }
    let back = -dir.normalized() * (width * 4.0).max(MIN_ARROW_HEAD);
    stroke_segment(img, tip, tip + rotate_vec(back, ARROW_HEAD_ANGLE), width, color);
    stroke_segment(img, tip, tip + rotate_vec(back, -ARROW_HEAD_ANGLE), width, color);
}

pub fn draw_shape(img: &mut RgbaImage, shape: &Shape) {
    let style = &shape.style;
    match &shape.geometry {
        ShapeGeometry::Rectangle(b) => {
            let rect = b.to_rect();
            paint_area(img, rect, style, |p| sdf_box(p, rect));
        }
        ShapeGeometry::Circle(b) => {
            let rect = b.to_rect();
            paint_area(img, rect, style, |p| sdf_ellipse(p, rect));
        }
        ShapeGeometry::Line(b) => {
            stroke_segment(img, b.origin(), b.end(), style.stroke_width, style.stroke_color);
        }
        ShapeGeometry::Arrow { bounds, heads } => {
            let (start, end) = (bounds.origin(), bounds.end());
            stroke_segment(img, start, end, style.stroke_width, style.stroke_color);
            arrow_head(img, end, start, style.stroke_width, style.stroke_color);
            if *heads == ArrowHeads::Double {
                arrow_head(img, start, end, style.stroke_width, style.stroke_color);
            }
        }
        ShapeGeometry::Polygon { vertices } => {
            let bounds = shape.bounding_rect();
            paint_area(img, bounds, style, |p| sdf_polygon(p, vertices));
        }
    }
}

/// Solid fill of every pixel whose center lies in `rect`.
pub fn fill_rect(img: &mut RgbaImage, rect: Rect, color: Color32) {
    paint_region(img, rect, color, |p| {
        if rect.contains(p) { 1.0 } else { 0.0 }
    });
}

pub fn outline_rect(img: &mut RgbaImage, rect: Rect, width: f32, color: Color32) {
    let corners = [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()];
    for i in 0..4 {
        stroke_segment(img, corners[i], corners[(i + 1) % 4], width, color);
    }
}

/// Square grab handle centered on `center`.
pub fn draw_handle(img: &mut RgbaImage, center: Pos2, size: f32) {
    let rect = crate::widgets::handle_rect(center, size);
    fill_rect(img, rect, HANDLE_FILL);
    outline_rect(img, rect, 1.0, HANDLE_BORDER);
}
