//! Vector shapes that float above the raster surface until they are burned.

mod list;

pub use list::ShapeList;

use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{EditorError, EditorResult};

/// Stable identity of a shape. Survives snapshot copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(Uuid);

impl ShapeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Circle,
    Line,
    Arrow,
    Polygon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Line,
        ShapeKind::Arrow,
        ShapeKind::Polygon,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::Line => "Line",
            ShapeKind::Arrow => "Arrow",
            ShapeKind::Polygon => "Polygon",
        }
    }

    /// Line-like shapes are a segment, not an area.
    pub fn is_segment(&self) -> bool {
        matches!(self, ShapeKind::Line | ShapeKind::Arrow)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArrowHeads {
    #[default]
    Single,
    Double,
}

/// Origin plus signed extent.
///
/// Width and height go negative while a shape is dragged up or left of its
/// anchor. For segments the box encodes `origin -> origin + extent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ShapeBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Zero-extent box sitting on `anchor`.
    pub fn at(anchor: Pos2) -> Self {
        Self::new(anchor.x, anchor.y, 0.0, 0.0)
    }

    pub fn origin(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }

    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// The corner opposite the origin.
    pub fn end(&self) -> Pos2 {
        self.origin() + self.extent()
    }

    pub fn center(&self) -> Pos2 {
        self.origin() + self.extent() * 0.5
    }

    /// Axis-aligned rect covering the box regardless of extent signs.
    pub fn to_rect(&self) -> Rect {
        Rect::from_two_pos(self.origin(), self.end())
    }

    pub fn normalized(&self) -> Self {
        let rect = self.to_rect();
        Self::new(rect.min.x, rect.min.y, rect.width(), rect.height())
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub stroke_color: Color32,
    pub fill_color: Color32,
    pub filled: bool,
    pub stroke_width: f32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: Color32::from_rgb(0, 255, 0),
            fill_color: Color32::from_rgb(0, 255, 0),
            filled: true,
            stroke_width: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeGeometry {
    Rectangle(ShapeBox),
    Circle(ShapeBox),
    Line(ShapeBox),
    Arrow { bounds: ShapeBox, heads: ArrowHeads },
    Polygon { vertices: Vec<Pos2> },
}

impl ShapeGeometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeGeometry::Rectangle(_) => ShapeKind::Rectangle,
            ShapeGeometry::Circle(_) => ShapeKind::Circle,
            ShapeGeometry::Line(_) => ShapeKind::Line,
            ShapeGeometry::Arrow { .. } => ShapeKind::Arrow,
            ShapeGeometry::Polygon { .. } => ShapeKind::Polygon,
        }
    }

    pub fn shape_box(&self) -> Option<&ShapeBox> {
        match self {
            ShapeGeometry::Rectangle(b) | ShapeGeometry::Circle(b) | ShapeGeometry::Line(b) => {
                Some(b)
            }
            ShapeGeometry::Arrow { bounds, .. } => Some(bounds),
            ShapeGeometry::Polygon { .. } => None,
        }
    }

    pub fn shape_box_mut(&mut self) -> Option<&mut ShapeBox> {
        match self {
            ShapeGeometry::Rectangle(b) | ShapeGeometry::Circle(b) | ShapeGeometry::Line(b) => {
                Some(b)
            }
            ShapeGeometry::Arrow { bounds, .. } => Some(bounds),
            ShapeGeometry::Polygon { .. } => None,
        }
    }

    /// Start and end point for lines and arrows.
    pub fn segment(&self) -> Option<(Pos2, Pos2)> {
        match self {
            ShapeGeometry::Line(b) | ShapeGeometry::Arrow { bounds: b, .. } => {
                Some((b.origin(), b.end()))
            }
            _ => None,
        }
    }

    pub fn bounding_rect(&self) -> Rect {
        match self {
            ShapeGeometry::Polygon { vertices } => {
                let mut rect = Rect::NOTHING;
                for v in vertices {
                    rect.extend_with(*v);
                }
                rect
            }
            other => other
                .shape_box()
                .map(ShapeBox::to_rect)
                .unwrap_or(Rect::NOTHING),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub style: ShapeStyle,
    pub geometry: ShapeGeometry,
}

impl Shape {
    pub fn new(geometry: ShapeGeometry, style: ShapeStyle) -> Self {
        Self {
            id: ShapeId::new(),
            style,
            geometry,
        }
    }

    /// A zero-extent shape anchored at `anchor`, ready to be dragged out.
    ///
    /// Polygons are built vertex by vertex and have no drag form, so this
    /// returns `None` for [`ShapeKind::Polygon`].
    pub fn starting_at(kind: ShapeKind, anchor: Pos2, style: ShapeStyle) -> Option<Self> {
        let bounds = ShapeBox::at(anchor);
        let geometry = match kind {
            ShapeKind::Rectangle => ShapeGeometry::Rectangle(bounds),
            ShapeKind::Circle => ShapeGeometry::Circle(bounds),
            ShapeKind::Line => ShapeGeometry::Line(bounds),
            ShapeKind::Arrow => ShapeGeometry::Arrow {
                bounds,
                heads: ArrowHeads::Single,
            },
            ShapeKind::Polygon => return None,
        };
        Some(Self::new(geometry, style))
    }

    pub fn polygon(vertices: Vec<Pos2>, style: ShapeStyle) -> EditorResult<Self> {
        if vertices.len() < 3 {
            return Err(EditorError::TooFewPolygonVertices {
                count: vertices.len(),
            });
        }
        Ok(Self::new(ShapeGeometry::Polygon { vertices }, style))
    }

    pub fn with_arrow_heads(mut self, new_heads: ArrowHeads) -> Self {
        if let ShapeGeometry::Arrow { heads, .. } = &mut self.geometry {
            *heads = new_heads;
        }
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn bounding_rect(&self) -> Rect {
        self.geometry.bounding_rect()
    }

    /// Reference point used when a shape is first placed.
    ///
    /// Hit-testing a freshly created shape at its anchor always succeeds.
    pub fn anchor(&self) -> Pos2 {
        match &self.geometry {
            ShapeGeometry::Rectangle(b) | ShapeGeometry::Line(b) => b.origin(),
            ShapeGeometry::Arrow { bounds, .. } => bounds.origin(),
            ShapeGeometry::Circle(b) => b.center(),
            ShapeGeometry::Polygon { vertices } => {
                vertices.first().copied().unwrap_or(Pos2::ZERO)
            }
        }
    }
}
