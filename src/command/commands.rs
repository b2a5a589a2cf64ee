use egui::{Color32, Pos2, Rect};

use super::CommandContext;
use crate::error::{EditorError, EditorResult};
use crate::filters::{FilterParams, Preset};
use crate::geometry::transform;
use crate::shape::{Shape, ShapeGeometry, ShapeId};
use crate::surface::GeometricOp;

/// A finalized, user-visible edit.
///
/// Tools produce these when an interaction completes. Executing one either
/// fully succeeds or leaves the document as it was; every successful command
/// is followed by exactly one history snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// End the drag that created a shape, normalizing its box.
    CommitShape { id: ShapeId },

    /// Settle a move or resize of an existing shape.
    UpdateShape {
        id: ShapeId,
        geometry: ShapeGeometry,
    },

    /// Append a closed polygon and select it.
    AddPolygon(Shape),

    /// Freehand pixels are already on the surface; this only marks the release.
    FinishStroke,

    StampText {
        position: Pos2,
        text: String,
        color: Color32,
        size: f32,
    },

    /// Burn shapes, then cut the surface down to `rect` (raster coordinates).
    Crop(Rect),

    Transform(GeometricOp),

    ApplyPreset(Preset),

    /// Commit the filter preview made with these parameters.
    ApplyFilters(FilterParams),

    BurnShapes,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::CommitShape { .. } => "CommitShape",
            Command::UpdateShape { .. } => "UpdateShape",
            Command::AddPolygon(_) => "AddPolygon",
            Command::FinishStroke => "FinishStroke",
            Command::StampText { .. } => "StampText",
            Command::Crop(_) => "Crop",
            Command::Transform(_) => "Transform",
            Command::ApplyPreset(_) => "ApplyPreset",
            Command::ApplyFilters(_) => "ApplyFilters",
            Command::BurnShapes => "BurnShapes",
        }
    }

    /// Crop is a one-shot tool: once applied the active tool is released.
    pub fn ends_tool(&self) -> bool {
        matches!(self, Command::Crop(_))
    }

    pub fn execute(&self, ctx: &mut CommandContext<'_>) -> EditorResult<()> {
        let doc = &mut *ctx.document;
        match self {
            Command::CommitShape { id } => {
                if let Some(shape) = doc.shapes_mut().get_mut(*id) {
                    transform::normalize(&mut shape.geometry);
                }
                Ok(())
            }
            Command::UpdateShape { id, geometry } => {
                if let Some(shape) = doc.shapes_mut().get_mut(*id) {
                    shape.geometry = geometry.clone();
                }
                Ok(())
            }
            Command::AddPolygon(shape) => {
                doc.surface()?;
                doc.shapes_mut().push_selected(shape.clone());
                Ok(())
            }
            Command::FinishStroke => doc.surface().map(|_| ()),
            Command::StampText {
                position,
                text,
                color,
                size,
            } => {
                if text.trim().is_empty() {
                    return Err(EditorError::EmptyText);
                }
                if !ctx.text.is_available() {
                    return Err(EditorError::FontUnavailable);
                }
                doc.burn_shapes()?;
                let pixels = doc.surface_mut()?.pixels_mut();
                ctx.text.stamp(pixels, *position, text, *color, *size)
            }
            Command::Crop(rect) => {
                let op = crop_op(*rect, doc.dimensions())?;
                doc.apply_geometric_transform(op)
            }
            Command::Transform(op) => doc.apply_geometric_transform(*op),
            Command::ApplyPreset(preset) => {
                doc.burn_shapes()?;
                let surface = doc.surface_mut()?;
                surface.settle();
                surface.apply_color_transform(|rgb| preset.apply(rgb));
                surface.settle();
                Ok(())
            }
            Command::ApplyFilters(params) => {
                doc.burn_shapes()?;
                let surface = doc.surface_mut()?;
                if !surface.has_pending_filter() {
                    surface.apply_color_transform(|rgb| params.apply(rgb));
                }
                surface.settle();
                Ok(())
            }
            Command::BurnShapes => doc.burn_shapes().map(|_| ()),
        }
    }
}

/// Rounds a crop rectangle to whole pixels inside a `width x height` raster.
pub fn crop_op(rect: Rect, (width, height): (u32, u32)) -> EditorResult<GeometricOp> {
    let clamp_x = |v: f32| v.round().clamp(0.0, width as f32) as u32;
    let clamp_y = |v: f32| v.round().clamp(0.0, height as f32) as u32;
    let (x0, x1) = (clamp_x(rect.min.x), clamp_x(rect.max.x));
    let (y0, y1) = (clamp_y(rect.min.y), clamp_y(rect.max.y));
    if x1 <= x0 || y1 <= y0 {
        return Err(EditorError::EmptyCropRegion);
    }
    Ok(GeometricOp::CropTo {
        x: x0,
        y: y0,
        width: x1 - x0,
        height: y1 - y0,
    })
}
