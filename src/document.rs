use image::RgbaImage;

use crate::command::Snapshot;
use crate::error::{EditorError, EditorResult};
use crate::shape::ShapeList;
use crate::surface::{GeometricOp, RasterSurface};

/// The edited image: a raster base plus the shape overlay above it.
#[derive(Debug, Clone, Default)]
pub struct Document {
    surface: Option<RasterSurface>,
    shapes: ShapeList,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces everything with a fresh surface and an empty overlay.
    pub fn load(&mut self, pixels: RgbaImage) -> EditorResult<()> {
        let surface = RasterSurface::new(pixels)?;
        self.surface = Some(surface);
        self.shapes = ShapeList::new();
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> EditorResult<&RasterSurface> {
        self.surface.as_ref().ok_or(EditorError::NoImageLoaded)
    }

    pub fn surface_mut(&mut self) -> EditorResult<&mut RasterSurface> {
        self.surface.as_mut().ok_or(EditorError::NoImageLoaded)
    }

    /// `(width, height)` of the raster, or zero when nothing is loaded.
    pub fn dimensions(&self) -> (u32, u32) {
        self.surface
            .as_ref()
            .map(|s| (s.width(), s.height()))
            .unwrap_or((0, 0))
    }

    pub fn shapes(&self) -> &ShapeList {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut ShapeList {
        &mut self.shapes
    }

    /// Rasterizes every pending shape into the surface and empties the overlay.
    /// Returns how many shapes were burned.
    pub fn burn_shapes(&mut self) -> EditorResult<usize> {
        let surface = self.surface.as_mut().ok_or(EditorError::NoImageLoaded)?;
        let shapes = self.shapes.take_all();
        surface.burn(&shapes);
        Ok(shapes.len())
    }

    /// Burns pending shapes, then applies `op`.
    ///
    /// Shapes never outlive a change of coordinate space. Nothing is burned if
    /// `op` is rejected.
    pub fn apply_geometric_transform(&mut self, op: GeometricOp) -> EditorResult<()> {
        self.surface()?.validate(op)?;
        self.burn_shapes()?;
        self.surface_mut()?.apply_geometric_transform(op)
    }

    pub fn snapshot(&self) -> EditorResult<Snapshot> {
        Ok(Snapshot::new(
            self.surface()?.pixels().clone(),
            self.shapes.to_vec(),
        ))
    }

    /// Copies `snapshot` back in by value. Selection is cleared.
    pub fn restore(&mut self, snapshot: &Snapshot) -> EditorResult<()> {
        let pixels = snapshot.pixels().clone();
        match self.surface.as_mut() {
            Some(surface) => surface.replace(pixels)?,
            None => self.surface = Some(RasterSurface::new(pixels)?),
        }
        self.shapes.restore(snapshot.shapes().to_vec());
        Ok(())
    }
}
