use egui::{Color32, Pos2};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::error::{EditorError, EditorResult};
use crate::render::raster;
use crate::shape::Shape;

/// Operations that change the raster's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometricOp {
    FlipHorizontal,
    FlipVertical,
    /// Quarter turn clockwise.
    Rotate90,
    ResizeTo { width: u32, height: u32 },
    CropTo { x: u32, y: u32, width: u32, height: u32 },
}

/// The committed pixel buffer.
///
/// While a color filter session is open, `filter_base` holds the pixels the
/// filter reads from and `pixels` holds the filtered output. Any other
/// mutation settles the session first.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
    filter_base: Option<RgbaImage>,
}

impl RasterSurface {
    pub fn new(pixels: RgbaImage) -> EditorResult<Self> {
        check_dimensions(pixels.width(), pixels.height())?;
        Ok(Self {
            pixels,
            filter_base: None,
        })
    }

    pub fn blank(width: u32, height: u32, color: Color32) -> EditorResult<Self> {
        check_dimensions(width, height)?;
        Self::new(RgbaImage::from_pixel(
            width,
            height,
            Rgba(color.to_srgba_unmultiplied()),
        ))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Mutable access to the committed pixels. Settles any open filter session.
    pub fn pixels_mut(&mut self) -> &mut RgbaImage {
        self.settle();
        &mut self.pixels
    }

    /// Swaps in a whole new buffer, dropping any filter session.
    pub fn replace(&mut self, pixels: RgbaImage) -> EditorResult<()> {
        check_dimensions(pixels.width(), pixels.height())?;
        self.pixels = pixels;
        self.filter_base = None;
        Ok(())
    }

    /// Rasterizes `shapes` in z-order into the pixels.
    pub fn burn(&mut self, shapes: &[Shape]) {
        if shapes.is_empty() {
            return;
        }
        let pixels = self.pixels_mut();
        for shape in shapes {
            raster::draw_shape(pixels, shape);
        }
    }

    pub fn stroke_segment(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        raster::stroke_segment(self.pixels_mut(), from, to, width, color);
    }

    /// Checks `op` against the current dimensions without touching pixels.
    pub fn validate(&self, op: GeometricOp) -> EditorResult<()> {
        match op {
            GeometricOp::FlipHorizontal | GeometricOp::FlipVertical | GeometricOp::Rotate90 => {
                Ok(())
            }
            GeometricOp::ResizeTo { width, height } => check_dimensions(width, height),
            GeometricOp::CropTo { x, y, width, height } => {
                let inside = x.checked_add(width).is_some_and(|r| r <= self.width())
                    && y.checked_add(height).is_some_and(|b| b <= self.height());
                if width == 0 || height == 0 || !inside {
                    Err(EditorError::EmptyCropRegion)
                } else {
                    Ok(())
                }
            }
        }
    }

    pub fn apply_geometric_transform(&mut self, op: GeometricOp) -> EditorResult<()> {
        self.validate(op)?;
        self.settle();
        self.pixels = match op {
            GeometricOp::FlipHorizontal => imageops::flip_horizontal(&self.pixels),
            GeometricOp::FlipVertical => imageops::flip_vertical(&self.pixels),
            GeometricOp::Rotate90 => imageops::rotate90(&self.pixels),
            GeometricOp::ResizeTo { width, height } => {
                imageops::resize(&self.pixels, width, height, FilterType::Triangle)
            }
            GeometricOp::CropTo { x, y, width, height } => {
                imageops::crop_imm(&self.pixels, x, y, width, height).to_image()
            }
        };
        Ok(())
    }

    /// Maps every pixel's RGB through `f`, reading from the committed base.
    ///
    /// Calling this repeatedly with different functions never compounds: each
    /// call starts from the pixels as they were when the session opened. The
    /// output buffer is reused.
    pub fn apply_color_transform(&mut self, f: impl Fn([u8; 3]) -> [u8; 3]) {
        let Self {
            pixels,
            filter_base,
        } = self;
        let base = filter_base.get_or_insert_with(|| pixels.clone());
        for (dst, src) in pixels.pixels_mut().zip(base.pixels()) {
            let [r, g, b] = f([src[0], src[1], src[2]]);
            dst.0 = [r, g, b, src[3]];
        }
    }

    pub fn has_pending_filter(&self) -> bool {
        self.filter_base.is_some()
    }

    /// Makes the filtered pixels the committed buffer.
    pub fn settle(&mut self) {
        self.filter_base = None;
    }

    /// Throws away the filtered output, restoring the committed buffer.
    pub fn discard_filter(&mut self) {
        if let Some(base) = self.filter_base.take() {
            self.pixels = base;
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> EditorResult<()> {
    if width == 0 || height == 0 {
        Err(EditorError::InvalidDimensions { width, height })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RasterSurface {
        let img = RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        RasterSurface::new(img).unwrap()
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            RasterSurface::blank(0, 10, Color32::BLACK),
            Err(EditorError::InvalidDimensions { width: 0, height: 10 })
        ));
    }

    #[test]
    fn rotate_swaps_dimensions() {
        let mut s = gradient(40, 20);
        s.apply_geometric_transform(GeometricOp::Rotate90).unwrap();
        assert_eq!((s.width(), s.height()), (20, 40));
        // Clockwise: the old bottom-left corner becomes the top-left.
        assert_eq!(s.pixels().get_pixel(0, 0).0, [0, 19, 0, 255]);
    }

    #[test]
    fn flip_horizontal_mirrors_columns() {
        let mut s = gradient(10, 10);
        s.apply_geometric_transform(GeometricOp::FlipHorizontal).unwrap();
        assert_eq!(s.pixels().get_pixel(0, 3).0, [9, 3, 0, 255]);
    }

    #[test]
    fn crop_outside_bounds_is_rejected() {
        let mut s = gradient(10, 10);
        let result = s.apply_geometric_transform(GeometricOp::CropTo {
            x: 5,
            y: 5,
            width: 10,
            height: 2,
        });
        assert!(matches!(result, Err(EditorError::EmptyCropRegion)));
        assert_eq!(s.width(), 10);
    }

    #[test]
    fn color_transform_reads_from_base() {
        let mut s = gradient(4, 4);
        s.apply_color_transform(|[r, g, b]| [r.saturating_add(100), g, b]);
        s.apply_color_transform(|[r, g, b]| [r.saturating_add(10), g, b]);
        assert_eq!(s.pixels().get_pixel(1, 0).0, [11, 0, 0, 255]);

        s.discard_filter();
        assert_eq!(s.pixels().get_pixel(1, 0).0, [1, 0, 0, 255]);
    }

    #[test]
    fn settling_commits_the_filtered_pixels() {
        let mut s = gradient(4, 4);
        s.apply_color_transform(|[r, g, b]| [r.saturating_add(10), g, b]);
        s.settle();
        s.apply_color_transform(|[r, g, b]| [r.saturating_add(10), g, b]);
        assert_eq!(s.pixels().get_pixel(1, 0).0, [21, 0, 0, 255]);
    }
}
