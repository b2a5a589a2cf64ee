//! Elementwise color adjustments over RGB. Alpha is never touched.

use serde::{Deserialize, Serialize};

/// Live filter sliders.
///
/// Brightness is an additive offset, contrast scales around mid-gray by
/// `(contrast + 100) / 100`, saturation is a percentage and hue a rotation in
/// degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub hue: f32,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl FilterParams {
    pub const NEUTRAL: FilterParams = FilterParams {
        brightness: 0.0,
        contrast: 0.0,
        saturation: 100.0,
        hue: 0.0,
    };

    pub const BRIGHTNESS_RANGE: std::ops::RangeInclusive<f32> = -100.0..=100.0;
    pub const CONTRAST_RANGE: std::ops::RangeInclusive<f32> = -100.0..=100.0;
    pub const SATURATION_RANGE: std::ops::RangeInclusive<f32> = 0.0..=200.0;
    pub const HUE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=360.0;

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }

    pub fn apply(&self, rgb: [u8; 3]) -> [u8; 3] {
        if self.is_neutral() {
            return rgb;
        }
        let contrast = (self.contrast + 100.0) / 100.0;
        // Out-of-range channels go into HSL as they are; only the output is clamped.
        let adjust = |c: u8| {
            let c = c as f32 + self.brightness;
            (c - 128.0) * contrast + 128.0
        };
        let (r, g, b) = (adjust(rgb[0]), adjust(rgb[1]), adjust(rgb[2]));

        let (mut h, mut s, l) = rgb_to_hsl(r / 255.0, g / 255.0, b / 255.0);
        s *= self.saturation / 100.0;
        h = (h + self.hue / 360.0).rem_euclid(1.0);
        let (r, g, b) = hsl_to_rgb(h, s, l);
        [to_channel(r), to_channel(g), to_channel(b)]
    }
}

/// One-shot looks applied to the committed pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    Grayscale,
    Vintage,
    Vibrant,
    Invert,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Grayscale,
        Preset::Vintage,
        Preset::Vibrant,
        Preset::Invert,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Preset::Grayscale => "Grayscale",
            Preset::Vintage => "Vintage",
            Preset::Vibrant => "Vibrant",
            Preset::Invert => "Invert",
        }
    }

    pub fn apply(&self, [r, g, b]: [u8; 3]) -> [u8; 3] {
        match self {
            Preset::Grayscale => {
                let gray = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
                let gray = gray.round().clamp(0.0, 255.0) as u8;
                [gray, gray, gray]
            }
            Preset::Vintage => [
                (r as f32 * 0.9).round() as u8,
                (g as f32 * 0.85).round() as u8,
                (b as f32 * 0.7).round() as u8,
            ],
            Preset::Vibrant => {
                let (h, s, l) = rgb_to_hsl(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
                let (r, g, b) = hsl_to_rgb(h, (s * 1.5).min(1.0), l);
                [to_channel(r), to_channel(g), to_channel(b)]
            }
            Preset::Invert => [255 - r, 255 - g, 255 - b],
        }
    }
}

fn to_channel(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// RGB (0..1) → HSL with every component in 0..1.
pub fn rgb_to_hsl(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if (max - min).abs() < 1e-6 {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };

    let h = if (max - r).abs() < 1e-6 {
        let h = (g - b) / d;
        if h < 0.0 { h + 6.0 } else { h }
    } else if (max - g).abs() < 1e-6 {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h / 6.0, s, l)
}

pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    if s.abs() < 1e-6 {
        return (l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    (
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
