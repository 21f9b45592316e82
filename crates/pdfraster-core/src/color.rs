//! Device colors and color-space conversion.
//!
//! All colors are held as RGB internally; gray and CMYK operators convert
//! on assignment. Components are clamped to `[0, 1]` on construction so a
//! malformed operand (out of range, NaN) can never reach the backend.

/// An RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    /// Red component.
    pub r: f64,
    /// Green component.
    pub g: f64,
    /// Blue component.
    pub b: f64,
}

impl Rgb {
    /// Create a color, clamping each component to `[0, 1]` (NaN becomes 0).
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: clamp_unit(r),
            g: clamp_unit(g),
            b: clamp_unit(b),
        }
    }

    /// A gray level: all three components set to `level`.
    pub fn gray(level: f64) -> Self {
        Self::new(level, level, level)
    }

    /// Black, the initial fill and stroke color.
    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// White, the page background.
    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::black()
    }
}

/// The device color space a color was last set in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSpace {
    /// Single-component gray (the initial state).
    #[default]
    DeviceGray,
    /// Three-component red/green/blue.
    DeviceRgb,
    /// Four-component cyan/magenta/yellow/black.
    DeviceCmyk,
}

impl ColorSpace {
    /// Resolve a color-space name from a `cs`/`CS` operand.
    ///
    /// Only the device spaces are recognized; anything else (ICCBased,
    /// Indexed, Pattern, ...) returns `None` and the operator is ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "DeviceGray" => Some(Self::DeviceGray),
            "DeviceRGB" => Some(Self::DeviceRgb),
            "DeviceCMYK" => Some(Self::DeviceCmyk),
            _ => None,
        }
    }
}

/// Convert CMYK components to RGB.
///
/// Uses the standard subtractive conversion:
/// `R = (1−c)(1−k), G = (1−m)(1−k), B = (1−y)(1−k)`.
pub fn cmyk_to_rgb(c: f64, m: f64, y: f64, k: f64) -> Rgb {
    let c = clamp_unit(c);
    let m = clamp_unit(m);
    let y = clamp_unit(y);
    let k = clamp_unit(k);
    Rgb::new((1.0 - c) * (1.0 - k), (1.0 - m) * (1.0 - k), (1.0 - y) * (1.0 - k))
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
