//! The rendering device contract.
//!
//! The interpreter drives a [`RenderDevice`] through this trait; the
//! canonical implementation is the raster device in the `pdfraster` crate.
//! Every method is infallible from the interpreter's point of view: a
//! device that cannot honor a call (no font loaded, unknown resource name)
//! degrades to a no-op.

use crate::operand::Operand;
use crate::resources::Resources;

/// Operations a rendering backend exposes to the interpreter.
///
/// State mutators affect the current graphics state; `save_state` /
/// `restore_state` bracket it. Path methods append to the device's current
/// path; paint and clip methods consume it (the preserve variants excepted).
/// Text methods maintain the text matrix and text line matrix and paint
/// glyphs.
pub trait RenderDevice {
    // --- Graphics state ---

    /// `q`: push a copy of the current graphics state.
    fn save_state(&mut self);
    /// `Q`: pop back to the previously saved graphics state.
    fn restore_state(&mut self);
    /// `cm`: concatenate a matrix onto the CTM.
    fn concat_matrix(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64);
    /// `w`: set the line width in user-space units.
    fn set_line_width(&mut self, width: f64);
    /// `d`: set the dash pattern (empty array means solid).
    fn set_dash(&mut self, array: &[f64], phase: f64);
    /// `rg`: set the fill color in DeviceRGB.
    fn set_fill_rgb(&mut self, r: f64, g: f64, b: f64);
    /// `RG`: set the stroke color in DeviceRGB.
    fn set_stroke_rgb(&mut self, r: f64, g: f64, b: f64);
    /// `g`: set the fill color in DeviceGray.
    fn set_fill_gray(&mut self, gray: f64);
    /// `G`: set the stroke color in DeviceGray.
    fn set_stroke_gray(&mut self, gray: f64);
    /// `k`: set the fill color in DeviceCMYK.
    fn set_fill_cmyk(&mut self, c: f64, m: f64, y: f64, k: f64);
    /// `K`: set the stroke color in DeviceCMYK.
    fn set_stroke_cmyk(&mut self, c: f64, m: f64, y: f64, k: f64);
    /// `cs`: record the fill color space.
    fn set_fill_color_space(&mut self, name: &str);
    /// `CS`: record the stroke color space.
    fn set_stroke_color_space(&mut self, name: &str);
    /// `gs`: apply an `/ExtGState` dictionary looked up in `resources`.
    fn set_ext_g_state(&mut self, resources: &Resources<'_>, name: &str);

    // --- Path construction ---

    /// `m`: begin a new subpath at `(x, y)`.
    fn move_to(&mut self, x: f64, y: f64);
    /// `l`: straight segment to `(x, y)`.
    fn line_to(&mut self, x: f64, y: f64);
    /// `c`: cubic Bézier to `(x3, y3)` with control points.
    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64);
    /// `re`: append a closed rectangle subpath.
    fn rectangle(&mut self, x: f64, y: f64, w: f64, h: f64);
    /// `h`: close the current subpath.
    fn close_path(&mut self);

    // --- Painting ---

    /// `S`: stroke the current path and clear it.
    fn stroke(&mut self);
    /// `f`: fill the current path (nonzero rule) and clear it.
    fn fill(&mut self);
    /// Fill but keep the current path (first half of `B`).
    fn fill_preserve(&mut self);
    /// `f*`: fill with the even-odd rule and clear the path.
    fn fill_even_odd(&mut self);
    /// Even-odd fill keeping the path (first half of `B*`).
    fn fill_preserve_even_odd(&mut self);
    /// `n`: discard the current path without painting.
    fn end_path(&mut self);

    // --- Clipping ---

    /// `W`: intersect the clip region with the current path (nonzero
    /// rule), consuming the path.
    fn clip(&mut self);
    /// `W*`: as [`clip`](Self::clip) with the even-odd rule.
    fn clip_even_odd(&mut self);

    // --- Text ---

    /// `BT`: begin a text object; text and line matrices reset to identity.
    fn begin_text(&mut self);
    /// `ET`: end the text object.
    fn end_text(&mut self);
    /// `Tf`: select a font from `/Font` in `resources` at `size`.
    fn set_font(&mut self, resources: &Resources<'_>, name: &str, size: f64);
    /// `TL`: set the text leading used by `T*`.
    fn set_text_leading(&mut self, leading: f64);
    /// `Tc`: set character spacing.
    fn set_char_spacing(&mut self, spacing: f64);
    /// `Tw`: set word spacing.
    fn set_word_spacing(&mut self, spacing: f64);
    /// `Td`: translate the text line matrix and restart the text matrix
    /// from it.
    fn move_text_cursor(&mut self, tx: f64, ty: f64);
    /// `T*`: move to the next line using the current leading.
    fn next_line(&mut self);
    /// `Tm`: set the text matrix and text line matrix outright.
    fn set_text_matrix(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64);
    /// `Tr`: set the text rendering mode (0–7).
    fn set_text_rendering_mode(&mut self, mode: i64);
    /// `Tj`: paint a string. Returns the total advance in text-space
    /// units; the text matrix has already been translated by it.
    fn show_text(&mut self, bytes: &[u8]) -> f64;
    /// `TJ`: paint strings interleaved with kerning adjustments. Numbers
    /// translate the text matrix by `-v/1000 × font size`.
    fn show_text_kerning(&mut self, operands: &[Operand]);
}
