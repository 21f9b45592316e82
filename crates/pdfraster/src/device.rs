//! The raster rendering device.
//!
//! [`RasterDevice`] is the canonical [`RenderDevice`] backend: a tiny-skia
//! pixmap plus the graphics-state stack, the current path, and the text
//! object model. The base transform maps PDF user space (origin at the
//! bottom-left of the MediaBox) to image space at `dpi / 72` scale, with
//! the y axis flipped; the CTM is applied to path points and glyph
//! outlines on top of it.

use std::mem;
use std::path::Path;
use std::sync::Arc;

use owned_ttf_parser::{GlyphId, OutlineBuilder};
use pdfraster_core::{ColorSpace, FillRule, Matrix, Point, Rgb, TextRenderMode, cmyk_to_rgb};
use pdfraster_parse::{MediaBox, Operand, RenderDevice, RenderError, Resources};
use tiny_skia::{Mask, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};
use tracing::{debug, trace, warn};

use crate::font::{FontCache, LoadedFont};
use crate::state::{GraphicsState, GraphicsStateStack};

/// Raster backend rendering to an RGBA pixmap.
pub struct RasterDevice {
    pixmap: Pixmap,
    /// User space → pixel space: `dpi/72` scale, y flip, MediaBox origin.
    base: Transform,
    /// `dpi / 72`, for hairline width fallbacks.
    scale: f64,
    states: GraphicsStateStack,
    /// Current path, in page space (CTM already applied).
    path: PathBuilder,
    /// Active fill rule; even-odd operators set it for one call only.
    fill_rule: FillRule,
    fonts: FontCache,
}

impl RasterDevice {
    /// Create a device for one page at the given resolution. The surface
    /// is `round(width · dpi/72) × round(height · dpi/72)` pixels, filled
    /// white.
    pub fn new(media_box: MediaBox, dpi: u32) -> Result<Self, RenderError> {
        let scale = f64::from(dpi) / 72.0;
        let width = (media_box.width() * scale).round().max(1.0) as u32;
        let height = (media_box.height() * scale).round().max(1.0) as u32;

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RenderError::Image(format!("cannot allocate a {width}x{height} surface"))
        })?;
        pixmap.fill(tiny_skia::Color::WHITE);

        // Pixel (x', y') = (s·(x − x1), H − s·(y − y1)).
        let base = Transform::from_row(
            scale as f32,
            0.0,
            0.0,
            -(scale as f32),
            (-media_box.x1 * scale) as f32,
            (f64::from(height) + media_box.y1 * scale) as f32,
        );

        debug!(width, height, scale, "created raster surface");

        Ok(Self {
            pixmap,
            base,
            scale,
            states: GraphicsStateStack::new(),
            path: PathBuilder::new(),
            fill_rule: FillRule::Nonzero,
            fonts: FontCache::new(),
        })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// The rendered surface.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// The current graphics state.
    pub fn state(&self) -> &GraphicsState {
        self.states.current()
    }

    /// Saved-state count; zero for a balanced stream.
    pub fn state_depth(&self) -> usize {
        self.states.depth()
    }

    /// Whether the current path has no segments.
    pub fn path_is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The device fill rule. Nonzero except inside an even-odd paint call.
    pub fn current_fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    /// Straight (demultiplied) RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        let p = self.pixmap.pixel(x, y)?.demultiply();
        Some((p.red(), p.green(), p.blue(), p.alpha()))
    }

    /// Encode the surface as PNG at `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        self.pixmap
            .save_png(path.as_ref())
            .map_err(|e| RenderError::Image(format!("unable to write PNG: {e}")))
    }

    // --- Internal helpers ---

    /// Apply the CTM to a user-space point, yielding page-space pixels'
    /// input coordinates.
    fn user_to_page(&self, x: f64, y: f64) -> (f32, f32) {
        let p = self.states.current().ctm.transform_point(Point::new(x, y));
        (p.x as f32, p.y as f32)
    }

    fn skia_fill_rule(&self) -> tiny_skia::FillRule {
        match self.fill_rule {
            FillRule::Nonzero => tiny_skia::FillRule::Winding,
            FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
        }
    }

    /// Fill the current path with the active rule, optionally keeping it,
    /// then reset the rule to nonzero.
    fn paint_fill(&mut self, preserve: bool) {
        let rule = self.skia_fill_rule();
        let finished = if preserve {
            self.path.clone().finish()
        } else {
            mem::replace(&mut self.path, PathBuilder::new()).finish()
        };

        if let Some(path) = finished {
            let gs = self.states.current();
            let paint = make_paint(gs.fill_rgb, gs.fill_alpha);
            self.pixmap.fill_path(
                &path,
                &paint,
                rule,
                self.base,
                self.states.current().clip.as_ref(),
            );
        }

        self.fill_rule = FillRule::Nonzero;
    }

    /// Intersect the clip mask with the current path, consuming it.
    fn apply_clip(&mut self, rule: FillRule) {
        self.fill_rule = rule;
        let skia_rule = self.skia_fill_rule();
        let finished = mem::replace(&mut self.path, PathBuilder::new()).finish();

        if let Some(path) = finished {
            let width = self.pixmap.width();
            let height = self.pixmap.height();
            let base = self.base;
            let gs = self.states.current_mut();
            match gs.clip.as_mut() {
                Some(mask) => mask.intersect_path(&path, skia_rule, true, base),
                None => {
                    if let Some(mut mask) = Mask::new(width, height) {
                        mask.fill_path(&path, skia_rule, true, base);
                        gs.clip = Some(mask);
                    }
                }
            }
        }

        self.fill_rule = FillRule::Nonzero;
    }

    /// Paint one glyph outline under `base × CTM × Tm × scale(size/upem)`.
    fn draw_glyph(&mut self, font: &Arc<LoadedFont>, glyph: GlyphId) {
        let gs = self.states.current();
        let mode = gs.render_mode;
        if !mode.fills() && !mode.strokes() {
            return;
        }

        let face = font.face();
        let mut outline = OutlinePath::new();
        if face.outline_glyph(glyph, &mut outline).is_none() {
            return;
        }
        let Some(path) = outline.builder.finish() else {
            return;
        };

        let glyph_scale = gs.font_size / font.units_per_em();
        let to_page = Matrix::scale(glyph_scale, glyph_scale)
            .concat(&gs.text_matrix)
            .concat(&gs.ctm);
        let transform = self.base.pre_concat(to_skia(&to_page));

        if mode.fills() {
            let paint = make_paint(gs.fill_rgb, gs.fill_alpha);
            self.pixmap.fill_path(
                &path,
                &paint,
                tiny_skia::FillRule::Winding,
                transform,
                self.states.current().clip.as_ref(),
            );
        }
        if mode.strokes() {
            let gs = self.states.current();
            let paint = make_paint(gs.stroke_rgb, gs.stroke_alpha);
            // The path is in glyph units; compensate the stroke width for
            // the glyph scale folded into the transform.
            let width = if glyph_scale > 0.0 { gs.line_width / glyph_scale } else { gs.line_width };
            let mut stroke = Stroke::default();
            stroke.width = width.max(f64::EPSILON) as f32;
            self.pixmap.stroke_path(
                &path,
                &paint,
                &stroke,
                transform,
                self.states.current().clip.as_ref(),
            );
        }
    }
}

impl RenderDevice for RasterDevice {
    // --- Graphics state ---

    fn save_state(&mut self) {
        self.states.save();
    }

    fn restore_state(&mut self) {
        self.states.restore();
    }

    fn concat_matrix(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        let gs = self.states.current_mut();
        gs.ctm = Matrix::new(a, b, c, d, e, f).concat(&gs.ctm);
        trace!("cm [{a} {b} {c} {d} {e} {f}]");
    }

    fn set_line_width(&mut self, width: f64) {
        self.states.current_mut().line_width = if width.is_nan() { 1.0 } else { width.max(0.0) };
    }

    fn set_dash(&mut self, array: &[f64], phase: f64) {
        let gs = self.states.current_mut();
        if array.iter().any(|v| !v.is_finite() || *v < 0.0) || array.iter().sum::<f64>() == 0.0 {
            // All-zero or malformed patterns mean solid.
            gs.dash_array.clear();
            gs.dash_phase = 0.0;
            return;
        }
        gs.dash_array = array.to_vec();
        gs.dash_phase = phase;
    }

    fn set_fill_rgb(&mut self, r: f64, g: f64, b: f64) {
        let gs = self.states.current_mut();
        gs.fill_rgb = Rgb::new(r, g, b);
        gs.fill_color_space = ColorSpace::DeviceRgb;
    }

    fn set_stroke_rgb(&mut self, r: f64, g: f64, b: f64) {
        let gs = self.states.current_mut();
        gs.stroke_rgb = Rgb::new(r, g, b);
        gs.stroke_color_space = ColorSpace::DeviceRgb;
    }

    fn set_fill_gray(&mut self, gray: f64) {
        let gs = self.states.current_mut();
        gs.fill_rgb = Rgb::gray(gray);
        gs.fill_color_space = ColorSpace::DeviceGray;
    }

    fn set_stroke_gray(&mut self, gray: f64) {
        let gs = self.states.current_mut();
        gs.stroke_rgb = Rgb::gray(gray);
        gs.stroke_color_space = ColorSpace::DeviceGray;
    }

    fn set_fill_cmyk(&mut self, c: f64, m: f64, y: f64, k: f64) {
        let gs = self.states.current_mut();
        gs.fill_rgb = cmyk_to_rgb(c, m, y, k);
        gs.fill_color_space = ColorSpace::DeviceCmyk;
    }

    fn set_stroke_cmyk(&mut self, c: f64, m: f64, y: f64, k: f64) {
        let gs = self.states.current_mut();
        gs.stroke_rgb = cmyk_to_rgb(c, m, y, k);
        gs.stroke_color_space = ColorSpace::DeviceCmyk;
    }

    fn set_fill_color_space(&mut self, name: &str) {
        match ColorSpace::from_name(name) {
            Some(cs) => self.states.current_mut().fill_color_space = cs,
            None => warn!(name, "unsupported fill color space"),
        }
    }

    fn set_stroke_color_space(&mut self, name: &str) {
        match ColorSpace::from_name(name) {
            Some(cs) => self.states.current_mut().stroke_color_space = cs,
            None => warn!(name, "unsupported stroke color space"),
        }
    }

    fn set_ext_g_state(&mut self, resources: &Resources<'_>, name: &str) {
        let Some(dict) = resources.ext_g_state(name) else {
            warn!(name, "ExtGState not found in resources");
            return;
        };
        if let Ok(v) = dict.get(b"LW") {
            if let Some(width) = resources.number(v) {
                self.set_line_width(width);
            }
        }
        if let Ok(v) = dict.get(b"ca") {
            if let Some(alpha) = resources.number(v) {
                self.states.current_mut().fill_alpha = alpha.clamp(0.0, 1.0);
            }
        }
        if let Ok(v) = dict.get(b"CA") {
            if let Some(alpha) = resources.number(v) {
                self.states.current_mut().stroke_alpha = alpha.clamp(0.0, 1.0);
            }
        }
    }

    // --- Path construction ---

    fn move_to(&mut self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let (x, y) = self.user_to_page(x, y);
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let (x, y) = self.user_to_page(x, y);
        self.path.line_to(x, y);
    }

    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        if ![x1, y1, x2, y2, x3, y3].iter().all(|v| v.is_finite()) {
            return;
        }
        let (x1, y1) = self.user_to_page(x1, y1);
        let (x2, y2) = self.user_to_page(x2, y2);
        let (x3, y3) = self.user_to_page(x3, y3);
        self.path.cubic_to(x1, y1, x2, y2, x3, y3);
    }

    fn rectangle(&mut self, x: f64, y: f64, w: f64, h: f64) {
        if ![x, y, w, h].iter().all(|v| v.is_finite()) {
            return;
        }
        // Four explicit corners so the CTM can rotate or shear the box.
        let (x0, y0) = self.user_to_page(x, y);
        let (x1, y1) = self.user_to_page(x + w, y);
        let (x2, y2) = self.user_to_page(x + w, y + h);
        let (x3, y3) = self.user_to_page(x, y + h);
        self.path.move_to(x0, y0);
        self.path.line_to(x1, y1);
        self.path.line_to(x2, y2);
        self.path.line_to(x3, y3);
        self.path.close();
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    // --- Painting ---

    fn stroke(&mut self) {
        let finished = mem::replace(&mut self.path, PathBuilder::new()).finish();

        if let Some(path) = finished {
            let gs = self.states.current();
            let paint = make_paint(gs.stroke_rgb, gs.stroke_alpha);
            let scaled = gs.line_width * gs.ctm.mean_scale();
            // A zero width asks for the thinnest visible line.
            let width = if scaled > 0.0 { scaled } else { 1.0 / self.scale };
            let dash = if gs.dash_array.is_empty() {
                None
            } else {
                let mut pattern: Vec<f32> = gs.dash_array.iter().map(|v| *v as f32).collect();
                if pattern.len() % 2 == 1 {
                    // Odd counts repeat to form on/off pairs.
                    let copy = pattern.clone();
                    pattern.extend_from_slice(&copy);
                }
                StrokeDash::new(pattern, gs.dash_phase as f32)
            };
            let mut stroke = Stroke::default();
            stroke.width = width as f32;
            stroke.dash = dash;
            self.pixmap.stroke_path(
                &path,
                &paint,
                &stroke,
                self.base,
                self.states.current().clip.as_ref(),
            );
        }

        self.fill_rule = FillRule::Nonzero;
    }

    fn fill(&mut self) {
        self.paint_fill(false);
    }

    fn fill_preserve(&mut self) {
        self.paint_fill(true);
    }

    fn fill_even_odd(&mut self) {
        self.fill_rule = FillRule::EvenOdd;
        self.paint_fill(false);
    }

    fn fill_preserve_even_odd(&mut self) {
        self.fill_rule = FillRule::EvenOdd;
        self.paint_fill(true);
    }

    fn end_path(&mut self) {
        self.path = PathBuilder::new();
        self.fill_rule = FillRule::Nonzero;
    }

    // --- Clipping ---

    fn clip(&mut self) {
        self.apply_clip(FillRule::Nonzero);
    }

    fn clip_even_odd(&mut self) {
        self.apply_clip(FillRule::EvenOdd);
    }

    // --- Text ---

    fn begin_text(&mut self) {
        let gs = self.states.current_mut();
        gs.text_matrix = Matrix::identity();
        gs.text_line_matrix = Matrix::identity();
    }

    fn end_text(&mut self) {
        trace!("ET");
    }

    fn set_font(&mut self, resources: &Resources<'_>, name: &str, size: f64) {
        let (font, encoding) = self.fonts.select(resources, name);
        let gs = self.states.current_mut();
        gs.font_name = name.to_string();
        gs.font_size = size;
        gs.font = font;
        gs.encoding = encoding;
    }

    fn set_text_leading(&mut self, leading: f64) {
        self.states.current_mut().text_leading = leading;
    }

    fn set_char_spacing(&mut self, spacing: f64) {
        self.states.current_mut().char_spacing = spacing;
    }

    fn set_word_spacing(&mut self, spacing: f64) {
        self.states.current_mut().word_spacing = spacing;
    }

    fn move_text_cursor(&mut self, tx: f64, ty: f64) {
        let gs = self.states.current_mut();
        gs.text_line_matrix = Matrix::translation(tx, ty).concat(&gs.text_line_matrix);
        gs.text_matrix = gs.text_line_matrix;
    }

    fn next_line(&mut self) {
        let leading = self.states.current().text_leading;
        self.move_text_cursor(0.0, -leading);
    }

    fn set_text_matrix(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        let gs = self.states.current_mut();
        gs.text_matrix = Matrix::new(a, b, c, d, e, f);
        gs.text_line_matrix = gs.text_matrix;
    }

    fn set_text_rendering_mode(&mut self, mode: i64) {
        match TextRenderMode::from_i64(mode) {
            Some(m) => self.states.current_mut().render_mode = m,
            None => warn!(mode, "invalid text rendering mode"),
        }
    }

    fn show_text(&mut self, bytes: &[u8]) -> f64 {
        let Some(font) = self.states.current().font.clone() else {
            trace!("show_text with no font, skipping");
            return 0.0;
        };

        let mut total_advance = 0.0;
        for &byte in bytes {
            let (glyph, advance) = {
                let gs = self.states.current();
                let face = font.face();
                let glyph = gs
                    .encoding
                    .lookup(byte)
                    .and_then(|ch| face.glyph_index(ch))
                    .unwrap_or(GlyphId(u16::from(byte)));
                let units = f64::from(face.glyph_hor_advance(glyph).unwrap_or(0));
                let mut advance = units / font.units_per_em() * gs.font_size + gs.char_spacing;
                if byte == b' ' {
                    advance += gs.word_spacing;
                }
                (glyph, advance)
            };

            self.draw_glyph(&font, glyph);

            let gs = self.states.current_mut();
            gs.text_matrix = Matrix::translation(advance, 0.0).concat(&gs.text_matrix);
            total_advance += advance;
        }
        total_advance
    }

    fn show_text_kerning(&mut self, operands: &[Operand]) {
        for operand in operands {
            match operand {
                Operand::String(bytes) => {
                    self.show_text(bytes);
                }
                Operand::Number(adjustment) => {
                    // Thousandths of text space; positive moves left. The
                    // translation applies to Tm only, never Tlm.
                    let gs = self.states.current_mut();
                    let tx = -adjustment / 1000.0 * gs.font_size;
                    gs.text_matrix = Matrix::translation(tx, 0.0).concat(&gs.text_matrix);
                }
                Operand::Name(_) => {}
            }
        }
    }
}

/// Glyph outline sink building a tiny-skia path in font units.
struct OutlinePath {
    builder: PathBuilder,
}

impl OutlinePath {
    fn new() -> Self {
        Self { builder: PathBuilder::new() }
    }
}

impl OutlineBuilder for OutlinePath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

fn make_paint(color: Rgb, alpha: f64) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(
        tiny_skia::Color::from_rgba(
            color.r as f32,
            color.g as f32,
            color.b as f32,
            alpha.clamp(0.0, 1.0) as f32,
        )
        .unwrap_or(tiny_skia::Color::BLACK),
    );
    paint.anti_alias = true;
    paint
}

fn to_skia(m: &Matrix) -> Transform {
    Transform::from_row(m.a as f32, m.b as f32, m.c as f32, m.d as f32, m.e as f32, m.f as f32)
}
