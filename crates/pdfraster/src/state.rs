//! The graphics-state record and its save/restore stack.

use pdfraster_core::{ColorSpace, EncodingTable, Matrix, Rgb, TextRenderMode};
use tiny_skia::Mask;
use tracing::warn;

use crate::font::LoadedFont;
use std::sync::Arc;

/// Maximum graphics-state nesting. Streams deeper than this are malformed;
/// further saves are ignored.
pub const MAX_STATE_DEPTH: usize = 64;

/// One graphics-state record: everything `q` saves and `Q` restores.
#[derive(Clone)]
pub struct GraphicsState {
    /// Fill (non-stroking) color.
    pub fill_rgb: Rgb,
    /// Stroke color.
    pub stroke_rgb: Rgb,
    /// Fill alpha from `/ca`, in `[0, 1]`.
    pub fill_alpha: f64,
    /// Stroke alpha from `/CA`, in `[0, 1]`.
    pub stroke_alpha: f64,
    /// Color space the fill color was last set in.
    pub fill_color_space: ColorSpace,
    /// Color space the stroke color was last set in.
    pub stroke_color_space: ColorSpace,
    /// Line width in user-space units.
    pub line_width: f64,
    /// Dash array in user-space units; empty means solid.
    pub dash_array: Vec<f64>,
    /// Dash phase.
    pub dash_phase: f64,
    /// Current transformation matrix (user space → page space).
    pub ctm: Matrix,
    /// Text matrix `Tm`.
    pub text_matrix: Matrix,
    /// Text line matrix `Tlm`.
    pub text_line_matrix: Matrix,
    /// Leading used by `T*`, in unscaled text-space units.
    pub text_leading: f64,
    /// Extra advance per glyph (`Tc`).
    pub char_spacing: f64,
    /// Extra advance per space byte (`Tw`).
    pub word_spacing: f64,
    /// Font size from `Tf`.
    pub font_size: f64,
    /// Resource name of the selected font.
    pub font_name: String,
    /// The loaded font face, if any could be resolved.
    pub font: Option<Arc<LoadedFont>>,
    /// Byte → codepoint map for the selected font.
    pub encoding: EncodingTable,
    /// Text rendering mode (`Tr`).
    pub render_mode: TextRenderMode,
    /// Accumulated clip region, in device pixels. `None` means unclipped.
    pub clip: Option<Mask>,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            fill_rgb: Rgb::black(),
            stroke_rgb: Rgb::black(),
            fill_alpha: 1.0,
            stroke_alpha: 1.0,
            fill_color_space: ColorSpace::DeviceGray,
            stroke_color_space: ColorSpace::DeviceGray,
            line_width: 1.0,
            dash_array: Vec::new(),
            dash_phase: 0.0,
            ctm: Matrix::identity(),
            text_matrix: Matrix::identity(),
            text_line_matrix: Matrix::identity(),
            text_leading: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            font_size: 1.0,
            font_name: String::new(),
            font: None,
            encoding: EncodingTable::win_ansi(),
            render_mode: TextRenderMode::Fill,
            clip: None,
        }
    }
}

/// Bounded stack of graphics states. The top record is the current state;
/// it always exists.
pub struct GraphicsStateStack {
    states: Vec<GraphicsState>,
}

impl Default for GraphicsStateStack {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsStateStack {
    /// A stack holding a single default record.
    pub fn new() -> Self {
        Self { states: vec![GraphicsState::default()] }
    }

    /// The current (top) state.
    pub fn current(&self) -> &GraphicsState {
        self.states.last().expect("state stack never empty")
    }

    /// Mutable access to the current state.
    pub fn current_mut(&mut self) -> &mut GraphicsState {
        self.states.last_mut().expect("state stack never empty")
    }

    /// Number of saved states above the base record. Zero for a balanced
    /// stream at start and end.
    pub fn depth(&self) -> usize {
        self.states.len() - 1
    }

    /// `q`: clone the top record and push it. Ignored past the depth cap.
    pub fn save(&mut self) {
        if self.states.len() >= MAX_STATE_DEPTH {
            warn!("graphics state stack overflow, q ignored");
            return;
        }
        let top = self.current().clone();
        self.states.push(top);
    }

    /// `Q`: pop back to the previous record. Ignored at the base record.
    pub fn restore(&mut self) {
        if self.states.len() == 1 {
            warn!("graphics state stack underflow, Q ignored");
            return;
        }
        self.states.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_matches_pdf_initial_values() {
        let gs = GraphicsState::default();
        assert_eq!(gs.fill_rgb, Rgb::black());
        assert_eq!(gs.stroke_rgb, Rgb::black());
        assert_eq!(gs.line_width, 1.0);
        assert_eq!(gs.fill_alpha, 1.0);
        assert_eq!(gs.stroke_alpha, 1.0);
        assert_eq!(gs.fill_color_space, ColorSpace::DeviceGray);
        assert_eq!(gs.ctm, Matrix::identity());
        assert_eq!(gs.text_matrix, Matrix::identity());
        assert!(gs.dash_array.is_empty());
        assert!(gs.font.is_none());
        assert!(gs.clip.is_none());
    }

    #[test]
    fn save_restore_round_trips_state() {
        let mut stack = GraphicsStateStack::new();
        stack.current_mut().fill_rgb = Rgb::new(1.0, 0.0, 0.0);
        stack.save();
        stack.current_mut().fill_rgb = Rgb::new(0.0, 1.0, 0.0);
        stack.current_mut().line_width = 4.0;
        stack.restore();
        assert_eq!(stack.current().fill_rgb, Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(stack.current().line_width, 1.0);
    }

    #[test]
    fn balanced_saves_return_to_zero_depth() {
        let mut stack = GraphicsStateStack::new();
        assert_eq!(stack.depth(), 0);
        stack.save();
        stack.save();
        assert_eq!(stack.depth(), 2);
        stack.restore();
        stack.restore();
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn underflow_is_ignored() {
        let mut stack = GraphicsStateStack::new();
        stack.current_mut().line_width = 7.0;
        stack.restore();
        stack.restore();
        // Base record is untouched and still current.
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.current().line_width, 7.0);
    }

    #[test]
    fn overflow_is_ignored() {
        let mut stack = GraphicsStateStack::new();
        for _ in 0..MAX_STATE_DEPTH + 16 {
            stack.save();
        }
        assert_eq!(stack.depth(), MAX_STATE_DEPTH - 1);
    }

    #[test]
    fn nested_restores_are_lifo() {
        let mut stack = GraphicsStateStack::new();
        stack.current_mut().line_width = 1.0;
        stack.save();
        stack.current_mut().line_width = 2.0;
        stack.save();
        stack.current_mut().line_width = 3.0;
        stack.restore();
        assert_eq!(stack.current().line_width, 2.0);
        stack.restore();
        assert_eq!(stack.current().line_width, 1.0);
    }
}
