//! Fill rules and text rendering modes.

/// Path fill rule.
///
/// The nonzero winding rule is the device default; the even-odd painting
/// and clipping operators select [`FillRule::EvenOdd`] for a single
/// operation only, after which the device rule reverts to nonzero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// A point is inside if its winding number is non-zero.
    #[default]
    Nonzero,
    /// A point is inside if a ray from it crosses the path an odd number
    /// of times.
    EvenOdd,
}

/// Text rendering mode set by the `Tr` operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextRenderMode {
    /// Fill glyph outlines (the default).
    #[default]
    Fill = 0,
    /// Stroke glyph outlines.
    Stroke = 1,
    /// Fill, then stroke.
    FillStroke = 2,
    /// Paint nothing (text still advances).
    Invisible = 3,
    /// Fill and add to the clipping path.
    FillClip = 4,
    /// Stroke and add to the clipping path.
    StrokeClip = 5,
    /// Fill, stroke, and add to the clipping path.
    FillStrokeClip = 6,
    /// Add to the clipping path only.
    Clip = 7,
}

impl TextRenderMode {
    /// Resolve an integer operand to a mode. Values outside 0–7 return
    /// `None` and leave the current mode unchanged.
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Fill),
            1 => Some(Self::Stroke),
            2 => Some(Self::FillStroke),
            3 => Some(Self::Invisible),
            4 => Some(Self::FillClip),
            5 => Some(Self::StrokeClip),
            6 => Some(Self::FillStrokeClip),
            7 => Some(Self::Clip),
            _ => None,
        }
    }

    /// Whether glyphs in this mode are filled.
    pub fn fills(self) -> bool {
        matches!(self, Self::Fill | Self::FillStroke | Self::FillClip | Self::FillStrokeClip)
    }

    /// Whether glyphs in this mode are stroked.
    pub fn strokes(self) -> bool {
        matches!(self, Self::Stroke | Self::FillStroke | Self::StrokeClip | Self::FillStrokeClip)
    }
}
