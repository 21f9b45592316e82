//! Render PDF pages to PNG images.
//!
//! The interpreter in [`pdfraster_parse`] drives a [`RasterDevice`]: a
//! tiny-skia surface with a graphics-state stack, a path builder, and a
//! text object model backed by ttf-parser glyph outlines.
//!
//! ```no_run
//! use pdfraster::{PdfFile, RenderOptions, render_page};
//!
//! let pdf = PdfFile::open("input.pdf")?;
//! let device = render_page(&pdf, 1, &RenderOptions { dpi: 144 })?;
//! device.save_png("page1.png")?;
//! # Ok::<(), pdfraster::RenderError>(())
//! ```

pub mod device;
pub mod font;
pub mod render;
pub mod state;

pub use device::RasterDevice;
pub use font::{FALLBACK_FONT_PATHS, FontCache, LoadedFont};
pub use render::{RenderOptions, render_page};
pub use state::{GraphicsState, GraphicsStateStack, MAX_STATE_DEPTH};

pub use pdfraster_core::{ColorSpace, EncodingTable, FillRule, Matrix, Rgb, TextRenderMode};
pub use pdfraster_parse::{
    MediaBox, Operand, PdfFile, RenderDevice, RenderError, Resources, analyze_operators,
    process_content_stream,
};
