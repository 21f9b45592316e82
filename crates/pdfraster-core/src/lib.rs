//! Backend-independent data types for pdfraster.
//!
//! This crate holds the pieces of the rendering model that do not depend on
//! a PDF parser or a raster backend: affine matrices (used for the CTM and
//! the text matrices), device colors and color-space conversion, fill rules
//! and text rendering modes, and single-byte text encoding tables.

#![deny(missing_docs)]

pub mod color;
pub mod encoding;
pub mod geometry;
pub mod paint;

pub use color::{ColorSpace, Rgb, cmyk_to_rgb};
pub use encoding::EncodingTable;
pub use geometry::{Matrix, Point};
pub use paint::{FillRule, TextRenderMode};
