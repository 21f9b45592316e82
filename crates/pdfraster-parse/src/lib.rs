//! PDF access and content-stream interpretation for pdfraster.
//!
//! This crate covers everything between the PDF file and the rendering
//! backend: document/page access through `lopdf`, the content-stream
//! tokenizer and operand stack, named resource resolution, the
//! [`RenderDevice`] contract, the operator dispatch interpreter, and the
//! operator-frequency analyzer.
//!
//! # Key types
//!
//! - [`PdfFile`] — an opened document: pages, MediaBox, content streams
//! - [`Tokenizer`] — content-stream bytes → lexemes
//! - [`OperandStack`] — tagged operands between operators
//! - [`Resources`] — `/ExtGState` and `/Font` lookup with inheritance
//! - [`RenderDevice`] — the trait the interpreter drives
//! - [`process_content_stream`] — the interpreter entry point

#![deny(missing_docs)]

pub mod analyzer;
pub mod device;
pub mod document;
pub mod error;
pub mod interpreter;
pub mod operand;
pub mod resources;
pub mod tokenizer;

pub use analyzer::analyze_operators;
pub use device::RenderDevice;
pub use document::{MediaBox, PdfFile};
pub use error::RenderError;
pub use interpreter::process_content_stream;
pub use operand::{Operand, OperandStack};
pub use resources::Resources;
pub use tokenizer::{Token, Tokenizer};

pub use lopdf;
pub use pdfraster_core;
