//! Error type for the access layer and rendering lifecycle.
//!
//! Operator handlers never fail (malformed operators are logged and
//! skipped); [`RenderError`] is produced only at lifecycle boundaries:
//! opening a file, locating a page, reading its content stream, and
//! writing the output image.

use thiserror::Error;

/// Error produced by the PDF access layer and the render lifecycle.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be parsed.
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// A page is missing, or lacks required entries (MediaBox, readable
    /// content stream).
    #[error("page error: {0}")]
    Page(String),

    /// A font could not be loaded. Only surfaced from explicit font
    /// queries; during rendering, font failures fall back silently.
    #[error("font error: {0}")]
    Font(String),

    /// Encoding the output image failed.
    #[error("image error: {0}")]
    Image(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.pdf");
        let err: RenderError = io.into();
        assert!(matches!(err, RenderError::Io(_)));
        assert!(err.to_string().contains("missing.pdf"));
    }

    #[test]
    fn display_includes_context() {
        let err = RenderError::Page("page 9 not found".to_string());
        assert_eq!(err.to_string(), "page error: page 9 not found");
    }

    #[test]
    fn implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(RenderError::Parse("bad xref".into()));
        assert!(err.to_string().contains("bad xref"));
    }
}
