//! PDF file access.
//!
//! A thin wrapper over `lopdf` exposing exactly what the renderer needs:
//! page lookup by 1-based number, the page MediaBox (inherited through the
//! page tree), the page's decoded content stream, and its resources.

use std::path::Path;

use lopdf::{Document, Object, ObjectId};

use crate::error::RenderError;
use crate::resources::Resources;

/// Maximum page-tree levels walked when resolving inherited attributes.
const MAX_PARENT_DEPTH: usize = 10;

/// The page rectangle in user-space units, `[x1 y1 x2 y2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaBox {
    /// Left edge.
    pub x1: f64,
    /// Bottom edge.
    pub y1: f64,
    /// Right edge.
    pub x2: f64,
    /// Top edge.
    pub y2: f64,
}

impl MediaBox {
    /// Page width in user-space units.
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Page height in user-space units.
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

/// An opened PDF document with its page list resolved.
pub struct PdfFile {
    doc: Document,
    page_ids: Vec<ObjectId>,
}

impl PdfFile {
    /// Open and parse a PDF file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let doc = Document::load(path.as_ref())
            .map_err(|e| RenderError::Parse(format!("failed to parse PDF: {e}")))?;
        Self::from_document(doc)
    }

    /// Parse a PDF from memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RenderError> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| RenderError::Parse(format!("failed to parse PDF: {e}")))?;
        Self::from_document(doc)
    }

    fn from_document(doc: Document) -> Result<Self, RenderError> {
        if doc.is_encrypted() {
            return Err(RenderError::Parse("encrypted documents are not supported".into()));
        }
        // get_pages returns a BTreeMap keyed by 1-based page number.
        let page_ids = doc.get_pages().values().copied().collect();
        Ok(Self { doc, page_ids })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Object id of a page by 1-based page number.
    pub fn page(&self, number: u32) -> Result<ObjectId, RenderError> {
        if number == 0 {
            return Err(RenderError::Page("page numbers are 1-based".into()));
        }
        self.page_ids
            .get(number as usize - 1)
            .copied()
            .ok_or_else(|| {
                RenderError::Page(format!(
                    "page {number} not found (document has {} pages)",
                    self.page_ids.len()
                ))
            })
    }

    /// The page MediaBox, inherited through the page tree if absent on the
    /// page itself.
    pub fn media_box(&self, page_id: ObjectId) -> Result<MediaBox, RenderError> {
        let obj = self
            .inherited(page_id, b"MediaBox")
            .ok_or_else(|| RenderError::Page("MediaBox not found on page or ancestors".into()))?;
        let array = obj
            .as_array()
            .map_err(|e| RenderError::Page(format!("MediaBox is not an array: {e}")))?;
        if array.len() != 4 {
            return Err(RenderError::Page(format!(
                "MediaBox has {} elements, expected 4",
                array.len()
            )));
        }
        let mut v = [0.0; 4];
        for (slot, obj) in v.iter_mut().zip(array) {
            *slot = number(self.resolve(obj)).ok_or_else(|| {
                RenderError::Page("MediaBox element is not a number".into())
            })?;
        }
        Ok(MediaBox { x1: v[0], y1: v[1], x2: v[2], y2: v[3] })
    }

    /// The page's decoded content stream (all `/Contents` streams,
    /// decompressed and concatenated).
    pub fn content(&self, page_id: ObjectId) -> Result<Vec<u8>, RenderError> {
        self.doc
            .get_page_content(page_id)
            .map_err(|e| RenderError::Page(format!("unreadable content stream: {e}")))
    }

    /// The resource dictionaries visible to a page.
    pub fn resources(&self, page_id: ObjectId) -> Resources<'_> {
        Resources::for_page(&self.doc, page_id)
    }

    /// The underlying lopdf document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Look up a page attribute, walking `/Parent` links when the page
    /// itself lacks it.
    fn inherited(&self, page_id: ObjectId, key: &[u8]) -> Option<&Object> {
        let mut current = page_id;
        for _ in 0..MAX_PARENT_DEPTH {
            let dict = self.doc.get_object(current).and_then(Object::as_dict).ok()?;
            if let Ok(value) = dict.get(key) {
                return Some(self.resolve(value));
            }
            current = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
        }
        None
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).unwrap_or(obj),
            _ => obj,
        }
    }
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(f) => Some(*f as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    /// Build a two-page document; the MediaBox lives on the Pages node so
    /// both pages inherit it.
    fn two_page_doc() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let content_one = doc.add_object(Object::Stream(lopdf::Stream::new(
            dictionary! {},
            b"1 0 0 rg 10 10 50 50 re f".to_vec(),
        )));
        let page_one = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "Contents" => Object::Reference(content_one),
        });

        let content_two = doc.add_object(Object::Stream(lopdf::Stream::new(
            dictionary! {},
            b"0 0 1 RG 5 5 m 100 100 l S".to_vec(),
        )));
        let page_two = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "Contents" => Object::Reference(content_two),
        });

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_one), Object::Reference(page_two)],
                "Count" => 2,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("save in-memory PDF");
        bytes
    }

    #[test]
    fn open_counts_pages() {
        let pdf = PdfFile::from_bytes(&two_page_doc()).unwrap();
        assert_eq!(pdf.page_count(), 2);
    }

    #[test]
    fn pages_are_one_based() {
        let pdf = PdfFile::from_bytes(&two_page_doc()).unwrap();
        assert!(pdf.page(1).is_ok());
        assert!(pdf.page(2).is_ok());
        assert!(matches!(pdf.page(0), Err(RenderError::Page(_))));
        assert!(matches!(pdf.page(3), Err(RenderError::Page(_))));
    }

    #[test]
    fn media_box_is_inherited() {
        let pdf = PdfFile::from_bytes(&two_page_doc()).unwrap();
        let page = pdf.page(1).unwrap();
        let mb = pdf.media_box(page).unwrap();
        assert_eq!(mb, MediaBox { x1: 0.0, y1: 0.0, x2: 612.0, y2: 792.0 });
        assert_eq!(mb.width(), 612.0);
        assert_eq!(mb.height(), 792.0);
    }

    #[test]
    fn content_returns_page_specific_bytes() {
        let pdf = PdfFile::from_bytes(&two_page_doc()).unwrap();
        let one = pdf.content(pdf.page(1).unwrap()).unwrap();
        let two = pdf.content(pdf.page(2).unwrap()).unwrap();
        assert!(one.windows(2).any(|w| w == b"re"));
        assert!(two.windows(2).any(|w| w == b"RG"));
    }

    #[test]
    fn garbage_bytes_fail_to_parse() {
        assert!(matches!(
            PdfFile::from_bytes(b"not a pdf"),
            Err(RenderError::Parse(_))
        ));
    }
}
