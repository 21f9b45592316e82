//! Named resource resolution.
//!
//! Content-stream operators reference fonts and graphics-state dictionaries
//! by name through the page's `/Resources` dictionary. A page may also
//! inherit resources from its ancestors in the page tree; lookups here
//! consult the page's own dictionary first, then each ancestor's, walking
//! `/Parent` links a bounded number of levels.

use lopdf::{Dictionary, Document, Object, ObjectId};

/// Maximum number of page-tree levels consulted for inherited resources.
const MAX_PARENT_DEPTH: usize = 10;

/// Resolved view of a page's resource dictionaries.
pub struct Resources<'a> {
    doc: &'a Document,
    /// Resource dictionaries, nearest (the page's own) first.
    dicts: Vec<&'a Dictionary>,
}

impl<'a> Resources<'a> {
    /// Collect the resource dictionaries visible to `page_id`.
    pub fn for_page(doc: &'a Document, page_id: ObjectId) -> Self {
        let mut dicts = Vec::new();
        let mut current = page_id;

        for _ in 0..MAX_PARENT_DEPTH {
            let Ok(dict) = doc.get_object(current).and_then(Object::as_dict) else {
                break;
            };
            if let Ok(res) = dict.get(b"Resources") {
                if let Ok(res_dict) = resolve(doc, res).as_dict() {
                    dicts.push(res_dict);
                }
            }
            match dict.get(b"Parent").and_then(Object::as_reference) {
                Ok(parent) => current = parent,
                Err(_) => break,
            }
        }

        Self { doc, dicts }
    }

    /// A view with no resource dictionaries. Lookups all miss.
    pub fn empty(doc: &'a Document) -> Self {
        Self { doc, dicts: Vec::new() }
    }

    /// The owning document, for resolving indirect references.
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Resolve an indirect reference; non-references pass through.
    pub fn resolve(&self, obj: &'a Object) -> &'a Object {
        resolve(self.doc, obj)
    }

    /// Look up `/ExtGState/<name>`.
    pub fn ext_g_state(&self, name: &str) -> Option<&'a Dictionary> {
        let entry = self.category_entry(b"ExtGState", name)?;
        self.resolve(entry).as_dict().ok()
    }

    /// Look up `/Font/<name>`.
    ///
    /// Returns the font dictionary together with its object id when the
    /// resource entry is an indirect reference; the id keys the font cache.
    pub fn font(&self, name: &str) -> Option<(Option<ObjectId>, &'a Dictionary)> {
        let entry = self.category_entry(b"Font", name)?;
        let id = entry.as_reference().ok();
        let dict = self.resolve(entry).as_dict().ok()?;
        Some((id, dict))
    }

    /// Numeric value of a (possibly indirect) object.
    pub fn number(&self, obj: &'a Object) -> Option<f64> {
        match self.resolve(obj) {
            Object::Integer(i) => Some(*i as f64),
            Object::Real(f) => Some(*f as f64),
            _ => None,
        }
    }

    fn category_entry(&self, category: &[u8], name: &str) -> Option<&'a Object> {
        for dict in &self.dicts {
            let Ok(cat) = dict.get(category) else { continue };
            let Ok(cat_dict) = self.resolve(cat).as_dict() else {
                continue;
            };
            if let Ok(entry) = cat_dict.get(name.as_bytes()) {
                return Some(entry);
            }
        }
        None
    }
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}
