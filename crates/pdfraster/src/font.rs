//! Font loading and caching.
//!
//! Fonts resolve through a cascade: the page's `/Font` resource entry, its
//! `/FontDescriptor`'s embedded font streams (`FontFile2`, `FontFile3`,
//! `FontFile` in that order), and finally a fixed list of conventional
//! system font paths. Any candidate that fails to parse falls through to
//! the next; text rendered with no usable font is silently skipped by the
//! device.
//!
//! Parsed faces are cached per device, keyed by the font's PDF object id,
//! so repeated `Tf` selections do not re-parse embedded streams.

use std::collections::HashMap;
use std::sync::Arc;

use owned_ttf_parser::{AsFaceRef, Face, OwnedFace};
use pdfraster_core::EncodingTable;
use pdfraster_parse::Resources;
use pdfraster_parse::lopdf::{Dictionary, Object, ObjectId};
use tracing::{debug, warn};

/// System fonts probed when a PDF font has no usable embedded stream.
pub const FALLBACK_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Helvetica.ttc",
];

/// A parsed font face with its backing bytes.
pub struct LoadedFont {
    face: OwnedFace,
}

impl LoadedFont {
    /// Parse font data. Returns `None` when the bytes are not a usable
    /// TrueType/OpenType face.
    pub fn from_data(data: Vec<u8>) -> Option<Self> {
        match OwnedFace::from_vec(data, 0) {
            Ok(face) => Some(Self { face }),
            Err(e) => {
                debug!(error = %e, "font data failed to parse");
                None
            }
        }
    }

    /// The parsed face.
    pub fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    /// Units per em, guarded against a malformed zero.
    pub fn units_per_em(&self) -> f64 {
        let upem = self.face().units_per_em();
        if upem == 0 { 1000.0 } else { f64::from(upem) }
    }
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("glyphs", &self.face().number_of_glyphs())
            .finish()
    }
}

/// Per-device font cache keyed by PDF object identity.
///
/// Negative results are cached too, so a font that repeatedly fails to
/// load is probed once. The system fallback is resolved at most once per
/// device.
#[derive(Default)]
pub struct FontCache {
    entries: HashMap<ObjectId, Option<Arc<LoadedFont>>>,
    fallback: Option<Option<Arc<LoadedFont>>>,
}

impl FontCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a font resource name to a face and its encoding table.
    ///
    /// The face is `None` when neither an embedded stream nor a system
    /// font could be loaded; the encoding table is still returned (from
    /// the font dictionary if present, WinAnsi otherwise).
    pub fn select(
        &mut self,
        resources: &Resources<'_>,
        name: &str,
    ) -> (Option<Arc<LoadedFont>>, EncodingTable) {
        let Some((id, dict)) = resources.font(name) else {
            warn!(font = name, "font not found in resources, using fallback");
            return (self.fallback(), EncodingTable::win_ansi());
        };

        let encoding = encoding_from_font_dict(resources, dict);

        let embedded = match id {
            Some(id) => {
                if let Some(cached) = self.entries.get(&id) {
                    cached.clone()
                } else {
                    let loaded = load_embedded(resources, dict);
                    self.entries.insert(id, loaded.clone());
                    loaded
                }
            }
            None => load_embedded(resources, dict),
        };

        let font = embedded.or_else(|| self.fallback());
        if font.is_none() {
            warn!(font = name, "no embedded or system font available");
        }
        (font, encoding)
    }

    /// The system fallback font, resolved lazily.
    fn fallback(&mut self) -> Option<Arc<LoadedFont>> {
        if let Some(cached) = &self.fallback {
            return cached.clone();
        }
        let loaded = FALLBACK_FONT_PATHS.iter().find_map(|path| {
            let data = std::fs::read(path).ok()?;
            let font = LoadedFont::from_data(data)?;
            debug!(path, "loaded system fallback font");
            Some(Arc::new(font))
        });
        self.fallback = Some(loaded.clone());
        loaded
    }
}

/// Pull an embedded font stream out of the `/FontDescriptor`, trying each
/// font-file key in turn.
fn load_embedded<'a>(
    resources: &Resources<'a>,
    font_dict: &'a Dictionary,
) -> Option<Arc<LoadedFont>> {
    let descriptor = font_dict
        .get(b"FontDescriptor")
        .ok()
        .map(|o| resources.resolve(o))
        .and_then(|o| o.as_dict().ok())?;

    for key in [b"FontFile2".as_slice(), b"FontFile3".as_slice(), b"FontFile".as_slice()] {
        let Ok(entry) = descriptor.get(key) else { continue };
        let Ok(stream) = resources.resolve(entry).as_stream() else {
            continue;
        };
        let data = if stream.dict.get(b"Filter").is_ok() {
            match stream.decompressed_content() {
                Ok(data) => data,
                Err(e) => {
                    debug!(error = %e, "embedded font stream failed to decode");
                    continue;
                }
            }
        } else {
            stream.content.clone()
        };
        if let Some(font) = LoadedFont::from_data(data) {
            return Some(Arc::new(font));
        }
    }
    None
}

/// Resolve a font dictionary's `/Encoding` entry to a byte → codepoint
/// table: a bare name selects a base encoding; a dictionary may carry
/// `/BaseEncoding` and a `/Differences` array of codes and glyph names.
fn encoding_from_font_dict<'a>(
    resources: &Resources<'a>,
    font_dict: &'a Dictionary,
) -> EncodingTable {
    let Ok(entry) = font_dict.get(b"Encoding") else {
        return EncodingTable::win_ansi();
    };

    match resources.resolve(entry) {
        Object::Name(name) => EncodingTable::from_base_name(&String::from_utf8_lossy(name)),
        Object::Dictionary(enc) => {
            let mut table = match enc.get(b"BaseEncoding").ok().and_then(|o| o.as_name().ok()) {
                Some(base) => EncodingTable::from_base_name(&String::from_utf8_lossy(base)),
                None => EncodingTable::win_ansi(),
            };
            if let Ok(diff) = enc.get(b"Differences") {
                if let Ok(array) = resources.resolve(diff).as_array() {
                    table.apply_differences(&parse_differences(array));
                }
            }
            table
        }
        _ => EncodingTable::win_ansi(),
    }
}

/// Flatten a `/Differences` array (`[code /name /name code /name ...]`)
/// into `(code, glyph name)` pairs.
fn parse_differences(array: &[Object]) -> Vec<(u8, String)> {
    let mut pairs = Vec::new();
    let mut code: u32 = 0;
    for obj in array {
        match obj {
            Object::Integer(i) => code = (*i).clamp(0, 255) as u32,
            Object::Real(f) => code = (*f as i64).clamp(0, 255) as u32,
            Object::Name(name) => {
                if code <= 255 {
                    pairs.push((code as u8, String::from_utf8_lossy(name).into_owned()));
                    code += 1;
                }
            }
            _ => {}
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfraster_parse::lopdf::{Document, dictionary};

    fn resources_with_font(encoding: Object) -> (Document, ObjectId) {
        let mut doc = Document::with_version("1.5");
        let mut font = dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "BaseFont" => "Nonexistent",
        };
        if encoding != Object::Null {
            font.set("Encoding", encoding);
        }
        let font_id = doc.add_object(font);
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => Object::Reference(font_id) },
            },
        });
        (doc, page_id)
    }

    #[test]
    fn garbage_font_data_is_rejected() {
        assert!(LoadedFont::from_data(b"definitely not a font".to_vec()).is_none());
    }

    #[test]
    fn missing_resource_entry_keeps_win_ansi_encoding() {
        let doc = Document::with_version("1.5");
        let resources = Resources::empty(&doc);
        let mut cache = FontCache::new();
        let (_font, encoding) = cache.select(&resources, "F1");
        assert_eq!(encoding.lookup(b'A'), Some('A'));
    }

    #[test]
    fn differences_override_base_encoding() {
        let (doc, page_id) = resources_with_font(Object::Dictionary(dictionary! {
            "BaseEncoding" => "WinAnsiEncoding",
            "Differences" => vec![
                Object::Integer(65),
                Object::Name(b"bullet".to_vec()),
                Object::Name(b"emdash".to_vec()),
            ],
        }));
        let resources = Resources::for_page(&doc, page_id);
        let mut cache = FontCache::new();
        let (_font, encoding) = cache.select(&resources, "F1");
        assert_eq!(encoding.lookup(65), Some('\u{2022}'));
        assert_eq!(encoding.lookup(66), Some('\u{2014}')); // consecutive code
        assert_eq!(encoding.lookup(67), Some('C')); // untouched
    }

    #[test]
    fn named_encoding_resolves() {
        let (doc, page_id) = resources_with_font(Object::Name(b"WinAnsiEncoding".to_vec()));
        let resources = Resources::for_page(&doc, page_id);
        let mut cache = FontCache::new();
        let (_font, encoding) = cache.select(&resources, "F1");
        assert_eq!(encoding.lookup(0x97), Some('\u{2014}'));
    }

    #[test]
    fn parse_differences_handles_runs_and_restarts() {
        let array = vec![
            Object::Integer(10),
            Object::Name(b"a".to_vec()),
            Object::Name(b"b".to_vec()),
            Object::Integer(200),
            Object::Name(b"c".to_vec()),
        ];
        let pairs = parse_differences(&array);
        assert_eq!(
            pairs,
            vec![
                (10, "a".to_string()),
                (11, "b".to_string()),
                (200, "c".to_string()),
            ]
        );
    }
}
