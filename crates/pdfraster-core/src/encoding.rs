//! Single-byte text encodings.
//!
//! Every graphics-state record owns its own [`EncodingTable`] so a font's
//! `/Differences` array can be applied without touching the shared default.
//! The default table is WinAnsiEncoding as defined by PDF 1.7 Appendix D.

/// A 256-entry map from character code to Unicode codepoint.
///
/// `None` entries are codes the encoding leaves undefined; the renderer
/// falls back to using the byte as a direct glyph index for those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingTable {
    table: [Option<char>; 256],
}

impl Default for EncodingTable {
    fn default() -> Self {
        Self::win_ansi()
    }
}

impl EncodingTable {
    /// The WinAnsiEncoding table.
    pub fn win_ansi() -> Self {
        Self { table: WIN_ANSI_TABLE }
    }

    /// Resolve a `/BaseEncoding` (or bare `/Encoding`) name.
    ///
    /// Only WinAnsiEncoding is carried as a distinct table. The other
    /// standard names (MacRoman, Standard, PDFDoc) share its Latin
    /// repertoire for every code this renderer can act on, so they all
    /// resolve to the WinAnsi table; a font that needs more remaps codes
    /// through `/Differences`.
    pub fn from_base_name(_name: &str) -> Self {
        Self::win_ansi()
    }

    /// Look up the codepoint for a character code.
    pub fn lookup(&self, code: u8) -> Option<char> {
        self.table[code as usize]
    }

    /// Apply a `/Differences` array: each entry re-maps one code to the
    /// character named by a glyph name. Unknown glyph names clear the slot
    /// so the direct-glyph-index fallback applies.
    pub fn apply_differences(&mut self, differences: &[(u8, String)]) {
        for (code, name) in differences {
            self.table[*code as usize] = glyph_name_to_char(name);
        }
    }
}

/// Resolve an Adobe glyph name to its Unicode codepoint.
///
/// Covers the Latin glyph set used by the standard single-byte encodings
/// plus `uniXXXX` names. Returns `None` for anything else.
pub fn glyph_name_to_char(name: &str) -> Option<char> {
    // Single-letter names are themselves (A-Z, a-z).
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphabetic() {
            return Some(c);
        }
    }

    // uniXXXX names carry the codepoint directly.
    if let Some(hex) = name.strip_prefix("uni") {
        if hex.len() == 4 {
            if let Ok(cp) = u32::from_str_radix(hex, 16) {
                return char::from_u32(cp);
            }
        }
    }

    GLYPH_NAMES
        .binary_search_by_key(&name, |&(n, _)| n)
        .ok()
        .map(|i| GLYPH_NAMES[i].1)
}

/// Adobe Glyph List subset, sorted by name for binary search.
static GLYPH_NAMES: &[(&str, char)] = &[
    ("AE", '\u{00C6}'),
    ("Aacute", '\u{00C1}'),
    ("Acircumflex", '\u{00C2}'),
    ("Adieresis", '\u{00C4}'),
    ("Agrave", '\u{00C0}'),
    ("Aring", '\u{00C5}'),
    ("Atilde", '\u{00C3}'),
    ("Ccedilla", '\u{00C7}'),
    ("Eacute", '\u{00C9}'),
    ("Ecircumflex", '\u{00CA}'),
    ("Edieresis", '\u{00CB}'),
    ("Egrave", '\u{00C8}'),
    ("Eth", '\u{00D0}'),
    ("Euro", '\u{20AC}'),
    ("Iacute", '\u{00CD}'),
    ("Icircumflex", '\u{00CE}'),
    ("Idieresis", '\u{00CF}'),
    ("Igrave", '\u{00CC}'),
    ("Ntilde", '\u{00D1}'),
    ("OE", '\u{0152}'),
    ("Oacute", '\u{00D3}'),
    ("Ocircumflex", '\u{00D4}'),
    ("Odieresis", '\u{00D6}'),
    ("Ograve", '\u{00D2}'),
    ("Oslash", '\u{00D8}'),
    ("Otilde", '\u{00D5}'),
    ("Scaron", '\u{0160}'),
    ("Thorn", '\u{00DE}'),
    ("Uacute", '\u{00DA}'),
    ("Ucircumflex", '\u{00DB}'),
    ("Udieresis", '\u{00DC}'),
    ("Ugrave", '\u{00D9}'),
    ("Yacute", '\u{00DD}'),
    ("Ydieresis", '\u{0178}'),
    ("Zcaron", '\u{017D}'),
    ("aacute", '\u{00E1}'),
    ("acircumflex", '\u{00E2}'),
    ("acute", '\u{00B4}'),
    ("adieresis", '\u{00E4}'),
    ("ae", '\u{00E6}'),
    ("agrave", '\u{00E0}'),
    ("ampersand", '&'),
    ("aring", '\u{00E5}'),
    ("asciicircum", '^'),
    ("asciitilde", '~'),
    ("asterisk", '*'),
    ("at", '@'),
    ("atilde", '\u{00E3}'),
    ("backslash", '\\'),
    ("bar", '|'),
    ("braceleft", '{'),
    ("braceright", '}'),
    ("bracketleft", '['),
    ("bracketright", ']'),
    ("brokenbar", '\u{00A6}'),
    ("bullet", '\u{2022}'),
    ("ccedilla", '\u{00E7}'),
    ("cedilla", '\u{00B8}'),
    ("cent", '\u{00A2}'),
    ("circumflex", '\u{02C6}'),
    ("colon", ':'),
    ("comma", ','),
    ("copyright", '\u{00A9}'),
    ("currency", '\u{00A4}'),
    ("dagger", '\u{2020}'),
    ("daggerdbl", '\u{2021}'),
    ("degree", '\u{00B0}'),
    ("dieresis", '\u{00A8}'),
    ("divide", '\u{00F7}'),
    ("dollar", '$'),
    ("eacute", '\u{00E9}'),
    ("ecircumflex", '\u{00EA}'),
    ("edieresis", '\u{00EB}'),
    ("egrave", '\u{00E8}'),
    ("eight", '8'),
    ("ellipsis", '\u{2026}'),
    ("emdash", '\u{2014}'),
    ("endash", '\u{2013}'),
    ("equal", '='),
    ("eth", '\u{00F0}'),
    ("exclam", '!'),
    ("exclamdown", '\u{00A1}'),
    ("five", '5'),
    ("florin", '\u{0192}'),
    ("four", '4'),
    ("fraction", '\u{2044}'),
    ("germandbls", '\u{00DF}'),
    ("grave", '`'),
    ("greater", '>'),
    ("guillemotleft", '\u{00AB}'),
    ("guillemotright", '\u{00BB}'),
    ("guilsinglleft", '\u{2039}'),
    ("guilsinglright", '\u{203A}'),
    ("hungarumlaut", '\u{02DD}'),
    ("hyphen", '-'),
    ("iacute", '\u{00ED}'),
    ("icircumflex", '\u{00EE}'),
    ("idieresis", '\u{00EF}'),
    ("igrave", '\u{00EC}'),
    ("less", '<'),
    ("logicalnot", '\u{00AC}'),
    ("macron", '\u{00AF}'),
    ("minus", '\u{2212}'),
    ("mu", '\u{00B5}'),
    ("multiply", '\u{00D7}'),
    ("nine", '9'),
    ("ntilde", '\u{00F1}'),
    ("numbersign", '#'),
    ("oacute", '\u{00F3}'),
    ("ocircumflex", '\u{00F4}'),
    ("odieresis", '\u{00F6}'),
    ("oe", '\u{0153}'),
    ("ograve", '\u{00F2}'),
    ("one", '1'),
    ("onehalf", '\u{00BD}'),
    ("onequarter", '\u{00BC}'),
    ("onesuperior", '\u{00B9}'),
    ("ordfeminine", '\u{00AA}'),
    ("ordmasculine", '\u{00BA}'),
    ("oslash", '\u{00F8}'),
    ("otilde", '\u{00F5}'),
    ("paragraph", '\u{00B6}'),
    ("parenleft", '('),
    ("parenright", ')'),
    ("percent", '%'),
    ("period", '.'),
    ("periodcentered", '\u{00B7}'),
    ("perthousand", '\u{2030}'),
    ("plus", '+'),
    ("plusminus", '\u{00B1}'),
    ("question", '?'),
    ("questiondown", '\u{00BF}'),
    ("quotedbl", '"'),
    ("quotedblbase", '\u{201E}'),
    ("quotedblleft", '\u{201C}'),
    ("quotedblright", '\u{201D}'),
    ("quoteleft", '\u{2018}'),
    ("quoteright", '\u{2019}'),
    ("quotesinglbase", '\u{201A}'),
    ("quotesingle", '\''),
    ("registered", '\u{00AE}'),
    ("scaron", '\u{0161}'),
    ("section", '\u{00A7}'),
    ("semicolon", ';'),
    ("seven", '7'),
    ("six", '6'),
    ("slash", '/'),
    ("space", ' '),
    ("sterling", '\u{00A3}'),
    ("thorn", '\u{00FE}'),
    ("three", '3'),
    ("threequarters", '\u{00BE}'),
    ("threesuperior", '\u{00B3}'),
    ("tilde", '\u{02DC}'),
    ("trademark", '\u{2122}'),
    ("two", '2'),
    ("twosuperior", '\u{00B2}'),
    ("uacute", '\u{00FA}'),
    ("ucircumflex", '\u{00FB}'),
    ("udieresis", '\u{00FC}'),
    ("ugrave", '\u{00F9}'),
    ("underscore", '_'),
    ("yacute", '\u{00FD}'),
    ("ydieresis", '\u{00FF}'),
    ("yen", '\u{00A5}'),
    ("zcaron", '\u{017E}'),
    ("zero", '0'),
];

/// WinAnsiEncoding (PDF 1.7 Appendix D).
///
/// ASCII and the Latin-1 upper half map to themselves; 0x80–0x9F carries
/// the Windows-1252 extensions; control codes and the five unassigned
/// Windows codes are left undefined.
static WIN_ANSI_TABLE: [Option<char>; 256] = {
    let mut t: [Option<char>; 256] = [None; 256];

    // 0x20–0x7E: ASCII printable, identity.
    let mut i = 0x20;
    while i <= 0x7E {
        t[i] = char::from_u32(i as u32);
        i += 1;
    }

    // 0x80–0x9F: Windows-1252 extensions (0x81, 0x8D, 0x8F, 0x90, 0x9D
    // are unassigned).
    t[0x80] = Some('\u{20AC}'); // Euro
    t[0x82] = Some('\u{201A}'); // quotesinglbase
    t[0x83] = Some('\u{0192}'); // florin
    t[0x84] = Some('\u{201E}'); // quotedblbase
    t[0x85] = Some('\u{2026}'); // ellipsis
    t[0x86] = Some('\u{2020}'); // dagger
    t[0x87] = Some('\u{2021}'); // daggerdbl
    t[0x88] = Some('\u{02C6}'); // circumflex
    t[0x89] = Some('\u{2030}'); // perthousand
    t[0x8A] = Some('\u{0160}'); // Scaron
    t[0x8B] = Some('\u{2039}'); // guilsinglleft
    t[0x8C] = Some('\u{0152}'); // OE
    t[0x8E] = Some('\u{017D}'); // Zcaron
    t[0x91] = Some('\u{2018}'); // quoteleft
    t[0x92] = Some('\u{2019}'); // quoteright
    t[0x93] = Some('\u{201C}'); // quotedblleft
    t[0x94] = Some('\u{201D}'); // quotedblright
    t[0x95] = Some('\u{2022}'); // bullet
    t[0x96] = Some('\u{2013}'); // endash
    t[0x97] = Some('\u{2014}'); // emdash
    t[0x98] = Some('\u{02DC}'); // tilde
    t[0x99] = Some('\u{2122}'); // trademark
    t[0x9A] = Some('\u{0161}'); // scaron
    t[0x9B] = Some('\u{203A}'); // guilsinglright
    t[0x9C] = Some('\u{0153}'); // oe
    t[0x9E] = Some('\u{017E}'); // zcaron
    t[0x9F] = Some('\u{0178}'); // Ydieresis

    // 0xA0–0xFF: Latin-1 upper half, identity.
    let mut i = 0xA0;
    while i <= 0xFF {
        t[i] = char::from_u32(i as u32);
        i += 1;
    }

    t
};

#[cfg(test)]
mod tests {
    use super::*;

    // --- WinAnsi table ---

    #[test]
    fn ascii_printable_is_identity() {
        let enc = EncodingTable::win_ansi();
        assert_eq!(enc.lookup(b'A'), Some('A'));
        assert_eq!(enc.lookup(b' '), Some(' '));
        assert_eq!(enc.lookup(b'~'), Some('~'));
    }

    #[test]
    fn windows_extensions_present() {
        let enc = EncodingTable::win_ansi();
        assert_eq!(enc.lookup(0x80), Some('\u{20AC}')); // Euro
        assert_eq!(enc.lookup(0x93), Some('\u{201C}')); // left double quote
        assert_eq!(enc.lookup(0x97), Some('\u{2014}')); // em dash
    }

    #[test]
    fn unassigned_codes_are_none() {
        let enc = EncodingTable::win_ansi();
        for code in [0x00, 0x1F, 0x7F, 0x81, 0x8D, 0x8F, 0x90, 0x9D] {
            assert_eq!(enc.lookup(code), None, "code {code:#04x}");
        }
    }

    #[test]
    fn latin1_upper_half_is_identity() {
        let enc = EncodingTable::win_ansi();
        assert_eq!(enc.lookup(0xE9), Some('\u{00E9}')); // eacute
        assert_eq!(enc.lookup(0xFF), Some('\u{00FF}')); // ydieresis
    }

    #[test]
    fn default_is_win_ansi() {
        assert_eq!(EncodingTable::default(), EncodingTable::win_ansi());
    }

    // --- Differences ---

    #[test]
    fn differences_override_single_codes() {
        let mut enc = EncodingTable::win_ansi();
        enc.apply_differences(&[(65, "bullet".to_string())]);
        assert_eq!(enc.lookup(65), Some('\u{2022}'));
        assert_eq!(enc.lookup(66), Some('B')); // untouched
    }

    #[test]
    fn unknown_difference_name_clears_slot() {
        let mut enc = EncodingTable::win_ansi();
        enc.apply_differences(&[(65, "g1234".to_string())]);
        assert_eq!(enc.lookup(65), None);
    }

    // --- Glyph names ---

    #[test]
    fn single_letter_names_map_to_themselves() {
        assert_eq!(glyph_name_to_char("A"), Some('A'));
        assert_eq!(glyph_name_to_char("z"), Some('z'));
    }

    #[test]
    fn common_names_resolve() {
        assert_eq!(glyph_name_to_char("space"), Some(' '));
        assert_eq!(glyph_name_to_char("zero"), Some('0'));
        assert_eq!(glyph_name_to_char("eacute"), Some('\u{00E9}'));
        assert_eq!(glyph_name_to_char("Euro"), Some('\u{20AC}'));
        assert_eq!(glyph_name_to_char("quotedblleft"), Some('\u{201C}'));
    }

    #[test]
    fn uni_names_resolve() {
        assert_eq!(glyph_name_to_char("uni20AC"), Some('\u{20AC}'));
        assert_eq!(glyph_name_to_char("uni0041"), Some('A'));
    }

    #[test]
    fn unknown_names_return_none() {
        assert_eq!(glyph_name_to_char("g42"), None);
        assert_eq!(glyph_name_to_char(""), None);
    }

    #[test]
    fn glyph_name_table_is_sorted() {
        for pair in GLYPH_NAMES.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} !< {}", pair[0].0, pair[1].0);
        }
    }
}
