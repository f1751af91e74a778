//! Legacy charset resolution and decoding.
//!
//! Charset names come from the locale table and may use either WHATWG labels
//! (`macintosh`, `shift_jis`) or the classic Mac names (`mac-roman`,
//! `x-mac-japanese`). Both resolve to an [`encoding_rs::Encoding`].

use std::fmt;

use encoding_rs::{BIG5, EUC_KR, Encoding, GBK, MACINTOSH, SHIFT_JIS, X_MAC_CYRILLIC};

/// Charset used when a language lists no candidates.
pub const DEFAULT_CHARSET: &str = "macintosh";

/// Mac charset names that have no WHATWG label, mapped to the closest encoding.
const MAC_ALIASES: &[(&str, &Encoding)] = &[
    ("mac-roman", MACINTOSH),
    ("macroman", MACINTOSH),
    ("shift-jis", SHIFT_JIS),
    ("mac-japanese", SHIFT_JIS),
    ("x-mac-japanese", SHIFT_JIS),
    ("mac-chinesetrad", BIG5),
    ("x-mac-chinesetrad", BIG5),
    ("mac-chinesesimp", GBK),
    ("x-mac-chinesesimp", GBK),
    ("mac-korean", EUC_KR),
    ("x-mac-korean", EUC_KR),
    ("mac-cyrillic", X_MAC_CYRILLIC),
    ("maccyrillic", X_MAC_CYRILLIC),
];

/// Resolves a charset name, case-insensitively.
pub fn resolve(name: &str) -> Option<&'static Encoding> {
    let name = name.trim();
    Encoding::for_label_no_replacement(name.as_bytes()).or_else(|| {
        let lower = name.to_ascii_lowercase();
        MAC_ALIASES
            .iter()
            .find(|(alias, _)| *alias == lower)
            .map(|(_, encoding)| *encoding)
    })
}

/// Whether characters in this encoding may span more than one byte.
pub fn is_double_byte(encoding: &'static Encoding) -> bool {
    !encoding.is_single_byte()
}

/// Why a candidate charset was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The name does not resolve to any supported charset.
    UnknownCharset,
    /// The bytes contain sequences the charset cannot decode.
    MalformedSequence,
    /// The decoded text contains U+FFFD.
    ReplacementCharacter,
    /// The decoded text contains a control character other than tab, LF or CR.
    ControlCharacter(char),
    /// The language declares a double-byte flag the charset does not match.
    WidthMismatch { declared_double_byte: bool },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rejection::UnknownCharset => write!(f, "unknown charset"),
            Rejection::MalformedSequence => write!(f, "malformed byte sequence"),
            Rejection::ReplacementCharacter => write!(f, "replacement character in output"),
            Rejection::ControlCharacter(c) => write!(f, "control character U+{:04X} in output", *c as u32),
            Rejection::WidthMismatch { declared_double_byte: true } => {
                write!(f, "language is double-byte but charset is single-byte")
            }
            Rejection::WidthMismatch { declared_double_byte: false } => {
                write!(f, "language is single-byte but charset is double-byte")
            }
        }
    }
}

/// Checks a resolved charset against the language's declared width, if any.
pub fn check_width(encoding: &'static Encoding, declared_double_byte: Option<bool>) -> Result<(), Rejection> {
    match declared_double_byte {
        Some(declared) if declared != is_double_byte(encoding) => Err(Rejection::WidthMismatch {
            declared_double_byte: declared,
        }),
        _ => Ok(()),
    }
}

/// Decodes `bytes`, failing on anything that suggests the wrong charset.
pub fn decode_strict(encoding: &'static Encoding, bytes: &[u8]) -> Result<String, Rejection> {
    let text = encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or(Rejection::MalformedSequence)?;

    for c in text.chars() {
        if c == char::REPLACEMENT_CHARACTER {
            return Err(Rejection::ReplacementCharacter);
        }
        if c.is_control() && !matches!(c, '\t' | '\n' | '\r') {
            return Err(Rejection::ControlCharacter(c));
        }
    }

    Ok(text.into_owned())
}

/// Decodes `bytes`, substituting U+FFFD for anything undecodable.
pub fn decode_lenient(encoding: &'static Encoding, bytes: &[u8]) -> String {
    let (text, _had_errors) = encoding.decode_without_bom_handling(bytes);
    text.into_owned()
}
