//! Non-fatal error records reported by the label extractor.
//!
//! None of these stop extraction. They reach the caller through the
//! [`ExtractionObserver`](super::lookup::ExtractionObserver) callbacks.

use std::fmt;

use thiserror::Error;

use super::charset::Rejection;
use super::models::LanguageId;
use super::string_list::ListProblem;
use crate::rsrc::ResourceId;

/// One candidate charset that was tried and rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateRejection {
    pub charset: String,
    pub reason: Rejection,
}

impl fmt::Display for CandidateRejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.charset, self.reason)
    }
}

/// Why no candidate produced a label set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// The string list itself is damaged; no charset can fix it.
    Structure(ListProblem),
    /// Every candidate charset was rejected, in the order tried.
    AllCandidatesRejected(Vec<CandidateRejection>),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FailureReason::Structure(problem) => write!(f, "{}", problem),
            FailureReason::AllCandidatesRejected(rejections) => {
                for (i, r) in rejections.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", r)?;
                }
                Ok(())
            }
        }
    }
}

/// A recoverable, per-resource problem found during extraction.
#[derive(Debug, Clone, Error)]
pub enum LabelError {
    /// The first-choice charset was rejected but a later candidate decoded the labels.
    #[error(
        "Labels for language {language} (resource {resource_id}) are not in charset {attempted} ({reason}); decoded as {accepted}"
    )]
    WrongCharsetSelected {
        language: LanguageId,
        resource_id: ResourceId,
        attempted: String,
        reason: Rejection,
        accepted: String,
        raw: Vec<u8>,
    },

    /// No candidate charset decoded the labels.
    #[error("Cannot decode labels for language {language} (resource {resource_id}): {reason}")]
    LabelDecodingFailure {
        language: LanguageId,
        resource_id: ResourceId,
        attempted: Vec<String>,
        reason: FailureReason,
        raw: Vec<u8>,
    },

    /// Two label resources resolved to the same language; the later one was kept.
    #[error("Language {language} is claimed by label resources {replaced} and {replacement}; keeping {replacement}")]
    DuplicateLanguage {
        language: LanguageId,
        replaced: ResourceId,
        replacement: ResourceId,
    },
}

impl LabelError {
    pub fn language(&self) -> LanguageId {
        match self {
            LabelError::WrongCharsetSelected { language, .. }
            | LabelError::LabelDecodingFailure { language, .. }
            | LabelError::DuplicateLanguage { language, .. } => *language,
        }
    }

    /// The raw resource payload, for the variants that carry one.
    pub fn raw(&self) -> Option<&[u8]> {
        match self {
            LabelError::WrongCharsetSelected { raw, .. } | LabelError::LabelDecodingFailure { raw, .. } => Some(raw),
            LabelError::DuplicateLanguage { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_charset_message_names_both_charsets() {
        let err = LabelError::WrongCharsetSelected {
            language: LanguageId(14),
            resource_id: 5005,
            attempted: "mac-roman".into(),
            reason: Rejection::WidthMismatch { declared_double_byte: true },
            accepted: "shift-jis".into(),
            raw: vec![1, 2, 3],
        };
        let msg = err.to_string();
        assert!(msg.contains("language 14"));
        assert!(msg.contains("mac-roman"));
        assert!(msg.contains("decoded as shift-jis"));
        assert_eq!(err.raw(), Some([1u8, 2, 3].as_slice()));
    }

    #[test]
    fn decoding_failure_lists_every_rejection() {
        let err = LabelError::LabelDecodingFailure {
            language: LanguageId(3),
            resource_id: 5003,
            attempted: vec!["shift_jis".into(), "bogus".into()],
            reason: FailureReason::AllCandidatesRejected(vec![
                CandidateRejection { charset: "shift_jis".into(), reason: Rejection::MalformedSequence },
                CandidateRejection { charset: "bogus".into(), reason: Rejection::UnknownCharset },
            ]),
            raw: Vec::new(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot decode labels for language 3 (resource 5003): shift_jis: malformed byte sequence; bogus: unknown charset"
        );
    }
}
