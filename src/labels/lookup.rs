//! Capabilities the extractor needs from its caller.
//!
//! The extractor knows nothing about locale tables. It asks a
//! [`LanguageLookup`] which language a resource belongs to, asks a
//! [`CharsetLookup`] how that language is encoded, and reports every
//! recoverable problem to an [`ExtractionObserver`]. Both lookups are
//! implemented for plain closures so tests can pass synthetic tables.

use log::warn;

use super::error::LabelError;
use super::models::{LabelSet, LanguageId};
use crate::rsrc::{ResourceId, RsrcError};

/// Translates a label resource id into the language that claims it.
pub trait LanguageLookup {
    /// `None` means no language claims the resource; it is skipped silently.
    fn language_id(&self, resource_id: ResourceId) -> Option<LanguageId>;
}

impl<F> LanguageLookup for F
where
    F: Fn(ResourceId) -> Option<LanguageId>,
{
    fn language_id(&self, resource_id: ResourceId) -> Option<LanguageId> {
        self(resource_id)
    }
}

/// Supplies the candidate charsets for a language.
pub trait CharsetLookup {
    /// Candidate charset names in order of preference. May be empty.
    fn charsets(&self, language: LanguageId) -> Vec<String>;

    /// The language's declared double-byte flag, if it declares one.
    fn double_byte(&self, _language: LanguageId) -> Option<bool> {
        None
    }
}

impl<F> CharsetLookup for F
where
    F: Fn(LanguageId) -> Vec<String>,
{
    fn charsets(&self, language: LanguageId) -> Vec<String> {
        self(language)
    }
}

/// Receives the extractor's non-fatal reports.
pub trait ExtractionObserver {
    /// A later charset decoded the labels after the first choice was rejected.
    fn on_wrong_charset(&mut self, error: LabelError);

    /// No charset decoded the labels. The returned set is used for the language.
    ///
    /// `raw_labels` is a lenient decode of whatever strings could be read.
    fn on_decoding_failure(&mut self, error: LabelError, raw_labels: LabelSet) -> LabelSet;

    /// The resource file was missing and the policy said to carry on without it.
    fn on_resource_file_not_found(&mut self, error: RsrcError) {
        warn!("{}", error);
    }

    /// A language was claimed by two resources; the later one replaced the earlier.
    fn on_duplicate_language(&mut self, error: LabelError) {
        warn!("{}", error);
    }
}

/// Logs every report as a warning and keeps lenient fallbacks.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl ExtractionObserver for LoggingObserver {
    fn on_wrong_charset(&mut self, error: LabelError) {
        warn!("{}", error);
    }

    fn on_decoding_failure(&mut self, error: LabelError, raw_labels: LabelSet) -> LabelSet {
        warn!("{}", error);
        raw_labels
    }
}
