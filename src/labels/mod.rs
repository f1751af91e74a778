//! Extraction of localized license-dialog labels from `STR#` resources.
//!
//! Each label resource holds six strings in a language's legacy charset.
//! The extractor finds the language that claims each resource, tries that
//! language's candidate charsets in order, and collects one [`LabelSet`] per
//! language.

pub mod charset;
pub mod decoder;
pub mod error;
pub mod extractor;
pub mod lookup;
pub mod models;
pub mod string_list;

pub use error::{CandidateRejection, FailureReason, LabelError};
pub use extractor::{ExtractConfig, MissingFilePolicy, extract_from_container, extract_labels};
pub use lookup::{CharsetLookup, ExtractionObserver, LanguageLookup, LoggingObserver};
pub use models::{DecodedWith, LabelRole, LabelSet, Labels, LanguageId, LanguageLabelsMap};
