//! # sla-langinfo
//!
//! Generates the language-info database used to localize disk-image license
//! agreements. Three sources are merged:
//!
//! - a table of display names per language tag,
//! - a table of legacy Mac locales (tags, charsets, label resource),
//! - a classic Mac resource file whose `STR#` resources hold the localized
//!   license dialog labels.
//!
//! [`rsrc`] reads resource files, [`labels`] decodes the label resources and
//! [`langinfo`] loads the tables and assembles the JSON document.
pub mod labels;
pub mod langinfo;
pub mod rsrc;

// Re-export the main types for convenience
pub use labels::{
    ExtractConfig, ExtractionObserver, LabelSet, Labels, LanguageId, LanguageLabelsMap, MissingFilePolicy,
    extract_labels,
};
pub use langinfo::{GeneratorConfig, LanguageInfoDocument, generate, write_document};
pub use rsrc::{ResourceContainer, ResourceType, RsrcError};
