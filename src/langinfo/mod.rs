//! Builds the language-info document from the locale tables and the
//! license resource file.

pub mod document;
pub mod error;
pub mod generator;
pub mod tables;

pub use document::{DocumentBuilder, LanguageDescriptor, LanguageInfoDocument, assemble};
pub use error::{Error, Result};
pub use generator::{GeneratorConfig, Warning, generate, write_document};
pub use tables::{Language, LanguageName, LanguageNames, TableLookup, load_language_names, load_languages};
