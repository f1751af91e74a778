//! The generation pipeline: tables and resources in, document out.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use super::document::{LanguageInfoDocument, assemble};
use super::error::Result;
use super::tables::{TableLookup, load_language_names, load_languages};
use crate::labels::{ExtractConfig, ExtractionObserver, LabelError, LabelSet, LanguageLabelsMap, MissingFilePolicy, extract_labels};
use crate::rsrc::RsrcError;

/// Default location of the license resource file on the mounted SLA disk image.
pub const DEFAULT_RESOURCES_FILE: &str = "/Volumes/SLAs_for_UDIFs_1.0/SLAResources";
pub const DEFAULT_LANGUAGES_TABLE: &str = "Languages.tsv";
pub const DEFAULT_LANGUAGE_NAMES_TABLE: &str = "Language names.tsv";

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// `None` or an empty path skips label extraction.
    pub resources_file: Option<PathBuf>,
    pub languages_table: PathBuf,
    pub language_names_table: PathBuf,
    pub missing_resources: MissingFilePolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            resources_file: Some(PathBuf::from(DEFAULT_RESOURCES_FILE)),
            languages_table: PathBuf::from(DEFAULT_LANGUAGES_TABLE),
            language_names_table: PathBuf::from(DEFAULT_LANGUAGE_NAMES_TABLE),
            missing_resources: MissingFilePolicy::Tolerate,
        }
    }
}

impl GeneratorConfig {
    fn resources_file(&self) -> Option<&Path> {
        self.resources_file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

/// A problem that did not stop generation.
#[derive(Debug, Error)]
pub enum Warning {
    #[error(transparent)]
    Labels(#[from] LabelError),
    #[error(transparent)]
    Resources(#[from] RsrcError),
}

/// Forwards every extractor report to the warning sink.
struct SinkObserver<'s> {
    sink: &'s mut dyn FnMut(Warning),
}

impl ExtractionObserver for SinkObserver<'_> {
    fn on_wrong_charset(&mut self, error: LabelError) {
        (self.sink)(error.into());
    }

    fn on_decoding_failure(&mut self, error: LabelError, raw_labels: LabelSet) -> LabelSet {
        (self.sink)(error.into());
        raw_labels
    }

    fn on_resource_file_not_found(&mut self, error: RsrcError) {
        (self.sink)(error.into());
    }

    fn on_duplicate_language(&mut self, error: LabelError) {
        (self.sink)(error.into());
    }
}

/// Loads both tables, extracts labels and assembles the document.
///
/// Recoverable problems go to `warnings`; the rest are returned.
pub fn generate(config: &GeneratorConfig, warnings: &mut dyn FnMut(Warning)) -> Result<LanguageInfoDocument> {
    let names = load_language_names(&config.language_names_table)?;
    let languages = load_languages(&config.languages_table)?;

    let label_map = match config.resources_file() {
        Some(resources_file) => {
            let lookup = TableLookup::new(&languages);
            let mut observer = SinkObserver { sink: warnings };
            let extract = ExtractConfig::new(resources_file, &lookup, &lookup, &mut observer)
                .with_missing_file(config.missing_resources);
            extract_labels(extract)?
        }
        None => {
            info!("No resource file given; generating without labels");
            LanguageLabelsMap::new()
        }
    };

    assemble(&languages, &names, &label_map)
}

/// Writes the document as JSON indented by two spaces, followed by a newline.
///
/// The trailing newline is the only difference from a plain two-space
/// `JSON.stringify` of the same data.
pub fn write_document<W: Write>(document: &LanguageInfoDocument, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, document)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_resource_path_skips_extraction() {
        let config = GeneratorConfig {
            resources_file: Some(PathBuf::new()),
            ..GeneratorConfig::default()
        };
        assert_eq!(config.resources_file(), None);
        assert_eq!(
            GeneratorConfig::default().resources_file(),
            Some(Path::new(DEFAULT_RESOURCES_FILE))
        );
    }

    #[test]
    fn document_is_written_with_two_space_indent() {
        let mut out = Vec::new();
        write_document(&LanguageInfoDocument::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"labels\": {},\n  \"languages\": {}\n}\n");
    }
}
