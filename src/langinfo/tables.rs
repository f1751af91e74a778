//! Loaders for the two tab-separated input tables.
//!
//! Both tables start with a header row naming their columns. Lines starting
//! with `#` are comments and blank lines are ignored.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::error::{Error, Result};
use crate::labels::{CharsetLookup, LanguageId, LanguageLookup};
use crate::rsrc::ResourceId;

/// One row of the locale table, as written.
#[derive(Debug, Deserialize)]
struct LanguageRow {
    id: u16,
    #[serde(rename = "langTags")]
    lang_tags: String,
    #[serde(default)]
    charsets: String,
    #[serde(rename = "displayLangTag", default)]
    display_lang_tag: String,
    #[serde(rename = "labelsResourceID", default)]
    labels_resource_id: Option<ResourceId>,
    #[serde(rename = "doubleByteCharset", default)]
    double_byte_charset: String,
}

/// A language from the locale table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub id: LanguageId,
    /// BCP 47 tags for the language; never empty.
    pub lang_tags: Vec<String>,
    /// Candidate charsets in order of preference; may be empty.
    pub charsets: Vec<String>,
    /// Tag used to look up display names and to key labels.
    pub display_lang_tag: String,
    /// The `STR#` resource holding this language's labels, if any.
    pub labels_resource_id: Option<ResourceId>,
    pub double_byte_charset: bool,
}

/// Display names for one tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageName {
    #[serde(rename = "langTag")]
    pub lang_tag: String,
    #[serde(rename = "englishName")]
    pub english_name: String,
    #[serde(rename = "localizedName", default)]
    pub localized_name: String,
}

/// Display names keyed by tag, in table order.
pub type LanguageNames = IndexMap<String, LanguageName>;

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(b'\t')
        .has_headers(true)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All);
    builder
}

/// Deserializes every row, pairing it with its line number.
fn read_rows<T, R>(reader: R, path: &Path) -> Result<Vec<(u64, T)>>
where
    T: DeserializeOwned,
    R: Read,
{
    let csv_error = |source| Error::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = reader_builder().from_reader(reader);
    let headers = rdr.headers().map_err(csv_error)?.clone();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(csv_error)?;
        let line = record.position().map_or(0, |p| p.line());
        let row = record.deserialize(Some(&headers)).map_err(|e| Error::Table {
            path: path.to_path_buf(),
            line,
            message: e.to_string(),
        })?;
        rows.push((line, row));
    }
    Ok(rows)
}

fn split_list(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(field: &str) -> Option<bool> {
    match field.to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" => Some(false),
        "1" | "true" | "yes" | "x" => Some(true),
        _ => None,
    }
}

/// Reads the locale table from any reader. `path` is used in errors only.
pub fn read_languages<R: Read>(reader: R, path: &Path) -> Result<Vec<Language>> {
    let table_error = |line, message: String| Error::Table {
        path: path.to_path_buf(),
        line,
        message,
    };

    let mut seen = HashSet::new();
    let mut languages = Vec::new();

    for (line, row) in read_rows::<LanguageRow, _>(reader, path)? {
        let id = LanguageId(row.id);
        if !seen.insert(id) {
            return Err(Error::DuplicateLanguageId {
                id,
                path: path.to_path_buf(),
            });
        }

        let lang_tags = split_list(&row.lang_tags);
        let Some(first_tag) = lang_tags.first() else {
            return Err(table_error(line, format!("language {} has no language tags", id)));
        };
        let display_lang_tag = if row.display_lang_tag.is_empty() {
            first_tag.clone()
        } else {
            row.display_lang_tag
        };
        let double_byte_charset = parse_flag(&row.double_byte_charset).ok_or_else(|| {
            table_error(
                line,
                format!("invalid doubleByteCharset value '{}'", row.double_byte_charset),
            )
        })?;

        languages.push(Language {
            id,
            lang_tags,
            charsets: split_list(&row.charsets),
            display_lang_tag,
            labels_resource_id: row.labels_resource_id,
            double_byte_charset,
        });
    }

    Ok(languages)
}

/// Loads the locale table from a file.
pub fn load_languages(path: impl AsRef<Path>) -> Result<Vec<Language>> {
    let path = path.as_ref();
    let file = open(path)?;
    let languages = read_languages(file, path)?;
    info!("Loaded {} languages from {}", languages.len(), path.display());
    Ok(languages)
}

/// Reads the display-name table from any reader. `path` is used in errors only.
///
/// A tag listed twice keeps its last row.
pub fn read_language_names<R: Read>(reader: R, path: &Path) -> Result<LanguageNames> {
    let mut names = LanguageNames::new();
    for (line, name) in read_rows::<LanguageName, _>(reader, path)? {
        if name.lang_tag.is_empty() {
            return Err(Error::Table {
                path: path.to_path_buf(),
                line,
                message: "empty langTag".to_string(),
            });
        }
        if let Some(previous) = names.insert(name.lang_tag.clone(), name) {
            debug!("Tag {} listed twice in {}; keeping the later row", previous.lang_tag, path.display());
        }
    }
    Ok(names)
}

/// Loads the display-name table from a file.
pub fn load_language_names(path: impl AsRef<Path>) -> Result<LanguageNames> {
    let path = path.as_ref();
    let file = open(path)?;
    let names = read_language_names(file, path)?;
    info!("Loaded {} language names from {}", names.len(), path.display());
    Ok(names)
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).map_err(|e| Error::Csv {
        path: PathBuf::from(path),
        source: e.into(),
    })
}

/// Lookup tables over the locale table, in the shape the extractor asks for.
#[derive(Debug)]
pub struct TableLookup<'a> {
    by_resource: HashMap<ResourceId, LanguageId>,
    by_language: HashMap<LanguageId, &'a Language>,
}

impl<'a> TableLookup<'a> {
    /// Indexes the languages. When two languages claim one label resource the later row wins.
    pub fn new(languages: &'a [Language]) -> Self {
        let mut by_resource = HashMap::new();
        let mut by_language = HashMap::new();

        for language in languages {
            by_language.insert(language.id, language);
            if let Some(resource_id) = language.labels_resource_id
                && let Some(previous) = by_resource.insert(resource_id, language.id)
            {
                warn!(
                    "Label resource {} is claimed by languages {} and {}; using {}",
                    resource_id, previous, language.id, language.id
                );
            }
        }

        Self {
            by_resource,
            by_language,
        }
    }

    pub fn language(&self, id: LanguageId) -> Option<&'a Language> {
        self.by_language.get(&id).copied()
    }
}

impl LanguageLookup for TableLookup<'_> {
    fn language_id(&self, resource_id: ResourceId) -> Option<LanguageId> {
        self.by_resource.get(&resource_id).copied()
    }
}

impl CharsetLookup for TableLookup<'_> {
    fn charsets(&self, language: LanguageId) -> Vec<String> {
        self.language(language)
            .map(|l| l.charsets.clone())
            .unwrap_or_default()
    }

    /// Only a positive flag is a declaration; an unflagged language declares nothing.
    fn double_byte(&self, language: LanguageId) -> Option<bool> {
        self.language(language)
            .and_then(|l| l.double_byte_charset.then_some(true))
    }
}
