use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::labels::LanguageId;
use crate::rsrc::RsrcError;

/// Fatal errors of the generation pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("No entry in the language names table for language {lang_tag}")]
    MissingNameEntry { lang_tag: String },

    #[error("Invalid row in {path} (line {line}): {message}")]
    Table { path: PathBuf, line: u64, message: String },

    #[error("Cannot read table {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Language id {id} appears twice in {path}")]
    DuplicateLanguageId { id: LanguageId, path: PathBuf },

    #[error(transparent)]
    Resources(#[from] RsrcError),

    #[error("Failed to serialize the document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// True for problems with either input table.
    pub fn is_table_error(&self) -> bool {
        matches!(
            self,
            Error::Table { .. } | Error::Csv { .. } | Error::DuplicateLanguageId { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
