//! Error types for the resource container reader.

use std::path::PathBuf;

use thiserror::Error;

use super::models::{ResourceId, ResourceType};

/// The error type for opening and decoding a resource container.
///
/// `ResourceFileNotFound` is the only variant a caller may choose to tolerate.
/// Every other variant means the container is structurally broken and no
/// partial result can be trusted.
#[derive(Debug, Error)]
pub enum RsrcError {
    /// The container path does not exist or could not be read.
    #[error("Resource file not found or unreadable: {}", path.display())]
    ResourceFileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header or map is internally inconsistent.
    #[error("Malformed resource container: {0}")]
    MalformedContainer(String),

    /// An offset/length pair points outside the region that must contain it.
    #[error("Malformed resource container: {context} spans {start}..{end}, outside 0..{limit}")]
    OutOfBounds {
        context: &'static str,
        start: u64,
        end: u64,
        limit: u64,
    },

    /// The same (type, id) pair appears twice in the resource map.
    #[error("Malformed resource container: duplicate resource {resource_type} {id}")]
    DuplicateResource {
        resource_type: ResourceType,
        id: ResourceId,
    },
}

impl RsrcError {
    /// Returns true for every structural failure of the container itself.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, RsrcError::ResourceFileNotFound { .. })
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        RsrcError::MalformedContainer(message.into())
    }
}

/// A convenience `Result` type alias using [`RsrcError`].
pub type Result<T> = std::result::Result<T, RsrcError>;
