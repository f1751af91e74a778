//! Reader for legacy resource containers (resource-fork data stored as a flat file).

pub mod builder;
pub mod format;
pub mod iter;
pub mod reader;
pub mod types;
mod utils;

pub use iter::ResourceIter;
pub use reader::ResourceContainer;
pub use types::error::{Result, RsrcError};
pub use types::models::{ResourceEntry, ResourceId, ResourceType, TypeSummary};
