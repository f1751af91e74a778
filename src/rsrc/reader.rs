use std::fs;
use std::path::Path;

use log::info;

use super::format::{self, map::ResourceMap};
use super::iter::ResourceIter;
use super::types::error::{Result, RsrcError};
use super::types::models::*;

/// A fully buffered, validated resource container.
///
/// Opening reads the whole file once and validates every offset in the
/// header and map. After that the container is read-only, and iteration
/// never fails.
#[derive(Debug, Clone)]
pub struct ResourceContainer {
    bytes: Vec<u8>,
    header: ContainerHeader,
    map: ResourceMap,
}

impl ResourceContainer {
    /// Read and validate a resource container from the given path.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or cannot be read (`ResourceFileNotFound`)
    /// - The header or map is internally inconsistent (a malformed-container variant)
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening resource file: {}", path.display());
        let bytes = fs::read(path).map_err(|source| RsrcError::ResourceFileNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(bytes)
    }

    /// Validate a container image that is already in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let header = format::header::parse(&bytes)?;
        let map = format::map::parse(&bytes, &header)?;

        info!(
            "Resource container opened: {} bytes, {} types, {} resources",
            bytes.len(),
            map.types.len(),
            map.refs.len()
        );

        Ok(Self { bytes, header, map })
    }

    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    pub fn map_header(&self) -> &MapHeader {
        &self.map.header
    }

    /// Types in the order the type list declares them.
    pub fn types(&self) -> &[TypeSummary] {
        &self.map.types
    }

    /// Number of references the map declares for `resource_type`.
    pub fn declared_count(&self, resource_type: ResourceType) -> usize {
        self.map
            .types
            .iter()
            .filter(|t| t.resource_type == resource_type)
            .map(|t| t.declared_count)
            .sum()
    }

    /// Total number of resources in the container.
    pub fn len(&self) -> usize {
        self.map.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.refs.is_empty()
    }

    /// Iterates every resource, grouped by type in map order.
    pub fn iter(&self) -> ResourceIter<'_> {
        ResourceIter::new(self, None)
    }

    /// Iterates the resources of one type, in stored order (not id order).
    pub fn iter_type(&self, resource_type: ResourceType) -> ResourceIter<'_> {
        ResourceIter::new(self, Some(resource_type))
    }

    /// Random access by (type, id).
    pub fn get(&self, resource_type: ResourceType, id: ResourceId) -> Option<ResourceEntry<'_>> {
        self.map
            .refs
            .iter()
            .find(|r| r.resource_type == resource_type && r.id == id)
            .map(|r| self.entry(r))
    }

    pub(crate) fn refs(&self) -> &[ResourceRef] {
        &self.map.refs
    }

    pub(crate) fn entry(&self, reference: &ResourceRef) -> ResourceEntry<'_> {
        ResourceEntry {
            resource_type: reference.resource_type,
            id: reference.id,
            attributes: reference.attributes,
            name: reference.name.clone().map(|range| &self.bytes[range]),
            data: &self.bytes[reference.data.clone()],
        }
    }
}

impl<'a> IntoIterator for &'a ResourceContainer {
    type Item = ResourceEntry<'a>;
    type IntoIter = ResourceIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
