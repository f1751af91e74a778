//! Core data structures for resource container components.
//!
//! This module defines the types shared between the format parser and the
//! reader:
//! - The fixed-size container header and map header
//! - Type codes and resource identifiers
//! - Parsed references and the borrowed [`ResourceEntry`] handed to callers

use std::fmt;
use std::ops::Range;

/// Numeric resource identifier as stored in a reference entry.
///
/// Stored as a signed 16-bit value. System resources use negative ids; the
/// label resources this crate cares about are always non-negative.
pub type ResourceId = i16;

/// A four-character resource type code such as `STR#` or `TEXT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceType(pub [u8; 4]);

impl ResourceType {
    /// Localized string lists. Carries the license button labels.
    pub const STRING_LIST: ResourceType = ResourceType(*b"STR#");

    pub const fn new(code: [u8; 4]) -> Self {
        ResourceType(code)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Type codes are Mac Roman; anything outside printable ASCII is escaped.
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

impl From<&[u8; 4]> for ResourceType {
    fn from(code: &[u8; 4]) -> Self {
        ResourceType(*code)
    }
}

/// The 16-byte header at the start of every resource container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Absolute offset of the resource data section.
    pub data_offset: u32,
    /// Absolute offset of the resource map.
    pub map_offset: u32,
    pub data_length: u32,
    pub map_length: u32,
}

impl ContainerHeader {
    pub const SIZE: usize = 16;

    pub fn data_range(&self) -> Range<u64> {
        let start = self.data_offset as u64;
        start..start + self.data_length as u64
    }

    pub fn map_range(&self) -> Range<u64> {
        let start = self.map_offset as u64;
        start..start + self.map_length as u64
    }
}

/// Fixed fields of the resource map that follow the reserved header copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapHeader {
    pub attributes: u16,
    /// Offset from the start of the map to the type list.
    pub type_list_offset: u16,
    /// Offset from the start of the map to the name list.
    pub name_list_offset: u16,
}

impl MapHeader {
    /// Reserved header copy, next-map handle, file ref number, then the fields above.
    pub const SIZE: usize = 28;
}

/// One entry of a type's reference list, fully validated.
///
/// Ranges are absolute offsets into the buffered container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub resource_type: ResourceType,
    pub id: ResourceId,
    pub attributes: u8,
    /// Pascal-string bytes of the resource name, without the length byte.
    pub name: Option<Range<usize>>,
    /// Payload bytes, without the 4-byte length prefix.
    pub data: Range<usize>,
}

/// A type-list entry with the number of references it declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSummary {
    pub resource_type: ResourceType,
    pub declared_count: usize,
}

/// One stored resource, borrowing its name and payload from the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceEntry<'a> {
    pub resource_type: ResourceType,
    pub id: ResourceId,
    pub attributes: u8,
    /// Raw (Mac Roman) name bytes, if the resource is named.
    pub name: Option<&'a [u8]>,
    pub data: &'a [u8],
}

impl ResourceEntry<'_> {
    /// Decodes the resource name for display.
    pub fn name_lossy(&self) -> Option<String> {
        self.name.map(|bytes| {
            let (text, _) = encoding_rs::MACINTOSH.decode_without_bom_handling(bytes);
            text.into_owned()
        })
    }
}
