//! Resource map parsing.
//!
//! All offset and length validation for the map lives here. The result is a
//! flat list of [`ResourceRef`]s whose ranges are guaranteed to lie inside
//! the buffered container, so the reader can slice without further checks.
//!
//! # Map Structure
//! ```text
//! [16 bytes] Reserved copy of the container header
//! [ 4 bytes] Next-map handle (reserved)
//! [ 2 bytes] File reference number (reserved)
//! [ 2 bytes] Map attributes
//! [ 2 bytes] Offset from map start to type list
//! [ 2 bytes] Offset from map start to name list
//!
//! Type list:
//! [ 2 bytes] Number of types minus one
//! [ 8 bytes] per type: code, references minus one, reference list offset
//!
//! Reference list entry:
//! [ 2 bytes] Resource id (signed)
//! [ 2 bytes] Name offset into name list, 0xFFFF when unnamed
//! [ 1 byte ] Attributes
//! [ 3 bytes] Data offset into data section
//! [ 4 bytes] Reserved handle
//! ```

use std::collections::HashSet;
use std::ops::Range;

use log::{debug, trace};

use crate::rsrc::types::error::{Result, RsrcError};
use crate::rsrc::types::models::{
    ContainerHeader, MapHeader, ResourceId, ResourceRef, ResourceType, TypeSummary,
};
use crate::rsrc::utils;

const TYPE_ENTRY_SIZE: u64 = 8;
const REFERENCE_ENTRY_SIZE: u64 = 12;
const NO_NAME: u16 = 0xFFFF;

/// The validated contents of a resource map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMap {
    pub header: MapHeader,
    /// Types in the order the type list declares them.
    pub types: Vec<TypeSummary>,
    /// References grouped by type, in stored order within each type.
    pub refs: Vec<ResourceRef>,
}

/// Parses and validates the resource map described by `container`.
pub fn parse(bytes: &[u8], container: &ContainerHeader) -> Result<ResourceMap> {
    let map_region = utils::checked_range(
        "resource map",
        container.map_offset as u64,
        container.map_length as u64,
        bytes.len() as u64,
    )?;
    let map_base = map_region.start;
    let map = &bytes[map_region];
    let map_len = map.len() as u64;
    if map.len() < MapHeader::SIZE {
        return Err(RsrcError::malformed("resource map is shorter than its header"));
    }

    let mut reader = &map[16 + 4 + 2..MapHeader::SIZE];
    let header = MapHeader {
        attributes: utils::read_u16(&mut reader, "map header")?,
        type_list_offset: utils::read_u16(&mut reader, "map header")?,
        name_list_offset: utils::read_u16(&mut reader, "map header")?,
    };
    trace!(
        "Map header: attributes={:#06x}, type list at {}, name list at {}",
        header.attributes, header.type_list_offset, header.name_list_offset
    );

    let type_list_start = header.type_list_offset as u64;
    let count_range = utils::checked_range("type list", type_list_start, 2, map_len)?;
    let type_count = utils::count_minus_one(utils::read_u16(&mut &map[count_range], "type list")?);
    debug!("Resource map declares {} types", type_count);

    let names_start = header.name_list_offset as u64;
    if names_start > map_len {
        return Err(RsrcError::OutOfBounds {
            context: "name list",
            start: names_start,
            end: names_start,
            limit: map_len,
        });
    }

    let entries_range = utils::checked_range(
        "type list entries",
        type_list_start + 2,
        type_count as u64 * TYPE_ENTRY_SIZE,
        map_len,
    )?;
    let mut type_reader = &map[entries_range];

    let data_region = utils::checked_range(
        "resource data section",
        container.data_offset as u64,
        container.data_length as u64,
        bytes.len() as u64,
    )?;
    let data = Section {
        base: data_region.start,
        len: data_region.len() as u64,
    };
    let names = Section { base: map_base, len: map_len };

    let mut types = Vec::with_capacity(type_count);
    let mut refs = Vec::new();
    let mut seen: HashSet<(ResourceType, ResourceId)> = HashSet::new();

    for _ in 0..type_count {
        let resource_type = ResourceType(utils::read_code(&mut type_reader, "type list entry")?);
        let declared_count = utils::count_minus_one(utils::read_u16(&mut type_reader, "type list entry")?);
        let ref_list_offset = utils::read_u16(&mut type_reader, "type list entry")? as u64;

        let ref_range = utils::checked_range(
            "reference list",
            type_list_start + ref_list_offset,
            declared_count as u64 * REFERENCE_ENTRY_SIZE,
            map_len,
        )?;
        trace!("Type {}: {} references at map offset {}", resource_type, declared_count, ref_range.start);

        let mut ref_reader = &map[ref_range];
        for _ in 0..declared_count {
            let reference = parse_reference(&mut ref_reader, resource_type, bytes, &data, &names, names_start)?;
            if !seen.insert((resource_type, reference.id)) {
                return Err(RsrcError::DuplicateResource { resource_type, id: reference.id });
            }
            refs.push(reference);
        }

        types.push(TypeSummary { resource_type, declared_count });
    }

    debug!("Resource map parsed: {} types, {} resources", types.len(), refs.len());
    Ok(ResourceMap { header, types, refs })
}

/// A region of the container addressed by offsets relative to `base`.
struct Section {
    base: usize,
    len: u64,
}

impl Section {
    fn absolute(&self, range: Range<usize>) -> Range<usize> {
        self.base + range.start..self.base + range.end
    }
}

fn parse_reference(
    reader: &mut &[u8],
    resource_type: ResourceType,
    bytes: &[u8],
    data: &Section,
    names: &Section,
    names_start: u64,
) -> Result<ResourceRef> {
    let id = utils::read_i16(reader, "reference entry")?;
    let name_offset = utils::read_u16(reader, "reference entry")?;
    let attributes = utils::read_u8(reader, "reference entry")?;
    let data_offset = utils::read_u24(reader, "reference entry")? as u64;
    let _handle = utils::read_u32(reader, "reference entry")?;

    let name = if name_offset == NO_NAME {
        None
    } else {
        let len_pos = names_start + name_offset as u64;
        let len_range = names.absolute(utils::checked_range("resource name length", len_pos, 1, names.len)?);
        let name_len = bytes[len_range.start] as u64;
        Some(names.absolute(utils::checked_range("resource name", len_pos + 1, name_len, names.len)?))
    };

    let len_range = data.absolute(utils::checked_range("resource data length", data_offset, 4, data.len)?);
    let payload_len = utils::read_u32(&mut &bytes[len_range], "resource data length")? as u64;
    let payload = data.absolute(utils::checked_range("resource data", data_offset + 4, payload_len, data.len)?);

    trace!("  {} {}: {} bytes, attributes={:#04x}", resource_type, id, payload_len, attributes);

    Ok(ResourceRef {
        resource_type,
        id,
        attributes,
        name,
        data: payload,
    })
}
