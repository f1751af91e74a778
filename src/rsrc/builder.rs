//! In-memory construction of resource containers.
//!
//! Produces the same layout the classic resource tools write: a 16-byte
//! header, zero padding up to [`DATA_OFFSET`], the data section, then the map
//! with its type list, reference lists and name list.
//!
//! This is a test helper. The crate's own tests and integration tests use it
//! to synthesize fixtures; nothing on the reading path depends on it. It
//! panics on inputs the format cannot represent instead of returning errors.

use crate::rsrc::types::models::{MapHeader, ResourceId, ResourceType};

/// Offset of the data section in every container this builder writes.
pub const DATA_OFFSET: usize = 256;

#[derive(Debug, Clone)]
struct PendingResource {
    resource_type: ResourceType,
    id: ResourceId,
    attributes: u8,
    name: Option<Vec<u8>>,
    data: Vec<u8>,
}

/// Builder for a resource container image.
///
/// Resources keep their insertion order within each type, and types appear
/// in the order they were first used.
#[derive(Debug, Clone, Default)]
pub struct ContainerBuilder {
    resources: Vec<PendingResource>,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource. Names are written as Mac Roman Pascal strings.
    pub fn resource(self, code: &[u8; 4], id: ResourceId, name: Option<&str>, data: &[u8]) -> Self {
        self.resource_with_attributes(code, id, name, 0, data)
    }

    pub fn resource_with_attributes(
        mut self,
        code: &[u8; 4],
        id: ResourceId,
        name: Option<&str>,
        attributes: u8,
        data: &[u8],
    ) -> Self {
        let name = name.map(|n| {
            let (bytes, _, _) = encoding_rs::MACINTOSH.encode(n);
            bytes.into_owned()
        });
        self.resources.push(PendingResource {
            resource_type: ResourceType(*code),
            id,
            attributes,
            name,
            data: data.to_vec(),
        });
        self
    }

    /// Serializes the container.
    ///
    /// # Panics
    /// Panics if a name exceeds 255 bytes or the layout overflows the
    /// format's 16/24-bit offset fields.
    pub fn build(&self) -> Vec<u8> {
        let mut types: Vec<ResourceType> = Vec::new();
        for r in &self.resources {
            if !types.contains(&r.resource_type) {
                types.push(r.resource_type);
            }
        }
        let grouped: Vec<Vec<&PendingResource>> = types
            .iter()
            .map(|t| self.resources.iter().filter(|r| r.resource_type == *t).collect())
            .collect();

        // Data section, in grouped order so data offsets follow the map.
        let mut data = Vec::new();
        let mut data_offsets = Vec::new();
        for group in &grouped {
            for r in group {
                data_offsets.push(data.len());
                data.extend_from_slice(&(r.data.len() as u32).to_be_bytes());
                data.extend_from_slice(&r.data);
            }
        }

        // Name list.
        let mut names = Vec::new();
        let mut name_offsets = Vec::new();
        for group in &grouped {
            for r in group {
                match &r.name {
                    Some(name) => {
                        name_offsets.push(names.len() as u16);
                        names.push(u8::try_from(name.len()).expect("resource name longer than 255 bytes"));
                        names.extend_from_slice(name);
                    }
                    None => name_offsets.push(0xFFFF),
                }
            }
        }

        // Type list followed by the reference lists.
        let mut type_list = Vec::new();
        type_list.extend_from_slice(&(types.len() as u16).wrapping_sub(1).to_be_bytes());
        let mut ref_lists = Vec::new();
        let ref_base = 2 + 8 * types.len();
        let mut flat = 0;
        for (resource_type, group) in types.iter().zip(&grouped) {
            type_list.extend_from_slice(resource_type.as_bytes());
            type_list.extend_from_slice(&(group.len() as u16).wrapping_sub(1).to_be_bytes());
            let offset = u16::try_from(ref_base + ref_lists.len()).expect("reference list offset overflow");
            type_list.extend_from_slice(&offset.to_be_bytes());
            for r in group {
                ref_lists.extend_from_slice(&r.id.to_be_bytes());
                ref_lists.extend_from_slice(&name_offsets[flat].to_be_bytes());
                ref_lists.push(r.attributes);
                let data_offset = u32::try_from(data_offsets[flat]).expect("data offset overflow");
                assert!(data_offset < 1 << 24, "data offset does not fit in 24 bits");
                ref_lists.extend_from_slice(&data_offset.to_be_bytes()[1..]);
                ref_lists.extend_from_slice(&[0; 4]);
                flat += 1;
            }
        }

        let type_list_offset = MapHeader::SIZE as u16;
        let name_list_offset = u16::try_from(MapHeader::SIZE + type_list.len() + ref_lists.len())
            .expect("name list offset overflow");
        let map_offset = DATA_OFFSET + data.len();
        let map_length = MapHeader::SIZE + type_list.len() + ref_lists.len() + names.len();

        let mut header = Vec::with_capacity(16);
        header.extend_from_slice(&(DATA_OFFSET as u32).to_be_bytes());
        header.extend_from_slice(&(map_offset as u32).to_be_bytes());
        header.extend_from_slice(&(data.len() as u32).to_be_bytes());
        header.extend_from_slice(&(map_length as u32).to_be_bytes());

        let mut out = header.clone();
        out.resize(DATA_OFFSET, 0);
        out.extend_from_slice(&data);
        out.extend_from_slice(&header);
        out.extend_from_slice(&[0; 4 + 2]);
        out.extend_from_slice(&0u16.to_be_bytes());
        out.extend_from_slice(&type_list_offset.to_be_bytes());
        out.extend_from_slice(&name_list_offset.to_be_bytes());
        out.extend_from_slice(&type_list);
        out.extend_from_slice(&ref_lists);
        out.extend_from_slice(&names);
        out
    }
}

/// Encodes a `STR#` payload: a u16 count followed by Pascal strings.
///
/// # Panics
/// Panics if any string exceeds 255 bytes.
pub fn string_list(strings: &[&[u8]]) -> Vec<u8> {
    let mut out = (strings.len() as u16).to_be_bytes().to_vec();
    for s in strings {
        out.push(u8::try_from(s.len()).expect("string longer than 255 bytes"));
        out.extend_from_slice(s);
    }
    out
}
