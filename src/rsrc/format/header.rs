//! Container header parsing.
//!
//! # Header Structure
//! ```text
//! [4 bytes] Offset of resource data section (big-endian u32)
//! [4 bytes] Offset of resource map (big-endian u32)
//! [4 bytes] Length of resource data section (big-endian u32)
//! [4 bytes] Length of resource map (big-endian u32)
//! ```

use log::trace;

use crate::rsrc::types::error::{Result, RsrcError};
use crate::rsrc::types::models::{ContainerHeader, MapHeader};
use crate::rsrc::utils;

/// Parses the 16-byte container header and checks both sections against the file size.
pub fn parse(bytes: &[u8]) -> Result<ContainerHeader> {
    if bytes.len() < ContainerHeader::SIZE {
        return Err(RsrcError::malformed(format!(
            "file is {} bytes, shorter than the {}-byte header",
            bytes.len(),
            ContainerHeader::SIZE
        )));
    }

    let mut reader = &bytes[..ContainerHeader::SIZE];
    let header = ContainerHeader {
        data_offset: utils::read_u32(&mut reader, "header")?,
        map_offset: utils::read_u32(&mut reader, "header")?,
        data_length: utils::read_u32(&mut reader, "header")?,
        map_length: utils::read_u32(&mut reader, "header")?,
    };
    trace!(
        "Container header: data={}+{}, map={}+{}",
        header.data_offset, header.data_length, header.map_offset, header.map_length
    );

    let file_len = bytes.len() as u64;
    utils::checked_range(
        "resource data section",
        header.data_offset as u64,
        header.data_length as u64,
        file_len,
    )?;
    utils::checked_range(
        "resource map",
        header.map_offset as u64,
        header.map_length as u64,
        file_len,
    )?;

    if (header.map_length as usize) < MapHeader::SIZE {
        return Err(RsrcError::malformed(format!(
            "resource map is {} bytes, shorter than its {}-byte header",
            header.map_length,
            MapHeader::SIZE
        )));
    }

    Ok(header)
}
