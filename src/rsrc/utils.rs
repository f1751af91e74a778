//! Low-level byte reading utilities

use std::io;
use std::ops::Range;

use byteorder::{BigEndian, ReadBytesExt};

use super::types::error::{Result, RsrcError};

/// Validates that `start..start + len` lies inside `0..limit` and converts it to a slice range.
///
/// Arithmetic is done in u64 so that u32 fields from the file cannot overflow.
pub fn checked_range(context: &'static str, start: u64, len: u64, limit: u64) -> Result<Range<usize>> {
    let end = start + len;
    if end > limit {
        return Err(RsrcError::OutOfBounds { context, start, end, limit });
    }
    Ok(start as usize..end as usize)
}

fn truncated(context: &'static str) -> impl FnOnce(io::Error) -> RsrcError {
    move |e| RsrcError::malformed(format!("{context} is truncated ({e})"))
}

/// Read a big-endian u8 from a byte cursor.
pub fn read_u8(reader: &mut &[u8], context: &'static str) -> Result<u8> {
    reader.read_u8().map_err(truncated(context))
}

/// Read a big-endian u16 from a byte cursor.
pub fn read_u16(reader: &mut &[u8], context: &'static str) -> Result<u16> {
    reader.read_u16::<BigEndian>().map_err(truncated(context))
}

/// Read a big-endian i16 from a byte cursor.
pub fn read_i16(reader: &mut &[u8], context: &'static str) -> Result<i16> {
    reader.read_i16::<BigEndian>().map_err(truncated(context))
}

/// Read a big-endian 24-bit offset from a byte cursor.
pub fn read_u24(reader: &mut &[u8], context: &'static str) -> Result<u32> {
    reader.read_u24::<BigEndian>().map_err(truncated(context))
}

/// Read a big-endian u32 from a byte cursor.
pub fn read_u32(reader: &mut &[u8], context: &'static str) -> Result<u32> {
    reader.read_u32::<BigEndian>().map_err(truncated(context))
}

/// Read a four-character code from a byte cursor.
pub fn read_code(reader: &mut &[u8], context: &'static str) -> Result<[u8; 4]> {
    let mut code = [0u8; 4];
    io::Read::read_exact(reader, &mut code).map_err(truncated(context))?;
    Ok(code)
}

/// Decodes a list count stored as "count minus one".
///
/// 0xFFFF wraps to zero entries.
pub fn count_minus_one(raw: u16) -> usize {
    (raw as usize + 1) & 0xFFFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_minus_one_wraps_to_zero() {
        assert_eq!(count_minus_one(0), 1);
        assert_eq!(count_minus_one(4), 5);
        assert_eq!(count_minus_one(0xFFFF), 0);
    }

    #[test]
    fn checked_range_rejects_overrun() {
        assert_eq!(checked_range("x", 4, 4, 8).unwrap(), 4..8);
        let err = checked_range("resource data", 6, 4, 8).unwrap_err();
        assert!(matches!(
            err,
            RsrcError::OutOfBounds { context: "resource data", start: 6, end: 10, limit: 8 }
        ));
    }

    #[test]
    fn readers_report_truncation() {
        let mut cursor: &[u8] = &[0x12, 0x34, 0x56];
        assert_eq!(read_u24(&mut cursor, "offset").unwrap(), 0x123456);
        assert!(cursor.is_empty());

        let mut short: &[u8] = &[0x01];
        let err = read_u16(&mut short, "type count").unwrap_err();
        assert!(err.to_string().contains("type count is truncated"));
    }
}
