//! Record types decoded from the control ROM and the shared table walk.
//!
//! Every table is a run of fixed size records starting at a bank base
//! address. In sparse tables, slots filled entirely with `0x00` or `0xFF`
//! are unused: trailing unused slots end the table, unused slots in the
//! middle decode to an empty record so that later records keep their index.

pub mod drum;
pub mod instrument;
pub mod partial;
pub mod sample;
pub mod variation;

pub use drum::DrumSet;
pub use instrument::{AmpEnvelope, FilterEnvelope, InstPartial, Instrument, PitchEnvelope};
pub use partial::Partial;
pub use sample::{LoopMode, Sample};
pub use variation::Variation;

use log::{debug, trace};
use serde::Serializer;

use crate::banks::{BankTable, Table};
use crate::endian::Normalizer;
use crate::error::{Result, RomError};

/// Size of a sample record
pub const SAMPLE_SIZE: usize = 16;
/// Size of a partial record
pub const PARTIAL_SIZE: usize = 48;
/// Size of one of the two partial blocks inside an instrument
pub const INST_PARTIAL_SIZE: usize = 92;
/// Size of an instrument record
pub const INSTRUMENT_SIZE: usize = 204;
/// Size of a drum set record
pub const DRUM_SET_SIZE: usize = 1164;
/// Size of one variation row (128 entries of 16 bits)
pub const VARIATION_SIZE: usize = 256;

/// Width of the name fields
pub const NAME_LEN: usize = 12;

/// A record type stored in one of the bank tables
pub trait Record: Sized + Default {
    /// Table the records live in
    const TABLE: Table;

    /// Whether blank slots mark unused records. Dense tables decode every
    /// slot as stored.
    const SPARSE: bool = true;

    /// Decode one record from its fields
    fn decode(fields: &Fields<'_>) -> Result<Self>;
}

/// Bounds-checked field access into one record
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    table: &'static str,
    index: usize,
    bytes: &'a [u8],
    order: Normalizer,
}

impl<'a> Fields<'a> {
    /// Wrap the bytes of record `index` of `table`
    pub fn new(table: &'static str, index: usize, bytes: &'a [u8]) -> Self {
        Self {
            table,
            index,
            bytes,
            order: Normalizer::native(),
        }
    }

    /// Index of the record within its table
    pub fn index(&self) -> usize {
        self.index
    }

    /// Fixed width byte range at `offset`
    pub fn array<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        offset
            .checked_add(N)
            .and_then(|end| self.bytes.get(offset..end))
            .and_then(|slice| slice.try_into().ok())
            .ok_or_else(|| RomError::TruncatedImage {
                table: self.table,
                start: offset,
                end: offset.saturating_add(N),
                len: self.bytes.len(),
            })
    }

    /// Unsigned byte at `offset`
    pub fn u8(&self, offset: usize) -> Result<u8> {
        Ok(self.array::<1>(offset)?[0])
    }

    /// Signed byte at `offset`
    pub fn i8(&self, offset: usize) -> Result<i8> {
        Ok(self.u8(offset)? as i8)
    }

    /// 2-byte field at `offset`
    pub fn u16(&self, offset: usize) -> Result<u16> {
        Ok(self.order.u16(self.array(offset)?))
    }

    /// Packed 3-byte field at `offset`
    pub fn u24(&self, offset: usize) -> Result<u32> {
        Ok(self.order.u24(self.array(offset)?))
    }

    /// 4-byte field at `offset`
    pub fn u32(&self, offset: usize) -> Result<u32> {
        Ok(self.order.u32(self.array(offset)?))
    }

    /// `N` consecutive 2-byte fields starting at `offset`
    pub fn u16_array<const N: usize>(&self, offset: usize) -> Result<[u16; N]> {
        let mut out = [0u16; N];
        for (i, value) in out.iter_mut().enumerate() {
            *value = self.u16(offset + i * 2)?;
        }
        Ok(out)
    }

    /// Fixed width name at `offset`, trimmed of trailing fill bytes
    pub fn name(&self, offset: usize) -> Result<String> {
        Ok(decode_name(&self.array::<NAME_LEN>(offset)?))
    }

    /// Report a field value outside its valid domain
    pub fn corrupt(&self, detail: impl Into<String>) -> RomError {
        RomError::CorruptRecord {
            table: self.table,
            index: self.index,
            detail: detail.into(),
        }
    }
}

fn is_fill(byte: u8) -> bool {
    matches!(byte, 0x00 | 0x20 | 0xFF)
}

/// Interpret a fixed width name field as text, dropping trailing fill bytes
pub fn decode_name(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|&b| !is_fill(b))
        .map_or(0, |last| last + 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// True for a slot that holds no record
pub fn is_blank(record: &[u8]) -> bool {
    record.iter().all(|&b| b == 0x00) || record.iter().all(|&b| b == 0xFF)
}

/// Decode every record of `T`'s table and append them to `out`.
///
/// The whole table extent is checked against the image before anything is
/// read, and `out` is only extended once every record decoded.
pub fn extract<T: Record>(data: &[u8], banks: &BankTable, out: &mut Vec<T>) -> Result<usize> {
    let table = T::TABLE;
    let extent = banks.extent(table);

    let bytes = data
        .get(extent.clone())
        .ok_or_else(|| RomError::TruncatedImage {
            table: table.name(),
            start: extent.start,
            end: extent.end,
            len: data.len(),
        })?;

    let slots: Vec<&[u8]> = bytes.chunks_exact(table.record_size()).collect();
    let used = if T::SPARSE {
        slots
            .iter()
            .rposition(|slot| !is_blank(slot))
            .map_or(0, |last| last + 1)
    } else {
        slots.len()
    };

    debug!(
        "{}: {} of {} slots used at 0x{:06X}",
        table.name(),
        used,
        slots.len(),
        extent.start
    );

    let mut records = Vec::with_capacity(used);
    for (index, slot) in slots[..used].iter().enumerate() {
        if T::SPARSE && is_blank(slot) {
            trace!("{} slot {} unused", table.name(), index);
            records.push(T::default());
            continue;
        }
        records.push(T::decode(&Fields::new(table.name(), index, slot))?);
    }

    out.extend(records);
    Ok(used)
}

/// Serialize a fixed length array of any length as a sequence
pub(crate) fn serialize_array<S, T, const N: usize>(
    values: &[T; N],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
    T: serde::Serialize,
{
    serializer.collect_seq(values.iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_name_trims_fill() {
        assert_eq!(decode_name(b"PIANO 1\0\0\0\0\0"), "PIANO 1");
        assert_eq!(decode_name(b"Strings     "), "Strings");
        assert_eq!(decode_name(b"Bass\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF"), "Bass");
        assert_eq!(decode_name(&[0u8; 12]), "");
        assert_eq!(decode_name(b" Leading"), " Leading");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&[0u8; 16]));
        assert!(is_blank(&[0xFFu8; 16]));
        assert!(!is_blank(&[0, 0, 1, 0]));
        assert!(!is_blank(&[0xFF, 0x00]));
    }

    #[test]
    fn test_fields_bounds_checked() {
        let bytes = [0x34, 0x12, 0x56];
        let fields = Fields::new("test table", 3, &bytes);
        assert_eq!(fields.u16(0).unwrap(), 0x1234);
        assert_eq!(fields.u24(0).unwrap(), 0x56_1234);
        assert!(matches!(
            fields.u16(2),
            Err(RomError::TruncatedImage { start: 2, end: 4, len: 3, .. })
        ));
        assert!(fields.u32(0).is_err());
        assert!(fields.u8(usize::MAX).is_err());
    }

    #[test]
    fn test_corrupt_carries_position() {
        let fields = Fields::new("sample table", 7, &[]);
        match fields.corrupt("bad loop mode") {
            RomError::CorruptRecord { table, index, detail } => {
                assert_eq!(table, "sample table");
                assert_eq!(index, 7);
                assert_eq!(detail, "bad loop mode");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
