//! Sample address resolution.
//!
//! VSC data files store plain offsets. SC-55 family wave ROMs have their
//! address and data lines wired out of order, so a stored sample address is
//! a wave bank selector (bits 20 and up) plus a 20 bit offset whose bits
//! must be permuted before it can index the dump, and every data byte read
//! through it has its bits permuted as well.

use crate::model::SynthModel;

/// Size of one wave ROM bank
pub const WAVE_BANK_SIZE: u32 = 0x10_0000;

/// Mask of the in-bank part of a stored sample address
pub const BANK_OFFSET_MASK: u32 = WAVE_BANK_SIZE - 1;

/// Logical address bit `i` drives physical address bit `SC55_ADDRESS_LINES[i]`
pub static SC55_ADDRESS_LINES: [u8; 20] = [
    2, 0, 3, 4, 1, 9, 13, 10, 18, 17, 6, 15, 11, 16, 8, 5, 12, 7, 14, 19,
];

/// Decoded data bit `i` is stored in bit `SC55_DATA_LINES[i]`
pub static SC55_DATA_LINES: [u8; 8] = [2, 0, 4, 5, 7, 6, 3, 1];

/// How a model turns a stored sample address into waveform bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMap {
    /// Stored address is a direct offset into the waveform region
    Linear,
    /// Bank selector plus permuted address and data lines
    Scrambled {
        /// Address line permutation
        address_lines: &'static [u8; 20],
        /// Data line permutation
        data_lines: &'static [u8; 8],
    },
}

impl AddressMap {
    /// Strategy used by a model
    pub fn for_model(model: SynthModel) -> Self {
        match model {
            SynthModel::Vsc => AddressMap::Linear,
            SynthModel::Sc55 | SynthModel::Sc55mkII | SynthModel::Sc88 => AddressMap::Scrambled {
                address_lines: &SC55_ADDRESS_LINES,
                data_lines: &SC55_DATA_LINES,
            },
        }
    }

    /// Physical address of byte `index` of a sample stored at `address`.
    ///
    /// Returns `None` when the byte would fall outside the sample's wave
    /// bank. The scrambled layout is not contiguous, so every byte has to
    /// be resolved on its own.
    pub fn resolve_byte(&self, address: u32, index: u32) -> Option<u32> {
        match self {
            AddressMap::Linear => address.checked_add(index),
            AddressMap::Scrambled { address_lines, .. } => {
                let bank = address & !BANK_OFFSET_MASK;
                let offset = (address & BANK_OFFSET_MASK).checked_add(index)?;
                if offset > BANK_OFFSET_MASK {
                    return None;
                }
                Some(bank_base(bank) | scatter(offset, address_lines.as_slice()))
            }
        }
    }

    /// Physical address of the first byte of a sample
    pub fn resolve(&self, address: u32) -> u32 {
        match self {
            AddressMap::Linear => address,
            AddressMap::Scrambled { address_lines, .. } => {
                bank_base(address & !BANK_OFFSET_MASK)
                    | scatter(address & BANK_OFFSET_MASK, address_lines.as_slice())
            }
        }
    }

    /// Decode one stored waveform byte into a signed 8 bit sample
    pub fn decode_byte(&self, byte: u8) -> i8 {
        match self {
            AddressMap::Linear => byte as i8,
            AddressMap::Scrambled { data_lines, .. } => {
                gather(byte as u32, data_lines.as_slice()) as u8 as i8
            }
        }
    }
}

/// Wave banks are laid out back to back, so the selector bits already form
/// the bank's base address.
fn bank_base(selector: u32) -> u32 {
    selector & 0x00F0_0000
}

/// Bit `i` of `value` moves to bit `lines[i]`
fn scatter(value: u32, lines: &[u8]) -> u32 {
    lines
        .iter()
        .enumerate()
        .filter(|&(src, _)| value & (1 << src) != 0)
        .fold(0, |acc, (_, &dst)| acc | (1 << dst))
}

/// Bit `i` of the result comes from bit `lines[i]` of `value`
fn gather(value: u32, lines: &[u8]) -> u32 {
    lines
        .iter()
        .enumerate()
        .filter(|&(_, &src)| value & (1 << src) != 0)
        .fold(0, |acc, (dst, _)| acc | (1 << dst))
}
