use serde::Serialize;

use crate::banks::Table;
use crate::error::Result;

use super::{Fields, Record};

/// Number of breakpoint / sample pairs in a partial
pub const PARTIAL_BREAKS: usize = 16;

const BREAKS_OFFSET: usize = 12;
const SAMPLES_OFFSET: usize = BREAKS_OFFSET + PARTIAL_BREAKS;

/// A key-split set of samples (48 byte record).
///
/// Layout: name (12), note breakpoints (16), sample indices (16, one byte
/// each), 4 unused bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partial {
    /// Partial name
    pub name: String,
    /// Highest key covered by each entry
    pub breaks: [u8; PARTIAL_BREAKS],
    /// Sample table index for each entry; 0 is unset
    pub samples: [u16; PARTIAL_BREAKS],
}

impl Partial {
    /// Breakpoint and sample index of every entry that references a sample
    pub fn zones(&self) -> impl Iterator<Item = (u8, u16)> + '_ {
        self.breaks
            .iter()
            .zip(self.samples.iter())
            .filter(|&(_, &sample)| sample != 0)
            .map(|(&key, &sample)| (key, sample))
    }

    /// Sample index covering `key`: the first entry whose breakpoint is at
    /// or above it
    pub fn sample_for_key(&self, key: u8) -> Option<u16> {
        self.zones()
            .find(|&(upper, _)| key <= upper)
            .map(|(_, sample)| sample)
    }
}

impl Record for Partial {
    const TABLE: Table = Table::Partials;

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        let raw_samples: [u8; PARTIAL_BREAKS] = fields.array(SAMPLES_OFFSET)?;
        Ok(Self {
            name: fields.name(0)?,
            breaks: fields.array(BREAKS_OFFSET)?,
            samples: raw_samples.map(u16::from),
        })
    }
}
