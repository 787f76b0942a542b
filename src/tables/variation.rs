use serde::Serialize;

use crate::banks::Table;
use crate::error::Result;

use super::{serialize_array, Fields, Record};

/// Entries per variation row
pub const VARIATION_ENTRIES: usize = 128;

/// Entry value for a program with no variation
pub const NO_VARIATION: u16 = 0xFFFF;

/// One row of the 128 x 128 variation table: the instrument index used for
/// each program number under one variation (bank) number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variation {
    /// Instrument index per program
    #[serde(serialize_with = "serialize_array")]
    pub variation: [u16; VARIATION_ENTRIES],
}

impl Default for Variation {
    fn default() -> Self {
        Self {
            variation: [0; VARIATION_ENTRIES],
        }
    }
}

impl Variation {
    /// Instrument index for `program`, if this row defines one
    pub fn instrument(&self, program: u8) -> Option<u16> {
        self.variation
            .get(program as usize)
            .copied()
            .filter(|&index| index != NO_VARIATION)
    }
}

impl Record for Variation {
    const TABLE: Table = Table::Variations;
    const SPARSE: bool = false;

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            variation: fields.u16_array(0)?,
        })
    }
}
