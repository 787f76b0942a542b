//! Per-model base addresses of the logical tables inside a control ROM.

use std::ops::Range;

use crate::model::SynthModel;

/// Eight absolute base addresses into the image.
///
/// Slots 0..=2 hold the instrument, partial and sample tables, slots 3..=5
/// are reserved, slot 6 holds the variation table and slot 7 the drum sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankTable(pub [u32; 8]);

/// Logical tables a [`BankTable`] locates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// 204 byte instrument records
    Instruments,
    /// 48 byte partial records
    Partials,
    /// 16 byte sample records
    Samples,
    /// 128 x 128 variation lookup
    Variations,
    /// 1164 byte drum set records
    DrumSets,
}

impl Table {
    /// Human readable table name used in errors and logs
    pub fn name(&self) -> &'static str {
        match self {
            Table::Instruments => "instrument table",
            Table::Partials => "partial table",
            Table::Samples => "sample table",
            Table::Variations => "variation table",
            Table::DrumSets => "drum set table",
        }
    }

    /// Bank slot holding this table's base address
    pub fn slot(&self) -> usize {
        match self {
            Table::Instruments => 0,
            Table::Partials => 1,
            Table::Samples => 2,
            Table::Variations => 6,
            Table::DrumSets => 7,
        }
    }

    /// Size in bytes of one record of this table
    pub fn record_size(&self) -> usize {
        match self {
            Table::Instruments => crate::tables::INSTRUMENT_SIZE,
            Table::Partials => crate::tables::PARTIAL_SIZE,
            Table::Samples => crate::tables::SAMPLE_SIZE,
            Table::Variations => crate::tables::VARIATION_SIZE,
            Table::DrumSets => crate::tables::DRUM_SET_SIZE,
        }
    }
}

/// Bank table of the Virtual Sound Canvas data file
pub static BANKS_VSC: BankTable = BankTable([
    0x00034, 0x0BD34, 0x0DEF4, 0x10034, 0x1BD34, 0x1DEF4, 0x20034, 0x30000,
]);

/// Bank table shared by the SC-55 family control ROMs
pub static BANKS_SC55: BankTable = BankTable([
    0x10000, 0x1BD00, 0x1DEC0, 0x20000, 0x2BD00, 0x2DEC0, 0x30000, 0x38080,
]);

/// Number of variation records (one per bank number)
pub const VARIATION_COUNT: usize = 128;

/// Drum set slots available on every supported model
pub const DRUM_SET_COUNT: usize = 14;

/// Bank table for a model
pub fn banks(model: SynthModel) -> &'static BankTable {
    match model {
        SynthModel::Vsc => &BANKS_VSC,
        SynthModel::Sc55 | SynthModel::Sc55mkII | SynthModel::Sc88 => &BANKS_SC55,
    }
}

impl BankTable {
    /// Base address of a table
    pub fn base(&self, table: Table) -> usize {
        self.0[table.slot()] as usize
    }

    /// Maximum number of records a table can hold.
    ///
    /// The three record tables run up to the next slot; the variation and
    /// drum set tables have fixed sizes.
    pub fn capacity(&self, table: Table) -> usize {
        match table {
            Table::Instruments | Table::Partials | Table::Samples => {
                let slot = table.slot();
                let span = self.0[slot + 1].saturating_sub(self.0[slot]) as usize;
                span / table.record_size()
            }
            Table::Variations => VARIATION_COUNT,
            Table::DrumSets => DRUM_SET_COUNT,
        }
    }

    /// Byte range covering every record slot of a table
    pub fn extent(&self, table: Table) -> Range<usize> {
        let start = self.base(table);
        start..start + self.capacity(table) * table.record_size()
    }
}
