use serde::Serialize;

use crate::banks::Table;
use crate::error::Result;

use super::{Fields, Record, INST_PARTIAL_SIZE};

/// Partial index marking an unused instrument slot
pub const UNUSED_PARTIAL: u16 = 0xFFFF;

/// Instruments start with a 20 byte header: the name and 8 bytes of
/// unknown purpose.
const HEADER_SIZE: usize = 20;

/// Pitch envelope of an instrument partial
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PitchEnvelope {
    /// Levels P0 to P4
    pub levels: [i8; 5],
    /// Durations P1 to P4
    pub durations: [i8; 4],
    /// Release duration
    pub release: i8,
}

/// Time variant filter (TVF) settings of an instrument partial
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterEnvelope {
    /// Base cutoff
    pub cutoff: i8,
    /// Low velocity clear
    pub low_velocity_clear: i8,
    /// Resonance
    pub resonance: i8,
    /// Initial level
    pub initial_level: i8,
    /// Levels P1 to P4
    pub levels: [i8; 4],
    /// Durations P1 to P4
    pub durations: [i8; 4],
    /// Release duration
    pub release: i8,
    /// LFO depth
    pub lfo_depth: i8,
}

/// Time variant amplifier (TVA) envelope of an instrument partial
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AmpEnvelope {
    /// Attack, hold, decay and sustain levels
    pub levels: [i8; 4],
    /// Attack, hold, decay, sustain and release durations
    pub durations: [i8; 5],
}

/// One of the two partial slots of an instrument (92 bytes, the first 42 of
/// which are decoded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstPartial {
    /// Partial table index, [`UNUSED_PARTIAL`] for an empty slot
    pub partial_index: u16,
    /// Pan position
    pub panpot: i8,
    /// Coarse pitch offset
    pub coarse_pitch: i8,
    /// Fine pitch offset
    pub fine_pitch: i8,
    /// Random pitch depth
    pub random_pitch: i8,
    /// Pitch key follow
    pub pitch_key_follow: i8,
    /// Pitch LFO depth
    pub pitch_lfo_depth: i8,
    /// Pitch envelope multiplier
    pub pitch_mult: i8,
    /// Pitch envelope
    pub pitch_envelope: PitchEnvelope,
    /// Filter settings and envelope
    pub filter: FilterEnvelope,
    /// Amplitude envelope
    pub amp_envelope: AmpEnvelope,
}

impl Default for InstPartial {
    fn default() -> Self {
        Self {
            partial_index: UNUSED_PARTIAL,
            panpot: 0,
            coarse_pitch: 0,
            fine_pitch: 0,
            random_pitch: 0,
            pitch_key_follow: 0,
            pitch_lfo_depth: 0,
            pitch_mult: 0,
            pitch_envelope: PitchEnvelope::default(),
            filter: FilterEnvelope::default(),
            amp_envelope: AmpEnvelope::default(),
        }
    }
}

impl InstPartial {
    /// True when the slot references no partial
    pub fn is_unused(&self) -> bool {
        self.partial_index == UNUSED_PARTIAL
    }

    fn decode_at(fields: &Fields<'_>, base: usize) -> Result<Self> {
        let signed = |offset: usize| fields.i8(base + offset);
        let signed_array = |offset: usize| -> Result<[i8; 4]> {
            Ok(fields.array::<4>(base + offset)?.map(|b| b as i8))
        };

        Ok(Self {
            partial_index: fields.u16(base)?,
            panpot: signed(2)?,
            coarse_pitch: signed(3)?,
            fine_pitch: signed(4)?,
            random_pitch: signed(5)?,
            pitch_key_follow: signed(6)?,
            pitch_lfo_depth: signed(7)?,
            pitch_mult: signed(8)?,
            pitch_envelope: PitchEnvelope {
                levels: fields.array::<5>(base + 9)?.map(|b| b as i8),
                durations: signed_array(14)?,
                release: signed(18)?,
            },
            filter: FilterEnvelope {
                cutoff: signed(19)?,
                low_velocity_clear: signed(20)?,
                resonance: signed(21)?,
                initial_level: signed(22)?,
                levels: signed_array(23)?,
                durations: signed_array(27)?,
                release: signed(31)?,
                lfo_depth: signed(32)?,
            },
            amp_envelope: AmpEnvelope {
                levels: signed_array(33)?,
                durations: fields.array::<5>(base + 37)?.map(|b| b as i8),
            },
        })
    }
}

/// A named patch made of two partial slots (204 byte record)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Instrument {
    /// Instrument name
    pub name: String,
    /// Both partial slots
    pub partials: [InstPartial; 2],
}

impl Instrument {
    /// Partial slots that reference a partial
    pub fn used_partials(&self) -> impl Iterator<Item = &InstPartial> {
        self.partials.iter().filter(|p| !p.is_unused())
    }
}

impl Record for Instrument {
    const TABLE: Table = Table::Instruments;

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            name: fields.name(0)?,
            partials: [
                InstPartial::decode_at(fields, HEADER_SIZE)?,
                InstPartial::decode_at(fields, HEADER_SIZE + INST_PARTIAL_SIZE)?,
            ],
        })
    }
}
