use serde::Serialize;

use crate::banks::Table;
use crate::error::Result;

use super::{serialize_array, Fields, Record};

/// Keys per drum set
pub const DRUM_KEYS: usize = 128;

/// Flag bit: the key responds to note on
pub const FLAG_NOTE_ON: u8 = 0x10;
/// Flag bit: the key responds to note off
pub const FLAG_NOTE_OFF: u8 = 0x01;

const PRESET_OFFSET: usize = 0;
const VOLUME_OFFSET: usize = PRESET_OFFSET + DRUM_KEYS * 2;
const KEY_OFFSET: usize = VOLUME_OFFSET + DRUM_KEYS;
const ASSIGN_GROUP_OFFSET: usize = KEY_OFFSET + DRUM_KEYS;
const PANPOT_OFFSET: usize = ASSIGN_GROUP_OFFSET + DRUM_KEYS;
const REVERB_OFFSET: usize = PANPOT_OFFSET + DRUM_KEYS;
const CHORUS_OFFSET: usize = REVERB_OFFSET + DRUM_KEYS;
const FLAGS_OFFSET: usize = CHORUS_OFFSET + DRUM_KEYS;
const NAME_OFFSET: usize = FLAGS_OFFSET + DRUM_KEYS;

/// A percussion kit: parallel per-key arrays plus a name (1164 byte record)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrumSet {
    /// Instrument played by each key
    #[serde(serialize_with = "serialize_array")]
    pub preset: [u16; DRUM_KEYS],
    /// Per-key volume
    #[serde(serialize_with = "serialize_array")]
    pub volume: [u8; DRUM_KEYS],
    /// Per-key pitch
    #[serde(serialize_with = "serialize_array")]
    pub key: [u8; DRUM_KEYS],
    /// Exclusive class; keys sharing a group cut each other off
    #[serde(serialize_with = "serialize_array")]
    pub assign_group: [u8; DRUM_KEYS],
    /// Per-key pan position
    #[serde(serialize_with = "serialize_array")]
    pub panpot: [u8; DRUM_KEYS],
    /// Per-key reverb send
    #[serde(serialize_with = "serialize_array")]
    pub reverb: [u8; DRUM_KEYS],
    /// Per-key chorus send
    #[serde(serialize_with = "serialize_array")]
    pub chorus: [u8; DRUM_KEYS],
    /// Per-key behaviour flags, see [`FLAG_NOTE_ON`] and [`FLAG_NOTE_OFF`]
    #[serde(serialize_with = "serialize_array")]
    pub flags: [u8; DRUM_KEYS],
    /// Kit name
    pub name: String,
}

impl Default for DrumSet {
    fn default() -> Self {
        Self {
            preset: [0; DRUM_KEYS],
            volume: [0; DRUM_KEYS],
            key: [0; DRUM_KEYS],
            assign_group: [0; DRUM_KEYS],
            panpot: [0; DRUM_KEYS],
            reverb: [0; DRUM_KEYS],
            chorus: [0; DRUM_KEYS],
            flags: [0; DRUM_KEYS],
            name: String::new(),
        }
    }
}

impl DrumSet {
    /// True if `key` is triggered by note on
    pub fn note_on(&self, key: u8) -> bool {
        self.flag(key, FLAG_NOTE_ON)
    }

    /// True if `key` reacts to note off
    pub fn note_off(&self, key: u8) -> bool {
        self.flag(key, FLAG_NOTE_OFF)
    }

    fn flag(&self, key: u8, mask: u8) -> bool {
        self.flags
            .get(key as usize)
            .is_some_and(|flags| flags & mask != 0)
    }
}

impl Record for DrumSet {
    const TABLE: Table = Table::DrumSets;

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            preset: fields.u16_array(PRESET_OFFSET)?,
            volume: fields.array(VOLUME_OFFSET)?,
            key: fields.array(KEY_OFFSET)?,
            assign_group: fields.array(ASSIGN_GROUP_OFFSET)?,
            panpot: fields.array(PANPOT_OFFSET)?,
            reverb: fields.array(REVERB_OFFSET)?,
            chorus: fields.array(CHORUS_OFFSET)?,
            flags: fields.array(FLAGS_OFFSET)?,
            name: fields.name(NAME_OFFSET)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{DRUM_SET_SIZE, NAME_LEN};

    #[test]
    fn test_layout_fills_record() {
        assert_eq!(NAME_OFFSET + NAME_LEN, DRUM_SET_SIZE);
    }

    #[test]
    fn test_decode_parallel_arrays() {
        let mut r = vec![0u8; DRUM_SET_SIZE];
        r[2 * 36..2 * 36 + 2].copy_from_slice(&0x0123u16.to_le_bytes());
        r[VOLUME_OFFSET + 36] = 100;
        r[KEY_OFFSET + 36] = 36;
        r[ASSIGN_GROUP_OFFSET + 42] = 1;
        r[PANPOT_OFFSET + 36] = 64;
        r[REVERB_OFFSET + 36] = 40;
        r[CHORUS_OFFSET + 36] = 10;
        r[FLAGS_OFFSET + 36] = FLAG_NOTE_ON | FLAG_NOTE_OFF;
        r[NAME_OFFSET..].copy_from_slice(b"STANDARD\0\0\0\0");

        let set = DrumSet::decode(&Fields::new("drum set table", 0, &r)).unwrap();
        assert_eq!(set.name, "STANDARD");
        assert_eq!(set.preset[36], 0x0123);
        assert_eq!(set.volume[36], 100);
        assert_eq!(set.key[36], 36);
        assert_eq!(set.assign_group[42], 1);
        assert_eq!(set.panpot[36], 64);
        assert_eq!(set.reverb[36], 40);
        assert_eq!(set.chorus[36], 10);
        assert!(set.note_on(36) && set.note_off(36));
        assert!(!set.note_on(37));
    }

    #[test]
    fn test_flags_out_of_range_key() {
        let set = DrumSet::default();
        assert!(!set.note_on(200));
    }
}
