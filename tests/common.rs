#![allow(dead_code)]

use scrom::banks::{banks, Table};
use scrom::demo::SC55_DEMO_DIRECTORY;
use scrom::model::SIGNATURES;
use scrom::tables::{DRUM_SET_SIZE, INSTRUMENT_SIZE, PARTIAL_SIZE, SAMPLE_SIZE, VARIATION_SIZE};
use scrom::SynthModel;

/// Large enough for every table and the demo directory of every model
pub const IMAGE_SIZE: usize = 0x40000;

/// Builds a synthetic control ROM image for one model
pub struct ImageBuilder {
    model: SynthModel,
    data: Vec<u8>,
}

fn name_bytes(name: &str) -> [u8; 12] {
    let mut out = [0u8; 12];
    out[..name.len()].copy_from_slice(name.as_bytes());
    out
}

impl ImageBuilder {
    /// Zeroed image carrying `model`'s signature
    pub fn new(model: SynthModel) -> Self {
        let mut data = vec![0u8; IMAGE_SIZE];
        let signature = SIGNATURES
            .iter()
            .find(|sig| sig.model == model)
            .expect("every model has a signature");
        for probe in signature.probes {
            data[probe.offset..probe.end()].copy_from_slice(probe.bytes);
        }
        Self { model, data }
    }

    fn slot(&self, table: Table, index: usize) -> usize {
        banks(self.model).base(table) + index * table.record_size()
    }

    /// Raw bytes at an absolute offset
    pub fn bytes(mut self, offset: usize, bytes: &[u8]) -> Self {
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Instrument record with both partial slot indices
    pub fn instrument(self, index: usize, name: &str, partials: [u16; 2]) -> Self {
        let mut r = [0u8; INSTRUMENT_SIZE];
        r[..12].copy_from_slice(&name_bytes(name));
        r[20..22].copy_from_slice(&partials[0].to_le_bytes());
        r[112..114].copy_from_slice(&partials[1].to_le_bytes());
        let at = self.slot(Table::Instruments, index);
        self.bytes(at, &r)
    }

    /// Partial record from (breakpoint, sample index) pairs
    pub fn partial(self, index: usize, name: &str, zones: &[(u8, u8)]) -> Self {
        let mut r = [0u8; PARTIAL_SIZE];
        r[..12].copy_from_slice(&name_bytes(name));
        for (i, &(key, sample)) in zones.iter().enumerate() {
            r[12 + i] = key;
            r[28 + i] = sample;
        }
        let at = self.slot(Table::Partials, index);
        self.bytes(at, &r)
    }

    /// Sample record
    pub fn sample(
        self,
        index: usize,
        address: u32,
        sample_len: u16,
        loop_len: u16,
        loop_mode: u8,
        root_key: u8,
    ) -> Self {
        let mut r = [0u8; SAMPLE_SIZE];
        r[0] = 0x7F;
        r[1..4].copy_from_slice(&address.to_le_bytes()[..3]);
        r[6..8].copy_from_slice(&sample_len.to_le_bytes());
        r[8..10].copy_from_slice(&loop_len.to_le_bytes());
        r[10] = loop_mode;
        r[11] = root_key;
        r[14..16].copy_from_slice(&0x400u16.to_le_bytes());
        let at = self.slot(Table::Samples, index);
        self.bytes(at, &r)
    }

    /// Drum set record with every key sharing the same flags and preset
    pub fn drum_set(self, index: usize, name: &str, preset: u16, flags: u8) -> Self {
        let mut r = vec![0u8; DRUM_SET_SIZE];
        for key in 0..128 {
            r[key * 2..key * 2 + 2].copy_from_slice(&preset.to_le_bytes());
            r[256 + key] = 100;
            r[384 + key] = key as u8;
            r[1024 + key] = flags;
        }
        r[1152..].copy_from_slice(&name_bytes(name));
        let at = self.slot(Table::DrumSets, index);
        self.bytes(at, &r)
    }

    /// One variation table entry
    pub fn variation(self, row: usize, program: usize, instrument: u16) -> Self {
        let at = banks(self.model).base(Table::Variations) + row * VARIATION_SIZE + program * 2;
        self.bytes(at, &instrument.to_le_bytes())
    }

    /// Demo song directory entry plus its payload
    pub fn demo_song(self, slot: usize, offset: usize, payload: &[u8]) -> Self {
        let entry = SC55_DEMO_DIRECTORY + slot * 8;
        let mut dir = [0u8; 8];
        dir[..4].copy_from_slice(&(offset as u32).to_le_bytes());
        dir[4..].copy_from_slice(&(payload.len() as u32).to_le_bytes());
        self.bytes(entry, &dir).bytes(offset, payload)
    }

    /// Cut the image down to `len` bytes
    pub fn truncate(mut self, len: usize) -> Self {
        self.data.truncate(len);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}
