use serde::Serialize;

use crate::banks::Table;
use crate::error::{Result, RomError};
use crate::scramble::AddressMap;

use super::{Fields, Record};

/// Sample rate of every decoded waveform
pub const SAMPLE_RATE: u32 = 32_000;

/// Bit depth of every decoded waveform
pub const BITS_PER_SAMPLE: u16 = 24;

/// How a sample repeats once playback reaches its end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Loop the tail forward
    #[default]
    Forward,
    /// Play the tail forward then in reverse
    PingPong,
    /// Play once
    OneShot,
}

impl LoopMode {
    /// Decode the stored loop mode byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(LoopMode::Forward),
            1 => Some(LoopMode::PingPong),
            2 => Some(LoopMode::OneShot),
            _ => None,
        }
    }

    /// True for every mode except [`LoopMode::OneShot`]
    pub fn is_looping(&self) -> bool {
        !matches!(self, LoopMode::OneShot)
    }
}

/// One wavetable sample (16 byte record plus its decoded waveform)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sample {
    /// Volume attenuation, 0x7F down to 0
    pub volume: u8,
    /// Stored address: plain offset on VSC, wave bank (bits 20 and up) plus
    /// scrambled offset on the SC-55 family
    pub address: u32,
    /// Boundary between attack and decay portions
    pub attack_end: u16,
    /// Length in samples
    pub sample_len: u16,
    /// Loop length, counted back from the end
    pub loop_len: u16,
    /// Loop behaviour
    pub loop_mode: LoopMode,
    /// Base pitch as a MIDI key
    pub root_key: u8,
    /// Fine pitch adjustment, 2048 down to 0; higher raises pitch
    pub pitch: u16,
    /// Fine volume trim (0x400 on VSC), in thousandths of a decibel
    pub fine_volume: u16,
    /// Decoded waveform, 24 bit mono at [`SAMPLE_RATE`]
    #[serde(skip)]
    pub samples: Vec<i32>,
}

impl Sample {
    /// Index the loop restarts from: `sample_len - loop_len - 1`.
    ///
    /// `None` for one-shot samples.
    pub fn loop_point(&self) -> Option<i32> {
        self.loop_mode
            .is_looping()
            .then(|| self.sample_len as i32 - self.loop_len as i32 - 1)
    }

    /// Fetch and decode this sample's waveform from `wave`.
    ///
    /// Each byte is resolved through `map` separately and widened from 8 to
    /// 24 bits. Fails without touching `self.samples` if any byte lies
    /// outside `wave` or outside the sample's wave bank.
    pub fn load_waveform(&mut self, wave: &[u8], map: AddressMap) -> Result<()> {
        let mut samples = Vec::with_capacity(self.sample_len as usize);
        for i in 0..self.sample_len as u32 {
            let truncated = || RomError::TruncatedImage {
                table: "sample waveform",
                start: map.resolve(self.address) as usize,
                end: map.resolve(self.address) as usize + self.sample_len as usize,
                len: wave.len(),
            };
            let physical = map.resolve_byte(self.address, i).ok_or_else(truncated)?;
            let byte = *wave.get(physical as usize).ok_or_else(truncated)?;
            samples.push((map.decode_byte(byte) as i32) << 16);
        }
        self.samples = samples;
        Ok(())
    }
}

impl Record for Sample {
    const TABLE: Table = Table::Samples;

    fn decode(fields: &Fields<'_>) -> Result<Self> {
        let raw_mode = fields.u8(10)?;
        let loop_mode = LoopMode::from_byte(raw_mode)
            .ok_or_else(|| fields.corrupt(format!("invalid loop mode {}", raw_mode)))?;

        let sample = Self {
            volume: fields.u8(0)?,
            address: fields.u24(1)?,
            attack_end: fields.u16(4)?,
            sample_len: fields.u16(6)?,
            loop_len: fields.u16(8)?,
            loop_mode,
            root_key: fields.u8(11)?,
            pitch: fields.u16(12)?,
            fine_volume: fields.u16(14)?,
            samples: Vec::new(),
        };

        if loop_mode.is_looping() && sample.loop_len > sample.sample_len {
            return Err(fields.corrupt(format!(
                "loop length {} exceeds sample length {}",
                sample.loop_len, sample.sample_len
            )));
        }

        Ok(sample)
    }
}
