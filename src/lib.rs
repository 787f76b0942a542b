//! Decoder for Roland Sound Canvas control ROM images.
//!
//! Turns a raw control ROM dump into the tables a sample playback engine
//! needs: wavetable samples, partials, instruments, drum sets and the
//! variation table. The image's hardware revision is identified from fixed
//! signature bytes and selects the bank table and sample address scheme
//! used for every other read.
//!
//! ```no_run
//! use scrom::{Config, ControlRom};
//!
//! let config = Config::new("sc55_control.bin");
//! let rom = ControlRom::new(&config)?;
//!
//! let mut instruments = Vec::new();
//! rom.get_instruments(&mut instruments)?;
//! for (i, inst) in instruments.iter().enumerate() {
//!     println!("{}: {}", i, inst.name);
//! }
//! # Ok::<(), scrom::RomError>(())
//! ```

#![warn(missing_docs)]

pub mod banks;
pub mod config;
pub mod control_rom;
pub mod demo;
pub mod endian;
pub mod error;
pub mod model;
pub mod scramble;
pub mod tables;
pub mod wav_writer;

pub use config::Config;
pub use control_rom::ControlRom;
pub use demo::{DemoExport, DemoSong};
pub use error::{Result, RomError};
pub use model::SynthModel;
pub use tables::{DrumSet, InstPartial, Instrument, LoopMode, Partial, Sample, Variation};
