//! The control ROM decoder.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::banks::{self, BankTable};
use crate::config::Config;
use crate::demo::{self, DemoExport};
use crate::error::{Result, RomError};
use crate::model::{self, SynthModel};
use crate::scramble::AddressMap;
use crate::tables::{self, DrumSet, Instrument, Partial, Sample, Variation};

/// A loaded control ROM image and the revision it was identified as.
///
/// The image is read once at construction and never modified afterwards;
/// every `get_*` call decodes its table afresh into the caller's container,
/// so one instance can be shared between threads.
#[derive(Debug)]
pub struct ControlRom<'a> {
    config: &'a Config,
    data: Vec<u8>,
    wave: Option<Vec<u8>>,
    model: SynthModel,
}

impl<'a> ControlRom<'a> {
    /// Load and identify the image named by `config`
    pub fn new(config: &'a Config) -> Result<Self> {
        let data = read_rom(&config.control_rom)?;
        info!(
            "loaded control ROM '{}' ({} bytes)",
            config.control_rom.display(),
            data.len()
        );

        let wave = if config.wave_roms.is_empty() {
            None
        } else {
            let mut wave = Vec::new();
            for path in &config.wave_roms {
                let rom = read_rom(path)?;
                debug!("wave ROM '{}' at 0x{:06X}", path.display(), wave.len());
                wave.extend_from_slice(&rom);
            }
            Some(wave)
        };

        Self::from_parts(config, data, wave)
    }

    /// Identify an image that is already in memory
    pub fn from_image(config: &'a Config, data: Vec<u8>) -> Result<Self> {
        Self::from_parts(config, data, None)
    }

    /// Identify an in-memory image with a separate waveform region
    pub fn from_parts(config: &'a Config, data: Vec<u8>, wave: Option<Vec<u8>>) -> Result<Self> {
        let model = match config.model {
            Some(model) => {
                info!("using configured model {}", model);
                model
            }
            None => {
                let model = model::identify(&data)?;
                info!("identified {} control ROM", model);
                model
            }
        };

        Ok(Self {
            config,
            data,
            wave,
            model,
        })
    }

    /// Revision the image was identified as
    pub fn model(&self) -> SynthModel {
        self.model
    }

    /// Configuration the decoder was built from
    pub fn config(&self) -> &Config {
        self.config
    }

    /// Size of the loaded image in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the loaded image holds no bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Base addresses of this image's tables
    pub fn banks(&self) -> &'static BankTable {
        banks::banks(self.model)
    }

    /// Sample address strategy of this image
    pub fn address_map(&self) -> AddressMap {
        AddressMap::for_model(self.model)
    }

    fn waveform_region(&self) -> &[u8] {
        self.wave.as_deref().unwrap_or(&self.data)
    }

    /// Append every instrument to `instruments`, returning how many were added
    pub fn get_instruments(&self, instruments: &mut Vec<Instrument>) -> Result<usize> {
        tables::extract(&self.data, self.banks(), instruments)
    }

    /// Append every partial to `partials`, returning how many were added
    pub fn get_partials(&self, partials: &mut Vec<Partial>) -> Result<usize> {
        tables::extract(&self.data, self.banks(), partials)
    }

    /// Append every sample, with its decoded waveform, to `samples`.
    ///
    /// Fails as a whole if any waveform lies outside the waveform region.
    pub fn get_samples(&self, samples: &mut Vec<Sample>) -> Result<usize> {
        let mut decoded: Vec<Sample> = Vec::new();
        let count = tables::extract(&self.data, self.banks(), &mut decoded)?;

        let wave = self.waveform_region();
        let map = self.address_map();
        for sample in decoded.iter_mut() {
            sample.load_waveform(wave, map)?;
        }

        samples.extend(decoded);
        Ok(count)
    }

    /// Append all 128 variation rows to `variations`
    pub fn get_variations(&self, variations: &mut Vec<Variation>) -> Result<usize> {
        tables::extract(&self.data, self.banks(), variations)
    }

    /// Append every drum set to `drum_sets`, returning how many were added
    pub fn get_drum_sets(&self, drum_sets: &mut Vec<DrumSet>) -> Result<usize> {
        tables::extract(&self.data, self.banks(), drum_sets)
    }

    /// Write each embedded demo song to its own file under `path`
    pub fn dump_demo_songs(&self, path: impl AsRef<Path>) -> Result<Vec<DemoExport>> {
        demo::export(&self.data, self.model, path.as_ref())
    }
}

fn read_rom(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path).map_err(|source| RomError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })?;
    if data.is_empty() {
        return Err(RomError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let config = Config::new("/nonexistent/control.bin");
        assert!(matches!(
            ControlRom::new(&config),
            Err(RomError::UnreadableFile { .. })
        ));
    }

    #[test]
    fn test_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = Config::new(file.path());
        assert!(matches!(
            ControlRom::new(&config),
            Err(RomError::EmptyFile { .. })
        ));
    }

    #[test]
    fn test_unrecognized_image() {
        let config = Config::default();
        assert!(matches!(
            ControlRom::from_image(&config, vec![0u8; 0x20000]),
            Err(RomError::UnrecognizedModel { len: 0x20000 })
        ));
    }

    #[test]
    fn test_model_override_skips_identification() {
        let config = Config::default().with_model(SynthModel::Sc88);
        let rom = ControlRom::from_image(&config, vec![0u8; 16]).unwrap();
        assert_eq!(rom.model(), SynthModel::Sc88);
        assert_eq!(rom.len(), 16);
    }

    #[test]
    fn test_override_still_bounds_checks_tables() {
        let config = Config::default().with_model(SynthModel::Sc55);
        let rom = ControlRom::from_image(&config, vec![0u8; 16]).unwrap();
        let mut instruments = Vec::new();
        assert!(matches!(
            rom.get_instruments(&mut instruments),
            Err(RomError::TruncatedImage { .. })
        ));
        assert!(instruments.is_empty());
    }
}
