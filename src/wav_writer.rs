use std::path::{Path, PathBuf};

use hound::{WavSpec, WavWriter};
use log::debug;

use crate::error::{Result, RomError};
use crate::tables::sample::{Sample, BITS_PER_SAMPLE, SAMPLE_RATE};

/// Format of every exported sample: 24 bit mono PCM at the ROM's rate
pub fn sample_spec() -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    }
}

/// File name for sample `index`, tagged with its root key
pub fn sample_file_name(index: usize, sample: &Sample) -> String {
    format!("sample_{:03}_key{:03}.wav", index, sample.root_key)
}

/// Write one decoded sample as a WAV file
pub fn write_sample(path: &Path, sample: &Sample) -> Result<()> {
    let wav_error = |source| RomError::WavExport {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WavWriter::create(path, sample_spec()).map_err(wav_error)?;
    for &value in &sample.samples {
        writer.write_sample(value).map_err(wav_error)?;
    }
    writer.finalize().map_err(wav_error)?;

    debug!("wrote {} ({} frames)", path.display(), sample.samples.len());
    Ok(())
}

/// Write every sample into `dir`, returning the files created.
///
/// Samples without waveform data are skipped.
pub fn write_samples(dir: &Path, samples: &[Sample]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| RomError::WavExport {
        path: dir.to_path_buf(),
        source: hound::Error::IoError(e),
    })?;

    let mut written = Vec::new();
    for (index, sample) in samples.iter().enumerate() {
        if sample.samples.is_empty() {
            continue;
        }
        let path = dir.join(sample_file_name(index, sample));
        write_sample(&path, sample)?;
        written.push(path);
    }
    Ok(written)
}
