//! Demo song export.
//!
//! SC-55 family control ROMs end with a directory of demo song payloads:
//! eight entries of a 4-byte address followed by a 4-byte length. Entries
//! with a zero length are empty. VSC data files carry no demo songs.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::endian::Normalizer;
use crate::error::{Result, RomError};
use crate::model::SynthModel;

/// Directory entries per image
pub const DEMO_SONG_SLOTS: usize = 8;

const ENTRY_SIZE: usize = 8;

/// Location of the demo song directory of the SC-55 family images.
/// Provisional until checked against real dumps.
pub const SC55_DEMO_DIRECTORY: usize = 0x3C100;

/// Demo song directory offset for a model, if it has one
pub fn demo_directory(model: SynthModel) -> Option<usize> {
    model.is_sc55_family().then_some(SC55_DEMO_DIRECTORY)
}

/// A demo song payload inside the image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoSong {
    /// 1-based song number
    pub number: usize,
    /// Start of the payload
    pub offset: usize,
    /// Payload size in bytes
    pub len: usize,
}

impl DemoSong {
    /// File name the song is exported under
    pub fn file_name(&self) -> String {
        format!("demo_song_{}.bin", self.number)
    }
}

/// Outcome of exporting one demo song
#[derive(Debug)]
pub struct DemoExport {
    /// Song that was exported
    pub song: DemoSong,
    /// Destination file
    pub path: PathBuf,
    /// Bytes written, or why the song could not be exported
    pub result: Result<usize>,
}

/// Read the demo song directory of an image
pub fn locate(data: &[u8], model: SynthModel) -> Result<Vec<DemoSong>> {
    let Some(base) = demo_directory(model) else {
        return Ok(Vec::new());
    };

    let end = base + DEMO_SONG_SLOTS * ENTRY_SIZE;
    let directory = data
        .get(base..end)
        .ok_or_else(|| RomError::TruncatedImage {
            table: "demo song directory",
            start: base,
            end,
            len: data.len(),
        })?;

    let order = Normalizer::native();
    let songs = directory
        .chunks_exact(ENTRY_SIZE)
        .enumerate()
        .filter_map(|(i, entry)| {
            let offset = order.u32([entry[0], entry[1], entry[2], entry[3]]) as usize;
            let len = order.u32([entry[4], entry[5], entry[6], entry[7]]) as usize;
            (len != 0).then_some(DemoSong {
                number: i + 1,
                offset,
                len,
            })
        })
        .collect();

    Ok(songs)
}

/// Write every demo song of an image into `dir`.
///
/// A song that cannot be read or written is reported in its
/// [`DemoExport::result`] and the remaining songs are still exported. Only
/// a missing directory table or an uncreatable output directory fails the
/// whole call.
pub fn export(data: &[u8], model: SynthModel, dir: &Path) -> Result<Vec<DemoExport>> {
    let songs = locate(data, model)?;
    if songs.is_empty() {
        info!("{} image carries no demo songs", model);
        return Ok(Vec::new());
    }

    fs::create_dir_all(dir).map_err(|source| RomError::DemoExport {
        path: dir.to_path_buf(),
        source,
    })?;

    let exports = songs
        .into_iter()
        .map(|song| {
            let path = dir.join(song.file_name());
            let result = write_song(data, &song, &path);
            match &result {
                Ok(written) => debug!("wrote {} ({} bytes)", path.display(), written),
                Err(e) => warn!("demo song {} skipped: {}", song.number, e),
            }
            DemoExport { song, path, result }
        })
        .collect();

    Ok(exports)
}

fn write_song(data: &[u8], song: &DemoSong, path: &Path) -> Result<usize> {
    let end = song.offset.saturating_add(song.len);
    let payload = data
        .get(song.offset..end)
        .ok_or_else(|| RomError::TruncatedImage {
            table: "demo song",
            start: song.offset,
            end,
            len: data.len(),
        })?;

    fs::write(path, payload).map_err(|source| RomError::DemoExport {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(payload.len())
}
