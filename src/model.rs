//! Hardware revision detection

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RomError};

/// Hardware revision a control ROM image belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthModel {
    /// Virtual Sound Canvas (software synthesizer data file)
    Vsc,
    /// SC-55
    Sc55,
    /// SC-55mkII
    #[serde(rename = "sc55mk2")]
    Sc55mkII,
    /// SC-88
    Sc88,
}

impl SynthModel {
    /// All supported revisions
    pub const ALL: [SynthModel; 4] = [
        SynthModel::Vsc,
        SynthModel::Sc55,
        SynthModel::Sc55mkII,
        SynthModel::Sc88,
    ];

    /// True for the hardware modules sharing the SC-55 memory map
    pub fn is_sc55_family(&self) -> bool {
        !matches!(self, SynthModel::Vsc)
    }
}

impl fmt::Display for SynthModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SynthModel::Vsc => "VSC",
            SynthModel::Sc55 => "SC-55",
            SynthModel::Sc55mkII => "SC-55mkII",
            SynthModel::Sc88 => "SC-88",
        };
        f.write_str(name)
    }
}

impl FromStr for SynthModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "vsc" => Ok(SynthModel::Vsc),
            "sc55" => Ok(SynthModel::Sc55),
            "sc55mk2" | "sc55mkii" => Ok(SynthModel::Sc55mkII),
            "sc88" => Ok(SynthModel::Sc88),
            other => Err(format!(
                "unknown model '{}' (expected vsc, sc55, sc55mk2 or sc88)",
                other
            )),
        }
    }
}

/// Fixed bytes expected at a fixed offset of an image
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    /// Absolute offset into the image
    pub offset: usize,
    /// Bytes that must be present at `offset`
    pub bytes: &'static [u8],
}

impl Probe {
    /// One past the last byte this probe inspects
    pub const fn end(&self) -> usize {
        self.offset + self.bytes.len()
    }

    fn matches(&self, data: &[u8]) -> bool {
        data.get(self.offset..self.end()) == Some(self.bytes)
    }
}

/// The probes that identify one revision
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    /// Revision this signature selects
    pub model: SynthModel,
    /// All of these must match
    pub probes: &'static [Probe],
}

/// SC-55 family images carry their model tag in the last 16 bytes before
/// the first instrument table. Tag locations are provisional until checked
/// against real dumps.
const SC55_TAG_OFFSET: usize = 0xFFF0;

/// VSC images carry their tag inside the 0x34 byte header.
const VSC_TAG_OFFSET: usize = 0x20;

/// Candidates in priority order. SC-55mkII must be tested before SC-55 since
/// its tag extends the SC-55 one.
pub static SIGNATURES: [Signature; 4] = [
    Signature {
        model: SynthModel::Sc88,
        probes: &[Probe {
            offset: SC55_TAG_OFFSET,
            bytes: b"SC-88",
        }],
    },
    Signature {
        model: SynthModel::Sc55mkII,
        probes: &[Probe {
            offset: SC55_TAG_OFFSET,
            bytes: b"SC-55mkII",
        }],
    },
    Signature {
        model: SynthModel::Sc55,
        probes: &[Probe {
            offset: SC55_TAG_OFFSET,
            bytes: b"SC-55",
        }],
    },
    Signature {
        model: SynthModel::Vsc,
        probes: &[Probe {
            offset: VSC_TAG_OFFSET,
            bytes: b"VSC",
        }],
    },
];

/// Smallest image every candidate signature can be probed against
pub fn min_probe_len() -> usize {
    SIGNATURES
        .iter()
        .flat_map(|sig| sig.probes.iter())
        .map(Probe::end)
        .max()
        .unwrap_or(0)
}

/// Classify an image into exactly one revision.
///
/// Images too short to hold every candidate's probes are rejected outright
/// rather than matched against a subset of the signatures.
pub fn identify(data: &[u8]) -> Result<SynthModel> {
    let required = min_probe_len();
    if data.len() < required {
        debug!(
            "image of {} bytes is below the {} bytes needed for identification",
            data.len(),
            required
        );
        return Err(RomError::UnrecognizedModel { len: data.len() });
    }

    SIGNATURES
        .iter()
        .find(|sig| sig.probes.iter().all(|probe| probe.matches(data)))
        .map(|sig| sig.model)
        .ok_or_else(|| RomError::UnrecognizedModel { len: data.len() })
}
