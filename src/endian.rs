//! Host-independent decoding of the little-endian multi-byte fields stored in
//! control ROM images.
//!
//! A [`Normalizer`] models what a raw word load returns on a given host and
//! corrects for it, so every field decodes to the same integer whatever the
//! host byte order. Extractors use [`Normalizer::native`]; tests can simulate
//! the other order with [`Normalizer::for_host`].

/// Byte order of the machine running the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least significant byte first
    Little,
    /// Most significant byte first
    Big,
}

impl ByteOrder {
    /// Byte order of the current target, fixed at compile time
    pub const NATIVE: ByteOrder = if cfg!(target_endian = "big") {
        ByteOrder::Big
    } else {
        ByteOrder::Little
    };
}

/// Converts image-order fields into host-native integers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    host: ByteOrder,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::native()
    }
}

impl Normalizer {
    /// Normalizer for the host the decoder is running on
    pub const fn native() -> Self {
        Self {
            host: ByteOrder::NATIVE,
        }
    }

    /// Normalizer that behaves as if running on a host with the given order
    pub const fn for_host(host: ByteOrder) -> Self {
        Self { host }
    }

    /// Host order this normalizer corrects for
    pub const fn host(&self) -> ByteOrder {
        self.host
    }

    /// Decode a 2-byte little-endian field
    pub fn u16(&self, bytes: [u8; 2]) -> u16 {
        match self.host {
            ByteOrder::Little => u16::from_le_bytes(bytes),
            ByteOrder::Big => u16::from_be_bytes(bytes).swap_bytes(),
        }
    }

    /// Decode a 3-byte field; the third byte is the most significant and the
    /// result is zero-extended
    pub fn u24(&self, bytes: [u8; 3]) -> u32 {
        self.u32([bytes[0], bytes[1], bytes[2], 0])
    }

    /// Decode a 4-byte little-endian field
    pub fn u32(&self, bytes: [u8; 4]) -> u32 {
        match self.host {
            ByteOrder::Little => u32::from_le_bytes(bytes),
            ByteOrder::Big => u32::from_be_bytes(bytes).swap_bytes(),
        }
    }
}
