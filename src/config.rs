//! Width of the property block payload the codec packs into.

use std::convert::TryFrom;

use arbitrary::{Arbitrary, Unstructured};
use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::error::ConfigError;

/// Widest payload supported. 63 characters of 8 bits need 504 bits, so
/// nothing wider is ever useful.
pub const MAX_PAYLOAD_BITS: u32 = 512;

const MIN_PAYLOAD_BITS: u32 = 8;

/// Fourteen bytes, the size of a property record payload block.
const DEFAULT_PAYLOAD_BITS: u32 = 112;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPayloadConfig")]
pub struct PayloadConfig {
    payload_bits: u32,
}

#[derive(Deserialize)]
struct RawPayloadConfig {
    payload_bits: u32,
}

impl TryFrom<RawPayloadConfig> for PayloadConfig {
    type Error = ConfigError;

    fn try_from(raw: RawPayloadConfig) -> Result<Self, Self::Error> {
        PayloadConfig::new(raw.payload_bits)
    }
}

impl PayloadConfig {
    pub fn new(payload_bits: u32) -> Result<Self, ConfigError> {
        if payload_bits < MIN_PAYLOAD_BITS
            || payload_bits > MAX_PAYLOAD_BITS
            || payload_bits % 8 != 0
        {
            return Err(ConfigError::PayloadBits(payload_bits));
        }
        Ok(PayloadConfig { payload_bits })
    }

    pub fn from_bytes(payload_bytes: u32) -> Result<Self, ConfigError> {
        Self::new(payload_bytes.saturating_mul(8))
    }

    pub fn payload_bits(&self) -> u32 {
        self.payload_bits
    }

    /// Capacity in bytes, which bounds both the Latin-1 and UTF-8 encodings.
    pub fn max_bytes(&self) -> usize {
        (self.payload_bits / 8) as usize
    }

    /// Number of 64-bit words a property block needs to hold the payload.
    pub fn words(&self) -> usize {
        ((self.payload_bits + 63) / 64) as usize
    }

    pub fn max_length(&self, alphabet: Alphabet) -> usize {
        (self.payload_bits / alphabet.step()) as usize
    }
}

impl Default for PayloadConfig {
    fn default() -> Self {
        PayloadConfig {
            payload_bits: DEFAULT_PAYLOAD_BITS,
        }
    }
}

impl<'a> Arbitrary<'a> for PayloadConfig {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let bytes = u.int_in_range(MIN_PAYLOAD_BITS / 8..=MAX_PAYLOAD_BITS / 8)?;
        Ok(PayloadConfig {
            payload_bits: bytes * 8,
        })
    }
}
