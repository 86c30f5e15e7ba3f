//! Where an encoded short string lives: a header word and a payload block.
//!
//! Header layout, least significant bit first:
//!
//! | bits    | field                      |
//! |---------|----------------------------|
//! | 0..6    | length (0-63)              |
//! | 6..10   | alphabet id (0-10)         |
//! | 10..12  | format tag, always `0b10`  |
//!
//! For UTF-8 the length is the number of bytes, for every other alphabet the
//! number of characters.

use crate::config::PayloadConfig;
use crate::error::DecodeError;

/// Tag marking a header as a short string, distinguishing it from the other
/// kinds of property the store keeps.
pub const SHORT_STRING_TAG: u32 = 0b10;

/// Longest string the 6-bit length field can describe.
pub const MAX_LENGTH: usize = 63;

const LENGTH_MASK: u32 = 0x3F;
const ALPHABET_SHIFT: u32 = 6;
const ALPHABET_MASK: u32 = 0xF;
const TAG_SHIFT: u32 = 10;
const TAG_MASK: u32 = 0b11;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub length: u8,
    pub alphabet_id: u8,
}

impl Header {
    pub fn pack(self) -> u32 {
        (SHORT_STRING_TAG << TAG_SHIFT)
            | ((u32::from(self.alphabet_id) & ALPHABET_MASK) << ALPHABET_SHIFT)
            | (u32::from(self.length) & LENGTH_MASK)
    }

    pub fn unpack(header: u32) -> Result<Header, DecodeError> {
        let tag = (header >> TAG_SHIFT) & TAG_MASK;
        if tag != SHORT_STRING_TAG {
            return Err(DecodeError::NotShortString { tag });
        }
        Ok(Header {
            length: (header & LENGTH_MASK) as u8,
            alphabet_id: ((header >> ALPHABET_SHIFT) & ALPHABET_MASK) as u8,
        })
    }
}

/// A property record slot the codec can write a short string into.
///
/// The surrounding record format belongs to the store; the codec only needs
/// the header word and the payload words, least significant word first.
pub trait PropertySlot {
    fn header(&self) -> u32;
    fn set_header(&mut self, header: u32);
    fn payload(&self) -> &[u64];
    fn payload_mut(&mut self) -> &mut [u64];
}

/// A free-standing property block sized for a `PayloadConfig`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyBlock {
    header: u32,
    payload: Vec<u64>,
}

impl PropertyBlock {
    pub fn new(config: &PayloadConfig) -> Self {
        PropertyBlock {
            header: 0,
            payload: vec![0; config.words()],
        }
    }

    pub fn from_parts(header: u32, payload: Vec<u64>) -> Self {
        PropertyBlock { header, payload }
    }

    pub fn is_zero_payload(&self) -> bool {
        self.payload.iter().all(|&w| w == 0)
    }
}

impl PropertySlot for PropertyBlock {
    fn header(&self) -> u32 {
        self.header
    }

    fn set_header(&mut self, header: u32) {
        self.header = header;
    }

    fn payload(&self) -> &[u64] {
        &self.payload
    }

    fn payload_mut(&mut self) -> &mut [u64] {
        &mut self.payload
    }
}
