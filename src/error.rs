//! Error types for encoding, decoding and configuration.

use std::string::FromUtf8Error;

use thiserror::Error;

use crate::alphabet::Alphabet;

/// Reasons a string could not be packed into a property block.
///
/// `TooLong` and `Unencodable` are expected outcomes: the caller should store
/// the string in the dynamic string store instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("string of {length} characters exceeds the short string limit of {max}")]
    TooLong { length: usize, max: usize },

    #[error("no short string alphabet can represent the string")]
    Unencodable,

    #[error("property block has {actual} payload words, expected {expected}")]
    BlockSize { expected: usize, actual: usize },
}

/// Reasons a property block could not be read back as a short string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("header tag {tag:#04b} is not the short string tag")]
    NotShortString { tag: u32 },

    #[error("unknown short string alphabet id {0}")]
    UnknownAlphabet(u8),

    #[error("{alphabet} cannot hold {length} characters (max {max})")]
    LengthOverflow {
        alphabet: Alphabet,
        length: usize,
        max: usize,
    },

    #[error("code {code:#04x} is unassigned in {alphabet}")]
    InvalidCode { alphabet: Alphabet, code: u8 },

    #[error("invalid UTF-8 payload: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("property block has {actual} payload words, expected {expected}")]
    BlockSize { expected: usize, actual: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("payload width {0} must be a whole number of bytes between 8 and 512 bits")]
    PayloadBits(u32),
}
