// -*- mode: rust; bidi-display-reordering: nil -*-

//! # Shortstr - short strings packed into property blocks.
//!
//! A property store keeps each property in a record with a small fixed-size
//! payload block. Most string properties are short (names, codes, dates,
//! email addresses), and storing them out of line in a dynamic string store
//! costs an extra allocation and an extra read. This crate packs such strings
//! directly into the payload block instead.
//!
//! It does so by picking, among a family of restricted alphabets of 4 to 7
//! bits per character, the first one that can represent the string, and
//! falling back to one byte per character (Latin-1) or UTF-8 when none can.
//! Not every string fits: encoding is partial, and a failure just means the
//! caller should use the dynamic string store.
//!
//! ## Usage Summary
//!
//! ```
//! use shortstr::{Alphabet, PayloadConfig, PropertyBlock, ShortStringCodec};
//!
//! let codec = ShortStringCodec::new(PayloadConfig::default());
//! let mut block = PropertyBlock::new(codec.config());
//!
//! assert_eq!(codec.encode("HELLO", &mut block), Ok(Alphabet::Upper));
//! assert_eq!(codec.decode(&block).unwrap(), "HELLO");
//!
//! // Too long for any alphabet: store it elsewhere.
//! assert!(codec.encode(&"x".repeat(40), &mut block).is_err());
//! ```
//!
//! Records owned by a store plug in through the `PropertySlot` trait;
//! `PropertyBlock` is a standalone implementation.
//!
//! ## Alphabets
//!
//! | id | alphabet  | bits | characters                                  |
//! |----|-----------|------|---------------------------------------------|
//! |  1 | NUMERICAL | 4    | `0-9 + , ' SP . -`                          |
//! |  2 | DATE      | 4    | `0-9 + , : SP . -`                          |
//! |  3 | UPPER     | 5    | `A-Z SP _ . - : /`                          |
//! |  4 | LOWER     | 5    | `a-z SP _ . - : /`                          |
//! |  5 | EMAIL     | 5    | `a-z , _ . - + @`                           |
//! |  6 | EMAILSYM  | 6    | `a-z 0-9 SP _ . - + @ : / , '`              |
//! |  7 | ALPHANUM  | 6    | `A-Z a-z 0-9 SP _`                          |
//! |  8 | ALPHASYM  | 6    | `A-Z a-z SP _ + , . - / ' : @`              |
//! |  9 | EUROPEAN  | 7    | `A-Z a-z 0-9 À-ÿ (not × ÷) SP _ . -`        |
//! | 10 | LATIN1    | 8    | U+0000-U+00FF                               |
//! |  0 | UTF8      | 8    | anything, counted in bytes                  |
//!
//! A payload of `N` bits holds `N / bits` characters of an alphabet, and no
//! string is ever longer than 63 characters since the header has a 6-bit
//! length field. With the default 14-byte block that is 28 NUMERICAL
//! characters, 22 UPPER characters or 14 bytes of Latin-1 or UTF-8.
//!
//! Characters are packed most significant first, and an all-zero payload is
//! read as the empty string. A string whose every code is zero (`"0"` in
//! NUMERICAL, `"\0"` in Latin-1) is therefore read back as `""`.

mod alphabet;
mod bits;
mod codec;
mod config;
mod error;
mod record;
mod select;

pub use alphabet::{Alphabet, Punctuation};
pub use bits::BitRegister;
pub use codec::ShortStringCodec;
pub use config::{PayloadConfig, MAX_PAYLOAD_BITS};
pub use error::{ConfigError, DecodeError, EncodeError};
pub use record::{Header, PropertyBlock, PropertySlot, MAX_LENGTH, SHORT_STRING_TAG};
