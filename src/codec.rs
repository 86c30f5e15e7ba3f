//! Encoding strings into property slots and reading them back.

use tracing::{debug, trace};

use crate::alphabet::{Alphabet, Symbol};
use crate::bits::BitRegister;
use crate::config::PayloadConfig;
use crate::error::{DecodeError, EncodeError};
use crate::record::{Header, PropertySlot, MAX_LENGTH};
use crate::select::{classify, Candidates};

/// Packs short strings into, and unpacks them from, property slots of one
/// fixed payload width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShortStringCodec {
    config: PayloadConfig,
}

impl ShortStringCodec {
    pub fn new(config: PayloadConfig) -> Self {
        ShortStringCodec { config }
    }

    pub fn config(&self) -> &PayloadConfig {
        &self.config
    }

    /// Longest string, in characters, that any alphabet could hold.
    pub fn max_length(&self) -> usize {
        MAX_LENGTH.min(self.config.max_length(Alphabet::Numerical))
    }

    /// A fresh zeroed register of the configured width.
    fn register(&self) -> BitRegister {
        BitRegister::new(self.config.payload_bits())
    }

    fn check_slot<S: PropertySlot + ?Sized>(&self, slot: &S) -> Result<(), (usize, usize)> {
        let expected = self.config.words();
        let actual = slot.payload().len();
        if expected == actual {
            Ok(())
        } else {
            Err((expected, actual))
        }
    }

    /// Encodes `s` into `slot` using the narrowest alphabet that can hold it,
    /// and returns that alphabet.
    ///
    /// Restricted alphabets are tried in id order, then Latin-1, then UTF-8.
    /// On `Err` the slot is left untouched and the string belongs in the
    /// dynamic string store.
    pub fn encode<S: PropertySlot + ?Sized>(
        &self,
        s: &str,
        slot: &mut S,
    ) -> Result<Alphabet, EncodeError> {
        self.check_slot(slot)
            .map_err(|(expected, actual)| EncodeError::BlockSize { expected, actual })?;

        let length = s.chars().count();
        let max = self.max_length();
        if length > max {
            debug!(length, max, "string too long for a short string");
            return Err(EncodeError::TooLong { length, max });
        }
        if length == 0 {
            self.write(slot, Alphabet::Utf8, 0, &self.register());
            return Ok(Alphabet::Utf8);
        }

        let max_bytes = self.config.max_bytes();
        let latin1 = length <= max_bytes && s.chars().all(|c| (c as u32) <= 0xFF);

        // Restricted alphabets only hold Latin-1 characters, so a short string
        // that is not Latin-1 can only go to UTF-8.
        let mut candidates = if length <= max_bytes && !latin1 {
            Candidates::none()
        } else {
            Candidates::fitting(length, &self.config)
        };
        let symbols = classify(s, &mut candidates);
        trace!(?candidates, length, "classified short string");

        for alphabet in candidates.iter() {
            if length > self.config.max_length(alphabet) {
                continue;
            }
            let reg = self.pack_symbols(alphabet, &symbols);
            self.write(slot, alphabet, length, &reg);
            trace!(%alphabet, length, "encoded short string");
            return Ok(alphabet);
        }

        if latin1 {
            let reg = self.pack_bytes(s.chars().map(|c| c as u32 as u8));
            self.write(slot, Alphabet::Latin1, length, &reg);
            trace!(alphabet = %Alphabet::Latin1, length, "encoded short string");
            return Ok(Alphabet::Latin1);
        }

        // The header counts UTF-8 in bytes, so the byte count must also fit
        // the length field.
        if length <= max_bytes && s.len() <= max_bytes.min(MAX_LENGTH) {
            let reg = self.pack_bytes(s.bytes());
            self.write(slot, Alphabet::Utf8, s.len(), &reg);
            trace!(alphabet = %Alphabet::Utf8, bytes = s.len(), "encoded short string");
            return Ok(Alphabet::Utf8);
        }

        debug!(length, bytes = s.len(), "no short string alphabet fits");
        Err(EncodeError::Unencodable)
    }

    /// Packs classified symbols most significant first.
    fn pack_symbols(&self, alphabet: Alphabet, symbols: &[Symbol]) -> BitRegister {
        let step = alphabet.step();
        let mask = u64::from(alphabet.mask());
        let mut reg = self.register();
        for (i, symbol) in symbols.iter().enumerate() {
            let code = match alphabet.encode_symbol(*symbol) {
                Some(code) => code,
                None => unreachable!("{} admitted but cannot encode {:?}", alphabet, symbol),
            };
            if i != 0 {
                reg.shift_left(step);
            }
            reg.or_low(u64::from(code), mask);
        }
        reg
    }

    fn pack_bytes<I: Iterator<Item = u8>>(&self, bytes: I) -> BitRegister {
        let mut reg = self.register();
        for (i, b) in bytes.enumerate() {
            if i != 0 {
                reg.shift_left(8);
            }
            reg.or_low(u64::from(b), 0xFF);
        }
        reg
    }

    fn write<S: PropertySlot + ?Sized>(
        &self,
        slot: &mut S,
        alphabet: Alphabet,
        length: usize,
        reg: &BitRegister,
    ) {
        debug_assert!(length <= MAX_LENGTH);
        let header = Header {
            length: length as u8,
            alphabet_id: alphabet.id(),
        };
        slot.payload_mut().copy_from_slice(reg.words());
        slot.set_header(header.pack());
    }

    /// Reads the short string stored in `slot`.
    ///
    /// An all-zero payload reads as the empty string whatever the header
    /// says, so any string that packs to all zeros (such as `"0"` in
    /// NUMERICAL) also reads back as empty.
    pub fn decode<S: PropertySlot + ?Sized>(&self, slot: &S) -> Result<String, DecodeError> {
        self.check_slot(slot)
            .map_err(|(expected, actual)| DecodeError::BlockSize { expected, actual })?;

        let mut reg = BitRegister::from_words(self.config.payload_bits(), slot.payload());
        if reg.is_zero() {
            return Ok(String::new());
        }

        let header = Header::unpack(slot.header())?;
        let alphabet = match Alphabet::from_id(header.alphabet_id) {
            Some(alphabet) => alphabet,
            None => {
                debug!(id = header.alphabet_id, "unknown short string alphabet");
                return Err(DecodeError::UnknownAlphabet(header.alphabet_id));
            }
        };
        let length = header.length as usize;
        let max = self.config.max_length(alphabet);
        if length > max {
            debug!(%alphabet, length, max, "short string length exceeds capacity");
            return Err(DecodeError::LengthOverflow {
                alphabet,
                length,
                max,
            });
        }

        // Characters were packed first-to-last from the most significant
        // end, so they come off the low end last-to-first.
        match alphabet {
            Alphabet::Utf8 => {
                let mut bytes = vec![0u8; length];
                for b in bytes.iter_mut().rev() {
                    *b = reg.low_byte(0xFF);
                    reg.shift_right(8);
                }
                Ok(String::from_utf8(bytes)?)
            }
            _ => {
                let step = alphabet.step();
                let mut chars = vec!['\0'; length];
                for c in chars.iter_mut().rev() {
                    let code = reg.low_byte(alphabet.mask());
                    *c = alphabet
                        .decode_char(code)
                        .ok_or(DecodeError::InvalidCode { alphabet, code })?;
                    reg.shift_right(step);
                }
                Ok(chars.into_iter().collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PropertyBlock;
    use test_case::test_case;

    fn codec() -> ShortStringCodec {
        ShortStringCodec::default()
    }

    fn round_trip(codec: &ShortStringCodec, s: &str) -> Result<Alphabet, EncodeError> {
        let mut block = PropertyBlock::new(codec.config());
        let alphabet = codec.encode(s, &mut block)?;
        let dec = codec.decode(&block).unwrap();
        println!("roundtrip: {:?} => {} {:x?} => {:?}", s, alphabet, block, dec);
        assert_eq!(dec, s);
        Ok(alphabet)
    }

    #[test_case("HELLO", Alphabet::Upper ; "upper")]
    #[test_case("2009-01-03 33:22:11 +0200", Alphabet::Date ; "timestamp")]
    #[test_case("mattias@neotech.com", Alphabet::Email ; "email")]
    #[test_case("top, left, right", Alphabet::EmailSym ; "lower list")]
    #[test_case("Top, left, right", Alphabet::AlphaSym ; "capitalized list")]
    #[test_case("sam@37signals.com", Alphabet::EmailSym ; "email with digits")]
    #[test_case("+46 (0)31-123", Alphabet::Latin1 ; "parentheses")]
    #[test_case("555-1234", Alphabet::Numerical ; "phone number")]
    #[test_case("hello world", Alphabet::Lower ; "lower words")]
    #[test_case("Hello World", Alphabet::AlphaNum ; "alphanumeric")]
    #[test_case("crème brûlée", Alphabet::European ; "accented")]
    #[test_case("\u{3a9}", Alphabet::Utf8 ; "omega")]
    #[test_case("5 \u{20ac}", Alphabet::Utf8 ; "euro")]
    fn scenarios(s: &str, expected: Alphabet) {
        assert_eq!(round_trip(&codec(), s), Ok(expected));
    }

    #[test]
    fn empty_string() {
        let codec = codec();
        let mut block = PropertyBlock::new(codec.config());
        assert_eq!(codec.encode("", &mut block), Ok(Alphabet::Utf8));
        assert!(block.is_zero_payload());
        assert_eq!(
            Header::unpack(block.header()),
            Ok(Header {
                length: 0,
                alphabet_id: 0
            })
        );
        assert_eq!(codec.decode(&block), Ok(String::new()));
    }

    #[test]
    fn length_gate() {
        let codec = codec();
        let mut block = PropertyBlock::new(codec.config());
        assert_eq!(codec.max_length(), 28);
        assert_eq!(
            codec.encode(&"a".repeat(64), &mut block),
            Err(EncodeError::TooLong { length: 64, max: 28 })
        );
        assert_eq!(
            codec.encode(&"1".repeat(29), &mut block),
            Err(EncodeError::TooLong { length: 29, max: 28 })
        );
        assert_eq!(round_trip(&codec, &"1".repeat(28)), Ok(Alphabet::Numerical));

        // A wide block is capped by the length field instead.
        let wide = ShortStringCodec::new(PayloadConfig::new(512).unwrap());
        let mut block = PropertyBlock::new(wide.config());
        assert_eq!(wide.max_length(), 63);
        assert_eq!(round_trip(&wide, &"a".repeat(63)), Ok(Alphabet::Lower));
        assert_eq!(
            wide.encode(&"a".repeat(64), &mut block),
            Err(EncodeError::TooLong { length: 64, max: 63 })
        );
        // 64 bytes of UTF-8 fit the block but not the length field.
        let euros = "\u{20ac}".repeat(21);
        assert_eq!(round_trip(&wide, &euros), Ok(Alphabet::Utf8));
        assert_eq!(
            round_trip(&wide, &format!("{}a", euros)),
            Err(EncodeError::Unencodable)
        );
    }

    #[test]
    fn capacity_boundary() {
        let codec = codec();
        assert_eq!(round_trip(&codec, &"A".repeat(22)), Ok(Alphabet::Upper));
        // One more does not fit UPPER and nothing wider takes letters.
        assert_eq!(
            round_trip(&codec, &"A".repeat(23)),
            Err(EncodeError::Unencodable)
        );

        assert_eq!(round_trip(&codec, &"é".repeat(16)), Ok(Alphabet::European));
        assert_eq!(
            round_trip(&codec, &"é".repeat(17)),
            Err(EncodeError::Unencodable)
        );

        assert_eq!(round_trip(&codec, "a@b.cd"), Ok(Alphabet::Email));
        let long = format!("{}@b.cd", "a".repeat(17));
        assert_eq!(long.len(), 22);
        assert_eq!(round_trip(&codec, &long), Ok(Alphabet::Email));
        let longer = format!("{}@b.cd", "a".repeat(18));
        assert_eq!(round_trip(&codec, &longer), Err(EncodeError::Unencodable));
    }

    #[test]
    fn fallback_to_bytes() {
        let codec = codec();
        // Latin-1 only when no restricted alphabet fits.
        assert_eq!(round_trip(&codec, "50% off!"), Ok(Alphabet::Latin1));
        assert_eq!(round_trip(&codec, "\u{a9} 2011"), Ok(Alphabet::Latin1));
        assert_eq!(round_trip(&codec, "x\u{0}y"), Ok(Alphabet::Latin1));
        // UTF-8 is bounded by bytes, not characters.
        assert_eq!(round_trip(&codec, "\u{20ac}\u{20ac}\u{20ac}\u{20ac}"), Ok(Alphabet::Utf8));
        assert_eq!(
            round_trip(&codec, "\u{20ac}\u{20ac}\u{20ac}\u{20ac}\u{20ac}"),
            Err(EncodeError::Unencodable)
        );
        // Too long for bytes, and not restricted.
        assert_eq!(
            round_trip(&codec, "fifteen chars!!"),
            Err(EncodeError::Unencodable)
        );
    }

    #[test]
    fn utf8_header_counts_bytes() {
        let codec = codec();
        let mut block = PropertyBlock::new(codec.config());
        assert_eq!(codec.encode("\u{3a9}\u{3a9}", &mut block), Ok(Alphabet::Utf8));
        let header = Header::unpack(block.header()).unwrap();
        assert_eq!(header.length, 4);
        assert_eq!(block.payload(), &[0xCEA9_CEA9u64, 0]);
    }

    #[test]
    fn packs_most_significant_first() {
        let codec = codec();
        let mut block = PropertyBlock::new(codec.config());
        assert_eq!(codec.encode("ABC", &mut block), Ok(Alphabet::Upper));
        assert_eq!(block.payload(), &[(1u64 << 10) | (2 << 5) | 3, 0]);
        assert_eq!(block.header(), (0b10 << 10) | (3 << 6) | 3);
    }

    #[test]
    fn failed_encode_leaves_slot() {
        let codec = codec();
        let mut block = PropertyBlock::new(codec.config());
        codec.encode("HELLO", &mut block).unwrap();
        let before = block.clone();
        assert!(codec.encode(&"\u{3a9}".repeat(8), &mut block).is_err());
        assert_eq!(block, before);
    }

    // An all-zero payload always reads as "", so strings whose codes are all
    // zero collide with the empty string.
    #[test]
    fn zero_payload_collides_with_empty() {
        let codec = codec();
        for s in &["0", "0000", "\u{0}", "\u{c0}\u{c0}"] {
            let mut block = PropertyBlock::new(codec.config());
            codec.encode(s, &mut block).unwrap();
            assert!(block.is_zero_payload(), "{:?}", s);
            assert_ne!(block.header(), 0);
            assert_eq!(codec.decode(&block), Ok(String::new()), "{:?}", s);
        }
        let mut block = PropertyBlock::new(codec.config());
        assert_eq!(codec.encode("0", &mut block), Ok(Alphabet::Numerical));
        assert_eq!(
            Header::unpack(block.header()),
            Ok(Header {
                length: 1,
                alphabet_id: 1
            })
        );
    }

    #[test]
    fn zero_payload_ignores_header() {
        let codec = codec();
        let block = PropertyBlock::from_parts(0xFFFF_FFFF, vec![0, 0]);
        assert_eq!(codec.decode(&block), Ok(String::new()));
    }

    #[test]
    fn corrupt_records() {
        let codec = codec();
        let unknown = PropertyBlock::from_parts((0b10 << 10) | (12 << 6) | 1, vec![1, 0]);
        assert_eq!(codec.decode(&unknown), Err(DecodeError::UnknownAlphabet(12)));

        let foreign = PropertyBlock::from_parts((0b01 << 10) | (3 << 6) | 1, vec![1, 0]);
        assert_eq!(
            codec.decode(&foreign),
            Err(DecodeError::NotShortString { tag: 0b01 })
        );

        let overlong = PropertyBlock::from_parts((0b10 << 10) | (3 << 6) | 23, vec![1, 0]);
        assert_eq!(
            codec.decode(&overlong),
            Err(DecodeError::LengthOverflow {
                alphabet: Alphabet::Upper,
                length: 23,
                max: 22
            })
        );

        let unassigned = PropertyBlock::from_parts((0b10 << 10) | (8 << 6) | 1, vec![0x3E, 0]);
        assert_eq!(
            codec.decode(&unassigned),
            Err(DecodeError::InvalidCode {
                alphabet: Alphabet::AlphaSym,
                code: 0x3E
            })
        );

        let bad_utf8 = PropertyBlock::from_parts((0b10 << 10) | 1, vec![0xFF, 0]);
        assert!(matches!(
            codec.decode(&bad_utf8),
            Err(DecodeError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn block_size_checked() {
        let codec = codec();
        let mut small = PropertyBlock::from_parts(0, vec![0]);
        assert_eq!(
            codec.encode("abc", &mut small),
            Err(EncodeError::BlockSize {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            codec.decode(&small),
            Err(DecodeError::BlockSize {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn narrow_payloads() {
        let codec = ShortStringCodec::new(PayloadConfig::from_bytes(4).unwrap());
        assert_eq!(codec.max_length(), 8);
        assert_eq!(round_trip(&codec, "HELLO"), Ok(Alphabet::Upper));
        assert_eq!(round_trip(&codec, "HELLOX"), Ok(Alphabet::Upper));
        assert_eq!(round_trip(&codec, "12345678"), Ok(Alphabet::Numerical));
        assert_eq!(round_trip(&codec, "a!"), Ok(Alphabet::Latin1));
        assert_eq!(round_trip(&codec, "hello!"), Err(EncodeError::Unencodable));

        let odd = ShortStringCodec::new(PayloadConfig::from_bytes(9).unwrap());
        assert_eq!(round_trip(&odd, "fourteen chars"), Ok(Alphabet::Lower));
        // Mixed case needs six bits, and 14 of those overflow 72 bits.
        assert_eq!(
            round_trip(&odd, "Fourteen Chars"),
            Err(EncodeError::Unencodable)
        );
        assert_eq!(round_trip(&odd, "Twelve Chars"), Ok(Alphabet::AlphaNum));
    }
}
