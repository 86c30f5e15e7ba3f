//! Fixed-width multi-word shift register.
//!
//! Characters are packed most-significant-first by shifting the whole payload
//! left and OR-ing each code into the low bits, and unpacked by reading the
//! low bits and shifting right. Bits shifted past the configured width are
//! discarded, never wrapped.

use crate::config::MAX_PAYLOAD_BITS;

pub const MAX_WORDS: usize = (MAX_PAYLOAD_BITS as usize + 63) / 64;

/// Unsigned accumulator of a fixed bit width. `words[0]` holds the least
/// significant 64 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitRegister {
    words: [u64; MAX_WORDS],
    width: u32,
}

impl BitRegister {
    /// A zeroed register of `width` bits; `width` is at most `MAX_PAYLOAD_BITS`.
    pub fn new(width: u32) -> Self {
        debug_assert!(width > 0 && width <= MAX_PAYLOAD_BITS);
        BitRegister {
            words: [0; MAX_WORDS],
            width,
        }
    }

    /// Loads `words` (least significant first), dropping anything above
    /// `width`.
    pub fn from_words(width: u32, words: &[u64]) -> Self {
        let mut reg = Self::new(width);
        let len = reg.len().min(words.len());
        reg.words[..len].copy_from_slice(&words[..len]);
        reg.truncate();
        reg
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    fn len(&self) -> usize {
        ((self.width + 63) / 64) as usize
    }

    pub fn words(&self) -> &[u64] {
        &self.words[..self.len()]
    }

    fn truncate(&mut self) {
        let len = self.len();
        let rem = self.width % 64;
        if rem != 0 {
            self.words[len - 1] &= (1u64 << rem) - 1;
        }
    }

    /// ORs `value & mask` into the low bits.
    pub fn or_low(&mut self, value: u64, mask: u64) {
        self.words[0] |= value & mask;
        self.truncate();
    }

    /// Reads the low 64 bits under `mask`.
    pub fn low_bits(&self, mask: u64) -> u64 {
        self.words[0] & mask
    }

    pub fn low_byte(&self, mask: u8) -> u8 {
        (self.words[0] as u8) & mask
    }

    pub fn is_zero(&self) -> bool {
        self.words().iter().all(|&w| w == 0)
    }

    pub fn shift_left(&mut self, n: u32) {
        let len = self.len();
        let word_shift = (n / 64) as usize;
        let bit_shift = n % 64;
        for i in (0..len).rev() {
            let mut v = 0;
            if i >= word_shift {
                let src = i - word_shift;
                v = self.words[src] << bit_shift;
                if bit_shift != 0 && src > 0 {
                    v |= self.words[src - 1] >> (64 - bit_shift);
                }
            }
            self.words[i] = v;
        }
        self.truncate();
    }

    pub fn shift_right(&mut self, n: u32) {
        let len = self.len();
        let word_shift = (n / 64) as usize;
        let bit_shift = n % 64;
        for i in 0..len {
            let src = i + word_shift;
            let mut v = 0;
            if src < len {
                v = self.words[src] >> bit_shift;
                if bit_shift != 0 && src + 1 < len {
                    v |= self.words[src + 1] << (64 - bit_shift);
                }
            }
            self.words[i] = v;
        }
    }
}
