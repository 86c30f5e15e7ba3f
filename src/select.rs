//! Narrowing the restricted alphabets down to those that can carry a string.

use crate::alphabet::Alphabet::*;
use crate::alphabet::{Alphabet, Punctuation, Symbol};
use crate::config::PayloadConfig;

/// Set of restricted alphabets, one bit per alphabet id.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Candidates(u16);

const fn set(alphabets: &[Alphabet]) -> u16 {
    let mut bits = 0;
    let mut i = 0;
    while i < alphabets.len() {
        bits |= 1u16 << alphabets[i] as u16;
        i += 1;
    }
    bits
}

const RESTRICTED: u16 = set(&Alphabet::RESTRICTED);

const NOT_UPPER: u16 = set(&[Numerical, Date, Lower, Email, EmailSym]);
const NOT_LOWER: u16 = set(&[Numerical, Date, Upper]);
const NOT_DIGIT: u16 = set(&[Upper, Lower, Email, AlphaSym]);
const EUROPEAN_ONLY: u16 = set(&[European]);

impl Candidates {
    pub fn none() -> Self {
        Candidates(0)
    }

    /// Every restricted alphabet with room for `length` characters.
    pub fn fitting(length: usize, config: &PayloadConfig) -> Self {
        let mut candidates = Candidates(RESTRICTED);
        for alphabet in Alphabet::RESTRICTED.iter().copied() {
            if config.max_length(alphabet) < length {
                candidates.remove(set(&[alphabet]));
            }
        }
        candidates
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, alphabet: Alphabet) -> bool {
        self.0 & (1u16 << alphabet.id()) != 0
    }

    fn remove(&mut self, bits: u16) {
        self.0 &= !bits;
    }

    fn retain(&mut self, bits: u16) {
        self.0 &= bits;
    }

    fn clear(&mut self) {
        self.0 = 0;
    }

    /// Removes the alphabets that cannot encode `p`.
    fn narrow_punctuation(&mut self, p: Punctuation) {
        match p {
            Punctuation::Space => self.remove(set(&[Email])),
            Punctuation::Underscore => self.remove(set(&[Numerical, Date])),
            Punctuation::Dot | Punctuation::Dash => self.remove(set(&[AlphaNum])),
            Punctuation::Colon => self.remove(set(&[AlphaNum, Numerical, European, Email])),
            Punctuation::Slash => {
                self.remove(set(&[AlphaNum, Numerical, Date, European, Email]))
            }
            Punctuation::Plus | Punctuation::Comma => {
                self.retain(set(&[Numerical, Date, Email, EmailSym, AlphaSym]))
            }
            Punctuation::Apostrophe => self.retain(set(&[Numerical, EmailSym, AlphaSym])),
            Punctuation::At => self.retain(set(&[Email, EmailSym, AlphaSym])),
        }
    }

    /// Restricted alphabets in the set, lowest id first.
    pub fn iter(&self) -> impl Iterator<Item = Alphabet> {
        let set = *self;
        (0..=Alphabet::Latin1.id())
            .filter_map(Alphabet::from_id)
            .filter(move |&a| a.is_restricted() && set.contains(a))
    }
}

impl std::fmt::Debug for Candidates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Accented Latin-1 letters: U+00C0-U+00FF without the multiplication and
/// division signs.
fn is_european_letter(c: char) -> bool {
    ('\u{c0}'..='\u{ff}').contains(&c) && c != '\u{d7}' && c != '\u{f7}'
}

/// Classifies `s` character by character, narrowing `candidates` as it goes.
///
/// Returns the classified symbols. Classification stops as soon as no
/// candidate is left, in which case the symbols are incomplete and must not be
/// packed.
pub fn classify(s: &str, candidates: &mut Candidates) -> Vec<Symbol> {
    let mut symbols = Vec::with_capacity(s.len());
    for c in s.chars() {
        if candidates.is_empty() {
            break;
        }
        if let Some(p) = Punctuation::from_char(c) {
            candidates.narrow_punctuation(p);
            symbols.push(Symbol::Punct(p));
            continue;
        }
        match c {
            'A'..='Z' => candidates.remove(NOT_UPPER),
            'a'..='z' => candidates.remove(NOT_LOWER),
            '0'..='9' => candidates.remove(NOT_DIGIT),
            c if is_european_letter(c) => candidates.retain(EUROPEAN_ONLY),
            _ => {
                candidates.clear();
                break;
            }
        }
        symbols.push(Symbol::Byte(c as u32 as u8));
    }
    symbols
}
