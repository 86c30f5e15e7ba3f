// -*- mode: rust; bidi-display-reordering: nil -*-

//! The eleven short string alphabets.
//!
//! Nine of them are restricted "code pages": a table of 16, 32, 64 or 128
//! characters, where a character's index in the table is its code. The other
//! two store raw bytes: Latin-1 (one byte per character) and UTF-8.
//!
//! Codes are looked up by table position, so every code an alphabet can
//! produce decodes back to the character it came from. Unassigned codes hold
//! `U+FFFF` and are rejected when decoding.

use std::fmt;

use arbitrary::{Arbitrary, Unstructured};

const UNUSED: char = '\u{ffff}';

//    -0 -1 -2 -3 -4 -5 -6 -7   -8 -9 -A -B -C -D -E -F
// 0-  0  1  2  3  4  5  6  7    8  9  +  ,  ' SP  .  -
const NUMERICAL: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '+', ',', '\'', ' ', '.', '-',
];

//    -0 -1 -2 -3 -4 -5 -6 -7   -8 -9 -A -B -C -D -E -F
// 0-  0  1  2  3  4  5  6  7    8  9  +  ,  : SP  .  -
const DATE: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '+', ',', ':', ' ', '.', '-',
];

const UPPER: [char; 32] = [
    ' ', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '_', '.', '-', ':', '/',
];

const LOWER: [char; 32] = [
    ' ', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '_', '.', '-', ':', '/',
];

// No space: the comma takes its slot.
const EMAIL: [char; 32] = [
    ',', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '_', '.', '-', '+', '@',
];

const EMAILSYM: [char; 64] = [
    ' ', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '_', '.', '-', '+', '@',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', UNUSED, ':', '/', ',', '\'', UNUSED,
    UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED,
    UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED, UNUSED,
];

// Same layout as the upper half of EUROPEAN.
const ALPHANUM: [char; 64] = [
    ' ', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4',
    '_', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '5', '6', '7', '8', '9',
];

// Letters only; the digit slots of ALPHANUM carry punctuation instead.
const ALPHASYM: [char; 64] = [
    ' ', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '+', ',', '.', '-', '/',
    '_', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '\'', ':', '@', UNUSED, UNUSED,
];

// U+00C0-U+00FF with '.' and '-' in place of U+00D7 and U+00F7, then ALPHANUM.
const EUROPEAN: [char; 128] = [
    'À', 'Á', 'Â', 'Ã', 'Ä', 'Å', 'Æ', 'Ç', 'È', 'É', 'Ê', 'Ë', 'Ì', 'Í', 'Î', 'Ï',
    'Ð', 'Ñ', 'Ò', 'Ó', 'Ô', 'Õ', 'Ö', '.', 'Ø', 'Ù', 'Ú', 'Û', 'Ü', 'Ý', 'Þ', 'ß',
    'à', 'á', 'â', 'ã', 'ä', 'å', 'æ', 'ç', 'è', 'é', 'ê', 'ë', 'ì', 'í', 'î', 'ï',
    'ð', 'ñ', 'ò', 'ó', 'ô', 'õ', 'ö', '-', 'ø', 'ù', 'ú', 'û', 'ü', 'ý', 'þ', 'ÿ',
    ' ', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4',
    '_', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '5', '6', '7', '8', '9',
];

/// Punctuation marks the restricted alphabets know about, in the order of
/// their local index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Punctuation {
    Space = 0,
    Underscore = 1,
    Dot = 2,
    Dash = 3,
    Colon = 4,
    Slash = 5,
    Plus = 6,
    Comma = 7,
    Apostrophe = 8,
    At = 9,
}

impl Punctuation {
    pub const ALL: [Punctuation; 10] = [
        Punctuation::Space,
        Punctuation::Underscore,
        Punctuation::Dot,
        Punctuation::Dash,
        Punctuation::Colon,
        Punctuation::Slash,
        Punctuation::Plus,
        Punctuation::Comma,
        Punctuation::Apostrophe,
        Punctuation::At,
    ];

    pub fn from_char(c: char) -> Option<Punctuation> {
        match c {
            ' ' => Some(Punctuation::Space),
            '_' => Some(Punctuation::Underscore),
            '.' => Some(Punctuation::Dot),
            '-' => Some(Punctuation::Dash),
            ':' => Some(Punctuation::Colon),
            '/' => Some(Punctuation::Slash),
            '+' => Some(Punctuation::Plus),
            ',' => Some(Punctuation::Comma),
            '\'' => Some(Punctuation::Apostrophe),
            '@' => Some(Punctuation::At),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Punctuation::Space => ' ',
            Punctuation::Underscore => '_',
            Punctuation::Dot => '.',
            Punctuation::Dash => '-',
            Punctuation::Colon => ':',
            Punctuation::Slash => '/',
            Punctuation::Plus => '+',
            Punctuation::Comma => ',',
            Punctuation::Apostrophe => '\'',
            Punctuation::At => '@',
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

/// A character after classification: either one of the known punctuation
/// marks or a letter, digit or accented letter carried as its Latin-1 byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    Punct(Punctuation),
    Byte(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Alphabet {
    Utf8 = 0,
    Numerical = 1,
    Date = 2,
    Upper = 3,
    Lower = 4,
    Email = 5,
    EmailSym = 6,
    AlphaNum = 7,
    AlphaSym = 8,
    European = 9,
    Latin1 = 10,
}

impl Alphabet {
    /// Restricted alphabets in the order the encoder tries them.
    pub const RESTRICTED: [Alphabet; 9] = [
        Alphabet::Numerical,
        Alphabet::Date,
        Alphabet::Upper,
        Alphabet::Lower,
        Alphabet::Email,
        Alphabet::EmailSym,
        Alphabet::AlphaNum,
        Alphabet::AlphaSym,
        Alphabet::European,
    ];

    pub const ALL: [Alphabet; 11] = [
        Alphabet::Utf8,
        Alphabet::Numerical,
        Alphabet::Date,
        Alphabet::Upper,
        Alphabet::Lower,
        Alphabet::Email,
        Alphabet::EmailSym,
        Alphabet::AlphaNum,
        Alphabet::AlphaSym,
        Alphabet::European,
        Alphabet::Latin1,
    ];

    pub fn from_id(id: u8) -> Option<Alphabet> {
        Self::ALL.get(id as usize).copied()
    }

    /// The id stored in the record header.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Bits per character.
    pub fn step(self) -> u32 {
        match self {
            Alphabet::Numerical | Alphabet::Date => 4,
            Alphabet::Upper | Alphabet::Lower | Alphabet::Email => 5,
            Alphabet::EmailSym | Alphabet::AlphaNum | Alphabet::AlphaSym => 6,
            Alphabet::European => 7,
            Alphabet::Utf8 | Alphabet::Latin1 => 8,
        }
    }

    pub fn mask(self) -> u8 {
        ((1u16 << self.step()) - 1) as u8
    }

    pub fn is_restricted(self) -> bool {
        !matches!(self, Alphabet::Utf8 | Alphabet::Latin1)
    }

    pub fn name(self) -> &'static str {
        match self {
            Alphabet::Utf8 => "UTF8",
            Alphabet::Numerical => "NUMERICAL",
            Alphabet::Date => "DATE",
            Alphabet::Upper => "UPPER",
            Alphabet::Lower => "LOWER",
            Alphabet::Email => "EMAIL",
            Alphabet::EmailSym => "EMAILSYM",
            Alphabet::AlphaNum => "ALPHANUM",
            Alphabet::AlphaSym => "ALPHASYM",
            Alphabet::European => "EUROPEAN",
            Alphabet::Latin1 => "LATIN1",
        }
    }

    /// The code page of a restricted alphabet; empty for the byte encodings.
    fn table(self) -> &'static [char] {
        match self {
            Alphabet::Numerical => &NUMERICAL,
            Alphabet::Date => &DATE,
            Alphabet::Upper => &UPPER,
            Alphabet::Lower => &LOWER,
            Alphabet::Email => &EMAIL,
            Alphabet::EmailSym => &EMAILSYM,
            Alphabet::AlphaNum => &ALPHANUM,
            Alphabet::AlphaSym => &ALPHASYM,
            Alphabet::European => &EUROPEAN,
            Alphabet::Utf8 | Alphabet::Latin1 => &[],
        }
    }

    fn position(self, c: char) -> Option<u8> {
        self.table().iter().position(|&t| t == c).map(|i| i as u8)
    }

    /// Code for a letter, digit or accented letter given as its Latin-1 byte.
    pub fn encode_char(self, b: u8) -> Option<u8> {
        match self {
            Alphabet::Latin1 => Some(b),
            _ => self.position(char::from(b)),
        }
    }

    pub fn encode_punctuation(self, p: Punctuation) -> Option<u8> {
        self.position(p.as_char())
    }

    pub fn encode_symbol(self, symbol: Symbol) -> Option<u8> {
        match symbol {
            Symbol::Punct(p) => self.encode_punctuation(p),
            Symbol::Byte(b) => self.encode_char(b),
        }
    }

    /// Character for `code`, or `None` if the code is unassigned. Codes are
    /// taken under the alphabet's mask.
    pub fn decode_char(self, code: u8) -> Option<char> {
        let code = code & self.mask();
        match self {
            Alphabet::Latin1 => Some(char::from(code)),
            _ => self
                .table()
                .get(code as usize)
                .copied()
                .filter(|&c| c != UNUSED),
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'a> Arbitrary<'a> for Alphabet {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(*u.choose(&Self::ALL)?)
    }
}
