//! Symbology encoding: check digits and digit → module conversion.
//!
//! A [`Symbology`] turns a raw digit string into validated [`Digits`] (check
//! digit appended) and a [`ModuleSequence`] in left-to-right scan order.
//! Pure functions, no I/O, no layout knowledge.
//!
//! # Example
//!
//! ```
//! use zenbarcode::{Ean8, Symbology};
//!
//! let encoded = Ean8.encode("123456").unwrap();
//! assert_eq!(encoded.digits.as_str(), "01234565");
//! assert_eq!(encoded.modules.len(), 67);
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{BarcodeError, InputError};

/// Whether a module belongs to a guard pattern or to a digit's code word.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// Part of a digit's code word.
    Data,
    /// Part of a start, middle or end guard.
    Guard,
}

/// One module (the narrowest bar or space) of a symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Module {
    /// Guard or data.
    pub kind: ModuleKind,
    /// `true` for a printed bar, `false` for a space.
    pub bar: bool,
}

impl Module {
    pub const DATA_BAR: Self = Self::new(ModuleKind::Data, true);
    pub const DATA_SPACE: Self = Self::new(ModuleKind::Data, false);
    pub const GUARD_BAR: Self = Self::new(ModuleKind::Guard, true);
    pub const GUARD_SPACE: Self = Self::new(ModuleKind::Guard, false);

    /// Create a module.
    pub const fn new(kind: ModuleKind, bar: bool) -> Self {
        Self { kind, bar }
    }

    /// Whether this module is part of a guard pattern.
    pub const fn is_guard(&self) -> bool {
        matches!(self.kind, ModuleKind::Guard)
    }

    /// Notation character: `1`/`0` for data, `b`/`a` for guard bar/space.
    pub const fn symbol(&self) -> char {
        match (self.kind, self.bar) {
            (ModuleKind::Data, true) => '1',
            (ModuleKind::Data, false) => '0',
            (ModuleKind::Guard, true) => 'b',
            (ModuleKind::Guard, false) => 'a',
        }
    }

    /// Inverse of [`symbol()`](Self::symbol). Case-insensitive for guards.
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            '1' => Some(Self::DATA_BAR),
            '0' => Some(Self::DATA_SPACE),
            'b' | 'B' => Some(Self::GUARD_BAR),
            'a' | 'A' => Some(Self::GUARD_SPACE),
            _ => None,
        }
    }
}

/// Ordered modules of a symbol, left to right.
///
/// `Display` uses the compact notation of [`Module::symbol`], so an EAN‑8
/// symbol prints as `bab0001101…ababa…bab`. [`bits()`](Self::bits) drops the
/// guard tagging and prints plain `0`/`1`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModuleSequence {
    modules: Vec<Module>,
}

impl ModuleSequence {
    /// Empty sequence with room for `capacity` modules.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            modules: Vec::with_capacity(capacity),
        }
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the sequence has no modules.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Iterate modules in scan order.
    pub fn iter(&self) -> core::slice::Iter<'_, Module> {
        self.modules.iter()
    }

    /// The modules as a slice.
    pub fn as_slice(&self) -> &[Module] {
        &self.modules
    }

    /// Plain bar/space string, `1` for every bar regardless of kind.
    pub fn bits(&self) -> String {
        self.modules
            .iter()
            .map(|m| if m.bar { '1' } else { '0' })
            .collect()
    }

    /// Append the low `len` bits of `code`, most significant first.
    fn push_code(&mut self, code: u8, len: u32, kind: ModuleKind) {
        for shift in (0..len).rev() {
            self.modules.push(Module::new(kind, (code >> shift) & 1 == 1));
        }
    }

    fn push_guard(&mut self, guard: Guard) {
        self.push_code(guard.bits, guard.len, ModuleKind::Guard);
    }
}

impl core::fmt::Display for ModuleSequence {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use core::fmt::Write;
        for m in &self.modules {
            f.write_char(m.symbol())?;
        }
        Ok(())
    }
}

/// Error parsing module notation: the index of the first invalid character.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvalidModuleSymbol(pub usize);

impl core::str::FromStr for ModuleSequence {
    type Err = InvalidModuleSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(i, c)| Module::from_symbol(c).ok_or(InvalidModuleSymbol(i)))
            .collect::<Result<Vec<_>, _>>()
            .map(|modules| Self { modules })
    }
}

impl<'a> IntoIterator for &'a ModuleSequence {
    type Item = &'a Module;
    type IntoIter = core::slice::Iter<'a, Module>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}

/// Validated digit string, check digit included.
///
/// Only a [`Symbology`] constructs these, so every character is `0-9` and
/// the length matches the symbology.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Digits(String);

impl Digits {
    /// The digits as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for digits produced by a symbology.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric value of each digit.
    pub fn values(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.bytes().map(|b| b - b'0')
    }

    /// The trailing check digit.
    pub fn check_digit(&self) -> u8 {
        self.0.as_bytes().last().map_or(0, |b| b - b'0')
    }

    /// Split into the two human-readable groups printed under the symbol.
    pub fn halves(&self) -> (&str, &str) {
        self.0.split_at(self.0.len() / 2)
    }
}

impl core::fmt::Display for Digits {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Output of [`Symbology::encode`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Encoded {
    /// Validated digits, check digit included.
    pub digits: Digits,
    /// Modules in scan order.
    pub modules: ModuleSequence,
}

/// A barcode symbology: digit validation, check digit and module encoding.
///
/// Implementors supply the tables; [`validate`](Self::validate) and
/// [`encode`](Self::encode) are shared.
pub trait Symbology {
    /// Human-readable name, e.g. `"EAN-8"`.
    fn name(&self) -> &'static str;

    /// Data digits before the check digit.
    fn data_digits(&self) -> usize;

    /// Maximum accepted input length, check digit included.
    fn max_digits(&self) -> usize {
        self.data_digits() + 1
    }

    /// Check digit for exactly [`data_digits()`](Self::data_digits) values.
    fn check_digit(&self, data: &[u8]) -> u8;

    /// Encode already validated digits into modules.
    fn encode_digits(&self, digits: &Digits) -> ModuleSequence;

    /// Validate raw input and append (or verify) the check digit.
    ///
    /// Inputs shorter than the data length are zero-padded on the left.
    /// A full-length input must already end in the correct check digit.
    fn validate(&self, raw: &str) -> Result<Digits, BarcodeError> {
        let max = self.max_digits();
        let data_len = self.data_digits();
        let len = raw.chars().count();
        if len > max {
            return Err(InputError::TooLong { len, max }.into());
        }
        if let Some((position, found)) = raw.chars().enumerate().find(|(_, c)| !c.is_ascii_digit())
        {
            return Err(InputError::NonDigit { position, found }.into());
        }

        let mut values: Vec<u8> = Vec::with_capacity(max);
        values.resize(data_len.saturating_sub(len), 0);
        values.extend(raw.bytes().map(|b| b - b'0'));

        if values.len() > data_len {
            let found = values[data_len];
            let expected = self.check_digit(&values[..data_len]);
            if found != expected {
                return Err(InputError::CheckDigitMismatch { expected, found }.into());
            }
        } else {
            let check = self.check_digit(&values);
            values.push(check);
        }

        Ok(Digits(values.iter().map(|&v| char::from(b'0' + v)).collect()))
    }

    /// Validate and encode in one step.
    fn encode(&self, raw: &str) -> Result<Encoded, BarcodeError> {
        let digits = self.validate(raw)?;
        let modules = self.encode_digits(&digits);
        tracing::debug!(
            symbology = self.name(),
            digits = digits.as_str(),
            modules = modules.len(),
            "encoded barcode"
        );
        Ok(Encoded { digits, modules })
    }
}

/// Weighted mod-10 check digit used by the EAN/UPC family.
///
/// Even positions (0-based) weigh 3, odd positions 1. A sum that is already a
/// multiple of ten yields `0`.
pub fn mod10_check_digit(data: &[u8]) -> u8 {
    let sum: u32 = data
        .iter()
        .enumerate()
        .map(|(i, &d)| if i % 2 == 0 { 3 * d as u32 } else { d as u32 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Fixed guard pattern: `len` bits, most significant first.
#[derive(Copy, Clone, Debug)]
struct Guard {
    bits: u8,
    len: u32,
}

const START_GUARD: Guard = Guard { bits: 0b101, len: 3 };
const MIDDLE_GUARD: Guard = Guard {
    bits: 0b01010,
    len: 5,
};
const END_GUARD: Guard = Guard { bits: 0b101, len: 3 };

/// Width of one digit's code word in modules.
const CODE_WIDTH: u32 = 7;

/// Left-hand (odd parity) code words, indexed by digit.
const LEFT_ODD: [u8; 10] = [
    0b0001101, 0b0011001, 0b0010011, 0b0111101, 0b0100011, 0b0110001, 0b0101111, 0b0111011,
    0b0110111, 0b0001011,
];

/// Right-hand code words, indexed by digit.
const RIGHT: [u8; 10] = [
    0b1110010, 0b1100110, 0b1101100, 0b1000010, 0b1011100, 0b1001110, 0b1010000, 0b1000100,
    0b1001000, 0b1110100,
];

/// EAN‑8: seven data digits and one check digit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Ean8;

impl Ean8 {
    /// Modules in every EAN‑8 symbol: 3 + 4×7 + 5 + 4×7 + 3.
    pub const MODULE_COUNT: usize = 67;
}

impl Symbology for Ean8 {
    fn name(&self) -> &'static str {
        "EAN-8"
    }

    fn data_digits(&self) -> usize {
        7
    }

    fn check_digit(&self, data: &[u8]) -> u8 {
        mod10_check_digit(data)
    }

    fn encode_digits(&self, digits: &Digits) -> ModuleSequence {
        let half = digits.len() / 2;
        let mut seq = ModuleSequence::with_capacity(Self::MODULE_COUNT);
        seq.push_guard(START_GUARD);
        for (i, d) in digits.values().enumerate() {
            if i == half {
                seq.push_guard(MIDDLE_GUARD);
            }
            let table = if i < half { &LEFT_ODD } else { &RIGHT };
            seq.push_code(table[d as usize], CODE_WIDTH, ModuleKind::Data);
        }
        seq.push_guard(END_GUARD);
        seq
    }
}
