//! Error types shared by the encoder, the layout planner and render backends.

use alloc::string::String;

/// Why a raw digit string was rejected by a symbology.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum InputError {
    /// More characters than the symbology can carry, check digit included.
    #[error("{len} digits given, at most {max} allowed")]
    TooLong {
        /// Length of the rejected input.
        len: usize,
        /// Maximum digit count of the symbology.
        max: usize,
    },
    /// A character outside `0-9`.
    #[error("non-digit character {found:?} at position {position}")]
    NonDigit {
        /// Character index within the raw input.
        position: usize,
        /// The offending character.
        found: char,
    },
    /// A full-length input whose trailing check digit is wrong.
    #[error("check digit is {found}, expected {expected}")]
    CheckDigitMismatch {
        /// Check digit computed from the data digits.
        expected: u8,
        /// Check digit present in the input.
        found: u8,
    },
}

/// Why a [`LayoutConfig`](crate::LayoutConfig) cannot be laid out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ConfigError {
    /// Module height is zero, negative or NaN.
    #[error("module height must be positive")]
    NonPositiveModuleHeight,
    /// Font family is empty or whitespace.
    #[error("font family is empty")]
    EmptyFontFamily,
}

/// Error returned by every fallible operation in this crate.
///
/// Input and config errors are raised by the core before any encoding or
/// layout work. `FontNotFound` and `Io` come from render backends and are
/// passed through unchanged.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BarcodeError {
    /// The raw digits violate the symbology's constraints.
    #[error("invalid barcode input: {0}")]
    InvalidInput(#[from] InputError),
    /// The layout configuration is unusable.
    #[error("invalid layout config: {0}")]
    InvalidConfig(#[from] ConfigError),
    /// The font resolver has no font for the requested family.
    #[error("font not found: {family}")]
    FontNotFound {
        /// Requested family name.
        family: String,
    },
    /// Persisting the rendered artifact failed.
    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl BarcodeError {
    /// The input error, if this is one.
    pub fn input_error(&self) -> Option<InputError> {
        match self {
            Self::InvalidInput(e) => Some(*e),
            _ => None,
        }
    }

    /// The config error, if this is one.
    pub fn config_error(&self) -> Option<ConfigError> {
        match self {
            Self::InvalidConfig(e) => Some(*e),
            _ => None,
        }
    }
}
