//! Option-string parsing into a [`LayoutConfig`](crate::LayoutConfig).
//!
//! Parses query strings like `?scale=3&height=40&color=%23333&font=Verdana`
//! so barcode options can travel in a URL or a single config line.
//!
//! # Example
//!
//! ```
//! use zenbarcode::{CanvasColor, FontStyle, query};
//!
//! let result = query::parse("scale=3&height=40&bgcolor=yellow&fontstyle=bold");
//! assert!(result.warnings.is_empty());
//!
//! let config = result.instructions.to_config();
//! assert_eq!(config.effective_scale(), 3);
//! assert_eq!(config.module_height, 40.0);
//! assert_eq!(config.background, CanvasColor::srgb(255, 255, 0));
//! assert_eq!(config.font.style, FontStyle::Bold);
//! ```
//!
//! # Non-layout parameters
//!
//! Keys that do not affect layout (`format`, `dpi`, `filename`) are kept in
//! [`Instructions::extras()`] without warnings. Only truly unrecognized keys
//! produce [`ParseWarning::KeyNotRecognized`].

mod color;
pub mod instructions;
mod parse;

pub use instructions::Instructions;

use alloc::string::String;
use alloc::vec::Vec;

/// Result of parsing an option string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed options.
    pub instructions: Instructions,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from option parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: &'static str, value: String },
    /// A key was not recognized as either a layout or known non-layout parameter.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value could not be parsed.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Parse an option string (with or without leading `?`).
///
/// Returns parsed instructions and any non-fatal warnings.
pub fn parse(query: &str) -> ParseResult {
    let (instructions, warnings) = parse::parse_query(query);
    ParseResult {
        instructions,
        warnings,
    }
}
