//! EAN‑8 barcode encoding and draw-plan layout.
//!
//! The core is pure: check digits, digit → module encoding and the exact
//! geometry of bars and human-readable digits. Drawing is delegated to a
//! [`render::Canvas`] backend; an SVG backend ships behind the `svg` feature.
//!
//! # Modules
//!
//! - [`symbology`] — Check digits, code tables, module sequences
//! - [`plan`] — Draw-plan layout: canvas size, bar rectangles, text anchors
//! - [`config`] — Scale, module height, colors, font
//! - [`render`] — Canvas/font traits and the end-to-end [`Generator`](render::Generator) (`std`)
//! - [`svg`] — SVG canvas backend (`svg` feature)
//! - [`query`] — Option strings → config (`query` feature)
//!
//! # Example
//!
//! ```
//! use zenbarcode::{Ean8, LayoutConfig, Symbology};
//!
//! let encoded = Ean8.encode("9638507").unwrap();
//! assert_eq!(encoded.digits.as_str(), "96385074");
//!
//! let plan = encoded.layout(&LayoutConfig::default().scale(2)).unwrap();
//! assert_eq!(plan.canvas.width, 2 * 67 + 8);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod error;
pub mod plan;
pub mod symbology;

#[cfg(feature = "std")]
pub mod render;

#[cfg(feature = "svg")]
pub mod svg;

#[cfg(feature = "query")]
pub mod query;

pub use config::{CanvasColor, FontSpec, FontStyle, LayoutConfig};
pub use error::{BarcodeError, ConfigError, InputError};
pub use plan::{Bar, DrawPlan, Rect, Size, TextPlacement, layout};
pub use symbology::{
    Digits, Ean8, Encoded, Module, ModuleKind, ModuleSequence, Symbology, mod10_check_digit,
};

#[cfg(feature = "std")]
pub use render::{Canvas, CanvasProvider, FontResolver, Generator, TextAnchor, render};
