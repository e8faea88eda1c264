//! Parsed option values, before they are merged into a [`LayoutConfig`].

use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::config::{CanvasColor, FontSpec, FontStyle, LayoutConfig};

/// Options parsed from a query string. `None` leaves the config untouched.
///
/// Produced by [`crate::query::parse()`], consumed by
/// [`apply()`](Self::apply) or [`to_config()`](Self::to_config).
#[derive(Debug, Clone, Default, PartialEq)]
#[non_exhaustive]
pub struct Instructions {
    /// Pixels per module (`scale`). Values below 1 are kept; layout floors them.
    pub scale: Option<i32>,
    /// Module height (`height`, `h`).
    pub module_height: Option<f32>,
    /// Bar and text color (`color`, `fg`).
    pub foreground: Option<CanvasColor>,
    /// Background color (`bgcolor`, `bg`).
    pub background: Option<CanvasColor>,
    /// Font family (`font`).
    pub font_family: Option<String>,
    /// Font style (`fontstyle`).
    pub font_style: Option<FontStyle>,
    /// Non-layout parameters preserved for downstream consumers.
    pub extras: BTreeMap<String, String>,
}

impl Instructions {
    /// Create empty instructions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Access non-layout parameters preserved during parsing.
    pub fn extras(&self) -> &BTreeMap<String, String> {
        &self.extras
    }

    /// Overwrite the fields of `config` that these instructions set.
    pub fn apply(&self, config: &mut LayoutConfig) {
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(height) = self.module_height {
            config.module_height = height;
        }
        if let Some(color) = self.foreground {
            config.foreground = color;
        }
        if let Some(color) = self.background {
            config.background = color;
        }
        if let Some(family) = &self.font_family {
            config.font.family.clone_from(family);
        }
        if let Some(style) = self.font_style {
            config.font.style = style;
        }
    }

    /// [`LayoutConfig::default()`] with these instructions applied.
    pub fn to_config(&self) -> LayoutConfig {
        let mut config = LayoutConfig::default();
        self.apply(&mut config);
        config
    }

    /// The font these instructions select, falling back to `base`.
    pub fn font_or(&self, base: &FontSpec) -> FontSpec {
        FontSpec {
            family: self.font_family.clone().unwrap_or_else(|| base.family.clone()),
            style: self.font_style.unwrap_or(base.style),
        }
    }
}
