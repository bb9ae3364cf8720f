//! Shared styling: selection state styles and per-type colors and widths.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Deserialize;

use crate::error::Result;

/// Basic line style.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub color: String,
    pub stroke_width: f32,
    pub opacity: f32,
}

impl Style {
    pub fn new(color: impl Into<String>, stroke_width: f32, opacity: f32) -> Self {
        Self {
            color: color.into(),
            stroke_width,
            opacity,
        }
    }
}

/// Styles applied according to a track's selection state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StateStyles {
    pub standard: Style,
    pub selected: Style,
}

impl Default for StateStyles {
    fn default() -> Self {
        Self {
            standard: Style::new("lime", 3.0, 0.8),
            selected: Style::new("cyan", 6.0, 1.0),
        }
    }
}

/// Per-type override of the ordinal styling.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    pub color: Option<String>,
    pub stroke_width: Option<f32>,
}

const DEFAULT_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Type to color and type to stroke width mapping.
///
/// Types without a custom color take the next palette slot the first time they
/// are asked for, and keep it afterwards. The empty string is the key used for
/// tracks that have no type.
#[derive(Debug)]
pub struct TypeStyling {
    custom: HashMap<String, TypeStyle>,
    palette: Vec<String>,
    default_stroke_width: f32,
    assigned: RefCell<HashMap<String, usize>>,
}

impl TypeStyling {
    pub fn new(palette: Vec<String>, default_stroke_width: f32) -> Self {
        let palette = if palette.is_empty() {
            DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
        } else {
            palette
        };
        Self {
            custom: HashMap::new(),
            palette,
            default_stroke_width,
            assigned: RefCell::new(HashMap::new()),
        }
    }

    pub fn set_custom(&mut self, type_name: impl Into<String>, style: TypeStyle) {
        self.custom.insert(type_name.into(), style);
    }

    pub fn color(&self, type_name: &str) -> String {
        if let Some(color) = self.custom.get(type_name).and_then(|s| s.color.clone()) {
            return color;
        }
        let mut assigned = self.assigned.borrow_mut();
        let next = assigned.len();
        let slot = *assigned.entry(type_name.to_string()).or_insert(next);
        self.palette[slot % self.palette.len()].clone()
    }

    pub fn stroke_width(&self, type_name: &str) -> f32 {
        self.custom
            .get(type_name)
            .and_then(|s| s.stroke_width)
            .unwrap_or(self.default_stroke_width)
    }
}

impl Default for TypeStyling {
    fn default() -> Self {
        Self::new(Vec::new(), StateStyles::default().standard.stroke_width)
    }
}

/// Serialized style settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub state: StateStyles,
    pub palette: Vec<String>,
    pub types: HashMap<String, TypeStyle>,
}

impl StyleConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Styling shared by all annotation layers of one view.
#[derive(Debug, Default)]
pub struct LayerStyle {
    pub state: StateStyles,
    pub types: TypeStyling,
}

impl From<StyleConfig> for LayerStyle {
    fn from(config: StyleConfig) -> Self {
        let mut types = TypeStyling::new(config.palette, config.state.standard.stroke_width);
        for (name, style) in config.types {
            types.set_custom(name, style);
        }
        Self {
            state: config.state,
            types,
        }
    }
}
