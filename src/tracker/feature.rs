//! Single time-stamped observation within a track.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tracker::rect::Rect;

/// Value of a free-form feature or track attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

pub type Attributes = BTreeMap<String, AttributeValue>;

/// One observation of a track at a given frame.
///
/// `None` fields are left out of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// Frame index of the observation
    pub frame: u32,
    /// Bounding box, absent when the object has no box at this frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Rect>,
    /// Position synthesized between keyframes rather than observed
    #[serde(default)]
    pub interpolate: bool,
    /// Observed or manually placed position
    #[serde(default)]
    pub keyframe: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<(f32, f32)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail: Option<(f32, f32)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fish_length: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl Feature {
    /// Create a keyframe feature with a bounding box.
    pub fn new(frame: u32, bounds: Rect) -> Self {
        Self {
            frame,
            bounds: Some(bounds),
            keyframe: true,
            ..Self::default()
        }
    }

    /// Create an interpolated feature with a bounding box.
    pub fn interpolated(frame: u32, bounds: Rect) -> Self {
        Self {
            frame,
            bounds: Some(bounds),
            interpolate: true,
            ..Self::default()
        }
    }

    /// Create a feature that has no bounding box.
    pub fn empty(frame: u32) -> Self {
        Self {
            frame,
            ..Self::default()
        }
    }
}
