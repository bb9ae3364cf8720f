//! Builder for creating Track objects from per-frame boxes.

use crate::tracker::feature::Feature;
use crate::tracker::rect::Rect;
use crate::tracker::track::{ConfidencePair, Track, TrackId};

/// Builder for creating `Track` objects feature by feature.
#[derive(Debug, Clone, Default)]
pub struct TrackBuilder {
    track_id: TrackId,
    features: Vec<Feature>,
    confidence_pairs: Vec<ConfidencePair>,
}

impl TrackBuilder {
    /// Create a new track builder.
    pub fn new(track_id: TrackId) -> Self {
        Self {
            track_id,
            ..Self::default()
        }
    }

    /// Add a keyframe with a box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, frame: u32, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.features
            .push(Feature::new(frame, Rect::from_tlbr(x1, y1, x2, y2)));
        self
    }

    /// Add a keyframe with a box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(mut self, frame: u32, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        let rect = Rect::from_tlbr(cx - w / 2.0, cy - h / 2.0, cx + w / 2.0, cy + h / 2.0);
        self.features.push(Feature::new(frame, rect));
        self
    }

    /// Add an interpolated feature with a box in TLBR format.
    pub fn interpolated(mut self, frame: u32, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.features
            .push(Feature::interpolated(frame, Rect::from_tlbr(x1, y1, x2, y2)));
        self
    }

    /// Add a feature without a bounding box.
    pub fn empty(mut self, frame: u32) -> Self {
        self.features.push(Feature::empty(frame));
        self
    }

    /// Add a classification candidate.
    pub fn confidence(mut self, label: impl Into<String>, score: f32) -> Self {
        self.confidence_pairs.push((label.into(), score));
        self
    }

    /// Build the final `Track`.
    pub fn build(self) -> Track {
        let first = self.features.iter().map(|f| f.frame).min().unwrap_or(0);
        let mut track = Track::new(self.track_id, first);
        for feature in self.features {
            track.set_feature(feature);
        }
        track.set_confidence_pairs(self.confidence_pairs);
        track
    }
}
