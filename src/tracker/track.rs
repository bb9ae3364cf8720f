//! Annotation track: the full time-ordered history of one object.

use serde::{Deserialize, Deserializer, Serialize};

use crate::tracker::feature::{Attributes, Feature};

/// Track identifier.
pub type TrackId = u64;

/// Classification label with its confidence score.
pub type ConfidencePair = (String, f32);

/// Annotation track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// First frame covered by the track
    pub begin: u32,
    /// Last frame covered by the track
    pub end: u32,
    pub track_id: TrackId,
    /// Features in ascending frame order
    #[serde(default, deserialize_with = "sorted_features")]
    features: Vec<Feature>,
    /// Classification candidates, best first
    #[serde(default, deserialize_with = "sorted_pairs")]
    confidence_pairs: Vec<ConfidencePair>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Track {
    /// Create an empty track spanning a single frame.
    pub fn new(track_id: TrackId, frame: u32) -> Self {
        Self {
            begin: frame,
            end: frame,
            track_id,
            features: Vec::new(),
            confidence_pairs: Vec::new(),
            attributes: Attributes::new(),
        }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Insert or replace the feature for `feature.frame`, widening the track span.
    pub fn set_feature(&mut self, feature: Feature) {
        let frame = feature.frame;
        match self.features.binary_search_by_key(&frame, |f| f.frame) {
            Ok(i) => self.features[i] = feature,
            Err(i) => self.features.insert(i, feature),
        }
        if self.features.len() == 1 {
            self.begin = frame;
            self.end = frame;
        } else {
            self.begin = self.begin.min(frame);
            self.end = self.end.max(frame);
        }
    }

    /// Feature observed exactly at `frame`.
    pub fn get_feature(&self, frame: u32) -> Option<&Feature> {
        self.features
            .binary_search_by_key(&frame, |f| f.frame)
            .ok()
            .map(|i| &self.features[i])
    }

    /// Whether `frame` lies within `[begin, end]`.
    pub fn is_active_at(&self, frame: u32) -> bool {
        self.begin <= frame && frame <= self.end
    }

    pub fn confidence_pairs(&self) -> &[ConfidencePair] {
        &self.confidence_pairs
    }

    pub fn set_confidence_pairs(&mut self, mut pairs: Vec<ConfidencePair>) {
        sort_pairs(&mut pairs);
        self.confidence_pairs = pairs;
    }

    /// Current best type and its confidence, if the track has been classified.
    pub fn get_type(&self) -> Option<&ConfidencePair> {
        self.confidence_pairs.first()
    }
}

fn sort_pairs(pairs: &mut [ConfidencePair]) {
    pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
}

fn sorted_pairs<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<ConfidencePair>, D::Error> {
    let mut pairs = Vec::<ConfidencePair>::deserialize(d)?;
    sort_pairs(&mut pairs);
    Ok(pairs)
}

fn sorted_features<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Feature>, D::Error> {
    let mut features = Vec::<Feature>::deserialize(d)?;
    features.sort_by_key(|f| f.frame);
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::rect::Rect;

    #[test]
    fn test_set_feature_keeps_order_and_span() {
        let mut track = Track::new(1, 5);
        track.set_feature(Feature::new(5, Rect::default()));
        track.set_feature(Feature::new(2, Rect::default()));
        track.set_feature(Feature::new(9, Rect::default()));

        let frames: Vec<u32> = track.features().iter().map(|f| f.frame).collect();
        assert_eq!(frames, vec![2, 5, 9]);
        assert_eq!((track.begin, track.end), (2, 9));
    }

    #[test]
    fn test_set_feature_replaces_same_frame() {
        let mut track = Track::new(1, 0);
        track.set_feature(Feature::new(3, Rect::from_tlbr(0.0, 0.0, 1.0, 1.0)));
        track.set_feature(Feature::interpolated(3, Rect::from_tlbr(0.0, 0.0, 4.0, 4.0)));

        assert_eq!(track.features().len(), 1);
        let f = track.get_feature(3).unwrap();
        assert!(f.interpolate);
        assert_eq!(f.bounds.unwrap().x2, 4.0);
        assert!(track.get_feature(2).is_none());
    }

    #[test]
    fn test_get_type_is_best_pair() {
        let mut track = Track::new(1, 0);
        assert!(track.get_type().is_none());

        track.set_confidence_pairs(vec![("crab".into(), 0.3), ("fish".into(), 0.9)]);
        assert_eq!(track.get_type(), Some(&("fish".to_string(), 0.9)));
    }

    #[test]
    fn test_deserialize_sorts() {
        let track: Track = serde_json::from_str(
            r#"{
                "begin": 0, "end": 2, "trackId": 7,
                "features": [{"frame": 2, "bounds": [0, 0, 1, 1]}, {"frame": 0, "bounds": [0, 0, 1, 1]}],
                "confidencePairs": [["scallop", 0.2], ["skate", 0.6]]
            }"#,
        )
        .unwrap();

        assert_eq!(track.track_id, 7);
        assert_eq!(track.features()[0].frame, 0);
        assert_eq!(track.get_type().unwrap().0, "skate");
        assert!(track.attributes.is_empty());
    }
}
