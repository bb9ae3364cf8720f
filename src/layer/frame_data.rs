//! Per-frame track descriptors handed to layers.

use crate::tracker::{Feature, TrackId, TrackStore};

/// State of one track at the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameDataTrack {
    pub track_id: TrackId,
    pub selected: bool,
    /// Whether the track is being edited
    pub editing: bool,
    /// Feature observed at exactly this frame, if any
    pub feature: Option<Feature>,
}

impl FrameDataTrack {
    pub fn new(track_id: TrackId, selected: bool) -> Self {
        Self {
            track_id,
            selected,
            editing: false,
            feature: None,
        }
    }
}

/// Descriptors for every track whose span contains `frame`, in ascending id order.
pub fn build_frame_data(
    store: &TrackStore,
    frame: u32,
    selected: Option<TrackId>,
    editing: bool,
) -> Vec<FrameDataTrack> {
    store
        .tracks_at(frame)
        .map(|track| {
            let is_selected = selected == Some(track.track_id);
            FrameDataTrack {
                track_id: track.track_id,
                selected: is_selected,
                editing: is_selected && editing,
                feature: track.get_feature(frame).cloned(),
            }
        })
        .collect()
}
