//! Track lookup map shared between the host and its layers.

use std::collections::BTreeMap;

use crate::error::{LayerError, Result};
use crate::tracker::track::{Track, TrackId};

/// All tracks of an annotation, keyed by id.
///
/// Serializes as the `{ "<trackId>": Track }` object the annotation server exchanges.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TrackStore {
    tracks: BTreeMap<TrackId, Track>,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON track map.
    pub fn from_json(json: &str) -> Result<Self> {
        let store: Self = serde_json::from_str(json)?;
        log::debug!("loaded {} tracks", store.len());
        Ok(store)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Insert a track, returning the one it replaced.
    pub fn insert(&mut self, track: Track) -> Option<Track> {
        self.tracks.insert(track.track_id, track)
    }

    pub fn remove(&mut self, track_id: TrackId) -> Option<Track> {
        self.tracks.remove(&track_id)
    }

    /// Resolve a track id.
    pub fn get(&self, track_id: TrackId) -> Result<&Track> {
        self.tracks
            .get(&track_id)
            .ok_or(LayerError::TrackNotFound(track_id))
    }

    pub fn get_mut(&mut self, track_id: TrackId) -> Result<&mut Track> {
        self.tracks
            .get_mut(&track_id)
            .ok_or(LayerError::TrackNotFound(track_id))
    }

    /// Tracks in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    /// Tracks whose `[begin, end]` span contains `frame`, in ascending id order.
    pub fn tracks_at(&self, frame: u32) -> impl Iterator<Item = &Track> {
        self.tracks.values().filter(move |t| t.is_active_at(frame))
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl FromIterator<Track> for TrackStore {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        let mut store = Self::new();
        for track in iter {
            store.insert(track);
        }
        store
    }
}
