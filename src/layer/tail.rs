//! Tail layer: fading trajectory lines behind tracked objects.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::{LayerError, Result};
use crate::integration::{
    FeatureKind, FeatureLayer, MarkerStyleProvider, PointStyleProvider, RenderSurface,
    TrackFeature, TrackFeatureStyle,
};
use crate::layer::base::{AnnotationLayer, BaseLayer};
use crate::layer::frame_data::FrameDataTrack;
use crate::layer::style::LayerStyle;
use crate::tracker::{ConfidencePair, TrackId, TrackStore};

/// One point of a track's recent trajectory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TailData {
    pub track_id: TrackId,
    pub type_and_confidence: Option<ConfidencePair>,
    pub selected: bool,
    /// Frame index of the sample
    pub time: u32,
    pub x: f32,
    pub y: f32,
    pub interpolated: bool,
}

impl TailData {
    #[inline]
    pub fn position(&self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }
}

/// Configuration for the TailLayer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TailLayerConfig {
    /// Features kept before the current frame
    pub before: u32,
    /// Features kept from the current frame on
    pub after: u32,
    pub marker_radius: f32,
    pub marker_opacity: f32,
    /// Line color of interpolated points
    pub interpolated_color: String,
}

impl Default for TailLayerConfig {
    fn default() -> Self {
        Self {
            before: 5,
            after: 10,
            marker_radius: 8.0,
            marker_opacity: 1.0,
            interpolated_color: "#FFFF00".to_string(),
        }
    }
}

impl TailLayerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Style providers the renderer calls back into while drawing tails.
struct TailStyle {
    base: BaseLayer,
    interpolated_color: String,
    marker_radius: f32,
    marker_opacity: f32,
}

impl TailStyle {
    /// Selection color, then type color, then the untyped color.
    fn track_color(&self, datum: &TailData) -> String {
        if datum.selected {
            return self.base.state_style(true).color.clone();
        }
        match &datum.type_and_confidence {
            Some((type_name, _)) => self.base.style().types.color(type_name),
            None => self.untyped_color(),
        }
    }

    fn untyped_color(&self) -> String {
        self.base.style().types.color("")
    }

    fn track_width(&self, datum: &TailData) -> f32 {
        match &datum.type_and_confidence {
            Some((type_name, _)) => self.base.style().types.stroke_width(type_name) / 2.0,
            None => self.untyped_width(),
        }
    }

    fn untyped_width(&self) -> f32 {
        self.base.state_style(false).stroke_width / 2.0
    }
}

impl PointStyleProvider for TailStyle {
    fn stroke_color(&self, datum: &TailData, _index: usize, _track: &[TailData]) -> String {
        if datum.interpolated {
            return self.interpolated_color.clone();
        }
        self.track_color(datum)
    }

    fn stroke_width(&self, datum: &TailData, _index: usize, _track: &[TailData]) -> f32 {
        self.track_width(datum)
    }
}

// Markers are styled from the oldest sample in the window.
impl MarkerStyleProvider for TailStyle {
    fn fill_color(&self, track: &[TailData]) -> String {
        track
            .first()
            .map_or_else(|| self.untyped_color(), |d| self.track_color(d))
    }

    fn stroke_color(&self, track: &[TailData]) -> String {
        track
            .first()
            .map_or_else(|| self.untyped_color(), |d| self.track_color(d))
    }

    fn stroke_width(&self, track: &[TailData]) -> f32 {
        track
            .first()
            .map_or_else(|| self.untyped_width(), |d| self.track_width(d))
    }

    fn radius(&self, _track: &[TailData]) -> f32 {
        self.marker_radius
    }

    fn stroke_opacity(&self, _track: &[TailData]) -> f32 {
        self.marker_opacity
    }
}

/// Layer rendering the recent trajectory of every visible track.
///
/// Call [`update_settings`](AnnotationLayer::update_settings) with the new
/// frame, then [`change_data`](AnnotationLayer::change_data) with that frame's
/// track descriptors.
pub struct TailLayer<S: RenderSurface> {
    base: BaseLayer,
    surface: S,
    tracks: Rc<RefCell<TrackStore>>,
    config: TailLayerConfig,
    frame: u32,
    cache: HashMap<TrackId, Vec<TailData>>,
    // owns the track feature on the surface
    feature_layer: Option<Box<dyn FeatureLayer>>,
    feature: Option<Box<dyn TrackFeature>>,
}

impl<S: RenderSurface> TailLayer<S> {
    pub fn new(
        surface: S,
        tracks: Rc<RefCell<TrackStore>>,
        style: Rc<LayerStyle>,
        config: TailLayerConfig,
    ) -> Self {
        Self {
            base: BaseLayer::new(style),
            surface,
            tracks,
            config,
            frame: 0,
            cache: HashMap::new(),
            feature_layer: None,
            feature: None,
        }
    }

    pub fn config(&self) -> &TailLayerConfig {
        &self.config
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Samples last generated for a track.
    pub fn cached(&self, track_id: TrackId) -> Option<&[TailData]> {
        self.cache.get(&track_id).map(Vec::as_slice)
    }

    /// Number of tracks with cached samples.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Build the windowed samples for one track and store them in the cache.
    ///
    /// The window is taken by position in the track's feature list, not by
    /// frame number: `features[frame - before .. frame + after]`, clamped to
    /// the list. The two agree only for tracks with one feature per frame
    /// starting at frame 0.
    pub fn generate_data_for_track(&mut self, track: &FrameDataTrack) -> Result<Vec<TailData>> {
        let tracks = self.tracks.borrow();
        let resolved = tracks.get(track.track_id)?;
        let features = resolved.features();

        let start = (self.frame.saturating_sub(self.config.before) as usize).min(features.len());
        let end = (self.frame.saturating_add(self.config.after) as usize).clamp(start, features.len());
        let type_and_confidence = resolved.get_type().cloned();

        let data: Vec<TailData> = features[start..end]
            .iter()
            .filter_map(|feature| {
                let center = feature.bounds?.center();
                Some(TailData {
                    track_id: resolved.track_id,
                    type_and_confidence: type_and_confidence.clone(),
                    selected: track.selected,
                    time: feature.frame,
                    x: center.x,
                    y: center.y,
                    interpolated: feature.interpolate,
                })
            })
            .collect();

        log::trace!(
            "track {}: {} samples from features {}..{}",
            resolved.track_id,
            data.len(),
            start,
            end
        );
        self.cache.insert(resolved.track_id, data.clone());
        Ok(data)
    }

    fn feature_style(&self) -> TrackFeatureStyle {
        let provider = Rc::new(TailStyle {
            base: self.base.clone(),
            interpolated_color: self.config.interpolated_color.clone(),
            marker_radius: self.config.marker_radius,
            marker_opacity: self.config.marker_opacity,
        });
        let mut style = TrackFeatureStyle::new(provider.clone(), provider);
        style.fill = false;
        style.antialiasing = false;
        style.past_stroke_opacity = 0.0;
        style
    }
}

impl<S: RenderSurface> AnnotationLayer for TailLayer<S> {
    type Datum = Vec<TailData>;

    fn initialize(&mut self) -> Result<()> {
        let mut layer = self.surface.create_feature_layer(&[FeatureKind::Line])?;
        self.feature = Some(layer.create_track_feature()?);
        self.feature_layer = Some(layer);
        self.base.initialize();
        log::debug!("tail layer initialized");
        Ok(())
    }

    fn update_settings(&mut self, frame: u32) {
        self.frame = frame;
    }

    fn change_data(&mut self, frame_data: &[FrameDataTrack]) -> Result<()> {
        if self.feature.is_none() {
            return Err(LayerError::NotInitialized);
        }
        let data = frame_data
            .iter()
            .map(|track| self.generate_data_for_track(track))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("tail layer frame {}: {} tracks", self.frame, data.len());

        let style = self.feature_style();
        let feature = self.feature.as_mut().ok_or(LayerError::NotInitialized)?;
        feature.set_data(data);
        feature.set_time_range(0, self.frame);
        feature.set_style(style);
        feature.draw()
    }

    fn format_data(&mut self, _frame_data: &[FrameDataTrack]) -> Result<Vec<Self::Datum>> {
        Err(LayerError::UnsupportedOperation {
            layer: "tail",
            operation: "format_data",
        })
    }

    fn redraw(&mut self) -> Result<()> {
        Err(LayerError::UnsupportedOperation {
            layer: "tail",
            operation: "redraw",
        })
    }

    fn disable(&mut self) -> Result<()> {
        let feature = self.feature.as_mut().ok_or(LayerError::NotInitialized)?;
        feature.set_data(Vec::new());
        feature.draw()
    }
}
