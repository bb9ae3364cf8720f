//! Traits for 2D rendering backends.

use std::rc::Rc;

use crate::error::Result;
use crate::layer::TailData;

/// Primitive kinds a feature layer is asked to support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Point,
    Line,
    Polygon,
}

/// Scene that annotation layers draw into.
///
/// Implement this trait to connect any 2D renderer to the annotation layers.
///
/// # Example
///
/// ```ignore
/// use tail_layer_rs::{FeatureKind, FeatureLayer, RenderSurface, Result};
///
/// struct MyCanvas { /* ... */ }
///
/// impl RenderSurface for MyCanvas {
///     fn create_feature_layer(&mut self, kinds: &[FeatureKind]) -> Result<Box<dyn FeatureLayer>> {
///         // Allocate a drawing layer on the canvas
///     }
/// }
/// ```
pub trait RenderSurface {
    /// Create a layer able to hold features of the given kinds.
    fn create_feature_layer(&mut self, kinds: &[FeatureKind]) -> Result<Box<dyn FeatureLayer>>;
}

/// Layer of a render surface that owns drawable features.
pub trait FeatureLayer {
    /// Create a track feature: per-track polylines with a leading marker.
    fn create_track_feature(&mut self) -> Result<Box<dyn TrackFeature>>;
}

/// Line-and-marker feature drawing one polyline per track.
///
/// Each track is a time-ordered slice of samples. Samples with a time before
/// the start of the time range are "past", those after its end are "future".
/// The marker sits at the last sample not after the end of the range.
pub trait TrackFeature {
    /// Replace the dataset, one entry per track.
    fn set_data(&mut self, data: Vec<Vec<TailData>>);

    fn set_time_range(&mut self, start: u32, end: u32);

    fn set_style(&mut self, style: TrackFeatureStyle);

    /// Render the current dataset, invoking the installed style providers.
    fn draw(&mut self) -> Result<()>;
}

/// Per-point line styling, evaluated by the backend during draw.
pub trait PointStyleProvider {
    fn stroke_color(&self, datum: &TailData, index: usize, track: &[TailData]) -> String;

    fn stroke_width(&self, datum: &TailData, index: usize, track: &[TailData]) -> f32;
}

/// Per-track marker styling, evaluated by the backend during draw.
///
/// Backends only call these for non-empty tracks.
pub trait MarkerStyleProvider {
    fn fill_color(&self, track: &[TailData]) -> String;

    fn stroke_color(&self, track: &[TailData]) -> String;

    fn stroke_width(&self, track: &[TailData]) -> f32;

    fn radius(&self, track: &[TailData]) -> f32;

    fn stroke_opacity(&self, track: &[TailData]) -> f32;
}

/// Complete style of a track feature.
#[derive(Clone)]
pub struct TrackFeatureStyle {
    pub point: Rc<dyn PointStyleProvider>,
    pub marker: Rc<dyn MarkerStyleProvider>,
    /// Fill the area under the polyline
    pub fill: bool,
    pub antialiasing: bool,
    /// Stroke opacity of segments before the time range
    pub past_stroke_opacity: f32,
    /// Stroke opacity of segments after the time range
    pub future_stroke_opacity: f32,
}

impl TrackFeatureStyle {
    /// Style with the backend defaults for everything but the providers.
    pub fn new(point: Rc<dyn PointStyleProvider>, marker: Rc<dyn MarkerStyleProvider>) -> Self {
        Self {
            point,
            marker,
            fill: true,
            antialiasing: true,
            past_stroke_opacity: 1.0,
            future_stroke_opacity: 0.25,
        }
    }
}
