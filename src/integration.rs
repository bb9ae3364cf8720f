//! Integration module for connecting 2D rendering backends with annotation layers.
//!
//! This module provides the traits a renderer implements to host track
//! features, a display-list backend, and the frame loop driving a tail layer.

mod headless;
mod pipeline;
mod surface;

pub use headless::{DisplayList, DrawnTrack, HeadlessSurface, Marker, SceneHandle, Segment};
pub use pipeline::TailPipeline;
pub use surface::{
    FeatureKind, FeatureLayer, MarkerStyleProvider, PointStyleProvider, RenderSurface,
    TrackFeature, TrackFeatureStyle,
};
