//! Track tail rendering for video annotation.
//!
//! A [`TailLayer`] turns each visible track's recent feature history into a
//! short trajectory and hands it to a [`RenderSurface`] as a line-and-marker
//! feature, styled by selection state and object type.
//!
//! ```ignore
//! use std::{cell::RefCell, rc::Rc};
//! use tail_layer_rs::{HeadlessSurface, TailPipeline, TrackStore};
//!
//! let tracks = Rc::new(RefCell::new(TrackStore::from_json(json)?));
//! let mut pipeline = TailPipeline::with_defaults(HeadlessSurface::new(), tracks)?;
//! pipeline.seek(42)?;
//! ```

pub mod error;
pub mod integration;
pub mod layer;
pub mod tracker;

pub use error::{LayerError, Result};
pub use integration::{
    DisplayList, FeatureKind, FeatureLayer, HeadlessSurface, MarkerStyleProvider,
    PointStyleProvider, RenderSurface, TailPipeline, TrackFeature, TrackFeatureStyle,
};
pub use layer::{
    AnnotationLayer, FrameDataTrack, LayerStyle, StyleConfig, TailData, TailLayer,
    TailLayerConfig, build_frame_data,
};
pub use tracker::{Feature, Rect, Track, TrackBuilder, TrackId, TrackStore};
