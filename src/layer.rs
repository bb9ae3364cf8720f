//! Annotation layers and the styling they share.

mod base;
mod frame_data;
mod style;
mod tail;

pub use base::{AnnotationLayer, BaseLayer};
pub use frame_data::{FrameDataTrack, build_frame_data};
pub use style::{LayerStyle, StateStyles, Style, StyleConfig, TypeStyle, TypeStyling};
pub use tail::{TailData, TailLayer, TailLayerConfig};
