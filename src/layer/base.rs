//! Lifecycle contract shared by annotation layers.

use std::rc::Rc;

use crate::error::Result;
use crate::layer::frame_data::FrameDataTrack;
use crate::layer::style::{LayerStyle, Style};

/// Layer driven by the annotator's frame update loop.
///
/// Operations a layer type cannot perform return
/// [`LayerError::UnsupportedOperation`](crate::LayerError::UnsupportedOperation),
/// so a host treating all layers alike can skip them.
pub trait AnnotationLayer {
    /// Item produced by `format_data` for the renderer.
    type Datum;

    /// One-time setup against the render surface.
    fn initialize(&mut self) -> Result<()>;

    /// Record the frame the next `change_data` refers to.
    fn update_settings(&mut self, frame: u32);

    /// Rebuild and draw the layer for the current frame's tracks.
    fn change_data(&mut self, frame_data: &[FrameDataTrack]) -> Result<()>;

    /// Convert frame descriptors into renderer data.
    fn format_data(&mut self, frame_data: &[FrameDataTrack]) -> Result<Vec<Self::Datum>>;

    /// Redraw the previously submitted data.
    fn redraw(&mut self) -> Result<()>;

    /// Hide the layer without destroying it.
    fn disable(&mut self) -> Result<()>;
}

/// State common to every annotation layer.
#[derive(Debug, Clone)]
pub struct BaseLayer {
    style: Rc<LayerStyle>,
    initialized: bool,
}

impl BaseLayer {
    pub fn new(style: Rc<LayerStyle>) -> Self {
        Self {
            style,
            initialized: false,
        }
    }

    /// Finish initialization once the layer's own features exist.
    pub fn initialize(&mut self) {
        self.initialized = true;
        log::debug!("base layer initialized");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn style(&self) -> &Rc<LayerStyle> {
        &self.style
    }

    /// `selected` or `standard` state style.
    pub fn state_style(&self, selected: bool) -> &Style {
        if selected {
            &self.style.state.selected
        } else {
            &self.style.state.standard
        }
    }
}
