//! TailPipeline for driving a tail layer from the annotator's frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::integration::RenderSurface;
use crate::layer::{AnnotationLayer, LayerStyle, TailLayer, TailLayerConfig, build_frame_data};
use crate::tracker::{TrackId, TrackStore};

/// Frame update loop bundling a track store with its tail layer.
///
/// Keeps the current frame, selection and enabled flag, and re-renders the
/// layer whenever one of them changes.
pub struct TailPipeline<S: RenderSurface> {
    tracks: Rc<RefCell<TrackStore>>,
    layer: TailLayer<S>,
    frame: u32,
    selected: Option<TrackId>,
    enabled: bool,
}

impl<S: RenderSurface> TailPipeline<S> {
    /// Create the pipeline and initialize its layer on `surface`.
    pub fn new(
        surface: S,
        tracks: Rc<RefCell<TrackStore>>,
        style: Rc<LayerStyle>,
        config: TailLayerConfig,
    ) -> Result<Self> {
        let mut layer = TailLayer::new(surface, Rc::clone(&tracks), style, config);
        layer.initialize()?;
        Ok(Self {
            tracks,
            layer,
            frame: 0,
            selected: None,
            enabled: true,
        })
    }

    /// Create a pipeline with default style and layer configuration.
    pub fn with_defaults(surface: S, tracks: Rc<RefCell<TrackStore>>) -> Result<Self> {
        Self::new(
            surface,
            tracks,
            Rc::new(LayerStyle::default()),
            TailLayerConfig::default(),
        )
    }

    /// Move to `frame` and render the tails of the tracks active there.
    pub fn seek(&mut self, frame: u32) -> Result<()> {
        self.frame = frame;
        self.render()
    }

    /// Change the selected track and re-render the current frame.
    pub fn select(&mut self, track_id: Option<TrackId>) -> Result<()> {
        self.selected = track_id;
        self.render()
    }

    /// Show or hide the tails.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.enabled = enabled;
        if enabled {
            self.render()
        } else {
            self.layer.disable()
        }
    }

    fn render(&mut self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let frame_data = build_frame_data(&self.tracks.borrow(), self.frame, self.selected, false);
        self.layer.update_settings(self.frame);
        self.layer.change_data(&frame_data)
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn selected(&self) -> Option<TrackId> {
        self.selected
    }

    /// Get a reference to the underlying layer.
    pub fn layer(&self) -> &TailLayer<S> {
        &self.layer
    }

    /// Get a mutable reference to the underlying layer.
    pub fn layer_mut(&mut self) -> &mut TailLayer<S> {
        &mut self.layer
    }
}
