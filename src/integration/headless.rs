//! Display-list rendering backend.
//!
//! `HeadlessSurface` renders track features into plain `DisplayList` values
//! instead of pixels. Style providers are invoked during `draw` exactly like a
//! canvas backend would invoke them, so the output reflects the final per-point
//! styling. Useful for tests, snapshots and server-side export.

use std::cell::RefCell;
use std::rc::Rc;

use nalgebra::Point2;
use serde::Serialize;

use super::surface::{FeatureKind, FeatureLayer, RenderSurface, TrackFeature, TrackFeatureStyle};
use crate::error::{LayerError, Result};
use crate::layer::TailData;
use crate::tracker::TrackId;

/// One stroked line segment between two consecutive samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point2<f32>,
    pub to: Point2<f32>,
    pub color: String,
    pub width: f32,
    pub opacity: f32,
}

/// Marker at the head of a track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub center: Point2<f32>,
    pub radius: f32,
    pub fill_color: String,
    pub stroke_color: String,
    pub stroke_width: f32,
    pub stroke_opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawnTrack {
    pub track_id: TrackId,
    pub segments: Vec<Segment>,
    pub marker: Option<Marker>,
}

/// Output of one `draw` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayList {
    pub fill: bool,
    pub antialiasing: bool,
    pub tracks: Vec<DrawnTrack>,
}

#[derive(Default)]
struct Scene {
    layers: Vec<Vec<FeatureKind>>,
    track_features: usize,
    data: Vec<Vec<TailData>>,
    time_range: (u32, u32),
    style: Option<TrackFeatureStyle>,
    draws: Vec<DisplayList>,
}

/// Read access to what was submitted to and drawn by a `HeadlessSurface`.
#[derive(Clone)]
pub struct SceneHandle(Rc<RefCell<Scene>>);

impl SceneHandle {
    /// Kinds requested for each created feature layer.
    pub fn layers(&self) -> Vec<Vec<FeatureKind>> {
        self.0.borrow().layers.clone()
    }

    pub fn track_feature_count(&self) -> usize {
        self.0.borrow().track_features
    }

    /// Dataset last submitted to the track feature.
    pub fn data(&self) -> Vec<Vec<TailData>> {
        self.0.borrow().data.clone()
    }

    pub fn time_range(&self) -> (u32, u32) {
        self.0.borrow().time_range
    }

    pub fn draw_count(&self) -> usize {
        self.0.borrow().draws.len()
    }

    pub fn last_draw(&self) -> Option<DisplayList> {
        self.0.borrow().draws.last().cloned()
    }
}

/// Render surface producing display lists.
pub struct HeadlessSurface {
    ready: bool,
    scene: Rc<RefCell<Scene>>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self {
            ready: true,
            scene: Rc::default(),
        }
    }

    /// Surface whose viewer has not been created yet; every request fails.
    pub fn unready() -> Self {
        Self {
            ready: false,
            scene: Rc::default(),
        }
    }

    pub fn scene(&self) -> SceneHandle {
        SceneHandle(Rc::clone(&self.scene))
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for HeadlessSurface {
    fn create_feature_layer(&mut self, kinds: &[FeatureKind]) -> Result<Box<dyn FeatureLayer>> {
        if !self.ready {
            return Err(LayerError::SurfaceNotReady);
        }
        self.scene.borrow_mut().layers.push(kinds.to_vec());
        Ok(Box::new(HeadlessLayer {
            scene: Rc::clone(&self.scene),
        }))
    }
}

struct HeadlessLayer {
    scene: Rc<RefCell<Scene>>,
}

impl FeatureLayer for HeadlessLayer {
    fn create_track_feature(&mut self) -> Result<Box<dyn TrackFeature>> {
        self.scene.borrow_mut().track_features += 1;
        Ok(Box::new(HeadlessTrackFeature {
            scene: Rc::clone(&self.scene),
        }))
    }
}

struct HeadlessTrackFeature {
    scene: Rc<RefCell<Scene>>,
}

impl TrackFeature for HeadlessTrackFeature {
    fn set_data(&mut self, data: Vec<Vec<TailData>>) {
        self.scene.borrow_mut().data = data;
    }

    fn set_time_range(&mut self, start: u32, end: u32) {
        self.scene.borrow_mut().time_range = (start, end);
    }

    fn set_style(&mut self, style: TrackFeatureStyle) {
        self.scene.borrow_mut().style = Some(style);
    }

    fn draw(&mut self) -> Result<()> {
        let mut scene = self.scene.borrow_mut();
        let list = match &scene.style {
            Some(style) => render(&scene.data, scene.time_range, style),
            // nothing styled yet, only an empty dataset can be drawn
            None => DisplayList::default(),
        };
        log::trace!("headless draw: {} tracks", list.tracks.len());
        scene.draws.push(list);
        Ok(())
    }
}

fn render(data: &[Vec<TailData>], (start, end): (u32, u32), style: &TrackFeatureStyle) -> DisplayList {
    let tracks = data
        .iter()
        .filter(|track| !track.is_empty())
        .map(|track| render_track(track, start, end, style))
        .collect();
    DisplayList {
        fill: style.fill,
        antialiasing: style.antialiasing,
        tracks,
    }
}

fn render_track(track: &[TailData], start: u32, end: u32, style: &TrackFeatureStyle) -> DrawnTrack {
    let segments = track
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let (a, b) = (&pair[0], &pair[1]);
            let opacity = if b.time < start {
                style.past_stroke_opacity
            } else if a.time > end {
                style.future_stroke_opacity
            } else {
                1.0
            };
            Segment {
                from: a.position(),
                to: b.position(),
                color: style.point.stroke_color(a, i, track),
                width: style.point.stroke_width(a, i, track),
                opacity,
            }
        })
        .collect();

    let marker = track.iter().rev().find(|d| d.time <= end).map(|head| Marker {
        center: head.position(),
        radius: style.marker.radius(track),
        fill_color: style.marker.fill_color(track),
        stroke_color: style.marker.stroke_color(track),
        stroke_width: style.marker.stroke_width(track),
        stroke_opacity: style.marker.stroke_opacity(track),
    });

    DrawnTrack {
        track_id: track[0].track_id,
        segments,
        marker,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::surface::{MarkerStyleProvider, PointStyleProvider};

    struct Flat;

    impl PointStyleProvider for Flat {
        fn stroke_color(&self, datum: &TailData, _index: usize, _track: &[TailData]) -> String {
            format!("c{}", datum.time)
        }

        fn stroke_width(&self, _datum: &TailData, index: usize, _track: &[TailData]) -> f32 {
            index as f32
        }
    }

    impl MarkerStyleProvider for Flat {
        fn fill_color(&self, _track: &[TailData]) -> String {
            "fill".into()
        }

        fn stroke_color(&self, _track: &[TailData]) -> String {
            "stroke".into()
        }

        fn stroke_width(&self, _track: &[TailData]) -> f32 {
            1.0
        }

        fn radius(&self, _track: &[TailData]) -> f32 {
            4.0
        }

        fn stroke_opacity(&self, _track: &[TailData]) -> f32 {
            0.5
        }
    }

    fn sample(time: u32) -> TailData {
        TailData {
            track_id: 9,
            type_and_confidence: None,
            selected: false,
            time,
            x: time as f32,
            y: 0.0,
            interpolated: false,
        }
    }

    fn feature(surface: &mut HeadlessSurface) -> Box<dyn TrackFeature> {
        surface
            .create_feature_layer(&[FeatureKind::Line])
            .unwrap()
            .create_track_feature()
            .unwrap()
    }

    #[test]
    fn test_unready_surface() {
        let mut surface = HeadlessSurface::unready();
        assert!(matches!(
            surface.create_feature_layer(&[FeatureKind::Line]),
            Err(LayerError::SurfaceNotReady)
        ));
    }

    #[test]
    fn test_segments_and_marker() {
        let mut surface = HeadlessSurface::new();
        let scene = surface.scene();
        let mut feature = feature(&mut surface);

        let flat = Rc::new(Flat);
        let mut style = TrackFeatureStyle::new(flat.clone(), flat);
        style.past_stroke_opacity = 0.0;
        feature.set_style(style);
        feature.set_data(vec![(2..=6).map(sample).collect(), vec![]]);
        feature.set_time_range(4, 5);
        feature.draw().unwrap();

        let list = scene.last_draw().unwrap();
        assert_eq!(list.tracks.len(), 1);
        let drawn = &list.tracks[0];
        assert_eq!(drawn.track_id, 9);

        let opacities: Vec<f32> = drawn.segments.iter().map(|s| s.opacity).collect();
        // 2-3 past, 3-4 and 4-5 current, 5-6 current (starts at end), no future
        assert_eq!(opacities, vec![0.0, 1.0, 1.0, 1.0]);
        assert_eq!(drawn.segments[1].color, "c3");
        assert_eq!(drawn.segments[1].width, 1.0);

        let marker = drawn.marker.as_ref().unwrap();
        assert!((marker.center - Point2::new(5.0, 0.0)).norm() < 1e-6);
        assert_eq!(marker.radius, 4.0);
        assert_eq!(scene.layers(), vec![vec![FeatureKind::Line]]);
        assert_eq!(scene.track_feature_count(), 1);
    }

    #[test]
    fn test_future_segments() {
        let mut surface = HeadlessSurface::new();
        let scene = surface.scene();
        let mut feature = feature(&mut surface);

        let flat = Rc::new(Flat);
        feature.set_style(TrackFeatureStyle::new(flat.clone(), flat));
        feature.set_data(vec![(0..4).map(sample).collect()]);
        feature.set_time_range(0, 1);
        feature.draw().unwrap();

        let drawn = &scene.last_draw().unwrap().tracks[0];
        assert_eq!(drawn.segments[2].opacity, 0.25);
        assert!((drawn.marker.as_ref().unwrap().center.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_draw_without_style() {
        let mut surface = HeadlessSurface::new();
        let scene = surface.scene();
        let mut feature = feature(&mut surface);
        feature.set_data(vec![]);
        feature.draw().unwrap();
        assert_eq!(scene.draw_count(), 1);
        assert_eq!(scene.last_draw(), Some(DisplayList::default()));
    }
}
