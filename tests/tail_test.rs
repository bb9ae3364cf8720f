use std::cell::RefCell;
use std::rc::Rc;

use tail_layer_rs::{
    AnnotationLayer, FrameDataTrack, HeadlessSurface, LayerStyle, StyleConfig, TailLayer,
    TailLayerConfig, TailPipeline, TrackStore,
};

const TRACKS: &str = r#"{
    "1": {
        "begin": 0, "end": 4, "trackId": 1,
        "features": [
            {"frame": 0, "bounds": [0, 0, 10, 10], "keyframe": true},
            {"frame": 1, "bounds": [10, 0, 20, 10], "interpolate": true},
            {"frame": 2, "bounds": [20, 0, 30, 10], "interpolate": true},
            {"frame": 3, "keyframe": true},
            {"frame": 4, "bounds": [40, 0, 50, 10], "keyframe": true}
        ],
        "confidencePairs": [["fish", 0.9], ["rock", 0.1]]
    },
    "2": {
        "begin": 2, "end": 3, "trackId": 2,
        "features": [
            {"frame": 2, "bounds": [0, 20, 4, 24]},
            {"frame": 3, "bounds": [4, 20, 8, 24]}
        ]
    }
}"#;

#[test]
fn test_tail_rendering() {
    let tracks = Rc::new(RefCell::new(TrackStore::from_json(TRACKS).unwrap()));
    let style = StyleConfig::from_json(r#"{"types": {"fish": {"color": "orange", "strokeWidth": 8}}}"#)
        .unwrap();
    let surface = HeadlessSurface::new();
    let scene = surface.scene();
    let mut pipeline = TailPipeline::new(
        surface,
        tracks,
        Rc::new(LayerStyle::from(style)),
        TailLayerConfig::default(),
    )
    .unwrap();

    // Frame 3: both tracks active
    pipeline.seek(3).unwrap();
    let list = scene.last_draw().unwrap();
    assert_eq!(list.tracks.len(), 2);

    // Track 1 lost its box at frame 3, so four samples remain
    let fish = &list.tracks[0];
    assert_eq!(fish.track_id, 1);
    assert_eq!(fish.segments.len(), 3);
    assert_eq!(fish.segments[0].color, "orange");
    assert_eq!(fish.segments[1].color, "#FFFF00");
    assert!((fish.segments[0].width - 4.0).abs() < 1e-6);
    // head is the last sample not after frame 3
    assert!((fish.marker.as_ref().unwrap().center.x - 25.0).abs() < 1e-6);
    assert_eq!(fish.marker.as_ref().unwrap().fill_color, "orange");

    // Selecting track 2 switches its colors to the selected state
    pipeline.select(Some(2)).unwrap();
    let list = scene.last_draw().unwrap();
    assert_eq!(list.tracks[1].segments[0].color, "cyan");
    assert_eq!(list.tracks[1].marker.as_ref().unwrap().stroke_color, "cyan");
    assert!((list.tracks[1].marker.as_ref().unwrap().center.x - 6.0).abs() < 1e-6);

    // Disabling hides everything
    pipeline.set_enabled(false).unwrap();
    assert!(scene.last_draw().unwrap().tracks.is_empty());
}

#[test]
fn test_polymorphic_host_skips_unsupported() {
    let tracks = Rc::new(RefCell::new(TrackStore::from_json(TRACKS).unwrap()));
    let mut layer = TailLayer::new(
        HeadlessSurface::new(),
        tracks,
        Rc::new(LayerStyle::default()),
        TailLayerConfig::default(),
    );
    layer.initialize().unwrap();
    layer.update_settings(2);

    let frame_data = [FrameDataTrack::new(1, false), FrameDataTrack::new(2, false)];
    match layer.format_data(&frame_data) {
        Err(e) if e.is_unsupported() => layer.change_data(&frame_data).unwrap(),
        other => panic!("unexpected format_data result: {:?}", other.map(|d| d.len())),
    }
    assert_eq!(layer.cache_len(), 2);
    assert!(layer.redraw().unwrap_err().is_unsupported());
}
