//! VIAME CSV track format.
//!
//! One row per detection:
//!
//! ```text
//! trackId, name, frame, x1, y1, x2, y2, confidence, fishLength, [type, score]..., [extras]...
//! ```
//!
//! Extras are `(kp) head X Y`, `(kp) tail X Y`, `(atr) KEY VALUE` for feature
//! attributes and `(trk-atr) KEY VALUE` for track attributes. Rows starting
//! with `#` are comments.

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};

use crate::error::{LayerError, Result};
use crate::tracker::feature::{AttributeValue, Attributes, Feature};
use crate::tracker::rect::Rect;
use crate::tracker::store::TrackStore;
use crate::tracker::track::{ConfidencePair, Track, TrackId};

const PAIRS_START: usize = 9;

/// Everything one CSV row contributes to its track.
struct Row {
    track_id: TrackId,
    feature: Feature,
    confidence_pairs: Vec<ConfidencePair>,
    track_attributes: Attributes,
}

impl TrackStore {
    /// Parse VIAME CSV into tracks.
    ///
    /// Rows may come in any order. A track spans the frames of all its rows and
    /// takes the confidence pairs of its last row.
    pub fn from_viame_csv(csv: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .trim(Trim::All)
            .from_reader(csv.as_bytes());

        let mut store = TrackStore::new();
        for record in reader.records() {
            let record = record?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            let row = parse_row(&record)?;

            if store.get(row.track_id).is_err() {
                store.insert(Track::new(row.track_id, row.feature.frame));
            }
            let track = store.get_mut(row.track_id)?;
            track.set_feature(row.feature);
            track.set_confidence_pairs(row.confidence_pairs);
            track.attributes.extend(row.track_attributes);
        }
        log::debug!("loaded {} tracks from viame csv", store.len());
        Ok(store)
    }

    /// Write all tracks as VIAME CSV, tracks by id and features by frame.
    ///
    /// Features without a bounding box have no CSV representation and are skipped.
    pub fn to_viame_csv(&self) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(Vec::new());

        for track in self.iter() {
            for feature in track.features() {
                if let Some(columns) = feature_columns(track, feature) {
                    writer.write_record(&columns)?;
                }
            }
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| LayerError::Csv(e.into_error().into()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn invalid(record: &StringRecord, message: impl Into<String>) -> LayerError {
    LayerError::InvalidRow {
        line: record.position().map_or(0, |p| p.line()),
        message: message.into(),
    }
}

fn field<'r>(record: &'r StringRecord, index: usize) -> Result<&'r str> {
    record
        .get(index)
        .ok_or_else(|| invalid(record, format!("missing column {index}")))
}

fn number<T: std::str::FromStr>(record: &StringRecord, index: usize) -> Result<T> {
    let value = field(record, index)?;
    value
        .parse()
        .map_err(|_| invalid(record, format!("column {index}: bad number {value:?}")))
}

fn parse_row(record: &StringRecord) -> Result<Row> {
    let track_id = number(record, 0)?;
    let frame = number(record, 2)?;
    let bounds = Rect::from_tlbr(
        number(record, 3)?,
        number(record, 4)?,
        number(record, 5)?,
        number(record, 6)?,
    );
    let fish_length: f32 = number(record, 8)?;

    let mut feature = Feature::new(frame, bounds);
    feature.fish_length = (fish_length > 0.0).then_some(fish_length);

    // type/score pairs run until the first tagged column
    let mut confidence_pairs: Vec<ConfidencePair> = Vec::new();
    let mut i = PAIRS_START;
    while i + 1 < record.len() && !field(record, i)?.starts_with('(') {
        confidence_pairs.push((field(record, i)?.to_string(), number(record, i + 1)?));
        i += 2;
    }

    let mut attributes = Attributes::new();
    let mut track_attributes = Attributes::new();
    for column in record.iter().skip(i) {
        if let Some(rest) = column.strip_prefix("(kp)") {
            let mut parts = rest.split_whitespace();
            let name = parts.next();
            let point: Option<(f32, f32)> = match (parts.next(), parts.next()) {
                (Some(x), Some(y)) => x.parse().ok().zip(y.parse().ok()),
                _ => None,
            };
            match (name, point) {
                (Some("head"), Some(p)) => feature.head = Some(p),
                (Some("tail"), Some(p)) => feature.tail = Some(p),
                _ => log::warn!("ignoring keypoint column {column:?}"),
            }
        } else if let Some(rest) = column.strip_prefix("(atr)") {
            if let Some((key, value)) = key_value(rest) {
                attributes.insert(key, value);
            }
        } else if let Some(rest) = column.strip_prefix("(trk-atr)") {
            if let Some((key, value)) = key_value(rest) {
                track_attributes.insert(key, value);
            }
        }
    }
    if !attributes.is_empty() {
        feature.attributes = Some(attributes);
    }

    Ok(Row {
        track_id,
        feature,
        confidence_pairs,
        track_attributes,
    })
}

/// `KEY VALUE`, where the key may itself contain spaces.
fn key_value(text: &str) -> Option<(String, AttributeValue)> {
    let (key, value) = text.trim().rsplit_once(' ')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), deduce_value(value)))
}

fn deduce_value(value: &str) -> AttributeValue {
    match value {
        "true" => AttributeValue::Bool(true),
        "false" => AttributeValue::Bool(false),
        _ => value
            .parse()
            .map(AttributeValue::Number)
            .unwrap_or_else(|_| AttributeValue::Text(value.to_string())),
    }
}

fn value_to_string(value: &AttributeValue) -> String {
    match value {
        AttributeValue::Bool(b) => b.to_string(),
        AttributeValue::Number(n) => n.to_string(),
        AttributeValue::Text(s) => s.clone(),
    }
}

fn feature_columns(track: &Track, feature: &Feature) -> Option<Vec<String>> {
    let bounds = feature.bounds?;
    // overall confidence is that of the last pair
    let confidence = track.confidence_pairs().last().map_or(1.0, |p| p.1);

    let mut columns = vec![
        track.track_id.to_string(),
        String::new(),
        feature.frame.to_string(),
    ];
    columns.extend(bounds.to_tlbr().iter().map(f32::to_string));
    columns.push(confidence.to_string());
    columns.push(feature.fish_length.unwrap_or(-1.0).to_string());

    for (label, score) in track.confidence_pairs() {
        columns.push(label.clone());
        columns.push(score.to_string());
    }
    if let (Some(head), Some(tail)) = (feature.head, feature.tail) {
        columns.push(format!("(kp) head {} {}", head.0, head.1));
        columns.push(format!("(kp) tail {} {}", tail.0, tail.1));
    }
    if let Some(attributes) = &feature.attributes {
        for (key, value) in attributes {
            columns.push(format!("(atr) {key} {}", value_to_string(value)));
        }
    }
    for (key, value) in &track.attributes {
        columns.push(format!("(trk-atr) {key} {}", value_to_string(value)));
    }
    Some(columns)
}
