mod builder;
mod feature;
mod rect;
mod store;
mod track;
mod viame;

pub use builder::TrackBuilder;
pub use feature::{AttributeValue, Attributes, Feature};
pub use rect::Rect;
pub use store::TrackStore;
pub use track::{ConfidencePair, Track, TrackId};
