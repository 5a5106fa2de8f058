pub mod source;

pub use source::{JsonFileSource, ListingSource, Snapshot, StaticSource};
