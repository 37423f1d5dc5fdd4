//! Stream ordering

pub mod orderer;

pub use orderer::{SpeakerSet, StreamOrderer};
