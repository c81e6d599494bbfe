//! Cassette format for recording and replaying catalog fetches.

pub mod format;
pub mod recorder;
pub mod replayer;
