//! Adapters implementing the port traits.
//!
//! - `live`: talks to the real share over HTTP.
//! - `recording`: wraps another adapter and captures its results in a cassette.
//! - `replaying`: serves results from a previously recorded cassette.

pub mod live;
pub mod recording;
pub mod replaying;
