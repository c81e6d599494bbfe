//! Replaying adapters that replay recorded interactions.

pub mod catalog;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

pub use catalog::ReplayingCatalogSource;

/// Fetch the next recorded output for a port/method pair.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, String> {
    let mut guard = replayer.lock().map_err(|_| "cassette replayer lock poisoned".to_string())?;
    guard.next_interaction(port, method).map(|i| i.output.clone())
}

/// Decode a recorded `{"Ok": v}` / `{"Err": msg}` output.
///
/// The outer error is a malformed cassette; the inner one is the recorded failure.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
) -> Result<Result<T, String>, String> {
    if let Some(ok) = output.get("Ok") {
        return serde_json::from_value(ok.clone())
            .map(Ok)
            .map_err(|e| format!("Failed to decode recorded value: {e}"));
    }
    if let Some(err) = output.get("Err") {
        return Ok(Err(err.as_str().map_or_else(|| err.to_string(), String::from)));
    }
    Err(format!("Recorded output is neither Ok nor Err: {output}"))
}
