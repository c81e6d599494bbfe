//! Service context bundling the port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::LiveCatalogSource;
use crate::adapters::recording::RecordingCatalogSource;
use crate::adapters::replaying::ReplayingCatalogSource;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::Settings;
use crate::ports::catalog::CatalogSource;

/// Bundles the external boundaries a run needs.
///
/// Constructors wire up different adapter implementations (live,
/// replaying, recording).
pub struct ServiceContext {
    /// Source of the platform catalog.
    pub catalog: Box<dyn CatalogSource>,
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Wraps an arbitrary catalog source, e.g. a test double.
    #[must_use]
    pub fn with_catalog(catalog: Box<dyn CatalogSource>) -> Self {
        Self {
            catalog,
            recorder: None,
        }
    }

    /// Creates a live context fetching from the configured share.
    ///
    /// # Errors
    ///
    /// Returns an error if the share password is not configured.
    pub fn live(settings: &Settings) -> Result<Self, String> {
        let password = settings.require_password()?;
        Ok(Self::with_catalog(Box::new(LiveCatalogSource::new(&settings.share_url, password))))
    }

    /// Creates a live context whose catalog fetches are recorded to `path`.
    ///
    /// The cassette is written by [`ServiceContext::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if the share password is not configured.
    pub fn recording(settings: &Settings, path: &Path) -> Result<Self, String> {
        let live = Self::live(settings)?;
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, "platform-tagger-session")));
        Ok(Self {
            catalog: Box::new(RecordingCatalogSource::new(live.catalog, Arc::clone(&recorder))),
            recorder: Some(recorder),
        })
    }

    /// Creates a context serving the catalog from a recorded cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        let replayer = Arc::new(Mutex::new(CassetteReplayer::new(&cassette)));
        Ok(Self::with_catalog(Box::new(ReplayingCatalogSource::new(replayer))))
    }

    /// Picks the context for a run: replay if a cassette is given, otherwise
    /// live, recording when the settings ask for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen context cannot be built.
    pub fn from_settings(settings: &Settings, replay: Option<&Path>) -> Result<Self, String> {
        match (replay, &settings.record) {
            (Some(path), _) => Self::replaying(path),
            (None, Some(path)) => Self::recording(settings, path),
            (None, None) => Self::live(settings),
        }
    }

    /// Writes the cassette if this context was recording.
    ///
    /// Returns the cassette path when one was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be written.
    pub fn finish(self) -> Result<Option<PathBuf>, String> {
        let Some(recorder) = self.recorder else {
            return Ok(None);
        };
        // Release the adapter's handle on the recorder first.
        drop(self.catalog);
        let recorder = Arc::try_unwrap(recorder)
            .map_err(|_| "cassette recorder is still in use".to_string())?
            .into_inner()
            .map_err(|_| "cassette recorder lock poisoned".to_string())?;
        recorder
            .finish()
            .map(Some)
            .map_err(|e| format!("Failed to write cassette: {e}"))
    }
}
