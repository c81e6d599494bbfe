//! Command dispatch and handlers.

pub mod resolve;

use tracing::info;

use crate::cli::Cli;
use crate::config::Settings;
use crate::context::ServiceContext;

/// Run a parsed invocation and print the tracker arguments.
///
/// When `PLATFORM_TAGGER_RECORD` is set to a file path, the catalog fetch is
/// recorded there; `--replay` serves it from such a file instead.
///
/// # Errors
///
/// Returns an error string if setup, the catalog fetch or resolution fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let settings = Settings::from_env();
    let ctx = ServiceContext::from_settings(&settings, cli.replay.as_deref())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    let result = runtime.block_on(resolve::run(&ctx, cli));

    // Finish recording after the command completes (even on error)
    if let Some(path) = ctx.finish()? {
        info!("Recording saved to: {}", path.display());
    }

    println!("{}", result?);
    Ok(())
}
