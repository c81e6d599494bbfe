//! Binary entrypoint for the `platform-tagger` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env file is fine; the environment may be set directly.
    let _ = dotenvy::dotenv();
    match platform_tagger::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
