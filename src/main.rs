//! patchmate binary entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    match patchmate::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            patchmate::ui::output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
