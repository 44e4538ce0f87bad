mod action;
mod app;
mod cli;

use std::{io, process::ExitCode};

use owl_core::config::DEFAULT_API_BASE_URL;

use crate::app::App;

fn main() -> ExitCode {
    owl_core::logging::init("telegram_owl");

    let mut stdout = io::stdout().lock();
    match App::new(DEFAULT_API_BASE_URL).run(std::env::args_os(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "telegram-owl failed");
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
