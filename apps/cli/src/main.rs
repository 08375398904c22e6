#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod handlers;
pub mod models;

use crate::handlers::{config, task};
use crate::models::args::Cli;
use bix_logger::{Logger, level_from_verbosity};
use bix_release::TaskError;
use clap::Parser;
use std::process::ExitCode;
use tracing::error;

const EXIT_FAILURE: u8 = 1;
/// Exit status when the version already exists in a release registry.
const EXIT_ALREADY_RELEASED: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _logger = match init_logger(&cli) {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        },
    };

    let result = match cli.command.task() {
        Some(t) => task::run_task(&cli, t),
        None => config::show_config(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(exit_status(&err))
        },
    }
}

fn init_logger(cli: &Cli) -> anyhow::Result<Logger> {
    let mut builder = Logger::builder()
        .name(env!("CARGO_BIN_NAME"))
        .level(level_from_verbosity(cli.verbose))
        .json(cli.log_json);
    if let Some(dir) = &cli.log_dir {
        builder = builder.path(dir);
    }
    if let Some(filter) = &cli.log_filter {
        builder = builder.env_filter(filter);
    }
    Ok(builder.init()?)
}

fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<TaskError>() {
        Some(TaskError::AlreadyReleased { .. }) => EXIT_ALREADY_RELEASED,
        _ => EXIT_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn duplicate_release_has_its_own_exit_status() {
        let released: Result<(), TaskError> =
            Err(TaskError::AlreadyReleased { image: "host/repo:1.0.0".to_owned(), context: None });
        let err = released.context("Task `publish-release` failed").unwrap_err();
        assert_eq!(exit_status(&err), EXIT_ALREADY_RELEASED);

        let missing: Result<(), TaskError> =
            Err(TaskError::MissingEnv { name: "GIT_USER".to_owned(), context: None });
        assert_eq!(exit_status(&missing.context("Task `build` failed").unwrap_err()), EXIT_FAILURE);
    }
}
