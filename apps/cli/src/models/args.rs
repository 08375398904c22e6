//! # CLI Argument Definitions
//!
//! Global flags apply to every subcommand; each task subcommand maps onto one
//! [`Task`].

use bix_release::Task;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "bix")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Build, test, document and release containerized BIX tools")]
pub struct Cli {
    /// Project directory holding .yo-rc.json, package.json and docker/Dockerfile
    #[arg(short = 'C', long, global = true, env = "BIX_PROJECT_DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Tool configuration file (defaults to <project-dir>/bix.toml when present)
    #[arg(long, global = true, env = "BIX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to daily rolling files in this directory
    #[arg(long, global = true, env = "BIX_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Tracing filter directives overriding -v and RUST_LOG, e.g. "bix_exec=debug"
    #[arg(long, global = true, env = "BIX_LOG_FILTER")]
    pub log_filter: Option<String>,

    /// Write file logs as JSON lines
    #[arg(long, global = true, requires = "log_dir")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: AppCommands,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum AppCommands {
    /// Build the tool image from docker/Dockerfile
    Build,
    /// Run check-released, init-ecr and init-venv
    Init,
    /// Fail if the version is already in a release registry
    CheckReleased,
    /// Log in to the US registry and show the docker version
    InitEcr,
    /// Create the local virtualenv with the helper packages
    InitVenv,
    /// Build the documentation inside the image
    Docs,
    /// Run the test suite inside the image, reports in tests/results
    Test,
    /// Push the version to the sandbox repositories
    PublishSnapshot,
    /// Push the version to every release registry, then tag it in git
    PublishRelease,
    /// Print the effective configuration as JSON
    Config,
}

impl AppCommands {
    /// The task behind this subcommand; `None` for commands that run no task.
    pub const fn task(self) -> Option<Task> {
        match self {
            Self::Build => Some(Task::Build),
            Self::Init => Some(Task::Init),
            Self::CheckReleased => Some(Task::CheckReleased),
            Self::InitEcr => Some(Task::InitEcr),
            Self::InitVenv => Some(Task::InitVenv),
            Self::Docs => Some(Task::Docs),
            Self::Test => Some(Task::Test),
            Self::PublishSnapshot => Some(Task::PublishSnapshot),
            Self::PublishRelease => Some(Task::PublishRelease),
            Self::Config => None,
        }
    }
}
