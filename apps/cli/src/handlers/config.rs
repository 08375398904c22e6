use crate::models::args::Cli;
use anyhow::Context;
use bix_kernel::config::load_config;

/// Prints the merged configuration (defaults, file, `BIX__` environment) as JSON.
///
/// # Errors
/// Returns an error if the configuration cannot be loaded.
pub fn show_config(cli: &Cli) -> anyhow::Result<()> {
    let cfg = load_config(cli.config.as_deref(), &cli.project_dir).context("Configuration is malformed")?;
    println!("{}", serde_json::to_string_pretty(&cfg)?);
    Ok(())
}
