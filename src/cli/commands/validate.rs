//! Validate command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};
use tracing::info;

pub fn command() -> Command {
    Command::new("validate")
        .about("Validate configuration file")
        .arg(utils::config_arg())
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    info!("Validating configuration file");

    let config = utils::load_config(matches)?;

    println!("Configuration is valid!");
    println!("Version: {}", config.version);
    println!(
        "External discovery: {}",
        if config.plugins.enable_external_discovery {
            "enabled"
        } else {
            "disabled"
        }
    );

    for dir in config.expanded_plugin_directories()? {
        let marker = if dir.exists() { "" } else { " (missing)" };
        println!("  - {}{}", dir.display(), marker);
    }

    println!("Demo side length: {}", config.demo.side_length);
    println!("Demo classes: {}", config.demo.classes.join(", "));

    Ok(())
}
