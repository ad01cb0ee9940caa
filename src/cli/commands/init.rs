//! Init command implementation

use crate::{utils, Config};
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("init")
        .about("Initialize a new configuration file")
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file path")
                .value_name("FILE")
                .default_value(".polygon-plugins.yaml"),
        )
        .arg(
            clap::Arg::new("global")
                .short('g')
                .long("global")
                .help("Write to the user configuration directory instead")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("force")
                .short('f')
                .long("force")
                .help("Overwrite an existing file")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let output_path = if matches.get_flag("global") {
        let config_dir = utils::get_config_dir()?;
        utils::ensure_directory(&config_dir)?;
        config_dir.join("config.yaml")
    } else {
        PathBuf::from(
            matches
                .get_one::<String>("output")
                .ok_or_else(|| anyhow!("Missing output path"))?,
        )
    };

    if output_path.exists() && !matches.get_flag("force") {
        return Err(anyhow!(
            "{:?} already exists, use --force to overwrite",
            output_path
        ));
    }

    info!("Initializing configuration file: {:?}", output_path);

    Config::default().save_to_file(&output_path)?;

    println!("Configuration file created: {}", output_path.display());
    println!("Edit plugin directories and demo settings to get started.");

    Ok(())
}
