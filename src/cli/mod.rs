//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("polygon-plugins")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Discover and instantiate regular polygon plugins")
            .subcommand_negates_reqs(true)
            .subcommand(commands::init::command())
            .subcommand(commands::validate::command())
            .subcommand(commands::info::command())
            .subcommand(commands::plugins::command())
            .subcommand(commands::area::command())
            .subcommand(commands::demo::command())
    }

    /// Run the CLI application
    pub async fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("init", sub_matches)) => commands::init::run(sub_matches).await,
            Some(("validate", sub_matches)) => commands::validate::run(sub_matches).await,
            Some(("info", sub_matches)) => commands::info::run(sub_matches).await,
            Some(("plugins", sub_matches)) => commands::plugins::run(sub_matches).await,
            Some(("area", sub_matches)) => commands::area::run(sub_matches).await,
            Some(("demo", sub_matches)) => commands::demo::run(sub_matches).await,
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use anyhow::{anyhow, Result};
    use std::path::PathBuf;
    use tracing::info;

    /// Default configuration file names, in lookup order
    pub const DEFAULT_CONFIG_FILES: [&str; 2] = [".polygon-plugins.yaml", ".polygon-plugins.yml"];

    /// `--config` argument shared by commands that read a configuration
    pub fn config_arg() -> clap::Arg {
        clap::Arg::new("config")
            .short('c')
            .long("config")
            .help("Configuration file path")
            .value_name("FILE")
    }

    /// Get configuration file path from arguments or the default locations
    pub fn get_config_path(matches: &clap::ArgMatches) -> Result<Option<PathBuf>> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            let path = PathBuf::from(config_path);
            if !path.exists() {
                return Err(anyhow!("Configuration file not found: {:?}", path));
            }
            return Ok(Some(path));
        }

        if let Some(path) = DEFAULT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
        {
            return Ok(Some(path));
        }

        Ok(crate::utils::get_config_dir()
            .ok()
            .map(|dir| dir.join("config.yaml"))
            .filter(|path| path.exists()))
    }

    /// Load configuration from file, falling back to defaults
    pub fn load_config(matches: &clap::ArgMatches) -> Result<crate::Config> {
        match get_config_path(matches)? {
            Some(config_path) => {
                info!("Loading configuration from {:?}", config_path);
                crate::Config::from_file(&config_path)
            }
            None => {
                info!("No configuration file found, using defaults");
                Ok(crate::Config::default())
            }
        }
    }

    /// Create an application instance with its plugins loaded
    pub async fn create_app(matches: &clap::ArgMatches) -> Result<crate::PolygonPlugins> {
        let config = load_config(matches)?;
        let app = crate::PolygonPlugins::new(config)?;
        app.initialize_plugins().await?;
        Ok(app)
    }
}
