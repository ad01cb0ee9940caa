//! Plugin management CLI commands

use crate::cli::utils;
use crate::RegistryEntry;
use anyhow::{anyhow, Result};
use clap::ArgMatches;

/// Create the plugins command
pub fn command() -> clap::Command {
    clap::Command::new("plugins")
        .about("Inspect registered plugin classes")
        .subcommand_negates_reqs(true)
        .subcommand(
            clap::Command::new("list")
                .about("List declared classes")
                .arg(utils::config_arg())
                .arg(
                    clap::Arg::new("detailed")
                        .short('d')
                        .long("detailed")
                        .help("Show detailed information")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    clap::Arg::new("json")
                        .long("json")
                        .help("Print entries as JSON")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(clap::arg!(--library <LIBRARY> "Filter by library")),
        )
        .subcommand(
            clap::Command::new("info")
                .about("Show class information")
                .arg(utils::config_arg())
                .arg(clap::arg!(<CLASS> "Lookup name or class type")),
        )
}

/// Run plugin command
pub async fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("list", sub_matches)) => run_list(sub_matches).await,
        Some(("info", sub_matches)) => run_info(sub_matches).await,
        _ => {
            let _ = command().print_help();
            Ok(())
        }
    }
}

async fn run_list(matches: &ArgMatches) -> Result<()> {
    let app = utils::create_app(matches).await?;
    let mut plugins = app.get_plugin_info().await?;

    if let Some(library) = matches.get_one::<String>("library") {
        plugins.retain(|plugin| &plugin.library == library);
    }

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&plugins)?);
        return Ok(());
    }

    if plugins.is_empty() {
        println!("No plugins found.");
        return Ok(());
    }

    println!("Declared classes:");
    println!();

    let detailed = matches.get_flag("detailed");
    for plugin in &plugins {
        println!("  {} [{}]", plugin.metadata.lookup_name, plugin.status);
        println!("    Type: {}", plugin.metadata.class_type);
        if detailed {
            print_details(plugin);
        }
        println!();
    }

    Ok(())
}

async fn run_info(matches: &ArgMatches) -> Result<()> {
    let name = matches
        .get_one::<String>("CLASS")
        .ok_or_else(|| anyhow!("Missing class name"))?;

    let app = utils::create_app(matches).await?;
    let plugins = app.get_plugin_info().await?;

    let plugin = plugins
        .iter()
        .find(|p| &p.metadata.lookup_name == name || &p.metadata.class_type == name)
        .ok_or_else(|| anyhow!("Class '{}' not found", name))?;

    println!("Class Information:");
    println!("  Name: {}", plugin.metadata.lookup_name);
    println!("  Type: {}", plugin.metadata.class_type);
    println!("  Status: {}", plugin.status);
    print_details(plugin);

    Ok(())
}

fn print_details(plugin: &RegistryEntry) {
    println!("    Base class: {}", plugin.metadata.base_class_type);
    println!("    Library: {}", plugin.library);
    if !plugin.metadata.description.is_empty() {
        println!("    Description: {}", plugin.metadata.description);
    }
    match &plugin.manifest_path {
        Some(path) => println!("    Manifest: {}", path.display()),
        None => println!("    Manifest: built-in"),
    }
    if let Some(last_loaded) = plugin.last_loaded {
        println!("    Loaded at: {}", last_loaded.to_rfc3339());
    }
}
