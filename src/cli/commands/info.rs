//! Info command implementation

use anyhow::Result;
use clap::{ArgMatches, Command};

use crate::plugin::BuiltinPluginLoader;

pub fn command() -> Command {
    Command::new("info").about("Show tool information").arg(
        clap::Arg::new("detailed")
            .short('d')
            .long("detailed")
            .help("Show detailed information")
            .action(clap::ArgAction::SetTrue),
    )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let detailed = matches.get_flag("detailed");

    println!("Polygon Plugins - regular polygon plugin host");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Base class: {}", polygon_base::BASE_CLASS_TYPE);

    if detailed {
        println!("\nBuilt-in classes:");
        for class_type in BuiltinPluginLoader::builtin_class_types() {
            println!("  - {}", class_type);
        }
        println!("\nPlugin manifests are discovered as plugin.yaml / plugin.yml");
        println!("files under the configured plugin directories.");
    }

    Ok(())
}
