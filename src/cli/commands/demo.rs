//! Demo command implementation

use crate::cli::utils;
use crate::utils::format_area;
use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("demo")
        .about("Load every configured class and print its area")
        .arg(utils::config_arg())
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let app = utils::create_app(matches).await?;

    for result in app.run_demo().await? {
        println!("{} area: {}", result.class_name, format_area(result.area));
    }

    Ok(())
}
