//! Area command implementation

use crate::cli::utils;
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use tracing::info;

pub fn command() -> Command {
    Command::new("area")
        .about("Create a class instance and print its area")
        .arg(utils::config_arg())
        .arg(clap::arg!(<CLASS> "Lookup name or class type"))
        .arg(
            clap::Arg::new("SIDE_LENGTH")
                .help("Side length to initialize the shape with")
                .required(true)
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(f64)),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let class_name = matches
        .get_one::<String>("CLASS")
        .ok_or_else(|| anyhow!("Missing class name"))?;
    let side_length = *matches
        .get_one::<f64>("SIDE_LENGTH")
        .ok_or_else(|| anyhow!("Missing side length"))?;

    let app = utils::create_app(matches).await?;
    info!("Creating {} with side length {}", class_name, side_length);

    let polygon = app.create_polygon(class_name, side_length).await?;
    println!("{}", polygon.area()?);

    Ok(())
}
