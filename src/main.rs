mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod export;
mod render;
mod state;
mod ui;

use std::process::ExitCode;

use clap::Parser;

use chart::PowerChart;
use config::{Cli, Config};
use error::Error;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Load → derive → render, once. The first error ends the run.
fn run(cli: Cli) -> Result<(), Error> {
    let config = Config::from_cli(cli)?;

    let series = data::load_power_series(&config.file_path, &config.columns)?;
    if let Some(path) = &config.export {
        export::write_series_csv(&series, path)?;
    }

    let chart = PowerChart::solar_power(&series);
    render::draw(chart, &config)?;
    Ok(())
}
