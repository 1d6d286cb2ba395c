//! Command-line entry point.
//!
//! The plot takes no options: every parameter is a documented default in
//! [`PlotConfig`]. Only `--help` and `--version` are recognized.

use clap::Parser;

use crate::params::PlotConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "waveplot", version)]
#[command(
    about = "Plot a two-tone sine signal and its spectrum to PNG",
    long_about = "Plot a two-tone sine signal and its spectrum to PNG.\n\n\
                  Writes waveplot.png (1280x800) in the working directory and prints \
                  the magnitude of each spectrum bin."
)]
pub struct Args {}

impl Args {
    /// The fixed plot configuration
    pub fn to_config(&self) -> PlotConfig {
        PlotConfig::default()
    }
}
