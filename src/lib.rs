//! Waveplot library - composite sine synthesis, spectrum analysis and PNG plotting

pub mod cli;
pub mod error;
pub mod mapping;
pub mod params;
pub mod pipeline;
pub mod rendering;
pub mod signal;
pub mod spectrum;

pub use error::PlotError;
