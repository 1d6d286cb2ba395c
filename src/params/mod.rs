//! Parameter definitions with units and documented defaults.
//!
//! All fixed numbers of the plot live here:
//! - Canvas geometry and colours
//! - Wave periods, amplitudes and phases
//! - Band layout divisors

mod render;
mod signal;

// Re-export all types
pub use render::{Palette, RenderConfig};
pub use signal::{WaveComponent, WaveConfig};

use crate::PlotError;

/// Everything the pipeline needs for one run
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub render: RenderConfig,
    pub wave: WaveConfig,
}

impl Default for PlotConfig {
    fn default() -> Self {
        let render = RenderConfig::default();
        let wave = WaveConfig::for_sample_count(render.sample_count());
        Self { render, wave }
    }
}

impl PlotConfig {
    /// Number of samples generated and analyzed
    pub fn sample_count(&self) -> usize {
        self.render.sample_count()
    }

    pub fn validate(&self) -> Result<(), PlotError> {
        self.render.validate()?;
        self.wave.validate()
    }
}

/// Band layout constants (compile-time)
pub mod layout_constants {
    /// The plot height is split into this many equal rows; the time-domain
    /// baselines sit on rows 1, 2 and 3
    pub const BAND_DIVISIONS: i32 = 5;

    /// Time-domain scale: a unit sample spans plot_height / 16 pixels
    pub const SIGNAL_SCALE_DIVISOR: f64 = 16.0;

    /// Spectrum scale: a normalized magnitude of 1 spans plot_height / 2 pixels
    pub const SPECTRUM_SCALE_DIVISOR: f64 = 2.0;

    /// Largest accepted image side (pixels)
    pub const MAX_DIMENSION: u32 = 1 << 15;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PlotConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sample_count(), 1260);
        assert_eq!(config.wave.a.period_samples, 52.0);
        assert_eq!(config.wave.b.period_samples, 15.0);
    }

    #[test]
    fn test_bad_wave_rejected() {
        let mut config = PlotConfig::default();
        config.wave.a.period_samples = 0.0;
        assert!(matches!(config.validate(), Err(PlotError::InvalidConfig(_))));
    }
}
