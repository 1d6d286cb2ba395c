//! Composite signal parameters.

use std::f64::consts::FRAC_PI_2;

use crate::PlotError;

/// One sine component of the composite signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveComponent {
    /// Length of one cycle (samples per cycle)
    pub period_samples: f64,

    /// Peak amplitude (dimensionless, 1.0 = full scale)
    pub amplitude: f64,

    /// Phase offset at sample 0 (radians)
    pub phase_rad: f64,
}

impl WaveComponent {
    pub fn validate(&self, name: &str) -> Result<(), PlotError> {
        if !(self.period_samples.is_finite() && self.period_samples > 0.0) {
            return Err(PlotError::InvalidConfig(format!(
                "{} period must be a positive number of samples, got {}",
                name, self.period_samples
            )));
        }
        if !self.amplitude.is_finite() || !self.phase_rad.is_finite() {
            return Err(PlotError::InvalidConfig(format!(
                "{} amplitude and phase must be finite",
                name
            )));
        }
        Ok(())
    }
}

/// Two-component wave definition
#[derive(Debug, Clone, PartialEq)]
pub struct WaveConfig {
    /// Carrier: full amplitude, no phase offset
    pub a: WaveComponent,

    /// Overlay: quarter amplitude, quarter-turn phase offset
    pub b: WaveComponent,
}

impl WaveConfig {
    /// Cycles of component A across the whole plot width
    pub const CYCLES_A: usize = 24;

    /// Cycles of component B across the whole plot width
    pub const CYCLES_B: usize = 83;

    /// Default waves for a plot of `sample_count` samples.
    ///
    /// Periods are whole samples (integer division), so 1260 samples give
    /// periods of 52 and 15.
    pub fn for_sample_count(sample_count: usize) -> Self {
        Self::with_periods(
            (sample_count / Self::CYCLES_A) as f64,
            (sample_count / Self::CYCLES_B) as f64,
        )
    }

    /// Default amplitudes and phases with explicit periods
    pub fn with_periods(period_a: f64, period_b: f64) -> Self {
        Self {
            a: WaveComponent {
                period_samples: period_a,
                amplitude: 1.0,
                phase_rad: 0.0,
            },
            b: WaveComponent {
                period_samples: period_b,
                amplitude: 0.25,
                phase_rad: FRAC_PI_2,
            },
        }
    }

    pub fn validate(&self) -> Result<(), PlotError> {
        self.a.validate("component A")?;
        self.b.validate("component B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_follow_plot_width() {
        let waves = WaveConfig::for_sample_count(1260);
        assert_eq!(waves.a.period_samples, 52.0);
        assert_eq!(waves.b.period_samples, 15.0);
        assert_eq!(waves.b.amplitude, 0.25);
        assert_eq!(waves.b.phase_rad, FRAC_PI_2);
    }

    #[test]
    fn test_zero_period_rejected() {
        // 40 / 83 truncates to a zero-sample period
        let waves = WaveConfig::for_sample_count(40);
        assert!(matches!(waves.validate(), Err(PlotError::InvalidConfig(_))));

        let waves = WaveConfig::with_periods(8.0, -3.0);
        assert!(waves.validate().is_err());

        let waves = WaveConfig::with_periods(f64::NAN, 3.0);
        assert!(waves.validate().is_err());
    }
}
