//! Composite sine signal synthesis.
//!
//! Two sine components are sampled at integer indices and summed. Samples can
//! be pulled one at a time (streaming draw) or collected into owned buffers.

use std::f64::consts::PI;

use crate::params::{WaveComponent, WaveConfig};

/// One time step of the composite signal
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveSample {
    pub a: f64,
    pub b: f64,
    pub sum: f64,
}

/// Buffered component and sum sequences, all of equal length
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Waveforms {
    pub component_a: Vec<f64>,
    pub component_b: Vec<f64>,
    pub sum: Vec<f64>,
}

impl Waveforms {
    /// Pre-zeroed buffers for `len` samples
    pub fn zeroed(len: usize) -> Self {
        Self {
            component_a: vec![0.0; len],
            component_b: vec![0.0; len],
            sum: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.sum.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sum.is_empty()
    }

    /// Store one sample at `index`
    pub fn set(&mut self, index: usize, sample: WaveSample) {
        self.component_a[index] = sample.a;
        self.component_b[index] = sample.b;
        self.sum[index] = sample.sum;
    }
}

/// Sine generator for the two-component signal
#[derive(Debug, Clone)]
pub struct SignalGenerator {
    a: WaveComponent,
    b: WaveComponent,
}

impl SignalGenerator {
    pub fn new(config: &WaveConfig) -> Self {
        Self {
            a: config.a,
            b: config.b,
        }
    }

    /// Sample the composite signal at integer index `x`
    pub fn sample_at(&self, x: usize) -> WaveSample {
        let a = component_value(&self.a, x);
        let b = component_value(&self.b, x);
        WaveSample { a, b, sum: a + b }
    }

    /// Iterate over the first `count` samples in order
    pub fn samples(&self, count: usize) -> impl Iterator<Item = WaveSample> + '_ {
        (0..count).map(move |x| self.sample_at(x))
    }

    /// Generate `count` samples into owned buffers
    pub fn generate(&self, count: usize) -> Waveforms {
        let mut waveforms = Waveforms::zeroed(count);
        for (x, sample) in self.samples(count).enumerate() {
            waveforms.set(x, sample);
        }
        waveforms
    }
}

fn component_value(wave: &WaveComponent, x: usize) -> f64 {
    wave.amplitude * (2.0 * PI * (x as f64 / wave.period_samples) + wave.phase_rad).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_generator() -> SignalGenerator {
        SignalGenerator::new(&WaveConfig::with_periods(8.0, 27.0))
    }

    #[test]
    fn test_buffer_length_and_origin() {
        let generator = SignalGenerator::new(&WaveConfig::for_sample_count(1260));
        for n in [2, 3, 64, 1260] {
            let waves = generator.generate(n);
            assert_eq!(waves.len(), n);
            assert_eq!(waves.component_a.len(), n);
            assert_eq!(waves.component_b.len(), n);
            assert_eq!(waves.component_a[0], 0.0);
        }
    }

    #[test]
    fn test_sum_is_elementwise_sum() {
        let waves = scenario_generator().generate(64);
        for x in 0..waves.len() {
            let expected = waves.component_a[x] + waves.component_b[x];
            assert!(
                (waves.sum[x] - expected).abs() < 1e-6,
                "sum mismatch at {}: {} vs {}",
                x,
                waves.sum[x],
                expected
            );
        }
    }

    #[test]
    fn test_quarter_amplitude_phase_shifted_overlay() {
        let generator = scenario_generator();
        let first = generator.sample_at(0);
        assert_eq!(first.a, 0.0);
        assert!((first.b - 0.25).abs() < 1e-12);
        assert!((first.sum - 0.25).abs() < 1e-12);

        // Quarter of a cycle into component A
        let quarter = generator.sample_at(2);
        assert!((quarter.a - 1.0).abs() < 1e-12);

        let peak = generator
            .samples(1000)
            .map(|s| s.b.abs())
            .fold(0.0_f64, f64::max);
        assert!(peak <= 0.25 + 1e-12);
    }

    #[test]
    fn test_streaming_matches_buffered() {
        let generator = scenario_generator();
        let waves = generator.generate(40);
        let streamed: Vec<f64> = generator.samples(40).map(|s| s.sum).collect();
        assert_eq!(streamed, waves.sum);
    }

    #[test]
    fn test_single_precision_rendering_agrees() {
        // Samples computed in f32 stay within a small tolerance of the f64 ones
        let config = WaveConfig::for_sample_count(1260);
        let generator = SignalGenerator::new(&config);
        let single = |wave: &WaveComponent, x: usize| -> f64 {
            let turns = x as f32 / wave.period_samples as f32;
            let angle = (turns as f64) * 2.0 * PI + wave.phase_rad;
            f64::from(wave.amplitude as f32 * angle.sin() as f32)
        };

        for (x, sample) in generator.samples(1260).enumerate() {
            let sum = single(&config.a, x) + single(&config.b, x);
            assert!(
                (sample.sum - sum).abs() < 1e-4,
                "precision drift at {}: {} vs {}",
                x,
                sample.sum,
                sum
            );
        }
    }

    #[test]
    fn test_degenerate_lengths() {
        let generator = scenario_generator();
        assert!(generator.generate(0).is_empty());

        let single = generator.generate(1);
        assert_eq!(single.len(), 1);
        assert!((single.sum[0] - 0.25).abs() < 1e-12);
    }
}
