//! Plot pipeline: synthesis, time-domain traces, spectrum, spectrum bars.
//!
//! Stages run strictly in order on the calling thread. Waveform columns are
//! drawn as each sample is generated; the spectrum is computed once the sum
//! buffer is complete.

use std::io::Write;

use crate::mapping::{PlotLayout, Trace};
use crate::params::PlotConfig;
use crate::rendering::Canvas;
use crate::signal::{SignalGenerator, Waveforms};
use crate::spectrum::{Spectrum, SpectrumAnalyzer};
use crate::PlotError;

/// Buffers produced by one run
#[derive(Debug, Clone)]
pub struct PlotRun {
    pub waveforms: Waveforms,
    pub spectrum: Spectrum,
}

impl PlotRun {
    /// Magnitudes of the bins that were plotted (below the mirror point)
    pub fn plotted_magnitudes(&self) -> Vec<f64> {
        (0..self.spectrum.unique_bins())
            .map(|k| self.spectrum.magnitude(k))
            .collect()
    }
}

/// Configured generator, analyzer and layout for one plot
pub struct Pipeline {
    config: PlotConfig,
    layout: PlotLayout,
    generator: SignalGenerator,
    analyzer: SpectrumAnalyzer,
}

impl Pipeline {
    /// Validate `config` and plan every stage
    pub fn new(config: PlotConfig) -> Result<Self, PlotError> {
        config.validate()?;

        let sample_count = config.sample_count();
        let layout = PlotLayout::new(&config.render, sample_count);
        let generator = SignalGenerator::new(&config.wave);
        let analyzer = SpectrumAnalyzer::new(sample_count);

        log::info!(
            "Pipeline ready: {} samples, periods {} / {}",
            sample_count,
            config.wave.a.period_samples,
            config.wave.b.period_samples
        );

        Ok(Self {
            config,
            layout,
            generator,
            analyzer,
        })
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn layout(&self) -> &PlotLayout {
        &self.layout
    }

    /// Draw the full plot onto `canvas`, writing per-bin rows to `out`
    pub fn run<C: Canvas, W: Write>(
        &self,
        canvas: &mut C,
        out: &mut W,
    ) -> Result<PlotRun, PlotError> {
        let expected = (self.config.render.width, self.config.render.height);
        if canvas.dimensions() != expected {
            return Err(PlotError::InvalidInput(format!(
                "canvas is {:?}, config expects {:?}",
                canvas.dimensions(),
                expected
            )));
        }

        self.draw_frame(canvas);
        let waveforms = self.draw_waveforms(canvas);

        let spectrum = self.analyzer.analyze(&waveforms.sum)?;
        self.draw_spectrum(canvas, &spectrum, out)?;

        Ok(PlotRun {
            waveforms,
            spectrum,
        })
    }

    /// Border rectangle and the three time-domain baselines
    fn draw_frame<C: Canvas>(&self, canvas: &mut C) {
        let palette = &self.config.render.palette;
        let l = &self.layout;

        canvas.draw_line((l.left, l.top), (l.right, l.top), palette.border);
        canvas.draw_line((l.right, l.top), (l.right, l.bottom), palette.border);
        canvas.draw_line((l.right, l.bottom), (l.left, l.bottom), palette.border);
        canvas.draw_line((l.left, l.bottom), (l.left, l.top), palette.border);

        for baseline in l.baselines() {
            canvas.draw_line((l.left, baseline), (l.right, baseline), palette.grid);
        }
    }

    fn draw_waveforms<C: Canvas>(&self, canvas: &mut C) -> Waveforms {
        let palette = &self.config.render.palette;
        let sample_count = self.config.sample_count();

        let mut waveforms = Waveforms::zeroed(sample_count);
        let mut traces = [
            (Trace::new(self.layout.signal_a), palette.signal_a),
            (Trace::new(self.layout.signal_b), palette.signal_b),
            (Trace::new(self.layout.sum), palette.sum),
        ];

        for (x, sample) in self.generator.samples(sample_count).enumerate() {
            let column = self.layout.column(x);
            let values = [sample.a, sample.b, sample.sum];
            for ((trace, color), value) in traces.iter_mut().zip(values) {
                canvas.draw_segment(trace.step(column, value), *color);
            }
            waveforms.set(x, sample);
        }

        log::info!("Generated {} samples", sample_count);
        waveforms
    }

    /// One bar per bin below the mirror point
    fn draw_spectrum<C: Canvas, W: Write>(
        &self,
        canvas: &mut C,
        spectrum: &Spectrum,
        out: &mut W,
    ) -> Result<(), PlotError> {
        let color = self.config.render.palette.spectrum;

        for k in 0..spectrum.unique_bins() {
            let magnitude = spectrum.magnitude(k);
            writeln!(out, "{:2} {:11.7}", k, magnitude)?;
            canvas.draw_segment(self.layout.spectrum_bar(k, magnitude), color);
        }

        log::info!(
            "Plotted {} of {} spectrum bins",
            spectrum.unique_bins(),
            spectrum.len()
        );
        Ok(())
    }
}
