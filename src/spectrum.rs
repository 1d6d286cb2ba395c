//! Spectrum analysis of the summed signal.
//!
//! A forward FFT over the whole buffer, no windowing. The output keeps all N
//! bins; for real input only the first N/2 are distinct, the rest mirror them.

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use crate::PlotError;

/// Complex DFT output, one bin per input sample
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spectrum {
    bins: Vec<Complex<f64>>,
}

impl Spectrum {
    pub fn bins(&self) -> &[Complex<f64>] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Modulus of bin `k`
    pub fn magnitude(&self, k: usize) -> f64 {
        self.bins[k].norm()
    }

    /// Modulus of every bin, mirrored half included
    pub fn magnitudes(&self) -> Vec<f64> {
        self.bins.iter().map(|c| c.norm()).collect()
    }

    /// Number of bins below the mirror point (N/2)
    pub fn unique_bins(&self) -> usize {
        self.bins.len() / 2
    }
}

/// Forward FFT planned for a fixed buffer length
pub struct SpectrumAnalyzer {
    len: usize,
    /// `None` for zero-length buffers
    fft: Option<Arc<dyn Fft<f64>>>,
}

impl SpectrumAnalyzer {
    pub fn new(len: usize) -> Self {
        let fft = (len > 0).then(|| {
            let mut planner = FftPlanner::<f64>::new();
            planner.plan_fft_forward(len)
        });
        log::debug!("FFT planned for {} points", len);
        Self { len, fft }
    }

    /// Transform `samples` into N complex bins.
    ///
    /// Each call works on its own buffer, so the result depends only on the input.
    pub fn analyze(&self, samples: &[f64]) -> Result<Spectrum, PlotError> {
        if samples.len() != self.len {
            return Err(PlotError::InvalidInput(format!(
                "analyzer planned for {} samples, got {}",
                self.len,
                samples.len()
            )));
        }

        let mut buffer: Vec<Complex<f64>> =
            samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
        if let Some(fft) = &self.fft {
            fft.process(&mut buffer);
        }

        Ok(Spectrum { bins: buffer })
    }
}
