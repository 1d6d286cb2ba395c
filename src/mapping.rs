//! Sample and magnitude to pixel mapping.
//!
//! The plot height is divided into fifths. Components A, B and their sum get
//! baselines on the first three division rows; the spectrum grows upward from
//! the bottom of the plot area. Offsets are never clamped: a value larger than
//! its band draws into the neighbouring band, and the canvas clips anything that
//! leaves the image.

use crate::params::layout_constants::{
    BAND_DIVISIONS, SIGNAL_SCALE_DIVISOR, SPECTRUM_SCALE_DIVISOR,
};
use crate::params::RenderConfig;

/// How a band interprets values
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BandKind {
    /// Time-domain, offsets above and below the baseline
    Signed,
    /// Frequency-domain, single-sided bars above the floor
    Magnitude,
}

/// A horizontal strip of the plot with a fixed zero row
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    /// Pixel row of value 0
    pub baseline: i32,
    /// Pixels per unit value
    pub scale: f64,
    pub kind: BandKind,
}

impl Band {
    /// Offset from the baseline in pixels, positive is up.
    ///
    /// Truncates toward zero. Magnitude bands never go negative.
    pub fn offset(&self, value: f64) -> i32 {
        let pixels = (value * self.scale) as i32;
        match self.kind {
            BandKind::Signed => pixels,
            BandKind::Magnitude => pixels.max(0),
        }
    }

    /// Image row for `value`, saturating at the `i32` range
    pub fn row(&self, value: f64) -> i32 {
        self.baseline.saturating_sub(self.offset(value))
    }
}

/// Vertical line in one pixel column
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub x: i32,
    pub from_y: i32,
    pub to_y: i32,
}

/// Connected-line accumulator for one time-domain band.
///
/// Each step draws from the previous offset to the new one, so consecutive
/// columns join into a continuous trace.
#[derive(Clone, Copy, Debug)]
pub struct Trace {
    band: Band,
    last_offset: i32,
}

impl Trace {
    pub fn new(band: Band) -> Self {
        Self {
            band,
            last_offset: 0,
        }
    }

    pub fn last_offset(&self) -> i32 {
        self.last_offset
    }

    /// Advance to `value` in column `x`
    pub fn step(&mut self, x: i32, value: f64) -> Segment {
        let offset = self.band.offset(value);
        let segment = Segment {
            x,
            from_y: self.band.baseline.saturating_sub(self.last_offset),
            to_y: self.band.baseline.saturating_sub(offset),
        };
        self.last_offset = offset;
        segment
    }
}

/// Pixel geometry of the whole plot
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotLayout {
    /// Leftmost plotted column
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
    /// Height shared by the bands (image height minus both borders)
    pub plot_height: i32,
    pub signal_a: Band,
    pub signal_b: Band,
    pub sum: Band,
    pub spectrum: Band,
}

impl PlotLayout {
    /// Layout for `config`, with the spectrum band normalized by `sample_count`
    pub fn new(config: &RenderConfig, sample_count: usize) -> Self {
        let width = config.width as i32;
        let height = config.height as i32;
        let border = config.border as i32;
        let plot_height = config.plot_height() as i32;

        let signal_scale = plot_height as f64 / SIGNAL_SCALE_DIVISOR;
        let signal_band = |row: i32| Band {
            baseline: (i64::from(plot_height) * i64::from(row) / i64::from(BAND_DIVISIONS)) as i32,
            scale: signal_scale,
            kind: BandKind::Signed,
        };

        // Magnitudes are divided by N before scaling
        let spectrum_scale = if sample_count == 0 {
            0.0
        } else {
            plot_height as f64 / SPECTRUM_SCALE_DIVISOR / sample_count as f64
        };

        Self {
            left: border,
            right: width - border,
            top: border,
            bottom: height - border,
            plot_height,
            signal_a: signal_band(1),
            signal_b: signal_band(2),
            sum: signal_band(3),
            spectrum: Band {
                baseline: plot_height,
                scale: spectrum_scale,
                kind: BandKind::Magnitude,
            },
        }
    }

    /// Image column of sample `index`
    pub fn column(&self, index: usize) -> i32 {
        self.left + index as i32
    }

    /// Baselines of the three time-domain bands, top to bottom
    pub fn baselines(&self) -> [i32; 3] {
        [
            self.signal_a.baseline,
            self.signal_b.baseline,
            self.sum.baseline,
        ]
    }

    /// Bar for spectrum bin `index` with modulus `magnitude`
    pub fn spectrum_bar(&self, index: usize, magnitude: f64) -> Segment {
        Segment {
            x: self.column(index),
            from_y: self.spectrum.baseline,
            to_y: self.spectrum.row(magnitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_layout() -> PlotLayout {
        let config = RenderConfig::default();
        PlotLayout::new(&config, config.sample_count())
    }

    #[test]
    fn test_default_band_rows() {
        let layout = default_layout();
        assert_eq!(layout.plot_height, 780);
        assert_eq!(layout.baselines(), [156, 312, 468]);
        assert_eq!(layout.spectrum.baseline, 780);
        assert_eq!((layout.left, layout.right), (10, 1270));
        assert_eq!((layout.top, layout.bottom), (10, 790));
        assert_eq!(layout.column(0), 10);
    }

    #[test]
    fn test_signed_offsets_keep_sign() {
        let band = default_layout().signal_a;
        // 780 / 16 = 48.75 pixels per unit
        assert_eq!(band.offset(1.0), 48);
        assert_eq!(band.offset(-1.0), -48);
        assert_eq!(band.offset(0.01), 0);
        assert_eq!(band.row(1.0), 156 - 48);
        assert_eq!(band.row(-1.25), 156 + 60);
    }

    #[test]
    fn test_magnitude_offsets_never_negative() {
        let layout = default_layout();
        let band = layout.spectrum;
        assert_eq!(band.offset(-5.0), 0);
        assert_eq!(band.offset(f64::NAN), 0);

        // 640 / 1260 * 390 = 198.1
        let bar = layout.spectrum_bar(24, 640.0);
        assert_eq!(bar.x, 34);
        assert_eq!(bar.from_y, 780);
        assert_eq!(bar.to_y, 780 - 198);
    }

    #[test]
    fn test_offsets_are_not_clamped() {
        let band = default_layout().signal_a;
        // Far outside the band, and above the top of the image
        assert_eq!(band.offset(10.0), 487);
        assert!(band.row(10.0) < 0);
    }

    #[test]
    fn test_extreme_values_saturate() {
        let band = default_layout().signal_a;
        assert_eq!(band.offset(1e12), i32::MAX);
        assert_eq!(band.row(1e12), 156 - i32::MAX);
        assert_eq!(band.row(-1e12), i32::MAX);

        let mut trace = Trace::new(default_layout().sum);
        let up = trace.step(10, f64::INFINITY);
        let down = trace.step(11, f64::NEG_INFINITY);
        assert_eq!(up.to_y, 468 - i32::MAX);
        assert_eq!(down.from_y, up.to_y);
        assert_eq!(down.to_y, i32::MAX);
    }

    #[test]
    fn test_tall_layout_does_not_overflow() {
        let config = RenderConfig {
            width: 84,
            height: i32::MAX as u32,
            ..RenderConfig::default()
        };
        let layout = PlotLayout::new(&config, config.sample_count());
        let plot_height = i64::from(layout.plot_height);
        assert_eq!(i64::from(layout.sum.baseline), plot_height * 3 / 5);
        assert!(layout.signal_a.baseline < layout.signal_b.baseline);
    }

    #[test]
    fn test_trace_connects_columns() {
        let mut trace = Trace::new(default_layout().sum);

        let first = trace.step(10, 1.0);
        assert_eq!(
            first,
            Segment {
                x: 10,
                from_y: 468,
                to_y: 420
            }
        );

        let second = trace.step(11, -1.0);
        assert_eq!(second.from_y, first.to_y);
        assert_eq!(second.to_y, 516);
        assert_eq!(trace.last_offset(), -48);
    }

    #[test]
    fn test_empty_plot_has_flat_spectrum_band() {
        let layout = PlotLayout::new(&RenderConfig::default(), 0);
        assert_eq!(layout.spectrum.scale, 0.0);
        assert_eq!(layout.spectrum.offset(100.0), 0);
    }
}
