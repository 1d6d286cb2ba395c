//! Canvas and output configuration.

use std::path::PathBuf;

use image::Rgb;

use super::layout_constants::MAX_DIMENSION;
use crate::PlotError;

/// Colours used for every element of the plot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Rgb<u8>,
    pub border: Rgb<u8>,
    /// Zero baselines of the time-domain bands
    pub grid: Rgb<u8>,
    pub signal_a: Rgb<u8>,
    pub signal_b: Rgb<u8>,
    pub sum: Rgb<u8>,
    pub spectrum: Rgb<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        let blue = Rgb([0, 0, 255]);
        let red = Rgb([255, 0, 0]);
        Self {
            background: Rgb([0xcc, 0xcc, 0xcc]),
            border: blue,
            grid: Rgb([0, 0, 0]),
            signal_a: blue,
            signal_b: Rgb([0, 255, 0]),
            sum: red,
            spectrum: red,
        }
    }
}

impl Palette {
    /// Distinct colours in allocation order, background first
    pub fn colors(&self) -> Vec<Rgb<u8>> {
        let mut colors = Vec::new();
        for color in [
            self.background,
            self.border,
            self.grid,
            self.signal_a,
            self.signal_b,
            self.sum,
            self.spectrum,
        ] {
            if !colors.contains(&color) {
                colors.push(color);
            }
        }
        colors
    }
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image width (pixels)
    pub width: u32,

    /// Image height (pixels)
    pub height: u32,

    /// Margin between the image edge and the border frame (pixels)
    pub border: u32,

    /// Where the PNG ends up
    pub output_path: PathBuf,

    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            border: 10,
            output_path: PathBuf::from("waveplot.png"),
            palette: Palette::default(),
        }
    }
}

impl RenderConfig {
    /// Number of samples plotted, one per pixel column inside the border
    pub fn sample_count(&self) -> usize {
        self.width.saturating_sub(self.border.saturating_mul(2)) as usize
    }

    /// Height available to the bands (pixels)
    pub fn plot_height(&self) -> u32 {
        self.height.saturating_sub(self.border.saturating_mul(2))
    }

    pub fn validate(&self) -> Result<(), PlotError> {
        let frame = self.border.checked_mul(2).ok_or_else(|| {
            PlotError::InvalidConfig(format!("border {} is too wide", self.border))
        })?;
        if self.width <= frame || self.height <= frame {
            return Err(PlotError::InvalidConfig(format!(
                "{}x{} image leaves no room inside a {}px border",
                self.width, self.height, self.border
            )));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(PlotError::InvalidConfig(format!(
                "{}x{} image exceeds {}px per side",
                self.width, self.height, MAX_DIMENSION
            )));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(PlotError::InvalidConfig("output path is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let config = RenderConfig::default();
        assert_eq!(config.sample_count(), 1260);
        assert_eq!(config.plot_height(), 780);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_palette_colors_are_distinct() {
        let colors = Palette::default().colors();
        // grey, blue, black, green, red
        assert_eq!(colors.len(), 5);
        assert_eq!(colors[0], Rgb([0xcc, 0xcc, 0xcc]));
        assert_eq!(colors[1], Rgb([0, 0, 255]));
    }

    #[test]
    fn test_border_must_leave_room() {
        let config = RenderConfig {
            width: 20,
            ..RenderConfig::default()
        };
        assert_eq!(config.sample_count(), 0);
        assert!(matches!(config.validate(), Err(PlotError::InvalidConfig(_))));

        let config = RenderConfig {
            border: u32::MAX,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_image_rejected() {
        let config = RenderConfig {
            width: 84,
            height: 1_000_000_000,
            ..RenderConfig::default()
        };
        assert!(matches!(config.validate(), Err(PlotError::InvalidConfig(_))));

        let config = RenderConfig {
            width: 84,
            height: MAX_DIMENSION,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_output_path_rejected() {
        let config = RenderConfig {
            output_path: PathBuf::new(),
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
