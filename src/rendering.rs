//! Raster canvas: line drawing and PNG output.
//!
//! The pipeline only talks to the [`Canvas`] trait, so the numeric core can be
//! exercised against a recording canvas without touching the image encoder.

use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, Luma, Rgb};

use crate::mapping::Segment;
use crate::params::Palette;
use crate::PlotError;

/// Drawing surface used by the pipeline
pub trait Canvas {
    /// Canvas size in pixels (width, height)
    fn dimensions(&self) -> (u32, u32);

    /// Straight line between two pixels, both ends inclusive
    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb<u8>);

    /// Vertical line within one column
    fn draw_segment(&mut self, segment: Segment, color: Rgb<u8>) {
        self.draw_line(
            (segment.x, segment.from_y),
            (segment.x, segment.to_y),
            color,
        );
    }
}

/// Palette-indexed canvas, encoded as an indexed-colour PNG.
///
/// Pixels hold an index into the colour table; index 0 is the background.
pub struct ImageCanvas {
    indices: GrayImage,
    colors: Vec<Rgb<u8>>,
}

type Point = (i64, i64);

impl ImageCanvas {
    /// PNG palettes hold at most 256 entries
    pub const MAX_COLORS: usize = 256;

    /// Canvas filled with the palette background, every palette colour allocated
    pub fn new(width: u32, height: u32, palette: &Palette) -> Self {
        Self {
            indices: GrayImage::new(width, height),
            colors: palette.colors(),
        }
    }

    /// Allocated colours, in table order
    pub fn colors(&self) -> &[Rgb<u8>] {
        &self.colors
    }

    /// Colour at (x, y), `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.indices
            .get_pixel_checked(x, y)
            .map(|index| self.colors[index.0[0] as usize])
    }

    /// Table index of `color`, allocating it on first use
    fn color_index(&mut self, color: Rgb<u8>) -> Option<u8> {
        if let Some(index) = self.colors.iter().position(|c| *c == color) {
            return Some(index as u8);
        }
        if self.colors.len() >= Self::MAX_COLORS {
            log::warn!("Colour table full, dropping line in {:?}", color);
            return None;
        }
        self.colors.push(color);
        Some((self.colors.len() - 1) as u8)
    }

    /// Clip a line to the image rectangle.
    ///
    /// Axis-aligned lines are clipped exactly; other lines use Liang-Barsky
    /// with endpoints rounded to the nearest pixel.
    fn clip(&self, from: Point, to: Point) -> Option<(Point, Point)> {
        let (width, height) = self.indices.dimensions();
        if width == 0 || height == 0 {
            return None;
        }
        let (max_x, max_y) = (i64::from(width) - 1, i64::from(height) - 1);
        let inside = |(x, y): Point| (0..=max_x).contains(&x) && (0..=max_y).contains(&y);

        if inside(from) && inside(to) {
            return Some((from, to));
        }

        if from.0 == to.0 {
            let x = from.0;
            if !(0..=max_x).contains(&x) || from.1.max(to.1) < 0 || from.1.min(to.1) > max_y {
                return None;
            }
            return Some(((x, from.1.clamp(0, max_y)), (x, to.1.clamp(0, max_y))));
        }
        if from.1 == to.1 {
            let y = from.1;
            if !(0..=max_y).contains(&y) || from.0.max(to.0) < 0 || from.0.min(to.0) > max_x {
                return None;
            }
            return Some(((from.0.clamp(0, max_x), y), (to.0.clamp(0, max_x), y)));
        }

        let (x0, y0) = (from.0 as f64, from.1 as f64);
        let (dx, dy) = (to.0 as f64 - x0, to.1 as f64 - y0);
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        for (p, q) in [
            (-dx, x0),
            (dx, max_x as f64 - x0),
            (-dy, y0),
            (dy, max_y as f64 - y0),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        let point = |t: f64| {
            (
                ((x0 + t * dx).round() as i64).clamp(0, max_x),
                ((y0 + t * dy).round() as i64).clamp(0, max_y),
            )
        };
        Some((point(t0), point(t1)))
    }

    /// Encode the canvas as an indexed-colour PNG
    pub fn encode_png(&self) -> Result<Vec<u8>, PlotError> {
        let (width, height) = self.indices.dimensions();
        let palette: Vec<u8> = self.colors.iter().flat_map(|c| c.0).collect();

        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, width, height);
            encoder.set_color(png::ColorType::Indexed);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_palette(palette);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(self.indices.as_raw())?;
            writer.finish()?;
        }
        Ok(bytes)
    }

    /// Write the canvas to `path` as PNG.
    ///
    /// The image is encoded to a `.part` file next to `path` and renamed into
    /// place, so a failed write never leaves a truncated PNG behind.
    pub fn save(&self, path: &Path) -> Result<(), PlotError> {
        let bytes = self.encode_png()?;
        let partial = partial_path(path);
        let result = fs::write(&partial, &bytes)
            .and_then(|()| fs::rename(&partial, path))
            .map_err(PlotError::from);

        if result.is_err() {
            let _ = fs::remove_file(&partial);
        } else {
            log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        result
    }
}

impl Canvas for ImageCanvas {
    fn dimensions(&self) -> (u32, u32) {
        self.indices.dimensions()
    }

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb<u8>) {
        let Some(index) = self.color_index(color) else {
            return;
        };
        let from = (i64::from(from.0), i64::from(from.1));
        let to = (i64::from(to.0), i64::from(to.1));
        let Some(((mut x, mut y), to)) = self.clip(from, to) else {
            return;
        };

        // Bresenham, all octants
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let step_x = if x < to.0 { 1 } else { -1 };
        let step_y = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if let Some(pixel) = self.indices.get_pixel_mut_checked(x as u32, y as u32) {
                *pixel = Luma([index]);
            }
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += step_x;
            }
            if e2 <= dx {
                err += dx;
                y += step_y;
            }
        }
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}
