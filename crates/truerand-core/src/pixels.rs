//! Random RGB bitmaps.
//!
//! Three consecutive integers make one `(r, g, b)` pixel; pixels fill the
//! grid row by row, left to right.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::error::ArtifactError;
use crate::fetcher::Fetcher;
use crate::transport::Transport;

/// Colour channels per pixel.
pub const CHANNELS: usize = 3;

/// Width×height grid of RGB pixels stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<(u8, u8, u8)>,
}

impl PixelGrid {
    /// Number of integers needed to fill a `width`×`height` grid.
    ///
    /// Fails for empty grids and for grids too large to address.
    pub fn required_values(width: u32, height: u32) -> Result<usize, ArtifactError> {
        let needed = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(ArtifactError::TooLarge { width, height })?;
        if needed == 0 {
            return Err(ArtifactError::Dimensions {
                width,
                height,
                expected: 0,
                got: 0,
            });
        }
        Ok(needed)
    }

    /// Reshape a flat `[r, g, b, r, g, b, ...]` sequence into a grid.
    pub fn from_flat(flat: &[i64], width: u32, height: u32) -> Result<Self, ArtifactError> {
        let expected = Self::required_values(width, height)?;
        if flat.len() != expected {
            return Err(ArtifactError::Dimensions {
                width,
                height,
                expected,
                got: flat.len(),
            });
        }

        let channel = |index: usize| -> Result<u8, ArtifactError> {
            let value = flat[index];
            u8::try_from(value).map_err(|_| ArtifactError::ChannelOutOfRange { index, value })
        };

        let pixels = (0..flat.len())
            .step_by(CHANNELS)
            .map(|i| Ok((channel(i)?, channel(i + 1)?, channel(i + 2)?)))
            .collect::<Result<Vec<_>, ArtifactError>>()?;

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[(u8, u8, u8)] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[(u8, u8, u8)]> {
        self.pixels.chunks(self.width as usize)
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let (r, g, b) = self.pixels[y as usize * self.width as usize + x as usize];
            Rgb([r, g, b])
        })
    }

    /// Encode to `path`; the format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        self.to_rgb_image().save(path)?;
        log::info!(
            "wrote {}x{} image to {}",
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }
}

/// Fetch enough integers for a `width`×`height` image and save it to `path`.
///
/// Nothing is written if the fetch fails.
pub fn build_image<T: Transport>(
    fetcher: &Fetcher<T>,
    width: u32,
    height: u32,
    path: &Path,
) -> Result<PixelGrid, ArtifactError> {
    let needed = PixelGrid::required_values(width, height)?;
    let flat = fetcher.integers(needed, 0, u8::MAX as i64)?;
    let grid = PixelGrid::from_flat(&flat, width, height)?;
    grid.save(path)?;
    Ok(grid)
}
