//! Sprite: a 2D grid of RGBA pixels.
//!
//! Sprites are both drawing sources and the engine's draw target. They can be
//! saved to and loaded from the raw `.spr` format:
//!
//! ```text
//! i32 width  (little-endian)
//! i32 height (little-endian)
//! width * height pixels, 4 bytes each: r g b a
//! ```

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{Pixel, SampleMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: i32,
    height: i32,
    mode: SampleMode,
    data: Vec<Pixel>,
}

impl Sprite {
    /// Creates a sprite filled with opaque black.
    ///
    /// Negative sizes are treated as zero.
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, Pixel::default())
    }

    pub fn filled(width: i32, height: i32, p: Pixel) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            mode: SampleMode::Normal,
            data: vec![p; (width as usize) * (height as usize)],
        }
    }

    /// Loads a sprite from a `.spr` file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NoFile(path.to_path_buf()));
        }
        let bytes = fs::read(path)?;
        Self::from_spr_bytes(&bytes)
    }

    /// Decodes `.spr` bytes.
    pub fn from_spr_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 8 {
            return Err(Error::InvalidSprite(format!("header too short: {} bytes", bytes.len())));
        }
        let width = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let height = i32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        if width < 0 || height < 0 {
            return Err(Error::InvalidSprite(format!("negative size: ({}, {})", width, height)));
        }

        let count = (width as usize) * (height as usize);
        let body = &bytes[8..];
        if body.len() < count * 4 {
            return Err(Error::InvalidSprite(format!(
                "expected {} pixels, found {}",
                count,
                body.len() / 4
            )));
        }

        let data = body
            .chunks_exact(4)
            .take(count)
            .map(|c| Pixel::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        Ok(Self {
            width,
            height,
            mode: SampleMode::Normal,
            data,
        })
    }

    /// Encodes the sprite as `.spr` bytes.
    pub fn to_spr_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + self.data.len() * 4);
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        for p in &self.data {
            out.extend_from_slice(&p.to_le_bytes());
        }
        out
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = fs::File::create(path)?;
        file.write_all(&self.to_spr_bytes())?;
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn sample_mode(&self) -> SampleMode {
        self.mode
    }

    #[inline]
    pub fn set_sample_mode(&mut self, mode: SampleMode) {
        self.mode = mode;
    }

    /// Pixels in row-major order.
    #[inline]
    pub fn data(&self) -> &[Pixel] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [Pixel] {
        &mut self.data
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// In `Normal` mode reads outside the sprite return [`Pixel::BLANK`];
    /// in `Periodic` mode they wrap.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Pixel {
        match self.mode {
            SampleMode::Normal => self.idx(x, y).map(|i| self.data[i]).unwrap_or(Pixel::BLANK),
            SampleMode::Periodic => {
                if self.width == 0 || self.height == 0 {
                    return Pixel::BLANK;
                }
                let wx = x.rem_euclid(self.width);
                let wy = y.rem_euclid(self.height);
                self.data[(wy as usize) * (self.width as usize) + (wx as usize)]
            }
        }
    }

    /// Sets the pixel at `(x, y)`; returns false when out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, p: Pixel) -> bool {
        match self.idx(x, y) {
            Some(i) => {
                self.data[i] = p;
                true
            }
            None => false,
        }
    }

    /// Samples with normalized coordinates in `[0, 1]`.
    pub fn sample(&self, u: f32, v: f32) -> Pixel {
        if self.width == 0 || self.height == 0 {
            return Pixel::BLANK;
        }
        let sx = ((u * self.width as f32) as i32).min(self.width - 1);
        let sy = ((v * self.height as f32) as i32).min(self.height - 1);
        self.get_pixel(sx, sy)
    }

    pub fn fill(&mut self, p: Pixel) {
        self.data.fill(p);
    }
}
