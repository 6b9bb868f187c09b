//! Palette-indexed textures.
//!
//! Textures keep one index byte per texel plus a palette of up to 256 colors,
//! matching the 8-bit skins the importers produce. Sampling clamps both
//! coordinates into range instead of wrapping, so out-of-range UVs repeat the
//! border texel.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::color::Rgb;

/// Number of palette slots a texture always carries.
pub const PALETTE_SIZE: usize = 256;

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("palette holds {0} colors, the maximum is {PALETTE_SIZE}")]
    PaletteTooLarge(usize),
    #[error("index buffer holds {got} texels, {width}x{height} requires {expected}")]
    SizeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },
    #[error("image uses more than {PALETTE_SIZE} distinct colors")]
    TooManyColors,
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// A palette-indexed 2D texture.
#[derive(Debug)]
pub struct Texture {
    palette: Vec<Rgb>,
    indices: Vec<u8>,
    width: usize,
    height: usize,
}

impl Texture {
    /// Builds a texture from a palette and one index byte per texel.
    ///
    /// The palette may hold fewer than 256 entries; it is padded with black
    /// so every possible index byte stays in bounds.
    pub fn new(
        width: usize,
        height: usize,
        palette: Vec<Rgb>,
        indices: Vec<u8>,
    ) -> Result<Self, TextureError> {
        if palette.len() > PALETTE_SIZE {
            return Err(TextureError::PaletteTooLarge(palette.len()));
        }
        if indices.len() != width * height {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                expected: width * height,
                got: indices.len(),
            });
        }
        let mut palette = palette;
        palette.resize(PALETTE_SIZE, Rgb::BLACK);
        Ok(Self {
            palette,
            indices,
            width,
            height,
        })
    }

    /// A zero-sized texture that samples black everywhere.
    pub fn empty() -> Self {
        Self {
            palette: vec![Rgb::BLACK; PALETTE_SIZE],
            indices: Vec::new(),
            width: 0,
            height: 0,
        }
    }

    /// Loads and palettizes an image file (PNG, JPG, etc.).
    ///
    /// Fails with [`TextureError::TooManyColors`] when the image holds more
    /// than 256 distinct colors; indexed-color art is the expected input.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img = image::open(path)?.to_rgb8();
        let (width, height) = img.dimensions();

        let mut palette: Vec<Rgb> = Vec::new();
        let mut slots: HashMap<[u8; 3], u8> = HashMap::new();
        let mut indices = Vec::with_capacity((width * height) as usize);

        for pixel in img.pixels() {
            let key = pixel.0;
            let slot = match slots.get(&key) {
                Some(&slot) => slot,
                None => {
                    if palette.len() == PALETTE_SIZE {
                        return Err(TextureError::TooManyColors);
                    }
                    let slot = palette.len() as u8;
                    palette.push(Rgb::new(key[0], key[1], key[2]));
                    slots.insert(key, slot);
                    slot
                }
            };
            indices.push(slot);
        }

        Texture::new(width as usize, height as usize, palette, indices)
    }

    /// Samples the texel at (u, v), clamping both coordinates into range.
    ///
    /// An empty texture samples black.
    #[inline]
    pub fn sample(&self, u: i32, v: i32) -> Rgb {
        if self.indices.is_empty() {
            return Rgb::BLACK;
        }
        let u = u.clamp(0, self.width as i32 - 1) as usize;
        let v = v.clamp(0, self.height as i32 - 1) as usize;
        self.palette[self.indices[v * self.width + u] as usize]
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl Default for Texture {
    fn default() -> Self {
        Self::empty()
    }
}
