//! Model and texture importers.
//!
//! Importers feed geometry into any [`MeshBuilder`](crate::mesh::MeshBuilder)
//! and report failures through [`ImportError`]; they never panic on malformed
//! input.

mod md2;
mod obj;

pub use md2::{load_md2, load_model, load_pcx};
pub use obj::load_obj;

use thiserror::Error;

use crate::texture::TextureError;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("not an MD2 file: magic {magic:#010x}, version {version}")]
    BadMd2Header { magic: i32, version: i32 },

    #[error("file truncated: wanted {wanted} bytes at offset {offset}, have {available}")]
    Truncated {
        offset: usize,
        wanted: usize,
        available: usize,
    },

    #[error(
        "unsupported PCX variant: version {version}, {bits_per_pixel} bpp, \
         encoding {encoding}, {planes} plane(s)"
    )]
    UnsupportedPcx {
        version: u8,
        bits_per_pixel: u8,
        encoding: u8,
        planes: u8,
    },

    #[error("PCX image is {got} texels, larger than the expected {expected}")]
    PcxTooLarge { expected: usize, got: usize },

    #[error("PCX header declares implausible dimensions {width}x{height}")]
    BadPcxDimensions { width: i32, height: i32 },

    #[error("PCX palette marker missing at end of file")]
    MissingPcxPalette,

    #[error(transparent)]
    Obj(#[from] tobj::LoadError),

    #[error(transparent)]
    Texture(#[from] TextureError),
}

pub type Result<T> = std::result::Result<T, ImportError>;
