//! Quake II MD2 model and PCX skin import.
//!
//! MD2 stores indexed triangles, texel-unit texture coordinates and packed
//! per-frame vertices; only the first animation frame is read. The companion
//! skin is an 8-bit run-length-encoded PCX with a 256-color palette at the
//! end of the file, which maps directly onto [`Texture`].

use std::path::Path;

use log::info;

use crate::color::Rgb;
use crate::mesh::{Mesh, MeshBuilder};
use crate::texture::{Texture, PALETTE_SIZE};

use super::{ImportError, Result};

/// "IDP2" little-endian.
const MD2_MAGIC: i32 = 844121161;
const MD2_VERSION: i32 = 8;

/// Little-endian cursor over a byte buffer.
///
/// Every read is bounds-checked and reports the offset it failed at, so a
/// truncated file turns into a diagnosable error instead of a panic.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let available = self.bytes.len().saturating_sub(self.pos);
        if n > available {
            return Err(ImportError::Truncated {
                offset: self.pos,
                wanted: n,
                available,
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn i16(&mut self) -> Result<i16> {
        let b = self.take(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    fn i32(&mut self) -> Result<i32> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn f32(&mut self) -> Result<f32> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

struct Md2Header {
    skin_width: i32,
    skin_height: i32,
    num_vertices: i32,
    num_tex_coords: i32,
    num_triangles: i32,
    offset_tex_coords: i32,
    offset_triangles: i32,
    offset_frames: i32,
}

fn parse_header(reader: &mut Reader) -> Result<Md2Header> {
    let magic = reader.i32()?;
    let version = reader.i32()?;
    if magic != MD2_MAGIC || version != MD2_VERSION {
        return Err(ImportError::BadMd2Header { magic, version });
    }

    let skin_width = reader.i32()?;
    let skin_height = reader.i32()?;
    let _frame_size = reader.i32()?;
    let _num_skins = reader.i32()?;
    let num_vertices = reader.i32()?;
    let num_tex_coords = reader.i32()?;
    let num_triangles = reader.i32()?;
    let _num_gl_commands = reader.i32()?;
    let _num_frames = reader.i32()?;
    let _offset_skins = reader.i32()?;
    let offset_tex_coords = reader.i32()?;
    let offset_triangles = reader.i32()?;
    let offset_frames = reader.i32()?;

    Ok(Md2Header {
        skin_width,
        skin_height,
        num_vertices,
        num_tex_coords,
        num_triangles,
        offset_tex_coords,
        offset_triangles,
        offset_frames,
    })
}

fn parse_md2<B: MeshBuilder>(bytes: &[u8], builder: &mut B) -> Result<(usize, usize)> {
    let mut reader = Reader::new(bytes);
    let header = parse_header(&mut reader)?;

    // Faces first, then vertices, then UVs: the order the mesh contract
    // expects from importers.
    reader.seek(header.offset_triangles as usize);
    for _ in 0..header.num_triangles {
        let v = [reader.i16()?, reader.i16()?, reader.i16()?];
        let uv = [reader.i16()?, reader.i16()?, reader.i16()?];
        builder.add_face(
            v[0] as usize,
            v[1] as usize,
            v[2] as usize,
            uv[0] as usize,
            uv[1] as usize,
            uv[2] as usize,
        );
    }

    // First frame only: scale and translate triples, a 16-byte name, then
    // one packed byte triple + normal index per vertex.
    reader.seek(header.offset_frames as usize);
    let scale = [reader.f32()?, reader.f32()?, reader.f32()?];
    let translate = [reader.f32()?, reader.f32()?, reader.f32()?];
    reader.take(16)?;
    for _ in 0..header.num_vertices {
        let packed = reader.take(4)?;
        // MD2 has Z up; swap Y and Z to make Y the up axis.
        builder.add_vertex(
            packed[0] as f32 * scale[0] + translate[0],
            packed[2] as f32 * scale[2] + translate[2],
            packed[1] as f32 * scale[1] + translate[1],
        );
    }

    reader.seek(header.offset_tex_coords as usize);
    for _ in 0..header.num_tex_coords {
        let u = reader.i16()?;
        let v = reader.i16()?;
        builder.add_uv(u as f32, v as f32);
    }

    info!(
        "md2: {} triangles, {} vertices, {} texcoords, skin {}x{}",
        header.num_triangles,
        header.num_vertices,
        header.num_tex_coords,
        header.skin_width,
        header.skin_height
    );

    Ok((header.skin_width as usize, header.skin_height as usize))
}

/// Loads the first frame of an MD2 model into `builder`.
///
/// Faces are added first, then vertices, then texture coordinates in texel
/// units. Returns the skin dimensions the header declares, suitable as the
/// expected size for [`load_pcx`].
pub fn load_md2<B: MeshBuilder>(path: impl AsRef<Path>, builder: &mut B) -> Result<(usize, usize)> {
    let bytes = std::fs::read(path)?;
    parse_md2(&bytes, builder)
}

fn parse_pcx(bytes: &[u8], expected: Option<(usize, usize)>) -> Result<Texture> {
    let mut reader = Reader::new(bytes);

    let _id = reader.u8()?;
    let version = reader.u8()?;
    let encoding = reader.u8()?;
    let bits_per_pixel = reader.u8()?;
    let x_min = reader.i16()?;
    let y_min = reader.i16()?;
    let x_max = reader.i16()?;
    let y_max = reader.i16()?;
    reader.seek(65);
    let planes = reader.u8()?;

    if version != 5 || bits_per_pixel != 8 || encoding != 1 || planes != 1 {
        return Err(ImportError::UnsupportedPcx {
            version,
            bits_per_pixel,
            encoding,
            planes,
        });
    }

    // Widths are i16 fields; inverted or zero ranges would wrap to absurd
    // sizes, and no honest image holds more texels than its RLE data can
    // produce (at most 63 per run byte pair).
    let declared_width = x_max as i32 - x_min as i32 + 1;
    let declared_height = y_max as i32 - y_min as i32 + 1;
    let max_texels = bytes.len().saturating_sub(128).saturating_mul(63);
    if declared_width <= 0
        || declared_height <= 0
        || declared_width as usize * declared_height as usize > max_texels
    {
        return Err(ImportError::BadPcxDimensions {
            width: declared_width,
            height: declared_height,
        });
    }
    let image_width = declared_width as usize;
    let image_height = declared_height as usize;
    let image_size = image_width * image_height;

    // The MD2 skin size wins when given; the decoded image may legally be
    // smaller and fills a prefix of the buffer.
    let (width, height) = expected.unwrap_or((image_width, image_height));
    if image_size > width * height {
        return Err(ImportError::PcxTooLarge {
            expected: width * height,
            got: image_size,
        });
    }
    let mut indices = vec![0u8; width * height];

    // RLE: a byte with both top bits set is a run length; the next byte
    // repeats that many times. Anything else is a literal palette index.
    // Encoders pad runs to line ends, so the final run may claim more
    // texels than remain; the excess is dropped.
    reader.seek(128);
    let mut count = 0;
    while count < image_size {
        let byte = reader.u8()?;
        if byte & 0xC0 == 0xC0 {
            let run = ((byte & 0x3F) as usize).min(image_size - count);
            let color = reader.u8()?;
            for _ in 0..run {
                indices[count] = color;
                count += 1;
            }
        } else {
            indices[count] = byte;
            count += 1;
        }
    }

    // 768 palette bytes at the tail, preceded by a 0x0C marker.
    if bytes.len() < 769 || bytes[bytes.len() - 769] != 0x0C {
        return Err(ImportError::MissingPcxPalette);
    }
    let raw_palette = &bytes[bytes.len() - 768..];
    let palette: Vec<Rgb> = (0..PALETTE_SIZE)
        .map(|i| Rgb::new(raw_palette[i * 3], raw_palette[i * 3 + 1], raw_palette[i * 3 + 2]))
        .collect();

    info!("pcx: {image_width}x{image_height} decoded into {width}x{height} skin");

    Ok(Texture::new(width, height, palette, indices)?)
}

/// Decodes an 8-bit RLE PCX file into a [`Texture`].
///
/// `expected` sizes the index buffer (normally the MD2 skin dimensions); the
/// decoded image must fit within it. Without it the buffer takes the
/// dimensions from the PCX header.
pub fn load_pcx(path: impl AsRef<Path>, expected: Option<(usize, usize)>) -> Result<Texture> {
    let bytes = std::fs::read(path)?;
    parse_pcx(&bytes, expected)
}

/// Loads an MD2 model and, optionally, its PCX skin into a fresh [`Mesh`].
pub fn load_model(
    md2_path: impl AsRef<Path>,
    pcx_path: Option<&Path>,
) -> Result<Mesh> {
    let mut mesh = Mesh::new();
    let skin_size = load_md2(md2_path, &mut mesh)?;
    if let Some(path) = pcx_path {
        mesh.set_texture(load_pcx(path, Some(skin_size))?);
    }
    Ok(mesh)
}
