//! A CPU-based painter's-algorithm 3D renderer.
//!
//! The crate transforms indexed triangle meshes through model, camera,
//! perspective and viewport stages, lights them per face and per vertex, and
//! scan-converts the depth-sorted result into any [`raster::PixelSink`]. It
//! owns no window and no event loop; callers supply a [`engine::FrameInput`]
//! per frame and present the sink however they like.
//!
//! # Quick Start
//!
//! ```no_run
//! use painterly::prelude::*;
//!
//! # fn main() -> Result<(), painterly::import::ImportError> {
//! let mut mesh = painterly::import::load_model("marvin.md2", None)?;
//! let camera = Camera::new(0.0, 0.0, 0.0, Vertex::point(0.0, 0.0, -50.0));
//! let mut sink = BufferSink::new(800, 600);
//!
//! let ambient = [AmbientLight::new(32.0, 32.0, 32.0)];
//! let input = FrameInput {
//!     model_transform: Mat4::identity(),
//!     camera: &camera,
//!     ambient_lights: &ambient,
//!     directional_lights: &[],
//!     point_lights: &[],
//!     width: 800,
//!     height: 600,
//! };
//! Pipeline::new().render_frame(&mut mesh, &input, DrawMode::Flat, &mut sink);
//! # Ok(())
//! # }
//! ```

pub mod camera;
pub mod color;
pub mod engine;
pub mod face;
pub mod import;
pub mod light;
pub mod math;
pub mod mesh;
pub mod raster;
pub mod texture;
pub mod vertex;

pub use engine::{DemoScript, DrawMode, FrameInput, Pipeline};
pub use mesh::{Mesh, MeshBuilder};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::color::Rgb;
    pub use crate::engine::{DemoScript, DrawMode, FrameInput, Pipeline};
    pub use crate::light::{AmbientLight, Attenuation, DirectionalLight, PointLight};
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec3::Vec3;
    pub use crate::mesh::{Mesh, MeshBuilder};
    pub use crate::raster::{BufferSink, PixelSink};
    pub use crate::texture::Texture;
    pub use crate::vertex::{UvCoord, Vertex};
}
