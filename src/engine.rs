//! Frame orchestration.
//!
//! [`Pipeline`] runs one frame of the renderer: it pushes a mesh through the
//! transform, visibility, lighting and projection stages in order, then draws
//! every surviving face into a [`PixelSink`] in back-to-front order. The
//! pipeline owns no window and keeps no per-frame state of its own; everything
//! a frame needs arrives in a [`FrameInput`].
//!
//! [`DemoScript`] is the staged demonstration that exercises every draw mode:
//! a frame counter owned by the driving application from which the current
//! model transform and draw mode are derived.

use log::debug;

use crate::camera::Camera;
use crate::color::Rgb;
use crate::light::{AmbientLight, DirectionalLight, PointLight};
use crate::math::mat4::Mat4;
use crate::mesh::Mesh;
use crate::raster::{scanline, PixelSink};
use crate::vertex::Vertex;

/// How visible faces are painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawMode {
    /// Three sink lines per face, no fill.
    Wireframe,
    /// Sink polygon fill with one constant color.
    Solid(Rgb),
    /// Sink polygon fill with each face's lit color.
    SolidLit,
    /// Per-pixel scanline fill with each face's lit color.
    Flat,
    /// Scanline fill interpolating the three lit vertex colors.
    Gouraud,
    /// Scanline fill sampling the mesh texture with perspective correction.
    Textured,
}

/// Everything one frame needs from the driving application.
pub struct FrameInput<'a> {
    pub model_transform: Mat4,
    pub camera: &'a Camera,
    pub ambient_lights: &'a [AmbientLight],
    pub directional_lights: &'a [DirectionalLight],
    pub point_lights: &'a [PointLight],
    pub width: u32,
    pub height: u32,
}

/// The per-frame rendering pipeline.
pub struct Pipeline {
    focal_distance: f32,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            focal_distance: 1.0,
        }
    }

    /// A pipeline projecting with focal distance `d` instead of 1.
    pub fn with_focal_distance(d: f32) -> Self {
        Self { focal_distance: d }
    }

    pub fn focal_distance(&self) -> f32 {
        self.focal_distance
    }

    /// Runs one frame: transforms, lights and projects `mesh`, then draws it
    /// into `sink`.
    ///
    /// Stage order matters. Backfaces and lighting work on world-space
    /// positions, the depth sort needs view-space Z, and texturing needs the
    /// W each vertex had before the perspective divide, so the stages run
    /// strictly in sequence:
    ///
    /// 1. model transform (originals → transformed table)
    /// 2. backface marking against the camera's world position
    /// 3. vertex normal averaging
    /// 4. face lighting: ambient, directional, point
    /// 5. vertex lighting: ambient, directional, point
    /// 6. camera view transform
    /// 7. depth sort, furthest face first
    /// 8. perspective transform, dehomogenization, viewport transform
    /// 9. draw in sorted order, skipping culled faces
    pub fn render_frame<S: PixelSink>(
        &self,
        mesh: &mut Mesh,
        input: &FrameInput,
        mode: DrawMode,
        sink: &mut S,
    ) {
        mesh.apply_transform_to_local(&input.model_transform);
        mesh.mark_backfaces(input.camera);
        mesh.compute_vertex_normals();

        mesh.light_faces_ambient(input.ambient_lights);
        mesh.light_faces_directional(input.directional_lights);
        mesh.light_faces_point(input.point_lights);
        mesh.light_vertices_ambient(input.ambient_lights);
        mesh.light_vertices_directional(input.directional_lights);
        mesh.light_vertices_point(input.point_lights);

        mesh.apply_transform_to_transformed(&input.camera.view_matrix());
        mesh.sort_faces_by_depth();

        let aspect_ratio = input.width as f32 / input.height as f32;
        mesh.apply_transform_to_transformed(&Mat4::perspective(self.focal_distance, aspect_ratio));
        mesh.dehomogenize();
        mesh.apply_transform_to_transformed(&Mat4::viewport(
            self.focal_distance,
            input.width,
            input.height,
        ));

        let culled = mesh.faces().iter().filter(|f| f.culled).count();
        debug!(
            "frame: {} faces, {} culled, mode {:?}",
            mesh.face_count(),
            culled,
            mode
        );

        self.draw(mesh, mode, sink);
    }

    fn draw<S: PixelSink>(&self, mesh: &Mesh, mode: DrawMode, sink: &mut S) {
        let vertices = mesh.transformed_vertices();

        for face in mesh.faces() {
            if face.culled {
                continue;
            }

            let corners = [
                vertices[face.indices[0]],
                vertices[face.indices[1]],
                vertices[face.indices[2]],
            ];

            match mode {
                DrawMode::Wireframe => {
                    for i in 0..3 {
                        let from = corners[i];
                        let to = corners[(i + 1) % 3];
                        sink.draw_line(
                            from.screen_x(),
                            from.screen_y(),
                            to.screen_x(),
                            to.screen_y(),
                            Rgb::WHITE,
                        );
                    }
                }
                DrawMode::Solid(color) => {
                    sink.fill_polygon(&corner_points(&corners), color);
                }
                DrawMode::SolidLit => {
                    sink.fill_polygon(&corner_points(&corners), face.color);
                }
                DrawMode::Flat => {
                    scanline::fill_triangle_flat(&corners, face.color, sink);
                }
                DrawMode::Gouraud => {
                    scanline::fill_triangle_gouraud(&corners, sink);
                }
                DrawMode::Textured => {
                    let mut textured = corners;
                    for (vertex, &uv_index) in textured.iter_mut().zip(&face.uv_indices) {
                        vertex.uv = mesh.uvs()[uv_index];
                        prime_perspective_terms(vertex);
                    }
                    scanline::fill_triangle_textured(&textured, mesh.texture(), sink);
                }
            }
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn corner_points(corners: &[Vertex; 3]) -> [(i32, i32); 3] {
    [
        (corners[0].screen_x(), corners[0].screen_y()),
        (corners[1].screen_x(), corners[1].screen_y()),
        (corners[2].screen_x(), corners[2].screen_y()),
    ]
}

/// Derives U/Z, V/Z and 1/Z from the vertex's UV and pre-projection depth.
///
/// UVs enter as truncated texel integers, matching the texel lookup the fill
/// performs after recovering them.
fn prime_perspective_terms(vertex: &mut Vertex) {
    let depth = vertex.pre_projection_z;
    vertex.u_over_z = vertex.uv.int_u() as f32 / depth;
    vertex.v_over_z = vertex.uv.int_v() as f32 / depth;
    vertex.z_reciprocal = 1.0 / depth;
}

/// The staged demonstration schedule as an explicit state object.
///
/// One `advance` call per rendered frame. The first 360 frames cycle the five
/// model transforms in wireframe (72 frames each: translation, scaling, X, Y
/// and Z rotation); the remaining phases rotate continuously about Y while
/// the draw mode steps through constant-color solid, lit solid, per-pixel
/// flat, Gouraud and textured fills. After the textured phase the script
/// wraps back to the start.
#[derive(Clone, Debug, PartialEq)]
pub struct DemoScript {
    frame: u32,
    angle_degrees: f32,
    translation: f32,
    scale: f32,
}

/// Frames per transform phase in the wireframe stage.
const TRANSFORM_PHASE_FRAMES: u32 = 72;
/// Last frame of the script before it wraps.
const LAST_FRAME: u32 = 779;

impl DemoScript {
    pub fn new() -> Self {
        Self {
            frame: 0,
            angle_degrees: 0.0,
            translation: 0.0,
            scale: 0.0,
        }
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Steps one frame, wrapping to the start after the final phase.
    pub fn advance(&mut self) {
        if self.frame >= LAST_FRAME {
            *self = Self::new();
            return;
        }
        self.frame += 1;
        self.angle_degrees += 1.0;
        self.translation += 1.0;
        self.scale += 0.01;
    }

    /// The model transform for the current frame.
    pub fn model_transform(&self) -> Mat4 {
        let radians = self.angle_degrees.to_radians();
        match self.frame {
            f if f <= TRANSFORM_PHASE_FRAMES => {
                Mat4::translation(self.translation, self.translation, self.translation)
            }
            f if f <= 2 * TRANSFORM_PHASE_FRAMES => {
                Mat4::scaling(self.scale, self.scale, self.scale)
            }
            f if f <= 3 * TRANSFORM_PHASE_FRAMES => Mat4::rotation_x(radians),
            f if f <= 4 * TRANSFORM_PHASE_FRAMES => Mat4::rotation_y(radians),
            f if f <= 5 * TRANSFORM_PHASE_FRAMES => Mat4::rotation_z(radians),
            _ => Mat4::rotation_y(radians),
        }
    }

    /// The draw mode for the current frame.
    pub fn draw_mode(&self) -> DrawMode {
        match self.frame {
            0..=360 => DrawMode::Wireframe,
            361..=480 => DrawMode::Solid(Rgb::CYAN),
            481..=600 => DrawMode::SolidLit,
            601..=660 => DrawMode::Flat,
            661..=720 => DrawMode::Gouraud,
            _ => DrawMode::Textured,
        }
    }
}

impl Default for DemoScript {
    fn default() -> Self {
        Self::new()
    }
}
