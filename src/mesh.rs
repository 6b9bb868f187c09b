//! Triangle mesh storage and the per-frame pipeline operations.
//!
//! A [`Mesh`] keeps two vertex tables: the original positions as imported,
//! which per-frame work never mutates, and a transformed table the model
//! transform rebuilds at the start of every frame. All later stages (backface
//! marking, normal averaging, lighting, camera/projection transforms,
//! dehomogenization) operate on the transformed table only, so a mesh can be
//! re-rendered from scratch each frame.
//!
//! Importers populate a mesh through the [`MeshBuilder`] capability trait
//! rather than touching the tables directly.

use crate::camera::Camera;
use crate::color::{clamp_channel, Rgb};
use crate::face::Face;
use crate::light::{AmbientLight, DirectionalLight, PointLight};
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::texture::Texture;
use crate::vertex::{UvCoord, Vertex};

/// Receiver interface for model importers.
///
/// Indices passed to `add_face` refer to the final vertex and UV tables;
/// importers may emit faces before the vertices they reference.
pub trait MeshBuilder {
    /// Appends a vertex at (x, y, z) with w = 1.
    fn add_vertex(&mut self, x: f32, y: f32, z: f32);
    /// Appends a face from three vertex indices and three UV indices.
    fn add_face(&mut self, i0: usize, i1: usize, i2: usize, uv0: usize, uv1: usize, uv2: usize);
    /// Appends a texture coordinate pair in texel units.
    fn add_uv(&mut self, u: f32, v: f32);
}

/// An indexed triangle mesh plus its surface appearance.
pub struct Mesh {
    vertices: Vec<Vertex>,
    transformed: Vec<Vertex>,
    faces: Vec<Face>,
    uvs: Vec<UvCoord>,
    texture: Texture,
    ambient_reflectance: [f32; 3],
    diffuse_reflectance: [f32; 3],
    specular_reflectance: [f32; 3],
}

impl Mesh {
    /// An empty mesh with the default reflectances (ka 0.2, kd 0.5, ks 1.0).
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            transformed: Vec::new(),
            faces: Vec::new(),
            uvs: Vec::new(),
            texture: Texture::empty(),
            ambient_reflectance: [0.2; 3],
            diffuse_reflectance: [0.5; 3],
            specular_reflectance: [1.0; 3],
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The working vertex table the per-frame stages read and write.
    pub fn transformed_vertices(&self) -> &[Vertex] {
        &self.transformed
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn uvs(&self) -> &[UvCoord] {
        &self.uvs
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = texture;
    }

    pub fn set_reflectance(&mut self, ambient: [f32; 3], diffuse: [f32; 3], specular: [f32; 3]) {
        self.ambient_reflectance = ambient;
        self.diffuse_reflectance = diffuse;
        self.specular_reflectance = specular;
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    // ============ Transforms ============

    /// Rebuilds the transformed table by applying `transform` to every
    /// original vertex. The original table is left untouched.
    pub fn apply_transform_to_local(&mut self, transform: &Mat4) {
        self.transformed.clear();
        self.transformed
            .extend(self.vertices.iter().map(|&v| *transform * v));
    }

    /// Applies `transform` to the transformed table in place.
    pub fn apply_transform_to_transformed(&mut self, transform: &Mat4) {
        for vertex in &mut self.transformed {
            *vertex = *transform * *vertex;
        }
    }

    /// Divides every transformed vertex through by its W, first saving W as
    /// the vertex's pre-projection depth for perspective-correct texturing.
    pub fn dehomogenize(&mut self) {
        for vertex in &mut self.transformed {
            vertex.pre_projection_z = vertex.w;
            vertex.dehomogenize();
        }
    }

    // ============ Visibility ============

    /// Computes every face's surface normal and marks faces turned away from
    /// the camera as culled.
    ///
    /// The normal is stored whether or not the face survives, so later
    /// stages (vertex normal averaging, lighting) see every face.
    pub fn mark_backfaces(&mut self, camera: &Camera) {
        let camera_position = camera.position();
        for face in &mut self.faces {
            let v0 = self.transformed[face.indices[0]];
            let v1 = self.transformed[face.indices[1]];
            let v2 = self.transformed[face.indices[2]];

            let a = v0 - v1;
            let b = v0 - v2;
            let normal = a.cross(b);
            face.normal = normal;

            let eye = v0 - camera_position;
            face.culled = normal.dot(eye) > 0.0;
        }
    }

    /// Sorts faces by average depth, furthest first, for back-to-front
    /// painting. The sort is unstable; equal depths keep no particular order.
    pub fn sort_faces_by_depth(&mut self) {
        for face in &mut self.faces {
            let z0 = self.transformed[face.indices[0]].z;
            let z1 = self.transformed[face.indices[1]].z;
            let z2 = self.transformed[face.indices[2]].z;
            face.average_depth = (z0 + z1 + z2) / 3.0;
        }
        self.faces
            .sort_unstable_by(|a, b| b.average_depth.total_cmp(&a.average_depth));
    }

    /// Averages face normals into per-vertex normals.
    ///
    /// Every face contributes, culled ones included; a vertex used by no face
    /// keeps a zero contribution count and averages to NaN.
    pub fn compute_vertex_normals(&mut self) {
        for vertex in &mut self.transformed {
            vertex.normal = Vec3::ZERO;
            vertex.contributions = 0;
        }
        for face in &self.faces {
            let normal = face.normal.normalize();
            for &index in &face.indices {
                let vertex = &mut self.transformed[index];
                vertex.normal = vertex.normal + normal;
                vertex.contributions += 1;
            }
        }
        for vertex in &mut self.transformed {
            vertex.normal = (vertex.normal / vertex.contributions as f32).normalize();
        }
    }

    // ============ Lighting ============

    /// Replaces every face color with the summed ambient contributions.
    pub fn light_faces_ambient(&mut self, lights: &[AmbientLight]) {
        for face in &mut self.faces {
            let mut total = (0.0, 0.0, 0.0);
            for light in lights {
                total.0 += light.r * self.ambient_reflectance[0];
                total.1 += light.g * self.ambient_reflectance[1];
                total.2 += light.b * self.ambient_reflectance[2];
            }
            face.color = Rgb::from_channels(total.0, total.1, total.2);
        }
    }

    /// Accumulates directional diffuse light onto every face color.
    ///
    /// The dot product is not floored at zero; a face turned away from a
    /// light subtracts, and the final clamp catches the result.
    pub fn light_faces_directional(&mut self, lights: &[DirectionalLight]) {
        for face in &mut self.faces {
            let (mut r, mut g, mut b) = face.color.channels();
            let normal = face.normal.normalize();
            for light in lights {
                let dot = light.direction.normalize().dot(normal);
                r += light.r * self.diffuse_reflectance[0] * dot;
                g += light.g * self.diffuse_reflectance[1] * dot;
                b += light.b * self.diffuse_reflectance[2] * dot;
            }
            face.color = Rgb::from_channels(clamp_channel(r), clamp_channel(g), clamp_channel(b));
        }
    }

    /// Accumulates point-light contributions onto every face color, using the
    /// face's first vertex as the surface position.
    pub fn light_faces_point(&mut self, lights: &[PointLight]) {
        for face in &mut self.faces {
            let position = self.transformed[face.indices[0]];
            let (mut r, mut g, mut b) = face.color.channels();
            for light in lights {
                if let Some((lr, lg, lb)) =
                    point_contribution(light, position, face.normal, self.diffuse_reflectance[0])
                {
                    r += lr;
                    g += lg;
                    b += lb;
                }
            }
            face.color = Rgb::from_channels(clamp_channel(r), clamp_channel(g), clamp_channel(b));
        }
    }

    /// Replaces every transformed vertex color with the summed ambient
    /// contributions.
    pub fn light_vertices_ambient(&mut self, lights: &[AmbientLight]) {
        for vertex in &mut self.transformed {
            let mut total = (0.0, 0.0, 0.0);
            for light in lights {
                total.0 += light.r * self.ambient_reflectance[0];
                total.1 += light.g * self.ambient_reflectance[1];
                total.2 += light.b * self.ambient_reflectance[2];
            }
            vertex.color = Rgb::from_channels(total.0, total.1, total.2);
        }
    }

    /// Accumulates directional diffuse light onto every transformed vertex
    /// color using the averaged vertex normals.
    pub fn light_vertices_directional(&mut self, lights: &[DirectionalLight]) {
        for vertex in &mut self.transformed {
            let (mut r, mut g, mut b) = vertex.color.channels();
            let normal = vertex.normal.normalize();
            for light in lights {
                let dot = light.direction.normalize().dot(normal);
                r += light.r * self.diffuse_reflectance[0] * dot;
                g += light.g * self.diffuse_reflectance[1] * dot;
                b += light.b * self.diffuse_reflectance[2] * dot;
            }
            vertex.color = Rgb::from_channels(clamp_channel(r), clamp_channel(g), clamp_channel(b));
        }
    }

    /// Accumulates point-light contributions onto every transformed vertex
    /// color.
    pub fn light_vertices_point(&mut self, lights: &[PointLight]) {
        for vertex in &mut self.transformed {
            let (mut r, mut g, mut b) = vertex.color.channels();
            for light in lights {
                if let Some((lr, lg, lb)) =
                    point_contribution(light, *vertex, vertex.normal, self.diffuse_reflectance[0])
                {
                    r += lr;
                    g += lg;
                    b += lb;
                }
            }
            vertex.color = Rgb::from_channels(clamp_channel(r), clamp_channel(g), clamp_channel(b));
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshBuilder for Mesh {
    fn add_vertex(&mut self, x: f32, y: f32, z: f32) {
        let vertex = Vertex::point(x, y, z);
        self.vertices.push(vertex);
        self.transformed.push(vertex);
    }

    fn add_face(&mut self, i0: usize, i1: usize, i2: usize, uv0: usize, uv1: usize, uv2: usize) {
        self.faces.push(Face::new([i0, i1, i2], [uv0, uv1, uv2]));
    }

    fn add_uv(&mut self, u: f32, v: f32) {
        self.uvs.push(UvCoord::new(u, v));
    }
}

/// One point light's contribution at a surface position with the given
/// normal. Every channel is scaled by the red diffuse coefficient.
///
/// Returns `None` when the angle computes to NaN (degenerate normal, or
/// rounding pushing the cosine outside [-1, 1]).
fn point_contribution(
    light: &PointLight,
    position: Vertex,
    normal: Vec3,
    diffuse_red: f32,
) -> Option<(f32, f32, f32)> {
    let to_light = position - light.position;
    let angle = (to_light.dot(normal) / (to_light.magnitude() * normal.magnitude())).acos();
    if angle.is_nan() {
        return None;
    }
    let attenuation = light.attenuation.factor(to_light.magnitude());
    let scale = 20.0 * diffuse_red * angle * attenuation;
    Some((light.r * scale, light.g * scale, light.b * scale))
}
