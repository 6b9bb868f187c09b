//! Indexed triangle faces.

use crate::color::Rgb;
use crate::math::vec3::Vec3;

/// A triangle indexing into a mesh's vertex and UV tables.
///
/// Vertex indices and UV indices are separate index spaces: a vertex shared
/// by two faces can carry different texture coordinates in each.
///
/// The remaining fields are derived per frame by the pipeline: the surface
/// `normal` is stored by backface marking whether or not the face is culled,
/// `average_depth` by the depth sort, and `color` by the face lighting
/// passes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    pub indices: [usize; 3],
    pub uv_indices: [usize; 3],
    pub culled: bool,
    pub average_depth: f32,
    pub color: Rgb,
    pub normal: Vec3,
}

impl Face {
    pub fn new(indices: [usize; 3], uv_indices: [usize; 3]) -> Self {
        Self {
            indices,
            uv_indices,
            culled: false,
            average_depth: 0.0,
            color: Rgb::BLACK,
            normal: Vec3::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_face_starts_unculled() {
        let f = Face::new([0, 1, 2], [3, 4, 5]);
        assert!(!f.culled);
        assert_eq!(f.indices, [0, 1, 2]);
        assert_eq!(f.uv_indices, [3, 4, 5]);
        assert_eq!(f.color, Rgb::BLACK);
    }
}
