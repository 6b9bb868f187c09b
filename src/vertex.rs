//! Homogeneous vertices and the auxiliary state the pipeline carries on them.
//!
//! A [`Vertex`] is more than a position: as it moves through the per-frame
//! stages it accumulates a lighting normal, a lit color, texture coordinates
//! and the saved pre-projection depth that perspective-correct texturing
//! divides by. Matrix transforms replace the position and copy everything
//! else forward.

use std::ops::Sub;

use crate::color::Rgb;
use crate::math::vec3::Vec3;

/// A texture coordinate pair in texel units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct UvCoord {
    pub u: f32,
    pub v: f32,
}

impl UvCoord {
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }

    /// U truncated toward zero.
    #[inline]
    pub fn int_u(&self) -> i32 {
        self.u as i32
    }

    /// V truncated toward zero.
    #[inline]
    pub fn int_v(&self) -> i32 {
        self.v as i32
    }
}

/// A homogeneous point with per-frame pipeline state.
#[derive(Clone, Copy, Debug, Default)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
    /// Accumulated then averaged lighting normal.
    pub normal: Vec3,
    /// Number of faces that contributed to `normal`.
    pub contributions: u32,
    /// Lit color written by the vertex lighting passes.
    pub color: Rgb,
    /// Texture coordinate attached for the textured draw.
    pub uv: UvCoord,
    /// W captured when the vertex was dehomogenized; the view-space depth.
    pub pre_projection_z: f32,
    pub u_over_z: f32,
    pub v_over_z: f32,
    pub z_reciprocal: f32,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            x,
            y,
            z,
            w,
            ..Self::default()
        }
    }

    /// A point at (x, y, z) with w = 1 and cleared auxiliary state.
    pub fn point(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 1.0)
    }

    /// Screen-space X, truncated toward zero.
    #[inline]
    pub fn screen_x(&self) -> i32 {
        self.x as i32
    }

    /// Screen-space Y, truncated toward zero.
    #[inline]
    pub fn screen_y(&self) -> i32 {
        self.y as i32
    }

    /// Divides the position through by W, leaving w = 1.
    ///
    /// Saving W into `pre_projection_z` is the caller's job; the mesh does it
    /// immediately before this call so texturing can recover view depth.
    pub fn dehomogenize(&mut self) {
        self.x /= self.w;
        self.y /= self.w;
        self.z /= self.w;
        self.w = 1.0;
    }
}

/// Vertices compare by position only; auxiliary state is ignored.
impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z && self.w == other.w
    }
}

/// The displacement between two points.
impl Sub for Vertex {
    type Output = Vec3;

    fn sub(self, rhs: Vertex) -> Self::Output {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn point_starts_with_cleared_auxiliary_state() {
        let v = Vertex::point(1.0, 2.0, 3.0);
        assert_eq!(v.normal, Vec3::ZERO);
        assert_eq!(v.contributions, 0);
        assert_eq!(v.color, Rgb::BLACK);
        assert_eq!(v.pre_projection_z, 0.0);
        assert_eq!(v.w, 1.0);
    }

    #[test]
    fn test_dehomogenize() {
        let mut v = Vertex::new(8.0, -4.0, 2.0, 2.0);
        v.dehomogenize();
        assert_relative_eq!(v.x, 4.0);
        assert_relative_eq!(v.y, -2.0);
        assert_relative_eq!(v.z, 1.0);
        assert_relative_eq!(v.w, 1.0);
    }

    #[test]
    fn dehomogenize_is_idempotent_on_position() {
        let mut v = Vertex::new(9.0, 3.0, 6.0, 3.0);
        v.dehomogenize();
        let once = v;
        v.dehomogenize();
        assert_eq!(v, once);
    }

    #[test]
    fn screen_coordinates_truncate() {
        let v = Vertex::point(5.9, -1.2, 0.0);
        assert_eq!(v.screen_x(), 5);
        assert_eq!(v.screen_y(), -1);
    }

    #[test]
    fn equality_ignores_auxiliary_state() {
        let a = Vertex::point(1.0, 2.0, 3.0);
        let mut b = a;
        b.color = Rgb::new(9, 9, 9);
        b.contributions = 7;
        assert_eq!(a, b);
    }

    #[test]
    fn subtraction_yields_displacement() {
        let a = Vertex::point(5.0, 7.0, 9.0);
        let b = Vertex::point(1.0, 2.0, 3.0);
        assert_eq!(a - b, Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_int_uv() {
        let uv = UvCoord::new(12.7, 3.2);
        assert_eq!(uv.int_u(), 12);
        assert_eq!(uv.int_v(), 3);
    }
}
