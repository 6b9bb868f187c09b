//! 4x4 transformation matrix.
//!
//! # Convention
//! - Storage is `data[row][col]`
//! - Vertices are **column vectors** on the right: `Mat4 * Vertex`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A

use std::ops::Mul;

use crate::vertex::Vertex;

/// 4x4 matrix stored as `data[row][col]`.
///
/// Equality is exact: two matrices are equal only when all 16 entries are
/// bitwise-equal floats.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    /// Builds a matrix from exactly 16 values in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not contain exactly 16 elements.
    pub fn from_row_slice(values: &[f32]) -> Self {
        assert!(
            values.len() == 16,
            "matrix construction requires 16 values, got {}",
            values.len()
        );
        let mut data = [[0.0f32; 4]; 4];
        for row in 0..4 {
            for col in 0..4 {
                data[row][col] = values[row * 4 + col];
            }
        }
        Mat4 { data }
    }

    /// The zero matrix.
    pub fn zero() -> Self {
        Mat4::default()
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    ///
    /// Translation is stored in the last column.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis.
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis.
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis.
    ///
    /// Note the sign layout: Z rotates in the opposite sense to X and Y for
    /// the same positive angle. The demo transforms depend on this layout.
    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates the perspective projection matrix for focal distance `d`.
    ///
    /// The last row copies `d * z` into W, so dehomogenization divides by
    /// depth. There are no near/far planes; geometry behind the camera is
    /// not clipped.
    pub fn perspective(d: f32, aspect_ratio: f32) -> Self {
        Mat4::new([
            [d / aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, d, 0.0, 0.0],
            [0.0, 0.0, d, 0.0],
            [0.0, 0.0, d, 0.0],
        ])
    }

    /// Creates the viewport matrix mapping projected coordinates onto a
    /// `width` x `height` pixel target, Y pointing down.
    pub fn viewport(d: f32, width: u32, height: u32) -> Self {
        let w = width as f32;
        let h = height as f32;
        Mat4::new([
            [w / 2.0, 0.0, 0.0, w / 2.0],
            [0.0, -h / 2.0, 0.0, h / 2.0],
            [0.0, 0.0, d / 2.0, d / 2.0],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row][col] = value;
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a vertex by a matrix: Mat4 * Vertex (column vector).
///
/// Only the homogeneous position changes; every auxiliary field of the input
/// vertex (normal, color, UV, saved depth, texture ratios) is copied forward
/// unchanged.
impl Mul<Vertex> for Mat4 {
    type Output = Vertex;

    fn mul(self, v: Vertex) -> Self::Output {
        Vertex {
            x: self.data[0][0] * v.x
                + self.data[0][1] * v.y
                + self.data[0][2] * v.z
                + self.data[0][3] * v.w,
            y: self.data[1][0] * v.x
                + self.data[1][1] * v.y
                + self.data[1][2] * v.z
                + self.data[1][3] * v.w,
            z: self.data[2][0] * v.x
                + self.data[2][1] * v.y
                + self.data[2][2] * v.z
                + self.data[2][3] * v.w,
            w: self.data[3][0] * v.x
                + self.data[3][1] * v.y
                + self.data[3][2] * v.z
                + self.data[3][3] * v.w,
            ..v
        }
    }
}
