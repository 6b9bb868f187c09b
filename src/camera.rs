//! Pipeline camera.
//!
//! The camera is position plus Euler rotations; everything else is derived.
//! [`Camera::view_matrix`] is rebuilt from the current fields on every call,
//! so setters take effect on the next frame with no explicit rebuild step.

use crate::math::mat4::Mat4;
use crate::vertex::Vertex;

/// A camera with a world position and X/Y/Z rotations in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    x_rotation: f32,
    y_rotation: f32,
    z_rotation: f32,
    position: Vertex,
}

impl Camera {
    pub fn new(x_rotation: f32, y_rotation: f32, z_rotation: f32, position: Vertex) -> Self {
        Self {
            x_rotation,
            y_rotation,
            z_rotation,
            position,
        }
    }

    /// The camera's world position, used by backface marking.
    pub fn position(&self) -> Vertex {
        self.position
    }

    pub fn set_position(&mut self, position: Vertex) {
        self.position = position;
    }

    pub fn rotations(&self) -> (f32, f32, f32) {
        (self.x_rotation, self.y_rotation, self.z_rotation)
    }

    pub fn set_rotations(&mut self, x: f32, y: f32, z: f32) {
        self.x_rotation = x;
        self.y_rotation = y;
        self.z_rotation = z;
    }

    /// Builds the world-to-view matrix from the current fields.
    ///
    /// Composition order is rotation X, then Y, then Z, then translation by
    /// the negated position. The X and Y rotations use the view-space
    /// (inverse) element layout; Z matches [`Mat4::rotation_z`] directly.
    pub fn view_matrix(&self) -> Mat4 {
        let (sx, cx) = self.x_rotation.sin_cos();
        let (sy, cy) = self.y_rotation.sin_cos();
        let (sz, cz) = self.z_rotation.sin_cos();

        let rotate_x = Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, cx, sx, 0.0],
            [0.0, -sx, cx, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let rotate_y = Mat4::new([
            [cy, 0.0, -sy, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [sy, 0.0, cy, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let rotate_z = Mat4::new([
            [cz, sz, 0.0, 0.0],
            [-sz, cz, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let translate = Mat4::translation(-self.position.x, -self.position.y, -self.position.z);

        rotate_x * rotate_y * rotate_z * translate
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, Vertex::point(0.0, 0.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn view_matrix_translates_by_negated_position() {
        let camera = Camera::new(0.0, 0.0, 0.0, Vertex::point(0.0, 0.0, -10.0));
        let v = camera.view_matrix() * Vertex::point(0.0, 0.0, 0.0);
        // The origin ends up 10 units in front of the camera.
        assert_relative_eq!(v.z, 10.0);
        assert_relative_eq!(v.x, 0.0);
        assert_relative_eq!(v.w, 1.0);
    }

    #[test]
    fn view_matrix_reflects_mutation_immediately() {
        let mut camera = Camera::default();
        let before = camera.view_matrix();
        camera.set_position(Vertex::point(5.0, 0.0, 0.0));
        let after = camera.view_matrix();
        assert_ne!(before, after);
        let v = after * Vertex::point(5.0, 0.0, 0.0);
        assert_relative_eq!(v.x, 0.0);
    }

    #[test]
    fn y_rotation_swings_world_around_camera() {
        let camera = Camera::new(0.0, std::f32::consts::FRAC_PI_2, 0.0, Vertex::point(0.0, 0.0, 0.0));
        let v = camera.view_matrix() * Vertex::point(1.0, 0.0, 0.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.z.abs(), 1.0, epsilon = 1e-6);
    }
}
