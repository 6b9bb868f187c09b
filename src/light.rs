//! Light source descriptors.
//!
//! Lights are plain data: the illumination math lives with the mesh's
//! lighting passes. Channel values are `f32` on a 0-255 scale so a light can
//! be brighter than any single surface can display; the passes clamp after
//! accumulating.

use crate::math::vec3::Vec3;
use crate::vertex::Vertex;

/// Uniform background illumination.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl AmbientLight {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Parallel rays from a direction, like sunlight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// The direction the light points. Normalized by the lighting passes,
    /// so any non-zero length is accepted here.
    pub direction: Vec3,
}

impl DirectionalLight {
    pub fn new(r: f32, g: f32, b: f32, direction: Vec3) -> Self {
        Self {
            r,
            g,
            b,
            direction,
        }
    }
}

/// Distance falloff coefficients for a point light.
///
/// The attenuation factor at distance `d` is `1 / (a + b*d + c*d^2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attenuation {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl Attenuation {
    pub fn new(a: f32, b: f32, c: f32) -> Self {
        Self { a, b, c }
    }

    /// The falloff factor at `distance`.
    pub fn factor(&self, distance: f32) -> f32 {
        1.0 / (self.a + self.b * distance + self.c * distance * distance)
    }
}

/// A light radiating from a position with distance falloff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub position: Vertex,
    pub attenuation: Attenuation,
}

impl PointLight {
    pub fn new(r: f32, g: f32, b: f32, position: Vertex, attenuation: Attenuation) -> Self {
        Self {
            r,
            g,
            b,
            position,
            attenuation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn attenuation_at_zero_distance_is_inverse_constant() {
        let att = Attenuation::new(2.0, 0.5, 0.1);
        assert_relative_eq!(att.factor(0.0), 0.5);
    }

    #[test]
    fn attenuation_falls_off_quadratically() {
        let att = Attenuation::new(0.0, 0.0, 1.0);
        assert_relative_eq!(att.factor(2.0), 0.25);
        assert_relative_eq!(att.factor(4.0), 0.0625);
    }

    #[test]
    fn test_constructors() {
        let ambient = AmbientLight::new(255.0, 128.0, 0.0);
        assert_eq!((ambient.r, ambient.g, ambient.b), (255.0, 128.0, 0.0));

        let directional = DirectionalLight::new(10.0, 20.0, 30.0, Vec3::new(0.0, 0.0, 2.0));
        // Stored as given; passes normalize on use.
        assert_eq!(directional.direction, Vec3::new(0.0, 0.0, 2.0));

        let point = PointLight::new(
            100.0,
            100.0,
            100.0,
            Vertex::point(0.0, 0.0, 1.0),
            Attenuation::new(0.0, 1.0, 0.0),
        );
        assert_eq!(point.position, Vertex::point(0.0, 0.0, 1.0));
    }
}
