//! Vector and matrix primitives.

pub mod mat4;
pub mod vec3;
