use crate::datatypes::Vec3D;
use crate::macros::delegate_component;

/// A direction or displacement in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3D(pub Vec3D);

impl Vector3D {
    /// Vector from components
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3D::new(x, y, z))
    }
}

impl From<[f32; 3]> for Vector3D {
    fn from(xyz: [f32; 3]) -> Self {
        Self(Vec3D::from(xyz))
    }
}

delegate_component!(Vector3D, Vec3D, "stratalog.components.Vector3D");
