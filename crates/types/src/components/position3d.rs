use crate::datatypes::Vec3D;
use crate::macros::delegate_component;

/// A position in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position3D(pub Vec3D);

impl Position3D {
    /// Position from coordinates
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3D::new(x, y, z))
    }
}

impl From<[f32; 3]> for Position3D {
    fn from(xyz: [f32; 3]) -> Self {
        Self(Vec3D::from(xyz))
    }
}

delegate_component!(Position3D, Vec3D, "stratalog.components.Position3D");
