//! Rotation quaternion stored as `[x, y, z, w]`.

use crate::macros::impl_float_array_loggable;
use stratalog_core::Datatype;

/// A quaternion rotation stored as `[x, y, z, w]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    /// `[x, y, z, w]`, `w` being the scalar part
    pub xyzw: [f32; 4],
}

impl Quaternion {
    /// The identity rotation
    pub const IDENTITY: Self = Self::from_xyzw([0.0, 0.0, 0.0, 1.0]);

    /// Quaternion from `[x, y, z, w]`
    pub const fn from_xyzw(xyzw: [f32; 4]) -> Self {
        Self { xyzw }
    }

    /// Quaternion from `[w, x, y, z]`
    pub const fn from_wxyz([w, x, y, z]: [f32; 4]) -> Self {
        Self { xyzw: [x, y, z, w] }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl_float_array_loggable!(Quaternion, xyzw, 4, DatatypeName, "stratalog.datatypes.Quaternion");

impl Datatype for Quaternion {}
