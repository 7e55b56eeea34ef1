//! Fixed-size float vectors
//!
//! Serialized as `FixedSizeList<item: Float32>` of 2, 3 or 4 with values in
//! component order. A batch of vectors is one contiguous run of floats.

use crate::macros::impl_float_array_loggable;
use stratalog_core::Datatype;

/// A vector in 2D space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2D {
    /// `[x, y]`
    pub xy: [f32; 2],
}

/// A vector in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3D {
    /// `[x, y, z]`
    pub xyz: [f32; 3],
}

/// A vector in 4D space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec4D {
    /// `[x, y, z, w]`
    pub xyzw: [f32; 4],
}

impl Vec2D {
    /// Vector from its components
    pub const fn new(x: f32, y: f32) -> Self {
        Self { xy: [x, y] }
    }

    /// First component
    pub fn x(&self) -> f32 {
        self.xy[0]
    }

    /// Second component
    pub fn y(&self) -> f32 {
        self.xy[1]
    }
}

impl Vec3D {
    /// `[0, 0, 0]`
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// `[1, 1, 1]`
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Vector from its components
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { xyz: [x, y, z] }
    }

    /// First component
    pub fn x(&self) -> f32 {
        self.xyz[0]
    }

    /// Second component
    pub fn y(&self) -> f32 {
        self.xyz[1]
    }

    /// Third component
    pub fn z(&self) -> f32 {
        self.xyz[2]
    }
}

impl Vec4D {
    /// Vector from its components
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { xyzw: [x, y, z, w] }
    }
}

impl From<[f32; 2]> for Vec2D {
    fn from(xy: [f32; 2]) -> Self {
        Self { xy }
    }
}

impl From<[f32; 3]> for Vec3D {
    fn from(xyz: [f32; 3]) -> Self {
        Self { xyz }
    }
}

impl From<[f32; 4]> for Vec4D {
    fn from(xyzw: [f32; 4]) -> Self {
        Self { xyzw }
    }
}

impl_float_array_loggable!(Vec2D, xy, 2, DatatypeName, "stratalog.datatypes.Vec2D");
impl_float_array_loggable!(Vec3D, xyz, 3, DatatypeName, "stratalog.datatypes.Vec3D");
impl_float_array_loggable!(Vec4D, xyzw, 4, DatatypeName, "stratalog.datatypes.Vec4D");

impl Datatype for Vec2D {}
impl Datatype for Vec3D {}
impl Datatype for Vec4D {}
