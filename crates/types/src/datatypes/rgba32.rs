//! 8-bit-per-channel RGBA color packed into a `u32` as `0xRRGGBBAA`

use crate::macros::impl_primitive_loggable;
use arrow::datatypes::{DataType, UInt32Type};
use stratalog_core::Datatype;

/// Unmultiplied sRGB color with linear alpha, packed as `0xRRGGBBAA`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba32(pub u32);

impl Rgba32 {
    /// Opaque white
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);

    /// Opaque black
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);

    /// Opaque color
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_unmultiplied_rgba(r, g, b, 255)
    }

    /// Color with alpha
    pub const fn from_unmultiplied_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// `[r, g, b, a]`
    pub const fn to_array(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl_primitive_loggable!(
    Rgba32,
    UInt32Type,
    DatatypeName,
    "stratalog.datatypes.Rgba32",
    DataType::UInt32
);

impl Datatype for Rgba32 {}

impl From<u32> for Rgba32 {
    fn from(packed: u32) -> Self {
        Self(packed)
    }
}

impl From<[u8; 4]> for Rgba32 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::from_unmultiplied_rgba(r, g, b, a)
    }
}
