use crate::datatypes::Rgba32;
use crate::macros::delegate_component;

/// An RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub Rgba32);

impl Color {
    /// Opaque color
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Rgba32::from_rgb(r, g, b))
    }

    /// Color with alpha
    pub const fn from_unmultiplied_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(Rgba32::from_unmultiplied_rgba(r, g, b, a))
    }
}

impl From<u32> for Color {
    fn from(packed: u32) -> Self {
        Self(Rgba32(packed))
    }
}

delegate_component!(Color, Rgba32, "stratalog.components.Color");
