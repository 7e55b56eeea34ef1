use crate::datatypes::Vec2D;
use crate::macros::delegate_component;

/// Pixel resolution `[width, height]` of an image
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Resolution(pub Vec2D);

impl Resolution {
    /// Resolution from width and height in pixels
    pub const fn new(width: f32, height: f32) -> Self {
        Self(Vec2D::new(width, height))
    }
}

impl From<[f32; 2]> for Resolution {
    fn from(wh: [f32; 2]) -> Self {
        Self(Vec2D::from(wh))
    }
}

delegate_component!(Resolution, Vec2D, "stratalog.components.Resolution");
