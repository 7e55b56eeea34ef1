use crate::datatypes::{self, Rgba32};
use crate::macros::delegate_component;

/// Material of a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Material(pub datatypes::Material);

impl Material {
    /// Material with an albedo factor
    pub fn from_albedo_factor(color: impl Into<Rgba32>) -> Self {
        Self(datatypes::Material::from_albedo_factor(color))
    }
}

delegate_component!(Material, datatypes::Material, "stratalog.components.Material");
