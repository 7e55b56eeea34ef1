use crate::datatypes;
use crate::macros::delegate_component;

/// Optional properties of a mesh, such as its triangle indices
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeshProperties(pub datatypes::MeshProperties);

impl MeshProperties {
    /// Properties of an indexed mesh
    pub fn from_triangle_indices(indices: impl IntoIterator<Item = [u32; 3]>) -> Self {
        Self(datatypes::MeshProperties::from_triangle_indices(indices))
    }
}

delegate_component!(
    MeshProperties,
    datatypes::MeshProperties,
    "stratalog.components.MeshProperties"
);
