//! Triangle mesh archetype
//!
//! Vertex-aligned slots (normals, colors, class ids, instance keys) are
//! expected to match the vertex count but are serialized as given; a
//! mismatch is the reader's problem to resolve.

use crate::components::{
    ClassId, Color, InstanceKey, Material, MeshProperties, Position3D, Vector3D,
};
use stratalog_core::{
    Archetype, ArchetypeCells, ArchetypeName, AsComponents, CellComposer, Collection, MemoryPool,
    SerializationResult,
};

/// A 3D triangle mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh3D<'a> {
    /// Vertex positions
    pub vertex_positions: Collection<'a, Position3D>,
    /// Triangle indices; without them every three vertices form a triangle
    pub mesh_properties: Option<MeshProperties>,
    /// One normal per vertex
    pub vertex_normals: Option<Collection<'a, Vector3D>>,
    /// One color per vertex
    pub vertex_colors: Option<Collection<'a, Color>>,
    /// Material applied to the whole mesh
    pub mesh_material: Option<Material>,
    /// Class ids, one per vertex or one for the whole mesh
    pub class_ids: Option<Collection<'a, ClassId>>,
    /// Instance keys, one per vertex
    pub instance_keys: Option<Collection<'a, InstanceKey>>,
}

impl<'a> Mesh3D<'a> {
    /// Mesh with only vertex positions
    pub fn new(vertex_positions: impl Into<Collection<'a, Position3D>>) -> Self {
        Self {
            vertex_positions: vertex_positions.into(),
            mesh_properties: None,
            vertex_normals: None,
            vertex_colors: None,
            mesh_material: None,
            class_ids: None,
            instance_keys: None,
        }
    }

    /// Set triangle indices
    pub fn with_mesh_properties(mut self, mesh_properties: impl Into<MeshProperties>) -> Self {
        self.mesh_properties = Some(mesh_properties.into());
        self
    }

    /// Set per-vertex normals
    pub fn with_vertex_normals(mut self, normals: impl Into<Collection<'a, Vector3D>>) -> Self {
        self.vertex_normals = Some(normals.into());
        self
    }

    /// Set per-vertex colors
    pub fn with_vertex_colors(mut self, colors: impl Into<Collection<'a, Color>>) -> Self {
        self.vertex_colors = Some(colors.into());
        self
    }

    /// Set the mesh material
    pub fn with_mesh_material(mut self, material: impl Into<Material>) -> Self {
        self.mesh_material = Some(material.into());
        self
    }

    /// Set class ids
    pub fn with_class_ids(mut self, class_ids: impl Into<Collection<'a, ClassId>>) -> Self {
        self.class_ids = Some(class_ids.into());
        self
    }

    /// Set instance keys
    pub fn with_instance_keys(mut self, keys: impl Into<Collection<'a, InstanceKey>>) -> Self {
        self.instance_keys = Some(keys.into());
        self
    }
}

impl Archetype for Mesh3D<'_> {
    fn name() -> ArchetypeName {
        ArchetypeName::new_static("stratalog.archetypes.Mesh3D")
    }

    fn num_instances(&self) -> usize {
        self.vertex_positions.len()
    }
}

impl AsComponents for Mesh3D<'_> {
    fn to_archetype_cells(&self, pool: &MemoryPool) -> SerializationResult<ArchetypeCells> {
        let mut composer = CellComposer::new(pool, 7);
        composer.push_collection(&self.vertex_positions)?;
        composer.push_optional(self.mesh_properties.as_ref())?;
        composer.push_optional_collection(self.vertex_normals.as_ref())?;
        composer.push_optional_collection(self.vertex_colors.as_ref())?;
        composer.push_optional(self.mesh_material.as_ref())?;
        composer.push_optional_collection(self.class_ids.as_ref())?;
        composer.push_optional_collection(self.instance_keys.as_ref())?;
        composer.finish(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratalog_core::ErrorKind;

    fn triangle() -> Vec<Position3D> {
        vec![
            Position3D::new(0.0, 0.0, 0.0),
            Position3D::new(1.0, 0.0, 0.0),
            Position3D::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_positions_only() {
        let positions = triangle();
        let cells = Mesh3D::new(&positions).serialize().unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].component_name(), "stratalog.components.Position3D");
        assert_eq!(cells[0].num_instances(), 3);
        assert_eq!(cells[1].component_name(), "stratalog.components.Mesh3DIndicator");
        assert_eq!(cells[1].num_instances(), 3);
    }

    #[test]
    fn test_slot_order_ignores_setter_order() {
        let mesh = Mesh3D::new(triangle())
            .with_instance_keys(vec![InstanceKey(0), InstanceKey(1), InstanceKey(2)])
            .with_mesh_material(Material::from_albedo_factor(0xFF0000FF_u32))
            .with_vertex_colors(vec![Color::from_rgb(255, 0, 0); 3])
            .with_mesh_properties(MeshProperties::from_triangle_indices([[0, 1, 2]]));
        let names: Vec<String> = mesh
            .serialize()
            .unwrap()
            .iter()
            .map(|cell| cell.component_name().short_name().to_owned())
            .collect();
        assert_eq!(
            names,
            [
                "Position3D",
                "MeshProperties",
                "Color",
                "Material",
                "InstanceKey",
                "Mesh3DIndicator",
            ]
        );
    }

    #[test]
    fn test_null_normals_abort() {
        // SAFETY: the collection reports null without dereferencing
        let normals = unsafe { Collection::<Vector3D>::from_raw_parts(std::ptr::null(), 3) };
        let mesh = Mesh3D::new(triangle()).with_vertex_normals(normals);
        let err = mesh.serialize().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedNullArgument);
    }
}
