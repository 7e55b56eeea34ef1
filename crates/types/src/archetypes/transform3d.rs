//! Transform3D archetype

use crate::components;
use stratalog_core::{
    Archetype, ArchetypeCells, ArchetypeName, AsComponents, CellComposer, MemoryPool,
    SerializationResult,
};

/// A 3D transform between an entity and its parent
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform3D {
    /// The transform
    pub transform: components::Transform3D,
}

impl Transform3D {
    /// The identity transform
    pub const IDENTITY: Self = Self {
        transform: components::Transform3D(crate::datatypes::Transform3D::IDENTITY),
    };

    /// Archetype around one transform
    pub fn new(transform: impl Into<components::Transform3D>) -> Self {
        Self {
            transform: transform.into(),
        }
    }
}

impl Archetype for Transform3D {
    fn name() -> ArchetypeName {
        ArchetypeName::new_static("stratalog.archetypes.Transform3D")
    }

    fn num_instances(&self) -> usize {
        1
    }
}

impl AsComponents for Transform3D {
    fn to_archetype_cells(&self, pool: &MemoryPool) -> SerializationResult<ArchetypeCells> {
        let mut composer = CellComposer::new(pool, 1);
        composer.push_one(&self.transform)?;
        composer.finish(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::{TranslationRotationScale3D, Vec3D};
    use arrow::array::{Array, AsArray};

    #[test]
    fn test_translation_serializes() {
        let transform = Transform3D::new(TranslationRotationScale3D::translation(Vec3D::new(
            1.0, 2.0, 3.0,
        )));
        let cells = transform.to_archetype_cells(&MemoryPool::unbounded("test")).unwrap();
        assert_eq!(cells.archetype_name().as_str(), "stratalog.archetypes.Transform3D");

        let cell = cells.get("stratalog.components.Transform3D").unwrap();
        let union = cell.array().as_union();
        assert_eq!(union.len(), 1);
        // 0 is reserved for null markers
        assert_eq!(union.type_id(0), 2);
        assert!(cells.cells().last().unwrap().is_indicator());
    }
}
