//! Optional triangle indices for a mesh.

use crate::datatypes::item_field;
use arrow::array::{ArrayRef, UInt32Builder};
use arrow::datatypes::{DataType, Field, Fields};
use once_cell::sync::Lazy;
use stratalog_core::{
    CellBuilder, Datatype, DatatypeName, ListCellBuilder, Loggable, SerializationResult,
    StructLayout,
};

/// Optional triangle index list of a mesh
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeshProperties {
    /// Flattened vertex index triplets; absent for non-indexed meshes
    pub indices: Option<Vec<u32>>,
}

impl MeshProperties {
    /// Properties of an indexed mesh
    pub fn from_triangle_indices(indices: impl IntoIterator<Item = [u32; 3]>) -> Self {
        Self {
            indices: Some(indices.into_iter().flatten().collect()),
        }
    }
}

static FIELDS: Lazy<Fields> = Lazy::new(|| {
    Fields::from(vec![Field::new(
        "indices",
        DataType::List(item_field(DataType::UInt32)),
        true,
    )])
});

static DATATYPE: Lazy<DataType> = Lazy::new(|| DataType::Struct(FIELDS.clone()));

/// Builder for [`MeshProperties`]
#[derive(Debug)]
pub struct MeshPropertiesBuilder {
    layout: StructLayout,
    indices: ListCellBuilder<UInt32Builder>,
}

impl CellBuilder for MeshPropertiesBuilder {
    fn len(&self) -> usize {
        self.layout.len()
    }

    fn append_null(&mut self) {
        self.layout.append(false);
        self.indices.append_null();
    }

    fn finish(self) -> SerializationResult<ArrayRef> {
        let indices = self.indices.finish()?;
        self.layout.finish(vec![indices])
    }
}

impl Loggable for MeshProperties {
    type Name = DatatypeName;
    type Builder = MeshPropertiesBuilder;

    fn name() -> DatatypeName {
        DatatypeName::new_static("stratalog.datatypes.MeshProperties")
    }

    fn arrow_datatype() -> &'static DataType {
        &DATATYPE
    }

    fn new_builder(capacity: usize) -> MeshPropertiesBuilder {
        MeshPropertiesBuilder {
            layout: StructLayout::new(FIELDS.clone(), capacity),
            indices: ListCellBuilder::new(item_field(DataType::UInt32), UInt32Builder::new(), capacity),
        }
    }

    fn append_to_builder(builder: &mut MeshPropertiesBuilder, value: &Self) -> SerializationResult<()> {
        match &value.indices {
            Some(indices) => builder.indices.append_slice(indices)?,
            None => builder.indices.append_null(),
        }
        builder.layout.append(true);
        Ok(())
    }

    fn heap_size_bytes(&self) -> usize {
        self.indices
            .as_ref()
            .map_or(0, |indices| indices.len() * std::mem::size_of::<u32>())
    }
}

impl Datatype for MeshProperties {}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, AsArray};
    use arrow::datatypes::UInt32Type;

    #[test]
    fn test_indices_flattened() {
        let props = MeshProperties::from_triangle_indices([[0, 1, 2], [2, 3, 0]]);
        assert_eq!(props.indices.as_deref(), Some(&[0, 1, 2, 2, 3, 0][..]));
        assert_eq!(props.heap_size_bytes(), 24);

        let array = MeshProperties::to_arrow(&[props, MeshProperties::default()]).unwrap();
        let indices = array.as_struct().column(0).as_list::<i32>();
        assert_eq!(
            &indices.value(0).as_primitive::<UInt32Type>().values()[..],
            &[0, 1, 2, 2, 3, 0]
        );
        assert!(indices.is_null(1));
    }
}
