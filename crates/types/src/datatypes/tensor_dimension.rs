use arrow::array::{ArrayRef, StringBuilder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Fields};
use once_cell::sync::Lazy;
use stratalog_core::{
    CellBuilder, Datatype, DatatypeName, Loggable, SerializationResult, StructLayout,
};

/// One dimension of a tensor shape
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TensorDimension {
    /// Number of elements along this dimension
    pub size: u64,
    /// Optional label, e.g. `"height"`
    pub name: Option<String>,
}

impl TensorDimension {
    /// Unnamed dimension
    pub const fn unnamed(size: u64) -> Self {
        Self { size, name: None }
    }

    /// Named dimension
    pub fn named(size: u64, name: impl Into<String>) -> Self {
        Self {
            size,
            name: Some(name.into()),
        }
    }

    /// Height dimension, first in image shapes
    pub fn height(size: u64) -> Self {
        Self::named(size, "height")
    }

    /// Width dimension
    pub fn width(size: u64) -> Self {
        Self::named(size, "width")
    }

    /// Depth dimension, e.g. color channels
    pub fn depth(size: u64) -> Self {
        Self::named(size, "depth")
    }
}

impl From<u64> for TensorDimension {
    fn from(size: u64) -> Self {
        Self::unnamed(size)
    }
}

static FIELDS: Lazy<Fields> = Lazy::new(|| {
    Fields::from(vec![
        Field::new("size", DataType::UInt64, false),
        Field::new("name", DataType::Utf8, true),
    ])
});

static DATATYPE: Lazy<DataType> = Lazy::new(|| DataType::Struct(FIELDS.clone()));

/// Builder for [`TensorDimension`]
#[derive(Debug)]
pub struct TensorDimensionBuilder {
    layout: StructLayout,
    size: UInt64Builder,
    name: StringBuilder,
}

impl CellBuilder for TensorDimensionBuilder {
    fn len(&self) -> usize {
        self.layout.len()
    }

    fn append_null(&mut self) {
        self.layout.append(false);
        self.size.append_value(0);
        self.name.append_null();
    }

    fn finish(self) -> SerializationResult<ArrayRef> {
        let size = CellBuilder::finish(self.size)?;
        let name = CellBuilder::finish(self.name)?;
        self.layout.finish(vec![size, name])
    }
}

impl Loggable for TensorDimension {
    type Name = DatatypeName;
    type Builder = TensorDimensionBuilder;

    fn name() -> DatatypeName {
        DatatypeName::new_static("stratalog.datatypes.TensorDimension")
    }

    fn arrow_datatype() -> &'static DataType {
        &DATATYPE
    }

    fn new_builder(capacity: usize) -> TensorDimensionBuilder {
        TensorDimensionBuilder {
            layout: StructLayout::new(FIELDS.clone(), capacity),
            size: UInt64Builder::with_capacity(capacity),
            name: StringBuilder::new(),
        }
    }

    fn append_to_builder(
        builder: &mut TensorDimensionBuilder,
        value: &Self,
    ) -> SerializationResult<()> {
        builder.size.append_value(value.size);
        builder.name.append_option(value.name.as_deref());
        builder.layout.append(true);
        Ok(())
    }

    fn heap_size_bytes(&self) -> usize {
        self.name.as_ref().map_or(0, String::len)
    }
}

impl Datatype for TensorDimension {}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, AsArray};
    use arrow::datatypes::UInt64Type;

    #[test]
    fn test_name_is_nullable() {
        let dims = [TensorDimension::height(480), TensorDimension::unnamed(3)];
        let array = TensorDimension::to_arrow(&dims).unwrap();
        let structs = array.as_struct();
        assert_eq!(&structs.column(0).as_primitive::<UInt64Type>().values()[..], &[480, 3]);
        let names = structs.column(1).as_string::<i32>();
        assert_eq!(names.value(0), "height");
        assert!(names.is_null(1));
    }

    #[test]
    fn test_heap_size_counts_name() {
        assert_eq!(TensorDimension::named(1, "batch").heap_size_bytes(), 5);
        assert_eq!(TensorDimension::unnamed(1).heap_size_bytes(), 0);
    }
}
