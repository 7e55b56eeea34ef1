//! A 3D scale as a dense union of per-axis and uniform scale

use crate::datatypes::Vec3D;
use arrow::array::{ArrayRef, Float32Builder};
use arrow::datatypes::{DataType, Field, UnionFields, UnionMode};
use once_cell::sync::Lazy;
use stratalog_core::{
    dense_union_fields, CellBuilder, Datatype, DatatypeName, DenseUnionLayout, Loggable,
    SerializationResult,
};

/// A 3D scale factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale3D {
    /// Individual scale per axis
    ThreeD(Vec3D),
    /// The same scale on every axis
    Uniform(f32),
}

impl Scale3D {
    fn type_id(&self) -> i8 {
        match self {
            Scale3D::ThreeD(_) => 1,
            Scale3D::Uniform(_) => 2,
        }
    }
}

impl From<Vec3D> for Scale3D {
    fn from(scale: Vec3D) -> Self {
        Scale3D::ThreeD(scale)
    }
}

impl From<f32> for Scale3D {
    fn from(scale: f32) -> Self {
        Scale3D::Uniform(scale)
    }
}

static FIELDS: Lazy<UnionFields> = Lazy::new(|| {
    dense_union_fields(vec![
        Field::new("ThreeD", Vec3D::arrow_datatype().clone(), false),
        Field::new("Uniform", DataType::Float32, false),
    ])
});

static DATATYPE: Lazy<DataType> = Lazy::new(|| DataType::Union(FIELDS.clone(), UnionMode::Dense));

/// Builder for [`Scale3D`]
#[derive(Debug)]
pub struct Scale3DBuilder {
    layout: DenseUnionLayout,
    three_d: <Vec3D as Loggable>::Builder,
    uniform: Float32Builder,
}

impl CellBuilder for Scale3DBuilder {
    fn len(&self) -> usize {
        self.layout.len()
    }

    fn append_null(&mut self) {
        self.layout.push_null();
    }

    fn finish(self) -> SerializationResult<ArrayRef> {
        let three_d = self.three_d.finish()?;
        let uniform = CellBuilder::finish(self.uniform)?;
        self.layout.finish(vec![three_d, uniform])
    }
}

impl Loggable for Scale3D {
    type Name = DatatypeName;
    type Builder = Scale3DBuilder;

    fn name() -> DatatypeName {
        DatatypeName::new_static("stratalog.datatypes.Scale3D")
    }

    fn arrow_datatype() -> &'static DataType {
        &DATATYPE
    }

    fn new_builder(capacity: usize) -> Scale3DBuilder {
        Scale3DBuilder {
            layout: DenseUnionLayout::new(FIELDS.clone(), capacity),
            three_d: Vec3D::new_builder(0),
            uniform: Float32Builder::new(),
        }
    }

    fn append_to_builder(builder: &mut Scale3DBuilder, value: &Self) -> SerializationResult<()> {
        builder.layout.push(value.type_id())?;
        match value {
            Scale3D::ThreeD(scale) => Vec3D::append_to_builder(&mut builder.three_d, scale),
            Scale3D::Uniform(scale) => {
                builder.uniform.append_value(*scale);
                Ok(())
            }
        }
    }
}

impl Datatype for Scale3D {}
