//! Mesh material: an optional albedo factor.

use crate::datatypes::Rgba32;
use arrow::array::{ArrayRef, UInt32Builder};
use arrow::datatypes::{DataType, Field, Fields};
use once_cell::sync::Lazy;
use stratalog_core::{
    CellBuilder, Datatype, DatatypeName, Loggable, SerializationResult, StructLayout,
};

/// Surface material of a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Material {
    /// Base color multiplied with vertex colors
    pub albedo_factor: Option<Rgba32>,
}

impl Material {
    /// Material with an albedo factor
    pub fn from_albedo_factor(color: impl Into<Rgba32>) -> Self {
        Self {
            albedo_factor: Some(color.into()),
        }
    }
}

static FIELDS: Lazy<Fields> =
    Lazy::new(|| Fields::from(vec![Field::new("albedo_factor", DataType::UInt32, true)]));

static DATATYPE: Lazy<DataType> = Lazy::new(|| DataType::Struct(FIELDS.clone()));

/// Builder for [`Material`]
#[derive(Debug)]
pub struct MaterialBuilder {
    layout: StructLayout,
    albedo_factor: UInt32Builder,
}

impl CellBuilder for MaterialBuilder {
    fn len(&self) -> usize {
        self.layout.len()
    }

    fn append_null(&mut self) {
        self.layout.append(false);
        self.albedo_factor.append_null();
    }

    fn finish(self) -> SerializationResult<ArrayRef> {
        let albedo_factor = CellBuilder::finish(self.albedo_factor)?;
        self.layout.finish(vec![albedo_factor])
    }
}

impl Loggable for Material {
    type Name = DatatypeName;
    type Builder = MaterialBuilder;

    fn name() -> DatatypeName {
        DatatypeName::new_static("stratalog.datatypes.Material")
    }

    fn arrow_datatype() -> &'static DataType {
        &DATATYPE
    }

    fn new_builder(capacity: usize) -> MaterialBuilder {
        MaterialBuilder {
            layout: StructLayout::new(FIELDS.clone(), capacity),
            albedo_factor: UInt32Builder::with_capacity(capacity),
        }
    }

    fn append_to_builder(builder: &mut MaterialBuilder, value: &Self) -> SerializationResult<()> {
        builder
            .albedo_factor
            .append_option(value.albedo_factor.map(|color| color.0));
        builder.layout.append(true);
        Ok(())
    }
}

impl Datatype for Material {}
