//! Angle as a dense union of radians and degrees

use arrow::array::{ArrayRef, Float32Builder};
use arrow::datatypes::{DataType, Field, UnionFields, UnionMode};
use once_cell::sync::Lazy;
use stratalog_core::{
    dense_union_fields, CellBuilder, Datatype, DatatypeName, DenseUnionLayout, Loggable,
    SerializationResult,
};

/// An angle, in radians or degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Angle {
    /// Angle in radians
    Radians(f32),
    /// Angle in degrees
    Degrees(f32),
}

impl Angle {
    /// The angle in radians, whichever unit it was given in
    pub fn radians(&self) -> f32 {
        match self {
            Angle::Radians(radians) => *radians,
            Angle::Degrees(degrees) => degrees.to_radians(),
        }
    }

    /// The angle in degrees, whichever unit it was given in
    pub fn degrees(&self) -> f32 {
        match self {
            Angle::Radians(radians) => radians.to_degrees(),
            Angle::Degrees(degrees) => *degrees,
        }
    }

    fn type_id(&self) -> i8 {
        match self {
            Angle::Radians(_) => 1,
            Angle::Degrees(_) => 2,
        }
    }
}

static FIELDS: Lazy<UnionFields> = Lazy::new(|| {
    dense_union_fields(vec![
        Field::new("Radians", DataType::Float32, false),
        Field::new("Degrees", DataType::Float32, false),
    ])
});

static DATATYPE: Lazy<DataType> = Lazy::new(|| DataType::Union(FIELDS.clone(), UnionMode::Dense));

/// Builder for [`Angle`]
#[derive(Debug)]
pub struct AngleBuilder {
    layout: DenseUnionLayout,
    radians: Float32Builder,
    degrees: Float32Builder,
}

impl CellBuilder for AngleBuilder {
    fn len(&self) -> usize {
        self.layout.len()
    }

    fn append_null(&mut self) {
        self.layout.push_null();
    }

    fn finish(self) -> SerializationResult<ArrayRef> {
        let radians = CellBuilder::finish(self.radians)?;
        let degrees = CellBuilder::finish(self.degrees)?;
        self.layout.finish(vec![radians, degrees])
    }
}

impl Loggable for Angle {
    type Name = DatatypeName;
    type Builder = AngleBuilder;

    fn name() -> DatatypeName {
        DatatypeName::new_static("stratalog.datatypes.Angle")
    }

    fn arrow_datatype() -> &'static DataType {
        &DATATYPE
    }

    fn new_builder(capacity: usize) -> AngleBuilder {
        AngleBuilder {
            layout: DenseUnionLayout::new(FIELDS.clone(), capacity),
            radians: Float32Builder::new(),
            degrees: Float32Builder::new(),
        }
    }

    fn append_to_builder(builder: &mut AngleBuilder, value: &Self) -> SerializationResult<()> {
        builder.layout.push(value.type_id())?;
        match value {
            Angle::Radians(radians) => builder.radians.append_value(*radians),
            Angle::Degrees(degrees) => builder.degrees.append_value(*degrees),
        }
        Ok(())
    }
}

impl Datatype for Angle {}
