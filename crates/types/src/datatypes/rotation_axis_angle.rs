//! Rotation about an axis by an angle.

use crate::datatypes::{Angle, Vec3D};
use arrow::array::ArrayRef;
use arrow::datatypes::{DataType, Field, Fields};
use once_cell::sync::Lazy;
use stratalog_core::{
    CellBuilder, Datatype, DatatypeName, Loggable, SerializationResult, StructLayout,
};

/// A rotation of `angle` around `axis`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationAxisAngle {
    /// Rotation axis; need not be normalized
    pub axis: Vec3D,
    /// Rotation amount
    pub angle: Angle,
}

impl RotationAxisAngle {
    /// Rotation from axis and angle
    pub fn new(axis: impl Into<Vec3D>, angle: Angle) -> Self {
        Self {
            axis: axis.into(),
            angle,
        }
    }
}

static FIELDS: Lazy<Fields> = Lazy::new(|| {
    Fields::from(vec![
        Field::new("axis", Vec3D::arrow_datatype().clone(), false),
        Field::new("angle", Angle::arrow_datatype().clone(), false),
    ])
});

static DATATYPE: Lazy<DataType> = Lazy::new(|| DataType::Struct(FIELDS.clone()));

/// Builder for [`RotationAxisAngle`]
#[derive(Debug)]
pub struct RotationAxisAngleBuilder {
    layout: StructLayout,
    axis: <Vec3D as Loggable>::Builder,
    angle: <Angle as Loggable>::Builder,
}

impl CellBuilder for RotationAxisAngleBuilder {
    fn len(&self) -> usize {
        self.layout.len()
    }

    fn append_null(&mut self) {
        self.layout.append(false);
        self.axis.append_null();
        self.angle.append_null();
    }

    fn finish(self) -> SerializationResult<ArrayRef> {
        let axis = self.axis.finish()?;
        let angle = self.angle.finish()?;
        self.layout.finish(vec![axis, angle])
    }
}

impl Loggable for RotationAxisAngle {
    type Name = DatatypeName;
    type Builder = RotationAxisAngleBuilder;

    fn name() -> DatatypeName {
        DatatypeName::new_static("stratalog.datatypes.RotationAxisAngle")
    }

    fn arrow_datatype() -> &'static DataType {
        &DATATYPE
    }

    fn new_builder(capacity: usize) -> RotationAxisAngleBuilder {
        RotationAxisAngleBuilder {
            layout: StructLayout::new(FIELDS.clone(), capacity),
            axis: Vec3D::new_builder(capacity),
            angle: Angle::new_builder(capacity),
        }
    }

    fn append_to_builder(
        builder: &mut RotationAxisAngleBuilder,
        value: &Self,
    ) -> SerializationResult<()> {
        Vec3D::append_to_builder(&mut builder.axis, &value.axis)?;
        Angle::append_to_builder(&mut builder.angle, &value.angle)?;
        builder.layout.append(true);
        Ok(())
    }
}

impl Datatype for RotationAxisAngle {}
