//! A 3D rotation as a dense union of quaternion and axis-angle

use crate::datatypes::{Quaternion, RotationAxisAngle};
use arrow::array::ArrayRef;
use arrow::datatypes::{DataType, Field, UnionFields, UnionMode};
use once_cell::sync::Lazy;
use stratalog_core::{
    dense_union_fields, CellBuilder, Datatype, DatatypeName, DenseUnionLayout, Loggable,
    SerializationResult,
};

/// A 3D rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rotation3D {
    /// Rotation by a unit quaternion
    Quaternion(Quaternion),
    /// Rotation around an axis
    AxisAngle(RotationAxisAngle),
}

impl Rotation3D {
    /// No rotation
    pub const IDENTITY: Self = Rotation3D::Quaternion(Quaternion::IDENTITY);

    fn type_id(&self) -> i8 {
        match self {
            Rotation3D::Quaternion(_) => 1,
            Rotation3D::AxisAngle(_) => 2,
        }
    }
}

impl From<Quaternion> for Rotation3D {
    fn from(quaternion: Quaternion) -> Self {
        Rotation3D::Quaternion(quaternion)
    }
}

impl From<RotationAxisAngle> for Rotation3D {
    fn from(rotation: RotationAxisAngle) -> Self {
        Rotation3D::AxisAngle(rotation)
    }
}

static FIELDS: Lazy<UnionFields> = Lazy::new(|| {
    dense_union_fields(vec![
        Field::new("Quaternion", Quaternion::arrow_datatype().clone(), false),
        Field::new("AxisAngle", RotationAxisAngle::arrow_datatype().clone(), false),
    ])
});

static DATATYPE: Lazy<DataType> = Lazy::new(|| DataType::Union(FIELDS.clone(), UnionMode::Dense));

/// Builder for [`Rotation3D`]
#[derive(Debug)]
pub struct Rotation3DBuilder {
    layout: DenseUnionLayout,
    quaternion: <Quaternion as Loggable>::Builder,
    axis_angle: <RotationAxisAngle as Loggable>::Builder,
}

impl CellBuilder for Rotation3DBuilder {
    fn len(&self) -> usize {
        self.layout.len()
    }

    fn append_null(&mut self) {
        self.layout.push_null();
    }

    fn finish(self) -> SerializationResult<ArrayRef> {
        let quaternion = self.quaternion.finish()?;
        let axis_angle = self.axis_angle.finish()?;
        self.layout.finish(vec![quaternion, axis_angle])
    }
}

impl Loggable for Rotation3D {
    type Name = DatatypeName;
    type Builder = Rotation3DBuilder;

    fn name() -> DatatypeName {
        DatatypeName::new_static("stratalog.datatypes.Rotation3D")
    }

    fn arrow_datatype() -> &'static DataType {
        &DATATYPE
    }

    fn new_builder(capacity: usize) -> Rotation3DBuilder {
        Rotation3DBuilder {
            layout: DenseUnionLayout::new(FIELDS.clone(), capacity),
            quaternion: Quaternion::new_builder(0),
            axis_angle: RotationAxisAngle::new_builder(0),
        }
    }

    fn append_to_builder(builder: &mut Rotation3DBuilder, value: &Self) -> SerializationResult<()> {
        builder.layout.push(value.type_id())?;
        match value {
            Rotation3D::Quaternion(quaternion) => {
                Quaternion::append_to_builder(&mut builder.quaternion, quaternion)
            }
            Rotation3D::AxisAngle(rotation) => {
                RotationAxisAngle::append_to_builder(&mut builder.axis_angle, rotation)
            }
        }
    }
}

impl Datatype for Rotation3D {}
