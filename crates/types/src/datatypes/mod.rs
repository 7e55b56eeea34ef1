//! Datatypes: the value representations behind components
//!
//! Each datatype implements [`Loggable`] with a
//! [`DatatypeName`](stratalog_core::DatatypeName) and a memoized arrow
//! schema. Composite datatypes own the builders of their fields and append
//! to them in field order.

mod angle;
mod class_id;
mod float32;
mod mat;
mod material;
mod mesh_properties;
mod quaternion;
mod rgba32;
mod rotation3d;
mod rotation_axis_angle;
mod scale3d;
mod tensor_buffer;
mod tensor_data;
mod tensor_dimension;
mod transform3d;
mod translation_and_mat3x3;
mod translation_rotation_scale3d;
mod vec;

pub use angle::{Angle, AngleBuilder};
pub use class_id::ClassId;
pub use float32::Float32;
pub use mat::{Mat3x3, Mat4x4};
pub use material::{Material, MaterialBuilder};
pub use mesh_properties::{MeshProperties, MeshPropertiesBuilder};
pub use quaternion::Quaternion;
pub use rgba32::Rgba32;
pub use rotation3d::{Rotation3D, Rotation3DBuilder};
pub use rotation_axis_angle::{RotationAxisAngle, RotationAxisAngleBuilder};
pub use scale3d::{Scale3D, Scale3DBuilder};
pub use tensor_buffer::{TensorBuffer, TensorBufferBuilder, TensorBufferKind, TensorElement};
pub use tensor_data::{TensorData, TensorDataBuilder};
pub use tensor_dimension::{TensorDimension, TensorDimensionBuilder};
pub use transform3d::{Transform3D, Transform3DBuilder};
pub use translation_and_mat3x3::{TranslationAndMat3x3, TranslationAndMat3x3Builder};
pub use translation_rotation_scale3d::{
    TranslationRotationScale3D, TranslationRotationScale3DBuilder,
};
pub use vec::{Vec2D, Vec3D, Vec4D};

use arrow::datatypes::{DataType, Field, FieldRef};
use std::sync::Arc;
use stratalog_core::{CellBuilder, Loggable, SerializationResult};

/// Non-nullable list item field named `item`
pub(crate) fn item_field(data_type: DataType) -> FieldRef {
    Arc::new(Field::new("item", data_type, false))
}

/// `FixedSizeList<item: Float32>` of `size`
pub(crate) fn float_list_datatype(size: i32) -> DataType {
    DataType::FixedSizeList(item_field(DataType::Float32), size)
}

/// Append `value`, or a null slot when absent
pub(crate) fn append_optional<L: Loggable>(
    builder: &mut L::Builder,
    value: Option<&L>,
) -> SerializationResult<()> {
    match value {
        Some(value) => L::append_to_builder(builder, value),
        None => {
            builder.append_null();
            Ok(())
        }
    }
}
