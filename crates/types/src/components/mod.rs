//! Components: named, independently serializable values
//!
//! Most components wrap exactly one datatype and reuse its codec; only the
//! name differs. The name becomes the column name of the serialized cell.

mod class_id;
mod color;
mod instance_key;
mod material;
mod mesh_properties;
mod pinhole_projection;
mod position3d;
mod resolution;
mod tensor_data;
mod transform3d;
mod vector3d;
mod view_coordinates;

pub use class_id::ClassId;
pub use color::Color;
pub use instance_key::InstanceKey;
pub use material::Material;
pub use mesh_properties::MeshProperties;
pub use pinhole_projection::PinholeProjection;
pub use position3d::Position3D;
pub use resolution::Resolution;
pub use tensor_data::TensorData;
pub use transform3d::Transform3D;
pub use vector3d::Vector3D;
pub use view_coordinates::{ViewCoordinates, ViewDir};
