//! Archetypes: named bundles of component slots
//!
//! Slots are serialized in declaration order. Absent optional slots produce
//! no cell; the indicator cell always comes last.

mod mesh3d;
mod pinhole;
mod tensor;
mod transform3d;

pub use mesh3d::Mesh3D;
pub use pinhole::Pinhole;
pub use tensor::Tensor;
pub use transform3d::Transform3D;
