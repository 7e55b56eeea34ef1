use crate::datatypes;
use crate::macros::delegate_component;

/// An affine transform between two 3D spaces
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform3D(pub datatypes::Transform3D);

impl From<datatypes::TranslationAndMat3x3> for Transform3D {
    fn from(transform: datatypes::TranslationAndMat3x3) -> Self {
        Self(transform.into())
    }
}

impl From<datatypes::TranslationRotationScale3D> for Transform3D {
    fn from(transform: datatypes::TranslationRotationScale3D) -> Self {
        Self(transform.into())
    }
}

delegate_component!(Transform3D, datatypes::Transform3D, "stratalog.components.Transform3D");
