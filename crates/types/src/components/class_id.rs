use crate::datatypes;
use crate::macros::delegate_component;

/// Class of an instance, resolved through an annotation context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ClassId(pub datatypes::ClassId);

impl From<u16> for ClassId {
    fn from(id: u16) -> Self {
        Self(datatypes::ClassId(id))
    }
}

delegate_component!(ClassId, datatypes::ClassId, "stratalog.components.ClassId");
