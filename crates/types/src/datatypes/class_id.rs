//! Class identifier, a `u16` lookup key into annotation context.

use crate::macros::impl_primitive_loggable;
use arrow::datatypes::{DataType, UInt16Type};
use stratalog_core::Datatype;

/// Identifier of a class in an annotation context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ClassId(pub u16);

impl_primitive_loggable!(
    ClassId,
    UInt16Type,
    DatatypeName,
    "stratalog.datatypes.ClassId",
    DataType::UInt16
);

impl Datatype for ClassId {}

impl From<u16> for ClassId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}
