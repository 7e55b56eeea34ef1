//! Single-precision scalar.

use crate::macros::impl_primitive_loggable;
use arrow::datatypes::{DataType, Float32Type};
use stratalog_core::Datatype;

/// A single-precision float
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Float32(pub f32);

impl_primitive_loggable!(
    Float32,
    Float32Type,
    DatatypeName,
    "stratalog.datatypes.Float32",
    DataType::Float32
);

impl Datatype for Float32 {}

impl From<f32> for Float32 {
    fn from(value: f32) -> Self {
        Self(value)
    }
}
