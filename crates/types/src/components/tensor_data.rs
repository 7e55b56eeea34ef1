//! Tensor payload component
//!
//! Written out by hand rather than through `delegate_component!`, which
//! cannot carry the borrow lifetime of the wrapped tensor.

use crate::datatypes::{self, TensorBuffer, TensorDimension};
use arrow::datatypes::DataType;
use stratalog_core::{Collection, Component, ComponentName, Loggable, SerializationResult};

/// Tensor shape and elements
#[derive(Debug, Clone, PartialEq)]
pub struct TensorData<'a>(pub datatypes::TensorData<'a>);

impl<'a> TensorData<'a> {
    /// Component from shape and buffer
    pub fn new(shape: impl Into<Collection<'a, TensorDimension>>, buffer: TensorBuffer<'a>) -> Self {
        Self(datatypes::TensorData::new(shape, buffer))
    }
}

impl<'a> From<datatypes::TensorData<'a>> for TensorData<'a> {
    fn from(data: datatypes::TensorData<'a>) -> Self {
        Self(data)
    }
}

impl<'a> Loggable for TensorData<'a> {
    type Name = ComponentName;
    type Builder = <datatypes::TensorData<'a> as Loggable>::Builder;

    fn name() -> ComponentName {
        ComponentName::new_static("stratalog.components.TensorData")
    }

    fn arrow_datatype() -> &'static DataType {
        datatypes::TensorData::arrow_datatype()
    }

    fn new_builder(capacity: usize) -> Self::Builder {
        datatypes::TensorData::new_builder(capacity)
    }

    fn append_to_builder(builder: &mut Self::Builder, value: &Self) -> SerializationResult<()> {
        datatypes::TensorData::append_to_builder(builder, &value.0)
    }

    fn heap_size_bytes(&self) -> usize {
        self.0.heap_size_bytes()
    }
}

impl Component for TensorData<'_> {}
