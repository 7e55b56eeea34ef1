//! One serialized component column
//!
//! A [`DataCell`] pairs a component name with the arrow array holding all of
//! its instances. Cells are immutable; they are produced by
//! [`Component::to_data_cell`](crate::Component::to_data_cell) and by the
//! archetype composer.

use crate::error::{SerializationError, SerializationResult};
use crate::names::ComponentName;
use arrow::array::{Array, ArrayRef};
use arrow::datatypes::DataType;

/// What a cell carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Component values
    Component,
    /// Zero-payload archetype marker
    Indicator,
}

/// Component name, array, and the declared datatype of the array
#[derive(Debug, Clone)]
pub struct DataCell {
    component_name: ComponentName,
    array: ArrayRef,
    datatype: DataType,
    kind: CellKind,
}

impl DataCell {
    /// Create a component cell.
    ///
    /// # Errors
    ///
    /// Returns `DatatypeMismatch` if `array` is not of type `datatype`.
    pub fn try_new(
        component_name: ComponentName,
        array: ArrayRef,
        datatype: DataType,
    ) -> SerializationResult<Self> {
        Self::try_new_with_kind(component_name, array, datatype, CellKind::Component)
    }

    /// Create a cell of the given kind.
    ///
    /// # Errors
    ///
    /// Returns `DatatypeMismatch` if `array` is not of type `datatype`.
    pub fn try_new_with_kind(
        component_name: ComponentName,
        array: ArrayRef,
        datatype: DataType,
        kind: CellKind,
    ) -> SerializationResult<Self> {
        if array.data_type() != &datatype {
            return Err(SerializationError::datatype_mismatch(
                component_name.to_string(),
                &datatype,
                array.data_type(),
            ));
        }
        Ok(Self {
            component_name,
            array,
            datatype,
            kind,
        })
    }

    /// Name of the component stored in this cell
    pub fn component_name(&self) -> &ComponentName {
        &self.component_name
    }

    /// The serialized instances
    pub fn array(&self) -> &ArrayRef {
        &self.array
    }

    /// Declared datatype; always equal to `array().data_type()`
    pub fn datatype(&self) -> &DataType {
        &self.datatype
    }

    /// Component or indicator
    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// True for indicator cells
    pub fn is_indicator(&self) -> bool {
        self.kind == CellKind::Indicator
    }

    /// Number of serialized instances
    pub fn num_instances(&self) -> usize {
        self.array.len()
    }

    /// Bytes held by the array's buffers
    pub fn size_bytes(&self) -> usize {
        self.array.get_array_memory_size()
    }

    /// Split into name and array
    pub fn into_parts(self) -> (ComponentName, ArrayRef) {
        (self.component_name, self.array)
    }
}
