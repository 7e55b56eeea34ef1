//! Tensor archetype
//!
//! A single N-dimensional tensor. One tensor is one instance, so the
//! indicator always has length 1.

use crate::components::TensorData;
use crate::datatypes::{self, TensorBuffer, TensorDimension, TensorElement};
use stratalog_core::{
    Archetype, ArchetypeCells, ArchetypeName, AsComponents, BestEffort, CellComposer, Collection,
    MemoryPool, SerializationResult,
};

/// An N-dimensional array of numbers or an encoded image
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<'a> {
    /// Shape and elements
    pub data: TensorData<'a>,
}

impl<'a> Tensor<'a> {
    /// Tensor from shape and buffer
    pub fn new(shape: impl Into<Collection<'a, TensorDimension>>, buffer: TensorBuffer<'a>) -> Self {
        Self {
            data: TensorData::new(shape, buffer),
        }
    }

    /// Tensor over `elements` with unnamed dimensions of the given sizes
    pub fn from_elements<T: TensorElement>(
        sizes: impl IntoIterator<Item = u64>,
        elements: impl Into<Collection<'a, T>>,
    ) -> Self {
        Self {
            data: TensorData(datatypes::TensorData::from_elements(sizes, elements)),
        }
    }

    /// Name every dimension.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` unless there is exactly one name per dimension.
    pub fn try_with_dim_names<S: Into<String>>(
        self,
        names: impl IntoIterator<Item = S>,
    ) -> SerializationResult<Self> {
        let data = self.data.0.try_with_dim_names(names)?;
        Ok(Self {
            data: TensorData(data),
        })
    }

    /// Name as many dimensions as there are names for, reporting any
    /// count mismatch as a diagnostic
    pub fn with_dim_names_best_effort<S: Into<String>>(
        self,
        names: impl IntoIterator<Item = S>,
    ) -> BestEffort<Self> {
        self.data
            .0
            .with_dim_names_best_effort(names)
            .map(|data| Self {
                data: TensorData(data),
            })
    }

    /// Dimensions of the tensor
    pub fn shape(&self) -> &Collection<'a, TensorDimension> {
        &self.data.0.shape
    }
}

impl Archetype for Tensor<'_> {
    fn name() -> ArchetypeName {
        ArchetypeName::new_static("stratalog.archetypes.Tensor")
    }

    fn num_instances(&self) -> usize {
        1
    }
}

impl AsComponents for Tensor<'_> {
    fn to_archetype_cells(&self, pool: &MemoryPool) -> SerializationResult<ArchetypeCells> {
        let mut composer = CellComposer::new(pool, 1);
        composer.push_one(&self.data)?;
        composer.finish(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratalog_core::ErrorKind;

    #[test]
    fn test_cells_in_order() {
        let elements = [1u8, 2, 3, 4, 5, 6];
        let cells = Tensor::from_elements([2, 3], &elements[..]).serialize().unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].component_name(), "stratalog.components.TensorData");
        assert_eq!(cells[0].num_instances(), 1);
        assert_eq!(cells[1].component_name(), "stratalog.components.TensorIndicator");
        assert_eq!(cells[1].num_instances(), 1);
    }

    #[test]
    fn test_shape_mismatch_aborts() {
        let elements = [0.5f32; 6];
        let err = Tensor::from_elements([2, 4], &elements[..]).serialize().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeMismatch);
    }

    #[test]
    fn test_dim_names() {
        let tensor = Tensor::from_elements([3, 1], vec![1i16, 2, 3])
            .try_with_dim_names(["height", "width"])
            .unwrap();
        let dims = tensor.shape().try_as_slice().unwrap();
        assert_eq!(dims[1].name.as_deref(), Some("width"));

        let result = tensor.with_dim_names_best_effort(["h", "w", "c"]);
        assert!(!result.is_clean());
        assert_eq!(result.value.shape().try_as_slice().unwrap()[0].name.as_deref(), Some("h"));
    }
}
