//! N-dimensional tensor: shape plus flattened buffer
//!
//! The element count of the buffer must equal the product of the shape
//! sizes. This is checked when the tensor is serialized, not when it is
//! built, so that borrowed buffers can be wrapped without touching them.
//! JPEG buffers are exempt since their byte count is unrelated to the
//! decoded shape.

use crate::datatypes::{
    item_field, TensorBuffer, TensorBufferBuilder, TensorDimension, TensorDimensionBuilder,
    TensorElement,
};
use arrow::array::ArrayRef;
use arrow::datatypes::{DataType, Field, Fields};
use once_cell::sync::Lazy;
use stratalog_core::{
    BestEffort, CellBuilder, Collection, Datatype, DatatypeName, ListCellBuilder, Loggable,
    SerializationError, SerializationResult, StructLayout,
};
use tracing::warn;

/// A tensor shape together with its elements
#[derive(Debug, Clone, PartialEq)]
pub struct TensorData<'a> {
    /// Dimensions, outermost first
    pub shape: Collection<'a, TensorDimension>,
    /// Flattened elements in row-major order
    pub buffer: TensorBuffer<'a>,
}

impl<'a> TensorData<'a> {
    /// Tensor from shape and buffer; the element count is checked on serialization
    pub fn new(shape: impl Into<Collection<'a, TensorDimension>>, buffer: TensorBuffer<'a>) -> Self {
        Self {
            shape: shape.into(),
            buffer,
        }
    }

    /// Tensor over `elements` with unnamed dimensions of the given sizes
    pub fn from_elements<T: TensorElement>(
        sizes: impl IntoIterator<Item = u64>,
        elements: impl Into<Collection<'a, T>>,
    ) -> Self {
        Self {
            shape: sizes.into_iter().map(TensorDimension::unnamed).collect(),
            buffer: TensorBuffer::from_elements(elements),
        }
    }

    /// Product of the shape sizes; 1 for an empty shape.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedNullArgument` for a null shape and `SizeMismatch`
    /// if the product does not fit in `usize`.
    pub fn num_elements(&self) -> SerializationResult<usize> {
        let product = self
            .shape
            .try_as_slice()?
            .iter()
            .try_fold(1u64, |acc, dim| acc.checked_mul(dim.size));
        product
            .and_then(|product| usize::try_from(product).ok())
            .ok_or_else(|| {
                SerializationError::size_mismatch(
                    "tensor shape product overflows usize",
                    usize::MAX,
                    self.buffer.len(),
                )
            })
    }

    /// Check the buffer against the shape.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedNullArgument` if the shape or buffer is null, and
    /// `SizeMismatch` if the element count differs from the shape product.
    pub fn validate(&self) -> SerializationResult<()> {
        let expected = self.num_elements()?;
        if self.buffer.is_null() {
            return Err(SerializationError::unexpected_null(format!(
                "{} tensor buffer has a null data pointer",
                self.buffer.kind()
            )));
        }
        if self.buffer.kind().is_encoded() {
            return Ok(());
        }
        let actual = self.buffer.len();
        if actual != expected {
            return Err(SerializationError::size_mismatch(
                format!("{} tensor buffer", self.buffer.kind()),
                expected,
                actual,
            ));
        }
        Ok(())
    }

    /// Name every dimension, failing unless there is exactly one name per
    /// dimension.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if the counts differ and
    /// `UnexpectedNullArgument` for a null shape.
    pub fn try_with_dim_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> SerializationResult<Self> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != self.shape.len() {
            return Err(SerializationError::size_mismatch(
                "tensor dimension names",
                self.shape.len(),
                names.len(),
            ));
        }
        self.apply_dim_names(names)?;
        Ok(self)
    }

    /// Name as many dimensions as there are names for.
    ///
    /// Existing names are overwritten. Surplus names, or dimensions left
    /// without a name, are reported as one `SizeMismatch` diagnostic.
    pub fn with_dim_names_best_effort<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> BestEffort<Self> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let num_dims = self.shape.len();
        let mismatch = (names.len() != num_dims).then(|| {
            warn!(
                num_dims,
                num_names = names.len(),
                "dimension name count differs from tensor rank, applying the overlap"
            );
            SerializationError::size_mismatch("tensor dimension names", num_dims, names.len())
        });

        if let Err(err) = self.apply_dim_names(names) {
            warn!(error = %err, "could not name tensor dimensions");
            return BestEffort::with_diagnostic(self, err);
        }
        match mismatch {
            Some(diagnostic) => BestEffort::with_diagnostic(self, diagnostic),
            None => BestEffort::clean(self),
        }
    }

    fn apply_dim_names(&mut self, names: Vec<String>) -> SerializationResult<()> {
        let dims = self.shape.to_mut()?;
        for (dim, name) in dims.iter_mut().zip(names) {
            dim.name = Some(name);
        }
        Ok(())
    }

    /// Detach from borrowed memory.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedNullArgument` if the shape or buffer is null.
    pub fn into_owned(self) -> SerializationResult<TensorData<'static>> {
        Ok(TensorData {
            shape: self.shape.into_owned()?,
            buffer: self.buffer.into_owned()?,
        })
    }
}

static FIELDS: Lazy<Fields> = Lazy::new(|| {
    Fields::from(vec![
        Field::new(
            "shape",
            DataType::List(item_field(TensorDimension::arrow_datatype().clone())),
            false,
        ),
        Field::new("buffer", TensorBuffer::arrow_datatype().clone(), false),
    ])
});

static DATATYPE: Lazy<DataType> = Lazy::new(|| DataType::Struct(FIELDS.clone()));

/// Builder for [`TensorData`]
#[derive(Debug)]
pub struct TensorDataBuilder {
    layout: StructLayout,
    shape: ListCellBuilder<TensorDimensionBuilder>,
    buffer: TensorBufferBuilder,
}

impl CellBuilder for TensorDataBuilder {
    fn len(&self) -> usize {
        self.layout.len()
    }

    fn append_null(&mut self) {
        self.layout.append(false);
        self.shape.append_null();
        self.buffer.append_null();
    }

    fn finish(self) -> SerializationResult<ArrayRef> {
        let shape = self.shape.finish()?;
        let buffer = self.buffer.finish()?;
        self.layout.finish(vec![shape, buffer])
    }
}

impl<'a> Loggable for TensorData<'a> {
    type Name = DatatypeName;
    type Builder = TensorDataBuilder;

    fn name() -> DatatypeName {
        DatatypeName::new_static("stratalog.datatypes.TensorData")
    }

    fn arrow_datatype() -> &'static DataType {
        &DATATYPE
    }

    fn new_builder(capacity: usize) -> TensorDataBuilder {
        TensorDataBuilder {
            layout: StructLayout::new(FIELDS.clone(), capacity),
            shape: ListCellBuilder::new(
                item_field(TensorDimension::arrow_datatype().clone()),
                TensorDimension::new_builder(0),
                capacity,
            ),
            buffer: TensorBuffer::new_builder(capacity),
        }
    }

    fn append_to_builder(builder: &mut TensorDataBuilder, value: &Self) -> SerializationResult<()> {
        value.validate()?;
        for dim in value.shape.try_as_slice()? {
            TensorDimension::append_to_builder(builder.shape.values_mut(), dim)?;
        }
        builder.shape.close_entry()?;
        TensorBuffer::append_to_builder(&mut builder.buffer, &value.buffer)?;
        builder.layout.append(true);
        Ok(())
    }

    fn heap_size_bytes(&self) -> usize {
        let dims = self.shape.try_as_slice().unwrap_or_default();
        let shape_bytes = dims
            .iter()
            .map(|dim| std::mem::size_of::<TensorDimension>() + dim.heap_size_bytes())
            .sum::<usize>();
        shape_bytes + self.buffer.heap_size_bytes()
    }
}

impl Datatype for TensorData<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, AsArray};
    use stratalog_core::ErrorKind;

    #[test]
    fn test_matching_shape_serializes() {
        let elements = [1u8, 2, 3, 4, 5, 6];
        let tensor = TensorData::from_elements([2, 3], &elements[..]);
        assert_eq!(tensor.num_elements().unwrap(), 6);
        let array = TensorData::to_arrow(&[tensor]).unwrap();

        let structs = array.as_struct();
        let shapes = structs.column(0).as_list::<i32>();
        assert_eq!(shapes.value(0).len(), 2);
    }

    #[test]
    fn test_shape_mismatch() {
        let elements = [0.0f32; 6];
        let tensor = TensorData::from_elements([2, 4], &elements[..]);
        let err = TensorData::to_arrow(&[tensor]).unwrap_err();
        assert!(matches!(
            err,
            SerializationError::SizeMismatch {
                expected: 8,
                actual: 6,
                ..
            }
        ));
    }

    #[test]
    fn test_jpeg_exempt_from_shape_check() {
        let tensor = TensorData::new(
            vec![
                TensorDimension::height(480),
                TensorDimension::width(640),
                TensorDimension::depth(3),
            ],
            TensorBuffer::jpeg(vec![0xFF, 0xD8, 0xFF]),
        );
        assert!(tensor.validate().is_ok());
    }

    #[test]
    fn test_overflowing_shape() {
        let tensor = TensorData::from_elements([u64::MAX, 2], vec![1u8]);
        assert_eq!(tensor.validate().unwrap_err().kind(), ErrorKind::SizeMismatch);
    }

    #[test]
    fn test_strict_dim_names() {
        let tensor = TensorData::from_elements([2, 2], vec![0i32; 4]);
        let named = tensor.clone().try_with_dim_names(["rows", "cols"]).unwrap();
        let dims = named.shape.try_as_slice().unwrap();
        assert_eq!(dims[0].name.as_deref(), Some("rows"));
        assert_eq!(dims[1].name.as_deref(), Some("cols"));

        let err = tensor.try_with_dim_names(["rows"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeMismatch);
    }

    #[test]
    fn test_best_effort_dim_names() {
        let tensor = TensorData::from_elements([2, 3, 1], vec![0.0f64; 6]);
        let result = tensor.with_dim_names_best_effort(["a", "b"]);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind(), ErrorKind::SizeMismatch);
        let dims = result.value.shape.try_as_slice().unwrap();
        assert_eq!(dims[0].name.as_deref(), Some("a"));
        assert_eq!(dims[1].name.as_deref(), Some("b"));
        assert_eq!(dims[2].name, None);
    }

    #[test]
    fn test_names_do_not_touch_borrowed_shape() {
        let dims = vec![TensorDimension::unnamed(2)];
        let tensor = TensorData::new(&dims, TensorBuffer::from_elements(vec![1u16, 2]));
        let named = tensor.try_with_dim_names(["x"]).unwrap();
        assert_eq!(dims[0].name, None);
        assert_eq!(named.shape.try_as_slice().unwrap()[0].name.as_deref(), Some("x"));
    }
}
