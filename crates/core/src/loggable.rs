//! Codec traits for datatypes and components
//!
//! [`Loggable`] is the per-type codec contract: a memoized arrow schema, a
//! builder type, and how one value is appended to that builder. The
//! provided methods implement the pool-aware pipeline on top of it:
//!
//! ```text
//! new_arrow_array_builder(pool) -> fill_arrow_array_builder(values) -> finish_arrow_array()
//! ```
//!
//! [`Datatype`] and [`Component`] only differ in the kind of name they
//! carry. Components add [`Component::to_data_cell`], which wraps the finished
//! array into a [`DataCell`].

use crate::builder::{CellBuilder, PooledBuilder};
use crate::collection::Collection;
use crate::data_cell::{CellKind, DataCell};
use crate::error::{SerializationError, SerializationResult};
use crate::memory::{default_pool, MemoryPool};
use crate::names::{ComponentName, DatatypeName};
use arrow::array::{Array, ArrayRef};
use arrow::datatypes::DataType;
use std::fmt::Display;
use tracing::debug;

/// A type that can be serialized into an arrow array
pub trait Loggable: Sized {
    /// [`DatatypeName`] or [`ComponentName`]
    type Name: Display;

    /// Builder accumulating values of this type
    type Builder: CellBuilder;

    /// Stable name of this type
    fn name() -> Self::Name;

    /// Arrow schema of the serialized array; computed once and reused
    fn arrow_datatype() -> &'static DataType;

    /// Fresh builder with room for `capacity` values
    fn new_builder(capacity: usize) -> Self::Builder;

    /// Append one value.
    ///
    /// Composite types append to their child builders in the field order of
    /// [`Loggable::arrow_datatype`].
    fn append_to_builder(builder: &mut Self::Builder, value: &Self) -> SerializationResult<()>;

    /// Heap bytes owned or borrowed by this value beyond `size_of::<Self>()`
    fn heap_size_bytes(&self) -> usize {
        0
    }

    /// Builder drawing from `pool`, preallocated for `capacity` values.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailed` if the pool cannot cover `capacity` values.
    fn new_arrow_array_builder(
        pool: &MemoryPool,
        capacity: usize,
    ) -> SerializationResult<PooledBuilder<Self::Builder>> {
        let slot_bytes = std::mem::size_of::<Self>();
        let reservation = pool.reserve(capacity.saturating_mul(slot_bytes))?;
        Ok(PooledBuilder::new(
            Self::new_builder(capacity),
            reservation,
            slot_bytes,
            capacity,
        ))
    }

    /// Append `elements`, in order.
    ///
    /// The pool is charged for the elements before anything is appended, so
    /// an allocation failure leaves the builder unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the pool or by
    /// [`Loggable::append_to_builder`].
    fn fill_arrow_array_builder(
        builder: &mut PooledBuilder<Self::Builder>,
        elements: &[Self],
    ) -> SerializationResult<()> {
        let heap_bytes = elements
            .iter()
            .map(Self::heap_size_bytes)
            .fold(0usize, usize::saturating_add);
        builder.charge_slots(elements.len())?;
        builder.charge(heap_bytes)?;
        for element in elements {
            Self::append_to_builder(builder.builder_mut(), element)?;
        }
        Ok(())
    }

    /// Finalize a builder and check the result against the declared schema.
    ///
    /// # Errors
    ///
    /// Returns `DatatypeMismatch` if the finished array's datatype differs
    /// from [`Loggable::arrow_datatype`].
    fn finish_arrow_array(builder: PooledBuilder<Self::Builder>) -> SerializationResult<ArrayRef> {
        let array = builder.finish()?;
        let expected = Self::arrow_datatype();
        if array.data_type() != expected {
            return Err(SerializationError::datatype_mismatch(
                Self::name().to_string(),
                expected,
                array.data_type(),
            ));
        }
        Ok(array)
    }

    /// Serialize `elements` into one array using `pool`
    fn to_arrow_with(pool: &MemoryPool, elements: &[Self]) -> SerializationResult<ArrayRef> {
        let mut builder = Self::new_arrow_array_builder(pool, elements.len())?;
        Self::fill_arrow_array_builder(&mut builder, elements)?;
        Self::finish_arrow_array(builder)
    }

    /// Serialize `elements` into one array using the default pool
    fn to_arrow(elements: &[Self]) -> SerializationResult<ArrayRef> {
        Self::to_arrow_with(default_pool(), elements)
    }
}

/// A loggable identified by a [`DatatypeName`]
pub trait Datatype: Loggable<Name = DatatypeName> {}

/// A loggable identified by a [`ComponentName`]; serializes into a [`DataCell`]
pub trait Component: Loggable<Name = ComponentName> {
    /// True for archetype indicator components
    fn is_indicator() -> bool {
        false
    }

    /// Serialize `instances` into one cell using `pool`.
    ///
    /// Allocates exactly one builder and one array. An empty slice yields an
    /// empty array.
    ///
    /// # Errors
    ///
    /// Any codec failure is returned unchanged.
    fn to_data_cell_with(pool: &MemoryPool, instances: &[Self]) -> SerializationResult<DataCell> {
        let name = Self::name();
        debug!(component = %name, num_instances = instances.len(), "serializing component");
        let array = Self::to_arrow_with(pool, instances)?;
        let kind = if Self::is_indicator() {
            CellKind::Indicator
        } else {
            CellKind::Component
        };
        DataCell::try_new_with_kind(name, array, Self::arrow_datatype().clone(), kind)
    }

    /// Serialize `instances` into one cell using the default pool
    fn to_data_cell(instances: &[Self]) -> SerializationResult<DataCell> {
        Self::to_data_cell_with(default_pool(), instances)
    }

    /// Serialize a collection into one cell using `pool`.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedNullArgument` for a null collection, otherwise as
    /// [`Component::to_data_cell_with`].
    fn collection_to_data_cell(
        pool: &MemoryPool,
        instances: &Collection<'_, Self>,
    ) -> SerializationResult<DataCell> {
        Self::to_data_cell_with(pool, instances.try_as_slice()?)
    }
}
