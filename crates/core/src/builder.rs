//! Array builder contract
//!
//! Every loggable type names a builder that accumulates values and is
//! finalized exactly once into an immutable [`ArrayRef`]. Scalars use arrow's
//! own builders; nested layouts use the helpers below, which keep the raw
//! buffers (values, offsets, validity, union type ids) and assemble the
//! final array through arrow's validating constructors, so a malformed
//! layout surfaces as an error instead of a panic.
//!
//! [`PooledBuilder`] ties a builder to its [`Reservation`]; finishing or
//! dropping the builder returns the bytes to the pool.

use crate::error::{SerializationError, SerializationResult};
use crate::memory::Reservation;
use arrow::array::{
    ArrayBuilder, ArrayRef, ArrowPrimitiveType, BooleanBuilder, FixedSizeListArray, ListArray,
    NullArray, PrimitiveArray, PrimitiveBuilder, StringBuilder, StructArray, UnionArray,
};
use arrow::buffer::{OffsetBuffer, ScalarBuffer};
use arrow::datatypes::{DataType, Field, FieldRef, Fields, UnionFields};
use arrow_buffer::NullBufferBuilder;
use std::sync::Arc;

/// Stateful accumulator finalized into one array
pub trait CellBuilder {
    /// Number of slots appended so far
    fn len(&self) -> usize;

    /// True if nothing has been appended
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append one null slot
    fn append_null(&mut self);

    /// Finalize into an immutable array; the builder is consumed
    fn finish(self) -> SerializationResult<ArrayRef>;
}

impl<T: ArrowPrimitiveType> CellBuilder for PrimitiveBuilder<T> {
    fn len(&self) -> usize {
        ArrayBuilder::len(self)
    }

    fn append_null(&mut self) {
        PrimitiveBuilder::append_null(self)
    }

    fn finish(mut self) -> SerializationResult<ArrayRef> {
        Ok(Arc::new(PrimitiveBuilder::finish(&mut self)))
    }
}

impl CellBuilder for BooleanBuilder {
    fn len(&self) -> usize {
        ArrayBuilder::len(self)
    }

    fn append_null(&mut self) {
        BooleanBuilder::append_null(self)
    }

    fn finish(mut self) -> SerializationResult<ArrayRef> {
        Ok(Arc::new(BooleanBuilder::finish(&mut self)))
    }
}

impl CellBuilder for StringBuilder {
    fn len(&self) -> usize {
        ArrayBuilder::len(self)
    }

    fn append_null(&mut self) {
        StringBuilder::append_null(self)
    }

    fn finish(mut self) -> SerializationResult<ArrayRef> {
        Ok(Arc::new(StringBuilder::finish(&mut self)))
    }
}

// ============================================================================
// Null
// ============================================================================

/// Builder for the `Null` datatype; only counts slots
#[derive(Debug, Default)]
pub struct NullCellBuilder {
    len: usize,
}

impl NullCellBuilder {
    /// Append `count` null slots
    pub fn append_nulls(&mut self, count: usize) {
        self.len += count;
    }
}

impl CellBuilder for NullCellBuilder {
    fn len(&self) -> usize {
        self.len
    }

    fn append_null(&mut self) {
        self.len += 1;
    }

    fn finish(self) -> SerializationResult<ArrayRef> {
        Ok(Arc::new(NullArray::new(self.len)))
    }
}

// ============================================================================
// Fixed-size lists
// ============================================================================

/// Fixed-size list of primitives, e.g. a 3D vector or a 3x3 matrix
#[derive(Debug)]
pub struct FixedSizeListCellBuilder<T: ArrowPrimitiveType> {
    field: FieldRef,
    size: usize,
    values: Vec<T::Native>,
    validity: NullBufferBuilder,
}

impl<T: ArrowPrimitiveType> FixedSizeListCellBuilder<T> {
    /// `field` describes the list items; every entry holds `size` of them
    pub fn new(field: FieldRef, size: usize, capacity: usize) -> Self {
        Self {
            field,
            size,
            values: Vec::with_capacity(capacity.saturating_mul(size)),
            validity: NullBufferBuilder::new(capacity),
        }
    }

    /// Items per entry
    pub fn size(&self) -> usize {
        self.size
    }

    /// Append one entry.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` unless `values.len()` equals the list size.
    pub fn append_values(&mut self, values: &[T::Native]) -> SerializationResult<()> {
        if values.len() != self.size {
            return Err(SerializationError::size_mismatch(
                "fixed-size list entry",
                self.size,
                values.len(),
            ));
        }
        self.values.extend_from_slice(values);
        self.validity.append(true);
        Ok(())
    }
}

impl<T: ArrowPrimitiveType> CellBuilder for FixedSizeListCellBuilder<T> {
    fn len(&self) -> usize {
        self.validity.len()
    }

    fn append_null(&mut self) {
        // Masked slots still occupy `size` items.
        self.values
            .extend(std::iter::repeat(T::Native::default()).take(self.size));
        self.validity.append(false);
    }

    fn finish(mut self) -> SerializationResult<ArrayRef> {
        let size = i32::try_from(self.size)
            .map_err(|_| SerializationError::size_mismatch("fixed-size list", i32::MAX as usize, self.size))?;
        let values = PrimitiveArray::<T>::try_new(ScalarBuffer::from(self.values), None)?;
        let array =
            FixedSizeListArray::try_new(self.field, size, Arc::new(values), self.validity.finish())?;
        Ok(Arc::new(array))
    }
}

// ============================================================================
// Variable-size lists
// ============================================================================

/// Variable-size list over any child builder
///
/// Entries are delimited by calling [`ListCellBuilder::close_entry`] after
/// appending an entry's items to [`ListCellBuilder::values_mut`].
#[derive(Debug)]
pub struct ListCellBuilder<B> {
    field: FieldRef,
    offsets: Vec<i32>,
    values: B,
    validity: NullBufferBuilder,
}

impl<B: CellBuilder> ListCellBuilder<B> {
    /// `field` describes the items accumulated by `values`
    pub fn new(field: FieldRef, values: B, capacity: usize) -> Self {
        let mut offsets = Vec::with_capacity(capacity + 1);
        offsets.push(0);
        Self {
            field,
            offsets,
            values,
            validity: NullBufferBuilder::new(capacity),
        }
    }

    /// Child builder receiving the items of the current entry
    pub fn values_mut(&mut self) -> &mut B {
        &mut self.values
    }

    /// End the current entry at the child's current length.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if the child outgrows 32-bit offsets.
    pub fn close_entry(&mut self) -> SerializationResult<()> {
        let end = self.current_offset()?;
        self.offsets.push(end);
        self.validity.append(true);
        Ok(())
    }

    fn current_offset(&self) -> SerializationResult<i32> {
        let len = self.values.len();
        i32::try_from(len)
            .map_err(|_| SerializationError::size_mismatch("list offsets", i32::MAX as usize, len))
    }
}

impl<T: ArrowPrimitiveType> ListCellBuilder<PrimitiveBuilder<T>> {
    /// Append one entry holding `values`
    pub fn append_slice(&mut self, values: &[T::Native]) -> SerializationResult<()> {
        self.values.append_slice(values);
        self.close_entry()
    }
}

impl ListCellBuilder<BooleanBuilder> {
    /// Append one entry holding `values`
    pub fn append_slice(&mut self, values: &[bool]) -> SerializationResult<()> {
        self.values.append_slice(values);
        self.close_entry()
    }
}

impl<B: CellBuilder> CellBuilder for ListCellBuilder<B> {
    fn len(&self) -> usize {
        self.validity.len()
    }

    fn append_null(&mut self) {
        let last = self.offsets.last().copied().unwrap_or(0);
        self.offsets.push(last);
        self.validity.append(false);
    }

    fn finish(mut self) -> SerializationResult<ArrayRef> {
        let offsets = OffsetBuffer::new(ScalarBuffer::from(self.offsets));
        let values = self.values.finish()?;
        let array = ListArray::try_new(self.field, offsets, values, self.validity.finish())?;
        Ok(Arc::new(array))
    }
}

// ============================================================================
// Structs
// ============================================================================

/// Fields and validity of a struct array
///
/// Child builders are owned by the datatype-specific builder and passed to
/// [`StructLayout::finish`] in field order.
#[derive(Debug)]
pub struct StructLayout {
    fields: Fields,
    validity: NullBufferBuilder,
}

impl StructLayout {
    /// Layout for a struct with `fields`
    pub fn new(fields: Fields, capacity: usize) -> Self {
        Self {
            fields,
            validity: NullBufferBuilder::new(capacity),
        }
    }

    /// Record one slot; children must be appended to separately
    pub fn append(&mut self, is_valid: bool) {
        self.validity.append(is_valid);
    }

    /// Slots recorded
    pub fn len(&self) -> usize {
        self.validity.len()
    }

    /// True if no slot was recorded
    pub fn is_empty(&self) -> bool {
        self.validity.is_empty()
    }

    /// Assemble the struct from its children, in field order
    pub fn finish(mut self, children: Vec<ArrayRef>) -> SerializationResult<ArrayRef> {
        let array = StructArray::try_new(self.fields, children, self.validity.finish())?;
        Ok(Arc::new(array))
    }
}

// ============================================================================
// Dense unions
// ============================================================================

/// Name of the child at type id 0 of every union, holding null slots
pub const NULL_MARKERS_FIELD: &str = "_null_markers";

/// Union fields with the null-marker child at type id 0 followed by
/// `variants` at type ids 1, 2, ...
pub fn dense_union_fields(variants: Vec<Field>) -> UnionFields {
    let fields: Vec<Field> = std::iter::once(Field::new(NULL_MARKERS_FIELD, DataType::Null, true))
        .chain(variants)
        .collect();
    let type_ids = (0..).take(fields.len());
    UnionFields::new(type_ids, fields)
}

/// Type ids and offsets of a dense union built by [`dense_union_fields`]
///
/// The variant children are owned by the datatype-specific builder; this
/// tracks which child each slot points into and counts null slots.
#[derive(Debug)]
pub struct DenseUnionLayout {
    fields: UnionFields,
    type_ids: Vec<i8>,
    offsets: Vec<i32>,
    child_lens: Vec<i32>,
}

impl DenseUnionLayout {
    /// Layout for a union whose type ids are `0..fields.len()`
    pub fn new(fields: UnionFields, capacity: usize) -> Self {
        let max_type_id = fields.iter().map(|(id, _)| id).max().unwrap_or(0);
        let child_lens = vec![0; usize::try_from(max_type_id).unwrap_or(0) + 1];
        Self {
            fields,
            type_ids: Vec::with_capacity(capacity),
            offsets: Vec::with_capacity(capacity),
            child_lens,
        }
    }

    /// Record one slot pointing at the next item of child `type_id`.
    ///
    /// # Errors
    ///
    /// Returns an arrow error for a type id outside the union.
    pub fn push(&mut self, type_id: i8) -> SerializationResult<()> {
        let slot = usize::try_from(type_id)
            .ok()
            .and_then(|index| self.child_lens.get_mut(index))
            .ok_or_else(|| SerializationError::Arrow(format!("Unknown union type id {type_id}")))?;
        self.offsets.push(*slot);
        *slot += 1;
        self.type_ids.push(type_id);
        Ok(())
    }

    /// Record one null slot
    pub fn push_null(&mut self) {
        // child_lens always has an entry for type id 0
        let slot = &mut self.child_lens[0];
        self.offsets.push(*slot);
        *slot += 1;
        self.type_ids.push(0);
    }

    /// Slots recorded
    pub fn len(&self) -> usize {
        self.type_ids.len()
    }

    /// True if no slot was recorded
    pub fn is_empty(&self) -> bool {
        self.type_ids.is_empty()
    }

    /// Assemble the union; `variants` are the children for type ids 1, 2, ...
    pub fn finish(self, variants: Vec<ArrayRef>) -> SerializationResult<ArrayRef> {
        let null_markers = usize::try_from(self.child_lens[0]).unwrap_or(0);
        let children: Vec<ArrayRef> = std::iter::once(Arc::new(NullArray::new(null_markers)) as ArrayRef)
            .chain(variants)
            .collect();
        let array = UnionArray::try_new(
            self.fields,
            ScalarBuffer::from(self.type_ids),
            Some(ScalarBuffer::from(self.offsets)),
            children,
        )?;
        Ok(Arc::new(array))
    }
}

// ============================================================================
// Pool-backed builders
// ============================================================================

/// A builder together with the pool bytes it holds
#[derive(Debug)]
pub struct PooledBuilder<B> {
    builder: B,
    reservation: Reservation,
    slot_bytes: usize,
    reserved_slots: usize,
}

impl<B: CellBuilder> PooledBuilder<B> {
    /// `reservation` already covers `reserved_slots` slots of `slot_bytes` each
    pub fn new(builder: B, reservation: Reservation, slot_bytes: usize, reserved_slots: usize) -> Self {
        Self {
            builder,
            reservation,
            slot_bytes,
            reserved_slots,
        }
    }

    /// The wrapped builder
    pub fn builder(&self) -> &B {
        &self.builder
    }

    /// The wrapped builder, for appending
    pub fn builder_mut(&mut self) -> &mut B {
        &mut self.builder
    }

    /// Bytes held for this builder
    pub fn reservation(&self) -> &Reservation {
        &self.reservation
    }

    /// Slots appended so far
    pub fn len(&self) -> usize {
        self.builder.len()
    }

    /// True if nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.builder.is_empty()
    }

    /// Charge `bytes` of variable-length payload to the pool
    pub fn charge(&mut self, bytes: usize) -> SerializationResult<()> {
        self.reservation.grow(bytes)
    }

    /// Charge for `count` more slots beyond what was reserved up front
    pub fn charge_slots(&mut self, count: usize) -> SerializationResult<()> {
        let len = self.builder.len();
        let covered = self.reserved_slots.max(len);
        let wanted = len.saturating_add(count);
        let extra = wanted.saturating_sub(covered);
        self.charge(extra.saturating_mul(self.slot_bytes))?;
        self.reserved_slots = self.reserved_slots.max(wanted);
        Ok(())
    }

    /// Finalize the builder and return its bytes to the pool
    pub fn finish(self) -> SerializationResult<ArrayRef> {
        let PooledBuilder {
            builder,
            reservation,
            ..
        } = self;
        let array = builder.finish();
        drop(reservation);
        array
    }
}
