//! Archetype indicator components
//!
//! Every archetype contributes one extra cell named
//! `stratalog.components.<Archetype>Indicator`. It carries no payload (a
//! `Null` array with one slot per archetype instance); readers use it to
//! tell which archetype produced a set of columns.

use crate::archetype::Archetype;
use crate::builder::{CellBuilder, NullCellBuilder};
use crate::data_cell::DataCell;
use crate::error::SerializationResult;
use crate::loggable::{Component, Loggable};
use crate::memory::MemoryPool;
use crate::names::ComponentName;
use arrow::datatypes::DataType;
use std::fmt;
use std::marker::PhantomData;

static NULL_DATATYPE: DataType = DataType::Null;

/// Zero-sized marker component for archetype `A`
pub struct IndicatorComponent<A: Archetype> {
    _archetype: PhantomData<fn() -> A>,
}

impl<A: Archetype> IndicatorComponent<A> {
    /// The marker value
    pub const fn new() -> Self {
        Self {
            _archetype: PhantomData,
        }
    }

    /// Indicator cell for `num_instances` archetype instances
    pub fn to_indicator_cell(pool: &MemoryPool, num_instances: usize) -> SerializationResult<DataCell> {
        let markers = vec![Self::new(); num_instances];
        Self::to_data_cell_with(pool, &markers)
    }
}

impl<A: Archetype> Default for IndicatorComponent<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Archetype> Clone for IndicatorComponent<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: Archetype> Copy for IndicatorComponent<A> {}

impl<A: Archetype> fmt::Debug for IndicatorComponent<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndicatorComponent({})", A::indicator_name())
    }
}

impl<A: Archetype> Loggable for IndicatorComponent<A> {
    type Name = ComponentName;
    type Builder = NullCellBuilder;

    fn name() -> ComponentName {
        A::indicator_name()
    }

    fn arrow_datatype() -> &'static DataType {
        &NULL_DATATYPE
    }

    fn new_builder(_capacity: usize) -> NullCellBuilder {
        NullCellBuilder::default()
    }

    fn append_to_builder(builder: &mut NullCellBuilder, _value: &Self) -> SerializationResult<()> {
        builder.append_null();
        Ok(())
    }
}

impl<A: Archetype> Component for IndicatorComponent<A> {
    fn is_indicator() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::ArchetypeName;

    struct Points;

    impl Archetype for Points {
        fn name() -> ArchetypeName {
            ArchetypeName::new_static("stratalog.archetypes.Points")
        }

        fn num_instances(&self) -> usize {
            1
        }
    }

    #[test]
    fn test_indicator_name() {
        assert_eq!(
            IndicatorComponent::<Points>::name(),
            "stratalog.components.PointsIndicator"
        );
    }

    #[test]
    fn test_indicator_cell_is_null_array() {
        let pool = MemoryPool::unbounded("test");
        let cell = IndicatorComponent::<Points>::to_indicator_cell(&pool, 3).unwrap();
        assert!(cell.is_indicator());
        assert_eq!(cell.datatype(), &DataType::Null);
        assert_eq!(cell.num_instances(), 3);
        assert_eq!(pool.in_use(), 0);
    }

    #[test]
    fn test_indicator_is_zero_sized() {
        assert_eq!(std::mem::size_of::<IndicatorComponent<Points>>(), 0);
    }
}
