//! Archetypes and the cell composer
//!
//! An archetype is a fixed, ordered set of optional component slots.
//! Serializing one yields a cell per populated slot, in declared order,
//! followed by the archetype's indicator cell. The first failing slot aborts
//! the whole archetype; no partial cell list is ever returned.

use crate::collection::Collection;
use crate::data_cell::DataCell;
use crate::error::SerializationResult;
use crate::indicator::IndicatorComponent;
use crate::loggable::Component;
use crate::memory::{default_pool, MemoryPool};
use crate::names::{ArchetypeName, ComponentName, NAMESPACE};
use tracing::debug;

/// A named bundle of component slots
pub trait Archetype: Sized {
    /// Stable archetype name, e.g. `stratalog.archetypes.Tensor`
    fn name() -> ArchetypeName;

    /// Name of the indicator component, `stratalog.components.<Archetype>Indicator`
    fn indicator_name() -> ComponentName {
        ComponentName::from(format!(
            "{NAMESPACE}.components.{}Indicator",
            Self::name().short_name()
        ))
    }

    /// Number of primary instances; sizes the indicator cell
    fn num_instances(&self) -> usize;
}

/// Conversion of an archetype into its ordered cells
pub trait AsComponents: Archetype {
    /// Serialize every populated slot followed by the indicator.
    ///
    /// # Errors
    ///
    /// The first slot failure is returned unchanged.
    fn to_archetype_cells(&self, pool: &MemoryPool) -> SerializationResult<ArchetypeCells>;

    /// Cells of this archetype, drawing builders from `pool`
    fn serialize_with(&self, pool: &MemoryPool) -> SerializationResult<Vec<DataCell>> {
        Ok(self.to_archetype_cells(pool)?.into_cells())
    }

    /// Cells of this archetype, drawing builders from the default pool
    fn serialize(&self) -> SerializationResult<Vec<DataCell>> {
        self.serialize_with(default_pool())
    }
}

/// Ordered cells produced by one archetype
#[derive(Debug, Clone)]
pub struct ArchetypeCells {
    archetype_name: ArchetypeName,
    cells: Vec<DataCell>,
}

impl ArchetypeCells {
    /// Archetype that produced these cells
    pub fn archetype_name(&self) -> &ArchetypeName {
        &self.archetype_name
    }

    /// All cells, indicator last
    pub fn cells(&self) -> &[DataCell] {
        &self.cells
    }

    /// Cells excluding the indicator
    pub fn component_cells(&self) -> impl Iterator<Item = &DataCell> {
        self.cells.iter().filter(|cell| !cell.is_indicator())
    }

    /// The indicator cell
    pub fn indicator(&self) -> Option<&DataCell> {
        self.cells.iter().find(|cell| cell.is_indicator())
    }

    /// Look up a cell by component name
    pub fn get(&self, name: &str) -> Option<&DataCell> {
        self.cells
            .iter()
            .find(|cell| cell.component_name().as_str() == name)
    }

    /// Number of cells, indicator included
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for composed archetypes, which carry an indicator
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Give up the archetype name
    pub fn into_cells(self) -> Vec<DataCell> {
        self.cells
    }
}

impl IntoIterator for ArchetypeCells {
    type Item = DataCell;
    type IntoIter = std::vec::IntoIter<DataCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

// ============================================================================
// Composer
// ============================================================================

/// Accumulates the cells of one archetype in slot order
#[derive(Debug)]
pub struct CellComposer<'p> {
    pool: &'p MemoryPool,
    cells: Vec<DataCell>,
}

impl<'p> CellComposer<'p> {
    /// Composer for an archetype with `num_slots` component slots
    pub fn new(pool: &'p MemoryPool, num_slots: usize) -> Self {
        Self {
            pool,
            cells: Vec::with_capacity(num_slots + 1),
        }
    }

    /// Serialize a required slot holding a batch
    pub fn push<C: Component>(&mut self, instances: &[C]) -> SerializationResult<()> {
        let cell = C::to_data_cell_with(self.pool, instances)?;
        self.cells.push(cell);
        Ok(())
    }

    /// Serialize a required slot holding one value
    pub fn push_one<C: Component>(&mut self, instance: &C) -> SerializationResult<()> {
        self.push(std::slice::from_ref(instance))
    }

    /// Serialize an optional single-value slot; absent slots produce no cell
    pub fn push_optional<C: Component>(&mut self, instance: Option<&C>) -> SerializationResult<()> {
        match instance {
            Some(instance) => self.push_one(instance),
            None => Ok(()),
        }
    }

    /// Serialize a required batch slot
    pub fn push_collection<C: Component>(
        &mut self,
        instances: &Collection<'_, C>,
    ) -> SerializationResult<()> {
        let cell = C::collection_to_data_cell(self.pool, instances)?;
        self.cells.push(cell);
        Ok(())
    }

    /// Serialize an optional batch slot; absent slots produce no cell
    pub fn push_optional_collection<C: Component>(
        &mut self,
        instances: Option<&Collection<'_, C>>,
    ) -> SerializationResult<()> {
        match instances {
            Some(instances) => self.push_collection(instances),
            None => Ok(()),
        }
    }

    /// Cells composed so far
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if no slot produced a cell yet
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Append the indicator of `archetype` and close the list
    pub fn finish<A: Archetype>(mut self, archetype: &A) -> SerializationResult<ArchetypeCells> {
        let indicator = IndicatorComponent::<A>::to_indicator_cell(self.pool, archetype.num_instances())?;
        self.cells.push(indicator);
        let archetype_name = A::name();
        debug!(
            archetype = %archetype_name,
            num_cells = self.cells.len(),
            "composed archetype"
        );
        Ok(ArchetypeCells {
            archetype_name,
            cells: self.cells,
        })
    }
}
