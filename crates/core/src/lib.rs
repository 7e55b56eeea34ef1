//! Serialization core for StrataLog
//!
//! This crate defines the contracts every loggable type implements and the
//! machinery that turns typed values into arrow columns:
//! - Collection: owned, borrowed, or inline sequences of values
//! - Loggable / Datatype / Component: per-type codec contract
//! - CellBuilder / PooledBuilder: builder contract and pool accounting
//! - MemoryPool: allocator handle with optional capacity
//! - DataCell: one named component column
//! - Archetype / AsComponents / CellComposer: ordered cells plus indicator
//! - SerializationError: classified errors
//! - StratalogConfig: `stratalog.toml` loader
//! - BestEffort: value plus tolerated problems

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod archetype;
pub mod builder;
pub mod collection;
pub mod config;
pub mod data_cell;
pub mod diagnostics;
pub mod error;
pub mod indicator;
pub mod loggable;
pub mod memory;
pub mod names;

pub use archetype::{Archetype, ArchetypeCells, AsComponents, CellComposer};
pub use builder::{
    dense_union_fields, CellBuilder, DenseUnionLayout, FixedSizeListCellBuilder, ListCellBuilder,
    NullCellBuilder, PooledBuilder, StructLayout, NULL_MARKERS_FIELD,
};
pub use collection::{Collection, Ownership};
pub use config::{ConfigError, PoolConfig, StratalogConfig, CONFIG_FILE_NAME};
pub use data_cell::{CellKind, DataCell};
pub use diagnostics::BestEffort;
pub use error::{ErrorCategory, ErrorKind, SerializationError, SerializationResult};
pub use indicator::IndicatorComponent;
pub use loggable::{Component, Datatype, Loggable};
pub use memory::{
    default_pool, install_default_pool, MemoryPool, PoolStats, Reservation, DEFAULT_POOL_NAME,
};
pub use names::{ArchetypeName, ComponentName, DatatypeName, NAMESPACE};
