//! StrataLog - typed data-logging model serialized into Arrow cells
//!
//! Archetypes bundle components; each populated component becomes one named
//! Arrow column (a [`DataCell`]), followed by the archetype's indicator.
//!
//! # Quick Start
//!
//! ```ignore
//! use stratalog::archetypes::Pinhole;
//! use stratalog::AsComponents;
//!
//! let pinhole = Pinhole::from_focal_length_and_resolution([300.0, 300.0], [640.0, 480.0]);
//! let cells = pinhole.serialize()?;
//! ```
//!
//! # Layout
//!
//! The serialization machinery lives in `stratalog-core` and the built-in
//! types in `stratalog-types`. Both are re-exported here.

pub use stratalog_core::*;
pub use stratalog_types::{archetypes, components, datatypes};
