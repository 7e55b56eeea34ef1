//! Built-in datatypes, components and archetypes for StrataLog
//!
//! Layers, bottom-up:
//! - datatypes: value representations with memoized arrow schemas
//! - components: named wrappers that serialize into one cell each
//! - archetypes: ordered bundles of optional components
//!
//! ```ignore
//! use stratalog_core::AsComponents;
//! use stratalog_types::archetypes::Tensor;
//!
//! let pixels = [0u8; 6];
//! let cells = Tensor::from_elements([2, 3], &pixels[..]).serialize()?;
//! assert_eq!(cells.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod macros;

pub mod archetypes;
pub mod components;
pub mod datatypes;
