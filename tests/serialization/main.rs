mod common;

mod archetype_cells;
mod config_install;
mod error_handling;
mod memory_pool;
mod properties;
mod tensor_invariants;
