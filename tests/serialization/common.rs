//! Shared helpers for the serialization suite.

#![allow(dead_code)]

use std::sync::Once;
pub use stratalog::{DataCell, MemoryPool};

static INIT_TRACING: Once = Once::new();

/// Route `tracing` output to the test harness.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Fresh unbounded pool named after the test.
pub fn test_pool(name: &str) -> MemoryPool {
    init_tracing();
    MemoryPool::unbounded(name)
}

/// Component names of `cells`, without the namespace prefix.
pub fn short_names(cells: &[DataCell]) -> Vec<String> {
    cells
        .iter()
        .map(|cell| cell.component_name().short_name().to_owned())
        .collect()
}
