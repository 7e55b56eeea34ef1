//! Pool accounting across whole archetypes.

use crate::common::*;
use std::sync::Arc;
use std::thread;
use stratalog::archetypes::{Mesh3D, Tensor};
use stratalog::components::Position3D;
use stratalog::{AsComponents, Component, ErrorKind, SerializationError};

#[test]
fn exhausted_pool_reports_allocation_failure() {
    init_tracing();
    let pool = MemoryPool::with_capacity("tiny", 16);
    let positions = [Position3D::new(0.0, 0.0, 0.0), Position3D::new(1.0, 1.0, 1.0)];
    let err = Position3D::to_data_cell_with(&pool, &positions).unwrap_err();
    match err {
        SerializationError::AllocationFailed {
            pool: name,
            requested,
            ..
        } => {
            assert_eq!(name, "tiny");
            assert_eq!(requested, 24);
        }
        other => panic!("expected AllocationFailed, got {other:?}"),
    }
    assert_eq!(pool.in_use(), 0);
    assert_eq!(pool.stats().failures, 1);
}

#[test]
fn tensor_payload_is_charged() {
    init_tracing();
    let pool = MemoryPool::with_capacity("payload", 512);
    let elements = vec![0u8; 4096];
    let err = Tensor::from_elements([64, 64], &elements)
        .serialize_with(&pool)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AllocationFailed);
    assert_eq!(pool.in_use(), 0);
}

#[test]
fn reservations_released_after_archetype() {
    let pool = test_pool("released");
    let positions: Vec<Position3D> = (0..100)
        .map(|i| Position3D::new(i as f32, 0.0, 0.0))
        .collect();
    Mesh3D::new(&positions).serialize_with(&pool).unwrap();
    let stats = pool.stats();
    assert_eq!(stats.in_use, 0);
    assert!(stats.peak >= 100 * std::mem::size_of::<Position3D>());
}

#[test]
fn pool_shared_across_threads() {
    let pool = Arc::new(test_pool("shared"));
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                let positions: Vec<Position3D> = (0..50)
                    .map(|i| Position3D::new(t as f32, i as f32, 0.0))
                    .collect();
                for _ in 0..10 {
                    let cells = Mesh3D::new(&positions).serialize_with(&pool).unwrap();
                    assert_eq!(cells[0].num_instances(), 50);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(pool.in_use(), 0);
}
