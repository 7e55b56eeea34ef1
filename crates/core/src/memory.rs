//! Memory pool handed to array builders
//!
//! A [`MemoryPool`] accounts for the bytes held by in-flight builders. Each
//! builder obtains a [`Reservation`] when it is created and grows it while
//! values are appended; the reservation is released when the builder is
//! finished or dropped. Finished arrays are reference counted by arrow and
//! are no longer charged to the pool.
//!
//! Pools are cheap to clone (shared handle). Accounting uses atomics, so a
//! pool may be shared between threads; each pool enforces its own capacity.

use crate::config::PoolConfig;
use crate::error::{SerializationError, SerializationResult};
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{trace, warn};

/// Name of the lazily created process-wide pool.
pub const DEFAULT_POOL_NAME: &str = "default";

static DEFAULT_POOL: OnceCell<MemoryPool> = OnceCell::new();

/// Snapshot of a pool's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Bytes currently reserved by live builders
    pub in_use: usize,
    /// Highest value `in_use` has reached
    pub peak: usize,
    /// Successful reservations (including growth)
    pub reservations: u64,
    /// Refused reservations
    pub failures: u64,
}

struct PoolInner {
    name: String,
    capacity: Option<usize>,
    in_use: AtomicUsize,
    peak: AtomicUsize,
    reservations: AtomicU64,
    failures: AtomicU64,
}

/// Shared allocator handle with optional capacity
#[derive(Clone)]
pub struct MemoryPool {
    inner: Arc<PoolInner>,
}

impl MemoryPool {
    fn new(name: impl Into<String>, capacity: Option<usize>) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                name: name.into(),
                capacity,
                in_use: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
                reservations: AtomicU64::new(0),
                failures: AtomicU64::new(0),
            }),
        }
    }

    /// A pool without a capacity limit
    pub fn unbounded(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    /// A pool that refuses reservations beyond `capacity_bytes`
    pub fn with_capacity(name: impl Into<String>, capacity_bytes: usize) -> Self {
        Self::new(name, Some(capacity_bytes))
    }

    /// Build a pool from its configuration section
    pub fn from_config(config: &PoolConfig) -> Self {
        Self::new(config.name.clone(), config.capacity_bytes)
    }

    /// Pool name, used in error messages
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Capacity in bytes, `None` if unbounded
    pub fn capacity(&self) -> Option<usize> {
        self.inner.capacity
    }

    /// Bytes currently reserved
    pub fn in_use(&self) -> usize {
        self.inner.in_use.load(Ordering::Acquire)
    }

    /// Bytes still available, `usize::MAX` if unbounded
    pub fn available(&self) -> usize {
        match self.inner.capacity {
            Some(capacity) => capacity.saturating_sub(self.in_use()),
            None => usize::MAX,
        }
    }

    /// Current counters
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            in_use: self.in_use(),
            peak: self.inner.peak.load(Ordering::Acquire),
            reservations: self.inner.reservations.load(Ordering::Acquire),
            failures: self.inner.failures.load(Ordering::Acquire),
        }
    }

    /// Reserve `bytes` for a builder.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailed` if the reservation would exceed the
    /// pool's capacity. Nothing is reserved in that case.
    pub fn reserve(&self, bytes: usize) -> SerializationResult<Reservation> {
        self.acquire(bytes)?;
        Ok(Reservation {
            pool: self.clone(),
            bytes,
        })
    }

    fn acquire(&self, bytes: usize) -> SerializationResult<()> {
        let inner = &self.inner;
        let mut current = inner.in_use.load(Ordering::Acquire);
        loop {
            let next = current.checked_add(bytes);
            let fits = match (next, inner.capacity) {
                (Some(next), Some(capacity)) => next <= capacity,
                (Some(_), None) => true,
                (None, _) => false,
            };
            let Some(next) = next.filter(|_| fits) else {
                inner.failures.fetch_add(1, Ordering::AcqRel);
                let available = self.available();
                warn!(
                    pool = %inner.name,
                    requested = bytes,
                    available,
                    "memory pool refused reservation"
                );
                return Err(SerializationError::AllocationFailed {
                    pool: inner.name.clone(),
                    requested: bytes,
                    available,
                });
            };
            match inner
                .in_use
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => {
                    inner.peak.fetch_max(next, Ordering::AcqRel);
                    inner.reservations.fetch_add(1, Ordering::AcqRel);
                    trace!(pool = %inner.name, bytes, in_use = next, "reserved");
                    return Ok(());
                }
                Err(observed) => current = observed,
            }
        }
    }

    fn release(&self, bytes: usize) {
        self.inner.in_use.fetch_sub(bytes, Ordering::AcqRel);
    }
}

impl std::fmt::Debug for MemoryPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryPool")
            .field("name", &self.inner.name)
            .field("capacity", &self.inner.capacity)
            .field("in_use", &self.in_use())
            .finish()
    }
}

/// Bytes held on behalf of one builder; released on drop
#[derive(Debug)]
pub struct Reservation {
    pool: MemoryPool,
    bytes: usize,
}

impl Reservation {
    /// Bytes currently held
    pub fn size(&self) -> usize {
        self.bytes
    }

    /// Pool this reservation draws from
    pub fn pool(&self) -> &MemoryPool {
        &self.pool
    }

    /// Grow the reservation by `additional` bytes.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailed` if the pool cannot supply the bytes; the
    /// existing reservation is left untouched.
    pub fn grow(&mut self, additional: usize) -> SerializationResult<()> {
        if additional == 0 {
            return Ok(());
        }
        self.pool.acquire(additional)?;
        self.bytes += additional;
        Ok(())
    }
}

impl Drop for Reservation {
    fn drop(&mut self) {
        self.pool.release(self.bytes);
    }
}

/// Process-wide pool used by the convenience entry points.
///
/// Created unbounded on first use unless [`install_default_pool`] ran first.
pub fn default_pool() -> &'static MemoryPool {
    DEFAULT_POOL.get_or_init(|| MemoryPool::unbounded(DEFAULT_POOL_NAME))
}

/// Install the process-wide pool.
///
/// # Errors
///
/// Returns the rejected pool if a default pool already exists (either
/// installed earlier or created lazily by [`default_pool`]).
pub fn install_default_pool(pool: MemoryPool) -> Result<(), MemoryPool> {
    DEFAULT_POOL.set(pool)
}
