//! Borrowing collection
//!
//! [`Collection`] is an ordered sequence that either owns its elements,
//! borrows them from caller memory, or stores a single value inline.
//! Serialization only ever reads from it.
//!
//! ## Ownership
//!
//! - **Owned**: heap-backed, mutable through [`Collection::to_mut`]
//! - **Borrowed**: a `&'a [T]`; the borrow checker ties the collection to the
//!   caller's buffer, so it cannot outlive the data it reads
//! - **Inline**: one element stored without a heap allocation, created by
//!   [`Collection::single`]; it becomes `Owned` once mutation spills it
//!
//! Construction never copies borrowed input and never scans elements. A
//! collection created from a null pointer with a non-zero length is not
//! rejected up front; the first codec that reads it reports
//! [`ErrorKind::UnexpectedNullArgument`](crate::ErrorKind::UnexpectedNullArgument).

use crate::error::{SerializationError, SerializationResult};
use smallvec::SmallVec;
use std::fmt;

/// Inline capacity of owned storage
type OwnedStorage<T> = SmallVec<[T; 1]>;

/// How a [`Collection`] holds its elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Elements live on the heap and belong to the collection
    Owned,
    /// Elements belong to the caller
    Borrowed,
    /// A single element stored inline by [`Collection::single`]
    Inline,
}

enum Repr<'a, T> {
    Owned(OwnedStorage<T>),
    Inline(OwnedStorage<T>),
    Borrowed(&'a [T]),
    /// Built from a null pointer with a non-zero length.
    NullPointer { len: usize },
}

/// Ordered sequence of `T` that may own or borrow its storage
pub struct Collection<'a, T> {
    repr: Repr<'a, T>,
}

impl<'a, T> Collection<'a, T> {
    /// An empty collection
    pub fn empty() -> Self {
        Self {
            repr: Repr::Owned(SmallVec::new()),
        }
    }

    /// Take ownership of a vector
    pub fn owned(values: Vec<T>) -> Self {
        Self {
            repr: Repr::Owned(SmallVec::from_vec(values)),
        }
    }

    /// Borrow caller memory without copying
    pub fn borrowed(values: &'a [T]) -> Self {
        Self {
            repr: Repr::Borrowed(values),
        }
    }

    /// Store a single value inline
    pub fn single(value: T) -> Self {
        let mut storage = SmallVec::new();
        storage.push(value);
        Self {
            repr: Repr::Inline(storage),
        }
    }

    /// Borrow `len` elements starting at `data`.
    ///
    /// A null `data` with `len == 0` yields an empty collection. A null
    /// `data` with `len > 0` is accepted here and rejected by the first
    /// read through [`Collection::try_as_slice`].
    ///
    /// # Safety
    ///
    /// If `data` is non-null it must satisfy the requirements of
    /// [`std::slice::from_raw_parts`] for `len` elements, and the memory must
    /// stay valid and unmodified for `'a`.
    pub unsafe fn from_raw_parts(data: *const T, len: usize) -> Self {
        if data.is_null() {
            if len == 0 {
                return Self::empty();
            }
            return Self {
                repr: Repr::NullPointer { len },
            };
        }
        // SAFETY: upheld by the caller per this function's contract.
        let values = unsafe { std::slice::from_raw_parts(data, len) };
        Self::borrowed(values)
    }

    /// Number of elements, including the declared length of a null buffer
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Owned(values) | Repr::Inline(values) => values.len(),
            Repr::Borrowed(values) => values.len(),
            Repr::NullPointer { len } => *len,
        }
    }

    /// True if the collection has no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How the elements are held
    pub fn ownership(&self) -> Ownership {
        match &self.repr {
            Repr::Owned(_) => Ownership::Owned,
            Repr::Inline(values) if values.spilled() => Ownership::Owned,
            Repr::Inline(_) => Ownership::Inline,
            Repr::Borrowed(_) | Repr::NullPointer { .. } => Ownership::Borrowed,
        }
    }

    /// True if this collection was built from a null pointer with a non-zero length
    pub fn is_null(&self) -> bool {
        matches!(self.repr, Repr::NullPointer { .. })
    }

    /// Read access to the elements.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedNullArgument` if the collection was built from a
    /// null pointer with a non-zero length.
    pub fn try_as_slice(&self) -> SerializationResult<&[T]> {
        match &self.repr {
            Repr::Owned(values) | Repr::Inline(values) => Ok(values.as_slice()),
            Repr::Borrowed(values) => Ok(values),
            Repr::NullPointer { len } => Err(SerializationError::unexpected_null(format!(
                "Cannot read {len} elements from a null pointer"
            ))),
        }
    }

    /// Iterate over the elements.
    ///
    /// # Errors
    ///
    /// Same as [`Collection::try_as_slice`].
    pub fn try_iter(&self) -> SerializationResult<std::slice::Iter<'_, T>> {
        Ok(self.try_as_slice()?.iter())
    }
}

impl<'a, T: Clone> Collection<'a, T> {
    /// Mutable access, copying borrowed elements into owned storage first.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedNullArgument` for a null collection.
    pub fn to_mut(&mut self) -> SerializationResult<&mut SmallVec<[T; 1]>> {
        if let Repr::Borrowed(values) = self.repr {
            self.repr = Repr::Owned(values.iter().cloned().collect());
        }
        match &mut self.repr {
            Repr::Owned(values) | Repr::Inline(values) => Ok(values),
            Repr::Borrowed(_) => unreachable!("borrowed storage was just replaced"),
            Repr::NullPointer { len } => Err(SerializationError::unexpected_null(format!(
                "Cannot mutate {len} elements behind a null pointer"
            ))),
        }
    }

    /// Detach from any borrow.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedNullArgument` for a null collection.
    pub fn into_owned(self) -> SerializationResult<Collection<'static, T>> {
        match self.repr {
            Repr::Owned(values) => Ok(Collection {
                repr: Repr::Owned(values),
            }),
            Repr::Inline(values) => Ok(Collection {
                repr: Repr::Inline(values),
            }),
            Repr::Borrowed(values) => Ok(Collection {
                repr: Repr::Owned(values.iter().cloned().collect()),
            }),
            Repr::NullPointer { len } => Err(SerializationError::unexpected_null(format!(
                "Cannot copy {len} elements from a null pointer"
            ))),
        }
    }
}

impl<T> Default for Collection<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Clone> Clone for Collection<'_, T> {
    fn clone(&self) -> Self {
        let repr = match &self.repr {
            Repr::Owned(values) => Repr::Owned(values.clone()),
            Repr::Inline(values) => Repr::Inline(values.clone()),
            Repr::Borrowed(values) => Repr::Borrowed(values),
            Repr::NullPointer { len } => Repr::NullPointer { len: *len },
        };
        Self { repr }
    }
}

impl<T: fmt::Debug> fmt::Debug for Collection<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Owned(values) | Repr::Inline(values) => {
                f.debug_list().entries(values.iter()).finish()
            }
            Repr::Borrowed(values) => f.debug_list().entries(values.iter()).finish(),
            Repr::NullPointer { len } => write!(f, "<null; {len}>"),
        }
    }
}

// Null collections never compare equal, mirroring NaN.
impl<T: PartialEq> PartialEq for Collection<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.try_as_slice(), other.try_as_slice()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl<T> From<Vec<T>> for Collection<'_, T> {
    fn from(values: Vec<T>) -> Self {
        Self::owned(values)
    }
}

impl<'a, T> From<&'a [T]> for Collection<'a, T> {
    fn from(values: &'a [T]) -> Self {
        Self::borrowed(values)
    }
}

impl<'a, T> From<&'a Vec<T>> for Collection<'a, T> {
    fn from(values: &'a Vec<T>) -> Self {
        Self::borrowed(values.as_slice())
    }
}

impl<T, const N: usize> From<[T; N]> for Collection<'_, T> {
    fn from(values: [T; N]) -> Self {
        Self {
            repr: Repr::Owned(values.into_iter().collect()),
        }
    }
}

impl<T> FromIterator<T> for Collection<'_, T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            repr: Repr::Owned(iter.into_iter().collect()),
        }
    }
}
