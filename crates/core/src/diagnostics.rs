//! Results of best-effort operations
//!
//! A few setters can apply part of their input when the rest does not fit
//! (e.g. naming more tensor dimensions than exist). Their best-effort
//! variants always produce a value and list what was skipped; the strict
//! variants fail instead.

use crate::error::SerializationError;

/// A value together with the problems encountered while producing it
#[derive(Debug, Clone, PartialEq)]
#[must_use = "diagnostics describe input that was dropped"]
pub struct BestEffort<T> {
    /// The produced value
    pub value: T,
    /// Problems that were tolerated, in the order they occurred
    pub diagnostics: Vec<SerializationError>,
}

impl<T> BestEffort<T> {
    /// A value produced without problems
    pub fn clean(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    /// A value with one tolerated problem
    pub fn with_diagnostic(value: T, diagnostic: SerializationError) -> Self {
        Self {
            value,
            diagnostics: vec![diagnostic],
        }
    }

    /// True if nothing was dropped
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Keep the value, discarding diagnostics
    pub fn into_value(self) -> T {
        self.value
    }

    /// The value if clean, otherwise the first diagnostic
    pub fn into_result(self) -> Result<T, SerializationError> {
        match self.diagnostics.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(self.value),
        }
    }

    /// Transform the value, keeping diagnostics
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> BestEffort<U> {
        BestEffort {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }
}
