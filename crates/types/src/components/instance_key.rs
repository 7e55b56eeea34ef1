use crate::macros::impl_primitive_loggable;
use arrow::datatypes::{DataType, UInt64Type};
use stratalog_core::Component;

/// Stable identifier of an instance within a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct InstanceKey(pub u64);

impl InstanceKey {
    /// Key reserved for "all instances"
    pub const SPLAT: Self = Self(u64::MAX);

    /// True for the splat key
    pub fn is_splat(&self) -> bool {
        *self == Self::SPLAT
    }
}

impl From<u64> for InstanceKey {
    fn from(key: u64) -> Self {
        Self(key)
    }
}

impl_primitive_loggable!(
    InstanceKey,
    UInt64Type,
    ComponentName,
    "stratalog.components.InstanceKey",
    DataType::UInt64
);

impl Component for InstanceKey {}
