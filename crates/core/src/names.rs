//! Stable identifiers for loggable types
//!
//! Names are part of the wire contract: a component's name becomes the field
//! name of its column. Renaming a type is a breaking change.

use std::borrow::Cow;
use std::fmt;

/// Prefix shared by every name this crate family defines.
pub const NAMESPACE: &str = "stratalog";

macro_rules! define_name {
    ($(#[$doc:meta])* $name:ident, $kind:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Cow<'static, str>);

        impl $name {
            /// Create a name from a static string without allocating
            pub const fn new_static(name: &'static str) -> Self {
                Self(Cow::Borrowed(name))
            }

            /// Full name, e.g. `stratalog.components.Vector3D`
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Name without the `<namespace>.<kind>.` prefix
            pub fn short_name(&self) -> &str {
                let full = self.as_str();
                full.strip_prefix(NAMESPACE)
                    .and_then(|rest| rest.strip_prefix('.'))
                    .and_then(|rest| rest.strip_prefix($kind))
                    .and_then(|rest| rest.strip_prefix('.'))
                    .unwrap_or(full)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&'static str> for $name {
            fn from(name: &'static str) -> Self {
                Self::new_static(name)
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(Cow::Owned(name))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.as_str() == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

define_name!(
    /// Name of a component; doubles as the column field name
    ComponentName,
    "components"
);

define_name!(
    /// Name of a datatype
    DatatypeName,
    "datatypes"
);

define_name!(
    /// Name of an archetype
    ArchetypeName,
    "archetypes"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name() {
        let name = ComponentName::new_static("stratalog.components.TensorData");
        assert_eq!(name.short_name(), "TensorData");

        let name = DatatypeName::new_static("stratalog.datatypes.Vec3D");
        assert_eq!(name.short_name(), "Vec3D");

        let name = ArchetypeName::new_static("stratalog.archetypes.Tensor");
        assert_eq!(name.short_name(), "Tensor");
    }

    #[test]
    fn test_short_name_foreign_prefix() {
        let name = ComponentName::from("other.components.Thing".to_string());
        assert_eq!(name.short_name(), "other.components.Thing");
    }

    #[test]
    fn test_name_equality_with_str() {
        let name = ComponentName::new_static("stratalog.components.Color");
        assert_eq!(name, "stratalog.components.Color");
        assert_eq!(name.to_string(), "stratalog.components.Color");
        assert_eq!(name, ComponentName::from("stratalog.components.Color".to_string()));
    }
}
