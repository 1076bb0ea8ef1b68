//! Identifiers
//!
//! Opaque identifiers supplied by the catalog and checkout collaborators.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id! {
    /// Discount rule identifier
    RuleId
}

string_id! {
    /// Product variant identifier
    VariantId
}

string_id! {
    /// Product category identifier
    CategoryId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_their_inner_value() {
        assert_eq!(VariantId::from("tv-55").to_string(), "tv-55");
        assert_eq!(RuleId::new("r1").as_str(), "r1");
    }

    #[test]
    fn ids_compare_by_value() {
        assert_eq!(CategoryId::from("electronics"), CategoryId::new("electronics"));
        assert!(CategoryId::from("a") < CategoryId::from("b"));
    }
}
