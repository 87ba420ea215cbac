//! Opaque identifiers for fields and options, and the generators that mint them.
//!
//! Ids are stored as plain strings so documents produced by other tools load
//! unchanged. New ids are ULIDs unless a different [`IdGenerator`] is supplied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use ulid::{Generator, Ulid};

use crate::error::{FieldsError, Result};

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing id. Empty ids are rejected.
            pub fn parse(s: impl Into<String>) -> Result<Self> {
                let s = s.into();
                if s.trim().is_empty() {
                    return Err(FieldsError::invalid_id(concat!(
                        stringify!($name),
                        " cannot be empty"
                    )));
                }
                Ok(Self(s))
            }

            /// Mint a fresh id from `ids`.
            pub fn generate(ids: &dyn IdGenerator) -> Self {
                Self(ids.next_id())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = FieldsError;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_id!(
    /// Identity of a field, unique within its calculator and immutable.
    FieldId
);

opaque_id!(
    /// Identity of one option inside an option-bearing field.
    OptionId
);

/// Source of fresh, collision-free ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Monotonic ULIDs: unique and sortable by creation time.
pub struct UlidIds {
    generator: Mutex<Generator>,
}

impl UlidIds {
    pub fn new() -> Self {
        Self {
            generator: Mutex::new(Generator::new()),
        }
    }
}

impl Default for UlidIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for UlidIds {
    fn next_id(&self) -> String {
        let mut generator = match self.generator.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Overflow only happens after 2^80 ids within one millisecond.
        generator
            .generate()
            .unwrap_or_else(|_| Ulid::new())
            .to_string()
    }
}

/// Deterministic ids (`prefix-1`, `prefix-2`, ...) for tests and scripted replay.
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}
