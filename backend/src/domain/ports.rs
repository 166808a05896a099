//! Domain ports.
//!
//! Inbound adapters depend on these traits rather than on concrete lookups so
//! handlers stay testable with deterministic in-memory implementations.

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

/// Identifier of a person known to the directory. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(i64);

impl PersonId {
    /// Construct an identifier after checking it is strictly positive.
    ///
    /// # Examples
    /// ```
    /// use roster::domain::ports::PersonId;
    ///
    /// assert_eq!(PersonId::new(3).expect("positive").get(), 3);
    /// assert!(PersonId::new(0).is_err());
    /// ```
    pub const fn new(value: i64) -> Result<Self, PersonIdValidationError> {
        if value <= 0 {
            return Err(PersonIdValidationError::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors returned when constructing [`PersonId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersonIdValidationError {
    /// The identifier was zero or negative.
    #[error("must be greater than 0, got {0}")]
    NotPositive(i64),
}

/// Read-only membership lookup over known person identifiers.
pub trait PersonDirectory: Send + Sync {
    /// Return whether `id` refers to a known person.
    fn contains(&self, id: PersonId) -> bool;
}

/// Fixed in-memory directory holding identifiers 1 through 5.
#[derive(Debug, Clone)]
pub struct FixturePersonDirectory {
    ids: BTreeSet<i64>,
}

impl FixturePersonDirectory {
    /// Build a directory over an explicit identifier set.
    #[must_use]
    pub fn with_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }
}

impl Default for FixturePersonDirectory {
    fn default() -> Self {
        Self::with_ids(1..=5)
    }
}

impl PersonDirectory for FixturePersonDirectory {
    fn contains(&self, id: PersonId) -> bool {
        self.ids.contains(&id.get())
    }
}
