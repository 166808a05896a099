//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FixturePersonDirectory, PersonDirectory};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Membership lookup backing the path-form person detail.
    pub persons: Arc<dyn PersonDirectory>,
}

impl HttpState {
    /// Construct state from the person directory port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use roster::domain::ports::{FixturePersonDirectory, PersonDirectory, PersonId};
    /// use roster::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixturePersonDirectory::default()));
    /// assert!(state.persons.contains(PersonId::new(1).expect("positive")));
    /// ```
    #[must_use]
    pub fn new(persons: Arc<dyn PersonDirectory>) -> Self {
        Self { persons }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixturePersonDirectory::default()))
    }
}
