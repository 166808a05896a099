//! Roster service library: schema-validated person, login, contact, and
//! upload endpoints.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
