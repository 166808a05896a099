//! Domain primitives.
//!
//! Purpose: define the request and response records served by the API, the
//! transport-agnostic error model, and the ports handlers depend on. Records
//! are immutable values built per request; field constraints live on the
//! types as `validator` attributes.
//!
//! Public surface:
//! - Error / ErrorCode / Violation: API error payload and its violation list.
//! - Person / PersonOut / Location: person records and the password-free
//!   projection.
//! - LoginForm / LoginOut / ContactForm / Greeting: form and greeting records.
//! - ImageSummary: upload metadata.
//! - TraceId: request-scoped correlation identifier.

pub mod account;
pub mod error;
pub mod person;
pub mod ports;
pub mod trace_id;
pub mod upload;

pub use self::account::{ContactForm, Greeting, LOGIN_MESSAGE, LoginForm, LoginOut};
pub use self::error::{Error, ErrorCode, FieldSource, Violation};
pub use self::person::{HairColor, Location, MergeError, Person, PersonOut, merge_fields};
pub use self::ports::{FixturePersonDirectory, PersonDirectory, PersonId};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::upload::ImageSummary;
