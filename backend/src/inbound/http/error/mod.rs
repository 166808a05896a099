//! Rendering of [`Error`] as an HTTP response.
//!
//! Roster answers every failed request with the JSON error envelope:
//! constraint and decode failures as 422 with their violation list, unknown
//! person identifiers as 404, and anything unexpected as a redacted 500. The
//! response repeats the envelope's trace identifier in the `Trace-Id` header.

use std::borrow::Cow;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result type returned by roster's handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message sent to clients in place of internal failure details.
pub const REDACTED_MESSAGE: &str = "Internal server error";

const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The envelope as clients may see it.
///
/// Internal errors lose their message and details but keep the trace
/// identifier so operators can still correlate the report with the logs.
fn client_view(error: &Error) -> Cow<'_, Error> {
    if error.code() != ErrorCode::InternalError {
        return Cow::Borrowed(error);
    }
    error!(detail = error.message(), "internal error redacted from response");
    let redacted = error
        .trace_id()
        .into_iter()
        .fold(Error::internal(REDACTED_MESSAGE), Error::with_trace_id);
    Cow::Owned(redacted)
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(client_view(self))
    }
}
