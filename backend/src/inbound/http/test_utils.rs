//! Test helpers for inbound HTTP components.

use actix_web::dev::ServiceResponse;
use actix_web::{test, web};
use serde_json::{Value, json};

use crate::domain::Error;
use crate::inbound::http::state::HttpState;

/// Shared state backed by the fixture person directory.
pub fn fixture_state() -> web::Data<HttpState> {
    web::Data::new(HttpState::default())
}

/// A person body that satisfies every constraint.
pub fn valid_person() -> Value {
    json!({
        "first_name": "Carlos",
        "last_name": "Alvarez",
        "age": 26,
        "hair_color": "red",
        "is_married": false,
        "password": "passwordTest",
    })
}

/// Boundary used by [`multipart_form`].
pub const MULTIPART_BOUNDARY: &str = "roster-boundary";

/// Encode text fields as a `multipart/form-data` body.
///
/// Returns the `Content-Type` header value and the body bytes.
pub fn multipart_form(fields: &[(&str, &str)]) -> (String, Vec<u8>) {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{MULTIPART_BOUNDARY}--\r\n"));
    (
        format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        body.into_bytes(),
    )
}

/// Decode an error envelope from a response.
pub async fn error_body(res: ServiceResponse) -> Error {
    test::read_body_json(res).await
}

/// Field paths named by a validation error, in reported order.
pub fn violation_fields(error: &Error) -> Vec<String> {
    error
        .violations()
        .into_iter()
        .filter_map(|violation| violation.field)
        .collect()
}
