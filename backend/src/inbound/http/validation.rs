//! Validating extractors for inbound HTTP adapters.
//!
//! Each extractor reads the raw values of its source, assembles the record
//! field by field through [`FromFields`], and then runs the record's derived
//! [`Validate`] implementation. Handlers only ever receive records that passed
//! both steps. Every failure becomes a 422 [`Error::validation`] listing all
//! missing, mistyped, and constraint-violating fields together.

use std::fmt;

use actix_multipart::{Multipart, MultipartError};
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::TryStreamExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde_json::Value;
use thiserror::Error as ThisError;
use tracing::debug;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::domain::{Error, FieldSource, Violation};
use crate::inbound::http::fields::{Fields, FromFields};

/// Violation code used when the payload could not be decoded at all.
pub const DECODE_CODE: &str = "decode";

/// Largest accepted text value in a multipart form, in bytes.
pub const MAX_FORM_FIELD_BYTES: usize = 64 * 1024;

/// JSON request body that passed validation.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

/// Query string parameters that passed validation.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

/// Path segments that passed validation.
#[derive(Debug)]
pub struct ValidatedPath<T>(pub T);

/// URL-encoded or multipart form body that passed validation.
#[derive(Debug)]
pub struct ValidatedForm<T>(pub T);

macro_rules! impl_inner {
    ($($wrapper:ident),+) => {
        $(
            impl<T> $wrapper<T> {
                /// Unwrap the validated record.
                #[must_use]
                pub fn into_inner(self) -> T {
                    self.0
                }
            }
        )+
    };
}

impl_inner!(ValidatedJson, ValidatedQuery, ValidatedPath, ValidatedForm);

impl<T> FromRequest for ValidatedJson<T>
where
    T: FromFields + Validate + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Json::<Value>::from_request(req, payload);
        Box::pin(async move {
            let value = body
                .await
                .map_err(|err| decode_error(FieldSource::Body, &err))?;
            let Value::Object(values) = value.into_inner() else {
                return Err(decode_error(
                    FieldSource::Body,
                    &"request body must be a JSON object",
                ));
            };
            accept(Fields::from_json(FieldSource::Body, values)).map(Self)
        })
    }
}

impl<T> FromRequest for ValidatedForm<T>
where
    T: FromFields + Validate + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if is_multipart(req) {
            let multipart = Multipart::new(req.headers(), payload.take());
            return Box::pin(async move {
                let pairs = multipart_pairs(multipart).await.map_err(form_error)?;
                accept(Fields::from_pairs(FieldSource::Form, pairs)).map(Self)
            });
        }

        let body = web::Form::<Vec<(String, String)>>::from_request(req, payload);
        Box::pin(async move {
            let pairs = body
                .await
                .map_err(|err| decode_error(FieldSource::Form, &err))?;
            accept(Fields::from_pairs(FieldSource::Form, pairs.into_inner())).map(Self)
        })
    }
}

impl<T> FromRequest for ValidatedQuery<T>
where
    T: FromFields + Validate + 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let decoded = web::Query::<Vec<(String, String)>>::from_query(req.query_string())
            .map_err(|err| decode_error(FieldSource::Query, &err))
            .and_then(|pairs| accept(Fields::from_pairs(FieldSource::Query, pairs.into_inner())));
        ready(decoded.map(Self))
    }
}

impl<T> FromRequest for ValidatedPath<T>
where
    T: FromFields + Validate + 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let segments = req.match_info().iter();
        ready(accept(Fields::from_pairs(FieldSource::Path, segments)).map(Self))
    }
}

/// Assemble a record from `fields` and check its declared constraints.
///
/// Decode failures and constraint violations are reported together.
/// Constraint violations raised against a field that already failed to
/// decode are dropped, since they describe its placeholder.
pub(crate) fn accept<T>(mut fields: Fields) -> Result<T, Error>
where
    T: FromFields + Validate,
{
    let source = fields.source();
    let Some(record) = T::from_fields(&mut fields) else {
        return Err(reject(source, fields.into_failures()));
    };
    let failures = fields.into_failures();
    let mut violations = record
        .validate()
        .err()
        .map(|errors| violations_from(source, &errors))
        .unwrap_or_default();
    violations.retain(|violation| !failures.iter().any(|failed| covers(failed, violation)));
    violations.extend(failures);

    if violations.is_empty() {
        Ok(record)
    } else {
        Err(reject(source, violations))
    }
}

fn reject(source: FieldSource, mut violations: Vec<Violation>) -> Error {
    if violations.is_empty() {
        violations.push(Violation::unattributed(
            source,
            DECODE_CODE,
            "request could not be decoded",
        ));
    }
    sort_violations(&mut violations);
    debug!(?source, count = violations.len(), "request rejected by validation");
    Error::validation(violations)
}

/// Whether `failure` names the same field as `violation`, or one enclosing it.
fn covers(failure: &Violation, violation: &Violation) -> bool {
    let (Some(failed), Some(field)) = (failure.field.as_deref(), violation.field.as_deref()) else {
        return false;
    };
    field
        .strip_prefix(failed)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['.', '[']))
}

/// Build the 422 error for a payload that could not be read at all.
pub(crate) fn decode_error(source: FieldSource, err: &impl fmt::Display) -> Error {
    let message = err.to_string();
    debug!(?source, %message, "request rejected by decoder");
    let violation = match field_from_message(&message).map(str::to_owned) {
        Some(field) => Violation::new(source, field, DECODE_CODE, message),
        None => Violation::unattributed(source, DECODE_CODE, message),
    };
    Error::validation(vec![violation])
}

/// Extract the field name serde reports for a missing or duplicate field.
fn field_from_message(message: &str) -> Option<&str> {
    ["missing field `", "duplicate field `"]
        .iter()
        .find_map(|marker| {
            let (_, rest) = message.split_once(marker)?;
            rest.split_once('`').map(|(field, _)| field)
        })
        .filter(|field| !field.is_empty())
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
}

/// Failures reading text fields from a multipart form.
#[derive(Debug, ThisError)]
enum FormReadError {
    #[error(transparent)]
    Multipart(#[from] MultipartError),
    #[error("{0} exceeds the form field size limit")]
    TooLarge(String),
    #[error("{0} is not valid UTF-8")]
    NotUtf8(String),
}

fn form_error(err: FormReadError) -> Error {
    match err {
        FormReadError::Multipart(inner) => decode_error(FieldSource::Form, &inner),
        FormReadError::TooLarge(ref field) | FormReadError::NotUtf8(ref field) => {
            let message = err.to_string();
            debug!(%message, "multipart form field rejected");
            Error::validation(vec![Violation::new(
                FieldSource::Form,
                field.as_str(),
                DECODE_CODE,
                message,
            )])
        }
    }
}

/// Collect every part of a multipart form as a name/text pair.
async fn multipart_pairs(mut multipart: Multipart) -> Result<Vec<(String, String)>, FormReadError> {
    let mut pairs = Vec::new();
    while let Some(mut part) = multipart.try_next().await? {
        let name = part.name().unwrap_or_default().to_owned();
        let mut bytes = Vec::new();
        while let Some(chunk) = part.try_next().await? {
            if bytes.len().saturating_add(chunk.len()) > MAX_FORM_FIELD_BYTES {
                return Err(FormReadError::TooLarge(name));
            }
            bytes.extend_from_slice(&chunk);
        }
        let text = String::from_utf8(bytes).map_err(|_| FormReadError::NotUtf8(name.clone()))?;
        pairs.push((name, text));
    }
    Ok(pairs)
}

/// Flatten validator errors into violations sorted by field path.
///
/// Nested records are reported with dotted paths (`person.age`) and list
/// entries with an index (`items[2].name`).
pub(crate) fn violations_from(source: FieldSource, errors: &ValidationErrors) -> Vec<Violation> {
    let mut violations = Vec::new();
    collect(source, None, errors, &mut violations);
    sort_violations(&mut violations);
    violations
}

fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| (&a.field, &a.code).cmp(&(&b.field, &b.code)));
}

fn collect(
    source: FieldSource,
    prefix: Option<&str>,
    errors: &ValidationErrors,
    out: &mut Vec<Violation>,
) {
    for (field, kind) in errors.errors() {
        let path = prefix.map_or_else(|| field.to_string(), |parent| format!("{parent}.{field}"));
        match kind {
            ValidationErrorsKind::Field(entries) => {
                out.extend(entries.iter().map(|entry| {
                    let detail = entry
                        .message
                        .as_deref()
                        .map_or_else(|| format!("failed `{}`", entry.code), str::to_owned);
                    let message = format!("{path} {detail}");
                    Violation::new(source, path.clone(), entry.code.to_string(), message)
                }));
            }
            ValidationErrorsKind::Struct(nested) => {
                collect(source, Some(&path), nested, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(source, Some(&format!("{path}[{index}]")), nested, out);
                }
            }
        }
    }
}
