//! Contact form endpoint.

use actix_web::{HttpRequest, http::header, post, web};
use tracing::debug;

use crate::domain::{ContactForm, Error};
use crate::inbound::http::fields::{Fields, FromFields};
use crate::inbound::http::schemas::UserAgentEchoSchema;
use crate::inbound::http::validation::ValidatedForm;

/// Optional cookie carrying an advertising identifier.
pub const ADS_COOKIE: &str = "ads";

impl FromFields for ContactForm {
    fn from_fields(fields: &mut Fields) -> Option<Self> {
        Some(Self {
            first_name: fields.required("first_name"),
            last_name: fields.required("last_name"),
            email: fields.required("email"),
            message: fields.required("message"),
        })
    }
}

/// Accept a contact message and echo the caller's `User-Agent`.
///
/// Responds with the header value verbatim, or `null` when it is absent.
/// Bytes outside UTF-8 are replaced rather than dropping the value.
#[utoipa::path(
    post,
    path = "/contact",
    request_body(content = ContactForm, content_type = "application/x-www-form-urlencoded"),
    params(
        ("User-Agent" = Option<String>, Header, description = "Client user agent"),
        ("ads" = Option<String>, Cookie, description = "Advertising identifier")
    ),
    responses(
        (status = 200, description = "User agent echo", body = UserAgentEchoSchema),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["contact"],
    operation_id = "contact"
)]
#[post("/contact")]
#[expect(
    clippy::needless_pass_by_value,
    reason = "actix-web extractors are taken by value"
)]
pub async fn contact(
    req: HttpRequest,
    form: ValidatedForm<ContactForm>,
) -> web::Json<Option<String>> {
    let ContactForm { message, .. } = form.into_inner();
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
    let ads = req.cookie(ADS_COOKIE);
    debug!(
        message_len = message.len(),
        has_ads_cookie = ads.is_some(),
        "contact message received"
    );
    web::Json(user_agent)
}
