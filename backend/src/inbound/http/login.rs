//! Form login endpoint.

use actix_web::{post, web};
use tracing::debug;

use crate::domain::{Error, LoginForm, LoginOut};
use crate::inbound::http::fields::{Fields, FromFields};
use crate::inbound::http::validation::ValidatedForm;

impl FromFields for LoginForm {
    fn from_fields(fields: &mut Fields) -> Option<Self> {
        Some(Self {
            username: fields.required("username"),
            password: fields.required("password"),
        })
    }
}

/// Accept form credentials and confirm the login.
///
/// Accepts URL-encoded and multipart forms. The password is read and
/// discarded; it is never stored or echoed.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login confirmed", body = LoginOut),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["login"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(form: ValidatedForm<LoginForm>) -> web::Json<LoginOut> {
    let out = LoginOut::from(form.into_inner());
    debug!(username = %out.username, "login accepted");
    web::Json(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldSource;
    use crate::inbound::http::fields::MISSING_CODE;
    use crate::inbound::http::test_utils::{error_body, multipart_form, violation_fields};
    use actix_web::http::StatusCode;
    use actix_web::http::header::CONTENT_TYPE;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn echoes_username_without_password() {
        let app = test::init_service(App::new().service(login)).await;
        let req = test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "cafregoso"), ("password", "secret123")])
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body,
            json!({ "username": "cafregoso", "message": "Login Succesfully!" })
        );
    }

    #[actix_web::test]
    async fn rejects_long_username() {
        let app = test::init_service(App::new().service(login)).await;
        let username = "u".repeat(31);
        let req = test::TestRequest::post()
            .uri("/login")
            .set_form([("username", username.as_str()), ("password", "secret123")])
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let error = error_body(res).await;
        assert_eq!(violation_fields(&error), ["username"]);
        assert_eq!(error.violations()[0].location, FieldSource::Form);
    }

    #[actix_web::test]
    async fn rejects_missing_password() {
        let app = test::init_service(App::new().service(login)).await;
        let req = test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "cafregoso")])
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let error = error_body(res).await;
        assert_eq!(violation_fields(&error), ["password"]);
        assert_eq!(error.violations()[0].code, MISSING_CODE);
    }

    #[actix_web::test]
    async fn accepts_multipart_form() {
        let app = test::init_service(App::new().service(login)).await;
        let (content_type, body) =
            multipart_form(&[("username", "cafregoso"), ("password", "secret123")]);
        let req = test::TestRequest::post()
            .uri("/login")
            .insert_header((CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body,
            json!({ "username": "cafregoso", "message": "Login Succesfully!" })
        );
    }

    #[actix_web::test]
    async fn validates_multipart_form_fields() {
        let app = test::init_service(App::new().service(login)).await;
        let username = "u".repeat(31);
        let (content_type, body) = multipart_form(&[("username", username.as_str())]);
        let req = test::TestRequest::post()
            .uri("/login")
            .insert_header((CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let error = error_body(res).await;
        assert_eq!(violation_fields(&error), ["password", "username"]);
        assert!(error.violations().iter().all(|v| v.location == FieldSource::Form));
    }
}
