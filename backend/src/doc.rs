//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every endpoint of the inbound HTTP layer together
//! with the request, response, and error schemas they reference. Field
//! constraints declared on the records (length bounds, numeric bounds,
//! examples) surface in the generated document.
//!
//! The specification is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::{
    ContactForm, Error, ErrorCode, FieldSource, Greeting, HairColor, ImageSummary, Location,
    LoginForm, LoginOut, Person, PersonOut, Violation,
};
use crate::inbound::http::persons::UpdatePersonRequest;
use crate::inbound::http::schemas::{
    ImageUploadSchema, PersonAgeSchema, PersonExistsSchema, PersonWithLocationSchema,
    UserAgentEchoSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        description = "Schema-validated person, login, contact, and upload endpoints."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::home::home,
        crate::inbound::http::persons::create_person,
        crate::inbound::http::persons::show_person,
        crate::inbound::http::persons::show_person_by_id,
        crate::inbound::http::persons::update_person,
        crate::inbound::http::login::login,
        crate::inbound::http::contact::contact,
        crate::inbound::http::uploads::post_image,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Greeting,
        HairColor,
        Location,
        Person,
        PersonOut,
        UpdatePersonRequest,
        LoginForm,
        LoginOut,
        ContactForm,
        ImageSummary,
        Error,
        ErrorCode,
        FieldSource,
        Violation,
        ImageUploadSchema,
        PersonAgeSchema,
        PersonExistsSchema,
        PersonWithLocationSchema,
        UserAgentEchoSchema,
    )),
    tags(
        (name = "home", description = "Greeting"),
        (name = "persons", description = "Create, look up, and update persons"),
        (name = "login", description = "Form login"),
        (name = "contact", description = "Contact form"),
        (name = "uploads", description = "Image uploads"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.
    //!
    //! Path registration is covered by `backend/tests/openapi_document.rs`.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema(name: &str) -> RefOr<Schema> {
        let doc = ApiDoc::openapi();
        doc.components
            .expect("components")
            .schemas
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("{name} schema registered"))
    }

    fn object_fields(schema: &RefOr<Schema>) -> Vec<String> {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_envelope_fields() {
        let fields = object_fields(&schema("Error"));
        for field in ["code", "message", "traceId", "details"] {
            assert!(fields.iter().any(|f| f == field), "missing {field}");
        }
    }

    #[test]
    fn person_out_schema_omits_password() {
        let fields = object_fields(&schema("PersonOut"));
        assert!(fields.iter().any(|f| f == "first_name"));
        assert!(!fields.iter().any(|f| f == "password"));
    }

    #[test]
    fn person_schema_carries_constraints() {
        let RefOr::T(Schema::Object(person)) = schema("Person") else {
            panic!("expected Object schema");
        };
        let Some(RefOr::T(Schema::Object(age))) = person.properties.get("age") else {
            panic!("age property");
        };
        let json = serde_json::to_value(age).expect("age schema serialises");
        assert_eq!(json["exclusiveMinimum"].as_f64(), Some(0.0));
        assert_eq!(json["maximum"].as_f64(), Some(115.0));
    }
}
