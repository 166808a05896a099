//! OpenAPI schema definitions for response and request shapes that have no
//! dedicated Rust type.
//!
//! Handlers return some bodies as ad-hoc JSON maps (the person lookups and
//! the merged update) and read the upload as a raw multipart part. The
//! wrappers here describe those shapes for the generated document only.

use std::collections::HashMap;

use utoipa::ToSchema;

use crate::domain::HairColor;

/// Multipart body of `POST /post-image`.
#[derive(ToSchema)]
#[schema(as = ImageUpload)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ImageUploadSchema {
    /// Image file contents.
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
}

/// Single-entry map from the requested name to the requested age.
#[derive(ToSchema)]
#[schema(as = PersonAge, example = json!({ "Rocio": 25 }))]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PersonAgeSchema(HashMap<String, i64>);

/// Single-entry map from a known person identifier to `"It exists!"`.
#[derive(ToSchema)]
#[schema(as = PersonExists, example = json!({ "3": "It exists!" }))]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PersonExistsSchema(HashMap<String, String>);

/// Person fields merged with location fields; the password is never present.
#[derive(ToSchema)]
#[schema(as = PersonWithLocation)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PersonWithLocationSchema {
    #[schema(example = "Carlos")]
    first_name: String,
    #[schema(example = "Alvarez")]
    last_name: String,
    #[schema(example = 26)]
    age: i64,
    hair_color: Option<HairColor>,
    is_married: Option<bool>,
    #[schema(example = "Guadalajara")]
    city: String,
    #[schema(example = "Jalisco")]
    state: String,
    #[schema(example = "Mexico")]
    country: String,
}

/// The caller's `User-Agent` header, or `null` when absent.
#[derive(ToSchema)]
#[schema(as = UserAgentEcho, example = "Mozilla/5.0")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserAgentEchoSchema(Option<String>);

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn wrappers_use_short_names() {
        assert_eq!(ImageUploadSchema::name(), "ImageUpload");
        assert_eq!(PersonAgeSchema::name(), "PersonAge");
        assert_eq!(PersonExistsSchema::name(), "PersonExists");
        assert_eq!(PersonWithLocationSchema::name(), "PersonWithLocation");
        assert_eq!(UserAgentEchoSchema::name(), "UserAgentEcho");
    }

    #[test]
    fn upload_schema_declares_binary_image() {
        let schema_json = schema_to_json::<ImageUploadSchema>();
        assert!(schema_json.contains("\"image\""), "missing image field");
        assert!(schema_json.contains("binary"), "image should be binary");
    }

    #[test]
    fn merged_schema_has_no_password() {
        let schema = serde_json::to_value(PersonWithLocationSchema::schema())
            .expect("schema serialises to JSON");
        let properties = schema
            .get("properties")
            .and_then(serde_json::Value::as_object)
            .expect("merged schema lists properties");

        for field in ["first_name", "age", "city", "country"] {
            assert!(properties.contains_key(field), "missing {field}");
        }
        assert!(!properties.contains_key("password"));
    }
}
