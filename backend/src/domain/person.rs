//! Person and location schemas.
//!
//! `Person` is the inbound record and carries a password; `PersonOut` is the
//! projection returned to clients. The projection is an explicit `From`
//! conversion so the password can only leave through a type that has no
//! field for it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::Validate;

/// Closed set of hair colours accepted on person records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HairColor {
    /// `white`
    White,
    /// `brown`
    Brown,
    /// `black`
    Black,
    /// `blonde`
    Blonde,
    /// `red`
    Red,
}

/// Postal location attached to a person during updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    /// City name.
    #[schema(example = "Guadalajara")]
    pub city: String,
    /// State or province.
    #[schema(example = "Jalisco")]
    pub state: String,
    /// Country name.
    #[schema(example = "Mexico")]
    pub country: String,
}

/// Inbound person record.
///
/// `Debug` is implemented by hand so the password never reaches logs.
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
pub struct Person {
    /// Given name.
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    #[schema(min_length = 1, max_length = 50, example = "Carlos")]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    #[schema(min_length = 1, max_length = 50, example = "Alvarez")]
    pub last_name: String,
    /// Age in years, in `(0, 115]`.
    #[validate(range(exclusive_min = 0, max = 115, message = "must be greater than 0 and at most 115"))]
    #[schema(exclusive_minimum = 0, maximum = 115, example = 26)]
    pub age: i64,
    /// Optional hair colour from the closed [`HairColor`] set.
    #[serde(default)]
    #[schema(example = "red")]
    pub hair_color: Option<HairColor>,
    /// Optional marital status.
    #[serde(default)]
    #[schema(example = false)]
    pub is_married: Option<bool>,
    /// Write-only secret; never returned.
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    #[schema(min_length = 8, example = "passwordTest")]
    pub password: String,
}

impl std::fmt::Debug for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Person")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("age", &self.age)
            .field("hair_color", &self.hair_color)
            .field("is_married", &self.is_married)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Person as returned to clients: every field of [`Person`] except the
/// password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PersonOut {
    /// Given name.
    #[schema(example = "Carlos")]
    pub first_name: String,
    /// Family name.
    #[schema(example = "Alvarez")]
    pub last_name: String,
    /// Age in years.
    #[schema(example = 26)]
    pub age: i64,
    /// Hair colour, when known.
    pub hair_color: Option<HairColor>,
    /// Marital status, when known.
    pub is_married: Option<bool>,
}

impl From<Person> for PersonOut {
    fn from(person: Person) -> Self {
        let Person {
            first_name,
            last_name,
            age,
            hair_color,
            is_married,
            password: _,
        } = person;
        Self {
            first_name,
            last_name,
            age,
            hair_color,
            is_married,
        }
    }
}

/// Failures raised by [`merge_fields`].
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// A record could not be serialised.
    #[error("failed to serialise record: {0}")]
    Serialise(#[from] serde_json::Error),
    /// A record serialised to something other than an object.
    #[error("{0} record did not serialise to a JSON object")]
    NotAnObject(&'static str),
}

/// Shallow-merge two records into one field map.
///
/// Both records are serialised to JSON objects. Every field of `overlay` is
/// written over `base`, so on a key collision the overlay value wins and the
/// base value is dropped. Keys present in only one record are kept as-is.
///
/// # Examples
/// ```
/// use roster::domain::{Location, PersonOut, merge_fields};
///
/// let person = PersonOut {
///     first_name: "A".into(),
///     last_name: "B".into(),
///     age: 30,
///     hair_color: None,
///     is_married: None,
/// };
/// let location = Location {
///     city: "X".into(),
///     state: "Y".into(),
///     country: "Z".into(),
/// };
/// let merged = merge_fields(&person, &location).expect("both are objects");
/// assert_eq!(merged.len(), 8);
/// assert_eq!(merged["city"], "X");
/// ```
pub fn merge_fields<B, O>(base: &B, overlay: &O) -> Result<Map<String, Value>, MergeError>
where
    B: Serialize,
    O: Serialize,
{
    let Value::Object(mut merged) = serde_json::to_value(base)? else {
        return Err(MergeError::NotAnObject("base"));
    };
    let Value::Object(overrides) = serde_json::to_value(overlay)? else {
        return Err(MergeError::NotAnObject("overlay"));
    };
    merged.extend(overrides);
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn person() -> Person {
        Person {
            first_name: "Carlos".into(),
            last_name: "Alvarez".into(),
            age: 26,
            hair_color: Some(HairColor::Red),
            is_married: Some(false),
            password: "passwordTest".into(),
        }
    }

    #[rstest]
    fn projection_drops_password(person: Person) {
        let out = PersonOut::from(person);
        let value = serde_json::to_value(&out).expect("projection serialises");

        assert!(value.get("password").is_none());
        assert_eq!(value.get("hair_color"), Some(&json!("red")));
    }

    #[rstest]
    fn debug_redacts_password(person: Person) {
        let rendered = format!("{person:?}");
        assert!(!rendered.contains("passwordTest"));
        assert!(rendered.contains("<redacted>"));
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(115, true)]
    #[case(116, false)]
    #[case(-5, false)]
    fn age_bounds_are_exclusive_low_inclusive_high(
        mut person: Person,
        #[case] age: i64,
        #[case] valid: bool,
    ) {
        person.age = age;
        assert_eq!(person.validate().is_ok(), valid);
    }

    #[rstest]
    fn short_password_is_rejected(mut person: Person) {
        person.password = "1234567".into();
        let errors = person.validate().expect_err("password too short");
        assert!(errors.field_errors().contains_key("password"));
    }

    #[rstest]
    fn every_failing_field_is_reported(mut person: Person) {
        person.first_name = String::new();
        person.last_name = "x".repeat(51);
        person.age = 200;
        let errors = person.validate().expect_err("three fields invalid");

        let fields = errors.field_errors();
        assert_eq!(fields.len(), 3);
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("last_name"));
        assert!(fields.contains_key("age"));
    }

    #[rstest]
    fn optional_fields_default_to_none() {
        let person: Person = serde_json::from_value(json!({
            "first_name": "A",
            "last_name": "B",
            "age": 30,
            "password": "secret123",
        }))
        .expect("optional fields may be omitted");

        assert_eq!(person.hair_color, None);
        assert_eq!(person.is_married, None);
    }

    #[rstest]
    fn unknown_hair_color_fails_to_decode() {
        let result: Result<Person, _> = serde_json::from_value(json!({
            "first_name": "A",
            "last_name": "B",
            "age": 30,
            "hair_color": "green",
            "password": "secret123",
        }));
        assert!(result.is_err());
    }

    #[rstest]
    fn merge_keeps_both_field_sets() {
        let person = PersonOut {
            first_name: "A".into(),
            last_name: "B".into(),
            age: 30,
            hair_color: None,
            is_married: None,
        };
        let location = Location {
            city: "X".into(),
            state: "Y".into(),
            country: "Z".into(),
        };

        let merged = merge_fields(&person, &location).expect("merge succeeds");

        assert_eq!(
            Value::Object(merged),
            json!({
                "first_name": "A",
                "last_name": "B",
                "age": 30,
                "hair_color": null,
                "is_married": null,
                "city": "X",
                "state": "Y",
                "country": "Z",
            })
        );
    }

    #[rstest]
    fn merge_overlay_wins_on_collision() {
        let base = json!({ "city": "Old", "first_name": "A" });
        let overlay = json!({ "city": "New" });

        let merged = merge_fields(&base, &overlay).expect("merge succeeds");

        assert_eq!(merged["city"], "New");
        assert_eq!(merged["first_name"], "A");
    }

    #[rstest]
    fn merge_rejects_non_objects() {
        let result = merge_fields(&json!([1, 2]), &json!({}));
        assert!(matches!(result, Err(MergeError::NotAnObject("base"))));
    }
}
