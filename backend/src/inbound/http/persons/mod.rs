//! Person endpoints: create, look up by query or path, and update.
//!
//! ```text
//! POST /person/new
//! GET /person/detail?name=Rocio&age=25
//! GET /person/detail/{person_id}
//! PUT /person/{person_id}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde_json::{Map, Value};
use tracing::{debug, error};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationErrors};

use crate::domain::ports::PersonId;
use crate::domain::{Error, Location, Person, PersonOut, merge_fields};
use crate::inbound::http::ApiResult;
use crate::inbound::http::fields::{Fields, FromFields};
use crate::inbound::http::schemas::{PersonAgeSchema, PersonExistsSchema, PersonWithLocationSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ValidatedJson, ValidatedPath, ValidatedQuery};

/// Response key used when the query omits `name`.
pub const NULL_NAME_KEY: &str = "null";

/// Message returned when a person identifier is not known.
pub const PERSON_NOT_FOUND_MESSAGE: &str = "¡This person doesn't exist!";

/// Value paired with a known identifier.
pub const PERSON_EXISTS_MESSAGE: &str = "It exists!";

/// Query parameters for the person detail lookup.
#[derive(Debug, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PersonQuery {
    /// Person name; keys the response.
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    #[param(min_length = 1, max_length = 50, example = "Rocio")]
    pub name: Option<String>,
    /// Person age; the response value.
    #[param(example = 25)]
    pub age: i64,
}

impl FromFields for PersonQuery {
    fn from_fields(fields: &mut Fields) -> Option<Self> {
        Some(Self {
            name: fields.optional("name"),
            age: fields.required("age"),
        })
    }
}

/// Path parameters addressing a single person.
#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct PersonPath {
    /// Person identifier. Must be greater than 0.
    #[param(value_type = i64, exclusive_minimum = 0, example = 3)]
    pub person_id: PersonId,
}

impl FromFields for PersonPath {
    fn from_fields(fields: &mut Fields) -> Option<Self> {
        let person_id = fields.required_with("person_id", "range", PersonId::new)?;
        Some(Self { person_id })
    }
}

impl Validate for PersonPath {
    /// [`PersonId`] is range-checked while the path is decoded.
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

impl FromFields for Person {
    fn from_fields(fields: &mut Fields) -> Option<Self> {
        Some(Self {
            first_name: fields.required("first_name"),
            last_name: fields.required("last_name"),
            age: fields.required("age"),
            hair_color: fields.optional("hair_color"),
            is_married: fields.optional("is_married"),
            password: fields.required("password"),
        })
    }
}

impl FromFields for Location {
    fn from_fields(fields: &mut Fields) -> Option<Self> {
        Some(Self {
            city: fields.required("city"),
            state: fields.required("state"),
            country: fields.required("country"),
        })
    }
}

/// Body of a person update.
///
/// Accepts either a bare person record, or the person embedded under
/// `person` next to an optional `location`. Only the embedded shape can
/// carry a location.
#[derive(Debug, ToSchema)]
#[serde(untagged)]
pub enum UpdatePersonRequest {
    /// A bare person record.
    Bare(Person),
    /// A person embedded next to an optional location.
    Embedded {
        /// The updated person.
        person: Person,
        /// When present, the response merges these fields into the person.
        location: Option<Location>,
    },
}

impl UpdatePersonRequest {
    /// Split the request into the person and the optional location.
    #[must_use]
    pub fn into_parts(self) -> (Person, Option<Location>) {
        match self {
            Self::Bare(person) => (person, None),
            Self::Embedded { person, location } => (person, location),
        }
    }
}

impl FromFields for UpdatePersonRequest {
    fn from_fields(fields: &mut Fields) -> Option<Self> {
        if fields.contains("person") {
            Some(Self::Embedded {
                person: fields.nested("person"),
                location: fields.optional_nested("location"),
            })
        } else {
            Person::from_fields(fields).map(Self::Bare)
        }
    }
}

impl Validate for UpdatePersonRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::Bare(person) => person.validate(),
            Self::Embedded { person, .. } => {
                ValidationErrors::merge(Ok(()), "person", person.validate())
            }
        }
    }
}

fn single_entry(key: String, value: impl Into<Value>) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert(key, value.into());
    body
}

/// Create a person and return it without the password.
#[utoipa::path(
    post,
    path = "/person/new",
    request_body = Person,
    responses(
        (status = 201, description = "Person created", body = PersonOut),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["persons"],
    operation_id = "createPerson"
)]
#[post("/person/new")]
pub async fn create_person(payload: ValidatedJson<Person>) -> HttpResponse {
    let person = PersonOut::from(payload.into_inner());
    debug!(age = person.age, "person created");
    HttpResponse::Created().json(person)
}

/// Echo a name and age as a single-entry map.
#[utoipa::path(
    get,
    path = "/person/detail",
    params(PersonQuery),
    responses(
        (status = 200, description = "Name mapped to age", body = PersonAgeSchema),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["persons"],
    operation_id = "showPerson"
)]
#[get("/person/detail")]
pub async fn show_person(query: ValidatedQuery<PersonQuery>) -> web::Json<Map<String, Value>> {
    let PersonQuery { name, age } = query.into_inner();
    let key = name.unwrap_or_else(|| NULL_NAME_KEY.to_owned());
    web::Json(single_entry(key, age))
}

/// Report whether a person identifier is known.
#[utoipa::path(
    get,
    path = "/person/detail/{person_id}",
    params(PersonPath),
    responses(
        (status = 200, description = "Person exists", body = PersonExistsSchema),
        (status = 404, description = "Unknown person", body = Error),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["persons"],
    operation_id = "showPersonById"
)]
#[get("/person/detail/{person_id}")]
#[expect(
    clippy::needless_pass_by_value,
    reason = "actix-web extractors are taken by value"
)]
pub async fn show_person_by_id(
    state: web::Data<HttpState>,
    path: ValidatedPath<PersonPath>,
) -> ApiResult<web::Json<Map<String, Value>>> {
    let PersonPath { person_id: id } = path.into_inner();
    if !state.persons.contains(id) {
        debug!(person_id = %id, "unknown person requested");
        return Err(Error::not_found(PERSON_NOT_FOUND_MESSAGE));
    }
    Ok(web::Json(single_entry(id.to_string(), PERSON_EXISTS_MESSAGE)))
}

/// Update a person, optionally merging a location into the response.
///
/// A bare person, or an embedded person without a location, is acknowledged
/// with 204. With a location, the response holds the person's public fields
/// overlaid with the location's; location values win on key collisions.
#[utoipa::path(
    put,
    path = "/person/{person_id}",
    params(PersonPath),
    request_body = UpdatePersonRequest,
    responses(
        (status = 200, description = "Person merged with location", body = PersonWithLocationSchema),
        (status = 204, description = "Person updated"),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["persons"],
    operation_id = "updatePerson"
)]
#[put("/person/{person_id}")]
pub async fn update_person(
    path: ValidatedPath<PersonPath>,
    payload: ValidatedJson<UpdatePersonRequest>,
) -> ApiResult<HttpResponse> {
    let PersonPath { person_id: id } = path.into_inner();
    let (person, maybe_location) = payload.into_inner().into_parts();

    let Some(location) = maybe_location else {
        debug!(person_id = %id, "person updated without location");
        return Ok(HttpResponse::NoContent().finish());
    };

    let merged = merge_fields(&PersonOut::from(person), &location).map_err(|err| {
        error!(error = %err, person_id = %id, "failed to merge person and location");
        Error::internal(format!("failed to merge person and location: {err}"))
    })?;
    debug!(person_id = %id, "person updated with location");
    Ok(HttpResponse::Ok().json(merged))
}
