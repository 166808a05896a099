//! Field-by-field decoding of request inputs.
//!
//! A [`Fields`] reader walks the raw values of one input source and records a
//! violation for every field that is missing or has the wrong type, instead
//! of stopping at the first. Fields that fail are filled with placeholders so
//! the record can still be built and its declared constraints checked.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::{FieldSource, Violation};

/// Violation code for a required field that was not supplied.
pub const MISSING_CODE: &str = "missing";

/// Violation code for a field whose value could not be decoded.
pub const TYPE_CODE: &str = "type";

/// Records that can be assembled one field at a time.
pub trait FromFields: Sized {
    /// Assemble the record from `fields`.
    ///
    /// Failures are recorded on the reader. Return `None` only when no
    /// placeholder can stand in for a failed field.
    fn from_fields(fields: &mut Fields) -> Option<Self>;
}

/// Cursor over the raw values of one input source.
#[derive(Debug)]
pub struct Fields {
    source: FieldSource,
    prefix: Option<String>,
    values: Map<String, Value>,
    textual: bool,
    failures: Vec<Violation>,
}

impl Fields {
    /// Reader over a decoded JSON object.
    #[must_use]
    pub const fn from_json(source: FieldSource, values: Map<String, Value>) -> Self {
        Self {
            source,
            prefix: None,
            values,
            textual: false,
            failures: Vec::new(),
        }
    }

    /// Reader over name/value pairs whose values arrived as text.
    ///
    /// Text values are coerced to the requested type, so `age=25` reads as an
    /// integer. A repeated name keeps its last value.
    ///
    /// # Examples
    /// ```
    /// use roster::domain::FieldSource;
    /// use roster::inbound::http::fields::Fields;
    ///
    /// let mut fields = Fields::from_pairs(FieldSource::Query, [("age", "25")]);
    /// assert_eq!(fields.required::<i64>("age"), 25);
    /// assert!(fields.into_failures().is_empty());
    /// ```
    #[must_use]
    pub fn from_pairs<I, K, V>(source: FieldSource, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(name, value)| (name.into(), Value::String(value.into())))
            .collect();
        Self {
            source,
            prefix: None,
            values,
            textual: true,
            failures: Vec::new(),
        }
    }

    /// Source every violation from this reader is attributed to.
    #[must_use]
    pub const fn source(&self) -> FieldSource {
        self.source
    }

    /// Whether the input carries `name` at all.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Read a required field, substituting `T::default()` when it fails.
    pub fn required<T>(&mut self, name: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        self.read(name, true).unwrap_or_default()
    }

    /// Read an optional field. Absent and `null` both yield `None`.
    pub fn optional<T>(&mut self, name: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        self.read(name, false)
    }

    /// Read a required field and pass it through `convert`.
    ///
    /// A conversion failure is recorded under `code` with the error's text.
    pub fn required_with<R, T, E>(
        &mut self,
        name: &str,
        code: &str,
        convert: impl FnOnce(R) -> Result<T, E>,
    ) -> Option<T>
    where
        R: DeserializeOwned,
        E: fmt::Display,
    {
        let raw = self.read::<R>(name, true)?;
        convert(raw)
            .map_err(|err| self.fail(name, code, &err.to_string()))
            .ok()
    }

    /// Read a required nested record, substituting `T::default()` when it
    /// is absent or not an object.
    pub fn nested<T>(&mut self, name: &str) -> T
    where
        T: FromFields + Default,
    {
        self.object(name, true).unwrap_or_default()
    }

    /// Read an optional nested record.
    pub fn optional_nested<T>(&mut self, name: &str) -> Option<T>
    where
        T: FromFields,
    {
        self.object(name, false)
    }

    /// Violations recorded so far, consuming the reader.
    #[must_use]
    pub fn into_failures(self) -> Vec<Violation> {
        self.failures
    }

    fn read<T>(&mut self, name: &str, required: bool) -> Option<T>
    where
        T: DeserializeOwned,
    {
        match self.values.remove(name) {
            None | Some(Value::Null) if !required => None,
            None => {
                self.fail(name, MISSING_CODE, "is required");
                None
            }
            Some(value) => self
                .decode(value)
                .map_err(|detail| self.fail(name, TYPE_CODE, &format!("is invalid: {detail}")))
                .ok(),
        }
    }

    fn object<T>(&mut self, name: &str, required: bool) -> Option<T>
    where
        T: FromFields,
    {
        match self.values.remove(name) {
            None | Some(Value::Null) if !required => None,
            None => {
                self.fail(name, MISSING_CODE, "is required");
                None
            }
            Some(Value::Object(values)) => {
                let mut child = Self {
                    source: self.source,
                    prefix: Some(self.path(name)),
                    values,
                    textual: self.textual,
                    failures: Vec::new(),
                };
                let record = T::from_fields(&mut child);
                self.failures.append(&mut child.failures);
                record
            }
            Some(_) => {
                self.fail(name, TYPE_CODE, "is invalid: expected an object");
                None
            }
        }
    }

    fn decode<T>(&self, value: Value) -> Result<T, String>
    where
        T: DeserializeOwned,
    {
        match value {
            Value::String(text) if self.textual => decode_text(&text),
            other => serde_json::from_value(other).map_err(|err| err.to_string()),
        }
    }

    fn fail(&mut self, name: &str, code: &str, detail: &str) {
        let path = self.path(name);
        let message = format!("{path} {detail}");
        self.failures
            .push(Violation::new(self.source, path, code, message));
    }

    fn path(&self, name: &str) -> String {
        self.prefix
            .as_ref()
            .map_or_else(|| name.to_owned(), |prefix| format!("{prefix}.{name}"))
    }
}

/// Decode a text value as a string first, then as a JSON scalar.
fn decode_text<T>(text: &str) -> Result<T, String>
where
    T: DeserializeOwned,
{
    serde_json::from_value(Value::String(text.to_owned()))
        .or_else(|err| serde_json::from_str(text).map_err(|_| err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Eq, Deserialize)]
    #[serde(rename_all = "lowercase")]
    enum Shade {
        #[default]
        Light,
        Dark,
    }

    #[derive(Debug, Default, PartialEq, Eq)]
    struct Swatch {
        name: String,
        shade: Shade,
    }

    impl FromFields for Swatch {
        fn from_fields(fields: &mut Fields) -> Option<Self> {
            Some(Self {
                name: fields.required("name"),
                shade: fields.required("shade"),
            })
        }
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(values) => values,
            other => panic!("expected an object, got {other}"),
        }
    }

    fn codes(failures: &[Violation]) -> Vec<(String, String)> {
        failures
            .iter()
            .map(|v| (v.field.clone().unwrap_or_default(), v.code.clone()))
            .collect()
    }

    #[rstest]
    #[case("25", 25)]
    #[case("-3", -3)]
    fn text_values_coerce_to_integers(#[case] text: &str, #[case] expected: i64) {
        let mut fields = Fields::from_pairs(FieldSource::Query, [("age", text)]);
        assert_eq!(fields.required::<i64>("age"), expected);
        assert!(fields.into_failures().is_empty());
    }

    #[rstest]
    fn text_values_keep_numeric_looking_strings() {
        let mut fields = Fields::from_pairs(FieldSource::Form, [("username", "12345")]);
        assert_eq!(fields.required::<String>("username"), "12345");
    }

    #[rstest]
    fn every_missing_and_mistyped_field_is_recorded() {
        let mut fields = Fields::from_json(
            FieldSource::Body,
            object(json!({ "age": "old", "hair_color": "green" })),
        );

        let age: i64 = fields.required("age");
        let name: String = fields.required("name");
        let shade: Option<Shade> = fields.optional("hair_color");

        assert_eq!((age, name.as_str(), shade), (0, "", None));
        assert_eq!(
            codes(&fields.into_failures()),
            [
                ("age".to_owned(), TYPE_CODE.to_owned()),
                ("name".to_owned(), MISSING_CODE.to_owned()),
                ("hair_color".to_owned(), TYPE_CODE.to_owned()),
            ]
        );
    }

    #[rstest]
    fn optional_fields_accept_null_and_absence() {
        let mut fields = Fields::from_json(FieldSource::Body, object(json!({ "shade": null })));
        assert_eq!(fields.optional::<Shade>("shade"), None);
        assert_eq!(fields.optional::<Shade>("other"), None);
        assert!(fields.into_failures().is_empty());
    }

    #[rstest]
    fn nested_failures_use_dotted_paths() {
        let mut fields = Fields::from_json(
            FieldSource::Body,
            object(json!({ "swatch": { "shade": "purple" } })),
        );
        let swatch: Swatch = fields.nested("swatch");

        assert_eq!(swatch, Swatch::default());
        assert_eq!(
            codes(&fields.into_failures()),
            [
                ("swatch.name".to_owned(), MISSING_CODE.to_owned()),
                ("swatch.shade".to_owned(), TYPE_CODE.to_owned()),
            ]
        );
    }

    #[rstest]
    #[case(json!({}), MISSING_CODE)]
    #[case(json!({ "swatch": [1, 2] }), TYPE_CODE)]
    fn nested_record_must_be_an_object(#[case] body: Value, #[case] code: &str) {
        let mut fields = Fields::from_json(FieldSource::Body, object(body));
        let _placeholder: Swatch = fields.nested("swatch");

        assert_eq!(
            codes(&fields.into_failures()),
            [("swatch".to_owned(), code.to_owned())]
        );
    }

    #[rstest]
    fn conversion_failures_use_the_given_code() {
        let mut fields = Fields::from_pairs(FieldSource::Path, [("id", "0")]);
        let id = fields.required_with("id", "range", |raw: i64| {
            if raw > 0 { Ok(raw) } else { Err("must be positive") }
        });

        assert_eq!(id, None);
        let failures = fields.into_failures();
        assert_eq!(codes(&failures), [("id".to_owned(), "range".to_owned())]);
        assert_eq!(failures[0].message, "id must be positive");
    }
}
