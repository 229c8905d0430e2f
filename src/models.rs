use std::collections::BTreeMap;

use jiff::{Timestamp, civil::Date};
use serde::Serialize;
use serde_json::Value;

use crate::entities::comment;

/// Upper bound on comment length, counted in characters after trimming.
pub const MAX_COMMENT_CHARS: usize = 500;

/// A film as supplied by the catalog provider, before it is stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogFilm {
    pub external_id: i32,
    pub title: String,
    pub release_date: Date,
}

#[derive(Clone, Debug, Serialize)]
pub struct FilmView {
    pub id: i32,
    pub title: String,
    pub release_date: Date,
    pub comment_count: i64,
}

#[derive(Clone, Debug, Serialize)]
pub struct CommentView {
    pub id: i32,
    pub text: String,
    pub created_at: Timestamp,
}

impl TryFrom<comment::Model> for CommentView {
    type Error = jiff::Error;

    fn try_from(model: comment::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            text: model.text,
            created_at: Timestamp::from_microsecond(model.created_at)?,
        })
    }
}

/// Field-keyed validation messages, serialized as `{"field": ["message", ...]}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn field(name: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(name, message);
        errors
    }

    pub fn add(&mut self, name: &str, message: impl Into<String>) {
        self.0.entry(name.to_string()).or_default().push(message.into());
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }
}

/// A validated add-comment request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewComment {
    pub text: String,
}

impl TryFrom<&Value> for NewComment {
    type Error = ValidationErrors;

    fn try_from(payload: &Value) -> Result<Self, Self::Error> {
        let Some(fields) = payload.as_object() else {
            return Err(ValidationErrors::field(
                "non_field_errors",
                format!("Invalid data. Expected a dictionary, but got {}.", type_name(payload)),
            ));
        };

        let text = match fields.get("text") {
            None => return Err(ValidationErrors::field("text", "This field is required.")),
            Some(Value::Null) => {
                return Err(ValidationErrors::field("text", "This field may not be null."));
            }
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(_) => return Err(ValidationErrors::field("text", "Not a valid string.")),
        };

        if text.is_empty() {
            return Err(ValidationErrors::field("text", "This field may not be blank."));
        }
        if text.chars().count() > MAX_COMMENT_CHARS {
            return Err(ValidationErrors::field(
                "text",
                format!("Ensure this field has no more than {MAX_COMMENT_CHARS} characters."),
            ));
        }

        Ok(Self { text })
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
