//! Field-level validation of authorization-code issuance requests.
//!
//! The schema is closed: unknown keys are reported as errors, and a `null`
//! value counts as an invalid value rather than an absent one. Every field is
//! checked, so a single call reports all violations at once.

use crate::auth::models::ValidationErrorMap;
use serde_json::{Map, Value};
use url::Url;
use uuid::Uuid;

pub const CLIENT_ID_MIN: u64 = 1;
pub const CLIENT_ID_MAX: u64 = 9_999_999_999_998;
pub const STATE_MIN_LENGTH: usize = 8;
pub const SUBJECT_LENGTH: usize = 36;
pub const SCOPE_MIN_LENGTH: usize = 5;
pub const SCOPE_MAX_LENGTH: usize = 32;

const CLIENT_ID: &str = "client_id";
const STATE: &str = "state";
const REDIRECT_URI: &str = "redirect_uri";
const SUBJECT: &str = "subject";
const SCOPES: &str = "scopes";

const RECOGNIZED_FIELDS: [&str; 5] = [CLIENT_ID, STATE, REDIRECT_URI, SUBJECT, SCOPES];

type FieldResult = Result<(), String>;

/// Validate an issuance request body, returning an empty map when it is valid
pub fn validate_issue_authorization_code(input: &Value) -> ValidationErrorMap {
    let empty = Map::new();
    let fields = input.as_object().unwrap_or(&empty);
    let mut errors = ValidationErrorMap::new();

    let checks: [(&str, fn(&Value) -> FieldResult); 4] = [
        (CLIENT_ID, check_client_id),
        (STATE, check_state),
        (REDIRECT_URI, check_redirect_uri),
        (SUBJECT, check_subject),
    ];
    for (field, check) in checks {
        let result = match present(fields, field) {
            Some(value) => check(value),
            None => Err(required(field)),
        };
        if let Err(message) = result {
            errors.insert(field.to_string(), message);
        }
    }

    match present(fields, SCOPES) {
        Some(value) => check_scopes(value, &mut errors),
        None => {
            errors.insert(SCOPES.to_string(), required(SCOPES));
        }
    }

    for key in fields.keys() {
        if !RECOGNIZED_FIELDS.contains(&key.as_str()) {
            errors.insert(key.clone(), format!("{} is not an allowed field", key));
        }
    }

    errors
}

/// Value of a field, treating `null` the same as a missing key
fn present<'a>(fields: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    fields.get(field).filter(|value| !value.is_null())
}

fn required(field: &str) -> String {
    format!("{} is required", field)
}

fn check_client_id(value: &Value) -> FieldResult {
    let Some(client_id) = value.as_u64() else {
        return Err(format!("{} must be a positive integer", CLIENT_ID));
    };
    if !(CLIENT_ID_MIN..=CLIENT_ID_MAX).contains(&client_id) {
        return Err(format!(
            "{} must be between {} and {}",
            CLIENT_ID, CLIENT_ID_MIN, CLIENT_ID_MAX
        ));
    }
    Ok(())
}

fn check_state(value: &Value) -> FieldResult {
    let Some(state) = value.as_str() else {
        return Err(format!("{} must be a string", STATE));
    };
    if state.chars().count() < STATE_MIN_LENGTH {
        return Err(format!(
            "{} must be at least {} characters",
            STATE, STATE_MIN_LENGTH
        ));
    }
    Ok(())
}

fn check_redirect_uri(value: &Value) -> FieldResult {
    let invalid = || format!("{} must be an absolute URL", REDIRECT_URI);
    let uri = value.as_str().ok_or_else(invalid)?;
    let url = Url::parse(uri).map_err(|_| invalid())?;
    if url.cannot_be_a_base() {
        return Err(invalid());
    }
    Ok(())
}

fn check_subject(value: &Value) -> FieldResult {
    let invalid = || format!("{} must be a {} character UUID", SUBJECT, SUBJECT_LENGTH);
    let subject = value.as_str().ok_or_else(invalid)?;
    if subject.len() != SUBJECT_LENGTH || Uuid::try_parse(subject).is_err() {
        return Err(invalid());
    }
    Ok(())
}

fn check_scopes(value: &Value, errors: &mut ValidationErrorMap) {
    let Some(scopes) = value.as_array() else {
        errors.insert(SCOPES.to_string(), format!("{} must be an array", SCOPES));
        return;
    };
    if scopes.is_empty() {
        errors.insert(
            SCOPES.to_string(),
            format!("{} must contain at least one scope", SCOPES),
        );
        return;
    }

    for (index, scope) in scopes.iter().enumerate() {
        if let Err(message) = check_scope(scope) {
            errors.insert(format!("{}[{}]", SCOPES, index), message);
        }
    }
}

fn check_scope(value: &Value) -> FieldResult {
    let Some(scope) = value.as_str() else {
        return Err("scope must be a string".to_string());
    };
    let length = scope.chars().count();
    if !(SCOPE_MIN_LENGTH..=SCOPE_MAX_LENGTH).contains(&length) {
        return Err(format!(
            "scope must be between {} and {} characters",
            SCOPE_MIN_LENGTH, SCOPE_MAX_LENGTH
        ));
    }
    Ok(())
}
