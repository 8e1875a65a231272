//! Request validation for the county data lookup.
//!
//! A pure function over the decoded JSON body: no I/O, no shared state.
//! Each rejection maps to a distinct entry in the error taxonomy so the
//! caller can tell exactly which rule failed.

use serde_json::Value;

use crate::config::DEFAULT_RESULT_LIMIT;
use crate::error::AppError;
use crate::measures;

/// A lookup request that has passed all validation rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// 5-digit ZIP code. Validated as a format gate; the dataset is keyed
    /// by county, not ZIP, so this does not narrow the query.
    pub zip: String,
    /// A member of [`measures::ALLOWED_MEASURES`].
    pub measure_name: String,
    /// Maximum rows to return, at least 1.
    pub limit: u32,
}

/// Validate a decoded JSON body into a [`LookupRequest`].
///
/// Rules, in order:
/// 1. `coffee == "teapot"` short-circuits to [`AppError::Teapot`] before
///    any field-presence check.
/// 2. `zip` and `measure_name` must be present and non-empty.
/// 3. `zip` must be a string of exactly 5 ASCII digits.
/// 4. `measure_name` must be in the measure catalog.
/// 5. `limit`, if present, must be an integer >= 1; it defaults to
///    [`DEFAULT_RESULT_LIMIT`].
pub fn validate(body: &Value) -> Result<LookupRequest, AppError> {
    let Some(fields) = body.as_object() else {
        return Err(AppError::MalformedJson);
    };

    if fields.get("coffee").and_then(Value::as_str) == Some("teapot") {
        return Err(AppError::Teapot);
    }

    // Absent, null, or empty string counts as missing. A value of the
    // wrong JSON type is present but invalid, reported per-field below.
    let missing = |v: Option<&Value>| match v {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    };
    if missing(fields.get("zip")) || missing(fields.get("measure_name")) {
        return Err(AppError::MissingParameter);
    }

    let zip = match fields.get("zip").and_then(Value::as_str) {
        Some(s) if is_valid_zip(s) => s.to_string(),
        _ => return Err(AppError::InvalidZip),
    };

    let measure_name = match fields.get("measure_name").and_then(Value::as_str) {
        Some(s) if measures::is_allowed(s) => s.to_string(),
        _ => return Err(AppError::InvalidMeasure),
    };

    let limit = match fields.get("limit") {
        None | Some(Value::Null) => DEFAULT_RESULT_LIMIT,
        Some(value) => match value.as_u64() {
            Some(n) if n >= 1 && n <= u64::from(u32::MAX) => n as u32,
            _ => return Err(AppError::InvalidLimit),
        },
    };

    Ok(LookupRequest {
        zip,
        measure_name,
        limit,
    })
}

fn is_valid_zip(zip: &str) -> bool {
    zip.len() == 5 && zip.bytes().all(|b| b.is_ascii_digit())
}
