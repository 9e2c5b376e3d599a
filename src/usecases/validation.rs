//! Request boundary. Coerces raw payloads and prompt answers into engine input.
//!
//! Nothing unvalidated reaches the engine: every lab value leaving this module is
//! finite and non-negative. Fields are checked in panel order and the first
//! violation is reported.

use crate::domain::{EvaluationInput, MyopathyInput, RequestError};
use serde_json::{Map, Value};

pub const CK_VALUE: &str = "ck_value";
pub const TRANSAMINASE: &str = "transaminase";
pub const BILIRUBIN: &str = "bilirubin";
pub const MUSCLE_SYMPTOMS: &str = "muscle_symptoms";

/// Parse a combined CK + liver request body.
pub fn parse_evaluation(payload: &Value) -> Result<EvaluationInput, RequestError> {
    let fields = as_object(payload)?;
    let ck_value = lab_field(fields, CK_VALUE)?;
    let transaminase = lab_field(fields, TRANSAMINASE)?;
    let bilirubin = lab_field(fields, BILIRUBIN)?;
    let muscle_symptoms = parse_flag(MUSCLE_SYMPTOMS, required(fields, MUSCLE_SYMPTOMS)?)?;
    Ok(EvaluationInput::new(
        ck_value,
        transaminase,
        bilirubin,
        muscle_symptoms,
    ))
}

/// Parse a CK-only request body. Extra liver fields are ignored.
pub fn parse_myopathy(payload: &Value) -> Result<MyopathyInput, RequestError> {
    let fields = as_object(payload)?;
    let ck_value = lab_field(fields, CK_VALUE)?;
    let muscle_symptoms = parse_flag(MUSCLE_SYMPTOMS, required(fields, MUSCLE_SYMPTOMS)?)?;
    Ok(MyopathyInput::new(ck_value, muscle_symptoms))
}

/// Parse a lab value typed by a user (surrounding whitespace allowed).
pub fn parse_lab_value(field: &'static str, raw: &str) -> Result<f64, RequestError> {
    let value = parse_number(field, raw)?;
    check_lab_value(field, value)
}

/// Accepts booleans, 0/1, and true/false/yes/no/y/n strings.
pub fn parse_flag(field: &'static str, value: &Value) -> Result<bool, RequestError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(RequestError::InvalidFlag(field)),
        },
        Value::String(s) => parse_flag_str(field, s),
        _ => Err(RequestError::InvalidFlag(field)),
    }
}

pub fn parse_flag_str(field: &'static str, raw: &str) -> Result<bool, RequestError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(RequestError::InvalidFlag(field)),
    }
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, RequestError> {
    payload
        .as_object()
        .ok_or_else(|| RequestError::Malformed("expected a JSON object".to_string()))
}

fn required<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, RequestError> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(RequestError::MissingField(field)),
        Some(v) => Ok(v),
    }
}

fn lab_field(fields: &Map<String, Value>, field: &'static str) -> Result<f64, RequestError> {
    let value = match required(fields, field)? {
        Value::Number(n) => n.as_f64().ok_or(RequestError::NonNumericValue(field))?,
        Value::String(s) => parse_number(field, s)?,
        _ => return Err(RequestError::NonNumericValue(field)),
    };
    check_lab_value(field, value)
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, RequestError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| RequestError::NonNumericValue(field))
}

fn check_lab_value(field: &'static str, value: f64) -> Result<f64, RequestError> {
    if !value.is_finite() {
        return Err(RequestError::NonNumericValue(field));
    }
    if value < 0.0 {
        return Err(RequestError::NegativeValue(field));
    }
    Ok(value)
}
