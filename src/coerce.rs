//! Primitive coercion for raw environment values.
//!
//! Environment variables are always strings, so schema fields that expect a
//! boolean or number declare a coercion step that runs before validation.
//! Coercion never fails: an unrecognized input is passed through unchanged so
//! the validator reports the type mismatch in its own vocabulary instead of
//! this layer inventing one.

use serde_json::{Number, Value};

/// A coercion step attached to a field definition via
/// [`FieldKind::Preprocess`](crate::schema::Field).
///
/// Kept as a tag rather than a closure so field definitions stay `Clone` and
/// `Debug`, and so the documentation generator can unwrap past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Recognize the boolean tokens `"true"`, `"1"`, `"false"`, `"0"`.
    Bool,
    /// Parse a finite number, integer representation first.
    Number,
}

impl Coercion {
    pub fn apply(&self, value: Value) -> Value {
        match self {
            Coercion::Bool => coerce_bool(value),
            Coercion::Number => coerce_number(value),
        }
    }
}

/// Coerce the string tokens `"true"` / `"1"` to `true` and `"false"` / `"0"`
/// to `false`. Anything else — including other spellings like `"yes"` or
/// `"TRUE"` — is returned unchanged.
pub fn coerce_bool(value: Value) -> Value {
    match value.as_str() {
        Some("true") | Some("1") => Value::Bool(true),
        Some("false") | Some("0") => Value::Bool(false),
        _ => value,
    }
}

/// Coerce a numeric string to a number: integer parse first, then finite
/// float. Non-numeric strings and non-finite results (`"NaN"`, `"inf"`) are
/// returned unchanged.
///
/// Integer vs. float is deliberately not enforced here — an `integer` field's
/// own check rejects fractional values after this lenient pass.
pub fn coerce_number(value: Value) -> Value {
    let Some(s) = value.as_str() else {
        return value;
    };
    if let Ok(i) = s.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = s.parse::<f64>()
        && f.is_finite()
        && let Some(n) = Number::from_f64(f)
    {
        return Value::Number(n);
    }
    value
}
