//! Tolerant accessors over structured (JSON) documents returned by the Stream API.
//!
//! The shape of a video document depends on how far the video has progressed through
//! processing: `availableResolutions`, for example, is only present once encoding has finished.
//! Rather than forcing callers to check for every field, [`Fields`] resolves any lookup failure
//! or type mismatch to the zero value of the requested type.

use serde_json::Value;

/// Typed, infallible field lookup on a JSON document.
///
/// Every method returns the zero value (`""`, `0`, `0.0`, `false`) when the key is absent, the
/// document is not an object, or the value has an incompatible type. Numbers and booleans that
/// arrive as strings (`"42"`, `"true"`) are parsed.
pub trait Fields {
    /// Raw access to a field, if it exists.
    fn field(&self, key: &str) -> Option<&Value>;

    fn field_str(&self, key: &str) -> String {
        match self.field(key) {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        }
    }

    fn field_i64(&self, key: &str) -> i64 {
        match self.field(key) {
            Some(Value::Number(n)) => n.as_i64().unwrap_or_default(),
            Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
            _ => 0,
        }
    }

    fn field_u64(&self, key: &str) -> u64 {
        match self.field(key) {
            Some(Value::Number(n)) => n.as_u64().unwrap_or_default(),
            Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
            _ => 0,
        }
    }

    fn field_f64(&self, key: &str) -> f64 {
        match self.field(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
            Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
            _ => 0.0,
        }
    }

    fn field_bool(&self, key: &str) -> bool {
        match self.field(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

impl Fields for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(key)
    }
}

/// Narrows a wide integer into a smaller one, falling back to zero if it does not fit.
pub(crate) fn narrow<T: TryFrom<i64> + Default>(value: i64) -> T {
    T::try_from(value).unwrap_or_default()
}
