//! Runtime values with JavaScript conversion rules.
//!
//! Layout data originates from JavaScript-shaped JSON, so evaluation uses
//! ECMAScript truthiness, `ToNumber`, `ToString`, relational comparison and
//! loose equality.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde_json::Value as Json;

use crate::expr::Literal;

/// A value produced by evaluating an expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    /// JS truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Array(_) | Self::Object(_) => true,
        }
    }

    /// Whether the value is present: not `undefined`, `null` or `""`.
    pub fn has_value(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Whether the value is `undefined` or `null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// ECMAScript `ToNumber`.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Undefined => f64::NAN,
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::String(s) => string_to_number(s),
            Self::Array(_) => string_to_number(&self.to_js_string()),
            Self::Object(_) => f64::NAN,
        }
    }

    /// ECMAScript `ToString`.
    pub fn to_js_string(&self) -> String {
        match self {
            Self::Undefined => "undefined".to_string(),
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::String(s) => s.clone(),
            Self::Array(items) => items
                .iter()
                .map(|v| if v.is_nullish() { String::new() } else { v.to_js_string() })
                .collect::<Vec<_>>()
                .join(","),
            Self::Object(_) => "[object Object]".to_string(),
        }
    }

    /// Text shown to the user: like `ToString`, but absent values are empty.
    pub fn to_display_string(&self) -> String {
        if self.is_nullish() {
            String::new()
        } else {
            self.to_js_string()
        }
    }

    /// Property lookup by key; arrays accept numeric indices.
    pub fn get_key(&self, key: &str) -> Value {
        match self {
            Self::Object(map) => map.get(key).cloned().unwrap_or_default(),
            Self::Array(items) => match key {
                "length" => Self::Number(items.len() as f64),
                _ => key
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| items.get(i).cloned())
                    .unwrap_or_default(),
            },
            Self::String(s) if key == "length" => Self::Number(s.encode_utf16().count() as f64),
            _ => Self::Undefined,
        }
    }

    /// The elements, if this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The string, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// ECMAScript loose equality (`==`).
    pub fn loose_eq(&self, other: &Value) -> bool {
        use Value::*;
        match (self, other) {
            (Undefined | Null, Undefined | Null) => true,
            (Undefined | Null, _) | (_, Undefined | Null) => false,
            (Number(a), Number(b)) => a == b,
            (String(a), String(b)) => a == b,
            (Bool(a), Bool(b)) => a == b,
            (Number(a), String(_)) => *a == other.to_number(),
            (String(_), Number(b)) => self.to_number() == *b,
            (Bool(_), _) => Number(self.to_number()).loose_eq(other),
            (_, Bool(_)) => self.loose_eq(&Number(other.to_number())),
            (Array(_) | Object(_), Array(_) | Object(_)) => self == other,
            (Array(_) | Object(_), _) => String(self.to_js_string()).loose_eq(other),
            (_, Array(_) | Object(_)) => self.loose_eq(&String(other.to_js_string())),
        }
    }

    /// ECMAScript abstract relational comparison. `None` when either side is `NaN`.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        let left = self.to_primitive();
        let right = other.to_primitive();
        if let (Value::String(a), Value::String(b)) = (&left, &right) {
            return Some(a.encode_utf16().cmp(b.encode_utf16()));
        }
        left.to_number().partial_cmp(&right.to_number())
    }

    /// The binary `+` operator.
    pub fn js_add(&self, other: &Value) -> Value {
        let left = self.to_primitive();
        let right = other.to_primitive();
        if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
            Value::String(left.to_js_string() + &right.to_js_string())
        } else {
            Value::Number(left.to_number() + right.to_number())
        }
    }

    fn to_primitive(&self) -> Value {
        match self {
            Self::Array(_) | Self::Object(_) => Self::String(self.to_js_string()),
            other => other.clone(),
        }
    }
}

impl From<&Json> for Value {
    fn from(json: &Json) -> Self {
        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(*b),
            Json::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Self::String(s.clone()),
            Json::Array(items) => Self::Array(items.iter().map(Value::from).collect()),
            Json::Object(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        Value::from(&json)
    }
}

impl From<&Literal> for Value {
    fn from(lit: &Literal) -> Self {
        match lit {
            Literal::Null => Self::Null,
            Literal::Bool(b) => Self::Bool(*b),
            Literal::Number(n) => Self::Number(*n),
            Literal::String(s) => Self::String(s.clone()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// ECMAScript `ToNumber` applied to a string.
pub fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    match trimmed {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) =>
        {
            trimmed.parse().unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    }
}

/// ECMAScript `Number::toString` for finite and non-finite values.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{n}");
    }

    let formatted = format!("{n:e}");
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Undefined.is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Number(f64::NAN).is_truthy());
        assert!(Value::from("0").is_truthy());
        assert!(Value::Array(vec![]).is_truthy());
    }

    #[test]
    fn test_to_number() {
        assert_eq!(Value::from(" 12 ").to_number(), 12.0);
        assert_eq!(Value::from("").to_number(), 0.0);
        assert_eq!(Value::Null.to_number(), 0.0);
        assert_eq!(Value::Bool(true).to_number(), 1.0);
        assert!(Value::from("8°C").to_number().is_nan());
        assert!(Value::from("inf").to_number().is_nan());
        assert!(Value::Undefined.to_number().is_nan());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_loose_equality() {
        assert!(Value::from("8").loose_eq(&Value::Number(8.0)));
        assert!(Value::Null.loose_eq(&Value::Undefined));
        assert!(!Value::Null.loose_eq(&Value::Number(0.0)));
        assert!(Value::Bool(true).loose_eq(&Value::from("1")));
        assert!(!Value::from("a").loose_eq(&Value::from("b")));
    }

    #[test]
    fn test_compare() {
        assert_eq!(
            Value::from("10").compare(&Value::Number(9.0)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Value::from("10").compare(&Value::from("9")),
            Some(Ordering::Less)
        );
        assert_eq!(Value::Undefined.compare(&Value::Number(1.0)), None);
    }

    #[test]
    fn test_add() {
        assert_eq!(
            Value::Number(1.0).js_add(&Value::Number(2.0)),
            Value::Number(3.0)
        );
        assert_eq!(
            Value::Number(8.0).js_add(&Value::from("°C")),
            Value::from("8°C")
        );
    }

    #[test]
    fn test_from_json_lookup() {
        let value = Value::from(json!({"b": 1, "a": [1, "x"]}));
        assert_eq!(value.get_key("b"), Value::Number(1.0));
        assert_eq!(value.get_key("a").get_key("1"), Value::from("x"));
        assert_eq!(value.get_key("missing"), Value::Undefined);
    }
}
