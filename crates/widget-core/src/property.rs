//! Property values and conditions attached to layout elements.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer};
use serde_json::Value as Json;

use crate::binding::{contains_binding, Template};
use crate::condition::parse_condition;
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{LayoutError, Result};
use crate::expr::{Expression, Literal};

/// A property value: literal, `{{path}}` template or expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Literal(Literal),
    Binding(Template),
    Expression(Expression),
}

impl PropertyValue {
    /// Classify a JSON value: a tagged array is an expression, a string
    /// containing `{{` is a template, anything else a literal.
    pub fn from_json(value: &Json) -> Result<Self> {
        if Expression::is_call_json(value) {
            return Ok(Self::Expression(Expression::from_json(value)?));
        }
        match value {
            Json::String(s) if contains_binding(s) => {
                let template = Template::parse(s);
                if template.has_bindings() {
                    Ok(Self::Binding(template))
                } else {
                    Ok(Self::Literal(Literal::String(s.clone())))
                }
            }
            Json::Array(_) | Json::Object(_) => Err(LayoutError::InvalidExpression(format!(
                "expected a literal, template or expression, got {value}"
            ))),
            Json::String(s) => Ok(Self::Literal(Literal::String(s.clone()))),
            Json::Number(n) => Ok(Self::Literal(Literal::Number(n.as_f64().unwrap_or(f64::NAN)))),
            Json::Bool(b) => Ok(Self::Literal(Literal::Bool(*b))),
            Json::Null => Ok(Self::Literal(Literal::Null)),
        }
    }

    /// The literal number, if this is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Literal(lit) => lit.as_number(),
            _ => None,
        }
    }

    /// The literal string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Literal(lit) => lit.as_str(),
            _ => None,
        }
    }

    /// Whether this is a plain literal.
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::from_json(&Json::String(s.to_string()))
            .unwrap_or_else(|_| Self::Literal(Literal::String(s.to_string())))
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        Self::Literal(Literal::Number(n))
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        PropertyValue::from_json(&json).map_err(serde::de::Error::custom)
    }
}

/// A boolean condition: literal, expression or parsed condition string.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Expr(Expression),
    /// A condition string the restricted grammar rejected.
    Invalid { text: String, message: String },
}

impl Condition {
    /// Build a condition from JSON. Strings go through [`parse_condition`].
    pub fn from_json(value: &Json) -> Result<Self> {
        match value {
            Json::String(text) => Ok(Self::from_source(text)),
            other => Ok(Self::Expr(Expression::from_json(other)?)),
        }
    }

    /// Parse a condition string, keeping failures as [`Condition::Invalid`].
    pub fn from_source(text: &str) -> Self {
        match parse_condition(text) {
            Ok(expr) => Self::Expr(expr),
            Err(LayoutError::InvalidCondition { message, offset, .. }) => Self::Invalid {
                text: text.to_string(),
                message: format!("{message} at offset {offset}"),
            },
            Err(other) => Self::Invalid {
                text: text.to_string(),
                message: other.to_string(),
            },
        }
    }

    /// The expression to evaluate or compile. Invalid conditions resolve
    /// to `false` and record a warning.
    pub fn resolve(&self, diag: &mut Diagnostics) -> Cow<'_, Expression> {
        match self {
            Self::Expr(expr) => Cow::Borrowed(expr),
            Self::Invalid { text, message } => {
                diag.warn(Warning::InvalidCondition {
                    text: text.clone(),
                    message: message.clone(),
                });
                Cow::Owned(Expression::bool(false))
            }
        }
    }
}

impl From<Expression> for Condition {
    fn from(expr: Expression) -> Self {
        Self::Expr(expr)
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        Condition::from_json(&json).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolution_order() {
        assert!(matches!(
            PropertyValue::from_json(&json!(["get", "x"])).unwrap(),
            PropertyValue::Expression(_)
        ));
        assert!(matches!(
            PropertyValue::from_json(&json!("{{x}} °")).unwrap(),
            PropertyValue::Binding(_)
        ));
        assert_eq!(
            PropertyValue::from_json(&json!("Hourly")).unwrap(),
            PropertyValue::Literal(Literal::String("Hourly".into()))
        );
        assert_eq!(PropertyValue::from_json(&json!(12)).unwrap().as_number(), Some(12.0));
    }

    #[test]
    fn test_unmatched_braces_stay_literal() {
        assert_eq!(PropertyValue::from("{{oops").as_str(), Some("{{oops"));
    }

    #[test]
    fn test_condition_string_is_parsed() {
        let cond = Condition::from_json(&json!("size.width < 200")).unwrap();
        assert!(matches!(cond, Condition::Expr(Expression::Call(_))));
    }

    #[test]
    fn test_invalid_condition_resolves_false() {
        let cond = Condition::from_json(&json!("size.width <")).unwrap();
        assert!(matches!(cond, Condition::Invalid { .. }));

        let mut diag = Diagnostics::new();
        let expr = cond.resolve(&mut diag);
        assert_eq!(expr.constant_truthiness(), Some(false));
        assert_eq!(diag.len(), 1);
    }
}
