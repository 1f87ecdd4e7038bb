//! Mapbox-style S-expressions.
//!
//! An expression is either a literal or a call `["op", arg1, arg2, ...]`.
//! Any JSON array whose first element is a string is a call; the operator
//! set is closed, and heads outside it are kept as [`Operator::Unknown`]
//! so that every consumer reports them the same way.

use serde::{Deserialize, Deserializer};
use serde_json::Value as Json;

use crate::binding::Template;
use crate::diagnostics::Warning;
use crate::error::{LayoutError, Result};

/// A literal leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Literal {
    /// JS truthiness of the literal.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
        }
    }

    /// The literal as a string slice, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The literal as a number, if it is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// The closed operator set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Get,
    Has,
    All,
    Any,
    Not,
    Case,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    Add,
    Sub,
    Mul,
    Div,
    Concat,
    Upcase,
    Downcase,
    Interpolate,
    Coalesce,
    Substring,
    /// An operator name outside the supported set.
    Unknown(String),
}

impl Operator {
    /// Look up an operator by its JSON name.
    pub fn parse(name: &str) -> Self {
        match name {
            "get" => Self::Get,
            "has" => Self::Has,
            "all" => Self::All,
            "any" => Self::Any,
            "not" | "!" => Self::Not,
            "case" => Self::Case,
            "<" => Self::Lt,
            "<=" => Self::Le,
            ">" => Self::Gt,
            ">=" => Self::Ge,
            "==" => Self::Eq,
            "!=" => Self::Ne,
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "concat" => Self::Concat,
            "upcase" => Self::Upcase,
            "downcase" => Self::Downcase,
            "interpolate" => Self::Interpolate,
            "coalesce" => Self::Coalesce,
            "substring" => Self::Substring,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The JSON name of the operator.
    pub fn name(&self) -> &str {
        match self {
            Self::Get => "get",
            Self::Has => "has",
            Self::All => "all",
            Self::Any => "any",
            Self::Not => "!",
            Self::Case => "case",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Concat => "concat",
            Self::Upcase => "upcase",
            Self::Downcase => "downcase",
            Self::Interpolate => "interpolate",
            Self::Coalesce => "coalesce",
            Self::Substring => "substring",
            Self::Unknown(name) => name,
        }
    }

    /// Whether this is one of the six comparison operators.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Lt | Self::Le | Self::Gt | Self::Ge | Self::Eq | Self::Ne
        )
    }

    /// Whether this is one of the four arithmetic operators.
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div)
    }

    /// Accepted argument count as `(min, max)`.
    fn arity(&self) -> (usize, Option<usize>) {
        match self {
            Self::Get | Self::Has | Self::Not | Self::Upcase | Self::Downcase => (1, Some(1)),
            Self::Interpolate => (1, Some(1)),
            Self::Lt | Self::Le | Self::Gt | Self::Ge | Self::Eq | Self::Ne => (2, Some(2)),
            Self::Add | Self::Sub | Self::Mul | Self::Div => (2, Some(2)),
            Self::Substring => (2, Some(3)),
            Self::Coalesce => (1, None),
            Self::All | Self::Any | Self::Case | Self::Concat => (0, None),
            Self::Unknown(_) => (0, None),
        }
    }
}

/// An operator applied to arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub op: Operator,
    pub args: Vec<Expression>,
}

impl Call {
    /// Check that the call can be evaluated or compiled.
    ///
    /// Both the evaluator and the compiler run this first and fall back to
    /// the same placeholder when it fails.
    pub fn check(&self) -> std::result::Result<(), Warning> {
        if let Operator::Unknown(op) = &self.op {
            return Err(Warning::UnknownOperator { op: op.clone() });
        }

        let (min, max) = self.op.arity();
        let count = self.args.len();
        if count < min || max.is_some_and(|max| count > max) {
            let expected = match max {
                Some(max) if max == min => format!("{min}"),
                Some(max) => format!("{min} to {max}"),
                None => format!("at least {min}"),
            };
            return Err(Warning::MalformedCall {
                op: self.op.name().to_string(),
                reason: format!("expected {expected} arguments, got {count}"),
            });
        }

        if matches!(self.op, Operator::Get | Operator::Has | Operator::Interpolate)
            && self.string_arg(0).is_none()
        {
            return Err(Warning::MalformedCall {
                op: self.op.name().to_string(),
                reason: "first argument must be a string literal".to_string(),
            });
        }

        Ok(())
    }

    /// The argument at `index` if it is a string literal.
    pub fn string_arg(&self, index: usize) -> Option<&str> {
        match self.args.get(index) {
            Some(Expression::Literal(Literal::String(s))) => Some(s),
            _ => None,
        }
    }
}

/// A Mapbox-style expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    Call(Call),
}

impl Expression {
    /// Build an expression from parsed JSON.
    pub fn from_json(value: &Json) -> Result<Self> {
        match value {
            Json::Null => Ok(Self::Literal(Literal::Null)),
            Json::Bool(b) => Ok(Self::Literal(Literal::Bool(*b))),
            Json::Number(n) => Ok(Self::Literal(Literal::Number(
                n.as_f64().unwrap_or(f64::NAN),
            ))),
            Json::String(s) => Ok(Self::Literal(Literal::String(s.clone()))),
            Json::Array(items) => match items.split_first() {
                Some((Json::String(op), rest)) => {
                    let args = rest.iter().map(Self::from_json).collect::<Result<Vec<_>>>()?;
                    Ok(Self::Call(Call {
                        op: Operator::parse(op),
                        args,
                    }))
                }
                _ => Err(LayoutError::InvalidExpression(format!(
                    "array without an operator name: {value}"
                ))),
            },
            Json::Object(_) => Err(LayoutError::InvalidExpression(format!(
                "objects are not expressions: {value}"
            ))),
        }
    }

    /// Whether a JSON value has the shape of a call.
    pub fn is_call_json(value: &Json) -> bool {
        matches!(value.as_array().and_then(|a| a.first()), Some(Json::String(_)))
    }

    /// A call expression.
    pub fn call(op: &str, args: Vec<Expression>) -> Self {
        Self::Call(Call {
            op: Operator::parse(op),
            args,
        })
    }

    /// `["get", path]`.
    pub fn get(path: &str) -> Self {
        Self::call("get", vec![Self::string(path)])
    }

    /// `["has", path]`.
    pub fn has(path: &str) -> Self {
        Self::call("has", vec![Self::string(path)])
    }

    /// A string literal.
    pub fn string(s: impl Into<String>) -> Self {
        Self::Literal(Literal::String(s.into()))
    }

    /// A number literal.
    pub fn number(n: f64) -> Self {
        Self::Literal(Literal::Number(n))
    }

    /// A boolean literal.
    pub fn bool(b: bool) -> Self {
        Self::Literal(Literal::Bool(b))
    }

    /// The literal, if this expression is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            Self::Call(_) => None,
        }
    }

    /// Truthiness known without a context, if any.
    pub fn constant_truthiness(&self) -> Option<bool> {
        self.as_literal().map(Literal::is_truthy)
    }

    /// Sub-expressions whose value can become the result of this expression.
    ///
    /// `case` contributes its branch values and fallback, `coalesce` its
    /// arguments; every other expression is its own leaf.
    pub fn value_leaves(&self) -> Vec<&Expression> {
        let mut leaves = Vec::new();
        self.collect_value_leaves(&mut leaves);
        leaves
    }

    fn collect_value_leaves<'a>(&'a self, out: &mut Vec<&'a Expression>) {
        match self {
            Self::Call(Call {
                op: Operator::Case,
                args,
            }) => {
                for (i, arg) in args.iter().enumerate() {
                    let is_value = i % 2 == 1 || i + 1 == args.len();
                    if is_value {
                        arg.collect_value_leaves(out);
                    }
                }
            }
            Self::Call(Call {
                op: Operator::Coalesce,
                args,
            }) => {
                for arg in args {
                    arg.collect_value_leaves(out);
                }
            }
            _ => out.push(self),
        }
    }

    /// Every path read by this expression (`get`, `has`, interpolation slots).
    pub fn referenced_paths(&self, out: &mut Vec<String>) {
        if let Self::Call(call) = self {
            match call.op {
                Operator::Get | Operator::Has => {
                    if let Some(path) = call.string_arg(0) {
                        out.push(path.to_string());
                    }
                }
                Operator::Interpolate => {
                    if let Some(text) = call.string_arg(0) {
                        out.extend(Template::parse(text).bindings().map(str::to_string));
                    }
                }
                _ => {}
            }
            for arg in &call.args {
                arg.referenced_paths(out);
            }
        }
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        Expression::from_json(&json).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_with_string_head_is_call() {
        let expr = Expression::from_json(&json!(["get", "temperature"])).unwrap();
        assert_eq!(expr, Expression::get("temperature"));
    }

    #[test]
    fn test_bang_is_not() {
        let expr = Expression::from_json(&json!(["!", true])).unwrap();
        match expr {
            Expression::Call(call) => assert_eq!(call.op, Operator::Not),
            _ => panic!("expected call"),
        }
    }

    #[test]
    fn test_unknown_operator_is_kept() {
        let expr = Expression::from_json(&json!(["frobnicate", 1, 2])).unwrap();
        let Expression::Call(call) = expr else {
            panic!("expected call");
        };
        assert_eq!(call.op, Operator::Unknown("frobnicate".into()));
        assert_eq!(
            call.check(),
            Err(Warning::UnknownOperator {
                op: "frobnicate".into()
            })
        );
    }

    #[test]
    fn test_arity_is_checked() {
        let Expression::Call(call) = Expression::call("<", vec![Expression::number(1.0)]) else {
            panic!("expected call");
        };
        assert!(matches!(call.check(), Err(Warning::MalformedCall { .. })));
    }

    #[test]
    fn test_get_requires_string_path() {
        let Expression::Call(call) = Expression::call("get", vec![Expression::number(1.0)]) else {
            panic!("expected call");
        };
        assert!(call.check().is_err());
    }

    #[test]
    fn test_untagged_array_is_rejected() {
        assert!(Expression::from_json(&json!([1, 2, 3])).is_err());
        assert!(Expression::from_json(&json!({"a": 1})).is_err());
    }

    #[test]
    fn test_value_leaves_of_case() {
        let expr = Expression::from_json(&json!([
            "case",
            ["<", ["get", "size.width"], 100],
            "primary",
            "error"
        ]))
        .unwrap();
        let leaves = expr.value_leaves();
        assert_eq!(
            leaves,
            vec![&Expression::string("primary"), &Expression::string("error")]
        );
    }

    #[test]
    fn test_referenced_paths() {
        let expr = Expression::from_json(&json!([
            "concat",
            ["get", "locationName"],
            ["interpolate", "{{temperature}} / {{item.hour}}"]
        ]))
        .unwrap();
        let mut paths = Vec::new();
        expr.referenced_paths(&mut paths);
        assert_eq!(paths, vec!["locationName", "temperature", "item.hour"]);
    }
}
