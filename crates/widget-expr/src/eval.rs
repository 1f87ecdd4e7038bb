//! Expression evaluation against a runtime context.

use widget_core::{
    Call, Diagnostics, Expression, Operator, PropertyValue, Segment, Template, Value, Warning,
};

use crate::context::EvalContext;

/// Value produced in place of an unknown or malformed call.
///
/// It is falsy and displays as nothing, matching the compiled fallback.
pub fn fallback_value() -> Value {
    Value::String(String::new())
}

/// Evaluate an expression depth-first.
pub fn evaluate(expr: &Expression, ctx: &EvalContext<'_>, diag: &mut Diagnostics) -> Value {
    match expr {
        Expression::Literal(lit) => Value::from(lit),
        Expression::Call(call) => match call.check() {
            Ok(()) => evaluate_call(call, ctx, diag),
            Err(warning) => fallback(warning, diag),
        },
    }
}

/// Evaluate an expression and apply JS truthiness.
pub fn evaluate_condition(expr: &Expression, ctx: &EvalContext<'_>, diag: &mut Diagnostics) -> bool {
    evaluate(expr, ctx, diag).is_truthy()
}

/// Resolve a property value: expressions are evaluated, a single binding
/// yields the bound value itself and mixed templates yield a string.
pub fn resolve_property(
    value: &PropertyValue,
    ctx: &EvalContext<'_>,
    diag: &mut Diagnostics,
) -> Value {
    match value {
        PropertyValue::Literal(lit) => Value::from(lit),
        PropertyValue::Binding(template) => match template.single_binding() {
            Some(path) => ctx.lookup(path),
            None => Value::String(render_template(template, ctx)),
        },
        PropertyValue::Expression(expr) => evaluate(expr, ctx, diag),
    }
}

/// Resolve a property value to display text.
pub fn resolve_text(value: &PropertyValue, ctx: &EvalContext<'_>, diag: &mut Diagnostics) -> String {
    resolve_property(value, ctx, diag).to_display_string()
}

/// Substitute every placeholder with the display text of its value.
pub fn render_template(template: &Template, ctx: &EvalContext<'_>) -> String {
    template
        .segments()
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => text.clone(),
            Segment::Binding(path) => ctx.lookup(path).to_display_string(),
        })
        .collect()
}

fn fallback(warning: Warning, diag: &mut Diagnostics) -> Value {
    diag.warn(warning);
    fallback_value()
}

fn evaluate_call(call: &Call, ctx: &EvalContext<'_>, diag: &mut Diagnostics) -> Value {
    let args = &call.args;
    let mut eval = |expr: &Expression| evaluate(expr, ctx, diag);

    match &call.op {
        Operator::Get => ctx.lookup(call.string_arg(0).unwrap_or_default()),
        Operator::Has => Value::Bool(ctx.lookup(call.string_arg(0).unwrap_or_default()).has_value()),
        Operator::All => Value::Bool(args.iter().all(|arg| eval(arg).is_truthy())),
        Operator::Any => Value::Bool(args.iter().any(|arg| eval(arg).is_truthy())),
        Operator::Not => Value::Bool(!eval(&args[0]).is_truthy()),
        Operator::Case => {
            for pair in args.chunks(2) {
                match pair {
                    [condition, value] => {
                        if eval(condition).is_truthy() {
                            return eval(value);
                        }
                    }
                    [default] => return eval(default),
                    _ => {}
                }
            }
            Value::Undefined
        }
        Operator::Lt | Operator::Le | Operator::Gt | Operator::Ge => {
            let left = eval(&args[0]);
            let right = eval(&args[1]);
            Value::Bool(compare(&call.op, &left, &right))
        }
        Operator::Eq => {
            let left = eval(&args[0]);
            Value::Bool(left.loose_eq(&eval(&args[1])))
        }
        Operator::Ne => {
            let left = eval(&args[0]);
            Value::Bool(!left.loose_eq(&eval(&args[1])))
        }
        Operator::Add => {
            let left = eval(&args[0]);
            left.js_add(&eval(&args[1]))
        }
        Operator::Sub | Operator::Mul | Operator::Div => {
            let left = eval(&args[0]).to_number();
            let right = eval(&args[1]).to_number();
            Value::Number(match call.op {
                Operator::Sub => left - right,
                Operator::Mul => left * right,
                _ => left / right,
            })
        }
        Operator::Concat => Value::String(
            args.iter()
                .map(|arg| eval(arg).to_display_string())
                .collect(),
        ),
        Operator::Upcase => Value::String(eval(&args[0]).to_display_string().to_uppercase()),
        Operator::Downcase => Value::String(eval(&args[0]).to_display_string().to_lowercase()),
        Operator::Interpolate => Value::String(render_template(
            &Template::parse(call.string_arg(0).unwrap_or_default()),
            ctx,
        )),
        Operator::Coalesce => args
            .iter()
            .map(|arg| eval(arg))
            .find(Value::has_value)
            .unwrap_or(Value::Undefined),
        Operator::Substring => {
            let text = eval(&args[0]).to_display_string();
            let start = eval(&args[1]).to_number();
            let length = args.get(2).map(|arg| eval(arg).to_number());
            Value::String(substring(&text, start, length))
        }
        Operator::Unknown(_) => fallback_value(),
    }
}

fn compare(op: &Operator, left: &Value, right: &Value) -> bool {
    use std::cmp::Ordering::*;
    match (op, left.compare(right)) {
        (_, None) => false,
        (Operator::Lt, Some(ord)) => ord == Less,
        (Operator::Le, Some(ord)) => ord != Greater,
        (Operator::Gt, Some(ord)) => ord == Greater,
        (Operator::Ge, Some(ord)) => ord != Less,
        _ => false,
    }
}

/// `String.prototype.substring(start, start + length)` over characters.
fn substring(text: &str, start: f64, length: Option<f64>) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len() as f64;
    let clamp = |n: f64| {
        if n.is_nan() {
            0
        } else {
            n.trunc().clamp(0.0, len) as usize
        }
    };
    let from = clamp(start);
    let to = match length {
        Some(length) => clamp(start + length),
        None => chars.len(),
    };
    let (from, to) = if from <= to { (from, to) } else { (to, from) };
    chars[from..to].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::WidgetDimensions;
    use serde_json::json;

    fn expr(value: serde_json::Value) -> Expression {
        Expression::from_json(&value).unwrap()
    }

    fn eval_with(value: serde_json::Value, data: &Value) -> Value {
        let ctx = EvalContext::new(data, WidgetDimensions::new(200.0, 100.0));
        evaluate(&expr(value), &ctx, &mut Diagnostics::new())
    }

    fn sample() -> Value {
        Value::from(json!({
            "temperature": "8°C",
            "locationName": "Paris",
            "count": 5,
            "empty": "",
            "hourlyData": [{"hour": "09:00"}, {"hour": "10:00"}]
        }))
    }

    #[test]
    fn test_get_and_has() {
        let data = sample();
        assert_eq!(eval_with(json!(["get", "temperature"]), &data), Value::from("8°C"));
        assert_eq!(eval_with(json!(["get", "nope.deeper"]), &data), Value::Undefined);
        assert_eq!(eval_with(json!(["has", "locationName"]), &data), Value::Bool(true));
        assert_eq!(eval_with(json!(["has", "empty"]), &data), Value::Bool(false));
        assert_eq!(eval_with(json!(["has", "missing"]), &data), Value::Bool(false));
    }

    #[test]
    fn test_comparisons_and_logic() {
        let data = sample();
        assert_eq!(eval_with(json!(["<", ["get", "size.width"], 250]), &data), Value::Bool(true));
        assert_eq!(eval_with(json!(["==", ["get", "count"], "5"]), &data), Value::Bool(true));
        assert_eq!(eval_with(json!(["!=", ["get", "count"], 5]), &data), Value::Bool(false));
        assert_eq!(
            eval_with(json!(["all", [">=", ["get", "count"], 5], ["!", false]]), &data),
            Value::Bool(true)
        );
        assert_eq!(eval_with(json!(["any"]), &data), Value::Bool(false));
        assert_eq!(eval_with(json!(["all"]), &data), Value::Bool(true));
    }

    #[test]
    fn test_all_short_circuits() {
        let data = sample();
        let ctx = EvalContext::new(&data, WidgetDimensions::default());
        let mut diag = Diagnostics::new();
        let value = evaluate(&expr(json!(["all", false, ["frobnicate"]])), &ctx, &mut diag);
        assert_eq!(value, Value::Bool(false));
        assert!(diag.is_empty());
    }

    #[test]
    fn test_case() {
        let data = sample();
        let case = json!(["case", ["<", ["get", "size.width"], 100], "small", [">", ["get", "count"], 3], "many", "other"]);
        assert_eq!(eval_with(case, &data), Value::from("many"));
        assert_eq!(eval_with(json!(["case", false, "x"]), &data), Value::Undefined);
        assert_eq!(eval_with(json!(["case", false, "x", "fallback"]), &data), Value::from("fallback"));
    }

    #[test]
    fn test_arithmetic() {
        let data = sample();
        assert_eq!(eval_with(json!(["+", ["get", "count"], 1]), &data), Value::Number(6.0));
        assert_eq!(eval_with(json!(["+", ["get", "count"], "°"]), &data), Value::from("5°"));
        assert_eq!(eval_with(json!(["/", ["get", "size.width"], 4]), &data), Value::Number(50.0));
        assert_eq!(eval_with(json!(["-", "10", 4]), &data), Value::Number(6.0));
    }

    #[test]
    fn test_strings() {
        let data = sample();
        assert_eq!(
            eval_with(json!(["concat", ["get", "locationName"], " ", ["get", "missing"], "!"]), &data),
            Value::from("Paris !")
        );
        assert_eq!(eval_with(json!(["upcase", ["get", "locationName"]]), &data), Value::from("PARIS"));
        assert_eq!(eval_with(json!(["downcase", "ABC"]), &data), Value::from("abc"));
        assert_eq!(
            eval_with(json!(["interpolate", "{{locationName}}: {{temperature}}"]), &data),
            Value::from("Paris: 8°C")
        );
        assert_eq!(eval_with(json!(["substring", "Saturday", 0, 3]), &data), Value::from("Sat"));
        assert_eq!(eval_with(json!(["substring", "Saturday", 5]), &data), Value::from("day"));
    }

    #[test]
    fn test_coalesce() {
        let data = sample();
        assert_eq!(
            eval_with(json!(["coalesce", ["get", "empty"], ["get", "missing"], ["get", "locationName"]]), &data),
            Value::from("Paris")
        );
        assert_eq!(eval_with(json!(["coalesce", ["get", "missing"]]), &data), Value::Undefined);
    }

    #[test]
    fn test_unknown_operator_falls_back() {
        let data = sample();
        let ctx = EvalContext::new(&data, WidgetDimensions::default());
        let mut diag = Diagnostics::new();
        let value = evaluate(&expr(json!(["frobnicate", 1, 2])), &ctx, &mut diag);
        assert_eq!(value, fallback_value());
        assert!(!value.is_truthy());
        assert!(diag.has_unknown_operator("frobnicate"));
    }

    #[test]
    fn test_resolve_property() {
        let data = sample();
        let ctx = EvalContext::new(&data, WidgetDimensions::default());
        let mut diag = Diagnostics::new();
        assert_eq!(
            resolve_property(&PropertyValue::from("{{hourlyData}}"), &ctx, &mut diag)
                .as_array()
                .map(<[Value]>::len),
            Some(2)
        );
        assert_eq!(
            resolve_text(&PropertyValue::from("Now {{temperature}}{{missing}}"), &ctx, &mut diag),
            "Now 8°C"
        );
    }
}
