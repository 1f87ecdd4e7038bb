//! Runtime context for expression evaluation.

use widget_core::{ResolvedPath, Root, Scope, Value};

/// Rendered widget size in density-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetDimensions {
    pub width: f64,
    pub height: f64,
}

impl WidgetDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for WidgetDimensions {
    fn default() -> Self {
        Self::new(160.0, 160.0)
    }
}

/// `{data, item?, size}` plus the active scope.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub data: &'a Value,
    pub item: Option<&'a Value>,
    pub size: WidgetDimensions,
    pub scope: Scope,
}

impl<'a> EvalContext<'a> {
    /// Root context over widget data.
    pub fn new(data: &'a Value, size: WidgetDimensions) -> Self {
        Self {
            data,
            item: None,
            size,
            scope: Scope::Data,
        }
    }

    /// Context for one `forEach` item; unqualified paths resolve on the item.
    pub fn with_item(&self, item: &'a Value) -> EvalContext<'a> {
        EvalContext {
            data: self.data,
            item: Some(item),
            size: self.size,
            scope: Scope::Item,
        }
    }

    /// Resolve a dotted path; missing intermediates give `undefined`.
    pub fn lookup(&self, path: &str) -> Value {
        let resolved = ResolvedPath::resolve(path, self.scope);
        match resolved.root {
            Root::Data => lookup_in(self.data, &resolved.segments),
            Root::Item => match self.item {
                Some(item) => lookup_in(item, &resolved.segments),
                None => Value::Undefined,
            },
            Root::Size => match resolved.segments.as_slice() {
                [] => Value::Object(
                    [
                        ("width".to_string(), Value::Number(self.size.width)),
                        ("height".to_string(), Value::Number(self.size.height)),
                    ]
                    .into_iter()
                    .collect(),
                ),
                [field] if field == "width" => Value::Number(self.size.width),
                [field] if field == "height" => Value::Number(self.size.height),
                _ => Value::Undefined,
            },
        }
    }
}

fn lookup_in(root: &Value, segments: &[String]) -> Value {
    let mut current = root;
    for (index, segment) in segments.iter().enumerate() {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None if index + 1 == segments.len() => return current.get_key(segment),
            None => return Value::Undefined,
        }
    }
    current.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested() {
        let data = Value::from(json!({"current": {"temp": 8}, "list": [{"hour": "09:00"}]}));
        let ctx = EvalContext::new(&data, WidgetDimensions::default());
        assert_eq!(ctx.lookup("current.temp"), Value::Number(8.0));
        assert_eq!(ctx.lookup("data.current.temp"), Value::Number(8.0));
        assert_eq!(ctx.lookup("list.0.hour"), Value::from("09:00"));
        assert_eq!(ctx.lookup("list.length"), Value::Number(1.0));
        assert_eq!(ctx.lookup("missing.deeper"), Value::Undefined);
    }

    #[test]
    fn test_lookup_size_and_item() {
        let data = Value::from(json!({"hour": "root"}));
        let item = Value::from(json!({"hour": "09:00"}));
        let ctx = EvalContext::new(&data, WidgetDimensions::new(320.0, 120.0));
        assert_eq!(ctx.lookup("size.width"), Value::Number(320.0));
        assert_eq!(ctx.lookup("item.hour"), Value::Undefined);

        let item_ctx = ctx.with_item(&item);
        assert_eq!(item_ctx.lookup("hour"), Value::from("09:00"));
        assert_eq!(item_ctx.lookup("data.hour"), Value::from("root"));
    }
}
