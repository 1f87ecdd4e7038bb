//! Kotlin data classes inferred from the paths a layout reads.

use indexmap::IndexMap;
use serde::Serialize;

use widget_core::theme::{classify_color, ColorRef};
use widget_core::{
    Condition, Element, ElementKind, Literal, PropertyValue, ResolvedPath, Root, Scope, TextStyle,
    WidgetLayout,
};

use crate::templates::to_pascal_case;

/// Fields every root data class declares.
const ROOT_FIELDS: [&str; 4] = ["temperature", "locationName", "description", "iconPath"];

const HOURLY_FIELDS: &[&str] = &["time", "temperature", "iconPath"];
const DAILY_FIELDS: &[&str] = &["date", "high", "low", "iconPath"];

/// Item class and its known fields for a list field.
fn list_class(field: &str) -> (String, &'static [&'static str]) {
    match field {
        "hourlyData" => ("HourlyForecast".to_string(), HOURLY_FIELDS),
        "dailyData" => ("DailyForecast".to_string(), DAILY_FIELDS),
        other => (format!("{}Item", to_pascal_case(other)), &[]),
    }
}

/// Type of a data class field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// A list of the named item class.
    List(String),
}

/// One generated `data class`.
#[derive(Debug, Clone, PartialEq)]
pub struct DataClass {
    pub name: String,
    pub fields: IndexMap<String, FieldKind>,
}

impl DataClass {
    fn new(name: String, known: &[&str]) -> Self {
        let fields = known
            .iter()
            .map(|field| (field.to_string(), FieldKind::Text))
            .collect();
        Self { name, fields }
    }

    fn add(&mut self, field: &str, kind: FieldKind) {
        match self.fields.get_mut(field) {
            Some(existing) if matches!(kind, FieldKind::List(_)) => *existing = kind,
            Some(_) => {}
            None => {
                self.fields.insert(field.to_string(), kind);
            }
        }
    }
}

/// Serializable view of a class for the file template.
#[derive(Debug, Serialize)]
pub struct ClassContext {
    pub name: String,
    pub fields: Vec<FieldContext>,
}

#[derive(Debug, Serialize)]
pub struct FieldContext {
    pub name: String,
    pub kotlin_type: String,
    pub default: &'static str,
    pub swift_type: String,
    pub swift_default: &'static str,
}

/// Root data class followed by every item class, in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct DataShape {
    classes: IndexMap<String, DataClass>,
    root: String,
}

impl DataShape {
    pub fn root(&self) -> Option<&DataClass> {
        self.classes.get(&self.root)
    }

    pub fn class(&self, name: &str) -> Option<&DataClass> {
        self.classes.get(name)
    }

    pub fn classes(&self) -> impl Iterator<Item = &DataClass> {
        self.classes.values()
    }

    /// Template context for every class.
    pub fn to_context(&self) -> Vec<ClassContext> {
        self.classes()
            .map(|class| ClassContext {
                name: class.name.clone(),
                fields: class
                    .fields
                    .iter()
                    .map(|(name, kind)| match kind {
                        FieldKind::Text => FieldContext {
                            name: name.clone(),
                            kotlin_type: "String".to_string(),
                            default: "\"\"",
                            swift_type: "String".to_string(),
                            swift_default: "\"\"",
                        },
                        FieldKind::List(item) => FieldContext {
                            name: name.clone(),
                            kotlin_type: format!("List<{item}>"),
                            default: "emptyList()",
                            swift_type: format!("[{item}]"),
                            swift_default: "[]",
                        },
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Infer the data classes a generated composable needs.
pub fn infer_data_shape(layout: &WidgetLayout) -> DataShape {
    let root = format!("{}Data", to_pascal_case(&layout.name));
    let mut shape = DataShape {
        classes: IndexMap::new(),
        root: root.clone(),
    };
    shape
        .classes
        .insert(root.clone(), DataClass::new(root.clone(), &ROOT_FIELDS));

    let mut walker = ShapeWalker { shape: &mut shape };
    if let Some(color) = layout.background.as_ref().and_then(|bg| bg.color.as_ref()) {
        walker.color(color, &root, None);
    }
    for variant in &layout.variants {
        walker.condition(&variant.condition, &root, None);
    }
    for tree in layout.trees() {
        walker.element(tree, &root, None);
    }
    shape
}

struct ShapeWalker<'s> {
    shape: &'s mut DataShape,
}

impl ShapeWalker<'_> {
    /// Record a path read in a scope whose item class is `item`.
    fn path(&mut self, path: &str, root: &str, item: Option<&str>, kind: FieldKind) {
        let scope = if item.is_some() { Scope::Item } else { Scope::Data };
        let resolved = ResolvedPath::resolve(path, scope);
        let owner = match resolved.root {
            Root::Data => root,
            Root::Item => match item {
                Some(item) => item,
                None => return,
            },
            Root::Size => return,
        };
        match resolved.segments.as_slice() {
            [field] if is_identifier(field) => {
                if let Some(class) = self.shape.classes.get_mut(owner) {
                    class.add(field, kind);
                }
            }
            _ => tracing::debug!("path {path} has no flat data class field"),
        }
    }

    fn value(&mut self, value: &PropertyValue, root: &str, item: Option<&str>) {
        let mut paths = Vec::new();
        match value {
            PropertyValue::Literal(_) => {}
            PropertyValue::Binding(template) => paths.extend(template.bindings().map(str::to_string)),
            PropertyValue::Expression(expr) => expr.referenced_paths(&mut paths),
        }
        for path in paths {
            self.path(&path, root, item, FieldKind::Text);
        }
    }

    fn color(&mut self, value: &PropertyValue, root: &str, item: Option<&str>) {
        if let PropertyValue::Literal(Literal::String(s)) = value {
            if let ColorRef::Path(path) = classify_color(s) {
                self.path(path, root, item, FieldKind::Text);
            }
            return;
        }
        self.value(value, root, item);
    }

    fn condition(&mut self, condition: &Condition, root: &str, item: Option<&str>) {
        if let Condition::Expr(expr) = condition {
            let mut paths = Vec::new();
            expr.referenced_paths(&mut paths);
            for path in paths {
                self.path(&path, root, item, FieldKind::Text);
            }
        }
    }

    fn style(&mut self, style: &TextStyle, root: &str, item: Option<&str>) {
        if let Some(size) = &style.font_size {
            self.value(size, root, item);
        }
        if let Some(color) = &style.color {
            self.color(color, root, item);
        }
    }

    fn element(&mut self, element: &Element, root: &str, item: Option<&str>) {
        let common = &element.common;
        if let Some(condition) = &common.visible_if {
            self.condition(condition, root, item);
        }
        let bm = &common.box_model;
        for value in [
            &bm.padding,
            &bm.padding_horizontal,
            &bm.padding_vertical,
            &bm.padding_top,
            &bm.padding_right,
            &bm.padding_bottom,
            &bm.padding_left,
            &bm.margin,
            &bm.margin_horizontal,
            &bm.margin_vertical,
            &bm.margin_top,
            &bm.margin_right,
            &bm.margin_bottom,
            &bm.margin_left,
            &bm.width,
            &bm.height,
            &bm.corner_radius,
        ]
        .into_iter()
        .flatten()
        {
            self.value(value, root, item);
        }
        if let Some(color) = &bm.background_color {
            self.color(color, root, item);
        }

        match &element.kind {
            ElementKind::Column(c) | ElementKind::Row(c) | ElementKind::Stack(c) => {
                if let Some(spacing) = &c.spacing {
                    self.value(spacing, root, item);
                }
                for child in &c.children {
                    self.element(child, root, item);
                }
            }
            ElementKind::Label(label) => {
                if let Some(text) = &label.text {
                    self.value(text, root, item);
                }
                self.style(&label.style, root, item);
                for span in &label.spans {
                    self.element(span, root, item);
                }
            }
            ElementKind::Span(span) => {
                if let Some(text) = &span.text {
                    self.value(text, root, item);
                }
                self.style(&span.style, root, item);
            }
            ElementKind::Clock(clock) => self.style(&clock.style, root, item),
            ElementKind::Date(date) => self.style(&date.style, root, item),
            ElementKind::Image(image) => {
                for value in [&image.src, &image.size].into_iter().flatten() {
                    self.value(value, root, item);
                }
            }
            ElementKind::Spacer(spacer) => {
                if let Some(size) = &spacer.size {
                    self.value(size, root, item);
                }
            }
            ElementKind::Divider(divider) => {
                if let Some(thickness) = &divider.thickness {
                    self.value(thickness, root, item);
                }
                if let Some(color) = &divider.color {
                    self.color(color, root, item);
                }
            }
            ElementKind::ScrollView(sv) => {
                for child in &sv.children {
                    self.element(child, root, item);
                }
            }
            ElementKind::ForEach(fe) => {
                if let Some(limit) = &fe.limit {
                    self.value(limit, root, item);
                }
                let Some(items) = &fe.items else {
                    return;
                };
                let scope = if item.is_some() { Scope::Item } else { Scope::Data };
                let resolved = ResolvedPath::resolve(items, scope);
                let field = resolved.segments.last().cloned().unwrap_or_default();
                let (class_name, known) = list_class(&field);
                self.shape
                    .classes
                    .entry(class_name.clone())
                    .or_insert_with(|| DataClass::new(class_name.clone(), known));
                self.path(items, root, item, FieldKind::List(class_name.clone()));
                if let Some(template) = &fe.item_template {
                    self.element(template, root, Some(class_name.as_str()));
                }
            }
            ElementKind::Conditional(cond) => {
                if let Some(condition) = &cond.condition {
                    self.condition(condition, root, item);
                }
                for branch in [&cond.then, &cond.otherwise].into_iter().flatten() {
                    self.element(branch, root, item);
                }
            }
            ElementKind::Unsupported(_) => {}
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn layout(value: serde_json::Value) -> WidgetLayout {
        serde_json::from_value(value).unwrap()
    }

    fn field_names(class: &DataClass) -> Vec<&str> {
        class.fields.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_root_fields_and_lists() {
        let shape = infer_data_shape(&layout(json!({
            "name": "Forecast",
            "layout": {"type": "column", "children": [
                {"type": "label", "text": "{{feelsLike}} / {{temperature}}"},
                {"type": "forEach", "items": "hourlyData", "limit": 3,
                 "itemTemplate": {"type": "label", "text": "{{hour}} {{item.precipitation}}"}},
                {"type": "forEach", "items": "{{alerts}}", "itemTemplate": {"type": "label", "text": "{{title}}"}}
            ]}
        })));

        let root = shape.root().unwrap();
        assert_eq!(root.name, "ForecastData");
        assert_eq!(
            field_names(root),
            vec!["temperature", "locationName", "description", "iconPath", "feelsLike", "hourlyData", "alerts"]
        );
        assert_eq!(root.fields["hourlyData"], FieldKind::List("HourlyForecast".into()));

        let hourly = shape.class("HourlyForecast").unwrap();
        assert_eq!(field_names(hourly), vec!["time", "temperature", "iconPath", "hour", "precipitation"]);
        assert_eq!(field_names(shape.class("AlertsItem").unwrap()), vec!["title"]);
    }

    #[test]
    fn test_expressions_conditions_and_colors() {
        let shape = infer_data_shape(&layout(json!({
            "name": "W",
            "variants": [{"condition": "{{windSpeed}}", "layout": {"type": "label"}}],
            "layout": {"type": "label",
                       "visibleIf": ["has", "uvIndex"],
                       "color": "data.tint",
                       "text": ["concat", ["get", "size.width"], ["get", "current.temp"]]}
        })));
        let root = shape.root().unwrap();
        assert!(root.fields.contains_key("windSpeed"));
        assert!(root.fields.contains_key("uvIndex"));
        assert!(root.fields.contains_key("tint"));
        assert!(!root.fields.contains_key("size"));
        assert!(!root.fields.contains_key("current"));
    }

    #[test]
    fn test_template_context() {
        let shape = infer_data_shape(&layout(json!({
            "name": "W",
            "layout": {"type": "forEach", "items": "dailyData", "itemTemplate": {"type": "label"}}
        })));
        let classes = shape.to_context();
        assert_eq!(classes.len(), 2);
        let daily = classes[0].fields.iter().find(|f| f.name == "dailyData").unwrap();
        assert_eq!(daily.kotlin_type, "List<DailyForecast>");
        assert_eq!(daily.default, "emptyList()");
        assert_eq!(daily.swift_type, "[DailyForecast]");
        assert_eq!(daily.swift_default, "[]");
        assert_eq!(classes[1].name, "DailyForecast");
    }
}
