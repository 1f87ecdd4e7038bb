//! Widget layout tree model.
//!
//! Layout files are JSON objects discriminated by `type`. They are read
//! into a flat raw record first and then converted into the closed
//! [`ElementKind`] sum type, so that every consumer matches exhaustively.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value as Json;

use crate::error::Result;
use crate::property::{Condition, PropertyValue};

/// Main axis of a linear container or list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

impl Direction {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("horizontal") | Some("row") => Self::Horizontal,
            _ => Self::Vertical,
        }
    }
}

/// Main-axis or cross-axis alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
    Stretch,
}

impl Alignment {
    /// Parse an alignment name. Unknown names are ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "start" | "top" | "left" | "leading" => Some(Self::Start),
            "center" | "middle" => Some(Self::Center),
            "end" | "bottom" | "right" | "trailing" => Some(Self::End),
            "spaceBetween" | "space-between" => Some(Self::SpaceBetween),
            "spaceAround" | "space-around" => Some(Self::SpaceAround),
            "spaceEvenly" | "space-evenly" => Some(Self::SpaceEvenly),
            "stretch" => Some(Self::Stretch),
            _ => None,
        }
    }
}

/// Font weight of a text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Medium,
    Bold,
}

impl FontWeight {
    fn from_json(value: &Json) -> Option<Self> {
        match value {
            Json::String(s) => match s.as_str() {
                "bold" | "semibold" | "semi-bold" => Some(Self::Bold),
                "medium" => Some(Self::Medium),
                _ => Some(Self::Normal),
            },
            Json::Number(n) => {
                let weight = n.as_f64().unwrap_or(400.0);
                Some(if weight >= 600.0 {
                    Self::Bold
                } else if weight >= 500.0 {
                    Self::Medium
                } else {
                    Self::Normal
                })
            }
            _ => None,
        }
    }

    /// Numeric CSS weight.
    pub fn css_weight(self) -> u16 {
        match self {
            Self::Normal => 400,
            Self::Medium => 500,
            Self::Bold => 700,
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "left" | "start" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            _ => None,
        }
    }

    /// CSS / NativeScript keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Four optional edge values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Edges<T> {
    pub top: Option<T>,
    pub right: Option<T>,
    pub bottom: Option<T>,
    pub left: Option<T>,
}

impl<T: PartialEq> Edges<T> {
    /// Whether no edge is set.
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }

    /// The shared value when all four edges are set and equal.
    pub fn uniform(&self) -> Option<&T> {
        let top = self.top.as_ref()?;
        [&self.right, &self.bottom, &self.left]
            .into_iter()
            .all(|edge| edge.as_ref() == Some(top))
            .then_some(top)
    }
}

/// Size, spacing and paint attributes shared by every element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxModel {
    pub padding: Option<PropertyValue>,
    pub padding_horizontal: Option<PropertyValue>,
    pub padding_vertical: Option<PropertyValue>,
    pub padding_top: Option<PropertyValue>,
    pub padding_right: Option<PropertyValue>,
    pub padding_bottom: Option<PropertyValue>,
    pub padding_left: Option<PropertyValue>,
    pub margin: Option<PropertyValue>,
    pub margin_horizontal: Option<PropertyValue>,
    pub margin_vertical: Option<PropertyValue>,
    pub margin_top: Option<PropertyValue>,
    pub margin_right: Option<PropertyValue>,
    pub margin_bottom: Option<PropertyValue>,
    pub margin_left: Option<PropertyValue>,
    pub width: Option<PropertyValue>,
    pub height: Option<PropertyValue>,
    pub fill_width: bool,
    pub fill_height: bool,
    pub fill_max_size: bool,
    pub flex: Option<f64>,
    pub background_color: Option<PropertyValue>,
    pub corner_radius: Option<PropertyValue>,
}

impl BoxModel {
    /// Padding per edge; the most specific attribute wins.
    pub fn padding_edges(&self) -> Edges<PropertyValue> {
        edges(
            &self.padding,
            &self.padding_horizontal,
            &self.padding_vertical,
            [&self.padding_top, &self.padding_right, &self.padding_bottom, &self.padding_left],
        )
    }

    /// Margin per edge; the most specific attribute wins.
    pub fn margin_edges(&self) -> Edges<PropertyValue> {
        edges(
            &self.margin,
            &self.margin_horizontal,
            &self.margin_vertical,
            [&self.margin_top, &self.margin_right, &self.margin_bottom, &self.margin_left],
        )
    }

    /// Whether the width is `"fill"` or a fill flag is set.
    pub fn fills_width(&self) -> bool {
        self.fill_width || self.fill_max_size || is_fill(&self.width)
    }

    /// Whether the height is `"fill"` or a fill flag is set.
    pub fn fills_height(&self) -> bool {
        self.fill_height || self.fill_max_size || is_fill(&self.height)
    }
}

fn is_fill(value: &Option<PropertyValue>) -> bool {
    matches!(value.as_ref().and_then(PropertyValue::as_str), Some("fill" | "100%"))
}

fn edges(
    all: &Option<PropertyValue>,
    horizontal: &Option<PropertyValue>,
    vertical: &Option<PropertyValue>,
    [top, right, bottom, left]: [&Option<PropertyValue>; 4],
) -> Edges<PropertyValue> {
    let pick = |specific: &Option<PropertyValue>, axis: &Option<PropertyValue>| {
        specific.clone().or_else(|| axis.clone()).or_else(|| all.clone())
    };
    Edges {
        top: pick(top, vertical),
        right: pick(right, horizontal),
        bottom: pick(bottom, vertical),
        left: pick(left, horizontal),
    }
}

/// Attributes every element carries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Common {
    pub id: Option<String>,
    pub visible: Option<bool>,
    pub visible_if: Option<Condition>,
    pub box_model: BoxModel,
}

/// Text styling shared by labels, spans, clocks and dates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    pub font_size: Option<PropertyValue>,
    pub font_weight: Option<FontWeight>,
    pub color: Option<PropertyValue>,
    pub text_align: Option<TextAlign>,
    pub max_lines: Option<u32>,
}

/// `column`, `row` and `stack`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Container {
    pub alignment: Option<Alignment>,
    pub cross_alignment: Option<Alignment>,
    pub spacing: Option<PropertyValue>,
    pub children: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Label {
    pub text: Option<PropertyValue>,
    pub style: TextStyle,
    /// `cspan` children.
    pub spans: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Image {
    pub src: Option<PropertyValue>,
    pub size: Option<PropertyValue>,
    pub content_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spacer {
    pub size: Option<PropertyValue>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Divider {
    pub thickness: Option<PropertyValue>,
    pub color: Option<PropertyValue>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrollView {
    pub direction: Direction,
    pub show_indicator: Option<bool>,
    pub children: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForEach {
    /// Path of the list, relative to the enclosing scope.
    pub items: Option<String>,
    pub limit: Option<PropertyValue>,
    pub item_template: Option<Box<Element>>,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Conditional {
    pub condition: Option<Condition>,
    pub then: Option<Box<Element>>,
    pub otherwise: Option<Box<Element>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Clock {
    pub format_24_hour: Option<String>,
    pub format_12_hour: Option<String>,
    pub style: TextStyle,
}

impl Clock {
    /// Pattern used by generated code (24-hour preferred).
    pub fn pattern(&self) -> &str {
        self.format_24_hour
            .as_deref()
            .or(self.format_12_hour.as_deref())
            .unwrap_or("HH:mm")
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DateText {
    pub format: Option<String>,
    pub style: TextStyle,
}

impl DateText {
    /// Pattern used by generated code.
    pub fn pattern(&self) -> &str {
        self.format.as_deref().unwrap_or("EEE, MMM d")
    }
}

/// A run of text inside a label.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Span {
    pub text: Option<PropertyValue>,
    pub style: TextStyle,
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Column(Container),
    Row(Container),
    Stack(Container),
    Label(Label),
    Image(Image),
    Spacer(Spacer),
    Divider(Divider),
    ScrollView(ScrollView),
    ForEach(ForEach),
    Conditional(Conditional),
    Clock(Clock),
    Date(DateText),
    Span(Span),
    /// A `type` no back-end knows.
    Unsupported(String),
}

/// A node of the layout tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawElement")]
pub struct Element {
    pub common: Common,
    pub kind: ElementKind,
}

impl Element {
    /// Build an element with default common attributes.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            common: Common::default(),
            kind,
        }
    }

    /// The `type` name as written in layout files.
    pub fn type_name(&self) -> &str {
        match &self.kind {
            ElementKind::Column(_) => "column",
            ElementKind::Row(_) => "row",
            ElementKind::Stack(_) => "stack",
            ElementKind::Label(_) => "label",
            ElementKind::Image(_) => "image",
            ElementKind::Spacer(_) => "spacer",
            ElementKind::Divider(_) => "divider",
            ElementKind::ScrollView(_) => "scrollView",
            ElementKind::ForEach(_) => "forEach",
            ElementKind::Conditional(_) => "conditional",
            ElementKind::Clock(_) => "clock",
            ElementKind::Date(_) => "date",
            ElementKind::Span(_) => "cspan",
            ElementKind::Unsupported(name) => name,
        }
    }

    /// Nested elements in traversal order, including item templates and
    /// conditional branches.
    pub fn child_elements(&self) -> Vec<&Element> {
        match &self.kind {
            ElementKind::Column(c) | ElementKind::Row(c) | ElementKind::Stack(c) => {
                c.children.iter().collect()
            }
            ElementKind::Label(label) => label.spans.iter().collect(),
            ElementKind::ScrollView(sv) => sv.children.iter().collect(),
            ElementKind::ForEach(fe) => fe.item_template.iter().map(Box::as_ref).collect(),
            ElementKind::Conditional(cond) => cond
                .then
                .iter()
                .chain(cond.otherwise.iter())
                .map(Box::as_ref)
                .collect(),
            ElementKind::Image(_)
            | ElementKind::Spacer(_)
            | ElementKind::Divider(_)
            | ElementKind::Clock(_)
            | ElementKind::Date(_)
            | ElementKind::Span(_)
            | ElementKind::Unsupported(_) => Vec::new(),
        }
    }

    /// Depth-first, pre-order walk over this element and all descendants.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Element)) {
        visit(self);
        for child in self.child_elements() {
            child.walk(visit);
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawElement {
    #[serde(rename = "type")]
    kind: String,
    id: Option<String>,
    visible: Option<bool>,
    visible_if: Option<Condition>,

    padding: Option<PropertyValue>,
    padding_horizontal: Option<PropertyValue>,
    padding_vertical: Option<PropertyValue>,
    padding_top: Option<PropertyValue>,
    padding_right: Option<PropertyValue>,
    padding_bottom: Option<PropertyValue>,
    padding_left: Option<PropertyValue>,
    margin: Option<PropertyValue>,
    margin_horizontal: Option<PropertyValue>,
    margin_vertical: Option<PropertyValue>,
    margin_top: Option<PropertyValue>,
    margin_right: Option<PropertyValue>,
    margin_bottom: Option<PropertyValue>,
    margin_left: Option<PropertyValue>,
    width: Option<PropertyValue>,
    height: Option<PropertyValue>,
    #[serde(default)]
    fill_width: bool,
    #[serde(default)]
    fill_height: bool,
    #[serde(default)]
    fill_max_size: bool,
    flex: Option<f64>,
    background_color: Option<PropertyValue>,
    corner_radius: Option<PropertyValue>,

    alignment: Option<String>,
    cross_alignment: Option<String>,
    spacing: Option<PropertyValue>,
    #[serde(default)]
    children: Vec<Element>,

    text: Option<PropertyValue>,
    font_size: Option<PropertyValue>,
    font_weight: Option<Json>,
    color: Option<PropertyValue>,
    text_align: Option<String>,
    max_lines: Option<u32>,

    src: Option<PropertyValue>,
    size: Option<PropertyValue>,
    content_description: Option<String>,
    thickness: Option<PropertyValue>,

    direction: Option<String>,
    #[serde(alias = "showsIndicators")]
    show_indicator: Option<bool>,

    items: Option<String>,
    limit: Option<PropertyValue>,
    item_template: Option<Box<Element>>,

    condition: Option<Condition>,
    then: Option<Box<Element>>,
    #[serde(rename = "else")]
    otherwise: Option<Box<Element>>,

    #[serde(rename = "format24Hour")]
    format_24_hour: Option<String>,
    #[serde(rename = "format12Hour")]
    format_12_hour: Option<String>,
    format: Option<String>,
}

impl From<RawElement> for Element {
    fn from(raw: RawElement) -> Self {
        let RawElement {
            kind,
            id,
            visible,
            visible_if,
            padding,
            padding_horizontal,
            padding_vertical,
            padding_top,
            padding_right,
            padding_bottom,
            padding_left,
            margin,
            margin_horizontal,
            margin_vertical,
            margin_top,
            margin_right,
            margin_bottom,
            margin_left,
            width,
            height,
            fill_width,
            fill_height,
            fill_max_size,
            flex,
            background_color,
            corner_radius,
            alignment,
            cross_alignment,
            spacing,
            children,
            text,
            font_size,
            font_weight,
            color,
            text_align,
            max_lines,
            src,
            size,
            content_description,
            thickness,
            direction,
            show_indicator,
            items,
            limit,
            item_template,
            condition,
            then,
            otherwise,
            format_24_hour,
            format_12_hour,
            format,
        } = raw;

        let style = TextStyle {
            font_size,
            font_weight: font_weight.as_ref().and_then(FontWeight::from_json),
            color,
            text_align: text_align.as_deref().and_then(TextAlign::parse),
            max_lines,
        };

        let kind = match kind.as_str() {
            name @ ("column" | "row" | "stack") => {
                let container = Container {
                    alignment: alignment.as_deref().and_then(Alignment::parse),
                    cross_alignment: cross_alignment.as_deref().and_then(Alignment::parse),
                    spacing,
                    children,
                };
                match name {
                    "column" => ElementKind::Column(container),
                    "row" => ElementKind::Row(container),
                    _ => ElementKind::Stack(container),
                }
            }
            "label" => ElementKind::Label(Label {
                text,
                style,
                spans: children,
            }),
            "image" => ElementKind::Image(Image {
                src,
                size,
                content_description,
            }),
            "spacer" => ElementKind::Spacer(Spacer { size }),
            "divider" => ElementKind::Divider(Divider {
                thickness,
                color: style.color,
            }),
            "scrollView" => ElementKind::ScrollView(ScrollView {
                direction: Direction::parse(direction.as_deref()),
                show_indicator,
                children,
            }),
            "forEach" => ElementKind::ForEach(ForEach {
                items: items.as_deref().map(normalize_items_path),
                limit,
                item_template,
                direction: Direction::parse(direction.as_deref()),
            }),
            "conditional" => ElementKind::Conditional(Conditional {
                condition,
                then,
                otherwise,
            }),
            "clock" => ElementKind::Clock(Clock {
                format_24_hour,
                format_12_hour,
                style,
            }),
            "date" => ElementKind::Date(DateText { format, style }),
            "cspan" => ElementKind::Span(Span { text, style }),
            other => ElementKind::Unsupported(other.to_string()),
        };

        let box_model = BoxModel {
            padding,
            padding_horizontal,
            padding_vertical,
            padding_top,
            padding_right,
            padding_bottom,
            padding_left,
            margin,
            margin_horizontal,
            margin_vertical,
            margin_top,
            margin_right,
            margin_bottom,
            margin_left,
            width,
            height,
            fill_width,
            fill_height,
            fill_max_size,
            flex,
            background_color,
            corner_radius,
        };

        Element {
            common: Common {
                id,
                visible,
                visible_if,
                box_model,
            },
            kind,
        }
    }
}

/// `{{hourlyData}}` and `hourlyData` name the same list.
fn normalize_items_path(items: &str) -> String {
    let trimmed = items.trim();
    trimmed
        .strip_prefix("{{")
        .and_then(|s| s.strip_suffix("}}"))
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

/// One of the sizes a widget can be placed at.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WidgetSize {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub family: Option<String>,
}

/// Widget background.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Background {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub color: Option<PropertyValue>,
    #[serde(default)]
    pub image: Option<String>,
}

/// An alternate layout chosen when its condition holds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Variant {
    pub condition: Condition,
    pub layout: Element,
}

/// Root record of a layout file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetLayout {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub supported_sizes: Vec<WidgetSize>,
    #[serde(default)]
    pub default_padding: Option<f64>,
    #[serde(default)]
    pub background: Option<Background>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    pub layout: Element,
}

impl WidgetLayout {
    /// Parse a layout from a JSON string.
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Read and parse a layout file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    /// The first supported size, used as the default.
    pub fn default_size(&self) -> Option<&WidgetSize> {
        self.supported_sizes.first()
    }

    /// Default tree followed by every variant tree.
    pub fn trees(&self) -> impl Iterator<Item = &Element> {
        std::iter::once(&self.layout).chain(self.variants.iter().map(|v| &v.layout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Literal;
    use serde_json::json;

    fn element(value: Json) -> Element {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_column_with_label() {
        let el = element(json!({
            "type": "column",
            "padding": 8,
            "alignment": "center",
            "children": [{"type": "label", "text": "{{temperature}}", "fontWeight": "bold"}]
        }));
        let ElementKind::Column(column) = &el.kind else {
            panic!("expected column");
        };
        assert_eq!(column.alignment, Some(Alignment::Center));
        assert_eq!(el.common.box_model.padding, Some(PropertyValue::from(8.0)));
        let ElementKind::Label(label) = &column.children[0].kind else {
            panic!("expected label");
        };
        assert_eq!(label.style.font_weight, Some(FontWeight::Bold));
        assert!(matches!(label.text, Some(PropertyValue::Binding(_))));
    }

    #[test]
    fn test_for_each_fields() {
        let el = element(json!({
            "type": "forEach",
            "items": "{{hourlyData}}",
            "limit": 3,
            "itemTemplate": {"type": "label", "text": "{{item.hour}}"}
        }));
        let ElementKind::ForEach(fe) = &el.kind else {
            panic!("expected forEach");
        };
        assert_eq!(fe.items.as_deref(), Some("hourlyData"));
        assert_eq!(fe.limit.as_ref().and_then(PropertyValue::as_number), Some(3.0));
        assert!(fe.item_template.is_some());
    }

    #[test]
    fn test_missing_for_each_fields_still_parse() {
        let el = element(json!({"type": "forEach", "items": "hourlyData"}));
        let ElementKind::ForEach(fe) = &el.kind else {
            panic!("expected forEach");
        };
        assert!(fe.item_template.is_none());
    }

    #[test]
    fn test_kind_specific_fields() {
        let el = element(json!({
            "type": "row",
            "spacing": 6,
            "children": [
                {"type": "divider", "thickness": 2, "color": "outline"},
                {"type": "label", "text": "a", "color": "primary", "children": [{"type": "cspan", "text": "b"}]},
                {"type": "scrollView", "children": [{"type": "spacer", "size": 4}]},
                {"type": "clock", "format24Hour": "HH:mm", "fontSize": 20},
                {"type": "conditional", "condition": "size.width > 100", "then": {"type": "date"}}
            ]
        }));
        let ElementKind::Row(row) = &el.kind else {
            panic!("expected row");
        };
        assert_eq!(row.spacing, Some(PropertyValue::from(6.0)));

        let ElementKind::Divider(divider) = &row.children[0].kind else {
            panic!("expected divider");
        };
        assert_eq!(divider.color, Some(PropertyValue::from("outline")));
        assert_eq!(divider.thickness, Some(PropertyValue::from(2.0)));

        let ElementKind::Label(label) = &row.children[1].kind else {
            panic!("expected label");
        };
        assert_eq!(label.style.color, Some(PropertyValue::from("primary")));
        assert_eq!(label.spans.len(), 1);
        assert_eq!(label.spans[0].type_name(), "cspan");

        let ElementKind::ScrollView(scroll) = &row.children[2].kind else {
            panic!("expected scrollView");
        };
        assert_eq!(scroll.children[0].type_name(), "spacer");

        let ElementKind::Clock(clock) = &row.children[3].kind else {
            panic!("expected clock");
        };
        assert_eq!(clock.format_24_hour.as_deref(), Some("HH:mm"));
        assert_eq!(clock.style.font_size, Some(PropertyValue::from(20.0)));

        let ElementKind::Conditional(cond) = &row.children[4].kind else {
            panic!("expected conditional");
        };
        assert!(cond.condition.is_some());
        assert_eq!(cond.then.as_ref().map(|e| e.type_name()), Some("date"));
        assert!(cond.otherwise.is_none());
    }

    #[test]
    fn test_unknown_type_is_unsupported() {
        let el = element(json!({"type": "chart"}));
        assert_eq!(el.kind, ElementKind::Unsupported("chart".into()));
        assert_eq!(el.type_name(), "chart");
    }

    #[test]
    fn test_edges_prefer_specific() {
        let el = element(json!({
            "type": "row",
            "padding": 4,
            "paddingHorizontal": 8,
            "paddingLeft": 12
        }));
        let edges = el.common.box_model.padding_edges();
        assert_eq!(edges.top, Some(PropertyValue::from(4.0)));
        assert_eq!(edges.right, Some(PropertyValue::from(8.0)));
        assert_eq!(edges.left, Some(PropertyValue::from(12.0)));
        assert!(edges.uniform().is_none());
    }

    #[test]
    fn test_widget_layout() {
        let layout = WidgetLayout::from_json_str(
            r#"{
                "name": "SimpleWeatherWidget",
                "supportedSizes": [{"width": 110, "height": 40, "family": "small"}],
                "background": {"type": "solid", "color": "widgetBackground"},
                "variants": [{"condition": "size.width < 100", "layout": {"type": "label", "text": "x"}}],
                "layout": {"type": "column", "children": []}
            }"#,
        )
        .unwrap();
        assert_eq!(layout.default_size().map(|s| s.width), Some(110.0));
        assert_eq!(layout.trees().count(), 2);
        assert_eq!(
            layout.background.and_then(|b| b.color),
            Some(PropertyValue::Literal(Literal::String("widgetBackground".into())))
        );
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(WidgetLayout::from_json_str("{ not json").is_err());
    }

    #[test]
    fn test_walk_is_pre_order() {
        let el = element(json!({
            "type": "column",
            "children": [
                {"type": "row", "children": [{"type": "label", "text": "a"}]},
                {"type": "conditional", "condition": true,
                 "then": {"type": "label", "text": "b"},
                 "else": {"type": "image", "src": "c"}}
            ]
        }));
        let mut names = Vec::new();
        el.walk(&mut |e| names.push(e.type_name().to_string()));
        assert_eq!(names, vec!["column", "row", "label", "conditional", "label", "image"]);
    }
}
