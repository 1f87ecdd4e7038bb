//! Inline CSS built from element properties.
//!
//! Property values are resolved against the preview data before they become
//! CSS, so bindings and expressions show their sample values.

use indexmap::IndexMap;
use widget_core::rewrite::effective_margins;
use widget_core::theme::{classify_color, ColorRef};
use widget_core::value::format_number;
use widget_core::{
    Alignment, Diagnostics, Edges, Element, Folded, PropertyValue, TextStyle, ThemeColor, Value,
};
use widget_expr::{resolve_property, EvalContext};

const PADDING: [&str; 5] = ["padding", "padding-top", "padding-right", "padding-bottom", "padding-left"];
const MARGIN: [&str; 5] = ["margin", "margin-top", "margin-right", "margin-bottom", "margin-left"];

/// Ordered CSS declarations. Setting an existing property keeps its
/// position and replaces the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    entries: IndexMap<&'static str, String>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: &'static str, value: impl Into<String>) -> &mut Self {
        self.entries.insert(property, value.into());
        self
    }

    /// Set `property` only when it is not set yet.
    pub fn set_default(&mut self, property: &'static str, value: impl Into<String>) -> &mut Self {
        self.entries.entry(property).or_insert_with(|| value.into());
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries.get(property).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `a: b; c: d`
    pub fn to_css(&self) -> String {
        self.entries
            .iter()
            .map(|(property, value)| format!("{property}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Pixel length.
pub fn px(n: f64) -> String {
    format!("{}px", format_number(n))
}

/// Resolve a length property. `"fill"` becomes `100%`; values that are not
/// finite numbers are dropped.
pub fn length(value: &PropertyValue, ctx: &EvalContext<'_>, diag: &mut Diagnostics) -> Option<String> {
    match resolve_property(value, ctx, diag) {
        Value::String(s) if s == "fill" || s == "100%" => Some("100%".to_string()),
        other => {
            let n = other.to_number();
            n.is_finite().then(|| px(n))
        }
    }
}

/// Resolve a color property to a CSS color.
pub fn color(value: &PropertyValue, ctx: &EvalContext<'_>, diag: &mut Diagnostics) -> Option<String> {
    let resolved = resolve_property(value, ctx, diag).to_display_string();
    color_css(&resolved, ctx)
}

/// CSS color for a color string: hex is kept, theme tokens map to their
/// preview hex and paths are looked up in the data.
pub fn color_css(raw: &str, ctx: &EvalContext<'_>) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match classify_color(raw) {
        ColorRef::Hex(hex) => Some(hex.to_string()),
        ColorRef::Path(path) => {
            let found = ctx.lookup(path).to_display_string();
            (!found.is_empty()).then(|| named_color(&found))
        }
        ColorRef::Token(token) => Some(named_color(token)),
    }
}

fn named_color(name: &str) -> String {
    ThemeColor::from_token(name).map_or_else(|| name.to_string(), |c| c.hex().to_string())
}

/// Box model declarations: padding, margins (with folded spacers), size,
/// flex, background and corner radius.
pub fn box_style(
    element: &Element,
    folded: &Folded,
    ctx: &EvalContext<'_>,
    diag: &mut Diagnostics,
) -> Style {
    let box_model = &element.common.box_model;
    let mut style = Style::new();

    edge_style(&mut style, PADDING, &box_model.padding_edges(), ctx, diag);
    edge_style(&mut style, MARGIN, &effective_margins(element, folded), ctx, diag);

    if box_model.fills_width() {
        style.set("width", "100%");
    } else if let Some(width) = box_model.width.as_ref().and_then(|w| length(w, ctx, diag)) {
        style.set("width", width);
    }
    if box_model.fills_height() {
        style.set("height", "100%");
    } else if let Some(height) = box_model.height.as_ref().and_then(|h| length(h, ctx, diag)) {
        style.set("height", height);
    }

    if let Some(flex) = box_model.flex {
        style.set("flex", format_number(flex));
    }
    if let Some(bg) = box_model.background_color.as_ref().and_then(|c| color(c, ctx, diag)) {
        style.set("background-color", bg);
    }
    if let Some(radius) = box_model.corner_radius.as_ref().and_then(|r| length(r, ctx, diag)) {
        style.set("border-radius", radius);
    }
    style
}

fn edge_style(
    style: &mut Style,
    [all, top, right, bottom, left]: [&'static str; 5],
    edges: &Edges<PropertyValue>,
    ctx: &EvalContext<'_>,
    diag: &mut Diagnostics,
) {
    if edges.is_empty() {
        return;
    }
    if let Some(value) = edges.uniform() {
        if let Some(v) = length(value, ctx, diag) {
            style.set(all, v);
        }
        return;
    }
    for (property, edge) in [(top, &edges.top), (right, &edges.right), (bottom, &edges.bottom), (left, &edges.left)] {
        if let Some(v) = edge.as_ref().and_then(|value| length(value, ctx, diag)) {
            style.set(property, v);
        }
    }
}

/// Text declarations; `maxLines` clamps with an ellipsis.
pub fn text_style(
    style: &mut Style,
    text: &TextStyle,
    ctx: &EvalContext<'_>,
    diag: &mut Diagnostics,
) {
    if let Some(size) = text.font_size.as_ref().and_then(|s| length(s, ctx, diag)) {
        style.set("font-size", size);
    }
    if let Some(weight) = text.font_weight {
        style.set("font-weight", weight.css_weight().to_string());
    }
    if let Some(c) = text.color.as_ref().and_then(|c| color(c, ctx, diag)) {
        style.set("color", c);
    }
    if let Some(align) = text.text_align {
        style.set("text-align", align.keyword());
    }
    if let Some(lines) = text.max_lines {
        style
            .set("overflow", "hidden")
            .set("text-overflow", "ellipsis")
            .set("display", "-webkit-box")
            .set("-webkit-line-clamp", lines.to_string())
            .set("-webkit-box-orient", "vertical");
    }
}

/// Flexbox value for an alignment.
pub fn flex_alignment(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Start => "flex-start",
        Alignment::Center => "center",
        Alignment::End => "flex-end",
        Alignment::SpaceBetween => "space-between",
        Alignment::SpaceAround => "space-around",
        Alignment::SpaceEvenly => "space-evenly",
        Alignment::Stretch => "stretch",
    }
}

/// Escape text for HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use widget_expr::WidgetDimensions;

    fn element(value: serde_json::Value) -> Element {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_style_keeps_first_position() {
        let mut style = Style::new();
        style.set("display", "flex").set("gap", "4px").set("display", "block");
        assert_eq!(style.to_css(), "display: block; gap: 4px");
        assert_eq!(style.get("gap"), Some("4px"));
    }

    #[test]
    fn test_box_style() {
        let data = Value::from(&json!({"accent": "#FF0000"}));
        let ctx = EvalContext::new(&data, WidgetDimensions::default());
        let mut diag = Diagnostics::new();

        let el = element(json!({
            "type": "label",
            "padding": 8,
            "marginTop": 4,
            "width": "fill",
            "height": 20,
            "backgroundColor": "{{accent}}",
            "cornerRadius": 6
        }));
        let css = box_style(&el, &Folded::default(), &ctx, &mut diag).to_css();
        assert_eq!(
            css,
            "padding: 8px; margin-top: 4px; width: 100%; height: 20px; \
             background-color: #FF0000; border-radius: 6px"
        );
    }

    #[test]
    fn test_theme_colors() {
        let data = Value::from(&json!({"tint": "primary"}));
        let ctx = EvalContext::new(&data, WidgetDimensions::default());
        assert_eq!(color_css("onSurface", &ctx).as_deref(), Some("#E6E1E5"));
        assert_eq!(color_css("data.tint", &ctx).as_deref(), Some("#D0BCFF"));
        assert_eq!(color_css("#123", &ctx).as_deref(), Some("#123"));
        assert_eq!(color_css("red", &ctx).as_deref(), Some("red"));
        assert_eq!(color_css("  ", &ctx), None);
    }

    #[test]
    fn test_text_style_clamps_lines() {
        let data = Value::Undefined;
        let ctx = EvalContext::new(&data, WidgetDimensions::default());
        let mut diag = Diagnostics::new();
        let text = TextStyle {
            font_size: Some(PropertyValue::Literal(widget_core::Literal::Number(14.0))),
            max_lines: Some(2),
            ..TextStyle::default()
        };
        let mut style = Style::new();
        text_style(&mut style, &text, &ctx, &mut diag);
        assert_eq!(style.get("font-size"), Some("14px"));
        assert_eq!(style.get("-webkit-line-clamp"), Some("2"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#), "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;");
    }
}
