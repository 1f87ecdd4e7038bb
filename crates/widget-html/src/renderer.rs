//! Static HTML rendering of a widget layout against concrete data.
//!
//! The renderer applies the same structural rewrites as the code
//! generators, but decides visibility with the evaluated data: an element
//! whose `visibleIf` is false for the preview data is removed before spacer
//! folding, exactly like a statically hidden one.

use widget_core::rewrite::{item_limit, place_children};
use widget_core::{
    Clock, Condition, Container, DateText, Diagnostics, Direction, Divider, Element, ElementKind,
    ForEach, Folded, Image, Label, Placed, PropertyValue, ScrollSpec, ScrollTargets, ScrollView,
    Spacer, TextStyle, ThemeColor, Value, Warning, WidgetLayout,
};
use widget_expr::{
    evaluate_condition, resolve_property, resolve_text, EvalContext, WidgetDimensions,
};

use crate::error::Result;
use crate::page::PageRenderer;
use crate::style::{box_style, color, escape_html, flex_alignment, length, px, text_style, Style};

const FONT_STACK: &str = r#"-apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif"#;

/// Glyph shown for an image without a usable source.
const IMAGE_PLACEHOLDER: &str = "☁️";

/// Settings for one preview.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Widget size; the layout's first supported size when unset.
    pub size: Option<WidgetDimensions>,
    /// Text shown by `clock` elements.
    pub clock_text: String,
    /// Text shown by `date` elements.
    pub date_text: String,
    /// Page title; the layout's display name when unset.
    pub title: Option<String>,
    /// Page background image; a gradient when unset.
    pub background_image: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: None,
            clock_text: "12:00".to_string(),
            date_text: "Mon, Jan 1".to_string(),
            title: None,
            background_image: None,
        }
    }
}

/// Rendered HTML and the warnings found while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub html: String,
    pub warnings: Vec<Warning>,
}

/// HTML preview renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    pages: PageRenderer,
}

impl HtmlRenderer {
    pub fn new(options: RenderOptions) -> Result<Self> {
        Ok(Self {
            options,
            pages: PageRenderer::new()?,
        })
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Size the widget is rendered at.
    pub fn size_for(&self, layout: &WidgetLayout) -> WidgetDimensions {
        self.options.size.unwrap_or_else(|| {
            layout
                .default_size()
                .map_or_else(WidgetDimensions::default, |s| WidgetDimensions::new(s.width, s.height))
        })
    }

    /// The widget container as an HTML fragment, for embedding in a gallery.
    pub fn render(&self, layout: &WidgetLayout, data: &Value) -> Rendered {
        let size = self.size_for(layout);
        let ctx = EvalContext::new(data, size);
        let mut pass = RenderPass::new(&self.options);

        let tree = select_layout(layout, &ctx, &mut pass.diag);
        let content = pass.root(tree, &ctx);
        let container = container_style(layout, size, &ctx, &mut pass.diag);

        Rendered {
            html: element_html("div", &container, &content),
            warnings: pass.diag.into_warnings(),
        }
    }

    /// A standalone HTML page around the widget.
    pub fn render_page(&self, layout: &WidgetLayout, data: &Value) -> Result<Rendered> {
        let fragment = self.render(layout, data);
        let title = self
            .options
            .title
            .as_deref()
            .or(layout.display_name.as_deref())
            .unwrap_or(&layout.name);
        let html = self.pages.render(
            title,
            &fragment.html,
            self.options.background_image.as_deref(),
        )?;
        Ok(Rendered {
            html,
            warnings: fragment.warnings,
        })
    }
}

/// The first variant whose condition holds, else the default layout.
pub fn select_layout<'l>(
    layout: &'l WidgetLayout,
    ctx: &EvalContext<'_>,
    diag: &mut Diagnostics,
) -> &'l Element {
    layout
        .variants
        .iter()
        .find(|variant| {
            let expr = variant.condition.resolve(diag);
            evaluate_condition(&expr, ctx, diag)
        })
        .map_or(&layout.layout, |variant| &variant.layout)
}

/// Parse and evaluate a condition string such as `size.width < 200`.
/// Strings outside the condition grammar are `false` and record a warning.
pub fn safe_evaluate_condition(text: &str, ctx: &EvalContext<'_>, diag: &mut Diagnostics) -> bool {
    let condition = Condition::from_source(text);
    let expr = condition.resolve(diag);
    evaluate_condition(&expr, ctx, diag)
}

fn container_style(
    layout: &WidgetLayout,
    size: WidgetDimensions,
    ctx: &EvalContext<'_>,
    diag: &mut Diagnostics,
) -> Style {
    let background = layout
        .background
        .as_ref()
        .and_then(|bg| bg.color.as_ref())
        .and_then(|c| color(c, ctx, diag))
        .unwrap_or_else(|| ThemeColor::WidgetBackground.hex().to_string());

    let mut style = Style::new();
    style
        .set("width", px(size.width))
        .set("height", px(size.height))
        .set("border-radius", "16px")
        .set("overflow", "hidden")
        .set("font-family", FONT_STACK)
        .set("background-color", background);
    if let Some(padding) = layout.default_padding {
        style.set("padding", px(padding));
    }
    style
}

fn element_html(tag: &str, style: &Style, inner: &str) -> String {
    format!("<{tag}{}>{inner}</{tag}>", style_attr(style))
}

fn style_attr(style: &Style) -> String {
    if style.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", escape_html(&style.to_css()))
    }
}

fn flex_direction(direction: Direction) -> &'static str {
    match direction {
        Direction::Vertical => "column",
        Direction::Horizontal => "row",
    }
}

/// State of one render: warnings and pending scroll settings.
struct RenderPass<'a> {
    options: &'a RenderOptions,
    diag: Diagnostics,
    scroll: ScrollTargets<'a>,
}

impl<'a> RenderPass<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            diag: Diagnostics::new(),
            scroll: ScrollTargets::new(),
        }
    }

    fn is_visible(&mut self, element: &Element, ctx: &EvalContext<'_>) -> bool {
        if element.common.visible == Some(false) {
            return false;
        }
        match &element.common.visible_if {
            Some(condition) => {
                let expr = condition.resolve(&mut self.diag);
                evaluate_condition(&expr, ctx, &mut self.diag)
            }
            None => true,
        }
    }

    /// Render an element that is not part of a child list.
    fn root(&mut self, element: &'a Element, ctx: &EvalContext<'_>) -> String {
        if !self.is_visible(element, ctx) {
            return String::new();
        }
        self.placed(
            Placed {
                element,
                folded: Folded::default(),
            },
            ctx,
        )
    }

    fn children(
        &mut self,
        children: &'a [Element],
        axis: Direction,
        spacing: Option<&PropertyValue>,
        ctx: &EvalContext<'_>,
    ) -> String {
        let placed = place_children(children, axis, spacing, |child| self.is_visible(child, ctx));
        placed.into_iter().map(|p| self.placed(p, ctx)).collect()
    }

    fn placed(&mut self, placed: Placed<'a>, ctx: &EvalContext<'_>) -> String {
        let element = placed.element;
        match &element.kind {
            ElementKind::ScrollView(sv) => return self.scroll_view(element, sv, ctx),
            ElementKind::Conditional(cond) => {
                let Some(condition) = &cond.condition else {
                    self.diag.warn(Warning::MissingField {
                        element: "conditional",
                        field: "condition",
                    });
                    return String::new();
                };
                let expr = condition.resolve(&mut self.diag);
                let branch = if evaluate_condition(&expr, ctx, &mut self.diag) {
                    cond.then.as_deref()
                } else {
                    cond.otherwise.as_deref()
                };
                return branch.map(|el| self.root(el, ctx)).unwrap_or_default();
            }
            ElementKind::Unsupported(name) => {
                self.diag.warn(Warning::UnsupportedElement {
                    type_name: name.clone(),
                });
                return String::new();
            }
            _ => {}
        }

        let style = box_style(element, &placed.folded, ctx, &mut self.diag);
        match &element.kind {
            ElementKind::Column(c) => self.flex(c, Direction::Vertical, style, ctx),
            ElementKind::Row(c) => self.flex(c, Direction::Horizontal, style, ctx),
            ElementKind::Stack(c) => self.stack(c, style, ctx),
            ElementKind::Label(label) => self.label(label, style, ctx),
            ElementKind::Span(span) => self.text(span.text.as_ref(), &span.style, style, ctx),
            ElementKind::Image(image) => self.image(image, style, ctx),
            ElementKind::Spacer(spacer) => self.spacer(spacer, style, ctx),
            ElementKind::Divider(divider) => self.divider(divider, style, ctx),
            ElementKind::ForEach(fe) => self.for_each(element, fe, style, ctx),
            ElementKind::Clock(Clock { style: text, .. }) => {
                let clock = self.options.clock_text.clone();
                self.fixed_text(&clock, text, style, ctx)
            }
            ElementKind::Date(DateText { style: text, .. }) => {
                let date = self.options.date_text.clone();
                self.fixed_text(&date, text, style, ctx)
            }
            ElementKind::ScrollView(_)
            | ElementKind::Conditional(_)
            | ElementKind::Unsupported(_) => String::new(),
        }
    }

    fn flex(
        &mut self,
        container: &'a Container,
        axis: Direction,
        mut style: Style,
        ctx: &EvalContext<'_>,
    ) -> String {
        style
            .set("display", "flex")
            .set("flex-direction", flex_direction(axis));
        if let Some(alignment) = container.alignment {
            style.set("justify-content", flex_alignment(alignment));
        }
        if let Some(alignment) = container.cross_alignment {
            style.set("align-items", flex_alignment(alignment));
        }
        let inner = self.children(&container.children, axis, container.spacing.as_ref(), ctx);
        element_html("div", &style, &inner)
    }

    fn stack(&mut self, container: &'a Container, mut style: Style, ctx: &EvalContext<'_>) -> String {
        style
            .set("position", "relative")
            .set_default("width", "100%")
            .set_default("height", "100%");

        let mut layer = Style::new();
        layer
            .set("position", "absolute")
            .set("top", "0")
            .set("left", "0")
            .set("width", "100%")
            .set("height", "100%");

        let placed = place_children(&container.children, Direction::Vertical, None, |child| {
            self.is_visible(child, ctx)
        });
        let inner: String = placed
            .into_iter()
            .map(|p| element_html("div", &layer, &self.placed(p, ctx)))
            .collect();
        element_html("div", &style, &inner)
    }

    fn label(&mut self, label: &'a Label, mut style: Style, ctx: &EvalContext<'_>) -> String {
        text_style(&mut style, &label.style, ctx, &mut self.diag);
        let mut inner = label
            .text
            .as_ref()
            .map(|text| escape_html(&resolve_text(text, ctx, &mut self.diag)))
            .unwrap_or_default();
        for span in &label.spans {
            inner.push_str(&self.root(span, ctx));
        }
        element_html("span", &style, &inner)
    }

    fn text(
        &mut self,
        text: Option<&PropertyValue>,
        text_props: &TextStyle,
        mut style: Style,
        ctx: &EvalContext<'_>,
    ) -> String {
        text_style(&mut style, text_props, ctx, &mut self.diag);
        let inner = text
            .map(|t| escape_html(&resolve_text(t, ctx, &mut self.diag)))
            .unwrap_or_default();
        element_html("span", &style, &inner)
    }

    fn fixed_text(
        &mut self,
        text: &str,
        text_props: &TextStyle,
        mut style: Style,
        ctx: &EvalContext<'_>,
    ) -> String {
        text_style(&mut style, text_props, ctx, &mut self.diag);
        style.set_default("text-align", "center");
        element_html("span", &style, &escape_html(text))
    }

    fn image(&mut self, image: &'a Image, mut style: Style, ctx: &EvalContext<'_>) -> String {
        let size = image
            .size
            .as_ref()
            .map(|s| resolve_property(s, ctx, &mut self.diag).to_number())
            .filter(|n| n.is_finite());
        if let Some(size) = size {
            style.set_default("width", px(size)).set_default("height", px(size));
        }

        let src = image
            .src
            .as_ref()
            .map(|s| resolve_text(s, ctx, &mut self.diag))
            .unwrap_or_default();
        if src.trim().is_empty() || src.contains("{{") {
            style
                .set("display", "flex")
                .set("align-items", "center")
                .set("justify-content", "center")
                .set("font-size", px(size.unwrap_or(40.0) * 0.8));
            return element_html("span", &style, IMAGE_PLACEHOLDER);
        }

        let alt = image.content_description.as_deref().unwrap_or("");
        format!(
            "<img src=\"{}\" alt=\"{}\"{}/>",
            escape_html(&src),
            escape_html(alt),
            style_attr(&style)
        )
    }

    fn spacer(&mut self, spacer: &'a Spacer, mut style: Style, ctx: &EvalContext<'_>) -> String {
        match spacer.size.as_ref().and_then(|s| length(s, ctx, &mut self.diag)) {
            Some(size) => {
                style.set_default("width", size.clone()).set_default("height", size);
            }
            None => {
                style.set_default("flex", "1");
            }
        }
        element_html("div", &style, "")
    }

    fn divider(&mut self, divider: &'a Divider, mut style: Style, ctx: &EvalContext<'_>) -> String {
        let thickness = divider
            .thickness
            .as_ref()
            .and_then(|t| length(t, ctx, &mut self.diag))
            .unwrap_or_else(|| "1px".to_string());
        let tint = divider
            .color
            .as_ref()
            .and_then(|c| color(c, ctx, &mut self.diag))
            .unwrap_or_else(|| ThemeColor::OnSurfaceVariant.hex().to_string());
        style
            .set_default("width", "100%")
            .set("height", thickness)
            .set("background-color", tint)
            .set("opacity", "0.3");
        element_html("div", &style, "")
    }

    /// A scroll view is never a node: its children are spliced and its
    /// settings wait for the first `forEach` below it.
    fn scroll_view(
        &mut self,
        element: &'a Element,
        scroll_view: &'a ScrollView,
        ctx: &EvalContext<'_>,
    ) -> String {
        self.scroll.register(element, scroll_view);
        self.children(&scroll_view.children, scroll_view.direction, None, ctx)
    }

    fn for_each(
        &mut self,
        element: &'a Element,
        for_each: &'a ForEach,
        style: Style,
        ctx: &EvalContext<'_>,
    ) -> String {
        let scroll = self.scroll.take(element);
        let Some(items_path) = for_each.items.as_deref() else {
            self.diag.warn(Warning::MissingField {
                element: "forEach",
                field: "items",
            });
            return String::new();
        };
        let Some(template) = for_each.item_template.as_deref() else {
            self.diag.warn(Warning::MissingField {
                element: "forEach",
                field: "itemTemplate",
            });
            return String::new();
        };

        let list = ctx.lookup(items_path);
        let items = list.as_array().unwrap_or(&[]);
        let count = match &for_each.limit {
            Some(limit) => {
                item_limit(resolve_property(limit, ctx, &mut self.diag).to_number()).min(items.len())
            }
            None => items.len(),
        };

        let mut inner = String::new();
        for item in &items[..count] {
            let item_ctx = ctx.with_item(item);
            inner.push_str(&self.root(template, &item_ctx));
        }

        match scroll {
            Some(spec) => self.scroll_list(&spec, style, &inner, ctx),
            None => inner,
        }
    }

    fn scroll_list(
        &mut self,
        spec: &ScrollSpec,
        mut style: Style,
        inner: &str,
        ctx: &EvalContext<'_>,
    ) -> String {
        let overflow = match spec.direction {
            Direction::Vertical => "overflow-y",
            Direction::Horizontal => "overflow-x",
        };
        style
            .set("display", "flex")
            .set("flex-direction", flex_direction(spec.direction))
            .set(overflow, "auto");
        if let Some(width) = spec.width.as_ref().and_then(|w| length(w, ctx, &mut self.diag)) {
            style.set("width", width);
        }
        if let Some(height) = spec.height.as_ref().and_then(|h| length(h, ctx, &mut self.diag)) {
            style.set("height", height);
        }
        if spec.show_indicator == Some(false) {
            style.set("scrollbar-width", "none");
        }
        element_html("div", &style, inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as Json};

    fn layout(tree: Json) -> WidgetLayout {
        serde_json::from_value(json!({"name": "Test", "layout": tree})).unwrap()
    }

    fn render_with(layout: &WidgetLayout, data: Json, options: RenderOptions) -> Rendered {
        HtmlRenderer::new(options)
            .unwrap()
            .render(layout, &Value::from(&data))
    }

    fn render(tree: Json, data: Json) -> Rendered {
        render_with(&layout(tree), data, RenderOptions::default())
    }

    fn hourly(n: usize) -> Json {
        let items: Vec<Json> = (0..n).map(|i| json!({"hour": format!("h{i}")})).collect();
        json!({ "hourlyData": items })
    }

    #[test]
    fn test_label_in_column() {
        let out = render(
            json!({"type": "column", "children": [{"type": "label", "text": "{{temperature}}"}]}),
            json!({"temperature": "8°C"}),
        );
        assert!(out
            .html
            .contains(r#"<div style="display: flex; flex-direction: column"><span>8°C</span></div>"#));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_container_wrapper() {
        let mut widget = layout(json!({"type": "label", "text": "x"}));
        widget.default_padding = Some(12.0);
        let out = render_with(&widget, json!({}), RenderOptions::default());
        assert!(out.html.starts_with(
            "<div style=\"width: 160px; height: 160px; border-radius: 16px; overflow: hidden; "
        ));
        assert!(out.html.contains("background-color: #1C1B1F; padding: 12px\">"));
    }

    #[test]
    fn test_for_each_limit_in_order() {
        let out = render(
            json!({"type": "column", "children": [{
                "type": "forEach",
                "items": "hourlyData",
                "limit": 3,
                "itemTemplate": {"type": "label", "text": "{{item.hour}}"}
            }]}),
            hourly(8),
        );
        assert!(out
            .html
            .contains("<span>h0</span><span>h1</span><span>h2</span></div>"));
        assert!(!out.html.contains("h3"));
    }

    #[test]
    fn test_for_each_missing_list_renders_nothing() {
        let out = render(
            json!({"type": "forEach", "items": "dailyData",
                   "itemTemplate": {"type": "label", "text": "{{item.day}}"}}),
            json!({}),
        );
        assert!(!out.html.contains("<span"));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_variant_selection() {
        let widget: WidgetLayout = serde_json::from_value(json!({
            "name": "Test",
            "variants": [{"condition": "size.width < 200", "layout": {"type": "label", "text": "small"}}],
            "layout": {"type": "label", "text": "large"}
        }))
        .unwrap();

        let small = RenderOptions {
            size: Some(WidgetDimensions::new(150.0, 150.0)),
            ..RenderOptions::default()
        };
        let large = RenderOptions {
            size: Some(WidgetDimensions::new(300.0, 150.0)),
            ..RenderOptions::default()
        };
        assert!(render_with(&widget, json!({}), small).html.contains("<span>small</span>"));
        assert!(render_with(&widget, json!({}), large).html.contains("<span>large</span>"));
    }

    #[test]
    fn test_unknown_type_renders_nothing() {
        let out = render(
            json!({"type": "column", "children": [{"type": "chart"}, {"type": "label", "text": "x"}]}),
            json!({}),
        );
        assert!(out
            .html
            .contains(r#"<div style="display: flex; flex-direction: column"><span>x</span></div>"#));
        assert_eq!(
            out.warnings,
            vec![Warning::UnsupportedElement {
                type_name: "chart".into()
            }]
        );
    }

    #[test]
    fn test_hidden_elements_are_absent() {
        let out = render(
            json!({"type": "column", "children": [
                {"type": "label", "text": "a", "visible": false},
                {"type": "label", "text": "b", "visibleIf": "description"},
                {"type": "label", "text": "c", "visibleIf": "temperature"}
            ]}),
            json!({"temperature": "1°C"}),
        );
        assert!(out
            .html
            .contains(r#"<div style="display: flex; flex-direction: column"><span>c</span></div>"#));
    }

    #[test]
    fn test_invalid_condition_hides_element() {
        let out = render(
            json!({"type": "column", "children": [
                {"type": "label", "text": "a", "visibleIf": "temperature >"}
            ]}),
            json!({"temperature": 3}),
        );
        assert!(!out.html.contains("<span"));
        assert!(matches!(
            out.warnings.as_slice(),
            [Warning::InvalidCondition { .. }]
        ));
    }

    #[test]
    fn test_spacer_folds_into_margin() {
        let out = render(
            json!({"type": "column", "children": [
                {"type": "label", "text": "A"},
                {"type": "spacer", "size": 12},
                {"type": "label", "text": "B", "visible": false},
                {"type": "label", "text": "C"}
            ]}),
            json!({}),
        );
        assert!(out
            .html
            .contains(r#"<span style="margin-bottom: 12px">A</span><span>C</span>"#));
    }

    #[test]
    fn test_spacing_and_flexible_spacer() {
        let out = render(
            json!({"type": "row", "spacing": 4, "alignment": "spaceBetween", "children": [
                {"type": "label", "text": "A"},
                {"type": "spacer"},
                {"type": "label", "text": "B"}
            ]}),
            json!({}),
        );
        assert!(out.html.contains(
            "<div style=\"display: flex; flex-direction: row; justify-content: space-between\">\
             <span style=\"margin-right: 4px\">A</span>\
             <div style=\"margin-right: 4px; flex: 1\"></div>\
             <span>B</span></div>"
        ));
    }

    #[test]
    fn test_unknown_operator_matches_fallback() {
        let out = render(
            json!({"type": "label", "text": ["frobnicate", 1, 2]}),
            json!({}),
        );
        assert!(out.html.contains("<span></span>"));
        assert_eq!(
            out.warnings,
            vec![Warning::UnknownOperator {
                op: "frobnicate".into()
            }]
        );
    }

    #[test]
    fn test_expression_text() {
        let out = render(
            json!({"type": "label", "text": ["case", ["has", "alert"], ["get", "alert"], "All clear"]}),
            json!({}),
        );
        assert!(out.html.contains("<span>All clear</span>"));
    }

    #[test]
    fn test_conditional_branches() {
        let tree = json!({
            "type": "conditional",
            "condition": "temperature",
            "then": {"type": "label", "text": "yes"},
            "else": {"type": "label", "text": "no"}
        });
        assert!(render(tree.clone(), json!({"temperature": "3°C"})).html.contains("<span>yes</span>"));
        assert!(render(tree, json!({})).html.contains("<span>no</span>"));
    }

    #[test]
    fn test_scroll_view_wraps_list() {
        let out = render(
            json!({"type": "column", "children": [{
                "type": "scrollView",
                "height": 100,
                "children": [{
                    "type": "forEach",
                    "items": "hourlyData",
                    "itemTemplate": {"type": "label", "text": "{{item.hour}}"}
                }]
            }]}),
            hourly(2),
        );
        assert!(out.html.contains(
            "<div style=\"display: flex; flex-direction: column; overflow-y: auto; height: 100px\">\
             <span>h0</span><span>h1</span></div>"
        ));
    }

    #[test]
    fn test_image_placeholder_and_source() {
        let out = render(
            json!({"type": "row", "children": [
                {"type": "image", "src": "{{iconPath}}", "size": 20},
                {"type": "image", "src": "icons/{{code}}.png", "contentDescription": "Sun"}
            ]}),
            json!({"code": "800d"}),
        );
        assert!(out.html.contains(
            "<span style=\"width: 20px; height: 20px; display: flex; align-items: center; \
             justify-content: center; font-size: 16px\">☁️</span>"
        ));
        assert!(out.html.contains(r#"<img src="icons/800d.png" alt="Sun"/>"#));
    }

    #[test]
    fn test_text_is_escaped() {
        let out = render(json!({"type": "label", "text": "{{x}}"}), json!({"x": "<b>&"}));
        assert!(out.html.contains("<span>&lt;b&gt;&amp;</span>"));
    }

    #[test]
    fn test_label_style_and_spans() {
        let out = render(
            json!({"type": "label", "fontSize": 14, "fontWeight": "bold", "color": "primary",
                   "children": [{"type": "cspan", "text": "{{temperature}}"}]}),
            json!({"temperature": "8°C"}),
        );
        assert!(out.html.contains(
            "<span style=\"font-size: 14px; font-weight: 700; color: #D0BCFF\"><span>8°C</span></span>"
        ));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let tree = json!({"type": "column", "spacing": 2, "children": [
            {"type": "clock"},
            {"type": "date"},
            {"type": "divider"},
            {"type": "forEach", "items": "hourlyData", "limit": 2,
             "itemTemplate": {"type": "label", "text": "{{item.hour}}"}}
        ]});
        let first = render(tree.clone(), hourly(4));
        let second = render(tree, hourly(4));
        assert_eq!(first, second);
        assert!(first.html.contains("12:00"));
        assert!(first.html.contains("opacity: 0.3"));
    }

    #[test]
    fn test_safe_evaluate_condition() {
        let data = Value::from(&json!({"iconPath": "800d"}));
        let ctx = EvalContext::new(&data, WidgetDimensions::new(150.0, 100.0));
        let mut diag = Diagnostics::new();

        assert!(safe_evaluate_condition("size.width < 200 && size.height >= 100", &ctx, &mut diag));
        assert!(safe_evaluate_condition("{{iconPath}}", &ctx, &mut diag));
        assert!(!safe_evaluate_condition("size.width > 200 || false", &ctx, &mut diag));
        assert!(diag.is_empty());

        assert!(!safe_evaluate_condition("alert(1)", &ctx, &mut diag));
        assert!(matches!(diag.warnings(), [Warning::InvalidCondition { .. }]));
    }

    #[test]
    fn test_page() {
        let widget: WidgetLayout = serde_json::from_value(json!({
            "name": "Test",
            "displayName": "Rain & Sun",
            "layout": {"type": "label", "text": "x"}
        }))
        .unwrap();
        let renderer = HtmlRenderer::new(RenderOptions::default()).unwrap();
        let page = renderer.render_page(&widget, &Value::Undefined).unwrap();
        assert!(page.html.starts_with("<!DOCTYPE html>"));
        assert!(page.html.contains("<title>Rain &amp; Sun Preview</title>"));
        assert!(page.html.contains("linear-gradient(135deg"));
        assert!(page.html.contains("<span>x</span>"));
    }
}
