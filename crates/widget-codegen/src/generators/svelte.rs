//! Svelte Native generator.
//!
//! Each widget becomes a `<Name>View.generated.svelte` component whose
//! markup mirrors the layout tree with NativeScript tags.

use serde::Serialize;
use widget_core::rewrite::effective_margins;
use widget_core::theme::{classify_color, token_variable, ColorRef};
use widget_core::value::{format_number, string_to_number};
use widget_core::{
    Alignment, Direction, Edges, ElementKind, FontWeight, Label, Literal, Placed, PropertyValue,
    TextStyle, Value, WidgetLayout,
};
use widget_expr::Target;

use super::{CodeGenerator, GeneratedFile, GeneratorOptions};
use crate::error::Result;
use crate::ir::{AttrValue, Attrs, CodeWriter, Markup};
use crate::templates::{to_pascal_case, to_snake_case, TemplateEngine, SVELTE_FILE};
use crate::walker::{
    bare_condition, lower_widget, Emitter, Limit, ListPlan, LowerContext, DIVIDER_DEFAULT_COLOR,
};

const DATA_TYPE_IMPORT: &str = "type { WeatherWidgetData } from '~/services/widgets/WidgetTypes'";
const COLORS_IMPORT: &str = "{ colors } from '~/variables'";
const TEMPLATE_IMPORT: &str = "{ Template } from '@nativescript-community/svelte-native/components'";

#[derive(Serialize)]
struct ComponentContext<'c> {
    name: &'c str,
    imports: Vec<String>,
    width: String,
    height: String,
    colors: Vec<String>,
    uses_clock: bool,
    body: String,
}

/// Generator for Svelte Native components.
pub struct SvelteGenerator<'a> {
    engine: TemplateEngine<'a>,
    options: GeneratorOptions,
}

impl<'a> SvelteGenerator<'a> {
    pub fn new() -> Result<Self> {
        Self::with_options(GeneratorOptions::default())
    }

    pub fn with_options(options: GeneratorOptions) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            options,
        })
    }

    fn wrapper(&self, cx: &mut LowerContext<'_>, layout: &WidgetLayout, body: Vec<Markup>) -> Markup {
        let mut attrs = Attrs::new();
        attrs.expr("width", "size.width");
        attrs.expr("height", "size.height");
        if let Some(color) = layout.background.as_ref().and_then(|b| b.color.as_ref()) {
            attrs.push("backgroundColor", color_attr(cx, color));
        }
        if let Some(padding) = self.options.padding_for(layout) {
            attrs.expr("padding", format_number(padding));
        }
        attrs.literal("class", "widget-container");
        Markup::element("gridlayout", attrs, body)
    }
}

impl CodeGenerator for SvelteGenerator<'_> {
    fn framework_name(&self) -> &'static str {
        "Svelte Native"
    }

    fn file_name(&self, layout: &WidgetLayout) -> String {
        format!("{}View.generated.svelte", to_pascal_case(&layout.name))
    }

    fn generate(&self, layout: &WidgetLayout) -> Result<GeneratedFile> {
        let mut cx = LowerContext::new(Target::TypeScript, layout);
        let mut emitter = SvelteEmitter::default();
        let nodes = lower_widget(&mut emitter, &mut cx, layout);
        let root = self.wrapper(&mut cx, layout, nodes);

        let mut w = CodeWriter::new(4);
        root.write(&mut w);

        let colors: Vec<String> = cx.colors().iter().map(|t| token_variable(t)).collect();
        let (width, height) = self.options.size_for(layout);
        let context = ComponentContext {
            name: &layout.name,
            imports: emitter.imports(!colors.is_empty()),
            width: format_number(width),
            height: format_number(height),
            colors,
            uses_clock: emitter.uses_clock,
            body: w.finish(),
        };
        let content = self.engine.render(SVELTE_FILE, &context)?;
        tracing::debug!(widget = %layout.name, "generated Svelte component");

        Ok(GeneratedFile {
            path: self.file_name(layout),
            content,
            warnings: cx.into_diagnostics().into_warnings(),
        })
    }
}

/// Whether static label text should go through the localization helper.
fn should_localize(text: &str) -> bool {
    let text = text.trim();
    text.chars().count() > 1
        && string_to_number(text).is_nan()
        && text.chars().any(|c| c.is_alphabetic())
        && !text.contains("{{")
        && !["data.", "item.", "size."]
            .iter()
            .any(|prefix| text.starts_with(prefix))
}

/// Localization key for a static text: lower snake case, ASCII only.
fn localization_key(text: &str) -> String {
    to_snake_case(text.trim())
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

fn number_attr(cx: &mut LowerContext<'_>, value: &PropertyValue) -> AttrValue {
    match value.as_number() {
        Some(n) => AttrValue::Expr(format_number(n)),
        None => AttrValue::Expr(cx.compiler().compile_number(value)),
    }
}

fn size_attr(cx: &mut LowerContext<'_>, fills: bool, value: &PropertyValue) -> AttrValue {
    if fills {
        AttrValue::Literal("100%".to_string())
    } else {
        number_attr(cx, value)
    }
}

fn color_attr(cx: &mut LowerContext<'_>, value: &PropertyValue) -> AttrValue {
    match value {
        PropertyValue::Literal(Literal::String(s)) => literal_color(cx, s),
        PropertyValue::Literal(lit) => AttrValue::Literal(Value::from(lit).to_display_string()),
        PropertyValue::Binding(template) => AttrValue::Expr(cx.compiler().compile_template(template)),
        PropertyValue::Expression(expr) => {
            let code = cx.compiler().compile_property(value);
            let mut entries: Vec<String> = Vec::new();
            for leaf in expr.value_leaves() {
                let Some(text) = leaf.as_literal().and_then(Literal::as_str) else {
                    continue;
                };
                if let ColorRef::Token(token) = classify_color(text) {
                    let key = serde_json::to_string(token).unwrap_or_default();
                    let entry = format!("{key}: {}", token_variable(token));
                    if !token.is_empty() && !entries.contains(&entry) {
                        entries.push(entry);
                    }
                }
            }
            if entries.is_empty() {
                return AttrValue::Expr(code);
            }
            AttrValue::Expr(format!(
                "((c) => ({{ {} }})[c] ?? c)({code})",
                entries.join(", ")
            ))
        }
    }
}

fn literal_color(cx: &mut LowerContext<'_>, text: &str) -> AttrValue {
    match classify_color(text) {
        ColorRef::Hex(hex) => AttrValue::Literal(hex.to_string()),
        ColorRef::Token(token) => AttrValue::Expr(token_variable(token)),
        ColorRef::Path(path) => AttrValue::Expr(cx.compiler().compile_path(path)),
    }
}

fn edge_attrs(
    cx: &mut LowerContext<'_>,
    attrs: &mut Attrs,
    prefix: &str,
    edges: &Edges<PropertyValue>,
) {
    if edges.is_empty() {
        return;
    }
    if let Some(all) = edges.uniform() {
        let value = number_attr(cx, all);
        attrs.push(prefix, value);
        return;
    }
    let named = [
        ("Top", &edges.top),
        ("Right", &edges.right),
        ("Bottom", &edges.bottom),
        ("Left", &edges.left),
    ];
    for (side, value) in named {
        if let Some(value) = value {
            let value = number_attr(cx, value);
            attrs.push(format!("{prefix}{side}"), value);
        }
    }
}

/// Margins, size, background, radius and padding of a placed element.
fn box_attrs(cx: &mut LowerContext<'_>, attrs: &mut Attrs, placed: &Placed<'_>) {
    let element = placed.element;
    let bm = &element.common.box_model;
    edge_attrs(cx, attrs, "margin", &effective_margins(element, &placed.folded));
    if bm.fill_max_size {
        attrs.literal("width", "100%");
        attrs.literal("height", "100%");
    }
    if let Some(width) = &bm.width {
        let value = size_attr(cx, bm.fills_width(), width);
        attrs.push("width", value);
    } else if bm.fills_width() {
        attrs.literal("width", "100%");
    }
    if let Some(height) = &bm.height {
        let value = size_attr(cx, bm.fills_height(), height);
        attrs.push("height", value);
    } else if bm.fills_height() {
        attrs.literal("height", "100%");
    }
    if let Some(color) = &bm.background_color {
        let value = color_attr(cx, color);
        attrs.push("backgroundColor", value);
    }
    if let Some(radius) = &bm.corner_radius {
        let value = number_attr(cx, radius);
        attrs.push("borderRadius", value);
    }
    edge_attrs(cx, attrs, "padding", &bm.padding_edges());
}

fn style_attrs(cx: &mut LowerContext<'_>, attrs: &mut Attrs, style: &TextStyle) {
    if let Some(size) = &style.font_size {
        let value = number_attr(cx, size);
        attrs.push("fontSize", value);
    }
    match style.font_weight {
        Some(FontWeight::Bold) => {
            attrs.literal("fontWeight", "bold");
        }
        Some(FontWeight::Medium) => {
            attrs.literal("fontWeight", FontWeight::Medium.css_weight().to_string());
        }
        Some(FontWeight::Normal) => {
            attrs.literal("fontWeight", "normal");
        }
        None => {}
    }
    if let Some(color) = &style.color {
        let value = color_attr(cx, color);
        attrs.push("color", value);
    }
    if let Some(align) = style.text_align {
        attrs.literal("textAlignment", align.keyword());
    }
    if let Some(lines) = style.max_lines {
        attrs.expr("maxLines", lines.to_string());
    }
}

fn vertical_alignment(alignment: Alignment) -> Option<&'static str> {
    match alignment {
        Alignment::Start => Some("top"),
        Alignment::Center => Some("center"),
        Alignment::End => Some("bottom"),
        Alignment::Stretch => Some("stretch"),
        _ => None,
    }
}

fn horizontal_alignment(alignment: Alignment) -> Option<&'static str> {
    match alignment {
        Alignment::Start => Some("left"),
        Alignment::Center => Some("center"),
        Alignment::End => Some("right"),
        Alignment::Stretch => Some("stretch"),
        _ => None,
    }
}

fn js_string(cx: &mut LowerContext<'_>, text: &str) -> String {
    cx.compiler()
        .compile_text(&PropertyValue::Literal(Literal::String(text.to_string())))
}

/// Bounded list expression; never undefined.
fn list_source(plan: &ListPlan) -> String {
    let list = format!("({} ?? [])", plan.source);
    match &plan.limit {
        Some(Limit::Fixed(n)) => format!("{list}.slice(0, {n})"),
        Some(Limit::Dynamic(code)) => {
            format!("{list}.slice(0, Math.max(0, Math.floor({code}) || 0))")
        }
        None => list,
    }
}

#[derive(Default)]
struct SvelteEmitter {
    uses_clock: bool,
    uses_date: bool,
    uses_localization: bool,
    uses_template: bool,
}

impl SvelteEmitter {
    fn imports(&self, uses_colors: bool) -> Vec<String> {
        let mut imports = vec![DATA_TYPE_IMPORT.to_string()];
        if uses_colors {
            imports.push(COLORS_IMPORT.to_string());
        }
        if self.uses_template {
            imports.push(TEMPLATE_IMPORT.to_string());
        }
        let locale: Vec<&str> = [
            (self.uses_date, "formatDate"),
            (self.uses_localization, "lc"),
        ]
        .into_iter()
        .filter_map(|(used, name)| used.then_some(name))
        .collect();
        if !locale.is_empty() {
            imports.push(format!("{{ {} }} from '~/helpers/locale'", locale.join(", ")));
        }
        imports
    }

    fn text_attr(&mut self, cx: &mut LowerContext<'_>, text: &PropertyValue) -> AttrValue {
        match text {
            PropertyValue::Literal(Literal::String(s)) if should_localize(s) => {
                let key = localization_key(s);
                if key.is_empty() {
                    return AttrValue::Literal(s.clone());
                }
                self.uses_localization = true;
                AttrValue::Expr(format!("lc('{key}')"))
            }
            PropertyValue::Literal(lit) => AttrValue::Literal(Value::from(lit).to_display_string()),
            other => AttrValue::Expr(cx.compiler().compile_text(other)),
        }
    }

    fn label(&mut self, cx: &mut LowerContext<'_>, placed: &Placed<'_>, label: &Label) -> Markup {
        let mut attrs = Attrs::new();
        if label.spans.is_empty() {
            if let Some(text) = &label.text {
                let value = self.text_attr(cx, text);
                attrs.push("text", value);
            }
        }
        style_attrs(cx, &mut attrs, &label.style);
        box_attrs(cx, &mut attrs, placed);

        let mut children = Vec::new();
        if !label.spans.is_empty() {
            if let Some(text) = &label.text {
                let mut lead = Attrs::new();
                let value = self.text_attr(cx, text);
                lead.push("text", value);
                children.push(Markup::element("cspan", lead, Vec::new()));
            }
            for span in &label.spans {
                if span.common.visible == Some(false) {
                    continue;
                }
                let ElementKind::Span(s) = &span.kind else {
                    continue;
                };
                let mut span_attrs = Attrs::new();
                if let Some(text) = &s.text {
                    let value = self.text_attr(cx, text);
                    span_attrs.push("text", value);
                }
                style_attrs(cx, &mut span_attrs, &s.style);
                let node = Markup::element("cspan", span_attrs, Vec::new());
                match &span.common.visible_if {
                    None => children.push(node),
                    Some(condition) => match cx.static_truth(condition) {
                        Some(true) => children.push(node),
                        Some(false) => {}
                        None => {
                            let test = cx.compiler().compile_condition(condition);
                            children.push(Markup::If {
                                branches: vec![(bare_condition(&test).to_string(), vec![node])],
                                otherwise: Vec::new(),
                            });
                        }
                    },
                }
            }
        }
        Markup::element("label", attrs, children)
    }
}

impl Emitter for SvelteEmitter {
    type Node = Markup;

    fn container(
        &mut self,
        cx: &mut LowerContext<'_>,
        placed: &Placed<'_>,
        children: Vec<Markup>,
    ) -> Markup {
        let mut attrs = Attrs::new();
        let tag = match &placed.element.kind {
            ElementKind::Column(c) => {
                attrs.literal("orientation", "vertical");
                if let Some(a) = c.alignment.and_then(vertical_alignment) {
                    attrs.literal("verticalAlignment", a);
                }
                if let Some(a) = c.cross_alignment.and_then(horizontal_alignment) {
                    attrs.literal("horizontalAlignment", a);
                }
                "stacklayout"
            }
            ElementKind::Row(c) => {
                attrs.literal("orientation", "horizontal");
                if let Some(a) = c.alignment.and_then(horizontal_alignment) {
                    attrs.literal("horizontalAlignment", a);
                }
                if let Some(a) = c.cross_alignment.and_then(vertical_alignment) {
                    attrs.literal("verticalAlignment", a);
                }
                "stacklayout"
            }
            _ => "gridlayout",
        };
        box_attrs(cx, &mut attrs, placed);
        Markup::element(tag, attrs, children)
    }

    fn leaf(&mut self, cx: &mut LowerContext<'_>, placed: &Placed<'_>) -> Markup {
        let element = placed.element;
        let mut attrs = Attrs::new();
        let tag = match &element.kind {
            ElementKind::Label(label) => return self.label(cx, placed, label),
            ElementKind::Span(span) => {
                if let Some(text) = &span.text {
                    let value = self.text_attr(cx, text);
                    attrs.push("text", value);
                }
                style_attrs(cx, &mut attrs, &span.style);
                "cspan"
            }
            ElementKind::Clock(clock) => {
                self.uses_clock = true;
                attrs.expr("text", "nowTime()");
                style_attrs(cx, &mut attrs, &clock.style);
                "label"
            }
            ElementKind::Date(date) => {
                self.uses_date = true;
                let pattern = js_string(cx, date.pattern());
                attrs.expr("text", format!("formatDate(new Date(), {pattern})"));
                style_attrs(cx, &mut attrs, &date.style);
                "label"
            }
            ElementKind::Image(image) => {
                match &image.src {
                    Some(PropertyValue::Literal(lit)) => {
                        attrs.literal("src", Value::from(lit).to_display_string());
                    }
                    Some(src) => {
                        let code = cx.compiler().compile_text(src);
                        attrs.expr("src", code);
                    }
                    None => {
                        cx.warn(widget_core::Warning::MissingField {
                            element: "image",
                            field: "src",
                        });
                        return Markup::Comment("image requires src".to_string());
                    }
                }
                if let Some(size) = &image.size {
                    let value = number_attr(cx, size);
                    attrs.push("width", value.clone());
                    attrs.push("height", value);
                }
                if let Some(description) = &image.content_description {
                    attrs.literal("automationText", description.clone());
                }
                "image"
            }
            ElementKind::Spacer(spacer) => {
                if let Some(size) = &spacer.size {
                    let value = number_attr(cx, size);
                    attrs.push("height", value);
                }
                "stacklayout"
            }
            ElementKind::Divider(divider) => {
                let thickness = match &divider.thickness {
                    Some(t) => number_attr(cx, t),
                    None => AttrValue::Expr("1".to_string()),
                };
                attrs.push("height", thickness);
                let color = match &divider.color {
                    Some(color) => color_attr(cx, color),
                    None => AttrValue::Expr(token_variable(DIVIDER_DEFAULT_COLOR)),
                };
                attrs.push("backgroundColor", color);
                "stacklayout"
            }
            _ => {
                return Markup::Comment(format!("Unsupported element: {}", element.type_name()))
            }
        };
        box_attrs(cx, &mut attrs, placed);
        Markup::element(tag, attrs, Vec::new())
    }

    fn list(
        &mut self,
        cx: &mut LowerContext<'_>,
        placed: &Placed<'_>,
        plan: ListPlan,
        body: Vec<Markup>,
    ) -> Markup {
        let source = list_source(&plan);
        let mut attrs = Attrs::new();

        let Some(scroll) = &plan.scroll else {
            if plan.direction == Direction::Horizontal {
                attrs.literal("orientation", "horizontal");
            }
            box_attrs(cx, &mut attrs, placed);
            let each = Markup::Each {
                source,
                param: "item".to_string(),
                body,
            };
            if attrs.is_empty() {
                return each;
            }
            return Markup::element("stacklayout", attrs, vec![each]);
        };

        self.uses_template = true;
        attrs.expr("items", source);
        if scroll.direction == Direction::Horizontal {
            attrs.literal("orientation", "horizontal");
        }
        let fills = |v: &PropertyValue| matches!(v.as_str(), Some("fill") | Some("100%"));
        if let Some(width) = &scroll.width {
            let value = size_attr(cx, fills(width), width);
            attrs.push("width", value);
        }
        if let Some(height) = &scroll.height {
            let value = size_attr(cx, fills(height), height);
            attrs.push("height", value);
        }
        if scroll.show_indicator == Some(false) {
            let name = match scroll.direction {
                Direction::Vertical => "showVerticalScrollIndicator",
                Direction::Horizontal => "showHorizontalScrollIndicator",
            };
            attrs.expr(name, "false");
        }
        box_attrs(cx, &mut attrs, placed);

        let mut template = Attrs::new();
        template.flag("let:item");
        Markup::element(
            "collectionview",
            attrs,
            vec![Markup::element("Template", template, body)],
        )
    }

    fn guard(&mut self, branches: Vec<(String, Vec<Markup>)>, otherwise: Vec<Markup>) -> Markup {
        let branches = branches
            .into_iter()
            .map(|(condition, body)| (bare_condition(&condition).to_string(), body))
            .collect();
        Markup::If {
            branches,
            otherwise,
        }
    }

    fn placeholder(&mut self, note: &str) -> Markup {
        Markup::Comment(note.to_string())
    }
}
