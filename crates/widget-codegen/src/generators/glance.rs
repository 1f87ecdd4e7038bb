//! Jetpack Glance generator.
//!
//! Produces one Kotlin file per widget: a `@Composable` content function
//! over a typed data class, with theme colors bound to local variables.

use std::collections::BTreeSet;

use serde::Serialize;
use widget_core::rewrite::effective_margins;
use widget_core::theme::{classify_color, hex_to_argb, token_variable, ColorRef, ThemeColor};
use widget_core::value::format_number;
use widget_core::{
    Alignment, Direction, Edges, Element, ElementKind, FontWeight, Image, Label, Literal, Placed,
    PropertyValue, TextAlign, TextStyle, Value, Warning, WidgetLayout,
};
use widget_expr::compile::wrap;
use widget_expr::Target;

use super::data_shape::{infer_data_shape, ClassContext};
use super::{CodeGenerator, GeneratedFile, GeneratorOptions};
use crate::error::Result;
use crate::ir::{kotlin, CodeWriter, KtArg, KtNode};
use crate::templates::{to_pascal_case, TemplateEngine, GLANCE_FILE};
use crate::walker::{
    bare_condition, lower_widget, Emitter, Limit, ListPlan, LowerContext, DIVIDER_DEFAULT_COLOR,
};

const IMPORTS: &[&str] = &[
    "androidx.compose.runtime.Composable",
    "androidx.compose.ui.graphics.Color",
    "androidx.compose.ui.unit.dp",
    "androidx.compose.ui.unit.sp",
    "androidx.glance.GlanceModifier",
    "androidx.glance.GlanceTheme",
    "androidx.glance.Image",
    "androidx.glance.ImageProvider",
    "androidx.glance.LocalContext",
    "androidx.glance.LocalSize",
    "androidx.glance.background",
    "androidx.glance.appwidget.cornerRadius",
    "androidx.glance.appwidget.lazy.LazyColumn",
    "androidx.glance.appwidget.lazy.items",
    "androidx.glance.layout.*",
    "androidx.glance.text.FontWeight",
    "androidx.glance.text.Text",
    "androidx.glance.text.TextAlign",
    "androidx.glance.text.TextStyle",
    "androidx.glance.unit.ColorProvider",
    "com.akylas.weather.R",
];

const DEFAULT_TEXT_COLOR: &str = "GlanceTheme.colors.onSurface";
const DEFAULT_BACKGROUND: &str = "GlanceTheme.colors.background";
const DEFAULT_IMAGE_SIZE: &str = "24.dp";

#[derive(Serialize)]
struct FileContext<'c> {
    package: &'c str,
    imports: &'c [&'c str],
    title: &'c str,
    name: &'c str,
    colors: Vec<ColorBinding>,
    body: String,
    classes: Vec<ClassContext>,
}

#[derive(Serialize)]
struct ColorBinding {
    variable: String,
    accessor: &'static str,
}

/// Generator for Jetpack Glance composables.
pub struct GlanceGenerator<'a> {
    engine: TemplateEngine<'a>,
    options: GeneratorOptions,
}

impl<'a> GlanceGenerator<'a> {
    pub fn new() -> Result<Self> {
        Self::with_options(GeneratorOptions::default())
    }

    pub fn with_options(options: GeneratorOptions) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            options,
        })
    }

    /// Box around the whole widget carrying its background and padding.
    fn wrap_root(
        &self,
        cx: &mut LowerContext<'_>,
        layout: &WidgetLayout,
        nodes: Vec<KtNode>,
    ) -> Vec<KtNode> {
        let mut modifier = Modifier::default();
        if let Some(color) = layout.background.as_ref().and_then(|b| b.color.as_ref()) {
            let color = color_code(cx, color, DEFAULT_BACKGROUND);
            modifier.push(format!("background({color})"));
        }
        if let Some(padding) = self.options.padding_for(layout) {
            modifier.push(format!("padding({}.dp)", format_number(padding)));
        }
        if modifier.is_empty() {
            return nodes;
        }
        modifier.parts.insert(0, "fillMaxSize()".to_string());
        let args = modifier.into_args();
        vec![KtNode::container("Box", args, nodes)]
    }
}

impl CodeGenerator for GlanceGenerator<'_> {
    fn framework_name(&self) -> &'static str {
        "Glance"
    }

    fn file_name(&self, layout: &WidgetLayout) -> String {
        format!("{}Content.generated.kt", to_pascal_case(&layout.name))
    }

    fn generate(&self, layout: &WidgetLayout) -> Result<GeneratedFile> {
        let mut cx = LowerContext::new(Target::Kotlin, layout);
        let nodes = lower_widget(&mut GlanceEmitter, &mut cx, layout);
        let nodes = self.wrap_root(&mut cx, layout, nodes);

        let mut w = CodeWriter::new(4);
        kotlin::write_all(&mut w, &nodes);

        let colors = cx
            .colors()
            .iter()
            .map(|token| ColorBinding {
                variable: token_variable(token),
                accessor: glance_accessor(token),
            })
            .collect();

        let context = FileContext {
            package: &self.options.package,
            imports: IMPORTS,
            title: layout.display_name.as_deref().unwrap_or(&layout.name),
            name: &layout.name,
            colors,
            body: w.finish(),
            classes: infer_data_shape(layout).to_context(),
        };
        let content = self.engine.render(GLANCE_FILE, &context)?;
        tracing::debug!(widget = %layout.name, "generated Glance content");

        Ok(GeneratedFile {
            path: self.file_name(layout),
            content,
            warnings: cx.into_diagnostics().into_warnings(),
        })
    }
}

fn glance_accessor(token: &str) -> &'static str {
    match ThemeColor::from_token(token) {
        Some(color) => color.provider_color(),
        None => {
            tracing::debug!(token, "unknown color token, using onSurface");
            ThemeColor::OnSurface.provider_color()
        }
    }
}

/// A `GlanceModifier` chain under construction.
#[derive(Default)]
struct Modifier {
    parts: Vec<String>,
}

impl Modifier {
    fn push(&mut self, part: impl Into<String>) {
        self.parts.push(part.into());
    }

    fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    fn finish(self) -> Option<String> {
        if self.parts.is_empty() {
            return None;
        }
        let chain: String = self.parts.iter().map(|p| format!(".{p}")).collect();
        Some(format!("GlanceModifier{chain}"))
    }

    fn into_args(self) -> Vec<KtArg> {
        self.finish()
            .map(|m| vec![KtArg::new("modifier", m)])
            .unwrap_or_default()
    }
}

/// Modifier for a placed element: margins, `sized`, box size, weight,
/// background, corner radius, then padding.
fn modifier(cx: &mut LowerContext<'_>, placed: &Placed<'_>, sized: Vec<String>) -> Modifier {
    let element = placed.element;
    let bm = &element.common.box_model;
    let mut m = Modifier::default();

    if let Some(margins) = padding_part(cx, &effective_margins(element, &placed.folded)) {
        m.push(margins);
    }
    m.parts.extend(sized);

    if bm.fill_max_size || (bm.fills_width() && bm.fills_height()) {
        m.push("fillMaxSize()");
    } else {
        if let Some(width) = size_part(cx, "width", bm.fills_width(), bm.width.as_ref()) {
            m.push(width);
        }
        if let Some(height) = size_part(cx, "height", bm.fills_height(), bm.height.as_ref()) {
            m.push(height);
        }
    }
    if bm.flex.is_some_and(|f| f > 0.0) {
        m.push("defaultWeight()");
    }
    if let Some(color) = &bm.background_color {
        let color = color_code(cx, color, DEFAULT_BACKGROUND);
        m.push(format!("background({color})"));
    }
    if let Some(radius) = &bm.corner_radius {
        m.push(format!("cornerRadius({})", dp(cx, radius)));
    }
    if let Some(padding) = padding_part(cx, &bm.padding_edges()) {
        m.push(padding);
    }
    m
}

fn size_part(
    cx: &mut LowerContext<'_>,
    axis: &str,
    fills: bool,
    value: Option<&PropertyValue>,
) -> Option<String> {
    if fills {
        let suffix = if axis == "width" { "Width" } else { "Height" };
        return Some(format!("fillMax{suffix}()"));
    }
    value.map(|v| format!("{axis}({})", dp(cx, v)))
}

fn padding_part(cx: &mut LowerContext<'_>, edges: &Edges<PropertyValue>) -> Option<String> {
    if edges.is_empty() {
        return None;
    }
    if let Some(all) = edges.uniform() {
        return Some(format!("padding({})", dp(cx, all)));
    }
    let named = [
        ("start", &edges.left),
        ("top", &edges.top),
        ("end", &edges.right),
        ("bottom", &edges.bottom),
    ];
    let args: Vec<String> = named
        .into_iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| format!("{name} = {}", dp(cx, v))))
        .collect();
    Some(format!("padding({})", args.join(", ")))
}

fn dp(cx: &mut LowerContext<'_>, value: &PropertyValue) -> String {
    unit(cx, value, "dp")
}

fn unit(cx: &mut LowerContext<'_>, value: &PropertyValue, suffix: &str) -> String {
    match value.as_number() {
        Some(n) => format!("{}.{suffix}", format_number(n)),
        None => {
            let code = cx.compiler().compile_number(value);
            format!("{}.{suffix}", wrap(&code))
        }
    }
}

fn kotlin_string(cx: &mut LowerContext<'_>, text: &str) -> String {
    cx.compiler()
        .compile_text(&PropertyValue::Literal(Literal::String(text.to_string())))
}

/// A `ColorProvider` expression for a color property.
fn color_code(cx: &mut LowerContext<'_>, value: &PropertyValue, default: &str) -> String {
    match value {
        PropertyValue::Literal(Literal::String(s)) => literal_color(cx, s, default),
        PropertyValue::Literal(_) => default.to_string(),
        PropertyValue::Binding(template) => {
            let code = cx.compiler().compile_template(template);
            parsed_color(&code)
        }
        PropertyValue::Expression(expr) => {
            let code = cx.compiler().compile_text(value);
            let mut seen = BTreeSet::new();
            let mut arms = Vec::new();
            for leaf in expr.value_leaves() {
                let Some(text) = leaf.as_literal().and_then(Literal::as_str) else {
                    continue;
                };
                if matches!(classify_color(text), ColorRef::Path(_)) || !seen.insert(text) {
                    continue;
                }
                let key = kotlin_string(cx, text);
                let color = literal_color(cx, text, default);
                arms.push(format!("{key} -> {color}"));
            }
            if arms.is_empty() {
                return parsed_color(&code);
            }
            format!(
                "{}.let {{ c -> when (c) {{ {}; else -> {default} }} }}",
                wrap(&code),
                arms.join("; ")
            )
        }
    }
}

fn literal_color(cx: &mut LowerContext<'_>, text: &str, default: &str) -> String {
    match classify_color(text) {
        ColorRef::Hex(hex) => match hex_to_argb(hex) {
            Some(argb) => format!("ColorProvider(Color(0x{argb:08X}))"),
            None => {
                tracing::debug!(hex, "unparsable hex color");
                default.to_string()
            }
        },
        ColorRef::Token(token) => token_variable(token),
        ColorRef::Path(path) => {
            let code = cx.compiler().compile_path(path);
            parsed_color(&code)
        }
    }
}

fn parsed_color(code: &str) -> String {
    format!("ColorProvider(Color(android.graphics.Color.parseColor({code})))")
}

fn font_weight(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Normal => "FontWeight.Normal",
        FontWeight::Medium => "FontWeight.Medium",
        FontWeight::Bold => "FontWeight.Bold",
    }
}

fn text_align(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "TextAlign.Start",
        TextAlign::Center => "TextAlign.Center",
        TextAlign::Right => "TextAlign.End",
    }
}

fn vertical_alignment(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Center => "Alignment.CenterVertically",
        Alignment::End => "Alignment.Bottom",
        _ => "Alignment.Top",
    }
}

fn horizontal_alignment(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Center => "Alignment.CenterHorizontally",
        Alignment::End => "Alignment.End",
        _ => "Alignment.Start",
    }
}

/// Sanitized drawable resource name for an icon path.
fn drawable_name(src: &str) -> String {
    let file = src.rsplit('/').next().unwrap_or(src);
    let stem = match file.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            stem
        }
        _ => file,
    };
    let name: String = stem
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    match name.chars().next() {
        None => "ic_placeholder".to_string(),
        Some(c) if c.is_ascii_digit() => format!("ic_{name}"),
        Some(_) => name,
    }
}

fn date_format(cx: &mut LowerContext<'_>, pattern: &str) -> String {
    let pattern = kotlin_string(cx, pattern);
    format!("android.text.format.DateFormat.format({pattern}, System.currentTimeMillis()).toString()")
}

struct GlanceEmitter;

impl GlanceEmitter {
    fn text(
        &self,
        cx: &mut LowerContext<'_>,
        placed: &Placed<'_>,
        text: String,
        style: &TextStyle,
    ) -> KtNode {
        let mut style_args = Vec::new();
        if let Some(size) = &style.font_size {
            style_args.push(format!("fontSize = {}", unit(cx, size, "sp")));
        }
        if let Some(weight) = style.font_weight {
            style_args.push(format!("fontWeight = {}", font_weight(weight)));
        }
        let color = match &style.color {
            Some(color) => color_code(cx, color, DEFAULT_TEXT_COLOR),
            None => DEFAULT_TEXT_COLOR.to_string(),
        };
        style_args.push(format!("color = {color}"));
        if let Some(align) = style.text_align {
            style_args.push(format!("textAlign = {}", text_align(align)));
        }

        let mut args = vec![
            KtArg::new("text", text),
            KtArg::new("style", format!("TextStyle({})", style_args.join(", "))),
        ];
        if let Some(lines) = style.max_lines {
            args.push(KtArg::new("maxLines", lines.to_string()));
        }
        args.extend(modifier(cx, placed, Vec::new()).into_args());
        KtNode::call("Text", args)
    }

    /// Label text followed by its visible spans, concatenated.
    fn label_text(&self, cx: &mut LowerContext<'_>, label: &Label) -> String {
        let mut parts = Vec::new();
        if let Some(text) = &label.text {
            parts.push(cx.compiler().compile_text(text));
        }
        for span in &label.spans {
            let ElementKind::Span(s) = &span.kind else {
                continue;
            };
            let Some(text) = &s.text else { continue };
            if span.common.visible == Some(false) {
                continue;
            }
            let code = cx.compiler().compile_text(text);
            match &span.common.visible_if {
                None => parts.push(code),
                Some(condition) => match cx.static_truth(condition) {
                    Some(true) => parts.push(code),
                    Some(false) => {}
                    None => {
                        let test = cx.compiler().compile_condition(condition);
                        parts.push(format!("(if ({test}) {code} else \"\")"));
                    }
                },
            }
        }
        if parts.is_empty() {
            "\"\"".to_string()
        } else {
            parts.join(" + ")
        }
    }

    fn image(&self, cx: &mut LowerContext<'_>, placed: &Placed<'_>, image: &Image) -> KtNode {
        let Some(src) = &image.src else {
            cx.warn(Warning::MissingField {
                element: "image",
                field: "src",
            });
            return KtNode::Comment("image requires src".to_string());
        };
        let provider = match src {
            PropertyValue::Literal(lit) => {
                let name = drawable_name(&Value::from(lit).to_display_string());
                format!("ImageProvider(R.drawable.{name})")
            }
            other => {
                let code = cx.compiler().compile_text(other);
                format!(
                    "ImageProvider(LocalContext.current.resources.getIdentifier({code}, \"drawable\", LocalContext.current.packageName))"
                )
            }
        };
        let description = match &image.content_description {
            Some(text) => kotlin_string(cx, text),
            None => "null".to_string(),
        };
        let size = match &image.size {
            Some(size) => dp(cx, size),
            None => DEFAULT_IMAGE_SIZE.to_string(),
        };

        let mut args = vec![
            KtArg::new("provider", provider),
            KtArg::new("contentDescription", description),
        ];
        args.extend(modifier(cx, placed, vec![format!("size({size})")]).into_args());
        KtNode::call("Image", args)
    }
}

impl Emitter for GlanceEmitter {
    type Node = KtNode;

    fn container(
        &mut self,
        cx: &mut LowerContext<'_>,
        placed: &Placed<'_>,
        children: Vec<KtNode>,
    ) -> KtNode {
        let mut args = modifier(cx, placed, Vec::new()).into_args();
        let name = match &placed.element.kind {
            ElementKind::Column(c) => {
                if let Some(a) = c.alignment {
                    args.push(KtArg::new("verticalAlignment", vertical_alignment(a)));
                }
                if let Some(a) = c.cross_alignment {
                    args.push(KtArg::new("horizontalAlignment", horizontal_alignment(a)));
                }
                "Column"
            }
            ElementKind::Row(c) => {
                if let Some(a) = c.alignment {
                    args.push(KtArg::new("horizontalAlignment", horizontal_alignment(a)));
                }
                if let Some(a) = c.cross_alignment {
                    args.push(KtArg::new("verticalAlignment", vertical_alignment(a)));
                }
                "Row"
            }
            ElementKind::Stack(c) => {
                if c.alignment == Some(Alignment::Center) {
                    args.push(KtArg::new("contentAlignment", "Alignment.Center"));
                }
                "Box"
            }
            _ => "Box",
        };
        KtNode::container(name, args, children)
    }

    fn leaf(&mut self, cx: &mut LowerContext<'_>, placed: &Placed<'_>) -> KtNode {
        let element: &Element = placed.element;
        match &element.kind {
            ElementKind::Label(label) => {
                let text = self.label_text(cx, label);
                self.text(cx, placed, text, &label.style)
            }
            ElementKind::Span(span) => {
                let text = match &span.text {
                    Some(text) => cx.compiler().compile_text(text),
                    None => "\"\"".to_string(),
                };
                self.text(cx, placed, text, &span.style)
            }
            ElementKind::Clock(clock) => {
                let text = date_format(cx, clock.pattern());
                self.text(cx, placed, text, &clock.style)
            }
            ElementKind::Date(date) => {
                let text = date_format(cx, date.pattern());
                self.text(cx, placed, text, &date.style)
            }
            ElementKind::Image(image) => self.image(cx, placed, image),
            ElementKind::Spacer(spacer) => {
                let sized = match &spacer.size {
                    Some(size) => vec![format!("height({})", dp(cx, size))],
                    None if element.common.box_model.flex.is_none() => {
                        vec!["defaultWeight()".to_string()]
                    }
                    None => Vec::new(),
                };
                KtNode::call("Spacer", modifier(cx, placed, sized).into_args())
            }
            ElementKind::Divider(divider) => {
                let thickness = match &divider.thickness {
                    Some(t) => dp(cx, t),
                    None => "1.dp".to_string(),
                };
                let color = match &divider.color {
                    Some(color) => color_code(cx, color, &token_variable(DIVIDER_DEFAULT_COLOR)),
                    None => token_variable(DIVIDER_DEFAULT_COLOR),
                };
                let sized = vec![
                    "fillMaxWidth()".to_string(),
                    format!("height({thickness})"),
                    format!("background({color})"),
                ];
                KtNode::container("Box", modifier(cx, placed, sized).into_args(), Vec::new())
            }
            _ => KtNode::Comment(format!("Unsupported element: {}", element.type_name())),
        }
    }

    fn list(
        &mut self,
        cx: &mut LowerContext<'_>,
        placed: &Placed<'_>,
        plan: ListPlan,
        body: Vec<KtNode>,
    ) -> KtNode {
        let source = match &plan.limit {
            Some(Limit::Fixed(n)) => format!("{}.take({n})", plan.source),
            Some(Limit::Dynamic(code)) => format!(
                "{}.take({}.toInt().coerceAtLeast(0))",
                plan.source,
                wrap(code)
            ),
            None => plan.source.clone(),
        };
        let each = |head: String, body: Vec<KtNode>| KtNode::Loop {
            head,
            param: "item".to_string(),
            body,
        };

        let Some(scroll) = plan.scroll else {
            let looped = each(format!("{source}.forEach"), body);
            let args = modifier(cx, placed, Vec::new()).into_args();
            if args.is_empty() {
                return looped;
            }
            let name = match plan.direction {
                Direction::Horizontal => "Row",
                Direction::Vertical => "Column",
            };
            return KtNode::container(name, args, vec![looped]);
        };

        let mut sized = Vec::new();
        let fills = |v: &PropertyValue| matches!(v.as_str(), Some("fill") | Some("100%"));
        if let Some(width) = &scroll.width {
            sized.extend(size_part(cx, "width", fills(width), Some(width)));
        }
        if let Some(height) = &scroll.height {
            sized.extend(size_part(cx, "height", fills(height), Some(height)));
        }
        let args = modifier(cx, placed, sized).into_args();
        match scroll.direction {
            Direction::Vertical => KtNode::container(
                "LazyColumn",
                args,
                vec![each(format!("items({source})"), body)],
            ),
            Direction::Horizontal => {
                KtNode::container("Row", args, vec![each(format!("{source}.forEach"), body)])
            }
        }
    }

    fn guard(&mut self, branches: Vec<(String, Vec<KtNode>)>, otherwise: Vec<KtNode>) -> KtNode {
        let branches = branches
            .into_iter()
            .map(|(condition, body)| (bare_condition(&condition).to_string(), body))
            .collect();
        KtNode::If {
            branches,
            otherwise,
        }
    }

    fn placeholder(&mut self, note: &str) -> KtNode {
        KtNode::Comment(note.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn widget(value: serde_json::Value) -> WidgetLayout {
        serde_json::from_value(value).unwrap()
    }

    fn generate(value: serde_json::Value) -> GeneratedFile {
        GlanceGenerator::new().unwrap().generate(&widget(value)).unwrap()
    }

    #[test]
    fn test_file_shell() {
        let file = generate(json!({
            "name": "Simple",
            "displayName": "Simple Weather",
            "layout": {"type": "label", "text": "{{temperature}}"}
        }));
        assert_eq!(file.path, "SimpleContent.generated.kt");
        assert!(file.content.starts_with("package com.akylas.weather.widgets.generated"));
        assert!(file.content.contains("import androidx.glance.text.Text"));
        assert!(file.content.contains("Generated content for Simple Weather"));
        assert!(file.content.contains("fun SimpleContent(data: SimpleData) {"));
        assert!(file.content.contains("text = data.temperature"));
        assert!(file.content.contains("color = GlanceTheme.colors.onSurface"));
        assert!(file.content.contains("data class SimpleData("));
        assert!(file.content.contains("val temperature: String = \"\""));
        assert!(file.warnings.is_empty());
    }

    #[test]
    fn test_spacer_becomes_padding() {
        let file = generate(json!({
            "name": "Gap",
            "layout": {"type": "column", "children": [
                {"type": "label", "text": "A"},
                {"type": "spacer", "size": 12},
                {"type": "label", "text": "B"}
            ]}
        }));
        assert!(file.content.contains("modifier = GlanceModifier.padding(bottom = 12.dp)"));
        assert!(!file.content.contains("Spacer("));
    }

    #[test]
    fn test_for_each_limit_and_item_scope() {
        let file = generate(json!({
            "name": "Hourly",
            "layout": {"type": "forEach", "items": "{{hourlyData}}", "limit": 3,
                "itemTemplate": {"type": "label", "text": "{{item.time}}"}}
        }));
        assert!(file.content.contains("data.hourlyData.take(3).forEach { item ->"));
        assert!(file.content.contains("text = item.time"));
        assert!(file
            .content
            .contains("val hourlyData: List<HourlyForecast> = emptyList()"));
        assert!(file.content.contains("data class HourlyForecast("));
    }

    #[test]
    fn test_scroll_view_uses_lazy_column() {
        let file = generate(json!({
            "name": "Daily",
            "layout": {"type": "scrollView", "children": [
                {"type": "forEach", "items": "dailyData", "limit": 5,
                    "itemTemplate": {"type": "label", "text": "{{item.date}}"}}
            ]}
        }));
        assert!(file.content.contains("LazyColumn {"));
        assert!(file.content.contains("items(data.dailyData.take(5)) { item ->"));
    }

    #[test]
    fn test_theme_colors_bound_once() {
        let file = generate(json!({
            "name": "Colors",
            "background": {"type": "solid", "color": "widgetBackground"},
            "layout": {"type": "column", "children": [
                {"type": "label", "text": "a", "color": "primary"},
                {"type": "label", "text": "b", "color": "primary"},
                {"type": "label", "text": "c", "color": "#FF0000"}
            ]}
        }));
        assert_eq!(file.content.matches("val colorPrimary =").count(), 1);
        assert!(file
            .content
            .contains("val colorPrimary = GlanceTheme.colors.primary"));
        assert!(file
            .content
            .contains("val colorWidgetBackground = GlanceTheme.colors.background"));
        assert!(file.content.contains("color = colorPrimary"));
        assert!(file.content.contains("ColorProvider(Color(0xFFFF0000))"));
        assert!(file
            .content
            .contains("GlanceModifier.fillMaxSize().background(colorWidgetBackground)"));
    }

    #[test]
    fn test_unknown_type_placeholder() {
        let file = generate(json!({
            "name": "Odd",
            "layout": {"type": "column", "children": [{"type": "chart"}]}
        }));
        assert!(file.content.contains("// Unknown element type: chart"));
        assert_eq!(
            file.warnings,
            vec![Warning::UnsupportedElement {
                type_name: "chart".into()
            }]
        );
    }

    #[test]
    fn test_variants_become_if_chain() {
        let file = generate(json!({
            "name": "Sized",
            "variants": [{"condition": "size.width < 200",
                "layout": {"type": "label", "text": "small"}}],
            "layout": {"type": "label", "text": "large"}
        }));
        assert!(file.content.contains("if (size.width.value < 200.0) {"));
        assert!(file.content.contains("} else {"));
    }

    #[test]
    fn test_image_resources() {
        let file = generate(json!({
            "name": "Icons",
            "layout": {"type": "row", "children": [
                {"type": "image", "src": "icons/01d.png", "size": 32},
                {"type": "image", "src": "{{iconPath}}"},
                {"type": "image"}
            ]}
        }));
        assert!(file.content.contains("ImageProvider(R.drawable.ic_01d)"));
        assert!(file.content.contains("GlanceModifier.size(32.dp)"));
        assert!(file.content.contains("getIdentifier(data.iconPath, \"drawable\""));
        assert!(file.content.contains("// image requires src"));
        assert_eq!(file.warnings.len(), 1);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let layout = widget(json!({
            "name": "Stable",
            "layout": {"type": "column", "spacing": 4, "children": [
                {"type": "label", "text": "{{locationName}}", "color": "onSurfaceVariant"},
                {"type": "label", "text": "{{description}}", "visibleIf": "description"}
            ]}
        }));
        let generator = GlanceGenerator::new().unwrap();
        let first = generator.generate(&layout).unwrap();
        let second = generator.generate(&layout).unwrap();
        assert_eq!(first.content, second.content);
    }

    #[test]
    fn test_drawable_name() {
        assert_eq!(drawable_name("weather/Partly-Cloudy.svg"), "partly_cloudy");
        assert_eq!(drawable_name("10n"), "ic_10n");
        assert_eq!(drawable_name(""), "ic_placeholder");
    }
}
