//! SwiftUI generator.
//!
//! Produces one Swift file per widget: a `View` over a typed data struct,
//! laid out inside a `GeometryReader` so `size.*` paths read the widget's
//! current size. Theme colors are bound once at the top of the body.

use serde::Serialize;
use widget_core::rewrite::effective_margins;
use widget_core::theme::{classify_color, token_variable, ColorRef, ThemeColor};
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
use crate::ir::{swift, CodeWriter, SwiftNode};
use crate::templates::{to_pascal_case, TemplateEngine, SWIFTUI_FILE};
use crate::walker::{
    bare_condition, lower_widget, Emitter, Limit, ListPlan, LowerContext, DIVIDER_DEFAULT_COLOR,
};

const DEFAULT_TEXT_COLOR: &str = "WidgetColorProvider.onSurface";
const DEFAULT_BACKGROUND: &str = "WidgetColorProvider.background";
const DEFAULT_FONT_SIZE: &str = "12";
const DEFAULT_IMAGE_SIZE: &str = "48";

#[derive(Serialize)]
struct FileContext<'c> {
    title: &'c str,
    name: &'c str,
    colors: Vec<ColorBinding>,
    tokens: Vec<ColorBinding>,
    body: String,
    classes: Vec<ClassContext>,
}

#[derive(Serialize)]
struct ColorBinding {
    variable: String,
    token: &'static str,
    accessor: &'static str,
}

impl ColorBinding {
    fn new(token: &str) -> Self {
        let color = ThemeColor::from_token(token).unwrap_or_else(|| {
            tracing::debug!(token, "unknown color token, using onSurface");
            ThemeColor::OnSurface
        });
        Self {
            variable: token_variable(token),
            token: color.token(),
            accessor: color.provider_color(),
        }
    }
}

/// Generator for SwiftUI widget views.
pub struct SwiftUIGenerator<'a> {
    engine: TemplateEngine<'a>,
    options: GeneratorOptions,
}

impl<'a> SwiftUIGenerator<'a> {
    pub fn new() -> Result<Self> {
        Self::with_options(GeneratorOptions::default())
    }

    pub fn with_options(options: GeneratorOptions) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            options,
        })
    }

    /// Full-size stack around the whole widget carrying its background and
    /// padding.
    fn wrap_root(
        &self,
        cx: &mut LowerContext<'_>,
        layout: &WidgetLayout,
        nodes: Vec<SwiftNode>,
    ) -> Vec<SwiftNode> {
        let mut modifiers = Vec::new();
        if let Some(padding) = self.options.padding_for(layout) {
            modifiers.push(format!("padding({})", format_number(padding)));
        }
        let background = layout.background.as_ref().and_then(|b| b.color.as_ref());
        if modifiers.is_empty() && background.is_none() {
            return nodes;
        }
        modifiers.push("frame(maxWidth: .infinity, maxHeight: .infinity, alignment: .topLeading)".to_string());
        if let Some(color) = background {
            let color = color_code(cx, color, DEFAULT_BACKGROUND);
            modifiers.push(format!("background({color})"));
        }
        vec![SwiftNode::container("ZStack(alignment: .topLeading)", nodes, modifiers)]
    }
}

impl CodeGenerator for SwiftUIGenerator<'_> {
    fn framework_name(&self) -> &'static str {
        "SwiftUI"
    }

    fn file_name(&self, layout: &WidgetLayout) -> String {
        format!("{}View.generated.swift", to_pascal_case(&layout.name))
    }

    fn generate(&self, layout: &WidgetLayout) -> Result<GeneratedFile> {
        let mut cx = LowerContext::new(Target::Swift, layout);
        let nodes = lower_widget(&mut SwiftEmitter, &mut cx, layout);
        let nodes = self.wrap_root(&mut cx, layout, nodes);

        let mut w = CodeWriter::new(4);
        swift::write_all(&mut w, &nodes);

        let context = FileContext {
            title: layout.display_name.as_deref().unwrap_or(&layout.name),
            name: &layout.name,
            colors: cx.colors().iter().map(|token| ColorBinding::new(token)).collect(),
            tokens: ThemeColor::ALL.iter().map(|c| ColorBinding::new(c.token())).collect(),
            body: w.finish(),
            classes: infer_data_shape(layout).to_context(),
        };
        let content = self.engine.render(SWIFTUI_FILE, &context)?;
        tracing::debug!(widget = %layout.name, "generated SwiftUI view");

        Ok(GeneratedFile {
            path: self.file_name(layout),
            content,
            warnings: cx.into_diagnostics().into_warnings(),
        })
    }
}

/// Box modifiers for a placed element, innermost first: padding, size,
/// `extra`, background, corner radius, then margins.
fn modifiers(cx: &mut LowerContext<'_>, placed: &Placed<'_>, extra: Vec<String>) -> Vec<String> {
    let element = placed.element;
    let bm = &element.common.box_model;
    let mut out = Vec::new();

    out.extend(padding_parts(cx, &bm.padding_edges()));

    let (fill_width, fill_height) = if bm.fill_max_size {
        (true, true)
    } else {
        (bm.fills_width(), bm.fills_height())
    };
    let mut fixed = Vec::new();
    if let Some(width) = bm.width.as_ref().filter(|_| !fill_width) {
        fixed.push(format!("width: {}", points(cx, width)));
    }
    if let Some(height) = bm.height.as_ref().filter(|_| !fill_height) {
        fixed.push(format!("height: {}", points(cx, height)));
    }
    if !fixed.is_empty() {
        out.push(format!("frame({})", fixed.join(", ")));
    }
    let mut fills = Vec::new();
    if fill_width {
        fills.push("maxWidth: .infinity");
    }
    if fill_height {
        fills.push("maxHeight: .infinity");
    }
    if !fills.is_empty() {
        out.push(format!("frame({})", fills.join(", ")));
    }
    if bm.flex.is_some_and(|f| f > 0.0) {
        out.push("layoutPriority(1)".to_string());
    }

    out.extend(extra);

    if let Some(color) = &bm.background_color {
        let color = color_code(cx, color, DEFAULT_BACKGROUND);
        out.push(format!("background({color})"));
    }
    if let Some(radius) = &bm.corner_radius {
        out.push(format!("cornerRadius({})", points(cx, radius)));
    }
    out.extend(padding_parts(cx, &effective_margins(element, &placed.folded)));
    out
}

fn padding_parts(cx: &mut LowerContext<'_>, edges: &Edges<PropertyValue>) -> Vec<String> {
    if edges.is_empty() {
        return Vec::new();
    }
    if let Some(all) = edges.uniform() {
        return vec![format!("padding({})", points(cx, all))];
    }
    let named = [
        ("top", &edges.top),
        ("leading", &edges.left),
        ("bottom", &edges.bottom),
        ("trailing", &edges.right),
    ];
    named
        .into_iter()
        .filter_map(|(edge, value)| value.as_ref().map(|v| format!("padding(.{edge}, {})", points(cx, v))))
        .collect()
}

/// A `CGFloat` length.
fn points(cx: &mut LowerContext<'_>, value: &PropertyValue) -> String {
    match value.as_number() {
        Some(n) => format_number(n),
        None => {
            let code = cx.compiler().compile_number(value);
            format!("CGFloat({})", bare_condition(&code))
        }
    }
}

/// A `Color` expression for a color property. Dynamic values resolve at
/// run time through the file's `resolveColor` helper.
fn color_code(cx: &mut LowerContext<'_>, value: &PropertyValue, default: &str) -> String {
    match value {
        PropertyValue::Literal(Literal::String(s)) => match classify_color(s) {
            ColorRef::Hex(hex) => format!("Color(hex: \"{hex}\")"),
            ColorRef::Token(token) => token_variable(token),
            ColorRef::Path(path) => {
                let code = cx.compiler().compile_path(path);
                format!("resolveColor({code}, {default})")
            }
        },
        PropertyValue::Literal(_) => default.to_string(),
        PropertyValue::Binding(template) => {
            let code = cx.compiler().compile_template(template);
            format!("resolveColor({code}, {default})")
        }
        PropertyValue::Expression(_) => {
            let code = cx.compiler().compile_text(value);
            format!("resolveColor({code}, {default})")
        }
    }
}

fn font_weight(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Normal => ".regular",
        FontWeight::Medium => ".medium",
        FontWeight::Bold => ".bold",
    }
}

fn text_align(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => ".leading",
        TextAlign::Center => ".center",
        TextAlign::Right => ".trailing",
    }
}

fn horizontal_alignment(alignment: Option<Alignment>) -> &'static str {
    match alignment {
        Some(Alignment::Start) => ".leading",
        Some(Alignment::End) => ".trailing",
        _ => ".center",
    }
}

fn vertical_alignment(alignment: Option<Alignment>) -> &'static str {
    match alignment {
        Some(Alignment::Start) => ".top",
        Some(Alignment::End) => ".bottom",
        _ => ".center",
    }
}

/// Asset catalog name for an icon path: the file name without directory
/// or extension.
fn asset_name(src: &str) -> &str {
    let file = src.rsplit('/').next().unwrap_or(src);
    match file.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            stem
        }
        _ => file,
    }
}

struct SwiftEmitter;

impl SwiftEmitter {
    fn text(
        &self,
        cx: &mut LowerContext<'_>,
        placed: &Placed<'_>,
        head: String,
        style: &TextStyle,
        defaults: (&str, FontWeight),
    ) -> SwiftNode {
        let size = match &style.font_size {
            Some(size) => points(cx, size),
            None => defaults.0.to_string(),
        };
        let weight = font_weight(style.font_weight.unwrap_or(defaults.1));
        let color = match &style.color {
            Some(color) => color_code(cx, color, DEFAULT_TEXT_COLOR),
            None => DEFAULT_TEXT_COLOR.to_string(),
        };

        let mut text = vec![
            format!("font(.system(size: {size}, weight: {weight}))"),
            format!("foregroundColor({color})"),
        ];
        if let Some(align) = style.text_align {
            text.push(format!("multilineTextAlignment({})", text_align(align)));
        }
        if let Some(lines) = style.max_lines {
            text.push(format!("lineLimit({lines})"));
        }
        text.extend(modifiers(cx, placed, Vec::new()));
        SwiftNode::view(head, text)
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
                        parts.push(format!("({test} ? {code} : \"\")"));
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

    fn image(&self, cx: &mut LowerContext<'_>, placed: &Placed<'_>, image: &Image) -> SwiftNode {
        let Some(src) = &image.src else {
            cx.warn(Warning::MissingField {
                element: "image",
                field: "src",
            });
            return SwiftNode::Comment("image requires src".to_string());
        };
        let head = match src {
            PropertyValue::Literal(lit) => {
                let src = Value::from(lit).to_display_string();
                format!("Image(\"{}\")", asset_name(&src).replace('"', ""))
            }
            other => format!("Image({})", cx.compiler().compile_text(other)),
        };
        let size = match &image.size {
            Some(size) => points(cx, size),
            None => DEFAULT_IMAGE_SIZE.to_string(),
        };

        let mut sized = vec![
            "resizable()".to_string(),
            "scaledToFit()".to_string(),
            format!("frame(width: {size}, height: {size})"),
        ];
        if let Some(description) = &image.content_description {
            let text = cx
                .compiler()
                .compile_text(&PropertyValue::Literal(Literal::String(description.clone())));
            sized.push(format!("accessibilityLabel(Text({text}))"));
        }
        sized.extend(modifiers(cx, placed, Vec::new()));
        SwiftNode::view(head, sized)
    }
}

impl Emitter for SwiftEmitter {
    type Node = SwiftNode;

    fn container(
        &mut self,
        cx: &mut LowerContext<'_>,
        placed: &Placed<'_>,
        children: Vec<SwiftNode>,
    ) -> SwiftNode {
        let (head, aligned) = match &placed.element.kind {
            ElementKind::Column(c) => {
                let head = format!(
                    "VStack(alignment: {}, spacing: 0)",
                    horizontal_alignment(c.cross_alignment)
                );
                let aligned = match c.alignment {
                    Some(Alignment::Center) => Some("frame(maxHeight: .infinity, alignment: .center)"),
                    Some(Alignment::End) => Some("frame(maxHeight: .infinity, alignment: .bottom)"),
                    _ => None,
                };
                (head, aligned)
            }
            ElementKind::Row(c) => {
                let head = format!(
                    "HStack(alignment: {}, spacing: 0)",
                    vertical_alignment(c.cross_alignment)
                );
                let aligned = match c.alignment {
                    Some(Alignment::Center) => Some("frame(maxWidth: .infinity, alignment: .center)"),
                    Some(Alignment::End) => Some("frame(maxWidth: .infinity, alignment: .trailing)"),
                    _ => None,
                };
                (head, aligned)
            }
            ElementKind::Stack(c) if c.alignment == Some(Alignment::Center) => {
                ("ZStack(alignment: .center)".to_string(), None)
            }
            _ => ("ZStack(alignment: .topLeading)".to_string(), None),
        };
        let extra = aligned.map(str::to_string).into_iter().collect();
        let modifiers = modifiers(cx, placed, extra);
        SwiftNode::container(head, children, modifiers)
    }

    fn leaf(&mut self, cx: &mut LowerContext<'_>, placed: &Placed<'_>) -> SwiftNode {
        let element: &Element = placed.element;
        match &element.kind {
            ElementKind::Label(label) => {
                let text = self.label_text(cx, label);
                let head = format!("Text({})", bare_condition(&text));
                self.text(cx, placed, head, &label.style, (DEFAULT_FONT_SIZE, FontWeight::Normal))
            }
            ElementKind::Span(span) => {
                let text = match &span.text {
                    Some(text) => cx.compiler().compile_text(text),
                    None => "\"\"".to_string(),
                };
                let head = format!("Text({})", bare_condition(&text));
                self.text(cx, placed, head, &span.style, (DEFAULT_FONT_SIZE, FontWeight::Normal))
            }
            ElementKind::Clock(clock) => {
                let head = "Text(Date(), style: .time)".to_string();
                self.text(cx, placed, head, &clock.style, ("24", FontWeight::Bold))
            }
            ElementKind::Date(date) => {
                let head = "Text(Date(), style: .date)".to_string();
                self.text(cx, placed, head, &date.style, ("14", FontWeight::Normal))
            }
            ElementKind::Image(image) => self.image(cx, placed, image),
            ElementKind::Spacer(spacer) => {
                let sized = match &spacer.size {
                    Some(size) => vec![format!("frame(height: {})", points(cx, size))],
                    None => Vec::new(),
                };
                SwiftNode::view("Spacer()", modifiers(cx, placed, sized))
            }
            ElementKind::Divider(divider) => {
                let thickness = match &divider.thickness {
                    Some(t) => points(cx, t),
                    None => "1".to_string(),
                };
                let default = token_variable(DIVIDER_DEFAULT_COLOR);
                let color = match &divider.color {
                    Some(color) => color_code(cx, color, &default),
                    None => default,
                };
                let sized = vec![
                    format!("frame(height: {thickness})"),
                    format!("background({}.opacity(0.3))", wrap(&color)),
                ];
                SwiftNode::view("Divider()", modifiers(cx, placed, sized))
            }
            _ => SwiftNode::Comment(format!("Unsupported element: {}", element.type_name())),
        }
    }

    fn list(
        &mut self,
        cx: &mut LowerContext<'_>,
        placed: &Placed<'_>,
        plan: ListPlan,
        body: Vec<SwiftNode>,
    ) -> SwiftNode {
        let source = match &plan.limit {
            Some(Limit::Fixed(n)) => format!("{}.prefix({n})", plan.source),
            Some(Limit::Dynamic(code)) => {
                format!("{}.prefix(itemLimit({}))", plan.source, bare_condition(code))
            }
            None => plan.source.clone(),
        };
        let looped = SwiftNode::Loop {
            head: format!("ForEach(Array({source}.enumerated()), id: \\.offset)"),
            param: "_, item".to_string(),
            body,
        };
        let stack = match plan.direction {
            Direction::Horizontal => "HStack(alignment: .center, spacing: 0)",
            Direction::Vertical => "VStack(alignment: .leading, spacing: 0)",
        };

        let Some(scroll) = plan.scroll else {
            let modifiers = modifiers(cx, placed, Vec::new());
            if modifiers.is_empty() {
                return looped;
            }
            return SwiftNode::container(stack, vec![looped], modifiers);
        };

        let mut fixed = Vec::new();
        let mut fills = Vec::new();
        let fill = |v: &PropertyValue| matches!(v.as_str(), Some("fill") | Some("100%"));
        for (axis, value) in [("Width", &scroll.width), ("Height", &scroll.height)] {
            match value {
                Some(v) if fill(v) => fills.push(format!("max{axis}: .infinity")),
                Some(v) => fixed.push(format!("{}: {}", axis.to_ascii_lowercase(), points(cx, v))),
                None => {}
            }
        }
        let mut sized = Vec::new();
        if !fixed.is_empty() {
            sized.push(format!("frame({})", fixed.join(", ")));
        }
        if !fills.is_empty() {
            sized.push(format!("frame({})", fills.join(", ")));
        }

        let (axis, lazy) = match scroll.direction {
            Direction::Vertical => (".vertical", "LazyVStack(alignment: .leading, spacing: 0)"),
            Direction::Horizontal => (".horizontal", "LazyHStack(alignment: .center, spacing: 0)"),
        };
        let indicators = scroll.show_indicator.unwrap_or(false);
        SwiftNode::container(
            format!("ScrollView({axis}, showsIndicators: {indicators})"),
            vec![SwiftNode::container(lazy, vec![looped], Vec::new())],
            modifiers(cx, placed, sized),
        )
    }

    fn guard(&mut self, branches: Vec<(String, Vec<SwiftNode>)>, otherwise: Vec<SwiftNode>) -> SwiftNode {
        let branches = branches
            .into_iter()
            .map(|(condition, body)| (bare_condition(&condition).to_string(), body))
            .collect();
        SwiftNode::If {
            branches,
            otherwise,
        }
    }

    fn placeholder(&mut self, note: &str) -> SwiftNode {
        SwiftNode::Comment(note.to_string())
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
        SwiftUIGenerator::new().unwrap().generate(&widget(value)).unwrap()
    }

    #[test]
    fn test_file_shell() {
        let file = generate(json!({
            "name": "simple_weather",
            "displayName": "Simple Weather",
            "layout": {"type": "label", "text": "{{temperature}}"}
        }));
        assert_eq!(file.path, "SimpleWeatherView.generated.swift");
        assert!(file.content.contains("Generated content for Simple Weather"));
        assert!(file.content.contains("import SwiftUI\nimport WidgetKit"));
        assert!(file.content.contains("struct SimpleWeatherView: View {"));
        assert!(file.content.contains("    let data: SimpleWeatherData"));
        assert!(file.content.contains("let width = Double(geometry.size.width)"));
        assert!(file.content.contains("            Text(data.temperature)\n"));
        assert!(file
            .content
            .contains(".font(.system(size: 12, weight: .regular))"));
        assert!(file
            .content
            .contains(".foregroundColor(WidgetColorProvider.onSurface)"));
        assert!(file.content.contains("struct SimpleWeatherData {\n    var temperature: String = \"\"\n}"));
        assert!(file.content.contains("fileprivate func jsSubstring("));
        assert!(file
            .content
            .contains("    case \"widgetBackground\": return WidgetColorProvider.background"));
        assert!(file.warnings.is_empty());
    }

    #[test]
    fn test_containers_and_margins() {
        let file = generate(json!({
            "name": "Stacked",
            "layout": {"type": "column", "crossAlignment": "start", "padding": 8, "children": [
                {"type": "label", "text": "A"},
                {"type": "spacer", "size": 12},
                {"type": "row", "crossAlignment": "end", "width": "fill", "children": [
                    {"type": "label", "text": "B", "fontWeight": "bold", "maxLines": 1}
                ]}
            ]}
        }));
        assert!(file.content.contains("VStack(alignment: .leading, spacing: 0) {"));
        assert!(file.content.contains("HStack(alignment: .bottom, spacing: 0) {"));
        assert!(file.content.contains(".padding(.bottom, 12)"));
        assert!(file.content.contains(".frame(maxWidth: .infinity)"));
        assert!(file.content.contains(".font(.system(size: 12, weight: .bold))"));
        assert!(file.content.contains(".lineLimit(1)"));
        assert!(file.content.contains("}\n                .padding(8)"));
        assert!(!file.content.contains("Spacer()"));
    }

    #[test]
    fn test_for_each_limit_and_item_scope() {
        let file = generate(json!({
            "name": "Hourly",
            "layout": {"type": "forEach", "items": "{{hourlyData}}", "limit": 3,
                "itemTemplate": {"type": "label", "text": "{{item.time}}"}}
        }));
        assert!(file.content.contains(
            "ForEach(Array(data.hourlyData.prefix(3).enumerated()), id: \\.offset) { _, item in"
        ));
        assert!(file.content.contains("Text(item.time)"));
        assert!(file.content.contains("var hourlyData: [HourlyForecast] = []"));
        assert!(file.content.contains("struct HourlyForecast {"));
    }

    #[test]
    fn test_scroll_view() {
        let file = generate(json!({
            "name": "Daily",
            "layout": {"type": "scrollView", "children": [
                {"type": "forEach", "items": "dailyData", "limit": "{{count}}",
                    "itemTemplate": {"type": "label", "text": "{{item.date}}"}}
            ]}
        }));
        assert!(file.content.contains("ScrollView(.vertical, showsIndicators: false) {"));
        assert!(file.content.contains("LazyVStack(alignment: .leading, spacing: 0) {"));
        assert!(file
            .content
            .contains("data.dailyData.prefix(itemLimit(Double(data.count) ?? .nan))"));
    }

    #[test]
    fn test_colors() {
        let file = generate(json!({
            "name": "Colors",
            "background": {"type": "solid", "color": "widgetBackground"},
            "layout": {"type": "column", "children": [
                {"type": "label", "text": "a", "color": "primary"},
                {"type": "label", "text": "b", "color": "primary"},
                {"type": "label", "text": "c", "color": "#FF0000"},
                {"type": "label", "text": "d", "color": "{{tint}}"},
                {"type": "divider"}
            ]}
        }));
        assert_eq!(file.content.matches("let colorPrimary =").count(), 1);
        assert!(file.content.contains("let colorPrimary = WidgetColorProvider.primary"));
        assert!(file
            .content
            .contains("let colorWidgetBackground = WidgetColorProvider.background"));
        assert!(file.content.contains(".foregroundColor(colorPrimary)"));
        assert!(file.content.contains(".foregroundColor(Color(hex: \"#FF0000\"))"));
        assert!(file
            .content
            .contains(".foregroundColor(resolveColor(data.tint, WidgetColorProvider.onSurface))"));
        assert!(file.content.contains(".background(colorOnSurfaceVariant.opacity(0.3))"));
        assert!(file.content.contains("ZStack(alignment: .topLeading) {"));
        assert!(file.content.contains(".background(colorWidgetBackground)"));
    }

    #[test]
    fn test_variants_and_visibility() {
        let file = generate(json!({
            "name": "Sized",
            "variants": [{"condition": "size.width < 200",
                "layout": {"type": "label", "text": "small"}}],
            "layout": {"type": "column", "children": [
                {"type": "label", "text": "{{description}}", "visibleIf": "description"}
            ]}
        }));
        assert!(file.content.contains("if width < 200.0 {"));
        assert!(file.content.contains("} else {"));
        assert!(file.content.contains("if !data.description.isEmpty {"));
    }

    #[test]
    fn test_unknown_type_and_missing_src() {
        let file = generate(json!({
            "name": "Odd",
            "layout": {"type": "row", "children": [
                {"type": "chart"},
                {"type": "image", "src": "icons/01d.png", "size": 32, "contentDescription": "Sun"},
                {"type": "image"}
            ]}
        }));
        assert!(file.content.contains("// Unknown element type: chart"));
        assert!(file.content.contains("Image(\"01d\")"));
        assert!(file.content.contains(".frame(width: 32, height: 32)"));
        assert!(file.content.contains(".accessibilityLabel(Text(\"Sun\"))"));
        assert!(file.content.contains("// image requires src"));
        assert_eq!(file.warnings.len(), 2);
        assert!(file.warnings.contains(&Warning::UnsupportedElement {
            type_name: "chart".into()
        }));
    }

    #[test]
    fn test_clock_and_date_defaults() {
        let file = generate(json!({
            "name": "Time",
            "layout": {"type": "column", "children": [
                {"type": "clock"},
                {"type": "date", "fontSize": 16}
            ]}
        }));
        assert!(file.content.contains("Text(Date(), style: .time)\n"));
        assert!(file.content.contains(".font(.system(size: 24, weight: .bold))"));
        assert!(file.content.contains(".font(.system(size: 16, weight: .regular))"));
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
        let generator = SwiftUIGenerator::new().unwrap();
        let first = generator.generate(&layout).unwrap();
        let second = generator.generate(&layout).unwrap();
        assert_eq!(first.content, second.content);
    }

    #[test]
    fn test_asset_name() {
        assert_eq!(asset_name("weather/Partly-Cloudy.svg"), "Partly-Cloudy");
        assert_eq!(asset_name("10n"), "10n");
    }
}
