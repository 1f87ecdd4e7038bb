//! Template engine for generated file shells.
//!
//! The element tree is printed from the target ASTs in [`crate::ir`]; the
//! surrounding file (package, imports, scripts, data classes) comes from
//! Handlebars templates registered here.

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::{CodegenError, Result};

/// Kotlin file shell for the Glance generator.
pub const GLANCE_FILE: &str = "glance_file";

/// Svelte component shell for the Svelte Native generator.
pub const SVELTE_FILE: &str = "svelte_file";

/// Swift file shell for the SwiftUI generator.
pub const SWIFTUI_FILE: &str = "swiftui_file";

const GLANCE_TEMPLATE: &str = r#"package {{package}}

{{#each imports}}
import {{this}}
{{/each}}

/**
 * Generated content for {{title}}
 * DO NOT EDIT - This file is auto-generated from JSON layout definitions
 */

@Composable
fun {{pascal_case name}}Content(data: {{pascal_case name}}Data) {
    val size = LocalSize.current
{{#each colors}}
    val {{variable}} = GlanceTheme.colors.{{accessor}}
{{/each}}

{{indent body 4}}
}
{{#each classes}}

data class {{name}}(
{{#each fields}}
    val {{name}}: {{kotlin_type}} = {{default}}{{#unless @last}},{{/unless}}
{{/each}}
)
{{/each}}
"#;

const SVELTE_TEMPLATE: &str = r#"<script context="module" lang="ts">
    // Auto-generated Svelte Native component for widget "{{name}}"
{{#each imports}}
    import {{this}};
{{/each}}
</script>

<script lang="ts">
    export let data: WeatherWidgetData;
    export let size: { width: number; height: number } = { width: {{width}}, height: {{height}} };
{{#if colors}}

    $: ({ {{join colors ", "}} } = $colors);
{{/if}}
{{#if uses_clock}}

    function nowTime() {
        const now = new Date();
        return now.getHours().toString().padStart(2, '0') + ':' + now.getMinutes().toString().padStart(2, '0');
    }
{{/if}}
</script>

{{body}}
"#;

// `WidgetColorProvider` and `Color(hex:)` come from the host app.
const SWIFTUI_TEMPLATE: &str = r##"// Generated content for {{title}}
// DO NOT EDIT - This file is auto-generated from JSON layout definitions

import SwiftUI
import WidgetKit

@available(iOS 14.0, *)
struct {{pascal_case name}}View: View {
    let data: {{pascal_case name}}Data

    var body: some View {
        GeometryReader { geometry in
            let width = Double(geometry.size.width)
            let height = Double(geometry.size.height)
{{#each colors}}
            let {{variable}} = WidgetColorProvider.{{accessor}}
{{/each}}

{{indent body 12}}
        }
    }
}
{{#each classes}}

struct {{name}} {
{{#each fields}}
    var {{name}}: {{swift_type}} = {{swift_default}}
{{/each}}
}
{{/each}}

fileprivate func formatNumber(_ value: Double) -> String {
    if value.isNaN { return "NaN" }
    if value.isInfinite { return value > 0 ? "Infinity" : "-Infinity" }
    if value == value.rounded() && abs(value) < 1e15 { return String(Int64(value)) }
    return String(value)
}

fileprivate func isTruthy(_ value: Double) -> Bool {
    return value != 0 && !value.isNaN
}

fileprivate func jsSubstring(_ text: String, _ start: Double, _ end: Double?) -> String {
    let chars = Array(text)
    func clamp(_ value: Double) -> Int {
        if value.isNaN { return 0 }
        return Int(min(max(value.rounded(.towardZero), 0), Double(chars.count)))
    }
    let a = clamp(start)
    let b = end.map(clamp) ?? chars.count
    return String(chars[min(a, b)..<max(a, b)])
}

fileprivate func firstNonEmpty(_ values: String...) -> String {
    return values.first { !$0.isEmpty } ?? values.last ?? ""
}

fileprivate func itemLimit(_ value: Double) -> Int {
    if value.isNaN || value <= 0 { return 0 }
    return Int(min(value, 1e9).rounded(.down))
}

fileprivate func resolveColor(_ name: String, _ fallback: Color) -> Color {
    if name.hasPrefix("#") { return Color(hex: name) }
    switch name {
{{#each tokens}}
    case "{{token}}": return WidgetColorProvider.{{accessor}}
{{/each}}
    default: return fallback
    }
}
"##;

/// Template engine using Handlebars.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create an engine with the built-in file templates registered.
    pub fn new() -> Result<Self> {
        let mut engine = Self::empty();
        engine.register_template(GLANCE_FILE, GLANCE_TEMPLATE)?;
        engine.register_template(SVELTE_FILE, SVELTE_TEMPLATE)?;
        engine.register_template(SWIFTUI_FILE, SWIFTUI_TEMPLATE)?;
        Ok(engine)
    }

    /// Create an engine with helpers but no templates.
    pub fn empty() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);

        Self::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    /// Register a template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)?;
        Ok(())
    }

    /// Render a registered template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        if !self.handlebars.has_template(name) {
            return Err(CodegenError::TemplateNotFound(name.to_string()));
        }
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Register custom helpers.
    fn register_helpers(handlebars: &mut Handlebars) {
        // Pascal case helper
        handlebars.register_helper(
            "pascal_case",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let param = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    out.write(&to_pascal_case(param))?;
                    Ok(())
                },
            ),
        );

        // Indent every non-blank line
        handlebars.register_helper(
            "indent",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let content = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    let spaces = h
                        .param(1)
                        .and_then(|v| v.value().as_u64())
                        .unwrap_or(4) as usize;
                    out.write(&indent(content, spaces))?;
                    Ok(())
                },
            ),
        );

        // Join helper
        handlebars.register_helper(
            "join",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let arr = h.param(0).and_then(|v| v.value().as_array());
                    let sep = h
                        .param(1)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or(", ");

                    if let Some(items) = arr {
                        let joined = items
                            .iter()
                            .filter_map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(sep);
                        out.write(&joined)?;
                    }
                    Ok(())
                },
            ),
        );
    }
}

/// Convert to PascalCase, keeping names that already are.
pub fn to_pascal_case(s: &str) -> String {
    use convert_case::{Case, Casing};
    if s.chars().next().is_some_and(char::is_uppercase) && s.chars().all(char::is_alphanumeric) {
        return s.to_string();
    }
    s.to_case(Case::Pascal)
}

/// Convert to snake_case.
pub fn to_snake_case(s: &str) -> String {
    use convert_case::{Case, Casing};
    s.to_case(Case::Snake)
}

/// Prefix every non-blank line with `spaces` spaces.
pub fn indent(content: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_helpers() {
        let mut engine = TemplateEngine::empty();
        engine
            .register_template("t", "{{pascal_case name}}|{{join list \"+\"}}|{{indent body 2}}")
            .unwrap();
        let out = engine
            .render("t", &json!({"name": "hourly_strip", "list": ["a", "b"], "body": "x\n\ny"}))
            .unwrap();
        assert_eq!(out, "HourlyStrip|a+b|  x\n\n  y");
    }

    #[test]
    fn test_no_html_escaping() {
        let mut engine = TemplateEngine::empty();
        engine.register_template("t", "{{code}}").unwrap();
        let out = engine.render("t", &json!({"code": "a < b && c"})).unwrap();
        assert_eq!(out, "a < b && c");
    }

    #[test]
    fn test_missing_template() {
        let engine = TemplateEngine::empty();
        let err = engine.render("nope", &json!({})).unwrap_err();
        assert!(matches!(err, CodegenError::TemplateNotFound(_)));
    }

    #[test]
    fn test_pascal_case_keeps_widget_names() {
        assert_eq!(to_pascal_case("SimpleWeatherWidget"), "SimpleWeatherWidget");
        assert_eq!(to_pascal_case("hourly_data"), "HourlyData");
        assert_eq!(to_snake_case("Feels Like"), "feels_like");
    }
}
