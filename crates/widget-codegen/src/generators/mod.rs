//! Code generators for widget layouts.

mod data_shape;
mod glance;
mod svelte;
mod swiftui;

pub use data_shape::{infer_data_shape, DataClass, DataShape, FieldKind};
pub use glance::GlanceGenerator;
pub use svelte::SvelteGenerator;
pub use swiftui::SwiftUIGenerator;

use serde::Deserialize;
use widget_core::{Warning, WidgetLayout};

use crate::error::Result;

/// Common trait for code generators.
pub trait CodeGenerator {
    /// Target framework name.
    fn framework_name(&self) -> &'static str;

    /// Name of the file generated for `layout`.
    fn file_name(&self, layout: &WidgetLayout) -> String;

    /// Generate the file for one widget.
    fn generate(&self, layout: &WidgetLayout) -> Result<GeneratedFile>;
}

/// Options shared by the generators.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorOptions {
    /// Kotlin package of generated files.
    pub package: String,
    /// Size used when a layout declares no supported sizes.
    pub default_width: f64,
    pub default_height: f64,
    /// Padding used when a layout declares none.
    pub default_padding: Option<f64>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            package: "com.akylas.weather.widgets.generated".to_string(),
            default_width: 160.0,
            default_height: 160.0,
            default_padding: None,
        }
    }
}

impl GeneratorOptions {
    /// Default size for `layout`: its first supported size, else ours.
    pub fn size_for(&self, layout: &WidgetLayout) -> (f64, f64) {
        layout
            .default_size()
            .map_or((self.default_width, self.default_height), |s| {
                (s.width, s.height)
            })
    }

    /// Root padding for `layout`.
    pub fn padding_for(&self, layout: &WidgetLayout) -> Option<f64> {
        layout.default_padding.or(self.default_padding)
    }
}

/// A generated file.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// File name relative to the output directory.
    pub path: String,
    /// File content.
    pub content: String,
    /// Problems found while lowering the layout.
    pub warnings: Vec<Warning>,
}
