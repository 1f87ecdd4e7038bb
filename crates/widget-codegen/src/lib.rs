//! Code generation from widget layouts.
//!
//! Three back-ends share one tree walker ([`walker`]) and differ only in the
//! nodes they build:
//!
//! - [`GlanceGenerator`] - Kotlin Jetpack Glance composables
//! - [`SvelteGenerator`] - Svelte Native components
//! - [`SwiftUIGenerator`] - SwiftUI views for WidgetKit
//!
//! Nodes are printed from small target syntax trees ([`ir`]); the file
//! around them comes from Handlebars templates ([`templates`]).
//!
//! # Example
//!
//! ```ignore
//! use widget_codegen::{CodeGenerator, GlanceGenerator};
//! use widget_core::WidgetLayout;
//!
//! let layout = WidgetLayout::from_path("layouts/SimpleWeatherWidget.json")?;
//! let file = GlanceGenerator::new()?.generate(&layout)?;
//! std::fs::write(file.path, file.content)?;
//! ```

pub mod batch;
pub mod error;
pub mod generators;
pub mod ir;
pub mod templates;
pub mod walker;

pub use batch::{generate_dir, layout_files, BatchReport};
pub use error::{CodegenError, Result};
pub use generators::{
    infer_data_shape, CodeGenerator, GeneratedFile, GeneratorOptions, GlanceGenerator,
    SvelteGenerator, SwiftUIGenerator,
};
