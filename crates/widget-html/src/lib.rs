//! Static HTML previews of widget layouts.
//!
//! A layout is rendered against concrete data with the shared evaluator,
//! either as a bare fragment or as a standalone page. [`data`] provides the
//! fixed weather fixture and per-layout sample sets.

pub mod data;
pub mod error;
pub mod page;
pub mod renderer;
pub mod style;

pub use data::{generate_samples, sample_data, select_sample, SampleSet, WidgetData};
pub use error::{HtmlError, Result};
pub use renderer::{safe_evaluate_condition, select_layout, HtmlRenderer, RenderOptions, Rendered};
pub use widget_expr::WidgetDimensions;
