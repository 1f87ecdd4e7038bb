//! Evaluation and compilation of widget layout expressions.
//!
//! The same expression model is consumed two ways:
//!
//! - [`eval`] computes a [`Value`](widget_core::Value) against concrete data,
//!   used by the HTML renderer
//! - [`compile`] emits equivalent Kotlin, Swift or TypeScript source, used by the
//!   code generators
//!
//! Both report unknown or malformed calls through
//! [`Diagnostics`](widget_core::Diagnostics) and substitute the same falsy,
//! empty fallback.

pub mod compile;
pub mod context;
pub mod eval;

pub use compile::{Compiler, Kind, Mode, Target};
pub use context::{EvalContext, WidgetDimensions};
pub use eval::{
    evaluate, evaluate_condition, fallback_value, render_template, resolve_property, resolve_text,
};
