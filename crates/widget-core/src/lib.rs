//! Core model for declarative widget layouts.
//!
//! A widget layout is a JSON tree of UI elements whose property values may
//! be literals, `{{path}}` bindings or Mapbox-style S-expressions. This
//! crate holds everything the back-ends share:
//!
//! - [`expr`] - the expression model and its closed operator set
//! - [`value`] - runtime values with JavaScript conversion rules
//! - [`layout`] - the element tree and the root [`WidgetLayout`] record
//! - [`condition`] - the restricted grammar for condition strings
//! - [`rewrite`] - pruning, spacer folding and scroll merging
//!
//! # Example
//!
//! ```ignore
//! use widget_core::WidgetLayout;
//!
//! let layout = WidgetLayout::from_path("layouts/SimpleWeatherWidget.json")?;
//! println!("{}", layout.name);
//! ```

pub mod binding;
pub mod condition;
pub mod diagnostics;
pub mod error;
pub mod expr;
pub mod layout;
pub mod path;
pub mod property;
pub mod rewrite;
pub mod theme;
pub mod value;

pub use binding::{Segment, Template};
pub use condition::parse_condition;
pub use diagnostics::{Diagnostics, Warning};
pub use error::{LayoutError, Result};
pub use expr::{Call, Expression, Literal, Operator};
pub use layout::{
    Alignment, Background, BoxModel, Clock, Common, Conditional, Container, DateText, Direction,
    Divider, Edges, Element, ElementKind, FontWeight, ForEach, Image, Label, ScrollView, Spacer,
    Span, TextAlign, TextStyle, Variant, WidgetLayout, WidgetSize,
};
pub use path::{ResolvedPath, Root, Scope};
pub use property::{Condition, PropertyValue};
pub use rewrite::{item_limit, Folded, Placed, ScrollSpec, ScrollTargets};
pub use theme::{ColorRef, ThemeColor};
pub use value::Value;
