//! Non-fatal problems collected while evaluating, compiling or lowering.
//!
//! Nothing in this module aborts processing. Every warning is also logged
//! through `tracing` at the moment it is recorded.

use std::fmt;

/// A recoverable problem found in a layout.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// An expression used an operator outside the supported set.
    UnknownOperator { op: String },

    /// A known operator was called with the wrong number or kind of arguments.
    MalformedCall { op: String, reason: String },

    /// A condition string could not be parsed.
    InvalidCondition { text: String, message: String },

    /// An element is missing a field it needs to produce output.
    MissingField {
        element: &'static str,
        field: &'static str,
    },

    /// An element `type` that no back-end knows how to emit.
    UnsupportedElement { type_name: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOperator { op } => write!(f, "Unknown expression operator: {op}"),
            Self::MalformedCall { op, reason } => write!(f, "Malformed '{op}' call: {reason}"),
            Self::InvalidCondition { text, message } => {
                write!(f, "Invalid condition '{text}': {message}")
            }
            Self::MissingField { element, field } => {
                write!(f, "{element} element is missing '{field}'")
            }
            Self::UnsupportedElement { type_name } => {
                write!(f, "Unsupported element type: {type_name}")
            }
        }
    }
}

/// Accumulator for warnings, passed explicitly through each pass.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// All warnings recorded so far, in the order they were found.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Whether no warnings were recorded.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of warnings recorded.
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Whether an unknown-operator warning for `op` was recorded.
    pub fn has_unknown_operator(&self, op: &str) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, Warning::UnknownOperator { op: o } if o == op))
    }

    /// Append warnings recorded elsewhere. They were logged when first
    /// recorded and are not logged again.
    pub fn absorb(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }

    /// Consume the accumulator.
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_keep_order() {
        let mut diag = Diagnostics::new();
        diag.warn(Warning::UnknownOperator { op: "frobnicate".into() });
        diag.warn(Warning::MissingField {
            element: "forEach",
            field: "items",
        });

        assert_eq!(diag.len(), 2);
        assert!(diag.has_unknown_operator("frobnicate"));
        assert_eq!(
            diag.warnings()[1].to_string(),
            "forEach element is missing 'items'"
        );
    }

    #[test]
    fn test_absorb_appends() {
        let mut outer = Diagnostics::new();
        outer.warn(Warning::UnknownOperator { op: "a".into() });
        let mut inner = Diagnostics::new();
        inner.warn(Warning::UnknownOperator { op: "b".into() });
        outer.absorb(inner);
        assert_eq!(outer.len(), 2);
        assert!(outer.has_unknown_operator("b"));
    }
}
