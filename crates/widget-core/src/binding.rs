//! `{{path}}` template strings.

/// One piece of a template string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text.
    Text(String),
    /// A `{{path}}` placeholder, path trimmed.
    Binding(String),
}

/// A string with zero or more `{{path}}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Split a string into text and binding segments.
    ///
    /// An opening `{{` without a matching `}}` is kept as text, as is an
    /// empty placeholder.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            let after_open = &rest[start + 2..];
            let Some(end) = after_open.find("}}") else {
                break;
            };
            let path = after_open[..end].trim();
            text.push_str(&rest[..start]);
            if path.is_empty() {
                text.push_str(&rest[start..start + 4 + end]);
            } else {
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                segments.push(Segment::Binding(path.to_string()));
            }
            rest = &after_open[end + 2..];
        }

        text.push_str(rest);
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        Self { segments }
    }

    /// The parsed segments, in source order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether any placeholder was found.
    pub fn has_bindings(&self) -> bool {
        self.bindings().next().is_some()
    }

    /// The path when the whole template is exactly one placeholder.
    pub fn single_binding(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [Segment::Binding(path)] => Some(path),
            _ => None,
        }
    }

    /// Placeholder paths in source order.
    pub fn bindings(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Binding(path) => Some(path.as_str()),
            Segment::Text(_) => None,
        })
    }
}

/// Whether a string uses binding syntax at all.
pub fn contains_binding(s: &str) -> bool {
    s.contains("{{")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_template() {
        let template = Template::parse("Now {{ temperature }} in {{locationName}}");
        assert_eq!(
            template.segments(),
            &[
                Segment::Text("Now ".into()),
                Segment::Binding("temperature".into()),
                Segment::Text(" in ".into()),
                Segment::Binding("locationName".into()),
            ]
        );
        assert_eq!(template.single_binding(), None);
    }

    #[test]
    fn test_single_binding() {
        let template = Template::parse("{{item.hour}}");
        assert_eq!(template.single_binding(), Some("item.hour"));
    }

    #[test]
    fn test_unterminated_binding_is_text() {
        let template = Template::parse("a {{b");
        assert!(!template.has_bindings());
        assert_eq!(template.segments(), &[Segment::Text("a {{b".into())]);
    }

    #[test]
    fn test_empty_binding_is_text() {
        let template = Template::parse("x{{ }}y");
        assert!(!template.has_bindings());
        assert_eq!(template.segments(), &[Segment::Text("x{{ }}y".into())]);
    }
}
