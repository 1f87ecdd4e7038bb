//! Scope-relative data paths.

/// Which root unqualified paths resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// Top-level widget data.
    #[default]
    Data,
    /// The current `forEach` item.
    Item,
}

impl Scope {
    /// The root object for this scope.
    pub fn root(self) -> Root {
        match self {
            Self::Data => Root::Data,
            Self::Item => Root::Item,
        }
    }
}

/// A root object of the evaluation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Root {
    Data,
    Item,
    Size,
}

impl Root {
    /// Identifier used in generated code.
    pub fn name(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Item => "item",
            Self::Size => "size",
        }
    }
}

/// A dotted path with its root made explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub root: Root,
    pub segments: Vec<String>,
}

impl ResolvedPath {
    /// Resolve `path` in `scope`.
    ///
    /// A leading `data`, `item` or `size` segment selects that root; any
    /// other path is rooted at the scope.
    pub fn resolve(path: &str, scope: Scope) -> Self {
        let mut segments: Vec<String> = path
            .trim()
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let root = match segments.first().map(String::as_str) {
            Some("data") => Root::Data,
            Some("item") => Root::Item,
            Some("size") => Root::Size,
            _ => return Self {
                root: scope.root(),
                segments,
            },
        };
        segments.remove(0);
        Self { root, segments }
    }

    /// `root.a.b` form.
    pub fn dotted(&self) -> String {
        let mut out = self.root.name().to_string();
        for segment in &self.segments {
            out.push('.');
            out.push_str(segment);
        }
        out
    }

    /// The first segment below the root.
    pub fn field(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unqualified_path_uses_scope() {
        let path = ResolvedPath::resolve("hour", Scope::Item);
        assert_eq!(path.dotted(), "item.hour");
        let path = ResolvedPath::resolve("temperature", Scope::Data);
        assert_eq!(path.dotted(), "data.temperature");
    }

    #[test]
    fn test_explicit_root_wins() {
        let path = ResolvedPath::resolve("data.locationName", Scope::Item);
        assert_eq!(path.root, Root::Data);
        assert_eq!(path.dotted(), "data.locationName");
        assert_eq!(ResolvedPath::resolve("size.width", Scope::Data).root, Root::Size);
    }

    #[test]
    fn test_bare_root() {
        let path = ResolvedPath::resolve("item", Scope::Data);
        assert_eq!(path.root, Root::Item);
        assert!(path.segments.is_empty());
        assert_eq!(path.dotted(), "item");
    }
}
