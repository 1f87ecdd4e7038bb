//! Svelte Native markup tree.

use indexmap::IndexMap;

use super::writer::CodeWriter;

/// Right-hand side of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// `name="text"`
    Literal(String),
    /// `name={code}`
    Expr(String),
    /// `name` alone, as in `let:item`.
    Flag,
}

/// Ordered attribute list; the first value set for a name wins.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attrs {
    entries: IndexMap<String, AttrValue>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute unless one with the same name exists.
    /// Returns whether it was added.
    pub fn push(&mut self, name: impl Into<String>, value: AttrValue) -> bool {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return false;
        }
        self.entries.insert(name, value);
        true
    }

    pub fn literal(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        self.push(name, AttrValue::Literal(value.into()))
    }

    pub fn expr(&mut self, name: impl Into<String>, code: impl Into<String>) -> bool {
        self.push(name, AttrValue::Expr(code.into()))
    }

    pub fn flag(&mut self, name: impl Into<String>) -> bool {
        self.push(name, AttrValue::Flag)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attributes as written inside a tag, each preceded by a space.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(name, value)| match value {
                AttrValue::Literal(text) => format!(" {name}=\"{}\"", escape_attribute(text)),
                AttrValue::Expr(code) => format!(" {name}={{{code}}}"),
                AttrValue::Flag => format!(" {name}"),
            })
            .collect()
    }
}

/// A markup node.
#[derive(Debug, Clone, PartialEq)]
pub enum Markup {
    Element {
        tag: String,
        attrs: Attrs,
        children: Vec<Markup>,
    },
    /// `{#if}` / `{:else if}` / `{:else}` chain.
    If {
        branches: Vec<(String, Vec<Markup>)>,
        otherwise: Vec<Markup>,
    },
    /// `{#each source as param}`
    Each {
        source: String,
        param: String,
        body: Vec<Markup>,
    },
    /// `<!-- text -->`
    Comment(String),
}

impl Markup {
    pub fn element(tag: impl Into<String>, attrs: Attrs, children: Vec<Markup>) -> Self {
        Self::Element {
            tag: tag.into(),
            attrs,
            children,
        }
    }

    /// Print this node.
    pub fn write(&self, w: &mut CodeWriter) {
        match self {
            Self::Element {
                tag,
                attrs,
                children,
            } => {
                let open = format!("<{tag}{}>", attrs.render());
                if children.is_empty() {
                    w.line(format!("{open}</{tag}>"));
                } else {
                    w.block(open, format!("</{tag}>"), |w| write_all(w, children));
                }
            }
            Self::If {
                branches,
                otherwise,
            } => {
                for (i, (condition, body)) in branches.iter().enumerate() {
                    let head = if i == 0 { "#if" } else { ":else if" };
                    w.line(format!("{{{head} {condition}}}"));
                    w.indent();
                    write_all(w, body);
                    w.dedent();
                }
                if !otherwise.is_empty() {
                    w.line("{:else}");
                    w.indent();
                    write_all(w, otherwise);
                    w.dedent();
                }
                w.line("{/if}");
            }
            Self::Each {
                source,
                param,
                body,
            } => {
                w.block(format!("{{#each {source} as {param}}}"), "{/each}", |w| {
                    write_all(w, body)
                });
            }
            Self::Comment(text) => w.line(format!("<!-- {} -->", text.replace("--", "- -"))),
        }
    }
}

/// Print a sequence of nodes.
pub fn write_all(w: &mut CodeWriter, nodes: &[Markup]) {
    for node in nodes {
        node.write(w);
    }
}

/// Escape a literal attribute value; braces would start a Svelte expression.
pub fn escape_attribute(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
    out
}
