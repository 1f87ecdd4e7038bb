//! SwiftUI view tree.

use super::writer::CodeWriter;

/// A statement inside a `@ViewBuilder` body.
#[derive(Debug, Clone, PartialEq)]
pub enum SwiftNode {
    /// `head` with an optional trailing content closure, then one
    /// `.modifier` per line.
    View {
        head: String,
        content: Option<Vec<SwiftNode>>,
        modifiers: Vec<String>,
    },
    /// `head { param in body }`
    Loop {
        head: String,
        param: String,
        body: Vec<SwiftNode>,
    },
    /// An if / else-if chain with an optional final `else`.
    If {
        branches: Vec<(String, Vec<SwiftNode>)>,
        otherwise: Vec<SwiftNode>,
    },
    /// `// text`
    Comment(String),
}

impl SwiftNode {
    pub fn view(head: impl Into<String>, modifiers: Vec<String>) -> Self {
        Self::View {
            head: head.into(),
            content: None,
            modifiers,
        }
    }

    pub fn container(head: impl Into<String>, content: Vec<SwiftNode>, modifiers: Vec<String>) -> Self {
        Self::View {
            head: head.into(),
            content: Some(content),
            modifiers,
        }
    }

    /// Print this node.
    pub fn write(&self, w: &mut CodeWriter) {
        match self {
            Self::View {
                head,
                content,
                modifiers,
            } => {
                match content.as_deref() {
                    None => w.line(head),
                    Some([]) => w.line(format!("{head} {{}}")),
                    Some(nodes) => w.block(format!("{head} {{"), "}", |w| write_all(w, nodes)),
                }
                w.indent();
                for modifier in modifiers {
                    w.line(format!(".{modifier}"));
                }
                w.dedent();
            }
            Self::Loop { head, param, body } => {
                w.block(format!("{head} {{ {param} in"), "}", |w| write_all(w, body));
            }
            Self::If {
                branches,
                otherwise,
            } => {
                for (i, (condition, body)) in branches.iter().enumerate() {
                    if i == 0 {
                        w.line(format!("if {condition} {{"));
                    } else {
                        w.line(format!("}} else if {condition} {{"));
                    }
                    w.indent();
                    write_all(w, body);
                    w.dedent();
                }
                if !otherwise.is_empty() {
                    w.line("} else {");
                    w.indent();
                    write_all(w, otherwise);
                    w.dedent();
                }
                w.line("}");
            }
            Self::Comment(text) => w.line(format!("// {}", text.replace('\n', " "))),
        }
    }
}

/// Print a sequence of nodes.
pub fn write_all(w: &mut CodeWriter, nodes: &[SwiftNode]) {
    for node in nodes {
        node.write(w);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn print(node: &SwiftNode) -> String {
        let mut w = CodeWriter::new(4);
        node.write(&mut w);
        w.finish()
    }

    #[test]
    fn test_view_modifiers() {
        let text = SwiftNode::view(
            "Text(data.temperature)",
            vec!["font(.system(size: 12))".into(), "foregroundColor(colorOnSurface)".into()],
        );
        assert_eq!(
            print(&text),
            "Text(data.temperature)\n    .font(.system(size: 12))\n    .foregroundColor(colorOnSurface)"
        );

        let stack = SwiftNode::container(
            "VStack(alignment: .leading, spacing: 0)",
            vec![SwiftNode::view("Spacer()", Vec::new())],
            vec!["padding(8)".into()],
        );
        assert_eq!(
            print(&stack),
            "VStack(alignment: .leading, spacing: 0) {\n    Spacer()\n}\n    .padding(8)"
        );

        let empty = SwiftNode::container("ZStack", Vec::new(), Vec::new());
        assert_eq!(print(&empty), "ZStack {}");
    }

    #[test]
    fn test_if_chain() {
        let node = SwiftNode::If {
            branches: vec![
                ("width < 200.0".into(), vec![SwiftNode::Comment("small".into())]),
                ("height < 100.0".into(), vec![SwiftNode::Comment("short".into())]),
            ],
            otherwise: vec![SwiftNode::Comment("large".into())],
        };
        assert_eq!(
            print(&node),
            "if width < 200.0 {\n    // small\n} else if height < 100.0 {\n    // short\n} else {\n    // large\n}"
        );
    }

    #[test]
    fn test_loop() {
        let node = SwiftNode::Loop {
            head: "ForEach(Array(data.hourlyData.prefix(3).enumerated()), id: \\.offset)".into(),
            param: "_, item".into(),
            body: vec![SwiftNode::view("Text(item.hour)", Vec::new())],
        };
        assert_eq!(
            print(&node),
            "ForEach(Array(data.hourlyData.prefix(3).enumerated()), id: \\.offset) { _, item in\n    Text(item.hour)\n}"
        );
    }
}
