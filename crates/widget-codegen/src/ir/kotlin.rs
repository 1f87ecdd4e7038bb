//! Kotlin composable tree.

use super::writer::CodeWriter;

/// A named argument of a composable call.
#[derive(Debug, Clone, PartialEq)]
pub struct KtArg {
    pub name: &'static str,
    pub value: String,
}

impl KtArg {
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// A statement inside a composable body.
#[derive(Debug, Clone, PartialEq)]
pub enum KtNode {
    /// `Name(args)`, with a trailing content lambda when `content` is set.
    Call {
        name: String,
        args: Vec<KtArg>,
        content: Option<Vec<KtNode>>,
    },
    /// `head { param -> body }`
    Loop {
        head: String,
        param: String,
        body: Vec<KtNode>,
    },
    /// An if / else-if chain with an optional final `else`.
    If {
        branches: Vec<(String, Vec<KtNode>)>,
        otherwise: Vec<KtNode>,
    },
    /// `// text`
    Comment(String),
}

impl KtNode {
    /// A call without a content lambda.
    pub fn call(name: impl Into<String>, args: Vec<KtArg>) -> Self {
        Self::Call {
            name: name.into(),
            args,
            content: None,
        }
    }

    /// A call with a content lambda.
    pub fn container(name: impl Into<String>, args: Vec<KtArg>, content: Vec<KtNode>) -> Self {
        Self::Call {
            name: name.into(),
            args,
            content: Some(content),
        }
    }

    /// Print this node.
    pub fn write(&self, w: &mut CodeWriter) {
        match self {
            Self::Call {
                name,
                args,
                content,
            } => write_call(w, name, args, content.as_deref()),
            Self::Loop { head, param, body } => {
                w.block(format!("{head} {{ {param} ->"), "}", |w| write_all(w, body));
            }
            Self::If {
                branches,
                otherwise,
            } => {
                for (i, (condition, body)) in branches.iter().enumerate() {
                    if i == 0 {
                        w.line(format!("if ({condition}) {{"));
                    } else {
                        w.line(format!("}} else if ({condition}) {{"));
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
pub fn write_all(w: &mut CodeWriter, nodes: &[KtNode]) {
    for node in nodes {
        node.write(w);
    }
}

fn write_call(w: &mut CodeWriter, name: &str, args: &[KtArg], content: Option<&[KtNode]>) {
    let lambda = match content {
        None => "",
        Some([]) => " {}",
        Some(_) => " {",
    };
    match args {
        [] if content.is_some() => w.line(format!("{name}{lambda}")),
        [] => w.line(format!("{name}()")),
        [arg] => w.line(format!("{name}({} = {}){lambda}", arg.name, arg.value)),
        _ => {
            w.line(format!("{name}("));
            w.indent();
            for (i, arg) in args.iter().enumerate() {
                let comma = if i + 1 < args.len() { "," } else { "" };
                w.line(format!("{} = {}{comma}", arg.name, arg.value));
            }
            w.dedent();
            w.line(format!("){lambda}"));
        }
    }
    if let Some(nodes @ [_, ..]) = content {
        w.indent();
        write_all(w, nodes);
        w.dedent();
        w.line("}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn print(node: &KtNode) -> String {
        let mut w = CodeWriter::new(4);
        node.write(&mut w);
        w.finish()
    }

    #[test]
    fn test_call_layouts() {
        let spacer = KtNode::call("Spacer", vec![KtArg::new("modifier", "GlanceModifier.defaultWeight()")]);
        assert_eq!(print(&spacer), "Spacer(modifier = GlanceModifier.defaultWeight())");

        let column = KtNode::container(
            "Column",
            vec![
                KtArg::new("modifier", "GlanceModifier.fillMaxSize()"),
                KtArg::new("verticalAlignment", "Alignment.Vertical.Top"),
            ],
            vec![KtNode::call("Text", vec![KtArg::new("text", "data.temperature")])],
        );
        assert_eq!(
            print(&column),
            "Column(\n    modifier = GlanceModifier.fillMaxSize(),\n    verticalAlignment = Alignment.Vertical.Top\n) {\n    Text(text = data.temperature)\n}"
        );

        let empty_box = KtNode::container("Box", vec![KtArg::new("modifier", "m")], vec![]);
        assert_eq!(print(&empty_box), "Box(modifier = m) {}");

        let bare = KtNode::container("Row", vec![], vec![KtNode::Comment("x".into())]);
        assert_eq!(print(&bare), "Row {\n    // x\n}");
    }

    #[test]
    fn test_if_chain() {
        let node = KtNode::If {
            branches: vec![
                ("a".into(), vec![KtNode::Comment("one".into())]),
                ("b".into(), vec![KtNode::Comment("two".into())]),
            ],
            otherwise: vec![KtNode::Comment("three".into())],
        };
        assert_eq!(
            print(&node),
            "if (a) {\n    // one\n} else if (b) {\n    // two\n} else {\n    // three\n}"
        );
    }

    #[test]
    fn test_loop() {
        let node = KtNode::Loop {
            head: "data.hourlyData.take(3).forEach".into(),
            param: "item".into(),
            body: vec![KtNode::call("Text", vec![KtArg::new("text", "item.hour")])],
        };
        assert_eq!(
            print(&node),
            "data.hourlyData.take(3).forEach { item ->\n    Text(text = item.hour)\n}"
        );
    }
}
