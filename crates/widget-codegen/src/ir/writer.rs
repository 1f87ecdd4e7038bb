//! Indented line buffer.

/// Accumulates lines at a current indentation depth.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    lines: Vec<String>,
    depth: usize,
    unit: usize,
}

impl CodeWriter {
    /// Create a writer indenting by `unit` spaces per level.
    pub fn new(unit: usize) -> Self {
        Self {
            lines: Vec::new(),
            depth: 0,
            unit,
        }
    }

    /// Append a line at the current depth.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines
                .push(format!("{}{}", " ".repeat(self.depth * self.unit), text));
        }
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Write `open`, the indented body, then `close`.
    pub fn block(&mut self, open: impl AsRef<str>, close: impl AsRef<str>, body: impl FnOnce(&mut Self)) {
        self.line(open);
        self.indent();
        body(self);
        self.dedent();
        self.line(close);
    }

    /// Join all lines.
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_indentation() {
        let mut w = CodeWriter::new(4);
        w.block("if (x) {", "}", |w| {
            w.line("a()");
            w.line("");
            w.block("b {", "}", |w| w.line("c()"));
        });
        assert_eq!(w.finish(), "if (x) {\n    a()\n\n    b {\n        c()\n    }\n}");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut w = CodeWriter::new(2);
        w.dedent();
        w.line("x");
        assert_eq!(w.finish(), "x");
    }
}
