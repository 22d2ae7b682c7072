//! Line-oriented code buffer shared by the renderers.

use crate::generator::traits::GeneratorConfig;

/// Accumulates indented lines using the configured indent and line ending.
#[derive(Debug)]
pub struct CodeBuffer<'a> {
    config: &'a GeneratorConfig,
    out: String,
    depth: usize,
}

impl<'a> CodeBuffer<'a> {
    /// Create an empty buffer.
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            out: String::new(),
            depth: 0,
        }
    }

    /// Append one line at the current depth. Empty lines carry no indent.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            self.out.push_str(&self.config.indent.indent(self.depth));
            self.out.push_str(text);
        }
        self.out.push_str(self.config.line_ending_str());
        self
    }

    /// Append several lines, splitting `text` on `\n`.
    pub fn lines(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            self.line(line);
        }
        self
    }

    /// Append an empty line.
    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// Increase the depth by one level.
    pub fn indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    /// Decrease the depth by one level.
    pub fn dedent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// Append `open`, the lines written by `body` one level deeper, then `close`.
    pub fn block(&mut self, open: &str, close: &str, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.line(open);
        self.indent();
        body(self);
        self.dedent();
        self.line(close)
    }

    /// Consume the buffer, returning the text.
    pub fn finish(self) -> String {
        self.out
    }
}
