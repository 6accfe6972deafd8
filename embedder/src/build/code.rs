use std::{
    fmt::Display,
    io::{self, Write},
};

/// Spaces per nesting level in generated code.
const INDENT_WIDTH: usize = 4;

/// Line-oriented writer that indents generated code as it streams it out.
pub(crate) struct CodeWriter<W: Write> {
    inner: W,
    indent: usize,
}

impl<W: Write> CodeWriter<W> {
    pub(crate) const fn new(inner: W) -> Self {
        Self { inner, indent: 0 }
    }

    pub(crate) const fn indent(&mut self) {
        self.indent += 1;
    }

    pub(crate) const fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Writes one indented line. Empty lines are never indented.
    pub(crate) fn line(&mut self, text: impl Display) -> io::Result<()> {
        let text = text.to_string();
        if self.indent > 0 && !text.is_empty() {
            write!(self.inner, "{:width$}", "", width = INDENT_WIDTH * self.indent)?;
        }
        writeln!(self.inner, "{text}")
    }

    pub(crate) fn blank(&mut self) -> io::Result<()> {
        writeln!(self.inner)
    }

    pub(crate) fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
