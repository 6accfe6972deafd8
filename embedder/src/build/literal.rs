//! Rendering the data buffer as Rust source.
use std::{
    fmt::Write as _,
    io::{self, Write},
};

use super::code::CodeWriter;

/// Bytes per line of an emitted array literal.
pub const CHUNK_SIZE: usize = 32;

/// Data buffers shorter than this are padded up to it under [`Layout::Padded`].
pub const LARGE_OBJECT_THRESHOLD: usize = 85_000;

/// Name of the constant holding the literal bytes in generated code.
pub(crate) const LITERAL_IDENT: &str = "LITERAL";
/// Name of the static every segment points into.
pub(crate) const DATA_IDENT: &str = "DATA";

/// Shape of the generated `DATA` static.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Buffers smaller than [`LARGE_OBJECT_THRESHOLD`] are zero-padded up to exactly that
    /// size, so every embedded container occupies one allocation of at least that size.
    #[default]
    Padded,
    /// `DATA` is always exactly as long as the embedded bytes.
    Natural,
}

impl Layout {
    /// The declared length of `DATA` for `len` bytes of embedded data, if it differs
    /// from `len`.
    #[must_use]
    pub const fn padded_len(self, len: usize) -> Option<usize> {
        match self {
            Self::Padded if len < LARGE_OBJECT_THRESHOLD => Some(LARGE_OBJECT_THRESHOLD),
            Self::Padded | Self::Natural => None,
        }
    }
}

/// Writes `bytes` as a `const` array literal, first byte on the opening line and
/// [`CHUNK_SIZE`] bytes per following line. Writes nothing for an empty buffer.
pub(crate) fn write_literal<W: Write>(
    out: &mut CodeWriter<W>,
    ident: &str,
    bytes: &[u8],
) -> io::Result<()> {
    let Some((first, rest)) = bytes.split_first() else {
        return Ok(());
    };

    out.line(format_args!("const {ident}: [u8; {}] = [{first}", bytes.len()))?;
    out.indent();
    let mut line = String::with_capacity(CHUNK_SIZE * 4);
    for chunk in rest.chunks(CHUNK_SIZE) {
        line.clear();
        for byte in chunk {
            let _ = write!(line, ",{byte}");
        }
        out.line(&line)?;
    }
    out.dedent();
    out.line("];")
}

/// Writes the data region: the literal followed by the `DATA` static in the shape chosen
/// by `layout`. An empty buffer produces no region at all.
pub(crate) fn write_data_section<W: Write>(
    out: &mut CodeWriter<W>,
    bytes: &[u8],
    layout: Layout,
    runtime_path: &str,
) -> io::Result<()> {
    if bytes.is_empty() {
        return Ok(());
    }

    out.line("// region: data")?;
    out.blank()?;
    write_literal(out, LITERAL_IDENT, bytes)?;
    out.blank()?;

    match layout.padded_len(bytes.len()) {
        Some(padded) => out.line(format_args!(
            "static {DATA_IDENT}: [u8; {padded}] = {runtime_path}::pad(&{LITERAL_IDENT});"
        ))?,
        None => out.line(format_args!(
            "static {DATA_IDENT}: [u8; {}] = {LITERAL_IDENT};",
            bytes.len()
        ))?,
    }

    out.blank()?;
    out.line("// endregion")
}
