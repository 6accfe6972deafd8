//! Generation of the embedded-asset module.
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use super::{
    Error, Result,
    code::CodeWriter,
    literal::{self, DATA_IDENT, Layout},
    loader::FileKind,
};

/// Header line recording the container's namespace. `include_embedded!` reads it to
/// open the namespace modules around the included file.
pub(crate) const NAMESPACE_MARKER: &str = "// namespace: ";

/// Path under which generated code reaches the runtime crate.
pub const DEFAULT_RUNTIME_PATH: &str = "::embedder";

/// A container of embedded files: one generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedClass {
    /// Module path the container is nested in, `::` or `.` separated. May be empty.
    ///
    /// Several containers may share a namespace: the generated file only records it and
    /// `include_embedded!` opens the modules.
    pub namespace: String,
    /// Name of the generated container module.
    pub name: String,
    /// Files in declaration order. The order fixes both the order of the accessors and
    /// the layout of the data buffer.
    pub properties: Vec<EmbedProperty>,
}

/// One embedded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedProperty {
    /// Name of the generated `static`; emitted verbatim.
    pub name: String,
    pub file: PathBuf,
    pub is_text_file: bool,
}

impl EmbedProperty {
    pub fn text(name: impl Into<String>, file: impl AsRef<Path>) -> Self {
        Self::new(name, file, FileKind::Text)
    }

    pub fn binary(name: impl Into<String>, file: impl AsRef<Path>) -> Self {
        Self::new(name, file, FileKind::Binary)
    }

    pub fn new(name: impl Into<String>, file: impl AsRef<Path>, kind: FileKind) -> Self {
        Self {
            name: name.into(),
            file: file.as_ref().to_path_buf(),
            is_text_file: kind == FileKind::Text,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FileKind {
        FileKind::from_text_flag(self.is_text_file)
    }
}

/// Writes one [`EmbedClass`] as a Rust module.
///
/// A generator is consumed by [`Generator::generate`]. Output is streamed to the writer
/// as it is produced, so if generation fails the destination holds a truncated module
/// that must be discarded.
pub struct Generator<W: Write> {
    out: CodeWriter<W>,
    buffer: Vec<u8>,
    layout: Layout,
    runtime_path: String,
}

impl Generator<BufWriter<File>> {
    /// Creates (or truncates) the file at `path` and returns a generator writing to it.
    ///
    /// # Errors
    /// Returns [`Error::Output`] if the file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path).map_err(Error::Output)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Generator<W> {
    pub fn new(writer: W) -> Self {
        Self {
            out: CodeWriter::new(writer),
            buffer: Vec::new(),
            layout: Layout::default(),
            runtime_path: DEFAULT_RUNTIME_PATH.to_owned(),
        }
    }

    #[must_use]
    pub const fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the path generated code uses for the runtime crate, for crates that rename
    /// the `embedder` dependency.
    #[must_use]
    pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    /// Loads every file of `class` and writes the generated module, returning the writer
    /// once everything has been flushed.
    ///
    /// # Errors
    /// Fails on the first file that cannot be loaded, before any later file is read, or
    /// when the destination cannot be written.
    pub fn generate(mut self, class: &EmbedClass) -> Result<W> {
        self.write_file_header(&class.namespace)?;

        self.write_codegen_attributes()?;
        self.out.line(format_args!("pub mod {} {{", class.name))?;
        self.out.indent();

        self.write_properties(class)?;
        self.out.blank()?;
        literal::write_data_section(
            &mut self.out,
            &self.buffer,
            self.layout,
            &self.runtime_path,
        )?;

        self.out.dedent();
        self.out.line("}")?;

        Ok(self.out.finish()?)
    }

    /// Loads each file into the buffer and writes its accessor right away.
    fn write_properties(&mut self, class: &EmbedClass) -> Result<()> {
        let runtime = &self.runtime_path;
        let mut offset = 0;
        for property in &class.properties {
            let count = property.kind().load_file(&property.file, &mut self.buffer)?;

            if count == 0 {
                self.out.line(format_args!(
                    "pub static {}: {runtime}::Segment = {runtime}::Segment::empty_at({offset});",
                    property.name
                ))?;
            } else {
                self.out.line(format_args!(
                    "pub static {}: {runtime}::Segment = {runtime}::Segment::new(&{DATA_IDENT}, {offset}, {count});",
                    property.name
                ))?;
            }

            offset += count;
        }
        Ok(())
    }

    fn write_file_header(&mut self, namespace: &str) -> Result<()> {
        self.out.line(format_args!(
            "// @generated by embedder {}. DO NOT EDIT.",
            env!("CARGO_PKG_VERSION")
        ))?;
        let modules = module_path(namespace);
        if !modules.is_empty() {
            self.out
                .line(format_args!("{NAMESPACE_MARKER}{}", modules.join("::")))?;
        }
        self.out.line("//")?;
        self.out
            .line("// Changes to this file may cause incorrect behavior and will be lost if")?;
        self.out.line("// the code is regenerated.")?;
        self.out.blank()?;
        Ok(())
    }

    fn write_codegen_attributes(&mut self) -> Result<()> {
        self.out.line("#[rustfmt::skip]")?;
        self.out.line(
            "#[allow(non_snake_case, non_upper_case_globals, dead_code, clippy::all)]",
        )?;
        Ok(())
    }
}

/// Splits a `::` or `.` separated namespace into module names.
fn module_path(namespace: &str) -> Vec<&str> {
    namespace
        .split(['.', ':'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}
