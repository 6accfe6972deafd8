//! Build-script helpers for `embedder`.
use std::{
    env,
    path::{Path, PathBuf},
    str::Utf8Error,
};

use convert_case::{Case, Casing};

mod code;
mod generator;
mod literal;
mod loader;
mod manifest;

pub use generator::{DEFAULT_RUNTIME_PATH, EmbedClass, EmbedProperty, Generator};
pub use literal::{CHUNK_SIZE, LARGE_OBJECT_THRESHOLD, Layout};
pub use loader::FileKind;
pub use manifest::{Manifest, ManifestFile};

//
// ==================== PUBLIC BUILDER API ====================
//

/// A builder describing one container of embedded files.
///
/// This provides a clean, high-level API for use in `build.rs` scripts.
///
/// # Example
/// ```no_run
/// // in build.rs
/// embedder::build::Config::new("Assets")
///   .namespace("demo")
///   .text("Readme", "README.md")
///   .binary("Logo", "assets/logo.png")
///   .build()
///   .expect("Failed to embed assets");
/// ```
#[derive(Debug)]
pub struct Config {
    class: EmbedClass,
    layout: Layout,
    runtime_path: String,
    out_file: Option<PathBuf>,
    manifest: Option<PathBuf>,
}

impl Config {
    /// Creates an empty container named `name`. The name becomes the generated module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            class: EmbedClass {
                namespace: String::new(),
                name: name.into(),
                properties: Vec::new(),
            },
            layout: Layout::default(),
            runtime_path: DEFAULT_RUNTIME_PATH.to_owned(),
            out_file: None,
            manifest: None,
        }
    }

    /// Reads the container description from a TOML [`Manifest`].
    ///
    /// File paths in the manifest are relative to the manifest itself.
    ///
    /// # Errors
    /// Returns an [`Error`] if the manifest cannot be read or parsed.
    pub fn from_manifest(path: impl AsRef<Path>) -> Result<Self> {
        let path = resolve(path.as_ref())?;
        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let class = Manifest::load(&path)?.into_class(&base);

        let mut config = Self::new(class.name.clone());
        config.class = class;
        config.manifest = Some(path);
        Ok(config)
    }

    /// Nests the container in a module path such as `assets` or `ui::icons`.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.class.namespace = namespace.into();
        self
    }

    /// Adds a UTF-8 text file, relative to the crate root (`CARGO_MANIFEST_DIR`).
    #[must_use]
    pub fn text(self, name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        self.property(EmbedProperty::text(name, path))
    }

    /// Adds a file whose bytes are embedded unchanged.
    #[must_use]
    pub fn binary(self, name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        self.property(EmbedProperty::binary(name, path))
    }

    /// Adds a file, embedding it as text if its extension is a known text format.
    #[must_use]
    pub fn file(self, name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        let kind = FileKind::from_path(path.as_ref());
        self.property(EmbedProperty::new(name, path, kind))
    }

    #[must_use]
    pub fn property(mut self, property: EmbedProperty) -> Self {
        self.class.properties.push(property);
        self
    }

    /// Sets the shape of the generated data buffer. Defaults to [`Layout::Padded`].
    #[must_use]
    pub const fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the path generated code uses to reach this crate. Defaults to `::embedder`.
    #[must_use]
    pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    /// Overrides the generated file name. Relative paths are placed in `OUT_DIR`.
    ///
    /// The default is the container name in snake case, see [`generated_file_name`].
    #[must_use]
    pub fn out_file(mut self, path: impl AsRef<Path>) -> Self {
        self.out_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Generates the container module and returns the path it was written to.
    ///
    /// This is the final method that should be called in the builder chain. Every input
    /// file is registered with Cargo so the module is regenerated when one changes.
    ///
    /// # Errors
    /// Returns an [`Error`] if a file cannot be read or the module cannot be written. A
    /// module left behind by a failed run is incomplete and must not be used.
    pub fn build(mut self) -> Result<PathBuf> {
        if let Some(manifest) = &self.manifest {
            println!("cargo:rerun-if-changed={}", manifest.display());
        }
        for property in &mut self.class.properties {
            property.file = resolve(&property.file)?;
            println!("cargo:rerun-if-changed={}", property.file.display());
        }

        let out_dir = env::var("OUT_DIR")
            .map(PathBuf::from)
            .map_err(|_| Error::Var("OUT_DIR"))?;
        let out_path = out_dir.join(
            self.out_file
                .unwrap_or_else(|| PathBuf::from(generated_file_name(&self.class.name))),
        );

        Generator::create(&out_path)?
            .layout(self.layout)
            .runtime_path(self.runtime_path)
            .generate(&self.class)?;

        Ok(out_path)
    }
}

/// Name of the file generated for a container, e.g. `ui_icons.rs` for `UiIcons`.
///
/// [`include_embedded!`](crate::include_embedded) derives the same name.
#[must_use]
pub fn generated_file_name(container: &str) -> String {
    format!("{}.rs", container.to_case(Case::Snake))
}

/// Resolves `path` against the crate root (`CARGO_MANIFEST_DIR`).
fn resolve(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let manifest_dir = env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .map_err(|_| Error::Var("CARGO_MANIFEST_DIR"))?;
    Ok(manifest_dir.join(path))
}

/// A specialized `Result` type for build script operations.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur while generating an embedded-asset module.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not read '{}'", path.display())]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Text file '{}' is not valid UTF-8", path.display())]
    InvalidText { path: PathBuf, source: Utf8Error },
    #[error("I/O error writing generated module")]
    Output(#[from] std::io::Error),
    #[error("Invalid manifest '{}'", path.display())]
    Manifest {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Environment variable '{0}' not set by Cargo")]
    Var(&'static str),
}
