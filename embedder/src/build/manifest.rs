//! TOML description of an asset container.
//!
//! ```toml
//! namespace = "demo"
//! name = "Assets"
//!
//! [[file]]
//! name = "Readme"
//! path = "README.md"
//!
//! [[file]]
//! name = "Logo"
//! path = "assets/logo.png"
//! text = false
//! ```
use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use super::{EmbedClass, EmbedProperty, Error, FileKind, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default, rename = "file")]
    pub files: Vec<ManifestFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestFile {
    pub name: String,
    pub path: PathBuf,
    /// Whether to embed as text. Guessed from the extension when absent.
    #[serde(default)]
    pub text: Option<bool>,
}

impl Manifest {
    /// Parses a manifest from TOML source.
    ///
    /// # Errors
    /// Returns the parse error if `src` is not valid TOML, has unknown fields, or lacks a
    /// `name`.
    pub fn from_toml(src: &str) -> std::result::Result<Self, toml::de::Error> {
        // Files are kept in the order they appear, which is also their order in the buffer.
        toml::from_str(src)
    }

    /// Reads and parses the manifest at `path`.
    ///
    /// # Errors
    /// Returns [`Error::Input`] if the file cannot be read and [`Error::Manifest`] if it
    /// cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|source| Error::Input {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&src).map_err(|source| Error::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Converts the manifest into a generation request. Relative file paths are resolved
    /// against `base`, normally the directory containing the manifest.
    #[must_use]
    pub fn into_class(self, base: &Path) -> EmbedClass {
        let properties = self
            .files
            .into_iter()
            .map(|file| {
                let path = base.join(&file.path);
                let kind = file
                    .text
                    .map_or_else(|| FileKind::from_path(&path), FileKind::from_text_flag);
                EmbedProperty::new(file.name, path, kind)
            })
            .collect();

        EmbedClass {
            namespace: self.namespace,
            name: self.name,
            properties,
        }
    }
}
