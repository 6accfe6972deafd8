//! Reading asset files into the shared data buffer.
use std::{
    ffi::OsStr,
    fs::{self, File},
    io::Read,
    path::Path,
};

use super::{Error, Result};

/// Extensions that are embedded as text when no explicit kind is given.
const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "json", "toml", "yaml", "yml", "html", "htm", "css", "js", "mjs", "ts", "svg",
    "xml", "csv", "tsv", "glsl", "wgsl", "hlsl", "sql", "ron", "ini", "cfg", "rs", "sh",
];

const UTF8_BOM: &str = "\u{feff}";

/// How a file's bytes are transformed on their way into the data buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// UTF-8 text. A leading byte-order mark is dropped and `\r\n` becomes `\n`.
    Text,
    /// Copied unchanged.
    Binary,
}

impl FileKind {
    #[must_use]
    pub const fn from_text_flag(is_text_file: bool) -> Self {
        if is_text_file { Self::Text } else { Self::Binary }
    }

    /// Guesses the kind from a file extension. Unknown extensions are binary.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let is_text = path
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| {
                TEXT_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            });
        Self::from_text_flag(is_text)
    }

    /// Appends the contents of `path` to `buffer` and returns the number of bytes appended.
    ///
    /// # Errors
    /// Returns [`Error::Input`] if the file cannot be read, and [`Error::InvalidText`] if a
    /// text file is not valid UTF-8. The buffer is left untouched on error.
    pub fn load_file(self, path: &Path, buffer: &mut Vec<u8>) -> Result<usize> {
        match self {
            Self::Binary => load_binary(path, buffer),
            Self::Text => load_text(path, buffer),
        }
    }
}

fn load_binary(path: &Path, buffer: &mut Vec<u8>) -> Result<usize> {
    let start = buffer.len();
    let read = File::open(path).and_then(|mut file| file.read_to_end(buffer));
    read.map_err(|source| {
        // Drop whatever a failed read managed to append.
        buffer.truncate(start);
        Error::Input {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn load_text(path: &Path, buffer: &mut Vec<u8>) -> Result<usize> {
    let bytes = fs::read(path).map_err(|source| Error::Input {
        path: path.to_path_buf(),
        source,
    })?;
    let text = std::str::from_utf8(&bytes).map_err(|source| Error::InvalidText {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(push_normalized(text, buffer))
}

/// Appends `text` with a leading BOM removed and CRLF line endings turned into LF.
fn push_normalized(text: &str, buffer: &mut Vec<u8>) -> usize {
    let start = buffer.len();
    let mut rest = text.strip_prefix(UTF8_BOM).unwrap_or(text);
    while let Some(pos) = rest.find("\r\n") {
        buffer.extend_from_slice(&rest.as_bytes()[..pos]);
        buffer.push(b'\n');
        rest = &rest[pos + 2..];
    }
    buffer.extend_from_slice(rest.as_bytes());
    buffer.len() - start
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn scratch(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn binary_appends_bytes_unchanged() {
        let file = scratch(b"\r\n\x00\xff\xfe");
        let mut buffer = b"existing".to_vec();

        let count = FileKind::Binary.load_file(file.path(), &mut buffer).unwrap();

        assert_eq!(count, 5);
        assert_eq!(buffer, b"existing\r\n\x00\xff\xfe");
    }

    #[test]
    fn text_normalizes_line_endings_and_bom() {
        let file = scratch(b"\xef\xbb\xbfone\r\ntwo\rthree\n");
        let mut buffer = vec![1, 2];

        let count = FileKind::Text.load_file(file.path(), &mut buffer).unwrap();

        assert_eq!(&buffer[2..], b"one\ntwo\rthree\n");
        assert_eq!(count, buffer.len() - 2);
    }

    #[test]
    fn text_rejects_invalid_utf8() {
        let file = scratch(b"ok\xff");
        let mut buffer = Vec::new();

        let err = FileKind::Text.load_file(file.path(), &mut buffer).unwrap_err();

        assert!(matches!(err, Error::InvalidText { .. }), "{err:?}");
        assert!(buffer.is_empty());
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.bin");
        let mut buffer = vec![9];

        for kind in [FileKind::Binary, FileKind::Text] {
            let err = kind.load_file(&missing, &mut buffer).unwrap_err();
            match err {
                Error::Input { path, .. } => assert_eq!(path, missing),
                other => panic!("unexpected error: {other:?}"),
            }
        }
        assert_eq!(buffer, [9]);
    }

    #[test]
    fn kind_from_extension() {
        assert_eq!(FileKind::from_path(Path::new("a/README.md")), FileKind::Text);
        assert_eq!(FileKind::from_path(Path::new("shader.WGSL")), FileKind::Text);
        assert_eq!(FileKind::from_path(Path::new("logo.png")), FileKind::Binary);
        assert_eq!(FileKind::from_path(Path::new("LICENSE")), FileKind::Binary);
    }
}
