//! Embed text and binary assets into your binary as slices of one static buffer.
//!
//! This crate is an alternative to sprinkling `std::include_bytes!` across a codebase.
//! A build script collects every asset into a single generated module: one static byte
//! buffer holding all files back to back, plus one named [`Segment`] per file that points
//! at its range inside that buffer.
//!
//! ## How It Works
//!
//! 1.  **Build Script:** You describe a container of assets with the [`build::Config`]
//!     builder in `build.rs`. It reads every file in declaration order (normalizing text
//!     files), appends them to one buffer, and writes a Rust module into `OUT_DIR`.
//! 2.  **Inclusion:** The [`include_embedded!`] macro pulls the generated module into your
//!     crate.
//! 3.  **Runtime:** Each asset is a `static` [`Segment`]. Reading it is a slice of the
//!     shared buffer; no allocation, no copying, no file I/O.
//!
//! ## Usage
//!
//! 1. Add `embedder` to your `Cargo.toml`. The `build` feature is required for
//!    build-dependencies.
//!
//! ```toml
//! [dependencies]
//! embedder = "0.1.0"
//!
//! [build-dependencies]
//! embedder = { version = "0.1.0", features = ["build"] }
//! ```
//!
//! 2. Describe the assets in `build.rs`.
//!
//! ```no_run
//! // build.rs
//! embedder::build::Config::new("Assets")
//!   .namespace("demo")
//!   .text("Readme", "README.md")
//!   .binary("Logo", "assets/logo.png")
//!   .build()
//!   .expect("Failed to embed assets");
//! ```
//!
//! 3. Include the generated module and use the segments. Containers that share a
//!    namespace are included together.
//!
//! ```ignore
//! // src/main.rs
//! embedder::include_embedded!("Assets", "Icons");
//!
//! let readme: &str = demo::Assets::Readme.as_str().unwrap();
//! let logo: &[u8] = &demo::Assets::Logo;
//! ```

use core::{fmt, ops::Deref};

// Re-export the procedural macro.
pub use embedder_macros::include_embedded;

//
// ===== RUNTIME CODE =====
//

/// A read-only view of one embedded file inside a generated data buffer.
///
/// Segments are created by generated code and are `Copy`; dereferencing one yields the
/// file's bytes without copying them.
#[derive(Clone, Copy)]
pub struct Segment {
    data: &'static [u8],
    offset: usize,
    len: usize,
}

impl Segment {
    /// A segment covering no bytes.
    pub const EMPTY: Self = Self::empty_at(0);

    /// An empty segment positioned at `offset`. Generated code uses it for empty files,
    /// so it never needs the data buffer itself.
    #[must_use]
    pub const fn empty_at(offset: usize) -> Self {
        Self {
            data: &[],
            offset,
            len: 0,
        }
    }

    /// Creates a view of `len` bytes of `data` starting at `offset`.
    ///
    /// This function is called by generated code and is not range checked until the
    /// segment is read.
    #[must_use]
    pub const fn new(data: &'static [u8], offset: usize, len: usize) -> Self {
        Self { data, offset, len }
    }

    /// The bytes of the embedded file.
    ///
    /// # Panics
    ///
    /// Panics if the range lies outside the backing buffer, which indicates a bug in
    /// the generator.
    #[must_use]
    pub fn as_bytes(&self) -> &'static [u8] {
        if self.len == 0 {
            return &[];
        }
        &self.data[self.offset..self.offset + self.len]
    }

    /// The embedded file as UTF-8 text, or `None` if it is not valid UTF-8.
    ///
    /// Files embedded as text are always valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&'static str> {
        core::str::from_utf8(self.as_bytes()).ok()
    }

    /// Start of this file within the shared buffer.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Deref for Segment {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Segment {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segment")
            .field("offset", &self.offset)
            .field("len", &self.len)
            .finish()
    }
}

/// Copies an embedded literal into a zero-filled array of `N` bytes.
///
/// This function is an implementation detail of generated code: small buffers are padded
/// up to a fixed minimum size. Its signature is not guaranteed to be stable.
///
/// # Panics
///
/// Fails const evaluation if `literal` is longer than `N`.
#[doc(hidden)]
#[must_use]
pub const fn pad<const N: usize>(literal: &[u8]) -> [u8; N] {
    assert!(
        literal.len() <= N,
        "BUG: embedder: literal is longer than its padded size"
    );
    let mut out = [0u8; N];
    let mut i = 0;
    while i < literal.len() {
        out[i] = literal[i];
        i += 1;
    }
    out
}

//
// ===== BUILD-TIME CODE =====
//

#[cfg(feature = "build")]
pub mod build;

#[cfg(test)]
mod tests {
    use super::*;

    static DATA: [u8; 8] = *b"helloabc";

    static HELLO: Segment = Segment::new(&DATA, 0, 5);
    static ABC: Segment = Segment::new(&DATA, 5, 3);

    #[test]
    fn segments_view_their_range() {
        assert_eq!(HELLO.as_bytes(), b"hello");
        assert_eq!(&*ABC, b"abc");
        assert_eq!(ABC.offset(), 5);
        assert_eq!(ABC.len(), 3);
        assert_eq!(ABC.as_str(), Some("abc"));
    }

    #[test]
    fn empty_segment_is_empty() {
        assert!(Segment::EMPTY.is_empty());
        assert_eq!(Segment::EMPTY.as_bytes(), b"");
    }

    #[test]
    fn empty_segment_keeps_its_offset() {
        let segment = Segment::empty_at(4);
        assert_eq!(segment.offset(), 4);
        assert!(segment.is_empty());
        assert_eq!(segment.as_bytes(), b"");
        assert_eq!(segment.as_str(), Some(""));
    }

    #[test]
    fn as_str_rejects_invalid_utf8() {
        static BAD: [u8; 2] = [0xff, 0xfe];
        let segment = Segment::new(&BAD, 0, 2);
        assert_eq!(segment.as_str(), None);
    }

    #[test]
    fn pad_fills_tail_with_zeros() {
        const PADDED: [u8; 6] = pad(b"abc");
        assert_eq!(PADDED, *b"abc\0\0\0");
    }

    #[test]
    fn debug_omits_buffer_contents() {
        assert_eq!(format!("{HELLO:?}"), "Segment { offset: 0, len: 5 }");
    }
}
