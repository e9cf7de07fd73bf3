//! Merge two Steam `screenshots.vdf` files into one.
//!
//! Steam keeps screenshot metadata in a text VDF (Valve Data Format) file,
//! with one bucket per game and each screenshot keyed by a decimal index.
//! Concatenating two Steam libraries therefore collides on those indices;
//! this crate parses both files, renumbers the second file's entries to
//! append after the first file's, and writes the merged result.
//!
//! # Features
//!
//! - **Order-preserving** document model, so untouched subtrees round-trip
//!   byte-for-byte
//! - **Zero-copy parsing** for text without escape sequences
//! - **Total merge**: missing or malformed `"screenshots"` blocks are
//!   handled, never an error
//!
//! # Example
//!
//! ```
//! use steam_screenshot_merge::{merge_screenshots, parse_text};
//!
//! let target = parse_text(r#""screenshots" { "440" { "0" { "filename" "a.jpg" } } }"#).unwrap();
//! let source = parse_text(r#""screenshots" { "440" { "0" { "filename" "b.jpg" } } }"#).unwrap();
//!
//! let merged = merge_screenshots(target, source);
//! assert_eq!(merged.get_str(&["screenshots", "440", "0", "filename"]), Some("a.jpg"));
//! assert_eq!(merged.get_str(&["screenshots", "440", "1", "filename"]), Some("b.jpg"));
//! ```

use std::borrow::Cow;
use std::io::Write as _;
use std::path::Path;

pub mod error;
pub mod merge;
pub mod text;
pub mod value;

pub use error::{Error, Result};
pub use merge::merge_screenshots;
pub use text::parse_text;
pub use value::{Document, Key, Obj, Value};

/// Parse VDF from a text file.
///
/// This is a convenience function that reads a file and parses it.
/// Returns an owned `Document<'static>` since the file content is owned.
pub fn parse_text_file(path: impl AsRef<Path>) -> Result<Document<'static>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_text(&content)?.into_owned())
}

/// Serialize a document and write it to a file atomically.
///
/// The text is written to a temporary file in the destination directory and
/// renamed over `path` on success, so a failed write leaves no partial output
/// behind.
pub fn write_text_file(path: impl AsRef<Path>, doc: &Document<'_>) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(doc.to_vdf_string().as_bytes())?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

// Convert from borrowed to owned

impl Document<'_> {
    /// Convert to an owned version (with 'static lifetime).
    ///
    /// This creates a new `Document<'static>` with all strings owned,
    /// allowing the data to outlive the original input.
    pub fn into_owned(self) -> Document<'static> {
        Document::from_root(self.into_root().into_owned())
    }
}

impl Value<'_> {
    /// Convert to an owned version (with 'static lifetime).
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Str(s) => Value::Str(Cow::Owned(s.into_owned())),
            Value::Obj(obj) => Value::Obj(obj.into_owned()),
        }
    }
}

impl Obj<'_> {
    /// Convert to an owned version (with 'static lifetime).
    pub fn into_owned(self) -> Obj<'static> {
        self.into_iter()
            .map(|(k, v)| (Cow::Owned(k.into_owned()), v.into_owned()))
            .collect()
    }
}
