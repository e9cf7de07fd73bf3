//! Trait implementations for VDF types.
//!
//! `Display` on [`Document`] is the text serializer: it emits the same
//! tab-indented, quoted, brace-delimited format Steam writes, with keys in
//! stored order, so `parse` -> `Display` is stable for untouched subtrees.

use std::borrow::Cow;
use std::fmt;
use std::fmt::Write as _;

use super::types::{Document, Obj, Value};

/// Write a quoted and escaped string to the formatter.
///
/// Escapes special characters: `\n`, `\t`, `\r`, `\\`, `"`
fn write_quoted_str(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// Write indentation (tabs) to the formatter.
fn write_indent(f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
    for _ in 0..level {
        f.write_char('\t')?;
    }
    Ok(())
}

/// Helper struct for pretty-printing an Obj with a specific indent level.
struct PrettyObj<'a, 'text> {
    obj: &'a Obj<'text>,
    indent: usize,
}

impl fmt::Display for PrettyObj<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for (key, value) in self.obj.iter() {
            write_indent(f, self.indent + 1)?;
            write_quoted_str(f, key)?;
            match value {
                Value::Obj(inner) => {
                    // Object value: key on one line, brace block on the next
                    writeln!(f)?;
                    write_indent(f, self.indent + 1)?;
                    write!(
                        f,
                        "{}",
                        PrettyObj {
                            obj: inner,
                            indent: self.indent + 1,
                        }
                    )?;
                    writeln!(f)?;
                }
                Value::Str(s) => {
                    // Scalar value: key<tab>value on the same line
                    f.write_char('\t')?;
                    write_quoted_str(f, s)?;
                    writeln!(f)?;
                }
            }
        }
        write_indent(f, self.indent)?;
        write!(f, "}}")
    }
}

impl fmt::Display for Obj<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", PrettyObj { obj: self, indent: 0 })
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write_quoted_str(f, s),
            Value::Obj(obj) => write!(f, "{}", obj),
        }
    }
}

impl fmt::Display for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.root().iter() {
            write_quoted_str(f, key)?;
            match value {
                Value::Obj(obj) => {
                    writeln!(f)?;
                    writeln!(f, "{}", PrettyObj { obj, indent: 0 })?;
                }
                Value::Str(s) => {
                    f.write_char('\t')?;
                    write_quoted_str(f, s)?;
                    writeln!(f)?;
                }
            }
        }
        Ok(())
    }
}

impl Document<'_> {
    /// Serialize the document to VDF text.
    pub fn to_vdf_string(&self) -> String {
        self.to_string()
    }
}

// ============================================================================
// From implementations for Value
// ============================================================================

impl<'text> From<&'text str> for Value<'text> {
    fn from(s: &'text str) -> Self {
        Value::Str(Cow::Borrowed(s))
    }
}

impl<'text> From<String> for Value<'text> {
    fn from(s: String) -> Self {
        Value::Str(Cow::Owned(s))
    }
}

impl<'text> From<Cow<'text, str>> for Value<'text> {
    fn from(s: Cow<'text, str>) -> Self {
        Value::Str(s)
    }
}

impl<'text> From<Obj<'text>> for Value<'text> {
    fn from(obj: Obj<'text>) -> Self {
        Value::Obj(obj)
    }
}
