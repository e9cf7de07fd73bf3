//! Text VDF parser.
//!
//! Hand-rolled recursive-descent parser. Keys and string values are borrowed
//! from the input where possible; quoted strings containing escape sequences
//! are unescaped into owned strings.

use std::borrow::Cow;

use crate::error::{parse_error, Result};
use crate::value::{Document, Obj, Value};

/// Parse a VDF document from text format.
///
/// A document is zero or more root `"key" { ... }` pairs. Real Steam files
/// carry exactly one root key, but multiple are accepted and preserved in
/// order. Duplicate keys within one object follow "last value wins" for the
/// value while the key keeps its first position.
///
/// # Example
///
/// ```
/// use steam_screenshot_merge::parse_text;
///
/// let input = r#""screenshots"
/// {
///     "440"
///     {
///         "0"
///         {
///             "filename" "440/screenshots/1.jpg"
///         }
///     }
/// }"#;
///
/// let doc = parse_text(input).unwrap();
/// assert!(doc.get("screenshots").is_some());
/// ```
pub fn parse(input: &str) -> Result<Document<'_>> {
    let full = input;
    let mut rest = input;
    let mut root = Obj::new();

    loop {
        let (r, ()) = ws(rest);
        rest = r;
        if rest.is_empty() {
            break;
        }

        let (r, (key, value)) = kv_pair(rest).map_err(|e| {
            // Report the failure site, not the start of the root pair
            let offset = full.len() - e.rest.len();
            parse_error(e.rest, offset, e.kind.to_string())
        })?;
        root.insert(key, value);
        rest = r;
    }

    Ok(Document::from_root(root))
}

/// Internal parse failure: what went wrong and the remaining input at the
/// point it went wrong, for offset and snippet reporting.
struct Fail<'a> {
    rest: &'a str,
    kind: ParseError,
}

fn fail(rest: &str, kind: ParseError) -> Fail<'_> {
    Fail { rest, kind }
}

type ParseResult<'a, T> = core::result::Result<(&'a str, T), Fail<'a>>;

/// Parse a key-value pair from text input.
///
/// Returns (remaining input, (key, value)).
fn kv_pair(input: &str) -> ParseResult<'_, (Cow<'_, str>, Value<'_>)> {
    let (input, ()) = ws(input);
    let (input, key) = token(input)?;
    let (input, ()) = ws(input);

    // Look ahead to see if the value is an object or a string
    let (input, value) = if input.starts_with('{') {
        let (input, obj) = object(input)?;
        (input, Value::Obj(obj))
    } else {
        let (input, s) = token(input)?;
        (input, Value::Str(s))
    };

    let (input, ()) = ws(input);

    Ok((input, (key, value)))
}

/// Parse an object (recursive block of key-value pairs).
///
/// Returns (remaining input, object).
fn object(input: &str) -> ParseResult<'_, Obj<'_>> {
    if !input.starts_with('{') {
        return Err(fail(input, ParseError::Expected("{")));
    }
    let mut input = &input[1..];

    let mut obj = Obj::new();

    // Parse key-value pairs until we hit '}'
    loop {
        let (rest, ()) = ws(input);
        input = rest;

        if input.starts_with('}') {
            input = &input[1..];
            break;
        }
        if input.is_empty() {
            return Err(fail(input, ParseError::UnclosedObject));
        }

        let (rest, (key, value)) = kv_pair(input)?;
        obj.insert(key, value);
        input = rest;
    }

    Ok((input, obj))
}

/// Parse a token (either quoted or unquoted).
///
/// Returns (remaining input, token).
fn token(input: &str) -> ParseResult<'_, Cow<'_, str>> {
    if input.starts_with('"') {
        quoted_string(input)
    } else {
        let (rest, s) = unquoted_string(input)?;
        Ok((rest, Cow::Borrowed(s)))
    }
}

/// Parse a quoted string, borrowing the content when it has no escapes.
///
/// Returns (remaining input, string content).
fn quoted_string(input: &str) -> ParseResult<'_, Cow<'_, str>> {
    if !input.starts_with('"') {
        return Err(fail(input, ParseError::Expected("\"")));
    }
    let body = &input[1..];

    // Fast path: no escape sequences, borrow the span between the quotes
    for (idx, ch) in body.char_indices() {
        match ch {
            '"' => return Ok((&body[idx + 1..], Cow::Borrowed(&body[..idx]))),
            '\\' => return quoted_string_owned(input, idx),
            _ => {}
        }
    }

    Err(fail(input, ParseError::UnclosedString))
}

/// Slow path for [`quoted_string`]: an escape was found at byte `start` of
/// the string body, so build an owned, unescaped string.
///
/// Recognized escapes are `\n`, `\t`, `\r`, `\\` and `\"`; anything else is
/// kept literally, backslash included. Errors point at the opening quote.
fn quoted_string_owned(input: &str, start: usize) -> ParseResult<'_, Cow<'_, str>> {
    let body = &input[1..];
    let mut out = String::from(&body[..start]);
    let mut chars = body[start..].char_indices();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' => return Ok((&body[start + idx + 1..], Cow::Owned(out))),
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, '\\')) => out.push('\\'),
                Some((_, '"')) => out.push('"'),
                Some((_, other)) => {
                    out.push('\\');
                    out.push(other);
                }
                None => return Err(fail(input, ParseError::UnclosedString)),
            },
            c => out.push(c),
        }
    }

    Err(fail(input, ParseError::UnclosedString))
}

/// Parse an unquoted string.
///
/// Unquoted strings end at whitespace, `{`, `}`, or `"`.
///
/// Returns (remaining input, token).
fn unquoted_string(input: &str) -> ParseResult<'_, &str> {
    let mut end = 0;

    for (idx, ch) in input.char_indices() {
        if ch.is_whitespace() || ch == '{' || ch == '}' || ch == '"' {
            break;
        }
        end = idx + ch.len_utf8();
    }

    if end == 0 {
        return Err(fail(input, ParseError::Expected("token")));
    }

    Ok((&input[end..], &input[..end]))
}

/// Skip zero or more whitespace characters or `//` line comments.
fn ws(input: &str) -> (&str, ()) {
    let mut rest = input;

    while let Some(first) = rest.chars().next() {
        if first.is_whitespace() {
            rest = &rest[first.len_utf8()..];
            continue;
        }

        if rest.starts_with("//") {
            let newline_pos = rest.find('\n').unwrap_or(rest.len());
            rest = &rest[newline_pos..];
            continue;
        }

        break;
    }

    (rest, ())
}

/// Parse error type for internal parsing.
#[derive(Debug)]
enum ParseError {
    Expected(&'static str),
    UnclosedString,
    UnclosedObject,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Expected(s) => write!(f, "expected {}", s),
            ParseError::UnclosedString => write!(f, "unclosed quoted string"),
            ParseError::UnclosedObject => write!(f, "unclosed object"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_simple_kv() {
        let input = r#""root"
        {
            "key" "value"
        }"#;
        let doc = parse(input).unwrap();

        let obj = doc.get_obj(&["root"]).unwrap();
        assert_eq!(obj.get("key").and_then(Value::as_str), Some("value"));
    }

    #[test]
    fn test_parse_nested_objects() {
        let input = r#""outer"
        {
            "inner"
            {
                "key" "value"
            }
        }"#;
        let doc = parse(input).unwrap();

        assert_eq!(doc.get_str(&["outer", "inner", "key"]), Some("value"));
    }

    #[test]
    fn test_parse_unquoted_tokens() {
        let input = r#"root
        {
            key value
        }"#;
        let doc = parse(input).unwrap();

        assert_eq!(doc.get_str(&["root", "key"]), Some("value"));
    }

    #[test]
    fn test_parse_with_comments() {
        let input = r#""root"
        {
            // This is a comment
            "key" "value"
            // Another comment
        }"#;
        let doc = parse(input).unwrap();

        assert_eq!(doc.get_str(&["root", "key"]), Some("value"));
    }

    #[test]
    fn test_parse_preserves_key_order() {
        let input = r#""settings"
        {
            "zebra" "1"
            "apple" "2"
            "10" "3"
            "2" "4"
        }"#;
        let doc = parse(input).unwrap();

        let obj = doc.get_obj(&["settings"]).unwrap();
        let keys: Vec<&str> = obj.keys().collect();
        assert_eq!(keys, vec!["zebra", "apple", "10", "2"]);
    }

    #[test]
    fn test_parse_unescapes_quoted_strings() {
        let input = r#""root"
        {
            "caption" "line one\nline \"two\""
            "path" "C:\\screenshots"
        }"#;
        let doc = parse(input).unwrap();

        assert_eq!(
            doc.get_str(&["root", "caption"]),
            Some("line one\nline \"two\"")
        );
        assert_eq!(doc.get_str(&["root", "path"]), Some("C:\\screenshots"));
    }

    #[test]
    fn test_parse_escape_free_strings_are_borrowed() {
        let input = r#""root" { "key" "value" }"#;
        let doc = parse(input).unwrap();

        let obj = doc.get_obj(&["root"]).unwrap();
        match obj.get("key") {
            Some(Value::Str(Cow::Borrowed(_))) => {}
            other => panic!("expected borrowed string, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_multiple_root_pairs() {
        let input = r#""first"
        {
            "a" "1"
        }
        "second"
        {
            "b" "2"
        }"#;
        let doc = parse(input).unwrap();

        let keys: Vec<&str> = doc.root().keys().collect();
        assert_eq!(keys, vec!["first", "second"]);
    }

    #[test]
    fn test_parse_empty_input() {
        let doc = parse("   // just a comment\n").unwrap();
        assert!(doc.root().is_empty());
    }

    #[test]
    fn test_parse_duplicate_keys_last_wins() {
        let input = r#""root"
        {
            "key" "old"
            "key" "new"
        }"#;
        let doc = parse(input).unwrap();

        let obj = doc.get_obj(&["root"]).unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.get("key").and_then(Value::as_str), Some("new"));
    }

    #[test]
    fn test_parse_unclosed_object_errors() {
        let input = r#""root"
        {
            "key" "value"
        "#;
        let err = parse(input).unwrap_err();
        assert!(err.to_string().contains("unclosed object"));
    }

    #[test]
    fn test_parse_unclosed_string_errors() {
        let input = r#""root" { "key" "value }"#;
        let err = parse(input).unwrap_err();
        assert!(err.to_string().contains("unclosed quoted string"));
    }

    #[test]
    fn test_parse_error_offset_points_at_failure_site() {
        // A key with no value, deep inside the single root pair
        let input = "\"root\"\n{\n\t\"key\"\n}";
        let err = parse(input).unwrap_err();
        match err {
            Error::Parse {
                offset, snippet, ..
            } => {
                assert_eq!(offset, input.find('}').unwrap());
                assert!(snippet.starts_with('}'));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_string_error_points_at_opening_quote() {
        let input = r#""root" { "key" "value }"#;
        let err = parse(input).unwrap_err();
        match err {
            Error::Parse {
                offset,
                snippet,
                context,
            } => {
                assert_eq!(offset, input.rfind('"').unwrap());
                assert!(snippet.starts_with("\"value"));
                assert!(context.contains("unclosed quoted string"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_object_error_points_at_end_of_input() {
        let input = "\"root\"\n{\n\t\"key\"\t\"value\"\n";
        let err = parse(input).unwrap_err();
        match err {
            Error::Parse { offset, .. } => assert_eq!(offset, input.len()),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
