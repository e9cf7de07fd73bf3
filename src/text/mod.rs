//! Text VDF format parser.
//!
//! Parses the human-readable VDF text format into an ordered [`Document`].
//! Serialization is the `Display` impl on [`Document`].
//!
//! [`Document`]: crate::value::Document

pub mod parser;

pub use parser::parse as parse_text;
