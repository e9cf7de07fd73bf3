//! Core data structures for VDF representation.

mod impls;
mod types;


pub use types::{Document, Key, Obj, Value};
