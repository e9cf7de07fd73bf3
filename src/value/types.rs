//! Type definitions for VDF values.

use std::borrow::Cow;

use foldhash::fast::RandomState;
use indexmap::IndexMap;

/// A key in VDF - zero-copy when possible
pub type Key<'text> = Cow<'text, str>;

pub(crate) type Map<'text> = IndexMap<Key<'text>, Value<'text>, RandomState>;

/// VDF Value - either a string or a nested object.
///
/// Text VDF has no other scalar kinds; numbers, timestamps and flags are all
/// stored as strings by Steam.
#[derive(Clone, Debug, PartialEq)]
pub enum Value<'text> {
    /// A string value
    Str(Cow<'text, str>),
    /// An object containing nested key-value pairs
    Obj(Obj<'text>),
}

impl<'text> Value<'text> {
    /// Returns `true` if this value is a string.
    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// Returns `true` if this value is an object.
    pub fn is_obj(&self) -> bool {
        matches!(self, Value::Obj(_))
    }

    /// Returns a reference to the string value if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_ref()),
            Value::Obj(_) => None,
        }
    }

    /// Returns a reference to the object if this is an object.
    pub fn as_obj(&self) -> Option<&Obj<'text>> {
        match self {
            Value::Obj(obj) => Some(obj),
            Value::Str(_) => None,
        }
    }

    /// Returns a mutable reference to the object if this is an object.
    pub fn as_obj_mut(&mut self) -> Option<&mut Obj<'text>> {
        match self {
            Value::Obj(obj) => Some(obj),
            Value::Str(_) => None,
        }
    }

    /// Returns a reference to a nested value by key.
    ///
    /// Shorthand for `self.as_obj()?.get(key)`.
    pub fn get(&self, key: &str) -> Option<&Value<'text>> {
        self.as_obj()?.get(key)
    }

    /// Traverse nested objects by path.
    ///
    /// Returns `None` if any segment doesn't exist or isn't an object.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value<'text>> {
        let mut current = self;
        for key in path {
            current = current.get(key)?;
        }
        Some(current)
    }

    /// Get a string at the given path.
    pub fn get_str(&self, path: &[&str]) -> Option<&str> {
        self.get_path(path)?.as_str()
    }

    /// Get an object at the given path.
    pub fn get_obj(&self, path: &[&str]) -> Option<&Obj<'text>> {
        self.get_path(path)?.as_obj()
    }
}

/// Object - insertion-ordered map from keys to values.
///
/// Key order is preserved on iteration and on output: the text format is
/// order-sensitive for round-tripping. Inserting over an existing key keeps
/// that key's original position ("last value wins" for the value only).
#[derive(Clone, Debug, PartialEq)]
pub struct Obj<'text> {
    pub(crate) inner: Map<'text>,
}

impl<'text> Obj<'text> {
    /// Creates a new empty VDF object.
    pub fn new() -> Self {
        Self {
            inner: Map::default(),
        }
    }

    /// Returns the number of key-value pairs in the object.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the object contains no key-value pairs.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns a reference to the value corresponding to the key.
    pub fn get(&self, key: &str) -> Option<&Value<'text>> {
        self.inner.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value<'text>> {
        self.inner.get_mut(key)
    }

    /// Returns `true` if the object contains the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Returns an iterator over the key-value pairs, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key<'text>, &Value<'text>)> {
        self.inner.iter()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(|k| k.as_ref())
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value<'text>> {
        self.inner.values()
    }

    /// Inserts a key-value pair into the object.
    ///
    /// If the key already exists it keeps its position and only the value is
    /// replaced; otherwise the pair is appended at the end. Returns the
    /// previous value if one existed for this key.
    pub fn insert(
        &mut self,
        key: impl Into<Key<'text>>,
        value: Value<'text>,
    ) -> Option<Value<'text>> {
        self.inner.insert(key.into(), value)
    }

    /// Removes a key from the object, preserving the order of the remaining
    /// entries.
    ///
    /// Returns the value if the key was present.
    pub fn remove(&mut self, key: &str) -> Option<Value<'text>> {
        self.inner.shift_remove(key)
    }
}

impl<'text> Default for Obj<'text> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'text> IntoIterator for Obj<'text> {
    type Item = (Key<'text>, Value<'text>);
    type IntoIter = indexmap::map::IntoIter<Key<'text>, Value<'text>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, 'text> IntoIterator for &'a Obj<'text> {
    type Item = (&'a Key<'text>, &'a Value<'text>);
    type IntoIter = indexmap::map::Iter<'a, Key<'text>, Value<'text>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<'text> FromIterator<(Key<'text>, Value<'text>)> for Obj<'text> {
    fn from_iter<I: IntoIterator<Item = (Key<'text>, Value<'text>)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

/// Top-level VDF document
///
/// An ordered collection of root key-value pairs. Steam files normally carry
/// a single root key (`"screenshots"`, `"UserLocalConfigStore"`, ...), but
/// the format allows several and they are preserved in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document<'text> {
    root: Obj<'text>,
}

impl<'text> Document<'text> {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document from its root object.
    pub fn from_root(root: Obj<'text>) -> Self {
        Self { root }
    }

    /// Returns a reference to the root object.
    pub fn root(&self) -> &Obj<'text> {
        &self.root
    }

    /// Returns a mutable reference to the root object.
    pub fn root_mut(&mut self) -> &mut Obj<'text> {
        &mut self.root
    }

    /// Consumes the document and returns its root object.
    pub fn into_root(self) -> Obj<'text> {
        self.root
    }

    /// Returns a reference to a root value by key.
    pub fn get(&self, key: &str) -> Option<&Value<'text>> {
        self.root.get(key)
    }

    /// Traverse nested objects by path from the root.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value<'text>> {
        let (first, rest) = path.split_first()?;
        self.root.get(first)?.get_path(rest)
    }

    /// Get a string at the given path.
    pub fn get_str(&self, path: &[&str]) -> Option<&str> {
        self.get_path(path)?.as_str()
    }

    /// Get an object at the given path.
    pub fn get_obj(&self, path: &[&str]) -> Option<&Obj<'text>> {
        self.get_path(path)?.as_obj()
    }
}
