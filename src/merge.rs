//! Merge engine for screenshots.vdf documents.
//!
//! Steam stores screenshot metadata under the root key `"screenshots"`, as
//! one bucket per game id, with each screenshot keyed by a decimal index:
//!
//! ```text
//! "screenshots"
//! {
//!     "440"
//!     {
//!         "0" { ... }
//!         "1" { ... }
//!     }
//! }
//! ```
//!
//! Merging two such files naively would collide on the indices. The engine
//! keeps the target's indices untouched and renumbers the source's entries to
//! append after the target's maximum index.

use std::borrow::Cow;

use indexmap::map::Entry;

use crate::value::{Document, Obj, Value};

/// Root key holding the per-game screenshot buckets.
const SCREENSHOTS_KEY: &str = "screenshots";

/// Merge `source`'s screenshot entries into `target` and return `target`.
///
/// Per game id present in `source`'s screenshot block, in stored order:
///
/// - game id absent from `target`: the whole bucket is inserted as-is.
/// - game id present: digit-keyed entries from `source` are appended under
///   fresh consecutive indices starting at one past `target`'s maximum
///   existing index (0 if the target bucket has no digit keys), preserving
///   their relative order; non-digit keys (auxiliary fields) overwrite any
///   same-named key in place.
///
/// Everything outside the `"screenshots"` root key of `target` passes through
/// unchanged, and the `"screenshots"` key keeps its position among `target`'s
/// root pairs. A missing `"screenshots"` block on either side is treated as
/// empty, never as an error; entry payloads are relocated without being
/// inspected.
///
/// `source` is consumed, so its subtrees are moved rather than copied and can
/// never be observed (or mutated) after the call. An empty source leaves
/// `target` untouched apart from ensuring the `"screenshots"` key exists.
pub fn merge_screenshots<'text>(
    mut target: Document<'text>,
    source: Document<'text>,
) -> Document<'text> {
    let mut source_root = source.into_root();
    let source_shots = match source_root.remove(SCREENSHOTS_KEY) {
        Some(Value::Obj(obj)) => obj,
        // Absent or opaque non-object block: nothing to merge from
        Some(_) | None => Obj::new(),
    };

    // Resolve the target block in place so its position among the root pairs
    // is kept; a fresh key is appended only when the target lacks one.
    if source_shots.is_empty() {
        // Nothing to merge; whatever is already there stays untouched
        target
            .root_mut()
            .inner
            .entry(Cow::Borrowed(SCREENSHOTS_KEY))
            .or_insert_with(|| Value::Obj(Obj::new()));
        return target;
    }

    let slot = target
        .root_mut()
        .inner
        .entry(Cow::Borrowed(SCREENSHOTS_KEY))
        .or_insert_with(|| Value::Obj(Obj::new()));
    let target_shots = obj_mut_or_reset(slot);

    for (game_id, incoming) in source_shots {
        let incoming = match incoming {
            Value::Obj(bucket) => bucket,
            // Opaque payload where a bucket was expected: relocate unchanged
            other => {
                target_shots.insert(game_id, other);
                continue;
            }
        };

        match target_shots.inner.entry(game_id) {
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::Obj(existing) => append_entries(existing, incoming),
                other => *other = Value::Obj(incoming),
            },
            Entry::Vacant(slot) => {
                slot.insert(Value::Obj(incoming));
            }
        }
    }

    target
}

/// Returns the contained object, replacing any non-object value with an
/// empty object first.
fn obj_mut_or_reset<'s, 'text>(value: &'s mut Value<'text>) -> &'s mut Obj<'text> {
    if !value.is_obj() {
        *value = Value::Obj(Obj::new());
    }
    match value {
        Value::Obj(obj) => obj,
        Value::Str(_) => unreachable!("value was just reset to an object"),
    }
}

/// Append `incoming`'s entries to `existing`, renumbering digit keys to fresh
/// consecutive indices past `existing`'s maximum.
fn append_entries<'text>(existing: &mut Obj<'text>, incoming: Obj<'text>) {
    let mut next_index = existing
        .keys()
        .filter_map(parse_index)
        .max()
        .map_or(0, |max| max + 1);

    for (key, value) in incoming {
        if is_index_key(&key) {
            // New keys are always canonical decimal, no leading zeros
            existing.insert(next_index.to_string(), value);
            next_index += 1;
        } else {
            existing.insert(key, value);
        }
    }
}

/// A screenshot index key: non-empty, all ASCII digits.
fn is_index_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a key as a screenshot index for max-finding.
///
/// Leading zeros are tolerated (`"007"` counts as 7).
fn parse_index(key: &str) -> Option<u64> {
    if is_index_key(key) {
        key.parse().ok()
    } else {
        None
    }
}
