//! Bracket-nested query strings (`a[b]=c&a[list][0]=x`).
//!
//! Encoding walks a [`ParamMap`] and writes one `key=value` pair per scalar
//! leaf. Decoding turns each bracketed key into a path and assigns it, so
//! `user[name]=Bob` and `user.name=Bob` both land on `{"user": {"name": "Bob"}}`.

use crate::checkers::parse_index;
use crate::compat::{String, ToString, Vec};
use crate::encoding::{decode_component, encode_component_into};
use crate::param_map::{PATH_SEPARATOR, ParamMap};
use crate::value::Value;

/// Serialize parameters to a query string without the leading `?`.
/// Empty maps, empty lists and `Null` produce no pairs.
pub fn encode(params: &ParamMap) -> String {
    let mut out = String::new();
    let mut path = String::new();
    for (key, value) in params.iter() {
        path.clear();
        encode_component_into(&mut path, key);
        write_value(&mut out, &mut path, value);
    }
    out
}

fn write_value(out: &mut String, path: &mut String, value: &Value) {
    use core::fmt::Write;

    let base_len = path.len();
    match value {
        Value::Map(map) => {
            for (key, child) in map.iter() {
                path.push('[');
                encode_component_into(path, key);
                path.push(']');
                write_value(out, path, child);
                path.truncate(base_len);
            }
        }
        Value::List(items) => {
            for (index, child) in items.iter().enumerate() {
                let _ = write!(path, "[{index}]");
                write_value(out, path, child);
                path.truncate(base_len);
            }
        }
        scalar => {
            if let Some(text) = scalar.to_query_text() {
                if !out.is_empty() {
                    out.push('&');
                }
                out.push_str(path);
                out.push('=');
                encode_component_into(out, &text);
            }
        }
    }
}

/// Deepest nesting a decoded key can produce. Brackets past this depth stay
/// in the last segment as literal text.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Parse a query string (with or without leading `?`) into nested parameters.
///
/// Later pairs overwrite earlier ones with the same key. Decoded values are
/// always strings. Pairs whose key has an empty base or an empty dotted
/// segment (`=x`, `[a]=x`, `a..b=x`) are skipped.
pub fn decode(query: &str) -> ParamMap {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut params = ParamMap::new();

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = match pair.split_once('=') {
            Some((key, value)) => (decode_component(key), decode_component(value)),
            None => (decode_component(pair), String::new()),
        };
        let Some(segments) = key_segments(&key) else {
            log::trace!("skipping query pair with an empty key segment: {pair}");
            continue;
        };
        let Some((head, rest)) = segments.split_first() else {
            continue;
        };
        insert_into_map(&mut params, (*head).to_string(), rest, Value::String(value));
    }

    params
}

/// Split `base[a][b.c]` into `["base", "a", "b", "c"]`.
///
/// Dots split segments the same way dot-notation keys do, and a dot that
/// leaves an empty segment makes the whole key invalid (`None`). Only `[]`
/// yields an empty segment. A key whose brackets are not well formed is
/// taken as a single literal path.
fn key_segments(key: &str) -> Option<Vec<&str>> {
    let mut segments = Vec::new();
    let open = key.find('[').unwrap_or(key.len());
    split_dotted(&key[..open], 0, &mut segments)?;

    let mut offset = open;
    while let Some(inner) = key[offset..].strip_prefix('[') {
        let Some(close) = inner.find(']') else {
            break;
        };
        let segment = &inner[..close];
        if segment.is_empty() {
            segments.push((offset + 1, segment));
        } else {
            split_dotted(segment, offset + 1, &mut segments)?;
        }
        offset += close + 2;
    }

    if offset < key.len() {
        log::warn!("malformed bracket key {key:?}, using it literally");
        segments.clear();
        split_dotted(key, 0, &mut segments)?;
    }

    if segments.len() > MAX_NESTING_DEPTH {
        log::warn!(
            "query key nested {} levels deep, keeping levels past {MAX_NESTING_DEPTH} literally",
            segments.len()
        );
        let (start, _) = segments[MAX_NESTING_DEPTH - 1];
        segments.truncate(MAX_NESTING_DEPTH - 1);
        segments.push((start, &key[start..]));
    }

    Some(segments.into_iter().map(|(_, segment)| segment).collect())
}

/// Push the dot-separated pieces of `text` with their byte offsets in the
/// whole key. `None` if any piece is empty.
fn split_dotted<'a>(
    text: &'a str,
    offset: usize,
    segments: &mut Vec<(usize, &'a str)>,
) -> Option<()> {
    let mut start = offset;
    for piece in text.split(PATH_SEPARATOR) {
        if piece.is_empty() {
            return None;
        }
        segments.push((start, piece));
        start += piece.len() + 1;
    }
    Some(())
}

fn insert_into_map(map: &mut ParamMap, key: String, rest: &[&str], value: Value) {
    if let Some(child) = map.get_mut(&key) {
        insert_segments(child, rest, value);
        return;
    }
    let mut child = Value::Null;
    insert_segments(&mut child, rest, value);
    map.insert(key, child);
}

/// Container a fresh path segment should create: a list for `[]` and `[0]`,
/// a map otherwise.
fn container_for(segment: &str) -> Value {
    if segment.is_empty() || parse_index(segment) == Some(0) {
        Value::List(Vec::new())
    } else {
        Value::Map(ParamMap::new())
    }
}

fn insert_segments(slot: &mut Value, segments: &[&str], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *slot = value;
        return;
    };

    if slot.is_scalar() {
        *slot = container_for(head);
    }

    if let Value::List(items) = slot {
        let index = if head.is_empty() {
            Some(items.len())
        } else {
            parse_index(head).filter(|index| *index <= items.len())
        };
        if let Some(index) = index {
            if index == items.len() {
                items.push(Value::Null);
            }
            insert_segments(&mut items[index], rest, value);
            return;
        }
        // Not a next-in-line index: the list becomes a map keyed by position.
        let items = core::mem::take(items);
        *slot = Value::Map(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), item))
                .collect(),
        );
    }

    if let Value::Map(map) = slot {
        let key = if head.is_empty() {
            map.len().to_string()
        } else {
            (*head).to_string()
        };
        insert_into_map(map, key, rest, value);
    }
}
