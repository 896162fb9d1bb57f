use crate::compat::{String, Vec};
use crate::value::Value;

/// Separator for dot-notation keys (`"user.address.city"`).
pub const PATH_SEPARATOR: char = '.';

/// Ordered string-keyed map of parameter values.
///
/// Keys keep insertion order, which is also the order they are written to a
/// query string. Lookups are linear, like the pair list behind a URL search
/// string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamMap {
    entries: Vec<(String, Value)>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get a direct child (no dot-notation).
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Get a direct child mutably (no dot-notation).
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert a direct child. An existing key keeps its position and has its
    /// value replaced; the old value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.get_mut(&key) {
            Some(slot) => Some(core::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove a direct child, preserving the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Look up a dot-notation key. Walking through anything that is not a
    /// map yields `None`.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split(PATH_SEPARATOR);
        let first = segments.next()?;
        let mut current = self.get(first)?;
        for segment in segments {
            current = current.as_map()?.get(segment)?;
        }
        Some(current)
    }

    /// Assign a dot-notation key, creating intermediate maps (and
    /// overwriting non-map intermediates with empty maps).
    pub fn set_path(&mut self, path: &str, value: impl Into<Value>) {
        let value = value.into();
        let Some((head, rest)) = path.split_once(PATH_SEPARATOR) else {
            self.insert(path, value);
            return;
        };
        if let Some(Value::Map(child)) = self.get_mut(head) {
            child.set_path(rest, value);
            return;
        }
        let mut child = ParamMap::new();
        child.set_path(rest, value);
        self.insert(head, child);
    }

    /// Remove a dot-notation key. A missing segment makes this a no-op.
    pub fn remove_path(&mut self, path: &str) -> Option<Value> {
        match path.rsplit_once(PATH_SEPARATOR) {
            None => self.remove(path),
            Some((parents, last)) => {
                let mut current = self;
                for segment in parents.split(PATH_SEPARATOR) {
                    current = current.get_mut(segment)?.as_map_mut()?;
                }
                current.remove(last)
            }
        }
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.get_path(path).is_some()
    }

    /// Copy the listed dot-notation keys that are present into a new map,
    /// rebuilding their nesting.
    pub fn select<I>(&self, paths: I) -> ParamMap
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut selected = ParamMap::new();
        for path in paths {
            let path = path.as_ref();
            if let Some(value) = self.get_path(path) {
                selected.set_path(path, value.clone());
            }
        }
        selected
    }

    /// Deep copy without the listed dot-notation keys.
    pub fn without<I>(&self, paths: I) -> ParamMap
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut copy = self.clone();
        for path in paths {
            copy.remove_path(path.as_ref());
        }
        copy
    }

    /// Recursively drop empty values.
    ///
    /// Lists lose `""`/`Null` elements. Map entries lose `""`, `Null` and
    /// empty lists, except that keys named in `zero_keys` keep any
    /// non-blank value and always keep a literal zero. Empty maps stay.
    pub fn prune(&mut self, zero_keys: &[String]) {
        for (_, value) in &mut self.entries {
            prune_value(value, zero_keys);
        }
        self.entries.retain(|(key, value)| {
            if zero_keys.iter().any(|k| k == key) {
                !value.is_blank() || value.is_zero()
            } else {
                !(value.is_blank() || value.is_empty_list())
            }
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

fn prune_value(value: &mut Value, zero_keys: &[String]) {
    match value {
        Value::Map(map) => map.prune(zero_keys),
        Value::List(items) => {
            for item in items.iter_mut() {
                prune_value(item, zero_keys);
            }
            items.retain(|item| !item.is_blank());
        }
        _ => {}
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ParamMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for ParamMap {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for ParamMap {
    type Item = (String, Value);
    type IntoIter = crate::compat::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
