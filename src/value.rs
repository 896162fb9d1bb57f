use crate::compat::{String, ToString, Vec};
use crate::param_map::ParamMap;

/// A parameter value: a scalar, an ordered list, or a nested map.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(ParamMap),
}

impl Value {
    /// `""` or `Null`: the values pruning always removes.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Literal zero, numeric or textual (`0`, `0.0`, `"0"`).
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Integer(n) => *n == 0,
            Self::Float(n) => *n == 0.0,
            Self::String(s) => s == "0",
            _ => false,
        }
    }

    pub fn is_empty_list(&self) -> bool {
        matches!(self, Self::List(items) if items.is_empty())
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Map(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ParamMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut ParamMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Text written into a query string for a scalar; `None` for `Null`
    /// and containers.
    pub fn to_query_text(&self) -> Option<String> {
        match self {
            Self::Bool(b) => Some(b.to_string()),
            Self::Integer(n) => Some(n.to_string()),
            Self::Float(n) => Some(n.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::Null | Self::List(_) | Self::Map(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::String(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Self::Integer(i64::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_unsigned {
    ($($ty:ty),*) => {
        $(
            /// Values above `i64::MAX` fall back to `Float`.
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    i64::try_from(n).map_or(Self::Float(n as f64), Self::Integer)
                }
            }
        )*
    };
}

impl_from_wide_unsigned!(u64, usize);

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<ParamMap> for Value {
    fn from(map: ParamMap) -> Self {
        Self::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::List(iter.into_iter().map(Into::into).collect())
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_i64() == Some(*other)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Value;
    use crate::compat::{String, Vec};
    use crate::param_map::ParamMap;
    use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
    use serde::ser::{Serialize, SerializeMap, Serializer};

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Self::Null => serializer.serialize_unit(),
                Self::Bool(b) => serializer.serialize_bool(*b),
                Self::Integer(n) => serializer.serialize_i64(*n),
                Self::Float(n) => serializer.serialize_f64(*n),
                Self::String(s) => serializer.serialize_str(s),
                Self::List(items) => items.serialize(serializer),
                Self::Map(map) => map.serialize(serializer),
            }
        }
    }

    impl Serialize for ParamMap {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self.iter() {
                state.serialize_entry(key, value)?;
            }
            state.end()
        }
    }

    struct ValueVisitor;

    impl<'de> Visitor<'de> for ValueVisitor {
        type Value = Value;

        fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("a parameter value")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
            Ok(Value::Null)
        }

        fn visit_none<E: de::Error>(self) -> Result<Value, E> {
            Ok(Value::Null)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
            Value::deserialize(deserializer)
        }

        fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
            Ok(Value::Bool(b))
        }

        fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
            Ok(Value::Integer(n))
        }

        fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
            Ok(Value::from(n))
        }

        fn visit_f64<E: de::Error>(self, n: f64) -> Result<Value, E> {
            Ok(Value::Float(n))
        }

        fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
            Ok(Value::String(s.into()))
        }

        fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
            Ok(Value::String(s))
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
            let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(item) = seq.next_element()? {
                items.push(item);
            }
            Ok(Value::List(items))
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Value, A::Error> {
            ParamMapVisitor.visit_map(map).map(Value::Map)
        }
    }

    struct ParamMapVisitor;

    impl<'de> Visitor<'de> for ParamMapVisitor {
        type Value = ParamMap;

        fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("a map of parameters")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ParamMap, A::Error> {
            let mut map = ParamMap::new();
            while let Some((key, value)) = access.next_entry::<String, Value>()? {
                map.insert(key, value);
            }
            Ok(map)
        }
    }

    impl<'de> Deserialize<'de> for Value {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(ValueVisitor)
        }
    }

    impl<'de> Deserialize<'de> for ParamMap {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(ParamMapVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::vec;

    #[test]
    fn test_blank_and_zero() {
        assert!(Value::Null.is_blank());
        assert!(Value::from("").is_blank());
        assert!(!Value::from("0").is_blank());
        assert!(!Value::from(0).is_blank());
        assert!(Value::from(0).is_zero());
        assert!(Value::from("0").is_zero());
        assert!(Value::from(0.0).is_zero());
        assert!(!Value::from(false).is_zero());
        assert!(Value::List(vec![]).is_empty_list());
        assert!(!Value::Map(ParamMap::new()).is_empty_list());
    }

    #[test]
    fn test_query_text() {
        assert_eq!(Value::from("a b").to_query_text().as_deref(), Some("a b"));
        assert_eq!(Value::from(42).to_query_text().as_deref(), Some("42"));
        assert_eq!(Value::from(1.5).to_query_text().as_deref(), Some("1.5"));
        assert_eq!(Value::from(true).to_query_text().as_deref(), Some("true"));
        assert_eq!(Value::Null.to_query_text(), None);
        assert_eq!(Value::List(vec![]).to_query_text(), None);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
        let list: Value = ["a", "b"].into_iter().collect();
        assert_eq!(list, Value::List(vec![Value::from("a"), Value::from("b")]));
        assert_eq!(Value::from("bob"), "bob");
        assert_eq!(Value::from(7u16), 7_i64);
        assert_eq!(Value::from(3usize), 3_i64);
        assert_eq!(Value::from(42u64), 42_i64);
        assert_eq!(Value::from(u64::MAX), Value::Float(u64::MAX as f64));
    }

    #[cfg(feature = "serde")]
    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_serde_json_shape() {
        let value: Value =
            serde_json::from_str(r#"{"q":"bikes","page":2,"tags":["a",null],"on":true}"#).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.keys().collect::<crate::compat::Vec<_>>(), ["q", "page", "tags", "on"]);
        assert_eq!(map.get("page"), Some(&Value::from(2)));
        assert_eq!(map.get("tags"), Some(&Value::List(vec![Value::from("a"), Value::Null])));
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"q":"bikes","page":2,"tags":["a",null],"on":true}"#
        );
    }
}
