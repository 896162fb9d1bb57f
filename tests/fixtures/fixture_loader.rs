/// Fixture loader
///
/// Fixtures are a JSON array mixing comment strings and case objects.
use query_url::{ParamMap, Value};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum TestCase {
    /// A query URL test case
    QueryUrlTest(Box<FixtureCase>),
    /// A comment line (string)
    #[allow(dead_code)]
    Comment(String),
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FixtureCase {
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub current: Option<String>,
    #[serde(default)]
    pub secure: Option<bool>,
    #[serde(default)]
    pub parameters: Option<Map<String, JsonValue>>,
    #[serde(default)]
    pub set: Option<Map<String, JsonValue>>,
    #[serde(default)]
    pub remove: Vec<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub fragment: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub relative: Option<String>,
    #[serde(default)]
    pub expected: Option<Map<String, JsonValue>>,
    #[serde(default)]
    pub failure: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct FixtureResult {
    pub passed: usize,
    pub failed: usize,
    pub failures: Vec<FixtureFailure>,
}

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct FixtureFailure {
    pub test_num: usize,
    pub input: Option<String>,
    pub field: String,
    pub expected: String,
    pub actual: String,
}

impl FixtureResult {
    pub fn summary(&self) -> String {
        format!("Passed: {}, Failed: {}", self.passed, self.failed)
    }
}

/// Convert a JSON value into a parameter value, keeping object key order.
pub fn to_value(json: &JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::from(*b),
        JsonValue::Number(n) => n
            .as_i64()
            .map_or_else(|| Value::from(n.as_f64().unwrap_or_default()), Value::from),
        JsonValue::String(s) => Value::from(s.as_str()),
        JsonValue::Array(items) => items.iter().map(to_value).collect(),
        JsonValue::Object(map) => Value::Map(to_params(map)),
    }
}

/// Convert a JSON object into a parameter map. Keys are kept verbatim, so
/// dot-notation keys stay unsplit until they are assigned.
pub fn to_params(map: &Map<String, JsonValue>) -> ParamMap {
    map.iter().map(|(k, v)| (k.as_str(), to_value(v))).collect()
}

pub fn load_cases() -> Vec<TestCase> {
    let data = include_str!("./query_url_cases.json");
    serde_json::from_str(data).expect("Failed to parse fixture data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_value_keeps_order_and_types() {
        let json = json!({"z": 1, "a": [true, null, "x"], "m": {"k": 1.5}});
        let params = to_params(json.as_object().unwrap());
        let keys: Vec<&str> = params.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(params.get("z"), Some(&Value::from(1)));
        assert_eq!(
            params.get("a"),
            Some(&Value::List(vec![Value::from(true), Value::Null, Value::from("x")]))
        );
        assert_eq!(params.get_path("m.k"), Some(&Value::from(1.5)));
    }

    #[test]
    fn test_load_cases() {
        let cases = load_cases();
        assert!(cases
            .iter()
            .any(|case| matches!(case, TestCase::QueryUrlTest(_))));
    }
}
