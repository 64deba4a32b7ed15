//! Lenient decoders for columns whose stored shape varies between rows.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a list column stored either as a JSON array or as a JSON-encoded
/// string. Anything else, including malformed JSON, becomes an empty list.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(list_from_value).unwrap_or_default())
}

pub fn list_from_value(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(s) => Some(s),
                other => Some(other.to_string()),
            })
            .collect(),
        Value::String(encoded) => match serde_json::from_str::<Value>(&encoded) {
            Ok(inner @ Value::Array(_)) => list_from_value(inner),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Text column that may hold null or a number (e.g. `year`).
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Optional URL column where an empty string means "none".
pub fn optional_url<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize, Debug)]
    struct Row {
        #[serde(default, deserialize_with = "string_list")]
        tools: Vec<String>,
        #[serde(default, deserialize_with = "text")]
        year: String,
    }

    fn parse(value: Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_array_list() {
        assert_eq!(parse(json!({"tools": ["Rust", "Go"]})).tools, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_json_encoded_string_list() {
        assert_eq!(
            parse(json!({"tools": "[\"React\",\"Node.js\"]"})).tools,
            vec!["React", "Node.js"]
        );
    }

    #[test]
    fn test_malformed_string_list_is_empty() {
        assert!(parse(json!({"tools": "[\"React\","})).tools.is_empty());
        assert!(parse(json!({"tools": "React"})).tools.is_empty());
        assert!(parse(json!({"tools": "{\"a\":1}"})).tools.is_empty());
    }

    #[test]
    fn test_null_or_missing_list_is_empty() {
        assert!(parse(json!({"tools": null})).tools.is_empty());
        assert!(parse(json!({})).tools.is_empty());
        assert!(parse(json!({"tools": 42})).tools.is_empty());
    }

    #[test]
    fn test_list_skips_nulls_and_stringifies_numbers() {
        assert_eq!(
            parse(json!({"tools": ["a", null, 7]})).tools,
            vec!["a".to_string(), "7".to_string()]
        );
    }

    #[test]
    fn test_text_accepts_numbers_and_null() {
        assert_eq!(parse(json!({"year": 2023})).year, "2023");
        assert_eq!(parse(json!({"year": "2021"})).year, "2021");
        assert_eq!(parse(json!({"year": null})).year, "");
    }
}
