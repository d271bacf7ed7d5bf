use serde::de::DeserializeOwned;
use serde_json::{Map, Value, error::Category};
use thiserror::Error;

use crate::domain::pipeline::extractor::ExtractedJson;

/// How a single wire field is rebuilt when the strict decode fails.
#[derive(Debug, Clone, Copy)]
pub enum Coercion {
    /// Strings pass through, scalars are stringified, objects become compact JSON.
    Text,
    /// Numbers and numeric-like strings (`"350"`, `"350 kcal"`, `"12.5"`).
    /// Absent or unreadable values (`"max"`, `"to failure"`) become `0`.
    Integer,
    /// Like [`Coercion::Integer`] but absent or unreadable values become `null`.
    OptionalInteger,
    /// Arrays of text; a lone string becomes a one-element list.
    TextList,
    /// Nested object with its own field table.
    Record(&'static [FieldRule]),
    /// Object with free-form keys; `null` or absent becomes `{}`.
    Map(&'static Coercion),
    /// Array; `null` or absent becomes `[]`, a lone object becomes a one-element list.
    List(&'static Coercion),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub coercion: Coercion,
}

pub const fn field(name: &'static str, coercion: Coercion) -> FieldRule {
    FieldRule { name, coercion }
}

/// A result type the decoder can rebuild from a loosely shaped payload.
pub trait DecodeShape: DeserializeOwned {
    const NAME: &'static str;
    const FIELDS: &'static [FieldRule];
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("payload is not valid JSON: {0}")]
    Malformed(String),

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("payload has none of the {shape} fields")]
    NoRecognizedFields { shape: &'static str },

    #[error("field `{path}` could not be read as {expected}")]
    InvalidField { path: String, expected: &'static str },

    #[error("rebuilt {shape} did not decode: {message}")]
    Reconstruction { shape: &'static str, message: String },
}

/// Decodes `json` into `T`, strictly first and then permissively.
///
/// The permissive path rebuilds every field listed in `T::FIELDS` from a
/// generic map, so a single mis-shaped nested value does not discard the rest
/// of the payload.
pub fn decode<T: DecodeShape>(json: &ExtractedJson) -> Result<T, DecodeError> {
    match serde_json::from_str::<T>(json.as_str()) {
        Ok(value) => return Ok(value),
        Err(err) if err.classify() == Category::Data => {
            tracing::debug!(
                shape = T::NAME,
                error = %err,
                "strict decode failed, rebuilding from generic map"
            );
        }
        Err(err) => return Err(DecodeError::Malformed(err.to_string())),
    }

    let payload: Value =
        serde_json::from_str(json.as_str()).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    let Value::Object(map) = payload else {
        return Err(DecodeError::NotAnObject);
    };

    if !T::FIELDS.iter().any(|rule| map.contains_key(rule.name)) {
        return Err(DecodeError::NoRecognizedFields { shape: T::NAME });
    }

    let rebuilt = coerce_record(&map, T::FIELDS, "")?;

    serde_json::from_value(Value::Object(rebuilt)).map_err(|e| DecodeError::Reconstruction {
        shape: T::NAME,
        message: e.to_string(),
    })
}

fn coerce_record(
    source: &Map<String, Value>,
    fields: &[FieldRule],
    path: &str,
) -> Result<Map<String, Value>, DecodeError> {
    let mut rebuilt = Map::with_capacity(fields.len());
    for rule in fields {
        let field_path = join_path(path, rule.name);
        let value = coerce(source.get(rule.name), &rule.coercion, &field_path)?;
        rebuilt.insert(rule.name.to_string(), value);
    }
    Ok(rebuilt)
}

fn coerce(value: Option<&Value>, coercion: &Coercion, path: &str) -> Result<Value, DecodeError> {
    let value = value.filter(|v| !v.is_null());

    match coercion {
        Coercion::Text => Ok(Value::String(value.map(to_text).unwrap_or_default())),
        Coercion::Integer => match value {
            None => Ok(Value::from(0)),
            Some(v) => Ok(Value::from(to_integer(v).unwrap_or_else(|| {
                tracing::debug!(path, value = %v, "unreadable integer replaced with 0");
                0
            }))),
        },
        Coercion::OptionalInteger => Ok(value
            .and_then(to_integer)
            .map(Value::from)
            .unwrap_or(Value::Null)),
        Coercion::TextList => match value {
            None => Ok(Value::Array(Vec::new())),
            Some(Value::Array(items)) => Ok(Value::Array(
                items
                    .iter()
                    .filter(|item| !item.is_null())
                    .map(|item| Value::String(to_text(item)))
                    .collect(),
            )),
            Some(Value::String(text)) => match reparse(text) {
                Some(nested @ Value::Array(_)) => coerce(Some(&nested), coercion, path),
                _ if text.trim().is_empty() => Ok(Value::Array(Vec::new())),
                _ => Ok(Value::Array(vec![Value::String(text.clone())])),
            },
            Some(Value::Object(_)) => Err(invalid(path, "a list of text")),
            Some(other) => Ok(Value::Array(vec![Value::String(to_text(other))])),
        },
        Coercion::Record(fields) => match value {
            None => coerce_record(&Map::new(), fields, path).map(Value::Object),
            Some(Value::Object(map)) => coerce_record(map, fields, path).map(Value::Object),
            Some(Value::String(text)) => match reparse(text) {
                Some(Value::Object(map)) => coerce_record(&map, fields, path).map(Value::Object),
                _ => Err(invalid(path, "an object")),
            },
            Some(_) => Err(invalid(path, "an object")),
        },
        Coercion::Map(inner) => match value {
            None => Ok(Value::Object(Map::new())),
            Some(Value::Object(map)) => coerce_entries(map, inner, path),
            Some(Value::String(text)) => match reparse(text) {
                Some(Value::Object(map)) => coerce_entries(&map, inner, path),
                _ => Err(invalid(path, "an object")),
            },
            Some(_) => Err(invalid(path, "an object")),
        },
        Coercion::List(inner) => match value {
            None => Ok(Value::Array(Vec::new())),
            Some(Value::Array(items)) => coerce_items(items, inner, path),
            Some(single @ Value::Object(_)) => {
                coerce(Some(single), inner, &format!("{path}[0]")).map(|v| Value::Array(vec![v]))
            }
            Some(Value::String(text)) => match reparse(text) {
                Some(Value::Array(items)) => coerce_items(&items, inner, path),
                Some(single @ Value::Object(_)) => coerce(Some(&single), inner, &format!("{path}[0]"))
                    .map(|v| Value::Array(vec![v])),
                _ => Err(invalid(path, "a list")),
            },
            Some(_) => Err(invalid(path, "a list")),
        },
    }
}

fn coerce_entries(
    map: &Map<String, Value>,
    inner: &Coercion,
    path: &str,
) -> Result<Value, DecodeError> {
    let mut rebuilt = Map::with_capacity(map.len());
    for (key, value) in map {
        let entry = coerce(Some(value), inner, &join_path(path, key))?;
        rebuilt.insert(key.clone(), entry);
    }
    Ok(Value::Object(rebuilt))
}

fn coerce_items(items: &[Value], inner: &Coercion, path: &str) -> Result<Value, DecodeError> {
    items
        .iter()
        .filter(|item| !item.is_null())
        .enumerate()
        .map(|(idx, item)| coerce(Some(item), inner, &format!("{path}[{idx}]")))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn to_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f.round() as i64)),
        Value::String(text) => parse_leading_number(text),
        _ => None,
    }
}

/// Reads the number a string starts with, e.g. `"450 kcal"` or `"12.5"`.
fn parse_leading_number(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if let Ok(whole) = trimmed.parse::<i64>() {
        return Some(whole);
    }

    let numeric: String = trimmed
        .char_indices()
        .take_while(|(idx, ch)| ch.is_ascii_digit() || *ch == '.' || (*idx == 0 && *ch == '-'))
        .map(|(_, ch)| ch)
        .collect();

    numeric
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.round() as i64)
}

fn reparse(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return None;
    }
    serde_json::from_str(trimmed).ok()
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn invalid(path: &str, expected: &'static str) -> DecodeError {
    DecodeError::InvalidField {
        path: path.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::domain::pipeline::extractor::extract;

    #[derive(Debug, PartialEq, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Session {
        title: String,
        minutes: i32,
        tags: Vec<String>,
        score: Option<i32>,
        blocks: std::collections::BTreeMap<String, Vec<Block>>,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Block {
        name: String,
        reps: i32,
    }

    const BLOCK_FIELDS: &[FieldRule] = &[
        field("name", Coercion::Text),
        field("reps", Coercion::Integer),
    ];
    const BLOCK: Coercion = Coercion::Record(BLOCK_FIELDS);
    const BLOCK_LIST: Coercion = Coercion::List(&BLOCK);

    impl DecodeShape for Session {
        const NAME: &'static str = "session";
        const FIELDS: &'static [FieldRule] = &[
            field("title", Coercion::Text),
            field("minutes", Coercion::Integer),
            field("tags", Coercion::TextList),
            field("score", Coercion::OptionalInteger),
            field("blocks", Coercion::Map(&BLOCK_LIST)),
        ];
    }

    fn json_text(value: serde_json::Value) -> ExtractedJson {
        extract(&value.to_string()).unwrap()
    }

    #[test]
    fn test_strict_decode_passes_through() {
        let payload = json_text(json!({
            "title": "legs",
            "minutes": 45,
            "tags": ["strength"],
            "score": 7,
            "blocks": {"Monday": [{"name": "squat", "reps": 10}]}
        }));

        let session: Session = decode(&payload).unwrap();
        assert_eq!(session.minutes, 45);
        assert_eq!(session.blocks["Monday"][0].name, "squat");
    }

    #[test]
    fn test_numeric_like_strings_become_numbers() {
        let payload = json_text(json!({
            "title": "legs",
            "minutes": "45 min",
            "tags": [],
            "blocks": {"Monday": [{"name": "squat", "reps": "12"}]}
        }));

        let session: Session = decode(&payload).unwrap();
        assert_eq!(session.minutes, 45);
        assert_eq!(session.blocks["Monday"][0].reps, 12);
        assert_eq!(session.score, None);
    }

    #[test]
    fn test_json_within_json_is_reparsed() {
        let payload = json_text(json!({
            "title": "legs",
            "minutes": 30,
            "tags": "[\"a\", \"b\"]",
            "blocks": "{\"Tuesday\": [{\"name\": \"lunge\", \"reps\": 8}]}"
        }));

        let session: Session = decode(&payload).unwrap();
        assert_eq!(session.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(session.blocks["Tuesday"][0].name, "lunge");
    }

    #[test]
    fn test_null_and_absent_nested_maps_become_empty() {
        let payload = json_text(json!({"title": "rest", "minutes": 0, "blocks": null}));
        let session: Session = decode(&payload).unwrap();
        assert!(session.blocks.is_empty());
        assert!(session.tags.is_empty());

        let payload = json_text(json!({"title": "rest"}));
        let session: Session = decode(&payload).unwrap();
        assert!(session.blocks.is_empty());
        assert_eq!(session.minutes, 0);
    }

    #[test]
    fn test_objects_in_text_fields_are_stringified() {
        let payload = json_text(json!({
            "title": {"en": "legs"},
            "minutes": 20,
            "tags": ["x", 3],
            "blocks": {"Friday": {"name": "plank", "reps": 1}}
        }));

        let session: Session = decode(&payload).unwrap();
        assert_eq!(session.title, r#"{"en":"legs"}"#);
        assert_eq!(session.tags, vec!["x".to_string(), "3".to_string()]);
        assert_eq!(session.blocks["Friday"].len(), 1);
    }

    #[test]
    fn test_unreadable_integer_becomes_zero() {
        let payload = json_text(json!({
            "title": "legs",
            "blocks": {"Monday": [{"name": "squat", "reps": "many"}, {"name": "lunge", "reps": 8}]}
        }));

        let session: Session = decode(&payload).unwrap();
        assert_eq!(session.blocks["Monday"][0].reps, 0);
        assert_eq!(session.blocks["Monday"][1].reps, 8);
    }

    #[test]
    fn test_unusable_nested_value_reports_path() {
        let payload = json_text(json!({
            "title": "legs",
            "blocks": {"Monday": [{"name": "squat", "reps": 10}], "Tuesday": 5}
        }));

        let error = decode::<Session>(&payload).unwrap_err();
        assert_eq!(
            error,
            DecodeError::InvalidField {
                path: "blocks.Tuesday".to_string(),
                expected: "a list",
            }
        );
    }

    #[test]
    fn test_unrelated_payload_is_rejected() {
        let payload = json_text(json!({"answer": 42}));
        assert_eq!(
            decode::<Session>(&payload).unwrap_err(),
            DecodeError::NoRecognizedFields { shape: "session" }
        );
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("350"), Some(350));
        assert_eq!(parse_leading_number(" 350 kcal"), Some(350));
        assert_eq!(parse_leading_number("12.6"), Some(13));
        assert_eq!(parse_leading_number("-4"), Some(-4));
        assert_eq!(parse_leading_number("about 300"), None);
    }
}
