//! Conversions between [`TaggedValue`] and JSON, for inspection and fixtures.

use serde_json::{Map, Value};

use crate::errors::CborError;
use crate::value::TaggedValue;

/// Renders a value as JSON for human inspection.
///
/// The rendering is lossy: byte strings become lowercase hex strings, maps
/// whose keys are all text or integers become objects (integer keys are
/// stringified), other maps become arrays of `[key, value]` pairs, and tags
/// become `{"tag": n, "value": ...}`.
pub fn to_diagnostic_json(value: &TaggedValue) -> Value {
    match value {
        TaggedValue::Integer(n) => Value::from(*n),
        TaggedValue::ByteString(b) => Value::String(hex::encode(b)),
        TaggedValue::TextString(s) => Value::String(s.clone()),
        TaggedValue::Array(items) => Value::Array(items.iter().map(to_diagnostic_json).collect()),
        TaggedValue::Map(entries) => {
            let keys: Option<Vec<String>> = entries
                .iter()
                .map(|(k, _)| match k {
                    TaggedValue::TextString(s) => Some(s.clone()),
                    TaggedValue::Integer(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect();
            match keys {
                Some(keys) => {
                    let mut object = Map::new();
                    for (key, (_, v)) in keys.into_iter().zip(entries) {
                        object.insert(key, to_diagnostic_json(v));
                    }
                    Value::Object(object)
                }
                None => Value::Array(
                    entries
                        .iter()
                        .map(|(k, v)| Value::Array(vec![to_diagnostic_json(k), to_diagnostic_json(v)]))
                        .collect(),
                ),
            }
        }
        TaggedValue::Tagged(tag, inner) => {
            let mut object = Map::new();
            object.insert("tag".to_string(), Value::from(*tag));
            object.insert("value".to_string(), to_diagnostic_json(inner));
            Value::Object(object)
        }
        TaggedValue::Boolean(b) => Value::Bool(*b),
        TaggedValue::Null => Value::Null,
    }
}

/// Builds a value from JSON.
///
/// Objects become maps with text keys in `serde_json` key order, integers must fit
/// in `i64`. Floats are rejected. Strings always become text strings.
pub fn from_json(value: &Value) -> Result<TaggedValue, CborError> {
    match value {
        Value::Null => Ok(TaggedValue::Null),
        Value::Bool(b) => Ok(TaggedValue::Boolean(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(TaggedValue::Integer)
            .ok_or_else(|| CborError::UnsupportedJson(format!("number {n} is not an i64"))),
        Value::String(s) => Ok(TaggedValue::TextString(s.clone())),
        Value::Array(items) => Ok(TaggedValue::Array(
            items.iter().map(from_json).collect::<Result<_, _>>()?,
        )),
        Value::Object(map) => Ok(TaggedValue::Map(
            map.iter()
                .map(|(k, v)| Ok::<_, CborError>((TaggedValue::TextString(k.clone()), from_json(v)?)))
                .collect::<Result<_, _>>()?,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn header_map_renders_with_integer_keys() {
        let header = TaggedValue::Map(vec![
            (TaggedValue::Integer(1), TaggedValue::Integer(-7)),
            (TaggedValue::Integer(4), TaggedValue::ByteString(b"key-1".to_vec())),
        ]);
        assert_eq!(
            to_diagnostic_json(&header),
            json!({"1": -7, "4": "6b65792d31"})
        );
    }

    #[test]
    fn non_scalar_keys_render_as_pairs() {
        let map = TaggedValue::Map(vec![(
            TaggedValue::ByteString(vec![0xab]),
            TaggedValue::Null,
        )]);
        assert_eq!(to_diagnostic_json(&map), json!([["ab", null]]));
    }

    #[test]
    fn tags_render_as_objects() {
        let tagged = TaggedValue::Tagged(18, Box::new(TaggedValue::Boolean(true)));
        assert_eq!(to_diagnostic_json(&tagged), json!({"tag": 18, "value": true}));
    }

    #[test]
    fn from_json_builds_text_keyed_maps() {
        let value = from_json(&json!({"iss": "did:web:example", "nbf": 1635883530})).unwrap();
        assert_eq!(
            value.map_get(&TaggedValue::from("nbf")),
            Some(&TaggedValue::Integer(1635883530))
        );
    }

    #[test]
    fn from_json_rejects_floats() {
        assert!(matches!(
            from_json(&json!({"x": 1.5})),
            Err(CborError::UnsupportedJson(_))
        ));
    }
}
