//! Type-safe schema generation for OpenAI structured outputs.
//!
//! Uses the `schemars` crate to generate JSON schemas from Rust types, then
//! rewrites them into the shape OpenAI's strict mode accepts.

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;

/// Trait for types that can be used as OpenAI structured output.
///
/// Automatically implemented for any type that implements
/// `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate an OpenAI-compatible JSON schema for this type.
    ///
    /// OpenAI strict mode requires:
    /// 1. `additionalProperties: false` on every object schema
    /// 2. every property listed in `required`, including nullable ones
    /// 3. fully inlined schemas (strict validation does not follow `$ref`)
    fn openai_schema() -> serde_json::Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        tighten_objects(&mut value);

        let definitions = match &value {
            serde_json::Value::Object(map) => map.get("definitions").cloned(),
            _ => None,
        };
        if let Some(defs) = definitions {
            inline_refs(&mut value, &defs);
        }

        if let serde_json::Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
        }

        value
    }

    /// Get the schema name for this type.
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Walk the schema, adding `additionalProperties: false` to every object
/// and promoting every property into `required`.
fn tighten_objects(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if map.get("type") == Some(&serde_json::Value::String("object".to_string())) {
                map.insert(
                    "additionalProperties".to_string(),
                    serde_json::Value::Bool(false),
                );
                if let Some(serde_json::Value::Object(props)) = map.get("properties") {
                    let all_keys: Vec<serde_json::Value> = props
                        .keys()
                        .map(|k| serde_json::Value::String(k.clone()))
                        .collect();
                    map.insert("required".to_string(), serde_json::Value::Array(all_keys));
                }
            }
            for (_, v) in map.iter_mut() {
                tighten_objects(v);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                tighten_objects(item);
            }
        }
        _ => {}
    }
}

/// Replace every `#/definitions/...` reference with the definition itself.
fn inline_refs(value: &mut serde_json::Value, definitions: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::String(ref_path)) = map.get("$ref").cloned() {
                if let Some(type_name) = ref_path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(type_name) {
                        *value = def.clone();
                        inline_refs(value, definitions);
                        return;
                    }
                }
            }
            for (_, v) in map.iter_mut() {
                inline_refs(v, definitions);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs(item, definitions);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    struct Item {
        name: String,
        relevant: bool,
        note: Option<String>,
    }

    #[derive(Deserialize, JsonSchema)]
    struct ItemList {
        items: Vec<Item>,
    }

    #[test]
    fn test_all_properties_required() {
        let schema = Item::openai_schema();
        let obj = schema.as_object().unwrap();

        let required: Vec<&str> = obj["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();

        // Option<T> fields are still required under strict mode
        assert!(required.contains(&"name"));
        assert!(required.contains(&"relevant"));
        assert!(required.contains(&"note"));
        assert_eq!(obj["additionalProperties"], serde_json::Value::Bool(false));
    }

    #[test]
    fn test_nested_type_is_inlined() {
        let schema = ItemList::openai_schema();
        let text = serde_json::to_string(&schema).unwrap();

        assert!(!text.contains("$ref"), "refs must be inlined: {}", text);
        assert!(!schema.as_object().unwrap().contains_key("definitions"));
        assert!(!schema.as_object().unwrap().contains_key("$schema"));

        // The array item schema carries the strict-mode markers too
        let items = &schema["properties"]["items"]["items"];
        assert_eq!(items["type"], "object");
        assert_eq!(items["additionalProperties"], serde_json::Value::Bool(false));
    }
}
