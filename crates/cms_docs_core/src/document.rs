//! crates/cms_docs_core/src/document.rs
//!
//! A mutable OpenAPI document and the operations that fill it in without ever
//! replacing what is already there.
//!
//! The document is kept as a raw JSON object so that everything the static file
//! carries (vendor extensions, fields this crate knows nothing about) survives
//! untouched. Every mutation here is insert-if-missing, decided by explicit key
//! presence: an empty map or array that already exists is left alone.

use serde::Serialize;
use serde_json::{json, Map, Value};

pub const DEFAULT_OPENAPI_VERSION: &str = "3.0.0";
pub const DEFAULT_TITLE: &str = "Strapi API";
pub const DEFAULT_INFO_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OpenApiDocument(Map<String, Value>);

impl OpenApiDocument {
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Fills in the minimum OpenAPI skeleton. Idempotent.
    pub fn normalize(&mut self) {
        let map = &mut self.0;
        insert_if_absent(map, "openapi", json!(DEFAULT_OPENAPI_VERSION));
        insert_if_absent(
            map,
            "info",
            json!({ "title": DEFAULT_TITLE, "version": DEFAULT_INFO_VERSION }),
        );
        insert_if_absent(map, "paths", json!({}));
        insert_if_absent(map, "components", json!({}));
        if let Some(components) = map.get_mut("components").and_then(Value::as_object_mut) {
            insert_if_absent(
                components,
                "securitySchemes",
                json!({
                    "bearerAuth": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" }
                }),
            );
        }
        insert_if_absent(map, "security", json!([{ "bearerAuth": [] }]));
        insert_if_absent(map, "tags", json!([]));
    }

    /// Appends `{name}` to `tags` unless a tag with that name exists.
    /// Returns whether the tag was added.
    pub fn ensure_tag(&mut self, name: &str) -> bool {
        let Some(tags) = self
            .0
            .entry("tags")
            .or_insert_with(|| Value::Array(Vec::new()))
            .as_array_mut()
        else {
            return false;
        };
        let present = tags
            .iter()
            .any(|tag| tag.get("name").and_then(Value::as_str) == Some(name));
        if present {
            return false;
        }
        tags.push(json!({ "name": name }));
        true
    }

    pub fn has_schema(&self, name: &str) -> bool {
        self.0
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(|s| s.get(name))
            .is_some()
    }

    /// Adds `components.schemas.<name>` if absent. Returns whether it was added.
    pub fn insert_schema_if_absent(&mut self, name: &str, schema: Value) -> bool {
        let Some(schemas) =
            object_slot(&mut self.0, "components").and_then(|c| object_slot(c, "schemas"))
        else {
            return false;
        };
        insert_if_absent(schemas, name, schema)
    }

    pub fn has_operation(&self, path: &str, method: &str) -> bool {
        self.0
            .get("paths")
            .and_then(|p| p.get(path))
            .and_then(|item| item.get(method))
            .is_some()
    }

    /// Adds `paths.<path>.<method>` if that exact method is absent.
    /// Other methods already on the path item are untouched.
    pub fn insert_operation_if_absent(&mut self, path: &str, method: &str, operation: Value) -> bool {
        let Some(item) = object_slot(&mut self.0, "paths").and_then(|p| object_slot(p, path)) else {
            return false;
        };
        insert_if_absent(item, method, operation)
    }
}

fn insert_if_absent(map: &mut Map<String, Value>, key: &str, value: Value) -> bool {
    if map.contains_key(key) {
        return false;
    }
    map.insert(key.to_string(), value);
    true
}

// Returns the object stored under `key`, creating an empty one when missing.
// A value of any other JSON type is not replaced and yields `None`.
fn object_slot<'a>(map: &'a mut Map<String, Value>, key: &str) -> Option<&'a mut Map<String, Value>> {
    map.entry(key)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
}
