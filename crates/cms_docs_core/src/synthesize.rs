//! crates/cms_docs_core/src/synthesize.rs
//!
//! Derives OpenAPI schemas, paths and tags from the live content-type registry
//! and merges them into a document.
//!
//! For each application content type five component schemas are produced
//! (`<Base>Attributes`, `<Base>`, `<Base>ListResponse`, `<Base>Response`,
//! `<Base>WriteRequest`) together with the REST routes the CMS exposes for it:
//!
//! - `GET`/`POST` on `/api/<pluralName>`
//! - `GET`/`PUT`/`DELETE` on `/api/<pluralName>/{id}`
//!
//! Synthesis is additive: a schema, tag or path method that already exists in
//! the document is never replaced, so running it twice is the same as once.

use std::collections::HashMap;

use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::document::OpenApiDocument;
use crate::domain::{AttributeDefinition, AttributeType, ContentTypeDescriptor, ContentTypeMap};

/// Identifier prefix of content types owned by the application, as opposed to
/// plugin-owned (`plugin::`) or internal (`admin::`, `strapi::`) ones.
pub const APPLICATION_NAMESPACE: &str = "api::";

//=========================================================================================
// Naming
//=========================================================================================

/// The names a content type is documented under, after applying the fallbacks
/// for missing metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeNames {
    pub plural: String,
    pub display: String,
    pub singular: String,
    pub base: String,
}

impl ContentTypeNames {
    pub fn derive(uid: &str, descriptor: &ContentTypeDescriptor) -> Self {
        let info = &descriptor.info;
        let plural = non_empty(info.plural_name.as_deref())
            .or_else(|| non_empty(descriptor.collection_name.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| uid_model_name(uid));
        let display = non_empty(info.display_name.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| plural.clone());
        let singular = non_empty(info.singular_name.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| display.clone());
        let base = base_name(&singular);
        Self {
            plural,
            display,
            singular,
            base,
        }
    }

    fn schema(&self, suffix: &str) -> String {
        format!("{}{}", self.base, suffix)
    }
}

/// Strips all whitespace and upper-cases the first character:
/// `"real estate agent"` becomes `"Realestateagent"`.
pub fn base_name(singular: &str) -> String {
    let compact: String = singular.chars().filter(|c| !c.is_whitespace()).collect();
    let mut chars = compact.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// `api::property.property` -> `property`
fn uid_model_name(uid: &str) -> String {
    match uid.split('.').nth(1) {
        Some(model) => model.to_string(),
        None => uid
            .strip_prefix(APPLICATION_NAMESPACE)
            .unwrap_or(uid)
            .to_string(),
    }
}

//=========================================================================================
// Attribute Mapping
//=========================================================================================

/// Maps one attribute definition to a JSON-schema fragment.
/// Relations, components, media, JSON and unknown kinds are opaque objects.
pub fn attribute_schema(attribute: &AttributeDefinition) -> Value {
    match attribute.attribute_type() {
        AttributeType::String | AttributeType::Text | AttributeType::RichText | AttributeType::Uid => {
            json!({ "type": "string" })
        }
        AttributeType::Email => json!({ "type": "string", "format": "email" }),
        AttributeType::Integer | AttributeType::BigInteger => json!({ "type": "integer" }),
        AttributeType::Decimal | AttributeType::Float | AttributeType::Number => {
            json!({ "type": "number" })
        }
        AttributeType::Boolean => json!({ "type": "boolean" }),
        AttributeType::Enumeration => json!({
            "type": "string",
            "enum": attribute.enum_values.clone().unwrap_or_default(),
        }),
        AttributeType::Json
        | AttributeType::Media
        | AttributeType::Component
        | AttributeType::Relation
        | AttributeType::Other(_) => json!({ "type": "object" }),
    }
}

/// The `<Base>Attributes` schema: every attribute mapped, plus the `required`
/// list when at least one attribute is required.
pub fn attributes_schema(descriptor: &ContentTypeDescriptor) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for (name, attribute) in &descriptor.attributes {
        properties.insert(name.clone(), attribute_schema(attribute));
        if attribute.required {
            required.push(Value::String(name.clone()));
        }
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }
    Value::Object(schema)
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn json_content(schema_name: &str) -> Value {
    json!({ "application/json": { "schema": schema_ref(schema_name) } })
}

//=========================================================================================
// Synthesis
//=========================================================================================

/// Two application content types that derive the same base schema name.
/// The first (in identifier order) is documented; the other is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCollision {
    pub base_name: String,
    pub kept: String,
    pub skipped: String,
}

/// What a synthesis pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisReport {
    pub content_types: usize,
    pub tags_added: usize,
    pub schemas_added: usize,
    pub operations_added: usize,
    pub collisions: Vec<SchemaCollision>,
}

#[derive(Debug, Clone)]
pub struct SchemaSynthesizer {
    namespace: String,
}

impl Default for SchemaSynthesizer {
    fn default() -> Self {
        Self::new(APPLICATION_NAMESPACE)
    }
}

impl SchemaSynthesizer {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Merges generated structure for every application content type into `doc`.
    /// Never fails; the registry is only read.
    pub fn synthesize(&self, doc: &mut OpenApiDocument, registry: &ContentTypeMap) -> SynthesisReport {
        let mut report = SynthesisReport::default();
        let mut claimed: HashMap<String, &str> = HashMap::new();

        for (uid, descriptor) in registry {
            if !uid.starts_with(&self.namespace) {
                continue;
            }
            let names = ContentTypeNames::derive(uid, descriptor);

            if let Some(kept) = claimed.get(names.base.as_str()) {
                warn!(
                    base_name = %names.base,
                    kept = %kept,
                    skipped = %uid,
                    "Content types derive the same schema name, skipping the later one"
                );
                report.collisions.push(SchemaCollision {
                    base_name: names.base.clone(),
                    kept: kept.to_string(),
                    skipped: uid.clone(),
                });
                continue;
            }
            claimed.insert(names.base.clone(), uid.as_str());

            report.content_types += 1;
            if doc.ensure_tag(&names.display) {
                report.tags_added += 1;
            }
            report.schemas_added += add_schemas(doc, &names, descriptor);
            report.operations_added += add_paths(doc, &names);
        }

        debug!(
            content_types = report.content_types,
            schemas_added = report.schemas_added,
            operations_added = report.operations_added,
            "Synthesized content-type documentation"
        );
        report
    }
}

fn add_schemas(doc: &mut OpenApiDocument, names: &ContentTypeNames, descriptor: &ContentTypeDescriptor) -> usize {
    let attributes = names.schema("Attributes");
    let entry = names.schema("");
    let schemas = [
        (attributes.clone(), attributes_schema(descriptor)),
        (
            entry.clone(),
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "integer" },
                    "attributes": schema_ref(&attributes),
                }
            }),
        ),
        (
            names.schema("ListResponse"),
            json!({
                "type": "object",
                "properties": {
                    "data": { "type": "array", "items": schema_ref(&entry) },
                    "meta": { "type": "object" },
                }
            }),
        ),
        (
            names.schema("Response"),
            json!({
                "type": "object",
                "properties": {
                    "data": schema_ref(&entry),
                    "meta": { "type": "object" },
                }
            }),
        ),
        (
            names.schema("WriteRequest"),
            json!({
                "type": "object",
                "required": ["data"],
                "properties": {
                    "data": schema_ref(&attributes),
                }
            }),
        ),
    ];

    let mut added = 0;
    for (name, schema) in schemas {
        if doc.insert_schema_if_absent(&name, schema) {
            added += 1;
        }
    }
    added
}

fn add_paths(doc: &mut OpenApiDocument, names: &ContentTypeNames) -> usize {
    let collection = format!("/api/{}", names.plural);
    let item = format!("{collection}/{{id}}");
    let tags = json!([names.display]);
    let id_param = json!([{
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    }]);
    let list_response = names.schema("ListResponse");
    let response = names.schema("Response");
    let write_request = names.schema("WriteRequest");
    let write_body = json!({ "required": true, "content": json_content(&write_request) });

    let operations = [
        (
            collection.as_str(),
            "get",
            json!({
                "tags": tags,
                "summary": format!("List {}", names.display),
                "responses": { "200": { "description": "OK", "content": json_content(&list_response) } }
            }),
        ),
        (
            collection.as_str(),
            "post",
            json!({
                "tags": tags,
                "summary": format!("Create {}", names.singular),
                "requestBody": write_body,
                "responses": { "201": { "description": "Created", "content": json_content(&response) } }
            }),
        ),
        (
            item.as_str(),
            "get",
            json!({
                "tags": tags,
                "summary": format!("Get {} by id", names.singular),
                "parameters": id_param,
                "responses": { "200": { "description": "OK", "content": json_content(&response) } }
            }),
        ),
        (
            item.as_str(),
            "put",
            json!({
                "tags": tags,
                "summary": format!("Update {}", names.singular),
                "parameters": id_param,
                "requestBody": write_body,
                "responses": { "200": { "description": "OK", "content": json_content(&response) } }
            }),
        ),
        (
            item.as_str(),
            "delete",
            json!({
                "tags": tags,
                "summary": format!("Delete {}", names.singular),
                "parameters": id_param,
                "responses": { "200": { "description": "OK", "content": json_content(&response) } }
            }),
        ),
    ];

    let mut added = 0;
    for (path, method, operation) in operations {
        if doc.insert_operation_if_absent(path, method, operation) {
            added += 1;
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContentTypeInfo;

    fn property() -> ContentTypeDescriptor {
        let mut descriptor = ContentTypeDescriptor {
            info: ContentTypeInfo {
                display_name: None,
                singular_name: Some("property".to_string()),
                plural_name: Some("properties".to_string()),
            },
            ..Default::default()
        };
        descriptor
            .attributes
            .insert("title".to_string(), AttributeDefinition::new("string").required());
        descriptor
            .attributes
            .insert("price".to_string(), AttributeDefinition::new("decimal"));
        descriptor
    }

    fn registry(entries: Vec<(&str, ContentTypeDescriptor)>) -> ContentTypeMap {
        entries
            .into_iter()
            .map(|(uid, d)| (uid.to_string(), d))
            .collect()
    }

    fn normalized() -> OpenApiDocument {
        let mut doc = OpenApiDocument::default();
        doc.normalize();
        doc
    }

    fn tag_count(doc: &Value, name: &str) -> usize {
        doc["tags"]
            .as_array()
            .map(|tags| tags.iter().filter(|t| t["name"] == name).count())
            .unwrap_or(0)
    }

    #[test]
    fn type_mapping_table() {
        let cases = [
            ("string", json!({ "type": "string" })),
            ("text", json!({ "type": "string" })),
            ("richtext", json!({ "type": "string" })),
            ("uid", json!({ "type": "string" })),
            ("email", json!({ "type": "string", "format": "email" })),
            ("integer", json!({ "type": "integer" })),
            ("biginteger", json!({ "type": "integer" })),
            ("decimal", json!({ "type": "number" })),
            ("float", json!({ "type": "number" })),
            ("number", json!({ "type": "number" })),
            ("boolean", json!({ "type": "boolean" })),
            ("enumeration", json!({ "type": "string", "enum": [] })),
            ("json", json!({ "type": "object" })),
            ("media", json!({ "type": "object" })),
            ("component", json!({ "type": "object" })),
            ("relation", json!({ "type": "object" })),
            ("mystery", json!({ "type": "object" })),
        ];
        for (kind, expected) in cases {
            assert_eq!(attribute_schema(&AttributeDefinition::new(kind)), expected, "type {kind}");
        }
    }

    #[test]
    fn enumeration_keeps_values_in_order() {
        let attribute = AttributeDefinition::new("enumeration").with_enum(["TRY", "USD", "EUR"]);
        assert_eq!(
            attribute_schema(&attribute),
            json!({ "type": "string", "enum": ["TRY", "USD", "EUR"] })
        );
    }

    #[test]
    fn base_name_strips_whitespace_and_capitalizes() {
        assert_eq!(base_name("property"), "Property");
        assert_eq!(base_name("real estate agent"), "Realestateagent");
        assert_eq!(base_name(" global\tsetting "), "Globalsetting");
        assert_eq!(base_name("élan"), "Élan");
        assert_eq!(base_name(""), "");
    }

    #[test]
    fn names_fall_back_through_metadata() {
        let bare = ContentTypeDescriptor::default();
        let names = ContentTypeNames::derive("api::location.location", &bare);
        assert_eq!(names.plural, "location");
        assert_eq!(names.display, "location");
        assert_eq!(names.singular, "location");
        assert_eq!(names.base, "Location");

        let with_collection = ContentTypeDescriptor {
            collection_name: Some("locations".to_string()),
            ..Default::default()
        };
        let names = ContentTypeNames::derive("api::location.location", &with_collection);
        assert_eq!(names.plural, "locations");
        assert_eq!(names.display, "locations");
        assert_eq!(names.base, "Locations");

        let with_display = ContentTypeDescriptor {
            info: ContentTypeInfo {
                display_name: Some("Location".to_string()),
                singular_name: Some(String::new()),
                plural_name: None,
            },
            collection_name: Some("locations".to_string()),
            ..Default::default()
        };
        let names = ContentTypeNames::derive("api::location.location", &with_display);
        assert_eq!(names.display, "Location");
        assert_eq!(names.singular, "Location");
    }

    #[test]
    fn end_to_end_property() {
        let mut doc = normalized();
        let report = SchemaSynthesizer::default()
            .synthesize(&mut doc, &registry(vec![("api::property.property", property())]));
        let v = doc.into_value();

        assert_eq!(
            v["components"]["schemas"]["PropertyAttributes"],
            json!({
                "type": "object",
                "properties": { "title": { "type": "string" }, "price": { "type": "number" } },
                "required": ["title"]
            })
        );
        assert_eq!(
            v["components"]["schemas"]["Property"]["properties"]["attributes"]["$ref"],
            "#/components/schemas/PropertyAttributes"
        );
        assert_eq!(
            v["components"]["schemas"]["PropertyListResponse"]["properties"]["data"]["items"]["$ref"],
            "#/components/schemas/Property"
        );
        assert_eq!(
            v["components"]["schemas"]["PropertyWriteRequest"]["required"],
            json!(["data"])
        );

        let collection = &v["paths"]["/api/properties"];
        assert!(collection.get("get").is_some());
        assert!(collection.get("post").is_some());
        assert!(collection["post"]["responses"].get("201").is_some());
        let item = &v["paths"]["/api/properties/{id}"];
        for method in ["get", "put", "delete"] {
            assert!(item.get(method).is_some(), "missing {method}");
            assert_eq!(item[method]["parameters"][0]["name"], "id");
            assert_eq!(item[method]["parameters"][0]["in"], "path");
            assert_eq!(item[method]["parameters"][0]["required"], true);
        }
        assert_eq!(
            item["put"]["requestBody"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/PropertyWriteRequest"
        );

        // No display name: the plural name doubles as the tag.
        assert_eq!(tag_count(&v, "properties"), 1);
        assert_eq!(collection["get"]["tags"], json!(["properties"]));
        assert!(collection["get"]["summary"].is_string());

        assert_eq!(report.content_types, 1);
        assert_eq!(report.schemas_added, 5);
        assert_eq!(report.operations_added, 5);
    }

    #[test]
    fn attributes_without_required_have_no_required_list() {
        let mut descriptor = ContentTypeDescriptor::default();
        descriptor
            .attributes
            .insert("siteName".to_string(), AttributeDefinition::new("string"));
        let schema = attributes_schema(&descriptor);
        assert!(schema.get("required").is_none());
    }

    #[test]
    fn display_name_is_the_tag() {
        let mut descriptor = property();
        descriptor.info.display_name = Some("Property".to_string());
        let mut doc = normalized();
        SchemaSynthesizer::default()
            .synthesize(&mut doc, &registry(vec![("api::property.property", descriptor)]));
        let v = doc.into_value();
        assert_eq!(tag_count(&v, "Property"), 1);
        assert_eq!(v["paths"]["/api/properties/{id}"]["delete"]["tags"], json!(["Property"]));
    }

    #[test]
    fn synthesis_twice_equals_once() {
        let reg = registry(vec![
            ("api::property.property", property()),
            ("api::agent.agent", ContentTypeDescriptor::default()),
        ]);
        let synthesizer = SchemaSynthesizer::default();

        let mut once = normalized();
        synthesizer.synthesize(&mut once, &reg);
        let mut twice = once.clone();
        let second = synthesizer.synthesize(&mut twice, &reg);

        assert_eq!(once, twice);
        assert_eq!(second.tags_added, 0);
        assert_eq!(second.schemas_added, 0);
        assert_eq!(second.operations_added, 0);
    }

    #[test]
    fn existing_operations_and_schemas_survive() {
        let mut doc = OpenApiDocument::from_map(
            json!({
                "paths": {
                    "/api/widgets": { "get": { "summary": "Hand written list", "operationId": "listWidgets" } }
                },
                "components": { "schemas": { "WidgetAttributes": { "type": "object", "description": "curated" } } },
                "tags": [{ "name": "widgets" }]
            })
            .as_object()
            .cloned()
            .unwrap_or_default(),
        );
        doc.normalize();

        let widget = ContentTypeDescriptor {
            info: ContentTypeInfo {
                display_name: None,
                singular_name: Some("widget".to_string()),
                plural_name: Some("widgets".to_string()),
            },
            ..Default::default()
        };
        let report = SchemaSynthesizer::default()
            .synthesize(&mut doc, &registry(vec![("api::widget.widget", widget)]));
        let v = doc.into_value();

        assert_eq!(v["paths"]["/api/widgets"]["get"]["operationId"], "listWidgets");
        assert_eq!(v["paths"]["/api/widgets"]["post"]["summary"], "Create widget");
        assert_eq!(v["components"]["schemas"]["WidgetAttributes"]["description"], "curated");
        assert!(v["components"]["schemas"].get("WidgetWriteRequest").is_some());
        assert_eq!(tag_count(&v, "widgets"), 1);
        assert_eq!(report.tags_added, 0);
        assert_eq!(report.schemas_added, 4);
        assert_eq!(report.operations_added, 4);
    }

    #[test]
    fn only_application_content_types_are_documented() {
        let reg = registry(vec![
            ("plugin::users-permissions.user", ContentTypeDescriptor::default()),
            ("admin::user", ContentTypeDescriptor::default()),
            ("plugin::upload.file", ContentTypeDescriptor::default()),
            ("api::global.global", ContentTypeDescriptor::default()),
        ]);
        let mut doc = normalized();
        let report = SchemaSynthesizer::default().synthesize(&mut doc, &reg);
        let v = doc.into_value();

        assert_eq!(report.content_types, 1);
        assert_eq!(v["paths"].as_object().map(|p| p.len()), Some(2));
        assert!(v["paths"].get("/api/global").is_some());
        assert!(v["components"]["schemas"].get("User").is_none());
    }

    #[test]
    fn colliding_base_names_are_reported_not_overwritten() {
        let named = |singular: &str, plural: &str| ContentTypeDescriptor {
            info: ContentTypeInfo {
                display_name: None,
                singular_name: Some(singular.to_string()),
                plural_name: Some(plural.to_string()),
            },
            ..Default::default()
        };
        let reg = registry(vec![
            ("api::real-estate.real-estate", named("real estate", "real-estates")),
            ("api::realestate.realestate", named("realestate", "realestates")),
        ]);
        let mut doc = normalized();
        let report = SchemaSynthesizer::default().synthesize(&mut doc, &reg);
        let v = doc.into_value();

        assert_eq!(
            report.collisions,
            vec![SchemaCollision {
                base_name: "Realestate".to_string(),
                kept: "api::real-estate.real-estate".to_string(),
                skipped: "api::realestate.realestate".to_string(),
            }]
        );
        assert!(v["paths"].get("/api/real-estates").is_some());
        assert!(v["paths"].get("/api/realestates").is_none());
        assert_eq!(tag_count(&v, "realestates"), 0);
    }

    #[test]
    fn uid_without_model_segment_still_names_a_path() {
        let mut doc = normalized();
        SchemaSynthesizer::default().synthesize(
            &mut doc,
            &registry(vec![("api::settings", ContentTypeDescriptor::default())]),
        );
        assert!(doc.has_operation("/api/settings", "get"));
        assert!(doc.has_schema("SettingsAttributes"));
    }
}
