//! Placeholder JSON built from OpenAPI schema shapes.

use serde_json::{Map, Value, json};

/// `$ref` chains longer than this are left unresolved.
pub const MAX_REF_DEPTH: usize = 8;

const LOCAL_SCHEMA_PREFIX: &str = "#/components/schemas/";

pub const PAGE_NEXT_PLACEHOLDER: &str = "https://api.ramp.com/developer/v1/endpoint?start=cursor";

/// Fields shown in the short request sketch besides the required ones.
const SKETCH_OPTIONAL_FIELDS: usize = 3;

const CARD_REQUEST_SKETCH: &str =
    "{\n  \"display_name\": \"Marketing Team Card\",\n  \"spend_limit_id\": \"uuid-here\"\n}";
const SPEND_PROGRAM_REQUEST_SKETCH: &str = "{\n  \"display_name\": \"Marketing Budget\",\n  \"spending_restrictions\": {},\n  \"icon\": \"credit_card\"\n}";

/// Builds examples from schemas, resolving local `$ref`s against `components.schemas`.
#[derive(Debug, Clone, Copy)]
pub struct ExampleSynthesizer<'a> {
    schemas: &'a Map<String, Value>,
}

impl<'a> ExampleSynthesizer<'a> {
    pub fn new(schemas: &'a Map<String, Value>) -> Self {
        Self { schemas }
    }

    /// Follow `#/components/schemas/..` pointers until a concrete schema is reached.
    pub fn resolve(&self, schema: &'a Value) -> &'a Value {
        let mut current = schema;
        for _ in 0..MAX_REF_DEPTH {
            let Some(target) = current
                .get("$ref")
                .and_then(Value::as_str)
                .and_then(|r| r.strip_prefix(LOCAL_SCHEMA_PREFIX))
                .and_then(|name| self.schemas.get(name))
            else {
                return current;
            };
            current = target;
        }
        current
    }

    /// Example object for an object schema; `None` for anything else.
    ///
    /// Response examples that are not already paginated (no `data` or `page`
    /// property) are wrapped in the standard `{data, page}` envelope.
    pub fn example(&self, schema: &'a Value, is_response: bool) -> Option<Value> {
        let schema = self.resolve(schema);
        if schema.get("type").and_then(Value::as_str) != Some("object") {
            return None;
        }

        let properties = schema.get("properties").and_then(Value::as_object);
        let mut example = Map::new();
        for (name, prop) in properties.into_iter().flatten() {
            let prop = self.resolve(prop);
            example.insert(name.clone(), property_placeholder(name, declared_type(prop)));
        }

        let paginated = properties.is_some_and(|p| p.contains_key("data") || p.contains_key("page"));
        if is_response && !paginated {
            let data = if example.is_empty() {
                json!({ "id": "uuid-here" })
            } else {
                Value::Object(example)
            };
            return Some(json!({
                "data": data,
                "page": { "next": PAGE_NEXT_PLACEHOLDER, "prev": null },
            }));
        }

        (!example.is_empty()).then_some(Value::Object(example))
    }

    /// Short request body sketch: every required field plus the first few others.
    ///
    /// Only string, integer and boolean fields are sketched. Card and spend-program
    /// creation fall back to a fixed sketch when the schema lists no properties.
    pub fn request_sketch(&self, path: &str, schema: &'a Value) -> Option<String> {
        let schema = self.resolve(schema);
        let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
            return canned_request_sketch(path).map(str::to_string);
        };
        let required = required_fields(schema);

        let mut sketch = Map::new();
        for (name, prop) in properties {
            if !required.contains(&name.as_str()) && sketch.len() >= SKETCH_OPTIONAL_FIELDS {
                continue;
            }
            let value = match self.resolve(prop).get("type").and_then(Value::as_str) {
                Some("string") if name.contains("id") => json!("uuid-here"),
                Some("string") if name.contains("name") => json!(format!("My {}", name.replace('_', " "))),
                Some("string") => json!("example_value"),
                Some("integer") => json!(100),
                Some("boolean") => json!(true),
                _ => continue,
            };
            sketch.insert(name.clone(), value);
        }

        if sketch.is_empty() {
            return None;
        }
        serde_json::to_string_pretty(&Value::Object(sketch)).ok()
    }

    /// Required and optional property names of a body schema, in declaration order.
    pub fn body_fields(&self, schema: &'a Value) -> (Vec<String>, Vec<String>) {
        let schema = self.resolve(schema);
        let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
            return (Vec::new(), Vec::new());
        };
        let required = required_fields(schema);

        let required_present = required
            .iter()
            .filter(|name| properties.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        let optional = properties
            .keys()
            .filter(|name| !required.contains(&name.as_str()))
            .cloned()
            .collect();

        (required_present, optional)
    }
}

fn canned_request_sketch(path: &str) -> Option<&'static str> {
    if path.contains("/cards") {
        Some(CARD_REQUEST_SKETCH)
    } else if path.contains("/spend-programs") {
        Some(SPEND_PROGRAM_REQUEST_SKETCH)
    } else {
        None
    }
}

fn required_fields(schema: &Value) -> Vec<&str> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Declared type of a property. A missing type reads as `string`; for a type list the
/// first non-null entry is used.
fn declared_type(prop: &Value) -> &str {
    match prop.get("type") {
        None => "string",
        Some(Value::String(t)) => t,
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null")
            .unwrap_or("string"),
        Some(_) => "",
    }
}

fn property_placeholder(name: &str, kind: &str) -> Value {
    match kind {
        "string" if name == "id" || name.ends_with("_id") => json!("uuid-here"),
        "string" if name.contains("date") || name.contains("time") => json!("2024-01-01T00:00:00Z"),
        "string" if name == "email" => json!("user@company.com"),
        "string" => json!("string"),
        "integer" => json!(123),
        "number" => json!(123.45),
        "boolean" => json!(true),
        "array" => json!(["item1", "item2"]),
        _ => json!("value"),
    }
}
