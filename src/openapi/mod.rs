//! OpenAPI document loading and the flat `METHOD PATH` endpoint index.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::KnowledgeError;

pub mod example;

pub use example::ExampleSynthesizer;

/// HTTP methods the index keeps, in lookup priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Preference when a caller does not name a method.
    pub const PRIORITY: [Method; 5] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
    ];

    /// Case-insensitive parse; `None` for anything outside the five indexed verbs.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "PATCH" => Some(Self::Patch),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Methods that carry a request body.
    pub const fn is_mutating(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Query,
    Path,
    Header,
    Cookie,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "in")]
    pub location: Option<ParamLocation>,
    #[serde(default)]
    pub required: bool,
    pub description: Option<String>,
    #[serde(default)]
    pub schema: Value,
}

impl Parameter {
    pub fn schema_type(&self) -> Option<&str> {
        self.schema.get("type").and_then(Value::as_str)
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.schema.get("default").filter(|v| !v.is_null())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    pub description: Option<String>,
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

/// The parts of an OpenAPI operation object the formatters read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    #[serde(default)]
    pub responses: BTreeMap<String, Response>,
    pub security: Option<Value>,
}

impl Operation {
    /// JSON schema of the request body, if it is declared as `application/json`.
    pub fn json_request_schema(&self) -> Option<&Value> {
        self.request_body
            .as_ref()
            .and_then(|body| json_schema(&body.content))
    }

    /// JSON schema of the response for `status`.
    pub fn json_response_schema(&self, status: &str) -> Option<&Value> {
        self.responses
            .get(status)
            .and_then(|response| json_schema(&response.content))
    }

    /// Summary, else description.
    pub fn headline(&self) -> Option<&str> {
        self.summary.as_deref().or(self.description.as_deref())
    }
}

fn json_schema(content: &BTreeMap<String, MediaType>) -> Option<&Value> {
    content
        .get("application/json")
        .map(|media| &media.schema)
        .filter(|schema| !schema.is_null())
}

/// One indexed operation.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
    pub operation: Operation,
}

impl Endpoint {
    pub fn key(&self) -> String {
        endpoint_key(self.method, &self.path)
    }
}

pub fn endpoint_key(method: Method, path: &str) -> String {
    format!("{} {}", method.as_str(), path)
}

/// The parsed OpenAPI document, flattened once into an endpoint index.
#[derive(Debug, Default)]
pub struct OpenApiSpec {
    endpoints: Vec<Endpoint>,
    by_key: HashMap<String, usize>,
    methods_by_path: HashMap<String, Vec<Method>>,
    schemas: Map<String, Value>,
}

impl OpenApiSpec {
    /// Read and index the OpenAPI JSON document at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KnowledgeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| KnowledgeError::OpenApiRead {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Value =
            serde_json::from_str(&text).map_err(|source| KnowledgeError::OpenApiParse {
                path: path.to_path_buf(),
                source,
            })?;

        let spec = Self::from_value(&document);
        tracing::info!(
            path = %path.display(),
            endpoints = spec.endpoints.len(),
            schemas = spec.schemas.len(),
            "OpenAPI document indexed"
        );
        Ok(spec)
    }

    /// Index an already-parsed document. Operations that do not deserialize are skipped.
    pub fn from_value(document: &Value) -> Self {
        let mut spec = Self {
            schemas: document
                .pointer("/components/schemas")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
            ..Self::default()
        };

        let Some(paths) = document.get("paths").and_then(Value::as_object) else {
            tracing::warn!("OpenAPI document has no paths");
            return spec;
        };

        for (path, item) in paths {
            let Some(item) = item.as_object() else {
                continue;
            };
            for (key, raw) in item {
                let Some(method) = Method::parse(key) else {
                    continue;
                };
                match Operation::deserialize(raw) {
                    Ok(operation) => spec.insert(Endpoint {
                        method,
                        path: path.clone(),
                        operation,
                    }),
                    Err(error) => {
                        tracing::warn!(%error, method = %method, path, "skipping malformed operation")
                    }
                }
            }
        }

        spec
    }

    fn insert(&mut self, endpoint: Endpoint) {
        let key = endpoint.key();
        if self.by_key.contains_key(&key) {
            return;
        }
        self.methods_by_path
            .entry(endpoint.path.clone())
            .or_default()
            .push(endpoint.method);
        self.by_key.insert(key, self.endpoints.len());
        self.endpoints.push(endpoint);
    }

    /// Exact `METHOD PATH` lookup.
    pub fn endpoint(&self, method: Method, path: &str) -> Option<&Endpoint> {
        self.by_key
            .get(&endpoint_key(method, path))
            .map(|&idx| &self.endpoints[idx])
    }

    /// Methods declared for `path`, in document order.
    pub fn methods_for(&self, path: &str) -> &[Method] {
        self.methods_by_path
            .get(path)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Highest-priority method declared for `path`, using `priority` as the order.
    pub fn preferred_method(&self, path: &str, priority: &[Method]) -> Option<Method> {
        let declared = self.methods_for(path);
        priority.iter().copied().find(|m| declared.contains(m))
    }

    /// All endpoints in document order.
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Example builder that resolves `$ref`s against this document's component schemas.
    pub fn synthesizer(&self) -> ExampleSynthesizer<'_> {
        ExampleSynthesizer::new(&self.schemas)
    }
}
