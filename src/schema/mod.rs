//! Exact request/response schema report for one endpoint.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::catalog::{Cluster, cluster_for_endpoint};
use crate::error::KnowledgeError;
use crate::knowledge::ToolReply;
use crate::openapi::{Endpoint, Method, OpenApiSpec, ParamLocation, Parameter};

/// Suggestions collected for an unknown endpoint.
pub const MAX_SIMILAR: usize = 10;
/// Suggestions shown.
pub const SIMILAR_SHOWN: usize = 5;
/// Related endpoints listed under a schema.
pub const RELATED_SHOWN: usize = 5;

pub const EMPTY_ENDPOINT_MESSAGE: &str =
    "❌ Please provide an endpoint path (e.g., '/developer/v1/bills')";

/// Schema report for `endpoint`, or a not-found message with suggestions.
pub fn endpoint_schema(
    spec: &OpenApiSpec,
    endpoint: &str,
    method: Option<&str>,
    include_related: bool,
) -> ToolReply {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return ToolReply::InvalidInput(EMPTY_ENDPOINT_MESSAGE.to_string());
    }

    let requested = method.map(str::trim).filter(|m| !m.is_empty());
    let method = match requested.map(|m| (m, Method::parse(m))) {
        None => None,
        Some((_, Some(parsed))) => Some(parsed),
        Some((raw, None)) => {
            return ToolReply::InvalidInput(format!(
                "❌ Unsupported HTTP method `{raw}`. Use one of GET, POST, PUT, PATCH, DELETE."
            ));
        }
    };

    let Some(found) = find_endpoint(spec, endpoint, method) else {
        return ToolReply::NotFound(not_found_message(spec, endpoint, method));
    };

    match format_schema(spec, found, include_related) {
        Ok(text) => ToolReply::Answer(text),
        Err(error) => {
            tracing::error!(%error, endpoint, "schema rendering failed");
            ToolReply::Failed(format!("❌ Error retrieving schema: {error}"))
        }
    }
}

/// Exact path match. Without a method the best one by [`Method::PRIORITY`] is picked.
pub fn find_endpoint<'a>(
    spec: &'a OpenApiSpec,
    path: &str,
    method: Option<Method>,
) -> Option<&'a Endpoint> {
    let method = match method {
        Some(method) => method,
        None => spec.preferred_method(path, &Method::PRIORITY)?,
    };
    spec.endpoint(method, path)
}

/// `METHOD path` entries whose path contains any non-empty `/` segment of `query`.
pub fn similar_endpoints(spec: &OpenApiSpec, query: &str) -> Vec<String> {
    let query = query.to_lowercase();
    let parts: Vec<&str> = query.split('/').filter(|p| !p.is_empty()).collect();

    let similar: BTreeSet<String> = spec
        .endpoints()
        .filter(|e| {
            let path = e.path.to_lowercase();
            parts.iter().any(|part| path.contains(part))
        })
        .map(Endpoint::key)
        .collect();

    similar.into_iter().take(MAX_SIMILAR).collect()
}

fn not_found_message(spec: &OpenApiSpec, endpoint: &str, method: Option<Method>) -> String {
    let prefix = method.map(|m| format!("{m} ")).unwrap_or_default();
    let mut message = format!("❌ Endpoint not found: `{prefix}{endpoint}`");

    let similar = similar_endpoints(spec, endpoint);
    if !similar.is_empty() {
        message.push_str("\n\n**Similar endpoints available:**\n");
        let bullets: Vec<String> = similar
            .iter()
            .take(SIMILAR_SHOWN)
            .map(|s| format!("• {s}"))
            .collect();
        message.push_str(&bullets.join("\n"));
    }
    message
}

/// Other endpoints of `cluster` as `METHOD path`, GET preferred, skipping `exclude`.
pub fn related_endpoints(spec: &OpenApiSpec, cluster: &Cluster, exclude: &str) -> Vec<String> {
    cluster
        .endpoints
        .iter()
        .filter(|path| **path != exclude)
        .filter_map(|path| {
            let methods = spec.methods_for(path);
            let primary = if methods.contains(&Method::Get) {
                Method::Get
            } else {
                *methods.first()?
            };
            Some(format!("{primary} {path}"))
        })
        .collect()
}

pub fn format_schema(
    spec: &OpenApiSpec,
    endpoint: &Endpoint,
    include_related: bool,
) -> Result<String, KnowledgeError> {
    let operation = &endpoint.operation;
    let synth = spec.synthesizer();
    let cluster = cluster_for_endpoint(&endpoint.path);

    let mut parts = vec![
        format!("# 🎯 {} {}", endpoint.method, endpoint.path),
        format!(
            "**Operation**: {}",
            operation.operation_id.as_deref().unwrap_or("N/A")
        ),
        format!(
            "**Description**: {}",
            operation.headline().unwrap_or("No description")
        ),
    ];

    if let Some(cluster) = cluster.filter(|c| !c.warnings.is_empty()) {
        parts.push(String::new());
        parts.push("## ⚠️ Important Context".to_string());
        parts.extend(cluster.warnings.iter().map(|w| format!("• {w}")));
    }
    parts.push(String::new());

    if !operation.parameters.is_empty() {
        parts.push("## 📥 Request Parameters".to_string());
        for (location, heading) in [
            (ParamLocation::Query, "### Query Parameters"),
            (ParamLocation::Path, "### Path Parameters"),
            (ParamLocation::Header, "### Header Parameters"),
        ] {
            let params: Vec<&Parameter> = operation
                .parameters
                .iter()
                .filter(|p| p.location == Some(location))
                .collect();
            if params.is_empty() {
                continue;
            }
            parts.push(heading.to_string());
            for param in params {
                parts.push(parameter_line(param));
                if let Some(description) = param.description.as_deref().filter(|d| !d.is_empty()) {
                    parts.push(format!("  {description}"));
                }
            }
            parts.push(String::new());
        }
    }

    if let Some(body) = operation
        .request_body
        .as_ref()
        .filter(|_| endpoint.method.is_mutating())
    {
        parts.push("## 📤 Request Body".to_string());
        parts.push(format!(
            "**Required**: {}",
            if body.required { "Yes" } else { "No" }
        ));
        if let Some(media) = body.content.get("application/json") {
            parts.push("**Content-Type**: `application/json`".to_string());
            if let Some(example) = synth.example(&media.schema, false) {
                parts.push("**Example**:".to_string());
                parts.push(json_block(&example)?);
            }
        }
        parts.push(String::new());
    }

    if operation.responses.contains_key("200") {
        parts.push("## 📤 Response Schema (200 OK)".to_string());
        if let Some(schema) = operation.json_response_schema("200") {
            if let Some(example) = synth.example(schema, true) {
                parts.push("**Response Structure**:".to_string());
                parts.push(json_block(&example)?);
            }
        }
        parts.push(String::new());
    }

    if let Some(cluster) = cluster.filter(|_| include_related) {
        let related = related_endpoints(spec, cluster, &endpoint.path);
        if !related.is_empty() {
            parts.push("## 🔗 Related Endpoints".to_string());
            parts.push(format!("**Use Case**: {}", cluster.id.label()));
            parts.extend(related.iter().take(RELATED_SHOWN).map(|r| format!("• `{r}`")));
            parts.push(String::new());
        }
    }

    Ok(parts.join("\n"))
}

fn parameter_line(param: &Parameter) -> String {
    if param.location == Some(ParamLocation::Path) {
        return format!(
            "• **`{}`**: `{}` - **required**",
            param.name,
            param.schema_type().unwrap_or("string")
        );
    }

    let required = if param.required { "**required**" } else { "optional" };
    let default = param
        .default_value()
        .map(|v| format!(" (default: {})", display_value(v)))
        .unwrap_or_default();
    format!(
        "• **`{}`**: `{}` - {required}{default}",
        param.name,
        param.schema_type().unwrap_or("unknown")
    )
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_block(value: &Value) -> Result<String, KnowledgeError> {
    Ok(format!("```json\n{}\n```", serde_json::to_string_pretty(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec() -> OpenApiSpec {
        OpenApiSpec::from_value(&json!({
            "paths": {
                "/developer/v1/bills": {
                    "post": {
                        "operationId": "post_bill",
                        "summary": "Create a bill",
                        "requestBody": {
                            "required": true,
                            "content": { "application/json": { "schema": {
                                "type": "object",
                                "properties": { "vendor_id": { "type": "string" }, "amount": { "type": "number" } }
                            } } }
                        }
                    },
                    "get": {
                        "operationId": "list_bills",
                        "description": "List bills",
                        "parameters": [
                            { "name": "page_size", "in": "query", "required": false, "description": "Page size", "schema": { "type": "integer", "default": 20 } },
                            { "name": "X-Request-Id", "in": "header", "required": true, "schema": { "type": "string" } }
                        ],
                        "responses": { "200": { "content": { "application/json": { "schema": {
                            "type": "object",
                            "properties": { "id": { "type": "string" }, "amount": { "type": "number" }, "is_active": { "type": "boolean" } }
                        } } } } }
                    }
                },
                "/developer/v1/bills/{bill_id}": {
                    "get": {
                        "parameters": [ { "name": "bill_id", "in": "path", "schema": { "type": "string" } } ]
                    }
                },
                "/developer/v1/vendors": { "post": {}, "delete": {} }
            }
        }))
    }

    #[test]
    fn omitted_method_prefers_get() {
        let spec = spec();
        let found = find_endpoint(&spec, "/developer/v1/bills", None).unwrap();
        assert_eq!(found.method, Method::Get);
        let post = find_endpoint(&spec, "/developer/v1/bills", Some(Method::Post)).unwrap();
        assert_eq!(post.operation.operation_id.as_deref(), Some("post_bill"));
    }

    #[test]
    fn get_report_lists_parameters_and_wrapped_response() {
        let spec = spec();
        let reply = endpoint_schema(&spec, "/developer/v1/bills", None, true);
        let ToolReply::Answer(text) = &reply else {
            panic!("expected an answer, got {reply:?}");
        };

        assert!(text.starts_with("# 🎯 GET /developer/v1/bills\n**Operation**: list_bills\n**Description**: List bills"));
        assert!(text.contains("## ⚠️ Important Context\n• In Ramp's API, payments"));
        assert!(text.contains("• **`page_size`**: `integer` - optional (default: 20)\n  Page size"));
        assert!(text.contains("### Header Parameters\n• **`X-Request-Id`**: `string` - **required**"));
        assert!(!text.contains("## 📤 Request Body"));
        assert!(text.contains("\"is_active\": true"));
        assert!(text.contains("\"next\": \"https://api.ramp.com/developer/v1/endpoint?start=cursor\""));
        assert!(text.contains("## 🔗 Related Endpoints\n**Use Case**: Ap Workflow\n• `POST /developer/v1/vendors`"));
    }

    #[test]
    fn post_report_has_request_body_example() {
        let spec = spec();
        let ToolReply::Answer(text) = endpoint_schema(&spec, "/developer/v1/bills", Some("post"), false)
        else {
            panic!("expected an answer");
        };
        assert!(text.contains("## 📤 Request Body\n**Required**: Yes\n**Content-Type**: `application/json`\n**Example**:"));
        assert!(text.contains("\"vendor_id\": \"uuid-here\""));
        assert!(!text.contains("Related Endpoints"));
    }

    #[test]
    fn path_parameters_are_always_required() {
        let spec = spec();
        let found = find_endpoint(&spec, "/developer/v1/bills/{bill_id}", None).unwrap();
        let text = format_schema(&spec, found, false).unwrap();
        assert!(text.contains("### Path Parameters\n• **`bill_id`**: `string` - **required**"));
        assert!(text.contains("**Operation**: N/A"));
        assert!(text.contains("**Description**: No description"));
    }

    #[test]
    fn unknown_endpoint_lists_similar() {
        let spec = spec();
        let reply = endpoint_schema(&spec, "/developer/v1/bill", Some("DELETE"), true);
        let ToolReply::NotFound(text) = &reply else {
            panic!("expected not found, got {reply:?}");
        };
        assert!(text.starts_with("❌ Endpoint not found: `DELETE /developer/v1/bill`"));
        assert!(text.contains("**Similar endpoints available:**\n• DELETE /developer/v1/vendors"));
        assert_eq!(text.matches("\n• ").count(), SIMILAR_SHOWN);
    }

    #[test]
    fn unrelated_endpoint_has_no_suggestions() {
        let spec = spec();
        assert!(similar_endpoints(&spec, "/expenses/zzz").is_empty());

        let reply = endpoint_schema(&spec, "/expenses/zzz", None, true);
        assert_eq!(
            reply,
            ToolReply::NotFound("❌ Endpoint not found: `/expenses/zzz`".to_string())
        );
        assert!(!reply.text().contains("Similar endpoints"));
    }

    #[test]
    fn bad_input_is_rejected() {
        let spec = spec();
        assert!(matches!(
            endpoint_schema(&spec, "  ", None, true),
            ToolReply::InvalidInput(_)
        ));
        assert!(matches!(
            endpoint_schema(&spec, "/developer/v1/bills", Some("TRACE"), true),
            ToolReply::InvalidInput(_)
        ));
        assert!(endpoint_schema(&spec, "/developer/v1/bills", Some(""), true).is_answer());
    }
}
