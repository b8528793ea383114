//! The "Relevant API Endpoints" block of a search answer.

use crate::catalog::{Cluster, endpoint_context, endpoint_workflow};
use crate::openapi::{Method, OpenApiSpec};

/// Cluster endpoints rendered per answer.
pub const MAX_CLUSTER_ENDPOINTS: usize = 15;

/// Which method a detail block describes when a path declares several.
pub const DETAIL_METHOD_PRIORITY: [Method; 5] = [
    Method::Post,
    Method::Get,
    Method::Put,
    Method::Patch,
    Method::Delete,
];

pub const CURL_BASE_URL: &str = "https://demo-api.ramp.com";

const PURPOSE_MAX_CHARS: usize = 200;
const OPTIONAL_FIELDS_SHOWN: usize = 5;

const GENERIC_RESPONSE_EXAMPLE: &str = "{\n  \"id\": \"uuid-here\",\n  \"created_at\": \"2024-01-01T00:00:00Z\",\n  \"status\": \"active\"\n}";

/// Detail blocks for the cluster's endpoints that exist in the OpenAPI document.
pub fn cluster_endpoints(spec: &OpenApiSpec, cluster: &Cluster) -> Option<String> {
    let blocks: Vec<String> = cluster
        .endpoints
        .iter()
        .take(MAX_CLUSTER_ENDPOINTS)
        .filter_map(|path| endpoint_details(spec, path))
        .collect();

    (!blocks.is_empty()).then(|| blocks.join("\n\n"))
}

/// Everything a client needs to start calling `path`, or `None` if it is not indexed.
pub fn endpoint_details(spec: &OpenApiSpec, path: &str) -> Option<String> {
    let methods = spec.methods_for(path);
    let primary = spec.preferred_method(path, &DETAIL_METHOD_PRIORITY)?;
    let operation = &spec.endpoint(primary, path)?.operation;

    let verbs: Vec<&str> = methods.iter().map(Method::as_str).collect();
    let mut details = vec![format!("### `{} {}`", verbs.join(" | "), path)];

    if let Some(context) = endpoint_context(path) {
        details.push(format!("**Ramp Context**: {context}"));
    }

    match (operation.summary.as_deref(), operation.description.as_deref()) {
        (Some(summary), _) if !summary.is_empty() => details.push(format!("**Purpose**: {summary}")),
        (_, Some(description)) if !description.is_empty() => {
            let cut: String = description.chars().take(PURPOSE_MAX_CHARS).collect();
            details.push(format!("**Purpose**: {cut}..."));
        }
        _ => {}
    }

    let secured = methods
        .iter()
        .filter_map(|m| spec.endpoint(*m, path))
        .any(|e| e.operation.security.is_some());
    if secured {
        details.push("**Authentication**: `Authorization: Bearer your_access_token`".to_string());
    }

    if primary.is_mutating() {
        let json_body = operation
            .request_body
            .as_ref()
            .and_then(|body| body.content.get("application/json"));
        if let Some(media) = json_body {
            let synth = spec.synthesizer();
            if let Some(sketch) = synth.request_sketch(path, &media.schema) {
                details.push("**Example Request**:".to_string());
                details.push(format!("```json\n{sketch}\n```"));
            }

            let (required, optional) = synth.body_fields(&media.schema);
            if !required.is_empty() {
                details.push(format!("**Required**: {}", required.join(", ")));
            }
            if !optional.is_empty() {
                let shown: Vec<&str> = optional
                    .iter()
                    .take(OPTIONAL_FIELDS_SHOWN)
                    .map(String::as_str)
                    .collect();
                let more = if optional.len() > OPTIONAL_FIELDS_SHOWN { "..." } else { "" };
                details.push(format!("**Optional**: {}{more}", shown.join(", ")));
            }
        }
    }

    if let Some(curl) = curl_example(primary, path) {
        details.push("**cURL Example**:".to_string());
        details.push(format!("```bash\n{curl}\n```"));
    }

    let success = ["201", "200"]
        .into_iter()
        .find_map(|code| operation.responses.get(code).map(|r| (code, r)));
    if let Some((code, response)) = success {
        details.push(format!("**Success Response**: {code}"));
        if response.content.contains_key("application/json") {
            details.push("**Example Response**:".to_string());
            details.push(format!("```json\n{GENERIC_RESPONSE_EXAMPLE}\n```"));
        }
    }

    if let Some(workflow) = endpoint_workflow(path) {
        details.push(format!("**Workflow**: {workflow}"));
    }

    Some(details.join("\n"))
}

/// cURL snippet against the demo environment. Only GET and POST get one.
pub fn curl_example(method: Method, path: &str) -> Option<String> {
    let auth = "-H \"Authorization: Bearer your_access_token\"";
    match method {
        Method::Get => Some(format!("curl -X GET {CURL_BASE_URL}{path} \\\n  {auth}")),
        Method::Post => {
            let body = if path.contains("/cards") {
                " \\\n  -d '{\"display_name\": \"Marketing Team Card\", \"spend_limit_id\": \"uuid-here\"}'"
            } else if path.contains("/spend-programs") {
                " \\\n  -d '{\"display_name\": \"Marketing Budget\", \"icon\": \"credit_card\"}'"
            } else {
                ""
            };
            Some(format!(
                "curl -X POST {CURL_BASE_URL}{path} \\\n  {auth} \\\n  -H \"Content-Type: application/json\"{body}"
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec() -> OpenApiSpec {
        OpenApiSpec::from_value(&json!({
            "paths": {
                "/developer/v1/limits": {
                    "get": { "summary": "List limits", "security": [{ "oauth2": ["limits:read"] }] },
                    "post": {
                        "description": "Create a spend limit",
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "required": ["display_name", "user_id"],
                                        "properties": {
                                            "display_name": { "type": "string" },
                                            "user_id": { "type": "string" },
                                            "a": {}, "b": {}, "c": {}, "d": {}, "e": {}, "f": {}
                                        }
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": { "content": { "application/json": { "schema": {} } } }
                        }
                    }
                },
                "/developer/v1/receipts": {
                    "delete": { "summary": "Delete receipt" }
                }
            }
        }))
    }

    #[test]
    fn details_prefer_post_and_list_all_methods() {
        let block = endpoint_details(&spec(), "/developer/v1/limits").unwrap();
        assert!(block.starts_with("### `GET | POST /developer/v1/limits`"));
        assert!(block.contains("**Ramp Context**: In Ramp's API, 'limits'"));
        assert!(block.contains("**Purpose**: Create a spend limit..."));
        assert!(block.contains("**Authentication**: `Authorization: Bearer your_access_token`"));
        assert!(block.contains("\"display_name\": \"My display name\""));
        assert!(block.contains("**Required**: display_name, user_id"));
        assert!(block.contains("**Optional**: a, b, c, d, e..."));
        assert!(block.contains("curl -X POST https://demo-api.ramp.com/developer/v1/limits"));
        assert!(block.contains("**Success Response**: 201"));
        assert!(block.contains("**Workflow**: 1) Create limit"));
    }

    #[test]
    fn unknown_paths_have_no_details() {
        assert!(endpoint_details(&spec(), "/developer/v1/nothing").is_none());
    }

    #[test]
    fn delete_only_paths_have_no_curl() {
        let block = endpoint_details(&spec(), "/developer/v1/receipts").unwrap();
        assert!(block.contains("**Purpose**: Delete receipt"));
        assert!(!block.contains("curl"));
        assert!(!block.contains("**Authentication**"));
    }

    #[test]
    fn curl_for_cards_carries_a_body() {
        let curl = curl_example(Method::Post, "/developer/v1/cards").unwrap();
        assert!(curl.ends_with("-d '{\"display_name\": \"Marketing Team Card\", \"spend_limit_id\": \"uuid-here\"}'"));
        assert!(curl_example(Method::Patch, "/developer/v1/cards").is_none());
    }
}
