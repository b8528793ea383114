use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use rmcp::{
    Error as McpError, RoleServer, ServerHandler, model::*, schemars,
    service::RequestContext, tool,
};

use crate::document::Guide;
use crate::feedback::FeedbackClient;
use crate::knowledge::{KnowledgeBase, ToolReply};

/// URI scheme under which guides are listed as resources.
pub const GUIDE_URI_PREFIX: &str = "guide://";

pub const PONG: &str = "Pong! Ramp Developer MCP server is running";

#[derive(Clone)]
pub struct RampDocs {
    pub knowledge: Arc<KnowledgeBase>,
    pub feedback: FeedbackClient,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchDocumentationRequest {
    #[schemars(description = "Your question or what you're trying to accomplish in natural language, e.g. 'building an integration', 'OAuth setup', 'bill payments'")]
    pub query: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct WorkflowGuidanceRequest {
    #[schemars(description = "The use case to get step-by-step guidance for, e.g. 'issue virtual cards', 'sync bills to QuickBooks'")]
    pub use_case: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EndpointSchemaRequest {
    #[schemars(description = "The endpoint path, e.g. '/developer/v1/bills' or '/developer/v1/limits'")]
    pub endpoint: String,

    #[schemars(description = "HTTP method (GET, POST, PUT, PATCH, DELETE). If omitted, the most relevant method is shown")]
    pub method: Option<String>,

    #[schemars(description = "Include related endpoints for the same use case (default true)")]
    pub include_related: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SubmitFeedbackRequest {
    #[schemars(description = "Feedback about the MCP tools, API documentation, or issues encountered. Must be 10-1000 characters")]
    pub feedback: String,

    #[schemars(description = "Optional: which tool this feedback relates to, e.g. 'search_documentation'")]
    pub tool_name: Option<String>,
}

#[tool(tool_box)]
impl RampDocs {
    pub fn new(knowledge: Arc<KnowledgeBase>, feedback: FeedbackClient) -> Self {
        Self {
            knowledge,
            feedback,
        }
    }

    fn guide_resource(&self, guide: &Guide) -> Resource {
        RawResource::new(format!("{GUIDE_URI_PREFIX}{}", guide.identifier), guide.title.clone()).no_annotation()
    }

    #[tool(description = "Check that the Ramp developer MCP server is running")]
    async fn ping(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(PONG)]))
    }

    #[tool(description = "Search the Ramp developer documentation. Detects the intent of a natural-language query and returns the most relevant guide sections, important context and related API endpoints")]
    async fn search_documentation(
        &self,
        #[tool(aggr)] SearchDocumentationRequest { query }: SearchDocumentationRequest,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(query, "search_documentation");
        Ok(tool_result(self.knowledge.search_documentation(&query)))
    }

    #[tool(description = "Get workflow guidance for a use case, extracted from the matching Ramp guide")]
    async fn get_workflow_guidance(
        &self,
        #[tool(aggr)] WorkflowGuidanceRequest { use_case }: WorkflowGuidanceRequest,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(use_case, "get_workflow_guidance");
        Ok(tool_result(self.knowledge.get_workflow_guidance(&use_case)))
    }

    #[tool(description = "Get the exact OpenAPI request/response schema for an endpoint, with synthesized examples and related endpoints")]
    async fn get_endpoint_schema(
        &self,
        #[tool(aggr)] EndpointSchemaRequest { endpoint, method, include_related }: EndpointSchemaRequest,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(endpoint, method = method.as_deref(), "get_endpoint_schema");
        Ok(tool_result(self.knowledge.get_endpoint_schema(
            &endpoint,
            method.as_deref(),
            include_related.unwrap_or(true),
        )))
    }

    #[tool(description = "Submit feedback to Ramp about the MCP server interface, tools, or problems you encounter")]
    async fn submit_feedback(
        &self,
        #[tool(aggr)] SubmitFeedbackRequest { feedback, tool_name }: SubmitFeedbackRequest,
    ) -> Result<CallToolResult, McpError> {
        let reply = self.feedback.submit(&feedback, tool_name.as_deref()).await;
        Ok(tool_result(reply))
    }
}

/// Only internal failures are flagged as tool errors; the other outcomes are answers
/// the caller should read.
pub fn tool_result(reply: ToolReply) -> CallToolResult {
    match reply {
        ToolReply::Failed(text) => CallToolResult::error(vec![Content::text(text)]),
        other => CallToolResult::success(vec![Content::text(other.into_text())]),
    }
}

#[tool(tool_box)]
impl ServerHandler for RampDocs {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("This server answers questions about the Ramp developer API. Use 'search_documentation' to find relevant guide content, 'get_workflow_guidance' for a step-by-step guide to a use case, 'get_endpoint_schema' for exact request and response shapes of an endpoint, and 'submit_feedback' to report problems. Guides are also listed as resources.".to_string()),
        }
    }

    async fn list_resources(
        &self,
        _request: PaginatedRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: self
                .knowledge
                .store()
                .guides()
                .map(|guide| self.guide_resource(guide))
                .collect(),
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let guide = uri
            .strip_prefix(GUIDE_URI_PREFIX)
            .and_then(|identifier| self.knowledge.store().get(identifier));

        match guide {
            Some(guide) => Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(guide.raw.clone(), uri)],
            }),
            None => Err(McpError::resource_not_found(
                "resource_not_found",
                Some(json!({
                    "uri": uri
                })),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_failures_are_tool_errors() {
        let failed = tool_result(ToolReply::Failed("boom".to_string()));
        assert_eq!(failed.is_error, Some(true));

        let not_found = tool_result(ToolReply::NotFound("missing".to_string()));
        assert_eq!(not_found.is_error, Some(false));
        assert_eq!(not_found.content.len(), 1);
    }
}
