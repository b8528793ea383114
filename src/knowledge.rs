//! The loaded snapshot and the three read-only entry points served over MCP.

use std::path::Path;

use crate::catalog::Cluster;
use crate::error::KnowledgeError;
use crate::guidance;
use crate::intent::IntentClassifier;
use crate::openapi::OpenApiSpec;
use crate::schema;
use crate::search;
use crate::storage::{DocumentStore, LoadReport};

/// Outcome of a tool call. Every variant carries the text shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolReply {
    Answer(String),
    NotFound(String),
    InvalidInput(String),
    Failed(String),
}

impl ToolReply {
    pub fn text(&self) -> &str {
        match self {
            Self::Answer(text)
            | Self::NotFound(text)
            | Self::InvalidInput(text)
            | Self::Failed(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Answer(text)
            | Self::NotFound(text)
            | Self::InvalidInput(text)
            | Self::Failed(text) => text,
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, Self::Answer(_))
    }
}

/// Guides plus the indexed OpenAPI document. Immutable once built.
#[derive(Debug)]
pub struct KnowledgeBase {
    store: DocumentStore,
    openapi: OpenApiSpec,
    classifier: IntentClassifier<'static>,
}

impl KnowledgeBase {
    pub fn new(store: DocumentStore, openapi: OpenApiSpec) -> Self {
        Self {
            store,
            openapi,
            classifier: IntentClassifier::default(),
        }
    }

    /// Load guides from `guides_root` and the OpenAPI document from `openapi_path`.
    pub fn load(
        guides_root: impl AsRef<Path>,
        openapi_path: impl AsRef<Path>,
    ) -> Result<(Self, LoadReport), KnowledgeError> {
        let (store, report) = DocumentStore::load(guides_root)?;
        let openapi = OpenApiSpec::load(openapi_path)?;
        Ok((Self::new(store, openapi), report))
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn openapi(&self) -> &OpenApiSpec {
        &self.openapi
    }

    pub fn detect_intent(&self, query: &str) -> Option<&'static Cluster> {
        self.classifier.detect(query)
    }

    pub fn get_workflow_guidance(&self, use_case: &str) -> ToolReply {
        let use_case = use_case.trim();
        if use_case.is_empty() {
            return ToolReply::InvalidInput(guidance::EMPTY_USE_CASE_MESSAGE.to_string());
        }

        ToolReply::Answer(guidance::workflow_guidance(
            &self.store,
            &self.classifier,
            use_case,
        ))
    }

    pub fn search_documentation(&self, query: &str) -> ToolReply {
        let query = query.trim();
        if query.is_empty() {
            return ToolReply::InvalidInput(search::EMPTY_QUERY_MESSAGE.to_string());
        }

        let cluster = self.detect_intent(query);
        let ranked = search::rank_guides(&self.store, query, cluster);
        let Some(top) = ranked.first() else {
            tracing::debug!(query, "no guide matched");
            return ToolReply::NotFound(search::no_results_message(query));
        };

        tracing::debug!(
            query,
            guide = %top.guide.identifier,
            score = top.score,
            candidates = ranked.len(),
            "search ranked"
        );
        ToolReply::Answer(search::format_search(&self.openapi, top, cluster, query))
    }

    pub fn get_endpoint_schema(
        &self,
        endpoint: &str,
        method: Option<&str>,
        include_related: bool,
    ) -> ToolReply {
        schema::endpoint_schema(&self.openapi, endpoint, method, include_related)
    }
}
