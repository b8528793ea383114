//! # Ramp Developer MCP Server
//!
//! A Model Context Protocol (MCP) server that answers questions about the Ramp
//! developer API from a local snapshot of its guides and OpenAPI document.
//!
//! ## Features
//!
//! - Classify a natural-language query into an API use-case cluster
//! - Search the guides and return the most relevant sections with endpoint details
//! - Step-by-step workflow guidance per use case
//! - Exact endpoint schemas with synthesized request and response examples
//! - Forward feedback to Ramp
//!
//! ## Modules
//!
//! - `server`: MCP server implementation and tools
//! - `knowledge`: the loaded snapshot and its entry points
//! - `storage`: guide loading and lookup
//! - `document`: guide parsing and section extraction
//! - `openapi`: endpoint index and example synthesis

/// Server implementation and MCP tools
pub mod server;
/// Loaded snapshot and tool entry points
pub mod knowledge;
/// Guide storage and retrieval
pub mod storage;
/// Guide parsing and section extraction
pub mod document;
/// OpenAPI endpoint index
pub mod openapi;
/// Static use-case catalog
pub mod catalog;
/// Query normalization
pub mod query;
/// Intent classification
pub mod intent;
/// Workflow guidance formatter
pub mod guidance;
/// Relevance ranking and search answers
pub mod search;
/// Endpoint schema reports
pub mod schema;
/// Feedback submission
pub mod feedback;
/// Error types
pub mod error;
