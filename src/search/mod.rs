//! Relevance ranking over all guides and the search answer formatter.

use std::collections::HashSet;

use crate::catalog::{Cluster, KEYWORD_BOOSTS, SEARCH_HEADERS, guide_title, search_extra_headers};
use crate::document::section::{clean_mdx, extract_substantial};
use crate::document::{Guide, Section, split_sections};
use crate::openapi::OpenApiSpec;
use crate::storage::DocumentStore;

pub mod endpoints;

// Ranker weights. Tunable.
/// Per query word found in the guide identifier.
pub const FILENAME_WORD_WEIGHT: f64 = 0.3;
/// Per distinct word shared between query and guide text.
pub const SHARED_WORD_WEIGHT: f64 = 0.1;
/// Per keyword-boost table hit.
pub const KEYWORD_BOOST_WEIGHT: f64 = 0.5;
/// Guides outside the detected cluster need a score above this.
pub const MIN_RELEVANCE: f64 = 0.1;

pub const EMPTY_QUERY_MESSAGE: &str =
    "❌ Please provide a search query describing what you're looking for.";

/// A guide with its relevance score.
#[derive(Debug, Clone, Copy)]
pub struct RankedGuide<'a> {
    pub guide: &'a Guide,
    pub score: f64,
}

/// How relevant `guide` is to the raw query.
pub fn relevance(query: &str, guide: &Guide) -> f64 {
    let query = query.to_lowercase();
    let identifier = guide.identifier.to_lowercase();
    let mut score = 0.0;

    for word in query.split_whitespace() {
        if identifier.contains(word) {
            score += FILENAME_WORD_WEIGHT;
        }
    }

    let query_words: HashSet<&str> = query.split_whitespace().collect();
    let content = guide.content.to_lowercase();
    let content_words: HashSet<&str> = content.split_whitespace().collect();
    score += query_words.intersection(&content_words).count() as f64 * SHARED_WORD_WEIGHT;

    for (keyword, boosted) in KEYWORD_BOOSTS {
        if !query.contains(keyword) {
            continue;
        }
        for file in *boosted {
            if identifier.contains(file) {
                score += KEYWORD_BOOST_WEIGHT;
            }
        }
    }

    score
}

/// Rank every guide for `query`.
///
/// Guides of the detected cluster are always included; any other guide must score
/// above [`MIN_RELEVANCE`]. Equal scores keep insertion order.
pub fn rank_guides<'a>(
    store: &'a DocumentStore,
    query: &str,
    cluster: Option<&'static Cluster>,
) -> Vec<RankedGuide<'a>> {
    let mut ranked = Vec::new();
    let mut claimed: Vec<&str> = Vec::new();

    if let Some(cluster) = cluster {
        for name in cluster.guides {
            if let Some(guide) = store.find(name) {
                claimed.push(name);
                ranked.push(RankedGuide {
                    guide,
                    score: relevance(query, guide),
                });
            }
        }
    }

    for guide in store.guides() {
        if claimed.iter().any(|name| guide.identifier.contains(name)) {
            continue;
        }
        let score = relevance(query, guide);
        if score > MIN_RELEVANCE {
            ranked.push(RankedGuide { guide, score });
        }
    }

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Sections of the top guide worth returning, in header-list order.
///
/// Falls back to every `## ` block when none of the known headers has enough text.
pub fn key_sections(raw: &str, cluster: Option<&Cluster>) -> Vec<Section> {
    let headers: Vec<&str> = SEARCH_HEADERS
        .iter()
        .chain(search_extra_headers(cluster.map(|c| c.id)))
        .copied()
        .collect();

    let sections = extract_substantial(raw, &headers);
    if sections.is_empty() {
        split_sections(raw)
    } else {
        sections
    }
}

/// Render the answer for the best-ranked guide.
///
/// Warnings, endpoint details and extra headers follow the detected `cluster`,
/// whichever guide ranked first.
pub fn format_search(
    spec: &OpenApiSpec,
    top: &RankedGuide<'_>,
    cluster: Option<&Cluster>,
    query: &str,
) -> String {
    let mut out = format!(
        "# 📚 Documentation: {}\n\n**Found relevant content for:** *{}*\n\n",
        guide_title(&top.guide.identifier),
        query
    );

    if let Some(cluster) = cluster {
        if !cluster.warnings.is_empty() {
            let bullets: Vec<String> = cluster.warnings.iter().map(|w| format!("• {w}")).collect();
            out.push_str(&format!("## ⚠️ Important Context\n\n{}\n\n", bullets.join("\n")));
        }
        if let Some(block) = endpoints::cluster_endpoints(spec, cluster) {
            out.push_str(&format!("## 🔌 Relevant API Endpoints\n\n{block}\n\n"));
        }
    }

    let sections = key_sections(&top.guide.raw, cluster);
    if sections.is_empty() {
        out.push_str(&clean_mdx(&top.guide.raw));
    } else {
        for section in &sections {
            out.push_str(&format!("## {}\n\n{}\n\n", section.title, section.content));
        }
    }

    out.push_str("---\n\n");
    out.push_str("💡 **Next steps:**\n");
    out.push_str("• IMPORTANT: Use `get_endpoint_schema` with specific endpoint paths (e.g., `/developer/v1/bills`) to get precise parameter names, types, and examples for code generation!\n");
    out.push_str("• Use `submit_feedback` if documentation needs further clarification or the MCP server is not functioning as expected\n");
    out
}

pub fn no_results_message(query: &str) -> String {
    format!(
        "ℹ️ No specific documentation found for '{query}'. Try more specific keywords like 'authentication', 'bill payments', 'webhooks', or 'card management'."
    )
}
