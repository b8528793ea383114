//! Workflow guidance: the detected cluster's guide, cut down to its key sections.

use crate::catalog::{Cluster, guidance_headers};
use crate::document::Section;
use crate::document::section::extract_capped;
use crate::intent::IntentClassifier;
use crate::storage::DocumentStore;

pub const EMPTY_USE_CASE_MESSAGE: &str =
    "❌ Please describe the use case you need guidance for, e.g. 'issue virtual cards'.";

/// Guidance for a free-text use case.
///
/// Falls back to [`general_guidance`] when no cluster matches, the cluster has no
/// guide, the guide is not loaded, or none of its expected sections is present.
pub fn workflow_guidance(
    store: &DocumentStore,
    classifier: &IntentClassifier<'static>,
    use_case: &str,
) -> String {
    let Some(cluster) = classifier.detect(&use_case.to_lowercase()) else {
        return general_guidance(use_case);
    };
    let Some(name) = cluster.primary_guide() else {
        tracing::debug!(cluster = %cluster.id, "cluster has no guide");
        return general_guidance(use_case);
    };
    let Some(guide) = store.find(name) else {
        tracing::warn!(cluster = %cluster.id, guide = name, "cluster guide not loaded");
        return general_guidance(use_case);
    };

    let sections = guide_sections(&guide.raw, cluster);
    if sections.is_empty() {
        return general_guidance(use_case);
    }

    format_guidance(cluster, use_case, &sections)
}

/// Sections the guidance path extracts for `cluster`, each capped.
pub fn guide_sections(raw: &str, cluster: &Cluster) -> Vec<Section> {
    let (headers, max_chars) = guidance_headers(cluster.id);
    extract_capped(raw, headers, max_chars)
}

pub fn format_guidance(cluster: &Cluster, use_case: &str, sections: &[Section]) -> String {
    let mut out = format!(
        "# {} Workflow\n\n**Use Case**: {}\n\n*This guidance is extracted from Ramp's developer documentation and updated automatically.*\n\n",
        cluster.id.title(),
        use_case
    );

    if !cluster.warnings.is_empty() {
        out.push_str("## ⚠️ Important Context\n\n");
        for warning in cluster.warnings {
            out.push_str(&format!("• {warning}\n"));
        }
        out.push('\n');
    }

    for section in sections {
        out.push_str(&format!("## {}\n\n{}\n\n", section.title, section.content));
    }

    out.push_str(
        "---

## IMPORTANT

- **Get exact schemas**: Use `get_endpoint_schema` with an endpoint path (e.g., `/developer/v1/bills`) for precise parameter names, types, and examples before writing code
- **Search documentation**: Use `search_documentation` for implementation guidance
- **Submit feedback**: Use `submit_feedback` to report issues or suggest improvements

*This guide is automatically generated from the latest Ramp developer documentation.*
",
    );
    out
}

/// Template used when no cluster-specific guidance exists.
pub fn general_guidance(use_case: &str) -> String {
    format!(
        "# General Integration Guidance

**Use Case**: {use_case}

## 🏗️ Approach

Since we couldn't match your use case to a specific workflow, here's a general approach:

1. **Identify the data you need** - What Ramp data do you want to access?
2. **Check available APIs** - Review endpoints at developer.ramp.com
3. **Start with authentication** - Use `get_workflow_guidance` with \"oauth\" for setup help
4. **Test in sandbox** - Always use demo-api.ramp.com first
5. **Check exact schemas** - Use `get_endpoint_schema` before writing request code

## 💡 Common Use Cases

Try these keywords with `get_workflow_guidance` for specific guidance:
- \"bill payments\" or \"accounts payable\"
- \"quickbooks sync\" or \"accounting integration\"
- \"card issuing\" or \"spending limits\"
- \"user management\" or \"employee onboarding\"
- \"expense reporting\" or \"analytics\"
- \"webhooks\" or \"real-time events\"
- \"ai integration\" or \"mcp server\"

## 🔍 Next Steps

1. Use `search_documentation` to find implementation guidance
2. Use `get_endpoint_schema` to check request and response shapes
3. Use `submit_feedback` to request guidance for your specific use case or submit a feature request

*This is general guidance. For specific workflows, use more targeted keywords.*
"
    )
}
