//! Header-bounded section extraction over raw markdown.

use std::sync::LazyLock;

use regex::Regex;

use super::strip_tags;

static TEMPLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]+\}").expect("valid regex"));
static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"import\s+.*").expect("valid regex"));

/// Sections shorter than this (after trimming) are dropped by the search path.
pub const MIN_SECTION_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub content: String,
}

/// Lines that end a section: `## `, `# ` headings and `---` dividers.
fn is_boundary(trimmed: &str) -> bool {
    trimmed.starts_with("## ") || trimmed.starts_with("---") || trimmed.starts_with("# ")
}

/// Text between the first line starting with `header` and the next boundary line.
///
/// Returns an empty string when the header does not occur. The result has markup tags,
/// `{...}` expressions and `import` directives removed. `###` headings do not end a
/// section.
pub fn extract_section(content: &str, header: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();

    let Some(start) = lines.iter().position(|l| l.trim().starts_with(header)) else {
        return String::new();
    };

    let end = lines[start + 1..]
        .iter()
        .position(|l| is_boundary(l.trim()))
        .map_or(lines.len(), |offset| start + 1 + offset);

    let body = lines[start + 1..end].join("\n");
    clean_mdx(body.trim())
}

/// Strip tags, templating expressions and import directives.
pub fn clean_mdx(text: &str) -> String {
    let text = strip_tags(text);
    let text = TEMPLATE_RE.replace_all(&text, "");
    IMPORT_RE.replace_all(&text, "").into_owned()
}

/// Hard character cut, not sentence-aware.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Heading text without its `##`/`###` marker.
pub fn section_title(header: &str) -> String {
    header.replace("### ", "").replace("## ", "")
}

/// Extract every listed header that is present, in list order, each capped at `max_chars`.
pub fn extract_capped(content: &str, headers: &[&str], max_chars: usize) -> Vec<Section> {
    headers
        .iter()
        .filter_map(|header| {
            let body = extract_section(content, header);
            (!body.is_empty()).then(|| Section {
                title: section_title(header),
                content: truncate_chars(&body, max_chars),
            })
        })
        .collect()
}

/// Extract every listed header whose trimmed body is longer than [`MIN_SECTION_CHARS`].
pub fn extract_substantial(content: &str, headers: &[&str]) -> Vec<Section> {
    headers
        .iter()
        .filter_map(|header| {
            let body = extract_section(content, header);
            let body = body.trim();
            (body.chars().count() > MIN_SECTION_CHARS).then(|| Section {
                title: section_title(header),
                content: body.to_string(),
            })
        })
        .collect()
}

/// Split on every `## ` heading, in order.
///
/// Text before the first heading is discarded, as are blocks whose trimmed body is not
/// longer than [`MIN_SECTION_CHARS`].
pub fn split_sections(content: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in content.split('\n') {
        let trimmed = line.trim();
        if trimmed.starts_with("## ") {
            flush_block(current.take(), &mut sections);
            current = Some((trimmed.replace("## ", ""), Vec::new()));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
    }
    flush_block(current, &mut sections);

    sections
}

fn flush_block(block: Option<(String, Vec<&str>)>, sections: &mut Vec<Section>) {
    let Some((title, lines)) = block else {
        return;
    };
    let body = lines.join("\n");
    let body = body.trim();
    if body.chars().count() > MIN_SECTION_CHARS {
        sections.push(Section {
            title,
            content: body.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
import { Callout } from 'components'

# Bill Pay

## Overview

Bills are paid through the <Callout>Bills</Callout> API {props.note}.

### Details

Still part of the overview.

## Next Steps

Create a vendor.

---

Footer text.
";

    #[test]
    fn missing_header_is_empty() {
        assert_eq!(extract_section(DOC, "## Pricing"), "");
    }

    #[test]
    fn section_runs_to_next_boundary() {
        let overview = extract_section(DOC, "## Overview");
        assert_eq!(
            overview,
            "Bills are paid through the Bills API .\n\n### Details\n\nStill part of the overview."
        );
        assert_eq!(extract_section(DOC, "## Next Steps"), "Create a vendor.");
    }

    #[test]
    fn header_match_is_prefix_of_trimmed_line() {
        let doc = "  ## Overview of things\nbody\n# End";
        assert_eq!(extract_section(doc, "## Overview"), "body");
    }

    #[test]
    fn first_occurrence_wins() {
        let doc = "## A\none\n## A\ntwo";
        assert_eq!(extract_section(doc, "## A"), "one");
    }

    #[test]
    fn import_lines_are_removed() {
        let doc = "## Setup\nimport Tabs from '@theme/Tabs'\nUse the tabs.";
        assert_eq!(extract_section(doc, "## Setup").trim(), "Use the tabs.");
    }

    #[test]
    fn truncation_is_a_hard_cut() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        assert_eq!(truncate_chars("ééé", 2), "éé");

        let long = format!("## Overview\n{}", "x".repeat(1500));
        let sections = extract_capped(&long, &["## Overview"], 1000);
        assert_eq!(sections[0].content.len(), 1000);
    }

    #[test]
    fn split_discards_leading_and_short_blocks() {
        let doc = format!(
            "intro text that is ignored\n## Short\ntiny\n## Long\n{}\n## Tail\n{}",
            "a".repeat(60),
            "b".repeat(51)
        );
        let sections = split_sections(&doc);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Long", "Tail"]);
    }

    #[test]
    fn substantial_sections_need_more_than_fifty_chars() {
        let doc = format!("## Overview\n{}\n## Examples\nshort", "y".repeat(51));
        let sections = extract_substantial(&doc, &["## Overview", "## Examples"]);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Overview");
    }
}
