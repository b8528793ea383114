use std::path::Path;
use std::sync::LazyLock;

use pulldown_cmark::{Parser, html};
use regex::Regex;

use crate::catalog::title_case;
use crate::error::LoadError;

pub mod section;

pub use section::{Section, extract_section, split_sections};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// A documentation guide loaded from disk
#[derive(Debug, Clone)]
pub struct Guide {
    /// Path relative to the guides root, `/`-separated (e.g. `guides/bill-pay.mdx`)
    pub identifier: String,
    pub title: String,
    /// Markdown rendered to text with all markup tags removed
    pub content: String,
    pub priority: Option<i64>,
    /// Original markdown body (front matter removed), used for section extraction
    pub raw: String,
}

/// Typed front matter. Only the fields the server reads are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub priority: Option<i64>,
}

impl FrontMatter {
    /// Splits a leading `---` block off `source` and parses its `key: value` lines.
    ///
    /// Returns the parsed metadata and the remaining body. Without a closing fence the
    /// opening `---` is just a divider, so the text is returned untouched. A
    /// `priority` that is not an integer is dropped.
    pub fn split(source: &str) -> (Self, &str) {
        let Some(rest) = strip_fence(source) else {
            return (Self::default(), source);
        };

        let mut meta = Self::default();
        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            offset += line.len();
            let trimmed = line.trim();
            if trimmed == "---" {
                return (meta, &rest[offset..]);
            }
            let Some((key, value)) = trimmed.split_once(':') else {
                continue;
            };
            let value = unquote(value.trim());
            match key.trim() {
                "title" if !value.is_empty() => meta.title = Some(value.to_string()),
                "priority" if !value.is_empty() => match value.parse::<i64>() {
                    Ok(priority) => meta.priority = Some(priority),
                    Err(_) => tracing::warn!(value, "ignoring non-integer guide priority"),
                },
                _ => {}
            }
        }

        (Self::default(), source)
    }
}

fn strip_fence(source: &str) -> Option<&str> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let rest = source.strip_prefix("---")?;
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    rest.strip_prefix('\n')
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
}

/// Render markdown to HTML, then drop every tag
pub fn markdown_to_text(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    strip_tags(&html_output).into_owned()
}

/// Remove `<...>` markup
pub fn strip_tags(text: &str) -> std::borrow::Cow<'_, str> {
    TAG_RE.replace_all(text, "")
}

/// Title derived from a file name: `bill-pay.mdx` -> `Bill Pay`
pub fn title_from_filename(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled");
    title_case(&stem.replace('-', " "))
}

/// Build a guide from its source text.
pub fn parse_guide(identifier: &str, path: &Path, source: &str) -> Guide {
    let (meta, body) = FrontMatter::split(source);
    let title = meta.title.unwrap_or_else(|| title_from_filename(path));

    Guide {
        identifier: identifier.to_string(),
        title,
        content: markdown_to_text(body),
        priority: meta.priority,
        raw: body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn front_matter_is_optional() {
        let (meta, body) = FrontMatter::split("# Heading\n\nText");
        assert_eq!(meta, FrontMatter::default());
        assert_eq!(body, "# Heading\n\nText");
    }

    #[test]
    fn front_matter_fields_are_typed() {
        let src = "---\ntitle: \"Bill Pay\"\npriority: 3\nsidebar: ignored\n---\n## Overview\n";
        let (meta, body) = FrontMatter::split(src);
        assert_eq!(meta.title.as_deref(), Some("Bill Pay"));
        assert_eq!(meta.priority, Some(3));
        assert_eq!(body, "## Overview\n");
    }

    #[test]
    fn bad_priority_is_dropped() {
        let (meta, body) = FrontMatter::split("---\ntitle: Cards\npriority: 1.5\n---\nbody");
        assert_eq!(meta.title.as_deref(), Some("Cards"));
        assert_eq!(meta.priority, None);
        assert_eq!(body, "body");
    }

    #[test]
    fn unterminated_fence_is_plain_body() {
        let src = "---\n\n## Overview\n\nIntro text.";
        let (meta, body) = FrontMatter::split(src);
        assert_eq!(meta, FrontMatter::default());
        assert_eq!(body, src);
    }

    #[test]
    fn markdown_renders_to_plain_text() {
        let text = markdown_to_text("# Title\n\nSome **bold** and `code`.");
        assert!(text.contains("Title"));
        assert!(text.contains("Some bold and code."));
        assert!(!text.contains('<'));
    }

    #[test]
    fn guide_title_falls_back_to_filename() {
        let guide = parse_guide("guides/bill-pay.mdx", Path::new("guides/bill-pay.mdx"), "body");
        assert_eq!(guide.title, "Bill Pay");
        assert_eq!(guide.priority, None);
    }
}
