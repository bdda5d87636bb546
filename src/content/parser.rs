//! Fixed-layout post documents
//!
//! A post document is positional rather than keyed:
//!
//! ```text
//! # Title
//! image: https://example.com/cover.png
//! summary: One line shown on the list card
//!
//! Markdown body...
//! ```
//!
//! Line 3 separates the header from the body and is never inspected.

use super::{ContentError, MarkdownRenderer, Post};

/// Minimum number of lines: title, image, summary and the separator
pub const MIN_LINES: usize = 4;

const TITLE_MARKER: &str = "# ";
const IMAGE_PREFIX: &str = "image: ";
const SUMMARY_PREFIX: &str = "summary: ";

/// Parses post documents into [`Post`] records
pub struct PostParser {
    renderer: MarkdownRenderer,
    strict: bool,
}

impl PostParser {
    /// Create a lenient parser: missing prefixes leave the line as-is
    pub fn new(renderer: MarkdownRenderer) -> Self {
        Self {
            renderer,
            strict: false,
        }
    }

    /// Reject lines whose label prefix is missing
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// The markdown renderer used for post bodies
    pub fn renderer(&self) -> &MarkdownRenderer {
        &self.renderer
    }

    /// Parse one document
    pub fn load_post(&self, document: &str) -> Result<Post, ContentError> {
        let lines: Vec<&str> = document.lines().collect();
        if lines.len() < MIN_LINES {
            return Err(ContentError::MalformedDocument { found: lines.len() });
        }

        let title = self.strip(lines[0], 0, TITLE_MARKER)?;
        let image = self.strip(lines[1], 1, IMAGE_PREFIX)?;
        let summary = self.strip(lines[2], 2, SUMMARY_PREFIX)?;

        let body = lines[MIN_LINES..].join("\n");
        let content = self.renderer.render(&body);

        Ok(Post {
            title,
            image,
            summary,
            content,
            source: String::new(),
        })
    }

    fn strip(&self, line: &str, index: usize, prefix: &'static str) -> Result<String, ContentError> {
        let line = line.trim();
        match line.strip_prefix(prefix) {
            Some(rest) => Ok(rest.to_string()),
            None if self.strict => Err(ContentError::MissingPrefix {
                line: index,
                expected: prefix,
            }),
            None => Ok(line.to_string()),
        }
    }
}

/// Lay out a post document in the fixed format [`PostParser`] reads
pub fn compose_document(title: &str, image: &str, summary: &str, body: &str) -> String {
    format!(
        "{}{}\n{}{}\n{}{}\n\n{}",
        TITLE_MARKER, title, IMAGE_PREFIX, image, SUMMARY_PREFIX, summary, body
    )
}

impl Default for PostParser {
    fn default() -> Self {
        Self::new(MarkdownRenderer::new())
    }
}
