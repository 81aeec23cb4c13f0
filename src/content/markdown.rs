//! Markdown rendering and sanitization
//!
//! Converts a raw markdown body into HTML safe for direct embedding:
//! pulldown-cmark parses a GitHub-flavored superset (tables, strikethrough,
//! footnotes, task lists), the resulting HTML is cleaned against an explicit
//! allow-list, and the sanitized string is memoized per slug.

use std::collections::{HashMap, HashSet};
use std::panic::{self, AssertUnwindSafe};

use ammonia::Builder;
use pulldown_cmark::{html, Options, Parser};

use crate::cache::RenderCache;

/// Shown in place of a post body when the render pipeline fails
pub const FALLBACK_HTML: &str = r#"<p class="render-fallback">This content is temporarily unavailable.</p>"#;

/// Markdown renderer with per-slug memoization
pub struct MarkdownRenderer {
    cache: RenderCache,
    sanitizer: Builder<'static>,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            cache: RenderCache::new(),
            sanitizer: sanitizer(),
        }
    }

    /// Render a markdown body to sanitized HTML.
    ///
    /// Results are memoized by slug for the life of the process; the
    /// markdown argument only participates on a cache miss. A failure in
    /// any pipeline stage degrades to [`FALLBACK_HTML`] (not cached) so a
    /// single corrupted post cannot take down a page render.
    pub fn render(&self, markdown: &str, slug: &str) -> String {
        if let Some(cached) = self.cache.get(slug) {
            return cached;
        }

        match panic::catch_unwind(AssertUnwindSafe(|| self.render_body(markdown))) {
            Ok(rendered) => {
                self.cache.set(slug, rendered.clone());
                rendered
            }
            Err(_) => {
                tracing::error!("Markdown pipeline failed for post `{}`", slug);
                FALLBACK_HTML.to_string()
            }
        }
    }

    /// The pipeline itself: parse markdown, emit HTML, clean it.
    fn render_body(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut raw_html = String::new();
        html::push_html(&mut raw_html, parser);

        self.sanitizer.clean(&raw_html).to_string()
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Allow-list for rendered post bodies.
///
/// Anything outside this set is stripped, which covers `<script>` elements,
/// inline event handlers, and raw HTML embedded in the markdown source.
fn sanitizer() -> Builder<'static> {
    let mut builder = Builder::default();
    builder
        .tags(HashSet::from([
            "a",
            "blockquote",
            "br",
            "code",
            "del",
            "em",
            "h1",
            "h2",
            "h3",
            "h4",
            "h5",
            "h6",
            "hr",
            "img",
            "input",
            "li",
            "ol",
            "p",
            "pre",
            "strong",
            "sup",
            "table",
            "tbody",
            "td",
            "th",
            "thead",
            "tr",
            "ul",
        ]))
        .tag_attributes(HashMap::from([
            ("a", HashSet::from(["href", "title"])),
            ("img", HashSet::from(["src", "alt", "title"])),
            ("code", HashSet::from(["class"])),
            ("th", HashSet::from(["align"])),
            ("td", HashSet::from(["align"])),
            ("ol", HashSet::from(["start"])),
            ("input", HashSet::from(["type", "checked", "disabled"])),
        ]))
        .url_schemes(HashSet::from(["http", "https", "mailto"]))
        .link_rel(Some("noopener"));
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.", "basic");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_gfm_table() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |", "table");
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>a</th>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_render_strikethrough() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("~~gone~~", "strike");
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_render_fenced_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```", "code");
        assert!(html.contains("<pre>"));
        assert!(html.contains("fn main"));
    }

    #[test]
    fn test_script_block_stripped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("before\n\n<script>alert(1)</script>\n\nafter", "script");
        assert!(!html.contains("<script"));
        assert!(html.contains("before"));
        assert!(html.contains("after"));
    }

    #[test]
    fn test_event_handler_stripped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render(r#"<p onclick="alert(1)">hi</p>"#, "handler");
        assert!(!html.contains("onclick"));
        assert!(html.contains("hi"));
    }

    #[test]
    fn test_javascript_url_stripped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("[click](javascript:alert(1))", "jsurl");
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn test_https_link_kept() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("[site](https://example.com)", "link");
        assert!(html.contains(r#"href="https://example.com""#));
    }

    #[test]
    fn test_second_call_served_from_cache() {
        let renderer = MarkdownRenderer::new();
        let first = renderer.render("# One", "memo");
        // Different markdown, same slug: the pipeline must not re-run
        let second = renderer.render("# Two", "memo");
        assert_eq!(first, second);
        assert!(second.contains("One"));
    }

    #[test]
    fn test_identical_input_is_deterministic() {
        let a = MarkdownRenderer::new();
        let b = MarkdownRenderer::new();
        let markdown = "# Title\n\n- one\n- two\n\n| x |\n|---|\n| 1 |";
        assert_eq!(a.render(markdown, "det"), b.render(markdown, "det"));
    }
}
