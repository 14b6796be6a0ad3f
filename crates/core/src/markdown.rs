//! Markdown rendering for stored content bodies.
//!
//! Content is authored as Markdown and stored verbatim; responses carry a
//! rendered HTML field alongside it. Rendering is GitHub-flavored (tables,
//! strikethrough, autolinks) with raw HTML passthrough disabled, and the
//! output is run through an allow-list sanitizer so author input can never
//! inject script into the public site.

use std::collections::HashSet;

use comrak::{markdown_to_html, Options};

const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "strong", "em", "u", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li",
    "blockquote", "code", "pre", "a", "img",
];

/// Render Markdown to sanitized HTML.
pub fn render(markdown: &str) -> String {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.render.r#unsafe = false;

    let html = markdown_to_html(markdown, &options);

    let tags: HashSet<&str> = ALLOWED_TAGS.iter().copied().collect();
    ammonia::Builder::default()
        .tags(tags)
        .link_rel(Some("noopener noreferrer"))
        .clean(&html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_and_emphasis_render() {
        let html = render("# Title\n\nSome **bold** text.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn raw_html_is_stripped() {
        let html = render("hello <script>alert(1)</script> world");
        assert!(!html.contains("<script"));
        assert!(!html.contains("alert(1)"));
    }

    #[test]
    fn links_survive_with_rel_attribute() {
        let html = render("[docs](https://example.com)");
        assert!(html.contains("href=\"https://example.com\""));
        assert!(html.contains("noopener"));
    }

    #[test]
    fn javascript_urls_are_removed() {
        let html = render("[x](javascript:alert(1))");
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn code_blocks_render_inside_pre() {
        let html = render("```\nlet x = 1;\n```");
        assert!(html.contains("<pre>"));
        assert!(html.contains("<code>"));
    }

    #[test]
    fn disallowed_tags_are_dropped_but_text_kept() {
        let html = render("a <table><tr><td>cell</td></tr></table> b");
        assert!(!html.contains("<table"));
        assert!(html.contains("cell"));
    }
}
