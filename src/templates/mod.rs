//! HTML page templates
//!
//! Small string builders assemble the handful of pages this site needs.
//! Every interpolated metadata string goes through `html_escape`; post
//! bodies arrive already sanitized from the markdown renderer.

use crate::config::SiteConfig;
use crate::content::PostMetadata;
use crate::helpers::date::display_date;
use crate::helpers::html::html_escape;

/// Stylesheet written alongside the generated pages
pub const SITE_CSS: &str = r#"body { margin: 0; color: #1e3a8a; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", "Helvetica Neue", sans-serif; background: #f8fafc; }
.site-header { display: flex; justify-content: space-between; align-items: center; padding: 1.25rem 2rem; border-bottom: 1px solid #e2e8f0; background: #ffffff; }
.site-title { font-weight: 700; font-size: 1.15rem; color: #1e3a8a; text-decoration: none; }
.site-nav a { margin-left: 1.25rem; color: #2563eb; text-decoration: none; font-weight: 500; }
.site-nav a:hover { color: #1e3a8a; }
.content { max-width: 46rem; margin: 0 auto; padding: 2.5rem 1.5rem 4rem; }
.site-footer { padding: 1.5rem 2rem; border-top: 1px solid #e2e8f0; font-size: 0.85rem; color: #475569; }
.back-link { display: inline-flex; align-items: center; font-size: 0.95rem; font-weight: 500; color: #2563eb; text-decoration: none; }
.back-link:hover { color: #1e3a8a; }
.post-panel { background: #ffffff; border-radius: 18px; border: 2px solid #e5e7eb; padding: 2.5rem 3rem; margin-top: 1.75rem; }
.post-header { padding-bottom: 1.75rem; border-bottom: 1px solid #e2e8f0; }
.post-title { font-size: 2.35rem; font-weight: 700; letter-spacing: -1px; margin: 0 0 1.25rem; }
.meta-row { display: flex; flex-wrap: wrap; gap: 1.25rem; font-size: 0.9rem; color: #475569; }
.tag-list { display: flex; flex-wrap: wrap; gap: 0.6rem; list-style: none; padding: 0; margin: 1.25rem 0 0; }
.tag-list .tag { font-size: 0.75rem; font-weight: 600; padding: 0.35rem 0.7rem; border-radius: 999px; background: #e0f2fe; color: #1e3a8a; }
.post-card { background: #ffffff; border-radius: 12px; border: 1px solid #e5e7eb; padding: 1.5rem 2rem; margin-bottom: 1.25rem; }
.post-card h2 { margin: 0 0 0.5rem; }
.post-card a { color: #1e3a8a; text-decoration: none; }
.post-card a:hover { color: #2563eb; }
.post-card .excerpt { margin: 0.75rem 0 0; color: #334155; }
.markdown-content { font-size: 1rem; line-height: 1.8; color: #334155; }
.markdown-content h2 { font-size: 1.8rem; font-weight: 600; color: #1e3a8a; margin-top: 2rem; margin-bottom: 1rem; }
.markdown-content h3 { font-size: 1.4rem; font-weight: 600; color: #1e3a8a; margin-top: 1.5rem; margin-bottom: 0.75rem; }
.markdown-content p { margin-bottom: 1rem; }
.markdown-content ul, .markdown-content ol { margin-bottom: 1rem; padding-left: 1.5rem; }
.markdown-content li { margin-bottom: 0.5rem; }
.markdown-content code { background: #f1f5f9; padding: 0.2rem 0.45rem; border-radius: 4px; font-family: "Courier New", monospace; font-size: 0.9em; color: #d63384; }
.markdown-content pre { background: #0f172a; color: #e2e8f0; padding: 1.25rem; border-radius: 12px; overflow-x: auto; margin-bottom: 1.75rem; font-size: 0.9rem; line-height: 1.6; }
.markdown-content pre code { background: transparent; padding: 0; color: inherit; }
.markdown-content blockquote { border-left: 4px solid #2563eb; padding-left: 1rem; margin-left: 0; margin-bottom: 1rem; color: #475569; font-style: italic; }
.markdown-content a { color: #2563eb; text-decoration: underline; }
.markdown-content table { width: 100%; border-collapse: collapse; margin-bottom: 1.75rem; font-size: 0.9rem; }
.markdown-content th, .markdown-content td { padding: 0.75rem; text-align: left; border-bottom: 1px solid #e2e8f0; }
.markdown-content th { background: #f8fafc; font-weight: 600; }
"#;

/// Shared page shell: header, nav, content column, footer
pub fn base_page(config: &SiteConfig, title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {site}</title>
<link rel="stylesheet" href="{root}css/site.css">
</head>
<body>
<header class="site-header">
<a class="site-title" href="{root}">{site}</a>
<nav class="site-nav">
<a href="{root}">Home</a>
<a href="{root}posts/">Posts</a>
</nav>
</header>
<main class="content">
{body}
</main>
<footer class="site-footer">&copy; {site}</footer>
</body>
</html>
"#,
        title = html_escape(title),
        site = html_escape(&config.title),
        root = config.root,
        body = body,
    )
}

/// The home page: description plus the most recent posts
pub fn home_page(config: &SiteConfig, posts: &[PostMetadata]) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>\n", html_escape(&config.title)));
    if !config.description.is_empty() {
        body.push_str(&format!(
            "<p class=\"site-description\">{}</p>\n",
            html_escape(&config.description)
        ));
    }

    body.push_str("<h2>Recent posts</h2>\n");
    if posts.is_empty() {
        body.push_str("<p class=\"empty-note\">No posts yet.</p>\n");
    } else {
        for post in posts.iter().take(3) {
            body.push_str(&post_card(config, post));
        }
    }

    base_page(config, "Home", &body)
}

/// The posts index page
pub fn post_list_page(config: &SiteConfig, posts: &[PostMetadata]) -> String {
    let mut body = String::from("<h1>Posts</h1>\n");
    if posts.is_empty() {
        body.push_str("<p class=\"empty-note\">No posts yet.</p>\n");
    } else {
        for post in posts {
            body.push_str(&post_card(config, post));
        }
    }

    base_page(config, "Posts", &body)
}

/// A single post's detail page
pub fn post_page(config: &SiteConfig, meta: &PostMetadata, body_html: &str) -> String {
    let body = format!(
        r#"<a class="back-link" href="{root}posts/">&larr; Back to posts</a>
<article class="post-panel">
<header class="post-header">
<h1 class="post-title">{title}</h1>
<div class="meta-row">{meta_row}</div>
{tags}</header>
<div class="markdown-content">
{body_html}
</div>
<div class="post-footer-nav">
<a class="back-link" href="{root}posts/">&larr; Back to all posts</a>
</div>
</article>"#,
        root = config.root,
        title = html_escape(&meta.title),
        meta_row = meta_row(config, meta),
        tags = tag_list(&meta.tags),
        body_html = body_html,
    );

    base_page(config, &meta.title, &body)
}

fn post_card(config: &SiteConfig, post: &PostMetadata) -> String {
    let excerpt = if post.excerpt.is_empty() {
        String::new()
    } else {
        format!("<p class=\"excerpt\">{}</p>\n", html_escape(&post.excerpt))
    };

    format!(
        r#"<article class="post-card">
<h2><a href="{root}posts/{slug}/">{title}</a></h2>
<div class="meta-row">{meta_row}</div>
{excerpt}</article>
"#,
        root = config.root,
        slug = post.slug,
        title = html_escape(&post.title),
        meta_row = meta_row(config, post),
        excerpt = excerpt,
    )
}

fn meta_row(config: &SiteConfig, meta: &PostMetadata) -> String {
    let mut row = format!(
        "<span>{}</span>",
        html_escape(&display_date(&meta.date, &config.date_format))
    );
    if !meta.author.is_empty() {
        row.push_str(&format!("<span>By {}</span>", html_escape(&meta.author)));
    }
    if !meta.category.is_empty() {
        row.push_str(&format!("<span>{}</span>", html_escape(&meta.category)));
    }
    row
}

fn tag_list(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let items: String = tags
        .iter()
        .map(|tag| format!(r#"<li class="tag">#{}</li>"#, html_escape(tag)))
        .collect();
    format!("<ul class=\"tag-list\">{items}</ul>\n")
}
