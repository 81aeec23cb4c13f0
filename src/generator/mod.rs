//! Generator module - writes the static site into the public directory
//!
//! The generator is the page-rendering layer over the content pipeline:
//! listings come from the post store's metadata cache, detail pages go
//! through the markdown renderer and its per-slug cache, and routes are
//! enumerated from `list_slugs`.

use anyhow::Result;
use std::fs;

use crate::content::{MarkdownRenderer, PostStore};
use crate::templates;
use crate::Folio;

/// Static site generator
pub struct Generator<'a> {
    folio: &'a Folio,
    store: PostStore,
    renderer: MarkdownRenderer,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(folio: &'a Folio) -> Self {
        let store = PostStore::new(&folio.posts_dir, &folio.config.author);
        Self {
            folio,
            store,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Generate the entire site
    pub fn generate(&self) -> Result<()> {
        fs::create_dir_all(&self.folio.public_dir)?;
        self.write_stylesheet()?;

        let listing = self.store.list_all_metadata();
        tracing::info!("Loaded {} posts", listing.len());

        self.write_page(
            "index.html",
            templates::home_page(&self.folio.config, &listing),
        )?;
        self.write_page(
            "posts/index.html",
            templates::post_list_page(&self.folio.config, &listing),
        )?;

        for slug in self.store.list_slugs() {
            match self.store.get_by_slug(&slug) {
                Some(post) => {
                    let body_html = self.renderer.render(&post.content, &slug);
                    let page = templates::post_page(&self.folio.config, &post.metadata, &body_html);
                    self.write_page(&format!("posts/{}/index.html", slug), page)?;
                }
                None => {
                    // list_slugs is lenient; a slug whose full parse fails
                    // simply gets no page
                    tracing::warn!("Skipping route for `{}`: post did not parse", slug);
                }
            }
        }

        Ok(())
    }

    fn write_page(&self, relative: &str, content: String) -> Result<()> {
        let path = self.folio.public_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        tracing::debug!("Wrote {:?}", path);
        Ok(())
    }

    fn write_stylesheet(&self) -> Result<()> {
        let css_dir = self.folio.public_dir.join("css");
        fs::create_dir_all(&css_dir)?;
        fs::write(css_dir.join("site.css"), templates::SITE_CSS)?;
        Ok(())
    }
}
