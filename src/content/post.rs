//! Post models

use serde::Serialize;

/// Listing-level view of a post: everything but the body.
///
/// Constructed fresh on each read of a source file and never mutated
/// afterwards. `slug` is the filename minus extension and doubles as the
/// URL path segment; `author` is injected by the store, not read from the
/// file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostMetadata {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub excerpt: String,
}

/// A full post, including the raw markdown body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    #[serde(flatten)]
    pub metadata: PostMetadata,

    /// Raw markdown body, not yet rendered
    pub content: String,
}

impl From<Post> for PostMetadata {
    fn from(post: Post) -> Self {
        post.metadata
    }
}
