//! Post store - the sole authority over the posts directory
//!
//! Discovers `.md` files, parses and validates their frontmatter, and
//! serves listings and single-post lookups. Storage failures never
//! propagate: a missing directory degrades to an empty result and a
//! malformed file is excluded from listings without affecting its
//! neighbors.

use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use walkdir::WalkDir;

use crate::cache::ListingCache;
use crate::content::frontmatter::FrontMatter;
use crate::content::post::{Post, PostMetadata};
use crate::error::ContentError;
use crate::helpers::date::parse_date;

pub struct PostStore {
    posts_dir: PathBuf,
    author: String,
    listing_cache: ListingCache,
}

impl PostStore {
    /// Create a store over a posts directory. `author` is applied uniformly
    /// to every post; frontmatter cannot override it.
    pub fn new<P: Into<PathBuf>>(posts_dir: P, author: &str) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            author: author.to_string(),
            listing_cache: ListingCache::new(),
        }
    }

    /// All valid posts, newest first.
    ///
    /// The first successful scan is kept for the life of the process; a
    /// file added to the directory afterwards only appears after a
    /// restart.
    pub fn list_all_metadata(&self) -> Vec<PostMetadata> {
        if let Some(listing) = self.listing_cache.get() {
            return listing;
        }

        // A failed scan is not cached, so storage can come back without a
        // process restart
        if !self.posts_dir.is_dir() {
            tracing::warn!(
                "Posts directory {:?} is missing or unreadable",
                self.posts_dir
            );
            return Vec::new();
        }

        let mut posts: Vec<PostMetadata> = Vec::new();
        for path in self.post_files() {
            let Some(slug) = file_slug(&path) else {
                continue;
            };
            match self.read_metadata(&path, &slug) {
                Ok(meta) => {
                    // Two files normalizing to the same slug: the later one wins
                    if let Some(existing) = posts.iter_mut().find(|p| p.slug == slug) {
                        *existing = meta;
                    } else {
                        posts.push(meta);
                    }
                }
                Err(e) => {
                    tracing::warn!("Skipping post {:?}: {}", path, e);
                }
            }
        }

        // Newest first; ties keep scan order
        posts.sort_by_key(|p| Reverse(sort_key(&p.date)));

        self.listing_cache.set(posts.clone());
        posts
    }

    /// Look up a single post by slug, re-reading its file each time.
    ///
    /// Detail views bypass the listing cache so an edited body is picked
    /// up without a restart. An unknown slug is a normal absent outcome,
    /// not an error.
    pub fn get_by_slug(&self, slug: &str) -> Option<Post> {
        let path = self.find_file(slug)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read post {:?}: {}", path, e);
                return None;
            }
        };
        match FrontMatter::parse(&content) {
            Ok((fm, body)) => Some(Post {
                metadata: self.assemble(slug, fm),
                content: body.to_string(),
            }),
            Err(e) => {
                tracing::warn!("Skipping post {:?}: {}", path, e);
                None
            }
        }
    }

    /// Slugs of every post file, without requiring valid metadata.
    ///
    /// Route enumeration favors completeness: a file that would be
    /// excluded from listings still gets a route, and the page layer
    /// renders its not-found state when the full parse fails later.
    pub fn list_slugs(&self) -> Vec<String> {
        let mut slugs: Vec<String> = Vec::new();
        for path in self.post_files() {
            if let Some(slug) = file_slug(&path) {
                if !slugs.contains(&slug) {
                    slugs.push(slug);
                }
            }
        }
        slugs
    }

    fn read_metadata(&self, path: &Path, slug: &str) -> Result<PostMetadata, ContentError> {
        let content = fs::read_to_string(path)?;
        let (fm, _body) = FrontMatter::parse(&content)?;
        Ok(self.assemble(slug, fm))
    }

    fn assemble(&self, slug: &str, fm: FrontMatter) -> PostMetadata {
        PostMetadata {
            slug: slug.to_string(),
            title: fm.title,
            date: fm.date,
            author: self.author.clone(),
            category: fm.category,
            tags: fm.tags,
            excerpt: fm.excerpt,
        }
    }

    /// Every `.md` file under the posts directory, in a stable walk order.
    fn post_files(&self) -> Vec<PathBuf> {
        if !self.posts_dir.is_dir() {
            tracing::warn!(
                "Posts directory {:?} is missing or unreadable",
                self.posts_dir
            );
            return Vec::new();
        }

        WalkDir::new(&self.posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && is_post_file(e.path()))
            .map(|e| e.into_path())
            .collect()
    }

    /// Last matching file wins, mirroring the listing's duplicate-slug rule.
    fn find_file(&self, slug: &str) -> Option<PathBuf> {
        self.post_files()
            .into_iter()
            .rev()
            .find(|p| file_slug(p).as_deref() == Some(slug))
    }
}

/// Check if a file is a post source file
fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

fn file_slug(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

fn sort_key(date: &str) -> NaiveDateTime {
    parse_date(date).unwrap_or(NaiveDateTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_post(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_hello_world_scenario() {
        let dir = tempdir().unwrap();
        write_post(
            dir.path(),
            "hello-world.md",
            "---\ntitle: \"Hello\"\ndate: \"2024-01-01\"\n---\n# Hi\n",
        );

        let store = PostStore::new(dir.path(), "Jane Doe");
        let listing = store.list_all_metadata();
        assert_eq!(listing.len(), 1);

        let meta = &listing[0];
        assert_eq!(meta.slug, "hello-world");
        assert_eq!(meta.title, "Hello");
        assert_eq!(meta.date, "2024-01-01");
        assert_eq!(meta.author, "Jane Doe");
        assert_eq!(meta.category, "");
        assert_eq!(meta.tags, Vec::<String>::new());
        assert_eq!(meta.excerpt, "");

        let post = store.get_by_slug("hello-world").unwrap();
        assert_eq!(post.metadata, *meta);
        assert!(post.content.contains("# Hi"));
    }

    #[test]
    fn test_listing_sorted_by_date_descending() {
        let dir = tempdir().unwrap();
        write_post(dir.path(), "old.md", "---\ntitle: Old\ndate: 2023-05-01\n---\nx\n");
        write_post(dir.path(), "new.md", "---\ntitle: New\ndate: 2024-06-01\n---\nx\n");
        write_post(dir.path(), "mid.md", "---\ntitle: Mid\ndate: 2023-12-31\n---\nx\n");

        let store = PostStore::new(dir.path(), "A");
        let listing = store.list_all_metadata();
        let titles: Vec<_> = listing.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Mid", "Old"]);
    }

    #[test]
    fn test_malformed_post_excluded_without_aborting() {
        let dir = tempdir().unwrap();
        write_post(dir.path(), "good.md", "---\ntitle: Good\ndate: 2024-01-01\n---\nx\n");
        write_post(dir.path(), "no-title.md", "---\ndate: 2024-01-02\n---\nx\n");
        write_post(dir.path(), "no-fence.md", "just markdown\n");

        let store = PostStore::new(dir.path(), "A");
        let listing = store.list_all_metadata();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].title, "Good");
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempdir().unwrap();
        let store = PostStore::new(dir.path(), "A");
        assert!(store.list_all_metadata().is_empty());
        assert!(store.list_slugs().is_empty());
    }

    #[test]
    fn test_missing_directory_degrades_to_empty() {
        let store = PostStore::new("/nonexistent/posts", "A");
        assert!(store.list_all_metadata().is_empty());
        assert!(store.list_slugs().is_empty());
        assert!(store.get_by_slug("anything").is_none());
    }

    #[test]
    fn test_failed_scan_is_not_cached() {
        let dir = tempdir().unwrap();
        let posts_dir = dir.path().join("posts");

        let store = PostStore::new(&posts_dir, "A");
        assert!(store.list_all_metadata().is_empty());

        // Storage comes back: the empty result must not have been pinned
        fs::create_dir_all(&posts_dir).unwrap();
        write_post(&posts_dir, "a.md", "---\ntitle: A\ndate: 2024-01-01\n---\nx\n");
        assert_eq!(store.list_all_metadata().len(), 1);
    }

    #[test]
    fn test_get_by_slug_unknown_is_absent() {
        let dir = tempdir().unwrap();
        write_post(dir.path(), "real.md", "---\ntitle: Real\ndate: 2024-01-01\n---\nx\n");

        let store = PostStore::new(dir.path(), "A");
        assert!(store.get_by_slug("nonexistent").is_none());
    }

    #[test]
    fn test_list_slugs_is_lenient() {
        let dir = tempdir().unwrap();
        write_post(dir.path(), "valid.md", "---\ntitle: V\ndate: 2024-01-01\n---\nx\n");
        write_post(dir.path(), "broken.md", "---\ndate: 2024-01-02\n---\nx\n");
        write_post(dir.path(), "notes.txt", "not a post\n");

        let store = PostStore::new(dir.path(), "A");
        let mut slugs = store.list_slugs();
        slugs.sort();
        assert_eq!(slugs, vec!["broken", "valid"]);
    }

    #[test]
    fn test_frontmatter_author_is_ignored() {
        let dir = tempdir().unwrap();
        write_post(
            dir.path(),
            "post.md",
            "---\ntitle: T\ndate: 2024-01-01\nauthor: Impostor\n---\nx\n",
        );

        let store = PostStore::new(dir.path(), "Owner");
        let listing = store.list_all_metadata();
        assert_eq!(listing[0].author, "Owner");
    }

    #[test]
    fn test_listing_cache_is_warm_after_first_scan() {
        let dir = tempdir().unwrap();
        write_post(dir.path(), "a.md", "---\ntitle: A\ndate: 2024-01-01\n---\nx\n");

        let store = PostStore::new(dir.path(), "A");
        assert_eq!(store.list_all_metadata().len(), 1);

        // A file added after the cache is warm is not visible to listings
        write_post(dir.path(), "b.md", "---\ntitle: B\ndate: 2024-01-02\n---\nx\n");
        assert_eq!(store.list_all_metadata().len(), 1);

        // but single-post lookup re-reads the directory
        assert!(store.get_by_slug("b").is_some());
    }

    #[test]
    fn test_get_by_slug_sees_edits() {
        let dir = tempdir().unwrap();
        write_post(dir.path(), "a.md", "---\ntitle: A\ndate: 2024-01-01\n---\nfirst\n");

        let store = PostStore::new(dir.path(), "A");
        assert!(store.get_by_slug("a").unwrap().content.contains("first"));

        write_post(dir.path(), "a.md", "---\ntitle: A\ndate: 2024-01-01\n---\nsecond\n");
        assert!(store.get_by_slug("a").unwrap().content.contains("second"));
    }

    #[test]
    fn test_duplicate_slug_last_file_wins() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        write_post(dir.path(), "same.md", "---\ntitle: First\ndate: 2024-01-01\n---\nx\n");
        write_post(
            &dir.path().join("drafts"),
            "same.md",
            "---\ntitle: Second\ndate: 2024-01-01\n---\nx\n",
        );

        let store = PostStore::new(dir.path(), "A");
        let listing = store.list_all_metadata();
        assert_eq!(listing.len(), 1);

        // Listing and lookup agree on which file won
        let post = store.get_by_slug("same").unwrap();
        assert_eq!(post.metadata.title, listing[0].title);
    }
}
