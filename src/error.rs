//! Error types for the content pipeline

use thiserror::Error;

/// Errors raised while ingesting a post file.
///
/// None of these escape the content core: the post store recovers by
/// excluding the offending file, and lookup paths degrade to an absent
/// result.
#[derive(Error, Debug)]
pub enum ContentError {
    /// A frontmatter field is missing, empty, or of the wrong shape
    #[error("invalid frontmatter field `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The file does not start with a `---` frontmatter fence
    #[error("missing frontmatter block")]
    MissingFrontmatter,

    /// The opening `---` fence is never closed
    #[error("unterminated frontmatter block")]
    UnterminatedFrontmatter,

    /// The header block is not well-formed YAML
    #[error("malformed YAML frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
