//! Frontmatter parsing and schema validation
//!
//! A post file carries a `---` fenced YAML header followed by the markdown
//! body. The header is first read into a loosely-typed mapping, then run
//! through explicit per-field checkers. Required fields are rejected early
//! with the offending field named; optional fields get their documented
//! defaults. Unknown keys (including `author`, which the store owns) are
//! ignored.

use serde_yaml::{Mapping, Value};

use crate::error::ContentError;
use crate::helpers::date::parse_date;

/// Validated, defaulted frontmatter for one post
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    pub title: String,
    pub date: String,
    pub category: String,
    pub tags: Vec<String>,
    pub excerpt: String,
}

impl FrontMatter {
    /// Parse and validate the frontmatter of a full post file.
    /// Returns the validated frontmatter and the markdown body.
    pub fn parse(content: &str) -> Result<(Self, &str), ContentError> {
        let (header, body) = split(content)?;
        let map = parse_header(header)?;
        let fm = Self::validate(&map)?;
        Ok((fm, body))
    }

    /// Run every field checker over a raw header mapping.
    pub fn validate(map: &Mapping) -> Result<Self, ContentError> {
        let title = require_string(map, "title")?;
        let date = require_string(map, "date")?;
        if parse_date(&date).is_none() {
            return Err(ContentError::Validation {
                field: "date",
                reason: format!("`{date}` is not a recognized calendar date"),
            });
        }
        let category = optional_string(map, "category")?;
        let tags = optional_string_seq(map, "tags")?;
        let excerpt = optional_string(map, "excerpt")?;

        Ok(Self {
            title,
            date,
            category,
            tags,
            excerpt,
        })
    }
}

/// Split a `---` fenced YAML header from the markdown body.
/// Returns (header, body) with the fences removed.
pub fn split(content: &str) -> Result<(&str, &str), ContentError> {
    let content = content.trim_start_matches('\u{feff}');
    let rest = content
        .strip_prefix("---")
        .ok_or(ContentError::MissingFrontmatter)?;
    // The opening fence must be alone on its line
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .ok_or(ContentError::MissingFrontmatter)?;

    match rest.find("\n---") {
        Some(end_pos) => {
            let header = &rest[..end_pos];
            let body = &rest[end_pos + 4..];
            let body = body.trim_start_matches(['\n', '\r']);
            Ok((header, body))
        }
        None => Err(ContentError::UnterminatedFrontmatter),
    }
}

/// Parse the raw header block into a loosely-typed key/value mapping
pub fn parse_header(header: &str) -> Result<Mapping, ContentError> {
    if header.trim().is_empty() {
        return Ok(Mapping::new());
    }
    let value: Value = serde_yaml::from_str(header)?;
    match value {
        Value::Mapping(map) => Ok(map),
        _ => Err(ContentError::Validation {
            field: "frontmatter",
            reason: "header is not a key/value mapping".to_string(),
        }),
    }
}

fn require_string(map: &Mapping, field: &'static str) -> Result<String, ContentError> {
    match map.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(ContentError::Validation {
            field,
            reason: "must not be empty".to_string(),
        }),
        Some(other) => Err(ContentError::Validation {
            field,
            reason: format!("expected a string, got {}", shape_of(other)),
        }),
        None => Err(ContentError::Validation {
            field,
            reason: "required field is missing".to_string(),
        }),
    }
}

fn optional_string(map: &Mapping, field: &'static str) -> Result<String, ContentError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ContentError::Validation {
            field,
            reason: format!("expected a string, got {}", shape_of(other)),
        }),
    }
}

/// A bare string is accepted as a one-element list; every sequence element
/// must be a YAML string.
fn optional_string_seq(map: &Mapping, field: &'static str) -> Result<Vec<String>, ContentError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(vec![s.clone()]),
        Some(Value::Sequence(seq)) => {
            let mut items = Vec::with_capacity(seq.len());
            for item in seq {
                match item {
                    Value::String(s) => items.push(s.clone()),
                    other => {
                        return Err(ContentError::Validation {
                            field,
                            reason: format!("sequence contains {}", shape_of(other)),
                        })
                    }
                }
            }
            Ok(items)
        }
        Some(other) => Err(ContentError::Validation {
            field,
            reason: format!("expected a sequence of strings, got {}", shape_of(other)),
        }),
    }
}

fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
