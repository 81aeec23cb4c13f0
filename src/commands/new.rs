//! Create a new post

use anyhow::Result;
use std::fs;

use crate::Folio;

/// Scaffold a post file with valid frontmatter
pub fn run(folio: &Folio, title: &str) -> Result<()> {
    let now = chrono::Local::now();

    fs::create_dir_all(&folio.posts_dir)?;

    let slug = slug::slugify(title);
    let file_path = folio.posts_dir.join(format!("{}.md", slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        r#"---
title: "{title}"
date: "{date}"
category: ""
tags: []
excerpt: ""
---
"#,
        title = title.replace('"', "\\\""),
        date = now.format("%Y-%m-%d"),
    );

    fs::write(&file_path, content)?;
    println!("Created: {:?}", file_path);

    Ok(())
}
