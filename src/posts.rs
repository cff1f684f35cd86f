//! Post discovery and parsing.
//!
//! The source directory is flat: every `*.md` file is one post, everything
//! else is a static asset handled by [`crate::generate`]. A post source is a
//! YAML front-matter block between `---` fences followed by a markdown body:
//!
//! ```text
//! ---
//! title: "Hello"
//! date: "2024-01-01"
//! description: "Optional one-liner for the meta tag"
//! ---
//!
//! # Hi
//! ```
//!
//! `title` and `date` are required — a source missing either fails the whole
//! build with an error naming the file. A `date` that is present but does not
//! parse is *not* fatal: the post sorts after every dated post and renders
//! the raw string.
//!
//! The slug is the filename minus the `.md` extension, unsanitized; it
//! becomes both the output filename stem and the URL path segment. Sources
//! live in one flat directory, so slugs are unique by construction.

use chrono::NaiveDate;
use pulldown_cmark::{Parser, html as md_html};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Post does not start with a `---` front-matter fence: {0}")]
    MissingFrontMatter(PathBuf),
    #[error("Unclosed `---` front-matter fence in {0}")]
    UnclosedFrontMatter(PathBuf),
    #[error("Invalid front-matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Front-matter schema. Missing `title` or `date` surfaces as a serde error
/// pointing at the offending file.
#[derive(Debug, Deserialize)]
struct FrontMatter {
    title: String,
    date: String,
    #[serde(default)]
    description: String,
}

/// A parsed, render-ready post.
#[derive(Debug, Clone)]
pub struct Post {
    /// Output filename stem and URL path segment.
    pub slug: String,
    pub title: String,
    /// Raw front-matter date string; see [`parse_date`] for the accepted
    /// shapes.
    pub date: String,
    /// Empty when absent; [`crate::generate`] falls back to the title for
    /// the meta description.
    pub description: String,
    /// Body rendered to an HTML fragment.
    pub content: String,
}

impl Post {
    /// Sort key: `None` for unparsable dates, which order after every
    /// parsed date.
    pub fn sort_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Read and parse every markdown post in `dir`, newest first.
///
/// A missing directory is a notice, not an error — the build proceeds with
/// zero posts. Any read or parse failure aborts the whole build.
pub fn read_posts(dir: &Path) -> Result<Vec<Post>, PostError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            println!("No {} directory found, skipping blog build.", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    // Sorted filename order makes the encounter order (and therefore the
    // tie-break order of the date sort) deterministic across filesystems.
    let mut sources: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_markdown(p))
        .collect();
    sources.sort();

    let mut posts = Vec::with_capacity(sources.len());
    for path in &sources {
        posts.push(parse_post(path)?);
    }

    // Newest first. `Option<NaiveDate>` orders `None` below every date, so
    // reversing parks undated posts after all dated ones; the sort is
    // stable, so ties keep encounter order.
    posts.sort_by(|a, b| b.sort_date().cmp(&a.sort_date()));

    Ok(posts)
}

pub(crate) fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

fn parse_post(path: &Path) -> Result<Post, PostError> {
    let raw = fs::read_to_string(path)?;
    let (block, body) = split_front_matter(&raw, path)?;
    let front: FrontMatter =
        serde_yaml::from_str(block).map_err(|source| PostError::FrontMatter {
            path: path.to_owned(),
            source,
        })?;

    let slug = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut content = String::new();
    md_html::push_html(&mut content, Parser::new(body));

    Ok(Post {
        slug,
        title: front.title,
        date: front.date,
        description: front.description,
        content,
    })
}

/// Split a source into its front-matter block and markdown body.
///
/// The opening fence must be the very first thing in the file; the closing
/// fence is the next line-leading `---`.
fn split_front_matter<'a>(input: &'a str, path: &Path) -> Result<(&'a str, &'a str), PostError> {
    const FENCE: &str = "---";
    let rest = input
        .strip_prefix(FENCE)
        .ok_or_else(|| PostError::MissingFrontMatter(path.to_owned()))?;
    let close = rest
        .find("\n---")
        .ok_or_else(|| PostError::UnclosedFrontMatter(path.to_owned()))?;

    let block = &rest[..close];
    let after = &rest[close + 1 + FENCE.len()..];
    // Drop the remainder of the closing fence line.
    let body = match after.find('\n') {
        Some(i) => &after[i + 1..],
        None => "",
    };
    Ok((block, body))
}

/// Parse a front-matter date: `YYYY-MM-DD`, or an RFC 3339 datetime.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.date_naive())
}

/// Long-form display date, locale-fixed to English: `January 1, 2024`.
/// Unparsable dates fall back to the raw string.
pub fn long_date(s: &str) -> String {
    match parse_date(s) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => s.to_string(),
    }
}
