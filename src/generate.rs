//! HTML page generation and asset propagation.
//!
//! Takes the parsed posts and the shared HTML shell and writes the output
//! directory:
//!
//! ```text
//! blog/
//! ├── index.html        # Listing of all posts, newest first
//! ├── hello.html        # One page per post (named after the slug)
//! └── portrait.jpg      # Non-markdown source files, copied byte-for-byte
//! ```
//!
//! ## The template shell
//!
//! The shell is an opaque HTML file with five literal tokens — `{{TITLE}}`,
//! `{{META_DESCRIPTION}}`, `{{BACK_LINK}}`, `{{BACK_TEXT}}`, `{{CONTENT}}` —
//! each of which must appear exactly once. Substitution replaces only the
//! first occurrence of each token; that "exactly once" rule is a template
//! authoring constraint, not something checked at runtime.
//!
//! The markup that goes *into* `{{CONTENT}}` (the article scaffold, the
//! index listing) is generated with maud, so per-post interpolation is
//! escaped automatically while the already-rendered markdown fragment is
//! spliced in raw.
//!
//! ## Failure model
//!
//! Single-threaded, fail-fast: the first read, parse, or write error aborts
//! the build with no guarantee about pages not yet written. Reruns overwrite
//! unconditionally, so a rebuild on unchanged input is byte-identical.

use crate::posts::{self, Post, PostError};
use maud::{PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Post(#[from] PostError),
    #[error("Failed to read template {path}: {source}")]
    Template {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The shared HTML shell, loaded once per build.
pub struct Template(String);

/// Values substituted into the shell's tokens for one page.
struct PageVars<'a> {
    title: &'a str,
    meta_description: &'a str,
    back_link: &'a str,
    back_text: &'a str,
    content: &'a str,
}

impl Template {
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        fs::read_to_string(path)
            .map(Template)
            .map_err(|source| BuildError::Template {
                path: path.to_owned(),
                source,
            })
    }

    /// Literal first-occurrence replacement per token.
    fn render(&self, page: &PageVars) -> String {
        self.0
            .replacen("{{TITLE}}", page.title, 1)
            .replacen("{{META_DESCRIPTION}}", page.meta_description, 1)
            .replacen("{{BACK_LINK}}", page.back_link, 1)
            .replacen("{{BACK_TEXT}}", page.back_text, 1)
            .replacen("{{CONTENT}}", page.content, 1)
    }
}

/// Run the full pipeline: parse posts, render every page, copy assets.
pub fn build(posts_dir: &Path, output_dir: &Path, template_path: &Path) -> Result<(), BuildError> {
    let template = Template::load(template_path)?;
    let posts = posts::read_posts(posts_dir)?;

    fs::create_dir_all(output_dir)?;

    for post in &posts {
        let page = render_post_page(post, &template);
        fs::write(output_dir.join(format!("{}.html", post.slug)), page)?;
        println!("Generated {}.html", post.slug);
    }

    let index = render_index_page(&posts, &template);
    fs::write(output_dir.join("index.html"), index)?;
    println!("Generated index.html");

    copy_assets(posts_dir, output_dir)?;

    println!("Build complete: {} post(s)", posts.len());
    Ok(())
}

/// One post page: article scaffold inside the shell, back link to the
/// listing.
fn render_post_page(post: &Post, template: &Template) -> String {
    let article = html! {
        article {
            header {
                h1 { (post.title) }
                p class="date" { (posts::long_date(&post.date)) }
            }
            div class="content" {
                (PreEscaped(&post.content))
            }
        }
    };

    let meta = if post.description.is_empty() {
        &post.title
    } else {
        &post.description
    };

    template.render(&PageVars {
        title: &post.title,
        meta_description: meta,
        back_link: "/blog/",
        back_text: "Notes",
        content: &article.into_string(),
    })
}

/// The index page: every post as a link plus its long-form date, or a
/// placeholder line when there are no posts.
fn render_index_page(posts: &[Post], template: &Template) -> String {
    let listing = html! {
        h1 { "Notes" }
        ul class="posts-list" {
            @if posts.is_empty() {
                li { "No posts yet." }
            }
            @for post in posts {
                li {
                    a href={ "/blog/" (post.slug) ".html" } { (post.title) }
                    " "
                    span class="date" { (posts::long_date(&post.date)) }
                }
            }
        }
    };

    template.render(&PageVars {
        title: "Notes",
        meta_description: "Notes by Maarten Van Steenkiste",
        back_link: "/",
        back_text: "Home",
        content: &listing.into_string(),
    })
}

/// Copy every non-markdown file in the source directory into the output,
/// overwriting. No filtering beyond "not `.md`".
fn copy_assets(posts_dir: &Path, output_dir: &Path) -> Result<(), BuildError> {
    let entries = match fs::read_dir(posts_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_file() && !posts::is_markdown(&path) {
            fs::copy(&path, output_dir.join(entry.file_name()))?;
            println!("Copied {}", entry.file_name().to_string_lossy());
        }
    }
    Ok(())
}
