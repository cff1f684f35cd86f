//! Shared test utilities for the m44rten-site test suite.
//!
//! Unit tests build their fixtures in `tempfile::TempDir`s: a posts
//! directory populated by [`write_post`] and the minimal five-token shell
//! in [`TEMPLATE`].

use std::fs;
use std::path::Path;

/// A minimal but real template shell: every token exactly once, plus some
/// surrounding text tests can assert is preserved verbatim.
pub const TEMPLATE: &str = "\
<!doctype html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<title>{{TITLE}} — m44rten.com</title>
<meta name=\"description\" content=\"{{META_DESCRIPTION}}\">
</head>
<body>
<nav><a href=\"{{BACK_LINK}}\">{{BACK_TEXT}}</a></nav>
<main>
{{CONTENT}}
</main>
</body>
</html>
";

/// Write a post source with the standard front-matter shape.
pub fn write_post(dir: &Path, name: &str, title: &str, date: &str, body: &str) {
    let text = format!("---\ntitle: \"{title}\"\ndate: \"{date}\"\n---\n\n{body}\n");
    fs::write(dir.join(name), text).unwrap();
}
