//! The ANSI profile card served to terminal clients.
//!
//! A fixed-width text block: an ASCII portrait stacked above a column of
//! info lines (name, tagline, role, a rule, contact rows), everything
//! optically centered on one axis plus a constant left margin.
//!
//! Two kinds of escape sequences are embedded:
//!
//! - SGR attributes (`ESC [ … m`) for bold/dim/color,
//! - OSC 8 hyperlinks (`ESC ] 8 ; ; url BEL text ESC ] 8 ; ; BEL`), which
//!   modern terminals render as clickable links and older ones degrade to
//!   the plain display text.
//!
//! Centering works on *visible* columns: [`visible_width`] skips both kinds
//! of sequence when measuring a line. The content width is taken from the
//! widest rendered info line rather than hand-counted, so editing a contact
//! row re-centers everything automatically.
//!
//! The card depends on nothing per-request; [`render`] is called once at
//! server startup and the result shared by every matching response.

const PORTRAIT: &str = include_str!("../assets/portrait.txt");

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const BLUE_BOLD: &str = "\x1b[1;34m";
const RESET: &str = "\x1b[0m";

/// Constant left margin applied to every line, in columns.
const MARGIN: usize = 3;
/// Columns reserved for the label in a contact row.
const LABEL_WIDTH: usize = 11;
/// Visible width of the dim horizontal rule.
const RULE_WIDTH: usize = 41;

/// OSC 8 hyperlink with the given display text.
fn link(url: &str, text: &str) -> String {
    format!("\x1b]8;;{url}\x07{text}\x1b]8;;\x07")
}

fn pad(n: usize) -> String {
    " ".repeat(n)
}

/// Count the columns a line occupies on screen, skipping CSI sequences
/// (`ESC [` through the final byte) and OSC sequences (`ESC ]` through BEL
/// or `ESC \`).
pub fn visible_width(line: &str) -> usize {
    let mut width = 0;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            width += 1;
            continue;
        }
        match chars.next() {
            Some('[') => {
                for c in chars.by_ref() {
                    if ('\u{40}'..='\u{7e}').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    width
}

enum Align {
    /// Centered against the content width.
    Center,
    /// Flush against the left margin (contact rows).
    Left,
}

struct Line {
    text: String,
    align: Align,
}

fn center(text: String) -> Line {
    Line {
        text,
        align: Align::Center,
    }
}

fn left(text: String) -> Line {
    Line {
        text,
        align: Align::Left,
    }
}

fn blank() -> Line {
    left(String::new())
}

/// A contact row: colored label padded to a fixed column, then a hyperlink.
fn contact_row(label: &str, url: &str, text: &str) -> Line {
    left(format!(
        "{CYAN}{label}{RESET}{}{}",
        pad(LABEL_WIDTH.saturating_sub(label.len())),
        link(url, text)
    ))
}

fn info_lines() -> Vec<Line> {
    vec![
        center(format!("{BOLD}Maarten Van Steenkiste{RESET}")),
        blank(),
        center(format!(
            "{DIM}Husband · Father · Maker · Essentialist{RESET}"
        )),
        blank(),
        center(format!(
            "Software Engineer at {BLUE_BOLD}{}{RESET}",
            link("https://craftzing.com", "Craftzing")
        )),
        blank(),
        center(format!("{DIM}{}{RESET}", "─".repeat(RULE_WIDTH))),
        blank(),
        contact_row("GitHub", "https://github.com/m44rten1", "github.com/m44rten1"),
        contact_row(
            "Email",
            "mailto:m.vansteenkiste@me.com",
            "m.vansteenkiste@me.com",
        ),
        contact_row(
            "LinkedIn",
            "https://www.linkedin.com/in/maarten-van-steenkiste",
            "linkedin.com/in/maarten-van-steenkiste",
        ),
        contact_row("Notes", "https://m44rten.com/blog/", "m44rten.com/blog/"),
    ]
}

/// Lay out the full card. Called once per process, before the request loop.
pub fn render() -> String {
    let info = info_lines();

    // The centering axis follows the widest info line (in practice the
    // LinkedIn row), so nothing here is hand-measured.
    let content_width = info
        .iter()
        .map(|line| visible_width(&line.text))
        .max()
        .unwrap_or(0);
    let portrait_width = PORTRAIT.lines().map(visible_width).max().unwrap_or(0);
    let portrait_offset = MARGIN + content_width.saturating_sub(portrait_width) / 2;

    let mut out = String::new();
    for line in PORTRAIT.lines() {
        if !line.is_empty() {
            out.push_str(&pad(portrait_offset));
            out.push_str(line);
        }
        out.push('\n');
    }
    out.push('\n');

    for line in &info {
        if !line.text.is_empty() {
            let indent = match line.align {
                Align::Center => {
                    MARGIN + content_width.saturating_sub(visible_width(&line.text)) / 2
                }
                Align::Left => MARGIN,
            };
            out.push_str(&pad(indent));
            out.push_str(&line.text);
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_width_plain_text() {
        assert_eq!(visible_width("hello"), 5);
        assert_eq!(visible_width(""), 0);
    }

    #[test]
    fn visible_width_skips_sgr() {
        assert_eq!(visible_width("\x1b[1mabc\x1b[0m"), 3);
        assert_eq!(visible_width("\x1b[1;34mX\x1b[0m"), 1);
    }

    #[test]
    fn visible_width_skips_osc8() {
        let linked = link("https://example.com", "example");
        assert_eq!(visible_width(&linked), "example".len());
    }

    #[test]
    fn visible_width_counts_wide_glyph_runs() {
        // The rule and tagline use non-ASCII glyphs; each counts one column.
        assert_eq!(visible_width("─────"), 5);
        assert_eq!(visible_width("a · b"), 5);
    }

    #[test]
    fn link_embeds_url_and_text() {
        let l = link("https://craftzing.com", "Craftzing");
        assert!(l.starts_with("\x1b]8;;https://craftzing.com\x07"));
        assert!(l.contains("Craftzing"));
        assert!(l.ends_with("\x1b]8;;\x07"));
    }

    #[test]
    fn card_contains_the_name() {
        assert!(render().contains("Maarten Van Steenkiste"));
    }

    #[test]
    fn every_line_respects_the_margin() {
        for line in render().lines().filter(|l| !l.is_empty()) {
            assert!(
                line.starts_with(&pad(MARGIN)),
                "line missing left margin: {line:?}"
            );
        }
    }

    #[test]
    fn centered_lines_are_centered_on_the_content_width() {
        let info = info_lines();
        let content_width = info
            .iter()
            .map(|l| visible_width(&l.text))
            .max()
            .unwrap();

        let card = render();
        let name_line = card
            .lines()
            .find(|l| l.contains("Maarten Van Steenkiste"))
            .unwrap();
        let indent = name_line.len() - name_line.trim_start().len();
        let name_width = visible_width(name_line.trim_start());
        assert_eq!(indent, MARGIN + (content_width - name_width) / 2);
    }

    #[test]
    fn portrait_is_narrower_than_the_content() {
        let portrait_width = PORTRAIT.lines().map(visible_width).max().unwrap();
        let content_width = info_lines()
            .iter()
            .map(|l| visible_width(&l.text))
            .max()
            .unwrap();
        assert!(portrait_width <= content_width);
    }
}
