//! Terminal-vs-browser client classification.
//!
//! A pure, total function over the request's optional `user-agent` header:
//! case-folded substring match against a fixed allow-list of command-line
//! HTTP client signatures. Browser strings are deliberately *not* listed, so
//! anything unrecognized — including an absent header — classifies as
//! browser-like and passes through to the origin.

/// Signatures of known command-line HTTP clients and libraries.
///
/// `fetch/` keeps its slash so the BSD `fetch` tool does not collide with
/// browser `Fetch` API strings.
pub const TERMINAL_AGENTS: &[&str] = &[
    "curl",
    "wget",
    "httpie",
    "fetch/",
    "lwp-request",
    "python-requests",
    "go-http-client",
];

/// Whether this `user-agent` value belongs to a terminal-style client.
pub fn is_terminal_client(user_agent: Option<&str>) -> bool {
    let ua = match user_agent {
        Some(ua) => ua.to_ascii_lowercase(),
        None => return false,
    };
    TERMINAL_AGENTS.iter().any(|agent| ua.contains(agent))
}
