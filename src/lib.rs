//! # m44rten-site
//!
//! Static site pipeline and terminal edge responder for m44rten.com.
//!
//! Two independent components share this crate; they have no runtime state
//! in common beyond "turn input text into formatted output text":
//!
//! 1. **Content pipeline** (`m44rten-site build`): converts a directory of
//!    markdown posts into one HTML page per post plus an index, and copies
//!    sibling assets (images, etc.) into the output unchanged.
//! 2. **Edge responder** (`m44rten-site serve`): answers `GET /` from
//!    terminal-style HTTP clients (curl, wget, httpie, …) with a centered
//!    ANSI profile card, and proxies every other request through to the
//!    hosting origin untouched.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`posts`] | Post discovery, front-matter parsing, markdown rendering, date ordering |
//! | [`generate`] | Template substitution, post/index page rendering, asset propagation |
//! | [`classify`] | Terminal-vs-browser user-agent classification |
//! | [`card`] | One-time ANSI profile card layout |
//! | [`serve`] | HTTP request loop: card responses + origin passthrough |
//!
//! # Design Decisions
//!
//! ## Literal placeholder substitution, not a template engine
//!
//! The outer HTML shell (`blog-template.html`) is an opaque string with five
//! `{{…}}` tokens, each appearing exactly once. Rendering is literal
//! first-occurrence replacement — no template language, no escaping rules to
//! learn, and the shell can be edited as plain HTML/CSS. The *inner* markup
//! (the article scaffold, the index listing) is generated with
//! [maud](https://maud.lambda.xyz/), so the parts that vary per post get
//! compile-time checking and automatic escaping.
//!
//! ## Full rebuilds only
//!
//! Every `build` run rewrites the whole output directory. With a handful of
//! posts there is nothing to gain from incremental builds, and unconditional
//! overwrites make reruns byte-for-byte idempotent. Concurrent builds over
//! the same output directory are unsupported.
//!
//! ## The profile card is computed once
//!
//! The edge responder's ANSI card depends on nothing in the request beyond
//! the classification decision, so it is laid out once at startup and shared
//! by every response. Layout widths are measured from the actual rendered
//! lines rather than hand-counted, so editing the contact rows cannot
//! silently break the centering.

pub mod card;
pub mod classify;
pub mod generate;
pub mod posts;
pub mod serve;

#[cfg(test)]
pub(crate) mod test_helpers;
