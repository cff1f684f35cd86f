//! The edge request loop.
//!
//! Built on `tiny_http`: one blocking accept loop, no state shared between
//! requests beyond the profile card rendered once at startup. Each request
//! resolves to one of two outcomes:
//!
//! 1. Root path + terminal-style client → `200 text/plain; charset=utf-8`
//!    with the profile card body.
//! 2. Anything else → forwarded to the configured origin with method,
//!    headers, and body preserved; the origin's status, headers, and body
//!    are relayed verbatim.
//!
//! There is no retry or timeout layer on the passthrough: an upstream
//! failure is logged per-request and the client connection drops.

use crate::{card, classify};
use reqwest::blocking::Client;
use std::io::Cursor;
use thiserror::Error;
use tiny_http::{Header, Request, Response, Server, StatusCode};

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to bind {addr}: {reason}")]
    Bind { addr: String, reason: String },
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("Unsupported method: {0}")]
    Method(String),
}

/// Bind `listen` and handle requests until the process is killed.
///
/// `origin` is the base URL browser traffic passes through to; request URLs
/// are appended to it as-is.
pub fn serve(listen: &str, origin: &str) -> Result<(), ServeError> {
    let server = Server::http(listen).map_err(|e| ServeError::Bind {
        addr: listen.to_string(),
        reason: e.to_string(),
    })?;

    println!("Listening on http://{listen} (origin: {origin})");

    run(server, origin)
}

/// Drive an already-bound server until it is unblocked. Split from
/// [`serve`] so tests can bind an ephemeral port and read the address back
/// before the loop starts.
pub fn run(server: Server, origin: &str) -> Result<(), ServeError> {
    // Rendered once; immutable for the life of the process.
    let profile_card = card::render();

    // A verbatim relay must not follow redirects on the origin's behalf.
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    let origin = origin.trim_end_matches('/');

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &client, origin, &profile_card) {
            eprintln!("request error: {e}");
        }
    }

    Ok(())
}

fn handle_request(
    request: Request,
    client: &Client,
    origin: &str,
    profile_card: &str,
) -> Result<(), ServeError> {
    let user_agent = header_value(&request, "user-agent");

    if wants_card(request.url(), user_agent.as_deref()) {
        let response = Response::from_string(profile_card).with_header(
            Header::from_bytes("Content-Type", "text/plain; charset=utf-8").unwrap(),
        );
        request.respond(response)?;
        return Ok(());
    }

    forward(request, client, origin)
}

/// The routing decision: root path (query string ignored) from a terminal
/// client gets the card, everything else passes through.
fn wants_card(url: &str, user_agent: Option<&str>) -> bool {
    let path = url.split('?').next().unwrap_or(url);
    path == "/" && classify::is_terminal_client(user_agent)
}

fn header_value(request: &Request, name: &str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str().to_string())
}

/// Relay a request to the origin and the origin's response back, unmodified
/// apart from connection-scoped framing headers.
fn forward(mut request: Request, client: &Client, origin: &str) -> Result<(), ServeError> {
    let method = reqwest::Method::from_bytes(request.method().as_str().as_bytes())
        .map_err(|_| ServeError::Method(request.method().to_string()))?;
    let url = format!("{origin}{}", request.url());

    let mut body = Vec::new();
    request.as_reader().read_to_end(&mut body)?;

    let mut upstream = client.request(method, &url);
    for header in request.headers() {
        let field = header.field.as_str();
        // The origin gets its own Host from the rewritten URL.
        if field.as_str().eq_ignore_ascii_case("host") {
            continue;
        }
        upstream = upstream.header(field.as_str(), header.value.as_str());
    }
    let reply = upstream.body(body).send()?;

    let status = StatusCode(reply.status().as_u16());
    let mut headers = Vec::new();
    for (name, value) in reply.headers() {
        if is_connection_scoped(name.as_str()) {
            continue;
        }
        if let Ok(header) = Header::from_bytes(name.as_str(), value.as_bytes()) {
            headers.push(header);
        }
    }

    let bytes = reply.bytes()?.to_vec();
    let len = bytes.len();
    request.respond(Response::new(status, headers, Cursor::new(bytes), Some(len), None))?;
    Ok(())
}

/// Headers tied to the upstream connection; tiny_http produces its own
/// framing for the relayed response.
fn is_connection_scoped(name: &str) -> bool {
    matches!(
        name,
        "connection"
            | "content-length"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}
