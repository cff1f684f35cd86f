//! HTTP-level tests for the edge responder: a stub origin and the responder
//! on ephemeral ports, exercised with a real client.

use m44rten_site::serve;
use std::io::Read;
use std::thread;
use tiny_http::{Header, Response, Server};

/// Spin a stub origin that echoes what it saw, marked so tests can tell a
/// relayed response from anything synthesized by the edge.
fn spawn_origin() -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    thread::spawn(move || {
        for mut request in server.incoming_requests() {
            let mut body = String::new();
            request.as_reader().read_to_string(&mut body).unwrap();
            let echo = format!("origin saw {} {} body={}", request.method(), request.url(), body);
            let response = Response::from_string(echo)
                .with_status_code(418)
                .with_header(Header::from_bytes("Content-Type", "text/x-origin").unwrap())
                .with_header(Header::from_bytes("X-Origin-Marker", "stub").unwrap());
            let _ = request.respond(response);
        }
    });
    format!("http://127.0.0.1:{port}")
}

/// Spin the edge responder against `origin`, returning its base URL.
fn spawn_edge(origin: String) -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    thread::spawn(move || {
        let _ = serve::run(server, &origin);
    });
    format!("http://127.0.0.1:{port}")
}

fn client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

#[test]
fn terminal_root_request_gets_the_card() {
    let edge = spawn_edge(spawn_origin());

    let reply = client()
        .get(format!("{edge}/"))
        .header("User-Agent", "curl/8.0")
        .send()
        .unwrap();

    assert_eq!(reply.status().as_u16(), 200);
    assert_eq!(
        reply.headers()["content-type"].to_str().unwrap(),
        "text/plain; charset=utf-8"
    );
    let body = reply.text().unwrap();
    assert!(body.contains("Maarten Van Steenkiste"));
    // The card, not an origin response.
    assert!(!body.contains("origin saw"));
}

#[test]
fn browser_root_request_is_relayed() {
    let edge = spawn_edge(spawn_origin());

    let reply = client()
        .get(format!("{edge}/"))
        .header("User-Agent", "Mozilla/5.0 (X11; Linux x86_64)")
        .send()
        .unwrap();

    assert_eq!(reply.status().as_u16(), 418);
    assert_eq!(
        reply.headers()["x-origin-marker"].to_str().unwrap(),
        "stub"
    );
    assert_eq!(
        reply.headers()["content-type"].to_str().unwrap(),
        "text/x-origin"
    );
    assert_eq!(reply.text().unwrap(), "origin saw GET / body=");
}

#[test]
fn non_root_terminal_request_is_relayed() {
    let edge = spawn_edge(spawn_origin());

    let reply = client()
        .get(format!("{edge}/blog/index.html"))
        .header("User-Agent", "curl/8.0")
        .send()
        .unwrap();

    assert_eq!(reply.status().as_u16(), 418);
    assert_eq!(
        reply.text().unwrap(),
        "origin saw GET /blog/index.html body="
    );
}

#[test]
fn method_and_body_survive_the_relay() {
    let edge = spawn_edge(spawn_origin());

    let reply = client()
        .post(format!("{edge}/submit"))
        .header("User-Agent", "curl/8.0")
        .body("ping")
        .send()
        .unwrap();

    assert_eq!(reply.status().as_u16(), 418);
    assert_eq!(reply.text().unwrap(), "origin saw POST /submit body=ping");
}
