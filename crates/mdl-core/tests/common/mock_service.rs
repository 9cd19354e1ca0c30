//! Minimal HTTP/1.1 server standing in for the resolution service and the CDN.
//!
//! `GET /resolve?...` answers with the next scripted status (the last one
//! repeats once the script is exhausted). `GET /archive.zip` serves the
//! configured archive bytes. Anything else is a 404.

use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// One scripted answer to a status query.
#[derive(Debug, Clone)]
pub enum Status {
    Pending,
    /// Ready, pointing at this server's `/archive.zip`.
    Ready,
    /// Ready, pointing at a path this server answers with 404.
    ReadyMissing,
    Failed(&'static str),
    /// 200 with a body that is not a status payload.
    Malformed,
    /// Bare HTTP error status.
    Http(u16),
}

struct Shared {
    script: Mutex<VecDeque<Status>>,
    last: Mutex<Status>,
    archive: Vec<u8>,
    status_queries: AtomicUsize,
    requests: Mutex<Vec<String>>,
}

pub struct MockService {
    base: String,
    shared: Arc<Shared>,
}

impl MockService {
    /// Starts the server in a background thread. It runs until the process exits.
    pub fn start(script: Vec<Status>, archive: Vec<u8>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let base = format!("http://127.0.0.1:{}", port);
        let last = script.last().cloned().unwrap_or(Status::Pending);
        let shared = Arc::new(Shared {
            script: Mutex::new(script.into()),
            last: Mutex::new(last),
            archive,
            status_queries: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        });

        let server_shared = Arc::clone(&shared);
        let server_base = base.clone();
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let shared = Arc::clone(&server_shared);
                let base = server_base.clone();
                thread::spawn(move || handle(stream, &shared, &base));
            }
        });

        Self { base, shared }
    }

    /// Endpoint to configure as the resolution service URL.
    pub fn resolve_url(&self) -> String {
        format!("{}/resolve", self.base)
    }

    pub fn archive_url(&self) -> String {
        format!("{}/archive.zip", self.base)
    }

    pub fn status_queries(&self) -> usize {
        self.shared.status_queries.load(Ordering::SeqCst)
    }

    /// Raw request heads received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.shared.requests.lock().unwrap().clone()
    }
}

fn next_status(shared: &Shared) -> Status {
    let mut script = shared.script.lock().unwrap();
    match script.pop_front() {
        Some(s) => s,
        None => shared.last.lock().unwrap().clone(),
    }
}

fn respond(stream: &mut TcpStream, status: &str, content_type: &str, body: &[u8]) {
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

fn handle(mut stream: TcpStream, shared: &Shared, base: &str) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]).into_owned();
    shared.requests.lock().unwrap().push(request.clone());

    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let path = target.split('?').next().unwrap_or("/");

    match path {
        "/resolve" => {
            shared.status_queries.fetch_add(1, Ordering::SeqCst);
            let json = |body: String| body.into_bytes();
            match next_status(shared) {
                Status::Pending => respond(
                    &mut stream,
                    "200 OK",
                    "application/json",
                    &json(r#"{"status":"pending"}"#.to_string()),
                ),
                Status::Ready => respond(
                    &mut stream,
                    "200 OK",
                    "application/json",
                    &json(format!(r#"{{"status":"ready","url":"{}/archive.zip"}}"#, base)),
                ),
                Status::ReadyMissing => respond(
                    &mut stream,
                    "200 OK",
                    "application/json",
                    &json(format!(r#"{{"status":"ready","url":"{}/missing.zip"}}"#, base)),
                ),
                Status::Failed(reason) => respond(
                    &mut stream,
                    "200 OK",
                    "application/json",
                    &json(format!(r#"{{"status":"failed","reason":"{}"}}"#, reason)),
                ),
                Status::Malformed => {
                    respond(&mut stream, "200 OK", "text/html", b"<html>maintenance</html>")
                }
                Status::Http(code) => {
                    respond(&mut stream, &format!("{} Error", code), "text/plain", b"")
                }
            }
        }
        "/archive.zip" => respond(&mut stream, "200 OK", "application/zip", &shared.archive),
        _ => respond(&mut stream, "404 Not Found", "text/plain", b"not found"),
    }
}
