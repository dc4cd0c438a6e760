//! Shared test utilities: fixture files and a canned local HTTP server

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::thread;

use tempfile::TempDir;
use utilkit::web::FetchOptions;

/// Write `content` to `name` inside a fresh temp dir
pub fn write_fixture(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    (temp_dir, path)
}

/// Client options for talking to [`TestServer`]
pub fn local_options() -> FetchOptions {
    FetchOptions {
        use_proxy: false,
        ..FetchOptions::default()
    }
}

#[derive(Clone)]
struct CannedResponse {
    content_type: &'static str,
    body: Vec<u8>,
}

/// Serves fixed bodies on 127.0.0.1; unknown paths get 404.
/// The accept thread is detached and lives until the test binary exits.
pub struct TestServer {
    base: String,
}

impl TestServer {
    pub fn builder() -> TestServerBuilder {
        TestServerBuilder {
            routes: HashMap::new(),
        }
    }

    /// Absolute URL for `path` (which starts with `/`)
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

pub struct TestServerBuilder {
    routes: HashMap<String, CannedResponse>,
}

impl TestServerBuilder {
    pub fn html(mut self, path: &str, body: &str) -> Self {
        self.routes.insert(
            path.to_string(),
            CannedResponse {
                content_type: "text/html; charset=utf-8",
                body: body.as_bytes().to_vec(),
            },
        );
        self
    }

    pub fn bytes(mut self, path: &str, content_type: &'static str, body: &[u8]) -> Self {
        self.routes.insert(
            path.to_string(),
            CannedResponse {
                content_type,
                body: body.to_vec(),
            },
        );
        self
    }

    pub fn start(self) -> TestServer {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let routes = self.routes;

        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let _ = respond(stream, &routes);
            }
        });

        TestServer { base }
    }
}

fn respond(mut stream: TcpStream, routes: &HashMap<String, CannedResponse>) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    // Drain headers; requests carry no body.
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 || header == "\r\n" || header == "\n" {
            break;
        }
    }

    let path = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string();

    let (status, content_type, body) = match routes.get(&path) {
        Some(canned) => ("200 OK", canned.content_type, canned.body.clone()),
        None => ("404 Not Found", "text/plain", b"not found".to_vec()),
    };

    write!(
        stream,
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    )?;
    stream.write_all(&body)?;
    stream.flush()
}
