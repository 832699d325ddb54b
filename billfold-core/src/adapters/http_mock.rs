//! Mock blob-store HTTP server for testing
//!
//! A minimal server that keeps files in memory and answers the three
//! verbs the HTTP adapter uses:
//! - HEAD /{path} -> 200 or 404
//! - GET /{path} -> 200 with the stored bytes, or 404
//! - PUT /{path} -> 204, storing the request body

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

type Files = Arc<Mutex<HashMap<String, Vec<u8>>>>;

/// Mock document store server for testing
pub struct MockStoreServer {
    port: u16,
    running: Arc<AtomicBool>,
    files: Files,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl MockStoreServer {
    /// Start a new mock server on a random available port
    pub fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let files: Files = Arc::new(Mutex::new(HashMap::new()));
        let files_clone = files.clone();

        // Non-blocking accept so the thread can notice shutdown
        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let files = files_clone.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &files);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            files,
            thread_handle: Some(thread_handle),
        })
    }

    /// Base URL the adapter should point at
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Seed a file directly
    pub fn insert(&self, path: &str, bytes: Vec<u8>) {
        self.files
            .lock()
            .expect("mock server mutex poisoned")
            .insert(path.to_string(), bytes);
    }

    /// Bytes currently stored at a path
    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.files
            .lock()
            .expect("mock server mutex poisoned")
            .get(path)
            .cloned()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockStoreServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, files: &Files) {
    let Some((method, path, body)) = read_request(&mut stream) else {
        send_response(&mut stream, 400, "Bad Request", &[]);
        return;
    };

    let key = path.trim_start_matches('/').to_string();
    match method.as_str() {
        "HEAD" => {
            let found = files
                .lock()
                .expect("mock server mutex poisoned")
                .contains_key(&key);
            if found {
                send_response(&mut stream, 200, "OK", &[]);
            } else {
                send_response(&mut stream, 404, "Not Found", &[]);
            }
        }
        "GET" => {
            let bytes = files
                .lock()
                .expect("mock server mutex poisoned")
                .get(&key)
                .cloned();
            match bytes {
                Some(bytes) => send_response(&mut stream, 200, "OK", &bytes),
                None => send_response(&mut stream, 404, "Not Found", &[]),
            }
        }
        "PUT" => {
            files
                .lock()
                .expect("mock server mutex poisoned")
                .insert(key, body);
            send_response(&mut stream, 204, "No Content", &[]);
        }
        _ => send_response(&mut stream, 405, "Method Not Allowed", &[]),
    }
}

/// Read one request: method, path and full body per Content-Length
fn read_request(stream: &mut TcpStream) -> Option<(String, String, Vec<u8>)> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    // Read until the header terminator is in the buffer
    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buffer.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buffer) {
            break pos;
        }
        if buffer.len() > 1 << 20 {
            return None;
        }
    };

    let header_text = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut lines = header_text.lines();
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = header_end + 4;
    while buffer.len() < body_start + content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buffer.extend_from_slice(&chunk[..n]);
    }

    let body = buffer[body_start..body_start + content_length].to_vec();
    Some((method, path, body))
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|w| w == b"\r\n\r\n")
}

fn send_response(stream: &mut TcpStream, code: u16, reason: &str, body: &[u8]) {
    let header = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
        code,
        reason,
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}
