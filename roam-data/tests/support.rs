//! A one-shot HTTP server answering with a canned response.
//!
//! The server accepts a single connection on a loopback port, records the
//! request line and replies with the configured status and JSON body.

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A background server that answers exactly one request.
pub struct CannedServer {
    address: SocketAddr,
    base_url: String,
    requests: Receiver<String>,
    handle: Option<JoinHandle<()>>,
}

impl CannedServer {
    /// Serve `body` with HTTP `status` to the first client that connects.
    pub fn respond_once(status: u16, body: impl Into<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap_or_else(|err| {
            panic!("failed to bind loopback listener: {err}");
        });
        let address = listener.local_addr().unwrap_or_else(|err| {
            panic!("failed to read listener address: {err}");
        });
        let body = body.into();
        let (sender, requests) = mpsc::channel();
        let handle = thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                let request_line = answer(stream, status, &body);
                let _ = sender.send(request_line);
            }
        });

        Self {
            address,
            base_url: format!("http://{address}/maps/api/distancematrix/json"),
            requests,
            handle: Some(handle),
        }
    }

    /// Endpoint URL to configure the provider with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The request line the server received, e.g. `GET /path?query HTTP/1.1`.
    pub fn request_line(&self) -> String {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .unwrap_or_else(|err| panic!("server did not record a request: {err}"))
    }
}

impl Drop for CannedServer {
    fn drop(&mut self) {
        // Unblock `accept` if no client ever connected.
        let _ = TcpStream::connect(self.address);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn answer(stream: TcpStream, status: u16, body: &str) -> String {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    let _ = reader.read_line(&mut request_line);
    let mut header = String::new();
    while reader.read_line(&mut header).is_ok_and(|read| read > 2) {
        header.clear();
    }

    let mut stream = reader.into_inner();
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {length}\r\nConnection: close\r\n\r\n{body}",
        reason = if status < 400 { "OK" } else { "Error" },
        length = body.len(),
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
    request_line.trim_end().to_owned()
}

/// A loopback URL with nothing listening behind it.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap_or_else(|err| {
        panic!("failed to bind loopback listener: {err}");
    });
    let address = listener.local_addr().unwrap_or_else(|err| {
        panic!("failed to read listener address: {err}");
    });
    drop(listener);
    format!("http://{address}/maps/api/distancematrix/json")
}
