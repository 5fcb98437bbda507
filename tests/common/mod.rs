//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use export_host::HostConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};

/// Bind an ephemeral port on localhost.
async fn bind_local() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// An address nothing is listening on.
pub async fn unused_addr() -> SocketAddr {
    let (listener, addr) = bind_local().await;
    drop(listener);
    addr
}

/// Read one HTTP/1.1 request (head and `Content-Length` body) as text.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return String::from_utf8_lossy(&buf).into_owned(),
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < head_end + content_length {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

/// Start a mock dev server that answers every request with `response`
/// (a complete raw HTTP/1.1 response) and reports each raw request it saw.
pub async fn start_capturing_backend(
    response: &'static str,
) -> (SocketAddr, mpsc::UnboundedReceiver<String>) {
    let (listener, addr) = bind_local().await;
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let tx = tx.clone();
            tokio::spawn(async move {
                let request = read_request(&mut socket).await;
                let _ = tx.send(request);
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, rx)
}

/// Start a mock dev server that returns a fixed 200 response.
pub async fn start_mock_backend(body: &'static str) -> SocketAddr {
    let response: &'static str = Box::leak(
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
        .into_boxed_str(),
    );
    start_capturing_backend(response).await.0
}

/// Start a mock dev server that accepts connections and never answers.
pub async fn start_silent_backend() -> SocketAddr {
    let (listener, addr) = bind_local().await;

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// Start a mock dev server that sends a chunked head and one chunk, then
/// waits. `closed` fires when the proxy drops the connection.
pub async fn start_streaming_backend() -> (SocketAddr, oneshot::Receiver<()>) {
    let (listener, addr) = bind_local().await;
    let (closed_tx, closed_rx) = oneshot::channel();

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let _ = read_request(&mut socket).await;
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nfirst\r\n")
                .await;

            let mut chunk = [0u8; 64];
            loop {
                match tokio::time::timeout(Duration::from_secs(10), socket.read(&mut chunk)).await {
                    Ok(Ok(0)) | Ok(Err(_)) => {
                        let _ = closed_tx.send(());
                        break;
                    }
                    Ok(Ok(_)) => continue,
                    Err(_) => break,
                }
            }
        }
    });

    (addr, closed_rx)
}

/// Config serving the site directory `root` in static mode.
pub fn static_config(root: &Path) -> HostConfig {
    let mut config = HostConfig::default();
    config.site.content_root = root.to_string_lossy().into_owned();
    config
}

/// Config forwarding every request to `origin`.
pub fn proxy_config(origin: SocketAddr) -> HostConfig {
    let mut config = HostConfig::default();
    config.dev_server.proxy_to_dev_server = true;
    config.dev_server.origin = Some(format!("http://{origin}"));
    config
}

/// Write `files` (relative path, contents) under `root`.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, contents) in files {
        let path = root.join(path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }
}
