//! End-to-end tests over real sockets.

use std::path::PathBuf;
use std::time::Duration;

use porthole::router::Router;
use porthole::server::listener::serve;
use porthole::store::FileStore;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

async fn start_server(directory: Option<PathBuf>) -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = Router::new(FileStore::new(directory));

    tokio::spawn(async move {
        let _ = serve(listener, router).await;
    });

    addr
}

/// Reads exactly one response, using Content-Length when present.
async fn read_response(stream: &mut TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_string();
            let length = head
                .split("\r\n")
                .find_map(|line| line.strip_prefix("Content-Length: "))
                .map(|v| v.parse::<usize>().unwrap())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                buf.truncate(end + 4 + length);
                return buf;
            }
        }

        let n = timeout(Duration::from_secs(5), stream.read(&mut chunk))
            .await
            .expect("timed out waiting for response")
            .unwrap();
        assert!(n > 0, "server closed before a full response");
        buf.extend_from_slice(&chunk[..n]);
    }
}

#[tokio::test]
async fn test_server_echo_over_tcp() {
    let addr = start_server(None).await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    stream.write_all(b"GET /echo/abc HTTP/1.1\r\n\r\n").await.unwrap();
    let response = read_response(&mut stream).await;

    assert_eq!(
        response,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc".to_vec()
    );
}

#[tokio::test]
async fn test_server_serves_several_requests_per_connection() {
    let addr = start_server(None).await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    stream.write_all(b"GET / HTTP/1.1\r\n\r\n").await.unwrap();
    assert_eq!(read_response(&mut stream).await, b"HTTP/1.1 200 OK\r\n\r\n".to_vec());

    stream
        .write_all(b"GET /user-agent HTTP/1.1\r\nUser-Agent: tester\r\n\r\n")
        .await
        .unwrap();
    assert_eq!(
        read_response(&mut stream).await,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 6\r\n\r\ntester".to_vec()
    );

    stream.write_all(b"GET /missing HTTP/1.1\r\n\r\n").await.unwrap();
    assert_eq!(
        read_response(&mut stream).await,
        b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec()
    );
}

#[tokio::test]
async fn test_server_waits_for_split_body() {
    let dir = std::env::temp_dir().join(format!("porthole-server-split-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let addr = start_server(Some(dir.clone())).await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    stream
        .write_all(b"POST /files/split.txt HTTP/1.1\r\nContent-Length: 11\r\n\r\nhello")
        .await
        .unwrap();
    stream.flush().await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    stream.write_all(b" world").await.unwrap();

    let response = read_response(&mut stream).await;
    assert!(response.starts_with(b"HTTP/1.1 201 Created\r\n"));

    stream.write_all(b"GET /files/split.txt HTTP/1.1\r\n\r\n").await.unwrap();
    let response = read_response(&mut stream).await;
    assert!(response.ends_with(b"\r\n\r\nhello world"));

    std::fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn test_server_closes_after_peer_closes() {
    let addr = start_server(None).await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    stream.write_all(b"GET /echo/bye HTTP/1.1\r\n\r\n").await.unwrap();
    stream.shutdown().await.unwrap();

    let mut rest = Vec::new();
    timeout(Duration::from_secs(5), stream.read_to_end(&mut rest))
        .await
        .expect("server did not close its side")
        .unwrap();

    assert!(rest.ends_with(b"\r\n\r\nbye"));
}

#[tokio::test]
async fn test_server_answers_unterminated_request_on_close() {
    let addr = start_server(None).await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    stream.write_all(b"GET /echo/partial HTTP/1.1\r\n").await.unwrap();
    stream.shutdown().await.unwrap();

    let mut rest = Vec::new();
    timeout(Duration::from_secs(5), stream.read_to_end(&mut rest))
        .await
        .expect("server did not close its side")
        .unwrap();

    assert_eq!(
        rest,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 7\r\n\r\npartial".to_vec()
    );
}

#[tokio::test]
async fn test_server_post_with_lowercase_content_length() {
    let dir = std::env::temp_dir().join(format!("porthole-server-lc-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let addr = start_server(Some(dir.clone())).await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    stream
        .write_all(b"POST /files/lc.txt HTTP/1.1\r\ncontent-length: 5\r\n\r\nhel")
        .await
        .unwrap();
    stream.flush().await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    stream.write_all(b"lo").await.unwrap();

    assert_eq!(
        read_response(&mut stream).await,
        b"HTTP/1.1 201 Created\r\nContent-Type: application/octet-stream\r\nContent-Length: 0\r\n\r\n"
            .to_vec()
    );

    // Nothing else may follow the single response
    stream.write_all(b"GET /files/lc.txt HTTP/1.1\r\n\r\n").await.unwrap();
    assert_eq!(
        read_response(&mut stream).await,
        b"HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: 5\r\n\r\nhello"
            .to_vec()
    );
    assert_eq!(std::fs::read(dir.join("lc.txt")).unwrap(), b"hello".to_vec());

    std::fs::remove_dir_all(dir).unwrap();
}
