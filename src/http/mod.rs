//! HTTP/1.1 protocol implementation on raw sockets.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection loop implementing the read/route/write state machine
//! - **`parser`**: Cuts frames out of the read buffer and parses them into requests
//! - **`matcher`**: Path suffix captures and first-match header lookup
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for one complete frame
//!        └──────┬──────┘
//!               │ Request parsed          (peer closed → Closing)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route to a response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               └─ → Reading (same connection)
//!
//!   Closing → shut down write side → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use porthole::http::connection::Connection;
//! use porthole::router::Router;
//! use porthole::store::FileStore;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!     let router = Arc::new(Router::new(FileStore::new(None)));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = router.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, router);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod matcher;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
