//! Porthole - minimal HTTP/1.1 server
//!
//! Request parsing, routing and response serialization on raw TCP sockets,
//! plus a small file store behind `/files/`.

pub mod config;
pub mod http;
pub mod router;
pub mod server;
pub mod store;
