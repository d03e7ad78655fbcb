//! Request routing.
//!
//! ```text
//! Request → Router → (path capture | header lookup | file store) → Response
//! ```
//!
//! Routes are checked in order and the first match wins:
//!
//! | Path            | Method | Response                                   |
//! |-----------------|--------|--------------------------------------------|
//! | `/`             | any    | 200, no headers                            |
//! | `/echo/<s>`     | any    | 200 `text/plain`, body `<s>`               |
//! | `/user-agent…`  | any    | 200 `text/plain`, body = User-Agent value  |
//! | `/files/<name>` | GET    | 200 `application/octet-stream` or 404      |
//! | `/files/<name>` | POST   | 201 or 404                                 |
//! | anything else   | any    | 404, no headers                            |

use tracing::{debug, warn};

use crate::http::matcher::capture_suffix;
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::store::FileStore;

const ECHO_PREFIX: &str = "/echo/";
const USER_AGENT_PREFIX: &str = "/user-agent";
const FILES_PREFIX: &str = "/files/";

/// Maps requests to responses. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct Router {
    store: FileStore,
}

impl Router {
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    /// Produces the response for `request`. Never fails: file store errors
    /// are logged and answered with 404.
    pub async fn route(&self, request: &Request) -> Response {
        let response = self.dispatch(request).await;

        debug!(
            method = %request.method,
            path = %request.path,
            status = response.status.as_u16(),
            "Handled request"
        );

        response
    }

    async fn dispatch(&self, request: &Request) -> Response {
        let path = request.path.as_str();

        if path == "/" {
            return Response::ok();
        }

        if path.starts_with(ECHO_PREFIX) {
            return Response::text(capture_suffix(path, ECHO_PREFIX));
        }

        if path.starts_with(USER_AGENT_PREFIX) {
            return Response::text(request.header("User-Agent"));
        }

        if path.starts_with(FILES_PREFIX) {
            let name = capture_suffix(path, FILES_PREFIX);
            match request.method {
                Method::GET => return self.read_file(name).await,
                Method::POST => return self.write_file(name, &request.body).await,
                _ => {}
            }
        }

        Response::not_found()
    }

    async fn read_file(&self, name: &str) -> Response {
        match self.store.read(name).await {
            Ok(contents) => Response::octet_stream(contents),
            Err(e) => {
                let reason = format!("{:#}", e);
                warn!(file = name, error = %reason, "File read failed");
                Response::not_found()
            }
        }
    }

    async fn write_file(&self, name: &str, contents: &[u8]) -> Response {
        match self.store.write(name, contents).await {
            Ok(()) => Response::created(),
            Err(e) => {
                let reason = format!("{:#}", e);
                warn!(file = name, error = %reason, "File write failed");
                Response::not_found()
            }
        }
    }
}
