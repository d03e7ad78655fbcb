use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::http::parser::{frame_len, parse_http_request};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    router: Arc<Router>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closing,
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            router,
            state: ConnectionState::Reading,
        }
    }

    /// Serves frames one at a time until the peer closes, then shuts down
    /// the local write side.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_request().await? {
                    Some(req) => {
                        self.state = ConnectionState::Processing(req);
                    }
                    None => {
                        self.state = ConnectionState::Closing;
                    }
                },

                ConnectionState::Processing(req) => {
                    let response = self.router.route(req).await;

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.state = ConnectionState::Reading;
                }

                ConnectionState::Closing => {
                    // The peer may already be fully gone
                    if let Err(e) = self.stream.shutdown().await {
                        debug!("Shutdown after peer close failed: {}", e);
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Returns the next request, or `None` once the peer has closed and
    /// nothing is left in the buffer.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        loop {
            if let Some(len) = frame_len(&self.buffer) {
                let frame = self.buffer.split_to(len);
                return Ok(Some(parse_http_request(&frame)));
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                if self.buffer.is_empty() {
                    return Ok(None);
                }

                // Whatever arrived before the close is one last frame
                let frame = self.buffer.split();
                return Ok(Some(parse_http_request(&frame)));
            }
        }
    }
}
