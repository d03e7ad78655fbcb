use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::router::Router;
use crate::store::FileStore;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!("Server is running on {}", cfg.listen_addr);

    match &cfg.directory {
        Some(dir) => info!("Serving files from {}", dir.display()),
        None => info!("No --directory given, /files routes will answer 404"),
    }

    let router = Router::new(FileStore::new(cfg.directory.clone()));
    serve(listener, router).await
}

/// Accepts connections forever, one task per connection.
pub async fn serve(listener: TcpListener, router: Router) -> anyhow::Result<()> {
    let router = Arc::new(router);

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let router = router.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router);
            if let Err(e) = conn.run().await {
                error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
