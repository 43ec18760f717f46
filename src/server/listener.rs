use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::{TcpListener, TcpSocket};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::http::connection::Connection;
use crate::state::SharedState;

/// Port used when the caller leaves the port unset.
pub const DEFAULT_PORT: u16 = 80;

const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, thiserror::Error)]
pub enum BindError {
    #[error("failed to create listener socket: {0}")]
    Socket(#[source] io::Error),
    #[error("failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: io::Error,
    },
    #[error("failed to listen on port {port}: {source}")]
    Listen {
        port: u16,
        #[source]
        source: io::Error,
    },
}

/// A running HTTP server.
#[derive(Debug)]
pub struct Server {
    local_addr: SocketAddr,
    accept_task: JoinHandle<()>,
}

impl Server {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting connections and releases the port.
    ///
    /// Exchanges already in flight finish on their own.
    pub async fn shutdown(self) {
        self.accept_task.abort();
        let _ = self.accept_task.await;
        debug!(addr = %self.local_addr, "HTTP server stopped");
    }
}

/// Binds the listener on `cfg.port` and starts accepting connections.
///
/// An unset port falls back to [`DEFAULT_PORT`]. Must be called from within
/// a tokio runtime. A bind failure only means remote control is unavailable;
/// the caller decides whether to carry on.
pub fn start(cfg: &ServerConfig, state: SharedState) -> Result<Server, BindError> {
    let port = cfg.port.unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::new(cfg.bind_addr, port);

    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4(),
        SocketAddr::V6(_) => TcpSocket::new_v6(),
    }
    .map_err(BindError::Socket)?;
    socket.set_reuseaddr(true).map_err(BindError::Socket)?;

    socket
        .bind(addr)
        .map_err(|source| BindError::Bind { port, source })?;
    let listener = socket
        .listen(cfg.backlog)
        .map_err(|source| BindError::Listen { port, source })?;
    let local_addr = listener
        .local_addr()
        .map_err(|source| BindError::Listen { port, source })?;

    info!(addr = %local_addr, backlog = cfg.backlog, "HTTP server listening");

    let accept_task = tokio::spawn(accept_loop(listener, cfg.clone(), state));

    Ok(Server {
        local_addr,
        accept_task,
    })
}

async fn accept_loop(listener: TcpListener, cfg: ServerConfig, state: SharedState) {
    loop {
        let (mut socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!(error = %e, "Accept failed");
                tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                continue;
            }
        };
        debug!(%peer, "Client connected");

        let mut conn = Connection::new(state.clone(), cfg.send_buffer_capacity);
        let idle_timeout = cfg.idle_timeout();
        tokio::spawn(async move {
            if let Err(e) = conn.run(&mut socket, idle_timeout).await {
                warn!(%peer, error = %e, "Connection error");
            }
        });
    }
}
