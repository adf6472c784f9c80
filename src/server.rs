use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::fs::File;
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::drain::{drain, DrainEnd, DrainError, DrainOutcome};
use crate::error::ServerError;
use crate::naming::{output_file_name, ConnectionCounter};

/// Result of handling one accepted connection.
#[derive(Debug, Clone)]
pub struct Capture {
    pub number: u64,
    pub peer: SocketAddr,
    pub path: PathBuf,
    pub outcome: DrainOutcome,
}

/// Accepts connections one at a time and writes each into its own file.
///
/// The listener is bound once and kept for the life of the server. Nothing is
/// spawned: the next accept only happens after the current connection has been
/// drained and its file closed, so later clients wait in the kernel backlog.
pub struct CaptureServer {
    listener: TcpListener,
    config: ServerConfig,
    counter: ConnectionCounter,
}

impl CaptureServer {
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        if config.chunk_size == 0 {
            return Err(ServerError::Config("chunk size must be non-zero"));
        }

        let listener = TcpListener::bind(config.bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: config.bind_addr,
                source,
            })?;

        Ok(Self {
            listener,
            config,
            counter: ConnectionCounter::new(),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Connections accepted so far, including ones that timed out.
    pub fn served(&self) -> u64 {
        self.counter.served()
    }

    /// Wait for the next connection and drain it to disk.
    pub async fn serve_one(&mut self) -> Result<Capture, ServerError> {
        let (socket, peer) = self.listener.accept().await.map_err(ServerError::Accept)?;
        self.capture(socket, peer, std::future::pending::<()>()).await
    }

    /// Run the accept loop until `shutdown` resolves or a fault occurs.
    ///
    /// Shutdown is observed both while waiting in accept and while a
    /// connection is being drained; an interrupted capture keeps the bytes
    /// received so far and its file is flushed before returning. Returns the
    /// number of connections served.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<u64, ServerError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        match self.local_addr() {
            Ok(addr) => info!(address = %addr, "Starting server"),
            Err(_) => info!("Starting server"),
        }

        loop {
            let (socket, peer) = tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!(served = self.served(), "Shutting down");
                    return Ok(self.served());
                }
                accepted = self.listener.accept() => accepted.map_err(ServerError::Accept)?,
            };

            let capture = self.capture(socket, peer, &mut shutdown).await?;
            if capture.outcome.end == DrainEnd::Interrupted {
                info!(served = self.served(), "Shutting down");
                return Ok(self.served());
            }
        }
    }

    async fn capture<S>(
        &mut self,
        mut socket: TcpStream,
        peer: SocketAddr,
        shutdown: S,
    ) -> Result<Capture, ServerError>
    where
        S: Future,
    {
        let number = self.counter.advance();
        let name = output_file_name(&self.config.file_stem, &self.config.file_extension, number);
        let path = self.config.output_dir.join(name);
        info!(peer = %peer, file = %path.display(), "Connected by");

        let mut file = File::create(&path).await.map_err(|source| ServerError::Output {
            path: path.clone(),
            source,
        })?;

        let outcome = match drain(
            &mut socket,
            &mut file,
            self.config.chunk_size,
            self.config.idle_timeout,
            shutdown,
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(DrainError::Read(source)) => return Err(ServerError::Read { peer, source }),
            Err(DrainError::Write(source)) => return Err(ServerError::Output { path, source }),
        };

        match outcome.end {
            DrainEnd::PeerClosed => {
                info!(peer = %peer, file = %path.display(), bytes = outcome.bytes, "Connection closed")
            }
            DrainEnd::IdleTimeout => {
                warn!(peer = %peer, file = %path.display(), bytes = outcome.bytes, "Connection timed out")
            }
            DrainEnd::Interrupted => {
                warn!(peer = %peer, file = %path.display(), bytes = outcome.bytes, "Capture interrupted by shutdown")
            }
        }

        Ok(Capture {
            number,
            peer,
            path,
            outcome,
        })
    }
}
