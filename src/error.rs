use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Faults that stop the accept loop.
///
/// An idle peer is not one of them; see [`DrainEnd::IdleTimeout`](crate::DrainEnd).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(&'static str),

    #[error("failed to bind {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("failed to accept connection")]
    Accept(#[source] io::Error),

    #[error("failed to read from {peer}")]
    Read {
        peer: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("failed to write capture file {}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
