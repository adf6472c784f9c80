//! Host-side sender for the capture server.

use std::io;
use std::net::SocketAddr;

use tokio::io::{AsyncRead, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

pub const DEFAULT_ADDR: &str = "127.0.0.1:42424";

/// Stream everything from `reader` to the server at `addr`, then close the
/// write half so the server sees a clean end of stream.
///
/// Returns the number of bytes sent.
pub async fn send<R>(addr: SocketAddr, reader: &mut R) -> io::Result<u64>
where
    R: AsyncRead + Unpin,
{
    let mut socket = TcpStream::connect(addr).await?;
    debug!(server = %addr, "Connected");

    let sent = tokio::io::copy(reader, &mut socket).await?;
    socket.shutdown().await?;

    debug!(server = %addr, bytes = sent, "Stream closed");
    Ok(sent)
}
