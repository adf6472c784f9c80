use std::future::Future;
use std::io;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

/// How a drained stream came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainEnd {
    /// A read returned zero bytes.
    PeerClosed,
    /// No data arrived within the idle timeout.
    IdleTimeout,
    /// The shutdown future resolved mid-transfer.
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainOutcome {
    pub bytes: u64,
    pub end: DrainEnd,
}

#[derive(Debug, Error)]
pub enum DrainError {
    #[error("read failed")]
    Read(#[source] io::Error),
    #[error("write failed")]
    Write(#[source] io::Error),
}

/// Copy `reader` into `writer` in chunks of at most `chunk_size` bytes until
/// the reader hits EOF, stays silent for `idle_timeout`, or `shutdown`
/// resolves.
///
/// The timeout applies to each read on its own, so a slow but steady peer is
/// never cut off. The writer is flushed on every non-error ending. `shutdown`
/// is not polled again once it has resolved.
pub async fn drain<R, W, S>(
    reader: &mut R,
    writer: &mut W,
    chunk_size: usize,
    idle_timeout: Duration,
    shutdown: S,
) -> Result<DrainOutcome, DrainError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    S: Future,
{
    tokio::pin!(shutdown);
    let mut buf = vec![0; chunk_size];
    let mut bytes = 0u64;

    let end = loop {
        let read = tokio::select! {
            biased;
            _ = &mut shutdown => break DrainEnd::Interrupted,
            read = timeout(idle_timeout, reader.read(&mut buf)) => read,
        };

        let n = match read {
            Ok(Ok(0)) => break DrainEnd::PeerClosed,
            Ok(Ok(n)) => n,
            Ok(Err(e)) => return Err(DrainError::Read(e)),
            Err(_) => break DrainEnd::IdleTimeout,
        };

        writer.write_all(&buf[..n]).await.map_err(DrainError::Write)?;
        bytes += n as u64;
    };

    writer.flush().await.map_err(DrainError::Write)?;
    Ok(DrainOutcome { bytes, end })
}
