use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 42424;
pub const CHUNK_SIZE: usize = 4096;
pub const IDLE_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Settings for [`CaptureServer`](crate::CaptureServer).
///
/// The server binary only ever uses [`ServerConfig::default`]; the fields are
/// public so the loop can run on an ephemeral port in a scratch directory.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory the capture files are written into.
    pub output_dir: PathBuf,
    pub file_stem: String,
    pub file_extension: String,
    /// How long a single read may wait for data before the capture is closed.
    pub idle_timeout: Duration,
    /// Upper bound on a single read; must be non-zero.
    pub chunk_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            output_dir: PathBuf::from("."),
            file_stem: "memory".to_string(),
            file_extension: "bin".to_string(),
            idle_timeout: IDLE_READ_TIMEOUT,
            chunk_size: CHUNK_SIZE,
        }
    }
}
