//! Console lines emitted by the accept loop.

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use memdump::{CaptureServer, ServerConfig};
use tempfile::tempdir;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::time::sleep;

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// Current-thread runtime, so the thread-local subscriber sees the spawned server task.
#[tokio::test]
async fn logs_startup_connection_and_timeout() {
    let logs = SharedBuf::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let dir = tempdir().unwrap();
    let config = ServerConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        output_dir: dir.path().to_path_buf(),
        idle_timeout: Duration::from_millis(200),
        ..ServerConfig::default()
    };
    let mut server = CaptureServer::bind(config).await.unwrap();
    let addr = server.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let running = tokio::spawn(async move {
        server
            .run_until(async {
                let _ = rx.await;
            })
            .await
    });

    let socket = TcpStream::connect(addr).await.unwrap();
    let client_addr = socket.local_addr().unwrap();

    tokio::time::timeout(Duration::from_secs(5), async {
        while !logs.contents().contains("Connection timed out") {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("timeout was never logged");
    drop(socket);

    tx.send(()).unwrap();
    assert_eq!(running.await.unwrap().unwrap(), 1);

    let output = logs.contents();
    assert!(output.contains("Starting server"), "{output}");
    assert!(output.contains(&format!("address={addr}")), "{output}");
    assert!(output.contains("Connected by"), "{output}");
    assert!(output.contains(&format!("peer={client_addr}")), "{output}");
    assert!(output.contains("Connection timed out"), "{output}");
    assert!(output.contains("Shutting down"), "{output}");
}
