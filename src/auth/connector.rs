//! Transport to the daemon
//!
//! The verifier only needs a byte stream; production code opens a Unix
//! domain socket, tests hand in in-memory streams.

use std::future::Future;
use std::io;
use std::path::Path;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::UnixStream;

/// Opens one stream to the daemon per verification call.
pub trait Connector {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send;

    fn connect(&self, path: &Path) -> impl Future<Output = io::Result<Self::Stream>> + Send;
}

/// Connects to saslauthd's Unix domain socket
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixConnector;

impl Connector for UnixConnector {
    type Stream = UnixStream;

    fn connect(&self, path: &Path) -> impl Future<Output = io::Result<UnixStream>> + Send {
        let path = path.to_path_buf();
        async move { UnixStream::connect(path).await }
    }
}
