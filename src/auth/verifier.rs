//! saslauthd verifier
//!
//! Runs one authentication transaction: encode, connect, write, read,
//! classify. The stream lives only inside `verify`, so it is closed on
//! every return path.

use log::debug;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use super::connector::{Connector, UnixConnector};
use crate::config::ClientConfig;
use crate::error::SaslError;
use crate::protocol::{CredentialRequest, classify, read_response};

/// Verifies credentials against a single daemon socket.
#[derive(Debug, Clone)]
pub struct Verifier<C = UnixConnector> {
    socket_path: PathBuf,
    connector: C,
}

impl Verifier {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self::with_connector(socket_path, UnixConnector)
    }
}

impl<C: Connector> Verifier<C> {
    pub fn with_connector(socket_path: impl Into<PathBuf>, connector: C) -> Self {
        Self {
            socket_path: socket_path.into(),
            connector,
        }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Ask the daemon whether `request` holds valid credentials.
    ///
    /// Returns the daemon's response text on success. A rejection comes back
    /// as [`SaslError::AuthenticationFailed`] with the text attached.
    pub async fn verify(&self, request: &CredentialRequest) -> Result<String, SaslError> {
        let query = request.encode()?;

        let mut stream = self
            .connector
            .connect(&self.socket_path)
            .await
            .map_err(|source| SaslError::ConnectionFailed {
                path: self.socket_path.clone(),
                source,
            })?;
        debug!(
            "Connected to saslauthd at {} (user {}, service {})",
            self.socket_path.display(),
            request.user,
            request.effective_service()
        );

        let written = stream.write(&query).await.map_err(SaslError::WriteFailed)?;
        if written != query.len() {
            return Err(SaslError::ShortWrite {
                written,
                expected: query.len(),
            });
        }
        stream.flush().await.map_err(SaslError::WriteFailed)?;

        let body = read_response(&mut stream).await?;
        let outcome = classify(&body);
        debug!(
            "saslauthd answered {} for user {}",
            if outcome.is_ok() { "OK" } else { "NO" },
            request.user
        );
        outcome
    }
}

/// Verify a username/password pair with the daemon `config` points at.
///
/// Empty `service` falls back to the configured service, then to `imap`.
/// `realm` and `client_addr` may be empty.
pub async fn verify_password(
    config: &ClientConfig,
    user: &str,
    password: &str,
    service: &str,
    realm: &str,
    client_addr: &str,
) -> Result<String, SaslError> {
    let service = if service.is_empty() {
        config.service()
    } else {
        service
    };
    let request = CredentialRequest::new(user, password)
        .with_service(service)
        .with_realm(realm)
        .with_client_addr(client_addr);

    // Fail before resolving or touching the socket.
    request.validate()?;

    Verifier::new(config.resolve_socket_path())
        .verify(&request)
        .await
}
