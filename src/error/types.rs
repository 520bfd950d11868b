//! Error types
//!
//! Defines the closed set of outcomes a verification call can fail with.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors returned by a saslauthd verification transaction
#[derive(Debug)]
pub enum SaslError {
    /// User or password was empty; no I/O was attempted.
    CredentialsRequired,
    /// A request field does not fit the 16-bit length prefix.
    FieldTooLong { field: &'static str, len: usize },
    ConnectionFailed { path: PathBuf, source: io::Error },
    WriteFailed(io::Error),
    ShortWrite { written: usize, expected: usize },
    ReadFailed(io::Error),
    ResponseTruncated { expected: usize, partial: String },
    /// The daemon answered and rejected the credentials.
    AuthenticationFailed { response: String },
}

impl SaslError {
    /// Best available daemon response text for diagnostics.
    pub fn response(&self) -> Option<&str> {
        match self {
            SaslError::AuthenticationFailed { response } => Some(response),
            SaslError::ResponseTruncated { partial, .. } => Some(partial),
            _ => None,
        }
    }

    /// True when the protocol completed and the daemon said no.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, SaslError::AuthenticationFailed { .. })
    }
}

impl fmt::Display for SaslError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaslError::CredentialsRequired => write!(f, "user and password are required"),
            SaslError::FieldTooLong { field, len } => {
                write!(f, "{} is too long: {} bytes (max {})", field, len, u16::MAX)
            }
            SaslError::ConnectionFailed { path, source } => {
                write!(f, "Failed to connect to {}: {}", path.display(), source)
            }
            SaslError::WriteFailed(e) => write!(f, "Failed to send request: {}", e),
            SaslError::ShortWrite { written, expected } => {
                write!(f, "short write: sent {} of {} bytes", written, expected)
            }
            SaslError::ReadFailed(e) => write!(f, "error reading response: {}", e),
            SaslError::ResponseTruncated { expected, partial } => write!(
                f,
                "response truncated: expected {} bytes, got {}",
                expected,
                partial.len()
            ),
            SaslError::AuthenticationFailed { .. } => write!(f, "authentication failed"),
        }
    }
}

impl std::error::Error for SaslError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaslError::ConnectionFailed { source, .. } => Some(source),
            SaslError::WriteFailed(e) | SaslError::ReadFailed(e) => Some(e),
            _ => None,
        }
    }
}
