//! Error handlers
//!
//! Provides logging and exit-code mapping for callers of the verifier.

use crate::error::types::SaslError;
use log::{error, warn};

/// Log a verification error at a level matching its severity
pub fn handle_error(err: &SaslError) {
    if err.is_auth_failure() {
        warn!("saslauthd rejected credentials: {}", err.response().unwrap_or_default());
    } else {
        error!("saslauthd verification error: {}", err);
    }
}

/// Convert error to a process exit code
pub fn error_to_exit_code(err: &SaslError) -> u8 {
    match err {
        SaslError::AuthenticationFailed { .. } => 1,
        SaslError::CredentialsRequired => 2,
        SaslError::FieldTooLong { .. } => 2,
        SaslError::ConnectionFailed { .. } => 3,
        SaslError::WriteFailed(_) => 4,
        SaslError::ShortWrite { .. } => 4,
        SaslError::ReadFailed(_) => 4,
        SaslError::ResponseTruncated { .. } => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn rejection_and_transport_faults_map_apart() {
        let rejected = SaslError::AuthenticationFailed {
            response: "NO".into(),
        };
        let unreachable = SaslError::ConnectionFailed {
            path: "/var/run/saslauthd/mux".into(),
            source: io::Error::from(io::ErrorKind::ConnectionRefused),
        };
        assert_eq!(error_to_exit_code(&rejected), 1);
        assert_eq!(error_to_exit_code(&SaslError::CredentialsRequired), 2);
        assert_eq!(error_to_exit_code(&unreachable), 3);
        assert_eq!(
            error_to_exit_code(&SaslError::ShortWrite {
                written: 4,
                expected: 20
            }),
            4
        );
    }
}
