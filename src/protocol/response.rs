//! saslauthd response handling
//!
//! The daemon answers with a big-endian `u16` length and that many bytes of
//! text. Anything starting with `OK` is a success; the rest (usually `NO ...`)
//! is a rejection.

use log::trace;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::SaslError;

/// Prefix the daemon uses to accept credentials
pub const SUCCESS_PREFIX: &[u8] = b"OK";

/// Read one length-prefixed response from the daemon.
pub async fn read_response<R>(reader: &mut R) -> Result<Vec<u8>, SaslError>
where
    R: AsyncRead + Unpin,
{
    let mut prefix = [0u8; 2];
    reader
        .read_exact(&mut prefix)
        .await
        .map_err(SaslError::ReadFailed)?;
    let expected = u16::from_be_bytes(prefix) as usize;
    trace!("saslauthd response declares {} bytes", expected);

    let mut body = vec![0u8; expected];
    let mut filled = 0;
    while filled < expected {
        let n = reader
            .read(&mut body[filled..])
            .await
            .map_err(SaslError::ReadFailed)?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    if filled < expected {
        body.truncate(filled);
        return Err(SaslError::ResponseTruncated {
            expected,
            partial: String::from_utf8_lossy(&body).into_owned(),
        });
    }
    Ok(body)
}

/// Turn a complete response body into the call's outcome.
pub fn classify(body: &[u8]) -> Result<String, SaslError> {
    let response = String::from_utf8_lossy(body).into_owned();
    if body.starts_with(SUCCESS_PREFIX) {
        Ok(response)
    } else {
        Err(SaslError::AuthenticationFailed { response })
    }
}
