//! Credential request encoding
//!
//! saslauthd expects five length-prefixed fields in a fixed order:
//! user, password, service, realm, client address. Each field is a
//! big-endian `u16` byte length followed by the bytes themselves; an
//! empty field is just the two zero bytes.

use std::fmt;
use std::io::{self, Write};

use crate::error::SaslError;

/// Service sent when the caller leaves it empty
pub const DEFAULT_SERVICE: &str = "imap";

const FIELD_NAMES: [&str; 5] = ["user", "password", "service", "realm", "client_addr"];

/// One credential check as sent to the daemon.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialRequest {
    pub user: String,
    pub password: String,
    pub service: String,
    pub realm: String,
    pub client_addr: String,
}

impl CredentialRequest {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }

    pub fn with_client_addr(mut self, client_addr: impl Into<String>) -> Self {
        self.client_addr = client_addr.into();
        self
    }

    /// Service actually put on the wire.
    pub fn effective_service(&self) -> &str {
        if self.service.is_empty() {
            DEFAULT_SERVICE
        } else {
            &self.service
        }
    }

    /// Reject requests the daemon can never accept, before any I/O.
    pub fn validate(&self) -> Result<(), SaslError> {
        if self.user.is_empty() || self.password.is_empty() {
            return Err(SaslError::CredentialsRequired);
        }
        for (name, value) in FIELD_NAMES.into_iter().zip(self.fields()) {
            if value.len() > u16::MAX as usize {
                return Err(SaslError::FieldTooLong {
                    field: name,
                    len: value.len(),
                });
            }
        }
        Ok(())
    }

    /// Validate and encode into the wire format.
    pub fn encode(&self) -> Result<Vec<u8>, SaslError> {
        self.validate()?;
        let capacity = self.fields().iter().map(|f| 2 + f.len()).sum();
        let mut buf = Vec::with_capacity(capacity);
        // Writes into a Vec cannot fail.
        self.write_to(&mut buf).map_err(SaslError::WriteFailed)?;
        Ok(buf)
    }

    /// Write the five fields to `sink` without validating them.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        for field in self.fields() {
            write_field(sink, field)?;
        }
        Ok(())
    }

    fn fields(&self) -> [&str; 5] {
        [
            self.user.as_str(),
            self.password.as_str(),
            self.effective_service(),
            self.realm.as_str(),
            self.client_addr.as_str(),
        ]
    }
}

impl fmt::Debug for CredentialRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRequest")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("service", &self.effective_service())
            .field("realm", &self.realm)
            .field("client_addr", &self.client_addr)
            .finish()
    }
}

/// Write one length-prefixed field.
pub fn write_field<W: Write>(sink: &mut W, value: &str) -> io::Result<()> {
    let len = u16::try_from(value.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "field exceeds 65535 bytes"))?;
    sink.write_all(&len.to_be_bytes())?;
    if len > 0 {
        sink.write_all(value.as_bytes())?;
    }
    Ok(())
}

/// Parse an encoded request back into its fields.
///
/// This is the daemon's side of the exchange; the client never needs it,
/// but stub daemons and tests do.
pub fn decode_request(mut bytes: &[u8]) -> io::Result<CredentialRequest> {
    let mut fields = Vec::with_capacity(FIELD_NAMES.len());
    for _ in FIELD_NAMES {
        let (field, rest) = read_field(bytes)?;
        fields.push(field);
        bytes = rest;
    }
    if !bytes.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} trailing bytes after request", bytes.len()),
        ));
    }

    let mut fields = fields.into_iter();
    let mut next = || fields.next().unwrap_or_default();
    Ok(CredentialRequest {
        user: next(),
        password: next(),
        service: next(),
        realm: next(),
        client_addr: next(),
    })
}

fn read_field(bytes: &[u8]) -> io::Result<(String, &[u8])> {
    let [hi, lo, rest @ ..] = bytes else {
        return Err(io::ErrorKind::UnexpectedEof.into());
    };
    let len = u16::from_be_bytes([*hi, *lo]) as usize;
    if rest.len() < len {
        return Err(io::ErrorKind::UnexpectedEof.into());
    }
    let (body, rest) = rest.split_at(len);
    let text = String::from_utf8(body.to_vec())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok((text, rest))
}
