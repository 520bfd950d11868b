pub mod auth;
pub mod config;
pub mod error;
pub mod protocol;

pub use auth::{Connector, UnixConnector, Verifier, verify_password};
pub use config::ClientConfig;
pub use error::SaslError;
pub use protocol::CredentialRequest;
