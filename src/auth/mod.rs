//! Authentication system
//!
//! Delegates password checks to saslauthd over its Unix socket.

pub mod connector;
pub mod verifier;

pub use connector::{Connector, UnixConnector};
pub use verifier::{Verifier, verify_password};
