//! saslauthd wire protocol
//!
//! Request encoding and response parsing for the daemon's mux socket.

pub mod request;
pub mod response;

pub use request::{CredentialRequest, DEFAULT_SERVICE, decode_request, write_field};
pub use response::{SUCCESS_PREFIX, classify, read_response};
