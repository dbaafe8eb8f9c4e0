//! Error types for the `dns_receiver` binary.
//!
//! `ReceiverError` covers startup failures that abort the whole program
//! (invalid arguments, failing to bind the listening socket).
//! `ConnectionError` covers failures scoped to a single accepted connection:
//! the accept loop logs these as warnings and moves on to the next
//! connection rather than exiting.

use std::fmt;
use std::io;
use std::string::FromUtf8Error;

use dnstunnel_core::domain::DomainError;
use dnstunnel_core::packet::PacketError;

pub type Result<T> = std::result::Result<T, ReceiverError>;

#[derive(Debug)]
pub enum ReceiverError {
    InvalidHost(DomainError),
    BindFailed(io::Error),
}

impl fmt::Display for ReceiverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiverError::InvalidHost(e) => write!(f, "invalid base host: {e}"),
            ReceiverError::BindFailed(e) => write!(f, "could not bind listening socket: {e}"),
        }
    }
}

impl std::error::Error for ReceiverError {}

impl From<DomainError> for ReceiverError {
    fn from(e: DomainError) -> Self {
        ReceiverError::InvalidHost(e)
    }
}

/// An error scoped to a single accepted connection. Never propagates past
/// the accept loop.
#[derive(Debug)]
pub enum ConnectionError {
    Io(io::Error),
    Packet(PacketError),
    NotUtf8(FromUtf8Error),
    /// The connection closed (clean FIN) before the handshake packet arrived.
    HandshakeAbandoned,
    /// The handshake's packet parsed, but writing the destination file
    /// failed (directory creation or `File::create`).
    CannotOpenDestination(io::Error),
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::Io(e) => write!(f, "{e}"),
            ConnectionError::Packet(e) => write!(f, "{e}"),
            ConnectionError::NotUtf8(e) => write!(f, "destination path is not valid UTF-8: {e}"),
            ConnectionError::HandshakeAbandoned => {
                write!(f, "connection closed before the handshake packet arrived")
            }
            ConnectionError::CannotOpenDestination(e) => write!(f, "could not open destination file: {e}"),
        }
    }
}

impl std::error::Error for ConnectionError {}

impl From<io::Error> for ConnectionError {
    fn from(e: io::Error) -> Self {
        ConnectionError::Io(e)
    }
}

impl From<PacketError> for ConnectionError {
    fn from(e: PacketError) -> Self {
        ConnectionError::Packet(e)
    }
}

impl From<FromUtf8Error> for ConnectionError {
    fn from(e: FromUtf8Error) -> Self {
        ConnectionError::NotUtf8(e)
    }
}
