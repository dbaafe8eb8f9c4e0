//! Error type for the `dns_sender` binary.
//!
//! Every variant maps to a fatal condition: argument validation, resolver
//! discovery, connecting to a nameserver, or the transfer itself. Each one
//! aborts the whole program (there is only ever one connection to abort).

use std::fmt;
use std::io;

use dnstunnel_core::domain::DomainError;
use dnstunnel_core::packet::PacketError;

pub type Result<T> = std::result::Result<T, SenderError>;

#[derive(Debug)]
pub enum SenderError {
    InvalidHost(DomainError),
    Packet(PacketError),
    NoNameservers,
    ConnectFailed(Vec<io::Error>),
    Io(io::Error),
}

impl fmt::Display for SenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SenderError::InvalidHost(e) => write!(f, "invalid base host: {e}"),
            SenderError::Packet(e) => write!(f, "packet error: {e}"),
            SenderError::NoNameservers => write!(f, "no candidate nameservers available"),
            SenderError::ConnectFailed(errs) => {
                write!(f, "could not connect to any candidate nameserver: ")?;
                for (i, e) in errs.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{e}")?;
                }
                Ok(())
            }
            SenderError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SenderError {}

impl From<io::Error> for SenderError {
    fn from(e: io::Error) -> Self {
        SenderError::Io(e)
    }
}

impl From<DomainError> for SenderError {
    fn from(e: DomainError) -> Self {
        SenderError::InvalidHost(e)
    }
}

impl From<PacketError> for SenderError {
    fn from(e: PacketError) -> Self {
        SenderError::Packet(e)
    }
}
