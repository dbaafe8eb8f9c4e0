//! Library half of the `dns_sender` binary: CLI parsing, error type, default
//! event sink and the transfer engine itself.
pub mod cli;
pub mod error;
pub mod events;
pub mod transfer;
