//! Library half of the `dns_receiver` binary: CLI parsing, error types,
//! default event sink and the per-connection transfer engine.
pub mod cli;
pub mod error;
pub mod events;
pub mod transfer;
