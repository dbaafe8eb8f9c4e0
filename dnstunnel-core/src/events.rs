//! Hook traits fired as a transfer progresses. A connection's hooks only
//! start firing once its handshake has completed (the `active` flag from the
//! original event model); a connection that never completes a handshake
//! fires nothing at all.

use std::net::Ipv4Addr;

/// Hooks fired by the sender side of a transfer.
pub trait SenderEvents {
    fn on_transfer_init(&mut self, peer: Ipv4Addr);
    fn on_chunk_encoded(&mut self, path: &str, chunk_id: u64, qname: &str);
    fn on_chunk_sent(&mut self, peer: Ipv4Addr, path: &str, chunk_id: u64, len: usize);
    fn on_transfer_completed(&mut self, path: &str, file_size: u64);
}

/// Hooks fired by the receiver side of a transfer.
pub trait ReceiverEvents {
    fn on_transfer_init(&mut self, peer: Ipv4Addr);
    fn on_query_parsed(&mut self, path: &str, qname: &str);
    fn on_chunk_received(&mut self, peer: Ipv4Addr, path: &str, chunk_id: u64, len: usize);
    fn on_transfer_completed(&mut self, path: &str, file_size: u64);
}

/// A no-op sink, useful for exercising the transfer engines in tests without
/// depending on a logging backend.
#[derive(Default)]
pub struct NullEvents;

impl SenderEvents for NullEvents {
    fn on_transfer_init(&mut self, _peer: Ipv4Addr) {}
    fn on_chunk_encoded(&mut self, _path: &str, _chunk_id: u64, _qname: &str) {}
    fn on_chunk_sent(&mut self, _peer: Ipv4Addr, _path: &str, _chunk_id: u64, _len: usize) {}
    fn on_transfer_completed(&mut self, _path: &str, _file_size: u64) {}
}

impl ReceiverEvents for NullEvents {
    fn on_transfer_init(&mut self, _peer: Ipv4Addr) {}
    fn on_query_parsed(&mut self, _path: &str, _qname: &str) {}
    fn on_chunk_received(&mut self, _peer: Ipv4Addr, _path: &str, _chunk_id: u64, _len: usize) {}
    fn on_transfer_completed(&mut self, _path: &str, _file_size: u64) {}
}
