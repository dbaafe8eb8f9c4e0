//! Default event sink for the receiver: logs each hook via the `log` facade.

use std::net::Ipv4Addr;

use dnstunnel_core::events::ReceiverEvents;

#[derive(Default)]
pub struct LoggingReceiverEvents;

impl ReceiverEvents for LoggingReceiverEvents {
    fn on_transfer_init(&mut self, peer: Ipv4Addr) {
        log::info!("accepted transfer from {peer}");
    }

    fn on_query_parsed(&mut self, path: &str, qname: &str) {
        log::debug!("parsed query for {path}: {qname}");
    }

    fn on_chunk_received(&mut self, peer: Ipv4Addr, path: &str, chunk_id: u64, len: usize) {
        log::debug!("received chunk {chunk_id} of {path} ({len} bytes) from {peer}");
    }

    fn on_transfer_completed(&mut self, path: &str, file_size: u64) {
        log::info!("transfer of {path} complete, {file_size} bytes received");
    }
}
