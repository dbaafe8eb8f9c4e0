//! Default event sink for the sender: logs each hook via the `log` facade,
//! matching how `shelter`'s event handler reports progress.

use std::net::Ipv4Addr;

use dnstunnel_core::events::SenderEvents;

#[derive(Default)]
pub struct LoggingSenderEvents;

impl SenderEvents for LoggingSenderEvents {
    fn on_transfer_init(&mut self, peer: Ipv4Addr) {
        log::info!("transfer started, connected to {peer}");
    }

    fn on_chunk_encoded(&mut self, path: &str, chunk_id: u64, qname: &str) {
        log::debug!("encoded chunk {chunk_id} of {path} as {qname}");
    }

    fn on_chunk_sent(&mut self, peer: Ipv4Addr, path: &str, chunk_id: u64, len: usize) {
        log::debug!("sent chunk {chunk_id} of {path} ({len} bytes) to {peer}");
    }

    fn on_transfer_completed(&mut self, path: &str, file_size: u64) {
        log::info!("transfer of {path} complete, {file_size} bytes sent");
    }
}
