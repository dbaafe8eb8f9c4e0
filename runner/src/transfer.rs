//! Sender transfer engine: one handshake packet carrying the destination
//! path, then the source file streamed as data-carrying packets until EOF,
//! then a short sleep before the connection is torn down.

use std::io::Read;
use std::net::{Ipv4Addr, SocketAddr, TcpStream};
use std::thread;
use std::time::Duration;

use dnstunnel_core::events::SenderEvents;
use dnstunnel_core::framer;
use dnstunnel_core::packet::{self, build_query, max_chunk_len};

use crate::error::{Result, SenderError};

/// Running counters for the transfer, threaded through explicitly rather
/// than kept as process-global state.
#[derive(Default)]
struct SenderTransferState {
    chunk_id: u64,
    file_size: u64,
}

fn peer_ipv4(stream: &TcpStream) -> Ipv4Addr {
    match stream.peer_addr() {
        Ok(SocketAddr::V4(addr)) => *addr.ip(),
        _ => Ipv4Addr::UNSPECIFIED,
    }
}

/// Drive one complete transfer over an already-connected `stream`.
///
/// `dst_path` is sent verbatim as the handshake payload; `source` is read to
/// EOF and streamed as a sequence of chunks sized to fit within one query
/// name for `base_host`.
pub fn run_transfer(
    stream: &mut TcpStream,
    base_host: &str,
    dst_path: &str,
    mut source: impl Read,
    sleep_after_last_chunk: Duration,
    events: &mut dyn SenderEvents,
) -> Result<()> {
    let peer = peer_ipv4(stream);
    let transfer_id = std::process::id() as u16;

    let handshake = build_query(dst_path.as_bytes(), base_host, transfer_id)?;
    framer::write_packet(stream, &handshake)?;
    events.on_transfer_init(peer);

    let mut state = SenderTransferState::default();
    let chunk_len = max_chunk_len(base_host);
    let mut buf = vec![0u8; chunk_len];

    loop {
        let n = read_fill(&mut source, &mut buf)?;
        if n == 0 {
            break;
        }
        let chunk = &buf[..n];

        let qname = packet::chunk_qname(chunk, base_host)?;
        events.on_chunk_encoded(dst_path, state.chunk_id, &qname);

        let query = build_query(chunk, base_host, transfer_id)?;
        if let Err(e) = framer::write_packet(stream, &query) {
            events.on_transfer_completed(dst_path, state.file_size);
            return Err(SenderError::Io(e));
        }
        events.on_chunk_sent(peer, dst_path, state.chunk_id, n);

        state.chunk_id += 1;
        state.file_size += n as u64;
    }

    thread::sleep(sleep_after_last_chunk);
    events.on_transfer_completed(dst_path, state.file_size);
    Ok(())
}

/// Fill `buf` from `source`, looping over short reads, stopping at EOF.
/// Returns the number of bytes actually read (0 means EOF before any byte).
fn read_fill(source: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match source.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}
