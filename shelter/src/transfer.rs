//! Receiver transfer engine: one handshake packet carrying the destination
//! path, then data-carrying packets written to that file until the sender
//! closes the connection.

use std::fs::{DirBuilder, File};
use std::io::Write;
use std::net::{Ipv4Addr, SocketAddr, TcpStream};
use std::path::Path;

use dnstunnel_core::events::ReceiverEvents;
use dnstunnel_core::framer;
use dnstunnel_core::packet::parse_query;

use crate::error::ConnectionError;

/// Running counters for one accepted connection.
#[derive(Default)]
struct ReceiverTransferState {
    chunk_id: u64,
    file_size: u64,
}

fn peer_ipv4(stream: &TcpStream) -> Ipv4Addr {
    match stream.peer_addr() {
        Ok(SocketAddr::V4(addr)) => *addr.ip(),
        _ => Ipv4Addr::UNSPECIFIED,
    }
}

/// Handle one accepted connection end to end: handshake, then the data
/// loop, until the sender closes its side.
///
/// Any error returned here is scoped to this connection; the caller logs it
/// and moves on to accepting the next one. A connection whose handshake is
/// abandoned (an immediate FIN) fires no events at all, matching the
/// "connection never goes active" rule.
pub fn handle_connection(
    mut stream: TcpStream,
    base_host: &str,
    dst_dirpath: &str,
    events: &mut dyn ReceiverEvents,
) -> Result<(), ConnectionError> {
    let peer = peer_ipv4(&stream);

    let handshake_body = match framer::read_packet(&mut stream)? {
        Some(body) => body,
        None => return Err(ConnectionError::HandshakeAbandoned),
    };
    let handshake = parse_query(&handshake_body, base_host)?;
    let dst_path = String::from_utf8(handshake.data)?;
    let full_path = join_destination(dst_dirpath, &dst_path);

    create_parent_dirs(&full_path).map_err(ConnectionError::CannotOpenDestination)?;
    let mut file = File::create(&full_path).map_err(ConnectionError::CannotOpenDestination)?;

    events.on_transfer_init(peer);
    let mut state = ReceiverTransferState::default();

    loop {
        let body = match framer::read_packet(&mut stream) {
            Ok(Some(body)) => body,
            Ok(None) => break,
            Err(e) => {
                events.on_transfer_completed(&dst_path, state.file_size);
                return Err(e.into());
            }
        };
        let parsed = match parse_query(&body, base_host) {
            Ok(p) => p,
            Err(e) => {
                events.on_transfer_completed(&dst_path, state.file_size);
                return Err(e.into());
            }
        };
        events.on_query_parsed(&dst_path, &parsed.qname);

        // A short write here leaves a partial file on disk; the connection
        // is simply abandoned rather than retried or cleaned up.
        if let Err(e) = file.write_all(&parsed.data) {
            events.on_transfer_completed(&dst_path, state.file_size);
            return Err(e.into());
        }
        events.on_chunk_received(peer, &dst_path, state.chunk_id, parsed.data.len());

        state.chunk_id += 1;
        state.file_size += parsed.data.len() as u64;
    }

    events.on_transfer_completed(&dst_path, state.file_size);
    Ok(())
}

/// Join a destination directory and a (sender-supplied) path, inserting a
/// `/` between them unless one side already provides it.
fn join_destination(dst_dirpath: &str, chunk_path: &str) -> String {
    if dst_dirpath.ends_with('/') || chunk_path.starts_with('/') {
        format!("{dst_dirpath}{chunk_path}")
    } else {
        format!("{dst_dirpath}/{chunk_path}")
    }
}

/// Create every missing directory component of `full_path`'s parent,
/// tolerating components that already exist, with permissions `0777`
/// matching the original tool's directory mode.
fn create_parent_dirs(full_path: &str) -> std::io::Result<()> {
    let Some(parent) = Path::new(full_path).parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder.create(parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnstunnel_core::packet::build_query;
    use std::io::Read as _;
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn joins_with_exactly_one_slash() {
        assert_eq!(join_destination("/loot", "out.bin"), "/loot/out.bin");
        assert_eq!(join_destination("/loot/", "out.bin"), "/loot/out.bin");
        assert_eq!(join_destination("/loot", "/out.bin"), "/loot/out.bin");
        assert_eq!(join_destination("/loot/", "/out.bin"), "/loot//out.bin");
    }

    #[derive(Default)]
    struct RecordingEvents {
        init: bool,
        received: Vec<(u64, usize)>,
        completed: Option<(String, u64)>,
    }

    impl ReceiverEvents for RecordingEvents {
        fn on_transfer_init(&mut self, _peer: Ipv4Addr) {
            self.init = true;
        }
        fn on_query_parsed(&mut self, _path: &str, _qname: &str) {}
        fn on_chunk_received(&mut self, _peer: Ipv4Addr, _path: &str, chunk_id: u64, len: usize) {
            self.received.push((chunk_id, len));
        }
        fn on_transfer_completed(&mut self, path: &str, file_size: u64) {
            self.completed = Some((path.to_string(), file_size));
        }
    }

    /// Connect a client to a loopback listener, write a handshake for
    /// `rel_path` followed by `chunks` as framed data packets, then close the
    /// write half and return what `handle_connection` produced on the
    /// accepting side.
    fn drive_connection(
        base_host: &str,
        dst_dirpath: &str,
        rel_path: &str,
        chunks: &[&[u8]],
    ) -> (RecordingEvents, std::io::Result<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let host = base_host.to_string();
        let dst = dst_dirpath.to_string();

        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut events = RecordingEvents::default();
            let result = handle_connection(stream, &host, &dst, &mut events);
            (events, result)
        });

        let mut client = TcpStream::connect(addr).unwrap();
        let handshake = build_query(rel_path.as_bytes(), base_host, 1).unwrap();
        framer::write_packet(&mut client, &handshake).unwrap();
        for chunk in chunks {
            let packet = build_query(chunk, base_host, 1).unwrap();
            framer::write_packet(&mut client, &packet).unwrap();
        }
        drop(client);

        let (events, result) = server.join().unwrap();
        let result = result.map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        (events, result)
    }

    #[test]
    fn tiny_transfer_writes_the_decoded_bytes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let (events, result) = drive_connection(
            "ex.com",
            dir.path().to_str().unwrap(),
            "out.bin",
            &[&[0x00, 0x01, 0xFF]],
        );
        result.unwrap();
        assert!(events.init);
        assert_eq!(events.received, vec![(0, 3)]);
        assert_eq!(events.completed, Some(("out.bin".to_string(), 3)));

        let mut written = Vec::new();
        File::open(dir.path().join("out.bin"))
            .unwrap()
            .read_to_end(&mut written)
            .unwrap();
        assert_eq!(written, vec![0x00, 0x01, 0xFF]);
    }

    #[test]
    fn path_with_leading_slash_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let (_, result) = drive_connection("ex.com", dir.path().to_str().unwrap(), "/a/b/f", &[b"hi"]);
        result.unwrap();

        let mut written = Vec::new();
        File::open(dir.path().join("a/b/f"))
            .unwrap()
            .read_to_end(&mut written)
            .unwrap();
        assert_eq!(written, b"hi");
    }

    #[test]
    fn empty_file_transfer_creates_a_zero_byte_file() {
        let dir = tempfile::tempdir().unwrap();
        let (events, result) = drive_connection("ex.com", dir.path().to_str().unwrap(), "empty.bin", &[]);
        result.unwrap();
        assert_eq!(events.received, Vec::new());
        assert_eq!(events.completed, Some(("empty.bin".to_string(), 0)));

        let metadata = std::fs::metadata(dir.path().join("empty.bin")).unwrap();
        assert_eq!(metadata.len(), 0);
    }

    #[test]
    fn connection_with_no_handshake_is_abandoned_silently() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut events = RecordingEvents::default();
            let result = handle_connection(stream, "ex.com", "/tmp", &mut events);
            (events, result)
        });

        let client = TcpStream::connect(addr).unwrap();
        drop(client); // immediate FIN, no handshake ever sent

        let (events, result) = server.join().unwrap();
        assert!(matches!(result, Err(ConnectionError::HandshakeAbandoned)));
        assert!(!events.init);
        assert!(events.completed.is_none());
    }
}
