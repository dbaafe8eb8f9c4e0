//! Length-prefixed framing over a single TCP connection: every DNS message
//! is preceded by its length as a big-endian `u16`, exactly as the DNS TCP
//! transport defined in RFC 1035 §4.2.2 expects. Read/write timeouts are the
//! caller's responsibility (set them on the `TcpStream` before calling in).

use std::io::{self, Read, Write};

/// Write one length-prefixed packet. `write_all` already loops internally
/// and turns any short write into an error, so a single call here already
/// satisfies "a short write is fatal".
pub fn write_packet<W: Write>(stream: &mut W, packet: &[u8]) -> io::Result<()> {
    let len = u16::try_from(packet.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "packet exceeds u16::MAX bytes"))?;
    stream.write_all(&len.to_be_bytes())?;
    stream.write_all(packet)
}

/// Read one length-prefixed packet. Returns `Ok(None)` on a clean EOF before
/// any bytes of the length prefix arrive (the far end closed the
/// connection), and an error for any other short read, since a read that
/// dies mid length-prefix or mid-body cannot be distinguished from the peer
/// crashing mid-packet.
pub fn read_packet<R: Read>(stream: &mut R) -> io::Result<Option<Vec<u8>>> {
    let mut len_buf = [0u8; 2];
    let read = read_up_to(stream, &mut len_buf)?;
    if read == 0 {
        return Ok(None);
    }
    if read < len_buf.len() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed while reading the length prefix",
        ));
    }

    let len = u16::from_be_bytes(len_buf) as usize;
    let mut body = vec![0u8; len];
    let read = read_up_to(stream, &mut body)?;
    if read != len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed while reading the packet body",
        ));
    }
    Ok(Some(body))
}

/// Read into `buf` until it is full or the stream reaches EOF, looping over
/// short reads. Returns the number of bytes actually read.
fn read_up_to<R: Read>(stream: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match stream.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn round_trips_a_packet() {
        let mut buf = Vec::new();
        write_packet(&mut buf, b"hello").unwrap();
        let mut cursor = Cursor::new(buf);
        let got = read_packet(&mut cursor).unwrap().unwrap();
        assert_eq!(got, b"hello");
    }

    #[test]
    fn read_on_empty_stream_is_clean_eof() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        assert_eq!(read_packet(&mut cursor).unwrap(), None);
    }

    #[test]
    fn read_short_on_length_prefix_is_an_error() {
        let mut cursor = Cursor::new(vec![0x00u8]);
        assert!(read_packet(&mut cursor).is_err());
    }

    #[test]
    fn read_short_on_body_is_an_error() {
        let mut cursor = Cursor::new(vec![0x00u8, 0x05, b'h', b'i']);
        assert!(read_packet(&mut cursor).is_err());
    }

    #[test]
    fn handles_reads_split_across_many_small_chunks() {
        struct OneByteAtATime(Cursor<Vec<u8>>);
        impl Read for OneByteAtATime {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                self.0.read(&mut buf[..1.min(buf.len())])
            }
        }
        let mut payload = Vec::new();
        write_packet(&mut payload, b"chunked").unwrap();
        let mut stream = OneByteAtATime(Cursor::new(payload));
        assert_eq!(read_packet(&mut stream).unwrap().unwrap(), b"chunked");
    }
}
