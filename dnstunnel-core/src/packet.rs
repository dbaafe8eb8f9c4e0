//! Builds and parses the DNS query message that carries one chunk.
//!
//! The header is 12 fixed fields written byte by byte with explicit
//! big-endian conversions rather than a `#[repr(C)]` bit-field struct: a
//! packed bit-field header is not portable across platforms (field order
//! inside a byte is implementation-defined), so every flag bit here is
//! placed by hand.

use std::fmt;

use crate::base16;

pub const HEADER_LEN: usize = 12;
pub const TAIL_LEN: usize = 4;
const LABEL_MAX: usize = 63;
const NAME_MAX: usize = 253;
const QTYPE_A: u16 = 1;
const QCLASS_IN: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    NameTooLong(usize),
    LabelTooLong(usize),
    Truncated,
    InvalidLabel,
    HostMismatch,
    InvalidDigit(base16::InvalidDigit),
}

impl fmt::Display for PacketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketError::NameTooLong(n) => write!(f, "encoded query name is {n} bytes, longer than {NAME_MAX}"),
            PacketError::LabelTooLong(n) => write!(f, "label is {n} bytes, longer than {LABEL_MAX}"),
            PacketError::Truncated => write!(f, "packet is truncated"),
            PacketError::InvalidLabel => write!(f, "query name label is not valid UTF-8"),
            PacketError::HostMismatch => write!(f, "query name does not end in the expected base host"),
            PacketError::InvalidDigit(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PacketError {}

impl From<base16::InvalidDigit> for PacketError {
    fn from(e: base16::InvalidDigit) -> Self {
        PacketError::InvalidDigit(e)
    }
}

/// The upper bound on a single chunk's raw byte length for a given base
/// host, so the resulting query name (encoded chunk + dots + base host)
/// never exceeds 253 characters.
pub fn max_chunk_len(base_host: &str) -> usize {
    (NAME_MAX - base_host.len() - 4) / 2
}

/// Build the dotted query name that would carry `data`: the base16 encoding
/// of `data`, split into `.`-separated 63-character labels, followed by
/// `base_host`. Exposed so callers can report the query name for the
/// `on_chunk_encoded` hook without re-deriving it from a built packet.
pub fn chunk_qname(data: &[u8], base_host: &str) -> Result<String, PacketError> {
    let hex = base16::encode(data);

    let mut dotted = String::with_capacity(hex.len() + hex.len() / LABEL_MAX + 1 + base_host.len());
    for (i, chunk) in hex.chunks(LABEL_MAX).enumerate() {
        if i > 0 {
            dotted.push('.');
        }
        dotted.push_str(std::str::from_utf8(chunk).expect("base16 output is ASCII"));
    }
    if !hex.is_empty() {
        dotted.push('.');
    }
    dotted.push_str(base_host);

    if dotted.len() > NAME_MAX {
        return Err(PacketError::NameTooLong(dotted.len()));
    }
    Ok(dotted)
}

/// A DNS query built to carry `data` as the hex-encoded prefix of the query
/// name, followed by `base_host`.
pub fn build_query(data: &[u8], base_host: &str, transfer_id: u16) -> Result<Vec<u8>, PacketError> {
    let dotted = chunk_qname(data, base_host)?;
    let qname = write_labels(&dotted)?;

    let mut message = Vec::with_capacity(HEADER_LEN + qname.len() + TAIL_LEN);
    message.extend_from_slice(&transfer_id.to_be_bytes()); // ID
    message.push(0x01); // QR=0, Opcode=0000, AA=0, TC=0, RD=1
    message.push(0x00); // RA=0, Z=0, AD=0, CD=0, RCODE=0000
    message.extend_from_slice(&1u16.to_be_bytes()); // QDCOUNT
    message.extend_from_slice(&0u16.to_be_bytes()); // ANCOUNT
    message.extend_from_slice(&0u16.to_be_bytes()); // NSCOUNT
    message.extend_from_slice(&0u16.to_be_bytes()); // ARCOUNT
    message.extend_from_slice(&qname);
    message.extend_from_slice(&QTYPE_A.to_be_bytes());
    message.extend_from_slice(&QCLASS_IN.to_be_bytes());
    Ok(message)
}

fn write_labels(dotted: &str) -> Result<Vec<u8>, PacketError> {
    let mut out = Vec::new();
    for label in dotted.split('.') {
        if label.len() > LABEL_MAX {
            return Err(PacketError::LabelTooLong(label.len()));
        }
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    Ok(out)
}

/// The decoded payload of a parsed query, plus the dotted query name as seen
/// on the wire (handed to the `on_query_parsed` hook).
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedQuery {
    pub qname: String,
    pub data: Vec<u8>,
}

/// Parse a full DNS message (header + question, no TCP length prefix) and
/// recover the chunk it carries. `base_host` is the already-validated base
/// host both sides agreed on.
pub fn parse_query(message: &[u8], base_host: &str) -> Result<ParsedQuery, PacketError> {
    if message.len() < HEADER_LEN + TAIL_LEN {
        return Err(PacketError::Truncated);
    }
    let qname_bytes = &message[HEADER_LEN..message.len() - TAIL_LEN];
    let (labels, consumed) = read_labels(qname_bytes)?;
    if consumed != qname_bytes.len() {
        return Err(PacketError::Truncated);
    }

    let qname = labels.join(".");
    let suffix = format!(".{base_host}");
    let encoded = qname.strip_suffix(&suffix).ok_or(PacketError::HostMismatch)?;

    let hex_digits: Vec<u8> = encoded.bytes().filter(|&b| b != b'.').collect();
    let data = base16::decode(&hex_digits)?;
    Ok(ParsedQuery { qname, data })
}

fn read_labels(buf: &[u8]) -> Result<(Vec<String>, usize), PacketError> {
    let mut labels = Vec::new();
    let mut i = 0;
    loop {
        let len = *buf.get(i).ok_or(PacketError::Truncated)? as usize;
        i += 1;
        if len == 0 {
            break;
        }
        let end = i.checked_add(len).ok_or(PacketError::Truncated)?;
        let label_bytes = buf.get(i..end).ok_or(PacketError::Truncated)?;
        let label = std::str::from_utf8(label_bytes).map_err(|_| PacketError::InvalidLabel)?;
        labels.push(label.to_string());
        i = end;
    }
    Ok((labels, i))
}
