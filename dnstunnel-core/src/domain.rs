//! Validates an operator-supplied base host against DNS label syntax before
//! either binary opens a socket. Ported from the original lexer's single
//! left-to-right scan rather than using a general-purpose domain parser,
//! since the accept/reject boundary here (label length fails one character
//! *before* the conventional off-by-one) is part of the wire contract
//! between sender and receiver, not just cosmetic validation.

use std::fmt;

const LABEL_MAX: usize = 63;
const NAME_MAX: usize = 251;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    Empty,
    LeadingHyphen,
    TrailingHyphen,
    LabelTooLong,
    AdjacentDots,
    HyphenAdjacentToDot,
    InvalidChar(u8),
    TooLong(usize),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Empty => write!(f, "host name is empty"),
            DomainError::LeadingHyphen => write!(f, "host name starts with '-'"),
            DomainError::TrailingHyphen => write!(f, "host name ends with '-'"),
            DomainError::LabelTooLong => write!(f, "label longer than {LABEL_MAX} characters"),
            DomainError::AdjacentDots => write!(f, "host name contains adjacent '.'"),
            DomainError::HyphenAdjacentToDot => write!(f, "'-' next to a '.' in host name"),
            DomainError::InvalidChar(c) => write!(f, "invalid character {:?} in host name", *c as char),
            DomainError::TooLong(n) => write!(f, "host name is {n} characters, longer than {NAME_MAX}"),
        }
    }
}

impl std::error::Error for DomainError {}

/// Validate `host` as a base host suitable for the wire protocol: ASCII
/// alphanumerics, `-` and `.` only, no leading/trailing hyphen, no hyphen
/// touching a dot, no adjacent dots, each label at most 63 characters, and
/// the whole name at most 251 characters (leaving room for the per-chunk
/// label budget computed in `packet`).
pub fn validate(host: &str) -> Result<(), DomainError> {
    let bytes = host.as_bytes();
    if bytes.is_empty() {
        return Err(DomainError::Empty);
    }
    if bytes[0] == b'-' {
        return Err(DomainError::LeadingHyphen);
    }

    let mut label_len = 0usize;
    for (i, &c) in bytes.iter().enumerate() {
        label_len += 1;
        if label_len > LABEL_MAX {
            return Err(DomainError::LabelTooLong);
        }
        if c == b'.' {
            if bytes.get(i + 1) == Some(&b'.') {
                return Err(DomainError::AdjacentDots);
            }
            if bytes.get(i + 1) == Some(&b'-') || (i > 0 && bytes[i - 1] == b'-') {
                return Err(DomainError::HyphenAdjacentToDot);
            }
            label_len = 0;
            continue;
        }
        if !(c.is_ascii_alphanumeric() || c == b'-') {
            return Err(DomainError::InvalidChar(c));
        }
    }

    if bytes[bytes.len() - 1] == b'-' {
        return Err(DomainError::TrailingHyphen);
    }
    if bytes.len() > NAME_MAX {
        return Err(DomainError::TooLong(bytes.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_host() {
        assert_eq!(validate("tunnel.example.com"), Ok(()));
    }

    #[test]
    fn rejects_leading_and_trailing_hyphen() {
        assert_eq!(validate("-tunnel.com"), Err(DomainError::LeadingHyphen));
        assert_eq!(validate("tunnel.com-"), Err(DomainError::TrailingHyphen));
    }

    #[test]
    fn rejects_adjacent_dots_and_hyphen_next_to_dot() {
        assert_eq!(validate("tunnel..com"), Err(DomainError::AdjacentDots));
        assert_eq!(validate("tunnel-.com"), Err(DomainError::HyphenAdjacentToDot));
        assert_eq!(validate("tunnel.-com"), Err(DomainError::HyphenAdjacentToDot));
    }

    #[test]
    fn rejects_label_over_63_chars() {
        let label = "a".repeat(64);
        assert_eq!(validate(&label), Err(DomainError::LabelTooLong));
        let ok_label = "a".repeat(63);
        assert_eq!(validate(&ok_label), Ok(()));
    }

    #[test]
    fn boundary_at_251_total_characters() {
        let labels = ["a".repeat(62), "a".repeat(62), "a".repeat(62), "a".repeat(62)];
        let host_251 = labels.join(".");
        assert_eq!(host_251.len(), 251);
        assert_eq!(validate(&host_251), Ok(()));

        let labels = ["a".repeat(62), "a".repeat(62), "a".repeat(62), "a".repeat(63)];
        let host_252 = labels.join(".");
        assert_eq!(host_252.len(), 252);
        assert!(matches!(validate(&host_252), Err(DomainError::TooLong(252))));
    }

    #[test]
    fn rejects_invalid_characters() {
        assert_eq!(validate("tunnel_host.com"), Err(DomainError::InvalidChar(b'_')));
    }
}
