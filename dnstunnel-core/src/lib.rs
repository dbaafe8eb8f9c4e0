//! Protocol core shared by the `dns_sender` and `dns_receiver` binaries.
//!
//! - `base16` is the on-the-wire byte codec (a custom `A`-`P` alphabet, not
//!   standard hex).
//! - `domain` validates the operator-supplied base host against DNS label
//!   syntax before either binary touches a socket.
//! - `packet` builds and parses the DNS query used to carry a chunk.
//! - `framer` wraps a stream in the length-prefixed TCP framing both sides
//!   use.
//! - `resolver` discovers candidate nameservers when none is given
//!   explicitly.
//! - `events` defines the hook traits fired as a transfer progresses.
pub mod base16;
pub mod domain;
pub mod events;
pub mod framer;
pub mod packet;
pub mod resolver;
