//! Command-line surface for `dns_sender`.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use clap::Parser;

/// Read a file (or stdin) and stream it to a DNS tunnel receiver over TCP.
#[derive(Parser, Debug)]
#[command(name = "dns_sender", version, about)]
pub struct Cli {
    /// Base host appended to every query name, e.g. `tunnel.example.com`.
    pub base_host: String,

    /// Destination path the receiver should write the file to.
    pub dst_filepath: String,

    /// Source file to send. Omit to read from stdin.
    pub src_filepath: Option<PathBuf>,

    /// Nameserver to connect to. Defaults to parsing /etc/resolv.conf.
    #[arg(short = 'u', long = "upstream-dns-ip")]
    pub upstream: Option<Ipv4Addr>,

    /// Milliseconds to wait after the last chunk before closing the connection.
    #[arg(short = 's', long = "sleep-ms", default_value_t = 1000)]
    pub sleep_ms: u64,
}
