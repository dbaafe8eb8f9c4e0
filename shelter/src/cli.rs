//! Command-line surface for `dns_receiver`.

use clap::Parser;

/// Listen on TCP port 53 and reconstruct files tunneled inside DNS queries.
#[derive(Parser, Debug)]
#[command(name = "dns_receiver", version, about)]
pub struct Cli {
    /// Base host every query name is expected to end with.
    pub base_host: String,

    /// Directory destination paths are resolved against.
    pub dst_dirpath: String,
}
