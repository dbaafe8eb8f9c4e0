//! `dns_sender` reads a file (or stdin) and streams it to a `dns_receiver`
//! over a single TCP connection to port 53, encoding each chunk into a DNS
//! query name.
//!
//! # Example
//!
//! ```text
//! dns_sender tunnel.example.com /tmp/out.bin ./secret.bin -u 10.0.0.2
//! echo hi | dns_sender tunnel.example.com /tmp/out.bin
//! ```

use std::fs::File;
use std::io::{self, Read};
use std::net::{Ipv4Addr, SocketAddrV4, TcpStream};
use std::time::Duration;

use clap::Parser;
use env_logger::Env;

use runner::cli::Cli;
use runner::error::{Result, SenderError};
use runner::events::LoggingSenderEvents;
use runner::transfer::run_transfer;

const DNS_PORT: u16 = 53;
const SOCKET_TIMEOUT: Duration = Duration::from_secs(6);

fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    if let Err(e) = run() {
        eprintln!("dns_sender: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    dnstunnel_core::domain::validate(&cli.base_host)?;

    let candidates = dnstunnel_core::resolver::discover(cli.upstream)?;
    if candidates.is_empty() {
        return Err(SenderError::NoNameservers);
    }

    let mut stream = connect_first_reachable(&candidates)?;
    stream.set_read_timeout(Some(SOCKET_TIMEOUT)).ok();
    stream.set_write_timeout(Some(SOCKET_TIMEOUT)).ok();

    let source: Box<dyn Read> = match &cli.src_filepath {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };

    let mut events = LoggingSenderEvents;
    run_transfer(
        &mut stream,
        &cli.base_host,
        &cli.dst_filepath,
        source,
        Duration::from_millis(cli.sleep_ms),
        &mut events,
    )
}

/// Try each candidate nameserver in order, returning the first successful
/// connection. All candidates failing is fatal.
fn connect_first_reachable(candidates: &[Ipv4Addr]) -> Result<TcpStream> {
    let mut errors = Vec::new();
    for &ip in candidates {
        match TcpStream::connect(SocketAddrV4::new(ip, DNS_PORT)) {
            Ok(stream) => return Ok(stream),
            Err(e) => errors.push(e),
        }
    }
    Err(SenderError::ConnectFailed(errors))
}
