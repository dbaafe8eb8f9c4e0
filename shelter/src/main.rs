//! `dns_receiver` listens on TCP port 53 and reconstructs files tunneled
//! inside DNS query names, one connection at a time.
//!
//! # Example
//!
//! ```text
//! dns_receiver tunnel.example.com ./loot
//! ```

use std::net::{Ipv4Addr, SocketAddrV4, TcpListener};
use std::time::Duration;

use clap::Parser;
use env_logger::Env;

use shelter::cli::Cli;
use shelter::error::{ReceiverError, Result};
use shelter::events::LoggingReceiverEvents;
use shelter::transfer::handle_connection;

const DNS_PORT: u16 = 53;
const SOCKET_TIMEOUT: Duration = Duration::from_secs(6);

fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    if let Err(e) = run() {
        eprintln!("dns_receiver: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    dnstunnel_core::domain::validate(&cli.base_host)?;

    let listener = TcpListener::bind(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DNS_PORT))
        .map_err(ReceiverError::BindFailed)?;
    log::info!("listening on port {DNS_PORT} for base host {}", cli.base_host);

    // Connections are handled one at a time, in the order `accept` hands
    // them out: the next connection is not accepted until the current one's
    // handshake, data loop and close have all finished.
    for incoming in listener.incoming() {
        let stream = match incoming {
            Ok(stream) => stream,
            Err(e) => {
                log::warn!("accept failed: {e}");
                continue;
            }
        };
        stream.set_read_timeout(Some(SOCKET_TIMEOUT)).ok();
        stream.set_write_timeout(Some(SOCKET_TIMEOUT)).ok();

        let mut events = LoggingReceiverEvents;
        if let Err(e) = handle_connection(stream, &cli.base_host, &cli.dst_dirpath, &mut events) {
            log::warn!("connection aborted: {e}");
        }
    }
    Ok(())
}
