//! Nameserver discovery: either the operator's explicit override, or the
//! first ten `nameserver` entries in `/etc/resolv.conf`.

use std::fs;
use std::io;
use std::net::Ipv4Addr;

const RESOLV_CONF: &str = "/etc/resolv.conf";
const PREFIX: &str = "nameserver ";
const MAX_NAME_SERVERS: usize = 10;

/// Resolve the candidate nameservers to try, in order.
///
/// When `upstream` is given it is returned as the sole candidate and
/// `/etc/resolv.conf` is never read. Otherwise every line starting with
/// `nameserver ` is parsed as an IPv4 address. Lines that don't match the
/// prefix are skipped without counting against the ten-entry cap. A line
/// that *does* match the prefix counts against the cap whether or not its
/// address parses, matching the original `get_default_name_servers`, which
/// copies the line into the candidate list and advances its counter with no
/// address validation at all — a garbled entry only fails later, at
/// `connect()`. So ten prefix-matching lines, garbled or not, stop the scan
/// before an eleventh, otherwise-valid line is ever looked at.
pub fn discover(upstream: Option<Ipv4Addr>) -> io::Result<Vec<Ipv4Addr>> {
    if let Some(ip) = upstream {
        return Ok(vec![ip]);
    }
    let contents = fs::read_to_string(RESOLV_CONF)?;
    Ok(parse_resolv_conf(&contents))
}

fn parse_resolv_conf(contents: &str) -> Vec<Ipv4Addr> {
    let mut servers = Vec::with_capacity(MAX_NAME_SERVERS);
    let mut matched = 0usize;
    for line in contents.lines() {
        if matched >= MAX_NAME_SERVERS {
            break;
        }
        let Some(rest) = line.strip_prefix(PREFIX) else {
            continue;
        };
        matched += 1;
        if let Ok(ip) = rest.trim().parse::<Ipv4Addr>() {
            servers.push(ip);
        }
    }
    servers
}
