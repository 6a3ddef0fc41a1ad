//! The impls and functions.
//!
use std::{fmt, net::IpAddr};
use crate::servers::{Server, ServerState};

pub const DEFAULT_PORT: &str = "3306";

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Server {
    /// Create a new server record from a configured address.
    ///
    /// The address can be `host`, `host:port`, `[ipv6]:port`, optionally prefixed by
    /// `scheme://` and/or `user:password@`.
    /// If the host is an ip address, it is used as the ip too.
    pub fn new(url: &str) -> Self {
        let (host, port) = Server::split_address(url);
        let ip = match host.parse::<IpAddr>() {
            Ok(ip) => ip.to_string(),
            Err(_) => String::new(),
        };
        Server {
            url: url.to_string(),
            host,
            port,
            ip,
            ..Default::default()
        }
    }
    /// Create a failed server record: only the network identity derived from the address is set,
    /// nothing a failed server could have reported is.
    pub fn failed(url: &str) -> Self {
        let mut server = Server::new(url);
        server.state = ServerState::Failed;
        server
    }
    fn split_address(url: &str) -> (String, String) {
        let address = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
        let address = address.rsplit_once('@').map(|(_, rest)| rest).unwrap_or(address);
        let address = address.split('/').next().unwrap_or_default();

        // bracketed ipv6 address, optionally with a port.
        if let Some(rest) = address.strip_prefix('[') {
            if let Some((host, tail)) = rest.split_once(']') {
                let port = tail.strip_prefix(':').filter(|p| !p.is_empty()).unwrap_or(DEFAULT_PORT);
                return (host.to_string(), port.to_string());
            }
        }
        // a bare ipv6 address contains multiple colons and has no port.
        if address.matches(':').count() > 1 {
            return (address.to_string(), DEFAULT_PORT.to_string());
        }
        match address.split_once(':') {
            Some((host, port)) if !port.is_empty() => (host.to_string(), port.to_string()),
            Some((host, _)) => (host.to_string(), DEFAULT_PORT.to_string()),
            None => (address.to_string(), DEFAULT_PORT.to_string()),
        }
    }
    /// A server is configured as a slave if it has a replication position marker.
    pub fn is_using_replication(&self) -> bool {
        !self.using_gtid.is_empty()
    }
    /// Does `address` (as reported by a slave as its master host) identify this server?
    /// An empty address never matches.
    pub fn is_addressed_by(&self, address: &str) -> bool {
        !address.is_empty() && (self.host == address || self.ip == address)
    }
}
