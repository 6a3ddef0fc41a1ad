//! The impls and functions.
//!
use chrono::Local;
use std::{fmt, time::Instant};
use log::*;
use colored::*;
use crate::probe::{self, Prober, ProbeError, ProbeResult, ReplicationStatus};
use crate::servers::{Server, ServerState};
use crate::topology::{Classification, DiscoveryMode, Topology, TopologyError};

impl fmt::Display for DiscoveryMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl DiscoveryMode {
    /// A switchover target, or failover in monitor mode, selects promotion mode.
    /// Otherwise the mode is confirmation.
    pub fn from_options(
        switchover: Option<&str>,
        failover: Option<&str>,
    ) -> Self
    {
        if switchover.map_or(false, |s| !s.is_empty()) || failover == Some("monitor") {
            DiscoveryMode::Promotion
        } else {
            DiscoveryMode::Confirmation
        }
    }
    pub fn master_description(&self) -> &'static str {
        match self {
            DiscoveryMode::Promotion => "a master",
            DiscoveryMode::Confirmation => "a failed master",
        }
    }
}

impl<C: ReplicationStatus> Classification<C> {
    /// Classify the probe results, which must be in the configured order of `urls`.
    ///
    /// - access denied aborts the classification.
    /// - a connectivity failure makes the server failed.
    /// - a server with a replication position marker is a slave, otherwise it is unconnected.
    pub fn classify<P: Prober<Connection = C>>(
        prober: &P,
        urls: &[&str],
        results: Vec<ProbeResult<C>>,
    ) -> Result<Self, TopologyError>
    {
        let mut servers = Vec::with_capacity(urls.len());
        let mut slaves = Vec::new();
        let mut slave_connections = Vec::new();

        for (url, result) in urls.iter().zip(results) {
            match result {
                Err(ProbeError::AccessDenied(message)) => {
                    return Err(TopologyError::AccessDenied(message));
                }
                Err(ProbeError::Connectivity(message)) => {
                    debug!("{}: {}", url, message);
                    info!("server {} is dead", url);
                    let mut server = Server::failed(url);
                    let (host, ip) = prober.resolve_identity(url);
                    if let Some(host) = host {
                        server.host = host;
                    }
                    if let Some(ip) = ip {
                        server.ip = ip;
                    }
                    server.timestamp = Some(Local::now());
                    servers.push(server);
                }
                Ok((mut server, connection)) => {
                    debug!("checking if server {} is slave", url);
                    if server.is_using_replication() {
                        debug!("server {} is configured as a slave", url);
                        server.state = ServerState::Slave;
                        slaves.push(servers.len());
                        slave_connections.push(connection);
                    } else {
                        debug!("server {} is not a slave, setting aside", url);
                        server.state = ServerState::Unconnected;
                        drop(connection);
                    }
                    servers.push(server);
                }
            }
        }

        if slaves.is_empty() {
            return Err(TopologyError::NoSlavesDetected);
        }

        Ok(Classification { servers, slaves, slave_connections })
    }
    pub fn slaves(&self) -> impl Iterator<Item = &Server> {
        self.slaves.iter().map(|index| &self.servers[*index])
    }
    /// All slaves must replicate from the same master server_id.
    pub fn check_siblings(&self) -> Result<(), TopologyError> {
        let mut slaves = self.slaves();
        if let Some(first) = slaves.next() {
            if let Some(sibling) = slaves.find(|s| s.master_server_id != first.master_server_id) {
                debug!("server {} has master server_id {}, server {} has master server_id {}",
                       first.url, first.master_server_id, sibling.url, sibling.master_server_id);
                return Err(TopologyError::MultiMasterUnsupported);
            }
        }
        Ok(())
    }
    /// Find the master, set its state to master and return its index.
    ///
    /// The first slave represents all slaves: [Classification::check_siblings] must have passed.
    pub fn resolve_master(
        &mut self,
        mode: DiscoveryMode,
    ) -> Result<usize, TopologyError>
    {
        let representative = self.slaves()
            .next()
            .ok_or(TopologyError::NoSlavesDetected)?;

        let candidate = match mode {
            DiscoveryMode::Promotion => {
                let master_server_id = representative.master_server_id;
                self.servers.iter()
                    .position(|s| s.state == ServerState::Unconnected && s.server_id == master_server_id)
            }
            DiscoveryMode::Confirmation => {
                // the failed server has no server_id, the slaves know the master by host or ip.
                let master_host = representative.master_host.as_str();
                self.servers.iter()
                    .position(|s| s.state == ServerState::Failed && s.is_addressed_by(master_host))
            }
        };

        let master = candidate.ok_or(TopologyError::MasterNotFound(mode))?;
        self.servers[master].state = ServerState::Master;
        debug!("server {} was autodetected as a master", self.servers[master].url);
        Ok(master)
    }
    /// Check on the live connection of every slave if it replicates from the master.
    /// Returns the urls of the slaves that do not.
    pub fn audit_slaves(
        &self,
        master: usize,
    ) -> Vec<String>
    {
        let master = &self.servers[master];
        let mut mismatches = Vec::new();

        for (index, connection) in self.slaves.iter().zip(&self.slave_connections) {
            let slave = &self.servers[*index];
            debug!("checking if server {} is a slave of server {}", slave.host, master.host);
            match connection.is_slave_of(&master.host, &master.ip) {
                Ok(true) => {}
                Ok(false) => {
                    warn!("server {} is not a slave of declared master {}", slave.url, master.url);
                    mismatches.push(slave.url.clone());
                }
                Err(e) => {
                    warn!("server {} replication status could not be checked against declared master {}: {}", slave.url, master.url, e);
                    mismatches.push(slave.url.clone());
                }
            }
        }
        mismatches
    }
    /// Release the slave connections and produce the topology.
    pub fn into_topology(
        self,
        mode: DiscoveryMode,
        master: usize,
        mismatches: Vec<String>,
    ) -> Topology
    {
        let Classification { servers, slaves, slave_connections } = self;
        debug!("releasing {} slave connections", slave_connections.len());
        drop(slave_connections);
        Topology { mode, servers, master, slaves, mismatches }
    }
}

impl Topology {
    /// Perform a topology discovery pass over `urls`, in the given mode.
    pub fn discover<P: Prober>(
        prober: &P,
        urls: &[&str],
        mode: DiscoveryMode,
        parallel: usize,
    ) -> Result<Topology, TopologyError>
    {
        info!("begin topology discovery, mode: {}", mode);
        let timer = Instant::now();

        let results = probe::probe_all(prober, urls, parallel);
        let mut classification = Classification::classify(prober, urls, results)?;
        classification.check_siblings()?;
        let master = classification.resolve_master(mode)?;
        let mismatches = classification.audit_slaves(master);
        let topology = classification.into_topology(mode, master, mismatches);

        info!("end topology discovery: {:?}", timer.elapsed());
        Ok(topology)
    }
    pub fn master(&self) -> &Server {
        &self.servers[self.master]
    }
    pub fn slaves(&self) -> impl Iterator<Item = &Server> {
        self.slaves.iter().map(|index| &self.servers[*index])
    }
    pub fn print(&self) {
        println!("{} {}", "Mode:".bold(), self.mode);
        for server in &self.servers {
            let state = match server.state {
                ServerState::Master => server.state.to_string().green().bold(),
                ServerState::Slave => server.state.to_string().normal(),
                ServerState::Unconnected => server.state.to_string().yellow(),
                ServerState::Failed => server.state.to_string().red(),
            };
            print!("{:30} {:12} ", server.url, state);
            match server.state {
                ServerState::Failed => println!("ip: {}", if server.ip.is_empty() { "-" } else { server.ip.as_str() }),
                ServerState::Slave => {
                    print!("server_id: {:<6} master: {} ({})", server.server_id, server.master_host, server.master_server_id);
                    if self.mismatches.contains(&server.url) {
                        print!(" {}", "replication source mismatch".yellow());
                    }
                    println!();
                }
                _ => println!("server_id: {}", server.server_id),
            }
        }
    }
}
