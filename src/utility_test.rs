//! Helpers for the unit tests.
use std::sync::Mutex;
use crate::probe::{Prober, ProbeError, ReplicationStatus};
use crate::servers::Server;

/// A prober that answers from a script, and records which urls were probed.
#[derive(Default)]
pub struct ScriptedProber {
    responses: Vec<(String, Result<Server, ProbeError>)>,
    live_master_hosts: Vec<(String, String)>,
    ips: Vec<(String, String)>,
    hosts: Vec<(String, String)>,
    probed: Mutex<Vec<String>>,
}

pub struct ScriptedConnection {
    live_master_host: Option<String>,
}

impl ScriptedProber {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn slave(mut self, url: &str, server_id: u32, master_server_id: u32, master_host: &str) -> Self {
        let mut server = Server::new(url);
        server.server_id = server_id;
        server.master_server_id = master_server_id;
        server.master_host = master_host.to_string();
        server.using_gtid = format!("0-{}-100", master_server_id);
        self.responses.push((url.to_string(), Ok(server)));
        self
    }
    pub fn unconnected(mut self, url: &str, server_id: u32) -> Self {
        let mut server = Server::new(url);
        server.server_id = server_id;
        self.responses.push((url.to_string(), Ok(server)));
        self
    }
    pub fn failed(mut self, url: &str) -> Self {
        self.responses.push((url.to_string(), Err(ProbeError::Connectivity(format!("dial tcp {}: connection refused", url)))));
        self
    }
    pub fn denied(mut self, url: &str) -> Self {
        self.responses.push((url.to_string(), Err(ProbeError::AccessDenied(format!("Access denied for user 'repl' to {}", url)))));
        self
    }
    /// The ip of the last scripted server.
    pub fn ip(mut self, ip: &str) -> Self {
        if let Some((url, response)) = self.responses.last_mut() {
            if let Ok(server) = response {
                server.ip = ip.to_string();
            }
            self.ips.push((url.clone(), ip.to_string()));
        }
        self
    }
    /// The hostname the last scripted server resolves to when it cannot be probed.
    pub fn host(mut self, host: &str) -> Self {
        if let Some((url, _)) = self.responses.last() {
            self.hosts.push((url.clone(), host.to_string()));
        }
        self
    }
    /// What the last scripted slave reports as its master at replication status check time.
    pub fn live_master_host(mut self, host: &str) -> Self {
        if let Some((url, _)) = self.responses.last() {
            self.live_master_hosts.push((url.clone(), host.to_string()));
        }
        self
    }
    pub fn probed(&self) -> Vec<String> {
        self.probed.lock().unwrap().clone()
    }
}

impl Prober for ScriptedProber {
    type Connection = ScriptedConnection;

    fn probe(&self, url: &str) -> Result<(Server, ScriptedConnection), ProbeError> {
        self.probed.lock().unwrap().push(url.to_string());
        let server = self.responses.iter()
            .find(|(u, _)| u == url)
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| Err(ProbeError::Connectivity(format!("unknown host {}", url))))?;
        let live_master_host = self.live_master_hosts.iter()
            .find(|(u, _)| u == url)
            .map(|(_, host)| host.clone());
        Ok((server, ScriptedConnection { live_master_host }))
    }
    fn resolve_identity(&self, url: &str) -> (Option<String>, Option<String>) {
        let lookup = |entries: &Vec<(String, String)>| entries.iter()
            .find(|(u, _)| u == url)
            .map(|(_, value)| value.clone());
        (lookup(&self.hosts), lookup(&self.ips))
    }
}

impl ReplicationStatus for ScriptedConnection {
    fn is_slave_of(&self, host: &str, ip: &str) -> Result<bool, ProbeError> {
        match &self.live_master_host {
            // a slave without a scripted live master host replicates from whatever is asked.
            None => Ok(true),
            Some(live) if live == "error" => Err(ProbeError::Connectivity("lost connection".to_string())),
            Some(live) => Ok(live == host || live == ip),
        }
    }
}
