//! The observation file prober.
//!
//! An observation file is a JSON array with one entry per server, as recorded by an external collector:
//! ```text
//! [
//!   {"url":"db1:3306","ip":"10.0.0.1","server_id":1,"using_gtid":"0-2-1043","master_host":"db2","master_server_id":2},
//!   {"url":"db2:3306","failure":"unreachable","message":"connect timeout","ip":"10.0.0.2"},
//!   {"url":"db3:3306","ip":"10.0.0.3","server_id":3}
//! ]
//! ```
//! A server that is not in the observation file is unreachable.
use std::{fs, path::Path};
use anyhow::{Context, Result};
use log::*;
use serde_derive::{Serialize, Deserialize};
use crate::probe::{Prober, ProbeError, ReplicationStatus};
use crate::servers::Server;

/// How probing a server failed, as recorded in the observation file.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ObservedFailure {
    AccessDenied,
    Unreachable,
}
/// A single server as recorded in the observation file.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Observation {
    pub url: String,
    #[serde(default)]
    pub failure: Option<ObservedFailure>,
    #[serde(default)]
    pub message: String,
    /// The hostname reported by the server, or resolved for a failed server.
    /// If absent, the host part of the url is used.
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub server_id: u32,
    #[serde(default)]
    pub using_gtid: String,
    #[serde(default)]
    pub master_host: String,
    #[serde(default)]
    pub master_server_id: u32,
    /// The master host the slave reports at the time of the replication status check.
    /// If absent, `master_host` is used.
    #[serde(default)]
    pub live_master_host: Option<String>,
}
/// A [Prober] that answers from recorded observations.
#[derive(Debug, Default)]
pub struct ObservationProber {
    pub observations: Vec<Observation>,
}
/// The "connection" to an observed server.
#[derive(Debug)]
pub struct ObservationConnection {
    live_master_host: String,
}

impl ObservationProber {
    pub fn new(observations: Vec<Observation>) -> Self {
        ObservationProber { observations }
    }
    pub fn parse_observations(json: &str) -> Result<Self> {
        let observations: Vec<Observation> = serde_json::from_str(json)
            .with_context(|| "Json deserialization error in observations")?;
        Ok(ObservationProber::new(observations))
    }
    pub fn read_observations(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Error reading observation file: {}", path.display()))?;
        let prober = ObservationProber::parse_observations(&data)?;
        info!("read {} observations from {}", prober.observations.len(), path.display());
        Ok(prober)
    }
    fn find(&self, url: &str) -> Option<&Observation> {
        self.observations.iter().find(|o| o.url == url)
    }
}

impl Prober for ObservationProber {
    type Connection = ObservationConnection;

    fn probe(&self, url: &str) -> Result<(Server, ObservationConnection), ProbeError> {
        let observation = self.find(url)
            .ok_or_else(|| ProbeError::Connectivity(format!("no observation recorded for {}", url)))?;

        match observation.failure {
            Some(ObservedFailure::AccessDenied) => return Err(ProbeError::AccessDenied(observation.message.clone())),
            Some(ObservedFailure::Unreachable) => return Err(ProbeError::Connectivity(observation.message.clone())),
            None => {}
        }

        let mut server = Server::new(url);
        if let Some(host) = &observation.host {
            server.host = host.clone();
        }
        if !observation.ip.is_empty() {
            server.ip = observation.ip.clone();
        }
        server.server_id = observation.server_id;
        server.using_gtid = observation.using_gtid.clone();
        server.master_host = observation.master_host.clone();
        server.master_server_id = observation.master_server_id;

        let connection = ObservationConnection {
            live_master_host: observation.live_master_host
                .clone()
                .unwrap_or_else(|| observation.master_host.clone()),
        };
        Ok((server, connection))
    }
    fn resolve_identity(&self, url: &str) -> (Option<String>, Option<String>) {
        match self.find(url) {
            Some(observation) => (
                observation.host.clone().filter(|host| !host.is_empty()),
                Some(observation.ip.clone()).filter(|ip| !ip.is_empty()),
            ),
            None => (None, None),
        }
    }
}

impl ReplicationStatus for ObservationConnection {
    fn is_slave_of(&self, host: &str, ip: &str) -> Result<bool, ProbeError> {
        Ok(!self.live_master_host.is_empty()
            && (self.live_master_host == host || self.live_master_host == ip))
    }
}
