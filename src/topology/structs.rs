use serde_derive::{Serialize, Deserialize};
use thiserror::Error;
use crate::servers::Server;

/// Where the master is searched for.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMode {
    /// The master may be gone: it is the unconnected server with the server_id the slaves replicate from.
    /// Used for switchover and for failover in monitor mode.
    Promotion,
    /// The master must be down: it is the failed server with the host or ip the slaves replicate from.
    Confirmation,
}
/// The reasons a topology discovery pass fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Database access denied: {0}")]
    AccessDenied(String),
    #[error("No slaves were detected")]
    NoSlavesDetected,
    #[error("Multi-master topologies are not yet supported")]
    MultiMasterUnsupported,
    #[error("Could not autodetect {}", .0.master_description())]
    MasterNotFound(DiscoveryMode),
}
/// The servers of a pass after classification.
///
/// `slaves` holds the indexes into `servers` of the slaves, in configured order.
/// `slave_connections` holds the connection of every slave, in the same order as `slaves`.
/// The connections of the other servers are released during classification.
pub struct Classification<C> {
    pub servers: Vec<Server>,
    pub slaves: Vec<usize>,
    pub slave_connections: Vec<C>,
}
/// The result of a successful discovery pass.
///
/// Exactly one server in `servers` has the state master, `master` is its index.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Topology {
    pub mode: DiscoveryMode,
    pub servers: Vec<Server>,
    pub master: usize,
    pub slaves: Vec<usize>,
    /// The urls of the slaves that do not replicate from the master at the time of checking.
    pub mismatches: Vec<String>,
}
