use chrono::{DateTime, Local};
use serde_derive::{Serialize, Deserialize};

/// The role of a server in the replication topology.
///
/// `Master` is never reported by a server, it is the result of master autodetection.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServerState {
    /// Reachable, but not replicating.
    #[default]
    Unconnected,
    /// Reachable and configured to replicate from a master.
    Slave,
    /// Autodetected as the master of the slaves.
    Master,
    /// Unreachable, or the connection failed.
    Failed,
}
/// The record of a single server as observed during a discovery pass.
///
/// `url` is the address as configured, and is never changed.
/// For a [ServerState::Failed] server only `url`, `host`, `port` and `ip` are meaningful.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Server {
    pub url: String,
    pub host: String,
    pub port: String,
    pub ip: String,
    pub server_id: u32,
    /// The server_id of the master this server replicates from, 0 if not replicating.
    pub master_server_id: u32,
    /// The master address as found in the replication configuration of this server (hostname or ip).
    pub master_host: String,
    /// The replication position marker, empty if the server is not configured as a slave.
    pub using_gtid: String,
    pub state: ServerState,
    pub timestamp: Option<DateTime<Local>>,
}
