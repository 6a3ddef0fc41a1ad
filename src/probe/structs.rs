use thiserror::Error;
use crate::servers::Server;

/// The two kinds of probe failure the topology discovery distinguishes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The server rejected the credentials.
    #[error("access denied: {0}")]
    AccessDenied(String),
    /// Any other failure to connect or query.
    #[error("connection failed: {0}")]
    Connectivity(String),
}

/// The replication status query on a live connection.
pub trait ReplicationStatus {
    /// Is the server behind this connection currently replicating from `host` or `ip`?
    fn is_slave_of(&self, host: &str, ip: &str) -> Result<bool, ProbeError>;
}

/// The connection and status query collaborator.
///
/// A probe owns its connection exclusively, and hands it over with the server record.
/// Dropping the connection releases it.
pub trait Prober: Sync {
    type Connection: ReplicationStatus + Send;

    /// Connect to `url` and read the server record.
    fn probe(&self, url: &str) -> Result<(Server, Self::Connection), ProbeError>;

    /// The host and ip address of a server that could not be probed, as far as they can still be resolved.
    fn resolve_identity(&self, _url: &str) -> (Option<String>, Option<String>) {
        (None, None)
    }
}

/// The outcome of probing a single server.
pub type ProbeResult<C> = Result<(Server, C), ProbeError>;
