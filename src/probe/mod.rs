//! Module for probing the configured servers.
//!
//! Probing a server means connecting to it, and reading what it reports about itself and its replication:
//! - `@@server_id`, `@@hostname`, the ip address.
//! - `@@gtid_slave_pos`: the replication position marker, non-empty when configured as a slave.
//! - `SHOW SLAVE STATUS`: the master host and the master server_id.
//!
//! The connection and the status queries are provided by an implementation of the [Prober] trait,
//! the connection that is returned is used once more after master autodetection to verify the
//! replication source of the slaves via [ReplicationStatus].
//!
//! A probe can fail in two ways ([ProbeError]):
//! - access denied: the server rejected the credentials.
//! - connectivity: anything else (timeout, refused, dns, driver error).
//!
//! [ObservationProber] is a prober that takes the server observations from a JSON observation file.
//!
mod structs;
mod functions;
mod observations;

pub use structs::*;
pub use functions::*;
pub use observations::*;
