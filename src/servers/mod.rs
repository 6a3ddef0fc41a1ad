//! Module for the server (node) records of a discovery pass.
//!
//! A [Server] is created for every configured address at the start of a pass,
//! and is filled out by the prober with what the server reports about itself:
//! - host, port and ip address.
//! - server_id.
//! - the replication position marker (`gtid_slave_pos`), master host and master server_id when replicating.
//!
//! The [ServerState] is assigned by the topology classification, and is never reported by the server itself.
//! Server records only live for the duration of a pass.
//!
mod structs;
mod functions;

pub use structs::*;
