//! reptopo: autodetection of the replication topology of a set of MariaDB/MySQL servers.
//!
//! The library performs a single topology discovery pass:
//! probe every configured server, classify the servers as slave, unconnected or failed,
//! check that all slaves replicate from one master, and autodetect that master,
//! even if it is down.
//!
//! See [topology::Topology::discover].
pub mod servers;
pub mod probe;
pub mod topology;
pub mod snapshot;
pub mod utility;
#[cfg(test)]
mod utility_test;

pub const DEFAULT_HOSTS: &str = "127.0.0.1:3306";
pub const DEFAULT_PARALLEL: &str = "1";
