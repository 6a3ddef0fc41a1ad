//! Module for the autodetection of the replication topology.
//!
//! A topology discovery pass takes the configured servers in configured order, and:
//! 1. probes every server ([crate::probe::probe_all]).
//! 2. classifies the servers as slave, unconnected or failed ([Classification::classify]).
//!    Access denied on any server aborts the pass, no slaves aborts the pass.
//! 3. checks that all slaves have the same master ([Classification::check_siblings]).
//!    Multi-master topologies are rejected.
//! 4. autodetects the master ([Classification::resolve_master]), depending on the [DiscoveryMode]:
//!    - promotion: the unconnected server with the server_id the slaves replicate from.
//!    - confirmation: the failed server with the host or ip the slaves replicate from.
//!
//!    The first match in configured order wins.
//! 5. verifies the live replication source of every slave against the master ([Classification::audit_slaves]).
//!    A mismatch is logged as a warning, and does not fail the pass.
//!
//! The entry point is [Topology::discover].
//!
mod structs;
mod functions;

pub use structs::*;
