//! Module for saving a discovered topology.
//!
//! The topology is written as JSON, so the surrounding failover/switchover tooling
//! can pick up the autodetected master without running discovery again.
//!
mod functions;

pub use functions::*;
