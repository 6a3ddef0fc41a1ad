//! Snapshot functions
//!
use log::*;
use std::{fs, path::Path};
use anyhow::{Context, Result};
use crate::topology::Topology;

/// Save the topology as JSON at `filepath`. An existing file is overwritten.
pub fn save_topology_json(
    filepath: &Path,
    topology: &Topology,
) -> Result<()>
{
    fs::write(filepath, serde_json::to_string_pretty(topology)
        .with_context(|| "Json serialization error")?
    ).with_context(|| format!("Error saving topology: {}", filepath.display()))?;
    info!("topology saved: {}", filepath.display());
    Ok(())
}
