//! Utilities
use log::*;
use std::{env, fs, collections::{BTreeMap, HashMap}, path::{Path, PathBuf}};
use anyhow::{bail, Context, Result};

use crate::DEFAULT_HOSTS;
use crate::DEFAULT_PARALLEL;

/// Resolve a setting: the command line option first, then the environment (including .env),
/// then the default.
/// A setting taken from the option or the environment is added to `changed_options`,
/// so it can be written to .env.
fn resolve_setting(
    name: &str,
    option: &Option<String>,
    env_name: &'static str,
    default: Option<&str>,
    changed_options: &mut HashMap<&str, String>,
) -> Option<String>
{
    if let Some(value) = option {
        info!("{} argument set: using: {}", name, value);
        changed_options.insert(env_name, value.to_string());
        return Some(value.to_string());
    }
    match env::var(env_name) {
        Ok(set_var) => {
            info!("{} not set: set via .env: {}: {}", name, env_name, set_var);
            changed_options.insert(env_name, set_var.to_owned());
            Some(set_var)
        }
        Err(_e) => {
            match default {
                Some(default) => info!("{} not set: and not set via .env: using default: {}", name, default),
                None => info!("{} not set: and not set via .env: no default", name),
            }
            default.map(|d| d.to_string())
        }
    }
}

/// The servers in configured order.
pub fn set_hosts(
    option: &Option<String>,
    changed_options: &mut HashMap<&str, String>,
) -> Vec<String>
{
    resolve_setting("hosts", option, "REPTOPO_HOSTS", Some(DEFAULT_HOSTS), changed_options)
        .unwrap_or_default()
        .split(',')
        .map(|host| host.trim().to_string())
        .filter(|host| !host.is_empty())
        .collect()
}

pub fn set_parallel(
    option: &Option<String>,
    changed_options: &mut HashMap<&str, String>,
) -> Result<usize>
{
    let parallel_string = resolve_setting("parallel", option, "REPTOPO_PARALLEL", Some(DEFAULT_PARALLEL), changed_options)
        .unwrap_or_default();
    let parallel = parallel_string.trim().parse::<usize>()
        .with_context(|| format!("Invalid parallel setting: {}", parallel_string))?;
    if parallel == 0 {
        bail!("Invalid parallel setting: 0, at least 1 is required");
    }
    Ok(parallel)
}

pub fn set_observations(
    option: &Option<String>,
    changed_options: &mut HashMap<&str, String>,
) -> Result<PathBuf>
{
    match resolve_setting("observations", option, "REPTOPO_OBSERVATIONS", None, changed_options) {
        Some(observations) => Ok(PathBuf::from(observations)),
        None => bail!("No observation file set: use --observations or REPTOPO_OBSERVATIONS"),
    }
}

/// Persist the settings in `changed_options` to .env in the current directory, when asked to.
pub fn dotenv_writer(
    write_dotenv: bool,
    changed_options: HashMap<&str, String>,
) -> Result<()>
{
    if write_dotenv && !changed_options.is_empty() {
        write_settings(Path::new(".env"), &changed_options)?;
    }
    Ok(())
}
/// Write the settings as `KEY=value` lines, ordered by key, replacing the file at `filepath`.
fn write_settings(
    filepath: &Path,
    settings: &HashMap<&str, String>,
) -> Result<()>
{
    info!("writing settings to {}", filepath.display());
    let ordered: BTreeMap<&&str, &String> = settings.iter().collect();
    let mut contents = String::new();
    for (key, value) in ordered {
        debug!("{}={}", key, value);
        contents.push_str(&format!("{}={}\n", key, value));
    }
    fs::write(filepath, contents)
        .with_context(|| format!("Error writing settings file: {}", filepath.display()))?;
    Ok(())
}
