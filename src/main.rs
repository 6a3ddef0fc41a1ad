//! The reptopo binary: discover the replication topology from an observation file, and print it.
use std::{collections::HashMap, path::Path, process};
use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use env_logger::Env;
use log::*;

use reptopo::probe::ObservationProber;
use reptopo::topology::{DiscoveryMode, Topology};
use reptopo::{snapshot, utility};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Opts {
    /// hostnames or urls of the servers, comma separated, in order of preference
    #[arg(short = 'H', long, value_name = "hostname:port,hostname:port")]
    hosts: Option<String>,
    /// number of servers probed at the same time
    #[arg(long, value_name = "nr")]
    parallel: Option<String>,
    /// switchover mode: a set value makes the master searched among the reachable servers
    #[arg(long, value_name = "keep|kill")]
    switchover: Option<String>,
    /// failover mode: 'monitor' makes the master searched among the reachable servers
    #[arg(long, value_name = "monitor|force")]
    failover: Option<String>,
    /// the observation file with the probed server data
    #[arg(long, value_name = "file")]
    observations: Option<String>,
    /// save the discovered topology as JSON
    #[arg(long, value_name = "file")]
    output: Option<String>,
    /// write the hosts, parallel and observations settings to .env
    #[arg(long)]
    write_dotenv: bool,
    /// debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()>
{
    dotenv().ok();
    let options = Opts::parse();

    let default_level = if options.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let mut changed_options = HashMap::new();
    let hosts = utility::set_hosts(&options.hosts, &mut changed_options);
    let parallel = utility::set_parallel(&options.parallel, &mut changed_options)?;
    let observations = utility::set_observations(&options.observations, &mut changed_options)?;
    utility::dotenv_writer(options.write_dotenv, changed_options)?;

    let prober = ObservationProber::read_observations(&observations)?;
    let urls: Vec<&str> = hosts.iter().map(String::as_str).collect();
    let mode = DiscoveryMode::from_options(options.switchover.as_deref(), options.failover.as_deref());

    let topology = Topology::discover(&prober, &urls, mode, parallel)
        .unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        });

    topology.print();
    if let Some(output) = &options.output {
        snapshot::save_topology_json(Path::new(output), &topology)?;
    }
    Ok(())
}
