//! The impls and functions.
//!
use chrono::Local;
use std::{sync::mpsc::channel, time::Instant};
use log::*;
use crate::probe::{Prober, ProbeError, ProbeResult};

/// Probe all servers, and return the results in the configured order of `urls`.
///
/// With `parallel` set to 1 the servers are probed one at a time in configured order,
/// and probing stops at the first access denied error: that is always the last result.
/// With a higher `parallel` value, the probes are performed on a thread pool of that size,
/// and all servers are probed.
pub fn probe_all<P: Prober>(
    prober: &P,
    urls: &[&str],
    parallel: usize,
) -> Vec<ProbeResult<P::Connection>>
{
    info!("begin probe of {} servers, parallel: {}", urls.len(), parallel);
    let timer = Instant::now();

    let results = if parallel <= 1 {
        probe_sequential(prober, urls)
    } else {
        match rayon::ThreadPoolBuilder::new().num_threads(parallel).build() {
            Ok(pool) => probe_parallel(prober, urls, &pool),
            Err(e) => {
                warn!("could not create a thread pool of {} threads, probing sequentially: {}", parallel, e);
                probe_sequential(prober, urls)
            }
        }
    };

    info!("end probe: {:?}", timer.elapsed());
    results
}
fn probe_sequential<P: Prober>(
    prober: &P,
    urls: &[&str],
) -> Vec<ProbeResult<P::Connection>>
{
    let mut results = Vec::with_capacity(urls.len());
    for url in urls {
        let result = probe_server(prober, url);
        let denied = matches!(result, Err(ProbeError::AccessDenied(_)));
        results.push(result);
        if denied {
            break;
        }
    }
    results
}
fn probe_parallel<P: Prober>(
    prober: &P,
    urls: &[&str],
    pool: &rayon::ThreadPool,
) -> Vec<ProbeResult<P::Connection>>
{
    let (tx, rx) = channel();
    pool.scope(move |s| {
        for (index, url) in urls.iter().enumerate() {
            let tx = tx.clone();
            s.spawn(move |_| {
                let result = probe_server(prober, url);
                tx.send((index, result)).expect("error sending data via tx");
            });
        }
    });

    // the results arrive in completion order, the topology is decided in configured order.
    let mut indexed: Vec<(usize, ProbeResult<P::Connection>)> = rx.into_iter().collect();
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, result)| result).collect()
}
fn probe_server<P: Prober>(
    prober: &P,
    url: &str,
) -> ProbeResult<P::Connection>
{
    debug!("creating new server: {}", url);
    let probe_time = Local::now();
    let (mut server, connection) = prober.probe(url)?;
    server.url = url.to_string();
    server.timestamp = Some(probe_time);
    debug!("{:?}", &server);
    Ok((server, connection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utility_test::ScriptedProber;

    #[test]
    fn unit_probe_all_keeps_configured_order() {
        let prober = ScriptedProber::new()
            .slave("db1:3306", 1, 5, "db0")
            .failed("db2:3306")
            .unconnected("db3:3306", 5)
            .slave("db4:3306", 4, 5, "db0");
        let urls = vec!["db1:3306", "db2:3306", "db3:3306", "db4:3306"];

        for parallel in [1_usize, 4] {
            let results = probe_all(&prober, &urls, parallel);
            assert_eq!(results.len(), 4);
            assert_eq!(results[0].as_ref().unwrap().0.url, "db1:3306");
            assert!(matches!(results[1], Err(ProbeError::Connectivity(_))));
            assert_eq!(results[2].as_ref().unwrap().0.server_id, 5);
            assert_eq!(results[3].as_ref().unwrap().0.url, "db4:3306");
        }
    }

    #[test]
    fn unit_probe_all_sets_timestamp() {
        let prober = ScriptedProber::new().unconnected("db1:3306", 1);
        let results = probe_all(&prober, &["db1:3306"], 1);
        assert!(results[0].as_ref().unwrap().0.timestamp.is_some());
    }

    #[test]
    fn unit_probe_sequential_stops_at_access_denied() {
        let prober = ScriptedProber::new()
            .slave("db1:3306", 1, 5, "db0")
            .denied("db2:3306")
            .unconnected("db3:3306", 5);
        let results = probe_all(&prober, &["db1:3306", "db2:3306", "db3:3306"], 1);
        assert_eq!(results.len(), 2);
        assert!(matches!(results[1], Err(ProbeError::AccessDenied(_))));
        assert_eq!(prober.probed(), vec!["db1:3306", "db2:3306"]);
    }

    #[test]
    fn unit_probe_parallel_probes_every_server() {
        let prober = ScriptedProber::new()
            .denied("db1:3306")
            .unconnected("db2:3306", 5)
            .unconnected("db3:3306", 6);
        let results = probe_all(&prober, &["db1:3306", "db2:3306", "db3:3306"], 3);
        assert_eq!(results.len(), 3);
        assert!(matches!(results[0], Err(ProbeError::AccessDenied(_))));
        assert_eq!(prober.probed().len(), 3);
    }
}
