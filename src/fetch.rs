//! Background fetch worker.
//!
//! The UI thread never blocks on the network: requests go over a channel to
//! a dedicated thread owning the blocking HTTP client, and outcomes come
//! back tagged with the request's sequence number so the controller can
//! discard responses that a newer request has overtaken.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::units::Unit;
use crate::visualcrossing::{Client, FetchError, WeatherResponse};

/// Query sent to the worker thread.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub seq: u64,
    pub location: String,
    pub unit: Unit,
}

/// Result coming back from the worker thread.
#[derive(Debug)]
pub struct FetchOutcome {
    pub seq: u64,
    pub result: Result<WeatherResponse, FetchError>,
}

/// Spawn the worker. It exits when the request channel closes.
pub fn spawn_fetch_worker(
    client: Client,
    req_rx: Receiver<FetchRequest>,
    outcome_tx: Sender<FetchOutcome>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(mut req) = req_rx.recv() {
            // Coalesce queued requests - only the newest can still win.
            while let Ok(next) = req_rx.try_recv() {
                req = next;
            }

            let result = client.fetch(&req.location, req.unit);
            let _ = outcome_tx.send(FetchOutcome {
                seq: req.seq,
                result,
            });
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn worker_reports_failures_with_the_request_seq() {
        // grab a free port and release it again, so the connection is refused
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = Client::new(Config {
            api_key: "KEY".to_string(),
            base_url: format!("http://127.0.0.1:{port}/"),
        });

        let (req_tx, req_rx) = mpsc::channel();
        let (outcome_tx, outcome_rx) = mpsc::channel();
        spawn_fetch_worker(client, req_rx, outcome_tx);

        req_tx
            .send(FetchRequest {
                seq: 7,
                location: "Brighton".to_string(),
                unit: Unit::Metric,
            })
            .unwrap();

        let outcome = outcome_rx
            .recv_timeout(Duration::from_secs(10))
            .expect("worker replied");
        assert_eq!(outcome.seq, 7);
        assert!(matches!(outcome.result, Err(FetchError::Network(_))));
    }
}
