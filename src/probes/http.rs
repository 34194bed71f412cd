use super::{Probe, ProbeFailure, ProbeOutcome};
use crate::registry::Endpoint;
use reqwest::Client;
use std::time::{Duration, Instant};

/// HTTP GET probe: an endpoint is active iff it answers 200 exactly.
///
/// Redirects follow the client's default policy, so a 3xx only surfaces as a
/// failure when the chain ends on one. Other 2xx codes are failures too; a
/// 204 from a health URL usually means the service behind it is absent.
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, endpoint: &Endpoint, timeout: Duration) -> ProbeOutcome {
        let start = Instant::now();
        let result = self.client.get(&endpoint.url).timeout(timeout).send().await;

        let response = match result {
            Ok(response) => response,
            Err(err) => return classify_error(&err, timeout),
        };
        let status = response.status().as_u16();

        // Drain the body under the same deadline so the measured time covers
        // the full transfer and a stalled body still counts as a timeout.
        if let Err(err) = response.bytes().await {
            return classify_error(&err, timeout);
        }

        let elapsed = start.elapsed().as_secs_f64();
        if status == 200 {
            ProbeOutcome::success(elapsed)
        } else {
            ProbeOutcome::failed(elapsed, ProbeFailure::Status(status))
        }
    }
}

/// Map a transport error onto the failure taxonomy. Timeouts record the
/// configured bound as their elapsed time, not the true wait; connection
/// failures (DNS, refused, reset) and other transport errors record zero.
fn classify_error(err: &reqwest::Error, timeout: Duration) -> ProbeOutcome {
    if err.is_timeout() {
        ProbeOutcome::failed(timeout.as_secs_f64(), ProbeFailure::Timeout)
    } else if err.is_connect() {
        ProbeOutcome::failed(0.0, ProbeFailure::Connection)
    } else {
        ProbeOutcome::failed(0.0, ProbeFailure::Request(err.to_string()))
    }
}
