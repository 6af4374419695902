use super::prelude::*;
use crate::util::time::capture_date;
use serde_json::Value;
use std::time::Duration;
use time::Date;

/// Bounded retries with exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Delay after the first failed attempt, doubled after every further failure
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

    /// The delay before the attempt that follows the failed `attempt` (1-based).
    pub fn delay_after_attempt(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            base_delay: Self::DEFAULT_BASE_DELAY,
        }
    }
}

/// Sends the query until it succeeds or the attempts are exhausted.
///
/// `sleep` is invoked with the backoff delay between two attempts,
/// never after the last one. The error of the last attempt is returned.
pub fn query_with_retry<G, S>(
    gateway: &G,
    policy: &RetryPolicy,
    mut sleep: S,
    query: &str,
) -> Result<Value>
where
    G: OverpassGateway + ?Sized,
    S: FnMut(Duration),
{
    if policy.max_attempts == 0 {
        return Err(Error::NoAttempts);
    }
    let mut attempt = 1;
    loop {
        match gateway.query(query) {
            Ok(response) => {
                if attempt > 1 {
                    log::info!("Overpass query succeeded after {attempt} attempts");
                }
                return Ok(response);
            }
            Err(err) if attempt >= policy.max_attempts => {
                log::error!("Overpass query failed after {attempt} attempts: {err}");
                return Err(err.into());
            }
            Err(err) => {
                let delay = policy.delay_after_attempt(attempt);
                log::warn!(
                    "Overpass attempt {attempt} of {} failed ({err}), retrying in {delay:?}",
                    policy.max_attempts
                );
                sleep(delay);
                attempt += 1;
            }
        }
    }
}

/// The number of top-level elements of an upstream response.
pub fn count_elements(capture: &Value) -> usize {
    capture
        .get("elements")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

#[derive(Debug, Clone)]
pub struct FetchRequest<'a> {
    /// Names the capture, usually the file stem of the query file
    pub query_name: &'a str,
    /// Overpass QL
    pub query: &'a str,
    pub date: Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub capture: String,
    pub element_count: usize,
}

/// Queries the upstream API and stores the unmodified response
/// as the capture of the day.
pub fn fetch_raw_capture<G, R, S>(
    gateway: &G,
    repo: &R,
    policy: &RetryPolicy,
    sleep: S,
    request: &FetchRequest,
) -> Result<FetchReport>
where
    G: OverpassGateway + ?Sized,
    R: RawCaptureRepo,
    S: FnMut(Duration),
{
    let FetchRequest {
        query_name,
        query,
        date,
    } = request;
    let response = query_with_retry(gateway, policy, sleep, query)?;
    let date = capture_date(*date)?;
    let capture = repo.save_raw_capture(&date, query_name, &response)?;
    Ok(FetchReport {
        capture,
        element_count: count_elements(&response),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::prelude::*;
    use serde_json::json;
    use time::macros::date;

    fn recording_sleep(delays: &mut Vec<Duration>) -> impl FnMut(Duration) + '_ {
        move |delay| delays.push(delay)
    }

    #[test]
    fn default_backoff_delays() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after_attempt(1), Duration::from_secs(1));
        assert_eq!(policy.delay_after_attempt(2), Duration::from_secs(2));
        assert_eq!(policy.delay_after_attempt(3), Duration::from_secs(4));
    }

    #[test]
    fn succeed_on_first_attempt() {
        let gateway = FakeOverpass::new(vec![Ok(json!({"elements": []}))]);
        let mut delays = vec![];
        let res = query_with_retry(
            &gateway,
            &RetryPolicy::default(),
            recording_sleep(&mut delays),
            "[out:json];",
        );
        assert!(res.is_ok());
        assert_eq!(gateway.calls(), 1);
        assert!(delays.is_empty());
    }

    #[test]
    fn succeed_on_third_attempt() {
        let gateway = FakeOverpass::new(vec![
            Err(UpstreamError::Transport("connection reset".into())),
            Err(UpstreamError::status(504, "Gateway Timeout")),
            Ok(json!({"elements": [{"type": "node", "id": 1}]})),
        ]);
        let mut delays = vec![];
        let res = query_with_retry(
            &gateway,
            &RetryPolicy::default(),
            recording_sleep(&mut delays),
            "[out:json];",
        )
        .unwrap();
        assert_eq!(count_elements(&res), 1);
        assert_eq!(gateway.calls(), 3);
        assert_eq!(delays, vec![Duration::from_secs(1), Duration::from_secs(2)]);
    }

    #[test]
    fn propagate_last_error_after_all_attempts() {
        let gateway = FakeOverpass::new(vec![
            Err(UpstreamError::Transport("first".into())),
            Err(UpstreamError::Transport("second".into())),
            Err(UpstreamError::status(429, "Too Many Requests")),
            Ok(json!({})),
        ]);
        let mut delays = vec![];
        let err = query_with_retry(
            &gateway,
            &RetryPolicy::default(),
            recording_sleep(&mut delays),
            "[out:json];",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Upstream(UpstreamError::Status { status: 429, .. })
        ));
        assert_eq!(gateway.calls(), 3);
        assert_eq!(delays.len(), 2);
    }

    #[test]
    fn reject_policy_without_attempts() {
        let gateway = FakeOverpass::new(vec![Ok(json!({}))]);
        let policy = RetryPolicy {
            max_attempts: 0,
            ..Default::default()
        };
        let res = query_with_retry(&gateway, &policy, |_| {}, "");
        assert!(matches!(res, Err(Error::NoAttempts)));
        assert_eq!(gateway.calls(), 0);
    }

    #[test]
    fn count_top_level_elements() {
        assert_eq!(count_elements(&json!({"elements": [{}, {}]})), 2);
        assert_eq!(count_elements(&json!({"elements": "none"})), 0);
        assert_eq!(count_elements(&json!({"remark": "runtime error"})), 0);
        assert_eq!(count_elements(&json!([])), 0);
    }

    #[test]
    fn store_capture_of_the_day() {
        let response = json!({"version": 0.6, "elements": [{"type": "node", "id": 1}]});
        let gateway = FakeOverpass::new(vec![Ok(response.clone())]);
        let db = MockDb::default();
        let request = FetchRequest {
            query_name: "berlin-cinemas",
            query: "[out:json];node[amenity=cinema];out;",
            date: date!(2025 - 08 - 10),
        };
        let report =
            fetch_raw_capture(&gateway, &db, &RetryPolicy::default(), |_| {}, &request).unwrap();
        assert_eq!(report.element_count, 1);
        assert_eq!(report.capture, "2025-08-10/berlin-cinemas");
        let captures = db.captures.borrow();
        assert_eq!(captures.get("2025-08-10/berlin-cinemas"), Some(&response));
    }

    #[test]
    fn nothing_is_stored_on_upstream_failure() {
        let gateway = FakeOverpass::new(vec![
            Err(UpstreamError::Transport("a".into())),
            Err(UpstreamError::Transport("b".into())),
            Err(UpstreamError::Transport("c".into())),
        ]);
        let db = MockDb::default();
        let request = FetchRequest {
            query_name: "q",
            query: "",
            date: date!(2025 - 08 - 10),
        };
        let res = fetch_raw_capture(&gateway, &db, &RetryPolicy::default(), |_| {}, &request);
        assert!(res.is_err());
        assert!(db.captures.borrow().is_empty());
    }
}
