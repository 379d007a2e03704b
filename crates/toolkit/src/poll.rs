use crate::errors::PollError;
use std::future::Future;
use std::time::Duration;

/// Number of attempts used when the caller does not pick one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// Pause between two attempts when the caller does not pick one.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

/// Retries an asynchronous probe until it yields a value or the attempt budget runs out.
///
/// A probe returns `Ok(Some(value))` once the resource is ready. Both `Ok(None)` and `Err(_)`
/// count as a failed attempt and are followed by a fixed pause before the next one. Attempts
/// never overlap: attempt `k + 1` starts only after attempt `k` resolved and the pause elapsed.
///
/// On the final attempt an error from the probe is surfaced as [`PollError::Probe`], an empty
/// result as [`PollError::Timeout`].
pub struct Poller<E> {
    target: String,
    max_attempts: u32,
    delay: Duration,
    retry_if: Box<dyn Fn(&E) -> bool + Send + Sync>,
}

impl<E> Poller<E> {
    /// Creates a poller for `target`, a short description such as `"block 12345"` used in
    /// error messages and logs.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_DELAY,
            retry_if: Box::new(|_| true),
        }
    }

    /// Sets the attempt budget. A budget of zero is raised to one.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Marks which probe errors are worth retrying. Errors rejected by `predicate` end the
    /// poll immediately. Every error is retried by default.
    pub fn retry_if(mut self, predicate: impl Fn(&E) -> bool + Send + Sync + 'static) -> Self {
        self.retry_if = Box::new(predicate);
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn attempts(&self) -> u32 {
        self.max_attempts
    }

    pub async fn poll<T, F, Fut>(&self, mut probe: F) -> Result<T, PollError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>, E>>,
        E: std::fmt::Display,
    {
        for attempt in 1..=self.max_attempts {
            match probe().await {
                Ok(Some(value)) => {
                    log::debug!("{} ready after {attempt} attempt(s)", self.target);
                    return Ok(value);
                }
                Ok(None) => {
                    log::debug!(
                        "{} not available yet (attempt {attempt}/{})",
                        self.target,
                        self.max_attempts
                    );
                }
                Err(err) => {
                    if attempt == self.max_attempts || !(self.retry_if)(&err) {
                        log::warn!("{} probe failed on attempt {attempt}: {err}", self.target);
                        return Err(PollError::Probe {
                            target: self.target.clone(),
                            attempts: attempt,
                            source: err,
                        });
                    }
                    log::debug!(
                        "{} probe failed (attempt {attempt}/{}): {err}",
                        self.target,
                        self.max_attempts
                    );
                }
            }

            if attempt < self.max_attempts {
                tokio::time::sleep(self.delay).await;
            }
        }

        log::warn!(
            "{} not available after {} attempts",
            self.target,
            self.max_attempts
        );
        Err(PollError::Timeout {
            target: self.target.clone(),
            attempts: self.max_attempts,
        })
    }
}

/// Polls `probe` up to `max_attempts` times, pausing `delay` between attempts.
///
/// Shorthand for [`Poller`] when no target description or retry predicate is needed.
pub async fn poll_until_ready<T, E, F, Fut>(
    probe: F,
    max_attempts: u32,
    delay: Duration,
) -> Result<T, PollError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
    E: std::fmt::Display,
{
    Poller::new("probe")
        .max_attempts(max_attempts)
        .delay(delay)
        .poll(probe)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use tokio::time::Instant;

    #[derive(Debug, PartialEq)]
    struct ProbeFailure(&'static str);

    impl std::fmt::Display for ProbeFailure {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0)
        }
    }

    /// A probe that replays a fixed script of outcomes and counts its invocations.
    struct ScriptedProbe {
        outcomes: RefCell<VecDeque<Result<Option<u64>, ProbeFailure>>>,
        calls: Cell<u32>,
        call_times: RefCell<Vec<Instant>>,
    }

    impl ScriptedProbe {
        fn new(outcomes: Vec<Result<Option<u64>, ProbeFailure>>) -> Self {
            Self {
                outcomes: RefCell::new(outcomes.into()),
                calls: Cell::new(0),
                call_times: RefCell::new(Vec::new()),
            }
        }

        async fn call(&self) -> Result<Option<u64>, ProbeFailure> {
            self.calls.set(self.calls.get() + 1);
            self.call_times.borrow_mut().push(Instant::now());
            self.outcomes.borrow_mut().pop_front().unwrap_or(Ok(None))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolves_after_empty_results() {
        let probe = ScriptedProbe::new(vec![Ok(None), Ok(None), Ok(Some(42))]);
        let started = Instant::now();

        let value = poll_until_ready(|| probe.call(), 3, Duration::from_millis(10))
            .await
            .unwrap();

        assert_eq!(value, 42);
        assert_eq!(probe.calls.get(), 3);
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_after_exactly_max_attempts() {
        let probe = ScriptedProbe::new(vec![]);

        let err = Poller::new("finalized block number")
            .max_attempts(3)
            .delay(Duration::from_millis(10))
            .poll(|| probe.call())
            .await
            .unwrap_err();

        assert_eq!(probe.calls.get(), 3);
        assert!(err.is_timeout());
        assert_eq!(err.attempts(), 3);
        assert_eq!(
            err.to_string(),
            "finalized block number not available after 3 attempts"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_then_value_resolves() {
        let probe = ScriptedProbe::new(vec![Err(ProbeFailure("network down")), Ok(Some(7))]);

        let value = poll_until_ready(|| probe.call(), 2, DEFAULT_DELAY)
            .await
            .unwrap();

        assert_eq!(value, 7);
        assert_eq!(probe.calls.get(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_and_empty_results_are_equivalent() {
        let failing = ScriptedProbe::new(vec![
            Err(ProbeFailure("boom")),
            Err(ProbeFailure("boom")),
            Ok(Some(5)),
        ]);
        let empty = ScriptedProbe::new(vec![Ok(None), Ok(None), Ok(Some(5))]);
        let delay = Duration::from_millis(50);

        let from_failing = poll_until_ready(|| failing.call(), 3, delay).await.unwrap();
        let from_empty = poll_until_ready(|| empty.call(), 3, delay).await.unwrap();

        assert_eq!(from_failing, from_empty);
        assert_eq!(failing.calls.get(), empty.calls.get());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_success_returns_without_delay() {
        let probe = ScriptedProbe::new(vec![Ok(Some(1))]);
        let started = Instant::now();

        let value = poll_until_ready(|| probe.call(), 30, DEFAULT_DELAY)
            .await
            .unwrap();

        assert_eq!(value, 1);
        assert_eq!(probe.calls.get(), 1);
        assert!(started.elapsed() < DEFAULT_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempts_are_spaced_by_delay() {
        let probe = ScriptedProbe::new(vec![]);
        let delay = Duration::from_millis(25);

        let _ = poll_until_ready(|| probe.call(), 5, delay).await;

        let call_times = probe.call_times.borrow();
        assert_eq!(call_times.len(), 5);
        for pair in call_times.windows(2) {
            assert!(pair[1].duration_since(pair[0]) >= delay);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_final_probe_error_propagates() {
        let probe = ScriptedProbe::new(vec![
            Ok(None),
            Err(ProbeFailure("block not found")),
        ]);

        let err = Poller::new("block 12345")
            .max_attempts(2)
            .delay(Duration::from_millis(10))
            .poll(|| probe.call())
            .await
            .unwrap_err();

        assert!(!err.is_timeout());
        assert_eq!(err.attempts(), 2);
        assert_eq!(err.probe_error(), Some(&ProbeFailure("block not found")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_error_aborts_early() {
        let probe = ScriptedProbe::new(vec![
            Err(ProbeFailure("transient")),
            Err(ProbeFailure("fatal")),
            Ok(Some(3)),
        ]);

        let err = Poller::new("receipt")
            .max_attempts(5)
            .delay(Duration::from_millis(10))
            .retry_if(|err: &ProbeFailure| err.0 != "fatal")
            .poll(|| probe.call())
            .await
            .unwrap_err();

        assert_eq!(probe.calls.get(), 2);
        assert_eq!(err.probe_error(), Some(&ProbeFailure("fatal")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_still_probes_once() {
        let probe = ScriptedProbe::new(vec![Ok(Some(9))]);

        let poller = Poller::<ProbeFailure>::new("probe").max_attempts(0);
        assert_eq!(poller.attempts(), 1);

        let value = poller.poll(|| probe.call()).await.unwrap();
        assert_eq!(value, 9);
    }
}
