//! Periodic liveness sweep over registered agents.
//!
//! Each cycle snapshots the store, probes every agent through the
//! [`CardFetcher`] with bounded fan-out, and commits each outcome as a
//! single atomic store operation. Agents that fail `max_failures`
//! consecutive probes are evicted. At most one cycle runs at a time.

use crate::registry::{
    domain::AgentRecord,
    ports::{AgentStore, CardFetcher, ProbeFailure},
};
use futures::StreamExt;
use mockable::Clock;
use std::num::{NonZeroU32, NonZeroUsize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors returned while building a [`SweeperConfig`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SweeperConfigError {
    /// The sweep period is zero.
    #[error("health check interval must be greater than zero")]
    ZeroInterval,
    /// The eviction threshold is zero.
    #[error("max failures must be greater than zero")]
    ZeroMaxFailures,
    /// The probe fan-out is zero.
    #[error("max concurrent probes must be greater than zero")]
    ZeroConcurrency,
}

/// Tuning for the liveness sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweeperConfig {
    check_interval: Duration,
    max_failures: NonZeroU32,
    max_concurrent_probes: NonZeroUsize,
}

impl SweeperConfig {
    /// Creates a validated sweep configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`SweeperConfigError`] when any value is zero.
    pub fn new(
        check_interval: Duration,
        max_failures: u32,
        max_concurrent_probes: usize,
    ) -> Result<Self, SweeperConfigError> {
        if check_interval.is_zero() {
            return Err(SweeperConfigError::ZeroInterval);
        }
        let failures = NonZeroU32::new(max_failures).ok_or(SweeperConfigError::ZeroMaxFailures)?;
        let fan_out =
            NonZeroUsize::new(max_concurrent_probes).ok_or(SweeperConfigError::ZeroConcurrency)?;
        Ok(Self {
            check_interval,
            max_failures: failures,
            max_concurrent_probes: fan_out,
        })
    }

    /// Returns the sweep period.
    #[must_use]
    pub const fn check_interval(&self) -> Duration {
        self.check_interval
    }

    /// Returns the consecutive-failure eviction threshold.
    #[must_use]
    pub const fn max_failures(&self) -> u32 {
        self.max_failures.get()
    }

    /// Returns the maximum number of probes in flight at once.
    #[must_use]
    pub const fn max_concurrent_probes(&self) -> usize {
        self.max_concurrent_probes.get()
    }
}

/// Summary of one sweep cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Agents probed.
    pub probed: usize,
    /// Probes that succeeded.
    pub alive: usize,
    /// Probes that failed without reaching the eviction threshold.
    pub failed: usize,
    /// Agents removed after reaching the eviction threshold.
    pub evicted: usize,
    /// Whether the cycle was skipped because another was still running.
    pub skipped: bool,
}

impl SweepReport {
    const fn skipped() -> Self {
        Self {
            probed: 0,
            alive: 0,
            failed: 0,
            evicted: 0,
            skipped: true,
        }
    }

    const fn tally(mut self, outcome: ProbeOutcome) -> Self {
        self.probed += 1;
        match outcome {
            ProbeOutcome::Alive => self.alive += 1,
            ProbeOutcome::Failed => self.failed += 1,
            ProbeOutcome::Evicted => self.evicted += 1,
            ProbeOutcome::Gone => {}
        }
        self
    }
}

#[derive(Debug, Clone, Copy)]
enum ProbeOutcome {
    Alive,
    Failed,
    Evicted,
    /// The agent was unregistered while its probe was in flight.
    Gone,
}

/// Background task that keeps the store honest.
pub struct LivenessSweeper<S, F, C>
where
    S: AgentStore,
    F: CardFetcher,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    fetcher: Arc<F>,
    clock: Arc<C>,
    config: SweeperConfig,
    cycle: Arc<Mutex<()>>,
}

impl<S, F, C> Clone for LivenessSweeper<S, F, C>
where
    S: AgentStore,
    F: CardFetcher,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            fetcher: Arc::clone(&self.fetcher),
            clock: Arc::clone(&self.clock),
            config: self.config,
            cycle: Arc::clone(&self.cycle),
        }
    }
}

impl<S, F, C> LivenessSweeper<S, F, C>
where
    S: AgentStore,
    F: CardFetcher,
    C: Clock + Send + Sync,
{
    /// Creates a sweeper over `store`.
    #[must_use]
    pub fn new(store: Arc<S>, fetcher: Arc<F>, clock: Arc<C>, config: SweeperConfig) -> Self {
        Self {
            store,
            fetcher,
            clock,
            config,
            cycle: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the sweep configuration.
    #[must_use]
    pub const fn config(&self) -> &SweeperConfig {
        &self.config
    }

    /// Runs one sweep cycle.
    ///
    /// Returns a skipped report immediately when another cycle is still in
    /// flight. Probe failures are recorded against the agents and logged;
    /// they are never returned.
    pub async fn sweep_once(&self) -> SweepReport {
        let Ok(_cycle) = self.cycle.try_lock() else {
            debug!("previous sweep still running, skipping cycle");
            return SweepReport::skipped();
        };

        let records = self.store.snapshot();
        if records.is_empty() {
            return SweepReport::default();
        }

        let report = futures::stream::iter(records)
            .map(|record| self.probe(record))
            .buffer_unordered(self.config.max_concurrent_probes())
            .fold(SweepReport::default(), |report, outcome| async move {
                report.tally(outcome)
            })
            .await;

        debug!(
            probed = report.probed,
            alive = report.alive,
            failed = report.failed,
            evicted = report.evicted,
            "sweep cycle complete"
        );
        report
    }

    async fn probe(&self, record: AgentRecord) -> ProbeOutcome {
        let url = record.url();
        match self.fetcher.probe(url).await {
            Ok(card) => {
                if self.store.record_probe_success(url, card, self.clock.utc()) {
                    ProbeOutcome::Alive
                } else {
                    ProbeOutcome::Gone
                }
            }
            Err(err) => {
                let max_failures = self.config.max_failures();
                match self.store.record_probe_failure(url, max_failures) {
                    ProbeFailure::Missing => ProbeOutcome::Gone,
                    ProbeFailure::Counted(failures) => {
                        info!(
                            url = %url,
                            failures,
                            max_failures,
                            error = %err,
                            "agent healthcheck failed"
                        );
                        ProbeOutcome::Failed
                    }
                    ProbeFailure::Evicted(evicted) => {
                        warn!(
                            agent = evicted.card().name(),
                            url = %url,
                            max_failures,
                            "agent deregistered after consecutive failed healthchecks"
                        );
                        ProbeOutcome::Evicted
                    }
                }
            }
        }
    }
}

impl<S, F, C> LivenessSweeper<S, F, C>
where
    S: AgentStore + 'static,
    F: CardFetcher + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Spawns the periodic sweep on the current Tokio runtime.
    ///
    /// The first cycle runs one `check_interval` after the call. Ticks that
    /// fire while a cycle is still running are dropped rather than queued.
    #[must_use = "dropping the handle leaves the sweeper running until the runtime shuts down"]
    pub fn start(&self) -> SweeperHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let sweeper = self.clone();
        let period = self.config.check_interval();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(
                interval = ?period,
                max_failures = sweeper.config.max_failures(),
                "liveness sweeper started"
            );

            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                tokio::select! {
                    () = token.cancelled() => break,
                    _ = sweeper.sweep_once() => {}
                }
            }

            info!("liveness sweeper stopped");
        });

        SweeperHandle { cancel, task }
    }
}

/// Handle controlling a running [`LivenessSweeper`].
#[derive(Debug)]
pub struct SweeperHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stops the sweeper, abandoning any probes still in flight, and waits
    /// for the task to exit.
    pub async fn stop(self) {
        self.cancel.cancel();
        if let Err(err) = self.task.await {
            warn!(error = %err, "liveness sweeper task ended abnormally");
        }
    }

    /// Returns whether the sweeper task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
