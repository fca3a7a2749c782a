//! Periodic probe cycle.
//!
//! One spawned task per monitor runs probe -> parse -> classify -> notify,
//! then sleeps until `interval` after the tick *started*. A cycle that
//! overruns the interval is followed immediately by the next one, never by
//! a concurrent one.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::domain::{CycleReport, MonitorSettings, ProbeOutcome, StateTracker, Target};
use crate::ports::{DisplaySink, Notifier, ProbeTransport};

/// Probe timeout used when none is configured
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

const MIN_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonitorError {
    #[error("poll interval must be at least one second")]
    InvalidInterval,

    #[error("no tokio runtime available to drive the probe timer")]
    NoRuntime,
}

/// Lifecycle of the probe loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerPhase {
    /// Waiting for the next tick
    Idle,
    /// A probe cycle is in flight
    Running,
    /// Shut down; terminal
    Stopped,
}

/// Probe timeout for one cycle: never longer than the interval, never under a second.
pub fn probe_timeout_for(configured: Duration, interval: Duration) -> Duration {
    configured.min(interval).max(MIN_PROBE_TIMEOUT)
}

/// Builder for a monitor's probe loop
pub struct MonitorScheduler {
    transport: Arc<dyn ProbeTransport>,
    displays: Vec<Arc<dyn DisplaySink>>,
    notifiers: Vec<Arc<dyn Notifier>>,
    probe_timeout: Duration,
}

impl MonitorScheduler {
    pub fn new(transport: Arc<dyn ProbeTransport>) -> Self {
        Self {
            transport,
            displays: Vec::new(),
            notifiers: Vec::new(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub fn with_display(mut self, display: Arc<dyn DisplaySink>) -> Self {
        self.displays.push(display);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifiers.push(notifier);
        self
    }

    pub fn with_probe_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }

    /// Spawn the probe loop on the current tokio runtime.
    ///
    /// Settings are read from `settings` once per tick; edits published there
    /// apply from the next tick on.
    pub fn start(
        self,
        settings: watch::Receiver<MonitorSettings>,
    ) -> Result<MonitorHandle, MonitorError> {
        let interval_seconds = settings.borrow().interval_seconds;
        if interval_seconds == 0 {
            return Err(MonitorError::InvalidInterval);
        }

        let runtime = tokio::runtime::Handle::try_current().map_err(|_| MonitorError::NoRuntime)?;

        let (stop_tx, stop_rx) = watch::channel(false);
        let (phase_tx, phase_rx) = watch::channel(SchedulerPhase::Idle);

        let cycle_loop = CycleLoop {
            scheduler: self,
            settings,
            settings_open: true,
            tracker: StateTracker::new(),
            phase: phase_tx,
            cycles: 0,
            last_target: None,
        };
        let task = runtime.spawn(cycle_loop.run(stop_rx));

        info!(interval_seconds, "Monitor started");

        Ok(MonitorHandle {
            stop: stop_tx,
            phase: phase_rx,
            task: Mutex::new(Some(task)),
        })
    }
}

/// Handle to a running monitor.
///
/// Dropping the handle also stops the loop, but without waiting for it.
pub struct MonitorHandle {
    stop: watch::Sender<bool>,
    phase: watch::Receiver<SchedulerPhase>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl MonitorHandle {
    pub fn phase(&self) -> SchedulerPhase {
        // Loop gone without reporting (e.g. panicked)
        if self.phase.has_changed().is_err() {
            return SchedulerPhase::Stopped;
        }
        *self.phase.borrow()
    }

    /// Stop the loop and wait for it to exit. Safe to call more than once.
    ///
    /// An in-flight probe is abandoned and its process killed.
    pub async fn shutdown(&self) {
        self.stop.send_replace(true);

        let mut task = self.task.lock().await;
        let Some(handle) = task.take() else {
            return;
        };

        match handle.await {
            Ok(()) => info!("Monitor shut down"),
            Err(e) if e.is_panic() => error!(error = %e, "Monitor task panicked"),
            Err(e) => warn!(error = %e, "Monitor task cancelled"),
        }
    }
}

/// Resolves once a stop is requested or the handle is gone
async fn stop_requested(stop: &mut watch::Receiver<bool>) {
    let _ = stop.wait_for(|stopped| *stopped).await;
}

/// State owned by the spawned loop; sole writer of the tracker
struct CycleLoop {
    scheduler: MonitorScheduler,
    settings: watch::Receiver<MonitorSettings>,
    settings_open: bool,
    tracker: StateTracker,
    phase: watch::Sender<SchedulerPhase>,
    cycles: u64,
    last_target: Option<Target>,
}

impl CycleLoop {
    async fn run(mut self, mut stop: watch::Receiver<bool>) {
        loop {
            if *stop.borrow() {
                break;
            }

            let tick_started = Instant::now();
            let snapshot = self.settings.borrow_and_update().clone();
            self.phase.send_replace(SchedulerPhase::Running);

            let completed = tokio::select! {
                biased;
                _ = stop_requested(&mut stop) => false,
                _ = self.run_cycle(&snapshot) => true,
            };

            if !completed {
                debug!(host = %snapshot.target, "Shutdown requested, abandoning in-flight probe");
                break;
            }

            self.phase.send_replace(SchedulerPhase::Idle);

            if !self.wait_for_next_tick(tick_started, &mut stop).await {
                break;
            }
        }

        self.phase.send_replace(SchedulerPhase::Stopped);
        info!(cycles = self.cycles, "Monitor loop stopped");
    }

    async fn run_cycle(&mut self, settings: &MonitorSettings) {
        let target = &settings.target;

        if self.last_target.as_ref() != Some(target) {
            if let Some(previous) = self.last_target.replace(target.clone()) {
                info!(from = %previous, to = %target, "Target changed");
            }
        }

        let started_at = Utc::now();
        let clock = Instant::now();
        let timeout = probe_timeout_for(self.scheduler.probe_timeout, settings.interval());

        let outcome = self.scheduler.transport.execute(target, timeout).await;
        if let ProbeOutcome::Failure { reason } = &outcome {
            debug!(host = %target, reason = %reason, "Probe failed");
        }
        let status = outcome.classify();

        if self.settings.borrow().target != *target {
            debug!(host = %target, "Target changed during probe, discarding result");
            return;
        }

        let observation = self.tracker.observe(status);
        self.cycles += 1;

        let report = CycleReport {
            cycle: self.cycles,
            target: target.clone(),
            status: observation.state,
            significant: observation.changed,
            sound_enabled: settings.sound_enabled,
            started_at,
            elapsed_ms: clock.elapsed().as_millis() as u64,
        };

        if report.significant {
            info!(host = %report.target, status = %report.status, "Reachability changed");
        }

        for display in &self.scheduler.displays {
            display.show(&report);
        }

        for notifier in &self.scheduler.notifiers {
            if let Err(e) = notifier.notify(&report).await {
                warn!(notifier = notifier.name(), error = %e, "Notification failed");
            }
        }
    }

    /// Sleep until `interval` after `tick_started`; false if a stop was requested.
    ///
    /// A settings change while sleeping recomputes the deadline.
    async fn wait_for_next_tick(
        &mut self,
        tick_started: Instant,
        stop: &mut watch::Receiver<bool>,
    ) -> bool {
        loop {
            let deadline = tick_started + self.settings.borrow().interval();

            tokio::select! {
                biased;
                _ = stop_requested(stop) => return false,
                _ = tokio::time::sleep_until(deadline) => return true,
                changed = self.settings.changed(), if self.settings_open => {
                    if changed.is_err() {
                        self.settings_open = false;
                    }
                }
            }
        }
    }
}
