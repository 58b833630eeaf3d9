use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::config::PipelineConfig;
use super::error::PipelineError;
use super::tick::{run_tick, TickReport};
use crate::predict::ModelSource;

#[derive(Debug, Clone, Default, Serialize, utoipa::ToSchema)]
pub struct TickerStatus {
    pub running: bool,
    /// Ticks attempted so far
    pub ticks: u64,
    pub failures: u64,
    pub last_success: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

#[derive(Debug, Default)]
struct Shared {
    status: TickerStatus,
    latest: Option<Arc<TickReport>>,
}

impl Shared {
    /// A failed tick leaves the previous report in place.
    fn record(&mut self, at: DateTime<Utc>, result: Result<TickReport, PipelineError>) {
        self.status.ticks += 1;
        match result {
            Ok(report) => {
                self.status.last_success = Some(at);
                self.status.last_error = None;
                self.latest = Some(Arc::new(report));
            }
            Err(e) => {
                log::warn!("Tick failed, keeping previous snapshot: {}", e);
                self.status.failures += 1;
                self.status.last_error = Some(e.to_string());
            }
        }
    }
}

struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

/// Runs the sampling pipeline on a fixed interval and keeps the latest
/// successful report.
pub struct Ticker {
    shared: Arc<StdMutex<Shared>>,
    worker: Option<WorkerHandle>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(StdMutex::new(Shared::default())),
            worker: None,
        }
    }

    pub fn status(&self) -> TickerStatus {
        self.shared.lock().unwrap().status.clone()
    }

    pub fn latest(&self) -> Option<Arc<TickReport>> {
        self.shared.lock().unwrap().latest.clone()
    }

    /// Spawn the tick loop. The first tick fires immediately.
    pub fn start(
        &mut self,
        source: Arc<dyn ModelSource>,
        config: PipelineConfig,
    ) -> Result<(), PipelineError> {
        if self.worker.is_some() {
            return Err(PipelineError::AlreadyRunning);
        }

        let shared = self.shared.clone();
        let (stop_tx, stop_rx) = oneshot::channel();

        let join = tokio::spawn(run_ticker_loop(shared, source, config, stop_rx));
        self.worker = Some(WorkerHandle { stop_tx, join });

        self.shared.lock().unwrap().status.running = true;
        Ok(())
    }

    pub async fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            let _ = worker.join.await;
        }
        self.shared.lock().unwrap().status.running = false;
    }
}

async fn run_ticker_loop(
    shared: Arc<StdMutex<Shared>>,
    source: Arc<dyn ModelSource>,
    config: PipelineConfig,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut interval = tokio::time::interval(config.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut tick: u64 = 0;

    log::info!(
        "Sampling {} every {:?} ({} samples, {:?} apart)",
        source.describe(),
        config.interval,
        config.sample_count,
        config.step
    );

    loop {
        let should_stop = tokio::select! {
            _ = interval.tick() => false,
            _ = &mut stop_rx => true,
        };
        if should_stop {
            break;
        }

        let now = Utc::now();
        let result = run_tick(source.as_ref(), &config, now, tick);
        shared.lock().unwrap().record(now, result);
        tick += 1;
    }
}
