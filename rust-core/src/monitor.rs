//! Spectrum monitor - history, metric selection and background analysis
//!
//! Owns the rolling history and the analyzer. Spectra are computed either
//! synchronously via [`SpectrumMonitor::compute`] or on a worker thread that
//! drains a [`ReadingSource`] and publishes the latest result for polling.

use crate::config::MonitorConfig;
use crate::history::{HistoricalDataPoint, HistoryBuffer, MetricKey};
use crate::spectrum::{dominant_bin, FrequencyBin, SpectrumAnalyzer, SpectrumError};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Not enough {metric} readings for a spectrum: have {available}, need {required}")]
    InsufficientData {
        metric: MetricKey,
        available: usize,
        required: usize,
    },

    #[error("Monitor worker is already running")]
    AlreadyRunning,

    #[error("Failed to spawn monitor worker: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(&'static str),

    #[error(transparent)]
    Spectrum(#[from] SpectrumError),
}

/// Push-style feed of readings, polled by the worker thread
pub trait ReadingSource: Send {
    /// Next available reading, or None if nothing is pending
    fn poll(&mut self) -> Option<HistoricalDataPoint>;
}

impl ReadingSource for Receiver<HistoricalDataPoint> {
    fn poll(&mut self) -> Option<HistoricalDataPoint> {
        self.try_recv().ok()
    }
}

/// Spectrum of one metric over the current history window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSpectrum {
    pub metric: MetricKey,

    /// Finite values that went into the transform
    pub sample_count: usize,

    /// Mean spacing of the readings that supplied a value
    pub sample_interval_secs: Option<f64>,

    pub bins: Vec<FrequencyBin>,

    /// Strongest non-DC component
    pub dominant: Option<FrequencyBin>,
}

/// History-backed spectrum monitor
pub struct SpectrumMonitor {
    history: Arc<Mutex<HistoryBuffer>>,

    analyzer: Arc<Mutex<SpectrumAnalyzer>>,

    /// Metric analyzed by the worker
    selected: Arc<Mutex<MetricKey>>,

    /// Latest worker result, taken by `get_results`
    results: Arc<Mutex<Option<MetricSpectrum>>>,

    min_samples: usize,

    poll_interval: Duration,

    worker: Option<JoinHandle<()>>,

    running: Arc<AtomicBool>,
}

impl SpectrumMonitor {
    /// Create new monitor with an empty history
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            history: Arc::new(Mutex::new(HistoryBuffer::new(config.history.capacity))),
            analyzer: Arc::new(Mutex::new(SpectrumAnalyzer::new(config.analysis.clone()))),
            selected: Arc::new(Mutex::new(MetricKey::Co2)),
            results: Arc::new(Mutex::new(None)),
            min_samples: config.monitor.min_samples.max(1),
            poll_interval: Duration::from_millis(config.monitor.poll_interval_ms),
            worker: None,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Append a reading to the history
    pub fn ingest(&self, point: HistoricalDataPoint) -> Result<(), MonitorError> {
        let mut history = self
            .history
            .lock()
            .map_err(|_| MonitorError::LockPoisoned("history"))?;
        history.push(point);
        Ok(())
    }

    /// Choose the metric the worker analyzes
    pub fn select_metric(&self, metric: MetricKey) -> Result<(), MonitorError> {
        let mut selected = self
            .selected
            .lock()
            .map_err(|_| MonitorError::LockPoisoned("selected metric"))?;
        *selected = metric;
        Ok(())
    }

    /// Currently selected metric
    pub fn selected_metric(&self) -> Result<MetricKey, MonitorError> {
        self.selected
            .lock()
            .map(|selected| *selected)
            .map_err(|_| MonitorError::LockPoisoned("selected metric"))
    }

    /// Number of readings in the history window
    pub fn history_len(&self) -> Result<usize, MonitorError> {
        self.history
            .lock()
            .map(|history| history.len())
            .map_err(|_| MonitorError::LockPoisoned("history"))
    }

    /// Spectrum of the selected metric over the current window
    pub fn compute(&self) -> Result<MetricSpectrum, MonitorError> {
        let metric = self.selected_metric()?;
        self.compute_for(metric)
    }

    /// Spectrum of `metric` over the current window
    pub fn compute_for(&self, metric: MetricKey) -> Result<MetricSpectrum, MonitorError> {
        analyze_metric(&self.history, &self.analyzer, metric, self.min_samples)
    }

    /// Start the worker thread draining `source`
    pub fn start<S>(&mut self, source: S) -> Result<(), MonitorError>
    where
        S: ReadingSource + 'static,
    {
        if self.worker.is_some() {
            return Err(MonitorError::AlreadyRunning);
        }

        let drain_limit = self
            .history
            .lock()
            .map(|history| history.capacity())
            .map_err(|_| MonitorError::LockPoisoned("history"))?;

        self.running.store(true, Ordering::SeqCst);

        let history = Arc::clone(&self.history);
        let analyzer = Arc::clone(&self.analyzer);
        let selected = Arc::clone(&self.selected);
        let results = Arc::clone(&self.results);
        let running = Arc::clone(&self.running);
        let min_samples = self.min_samples;
        let poll_interval = self.poll_interval;

        let handle = std::thread::Builder::new()
            .name("spectrum-monitor".to_string())
            .spawn(move || {
                let mut source = source;

                while running.load(Ordering::SeqCst) {
                    // At most one window per pass, `running` checked between reads
                    let mut received = 0usize;
                    while received < drain_limit && running.load(Ordering::SeqCst) {
                        let Some(point) = source.poll() else { break };
                        if let Ok(mut history) = history.lock() {
                            history.push(point);
                        }
                        received += 1;
                    }

                    if received == 0 {
                        std::thread::sleep(poll_interval);
                        continue;
                    }

                    let metric = match selected.lock() {
                        Ok(selected) => *selected,
                        Err(_) => break,
                    };

                    match analyze_metric(&history, &analyzer, metric, min_samples) {
                        Ok(spectrum) => {
                            debug!(
                                metric = %metric,
                                samples = spectrum.sample_count,
                                received,
                                "Spectrum updated"
                            );
                            if let Ok(mut results) = results.lock() {
                                *results = Some(spectrum);
                            }
                        }
                        Err(MonitorError::InsufficientData { available, required, .. }) => {
                            debug!(metric = %metric, available, required, "Waiting for more readings");
                        }
                        Err(e) => {
                            warn!(metric = %metric, error = %e, "Spectrum computation failed");
                        }
                    }
                }
            })
            .map_err(|e| {
                self.running.store(false, Ordering::SeqCst);
                MonitorError::Spawn(e)
            })?;

        self.worker = Some(handle);
        info!(min_samples = self.min_samples, "Spectrum monitor started");

        Ok(())
    }

    /// Stop the worker thread
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!("Spectrum monitor worker panicked");
            }
            info!("Spectrum monitor stopped");
        }
    }

    /// Check if the worker is running
    pub fn is_running(&self) -> bool {
        self.worker.is_some() && self.running.load(Ordering::SeqCst)
    }

    /// Take the latest worker result, if a new one is available
    pub fn get_results(&self) -> Option<MetricSpectrum> {
        if let Ok(mut results) = self.results.lock() {
            results.take()
        } else {
            None
        }
    }
}

impl Drop for SpectrumMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Extract one metric from history and transform it
///
/// Locks are held one at a time; the history lock is released before the
/// transform runs.
fn analyze_metric(
    history: &Mutex<HistoryBuffer>,
    analyzer: &Mutex<SpectrumAnalyzer>,
    metric: MetricKey,
    min_samples: usize,
) -> Result<MetricSpectrum, MonitorError> {
    let (values, sample_interval_secs) = {
        let history = history
            .lock()
            .map_err(|_| MonitorError::LockPoisoned("history"))?;
        history.metric_series(metric)
    };

    if values.len() < min_samples {
        return Err(MonitorError::InsufficientData {
            metric,
            available: values.len(),
            required: min_samples,
        });
    }

    let bins = analyzer
        .lock()
        .map_err(|_| MonitorError::LockPoisoned("analyzer"))?
        .analyze(&values)?;
    let dominant = dominant_bin(&bins).copied();

    Ok(MetricSpectrum {
        metric,
        sample_count: values.len(),
        sample_interval_secs,
        bins,
        dominant,
    })
}
