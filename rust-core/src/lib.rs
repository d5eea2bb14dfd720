//! Airwatch Spectral - Frequency Analysis Core for Air-Quality Monitoring
//!
//! Computes the one-sided DFT of a metric's rolling history to expose periodic
//! structure (HVAC cycling, daily swings) in CO₂, temperature and humidity.
//! Optional Python bindings behind the `python` feature.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod config;
pub mod history;
pub mod monitor;
pub mod spectrum;
#[cfg(feature = "python")]
pub mod python_bindings;

pub use config::MonitorConfig;
pub use history::{HistoricalDataPoint, HistoryBuffer, MetricKey};
pub use monitor::{MetricSpectrum, ReadingSource, SpectrumMonitor};
pub use spectrum::{compute_spectrum, FrequencyBin, SpectrumAnalyzer};
