//! Python bindings for the spectrum monitor

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use crate::config::MonitorConfig;
use crate::history::{AirQualityReading, HistoricalDataPoint, MetricKey};
use crate::monitor::{MetricSpectrum, MonitorError, SpectrumMonitor};
use super::spectrum_bindings::PyFrequencyBin;

fn monitor_err(e: MonitorError) -> PyErr {
    PyRuntimeError::new_err(e.to_string())
}

fn spectrum_to_dict(py: Python<'_>, spectrum: MetricSpectrum) -> PyResult<PyObject> {
    let dict = PyDict::new(py);

    dict.set_item("metric", spectrum.metric.as_str())?;
    dict.set_item("sample_count", spectrum.sample_count)?;
    dict.set_item("sample_interval_secs", spectrum.sample_interval_secs)?;
    dict.set_item(
        "bins",
        spectrum
            .bins
            .into_iter()
            .map(|b| PyFrequencyBin::from(b).into_py(py))
            .collect::<Vec<PyObject>>(),
    )?;
    dict.set_item(
        "dominant",
        spectrum.dominant.map(|b| PyFrequencyBin::from(b).into_py(py)),
    )?;

    Ok(dict.into())
}

/// Spectrum monitor exposed to Python
///
/// Readings are pushed from Python; spectra are computed on demand.
#[pyclass(name = "SpectrumMonitor", unsendable)]
pub struct PySpectrumMonitor {
    monitor: SpectrumMonitor,
}

#[pymethods]
impl PySpectrumMonitor {
    /// Create new monitor
    ///
    /// Args:
    ///     config_path: Optional TOML config file; standard search order if omitted
    #[new]
    #[pyo3(signature = (config_path=None))]
    fn new(config_path: Option<String>) -> PyResult<Self> {
        let config = match config_path {
            Some(path) => MonitorConfig::from_file(std::path::Path::new(&path))
                .map_err(|e| PyValueError::new_err(e.to_string()))?,
            None => MonitorConfig::load(),
        };

        Ok(Self {
            monitor: SpectrumMonitor::new(&config),
        })
    }

    /// Append a reading; missing sensors are None
    #[pyo3(signature = (timestamp_ms, co2=None, co=None, combustible=None, temp=None, humidity=None))]
    fn ingest(
        &self,
        timestamp_ms: i64,
        co2: Option<f64>,
        co: Option<f64>,
        combustible: Option<f64>,
        temp: Option<f64>,
        humidity: Option<f64>,
    ) -> PyResult<()> {
        let reading = AirQualityReading {
            co2,
            co,
            combustible,
            temp,
            humidity,
        };

        self.monitor
            .ingest(HistoricalDataPoint::new(timestamp_ms, reading))
            .map_err(monitor_err)
    }

    /// Select the metric by name ("co2", "co", "combustible", "temp", "humidity")
    fn select_metric(&self, metric: &str) -> PyResult<()> {
        let key: MetricKey = metric
            .parse()
            .map_err(|e: crate::history::UnknownMetric| PyValueError::new_err(e.to_string()))?;
        self.monitor.select_metric(key).map_err(monitor_err)
    }

    /// Name of the selected metric
    fn selected_metric(&self) -> PyResult<String> {
        self.monitor
            .selected_metric()
            .map(|key| key.as_str().to_string())
            .map_err(monitor_err)
    }

    /// Compute the spectrum of the selected metric
    ///
    /// Returns:
    ///     Dictionary with keys: 'metric', 'sample_count',
    ///     'sample_interval_secs', 'bins', 'dominant'
    ///     or None if the window has too few readings
    fn compute(&self, py: Python<'_>) -> PyResult<Option<PyObject>> {
        match self.monitor.compute() {
            Ok(spectrum) => spectrum_to_dict(py, spectrum).map(Some),
            Err(MonitorError::InsufficientData { .. }) => Ok(None),
            Err(e) => Err(monitor_err(e)),
        }
    }

    /// Number of readings in the history window
    fn history_len(&self) -> PyResult<usize> {
        self.monitor.history_len().map_err(monitor_err)
    }
}
