//! Python bindings for spectrum analysis

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::spectrum::{
    self, dominant_bin, Algorithm, AnalyzerConfig, FrequencyBin, SpectrumAnalyzer, WindowType,
};

/// Window type enum exposed to Python
#[pyclass(name = "WindowType")]
#[derive(Clone)]
pub enum PyWindowType {
    Rectangular,
    Hann,
    Hamming,
    Blackman,
}

impl From<PyWindowType> for WindowType {
    fn from(py_win: PyWindowType) -> Self {
        match py_win {
            PyWindowType::Rectangular => WindowType::Rectangular,
            PyWindowType::Hann => WindowType::Hann,
            PyWindowType::Hamming => WindowType::Hamming,
            PyWindowType::Blackman => WindowType::Blackman,
        }
    }
}

/// Transform selection exposed to Python
#[pyclass(name = "Algorithm")]
#[derive(Clone)]
pub enum PyAlgorithm {
    Direct,
    Fast,
    Auto,
}

impl From<PyAlgorithm> for Algorithm {
    fn from(py_alg: PyAlgorithm) -> Self {
        match py_alg {
            PyAlgorithm::Direct => Algorithm::Direct,
            PyAlgorithm::Fast => Algorithm::Fast,
            PyAlgorithm::Auto => Algorithm::Auto,
        }
    }
}

/// Frequency bin exposed to Python
#[pyclass(name = "FrequencyBin")]
#[derive(Clone)]
pub struct PyFrequencyBin {
    #[pyo3(get)]
    pub frequency_index: usize,
    #[pyo3(get)]
    pub real_part: f64,
    #[pyo3(get)]
    pub imaginary_part: f64,
    #[pyo3(get)]
    pub magnitude: f64,
    #[pyo3(get)]
    pub phase: f64,
}

#[pymethods]
impl PyFrequencyBin {
    fn __repr__(&self) -> String {
        format!(
            "FrequencyBin(k={}, magnitude={:.4}, phase={:.4})",
            self.frequency_index, self.magnitude, self.phase
        )
    }
}

impl From<FrequencyBin> for PyFrequencyBin {
    fn from(bin: FrequencyBin) -> Self {
        Self {
            frequency_index: bin.frequency_index,
            real_part: bin.real_part,
            imaginary_part: bin.imaginary_part,
            magnitude: bin.magnitude,
            phase: bin.phase,
        }
    }
}

pub(super) fn readonly_slice<'a>(signal: &'a PyReadonlyArray1<f64>) -> PyResult<&'a [f64]> {
    signal
        .as_slice()
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Compute the one-sided DFT of a signal
///
/// Args:
///     signal: Uniformly sampled values as numpy array
///
/// Returns:
///     List of FrequencyBin, k = 0..N/2
#[pyfunction]
pub fn compute_spectrum(signal: PyReadonlyArray1<f64>) -> PyResult<Vec<PyFrequencyBin>> {
    let sig = readonly_slice(&signal)?;
    Ok(spectrum::compute_spectrum(sig)
        .into_iter()
        .map(PyFrequencyBin::from)
        .collect())
}

/// Spectrum analyzer exposed to Python
#[pyclass(name = "SpectrumAnalyzer")]
pub struct PySpectrumAnalyzer {
    analyzer: SpectrumAnalyzer,
}

#[pymethods]
impl PySpectrumAnalyzer {
    /// Create a new spectrum analyzer
    ///
    /// Args:
    ///     algorithm: Transform selection
    ///     window_type: Window applied before the transform
    ///     fast_path_threshold: Length at which Auto switches to the FFT
    #[new]
    #[pyo3(signature = (algorithm=PyAlgorithm::Auto, window_type=PyWindowType::Rectangular, fast_path_threshold=256))]
    fn new(algorithm: PyAlgorithm, window_type: PyWindowType, fast_path_threshold: usize) -> Self {
        let config = AnalyzerConfig {
            algorithm: algorithm.into(),
            window_type: window_type.into(),
            fast_path_threshold,
        };

        Self {
            analyzer: SpectrumAnalyzer::new(config),
        }
    }

    /// Analyze signal and return its bins
    fn analyze(&mut self, signal: PyReadonlyArray1<f64>) -> PyResult<Vec<PyFrequencyBin>> {
        let sig = readonly_slice(&signal)?;
        let bins = self
            .analyzer
            .analyze(sig)
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;

        Ok(bins.into_iter().map(PyFrequencyBin::from).collect())
    }

    /// Analyze signal and return magnitudes as numpy array
    fn magnitudes<'py>(
        &mut self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyArray1<f64>> {
        let sig = readonly_slice(&signal)?;
        let bins = self
            .analyzer
            .analyze(sig)
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;

        Ok(PyArray1::from_vec(py, bins.iter().map(|b| b.magnitude).collect()))
    }

    /// Strongest non-DC bin of a signal, or None
    fn dominant(&mut self, signal: PyReadonlyArray1<f64>) -> PyResult<Option<PyFrequencyBin>> {
        let sig = readonly_slice(&signal)?;
        let bins = self
            .analyzer
            .analyze(sig)
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;

        Ok(dominant_bin(&bins).copied().map(PyFrequencyBin::from))
    }
}
