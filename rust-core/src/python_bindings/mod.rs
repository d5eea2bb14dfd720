//! PyO3 bindings for Python integration

use pyo3::prelude::*;

mod spectrum_bindings;
mod monitor_bindings;

/// Python module definition
#[pymodule]
fn airwatch_spectral(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(spectrum_bindings::compute_spectrum, m)?)?;

    m.add_class::<spectrum_bindings::PyFrequencyBin>()?;
    m.add_class::<spectrum_bindings::PySpectrumAnalyzer>()?;
    m.add_class::<monitor_bindings::PySpectrumMonitor>()?;

    // Add enums
    m.add_class::<spectrum_bindings::PyWindowType>()?;
    m.add_class::<spectrum_bindings::PyAlgorithm>()?;

    Ok(())
}
