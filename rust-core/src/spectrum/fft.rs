//! FFT engine using realfft for real-valued signals
//!
//! O(N log N) counterpart of the direct DFT with the same bin layout, sign
//! convention and (lack of) normalization.

use super::bin::FrequencyBin;
use super::dft::{compute_spectrum, full_spectrum};
use super::SpectrumError;
use num_complex::Complex64;
use realfft::{RealFftPlanner, RealToComplex};
use rustfft::FftPlanner;
use std::sync::Arc;

/// FFT engine planned for one signal length
pub struct FftEngine {
    /// Planned signal length
    size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer (scrambled by each transform)
    input_buffer: Vec<f64>,

    /// Reusable output buffer (one-sided spectrum)
    output_buffer: Vec<Complex64>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `size` - Signal length N the engine will accept
    ///
    /// # Errors
    /// `SpectrumError::EmptyPlan` for a zero size
    pub fn new(size: usize) -> Result<Self, SpectrumError> {
        if size == 0 {
            return Err(SpectrumError::EmptyPlan);
        }

        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();

        Ok(Self {
            size,
            r2c,
            input_buffer,
            output_buffer,
        })
    }

    /// Compute the one-sided spectrum
    ///
    /// # Arguments
    /// * `signal` - Input signal, exactly `size` samples long
    ///
    /// # Returns
    /// `size/2 + 1` bins, identical in layout to the direct DFT
    pub fn compute_spectrum(&mut self, signal: &[f64]) -> Result<Vec<FrequencyBin>, SpectrumError> {
        if signal.len() != self.size {
            return Err(SpectrumError::LengthMismatch {
                expected: self.size,
                actual: signal.len(),
            });
        }

        self.input_buffer.copy_from_slice(signal);

        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)
            .map_err(|e| SpectrumError::Fft(e.to_string()))?;

        Ok(self
            .output_buffer
            .iter()
            .enumerate()
            .map(|(k, &c)| FrequencyBin::from_complex(k, c))
            .collect())
    }

    /// Get planned signal length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get number of frequency bins (size/2 + 1 for real FFT)
    pub fn num_bins(&self) -> usize {
        self.size / 2 + 1
    }
}

/// One-shot FFT spectrum for a signal of any length
///
/// Signals shorter than two samples go through the direct DFT, which
/// already handles them exactly.
pub fn compute_spectrum_fast(signal: &[f64]) -> Result<Vec<FrequencyBin>, SpectrumError> {
    if signal.len() < 2 {
        return Ok(compute_spectrum(signal));
    }

    FftEngine::new(signal.len())?.compute_spectrum(signal)
}

/// Invert a one-sided spectrum with a complex inverse FFT
///
/// Mirrors the bins into the full N-point spectrum and scales by 1/N.
pub fn reconstruct_signal_fast(bins: &[FrequencyBin], len: usize) -> Result<Vec<f64>, SpectrumError> {
    let mut buffer = full_spectrum(bins, len)?;
    if len == 0 {
        return Ok(Vec::new());
    }

    let mut planner = FftPlanner::new();
    let ifft = planner.plan_fft_inverse(len);
    ifft.process(&mut buffer);

    let scale = 1.0 / len as f64;
    Ok(buffer.iter().map(|c| c.re * scale).collect())
}
