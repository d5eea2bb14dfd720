//! Direct-summation Discrete Fourier Transform
//!
//! O(N²) reference transform for short, uniformly sampled series. Uses the
//! forward convention X[k] = Σ x[n]·e^(−i·2πkn/N) with no normalization, and
//! returns only the non-redundant half of the spectrum.

use super::bin::FrequencyBin;
use super::SpectrumError;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Compute the one-sided DFT of a real signal
///
/// # Arguments
/// * `signal` - Uniformly sampled values x[0..N]; must be finite
///
/// # Returns
/// `N/2 + 1` bins ordered by frequency index, or an empty vector for an
/// empty signal. Non-finite samples propagate into every bin.
pub fn compute_spectrum(signal: &[f64]) -> Vec<FrequencyBin> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let len = n as f64;

    (0..=n / 2)
        .map(|k| {
            let mut sum_real = 0.0;
            let mut sum_imag = 0.0;

            for (i, &x) in signal.iter().enumerate() {
                let angle = 2.0 * PI * k as f64 * i as f64 / len;
                sum_real += x * angle.cos();
                // e^(−iθ) = cos θ − i·sin θ
                sum_imag -= x * angle.sin();
            }

            FrequencyBin::new(k, sum_real, sum_imag)
        })
        .collect()
}

/// Expand a one-sided spectrum into all `len` complex coefficients
///
/// Bins above N/2 are filled from X[N−k] = conj(X[k]).
pub fn full_spectrum(bins: &[FrequencyBin], len: usize) -> Result<Vec<Complex64>, SpectrumError> {
    let expected = expected_bins(len);
    if bins.len() != expected {
        return Err(SpectrumError::BinCountMismatch {
            expected,
            actual: bins.len(),
        });
    }

    Ok((0..len)
        .map(|k| {
            if k < bins.len() {
                bins[k].coefficient()
            } else {
                bins[len - k].coefficient().conj()
            }
        })
        .collect())
}

/// Invert a one-sided spectrum back into the time domain
///
/// # Arguments
/// * `bins` - Output of [`compute_spectrum`] for a signal of length `len`
/// * `len` - Original signal length N
///
/// # Returns
/// x[n] = (1/N)·Σ X[k]·e^(i·2πkn/N), real part only
pub fn reconstruct_signal(bins: &[FrequencyBin], len: usize) -> Result<Vec<f64>, SpectrumError> {
    let spectrum = full_spectrum(bins, len)?;
    let n = len as f64;

    Ok((0..len)
        .map(|i| {
            let sum: f64 = spectrum
                .iter()
                .enumerate()
                .map(|(k, x)| {
                    let angle = 2.0 * PI * k as f64 * i as f64 / n;
                    x.re * angle.cos() - x.im * angle.sin()
                })
                .sum();
            sum / n
        })
        .collect())
}

/// Number of bins a signal of length `len` produces
pub fn expected_bins(len: usize) -> usize {
    if len == 0 {
        0
    } else {
        len / 2 + 1
    }
}
