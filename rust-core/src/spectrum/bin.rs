//! Frequency bin produced by the spectral transforms

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// One coefficient X[k] of the one-sided spectrum
///
/// Field names serialize in camelCase so the chart front end can plot
/// `magnitude` against `frequencyIndex` without remapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyBin {
    /// Bin index k, 0 ≤ k ≤ N/2
    pub frequency_index: usize,

    /// Re(X[k])
    pub real_part: f64,

    /// Im(X[k])
    pub imaginary_part: f64,

    /// |X[k]|
    pub magnitude: f64,

    /// arg(X[k]) in radians, (−π, π]
    pub phase: f64,
}

impl FrequencyBin {
    /// Build a bin from the real and imaginary parts of X[k]
    pub fn new(frequency_index: usize, real_part: f64, imaginary_part: f64) -> Self {
        Self {
            frequency_index,
            real_part,
            imaginary_part,
            magnitude: (real_part * real_part + imaginary_part * imaginary_part).sqrt(),
            phase: imaginary_part.atan2(real_part),
        }
    }

    /// Build a bin from a complex coefficient
    pub fn from_complex(frequency_index: usize, coefficient: Complex64) -> Self {
        Self::new(frequency_index, coefficient.re, coefficient.im)
    }

    /// Complex coefficient X[k]
    pub fn coefficient(&self) -> Complex64 {
        Complex64::new(self.real_part, self.imaginary_part)
    }

    /// Squared magnitude |X[k]|²
    pub fn power(&self) -> f64 {
        self.real_part * self.real_part + self.imaginary_part * self.imaginary_part
    }
}
