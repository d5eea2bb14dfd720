//! Windowing functions for spectral analysis
//!
//! Optional taper applied to a history series before the transform to reduce
//! leakage from the discontinuity between the first and last readings.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// Rectangular window (no windowing)
    #[default]
    Rectangular,

    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(M-1)) + 0.08*cos(4πn/(M-1))
    Blackman,
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (M)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1. Windows of length 0 or
/// 1 are all ones.
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    if length <= 1 || window_type == WindowType::Rectangular {
        return vec![1.0; length];
    }

    let denom = (length - 1) as f64;

    (0..length)
        .map(|n| {
            let angle = 2.0 * PI * n as f64 / denom;
            match window_type {
                WindowType::Hann => 0.5 - 0.5 * angle.cos(),
                WindowType::Hamming => 0.54 - 0.46 * angle.cos(),
                WindowType::Blackman => 0.42 - 0.5 * angle.cos() + 0.08 * (2.0 * angle).cos(),
                WindowType::Rectangular => 1.0,
            }
        })
        .collect()
}

/// Apply window to signal
///
/// Rectangular windows borrow the input unchanged.
pub fn apply_window(signal: &[f64], window_type: WindowType) -> Cow<'_, [f64]> {
    if window_type == WindowType::Rectangular {
        return Cow::Borrowed(signal);
    }

    let window = generate_window(window_type, signal.len());

    Cow::Owned(
        signal
            .iter()
            .zip(window.iter())
            .map(|(&s, &w)| s * w)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_generation() {
        let length = 61;

        for window_type in [WindowType::Hann, WindowType::Hamming, WindowType::Blackman] {
            let window = generate_window(window_type, length);
            assert_eq!(window.len(), length);

            // Symmetric with unit peak at the center
            assert!((window[0] - window[length - 1]).abs() < 1e-10);
            assert!((window[length / 2] - 1.0).abs() < 1e-10);
        }

        let hamming = generate_window(WindowType::Hamming, length);
        assert!(hamming[0] > 0.07 && hamming[0] < 0.09);
    }

    #[test]
    fn test_degenerate_lengths() {
        assert!(generate_window(WindowType::Hann, 0).is_empty());
        assert_eq!(generate_window(WindowType::Blackman, 1), vec![1.0]);
    }

    #[test]
    fn test_rectangular_borrows() {
        let signal = [420.0, 415.0, 430.0];
        let windowed = apply_window(&signal, WindowType::Rectangular);

        assert!(matches!(windowed, Cow::Borrowed(_)));
        assert_eq!(&*windowed, &signal[..]);
    }

    #[test]
    fn test_apply_window() {
        let signal = vec![1.0; 101];
        let windowed = apply_window(&signal, WindowType::Hann);

        assert_eq!(windowed.len(), 101);
        assert!((windowed[50] - 1.0).abs() < 1e-10);
        assert!(windowed[0].abs() < 1e-10);
        assert!(windowed[100].abs() < 1e-10);
    }

    #[test]
    fn test_serde_names() {
        let parsed: WindowType = serde_json::from_str("\"hamming\"").unwrap();
        assert_eq!(parsed, WindowType::Hamming);
        assert_eq!(WindowType::default(), WindowType::Rectangular);
    }
}
