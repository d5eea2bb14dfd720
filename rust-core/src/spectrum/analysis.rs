//! High-level spectrum analyzer
//!
//! Combines windowing with either the direct DFT or the FFT engine and adds
//! helpers for reading periodic structure out of the bins.

use super::bin::FrequencyBin;
use super::dft::compute_spectrum;
use super::fft::FftEngine;
use super::windowing::{apply_window, WindowType};
use super::SpectrumError;
use serde::{Deserialize, Serialize};

/// Transform used by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// O(N²) direct summation
    Direct,

    /// O(N log N) real FFT
    Fast,

    /// Direct below `fast_path_threshold` samples, FFT at or above it
    #[default]
    Auto,
}

/// Spectrum analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Transform selection
    pub algorithm: Algorithm,

    /// Window applied before the transform
    pub window_type: WindowType,

    /// Signal length at which `Auto` switches to the FFT
    pub fast_path_threshold: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Auto,
            window_type: WindowType::Rectangular,
            fast_path_threshold: 256,
        }
    }
}

/// Spectrum analyzer
///
/// Keeps the last planned FFT engine so repeated analysis of a full history
/// window does not re-plan.
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    fft_engine: Option<FftEngine>,
}

impl SpectrumAnalyzer {
    /// Create new spectrum analyzer
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            fft_engine: None,
        }
    }

    /// Analyze signal and return its one-sided spectrum
    ///
    /// # Arguments
    /// * `signal` - Uniformly sampled, finite values
    ///
    /// # Returns
    /// `N/2 + 1` bins (none for an empty signal)
    pub fn analyze(&mut self, signal: &[f64]) -> Result<Vec<FrequencyBin>, SpectrumError> {
        let windowed = apply_window(signal, self.config.window_type);

        if !self.uses_fft(windowed.len()) {
            return Ok(compute_spectrum(&windowed));
        }

        let engine = match self.fft_engine.take() {
            Some(engine) if engine.size() == windowed.len() => engine,
            _ => FftEngine::new(windowed.len())?,
        };
        let engine = self.fft_engine.insert(engine);

        engine.compute_spectrum(&windowed)
    }

    /// Whether a signal of `len` samples goes through the FFT
    pub fn uses_fft(&self, len: usize) -> bool {
        if len < 2 {
            return false;
        }

        match self.config.algorithm {
            Algorithm::Direct => false,
            Algorithm::Fast => true,
            Algorithm::Auto => len >= self.config.fast_path_threshold,
        }
    }

    /// Update configuration
    pub fn update_config(&mut self, config: AnalyzerConfig) {
        self.config = config;
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

/// Strongest periodic component
///
/// Returns the bin with the largest magnitude excluding DC (k = 0). Ties go
/// to the lowest frequency index.
pub fn dominant_bin(bins: &[FrequencyBin]) -> Option<&FrequencyBin> {
    bins.iter()
        .filter(|bin| bin.frequency_index > 0)
        .fold(None, |best: Option<&FrequencyBin>, bin| match best {
            Some(b) if b.magnitude >= bin.magnitude => Some(b),
            _ => Some(bin),
        })
}

/// Frequency in Hz represented by bin `k`
///
/// # Arguments
/// * `k` - Frequency index
/// * `len` - Signal length N
/// * `sample_interval_secs` - Spacing between readings
pub fn bin_frequency_hz(k: usize, len: usize, sample_interval_secs: f64) -> f64 {
    k as f64 / (len as f64 * sample_interval_secs)
}

/// Period in seconds represented by bin `k` (None for DC)
pub fn bin_period_secs(k: usize, len: usize, sample_interval_secs: f64) -> Option<f64> {
    if k == 0 {
        return None;
    }
    Some(len as f64 * sample_interval_secs / k as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn hvac_cycle(n: usize, cycles: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 800.0 + 150.0 * (2.0 * PI * cycles as f64 * i as f64 / n as f64).sin())
            .collect()
    }

    #[test]
    fn test_analyzer_matches_core_transform() {
        let signal = hvac_cycle(60, 4);
        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
            algorithm: Algorithm::Direct,
            ..AnalyzerConfig::default()
        });

        assert_eq!(analyzer.analyze(&signal).unwrap(), compute_spectrum(&signal));
    }

    #[test]
    fn test_algorithm_selection() {
        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
            fast_path_threshold: 32,
            ..AnalyzerConfig::default()
        });

        assert!(!analyzer.uses_fft(1));
        assert!(!analyzer.uses_fft(31));
        assert!(analyzer.uses_fft(32));

        analyzer.update_config(AnalyzerConfig {
            algorithm: Algorithm::Fast,
            ..AnalyzerConfig::default()
        });
        assert!(analyzer.uses_fft(2));
        assert!(!analyzer.uses_fft(0));
    }

    #[test]
    fn test_fast_path_peak() {
        let n = 512;
        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default());
        let bins = analyzer.analyze(&hvac_cycle(n, 12)).unwrap();

        assert_eq!(bins.len(), n / 2 + 1);
        let peak = dominant_bin(&bins).unwrap();
        assert_eq!(peak.frequency_index, 12);
        assert_relative_eq!(peak.magnitude, 150.0 * n as f64 / 2.0, max_relative = 1e-9);

        // Engine is reused for the same length and replaced for a new one
        assert_eq!(analyzer.analyze(&hvac_cycle(n, 12)).unwrap(), bins);
        assert_eq!(analyzer.analyze(&hvac_cycle(300, 5)).unwrap().len(), 151);
    }

    #[test]
    fn test_windowed_analysis_keeps_peak() {
        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
            window_type: WindowType::Hann,
            ..AnalyzerConfig::default()
        });
        // Zero-mean input; a Hann-windowed DC offset would leak into bin 1
        let signal: Vec<f64> = hvac_cycle(128, 8).iter().map(|v| v - 800.0).collect();
        let bins = analyzer.analyze(&signal).unwrap();

        assert_eq!(dominant_bin(&bins).unwrap().frequency_index, 8);
    }

    #[test]
    fn test_empty_and_single() {
        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default());

        assert!(analyzer.analyze(&[]).unwrap().is_empty());
        assert_eq!(analyzer.analyze(&[21.5]).unwrap().len(), 1);
    }

    #[test]
    fn test_dominant_bin_skips_dc() {
        let bins = vec![
            FrequencyBin::new(0, 1000.0, 0.0),
            FrequencyBin::new(1, 3.0, 0.0),
            FrequencyBin::new(2, 0.0, 7.0),
            FrequencyBin::new(3, -7.0, 0.0),
        ];

        // Bins 2 and 3 tie; the lower index wins
        assert_eq!(dominant_bin(&bins).unwrap().frequency_index, 2);
        assert!(dominant_bin(&bins[..1]).is_none());
        assert!(dominant_bin(&[]).is_none());
    }

    #[test]
    fn test_frequency_conversions() {
        // 120 readings, 3 s apart: bin 4 is one cycle every 90 s
        assert_relative_eq!(bin_frequency_hz(4, 120, 3.0), 4.0 / 360.0);
        assert_relative_eq!(bin_period_secs(4, 120, 3.0).unwrap(), 90.0);
        assert_eq!(bin_period_secs(0, 120, 3.0), None);
        assert_eq!(bin_frequency_hz(0, 120, 3.0), 0.0);
    }
}
