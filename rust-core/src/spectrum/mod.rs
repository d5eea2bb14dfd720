//! Spectral analysis of metric history

pub mod bin;
pub mod dft;
pub mod fft;
pub mod windowing;
pub mod analysis;

use thiserror::Error;

pub use bin::FrequencyBin;
pub use dft::{compute_spectrum, reconstruct_signal};
pub use fft::{compute_spectrum_fast, reconstruct_signal_fast, FftEngine};
pub use windowing::{apply_window, WindowType};
pub use analysis::{dominant_bin, Algorithm, AnalyzerConfig, SpectrumAnalyzer};

#[derive(Error, Debug)]
pub enum SpectrumError {
    #[error("Signal has {actual} samples, engine planned for {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Expected {expected} frequency bins, got {actual}")]
    BinCountMismatch { expected: usize, actual: usize },

    #[error("FFT engine needs a planned size of at least 1")]
    EmptyPlan,

    #[error("FFT failed: {0}")]
    Fft(String),
}
