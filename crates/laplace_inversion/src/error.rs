use fft_engine::FftError;
use thiserror::Error;

/// Errors reported by the inversion routines, always before the image is
/// evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InversionError {
    /// An argument is outside its valid range.
    #[error("invalid argument `{arg}`: {reason}")]
    InvalidArgument {
        /// Name of the argument.
        arg: &'static str,
        /// Human readable reason.
        reason: String,
    },

    /// No coefficient table exists for the requested degree.
    #[error("unsupported quadrature degree {0}, expected one of 16, 32, 48")]
    UnsupportedDegree(usize),

    /// The inverse transform rejected the spectrum.
    #[error("transform failed: {0}")]
    Transform(#[from] FftError),
}
