use thiserror::Error;

/// Invalid-size inputs rejected by the transform and windowing routines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FftError {
    /// The input sequence has no samples.
    #[error("input sequence is empty")]
    EmptyInput,

    /// The transform requires a power-of-two length.
    #[error("sequence length {len} is not a power of two")]
    NotPowerOfTwo {
        /// Received length.
        len: usize,
    },

    /// Padding to the next power of two would overflow `usize`.
    #[error("sequence length {len} cannot be padded to a power of two")]
    TooLong {
        /// Received length.
        len: usize,
    },

    /// A window limit lies beyond the Nyquist bin.
    #[error("window limit {limit} exceeds half the spectrum length ({half})")]
    WindowOutOfRange {
        /// Requested limit.
        limit: usize,
        /// Largest allowed limit, `N/2`.
        half: usize,
    },
}
