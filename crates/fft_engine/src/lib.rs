
// Home of the radix-2 FFT used by the Laplace inversion.

mod error;
mod window;

pub use error::FftError;
pub use window::{high_pass, low_pass, zero_band};

use num_complex::Complex64;
use std::f64::consts::PI;

/// Direction of a transform.
///
/// The scaling convention is asymmetric: the forward transform is scaled by
/// `2/N` and the inverse by `0.5`, so `inverse(forward(x))` reproduces `x`.
/// Callers that compare against a textbook DFT must account for this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Inverse,
}

impl Direction {
    /// Sign of the twiddle exponent.
    fn rotation_sign(self) -> f64 {
        match self {
            Direction::Forward => -1.0,
            Direction::Inverse => 1.0,
        }
    }

    fn scale(self, n: usize) -> f64 {
        match self {
            Direction::Forward => 2.0 / n as f64,
            Direction::Inverse => 0.5,
        }
    }
}

/// How a real sequence is extended to the next power of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Padding {
    /// Append zeros.
    #[default]
    Zeros,
    /// Repeat the final sample.
    LastValue,
}

/// Smallest power of two that is at least `n` (1 for `n == 0`), or `None`
/// if it does not fit in a `usize`.
pub fn next_power_of_two(n: usize) -> Option<usize> {
    n.max(1).checked_next_power_of_two()
}

/// Forward transform of a real sequence.
///
/// __Arguments:__
///
/// + `samples` - real input values; the sequence is padded to the next
///   power of two according to `padding`.
///
/// + `padding` - how to fill the padded tail.
///
/// The result has the padded length and is scaled by `2/N`.
///
pub fn forward(samples: &[f64], padding: Padding) -> Result<Vec<Complex64>, FftError> {
    let padded = pad(samples, padding)?;

    let mut spectrum: Vec<Complex64> = padded.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    transform_in_place(&mut spectrum, Direction::Forward)?;

    Ok(spectrum)
}

/// Forward transform of byte samples, each byte taken as a real value.
pub fn forward_bytes(samples: &[u8], padding: Padding) -> Result<Vec<Complex64>, FftError> {
    let reals: Vec<f64> = samples.iter().map(|&b| f64::from(b)).collect();
    forward(&reals, padding)
}

/// Inverse transform of a power-of-two length spectrum, returning the real
/// parts of the result scaled by `0.5`.
pub fn inverse(spectrum: &[Complex64]) -> Result<Vec<f64>, FftError> {
    let mut data = spectrum.to_vec();
    transform_in_place(&mut data, Direction::Inverse)?;

    Ok(data.into_iter().map(|c| c.re).collect())
}

fn pad(samples: &[f64], padding: Padding) -> Result<Vec<f64>, FftError> {
    let last = *samples.last().ok_or(FftError::EmptyInput)?;
    let n = next_power_of_two(samples.len()).ok_or(FftError::TooLong {
        len: samples.len(),
    })?;

    let fill = match padding {
        Padding::Zeros => 0.0,
        Padding::LastValue => last,
    };

    let mut padded = Vec::with_capacity(n);
    padded.extend_from_slice(samples);
    padded.resize(n, fill);

    Ok(padded)
}

/// In-place Cooley-Tukey transform of a power-of-two length sequence.
///
/// __Arguments:__
///
/// + `data` - the sequence of N complex values; N must be a power of two.
///
/// + `direction` - selects the twiddle sign and the final scale factor
///   (`2/N` forward, `0.5` inverse).
///
pub fn transform_in_place(data: &mut [Complex64], direction: Direction) -> Result<(), FftError> {
    let n = data.len();
    if n == 0 {
        return Err(FftError::EmptyInput);
    }
    if !n.is_power_of_two() {
        return Err(FftError::NotPowerOfTwo { len: n });
    }

    log::trace!("{direction:?} transform of length {n}");

    bit_reverse_permute(data);

    // span 2: plain sum and difference of adjacent pairs
    for pair in data.chunks_exact_mut(2) {
        let (even, odd) = (pair[0], pair[1]);
        pair[0] = even + odd;
        pair[1] = even - odd;
    }

    // Danielson-Lanczos iteration for span 4, 8, ..., N. Twiddles for a span
    // are generated by repeated multiplication with its primitive root.
    let sign = direction.rotation_sign();
    let mut twiddles: Vec<Complex64> = Vec::with_capacity(n / 2);
    let mut span = 4;

    while span <= n {
        let half = span / 2;
        let root = Complex64::from_polar(1.0, sign * 2.0 * PI / span as f64);

        twiddles.clear();
        let mut w = Complex64::new(1.0, 0.0);
        for _ in 0..half {
            twiddles.push(w);
            w *= root;
        }

        for section in data.chunks_exact_mut(span) {
            let (evens, odds) = section.split_at_mut(half);
            for ((even, odd), w) in evens.iter_mut().zip(odds.iter_mut()).zip(&twiddles) {
                let e = *even;
                let o = *w * *odd;
                *even = e + o;
                *odd = e - o;
            }
        }

        span <<= 1;
    }

    let scale = direction.scale(n);
    for c in data.iter_mut() {
        *c *= scale;
    }

    Ok(())
}

/// Swap every entry with the entry whose index is its bit reversal.
///
/// The reversed index `j` is carried along incrementally: adding one to a
/// reversed counter means clearing leading ones from the top bit down and
/// setting the first zero.
fn bit_reverse_permute(data: &mut [Complex64]) {
    let n = data.len();
    let mut j = 0;

    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;

        if i < j {
            data.swap(i, j);
        }
    }
}
