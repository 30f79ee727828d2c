// Spectral windowing. A bin `i` and its mirror `N - i` carry conjugate
// values for real signals, so every filter here clears both together.

use num_complex::Complex64;

use crate::FftError;

fn half_length(spectrum: &[Complex64]) -> Result<usize, FftError> {
    let n = spectrum.len();
    if n == 0 {
        return Err(FftError::EmptyInput);
    }
    if !n.is_power_of_two() {
        return Err(FftError::NotPowerOfTwo { len: n });
    }
    Ok(n / 2)
}

/// Zero bins `from..=to` and their mirrors.
///
/// The band is clamped to `[0, N/2]`; an empty band (`from > to`) leaves the
/// spectrum untouched.
pub fn zero_band(spectrum: &mut [Complex64], from: usize, to: usize) -> Result<(), FftError> {
    let half = half_length(spectrum)?;
    let n = spectrum.len();

    for i in from..=to.min(half) {
        spectrum[i] = Complex64::new(0.0, 0.0);
        // bins 0 and N/2 are their own mirrors
        if i != 0 && i != n - i {
            spectrum[n - i] = Complex64::new(0.0, 0.0);
        }
    }

    Ok(())
}

/// Keep bins `0..=upper_limit` (and mirrors), clearing everything above up to
/// but excluding the Nyquist bin.
///
/// `upper_limit = N/2 - 1` is a no-op; `upper_limit = 0` leaves only the DC
/// and Nyquist bins.
pub fn low_pass(spectrum: &mut [Complex64], upper_limit: usize) -> Result<(), FftError> {
    let half = half_length(spectrum)?;
    if upper_limit > half {
        return Err(FftError::WindowOutOfRange {
            limit: upper_limit,
            half,
        });
    }

    if upper_limit + 1 < half {
        zero_band(spectrum, upper_limit + 1, half - 1)?;
    }

    Ok(())
}

/// Keep bins `lower_limit..=N - lower_limit`, clearing the low frequencies
/// and their mirrors.
pub fn high_pass(spectrum: &mut [Complex64], lower_limit: usize) -> Result<(), FftError> {
    let half = half_length(spectrum)?;
    if lower_limit > half {
        return Err(FftError::WindowOutOfRange {
            limit: lower_limit,
            half,
        });
    }

    if lower_limit > 0 {
        zero_band(spectrum, 0, lower_limit - 1)?;
    }

    Ok(())
}
