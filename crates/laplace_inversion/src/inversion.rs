// Den Iseger inversion: sample the image along the shifted contour, fold the
// periodic endpoints, invert with one FFT and undo the contour damping.

use std::f64::consts::PI;

use fft_engine::next_power_of_two;
use num_complex::Complex64;
use rayon::{ThreadPool, prelude::*};

use crate::{InversionError, LaplaceImage, QuadratureDegree, QuadraturePair};

/// Oversampling of the frequency grid relative to the output length.
const OVERSAMPLING: usize = 8;

/// `b * M2`: real-axis offset of the contour in units of the grid spacing.
const CONTOUR_OFFSET: f64 = 44.0;

/// Output length of the grid used for single-point evaluation.
const SINGLE_POINT_OUTPUTS: usize = 2;

/// Optional parameters of an inversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InversionOptions {
    /// Real offset of the contour; must exceed the real part of every
    /// singularity of the image.
    pub critical_abscissa: f64,
    /// Number of quadrature nodes per contour point.
    pub degree: QuadratureDegree,
}

impl Default for InversionOptions {
    fn default() -> Self {
        Self {
            critical_abscissa: 0.0,
            degree: QuadratureDegree::Sixteen,
        }
    }
}

impl InversionOptions {
    /// Set the real offset of the contour.
    pub fn with_critical_abscissa(mut self, critical_abscissa: f64) -> Self {
        self.critical_abscissa = critical_abscissa;
        self
    }

    /// Set the quadrature degree.
    pub fn with_degree(mut self, degree: QuadratureDegree) -> Self {
        self.degree = degree;
        self
    }

    /// Select the degree from a raw node count (16, 32 or 48).
    pub fn with_degree_number(self, nodes: usize) -> Result<Self, InversionError> {
        Ok(self.with_degree(QuadratureDegree::try_from(nodes)?))
    }
}

/// The oversampled frequency grid behind one inversion.
struct Grid {
    dt: f64,
    critical_abscissa: f64,
    pairs: &'static [QuadraturePair],
    /// `M2`, eight times the output length.
    oversampled: usize,
    /// `b`, the contour offset per unit time step.
    offset: f64,
}

impl Grid {
    fn new(outputs: usize, dt: f64, options: &InversionOptions) -> Self {
        let oversampled = OVERSAMPLING * outputs;

        if options.critical_abscissa < 0.0 {
            log::warn!(
                "negative critical abscissa {} shifts the contour but is not undone in the output",
                options.critical_abscissa
            );
        }

        Self {
            dt,
            critical_abscissa: options.critical_abscissa,
            pairs: options.degree.pairs(),
            oversampled,
            offset: CONTOUR_OFFSET / oversampled as f64,
        }
    }

    /// Number of spectrum slots, including the folded endpoint.
    fn slots(&self) -> usize {
        self.oversampled + 1
    }

    /// Quadrature sum for frequency index `k`, scaled by `2/dt`.
    fn spectrum_slot<I: LaplaceImage + ?Sized>(&self, image: &I, k: usize) -> f64 {
        let frequency = 2.0 * PI * k as f64 / self.oversampled as f64;

        let sum: f64 = self
            .pairs
            .iter()
            .map(|pair| {
                let p = Complex64::new(self.offset, pair.lambda + frequency) / self.dt
                    + self.critical_abscissa;
                pair.alpha * image.eval(p).re
            })
            .sum();

        2.0 * sum / self.dt
    }

    /// Average the periodic endpoints into slot 0 and drop slot `M2`.
    fn fold_endpoints(&self, mut slots: Vec<f64>) -> Vec<f64> {
        let m2 = self.oversampled;
        slots[0] = 0.5 * (slots[0] + slots[m2]);
        slots.truncate(m2);
        slots
    }

    /// Factor undoing the contour damping at output index `j`.
    fn rescale(&self, j: usize) -> f64 {
        let mut exp_arg = self.offset * j as f64;
        if self.critical_abscissa > 0.0 {
            exp_arg += self.critical_abscissa * j as f64 * self.dt;
        }

        exp_arg.exp() / (self.oversampled / 4) as f64
    }

    fn reconstruct(&self, slots: Vec<f64>, outputs: usize) -> Result<Vec<f64>, InversionError> {
        let spectrum: Vec<Complex64> = self
            .fold_endpoints(slots)
            .into_iter()
            .map(|s| Complex64::new(s, 0.0))
            .collect();

        let samples = fft_engine::inverse(&spectrum)?;

        Ok(samples
            .iter()
            .take(outputs)
            .enumerate()
            .map(|(j, &x)| x * self.rescale(j))
            .collect())
    }
}

fn check_step(dt: f64) -> Result<(), InversionError> {
    if dt > 0.0 && dt.is_finite() {
        Ok(())
    } else {
        Err(InversionError::InvalidArgument {
            arg: "dt",
            reason: format!("time step must be positive and finite, got {dt}"),
        })
    }
}

/// Output length `M` for a requested count; `8M` must also fit in a `usize`.
fn check_count(count: usize) -> Result<usize, InversionError> {
    if count < 2 {
        return Err(InversionError::InvalidArgument {
            arg: "count",
            reason: format!("at least 2 output values are required, got {count}"),
        });
    }

    next_power_of_two(count)
        .filter(|outputs| outputs.checked_mul(OVERSAMPLING).is_some())
        .ok_or_else(|| InversionError::InvalidArgument {
            arg: "count",
            reason: format!("{count} output values do not fit the oversampled grid"),
        })
}

/// Validate the request and lay out its grid; no image evaluation happens
/// here.
fn plan(dt: f64, count: usize, options: &InversionOptions) -> Result<(Grid, usize), InversionError> {
    check_step(dt)?;
    let outputs = check_count(count)?;
    let grid = Grid::new(outputs, dt, options);

    log::debug!(
        "inverting {} values (requested {}) with degree {}: {} image evaluations",
        outputs,
        count,
        options.degree,
        grid.pairs.len() * grid.slots()
    );

    Ok((grid, outputs))
}

/// Approximate the original at `t = k * dt` for `k` in `0..M`.
///
/// __Arguments:__
///
/// + `image` - the Laplace image, evaluated `(degree/2) * (8M + 1)` times.
///
/// + `dt` - time step, positive.
///
/// + `count` - requested number of values, at least 2.
///
/// + `options` - critical abscissa and quadrature degree.
///
/// `M` is `count` rounded up to a power of two, and all `M` values are
/// returned, so the result can be longer than requested.
///
pub fn values<I: LaplaceImage + ?Sized>(
    image: &I,
    dt: f64,
    count: usize,
    options: &InversionOptions,
) -> Result<Vec<f64>, InversionError> {
    let (grid, outputs) = plan(dt, count, options)?;

    let slots: Vec<f64> = (0..grid.slots())
        .map(|k| grid.spectrum_slot(image, k))
        .collect();

    grid.reconstruct(slots, outputs)
}

/// Same as [`values`], but the spectrum slots are evaluated in parallel
/// inside `thread_pool`. Each slot sums its nodes in table order, so the
/// result is identical to the sequential one.
pub fn values_para<I: LaplaceImage + Sync + ?Sized>(
    image: &I,
    dt: f64,
    count: usize,
    options: &InversionOptions,
    thread_pool: &ThreadPool,
) -> Result<Vec<f64>, InversionError> {
    let (grid, outputs) = plan(dt, count, options)?;

    let mut slots = vec![0f64; grid.slots()];

    // each job writes a disjoint slot
    thread_pool.install(|| {
        slots
            .par_iter_mut()
            .enumerate()
            .for_each(|(k, slot)| *slot = grid.spectrum_slot(image, k))
    });

    grid.reconstruct(slots, outputs)
}

/// Approximate the original at a single time `t >= 0`.
///
/// Uses the smallest grid (`M = 2`) with `dt = t` and reads output index 1,
/// summing that one inverse-DFT term directly instead of running the FFT.
/// `t = 0` is read from index 0 with a unit step.
pub fn value_at<I: LaplaceImage + ?Sized>(
    image: &I,
    t: f64,
    options: &InversionOptions,
) -> Result<f64, InversionError> {
    if !(t >= 0.0 && t.is_finite()) {
        return Err(InversionError::InvalidArgument {
            arg: "t",
            reason: format!("time must be nonnegative and finite, got {t}"),
        });
    }

    let (dt, index) = if t > 0.0 { (t, 1) } else { (1.0, 0) };
    let grid = Grid::new(SINGLE_POINT_OUTPUTS, dt, options);

    let slots: Vec<f64> = (0..grid.slots())
        .map(|k| grid.spectrum_slot(image, k))
        .collect();
    let spectrum = grid.fold_endpoints(slots);

    // real part of the inverse transform at `index`, with its 0.5 scale
    let m2 = grid.oversampled as f64;
    let term: f64 = spectrum
        .iter()
        .enumerate()
        .map(|(k, s)| s * (2.0 * PI * (k * index) as f64 / m2).cos())
        .sum();

    Ok(0.5 * term * grid.rescale(index))
}
