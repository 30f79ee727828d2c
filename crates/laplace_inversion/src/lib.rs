#[cfg(test)]
mod tests;

// Home of the numerical Laplace inversion. The image is sampled along a
// shifted Bromwich contour at the nodes of Den Iseger's Gaussian quadrature
// rule, and the spectrum becomes evenly spaced samples of the original with
// one inverse FFT.

mod coefficients;
mod error;
mod inversion;

pub use coefficients::{QuadratureDegree, QuadraturePair};
pub use error::InversionError;
pub use inversion::{InversionOptions, value_at, values, values_para};

use num_complex::Complex64;

/// A Laplace image: the transform-domain function to invert.
///
/// Its singularities must lie left of the critical abscissa used for the
/// inversion. Any `Fn(Complex64) -> Complex64` closure is an image.
pub trait LaplaceImage {
    /// Evaluate the image at the complex point `p`.
    fn eval(&self, p: Complex64) -> Complex64;
}

impl<F> LaplaceImage for F
where
    F: Fn(Complex64) -> Complex64,
{
    fn eval(&self, p: Complex64) -> Complex64 {
        self(p)
    }
}
