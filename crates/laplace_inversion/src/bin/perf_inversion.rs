//! Timing of sequential vs. parallel spectrum evaluation, for use with perf.
//!
//! Run with `RUST_LOG=info` to see the timings.

use std::time::Instant;

use laplace_inversion::{InversionOptions, QuadratureDegree, values, values_para};
use num_complex::Complex64;

const COUNTS: [usize; 4] = [256, 1024, 4096, 16384];

// a deliberately expensive image, so evaluation dominates the FFT
fn image(p: Complex64) -> Complex64 {
    let mut acc = Complex64::new(0.0, 0.0);
    for n in 1..=32 {
        acc += (p + n as f64).inv() / (n * n) as f64;
    }
    acc
}

fn main() -> Result<(), String> {
    env_logger::init();

    let thread_pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_cpus::get())
        .build()
        .map_err(|e| e.to_string())?;

    let options = InversionOptions::default().with_degree(QuadratureDegree::FortyEight);

    for count in COUNTS {
        let start = Instant::now();
        let sequential = values(&image, 0.01, count, &options).map_err(|e| e.to_string())?;
        let elapsed_seq = start.elapsed();

        let start = Instant::now();
        let parallel =
            values_para(&image, 0.01, count, &options, &thread_pool).map_err(|e| e.to_string())?;
        let elapsed_para = start.elapsed();

        log::info!("Count {count}: f(0) = {}", sequential[0]);
        log::info!("Time sequential: {:?}", elapsed_seq);
        log::info!(
            "Time parallel ({} threads): {:?}",
            thread_pool.current_num_threads(),
            elapsed_para
        );

        if sequential != parallel {
            log::warn!("sequential and parallel results differ for count {count}");
        }
    }

    Ok(())
}
