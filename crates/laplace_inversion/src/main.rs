// CLI for inverting a few Laplace transforms with known originals.

use clap::{Parser, ValueEnum};
use laplace_inversion::{InversionOptions, value_at, values, values_para};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Built-in transform pairs.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ImageKind {
    /// 1/(1+p) -> e^-t
    ExpDecay,
    /// 1/(p^2+1) -> sin t
    Sine,
    /// 1/p^2 -> t
    Ramp,
    /// 1/p -> 1
    Step,
    /// 1/sqrt(p) -> 1/sqrt(pi t)
    InverseSqrt,
    /// 1/(p-1) -> e^t, needs an abscissa above 1
    ExpGrowth,
}

impl ImageKind {
    fn image(self, p: Complex64) -> Complex64 {
        let one = Complex64::new(1.0, 0.0);
        match self {
            ImageKind::ExpDecay => (one + p).inv(),
            ImageKind::Sine => (p * p + 1.0).inv(),
            ImageKind::Ramp => (p * p).inv(),
            ImageKind::Step => p.inv(),
            ImageKind::InverseSqrt => p.sqrt().inv(),
            ImageKind::ExpGrowth => (p - 1.0).inv(),
        }
    }

    fn original(self, t: f64) -> f64 {
        match self {
            ImageKind::ExpDecay => (-t).exp(),
            ImageKind::Sine => t.sin(),
            ImageKind::Ramp => t,
            ImageKind::Step => 1.0,
            ImageKind::InverseSqrt => 1.0 / (PI * t).sqrt(),
            ImageKind::ExpGrowth => t.exp(),
        }
    }
}

#[derive(Parser)]
#[command(about, long_about = None)]
struct CliArgs {
    #[arg(long, value_enum, default_value = "exp-decay")]
    image: ImageKind,

    /// Time step between output values.
    #[arg(long, default_value_t = 0.1)]
    dt: f64,

    /// Requested number of values; rounded up to a power of two.
    #[arg(long, default_value_t = 20)]
    count: usize,

    /// Quadrature degree: 16, 32 or 48.
    #[arg(long, default_value_t = 16)]
    degree: usize,

    /// Critical abscissa of the contour.
    #[arg(long, default_value_t = 0.0)]
    abscissa: f64,

    /// Worker threads; 0 uses every core. Without this flag the inversion
    /// runs on the calling thread.
    #[arg(long)]
    threads: Option<usize>,

    /// Evaluate a single time point instead of a grid.
    #[arg(long)]
    at: Option<f64>,
}

fn main() -> Result<(), String> {
    env_logger::init();

    let args = CliArgs::parse();
    let kind = args.image;
    let image = move |p: Complex64| kind.image(p);

    let options = InversionOptions::default()
        .with_critical_abscissa(args.abscissa)
        .with_degree_number(args.degree)
        .map_err(|e| e.to_string())?;

    if let Some(t) = args.at {
        let value = value_at(&image, t, &options).map_err(|e| e.to_string())?;
        print_header();
        print_row(t, value, kind.original(t));
        return Ok(());
    }

    let result = match args.threads {
        Some(threads) => {
            let num_threads = if threads == 0 { num_cpus::get() } else { threads };
            let thread_pool = rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .map_err(|e| e.to_string())?;
            log::info!("using {} worker threads", thread_pool.current_num_threads());

            values_para(&image, args.dt, args.count, &options, &thread_pool)
        }
        None => values(&image, args.dt, args.count, &options),
    }
    .map_err(|e| e.to_string())?;

    if result.len() > args.count {
        log::info!(
            "{} values requested, {} returned after rounding to a power of two",
            args.count,
            result.len()
        );
    }

    print_header();
    for (k, value) in result.iter().enumerate() {
        let t = k as f64 * args.dt;
        print_row(t, *value, kind.original(t));
    }

    Ok(())
}

fn print_header() {
    println!("{:>10} {:>22} {:>22} {:>12}", "t", "value", "exact", "abs error");
}

fn print_row(t: f64, value: f64, exact: f64) {
    println!(
        "{:>10.4} {:>22.15e} {:>22.15e} {:>12.3e}",
        t,
        value,
        exact,
        (value - exact).abs()
    );
}
