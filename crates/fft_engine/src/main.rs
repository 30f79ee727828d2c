// This file is a place to try out the FFT engine on small sequences.

use clap::{Parser, ValueEnum};
use fft_engine::{Padding, forward, inverse};
use ndarray::Array1;
use std::f64::consts::PI;

/// Which test sequence to use.
const TEST: usize = 3;

#[derive(Clone, Copy, ValueEnum)]
enum PaddingArg {
  Zeros,
  LastValue,
}

impl From<PaddingArg> for Padding {
  fn from(arg: PaddingArg) -> Self {
    match arg {
      PaddingArg::Zeros => Padding::Zeros,
      PaddingArg::LastValue => Padding::LastValue,
    }
  }
}

#[derive(Parser)]
#[command(about, long_about = None)]
struct Args {
  #[arg(long)]
  test_number: Option<usize>,

  #[arg(long, value_enum, default_value = "zeros")]
  padding: PaddingArg,
}

/// Takes the forward transform of a test sequence, followed by the inverse.
/// Outputs the original sequence, the transform, and the round trip.
fn main() -> Result<(), String> {
  env_logger::init();

  let args = Args::parse();
  let test = args.test_number.unwrap_or(TEST);

  let test_data = match test {
    1 => get_test_array_1(),
    2 => get_test_array_2(),
    3 => get_test_array_3(),
    n => return Err(format!("no test sequence numbered {n}")),
  };
  println!("Original:  {:#?}", test_data);

  let samples = test_data.to_vec();
  let spectrum = forward(&samples, args.padding.into()).map_err(|e| e.to_string())?;
  println!("FT:        {:#?}", spectrum);

  let restored = inverse(&spectrum).map_err(|e| e.to_string())?;
  println!("IFT of FT: {:#?}", Array1::from_vec(restored));

  Ok(())
}

fn get_test_array_3() -> Array1<f64> {
  Array1::<f64>::ones(8)
}

// length 6, so the padding policy shows up in the output
fn get_test_array_2() -> Array1<f64> {
  Array1::<f64>::from_iter([1f64, 2f64, 3f64, 4f64, 5f64, 6f64])
}

fn get_test_array_1() -> Array1<f64> {
  #[allow(non_snake_case)]
  let N = 8;
  let k = 1f64;

  // kth harmonic, whose transform has unit entries at bins k and N - k
  Array1::<f64>::from_shape_fn(N, |n| (2f64 * PI * (k / N as f64) * n as f64).cos())
}
