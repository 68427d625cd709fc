use jpegcore_rs::baseline::dct::{Block, BlockTransform, ReferenceDct, SeparableDct};
use std::time::{Duration, Instant};

fn time_round_trip(transform: &impl BlockTransform, input: &Block, iterations: u32) -> (Duration, Block) {
    let mut coeffs = [0.0f32; 64];
    let mut output = [0.0f32; 64];
    let start = Instant::now();
    for _ in 0..iterations {
        transform.forward(std::hint::black_box(input), &mut coeffs);
        transform.inverse(&coeffs, &mut output);
        // prevent optimization
        std::hint::black_box(output);
    }
    (start.elapsed(), coeffs)
}

fn main() {
    println!("Benchmarking DCT implementations...");

    let mut input = [0.0f32; 64];
    for (i, v) in input.iter_mut().enumerate() {
        *v = ((i / 8) * 19 + (i % 8) * 11) as f32 % 256.0 - 128.0;
    }

    let iterations = 100_000;

    let (duration_reference, coeffs_reference) = time_round_trip(&ReferenceDct, &input, iterations);
    println!("Reference DCT round trip: {:?} for {} iterations", duration_reference, iterations);

    let (duration_separable, coeffs_separable) = time_round_trip(&SeparableDct::new(), &input, iterations);
    println!("Separable DCT round trip: {:?} for {} iterations", duration_separable, iterations);

    let speedup = duration_reference.as_secs_f64() / duration_separable.as_secs_f64();
    println!("Speedup: {:.2}x", speedup);

    let max_diff = coeffs_reference
        .iter()
        .zip(coeffs_separable.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0f32, f32::max);
    println!("Max coefficient difference between reference and separable: {}", max_diff);

    if max_diff < 1e-2 {
        println!("Accuracy: PASSED (Tolerance < 0.01)");
    } else {
        println!("Accuracy: FAILED (Tolerance > 0.01)");
    }
}
