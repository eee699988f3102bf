//! Morphology demo: synthetic image processing pipeline
//!
//! Generates a 200x200 synthetic 8-bit image with:
//! - Uniform background (value 50)
//! - Large bright rectangle (value 200)
//! - Small bright spots (single-pixel, value 220), "salt" noise
//! - Large dark ellipse (value 10)
//! - Small dark spots (single-pixel, value 5), "pepper" noise
//!
//! Then applies the morphology pipeline with a few structuring elements,
//! prints statistics for each result and checks that opening removes the
//! salt and closing removes the pepper. A small volume is filtered with a
//! ball to compare the naive and sliding implementations.
//!
//! Run:
//!   cargo run -p surtmorph-algorithms --example morphology_demo [-- -v]

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use surtmorph_algorithms::morphology::{
    black_hat, closing, dilate, erode, gradient, opening, top_hat, NaiveBallStrel3D,
    SlidingBallStrel3D, Strel3D, StructuringElement,
};
use surtmorph_core::{Image2D, Image3D, ProgressEvent, ScalarElement};
use tracing::{info, Level};

const SIZE_X: usize = 200;
const SIZE_Y: usize = 200;

fn main() -> surtmorph_core::Result<()> {
    let verbose = std::env::args().any(|arg| arg == "-v" || arg == "--verbose");
    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    let input = build_synthetic_image();
    info!("synthetic image: {}x{}", SIZE_X, SIZE_Y);
    print_stats("input", &input);

    for se in [
        StructuringElement::Square(3),
        StructuringElement::Diamond(5),
        StructuringElement::Octagon(7),
        StructuringElement::Disk(2.0),
    ] {
        println!("\nStructuring element: {:?}", se);
        let start = Instant::now();

        print_stats("eroded", &erode(&input, &se)?);
        print_stats("dilated", &dilate(&input, &se)?);
        let opened = opening(&input, &se)?;
        print_stats("opened", &opened);
        let closed = closing(&input, &se)?;
        print_stats("closed", &closed);
        print_stats("gradient", &gradient(&input, &se)?);
        print_stats("top-hat", &top_hat(&input, &se)?);
        print_stats("black-hat", &black_hat(&input, &se)?);
        let cleaned = closing(&opened, &se)?;
        print_stats("cleaned", &cleaned);

        info!("{:?} pipeline took {:.1?}", se, start.elapsed());
        verify_noise_removal(&input, &opened, &closed, &cleaned);
    }

    compare_balls()
}

/// Build a synthetic image with geometric objects and noise.
fn build_synthetic_image() -> Image2D<u8> {
    let mut img = Image2D::from_fn(SIZE_X, SIZE_Y, |x, y| {
        let dy = (y as f64 - 140.0) / 30.0;
        let dx = (x as f64 - 100.0) / 20.0;
        if (30..90).contains(&x) && (30..70).contains(&y) {
            200
        } else if dx * dx + dy * dy <= 1.0 {
            10
        } else {
            50
        }
    });

    let mut rng = StdRng::seed_from_u64(42);
    for value in [220u8, 5] {
        for _ in 0..80 {
            let x = rng.random_range(0..SIZE_X);
            let y = rng.random_range(0..SIZE_Y);
            // positions come from the generator, so they are always in range
            let _ = img.set(x, y, value);
        }
    }
    img
}

fn print_stats<T: ScalarElement>(label: &str, image: &Image2D<T>) {
    let s = image.statistics();
    println!(
        "  {:<10} min={:>6.1}  max={:>6.1}  mean={:>6.1}",
        label,
        s.min.and_then(ScalarElement::to_f64).unwrap_or(f64::NAN),
        s.max.and_then(ScalarElement::to_f64).unwrap_or(f64::NAN),
        s.mean.unwrap_or(f64::NAN),
    );
}

/// Count salt and pepper pixels before and after filtering.
fn verify_noise_removal(
    original: &Image2D<u8>,
    opened: &Image2D<u8>,
    closed: &Image2D<u8>,
    cleaned: &Image2D<u8>,
) {
    let count = |image: &Image2D<u8>, value: u8| image.data().iter().filter(|&&v| v == value).count();
    println!(
        "  salt: {} -> {} after opening, pepper: {} -> {} after closing, cleaned: {} / {}",
        count(original, 220),
        count(opened, 220),
        count(original, 5),
        count(closed, 5),
        count(cleaned, 220),
        count(cleaned, 5),
    );
}

fn compare_balls() -> surtmorph_core::Result<()> {
    let volume = Image3D::from_fn(40, 40, 40, |x, y, z| ((x * 31 + y * 17 + z * 7) % 97) as f32);
    println!("\nBall erosion of a 40x40x40 volume");
    for radius in [1.0, 2.0, 4.0] {
        let naive = NaiveBallStrel3D::new(radius)?;
        let sliding = SlidingBallStrel3D::new(radius)?;

        let start = Instant::now();
        let expected = naive.erosion(&volume);
        let naive_time = start.elapsed();

        let mut planes = 0;
        let mut listener = |event: &ProgressEvent| planes = event.current;
        let start = Instant::now();
        let result = sliding.erosion_with(&volume, &mut listener);
        let sliding_time = start.elapsed();

        println!(
            "  r={:<4} naive {:>9.1?}  sliding {:>9.1?}  planes={}  identical={}",
            radius,
            naive_time,
            sliding_time,
            planes,
            result == expected
        );
    }
    Ok(())
}
