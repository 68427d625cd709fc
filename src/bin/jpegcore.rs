//! jpegcore CLI - lossy round trip of raw RGBA pixels through the JPEG-style core.
//!
//! Input and output are raw interleaved RGBA8 buffers; no container format
//! is parsed or produced beyond a PAM header for viewing.

use clap::{Parser, Subcommand, ValueEnum};
use jpegcore_rs::{
    BlockTransform, Channel, CompressedImage, ImageCodec, JfifYCbCr, QuantizationCodec, QuantizationTable,
    RasterImage, ReferenceDct, SeparableDct,
};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// JPEG-style transform core: YCbCr, 4:2:0 subsampling, 8x8 DCT and quantization
#[derive(Parser)]
#[command(name = "jpegcore")]
#[command(version)]
#[command(about = "Compress and reconstruct raw RGBA images through a JPEG-style transform core", long_about = None)]
#[command(after_help = "EXAMPLES:
    jpegcore roundtrip -i pixels.rgba -o restored.pam -w 640 -H 480 -f pam
    jpegcore roundtrip -i pixels.rgba -o restored.rgba -w 640 -H 480 -t reference
    jpegcore info -i pixels.rgba -w 640 -H 480

Set RUST_LOG=debug to trace pipeline stages.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress raw RGBA pixels and write the lossy reconstruction
    #[command(visible_alias = "r")]
    Roundtrip {
        /// Input file of interleaved 8-bit RGBA samples
        #[arg(short, long, help = "Path to raw RGBA pixel data")]
        input: PathBuf,

        /// Output file for the reconstructed pixels
        #[arg(short, long, help = "Path for the reconstructed output file")]
        output: PathBuf,

        /// Image width in pixels
        #[arg(short, long)]
        width: usize,

        /// Image height in pixels
        #[arg(short = 'H', long)]
        height: usize,

        /// Output format: raw (RGBA8 bytes) or pam (Portable Arbitrary Map)
        #[arg(short, long, default_value = "raw", value_enum)]
        format: OutputFormat,

        /// Block transform implementation
        #[arg(short, long, default_value = "separable", value_enum)]
        transform: Transform,
    },

    /// Compress raw RGBA pixels and print plane statistics
    #[command(visible_alias = "i")]
    Info {
        /// Input file of interleaved 8-bit RGBA samples
        #[arg(short, long, help = "Path to raw RGBA pixel data")]
        input: PathBuf,

        /// Image width in pixels
        #[arg(short, long)]
        width: usize,

        /// Image height in pixels
        #[arg(short = 'H', long)]
        height: usize,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Raw interleaved RGBA8 bytes
    Raw,
    /// Portable Arbitrary Map (P7, RGB_ALPHA)
    Pam,
}

#[derive(Clone, Debug, ValueEnum)]
enum Transform {
    /// Precomputed basis, row/column passes
    Separable,
    /// Direct evaluation of the DCT double sum
    Reference,
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Roundtrip {
            input,
            output,
            width,
            height,
            format,
            transform,
        } => match transform {
            Transform::Separable => round_trip(&codec_with(SeparableDct::new()), &input, &output, width, height, &format),
            Transform::Reference => round_trip(&codec_with(ReferenceDct), &input, &output, width, height, &format),
        },
        Commands::Info { input, width, height } => show_info(&input, width, height),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn codec_with<T: BlockTransform>(transform: T) -> ImageCodec<T, JfifYCbCr> {
    ImageCodec::with_parts(QuantizationCodec::new(QuantizationTable::default(), transform), JfifYCbCr)
}

fn read_raster(input: &PathBuf, width: usize, height: usize) -> Result<RasterImage, Box<dyn std::error::Error>> {
    let bytes = fs::read(input)?;
    Ok(RasterImage::from_rgba8(width, height, &bytes)?)
}

fn round_trip<T: BlockTransform>(
    codec: &ImageCodec<T, JfifYCbCr>,
    input: &PathBuf,
    output: &PathBuf,
    width: usize,
    height: usize,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = read_raster(input, width, height)?;

    let compressed = codec.compress(&source)?;
    info!(
        padded_width = compressed.padded_width(),
        padded_height = compressed.padded_height(),
        "compressed"
    );
    let restored = codec.reconstruct(&compressed)?;

    match format {
        OutputFormat::Raw => fs::write(output, restored.to_rgba8())?,
        OutputFormat::Pam => write_pam(output, &restored.to_rgba8(), width, height)?,
    }

    println!("✓ Reconstructed {}x{} image to {:?}", width, height, output);
    match psnr(&source.to_rgba8(), &restored.to_rgba8()) {
        Some(db) => println!("PSNR (RGB): {:.2} dB", db),
        None => println!("PSNR (RGB): identical"),
    }
    Ok(())
}

fn show_info(input: &PathBuf, width: usize, height: usize) -> Result<(), Box<dyn std::error::Error>> {
    let source = read_raster(input, width, height)?;
    let compressed = CompressedImage::new(&source)?;

    println!("File: {:?}", input);
    println!("Dimensions: {}x{}", compressed.width(), compressed.height());
    println!(
        "Padded:     {}x{}",
        compressed.padded_width(),
        compressed.padded_height()
    );
    println!(
        "Chroma:     {}x{}",
        compressed.chroma_width(),
        compressed.chroma_height()
    );
    println!();

    for (name, channel) in [("Y", Channel::Luma), ("Cb", Channel::ChromaBlue), ("Cr", Channel::ChromaRed)] {
        let plane = compressed.channel(channel);
        let nonzero = plane.as_slice().iter().filter(|&&c| c != 0).count();
        println!(
            "{:<3} {}x{} coefficients, {} non-zero ({:.1}%)",
            name,
            plane.width(),
            plane.height(),
            nonzero,
            100.0 * nonzero as f64 / plane.as_slice().len().max(1) as f64
        );
    }
    Ok(())
}

// Over the RGB samples only; alpha is stored losslessly.
fn psnr(original: &[u8], restored: &[u8]) -> Option<f64> {
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for (a, b) in original.chunks_exact(4).zip(restored.chunks_exact(4)) {
        for c in 0..3 {
            let d = a[c] as f64 - b[c] as f64;
            sum += d * d;
            count += 1;
        }
    }
    if count == 0 || sum == 0.0 {
        return None;
    }
    let mse = sum / count as f64;
    Some(10.0 * (255.0 * 255.0 / mse).log10())
}

fn write_pam(path: &PathBuf, pixels: &[u8], width: usize, height: usize) -> Result<(), Box<dyn std::error::Error>> {
    use std::io::Write;
    let mut file = fs::File::create(path)?;

    writeln!(file, "P7")?;
    writeln!(file, "WIDTH {}", width)?;
    writeln!(file, "HEIGHT {}", height)?;
    writeln!(file, "DEPTH 4")?;
    writeln!(file, "MAXVAL 255")?;
    writeln!(file, "TUPLTYPE RGB_ALPHA")?;
    writeln!(file, "ENDHDR")?;
    file.write_all(pixels)?;

    Ok(())
}
