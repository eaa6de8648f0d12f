use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use zenblend::{ComposeRequest, ImageInfo, Unstoppable, io};

/// Alpha-blend a 32-bit BMP onto another one and write the result.
#[derive(Debug, Parser)]
#[command(name = "zenblend", version)]
struct Args {
    /// Destination (background) bitmap.
    #[arg(default_value = "pictures/cat.bmp")]
    destination: PathBuf,

    /// Source (foreground) bitmap, blended using its alpha channel.
    #[arg(default_value = "pictures/book.bmp")]
    source: PathBuf,

    /// Where to write the composed bitmap.
    #[arg(default_value = "pictures/composed.bmp")]
    output: PathBuf,

    /// Destination column of the source's first pixel.
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    x: i64,

    /// Destination buffer row of the source's first pixel.
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    y: i64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let dest_bytes = io::read_bytes(&args.destination).context("read destination")?;
    let src_bytes = io::read_bytes(&args.source).context("read source")?;

    for (role, bytes) in [("destination", &dest_bytes), ("source", &src_bytes)] {
        let info = ImageInfo::from_bytes(bytes).with_context(|| format!("probe {role}"))?;
        if !info.is_bgra32() {
            tracing::warn!(role, bits_per_pixel = ?info.bits_per_pixel, "input is not 32-bit BGRA");
        }
    }

    let mut dest = zenblend::decode_bmp(&dest_bytes, Unstoppable)
        .with_context(|| format!("decode {}", args.destination.display()))?;
    let src = zenblend::decode_bmp(&src_bytes, Unstoppable)
        .with_context(|| format!("decode {}", args.source.display()))?;

    tracing::info!(
        width = dest.width(),
        height = dest.height(),
        "destination geometry"
    );

    ComposeRequest::new(args.x, args.y)
        .compose(&mut dest, &src, Unstoppable)
        .context("compose")?;

    io::write_file(&args.output, &dest).context("write output")?;
    tracing::info!(output = %args.output.display(), bytes = dest.size(), "done");
    Ok(())
}
