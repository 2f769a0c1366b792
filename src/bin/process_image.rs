use anyhow::Context;
use rgb_png::{decode, encode};

fn main() -> anyhow::Result<()> {
    let args: Vec<_> = std::env::args().skip(1).collect();
    let verbosity = if args.first().map(|a| a == "-v").unwrap_or(false) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Error
    };
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .init();
    let file_name = args
        .last()
        .context("usage: process-image [-v] <image.png>")?;
    let input = std::fs::read(file_name)?;
    let image = decode(&input)?;
    std::fs::write("output.png", encode(&image))?;
    Ok(())
}
