use anyhow::Context;
use rgb_png::{decode, encode};
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

fn main() -> anyhow::Result<()> {
    let input_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/png-suite".to_owned());
    let output_dir = Path::new("benchmark");
    fs::create_dir_all(output_dir)?;
    let test_images = fs::read_dir(&input_dir)
        .with_context(|| format!("Failed to read {input_dir}"))?
        .filter_map(|entry| entry.ok())
        .filter(|p| {
            let path = p.path();
            path.is_file()
                && path.extension() == Some(OsStr::new("png"))
                && !path
                    .file_name()
                    .and_then(|file_name| file_name.to_str())
                    .map(|file_name| file_name.starts_with('x'))
                    .unwrap_or(true)
        });
    let mut processed_images = Vec::with_capacity(test_images.size_hint().1.unwrap_or(50));

    for image in test_images {
        let image_path = image.path();
        let test_name = image_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .context("non-utf8 file name")?
            .to_owned();
        let orig_name = PathBuf::from(format!("{test_name}-orig.png"));
        let rpng_name = PathBuf::from(format!("{test_name}-rpng.png"));
        fs::copy(image_path.clone(), output_dir.join(orig_name.clone())).context(format!(
            "Failed to copy from {} to {}",
            image_path.display(),
            orig_name.display(),
        ))?;
        let roundtripped = decode(&fs::read(image_path.clone())?)
            .context(format!("Failed to decode {}.", image_path.display()))?;
        fs::write(output_dir.join(rpng_name), encode(&roundtripped))?;
        processed_images.push(test_name);
    }
    let now = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)?;
    let results = serde_json::json!({
        "date": now,
        "processed_images": processed_images,
    });
    fs::write(output_dir.join("test_results.json"), results.to_string())?;
    Ok(())
}
