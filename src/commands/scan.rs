use super::parse::render_record;
use crate::config::Config;
use crate::event::EventRecord;
use crate::ocr;
use crate::parser::parse_event;
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

pub async fn handle_scan(image: &Path, config: &Config) -> Result<()> {
    let record = scan_image(image, config).await?;
    println!("{}", render_record(&record)?);
    Ok(())
}

/// Same pipeline as `POST /ocr`, for a file on disk
pub async fn scan_image(path: &Path, config: &Config) -> Result<EventRecord> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let image = ocr::decode_image(&bytes)
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    let engine = ocr::engine_from_config(&config.ocr)?;
    info!("Running {} on {}", engine.name(), path.display());
    let text = ocr::recognize_with_timeout(engine.as_ref(), &image, config.ocr.timeout_secs).await?;

    Ok(parse_event(&text))
}
