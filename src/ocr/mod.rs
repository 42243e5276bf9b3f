//! OCR adapter
//!
//! Decodes uploaded bytes into an image and hands it to a text-recognition
//! engine. Engines are picked from [`OcrConfig`] at start-up and shared
//! across requests behind an `Arc`.

mod command;
#[cfg(feature = "leptess")]
mod in_process;

pub use command::CommandEngine;
#[cfg(feature = "leptess")]
pub use in_process::LeptessEngine;

use crate::config::{OcrConfig, OcrEngineKind};
use anyhow::Result;
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use log::{debug, info};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

/// Failures while turning an upload into text
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("Failed to decode image: {0}")]
    Decode(String),
    #[error("Image is empty: width or height is 0")]
    EmptyImage,
    #[error("Failed to encode image for OCR: {0}")]
    Encode(String),
    #[error("OCR engine '{0}' is not available: {1}")]
    Unavailable(&'static str, String),
    #[error("OCR engine failed: {0}")]
    Engine(String),
    #[error("OCR timed out after {0}s")]
    Timeout(u64),
    #[error("OCR task failed: {0}")]
    Async(String),
}

/// Text recognition backend
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Short identifier used in logs (e.g. "tesseract-cli")
    fn name(&self) -> &'static str;

    /// Recognise all text in `image`.
    ///
    /// Returns the engine's output as-is; an image without text gives an
    /// empty string.
    async fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError>;
}

/// Decode raw upload bytes, guessing the format from the content
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, OcrError> {
    if bytes.is_empty() {
        return Err(OcrError::Decode("no image data".to_string()));
    }

    let image = image::load_from_memory(bytes).map_err(|e| OcrError::Decode(e.to_string()))?;
    if image.width() == 0 || image.height() == 0 {
        return Err(OcrError::EmptyImage);
    }

    debug!("Decoded {}x{} image from {} bytes", image.width(), image.height(), bytes.len());
    Ok(image)
}

/// PNG bytes for engines that take an encoded file rather than pixels
pub(crate) fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, OcrError> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| OcrError::Encode(e.to_string()))?;
    Ok(buf)
}

/// Run `engine` with an optional time limit (0 means none)
pub async fn recognize_with_timeout(
    engine: &dyn OcrEngine,
    image: &DynamicImage,
    timeout_secs: u64,
) -> Result<String, OcrError> {
    if timeout_secs == 0 {
        return engine.recognize(image).await;
    }

    tokio::time::timeout(Duration::from_secs(timeout_secs), engine.recognize(image))
        .await
        .map_err(|_| OcrError::Timeout(timeout_secs))?
}

/// Build the engine selected in the config
pub fn engine_from_config(config: &OcrConfig) -> Result<Arc<dyn OcrEngine>> {
    match config.engine {
        OcrEngineKind::Command => {
            info!("Using tesseract command '{}' (language {})", config.command, config.language);
            Ok(Arc::new(CommandEngine::from_config(config)))
        }
        #[cfg(feature = "leptess")]
        OcrEngineKind::Leptess => {
            info!("Using in-process leptess engine (language {})", config.language);
            Ok(Arc::new(LeptessEngine::from_config(config)))
        }
        #[cfg(not(feature = "leptess"))]
        OcrEngineKind::Leptess => Err(anyhow::anyhow!(
            "OCR engine 'leptess' requested but eventsnap was built without the `leptess` feature"
        )),
    }
}
