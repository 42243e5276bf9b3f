use super::{encode_png, OcrEngine, OcrError};
use crate::config::OcrConfig;
use async_trait::async_trait;
use image::DynamicImage;
use log::debug;
use std::path::PathBuf;

const ENGINE_NAME: &str = "leptess";

/// Tesseract linked in-process through `leptess`.
///
/// A fresh `LepTess` handle is created per call since it is not `Sync`;
/// recognition runs on the blocking pool.
#[derive(Debug, Clone)]
pub struct LeptessEngine {
    language: String,
    tessdata_dir: Option<PathBuf>,
}

impl LeptessEngine {
    pub fn from_config(config: &OcrConfig) -> Self {
        Self { language: config.language.clone(), tessdata_dir: config.tessdata_dir.clone() }
    }
}

#[async_trait]
impl OcrEngine for LeptessEngine {
    fn name(&self) -> &'static str {
        ENGINE_NAME
    }

    async fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let png = encode_png(image)?;
        let language = self.language.clone();
        let tessdata = self.tessdata_dir.as_ref().map(|p| p.to_string_lossy().to_string());

        tokio::task::spawn_blocking(move || {
            let mut lt = leptess::LepTess::new(tessdata.as_deref(), &language)
                .map_err(|e| OcrError::Unavailable(ENGINE_NAME, e.to_string()))?;

            lt.set_image_from_mem(&png)
                .map_err(|e| OcrError::Engine(format!("failed to load image: {}", e)))?;

            let text = lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))?;
            debug!("leptess recognised {} characters", text.chars().count());
            Ok(text)
        })
        .await
        .map_err(|e| OcrError::Async(e.to_string()))?
    }
}
