use super::{encode_png, OcrEngine, OcrError};
use crate::config::OcrConfig;
use async_trait::async_trait;
use image::DynamicImage;
use log::{debug, error};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

const ENGINE_NAME: &str = "tesseract-cli";

/// Runs the `tesseract` executable, feeding a PNG on stdin and reading the
/// recognised text from stdout.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: String,
    language: String,
    tessdata_dir: Option<PathBuf>,
}

impl CommandEngine {
    pub fn new(program: impl Into<String>, language: impl Into<String>) -> Self {
        Self { program: program.into(), language: language.into(), tessdata_dir: None }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            program: config.command.clone(),
            language: config.language.clone(),
            tessdata_dir: config.tessdata_dir.clone(),
        }
    }

    fn args(&self) -> Vec<String> {
        let mut args = vec![
            "stdin".to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.language.clone(),
        ];
        if let Some(dir) = &self.tessdata_dir {
            args.push("--tessdata-dir".to_string());
            args.push(dir.to_string_lossy().to_string());
        }
        args
    }
}

#[async_trait]
impl OcrEngine for CommandEngine {
    fn name(&self) -> &'static str {
        ENGINE_NAME
    }

    async fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let png = encode_png(image)?;
        let args = self.args();
        debug!("Running {} {}", self.program, args.join(" "));

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => OcrError::Unavailable(
                    ENGINE_NAME,
                    format!("'{}' not found in PATH", self.program),
                ),
                _ => OcrError::Engine(format!("failed to start '{}': {}", self.program, e)),
            })?;

        // Feed stdin from its own task so a chatty child can't fill stdout and stall us
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| OcrError::Engine("child stdin unavailable".to_string()))?;
        let writer = tokio::spawn(async move {
            stdin.write_all(&png).await?;
            stdin.shutdown().await
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| OcrError::Engine(format!("failed to wait for '{}': {}", self.program, e)))?;

        match writer.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!("Writing image to {} stopped early: {}", self.program, e),
            Err(e) => return Err(OcrError::Async(e.to_string())),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("{} exited with {}: {}", self.program, output.status, stderr.trim());
            return Err(OcrError::Engine(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
