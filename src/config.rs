use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body; 0 turns the limit off
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrEngineKind {
    /// Run the `tesseract` executable
    #[default]
    Command,
    /// Link Tesseract in-process (needs the `leptess` feature)
    Leptess,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub engine: OcrEngineKind,
    /// Executable used by the command engine
    pub command: String,
    pub language: String,
    pub tessdata_dir: Option<PathBuf>,
    /// 0 disables the timeout
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8000, max_upload_bytes: 0 }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engine: OcrEngineKind::Command,
            command: "tesseract".to_string(),
            language: "eng".to_string(),
            tessdata_dir: None,
            timeout_secs: 60,
        }
    }
}

impl Config {
    /// Load from `path`, or the default location when `None`.
    ///
    /// A missing file gives the defaults. `EVENTSNAP_*` environment variables
    /// are applied on top.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => get_config_path()?,
        };

        let mut config = if config_path.exists() {
            debug!("Reading config from {}", config_path.display());
            let content =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            debug!("No config at {}, using defaults", config_path.display());
            Config::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => get_config_path()?,
        };

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(config_path)
    }

    /// Override file values from `EVENTSNAP_*` variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(host) = env_var("EVENTSNAP_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env_var("EVENTSNAP_PORT") {
            self.server.port = parse_env("EVENTSNAP_PORT", &port)?;
        }
        if let Some(engine) = env_var("EVENTSNAP_OCR_ENGINE") {
            self.ocr.engine = match engine.to_lowercase().as_str() {
                "command" => OcrEngineKind::Command,
                "leptess" => OcrEngineKind::Leptess,
                other => {
                    return Err(anyhow!("Invalid EVENTSNAP_OCR_ENGINE '{}': expected command or leptess", other))
                }
            };
        }
        if let Some(command) = env_var("EVENTSNAP_TESSERACT_CMD") {
            self.ocr.command = command;
        }
        if let Some(language) = env_var("EVENTSNAP_OCR_LANGUAGE") {
            self.ocr.language = language;
        }
        if let Some(dir) = env_var("EVENTSNAP_TESSDATA_DIR") {
            self.ocr.tessdata_dir = Some(PathBuf::from(dir));
        }
        if let Some(secs) = env_var("EVENTSNAP_OCR_TIMEOUT_SECS") {
            self.ocr.timeout_secs = parse_env("EVENTSNAP_OCR_TIMEOUT_SECS", &secs)?;
        }
        Ok(())
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "eventsnap", "eventsnap")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| anyhow!("Invalid value for {}: '{}'", name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.max_upload_bytes, 0);
        assert_eq!(config.ocr.engine, OcrEngineKind::Command);
        assert_eq!(config.ocr.command, "tesseract");
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.ocr.timeout_secs, 60);
    }

    #[test]
    fn test_config_save_load() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.server.port = 9100;
        config.ocr.tessdata_dir = Some(PathBuf::from("/opt/tessdata"));
        let written = config.save(Some(&config_path))?;
        assert_eq!(written, config_path);

        let content = fs::read_to_string(&config_path)?;
        let loaded: Config = toml::from_str(&content)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let parsed: Config = toml::from_str("[ocr]\nlanguage = \"deu\"\nengine = \"leptess\"\n")?;
        assert_eq!(parsed.ocr.language, "deu");
        assert_eq!(parsed.ocr.engine, OcrEngineKind::Leptess);
        assert_eq!(parsed.ocr.command, "tesseract");
        assert_eq!(parsed.server, ServerConfig::default());
        Ok(())
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        let port: Result<u16> = parse_env("EVENTSNAP_PORT", "eighty");
        let err = port.unwrap_err().to_string();
        assert!(err.contains("EVENTSNAP_PORT"));

        let port: u16 = parse_env("EVENTSNAP_PORT", "8080").unwrap();
        assert_eq!(port, 8080);
    }
}
