use crate::cli::ConfigActions;
use crate::config::{get_config_path, Config};
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

pub fn handle_config_action(action: ConfigActions, path: Option<&Path>, config: &Config) -> Result<()> {
    match action {
        ConfigActions::Show => {
            println!("\nCurrent Configuration:");
            println!("{}", toml::to_string_pretty(config)?);
        }
        ConfigActions::Init { force } => {
            let written = init_config(path, force)?;
            println!("Wrote default configuration to {}", written.display());
        }
        ConfigActions::Path => {
            println!("{}", resolve_path(path)?.display());
        }
    }
    Ok(())
}

/// Write `Config::default()` to `path`, refusing to clobber unless `force`
pub fn init_config(path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let target = resolve_path(path)?;
    if target.exists() && !force {
        return Err(anyhow!(
            "{} already exists; pass --force to overwrite it",
            target.display()
        ));
    }
    Config::default().save(Some(&target))
}

fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => get_config_path(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_init_refuses_to_overwrite() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\nport = 1234\n")?;

        assert!(init_config(Some(&path), false).is_err());
        assert_eq!(fs::read_to_string(&path)?, "[server]\nport = 1234\n");

        init_config(Some(&path), true)?;
        let written: Config = toml::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(written, Config::default());
        Ok(())
    }

    #[test]
    fn test_init_creates_missing_directories() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("a").join("b").join("config.toml");
        assert_eq!(init_config(Some(&path), false)?, path);
        assert!(path.exists());
        Ok(())
    }
}
