//! Where linefile keeps its config file and logs
//!
//! The base directory is `$XDG_CONFIG_HOME/linefile` (falling back to
//! `~/.config/linefile`), or `%APPDATA%\linefile` on Windows.

use std::env;
use std::io;
use std::path::PathBuf;

const APP_DIR: &str = "linefile";

/// Base directory, `None` when no home/config location is known
pub fn config_dir() -> Option<PathBuf> {
    let base = if cfg!(target_os = "windows") {
        env::var_os("APPDATA").map(PathBuf::from)
    } else {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
    };
    base.map(|dir| dir.join(APP_DIR))
}

/// `<config dir>/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `<config dir>/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Create the logs directory if needed and return it
pub fn ensure_logs_dir() -> io::Result<PathBuf> {
    let dir = logs_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no config directory available"))?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
