use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory of the static LaTeX template fragments.
    pub template_dir: PathBuf,
    /// Name (or path) of the LaTeX compiler executable.
    pub pdflatex_bin: String,
    /// Upper bound on a single compiler invocation.
    pub compile_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            template_dir: PathBuf::from(
                std::env::var("TEMPLATE_DIR").unwrap_or_else(|_| "templates".to_string()),
            ),
            pdflatex_bin: std::env::var("PDFLATEX_BIN")
                .unwrap_or_else(|_| "pdflatex".to_string()),
            compile_timeout: Duration::from_secs(
                std::env::var("COMPILE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse::<u64>()
                    .context("COMPILE_TIMEOUT_SECS must be a number of seconds")?,
            ),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
