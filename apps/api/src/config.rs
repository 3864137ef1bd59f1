use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values are errors.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the persisted document.
    pub data_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on profile image uploads, in bytes.
    pub max_image_bytes: usize,
    /// Extra fonts for PDF rasterization, loaded on top of the system fonts.
    pub font_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            data_dir: std::env::var("RESUME_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_image_bytes: match std::env::var("MAX_IMAGE_BYTES") {
                Ok(raw) => raw
                    .parse::<usize>()
                    .context("MAX_IMAGE_BYTES must be a byte count")?,
                Err(_) => DEFAULT_MAX_IMAGE_BYTES,
            },
            font_dir: std::env::var("FONT_DIR").ok().map(PathBuf::from),
        })
    }

    /// Defaults rooted at `data_dir`, bypassing the environment.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Config {
            data_dir: data_dir.into(),
            port: 8080,
            rust_log: "info".to_string(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            font_dir: None,
        }
    }
}
