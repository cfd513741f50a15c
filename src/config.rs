//! Service configuration loaded from environment variables.
//!
//! Kept as an explicit struct handed to the router at construction so tests
//! can point the service at temporary directories.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned for source videos; also the root for the catch-all
    /// file route.
    pub media_dir: PathBuf,
    /// Directory where exported clips are written (default: `{media_dir}/clips`).
    pub clip_dir: PathBuf,
    /// Front-end entry file served at `/` (default: `{media_dir}/index.html`).
    pub index_file: PathBuf,
    /// Bind address (default: `0.0.0.0:3000`).
    pub bind_addr: SocketAddr,
    /// ffmpeg program name or path (default: `ffmpeg`, resolved via PATH).
    pub ffmpeg_program: PathBuf,
}

impl Config {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                  |
    /// |----------------------|--------------------------|
    /// | `CLIPDECK_MEDIA_DIR` | `.`                      |
    /// | `CLIPDECK_CLIP_DIR`  | `{media_dir}/clips`      |
    /// | `CLIPDECK_INDEX`     | `{media_dir}/index.html` |
    /// | `CLIPDECK_ADDR`      | `0.0.0.0:3000`           |
    /// | `CLIPDECK_FFMPEG`    | `ffmpeg`                 |
    pub fn from_env() -> anyhow::Result<Self> {
        let media_dir = PathBuf::from(
            std::env::var("CLIPDECK_MEDIA_DIR").unwrap_or_else(|_| ".".into()),
        );

        let clip_dir = std::env::var("CLIPDECK_CLIP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| media_dir.join("clips"));

        let index_file = std::env::var("CLIPDECK_INDEX")
            .map(PathBuf::from)
            .unwrap_or_else(|_| media_dir.join("index.html"));

        let bind_addr = std::env::var("CLIPDECK_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".into())
            .parse()
            .context("CLIPDECK_ADDR must be a valid socket address")?;

        let ffmpeg_program = PathBuf::from(
            std::env::var("CLIPDECK_FFMPEG").unwrap_or_else(|_| "ffmpeg".into()),
        );

        Ok(Self {
            media_dir,
            clip_dir,
            index_file,
            bind_addr,
            ffmpeg_program,
        })
    }

    /// Create the clip output directory if it is missing. Called once at
    /// startup before the router is built.
    pub fn ensure_dirs(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.clip_dir).with_context(|| {
            format!("failed to create clip directory {}", self.clip_dir.display())
        })
    }
}
