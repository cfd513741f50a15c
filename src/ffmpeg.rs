//! External media tool invocation.
//!
//! Trimming and remuxing are owned entirely by ffmpeg; this module only
//! builds argument lists and runs the binary as a subprocess. The
//! [`MediaTool`] trait keeps the HTTP layer decoupled from the real binary
//! so tests can substitute a stub.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} exited with code {code}: {stderr}")]
    Failed {
        program: String,
        code: i32,
        stderr: String,
    },
}

/// Narrow interface over the external processing tool. Both operations are
/// stream copies (no re-encoding) with fast-start metadata placement, and
/// overwrite an existing destination.
#[async_trait]
pub trait MediaTool: Send + Sync {
    /// Cut `src` between `start` and `end` seconds into `dest`.
    async fn trim(&self, src: &Path, start: f64, end: f64, dest: &Path) -> Result<(), ToolError>;

    /// Remux `src` into `dest` with fast-start metadata placement.
    async fn remux(&self, src: &Path, dest: &Path) -> Result<(), ToolError>;
}

/// Real implementation shelling out to the ffmpeg binary.
pub struct Ffmpeg {
    program: PathBuf,
}

impl Ffmpeg {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

pub(crate) fn trim_args(src: &Path, start: f64, end: f64, dest: &Path) -> Vec<String> {
    vec![
        "-y".into(),
        "-ss".into(),
        start.to_string(),
        "-to".into(),
        end.to_string(),
        "-i".into(),
        src.to_string_lossy().into_owned(),
        "-c".into(),
        "copy".into(),
        "-movflags".into(),
        "faststart".into(),
        dest.to_string_lossy().into_owned(),
    ]
}

pub(crate) fn remux_args(src: &Path, dest: &Path) -> Vec<String> {
    vec![
        "-y".into(),
        "-i".into(),
        src.to_string_lossy().into_owned(),
        "-c".into(),
        "copy".into(),
        "-movflags".into(),
        "faststart".into(),
        dest.to_string_lossy().into_owned(),
    ]
}

#[async_trait]
impl MediaTool for Ffmpeg {
    async fn trim(&self, src: &Path, start: f64, end: f64, dest: &Path) -> Result<(), ToolError> {
        let args = trim_args(src, start, end, dest);
        tracing::debug!(program = %self.program.display(), ?args, "running trim");

        // Tool output is discarded for trims; the exit code is the only
        // signal consumed.
        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|source| ToolError::Spawn {
                program: self.program_name(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ToolError::Failed {
                program: self.program_name(),
                code: status.code().unwrap_or(-1),
                stderr: String::new(),
            })
        }
    }

    async fn remux(&self, src: &Path, dest: &Path) -> Result<(), ToolError> {
        let args = remux_args(src, dest);
        tracing::debug!(program = %self.program.display(), ?args, "running remux");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| ToolError::Spawn {
                program: self.program_name(),
                source,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            Err(ToolError::Failed {
                program: self.program_name(),
                code: output.status.code().unwrap_or(-1),
                stderr,
            })
        }
    }
}
