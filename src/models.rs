use std::path::Path;

use serde::Deserialize;

/// Recognized video extensions, matched case-insensitively against file names.
pub const VIDEO_EXTS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm"];

/// True if `name` ends with one of the recognized video extensions.
pub fn is_video_file(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    VIDEO_EXTS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

#[derive(Deserialize, Debug)]
pub struct ClipRequest {
    pub video: String,
    pub action: String,
    pub start: f64,
    pub end: f64,
}

impl ClipRequest {
    /// Deterministic clip file name:
    /// `{stem}_{sanitized action}_{start:.1}_{end:.1}.mp4`.
    ///
    /// Repeating an identical request yields the same name; ffmpeg is run
    /// with `-y`, so the previous artifact is overwritten.
    pub fn clip_file_name(&self) -> String {
        format!(
            "{}_{}_{:.1}_{:.1}.mp4",
            file_stem(&self.video),
            sanitize_action(&self.action),
            self.start,
            self.end
        )
    }
}

#[derive(Deserialize, Debug)]
pub struct ConvertRequest {
    pub video: String,
}

impl ConvertRequest {
    /// Deterministic remux output name: `{stem}_fast{ext}`, keeping the
    /// source extension. Written next to the source, not in the clip dir.
    pub fn output_file_name(&self) -> String {
        let path = Path::new(&self.video);
        match path.extension() {
            Some(ext) => format!("{}_fast.{}", file_stem(&self.video), ext.to_string_lossy()),
            None => format!("{}_fast", file_stem(&self.video)),
        }
    }
}

/// Spaces become underscores and slashes become hyphens, keeping the action
/// label filesystem-safe and free of path separators.
pub fn sanitize_action(action: &str) -> String {
    action.replace(' ', "_").replace('/', "-")
}

fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}
