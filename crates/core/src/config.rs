//! Engine configuration
//!
//! Settings that are not part of `construct` (which mirrors the classic
//! engine signature) live here. They can be built in code, read from
//! environment variables, or loaded from a JSON file.
//!
//! # Environment Variables
//!
//! - `PGE_CONFIG`: Path to a JSON file; its values are the base layer
//! - `PGE_TARGET_FPS`: Frame rate used when vsync is requested (default: 60)
//! - `PGE_FONT_PATH`: Load the font sheet from a `.spr` file instead of the built-in one
//! - `PGE_QUIT_ON_ESCAPE`: Set to "0" or "false" to let games handle Escape themselves
//! - `PGE_MAX_FRAMES`: Stop the loop after this many frames
//! - `PGE_FIXED_TIMESTEP`: Report this many seconds per frame instead of wall time

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::DEFAULT_TARGET_FPS;

/// Runtime settings for an [`Engine`](crate::Engine).
///
/// # Example
///
/// ```
/// use tui_pge_core::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.target_fps, 60);
/// assert!(config.quit_on_escape);
///
/// let config = EngineConfig::from_json_str(r#"{"target_fps": 30, "max_frames": 5}"#).unwrap();
/// assert_eq!(config.target_fps, 30);
/// assert_eq!(config.max_frames, Some(5));
/// assert!(config.font_path.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Frame pacing target when `construct` was called with `vsync = true`.
    pub target_fps: u32,
    /// Font sheet override. A missing file makes `construct` return `NoFile`.
    pub font_path: Option<PathBuf>,
    /// End the loop when Escape is pressed.
    pub quit_on_escape: bool,
    /// End the loop after this many frames.
    pub max_frames: Option<u64>,
    /// Fixed frame time in seconds, for reproducible runs.
    pub fixed_timestep: Option<f32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            font_path: None,
            quit_on_escape: true,
            max_frames: None,
            fixed_timestep: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NoFile(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Build a configuration from environment variables.
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        use std::env;

        let mut config = match env::var("PGE_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_json_file(path.trim())?,
            _ => Self::default(),
        };

        if let Some(fps) = env::var("PGE_TARGET_FPS").ok().and_then(|s| s.parse().ok()) {
            config.target_fps = fps;
        }

        if let Some(path) = env::var("PGE_FONT_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) })
        {
            config.font_path = Some(PathBuf::from(path));
        }

        if let Ok(v) = env::var("PGE_QUIT_ON_ESCAPE") {
            config.quit_on_escape = !(v == "0" || v.to_lowercase() == "false");
        }

        if let Some(n) = env::var("PGE_MAX_FRAMES").ok().and_then(|s| s.parse().ok()) {
            config.max_frames = Some(n);
        }

        if let Some(dt) = env::var("PGE_FIXED_TIMESTEP").ok().and_then(|s| s.parse().ok()) {
            config.fixed_timestep = Some(dt);
        }

        config.validated()
    }

    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps;
        self
    }

    pub fn with_fixed_timestep(mut self, seconds: f32) -> Self {
        self.fixed_timestep = Some(seconds);
        self
    }

    fn validated(self) -> Result<Self> {
        if self.target_fps == 0 {
            return Err(Error::Config("target_fps must be positive".to_string()));
        }
        if let Some(dt) = self.fixed_timestep {
            if !(dt.is_finite() && dt >= 0.0) {
                return Err(Error::Config(format!("invalid fixed_timestep {}", dt)));
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_fields_are_optional() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn zero_fps_is_rejected() {
        let err = EngineConfig::from_json_str(r#"{"target_fps": 0}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = EngineConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn missing_config_file_is_no_file() {
        let err = EngineConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::NoFile(_)));
    }

    #[test]
    fn builders_override_defaults() {
        let config = EngineConfig::default()
            .with_font_path("font.spr")
            .with_max_frames(3)
            .with_target_fps(24);
        assert_eq!(config.font_path.as_deref(), Some(Path::new("font.spr")));
        assert_eq!(config.max_frames, Some(3));
        assert_eq!(config.target_fps, 24);
    }

    #[test]
    fn negative_timestep_is_rejected() {
        let err = EngineConfig::from_json_str(r#"{"fixed_timestep": -0.5}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        let config = EngineConfig::from_json_str(r#"{"fixed_timestep": 0.25}"#).unwrap();
        assert_eq!(config.fixed_timestep, Some(0.25));
    }
}
