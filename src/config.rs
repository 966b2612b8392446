//! Tool configuration.
//!
//! Handles loading, validating, and merging `aipage.toml`. Stock defaults are
//! the base layer; a user file in the config directory overrides any subset
//! of keys.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [ai]
//! base_url = "https://generativelanguage.googleapis.com/v1beta/models"
//! text_model = "gemini-3-flash-preview"
//! image_model = "nano-banana-pro-preview"
//! api_key_env = "GEMINI_API_KEY"  # Env var holding the API key
//! generate_images = true
//!
//! [brand]
//! primary_color = "#7c3aed"
//! secondary_color = "#3b82f6"
//! background_color = "#f8f9fa"
//! font_family = "Pretendard"
//!
//! [export]
//! scale = 2.0               # Device pixel ratio for PNG capture
//! settle_ms = 100           # Wait after load before capturing
//! viewport_width = 480
//! watermark_text = "SAMPLE"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [brand]
//! primary_color = "#e91e8c"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::color;
use crate::export::watermark;
use crate::types::BrandGuide;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "aipage.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `aipage.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Generative API endpoint and models.
    pub ai: AiConfig,
    /// Brand guide used when the user passes no colors or font.
    pub brand: BrandConfig,
    /// PNG capture settings.
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AiConfig {
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub generate_images: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            text_model: "gemini-3-flash-preview".to_string(),
            image_model: "nano-banana-pro-preview".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            generate_images: true,
        }
    }
}

impl AiConfig {
    /// Read the API key from the configured environment variable.
    /// Unset and empty are both treated as absent.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandConfig {
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub font_family: String,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            primary_color: "#7c3aed".to_string(),
            secondary_color: "#3b82f6".to_string(),
            background_color: "#f8f9fa".to_string(),
            font_family: "Pretendard".to_string(),
        }
    }
}

impl BrandConfig {
    pub fn to_brand_guide(&self) -> BrandGuide {
        BrandGuide {
            primary_color: self.primary_color.clone(),
            secondary_color: self.secondary_color.clone(),
            background_color: self.background_color.clone(),
            font_family: self.font_family.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Device pixel ratio used for the PNG capture.
    pub scale: f64,
    /// Milliseconds to wait after load so layout and images settle.
    pub settle_ms: u64,
    /// Browser viewport width in CSS pixels. The page column is 480px.
    pub viewport_width: u32,
    pub watermark_text: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: 2.0,
            settle_ms: 100,
            viewport_width: 480,
            watermark_text: "SAMPLE".to_string(),
        }
    }
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("ai.base_url", &self.ai.base_url),
            ("ai.text_model", &self.ai.text_model),
            ("ai.image_model", &self.ai.image_model),
            ("ai.api_key_env", &self.ai.api_key_env),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }

        for (key, value) in [
            ("brand.primary_color", &self.brand.primary_color),
            ("brand.secondary_color", &self.brand.secondary_color),
            ("brand.background_color", &self.brand.background_color),
        ] {
            if !value.starts_with('#') || color::parse_hex(value).is_none() {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a #rgb or #rrggbb color, got '{value}'"
                )));
            }
        }

        if !(self.export.scale > 0.0 && self.export.scale <= 4.0) {
            return Err(ConfigError::Validation(
                "export.scale must be greater than 0 and at most 4".into(),
            ));
        }
        if self.export.viewport_width == 0 {
            return Err(ConfigError::Validation(
                "export.viewport_width must be non-zero".into(),
            ));
        }
        if self.export.watermark_text.trim().is_empty() {
            return Err(ConfigError::Validation(
                "export.watermark_text must not be empty".into(),
            ));
        }
        if let Some(c) = watermark::first_undrawable(&self.export.watermark_text) {
            return Err(ConfigError::Validation(format!(
                "export.watermark_text contains '{c}'; only A-Z, 0-9 and spaces can be drawn"
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AppConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `aipage.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `aipage.toml` in the given directory, on top of stock defaults.
pub fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `aipage.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# aipage configuration
# ====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Generative API
# ---------------------------------------------------------------------------
[ai]
# Endpoint prefix; requests go to {base_url}/{model}:generateContent
base_url = "https://generativelanguage.googleapis.com/v1beta/models"

# Model used for competitor analysis and copywriting (JSON responses).
text_model = "gemini-3-flash-preview"

# Model used for hero and detail images.
image_model = "nano-banana-pro-preview"

# Environment variable holding the API key. When it is unset or empty,
# generation still succeeds with built-in fallback content.
api_key_env = "GEMINI_API_KEY"

# Set to false to skip image generation entirely.
generate_images = true

# ---------------------------------------------------------------------------
# Brand guide defaults (overridden by --primary-color etc. on generate)
# ---------------------------------------------------------------------------
[brand]
primary_color = "#7c3aed"
secondary_color = "#3b82f6"
background_color = "#f8f9fa"
font_family = "Pretendard"

# ---------------------------------------------------------------------------
# PNG export
# ---------------------------------------------------------------------------
[export]
# Device pixel ratio of the capture. 2.0 doubles the 480px column to 960px.
scale = 2.0

# Milliseconds to wait after the page loads before capturing.
settle_ms = 100

# Browser viewport width in CSS pixels.
viewport_width = 480

# Text tiled across watermarked samples. A-Z, 0-9 and spaces only.
watermark_text = "SAMPLE"
"##
}
