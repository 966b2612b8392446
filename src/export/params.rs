//! Parameters for a page capture.
//!
//! Built from [`ExportConfig`](crate::config::ExportConfig); describes what
//! the [`Rasterizer`](super::Rasterizer) should produce, not how.

use crate::config::ExportConfig;
use crate::render::PAGE_CONTAINER_ID;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureParams {
    /// CSS selector of the element to capture.
    pub selector: String,
    /// Device pixel ratio of the capture.
    pub scale: f64,
    /// Wait after load so fonts and layout settle.
    pub settle: Duration,
    /// Browser window width in CSS pixels.
    pub viewport_width: u32,
}

impl CaptureParams {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            selector: format!("#{PAGE_CONTAINER_ID}"),
            scale: config.scale,
            settle: Duration::from_millis(config.settle_ms),
            viewport_width: config.viewport_width,
        }
    }
}

impl Default for CaptureParams {
    fn default() -> Self {
        Self::from_config(&ExportConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_capture_the_page_container_at_2x() {
        let params = CaptureParams::default();
        assert_eq!(params.selector, "#detail-page");
        assert_eq!(params.scale, 2.0);
        assert_eq!(params.settle, Duration::from_millis(100));
        assert_eq!(params.viewport_width, 480);
    }
}
