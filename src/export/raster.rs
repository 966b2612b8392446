//! Turning a rendered document into pixels.
//!
//! The [`Rasterizer`] trait takes a complete HTML document and returns PNG
//! bytes of one element of it. [`ChromeRasterizer`] loads the document from a
//! temporary file into headless Chrome and screenshots the element's margin
//! box at the requested device scale.

use super::params::CaptureParams;
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, LaunchOptions};
use std::io::Write;
use thiserror::Error;
use tracing::debug;

/// Window height used while capturing. The page column is narrow and tall;
/// anything below the window would be clipped from the screenshot.
const WINDOW_HEIGHT: u32 = 12_000;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("browser error: {0}")]
    Browser(String),
}

fn browser_err(err: impl std::fmt::Display) -> RasterError {
    RasterError::Browser(err.to_string())
}

pub trait Rasterizer {
    /// Capture the element matching `params.selector` as PNG bytes.
    fn capture(&self, html: &str, params: &CaptureParams) -> Result<Vec<u8>, RasterError>;
}

/// Headless Chrome, launched per capture.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChromeRasterizer;

impl ChromeRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for ChromeRasterizer {
    fn capture(&self, html: &str, params: &CaptureParams) -> Result<Vec<u8>, RasterError> {
        let mut file = tempfile::Builder::new()
            .prefix("aipage-")
            .suffix(".html")
            .tempfile()?;
        file.write_all(html.as_bytes())?;
        file.flush()?;

        let browser = Browser::new(LaunchOptions {
            window_size: Some((params.viewport_width, WINDOW_HEIGHT)),
            ..Default::default()
        })
        .map_err(browser_err)?;
        let tab = browser.new_tab().map_err(browser_err)?;

        let url = format!("file://{}", file.path().display());
        debug!(%url, "loading page for capture");
        tab.navigate_to(&url)
            .map_err(browser_err)?
            .wait_until_navigated()
            .map_err(browser_err)?;
        std::thread::sleep(params.settle);

        let element = tab.wait_for_element(&params.selector).map_err(browser_err)?;
        let mut clip = element
            .get_box_model()
            .map_err(browser_err)?
            .margin_viewport();
        clip.scale = params.scale;

        tab.capture_screenshot(CaptureScreenshotFormatOption::Png, None, Some(clip), true)
            .map_err(browser_err)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use ::image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::sync::Mutex;

    /// Rasterizer that paints a flat image instead of launching a browser.
    ///
    /// The image is `width × height` CSS pixels multiplied by the requested
    /// scale, filled with `fill`.
    pub struct MockRasterizer {
        pub width: u32,
        pub height: u32,
        pub fill: Rgba<u8>,
        pub fail: bool,
        pub captures: Mutex<Vec<RecordedCapture>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedCapture {
        pub html: String,
        pub selector: String,
        pub scale: f64,
    }

    impl MockRasterizer {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                fill: Rgba([255, 255, 255, 255]),
                fail: false,
                captures: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(1, 1)
            }
        }

        pub fn get_captures(&self) -> Vec<RecordedCapture> {
            self.captures.lock().unwrap().clone()
        }
    }

    impl Rasterizer for MockRasterizer {
        fn capture(&self, html: &str, params: &CaptureParams) -> Result<Vec<u8>, RasterError> {
            self.captures.lock().unwrap().push(RecordedCapture {
                html: html.to_string(),
                selector: params.selector.clone(),
                scale: params.scale,
            });
            if self.fail {
                return Err(RasterError::Browser("mock failure".to_string()));
            }

            let w = (self.width as f64 * params.scale).round() as u32;
            let h = (self.height as f64 * params.scale).round() as u32;
            let img = RgbaImage::from_pixel(w, h, self.fill);
            let mut bytes = Cursor::new(Vec::new());
            img.write_to(&mut bytes, ImageFormat::Png)
                .map_err(browser_err)?;
            Ok(bytes.into_inner())
        }
    }

    #[test]
    fn mock_scales_output() {
        let mock = MockRasterizer::new(10, 20);
        let params = CaptureParams::default();
        let png = mock.capture("<html></html>", &params).unwrap();
        let img = ::image::load_from_memory(&png).unwrap();
        assert_eq!((img.width(), img.height()), (20, 40));
        assert_eq!(mock.get_captures()[0].selector, "#detail-page");
    }
}
