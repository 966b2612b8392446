//! Exporting a finished page.
//!
//! | Output | Entry point | How |
//! |---|---|---|
//! | **HTML** | [`html::export_html`] | Export-mode document, written as-is |
//! | **PNG** | [`image::export_image`] | Headless browser capture of `#detail-page` |
//! | **Sample PNG** | [`image::export_image`] with a watermark | Capture + [`watermark::apply_watermark`] |
//!
//! The module is split into:
//! - **Parameters**: [`CaptureParams`], what to capture and at which scale
//! - **Raster**: [`Rasterizer`] trait + [`ChromeRasterizer`]
//! - **Watermark**: bitmap-font text tiling on an `RgbaImage`
//! - **Exporters**: HTML and image writers built on the above

pub mod html;
pub mod image;
mod params;
pub mod raster;
pub mod watermark;

pub use params::CaptureParams;
pub use raster::{ChromeRasterizer, RasterError, Rasterizer};

use thiserror::Error;

const FILE_SUFFIX: &str = "상세페이지";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("capture failed: {0}")]
    Raster(#[from] RasterError),
    #[error("image error: {0}")]
    Image(#[from] ::image::ImageError),
}

/// Output file name for a product: `<name>_상세페이지[_<variant>].<ext>`.
///
/// Path separators in the product name become `_`.
pub fn file_name(product_name: &str, variant: Option<&str>, extension: &str) -> String {
    let stem: String = product_name
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    match variant {
        Some(v) => format!("{stem}_{FILE_SUFFIX}_{v}.{extension}"),
        None => format!("{stem}_{FILE_SUFFIX}.{extension}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(file_name("Widget", None, "html"), "Widget_상세페이지.html");
        assert_eq!(file_name("Widget", None, "png"), "Widget_상세페이지.png");
        assert_eq!(
            file_name("Widget", Some("sample"), "png"),
            "Widget_상세페이지_sample.png"
        );
    }

    #[test]
    fn separators_are_replaced() {
        assert_eq!(
            file_name("a/b\\c", None, "html"),
            "a_b_c_상세페이지.html"
        );
    }
}
