//! PNG export.
//!
//! ```text
//! export-mode HTML ─▶ Rasterizer ─▶ decode ─▶ flatten on white ─▶ [watermark] ─▶ PNG file
//! ```
//!
//! Every step runs before the output file is created, so a failed capture
//! or decode leaves nothing behind.

use super::params::CaptureParams;
use super::raster::Rasterizer;
use super::watermark::apply_watermark;
use super::{ExportError, file_name, html};
use crate::types::DetailPage;
use ::image::{ImageFormat, Rgba, RgbaImage, imageops};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::debug;

const SAMPLE_VARIANT: &str = "sample";

/// Capture `page` and write `<productName>_상세페이지.png` into `dir`, or
/// `<productName>_상세페이지_sample.png` when a watermark is given.
pub fn export_image(
    page: &DetailPage,
    rasterizer: &impl Rasterizer,
    params: &CaptureParams,
    dir: &Path,
    watermark: Option<&str>,
) -> Result<PathBuf, ExportError> {
    let document = html::render_document(page);
    let captured = rasterizer.capture(&document, params)?;
    let mut img = flatten(&::image::load_from_memory(&captured)?.into_rgba8());
    debug!(width = img.width(), height = img.height(), "captured page");

    if let Some(text) = watermark {
        apply_watermark(&mut img, text);
    }

    let mut png = Cursor::new(Vec::new());
    img.write_to(&mut png, ImageFormat::Png)?;

    fs::create_dir_all(dir)?;
    let variant = watermark.map(|_| SAMPLE_VARIANT);
    let path = dir.join(file_name(&page.product_name, variant, "png"));
    fs::write(&path, png.into_inner())?;
    Ok(path)
}

/// Composite over an opaque white background.
fn flatten(img: &RgbaImage) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(img.width(), img.height(), Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, img, 0, 0);
    canvas
}
