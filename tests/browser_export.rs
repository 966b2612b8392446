//! Headless Chrome export tests.
//!
//! Run with: `cargo test --test browser_export -- --ignored`

use aipage::ai::ImageSet;
use aipage::builder;
use aipage::export::image::export_image;
use aipage::export::{CaptureParams, ChromeRasterizer, Rasterizer};
use aipage::templates::{self, CategoryId};
use aipage::types::{AiCopy, BrandGuide, DetailPage, FeatureItem, ProductInput};
use std::time::Duration;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn page() -> DetailPage {
    let input = ProductInput {
        product_name: "Widget".to_string(),
        description: "A waterproof everyday widget".to_string(),
        features: "방수, 경량".to_string(),
        competitor_url: String::new(),
        images: Vec::new(),
        brand_guide: BrandGuide {
            primary_color: "#7c3aed".to_string(),
            secondary_color: "#3b82f6".to_string(),
            background_color: "#f8f9fa".to_string(),
            font_family: "Pretendard".to_string(),
        },
    };
    let copy = AiCopy {
        hooking_text: "Widget, 이제 다르게 경험하세요".to_string(),
        sub_texts: vec!["서브".to_string()],
        problem_statements: vec!["무겁다".to_string()],
        solution_description: "가볍습니다".to_string(),
        feature_descriptions: vec![FeatureItem {
            icon: "star".to_string(),
            title: "방수".to_string(),
            description: "비에도 안심".to_string(),
        }],
        cta_text: "지금 구매".to_string(),
    };
    let template = templates::get(CategoryId::Electronics);
    builder::build_page(&input, Some(template), &copy, &ImageSet::new())
}

fn params(scale: f64) -> CaptureParams {
    CaptureParams {
        scale,
        settle: Duration::from_millis(200),
        ..CaptureParams::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn capture_width_follows_scale() {
    let html = aipage::export::html::render_document(&page());
    let png = ChromeRasterizer::new().capture(&html, &params(2.0)).unwrap();
    let img = image::load_from_memory(&png).unwrap();

    assert_eq!(img.width(), 960);
    assert!(img.height() > img.width(), "page should be a tall column");
}

#[test]
#[ignore]
fn missing_element_is_an_error() {
    let params = CaptureParams {
        selector: "#nowhere".to_string(),
        ..params(1.0)
    };
    let result = ChromeRasterizer::new().capture("<html><body></body></html>", &params);
    assert!(result.is_err());
}

#[test]
#[ignore]
fn sample_export_writes_watermarked_png() {
    let tmp = TempDir::new().unwrap();
    let page = page();
    let plain = export_image(&page, &ChromeRasterizer::new(), &params(1.0), tmp.path(), None).unwrap();
    let sample = export_image(
        &page,
        &ChromeRasterizer::new(),
        &params(1.0),
        tmp.path(),
        Some("SAMPLE"),
    )
    .unwrap();

    assert!(plain.ends_with("Widget_상세페이지.png"));
    assert!(sample.ends_with("Widget_상세페이지_sample.png"));
    let plain = image::open(plain).unwrap().into_rgba8();
    let sample = image::open(sample).unwrap().into_rgba8();
    assert_eq!(plain.dimensions(), sample.dimensions());
    assert_ne!(plain, sample);
}
