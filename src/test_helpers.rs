//! Shared test fixtures.
//!
//! Builds the same small product ("Widget") everywhere so assertions across
//! modules can refer to known copy and section order.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let page = sample_page();
//! assert_section_types(&page, &SectionType::DEFAULT_ORDER);
//! ```

use crate::ai::ImageSet;
use crate::builder;
use crate::types::{AiCopy, BrandGuide, DetailPage, FeatureItem, ProductInput, SectionType};

// =========================================================================
// Inputs
// =========================================================================

pub fn sample_brand() -> BrandGuide {
    BrandGuide {
        primary_color: "#7c3aed".to_string(),
        secondary_color: "#3b82f6".to_string(),
        background_color: "#f8f9fa".to_string(),
        font_family: "Pretendard".to_string(),
    }
}

pub fn sample_input() -> ProductInput {
    ProductInput {
        product_name: "Widget".to_string(),
        description: "A waterproof everyday widget".to_string(),
        features: "방수, 경량, 내구성".to_string(),
        competitor_url: String::new(),
        images: vec![],
        brand_guide: sample_brand(),
    }
}

/// Copy with distinct, recognizable strings in every slot.
pub fn sample_copy() -> AiCopy {
    AiCopy {
        hooking_text: "Widget, everyday carry reinvented".to_string(),
        sub_texts: vec![
            "Hero sub".to_string(),
            "Detail sub".to_string(),
            "CTA sub".to_string(),
        ],
        problem_statements: vec!["Leaks".to_string(), "Too heavy".to_string()],
        solution_description: "Widget fixes both.".to_string(),
        feature_descriptions: vec![
            FeatureItem {
                icon: "star".to_string(),
                title: "Waterproof".to_string(),
                description: "IP68 sealed".to_string(),
            },
            FeatureItem {
                icon: "zap".to_string(),
                title: "Light".to_string(),
                description: "Only 90 g".to_string(),
            },
        ],
        cta_text: "Buy now".to_string(),
    }
}

// =========================================================================
// Pages
// =========================================================================

/// A page built from [`sample_input`] and [`sample_copy`] with no template and no images.
pub fn sample_page() -> DetailPage {
    builder::build_page(&sample_input(), None, &sample_copy(), &ImageSet::new())
}

// =========================================================================
// Assertions
// =========================================================================

pub fn assert_section_types(page: &DetailPage, expected: &[SectionType]) {
    assert_eq!(
        page.section_types(),
        expected,
        "section order of page '{}'",
        page.product_name
    );
}
