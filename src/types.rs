//! Shared types used across all pipeline stages.
//!
//! The page types serialize with camelCase field names and a `type` tag on
//! sections, so a saved session document reads the same as the JSON the web
//! editor used to keep in session storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Colors and font chosen by the user, applied across every section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandGuide {
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub font_family: String,
}

/// Everything the user types into the generation form.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub product_name: String,
    pub description: String,
    /// Comma separated feature keywords, as typed.
    pub features: String,
    pub competitor_url: String,
    /// Uploaded product photos. Carried with the input; generation does not read them.
    pub images: Vec<PathBuf>,
    pub brand_guide: BrandGuide,
}

impl ProductInput {
    /// Feature keywords split on commas, trimmed, empties dropped.
    pub fn feature_list(&self) -> Vec<&str> {
        self.features
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect()
    }
}

// =============================================================================
// AI results
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub competitor_strengths: Vec<String>,
    pub design_elements: Vec<String>,
    /// Section kinds the model proposed; unrecognized keys are dropped.
    #[serde(deserialize_with = "known_section_types")]
    pub suggested_structure: Vec<SectionType>,
    pub target_audience: String,
}

fn known_section_types<'de, D>(deserializer: D) -> Result<Vec<SectionType>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entries = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(entries
        .iter()
        .filter_map(serde_json::Value::as_str)
        .filter_map(|key| key.trim().to_ascii_lowercase().parse().ok())
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiCopy {
    pub hooking_text: String,
    pub sub_texts: Vec<String>,
    pub problem_statements: Vec<String>,
    pub solution_description: String,
    pub feature_descriptions: Vec<FeatureItem>,
    pub cta_text: String,
}

// =============================================================================
// Sections
// =============================================================================

/// The closed set of section kinds a page is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Hero,
    Problem,
    Solution,
    Features,
    Trust,
    Detail,
    Reviews,
    Cta,
}

impl SectionType {
    /// Default section order, used when no category template is chosen.
    pub const DEFAULT_ORDER: [SectionType; 8] = [
        SectionType::Hero,
        SectionType::Problem,
        SectionType::Solution,
        SectionType::Features,
        SectionType::Trust,
        SectionType::Detail,
        SectionType::Reviews,
        SectionType::Cta,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SectionType::Hero => "hero",
            SectionType::Problem => "problem",
            SectionType::Solution => "solution",
            SectionType::Features => "features",
            SectionType::Trust => "trust",
            SectionType::Detail => "detail",
            SectionType::Reviews => "reviews",
            SectionType::Cta => "cta",
        }
    }

    /// Display label shown next to a section in the editor.
    pub fn label(self) -> &'static str {
        match self {
            SectionType::Hero => "히어로",
            SectionType::Problem => "문제 제기",
            SectionType::Solution => "해결책",
            SectionType::Features => "특장점",
            SectionType::Trust => "신뢰 구축",
            SectionType::Detail => "상세 정보",
            SectionType::Reviews => "고객 후기",
            SectionType::Cta => "구매 유도",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionType::DEFAULT_ORDER
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| format!("unknown section type: {s}"))
    }
}

/// Visual properties shared by every section variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionStyle {
    pub background_color: String,
    pub text_color: String,
    pub accent_color: String,
    pub padding: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureItem {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub label: String,
    pub competitor: String,
    pub ours: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustItem {
    pub number: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatisfactionBar {
    pub label: String,
    pub percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub author: String,
    /// Star rating, 0 to 5.
    pub rating: u8,
    pub content: String,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSection {
    pub hooking_text: String,
    pub sub_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub style: SectionStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemSection {
    pub title: String,
    pub problems: Vec<String>,
    pub style: SectionStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionSection {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub comparisons: Vec<ComparisonRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub style: SectionStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturesSection {
    pub title: String,
    pub items: Vec<FeatureItem>,
    pub style: SectionStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustSection {
    pub title: String,
    pub items: Vec<TrustItem>,
    pub badges: Vec<String>,
    #[serde(default)]
    pub satisfaction: Vec<SatisfactionBar>,
    pub style: SectionStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailSection {
    pub title: String,
    pub content: String,
    pub specs: Vec<SpecRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub style: SectionStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsSection {
    pub title: String,
    pub average_rating: f32,
    pub total_reviews: u32,
    pub items: Vec<ReviewItem>,
    pub style: SectionStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaSection {
    pub title: String,
    pub description: String,
    pub button_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_rate: Option<String>,
    pub style: SectionStyle,
}

/// One block of a detail page, tagged by `type` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PageSection {
    Hero(HeroSection),
    Problem(ProblemSection),
    Solution(SolutionSection),
    Features(FeaturesSection),
    Trust(TrustSection),
    Detail(DetailSection),
    Reviews(ReviewsSection),
    Cta(CtaSection),
}

impl PageSection {
    pub fn section_type(&self) -> SectionType {
        match self {
            PageSection::Hero(_) => SectionType::Hero,
            PageSection::Problem(_) => SectionType::Problem,
            PageSection::Solution(_) => SectionType::Solution,
            PageSection::Features(_) => SectionType::Features,
            PageSection::Trust(_) => SectionType::Trust,
            PageSection::Detail(_) => SectionType::Detail,
            PageSection::Reviews(_) => SectionType::Reviews,
            PageSection::Cta(_) => SectionType::Cta,
        }
    }

    pub fn style(&self) -> &SectionStyle {
        match self {
            PageSection::Hero(s) => &s.style,
            PageSection::Problem(s) => &s.style,
            PageSection::Solution(s) => &s.style,
            PageSection::Features(s) => &s.style,
            PageSection::Trust(s) => &s.style,
            PageSection::Detail(s) => &s.style,
            PageSection::Reviews(s) => &s.style,
            PageSection::Cta(s) => &s.style,
        }
    }

    pub fn style_mut(&mut self) -> &mut SectionStyle {
        match self {
            PageSection::Hero(s) => &mut s.style,
            PageSection::Problem(s) => &mut s.style,
            PageSection::Solution(s) => &mut s.style,
            PageSection::Features(s) => &mut s.style,
            PageSection::Trust(s) => &mut s.style,
            PageSection::Detail(s) => &mut s.style,
            PageSection::Reviews(s) => &mut s.style,
            PageSection::Cta(s) => &mut s.style,
        }
    }

    /// The line that best identifies this section in a listing.
    pub fn headline(&self) -> &str {
        match self {
            PageSection::Hero(s) => &s.hooking_text,
            PageSection::Problem(s) => &s.title,
            PageSection::Solution(s) => &s.title,
            PageSection::Features(s) => &s.title,
            PageSection::Trust(s) => &s.title,
            PageSection::Detail(s) => &s.title,
            PageSection::Reviews(s) => &s.title,
            PageSection::Cta(s) => &s.title,
        }
    }
}

/// A generated page: the unit the editor versions and the exporters consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailPage {
    pub id: String,
    pub product_name: String,
    pub brand_guide: BrandGuide,
    pub sections: Vec<PageSection>,
    pub created_at: DateTime<Utc>,
}

impl DetailPage {
    pub fn section_types(&self) -> Vec<SectionType> {
        self.sections.iter().map(PageSection::section_type).collect()
    }
}
