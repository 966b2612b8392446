//! Page assembly: AI copy + template defaults + brand palette → [`DetailPage`].
//!
//! Building is synchronous and infallible. Every section gets a fully
//! populated style derived from the brand guide; content the copy does not
//! supply comes from the chosen template's defaults, or from
//! [`BUILTIN_DEFAULTS`] when no category was picked.
//!
//! ## Section Styles
//!
//! ```text
//! hero      primary         / white   / secondary
//! problem   background      / ink     / primary
//! solution  white           / ink     / primary
//! features  background      / ink     / primary
//! trust     primary_light   / ink     / primary_dark
//! detail    white           / ink     / primary
//! reviews   secondary_light / ink     / primary
//! cta       primary_dark    / white   / secondary
//! ```

use crate::ai::{ImageSet, ImageSlot};
use crate::color::{darken, lighten};
use crate::templates::{BUILTIN_DEFAULTS, CategoryTemplate, PRODUCT_NAME_PLACEHOLDER, TemplateDefaults};
use crate::types::{
    AiCopy, BrandGuide, ComparisonRow, CtaSection, DetailPage, DetailSection, FeatureItem,
    FeaturesSection, HeroSection, PageSection, ProblemSection, ProductInput, ReviewItem,
    ReviewsSection, SatisfactionBar, SectionStyle, SectionType, SolutionSection, SpecRow,
    TrustItem, TrustSection,
};
use chrono::Utc;

pub const SECTION_PADDING: &str = "40px 24px";
const INK: &str = "#1a1a2e";
const WHITE: &str = "#ffffff";
const DEFAULT_BACKGROUND: &str = "#f8f9fa";
const DEFAULT_AVERAGE_RATING: f32 = 4.8;
const AVERAGE_RATING_LABEL: &str = "평균 별점";
const FEATURE_ICONS: [&str; 3] = ["star", "shield", "zap"];

/// Brand colors plus the shades derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub primary_dark: String,
    pub primary_light: String,
    pub secondary_light: String,
}

impl Palette {
    pub fn from_brand(brand: &BrandGuide) -> Self {
        let background = if brand.background_color.trim().is_empty() {
            DEFAULT_BACKGROUND.to_string()
        } else {
            brand.background_color.clone()
        };
        Self {
            primary_dark: darken(&brand.primary_color, 15.0),
            primary_light: lighten(&brand.primary_color, 40.0),
            secondary_light: lighten(&brand.secondary_color, 35.0),
            primary: brand.primary_color.clone(),
            secondary: brand.secondary_color.clone(),
            background,
        }
    }
}

/// Replace the brand colors with the template's palette. The font is kept.
pub fn apply_template_palette(brand: &mut BrandGuide, template: &CategoryTemplate) {
    brand.primary_color = template.color_palette.primary_color.to_string();
    brand.secondary_color = template.color_palette.secondary_color.to_string();
    brand.background_color = template.color_palette.background_color.to_string();
}

/// Assemble a page with a fresh id and creation time.
pub fn build_page(
    input: &ProductInput,
    template: Option<&CategoryTemplate>,
    copy: &AiCopy,
    images: &ImageSet,
) -> DetailPage {
    DetailPage {
        id: uuid::Uuid::new_v4().to_string(),
        product_name: input.product_name.clone(),
        brand_guide: input.brand_guide.clone(),
        sections: build_sections(input, template, copy, images),
        created_at: Utc::now(),
    }
}

/// Build one section per type, in the template's order or the default order.
pub fn build_sections(
    input: &ProductInput,
    template: Option<&CategoryTemplate>,
    copy: &AiCopy,
    images: &ImageSet,
) -> Vec<PageSection> {
    let order = template
        .map(|t| t.section_order)
        .unwrap_or(&SectionType::DEFAULT_ORDER);
    let ctx = BuildContext {
        input,
        defaults: template.map(|t| &t.defaults).unwrap_or(&BUILTIN_DEFAULTS),
        copy,
        images,
        palette: Palette::from_brand(&input.brand_guide),
    };
    order.iter().map(|&t| ctx.section(t)).collect()
}

struct BuildContext<'a> {
    input: &'a ProductInput,
    defaults: &'a TemplateDefaults,
    copy: &'a AiCopy,
    images: &'a ImageSet,
    palette: Palette,
}

impl BuildContext<'_> {
    fn section(&self, section_type: SectionType) -> PageSection {
        let p = &self.palette;
        match section_type {
            SectionType::Hero => PageSection::Hero(HeroSection {
                hooking_text: self.copy.hooking_text.clone(),
                sub_text: self.sub_text(0, "수많은 고객이 선택한 이유가 있습니다"),
                badge: Some(self.defaults.badge.to_string()),
                image_url: self.images.get(&ImageSlot::Hero).cloned(),
                style: self.style(&p.primary, WHITE, &p.secondary),
            }),
            SectionType::Problem => PageSection::Problem(ProblemSection {
                title: "이런 고민, 해본 적 있으신가요?".to_string(),
                problems: self.copy.problem_statements.clone(),
                style: self.style(&p.background, INK, &p.primary),
            }),
            SectionType::Solution => PageSection::Solution(SolutionSection {
                title: "해결책을 찾았습니다".to_string(),
                description: self.copy.solution_description.clone(),
                highlights: to_strings(self.defaults.highlights),
                comparisons: self
                    .defaults
                    .comparisons
                    .iter()
                    .map(|c| ComparisonRow {
                        label: c.label.to_string(),
                        competitor: c.competitor.to_string(),
                        ours: c.ours.to_string(),
                    })
                    .collect(),
                image_url: None,
                style: self.style(WHITE, INK, &p.primary),
            }),
            SectionType::Features => PageSection::Features(FeaturesSection {
                title: "왜 선택해야 할까요?".to_string(),
                items: self.feature_items(),
                style: self.style(&p.background, INK, &p.primary),
            }),
            SectionType::Trust => PageSection::Trust(TrustSection {
                title: "숫자로 증명합니다".to_string(),
                items: self
                    .defaults
                    .trust_items
                    .iter()
                    .map(|s| TrustItem {
                        number: s.number.to_string(),
                        label: s.label.to_string(),
                    })
                    .collect(),
                badges: to_strings(self.defaults.badges),
                satisfaction: self
                    .defaults
                    .satisfaction_bars
                    .iter()
                    .map(|b| SatisfactionBar {
                        label: b.label.to_string(),
                        percentage: b.percentage.min(100),
                    })
                    .collect(),
                style: self.style(&p.primary_light, INK, &p.primary_dark),
            }),
            SectionType::Detail => PageSection::Detail(DetailSection {
                title: "상세 정보".to_string(),
                content: self.sub_text(1, "전문가가 인정한 프리미엄 퀄리티"),
                specs: self
                    .defaults
                    .specs
                    .iter()
                    .map(|s| SpecRow {
                        label: s.label.to_string(),
                        value: s
                            .value
                            .replace(PRODUCT_NAME_PLACEHOLDER, &self.input.product_name),
                    })
                    .collect(),
                image_url: self.images.get(&ImageSlot::Detail).cloned(),
                style: self.style(WHITE, INK, &p.primary),
            }),
            SectionType::Reviews => PageSection::Reviews(ReviewsSection {
                title: "실제 고객 후기".to_string(),
                average_rating: self.average_rating(),
                total_reviews: self.defaults.social_proof_count,
                items: sample_reviews(),
                style: self.style(&p.secondary_light, INK, &p.primary),
            }),
            SectionType::Cta => PageSection::Cta(CtaSection {
                title: "지금이 가장 좋은 기회입니다".to_string(),
                description: self.sub_text(2, "한정 수량 특별 할인 진행 중"),
                button_text: non_empty(&self.copy.cta_text, "지금 바로 시작하기"),
                urgency_text: Some(self.defaults.urgency_text.to_string()),
                original_price: self.defaults.original_price.map(str::to_string),
                sale_price: self.defaults.sale_price.map(str::to_string),
                discount_rate: self.defaults.discount_rate.map(str::to_string),
                style: self.style(&p.primary_dark, WHITE, &p.secondary),
            }),
        }
    }

    fn style(&self, background: &str, text: &str, accent: &str) -> SectionStyle {
        SectionStyle {
            background_color: background.to_string(),
            text_color: text.to_string(),
            accent_color: accent.to_string(),
            padding: SECTION_PADDING.to_string(),
            font_family: Some(self.input.brand_guide.font_family.clone())
                .filter(|f| !f.trim().is_empty()),
        }
    }

    fn sub_text(&self, index: usize, default: &str) -> String {
        non_empty(
            self.copy.sub_texts.get(index).map(String::as_str).unwrap_or(""),
            default,
        )
    }

    /// The copy's feature descriptions, or one card per feature keyword when
    /// the copy has none.
    fn feature_items(&self) -> Vec<FeatureItem> {
        if !self.copy.feature_descriptions.is_empty() {
            return self.copy.feature_descriptions.clone();
        }
        self.input
            .feature_list()
            .into_iter()
            .zip(FEATURE_ICONS.iter().cycle())
            .map(|(feature, icon)| FeatureItem {
                icon: icon.to_string(),
                title: feature.to_string(),
                description: format!("{}의 {feature}", self.input.product_name),
            })
            .collect()
    }

    fn average_rating(&self) -> f32 {
        self.defaults
            .trust_items
            .iter()
            .find(|s| s.label == AVERAGE_RATING_LABEL)
            .and_then(|s| s.number.parse::<f32>().ok())
            .unwrap_or(DEFAULT_AVERAGE_RATING)
    }
}

fn sample_reviews() -> Vec<ReviewItem> {
    [
        ("김**", 5, "정말 만족스러워요! 다시 구매할 의향 있습니다."),
        ("이**", 5, "품질이 기대 이상이에요. 강력 추천합니다."),
        ("박**", 4, "배송도 빠르고 제품도 좋아요."),
    ]
    .into_iter()
    .map(|(author, rating, content)| ReviewItem {
        author: author.to_string(),
        rating,
        content: content.to_string(),
        verified: true,
    })
    .collect()
}

fn non_empty(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::fallback;
    use crate::templates::{self, CategoryId};
    use crate::test_helpers::*;

    fn find<'a>(page: &'a DetailPage, t: SectionType) -> &'a PageSection {
        page.sections
            .iter()
            .find(|s| s.section_type() == t)
            .unwrap_or_else(|| panic!("no {t} section"))
    }

    #[test]
    fn default_order_without_template() {
        let page = sample_page();
        assert_section_types(&page, &SectionType::DEFAULT_ORDER);
        assert_eq!(page.product_name, "Widget");
        assert_eq!(page.brand_guide, sample_brand());
    }

    #[test]
    fn fallback_copy_scenario() {
        let copy = fallback::copy("Widget");
        let page = build_page(&sample_input(), None, &copy, &ImageSet::new());

        assert_section_types(&page, &SectionType::DEFAULT_ORDER);
        let PageSection::Hero(hero) = find(&page, SectionType::Hero) else {
            unreachable!()
        };
        assert_eq!(hero.hooking_text, copy.hooking_text);
        let PageSection::Detail(detail) = find(&page, SectionType::Detail) else {
            unreachable!()
        };
        assert!(
            detail
                .specs
                .iter()
                .any(|s| s.label == "제품명" && s.value == "Widget")
        );
    }

    #[test]
    fn template_order_is_followed() {
        for template in templates::all() {
            let sections = build_sections(&sample_input(), Some(template), &sample_copy(), &ImageSet::new());
            let types: Vec<SectionType> = sections.iter().map(PageSection::section_type).collect();
            assert_eq!(types, template.section_order, "{}", template.id);
        }
    }

    #[test]
    fn placeholders_are_substituted() {
        for template in templates::all() {
            let sections = build_sections(&sample_input(), Some(template), &sample_copy(), &ImageSet::new());
            let json = serde_json::to_string(&sections).unwrap();
            assert!(!json.contains(PRODUCT_NAME_PLACEHOLDER), "{}", template.id);
        }
    }

    #[test]
    fn every_style_is_fully_populated() {
        let page = sample_page();
        for section in &page.sections {
            let style = section.style();
            assert!(crate::color::parse_hex(&style.background_color).is_some());
            assert!(crate::color::parse_hex(&style.text_color).is_some());
            assert!(crate::color::parse_hex(&style.accent_color).is_some());
            assert_eq!(style.padding, SECTION_PADDING);
            assert_eq!(style.font_family.as_deref(), Some("Pretendard"));
        }
    }

    #[test]
    fn sub_texts_map_to_hero_detail_and_cta() {
        let page = sample_page();
        let PageSection::Hero(hero) = find(&page, SectionType::Hero) else {
            unreachable!()
        };
        let PageSection::Detail(detail) = find(&page, SectionType::Detail) else {
            unreachable!()
        };
        let PageSection::Cta(cta) = find(&page, SectionType::Cta) else {
            unreachable!()
        };
        assert_eq!(hero.sub_text, "Hero sub");
        assert_eq!(detail.content, "Detail sub");
        assert_eq!(cta.description, "CTA sub");
        assert_eq!(cta.button_text, "Buy now");
    }

    #[test]
    fn missing_sub_texts_use_defaults() {
        let mut copy = sample_copy();
        copy.sub_texts = vec!["only hero".to_string(), "  ".to_string()];
        let sections = build_sections(&sample_input(), None, &copy, &ImageSet::new());
        let page_json = serde_json::to_value(&sections).unwrap();
        assert_eq!(page_json[0]["subText"], "only hero");
        assert_eq!(page_json[5]["content"], "전문가가 인정한 프리미엄 퀄리티");
        assert_eq!(page_json[7]["description"], "한정 수량 특별 할인 진행 중");
    }

    #[test]
    fn images_land_in_hero_and_detail() {
        let mut images = ImageSet::new();
        images.insert(ImageSlot::Hero, "data:image/png;base64,HERO".to_string());
        images.insert(ImageSlot::Detail, "data:image/png;base64,DETAIL".to_string());
        let page = build_page(&sample_input(), None, &sample_copy(), &images);

        let PageSection::Hero(hero) = find(&page, SectionType::Hero) else {
            unreachable!()
        };
        let PageSection::Detail(detail) = find(&page, SectionType::Detail) else {
            unreachable!()
        };
        assert_eq!(hero.image_url.as_deref(), Some("data:image/png;base64,HERO"));
        assert_eq!(detail.image_url.as_deref(), Some("data:image/png;base64,DETAIL"));
    }

    #[test]
    fn template_defaults_fill_trust_reviews_and_pricing() {
        let template = templates::get(CategoryId::Beauty);
        let mut input = sample_input();
        apply_template_palette(&mut input.brand_guide, template);
        let page = build_page(&input, Some(template), &sample_copy(), &ImageSet::new());

        let PageSection::Reviews(reviews) = find(&page, SectionType::Reviews) else {
            unreachable!()
        };
        assert_eq!(reviews.average_rating, 4.9);
        assert_eq!(reviews.total_reviews, 15200);
        assert_eq!(reviews.items.len(), 3);

        let PageSection::Cta(cta) = find(&page, SectionType::Cta) else {
            unreachable!()
        };
        assert_eq!(cta.sale_price.as_deref(), Some("45,900원"));
        assert_eq!(cta.urgency_text.as_deref(), Some("뷰티 특가 오늘 자정 마감"));

        let PageSection::Hero(hero) = find(&page, SectionType::Hero) else {
            unreachable!()
        };
        assert_eq!(hero.badge.as_deref(), Some("피부과 전문의 추천"));
        assert_eq!(hero.style.background_color, "#e91e8c");
    }

    #[test]
    fn builtin_defaults_have_no_pricing() {
        let page = sample_page();
        let PageSection::Cta(cta) = find(&page, SectionType::Cta) else {
            unreachable!()
        };
        assert_eq!(cta.original_price, None);
        assert_eq!(cta.sale_price, None);
        let PageSection::Reviews(reviews) = find(&page, SectionType::Reviews) else {
            unreachable!()
        };
        assert_eq!(reviews.average_rating, 4.8);
    }

    #[test]
    fn palette_derivations() {
        let palette = Palette::from_brand(&sample_brand());
        assert_eq!(palette.primary_dark, darken("#7c3aed", 15.0));
        assert_eq!(palette.primary_light, lighten("#7c3aed", 40.0));
        assert_eq!(palette.secondary_light, lighten("#3b82f6", 35.0));

        let hero_and_cta: Vec<String> = sample_page()
            .sections
            .iter()
            .filter(|s| matches!(s.section_type(), SectionType::Hero | SectionType::Cta))
            .map(|s| s.style().background_color.clone())
            .collect();
        assert_eq!(hero_and_cta, vec!["#7c3aed".to_string(), palette.primary_dark]);
    }

    #[test]
    fn empty_background_uses_default() {
        let mut brand = sample_brand();
        brand.background_color = String::new();
        assert_eq!(Palette::from_brand(&brand).background, "#f8f9fa");
    }

    #[test]
    fn feature_keywords_fill_in_when_copy_has_none() {
        let mut copy = sample_copy();
        copy.feature_descriptions.clear();
        let sections = build_sections(&sample_input(), None, &copy, &ImageSet::new());
        let PageSection::Features(features) = &sections[3] else {
            unreachable!()
        };
        let titles: Vec<&str> = features.items.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["방수", "경량", "내구성"]);
        assert_eq!(features.items[2].icon, "zap");
    }

    #[test]
    fn pages_get_distinct_ids() {
        assert_ne!(sample_page().id, sample_page().id);
    }
}
