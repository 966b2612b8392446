//! Section rendering.
//!
//! One function per section variant, chosen by an exhaustive match, each
//! producing self-contained markup with inline styles computed from the
//! section's [`SectionStyle`]. The same markup serves the edit preview and
//! the exports; [`RenderMode`] only decides whether the editing frame
//! (index label, selection outline) is drawn around each section.
//!
//! All text goes through maud interpolation and is escaped.

use crate::types::{
    CtaSection, DetailPage, DetailSection, FeaturesSection, HeroSection, PageSection,
    ProblemSection, ReviewsSection, SectionStyle, SolutionSection, TrustSection,
};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const PAGE_CSS: &str = include_str!("../static/page.css");
const EDITOR_CSS: &str = include_str!("../static/editor.css");

/// Id of the element wrapping all sections; the image exporter captures it.
pub const PAGE_CONTAINER_ID: &str = "detail-page";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Editing preview: sections are framed, labelled, and indexed.
    Edit { selected: Option<usize> },
    /// Final output: sections only.
    Export,
}

/// A complete HTML document for the page.
pub fn render_document(page: &DetailPage, mode: RenderMode) -> Markup {
    let mut css = format!(
        "{PAGE_CSS}\nbody {{ font-family: {}; }}\n",
        font_stack(&page.brand_guide.font_family)
    );
    if matches!(mode, RenderMode::Edit { .. }) {
        css.push_str(EDITOR_CSS);
    }
    let title = format!("{} - 상세페이지", page.product_name);
    base_document(&title, &css, render_page(page, mode))
}

/// The `#detail-page` container with every section in order.
pub fn render_page(page: &DetailPage, mode: RenderMode) -> Markup {
    html! {
        div id=(PAGE_CONTAINER_ID) {
            @for (index, section) in page.sections.iter().enumerate() {
                @match mode {
                    RenderMode::Export => (render_section(section)),
                    RenderMode::Edit { selected } => {
                        div.section-frame.selected[selected == Some(index)]
                            data-section-index=(index)
                            data-section-type=(section.section_type().key()) {
                            span.section-label {
                                (index) ". " (section.section_type().label())
                            }
                            (render_section(section))
                        }
                    }
                }
            }
        }
    }
}

pub fn render_section(section: &PageSection) -> Markup {
    match section {
        PageSection::Hero(s) => render_hero(s),
        PageSection::Problem(s) => render_problem(s),
        PageSection::Solution(s) => render_solution(s),
        PageSection::Features(s) => render_features(s),
        PageSection::Trust(s) => render_trust(s),
        PageSection::Detail(s) => render_detail(s),
        PageSection::Reviews(s) => render_reviews(s),
        PageSection::Cta(s) => render_cta(s),
    }
}

fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ko" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                // css is assembled from static files and a sanitized font name
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

// ============================================================================
// Style helpers
// ============================================================================

/// CSS font stack with the brand font first. Characters that could end the
/// declaration or the `<style>` element are dropped from the name.
pub fn font_stack(font_family: &str) -> String {
    let name: String = font_family
        .chars()
        .filter(|c| !matches!(c, '\'' | '"' | '\\' | ';' | '{' | '}' | '<' | '>'))
        .collect();
    let name = name.trim();
    if name.is_empty() {
        "-apple-system, sans-serif".to_string()
    } else {
        format!("'{name}', -apple-system, sans-serif")
    }
}

fn section_style(style: &SectionStyle) -> String {
    let mut css = format!(
        "background-color:{};color:{};padding:{};",
        style.background_color, style.text_color, style.padding
    );
    push_font(&mut css, style);
    css
}

/// Diagonal gradient from the background to the accent, the accent made
/// translucent with a two-digit hex alpha.
fn gradient_style(style: &SectionStyle, alpha: &str) -> String {
    let mut css = format!(
        "background:linear-gradient(135deg,{},{}{});color:{};padding:{};text-align:center;",
        style.background_color, style.accent_color, alpha, style.text_color, style.padding
    );
    push_font(&mut css, style);
    css
}

fn push_font(css: &mut String, style: &SectionStyle) {
    if let Some(font) = &style.font_family {
        css.push_str(&format!("font-family:{};", font_stack(font)));
    }
}

const H2: &str = "font-size:20px;font-weight:700;line-height:1.4;margin-bottom:20px;";
const CARD: &str = "padding:20px;margin-bottom:12px;border-radius:16px;background:#ffffff;box-shadow:0 1px 3px rgba(0,0,0,0.06);";
const IMAGE: &str = "width:100%;border-radius:16px;margin-top:24px;";

fn feature_icon(icon: &str) -> &'static str {
    match icon {
        "shield" => "🛡",
        "zap" => "⚡",
        _ => "★",
    }
}

fn stars(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// `15200` → `15,200`
fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ============================================================================
// Sections
// ============================================================================

fn render_hero(s: &HeroSection) -> Markup {
    html! {
        section.hero style={ (gradient_style(&s.style, "dd")) "padding-top:60px;padding-bottom:60px;" } {
            @if let Some(badge) = &s.badge {
                span style="display:inline-block;padding:6px 14px;margin-bottom:16px;border-radius:999px;font-size:12px;font-weight:700;background:rgba(255,255,255,0.2);" {
                    (badge)
                }
            }
            h1 style="font-size:28px;font-weight:800;line-height:1.3;margin-bottom:12px;" { (s.hooking_text) }
            p style="font-size:15px;opacity:0.9;line-height:1.6;" { (s.sub_text) }
            @if let Some(url) = &s.image_url {
                img src=(url) alt=(s.hooking_text) style=(IMAGE);
            }
        }
    }
}

fn render_problem(s: &ProblemSection) -> Markup {
    html! {
        section.problem style=(section_style(&s.style)) {
            h2 style=(H2) { (s.title) }
            @for problem in &s.problems {
                div style="display:flex;gap:12px;align-items:flex-start;padding:16px;margin-bottom:12px;border-radius:12px;background:rgba(255,255,255,0.6);" {
                    span style={ "flex-shrink:0;font-weight:800;color:" (s.style.accent_color) ";" } { "!" }
                    p style="font-size:14px;line-height:1.6;" { (problem) }
                }
            }
        }
    }
}

fn render_solution(s: &SolutionSection) -> Markup {
    html! {
        section.solution style=(section_style(&s.style)) {
            h2 style=(H2) {
                span style={ "color:" (s.style.accent_color) ";margin-right:8px;" } { "✓" }
                (s.title)
            }
            p style="font-size:14px;line-height:1.7;opacity:0.8;" { (s.description) }
            @if !s.highlights.is_empty() {
                ul style="list-style:none;margin-top:20px;" {
                    @for highlight in &s.highlights {
                        li style="font-size:14px;font-weight:600;padding:6px 0;" {
                            span style={ "color:" (s.style.accent_color) ";margin-right:8px;" } { "✓" }
                            (highlight)
                        }
                    }
                }
            }
            @if !s.comparisons.is_empty() {
                table style="margin-top:24px;font-size:13px;text-align:center;" {
                    thead {
                        tr style="border-bottom:2px solid #eeeeee;" {
                            th style="padding:10px;text-align:left;opacity:0.6;" { "항목" }
                            th style="padding:10px;opacity:0.6;" { "일반 제품" }
                            th style={ "padding:10px;color:" (s.style.accent_color) ";" } { "우리 제품" }
                        }
                    }
                    tbody {
                        @for row in &s.comparisons {
                            tr style="border-bottom:1px solid #eeeeee;" {
                                td style="padding:10px;text-align:left;" { (row.label) }
                                td style="padding:10px;opacity:0.5;" { (row.competitor) }
                                td style={ "padding:10px;font-weight:700;color:" (s.style.accent_color) ";" } { (row.ours) }
                            }
                        }
                    }
                }
            }
            @if let Some(url) = &s.image_url {
                img src=(url) alt=(s.title) style=(IMAGE);
            }
        }
    }
}

fn render_features(s: &FeaturesSection) -> Markup {
    html! {
        section.features style=(section_style(&s.style)) {
            h2 style={ (H2) "text-align:center;" } { (s.title) }
            @for item in &s.items {
                div style=(CARD) {
                    div style="display:flex;align-items:center;gap:12px;margin-bottom:8px;" {
                        span style={
                            "display:inline-flex;width:40px;height:40px;align-items:center;justify-content:center;border-radius:12px;"
                            "background-color:" (s.style.accent_color) "15;color:" (s.style.accent_color) ";"
                        } {
                            (feature_icon(&item.icon))
                        }
                        h3 style="font-size:16px;font-weight:700;" { (item.title) }
                    }
                    p style="font-size:13px;line-height:1.6;opacity:0.7;padding-left:52px;" { (item.description) }
                }
            }
        }
    }
}

fn render_trust(s: &TrustSection) -> Markup {
    html! {
        section.trust style={ (section_style(&s.style)) "text-align:center;" } {
            h2 style=(H2) { (s.title) }
            div style="display:grid;grid-template-columns:1fr 1fr;gap:12px;" {
                @for item in &s.items {
                    div style="padding:20px 12px;border-radius:16px;background:rgba(255,255,255,0.7);" {
                        div style={ "font-size:26px;font-weight:800;color:" (s.style.accent_color) ";" } { (item.number) }
                        div style="font-size:12px;opacity:0.7;margin-top:4px;" { (item.label) }
                    }
                }
            }
            @if !s.badges.is_empty() {
                div style="display:flex;flex-wrap:wrap;justify-content:center;gap:8px;margin-top:20px;" {
                    @for badge in &s.badges {
                        span style={ "padding:6px 12px;border-radius:999px;font-size:12px;font-weight:600;background:#ffffff;color:" (s.style.accent_color) ";" } {
                            (badge)
                        }
                    }
                }
            }
            @if !s.satisfaction.is_empty() {
                div style="margin-top:24px;text-align:left;" {
                    @for bar in &s.satisfaction {
                        @let pct = bar.percentage.min(100);
                        div style="margin-bottom:12px;" {
                            div style="display:flex;justify-content:space-between;font-size:13px;margin-bottom:4px;" {
                                span { (bar.label) }
                                strong { (pct) "%" }
                            }
                            div style="height:8px;border-radius:4px;background:rgba(0,0,0,0.08);" {
                                div style={ "height:8px;border-radius:4px;width:" (pct) "%;background:" (s.style.accent_color) ";" } {}
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_detail(s: &DetailSection) -> Markup {
    html! {
        section.detail style=(section_style(&s.style)) {
            h2 style=(H2) { (s.title) }
            p style="font-size:14px;line-height:1.7;opacity:0.8;" { (s.content) }
            @if let Some(url) = &s.image_url {
                img src=(url) alt=(s.title) style=(IMAGE);
            }
            @if !s.specs.is_empty() {
                table style="margin-top:24px;font-size:14px;" {
                    @for spec in &s.specs {
                        tr {
                            td style="padding:12px;border-bottom:1px solid #eeeeee;opacity:0.6;" { (spec.label) }
                            td style="padding:12px;border-bottom:1px solid #eeeeee;font-weight:700;text-align:right;" { (spec.value) }
                        }
                    }
                }
            }
        }
    }
}

fn render_reviews(s: &ReviewsSection) -> Markup {
    html! {
        section.reviews style=(section_style(&s.style)) {
            h2 style=(H2) { (s.title) }
            div style="display:flex;align-items:baseline;gap:8px;margin-bottom:20px;" {
                span style="font-size:28px;font-weight:800;color:#f5a623;" { "★ " (format!("{:.1}", s.average_rating)) }
                span style="font-size:13px;opacity:0.6;" { (group_thousands(s.total_reviews)) "개 리뷰" }
            }
            @for review in &s.items {
                div style=(CARD) {
                    div style="display:flex;justify-content:space-between;align-items:center;margin-bottom:8px;" {
                        strong style="font-size:14px;" {
                            (review.author)
                            @if review.verified {
                                span style={ "margin-left:6px;font-size:11px;font-weight:600;color:" (s.style.accent_color) ";" } { "구매 인증" }
                            }
                        }
                        span style="color:#f5a623;letter-spacing:1px;" { (stars(review.rating)) }
                    }
                    p style="font-size:13px;line-height:1.6;opacity:0.7;" { (review.content) }
                }
            }
        }
    }
}

fn render_cta(s: &CtaSection) -> Markup {
    html! {
        section.cta style={ (gradient_style(&s.style, "cc")) "padding-top:60px;padding-bottom:60px;" } {
            h2 style="font-size:24px;font-weight:800;margin-bottom:12px;" { (s.title) }
            p style="font-size:14px;opacity:0.9;line-height:1.6;margin-bottom:24px;" { (s.description) }
            @if s.sale_price.is_some() || s.original_price.is_some() {
                div style="margin-bottom:24px;" {
                    @if let Some(original) = &s.original_price {
                        div style="font-size:14px;opacity:0.7;text-decoration:line-through;" { (original) }
                    }
                    div style="font-size:28px;font-weight:800;" {
                        @if let Some(rate) = &s.discount_rate {
                            span style="color:#ffd43b;margin-right:8px;" { (rate) }
                        }
                        @if let Some(sale) = &s.sale_price {
                            (sale)
                        }
                    }
                }
            }
            a style="display:inline-block;padding:16px 32px;border-radius:16px;background:#ffffff;color:#1a1a2e;font-weight:700;text-decoration:none;" {
                (s.button_text)
            }
            @if let Some(urgency) = &s.urgency_text {
                p style="font-size:12px;opacity:0.85;margin-top:16px;" { (urgency) }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::types::SectionType;

    fn section_of(page: &DetailPage, t: SectionType) -> &PageSection {
        page.sections.iter().find(|s| s.section_type() == t).unwrap()
    }

    #[test]
    fn document_has_korean_lang_title_and_font() {
        let doc = render_document(&sample_page(), RenderMode::Export).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(r#"<html lang="ko">"#));
        assert!(doc.contains("<title>Widget - 상세페이지</title>"));
        assert!(doc.contains("font-family: 'Pretendard', -apple-system, sans-serif;"));
        assert!(doc.contains("max-width: 480px"));
    }

    #[test]
    fn page_container_holds_every_section() {
        let page = sample_page();
        let html = render_page(&page, RenderMode::Export).into_string();
        assert!(html.starts_with(r#"<div id="detail-page">"#));
        for class in ["hero", "problem", "solution", "features", "trust", "detail", "reviews", "cta"] {
            assert!(html.contains(&format!(r#"<section class="{class}""#)), "{class}");
        }
    }

    #[test]
    fn export_mode_hides_editing_frame() {
        let doc = render_document(&sample_page(), RenderMode::Export).into_string();
        assert!(!doc.contains("section-label"));
        assert!(!doc.contains("data-section-index"));
        assert!(!doc.contains(".section-frame"));
    }

    #[test]
    fn edit_mode_labels_and_marks_selection() {
        let html = render_page(&sample_page(), RenderMode::Edit { selected: Some(2) }).into_string();
        assert!(html.contains(r#"data-section-index="0""#));
        assert!(html.contains(r#"data-section-index="7""#));
        assert!(html.contains("0. 히어로"));
        assert!(html.contains("7. 구매 유도"));
        assert_eq!(html.matches(r#"class="section-frame selected""#).count(), 1);
        let frames: Vec<&str> = html.split(r#"<div class="section-frame"#).skip(1).collect();
        assert_eq!(frames.len(), 8);
        assert!(frames[2].starts_with(r#" selected""#));
        assert!(frames[2].contains(r#"data-section-index="2""#));
    }

    #[test]
    fn edit_mode_without_selection() {
        let html = render_page(&sample_page(), RenderMode::Edit { selected: None }).into_string();
        assert!(!html.contains("selected"));
        assert_eq!(html.matches("section-label").count(), 8);
    }

    #[test]
    fn inline_styles_come_from_section_style() {
        let page = sample_page();
        let problem = section_of(&page, SectionType::Problem);
        let html = render_section(problem).into_string();
        assert!(html.contains("background-color:#f8f9fa;color:#1a1a2e;padding:40px 24px;"));
    }

    #[test]
    fn hero_and_cta_use_translucent_accent_gradients() {
        let page = sample_page();
        let hero = render_section(section_of(&page, SectionType::Hero)).into_string();
        assert!(hero.contains("linear-gradient(135deg,#7c3aed,#3b82f6dd)"));
        let cta = render_section(section_of(&page, SectionType::Cta)).into_string();
        assert!(cta.contains("#3b82f6cc)"));
        assert!(cta.contains("Buy now"));
    }

    #[test]
    fn content_is_escaped() {
        let mut page = sample_page();
        if let PageSection::Hero(hero) = &mut page.sections[0] {
            hero.hooking_text = "<script>alert('x')</script>".to_string();
        }
        let html = render_page(&page, RenderMode::Export).into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn font_names_cannot_break_out_of_css() {
        assert_eq!(font_stack("Noto Sans KR"), "'Noto Sans KR', -apple-system, sans-serif");
        assert_eq!(
            font_stack("x'; } </style><script>"),
            "'x  /stylescript', -apple-system, sans-serif"
        );
        assert_eq!(font_stack("  "), "-apple-system, sans-serif");
    }

    #[test]
    fn reviews_show_stars_and_grouped_count() {
        let page = sample_page();
        let html = render_section(section_of(&page, SectionType::Reviews)).into_string();
        assert!(html.contains("★ 4.8"));
        assert!(html.contains("10,000개 리뷰"));
        assert!(html.contains("★★★★☆"));
        assert!(html.contains("구매 인증"));
    }

    #[test]
    fn detail_renders_spec_rows() {
        let page = sample_page();
        let html = render_section(section_of(&page, SectionType::Detail)).into_string();
        assert!(html.contains("제품명"));
        assert!(html.contains(">Widget<"));
    }

    #[test]
    fn images_render_when_present() {
        let mut page = sample_page();
        if let PageSection::Hero(hero) = &mut page.sections[0] {
            hero.image_url = Some("data:image/png;base64,AAAA".to_string());
        }
        let html = render_section(&page.sections[0]).into_string();
        assert!(html.contains(r#"src="data:image/png;base64,AAAA""#));
    }

    #[test]
    fn helpers() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(15200), "15,200");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(stars(9), "★★★★★");
        assert_eq!(feature_icon("unknown"), "★");
    }
}
