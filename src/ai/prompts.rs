//! Prompt text sent to the models.
//!
//! Text prompts end with the JSON shape the model must return; the field
//! names match [`AiAnalysis`] and [`AiCopy`] so the answer deserializes
//! directly.

use super::ImageSlot;
use crate::types::{AiAnalysis, ProductInput};

pub fn analysis_prompt(competitor_url: &str) -> String {
    format!(
        r#"다음 URL의 상세페이지를 분석해주세요: {competitor_url}

아래 JSON 형식으로만 답하세요:
{{
  "competitorStrengths": ["강점1", "강점2"],
  "designElements": ["디자인 요소1"],
  "suggestedStructure": ["hero","problem","solution","features","trust","detail","reviews","cta"],
  "targetAudience": "타겟 고객 설명"
}}"#
    )
}

pub fn copy_prompt(input: &ProductInput, analysis: Option<&AiAnalysis>) -> String {
    let mut context = format!(
        "제품명: {}\n제품 설명: {}\n주요 특징: {}\n",
        input.product_name, input.description, input.features
    );
    if let Some(analysis) = analysis {
        context.push_str(&format!("타겟 고객: {}\n", analysis.target_audience));
        context.push_str(&format!(
            "경쟁사 강점: {}\n",
            analysis.competitor_strengths.join(", ")
        ));
    }

    format!(
        r#"당신은 최고의 상세페이지 카피라이터입니다.

{context}
위 정보를 바탕으로 판매율을 극대화하는 상세페이지 카피를 아래 JSON 형식으로 작성해주세요:
{{
  "hookingText": "강력한 한 줄 후킹 문구",
  "subTexts": ["서브 카피 1", "서브 카피 2", "서브 카피 3"],
  "problemStatements": ["고객의 문제1", "고객의 문제2", "고객의 문제3"],
  "solutionDescription": "해결책 설명",
  "featureDescriptions": [
    {{"icon": "star", "title": "특장점1", "description": "설명1"}},
    {{"icon": "shield", "title": "특장점2", "description": "설명2"}},
    {{"icon": "zap", "title": "특장점3", "description": "설명3"}}
  ],
  "ctaText": "CTA 버튼 문구"
}}"#
    )
}

pub fn image_prompt(slot: ImageSlot, product_name: &str, description: &str) -> String {
    match slot {
        ImageSlot::Hero => format!(
            "Professional commercial product photography of \"{product_name}\". {description}. \
             Clean white studio background, soft studio lighting, high-end product shot, \
             minimalist composition. 4K quality, photorealistic."
        ),
        ImageSlot::Detail => format!(
            "Close-up detail shot of \"{product_name}\". {description}. \
             Showing texture and craftsmanship, macro product photography, \
             professional lighting, shallow depth of field. 4K quality."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_input;

    #[test]
    fn copy_prompt_includes_product_fields() {
        let prompt = copy_prompt(&sample_input(), None);
        assert!(prompt.contains("제품명: Widget"));
        assert!(prompt.contains("주요 특징: 방수, 경량, 내구성"));
        assert!(!prompt.contains("타겟 고객"));
        assert!(prompt.contains(r#""hookingText""#));
    }

    #[test]
    fn copy_prompt_includes_analysis_when_present() {
        let analysis = crate::ai::fallback::analysis();
        let prompt = copy_prompt(&sample_input(), Some(&analysis));
        assert!(prompt.contains("타겟 고객: 20-40대"));
        assert!(prompt.contains("경쟁사 강점: 직관적인 비주얼 중심 레이아웃, "));
    }

    #[test]
    fn analysis_prompt_mentions_url() {
        let prompt = analysis_prompt("https://example.com/item/1");
        assert!(prompt.contains("https://example.com/item/1"));
        assert!(prompt.contains(r#""suggestedStructure""#));
    }

    #[test]
    fn image_prompts_differ_by_slot() {
        let hero = image_prompt(ImageSlot::Hero, "Widget", "waterproof");
        let detail = image_prompt(ImageSlot::Detail, "Widget", "waterproof");
        assert!(hero.contains("\"Widget\""));
        assert!(hero.contains("studio background"));
        assert!(detail.contains("Close-up"));
        assert_ne!(hero, detail);
    }
}
