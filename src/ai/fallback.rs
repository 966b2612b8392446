//! Fixed content substituted when an AI call yields nothing usable.

use crate::types::{AiAnalysis, AiCopy, FeatureItem, SectionType};

pub fn analysis() -> AiAnalysis {
    AiAnalysis {
        competitor_strengths: strings(&[
            "직관적인 비주얼 중심 레이아웃",
            "사회적 증거(리뷰) 적극 활용",
            "문제-해결 구조의 스토리텔링",
        ]),
        design_elements: strings(&[
            "풀스크린 히어로 이미지",
            "아이콘 기반 특장점 나열",
            "별점 리뷰 섹션",
            "그라데이션 CTA 버튼",
        ]),
        suggested_structure: SectionType::DEFAULT_ORDER.to_vec(),
        target_audience: "20-40대 온라인 쇼핑에 익숙한 소비자".to_string(),
    }
}

/// Generic sales copy mentioning `product_name` in the hook and solution.
pub fn copy(product_name: &str) -> AiCopy {
    AiCopy {
        hooking_text: format!("{product_name}, 이제 다르게 경험하세요"),
        sub_texts: strings(&[
            "수많은 고객이 선택한 이유가 있습니다",
            "전문가가 인정한 프리미엄 퀄리티",
            "지금 바로 변화를 시작하세요",
        ]),
        problem_statements: strings(&[
            "비슷한 제품을 써봤지만 효과가 없으셨나요?",
            "품질은 좋은데 가격이 부담스러우셨나요?",
            "어떤 제품을 선택해야 할지 고민되시나요?",
        ]),
        solution_description: format!(
            "{product_name}은(는) 이 모든 고민을 한 번에 해결합니다. \
             수백 번의 테스트와 고객 피드백을 반영하여 완성된 최적의 솔루션입니다."
        ),
        feature_descriptions: vec![
            feature(
                "star",
                "프리미엄 품질",
                "엄선된 소재와 검증된 공정으로 만들어진 최상의 품질을 경험하세요.",
            ),
            feature(
                "shield",
                "안심 보장",
                "30일 무조건 환불 보장. 만족하지 않으시면 전액 환불해드립니다.",
            ),
            feature(
                "zap",
                "빠른 효과",
                "사용 즉시 체감할 수 있는 확실한 변화를 느껴보세요.",
            ),
        ],
        cta_text: "지금 바로 시작하기".to_string(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn feature(icon: &str, title: &str, description: &str) -> FeatureItem {
    FeatureItem {
        icon: icon.to_string(),
        title: title.to_string(),
        description: description.to_string(),
    }
}
