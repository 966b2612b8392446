//! Category templates: per-category section order, palette, and default content.
//!
//! Templates are compile-time data. Picking one biases generation: the page
//! follows its section order, the brand palette falls back to its colors, and
//! the non-AI parts of sections (badges, trust numbers, spec rows, pricing)
//! come from its defaults. [`BUILTIN_DEFAULTS`] plays the same role when no
//! category is chosen.
//!
//! Spec values may contain [`PRODUCT_NAME_PLACEHOLDER`], which the page
//! builder replaces with the product name.

use crate::types::SectionType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Token replaced by the product name in template spec values.
pub const PRODUCT_NAME_PLACEHOLDER: &str = "{productName}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    Beauty,
    Health,
    Fashion,
    Electronics,
    Food,
    Lifestyle,
}

impl CategoryId {
    pub const ALL: [CategoryId; 6] = [
        CategoryId::Beauty,
        CategoryId::Health,
        CategoryId::Fashion,
        CategoryId::Electronics,
        CategoryId::Food,
        CategoryId::Lifestyle,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CategoryId::Beauty => "beauty",
            CategoryId::Health => "health",
            CategoryId::Fashion => "fashion",
            CategoryId::Electronics => "electronics",
            CategoryId::Food => "food",
            CategoryId::Lifestyle => "lifestyle",
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CategoryId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryId::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = CategoryId::ALL.iter().map(|c| c.key()).collect();
                format!("unknown category '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
    pub background_color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub label: &'static str,
    pub competitor: &'static str,
    pub ours: &'static str,
}

/// A headline number with its caption, e.g. `("15만+", "누적 판매")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    pub number: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Satisfaction {
    pub label: &'static str,
    pub percentage: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spec {
    pub label: &'static str,
    pub value: &'static str,
}

/// Non-AI content merged into sections by the page builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateDefaults {
    pub badge: &'static str,
    pub social_proof_count: u32,
    pub highlights: &'static [&'static str],
    pub comparisons: &'static [Comparison],
    pub trust_items: &'static [Stat],
    pub badges: &'static [&'static str],
    pub satisfaction_bars: &'static [Satisfaction],
    pub specs: &'static [Spec],
    pub original_price: Option<&'static str>,
    pub sale_price: Option<&'static str>,
    pub discount_rate: Option<&'static str>,
    pub urgency_text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTemplate {
    pub id: CategoryId,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub section_order: &'static [SectionType],
    pub color_palette: ColorPalette,
    pub defaults: TemplateDefaults,
}

/// All category templates, in display order.
pub fn all() -> &'static [CategoryTemplate] {
    &TEMPLATES
}

/// Look up a template by category id.
pub fn get(id: CategoryId) -> &'static CategoryTemplate {
    let index = match id {
        CategoryId::Beauty => 0,
        CategoryId::Health => 1,
        CategoryId::Fashion => 2,
        CategoryId::Electronics => 3,
        CategoryId::Food => 4,
        CategoryId::Lifestyle => 5,
    };
    &TEMPLATES[index]
}

use SectionType::{Cta, Detail, Features, Hero, Problem, Reviews, Solution, Trust};

const fn cmp(label: &'static str, competitor: &'static str, ours: &'static str) -> Comparison {
    Comparison {
        label,
        competitor,
        ours,
    }
}

const fn stat(number: &'static str, label: &'static str) -> Stat {
    Stat { number, label }
}

const fn bar(label: &'static str, percentage: u8) -> Satisfaction {
    Satisfaction { label, percentage }
}

const fn spec(label: &'static str, value: &'static str) -> Spec {
    Spec { label, value }
}

/// Defaults used when the user does not pick a category.
pub const BUILTIN_DEFAULTS: TemplateDefaults = TemplateDefaults {
    badge: "고객 만족 BEST",
    social_proof_count: 10000,
    highlights: &["엄선된 프리미엄 소재", "30일 무조건 환불 보장", "까다로운 품질 검수 통과"],
    comparisons: &[
        cmp("품질 보증", "✕", "✓"),
        cmp("환불 보장", "7일", "30일"),
        cmp("고객 지원", "평일", "연중무휴"),
    ],
    trust_items: &[
        stat("10만+", "누적 판매"),
        stat("4.8", "평균 별점"),
        stat("93%", "재구매율"),
        stat("30일", "환불 보장"),
    ],
    badges: &["무료 배송", "정품 보증", "당일 발송", "무료 반품"],
    satisfaction_bars: &[
        bar("품질 만족도", 95),
        bar("재구매 의향", 91),
        bar("배송 만족도", 93),
        bar("가성비", 89),
    ],
    specs: &[
        spec("제품명", PRODUCT_NAME_PLACEHOLDER),
        spec("소재", "프리미엄"),
        spec("원산지", "국내"),
        spec("보증", "1년"),
    ],
    original_price: None,
    sale_price: None,
    discount_rate: None,
    urgency_text: "한정 수량 특별 할인 진행 중",
};

static TEMPLATES: [CategoryTemplate; 6] = [
    CategoryTemplate {
        id: CategoryId::Beauty,
        name: "뷰티/화장품",
        icon: "💄",
        description: "피부과 추천, EWG 등급, 임상 시험 강조",
        section_order: &[Hero, Problem, Solution, Trust, Features, Detail, Reviews, Cta],
        color_palette: ColorPalette {
            primary_color: "#e91e8c",
            secondary_color: "#f472b6",
            background_color: "#fdf2f8",
        },
        defaults: TemplateDefaults {
            badge: "피부과 전문의 추천",
            social_proof_count: 15200,
            highlights: &["피부과 임상 시험 완료", "EWG 그린 등급", "저자극 인증"],
            comparisons: &[
                cmp("EWG 등급", "옐로우", "그린"),
                cmp("임상 시험", "✕", "완료"),
                cmp("피부과 추천", "✕", "✓"),
            ],
            trust_items: &[
                stat("15만+", "누적 판매"),
                stat("4.9", "평균 별점"),
                stat("97%", "재구매율"),
                stat("48시간", "효과 체감"),
            ],
            badges: &["피부과 추천", "EWG 그린", "무료 반품", "당일 발송"],
            satisfaction_bars: &[
                bar("피부 개선 효과", 96),
                bar("저자극 만족도", 98),
                bar("재구매 의향", 94),
                bar("지인 추천", 92),
            ],
            specs: &[
                spec("제품명", PRODUCT_NAME_PLACEHOLDER),
                spec("용량", "50ml"),
                spec("피부 타입", "모든 피부"),
                spec("EWG 등급", "그린"),
                spec("유통기한", "제조일로부터 24개월"),
            ],
            original_price: Some("68,000원"),
            sale_price: Some("45,900원"),
            discount_rate: Some("32%"),
            urgency_text: "뷰티 특가 오늘 자정 마감",
        },
    },
    CategoryTemplate {
        id: CategoryId::Health,
        name: "건강식품",
        icon: "💊",
        description: "식약처 인증, GMP 제조, 임상 결과 강조",
        section_order: &[Hero, Trust, Problem, Solution, Features, Detail, Reviews, Cta],
        color_palette: ColorPalette {
            primary_color: "#16a34a",
            secondary_color: "#f97316",
            background_color: "#f0fdf4",
        },
        defaults: TemplateDefaults {
            badge: "식약처 인증 건강기능식품",
            social_proof_count: 32400,
            highlights: &["식약처 기능성 인증", "GMP 인증 시설 제조", "인체적용시험 완료"],
            comparisons: &[
                cmp("식약처 인증", "✕", "✓"),
                cmp("GMP 제조", "일부", "전 제품"),
                cmp("원료 함량", "최소 기준", "고함량"),
            ],
            trust_items: &[
                stat("32만+", "누적 판매"),
                stat("4.8", "평균 별점"),
                stat("95%", "재구매율"),
                stat("2주", "효과 체감"),
            ],
            badges: &["식약처 인증", "GMP 제조", "무료 배송", "정품 보증"],
            satisfaction_bars: &[
                bar("건강 개선 체감", 93),
                bar("제품 신뢰도", 97),
                bar("재구매 의향", 92),
                bar("가성비 만족", 90),
            ],
            specs: &[
                spec("제품명", PRODUCT_NAME_PLACEHOLDER),
                spec("내용량", "30정 (1개월분)"),
                spec("섭취 방법", "1일 1회, 1정"),
                spec("인증", "식약처 건강기능식품"),
                spec("제조", "GMP 인증 시설"),
            ],
            original_price: Some("79,000원"),
            sale_price: Some("49,900원"),
            discount_rate: Some("36%"),
            urgency_text: "건강 특가 한정 수량 진행 중",
        },
    },
    CategoryTemplate {
        id: CategoryId::Fashion,
        name: "패션/의류",
        icon: "👗",
        description: "정품 보증, 사이즈 교환, 스타일링 강조",
        section_order: &[Hero, Features, Solution, Detail, Trust, Problem, Reviews, Cta],
        color_palette: ColorPalette {
            primary_color: "#2563eb",
            secondary_color: "#64748b",
            background_color: "#f8fafc",
        },
        defaults: TemplateDefaults {
            badge: "시즌 BEST 아이템",
            social_proof_count: 8900,
            highlights: &["정품 100% 보증", "사이즈 무료 교환", "프리미엄 원단 사용"],
            comparisons: &[
                cmp("정품 보증", "불확실", "100% 정품"),
                cmp("사이즈 교환", "유료", "무료 교환"),
                cmp("원단 품질", "보통", "프리미엄"),
            ],
            trust_items: &[
                stat("8.9만+", "누적 판매"),
                stat("4.7", "평균 별점"),
                stat("89%", "재구매율"),
                stat("무료", "사이즈 교환"),
            ],
            badges: &["정품 보증", "무료 교환", "당일 발송", "선물 포장"],
            satisfaction_bars: &[
                bar("디자인 만족", 95),
                bar("착용감", 92),
                bar("재구매 의향", 88),
                bar("가성비", 86),
            ],
            specs: &[
                spec("제품명", PRODUCT_NAME_PLACEHOLDER),
                spec("소재", "프리미엄 코튼 혼방"),
                spec("사이즈", "S / M / L / XL"),
                spec("세탁", "드라이클리닝 권장"),
                spec("원산지", "국내 제작"),
            ],
            original_price: Some("129,000원"),
            sale_price: Some("89,000원"),
            discount_rate: Some("31%"),
            urgency_text: "시즌 한정 특가 진행 중",
        },
    },
    CategoryTemplate {
        id: CategoryId::Electronics,
        name: "전자기기",
        icon: "📱",
        description: "KC 인증, 1년 AS 보장, 스펙 비교 강조",
        section_order: &[Hero, Features, Detail, Solution, Trust, Problem, Reviews, Cta],
        color_palette: ColorPalette {
            primary_color: "#1d4ed8",
            secondary_color: "#6b7280",
            background_color: "#f9fafb",
        },
        defaults: TemplateDefaults {
            badge: "KC 안전 인증 제품",
            social_proof_count: 6200,
            highlights: &["KC 안전 인증 완료", "1년 무상 AS 보장", "최신 기술 탑재"],
            comparisons: &[
                cmp("KC 인증", "미인증", "인증 완료"),
                cmp("AS 기간", "6개월", "1년 무상"),
                cmp("기술 사양", "보급형", "프리미엄"),
            ],
            trust_items: &[
                stat("6.2만+", "누적 판매"),
                stat("4.8", "평균 별점"),
                stat("91%", "만족도"),
                stat("1년", "무상 AS"),
            ],
            badges: &["KC 인증", "1년 AS", "무료 배송", "정품 등록"],
            satisfaction_bars: &[
                bar("성능 만족", 94),
                bar("내구성", 91),
                bar("가성비", 93),
                bar("디자인", 88),
            ],
            specs: &[
                spec("제품명", PRODUCT_NAME_PLACEHOLDER),
                spec("모델명", "PRO-2024"),
                spec("인증", "KC 안전 인증"),
                spec("보증", "1년 무상 AS"),
                spec("배송", "주문 후 1~2일"),
            ],
            original_price: Some("199,000원"),
            sale_price: Some("149,000원"),
            discount_rate: Some("25%"),
            urgency_text: "얼리버드 특가 한정 수량",
        },
    },
    CategoryTemplate {
        id: CategoryId::Food,
        name: "식품/음료",
        icon: "🍽️",
        description: "HACCP 인증, 원산지 표기, 신선도 강조",
        section_order: &[Hero, Solution, Trust, Features, Detail, Problem, Reviews, Cta],
        color_palette: ColorPalette {
            primary_color: "#15803d",
            secondary_color: "#ca8a04",
            background_color: "#fefce8",
        },
        defaults: TemplateDefaults {
            badge: "HACCP 인증 식품",
            social_proof_count: 21500,
            highlights: &["HACCP 위생 인증", "국내산 원재료 100%", "당일 제조 발송"],
            comparisons: &[
                cmp("HACCP 인증", "미인증", "인증 완료"),
                cmp("원산지", "수입산", "국내산 100%"),
                cmp("보존료", "사용", "무첨가"),
            ],
            trust_items: &[
                stat("21만+", "누적 판매"),
                stat("4.9", "평균 별점"),
                stat("96%", "재구매율"),
                stat("당일", "제조 발송"),
            ],
            badges: &["HACCP 인증", "국내산 원료", "무료 배송", "신선 보장"],
            satisfaction_bars: &[
                bar("맛 만족도", 97),
                bar("신선도", 95),
                bar("재구매 의향", 94),
                bar("가성비", 91),
            ],
            specs: &[
                spec("제품명", PRODUCT_NAME_PLACEHOLDER),
                spec("내용량", "500g"),
                spec("원산지", "국내산"),
                spec("인증", "HACCP"),
                spec("보관", "냉장 보관 (0~10°C)"),
            ],
            original_price: Some("39,000원"),
            sale_price: Some("29,900원"),
            discount_rate: Some("23%"),
            urgency_text: "신선 식품 한정 수량 특가",
        },
    },
    CategoryTemplate {
        id: CategoryId::Lifestyle,
        name: "생활용품",
        icon: "🏠",
        description: "KC 안전 인증, 환경 마크, 실용성 강조",
        section_order: &[Hero, Problem, Solution, Features, Trust, Detail, Reviews, Cta],
        color_palette: ColorPalette {
            primary_color: "#78716c",
            secondary_color: "#a8a29e",
            background_color: "#fafaf9",
        },
        defaults: TemplateDefaults {
            badge: "생활 필수 아이템",
            social_proof_count: 11300,
            highlights: &["KC 안전 인증 완료", "친환경 소재 사용", "인체공학 디자인"],
            comparisons: &[
                cmp("KC 인증", "미인증", "인증 완료"),
                cmp("친환경 인증", "✕", "환경 마크"),
                cmp("내구성", "보통", "3년 이상"),
            ],
            trust_items: &[
                stat("11만+", "누적 판매"),
                stat("4.7", "평균 별점"),
                stat("90%", "재구매율"),
                stat("2년", "품질 보증"),
            ],
            badges: &["KC 인증", "환경 마크", "무료 배송", "무료 반품"],
            satisfaction_bars: &[
                bar("실용성", 94),
                bar("내구성", 92),
                bar("재구매 의향", 89),
                bar("디자인", 87),
            ],
            specs: &[
                spec("제품명", PRODUCT_NAME_PLACEHOLDER),
                spec("소재", "친환경 소재"),
                spec("크기", "표준"),
                spec("인증", "KC 안전 인증"),
                spec("보증", "2년 무상 보증"),
            ],
            original_price: Some("49,000원"),
            sale_price: Some("35,900원"),
            discount_rate: Some("26%"),
            urgency_text: "생활용품 특가 한정 수량",
        },
    },
];
