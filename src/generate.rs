//! Detail page generation pipeline.
//!
//! ```text
//! input ─▶ analyze competitor ─▶ write copy ─▶ generate images ─▶ build page
//!           (only with a URL)                  (when enabled)
//! ```
//!
//! Every AI step resolves to a value (see [`crate::ai::Generated`]), so the
//! only way generation fails is an empty product name. What was substituted
//! is recorded in the [`GenerateReport`] returned alongside the page.
//!
//! Progress is reported as [`GenerateEvent`]s on an optional channel. The
//! sender is dropped when generation returns, which ends the receiver's loop.

use crate::ai::{FallbackReason, GeminiClient, Generated, ImageSet, ImageSlot};
use crate::builder;
use crate::templates::CategoryTemplate;
use crate::types::{DetailPage, ProductInput};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("product name is required")]
    MissingProductName,
}

/// Pipeline stages, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateStep {
    Analyzing,
    Writing,
    Illustrating,
    Designing,
    Finishing,
    Done,
}

impl GenerateStep {
    pub fn percent(self) -> u8 {
        match self {
            GenerateStep::Analyzing => 15,
            GenerateStep::Writing => 40,
            GenerateStep::Illustrating => 55,
            GenerateStep::Designing => 70,
            GenerateStep::Finishing => 95,
            GenerateStep::Done => 100,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            GenerateStep::Analyzing => "경쟁사 페이지를 분석하고 있어요...",
            GenerateStep::Writing => "판매를 극대화하는 문구를 작성 중이에요...",
            GenerateStep::Illustrating => "제품 이미지를 만들고 있어요...",
            GenerateStep::Designing => "상세페이지를 디자인하고 있어요...",
            GenerateStep::Finishing => "마무리 중이에요...",
            GenerateStep::Done => "완성!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateEvent {
    pub step: GenerateStep,
    pub percent: u8,
}

impl From<GenerateStep> for GenerateEvent {
    fn from(step: GenerateStep) -> Self {
        Self {
            step,
            percent: step.percent(),
        }
    }
}

/// How one AI step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Skipped,
    Ai,
    Fallback(FallbackReason),
}

impl<T> From<&Generated<T>> for StepOutcome {
    fn from(generated: &Generated<T>) -> Self {
        match generated.fallback_reason() {
            None => StepOutcome::Ai,
            Some(reason) => StepOutcome::Fallback(reason.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub analysis: StepOutcome,
    pub copy: StepOutcome,
    pub images: StepOutcome,
    /// Slots that received an image.
    pub image_slots: Vec<ImageSlot>,
}

impl GenerateReport {
    pub fn used_fallback(&self) -> bool {
        [&self.analysis, &self.copy, &self.images]
            .iter()
            .any(|o| matches!(o, StepOutcome::Fallback(_)))
    }
}

#[derive(Debug)]
pub struct GenerateOutput {
    pub page: DetailPage,
    pub report: GenerateReport,
}

#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    pub generate_images: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            generate_images: true,
        }
    }
}

/// Run the full pipeline for one product.
pub async fn generate_detail_page(
    client: &GeminiClient,
    input: &ProductInput,
    template: Option<&CategoryTemplate>,
    options: GenerateOptions,
    events: Option<Sender<GenerateEvent>>,
) -> Result<GenerateOutput, GenerateError> {
    if input.product_name.trim().is_empty() {
        return Err(GenerateError::MissingProductName);
    }

    let emit = |step: GenerateStep| {
        if let Some(tx) = &events {
            // receiver gone just means nobody is watching
            tx.send(step.into()).ok();
        }
    };

    emit(GenerateStep::Analyzing);
    let analysis = if input.competitor_url.trim().is_empty() {
        None
    } else {
        Some(client.analyze_competitor(input.competitor_url.trim()).await)
    };

    emit(GenerateStep::Writing);
    let copy = client
        .generate_copy(input, analysis.as_ref().map(Generated::value))
        .await;

    emit(GenerateStep::Illustrating);
    let images = if options.generate_images {
        Some(
            client
                .generate_images(&input.product_name, &input.description)
                .await,
        )
    } else {
        None
    };

    emit(GenerateStep::Designing);
    let image_set = images
        .as_ref()
        .map(|g| g.value().clone())
        .unwrap_or_else(ImageSet::new);
    let page = builder::build_page(input, template, copy.value(), &image_set);

    emit(GenerateStep::Finishing);
    let report = GenerateReport {
        analysis: analysis.as_ref().map_or(StepOutcome::Skipped, StepOutcome::from),
        copy: StepOutcome::from(&copy),
        images: images.as_ref().map_or(StepOutcome::Skipped, StepOutcome::from),
        image_slots: image_set.keys().copied().collect(),
    };

    emit(GenerateStep::Done);
    Ok(GenerateOutput { page, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AiConfig;
    use crate::test_helpers::*;
    use crate::types::{PageSection, SectionType};
    use std::sync::mpsc;

    fn keyless_client() -> GeminiClient {
        let config = AiConfig {
            base_url: "http://127.0.0.1:9/v1beta/models".to_string(),
            ..AiConfig::default()
        };
        GeminiClient::new(&config, None)
    }

    #[tokio::test]
    async fn empty_product_name_is_rejected() {
        let mut input = sample_input();
        input.product_name = "   ".to_string();
        let (tx, rx) = mpsc::channel();

        let err = generate_detail_page(&keyless_client(), &input, None, GenerateOptions::default(), Some(tx))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::MissingProductName));
        // rejected before any progress
        assert!(rx.try_iter().next().is_none());
    }

    #[tokio::test]
    async fn without_key_every_step_falls_back() {
        let mut input = sample_input();
        input.competitor_url = "https://example.com/item".to_string();

        let output = generate_detail_page(&keyless_client(), &input, None, GenerateOptions::default(), None)
            .await
            .unwrap();

        let missing = StepOutcome::Fallback(FallbackReason::MissingApiKey);
        assert_eq!(output.report.analysis, missing);
        assert_eq!(output.report.copy, missing);
        assert_eq!(output.report.images, missing);
        assert!(output.report.image_slots.is_empty());
        assert!(output.report.used_fallback());

        assert_section_types(&output.page, &SectionType::DEFAULT_ORDER);
        let PageSection::Hero(hero) = &output.page.sections[0] else {
            unreachable!()
        };
        assert_eq!(hero.hooking_text, "Widget, 이제 다르게 경험하세요");
        assert_eq!(hero.image_url, None);
    }

    #[tokio::test]
    async fn analysis_and_images_can_be_skipped() {
        let output = generate_detail_page(
            &keyless_client(),
            &sample_input(),
            None,
            GenerateOptions {
                generate_images: false,
            },
            None,
        )
        .await
        .unwrap();
        assert_eq!(output.report.analysis, StepOutcome::Skipped);
        assert_eq!(output.report.images, StepOutcome::Skipped);
    }

    #[tokio::test]
    async fn progress_events_are_monotonic_and_end_at_100() {
        let (tx, rx) = mpsc::channel();
        generate_detail_page(&keyless_client(), &sample_input(), None, GenerateOptions::default(), Some(tx))
            .await
            .unwrap();

        let percents: Vec<u8> = rx.iter().map(|e| e.percent).collect();
        assert_eq!(percents, vec![15, 40, 55, 70, 95, 100]);
    }

    #[tokio::test]
    async fn template_order_applies() {
        let template = crate::templates::get(crate::templates::CategoryId::Health);
        let output = generate_detail_page(
            &keyless_client(),
            &sample_input(),
            Some(template),
            GenerateOptions::default(),
            None,
        )
        .await
        .unwrap();
        assert_section_types(&output.page, template.section_order);
    }

    #[test]
    fn step_messages() {
        assert_eq!(GenerateStep::Done.message(), "완성!");
        let event: GenerateEvent = GenerateStep::Writing.into();
        assert_eq!(event.percent, 40);
    }
}
