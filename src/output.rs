//! CLI output formatting.
//!
//! Sections are identified by their position in the page, the same index
//! every editing command takes. The page outline lists them with their type
//! label and headline; `>` marks the selected section.
//!
//! # Output Format
//!
//! ## Generate
//!
//! ```text
//! [ 15%] 경쟁사 페이지를 분석하고 있어요...
//! [ 40%] 판매를 극대화하는 문구를 작성 중이에요...
//! ...
//! [100%] 완성!
//!
//! Widget (8 sections)
//!     Analysis: skipped
//!     Copy: AI
//!     Images: fallback (no API key configured)
//! ```
//!
//! ## Page outline
//!
//! ```text
//! Widget (8 sections)
//!    0 히어로: Widget, 이제 다르게 경험하세요
//! >  1 문제 제기: 이런 고민 있으셨나요?
//!    ...
//! History 2/3 (undo, redo)
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::editor::Editor;
use crate::generate::{GenerateEvent, GenerateOutput, StepOutcome};
use crate::templates::CategoryTemplate;
use crate::types::{DetailPage, PageSection};

const HEADLINE_WIDTH: usize = 40;

// ============================================================================
// Shared helpers
// ============================================================================

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn page_header(page: &DetailPage) -> String {
    format!("{} ({} sections)", page.product_name, page.sections.len())
}

fn outcome_label(outcome: &StepOutcome) -> String {
    match outcome {
        StepOutcome::Skipped => "skipped".to_string(),
        StepOutcome::Ai => "AI".to_string(),
        StepOutcome::Fallback(reason) => format!("fallback ({reason})"),
    }
}

// ============================================================================
// Generate
// ============================================================================

/// One progress line.
pub fn format_generate_event(event: &GenerateEvent) -> Vec<String> {
    vec![format!("[{:>3}%] {}", event.percent, event.step.message())]
}

/// Summary after generation: the page and how each AI step resolved.
pub fn format_generate_output(output: &GenerateOutput) -> Vec<String> {
    let report = &output.report;
    let mut lines = vec![page_header(&output.page)];
    lines.push(format!("{}Analysis: {}", indent(1), outcome_label(&report.analysis)));
    lines.push(format!("{}Copy: {}", indent(1), outcome_label(&report.copy)));
    lines.push(format!("{}Images: {}", indent(1), outcome_label(&report.images)));
    if !report.image_slots.is_empty() {
        let slots: Vec<String> = report.image_slots.iter().map(|s| s.to_string()).collect();
        lines.push(format!("{}Image slots: {}", indent(1), slots.join(", ")));
    }
    if report.used_fallback() {
        lines.push(String::new());
        lines.push("Some content is placeholder text; edit it before exporting.".to_string());
    }
    lines
}

pub fn print_generate_output(output: &GenerateOutput) {
    for line in format_generate_output(output) {
        println!("{}", line);
    }
}

// ============================================================================
// Templates
// ============================================================================

/// Category list with each template's section order.
///
/// ```text
/// beauty 💄 뷰티/화장품
///     피부과 추천, EWG 등급, 임상 시험 강조
///     Order: hero, problem, solution, ...
/// ```
pub fn format_templates(templates: &[CategoryTemplate]) -> Vec<String> {
    let mut lines = Vec::new();
    for template in templates {
        lines.push(format!("{} {} {}", template.id, template.icon, template.name));
        lines.push(format!("{}{}", indent(1), template.description));
        let order: Vec<&str> = template.section_order.iter().map(|t| t.key()).collect();
        lines.push(format!("{}Order: {}", indent(1), order.join(", ")));
    }
    lines
}

pub fn print_templates(templates: &[CategoryTemplate]) {
    for line in format_templates(templates) {
        println!("{}", line);
    }
}

// ============================================================================
// Editing
// ============================================================================

/// Section list of the current page plus the history position.
pub fn format_editor(editor: &Editor) -> Vec<String> {
    let page = editor.page();
    let mut lines = vec![page_header(page)];
    for (index, section) in page.sections.iter().enumerate() {
        let marker = if editor.selected() == Some(index) { ">" } else { " " };
        lines.push(format!(
            "{} {:>2} {}: {}",
            marker,
            index,
            section.section_type().label(),
            truncate(section.headline(), HEADLINE_WIDTH)
        ));
    }
    lines.push(format_history(editor));
    lines
}

pub fn print_editor(editor: &Editor) {
    for line in format_editor(editor) {
        println!("{}", line);
    }
}

/// `History <position>/<snapshots>` with the available moves.
pub fn format_history(editor: &Editor) -> String {
    let moves: Vec<&str> = [("undo", editor.can_undo()), ("redo", editor.can_redo())]
        .into_iter()
        .filter_map(|(name, available)| available.then_some(name))
        .collect();
    let position = format!("History {}/{}", editor.cursor() + 1, editor.history_len());
    if moves.is_empty() {
        position
    } else {
        format!("{} ({})", position, moves.join(", "))
    }
}

/// Every editable field of one section, as the JSON the field paths address.
pub fn format_section(index: usize, section: &PageSection) -> Vec<String> {
    let mut lines = vec![format!("{} {}", index, section.section_type().label())];
    let json = serde_json::to_string_pretty(section).unwrap_or_default();
    lines.extend(json.lines().map(|l| format!("{}{}", indent(1), l)));
    lines
}

pub fn print_section(index: usize, section: &PageSection) {
    for line in format_section(index, section) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{FallbackReason, ImageSlot};
    use crate::generate::{GenerateReport, GenerateStep};
    use crate::test_helpers::*;

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("짧은 글", 10), "짧은 글");
        assert_eq!(truncate("가나다라마", 3), "가나다...");
        assert_eq!(truncate("abc", 3), "abc");
    }

    // =========================================================================
    // Generate
    // =========================================================================

    #[test]
    fn progress_lines_are_aligned() {
        let lines = format_generate_event(&GenerateStep::Analyzing.into());
        assert_eq!(lines, vec!["[ 15%] 경쟁사 페이지를 분석하고 있어요..."]);
        let lines = format_generate_event(&GenerateStep::Done.into());
        assert_eq!(lines, vec!["[100%] 완성!"]);
    }

    #[test]
    fn generate_summary_reports_outcomes() {
        let output = GenerateOutput {
            page: sample_page(),
            report: GenerateReport {
                analysis: StepOutcome::Skipped,
                copy: StepOutcome::Ai,
                images: StepOutcome::Fallback(FallbackReason::Status(500)),
                image_slots: vec![ImageSlot::Hero],
            },
        };
        let lines = format_generate_output(&output);
        assert_eq!(lines[0], "Widget (8 sections)");
        assert_eq!(lines[1], "    Analysis: skipped");
        assert_eq!(lines[2], "    Copy: AI");
        assert_eq!(lines[3], "    Images: fallback (API returned HTTP 500)");
        assert_eq!(lines[4], "    Image slots: hero");
        assert!(lines.last().unwrap().contains("placeholder"));
    }

    #[test]
    fn generate_summary_without_fallback_has_no_notice() {
        let output = GenerateOutput {
            page: sample_page(),
            report: GenerateReport {
                analysis: StepOutcome::Ai,
                copy: StepOutcome::Ai,
                images: StepOutcome::Skipped,
                image_slots: Vec::new(),
            },
        };
        let lines = format_generate_output(&output);
        assert_eq!(lines.len(), 4);
    }

    // =========================================================================
    // Templates
    // =========================================================================

    #[test]
    fn templates_list_id_and_order() {
        let lines = format_templates(crate::templates::all());
        assert_eq!(lines.len(), 18);
        assert!(lines[0].starts_with("beauty "));
        assert!(lines[2].starts_with("    Order: hero"));
    }

    // =========================================================================
    // Editing
    // =========================================================================

    #[test]
    fn outline_marks_selection() {
        let mut editor = Editor::new(sample_page());
        editor.select(Some(1)).unwrap();
        let lines = format_editor(&editor);

        assert_eq!(lines[0], "Widget (8 sections)");
        assert!(lines[1].starts_with("   0 히어로: Widget, everyday carry"));
        assert!(lines[2].starts_with(">  1 문제 제기: "));
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[9], "History 1/1");
    }

    #[test]
    fn history_lists_available_moves() {
        let mut editor = Editor::new(sample_page());
        editor.edit_field(0, "hookingText", "A").unwrap();
        editor.edit_field(0, "hookingText", "B").unwrap();
        assert_eq!(format_history(&editor), "History 3/3 (undo)");
        editor.undo();
        assert_eq!(format_history(&editor), "History 2/3 (undo, redo)");
        editor.undo();
        assert_eq!(format_history(&editor), "History 1/3 (redo)");
    }

    #[test]
    fn section_detail_shows_field_names() {
        let page = sample_page();
        let lines = format_section(0, &page.sections[0]);
        assert_eq!(lines[0], "0 히어로");
        assert!(lines.iter().any(|l| l.contains("\"hookingText\"")));
    }
}
