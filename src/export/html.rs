//! Self-contained HTML export.

use super::{ExportError, file_name};
use crate::render::{self, RenderMode};
use crate::types::DetailPage;
use std::fs;
use std::path::{Path, PathBuf};

/// The page as a complete standalone document, without editing affordances.
pub fn render_document(page: &DetailPage) -> String {
    render::render_document(page, RenderMode::Export).into_string()
}

/// Write `<productName>_상세페이지.html` into `dir`.
pub fn export_html(page: &DetailPage, dir: &Path) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(&page.product_name, None, "html"));
    fs::write(&path, render_document(page))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PageSection;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn document_has_no_editor_affordances() {
        let html = render_document(&sample_page());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Widget - 상세페이지</title>"));
        assert!(html.contains("id=\"detail-page\""));
        assert!(!html.contains("section-frame"));
        assert!(!html.contains("data-section-index"));
    }

    #[test]
    fn user_text_is_escaped() {
        let mut page = sample_page();
        if let PageSection::Hero(hero) = &mut page.sections[0] {
            hero.hooking_text = "<script>alert(1)</script>".to_string();
        }
        let html = render_document(&page);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn writes_named_file() {
        let tmp = TempDir::new().unwrap();
        let page = sample_page();
        let path = export_html(&page, tmp.path()).unwrap();

        assert_eq!(path, tmp.path().join("Widget_상세페이지.html"));
        assert_eq!(fs::read_to_string(path).unwrap(), render_document(&page));
    }
}
