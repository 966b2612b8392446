//! Page editing with linear undo/redo history.
//!
//! The editor keeps every version of the page as a full snapshot. An edit
//! drops any snapshots after the cursor, appends the new page, and moves the
//! cursor to it; undo and redo only move the cursor.
//!
//! ```text
//! history:  [p0] [p1] [p2] [p3]
//!                       ^ cursor       undo → p1, redo → p3
//! edit at p2:  [p0] [p1] [p2] [p2']    p3 is gone
//! ```
//!
//! Content fields are addressed by the camelCase names they have in the
//! session JSON, with list positions as path segments:
//!
//! ```text
//! title                 hookingText           problems.1
//! items.0.title         specs.2.value         satisfaction.3.percentage
//! ```

use crate::color;
use crate::types::{DetailPage, PageSection, SectionStyle, SectionType};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("section {index} does not exist (page has {len} sections)")]
    SectionOutOfRange { index: usize, len: usize },
    #[error("'{path}' is not an editable field of a {section} section")]
    UnknownField { section: SectionType, path: String },
    #[error("'{field}' has no item {index} ({len} items)")]
    ItemOutOfRange {
        field: String,
        index: usize,
        len: usize,
    },
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
    #[error(
        "unknown style field '{0}' (expected backgroundColor, textColor, accentColor, padding or fontFamily)"
    )]
    UnknownStyleField(String),
    #[error("corrupt editor state: {0}")]
    CorruptState(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Edit history for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EditorState")]
pub struct Editor {
    history: Vec<DetailPage>,
    cursor: usize,
    selected: Option<usize>,
}

#[derive(Deserialize)]
struct EditorState {
    history: Vec<DetailPage>,
    cursor: usize,
    selected: Option<usize>,
}

impl TryFrom<EditorState> for Editor {
    type Error = EditError;

    fn try_from(state: EditorState) -> Result<Self, Self::Error> {
        if state.cursor >= state.history.len() {
            return Err(EditError::CorruptState(format!(
                "cursor {} outside history of {} pages",
                state.cursor,
                state.history.len()
            )));
        }
        let mut editor = Editor {
            history: state.history,
            cursor: state.cursor,
            selected: state.selected,
        };
        editor.clamp_selection();
        Ok(editor)
    }
}

impl Editor {
    pub fn new(page: DetailPage) -> Self {
        Self {
            history: vec![page],
            cursor: 0,
            selected: None,
        }
    }

    /// The page at the cursor.
    pub fn page(&self) -> &DetailPage {
        &self.history[self.cursor]
    }

    pub fn into_page(mut self) -> DetailPage {
        self.history.swap_remove(self.cursor)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    /// Select a section, or clear the selection with `None`.
    pub fn select(&mut self, index: Option<usize>) -> Result<(), EditError> {
        if let Some(index) = index {
            self.check_index(index)?;
        }
        self.selected = index;
        Ok(())
    }

    /// Replace the section at `index`.
    pub fn update_section(&mut self, index: usize, section: PageSection) -> Result<(), EditError> {
        self.check_index(index)?;
        let mut page = self.page().clone();
        page.sections[index] = section;
        self.push(page);
        Ok(())
    }

    /// Set one content field of a section. Nothing is recorded on error.
    pub fn edit_field(&mut self, index: usize, path: &str, value: &str) -> Result<(), EditError> {
        self.check_index(index)?;
        let mut section = self.page().sections[index].clone();
        section.set_field(path, value)?;
        self.update_section(index, section)
    }

    /// Set one style field of a section. Nothing is recorded on error.
    pub fn edit_style(&mut self, index: usize, field: &str, value: &str) -> Result<(), EditError> {
        self.check_index(index)?;
        let mut section = self.page().sections[index].clone();
        section.style_mut().set(field, value)?;
        self.update_section(index, section)
    }

    /// Remove a section and clear the selection.
    pub fn delete_section(&mut self, index: usize) -> Result<(), EditError> {
        self.check_index(index)?;
        let mut page = self.page().clone();
        page.sections.remove(index);
        self.push(page);
        self.selected = None;
        Ok(())
    }

    /// Swap a section with its neighbour and select it at its new position.
    ///
    /// Returns `Ok(false)` without recording anything when the section is
    /// already first (moving up) or last (moving down).
    pub fn move_section(&mut self, index: usize, direction: Direction) -> Result<bool, EditError> {
        let len = self.check_index(index)?;
        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < len => index + 1,
            _ => return Ok(false),
        };
        let mut page = self.page().clone();
        page.sections.swap(index, target);
        self.push(page);
        self.selected = Some(target);
        Ok(true)
    }

    /// Step back one version. Returns whether the cursor moved.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        self.clamp_selection();
        true
    }

    /// Step forward one version. Returns whether the cursor moved.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        self.clamp_selection();
        true
    }

    fn push(&mut self, page: DetailPage) {
        self.history.truncate(self.cursor + 1);
        self.history.push(page);
        self.cursor = self.history.len() - 1;
    }

    fn check_index(&self, index: usize) -> Result<usize, EditError> {
        let len = self.page().sections.len();
        if index < len {
            Ok(len)
        } else {
            Err(EditError::SectionOutOfRange { index, len })
        }
    }

    fn clamp_selection(&mut self) {
        if self.selected.is_some_and(|i| i >= self.page().sections.len()) {
            self.selected = None;
        }
    }
}

// =============================================================================
// Field paths
// =============================================================================

impl PageSection {
    /// Set a content field by path, e.g. `items.0.title`.
    ///
    /// Optional fields are cleared by an empty value. String lists accept an
    /// index one past the end, which appends.
    pub fn set_field(&mut self, path: &str, value: &str) -> Result<(), EditError> {
        let section = self.section_type();
        let unknown = || EditError::UnknownField {
            section,
            path: path.to_string(),
        };
        let segments: Vec<&str> = path.split('.').collect();
        let text = || value.to_string();

        match (self, segments.as_slice()) {
            (PageSection::Hero(s), ["hookingText"]) => s.hooking_text = text(),
            (PageSection::Hero(s), ["subText"]) => s.sub_text = text(),
            (PageSection::Hero(s), ["badge"]) => s.badge = optional(value),
            (PageSection::Hero(s), ["imageUrl"]) => s.image_url = optional(value),

            (PageSection::Problem(s), ["title"]) => s.title = text(),
            (PageSection::Problem(s), ["problems", i]) => {
                set_list_item(&mut s.problems, "problems", i, value)?
            }

            (PageSection::Solution(s), ["title"]) => s.title = text(),
            (PageSection::Solution(s), ["description"]) => s.description = text(),
            (PageSection::Solution(s), ["imageUrl"]) => s.image_url = optional(value),
            (PageSection::Solution(s), ["highlights", i]) => {
                set_list_item(&mut s.highlights, "highlights", i, value)?
            }
            (PageSection::Solution(s), ["comparisons", i, field]) => {
                let row = item_mut(&mut s.comparisons, "comparisons", i)?;
                match *field {
                    "label" => row.label = text(),
                    "competitor" => row.competitor = text(),
                    "ours" => row.ours = text(),
                    _ => return Err(unknown()),
                }
            }

            (PageSection::Features(s), ["title"]) => s.title = text(),
            (PageSection::Features(s), ["items", i, field]) => {
                let item = item_mut(&mut s.items, "items", i)?;
                match *field {
                    "icon" => item.icon = text(),
                    "title" => item.title = text(),
                    "description" => item.description = text(),
                    _ => return Err(unknown()),
                }
            }

            (PageSection::Trust(s), ["title"]) => s.title = text(),
            (PageSection::Trust(s), ["items", i, field]) => {
                let item = item_mut(&mut s.items, "items", i)?;
                match *field {
                    "number" => item.number = text(),
                    "label" => item.label = text(),
                    _ => return Err(unknown()),
                }
            }
            (PageSection::Trust(s), ["badges", i]) => {
                set_list_item(&mut s.badges, "badges", i, value)?
            }
            (PageSection::Trust(s), ["satisfaction", i, field]) => {
                let bar = item_mut(&mut s.satisfaction, "satisfaction", i)?;
                match *field {
                    "label" => bar.label = text(),
                    "percentage" => bar.percentage = parse_in_range(path, value, 0, 100)?,
                    _ => return Err(unknown()),
                }
            }

            (PageSection::Detail(s), ["title"]) => s.title = text(),
            (PageSection::Detail(s), ["content"]) => s.content = text(),
            (PageSection::Detail(s), ["imageUrl"]) => s.image_url = optional(value),
            (PageSection::Detail(s), ["specs", i, field]) => {
                let spec = item_mut(&mut s.specs, "specs", i)?;
                match *field {
                    "label" => spec.label = text(),
                    "value" => spec.value = text(),
                    _ => return Err(unknown()),
                }
            }

            (PageSection::Reviews(s), ["title"]) => s.title = text(),
            (PageSection::Reviews(s), ["averageRating"]) => {
                s.average_rating = parse_in_range(path, value, 0.0, 5.0)?
            }
            (PageSection::Reviews(s), ["totalReviews"]) => {
                s.total_reviews = parse_in_range(path, value, 0, u32::MAX)?
            }
            (PageSection::Reviews(s), ["items", i, field]) => {
                let review = item_mut(&mut s.items, "items", i)?;
                match *field {
                    "author" => review.author = text(),
                    "content" => review.content = text(),
                    "rating" => review.rating = parse_in_range(path, value, 0, 5)?,
                    "verified" => review.verified = parse_in_range(path, value, false, true)?,
                    _ => return Err(unknown()),
                }
            }

            (PageSection::Cta(s), ["title"]) => s.title = text(),
            (PageSection::Cta(s), ["description"]) => s.description = text(),
            (PageSection::Cta(s), ["buttonText"]) => s.button_text = text(),
            (PageSection::Cta(s), ["urgencyText"]) => s.urgency_text = optional(value),
            (PageSection::Cta(s), ["originalPrice"]) => s.original_price = optional(value),
            (PageSection::Cta(s), ["salePrice"]) => s.sale_price = optional(value),
            (PageSection::Cta(s), ["discountRate"]) => s.discount_rate = optional(value),

            _ => return Err(unknown()),
        }
        Ok(())
    }
}

impl SectionStyle {
    /// Set a style field by its camelCase name. Colors must be hex.
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), EditError> {
        let hex = |value: &str| -> Result<String, EditError> {
            if value.starts_with('#') && color::parse_hex(value).is_some() {
                Ok(value.to_string())
            } else {
                Err(EditError::InvalidValue {
                    field: field.to_string(),
                    message: format!("expected #rgb or #rrggbb, got '{value}'"),
                })
            }
        };
        match field {
            "backgroundColor" => self.background_color = hex(value)?,
            "textColor" => self.text_color = hex(value)?,
            "accentColor" => self.accent_color = hex(value)?,
            "padding" => self.padding = value.to_string(),
            "fontFamily" => self.font_family = optional(value),
            _ => return Err(EditError::UnknownStyleField(field.to_string())),
        }
        Ok(())
    }
}

fn optional(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}

fn parse_index(field: &str, raw: &str) -> Result<usize, EditError> {
    raw.parse().map_err(|_| EditError::InvalidValue {
        field: field.to_string(),
        message: format!("'{raw}' is not a list index"),
    })
}

fn item_mut<'a, T>(items: &'a mut [T], field: &str, raw: &str) -> Result<&'a mut T, EditError> {
    let index = parse_index(field, raw)?;
    let len = items.len();
    items.get_mut(index).ok_or(EditError::ItemOutOfRange {
        field: field.to_string(),
        index,
        len,
    })
}

fn set_list_item(items: &mut Vec<String>, field: &str, raw: &str, value: &str) -> Result<(), EditError> {
    let index = parse_index(field, raw)?;
    if index == items.len() {
        items.push(value.to_string());
        return Ok(());
    }
    *item_mut(items, field, raw)? = value.to_string();
    Ok(())
}

fn parse_in_range<T>(field: &str, value: &str, min: T, max: T) -> Result<T, EditError>
where
    T: FromStr + PartialOrd + Display,
{
    let invalid = |message: String| EditError::InvalidValue {
        field: field.to_string(),
        message,
    };
    let parsed: T = value
        .trim()
        .parse()
        .map_err(|_| invalid(format!("cannot parse '{value}'")))?;
    // NaN fails both comparisons
    let in_range = parsed >= min && parsed <= max;
    if !in_range {
        return Err(invalid(format!("{parsed} is outside {min}..={max}")));
    }
    Ok(parsed)
}
