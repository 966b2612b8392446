//! On-disk editing session.
//!
//! A session directory holds the generated page and the editor history that
//! grows as the user edits it:
//!
//! ```text
//! .aipage-session/
//! ├── page.json       # Page as generated, written once by `generate`
//! └── history.json    # Editor snapshots, cursor, and selection
//! ```
//!
//! Opening the editor prefers `history.json` and falls back to starting a
//! fresh history from `page.json`. Starting a new session replaces both.

use crate::editor::Editor;
use crate::types::DetailPage;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SESSION_DIR: &str = ".aipage-session";
const PAGE_FILE: &str = "page.json";
const HISTORY_FILE: &str = "history.json";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no generated page in {0}; run `aipage generate` first")]
    NoPage(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Session {
    dir: PathBuf,
}

impl Session {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn page_path(&self) -> PathBuf {
        self.dir.join(PAGE_FILE)
    }

    fn history_path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    /// Whether a generated page is stored.
    pub fn exists(&self) -> bool {
        self.page_path().exists()
    }

    /// Store a freshly generated page, dropping any previous edit history.
    pub fn start(&self, page: &DetailPage) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        write_json(&self.page_path(), page)?;
        let history = self.history_path();
        if history.exists() {
            fs::remove_file(history)?;
        }
        Ok(())
    }

    /// The page as generated, ignoring edits.
    pub fn load_page(&self) -> Result<DetailPage, SessionError> {
        let path = self.page_path();
        if !path.exists() {
            return Err(SessionError::NoPage(self.dir.clone()));
        }
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    pub fn load_editor(&self) -> Result<Editor, SessionError> {
        let history = self.history_path();
        if history.exists() {
            return Ok(serde_json::from_str(&fs::read_to_string(history)?)?);
        }
        Ok(Editor::new(self.load_page()?))
    }

    pub fn save_editor(&self, editor: &Editor) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        write_json(&self.history_path(), editor)
    }

    /// Delete the session directory. Returns whether there was one.
    pub fn discard(&self) -> Result<bool, SessionError> {
        if !self.dir.exists() {
            return Ok(false);
        }
        fs::remove_dir_all(&self.dir)?;
        Ok(true)
    }
}

/// Write through a temporary sibling so an interrupted write never leaves
/// a truncated file behind.
fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), SessionError> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
