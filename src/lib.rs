//! # aipage
//!
//! Generates Korean e-commerce product detail pages. A product name, a short
//! description, and a few feature keywords go in; a single-column page of
//! persuasive sections comes out, ready to edit and export as HTML or PNG.
//!
//! # Architecture: Generate → Edit → Export
//!
//! ```text
//! 1. Generate  product input  →  DetailPage       (AI copy + template + palette)
//! 2. Edit      DetailPage     →  DetailPage       (undo/redo history, persisted)
//! 3. Export    DetailPage     →  .html / .png     (Maud document, headless capture)
//! ```
//!
//! The page is plain data (`DetailPage`, an ordered list of tagged
//! `PageSection`s) serialized as JSON between commands. Rendering is a pure
//! function of that data, so the same markup serves the editing preview and
//! both export formats.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Page data model: brand guide, AI payloads, the eight section kinds |
//! | [`color`] | Hex ↔ HSL conversion, `darken` / `lighten` for derived palettes |
//! | [`templates`] | The six category templates: section order, palette, default content |
//! | [`ai`] | Gemini client with a fixed fallback for every call |
//! | [`builder`] | Turns AI copy + template into styled sections |
//! | [`generate`] | The generation pipeline with progress events |
//! | [`render`] | Maud rendering of sections, pages, and documents |
//! | [`editor`] | Snapshot history with undo/redo, field-path edits |
//! | [`session`] | On-disk session: generated page and editor history |
//! | [`export`] | HTML export, PNG capture, watermarking |
//! | [`config`] | `aipage.toml` loading, merging onto stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## AI Never Fails the Pipeline
//!
//! Every AI call resolves to a value. A missing key, a transport error, a
//! non-OK status, or an unparseable reply substitutes fixed fallback content
//! and is reported as [`ai::Generated::Fallback`] with its reason. The only
//! way generation itself fails is an empty product name.
//!
//! ## Snapshot History
//!
//! The editor stores a full copy of the page per edit. Pages are small, and
//! whole snapshots make undo, redo, and persistence trivial to get right:
//! the history file is the editor state.
//!
//! ## Maud for Markup
//!
//! Sections are rendered with [Maud](https://maud.lambda.xyz/). All AI and
//! user text is auto-escaped, and a malformed template is a build error.
//! Styles are inline, computed from each section's `SectionStyle`, so an
//! exported document needs nothing beyond the file itself.

pub mod ai;
pub mod builder;
pub mod color;
pub mod config;
pub mod editor;
pub mod export;
pub mod generate;
pub mod output;
pub mod render;
pub mod session;
pub mod templates;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
