//! Projects the result store into display rows.
//!
//! The list is rebuilt from scratch on every change. The renderer also owns
//! the thumbnail cache: image rows without an inline icon get a placeholder
//! and, when lazy thumbnails are enabled, a one-time fetch request. A
//! resolved thumbnail replaces the placeholder on the next render of any row
//! showing the same path.

use super::store::ResultStore;
use crate::{FileCategory, IconSource, ImageData, SearchResult};
use std::collections::{HashMap, HashSet};

/// Icon shown in front of a row, in priority order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIcon {
    /// The virtual settings entry
    Settings,
    /// Image data supplied with the result
    Inline(ImageData),
    /// Lazily fetched preview of an image file
    Thumbnail(ImageData),
    /// Glyph chosen by extension category
    Placeholder(FileCategory),
}

/// A run of snippet text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub index: usize,
    pub path: String,
    pub name: String,
    pub directory: String,
    pub icon: RowIcon,
    pub snippet: Vec<Span>,
    /// Formatted score, absent when the result has none
    pub score: Option<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListView {
    pub rows: Vec<RowView>,
    pub selected: Option<usize>,
}

impl ListView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Renderer {
    lazy_thumbnails: bool,
    thumbnails: HashMap<String, ImageData>,
    /// Paths already handed to the thumbnail collaborator, resolved or not
    requested: HashSet<String>,
}

impl Renderer {
    pub fn new(lazy_thumbnails: bool) -> Self {
        Self {
            lazy_thumbnails,
            ..Default::default()
        }
    }

    /// Build the list and collect the thumbnail fetches it needs.
    pub fn render(&mut self, store: &ResultStore) -> (ListView, Vec<String>) {
        let mut fetch = Vec::new();
        let rows = store
            .results()
            .iter()
            .enumerate()
            .map(|(index, result)| {
                let icon = self.icon_for(result);
                if self.wants_thumbnail(result, &icon) {
                    self.requested.insert(result.path.clone());
                    fetch.push(result.path.clone());
                }
                row_view(index, result, icon, index == store.selected())
            })
            .collect();

        let view = ListView {
            rows,
            selected: (!store.is_empty()).then(|| store.selected()),
        };
        (view, fetch)
    }

    /// Record a fetch outcome. Returns `true` if the cache changed.
    pub fn thumbnail_resolved(&mut self, path: String, image: Option<ImageData>) -> bool {
        match image {
            Some(image) => {
                self.thumbnails.insert(path, image);
                true
            }
            None => false,
        }
    }

    fn icon_for(&self, result: &SearchResult) -> RowIcon {
        if result.is_settings_entry() {
            return RowIcon::Settings;
        }
        if let IconSource::Inline(image) = &result.icon {
            return RowIcon::Inline(image.clone());
        }
        if let Some(image) = self.thumbnails.get(&result.path) {
            return RowIcon::Thumbnail(image.clone());
        }
        RowIcon::Placeholder(result.category())
    }

    fn wants_thumbnail(&self, result: &SearchResult, icon: &RowIcon) -> bool {
        self.lazy_thumbnails
            && matches!(icon, RowIcon::Placeholder(category) if category.is_image())
            && !self.requested.contains(&result.path)
    }
}

fn row_view(index: usize, result: &SearchResult, icon: RowIcon, selected: bool) -> RowView {
    let (directory, name) = split_path(&result.path);
    RowView {
        index,
        path: result.path.clone(),
        name: name.to_string(),
        directory: directory.to_string(),
        icon,
        snippet: result
            .snippet
            .as_deref()
            .map(parse_snippet)
            .unwrap_or_default(),
        score: result.score.and_then(format_score),
        selected,
    }
}

/// Split into (directory, file name) on whichever separator the path uses.
#[must_use]
pub fn split_path(path: &str) -> (&str, &str) {
    let separator = if path.contains('\\') { '\\' } else { '/' };
    match path.rfind(separator) {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}

/// Translate `[`/`]` highlight markers into spans. Unbalanced markers
/// simply toggle state; an unterminated highlight runs to the end.
#[must_use]
pub fn parse_snippet(snippet: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut highlighted = false;

    for c in snippet.chars() {
        let switch_to = match c {
            '[' => Some(true),
            ']' => Some(false),
            _ => None,
        };
        match switch_to {
            Some(next) => {
                if !current.is_empty() {
                    spans.push(Span {
                        text: std::mem::take(&mut current),
                        highlighted,
                    });
                }
                highlighted = next;
            }
            None => current.push(c),
        }
    }

    if !current.is_empty() {
        spans.push(Span {
            text: current,
            highlighted,
        });
    }
    spans
}

/// One decimal place; zero and non-finite scores are not shown.
#[must_use]
pub fn format_score(score: f64) -> Option<String> {
    (score.is_finite() && score != 0.0).then(|| format!("{score:.1}"))
}
