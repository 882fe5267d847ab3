use super::index::IndexedFile;
use crate::SearchResult;
use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use tracing::debug;

/// Words whose prefixes and fragments surface the virtual settings entry
const SETTINGS_KEYWORDS: [&str; 2] = ["settings", "config"];

/// Fuzzy file name search using nucleo
pub struct FuzzySearcher {
    matcher: Matcher,
    limit: usize,
}

impl FuzzySearcher {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            limit,
        }
    }

    /// Rank `files` against `query`, best first. The snippet is the file
    /// name with matched characters wrapped in `[`/`]`.
    pub fn search(&mut self, query: &str, files: &[IndexedFile]) -> Vec<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let pattern = Pattern::new(
            query,
            CaseMatching::Smart,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );

        let mut buf = Vec::new();
        let mut indices = Vec::new();
        let mut scored: Vec<(u32, &IndexedFile, Vec<u32>)> = files
            .iter()
            .filter_map(|file| {
                indices.clear();
                let haystack = Utf32Str::new(&file.name, &mut buf);
                let score = pattern.indices(haystack, &mut self.matcher, &mut indices)?;
                Some((score, file, indices.clone()))
            })
            .collect();

        debug!("Fuzzy search {query:?}: {} matches", scored.len());

        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.path.cmp(&b.1.path)));
        scored.truncate(self.limit);

        let mut results: Vec<SearchResult> = scored
            .into_iter()
            .map(|(score, file, mut indices)| {
                indices.sort_unstable();
                indices.dedup();
                SearchResult {
                    path: file.path.clone(),
                    snippet: Some(highlight(&file.name, &indices)),
                    score: Some(f64::from(score)),
                    extension: file.extension.clone(),
                    ..Default::default()
                }
            })
            .collect();

        if matches_settings(query) {
            results.insert(0, SearchResult::settings_entry());
        }
        results
    }
}

/// Whether the query is a fragment of one of the settings keywords.
#[must_use]
pub fn matches_settings(query: &str) -> bool {
    let query = query.to_lowercase();
    SETTINGS_KEYWORDS.iter().any(|word| word.contains(&query))
}

/// Wrap runs of matched characters in brackets. `indices` must be sorted.
fn highlight(text: &str, indices: &[u32]) -> String {
    let mut out = String::with_capacity(text.len() + indices.len() * 2);
    let mut matched = indices.iter().peekable();
    let mut open = false;

    for (i, c) in text.chars().enumerate() {
        let hit = matched
            .peek()
            .is_some_and(|&&idx| usize::try_from(idx).is_ok_and(|idx| idx == i));
        if hit {
            matched.next();
        }
        if hit != open {
            out.push(if hit { '[' } else { ']' });
            open = hit;
        }
        out.push(c);
    }
    if open {
        out.push(']');
    }
    out
}
