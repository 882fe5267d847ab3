//! Config validation - warns about fields the launcher does not understand

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Validate launcher config JSON and warn about unknown fields.
pub fn warn_unknown_fields(content: &str, config_name: &str) {
    warn_against(content, config_name, &expected_config_keys());
}

/// Validate the shared settings JSON and warn about unknown fields.
pub fn warn_unknown_settings_fields(content: &str, config_name: &str) {
    warn_against(content, config_name, &expected_settings_keys());
}

fn warn_against(content: &str, config_name: &str, expected: &ExpectedKeys) {
    let Ok(value) = serde_json::from_str::<Value>(content) else {
        return;
    };

    for path in find_unknown_keys(&value, expected, "") {
        warn!("Unknown config field in {config_name}: {path}");
    }
}

/// Find unknown keys in JSON value compared to expected keys.
/// Returns paths like "window.unknownField" for unknown fields.
fn find_unknown_keys(value: &Value, expected: &ExpectedKeys, prefix: &str) -> Vec<String> {
    let mut unknowns = Vec::new();

    let Value::Object(obj) = value else {
        return unknowns;
    };

    for (key, child) in obj {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        if let Some(nested) = expected.nested.get(key.as_str()) {
            unknowns.extend(find_unknown_keys(child, nested, &path));
        } else if !expected.fields.contains(key.as_str()) {
            unknowns.push(path);
        }
    }

    unknowns
}

/// `fields` are leaf fields, `nested` are nested objects with their own expected keys.
struct ExpectedKeys {
    fields: HashSet<&'static str>,
    nested: HashMap<&'static str, ExpectedKeys>,
}

impl ExpectedKeys {
    fn new(fields: &[&'static str]) -> Self {
        Self {
            fields: fields.iter().copied().collect(),
            nested: HashMap::new(),
        }
    }

    fn with_nested(mut self, key: &'static str, nested: ExpectedKeys) -> Self {
        self.nested.insert(key, nested);
        self
    }
}

fn expected_config_keys() -> ExpectedKeys {
    let launcher_keys = ExpectedKeys::new(&[
        "debounceMs",
        "recenterDelayMs",
        "resetSettleMs",
        "focusGraceMs",
        "onEmptyEscape",
        "lazyThumbnails",
        "hideAfterOpen",
    ]);

    let window_keys = ExpectedKeys::new(&[
        "width",
        "inputRowHeight",
        "itemRowHeight",
        "padding",
        "maxVisible",
        "settingsWidth",
        "settingsHeight",
    ]);

    let search_keys = ExpectedKeys::new(&["roots", "maxResults", "maxDepth"]);

    ExpectedKeys::new(&[])
        .with_nested("launcher", launcher_keys)
        .with_nested("window", window_keys)
        .with_nested("search", search_keys)
}

fn expected_settings_keys() -> ExpectedKeys {
    ExpectedKeys::new(&[
        "embedding_strategy",
        "max_chunks_per_file",
        "hotkey",
        "ignored_paths",
        "allowed_extensions",
    ])
}
