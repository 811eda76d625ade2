//! Absolute mapping entries for `paths` lookups

use crate::config::PathMappings;
use crate::path;
use serde::Serialize;
use std::cmp::Reverse;
use std::path::{Path, PathBuf};

/// A `paths` pattern with its templates resolved to absolute paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    pub pattern: String,
    pub paths: Vec<PathBuf>,
}

/// Resolve every template against `absolute_base_url` and order the
/// patterns from most to least specific
///
/// Absolute templates are only normalized. Specificity is the length of the
/// pattern before its `*`, so `*` on its own always comes last; patterns of
/// equal length keep their order in `paths`. With `add_match_all`, a `*`
/// entry pointing at `<base>/*` is added unless `paths` already has one.
pub fn get_absolute_mapping_entries(
    absolute_base_url: &Path,
    paths: &PathMappings,
    add_match_all: bool,
) -> Vec<MappingEntry> {
    let mut entries: Vec<MappingEntry> = paths
        .iter()
        .map(|(pattern, templates)| MappingEntry {
            pattern: pattern.clone(),
            paths: templates
                .iter()
                .map(|template| path::resolve(absolute_base_url, template))
                .collect(),
        })
        .collect();

    if add_match_all && !paths.contains_key("*") {
        entries.push(MappingEntry {
            pattern: "*".to_string(),
            paths: vec![path::join(absolute_base_url, "*")],
        });
    }

    entries.sort_by_key(|entry| Reverse(prefix_length(&entry.pattern)));
    entries
}

fn prefix_length(pattern: &str) -> usize {
    pattern.find('*').unwrap_or(pattern.len())
}
