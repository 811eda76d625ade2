//! One-call loading of everything a `paths` matcher needs

use crate::config::{PathMappings, TsConfigLoader};
use crate::fs::FileSystem;
use crate::mapping_entry::{MappingEntry, get_absolute_mapping_entries};
use crate::path;
use crate::result::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Settings supplied directly instead of read from a tsconfig
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplicitParams {
    /// Absolute, or relative to the working directory
    pub base_url: String,
    pub paths: PathMappings,
    pub add_match_all: bool,
}

/// Successfully loaded settings, ready for mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigLoaderSuccess {
    /// Anchor config file, empty for explicit parameters
    pub config_file_absolute_path: PathBuf,
    pub base_url: Option<String>,
    pub absolute_base_url: PathBuf,
    pub paths: PathMappings,
    pub add_match_all: bool,
}

impl ConfigLoaderSuccess {
    /// `paths` resolved against [`Self::absolute_base_url`]
    pub fn mapping_entries(&self) -> Vec<MappingEntry> {
        get_absolute_mapping_entries(&self.absolute_base_url, &self.paths, self.add_match_all)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "resultType", rename_all = "camelCase")]
pub enum ConfigLoaderResult {
    Success(ConfigLoaderSuccess),
    Failed { message: String },
}

/// Load path-mapping settings for `cwd`
///
/// Explicit parameters bypass config files entirely. Otherwise the project
/// is resolved with overrides read through `get_env`. Without a `baseUrl`,
/// the absolute base is the anchor file's directory and no match-all entry
/// is requested.
pub fn config_loader<F: FileSystem>(
    loader: &TsConfigLoader<F>,
    cwd: &Path,
    explicit: Option<ExplicitParams>,
    get_env: impl Fn(&str) -> Option<String>,
) -> Result<ConfigLoaderResult> {
    if let Some(explicit) = explicit {
        let absolute_base_url = path::resolve(cwd, &explicit.base_url);
        return Ok(ConfigLoaderResult::Success(ConfigLoaderSuccess {
            config_file_absolute_path: PathBuf::new(),
            base_url: Some(explicit.base_url),
            absolute_base_url,
            paths: explicit.paths,
            add_match_all: explicit.add_match_all,
        }));
    }

    let settings = loader.tsconfig_loader(cwd, get_env)?;

    let Some(anchor_path) = settings.anchor_path else {
        return Ok(ConfigLoaderResult::Failed {
            message: "Couldn't find tsconfig.json".to_string(),
        });
    };

    let absolute_base_url = path::resolve(
        &path::dirname(&anchor_path),
        settings.base_url.as_deref().unwrap_or_default(),
    );

    Ok(ConfigLoaderResult::Success(ConfigLoaderSuccess {
        config_file_absolute_path: anchor_path,
        add_match_all: settings.base_url.is_some(),
        base_url: settings.base_url,
        absolute_base_url,
        paths: settings.paths.unwrap_or_default(),
    }))
}
