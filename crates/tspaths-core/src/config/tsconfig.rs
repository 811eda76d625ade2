//! Configuration types for tsconfig.json / jsconfig.json

use crate::error::TsPathsError;
use crate::result::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// `compilerOptions.paths`: pattern → replacement templates, in file order
pub type PathMappings = IndexMap<String, Vec<String>>;

/// The parts of a tsconfig file that path resolution cares about
///
/// Unknown keys are kept in `other` so that merging an extends chain never
/// drops settings owned by other tools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    /// Config file(s) this one inherits from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Extends>,

    /// Compiler settings block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler_options: Option<CompilerOptions>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Value of the `extends` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extends {
    Single(String),
    Many(Vec<String>),
}

impl Extends {
    /// Whether there is anything to follow
    ///
    /// An empty string is treated like a missing field; an empty list still
    /// counts, it just contributes nothing.
    pub fn is_set(&self) -> bool {
        match self {
            Extends::Single(reference) => !reference.is_empty(),
            Extends::Many(_) => true,
        }
    }
}

/// `compilerOptions` block
///
/// `baseUrl` and `paths` are `Some(None)` when the file sets them to `null`,
/// which still overrides an inherited value. Everything else is kept
/// uninterpreted in `other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    /// Directory non-absolute `paths` templates are resolved from
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_url: Option<Option<String>>,
    /// Module path mappings
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub paths: Option<Option<PathMappings>>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Distinguish a key set to `null` from a missing key
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl TsConfig {
    /// Parse the text of the config file at `path`
    ///
    /// Accepts JSONC (comments and trailing commas) and ignores a leading
    /// byte-order mark.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let value: Value =
            json5::from_str(content).map_err(|e| TsPathsError::malformed(path, e.to_string()))?;
        serde_json::from_value(value).map_err(|e| TsPathsError::malformed(path, e.to_string()))
    }

    /// Whether the settings block has a `paths` key, even `{}` or `null`
    pub fn declares_paths(&self) -> bool {
        self.compiler_options
            .as_ref()
            .is_some_and(|options| options.paths.is_some())
    }

    pub fn base_url(&self) -> Option<&str> {
        self.compiler_options.as_ref()?.base_url.as_ref()?.as_deref()
    }

    pub fn paths(&self) -> Option<&PathMappings> {
        self.compiler_options.as_ref()?.paths.as_ref()?.as_ref()
    }
}
