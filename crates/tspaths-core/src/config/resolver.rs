//! Effective `baseUrl` / `paths` for a project

use super::loader::TsConfigLoader;
use super::tsconfig::PathMappings;
use crate::fs::FileSystem;
use crate::result::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the project file or directory
pub const PROJECT_ENV: &str = "TS_NODE_PROJECT";

/// Environment variable overriding `baseUrl`
pub const BASE_URL_ENV: &str = "TS_NODE_BASEURL";

/// Outcome of resolving a project's path settings
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSettings {
    /// Config file that relative settings are attached to
    ///
    /// This is the loaded file, except when `paths` are in effect without a
    /// `baseUrl`; then it is the file that declared those `paths`.
    pub anchor_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub paths: Option<PathMappings>,
}

impl<F: FileSystem> TsConfigLoader<F> {
    /// Resolve settings using overrides read through `get_env`
    ///
    /// `TS_NODE_PROJECT` selects the project and `TS_NODE_BASEURL`
    /// replaces whatever `baseUrl` the config chain provides.
    pub fn tsconfig_loader(
        &self,
        cwd: &Path,
        get_env: impl Fn(&str) -> Option<String>,
    ) -> Result<ResolvedSettings> {
        let project = get_env(PROJECT_ENV);
        let base_url = get_env(BASE_URL_ENV);
        self.load_sync(cwd, project.as_deref(), base_url.as_deref())
    }

    /// Resolve the effective `baseUrl`, `paths` and anchor file
    pub fn load_sync(
        &self,
        cwd: &Path,
        project: Option<&str>,
        base_url: Option<&str>,
    ) -> Result<ResolvedSettings> {
        let Some(config_path) = self.resolve_config_path(cwd, project)? else {
            debug!("No tsconfig found from {}", cwd.display());
            return Ok(ResolvedSettings::default());
        };

        let options = self
            .load_tsconfig(&config_path)?
            .and_then(|config| config.compiler_options)
            .unwrap_or_default();

        let base_url = base_url
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .or(options.base_url.flatten());
        let paths = options.paths.flatten();

        let mut anchor_path = config_path;
        if base_url.as_deref().is_none_or(str::is_empty)
            && paths.as_ref().is_some_and(|paths| !paths.is_empty())
            && let Some(declared_by) = self.find_paths_declaration(&anchor_path)?
        {
            anchor_path = declared_by;
        }

        Ok(ResolvedSettings {
            anchor_path: Some(anchor_path),
            base_url,
            paths,
        })
    }
}
