//! Locating the tsconfig file to start from

use super::loader::TsConfigLoader;
use crate::error::TsPathsError;
use crate::fs::FileSystem;
use crate::path;
use crate::result::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File names searched for in each directory, in priority order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["tsconfig.json", "jsconfig.json"];

impl<F: FileSystem> TsConfigLoader<F> {
    /// Work out which config file to load
    ///
    /// An explicit `project` (relative to `cwd`) wins: a directory means its
    /// `tsconfig.json`, anything else is used as given but must exist. With
    /// no project, `cwd` itself is used if it is a file, otherwise the
    /// directory tree is searched upward from `cwd`.
    pub fn resolve_config_path(&self, cwd: &Path, project: Option<&str>) -> Result<Option<PathBuf>> {
        if let Some(project) = project.filter(|p| !p.is_empty()) {
            let project_path = path::resolve(cwd, project);
            if self.file_system().is_dir(&project_path) {
                return Ok(Some(path::join(&project_path, CONFIG_FILE_NAMES[0])));
            }
            if !self.file_system().exists(&project_path) {
                return Err(TsPathsError::ProjectNotFound { path: project_path });
            }
            return Ok(Some(project_path));
        }

        if self.file_system().is_file(cwd) {
            return Ok(Some(path::normalize(cwd)));
        }

        Ok(self
            .walk_for_tsconfig(cwd)?
            .map(|found| path::normalize(&found)))
    }

    /// Search `directory` and then its ancestors for a config file
    ///
    /// Stops at the first directory containing one of
    /// [`CONFIG_FILE_NAMES`], or returns `None` once the root has been
    /// checked.
    pub fn walk_for_tsconfig(&self, directory: &Path) -> Result<Option<PathBuf>> {
        let mut current = directory.to_path_buf();

        loop {
            let entries = self
                .file_system()
                .read_dir(&current)
                .map_err(|e| TsPathsError::io(&current, e))?;

            for file_name in CONFIG_FILE_NAMES {
                if entries.iter().any(|entry| entry == file_name) {
                    let found = current.join(file_name);
                    debug!("Found config: {}", found.display());
                    return Ok(Some(found));
                }
            }

            // Move up to parent directory
            let parent = path::dirname(&current);
            if parent == current {
                // Reached filesystem root
                break;
            }
            current = parent;
        }

        Ok(None)
    }
}
