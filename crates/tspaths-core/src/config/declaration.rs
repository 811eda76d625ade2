//! Finding the config file that declares `paths`
//!
//! Merging an extends chain loses track of which file a setting came from.
//! When there is no `baseUrl`, `paths` templates are resolved from the
//! directory of the file that declared them, so the chain is walked a
//! second time just to find that file.

use super::loader::{ExtendsStack, TsConfigLoader};
use super::tsconfig::Extends;
use crate::fs::FileSystem;
use crate::result::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

impl<F: FileSystem> TsConfigLoader<F> {
    /// Path of the file whose `compilerOptions.paths` ends up in effect
    ///
    /// A file declaring `paths` (even `{}`) overrides anything it extends.
    /// With a list of extends, the last entry that leads to a declaration
    /// wins, matching merge order. `None` if no file in the chain has the
    /// key.
    pub fn find_paths_declaration(&self, config_path: &Path) -> Result<Option<PathBuf>> {
        let declared_by = self.find_declaration(config_path, &mut ExtendsStack::default())?;
        if let Some(declared_by) = &declared_by {
            debug!("paths declared in {}", declared_by.display());
        }
        Ok(declared_by)
    }

    fn find_declaration(
        &self,
        config_path: &Path,
        stack: &mut ExtendsStack,
    ) -> Result<Option<PathBuf>> {
        let Some(config) = self.read_config(config_path)? else {
            return Ok(None);
        };

        let mut declared_by = None;

        if let Some(extends) = config.extends.as_ref().filter(|e| e.is_set()) {
            stack.enter(config_path)?;
            match extends {
                Extends::Single(reference) => {
                    let extended_path = self.resolve_extends_path(config_path, reference);
                    declared_by = self.find_declaration(&extended_path, stack)?;
                }
                Extends::Many(references) => {
                    for reference in references {
                        let extended_path = self.resolve_extends_path(config_path, reference);
                        if let Some(found) = self.find_declaration(&extended_path, stack)? {
                            declared_by = Some(found);
                        }
                    }
                }
            }
            stack.leave();
        }

        if config.declares_paths() {
            return Ok(Some(config_path.to_path_buf()));
        }

        Ok(declared_by)
    }
}
