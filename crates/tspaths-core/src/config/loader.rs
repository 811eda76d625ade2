//! Loading a tsconfig together with everything it extends

use super::merge::merge_tsconfigs;
use super::tsconfig::{Extends, TsConfig};
use crate::error::TsPathsError;
use crate::fs::{FileSystem, OsFileSystem};
use crate::path;
use crate::result::Result;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Loads tsconfig files and follows their `extends` chains
///
/// All file access goes through the wrapped [`FileSystem`].
#[derive(Debug, Clone, Default)]
pub struct TsConfigLoader<F = OsFileSystem> {
    fs: F,
}

impl TsConfigLoader<OsFileSystem> {
    /// Loader reading from the real file system
    pub fn new() -> Self {
        Self { fs: OsFileSystem }
    }
}

impl<F: FileSystem> TsConfigLoader<F> {
    pub fn with_file_system(fs: F) -> Self {
        Self { fs }
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// Load a config file and merge in everything it extends
    ///
    /// Returns `Ok(None)` when the file does not exist. A referenced file
    /// that does not exist contributes an empty config.
    pub fn load_tsconfig(&self, config_path: &Path) -> Result<Option<TsConfig>> {
        self.load_chain(config_path, &mut ExtendsStack::default())
    }

    fn load_chain(&self, config_path: &Path, stack: &mut ExtendsStack) -> Result<Option<TsConfig>> {
        let Some(config) = self.read_config(config_path)? else {
            return Ok(None);
        };

        let Some(extends) = config.extends.clone().filter(Extends::is_set) else {
            return Ok(Some(config));
        };

        stack.enter(config_path)?;
        let base = match extends {
            Extends::Single(reference) => self.load_from_extends(config_path, &reference, stack)?,
            Extends::Many(references) => {
                let mut base = TsConfig::default();
                for reference in &references {
                    let extended = self.load_from_extends(config_path, reference, stack)?;
                    base = merge_tsconfigs(Some(base), Some(extended));
                }
                base
            }
        };
        stack.leave();

        Ok(Some(merge_tsconfigs(Some(base), Some(config))))
    }

    /// Load one `extends` reference of `config_path`
    ///
    /// A `baseUrl` found in the extended config is relative to that file;
    /// it gets rewritten to be relative to `config_path` instead.
    fn load_from_extends(
        &self,
        config_path: &Path,
        reference: &str,
        stack: &mut ExtendsStack,
    ) -> Result<TsConfig> {
        let reference = with_json_suffix(reference);
        let extended_path = self.resolve_extends_path(config_path, &reference);
        debug!(
            "{} extends {}",
            config_path.display(),
            extended_path.display()
        );

        let mut config = self
            .load_chain(&extended_path, stack)?
            .unwrap_or_default();

        if let Some(options) = config.compiler_options.as_mut()
            && let Some(Some(base_url)) = options.base_url.as_mut()
            && !base_url.is_empty()
        {
            let extends_dir = path::dirname(Path::new(&reference));
            *base_url = path::join(&extends_dir, base_url.as_str())
                .to_string_lossy()
                .into_owned();
        }

        Ok(config)
    }

    /// Turn an `extends` value into the path of the file it names
    ///
    /// `.json` is appended when the value does not mention it, and the
    /// value is joined onto the directory of `config_path`. If that file
    /// does not exist and the value looks like a package path (it contains
    /// both `/` and `.`), the lookup moves under `node_modules`.
    pub fn resolve_extends_path(&self, config_path: &Path, reference: &str) -> PathBuf {
        let reference = with_json_suffix(reference);
        let current_dir = path::dirname(config_path);
        let candidate = path::join(&current_dir, &reference);

        if reference.contains('/') && reference.contains('.') && !self.fs.exists(&candidate) {
            let package_path = path::join(&path::join(&current_dir, "node_modules"), &reference);
            trace!(
                "{} not found, trying {}",
                candidate.display(),
                package_path.display()
            );
            return package_path;
        }

        candidate
    }

    /// Read and parse a single file without following `extends`
    pub(crate) fn read_config(&self, config_path: &Path) -> Result<Option<TsConfig>> {
        if !self.fs.exists(config_path) {
            trace!("No config at {}", config_path.display());
            return Ok(None);
        }

        let content = self.fs.read_to_string(config_path).map_err(|e| {
            if e.kind() == io::ErrorKind::InvalidData {
                TsPathsError::malformed(config_path, e.to_string())
            } else {
                TsPathsError::io(config_path, e)
            }
        })?;

        TsConfig::parse(&content, config_path).map(Some)
    }
}

fn with_json_suffix(reference: &str) -> String {
    if reference.contains(".json") {
        reference.to_string()
    } else {
        format!("{reference}.json")
    }
}

/// Files currently being expanded, outermost first
///
/// Only the active recursion path is tracked, so two branches extending the
/// same base file are fine; a file reached again from inside its own chain
/// is a cycle.
#[derive(Debug, Default)]
pub(crate) struct ExtendsStack {
    files: Vec<PathBuf>,
}

impl ExtendsStack {
    pub(crate) fn enter(&mut self, config_path: &Path) -> Result<()> {
        if self.files.iter().any(|file| file == config_path) {
            let chain = self
                .files
                .iter()
                .map(|file| file.as_path())
                .chain(std::iter::once(config_path))
                .map(|file| file.display().to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(TsPathsError::CircularExtends { chain });
        }
        self.files.push(config_path.to_path_buf());
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.files.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn loader(fs: MemoryFileSystem) -> TsConfigLoader<MemoryFileSystem> {
        TsConfigLoader::with_file_system(fs)
    }

    #[test]
    fn test_load_missing_file() {
        let loader = loader(MemoryFileSystem::new());
        assert_eq!(
            loader.load_tsconfig(Path::new("/repo/tsconfig.json")).unwrap(),
            None
        );
    }

    #[test]
    fn test_load_without_extends() {
        let loader = loader(MemoryFileSystem::new().with_file(
            "/repo/tsconfig.json",
            r#"{"compilerOptions": {"baseUrl": "./src", "strict": true}}"#,
        ));

        let config = loader
            .load_tsconfig(Path::new("/repo/tsconfig.json"))
            .unwrap()
            .unwrap();
        assert_eq!(config.base_url(), Some("./src"));
        assert_eq!(
            config.compiler_options.unwrap().other.get("strict"),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn test_extends_single() {
        let loader = loader(
            MemoryFileSystem::new()
                .with_file(
                    "/repo/base.json",
                    r#"{"compilerOptions": {"strict": true, "paths": {"@a/*": ["a/*"]}}}"#,
                )
                .with_file(
                    "/repo/tsconfig.json",
                    r#"{"extends": "./base", "compilerOptions": {"strict": false}}"#,
                ),
        );

        let config = loader
            .load_tsconfig(Path::new("/repo/tsconfig.json"))
            .unwrap()
            .unwrap();
        assert!(config.paths().unwrap().contains_key("@a/*"));
        assert_eq!(
            config.compiler_options.as_ref().unwrap().other.get("strict"),
            Some(&Value::Bool(false))
        );
        assert_eq!(config.extends, Some(Extends::Single("./base".to_string())));
    }

    #[test]
    fn test_extends_list_last_wins() {
        let loader = loader(
            MemoryFileSystem::new()
                .with_file(
                    "/repo/first.json",
                    r#"{"compilerOptions": {"baseUrl": "first", "paths": {"@a/*": ["a/*"]}}}"#,
                )
                .with_file(
                    "/repo/second.json",
                    r#"{"compilerOptions": {"baseUrl": "second"}}"#,
                )
                .with_file(
                    "/repo/tsconfig.json",
                    r#"{"extends": ["./first.json", "./second.json"]}"#,
                ),
        );

        let config = loader
            .load_tsconfig(Path::new("/repo/tsconfig.json"))
            .unwrap()
            .unwrap();
        assert_eq!(config.base_url(), Some("second"));
        assert!(config.paths().unwrap().contains_key("@a/*"));
    }

    #[test]
    fn test_own_settings_override_inherited() {
        let loader = loader(
            MemoryFileSystem::new()
                .with_file("/repo/base.json", r#"{"compilerOptions": {"baseUrl": "base"}}"#)
                .with_file(
                    "/repo/tsconfig.json",
                    r#"{"extends": ["./base.json"], "compilerOptions": {"baseUrl": "own"}}"#,
                ),
        );

        let config = loader
            .load_tsconfig(Path::new("/repo/tsconfig.json"))
            .unwrap()
            .unwrap();
        assert_eq!(config.base_url(), Some("own"));
    }

    #[test]
    fn test_inherited_base_url_is_reanchored() {
        let loader = loader(
            MemoryFileSystem::new()
                .with_file(
                    "/repo/configs/base.json",
                    r#"{"compilerOptions": {"baseUrl": "./src"}}"#,
                )
                .with_file(
                    "/repo/app/tsconfig.json",
                    r#"{"extends": "../configs/base.json"}"#,
                ),
        );

        let config = loader
            .load_tsconfig(Path::new("/repo/app/tsconfig.json"))
            .unwrap()
            .unwrap();
        assert_eq!(config.base_url(), Some("../configs/src"));
    }

    #[test]
    fn test_reanchoring_applies_at_every_level() {
        let loader = loader(
            MemoryFileSystem::new()
                .with_file(
                    "/repo/shared/root/base.json",
                    r#"{"compilerOptions": {"baseUrl": "lib"}}"#,
                )
                .with_file("/repo/shared/middle.json", r#"{"extends": "./root/base"}"#)
                .with_file("/repo/app/tsconfig.json", r#"{"extends": "../shared/middle"}"#),
        );

        let config = loader
            .load_tsconfig(Path::new("/repo/app/tsconfig.json"))
            .unwrap()
            .unwrap();
        assert_eq!(config.base_url(), Some("../shared/root/lib"));
    }

    #[test]
    fn test_missing_extended_file_is_empty() {
        let loader = loader(MemoryFileSystem::new().with_file(
            "/repo/tsconfig.json",
            r#"{"extends": "./missing", "compilerOptions": {"baseUrl": "."}}"#,
        ));

        let config = loader
            .load_tsconfig(Path::new("/repo/tsconfig.json"))
            .unwrap()
            .unwrap();
        assert_eq!(config.base_url(), Some("."));
    }

    #[test]
    fn test_malformed_extended_file_aborts() {
        let loader = loader(
            MemoryFileSystem::new()
                .with_file("/repo/base.json", "{ broken")
                .with_file("/repo/tsconfig.json", r#"{"extends": "./base.json"}"#),
        );

        let err = loader
            .load_tsconfig(Path::new("/repo/tsconfig.json"))
            .unwrap_err();
        match err {
            TsPathsError::MalformedConfig { path, .. } => {
                assert_eq!(path, PathBuf::from("/repo/base.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_extends_path_appends_json() {
        let loader = loader(MemoryFileSystem::new());
        assert_eq!(
            loader.resolve_extends_path(Path::new("/repo/app/tsconfig.json"), "base"),
            PathBuf::from("/repo/app/base.json")
        );
        assert_eq!(
            loader.resolve_extends_path(Path::new("/repo/app/tsconfig.json"), "base.json"),
            PathBuf::from("/repo/app/base.json")
        );
    }

    #[test]
    fn test_resolve_extends_path_node_modules_fallback() {
        let loader = loader(MemoryFileSystem::new().with_file(
            "/repo/node_modules/@tsconfig/node18/tsconfig.json",
            "{}",
        ));
        assert_eq!(
            loader.resolve_extends_path(
                Path::new("/repo/tsconfig.json"),
                "@tsconfig/node18/tsconfig.json"
            ),
            PathBuf::from("/repo/node_modules/@tsconfig/node18/tsconfig.json")
        );
    }

    #[test]
    fn test_resolve_extends_path_prefers_existing_sibling() {
        let loader = loader(
            MemoryFileSystem::new().with_file("/repo/configs/base.json", "{}"),
        );
        assert_eq!(
            loader.resolve_extends_path(Path::new("/repo/tsconfig.json"), "configs/base"),
            PathBuf::from("/repo/configs/base.json")
        );
    }

    #[test]
    fn test_resolve_extends_path_bare_name_has_no_fallback() {
        let loader = loader(MemoryFileSystem::new());
        assert_eq!(
            loader.resolve_extends_path(Path::new("/repo/tsconfig.json"), "base"),
            PathBuf::from("/repo/base.json")
        );
    }

    #[test]
    fn test_extends_from_node_modules_package() {
        let loader = loader(
            MemoryFileSystem::new()
                .with_file(
                    "/repo/node_modules/shared-config/tsconfig.json",
                    r#"{"compilerOptions": {"baseUrl": "src"}}"#,
                )
                .with_file(
                    "/repo/tsconfig.json",
                    r#"{"extends": "shared-config/tsconfig.json"}"#,
                ),
        );

        let config = loader
            .load_tsconfig(Path::new("/repo/tsconfig.json"))
            .unwrap()
            .unwrap();
        // Re-anchored from the reference string, not the node_modules path
        assert_eq!(config.base_url(), Some("shared-config/src"));
    }

    #[test]
    fn test_circular_extends() {
        let loader = loader(
            MemoryFileSystem::new()
                .with_file("/repo/a.json", r#"{"extends": "./b.json"}"#)
                .with_file("/repo/b.json", r#"{"extends": "./a.json"}"#),
        );

        let err = loader.load_tsconfig(Path::new("/repo/a.json")).unwrap_err();
        assert!(matches!(err, TsPathsError::CircularExtends { .. }));
        assert_eq!(
            err.to_string(),
            "Circular extends chain: /repo/a.json -> /repo/b.json -> /repo/a.json"
        );
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let loader = loader(
            MemoryFileSystem::new()
                .with_file("/repo/root.json", r#"{"compilerOptions": {"strict": true}}"#)
                .with_file("/repo/left.json", r#"{"extends": "./root.json"}"#)
                .with_file("/repo/right.json", r#"{"extends": "./root.json"}"#)
                .with_file(
                    "/repo/tsconfig.json",
                    r#"{"extends": ["./left.json", "./right.json"]}"#,
                ),
        );

        let config = loader
            .load_tsconfig(Path::new("/repo/tsconfig.json"))
            .unwrap()
            .unwrap();
        assert_eq!(
            config.compiler_options.unwrap().other.get("strict"),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn test_reanchored_base_url_keeps_trailing_slash() {
        let loader = loader(
            MemoryFileSystem::new()
                .with_file("/repo/base.json", r#"{"compilerOptions": {"baseUrl": "src/"}}"#)
                .with_file("/repo/app/tsconfig.json", r#"{"extends": "../base.json"}"#),
        );

        let config = loader
            .load_tsconfig(Path::new("/repo/app/tsconfig.json"))
            .unwrap()
            .unwrap();
        assert_eq!(config.base_url(), Some("../src/"));
    }

    #[test]
    fn test_null_base_url_is_not_reanchored() {
        let loader = loader(
            MemoryFileSystem::new()
                .with_file("/repo/base.json", r#"{"compilerOptions": {"baseUrl": "src"}}"#)
                .with_file(
                    "/repo/middle.json",
                    r#"{"extends": "./base.json", "compilerOptions": {"baseUrl": null}}"#,
                )
                .with_file("/repo/app/tsconfig.json", r#"{"extends": "../middle.json"}"#),
        );

        let config = loader
            .load_tsconfig(Path::new("/repo/app/tsconfig.json"))
            .unwrap()
            .unwrap();
        assert_eq!(config.base_url(), None);
        assert_eq!(config.compiler_options.unwrap().base_url, Some(None));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("tsconfig.json");
        std::fs::write(&config_path, [b'{', 0xff, 0xfe, b'}']).unwrap();

        let err = TsConfigLoader::new()
            .load_tsconfig(&config_path)
            .unwrap_err();
        match err {
            TsPathsError::MalformedConfig { path, .. } => assert_eq!(path, config_path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
