//! Configuration merging logic
//!
//! Combines a base config (something reached through `extends`) with the
//! config that inherits from it.

use super::tsconfig::{CompilerOptions, TsConfig};

/// Merge `config` on top of `base`
///
/// Missing inputs count as empty configs. `compilerOptions` is merged key by
/// key with `config` winning and is always present in the result; every
/// other top-level field is taken from `config` when set, else from `base`.
pub fn merge_tsconfigs(base: Option<TsConfig>, config: Option<TsConfig>) -> TsConfig {
    let base = base.unwrap_or_default();
    let config = config.unwrap_or_default();

    let mut compiler_options = base.compiler_options.unwrap_or_default();
    compiler_options.merge_with(config.compiler_options.unwrap_or_default());

    let mut other = base.other;
    other.extend(config.other);

    TsConfig {
        extends: config.extends.or(base.extends),
        compiler_options: Some(compiler_options),
        other,
    }
}

impl CompilerOptions {
    /// Merge another settings block into this one (`overrides` takes precedence)
    ///
    /// A key `overrides` has wins even when its value is `null`.
    pub fn merge_with(&mut self, overrides: CompilerOptions) {
        if overrides.base_url.is_some() {
            self.base_url = overrides.base_url;
        }
        if overrides.paths.is_some() {
            self.paths = overrides.paths;
        }
        self.other.extend(overrides.other);
    }
}
