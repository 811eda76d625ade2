//! tsconfig.json loading and `paths` resolution
//!
//! This module turns a project directory into the `baseUrl` and `paths`
//! that are in effect for it:
//! - Discovery of `tsconfig.json` / `jsconfig.json` by walking up directories
//! - JSONC parsing (comments, trailing commas, byte-order mark)
//! - Inheritance through the `extends` field, single or list form
//! - Tracking which file in the chain declared `paths`
//!
//! ## Configuration Inheritance
//!
//! ```jsonc
//! // packages/app/tsconfig.json
//! {
//!   "extends": "../../tsconfig.base.json",
//!   "compilerOptions": { "strict": true }
//! }
//! ```
//!
//! Extended configs are merged first and the file's own settings are
//! applied on top. With a list, later entries override earlier ones.
//! A `baseUrl` inherited from another file is rewritten relative to the
//! inheriting file.
//!
//! ## Anchoring `paths`
//!
//! When the chain has `paths` but no `baseUrl`, the templates are relative
//! to the file that declared `paths`, so [`ResolvedSettings::anchor_path`]
//! points there rather than at the file that was loaded.

mod declaration;
mod discovery;
mod loader;
mod merge;
mod resolver;
mod tsconfig;

pub use discovery::CONFIG_FILE_NAMES;
pub use loader::TsConfigLoader;
pub use merge::merge_tsconfigs;
pub use resolver::{BASE_URL_ENV, PROJECT_ENV, ResolvedSettings};
pub use tsconfig::{CompilerOptions, Extends, PathMappings, TsConfig};
