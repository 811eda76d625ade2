//! tspaths core
//!
//! Resolves the `baseUrl` and `paths` settings that are in effect for a
//! TypeScript or JavaScript project, following `extends` chains across
//! tsconfig files, and turns them into absolute mapping entries ordered for
//! longest-prefix matching.

pub mod config;
pub mod config_loader;
pub mod error;
pub mod fs;
pub mod mapping_entry;
pub mod path;
pub mod result;

// Re-export commonly used types
pub use config::{
    BASE_URL_ENV, CompilerOptions, Extends, PROJECT_ENV, PathMappings, ResolvedSettings, TsConfig,
    TsConfigLoader, merge_tsconfigs,
};
pub use config_loader::{ConfigLoaderResult, ConfigLoaderSuccess, ExplicitParams, config_loader};
pub use error::{ErrorKind, TsPathsError};
pub use fs::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use mapping_entry::{MappingEntry, get_absolute_mapping_entries};
pub use result::Result;

/// Initialize tracing for the application
///
/// `RUST_LOG` takes precedence over `default_filter`. Logs go to stderr so
/// they never mix with command output.
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
