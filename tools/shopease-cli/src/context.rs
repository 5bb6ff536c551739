//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use shopease_cache::FileStore;
use shopease_commerce::SessionId;
use shopease_observability::{LogLevel, StructuredLogger};
use shopease_storefront::{CartManager, StorefrontConfig};
use shopease_ui::PageKind;

use crate::output::Output;
use crate::terminal::{TerminalNotifier, TerminalView};

/// The cart manager as the CLI drives it.
pub type Manager = CartManager<FileStore, TerminalView, TerminalNotifier>;

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Session logger.
    pub logger: StructuredLogger,
    store_path: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, store_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config_path, config) = if let Some(path) = config_path {
            let path = resolve(&cwd, path);
            let config = StorefrontConfig::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            (Some(path), config)
        } else {
            // Try to find config in current directory or parent directories
            let search = StorefrontConfig::find(&cwd);
            for error in &search.skipped {
                output.warn(&format!("Ignoring config file: {}", error));
            }
            match search.found {
                Some((path, config)) => (Some(path), config),
                None => (None, StorefrontConfig::default()),
            }
        };

        let store_path = match store_path {
            Some(path) => resolve(&cwd, path),
            None => config
                .store
                .path
                .as_ref()
                .map(|p| resolve(&cwd, &p.to_string_lossy()))
                .unwrap_or_else(default_store_path),
        };

        let level = if output.is_verbose() {
            LogLevel::Debug
        } else {
            config.log.level
        };
        let logger = StructuredLogger::new(SessionId::generate().to_string())
            .with_component("cli")
            .with_min_level(level)
            .with_format(config.log.format);

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            logger,
            store_path,
        })
    }

    /// The storage file.
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Open the persisted cart as seen from `page`.
    pub fn manager(&self, page: PageKind) -> Result<Manager> {
        let store = FileStore::open(&self.store_path)
            .with_context(|| format!("Failed to open cart storage at {}", self.store_path.display()))?;
        self.output
            .debug(&format!("Using storage {}", self.store_path.display()));

        Ok(CartManager::load(
            store,
            TerminalView::new(self.output.clone(), page),
            TerminalNotifier::new(self.output.clone()),
            &self.config,
            &self.logger,
        ))
    }
}

/// Resolve a path relative to the working directory.
fn resolve(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Default storage file under the user data directory.
fn default_store_path() -> PathBuf {
    data_dir().join("shopease").join("storage.json")
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}
