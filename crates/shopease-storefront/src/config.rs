//! Storefront configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shopease_commerce::cart::PricingRules;
use shopease_observability::{LogFormat, LogLevel};
use shopease_ui::toast::DEFAULT_TOAST_DELAY_MS;
use shopease_ui::PageKind;

use crate::StorefrontError;

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["shopease.toml", ".shopease.toml", "shopease.json"];

/// Storefront configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Local storage settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Tax and shipping.
    #[serde(default)]
    pub pricing: PricingRules,

    /// Simulated order placement.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Notifications.
    #[serde(default)]
    pub ui: UiConfig,

    /// Logging.
    #[serde(default)]
    pub log: LogConfig,
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are JSON, everything else TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StorefrontError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            StorefrontError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        if is_json(path) {
            serde_json::from_str(&content).map_err(|e| {
                StorefrontError::Config(format!("failed to parse JSON config {}: {}", path.display(), e))
            })
        } else {
            toml::from_str(&content).map_err(|e| {
                StorefrontError::Config(format!("failed to parse TOML config {}: {}", path.display(), e))
            })
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StorefrontError> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self).map_err(|e| StorefrontError::Config(e.to_string()))?
        } else {
            toml::to_string_pretty(self).map_err(|e| StorefrontError::Config(e.to_string()))?
        };

        std::fs::write(path, content).map_err(|e| {
            StorefrontError::Config(format!("failed to write {}: {}", path.display(), e))
        })
    }

    /// Find a config file in `start` or any of its parents.
    ///
    /// Files that exist but fail to load are passed over and reported in
    /// [`ConfigSearch::skipped`].
    pub fn find(start: &Path) -> ConfigSearch {
        let mut search = ConfigSearch::default();
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let candidate = current.join(name);
                if !candidate.exists() {
                    continue;
                }
                match Self::load(&candidate) {
                    Ok(config) => {
                        search.found = Some((candidate, config));
                        return search;
                    }
                    Err(e) => search.skipped.push(e),
                }
            }

            if !current.pop() {
                return search;
            }
        }
    }
}

/// Result of searching the directory tree for a config file.
#[derive(Debug, Default)]
pub struct ConfigSearch {
    /// The first file that loaded, and its contents.
    pub found: Option<(PathBuf, StorefrontConfig)>,
    /// Load errors for files passed over on the way.
    pub skipped: Vec<StorefrontError>,
}

fn is_json(path: &Path) -> bool {
    path.extension().map(|ext| ext == "json").unwrap_or(false)
}

/// Local storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Key the cart is stored under.
    #[serde(default = "default_cart_key")]
    pub key: String,

    /// Storage file; defaults to the user data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_cart_key() -> String {
    "shopEaseCart".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key: default_cart_key(),
            path: None,
        }
    }
}

/// Simulated order placement timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// How long "Processing..." is shown before the order is placed.
    #[serde(default = "default_delay_ms")]
    pub processing_delay_ms: u64,

    /// Pause between the success toast and the redirect.
    #[serde(default = "default_delay_ms")]
    pub redirect_delay_ms: u64,

    /// Page shown after a successful order.
    #[serde(default = "default_redirect_url")]
    pub redirect_url: String,
}

fn default_delay_ms() -> u64 {
    2000
}

fn default_redirect_url() -> String {
    PageKind::Home.path().to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: default_delay_ms(),
            redirect_delay_ms: default_delay_ms(),
            redirect_url: default_redirect_url(),
        }
    }
}

impl CheckoutConfig {
    /// Checkout with no artificial waiting.
    pub fn immediate() -> Self {
        Self {
            processing_delay_ms: 0,
            redirect_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

/// Notification settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Toast auto-hide delay.
    #[serde(default = "default_toast_delay_ms")]
    pub toast_delay_ms: u64,
}

fn default_toast_delay_ms() -> u64 {
    DEFAULT_TOAST_DELAY_MS
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_delay_ms: default_toast_delay_ms(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum level emitted.
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Generate a commented default `shopease.toml`.
pub fn generate_default_config() -> String {
    r#"# ShopEase storefront configuration

[store]
key = "shopEaseCart"
# path = "/home/me/.local/share/shopease/storage.json"

[pricing]
# 9% sales tax, in basis points
tax_rate_bps = 900
# Orders above $50.00 ship free
free_shipping_over_cents = 5000
shipping_fee_cents = 999

[checkout]
processing_delay_ms = 2000
redirect_delay_ms = 2000
redirect_url = "index.html"

[ui]
toast_delay_ms = 3000

[log]
level = "warn"
format = "human"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let parsed: StorefrontConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, StorefrontConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: StorefrontConfig = toml::from_str(
            r#"
[pricing]
tax_rate_bps = 800

[checkout]
processing_delay_ms = 10
"#,
        )
        .unwrap();

        assert_eq!(parsed.pricing.tax_rate_bps, 800);
        assert_eq!(parsed.pricing.shipping_fee_cents, 999);
        assert_eq!(parsed.checkout.processing_delay(), Duration::from_millis(10));
        assert_eq!(parsed.checkout.redirect_url, "index.html");
        assert_eq!(parsed.store.key, "shopEaseCart");
    }

    #[test]
    fn test_save_and_load_roundtrip_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StorefrontConfig::default();
        config.store.key = "otherCart".to_string();
        config.log.level = LogLevel::Debug;

        for name in ["shopease.toml", "shopease.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(StorefrontConfig::load(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_find_walks_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join("shopease.toml"),
            "[ui]\ntoast_delay_ms = 500\n",
        )
        .unwrap();

        let search = StorefrontConfig::find(&nested);
        assert!(search.skipped.is_empty());
        let (path, config) = search.found.unwrap();
        assert_eq!(path, dir.path().join("shopease.toml"));
        assert_eq!(config.ui.toast_delay_ms, 500);
    }

    #[test]
    fn test_find_reports_unparseable_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("shopease.toml"), "[ui\ntoast_delay_ms = 500\n").unwrap();
        std::fs::write(
            dir.path().join("shopease.toml"),
            "[ui]\ntoast_delay_ms = 700\n",
        )
        .unwrap();

        let search = StorefrontConfig::find(&nested);
        assert_eq!(search.skipped.len(), 1);
        let message = search.skipped[0].to_string();
        assert!(message.contains(&nested.join("shopease.toml").display().to_string()));

        let (path, config) = search.found.unwrap();
        assert_eq!(path, dir.path().join("shopease.toml"));
        assert_eq!(config.ui.toast_delay_ms, 700);
    }

    #[test]
    fn test_load_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shopease.toml");
        std::fs::write(&path, "[pricing]\ntax_rate_bps = \"lots\"\n").unwrap();

        let err = StorefrontConfig::load(&path).unwrap_err();
        assert!(matches!(err, StorefrontError::Config(_)));
    }
}
