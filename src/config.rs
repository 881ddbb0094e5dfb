//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. The file lives at the
//! site root, next to the `content/` and `partials/` directories:
//!
//! ```text
//! site/
//! ├── site.toml                # Optional, overrides stock defaults
//! ├── index.html …             # (generated)
//! ├── content/
//! │   ├── sellers.json
//! │   └── …
//! ├── partials/
//! │   ├── header.html
//! │   └── footer.html
//! └── img/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! content_root = "content"     # Directory holding the JSON content documents
//! pages_segment = "/pages/"    # Path segment that marks nested pages
//!
//! [partials]
//! header = "partials/header.html"
//! footer = "partials/footer.html"
//!
//! [messages.sellers]
//! empty = "No sellers yet."
//! failed = "Sellers could not be loaded."
//!
//! [labels]
//! seller_web_cta = "Open seller site"
//!
//! [viewer]
//! social_opens_viewer = false
//! seller_max_photos = 3
//!
//! [processing]
//! max_processes = 4            # Parallel page builds (omit for auto)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::content::CollectionKind;
use crate::paths::DEFAULT_PAGES_SEGMENT;

pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory (relative to the site root) holding content documents.
    pub content_root: String,
    /// Path segment whose presence in the page path means "one level down".
    pub pages_segment: String,
    /// Layout partial locations.
    pub partials: PartialsConfig,
    /// Localized status texts per region.
    pub messages: MessagesConfig,
    /// Localized texts used on cards and inside viewers.
    pub labels: LabelsConfig,
    /// Viewer behavior switches.
    pub viewer: ViewerConfig,
    /// Parallel build settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_root: "content".to_string(),
            pages_segment: DEFAULT_PAGES_SEGMENT.to_string(),
            partials: PartialsConfig::default(),
            messages: MessagesConfig::default(),
            labels: LabelsConfig::default(),
            viewer: ViewerConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_root.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content_root must not be empty".into(),
            ));
        }
        if !self.pages_segment.starts_with('/') || !self.pages_segment.ends_with('/') {
            return Err(ConfigError::Validation(
                "pages_segment must start and end with '/'".into(),
            ));
        }
        if self.viewer.seller_max_photos == 0 {
            return Err(ConfigError::Validation(
                "viewer.seller_max_photos must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Path of a content document relative to the site root,
    /// e.g. `content/sellers.json`.
    pub fn document_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.content_root.trim_end_matches('/'), file_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialsConfig {
    pub header: String,
    pub footer: String,
}

impl Default for PartialsConfig {
    fn default() -> Self {
        Self {
            header: "partials/header.html".to_string(),
            footer: "partials/footer.html".to_string(),
        }
    }
}

/// Empty-state and failure texts for one card collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionMessages {
    /// Shown in the intro when no record survives validation.
    pub empty: String,
    /// Shown in the intro when the document cannot be fetched or parsed.
    pub failed: String,
}

impl CollectionMessages {
    fn new(empty: &str, failed: &str) -> Self {
        Self {
            empty: empty.to_string(),
            failed: failed.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomeMessages {
    pub featured_social: String,
    pub no_social: String,
    pub failed: String,
}

impl Default for HomeMessages {
    fn default() -> Self {
        Self {
            featured_social: "Featured posts (click to open the original).".to_string(),
            no_social: "No posts yet.".to_string(),
            failed: "The homepage content could not be loaded.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AboutMessages {
    /// Title put back when the about document fails.
    pub fallback_title: String,
    pub failed: String,
}

impl Default for AboutMessages {
    fn default() -> Self {
        Self {
            fallback_title: "About".to_string(),
            failed: "The content could not be loaded.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactsMessages {
    pub failed: String,
}

impl Default for ContactsMessages {
    fn default() -> Self {
        Self {
            failed: "Contacts could not be loaded.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MessagesConfig {
    pub sellers: CollectionMessages,
    pub sponsors: CollectionMessages,
    pub gallery: CollectionMessages,
    pub social: CollectionMessages,
    pub home: HomeMessages,
    pub about: AboutMessages,
    pub contacts: ContactsMessages,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            sellers: CollectionMessages::new("No sellers yet.", "Sellers could not be loaded."),
            sponsors: CollectionMessages::new("No sponsors yet.", "Sponsors could not be loaded."),
            gallery: CollectionMessages::new(
                "The gallery is empty for now.",
                "The gallery could not be loaded.",
            ),
            social: CollectionMessages::new("No posts yet.", "Posts could not be loaded."),
            home: HomeMessages::default(),
            about: AboutMessages::default(),
            contacts: ContactsMessages::default(),
        }
    }
}

impl MessagesConfig {
    pub fn for_collection(&self, kind: CollectionKind) -> &CollectionMessages {
        match kind {
            CollectionKind::Sellers => &self.sellers,
            CollectionKind::Sponsors => &self.sponsors,
            CollectionKind::Gallery => &self.gallery,
            CollectionKind::Social => &self.social,
        }
    }
}

/// Texts placed on cards and in viewers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelsConfig {
    /// Seller call-to-action when the link type is `social`.
    pub seller_social_cta: String,
    /// Seller call-to-action for any other link type.
    pub seller_web_cta: String,
    /// Action inside the social-post viewer.
    pub social_post_cta: String,
    /// Prefix of a seller card's accessible label (`"Detail: <name>"`).
    pub seller_detail: String,
    /// Suffix of a linked sponsor card's accessible label.
    pub sponsor_open_site: String,
    /// Word used in generated photo descriptions (`"<name> – photo 2"`).
    pub photo: String,
    /// Fallback label for a gallery tile without caption or alt (`"Photo 3"`).
    pub gallery_tile: String,
    /// Fallback label for a social tile without alt text.
    pub social_tile: String,
    /// Fallback name for a featured sponsor on the home page.
    pub sponsor: String,
    /// Fallback caption for a featured post on the home page.
    pub post: String,
    /// Suffix of a featured post's accessible label.
    pub open: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            seller_social_cta: "Open social profiles".to_string(),
            seller_web_cta: "Open seller site".to_string(),
            social_post_cta: "Open post".to_string(),
            seller_detail: "Detail".to_string(),
            sponsor_open_site: "open website".to_string(),
            photo: "photo".to_string(),
            gallery_tile: "Photo".to_string(),
            social_tile: "Open post".to_string(),
            sponsor: "Sponsor".to_string(),
            post: "Post".to_string(),
            open: "open".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Social tiles open the social-post viewer instead of linking out.
    pub social_opens_viewer: bool,
    /// Maximum photos shown in the seller detail viewer.
    pub seller_max_photos: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            social_opens_viewer: false,
            seller_max_photos: 3,
        }
    }
}

/// Parallel build settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of pages hydrated in parallel.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, never below one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `site.toml` from a site root as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(site_root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = site_root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config for a site root: user values over stock defaults, unknown
/// keys rejected, result validated.
pub fn load_config(site_root: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(site_root)? {
        Some(overlay) => merge_toml(stock_defaults_value()?, overlay),
        None => stock_defaults_value()?,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Vitrine Site Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Directory holding the JSON content documents, relative to the site root.
content_root = "content"

# Pages whose path contains this segment live one directory down, so every
# content and asset path they use is prefixed with "../".
pages_segment = "/pages/"

# ---------------------------------------------------------------------------
# Layout partials (injected into #site-header / #site-footer)
# ---------------------------------------------------------------------------
[partials]
header = "partials/header.html"
footer = "partials/footer.html"

# ---------------------------------------------------------------------------
# Status messages written into each region's intro text
# ---------------------------------------------------------------------------
[messages.sellers]
empty = "No sellers yet."
failed = "Sellers could not be loaded."

[messages.sponsors]
empty = "No sponsors yet."
failed = "Sponsors could not be loaded."

[messages.gallery]
empty = "The gallery is empty for now."
failed = "The gallery could not be loaded."

[messages.social]
empty = "No posts yet."
failed = "Posts could not be loaded."

[messages.home]
featured_social = "Featured posts (click to open the original)."
no_social = "No posts yet."
failed = "The homepage content could not be loaded."

[messages.about]
fallback_title = "About"
failed = "The content could not be loaded."

[messages.contacts]
failed = "Contacts could not be loaded."

# ---------------------------------------------------------------------------
# Card and viewer texts
# ---------------------------------------------------------------------------
[labels]
seller_social_cta = "Open social profiles"
seller_web_cta = "Open seller site"
social_post_cta = "Open post"
seller_detail = "Detail"
sponsor_open_site = "open website"
photo = "photo"
gallery_tile = "Photo"
social_tile = "Open post"
sponsor = "Sponsor"
post = "Post"
open = "open"

# ---------------------------------------------------------------------------
# Viewers
# ---------------------------------------------------------------------------
[viewer]
# Social tiles link straight to the original post. Set to true to open the
# social-post viewer instead.
social_opens_viewer = false

# Maximum photos shown in the seller detail viewer.
seller_max_photos = 3

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum pages built in parallel by `vitrine build`.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_paths() {
        let config = SiteConfig::default();
        assert_eq!(config.content_root, "content");
        assert_eq!(config.pages_segment, "/pages/");
        assert_eq!(config.document_path("sellers.json"), "content/sellers.json");
    }

    #[test]
    fn document_path_tolerates_trailing_slash() {
        let config = SiteConfig {
            content_root: "data/".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(config.document_path("home.json"), "data/home.json");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[labels]
seller_web_cta = "Otevřít web prodejce"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.labels.seller_web_cta, "Otevřít web prodejce");
        // Same table, untouched key
        assert_eq!(config.labels.seller_social_cta, "Open social profiles");
        // Sibling tables keep their defaults
        assert_eq!(config.messages.sponsors.empty, "No sponsors yet.");
    }

    #[test]
    fn collection_messages_need_both_keys_without_merge() {
        // Sparse collection tables only work through `load_config`, which
        // merges onto the stock defaults first.
        let result: Result<SiteConfig, _> = toml::from_str("[messages.sellers]\nempty = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn messages_for_collection() {
        let messages = MessagesConfig::default();
        assert_eq!(
            messages.for_collection(CollectionKind::Gallery).failed,
            "The gallery could not be loaded."
        );
        assert_eq!(
            messages.for_collection(CollectionKind::Social).empty,
            "No posts yet."
        );
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.content_root, "content");
        assert!(!config.viewer.social_opens_viewer);
    }

    #[test]
    fn load_config_merges_over_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[messages.sellers]
failed = "Prodejce se nepodařilo načíst."

[viewer]
social_opens_viewer = true
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.messages.sellers.failed, "Prodejce se nepodařilo načíst.");
        // Same table, untouched key
        assert_eq!(config.messages.sellers.empty, "No sellers yet.");
        assert!(config.viewer.social_opens_viewer);
        assert_eq!(config.viewer.seller_max_photos, 3);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
pages_segment = "pages"
"#,
        )
        .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r#"
[messages.gallery]
empty = "a"
failed = "b"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[messages.gallery]
empty = "c"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let gallery = merged.get("messages").unwrap().get("gallery").unwrap();
        assert_eq!(gallery.get("empty").unwrap().as_str(), Some("c"));
        assert_eq!(gallery.get("failed").unwrap().as_str(), Some("b"));
    }

    #[test]
    fn merge_toml_scalar_replaces_table() {
        let base: toml::Value = toml::from_str("[viewer]\nseller_max_photos = 3").unwrap();
        let overlay: toml::Value = toml::from_str("viewer = 1").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("viewer").unwrap().as_integer(), Some(1));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[viewer]\nsocial_opens = true");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[messagez]\nx = 1");
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_zero_photos() {
        let mut config = SiteConfig::default();
        config.viewer.seller_max_photos = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("seller_max_photos"));
    }

    #[test]
    fn validate_empty_content_root() {
        let mut config = SiteConfig::default();
        config.content_root = "  ".to_string();
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // Processing config tests
    // =========================================================================

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_never_zero() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.content_root, defaults.content_root);
        assert_eq!(config.pages_segment, defaults.pages_segment);
        assert_eq!(config.messages.home.featured_social, defaults.messages.home.featured_social);
        assert_eq!(config.messages.gallery.empty, defaults.messages.gallery.empty);
        assert_eq!(config.labels.seller_social_cta, defaults.labels.seller_social_cta);
        assert_eq!(config.labels.open, defaults.labels.open);
        assert_eq!(config.viewer.seller_max_photos, defaults.viewer.seller_max_photos);
        assert_eq!(config.processing.max_processes, None);
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value().unwrap();
        for key in ["partials", "messages", "labels", "viewer", "processing"] {
            assert!(val.get(key).is_some(), "missing section {key}");
        }
    }
}
