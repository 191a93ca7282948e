//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. A single file in
//! the content root overrides the stock defaults; every key is optional.
//!
//! ## Configuration Options
//!
//! ```toml
//! [site]
//! title = "Studio"
//! tagline = ""
//!
//! [blog]
//! page_size = 9          # Posts per listing page
//! related_limit = 3      # "More in this category" entries on a post page
//! default_sort = "latest"
//!
//! [portfolio]
//! page_size = 12
//! related_limit = 3
//! default_sort = "latest"
//!
//! [careers]
//! default_sort = "latest"
//!
//! [faq]
//! reset_on_filter = true # Collapse the open answer when the category changes
//!
//! [carousel]
//! swipe_threshold = 10000.0
//! autoplay_ms = 6000     # 0 disables autoplay
//!
//! [fallbacks]
//! author = "Unknown Author"
//! category = "Uncategorized"
//! department = "General"
//!
//! [colors]
//! accent = "#4f46e5"
//! background = "#ffffff"
//! text = "#111827"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::schema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub site: SiteInfo,
    pub blog: ListingConfig,
    pub portfolio: ListingConfig,
    pub careers: CareersConfig,
    pub faq: FaqConfig,
    pub carousel: CarouselConfig,
    pub fallbacks: FallbackConfig,
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteInfo::default(),
            blog: ListingConfig::default(),
            portfolio: ListingConfig {
                page_size: 12,
                ..ListingConfig::default()
            },
            careers: CareersConfig::default(),
            faq: FaqConfig::default(),
            carousel: CarouselConfig::default(),
            fallbacks: FallbackConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (section, listing) in [("blog", &self.blog), ("portfolio", &self.portfolio)] {
            if listing.page_size == 0 {
                return Err(ConfigError::Validation(format!(
                    "{section}.page_size must be at least 1"
                )));
            }
            if listing.related_limit == 0 {
                return Err(ConfigError::Validation(format!(
                    "{section}.related_limit must be at least 1"
                )));
            }
        }
        check_sort_key("blog", &self.blog.default_sort, schema::BLOG_SORTS)?;
        check_sort_key("portfolio", &self.portfolio.default_sort, schema::PORTFOLIO_SORTS)?;
        check_sort_key("careers", &self.careers.default_sort, schema::CAREERS_SORTS)?;

        let threshold = self.carousel.swipe_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::Validation(
                "carousel.swipe_threshold must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

fn check_sort_key(section: &str, key: &str, known: &[&str]) -> Result<(), ConfigError> {
    if known.contains(&key) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{section}.default_sort must be one of {known:?}, got \"{key}\""
        )))
    }
}

/// Site-wide identity shown in the header and page titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub title: String,
    pub tagline: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Studio".to_string(),
            tagline: String::new(),
        }
    }
}

/// Settings shared by the paginated grid surfaces (blog, portfolio).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    /// Items per listing page.
    pub page_size: usize,
    /// Maximum related items shown on a detail page.
    pub related_limit: usize,
    /// Sort key applied when a listing is first rendered.
    pub default_sort: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: 9,
            related_limit: 3,
            default_sort: schema::SORT_LATEST.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CareersConfig {
    pub default_sort: String,
}

impl Default for CareersConfig {
    fn default() -> Self {
        Self {
            default_sort: schema::SORT_LATEST.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaqConfig {
    /// Collapse the open answer whenever the category filter changes.
    pub reset_on_filter: bool,
}

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            reset_on_filter: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Minimum `|offset| * |velocity|` for a drag to count as a swipe.
    pub swipe_threshold: f64,
    /// Autoplay interval in milliseconds. `0` disables autoplay.
    pub autoplay_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 10_000.0,
            autoplay_ms: 6_000,
        }
    }
}

/// Labels embedded in place of a dangling reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FallbackConfig {
    pub author: String,
    pub category: String,
    pub department: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            author: "Unknown Author".to_string(),
            category: "Uncategorized".to_string(),
            department: "General".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub accent: String,
    pub background: String,
    pub text: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            accent: "#4f46e5".to_string(),
            background: "#ffffff".to_string(),
            text: "#111827".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Stock defaults as a `toml::Value::Table`, the base layer for user overrides.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
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

/// Load `config.toml` from `root`, merged over the stock defaults and validated.
///
/// A missing file yields the defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join("config.toml");
    let merged = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        let overlay: toml::Value = toml::from_str(&content)?;
        merge_toml(stock_defaults_value(), overlay)
    } else {
        stock_defaults_value()
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// A fully commented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Showcase configuration
# ======================
# Every setting is optional; the values below are the defaults.
# Unknown keys are rejected.

[site]
title = "Studio"
tagline = ""

# ---------------------------------------------------------------------------
# Listings
# ---------------------------------------------------------------------------
[blog]
# Posts per listing page.
page_size = 9
# Posts shown under "More in this category".
related_limit = 3
# One of: latest, oldest, popular, liked, title
default_sort = "latest"

[portfolio]
page_size = 12
related_limit = 3
# One of: latest, oldest, title
default_sort = "latest"

[careers]
# One of: latest, title
default_sort = "latest"

[faq]
# Collapse the open answer when the visitor switches category.
reset_on_filter = true

# ---------------------------------------------------------------------------
# Testimonials carousel
# ---------------------------------------------------------------------------
[carousel]
# A drag pages the carousel when |offset| * |velocity| exceeds this.
swipe_threshold = 10000.0
# Autoplay interval in milliseconds; 0 disables autoplay.
autoplay_ms = 6000

# ---------------------------------------------------------------------------
# Labels used when a record points at a missing author/category/department
# ---------------------------------------------------------------------------
[fallbacks]
author = "Unknown Author"
category = "Uncategorized"
department = "General"

[colors]
accent = "#4f46e5"
background = "#ffffff"
text = "#111827"
"##
}

/// CSS custom properties for the configured palette.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n    --color-accent: {};\n    --color-bg: {};\n    --color-text: {};\n}}",
        colors.accent, colors.background, colors.text
    )
}
