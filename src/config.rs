//! Deck configuration.
//!
//! Every field has a default matching the standard three-page deck, so an
//! empty TOML document is a valid configuration. [`DeckConfig::validate`]
//! accumulates every problem instead of stopping at the first one.

use crate::effects::TransitionTiming;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single configuration problem.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Deck needs at least one page")]
    NoPages,

    #[error("Page id prefix must not be empty")]
    EmptyPagePrefix,

    #[error("Fragment prefix must start with '#' (got '{0}')")]
    InvalidFragmentPrefix(String),

    #[error("Swipe threshold must be a finite, non-negative distance (got {0})")]
    InvalidSwipeThreshold(f64),

    #[error("Asset URL #{index} is empty")]
    EmptyAssetUrl { index: usize },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Number of pages in the deck
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
    /// Page element ids are this prefix followed by the page number
    #[serde(default = "default_page_id_prefix")]
    pub page_id_prefix: String,
    /// URL fragments addressing a page are this prefix followed by the number
    #[serde(default = "default_fragment_prefix")]
    pub fragment_prefix: String,
    /// Delay from fade-out start to committing the new page
    #[serde(default = "default_fade_out_ms")]
    pub fade_out_ms: u64,
    /// Delay from commit to clearing the fade-in marker
    #[serde(default = "default_fade_in_ms")]
    pub fade_in_ms: u64,
    /// Horizontal distance a swipe must exceed to navigate
    #[serde(default = "default_swipe_threshold_px")]
    pub swipe_threshold_px: f64,
    /// Quiet period that ends a burst of resize events
    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: u64,
    /// Delay from the first interaction to fading the keyboard hint
    #[serde(default = "default_hint_delay_ms")]
    pub hint_delay_ms: u64,
    /// Delay from fading the keyboard hint to hiding it
    #[serde(default = "default_hint_hide_ms")]
    pub hint_hide_ms: u64,
    /// Images fetched into the cache at start-up
    #[serde(default = "default_asset_urls")]
    pub asset_urls: Vec<String>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            total_pages: default_total_pages(),
            page_id_prefix: default_page_id_prefix(),
            fragment_prefix: default_fragment_prefix(),
            fade_out_ms: default_fade_out_ms(),
            fade_in_ms: default_fade_in_ms(),
            swipe_threshold_px: default_swipe_threshold_px(),
            resize_debounce_ms: default_resize_debounce_ms(),
            hint_delay_ms: default_hint_delay_ms(),
            hint_hide_ms: default_hint_hide_ms(),
            asset_urls: default_asset_urls(),
        }
    }
}

fn default_total_pages() -> u32 {
    3
}

fn default_page_id_prefix() -> String {
    "page".to_string()
}

fn default_fragment_prefix() -> String {
    "#page".to_string()
}

fn default_fade_out_ms() -> u64 {
    300
}

fn default_fade_in_ms() -> u64 {
    400
}

fn default_swipe_threshold_px() -> f64 {
    50.0
}

fn default_resize_debounce_ms() -> u64 {
    250
}

fn default_hint_delay_ms() -> u64 {
    5000
}

fn default_hint_hide_ms() -> u64 {
    300
}

fn default_asset_urls() -> Vec<String> {
    vec![
        "https://www.figma.com/api/mcp/asset/36b0d3b8-ea42-4483-bf6c-80beda0750f1".to_string(),
        "https://www.figma.com/api/mcp/asset/009275fa-e36f-463d-a735-e12452cea327".to_string(),
        "https://www.figma.com/api/mcp/asset/47be17dd-2802-4d3d-8476-9c504d7eec74".to_string(),
    ]
}

impl DeckConfig {
    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Check every rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigError>>> = Vec::new();

        checks.push(check(self.total_pages >= 1, || ConfigError::NoPages));
        checks.push(check(!self.page_id_prefix.is_empty(), || {
            ConfigError::EmptyPagePrefix
        }));
        checks.push(check(
            self.fragment_prefix.starts_with('#'),
            || ConfigError::InvalidFragmentPrefix(self.fragment_prefix.clone()),
        ));
        checks.push(check(
            self.swipe_threshold_px.is_finite() && self.swipe_threshold_px >= 0.0,
            || ConfigError::InvalidSwipeThreshold(self.swipe_threshold_px),
        ));
        for (index, url) in self.asset_urls.iter().enumerate() {
            checks.push(check(!url.trim().is_empty(), || {
                ConfigError::EmptyAssetUrl { index }
            }));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate and collect the violations into a plain list.
    pub fn violations(&self) -> Vec<ConfigError> {
        match self.validate() {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    pub fn timing(&self) -> TransitionTiming {
        TransitionTiming {
            fade_out: Duration::from_millis(self.fade_out_ms),
            fade_in: Duration::from_millis(self.fade_in_ms),
        }
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn hint_delay(&self) -> Duration {
        Duration::from_millis(self.hint_delay_ms)
    }

    pub fn hint_hide(&self) -> Duration {
        Duration::from_millis(self.hint_hide_ms)
    }
}

fn check<F>(ok: bool, error: F) -> Validation<(), NonEmptyVec<ConfigError>>
where
    F: FnOnce() -> ConfigError,
{
    if ok {
        Validation::success(())
    } else {
        Validation::fail(error())
    }
}
