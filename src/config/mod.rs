//! Configuration for the panel demo and headless runner
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/panelswap/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::layout::GridProperties;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod panels;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use logging::{FileLogging, LogRotation, LoggingConfig};
pub use panels::{default_panels, FilePresentation, PanelContent, Presentation};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_ANIMATION_MS: u64 = 600;
const DEFAULT_TICK_MS: u64 = 33;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Slot shown first (clamped to the panel count)
    pub start_index: Option<usize>,

    /// Effects, panel classes and grid area names
    pub presentation: Presentation,

    /// Grid directives for the container
    pub grid: GridProperties,

    /// How long the demo stylesheet runs each motion
    pub animation_ms: u64,

    /// Demo redraw interval
    pub tick_ms: u64,

    /// Panel content, one entry per slot
    pub panels: Vec<PanelContent>,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_index: None,
            presentation: Presentation::default(),
            grid: demo_grid(),
            animation_ms: DEFAULT_ANIMATION_MS,
            tick_ms: DEFAULT_TICK_MS,
            panels: default_panels(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Panels above a three-row controls strip
fn demo_grid() -> GridProperties {
    GridProperties {
        column_sizes: "1fr".to_string(),
        row_sizes: "1fr 3".to_string(),
        template_areas: vec!["panel".to_string(), "controls".to_string()],
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub start_index: Option<usize>,
    pub animation_ms: Option<u64>,
    pub tick_ms: Option<u64>,

    /// Optional [presentation] section
    pub presentation: Option<FilePresentation>,

    /// Optional [grid] section
    pub grid: Option<FileGrid>,

    /// Optional [[panels]] entries
    pub panels: Option<Vec<PanelContent>>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

/// Grid directives as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileGrid {
    pub column_sizes: Option<String>,
    pub row_sizes: Option<String>,
    pub template_areas: Option<Vec<String>>,
}

impl FileGrid {
    /// Fill unset keys from the demo grid
    fn merge_over(self, defaults: GridProperties) -> GridProperties {
        GridProperties {
            column_sizes: self.column_sizes.unwrap_or(defaults.column_sizes),
            row_sizes: self.row_sizes.unwrap_or(defaults.row_sizes),
            template_areas: self.template_areas.unwrap_or(defaults.template_areas),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/panelswap/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("panelswap").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists (a file that fails to parse is an error)
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => {
                Err(e).with_context(|| format!("Cannot read config file {}", path.display()))
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config()?;
        Ok(Self::from_sources(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file with environment lookups
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Start index: env > file > none
        let start_index = env("PANELSWAP_START")
            .and_then(|v| v.parse().ok())
            .or(file.start_index);

        // Animation duration: env > file > default
        let animation_ms = env("PANELSWAP_ANIMATION_MS")
            .and_then(|v| v.parse().ok())
            .or(file.animation_ms)
            .unwrap_or(defaults.animation_ms);

        // Tick interval: file > default (never below 1ms)
        let tick_ms = file.tick_ms.unwrap_or(defaults.tick_ms).max(1);

        // Effects: env > file > default
        let presentation = Presentation::from_file(
            file.presentation,
            env("PANELSWAP_FORWARD"),
            env("PANELSWAP_BACKWARD"),
        );

        let grid = file.grid.unwrap_or_default().merge_over(defaults.grid);

        let panels = match file.panels {
            Some(panels) if !panels.is_empty() => panels,
            _ => defaults.panels,
        };

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            start_index,
            presentation,
            grid,
            animation_ms,
            tick_ms,
            panels,
            logging,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.panels.len()
    }
}
