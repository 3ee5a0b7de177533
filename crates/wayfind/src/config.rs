use serde::{Deserialize, Serialize};
use std::path::Path;

use navindex::NavSection;

use crate::error::{EngineError, EngineResult};
use crate::gesture::Corner;
use crate::keys::Shortcut;
use crate::scrollspy::DEFAULT_LOOKAHEAD_MARGIN;

pub const NAVIGATION_CONFIG_FILENAME: &str = "navigation.json";
pub const NAVIGATION_CONFIG_VERSION: &str = "1.0.0";

/// Authored lookahead margins are clamped into this range on load.
const LOOKAHEAD_MARGIN_MIN: f64 = 80.0;
const LOOKAHEAD_MARGIN_MAX: f64 = 100.0;

/// The navigation configuration document: the static tree plus surface
/// preferences. Authored at build time, read-only at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    pub version: String,
    pub tree: Vec<NavSection>,
    pub palette: PalettePrefs,
    pub scrollspy: ScrollSpyPrefs,
    pub dock: DockPrefs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PalettePrefs {
    /// Labels of the curated entries shown before any query is typed.
    /// Matched against index entry labels exactly; labels that match
    /// nothing are reported at engine build.
    pub preloaded_labels: Vec<String>,
    pub shortcut: Shortcut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollSpyPrefs {
    pub lookahead_margin: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockPrefs {
    pub snap_margin: f64,
    pub corner: Corner,
}

impl NavigationConfig {
    pub fn default_new() -> Self {
        Self {
            version: NAVIGATION_CONFIG_VERSION.to_string(),
            tree: Vec::new(),
            palette: PalettePrefs {
                preloaded_labels: Vec::new(),
                shortcut: Shortcut::default_open(),
            },
            scrollspy: ScrollSpyPrefs {
                lookahead_margin: DEFAULT_LOOKAHEAD_MARGIN,
            },
            dock: DockPrefs {
                snap_margin: 24.0,
                corner: Corner::BottomRight,
            },
        }
    }

    /// Load a config document. An unknown version degrades to defaults;
    /// an unreadable or unparseable file is an error for the caller to
    /// handle (typically by falling back to [`NavigationConfig::default_new`]).
    pub fn load(path: &Path) -> EngineResult<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("read {}: {e}", path.display())))?;
        let mut config: NavigationConfig = serde_json::from_str(&data)
            .map_err(|e| EngineError::Config(format!("parse {}: {e}", path.display())))?;

        if config.version != NAVIGATION_CONFIG_VERSION {
            tracing::warn!(
                "unknown navigation config version '{}', falling back to defaults",
                config.version
            );
            return Ok(Self::default_new());
        }

        let margin = config.scrollspy.lookahead_margin;
        let clamped = margin.clamp(LOOKAHEAD_MARGIN_MIN, LOOKAHEAD_MARGIN_MAX);
        if clamped != margin {
            tracing::warn!("lookahead margin {margin} clamped to {clamped}");
            config.scrollspy.lookahead_margin = clamped;
        }

        Ok(config)
    }

    /// Load the config at `path`, writing a default document there first if
    /// none exists.
    pub fn load_or_create(path: &Path) -> EngineResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default_new();
            config.save(path)?;
            Ok(config)
        }
    }

    pub fn save(&self, path: &Path) -> EngineResult<()> {
        let data = serde_json::to_string_pretty(self)
            .map_err(|e| EngineError::Config(format!("serialize config: {e}")))?;
        std::fs::write(path, data)
            .map_err(|e| EngineError::Config(format!("write {}: {e}", path.display())))?;
        Ok(())
    }
}
