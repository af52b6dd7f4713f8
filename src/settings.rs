//! Planner settings with persistence
//!
//! Settings are saved to `~/.config/loadout/settings.toml`. Only the
//! editable baseline and planner preferences live here, never a build.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use loadout_items::Class;
use loadout_rules::{EmptyFilter, EquipPolicy, Planner, SelectedClasses, StatBlock};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All planner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Baseline character stats the item bonuses are added to
    pub base_stats: StatBlock,
    pub planner: PlannerSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_stats: StatBlock::baseline(),
            planner: PlannerSettings::default(),
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("loadout"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk. A missing file gives defaults; a broken
    /// section falls back on its own defaults and keeps the rest.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("No config directory, planner starts from the default baseline");
            return Self::default();
        };

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No settings at {:?}, planner starts from the default baseline", path);
                return Self::default();
            }
            Err(e) => {
                warn!("Could not read {:?}: {}, using default settings", path, e);
                return Self::default();
            }
        };

        let settings = Self::from_toml_lenient(&content);
        info!(
            "Loaded settings from {:?} ({} classes selected)",
            path,
            settings.planner.classes.len()
        );
        settings
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Parse settings, recovering section by section. Text that is not TOML
    /// at all yields defaults.
    pub fn from_toml_lenient(content: &str) -> Self {
        match Self::from_toml(content) {
            Ok(settings) => return settings,
            Err(e) => warn!("Settings file has errors: {}", e.message()),
        }

        let table: toml::Table = match toml::from_str(content) {
            Ok(table) => table,
            Err(e) => {
                warn!("Settings file is not valid TOML ({}), using defaults", e.message());
                return Self::default();
            }
        };

        let mut settings = Self::default();
        if let Some(value) = table.get("base_stats") {
            match value.clone().try_into::<StatBlock>() {
                Ok(base_stats) => settings.base_stats = base_stats,
                Err(e) => warn!("Ignoring [base_stats]: {}, using the default baseline", e.message()),
            }
        }
        if let Some(value) = table.get("planner") {
            match value.clone().try_into::<PlannerSettings>() {
                Ok(planner) => settings.planner = planner,
                Err(e) => warn!("Ignoring [planner]: {}, using default preferences", e.message()),
            }
        }
        settings
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("No config directory to save settings in");
        };
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {:?}", dir))?;

        let path = dir.join("settings.toml");
        let content = toml::to_string_pretty(self).context("Failed to encode settings")?;
        fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
        info!("Saved baseline and planner preferences to {:?}", path);
        Ok(path)
    }

    /// Snapshot the preferences of a running session
    pub fn from_session(planner: &Planner, empty_filter: EmptyFilter) -> Self {
        Self {
            base_stats: *planner.base(),
            planner: PlannerSettings {
                enforce_class_eligibility: planner.policy().enforce_class_eligibility,
                empty_filter,
                classes: planner
                    .classes()
                    .classes()
                    .iter()
                    .map(|class| class.name().to_string())
                    .collect(),
            },
        }
    }

    /// Start a planner session from these settings
    pub fn planner(&self) -> Planner {
        Planner::new(self.base_stats, self.planner.selected_classes(), self.planner.policy())
    }
}

/// Planner behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Refuse to equip items no selected class can use
    pub enforce_class_eligibility: bool,
    /// What the item search shows before any criterion is entered
    pub empty_filter: EmptyFilter,
    /// Initially selected classes (1 to 3 names)
    pub classes: Vec<String>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            enforce_class_eligibility: true,
            empty_filter: EmptyFilter::Nothing,
            classes: vec![Class::Magician.name().to_string()],
        }
    }
}

impl PlannerSettings {
    pub fn policy(&self) -> EquipPolicy {
        EquipPolicy {
            enforce_class_eligibility: self.enforce_class_eligibility,
        }
    }

    /// Parse the class list, skipping unknown names
    pub fn selected_classes(&self) -> SelectedClasses {
        let classes = self.classes.iter().filter_map(|name| match name.parse::<Class>() {
            Ok(class) => Some(class),
            Err(e) => {
                warn!("Ignoring class in settings: {}", e);
                None
            }
        });
        SelectedClasses::from_classes(classes).unwrap_or_else(|| {
            warn!("No valid classes in settings, defaulting to Magician");
            SelectedClasses::default()
        })
    }
}
