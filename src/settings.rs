//! # Settings persistence
//!
//! Two JSON documents are kept on disk:
//!
//! - **window settings**: title, geometry, minimum size, appearance mode and
//!   color theme of the shell;
//! - **filler settings**: per [`Mode`], a list of named [`Preset`]s and the
//!   [`DateOffsets`] used to compute override dates.
//!
//! Settings values are immutable. Every change builds a new value through a
//! `with_*`/`updated` method, the handler writes the whole document, and
//! only then replaces its in-memory copy. Writes go to a temporary file that
//! is renamed over the target.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::dates::DateOffsets;
use crate::error::{Error, Result};
use crate::mapping::Mode;
use crate::overrides::OverrideRulesBuilder;

/// Light or dark shell theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppearanceMode {
    #[default]
    Dark,
    Light,
    System,
}

impl std::str::FromStr for AppearanceMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" => Ok(AppearanceMode::Dark),
            "light" => Ok(AppearanceMode::Light),
            "system" => Ok(AppearanceMode::System),
            _ => Err(format!("Unknown appearance mode '{}'. Use: dark, light or system", s)),
        }
    }
}

/// Shell window settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSettings {
    pub title: String,
    pub geometry: String,
    pub minsize_geometry: String,
    pub appearance_mode: AppearanceMode,
    pub color_theme: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "JSON filler".to_string(),
            geometry: "1100x580".to_string(),
            minsize_geometry: "900x500".to_string(),
            appearance_mode: AppearanceMode::Dark,
            color_theme: "blue".to_string(),
        }
    }
}

/// Partial update of [`WindowSettings`]; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct WindowSettingsUpdate {
    pub title: Option<String>,
    pub geometry: Option<String>,
    pub minsize_geometry: Option<String>,
    pub appearance_mode: Option<AppearanceMode>,
    pub color_theme: Option<String>,
}

impl WindowSettings {
    /// New settings with `update` applied.
    pub fn updated(&self, update: &WindowSettingsUpdate) -> Self {
        Self {
            title: update.title.clone().unwrap_or_else(|| self.title.clone()),
            geometry: update.geometry.clone().unwrap_or_else(|| self.geometry.clone()),
            minsize_geometry: update
                .minsize_geometry
                .clone()
                .unwrap_or_else(|| self.minsize_geometry.clone()),
            appearance_mode: update.appearance_mode.unwrap_or(self.appearance_mode),
            color_theme: update
                .color_theme
                .clone()
                .unwrap_or_else(|| self.color_theme.clone()),
        }
    }
}

/// Named set of override values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub contact_id: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub contract_number: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub communication_type: String,
}

impl Preset {
    /// Override rules pre-filled with this preset's values.
    pub fn rules(&self) -> OverrideRulesBuilder {
        OverrideRulesBuilder::default()
            .contact_id(&self.contact_id)
            .account_number(&self.account_number)
            .contract_number(&self.contract_number)
            .product_type(&self.product_type)
            .communication_type(&self.communication_type)
    }
}

/// Presets and date offsets of one mode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModeSettings {
    #[serde(default)]
    pub presets: Vec<Preset>,
    #[serde(default)]
    pub dates: DateOffsets,
}

impl ModeSettings {
    /// Look a preset up by name.
    pub fn preset(&self, name: &str) -> Result<&Preset> {
        self.presets
            .iter()
            .find(|preset| preset.name == name)
            .ok_or_else(|| Error::Preset {
                message: format!("No preset with name: '{}'", name),
            })
    }

    pub fn preset_names(&self) -> Vec<&str> {
        self.presets.iter().map(|preset| preset.name.as_str()).collect()
    }

    /// Copy with `preset` appended. Names are unique within a mode.
    pub fn with_preset(&self, preset: Preset) -> Result<Self> {
        if self.presets.iter().any(|existing| existing.name == preset.name) {
            return Err(Error::Preset {
                message: format!("Preset with name: '{}' already exist", preset.name),
            });
        }
        let mut next = self.clone();
        next.presets.push(preset);
        Ok(next)
    }

    /// Copy without the preset called `name`.
    pub fn without_preset(&self, name: &str) -> Result<Self> {
        let position = self
            .presets
            .iter()
            .position(|preset| preset.name == name)
            .ok_or_else(|| Error::Preset {
                message: format!("No preset with name: '{}'", name),
            })?;
        let mut next = self.clone();
        next.presets.remove(position);
        Ok(next)
    }

    /// Copy with one date offset replaced by name.
    pub fn with_date_offset(&self, key: &str, days: i64) -> Result<Self> {
        Ok(Self {
            presets: self.presets.clone(),
            dates: self.dates.with_offset(key, days)?,
        })
    }
}

/// Per-mode filler settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FillerSettings {
    #[serde(default)]
    pub mono: ModeSettings,
    #[serde(default)]
    pub double: ModeSettings,
}

impl FillerSettings {
    pub fn mode(&self, mode: Mode) -> &ModeSettings {
        match mode {
            Mode::Mono => &self.mono,
            Mode::Double => &self.double,
        }
    }

    /// Copy with the settings of `mode` replaced.
    pub fn with_mode(&self, mode: Mode, settings: ModeSettings) -> Self {
        let mut next = self.clone();
        match mode {
            Mode::Mono => next.mono = settings,
            Mode::Double => next.double = settings,
        }
        next
    }
}

/// A JSON document on disk, read and written whole.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load<T: DeserializeOwned>(&self) -> Result<T> {
        let text = fs::read_to_string(&self.path).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                error!("No such file or directory: {}", self.path.display());
                Error::FileNotFound {
                    path: self.path.clone(),
                }
            } else {
                Error::Io(err)
            }
        })?;
        let value = serde_json::from_str(&text).map_err(|err| Error::Settings {
            message: format!("{}: {}", self.path.display(), err),
        })?;
        debug!("Read settings from {}", self.path.display());
        Ok(value)
    }

    pub fn save<T: Serialize>(&self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(value)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, text + "\n")?;
        fs::rename(&staging, &self.path)?;
        debug!("Wrote settings to {}", self.path.display());
        Ok(())
    }
}

/// Loads, updates and persists [`WindowSettings`].
#[derive(Debug)]
pub struct WindowSettingsHandler {
    store: JsonStore,
    current: WindowSettings,
}

impl WindowSettingsHandler {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = JsonStore::new(path);
        let current = store.load()?;
        Ok(Self { store, current })
    }

    pub fn current(&self) -> &WindowSettings {
        &self.current
    }

    pub fn update(&mut self, update: &WindowSettingsUpdate) -> Result<&WindowSettings> {
        let next = self.current.updated(update);
        self.store.save(&next)?;
        self.current = next;
        Ok(&self.current)
    }
}

/// Loads, updates and persists [`FillerSettings`].
#[derive(Debug)]
pub struct FillerSettingsHandler {
    store: JsonStore,
    current: FillerSettings,
}

impl FillerSettingsHandler {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = JsonStore::new(path);
        let current = store.load()?;
        Ok(Self { store, current })
    }

    pub fn current(&self) -> &FillerSettings {
        &self.current
    }

    /// Re-read the document, picking up changes made by another writer.
    pub fn reload(&mut self) -> Result<&FillerSettings> {
        self.current = self.store.load()?;
        Ok(&self.current)
    }

    pub fn preset(&self, mode: Mode, name: &str) -> Result<&Preset> {
        self.current.mode(mode).preset(name)
    }

    pub fn preset_names(&self, mode: Mode) -> Vec<&str> {
        self.current.mode(mode).preset_names()
    }

    pub fn date_offsets(&self, mode: Mode) -> DateOffsets {
        self.current.mode(mode).dates
    }

    pub fn add_preset(&mut self, mode: Mode, preset: Preset) -> Result<()> {
        let name = preset.name.clone();
        let updated = self.current.mode(mode).with_preset(preset)?;
        self.commit(self.current.with_mode(mode, updated))?;
        debug!("Added preset '{}' to '{}'", name, mode);
        Ok(())
    }

    pub fn delete_preset(&mut self, mode: Mode, name: &str) -> Result<()> {
        let updated = self.current.mode(mode).without_preset(name)?;
        self.commit(self.current.with_mode(mode, updated))?;
        debug!("Deleted preset '{}' from '{}'", name, mode);
        Ok(())
    }

    pub fn set_date_offset(&mut self, mode: Mode, key: &str, days: i64) -> Result<()> {
        self.set_date_offsets(mode, [(key, days)])
    }

    /// Replace several offsets with one write. Nothing is written if any
    /// name is unknown.
    pub fn set_date_offsets<'a>(
        &mut self,
        mode: Mode,
        updates: impl IntoIterator<Item = (&'a str, i64)>,
    ) -> Result<()> {
        let updated = updates
            .into_iter()
            .try_fold(self.current.mode(mode).clone(), |settings, (key, days)| {
                settings.with_date_offset(key, days)
            })?;
        self.commit(self.current.with_mode(mode, updated))
    }

    fn commit(&mut self, next: FillerSettings) -> Result<()> {
        self.store.save(&next)?;
        self.current = next;
        Ok(())
    }
}
