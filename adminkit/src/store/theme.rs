// adminkit/src/store/theme.rs
//
// Theme slice: a base colour map, per-module overrides, and the JSON document
// used to export and re-import a customisation.
//

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::errors::AdminError;

pub type ColorMap = BTreeMap<String, String>;

pub const THEME_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

pub fn default_colors(mode: ThemeMode) -> ColorMap {
    let (background, surface, text) = match mode {
        ThemeMode::Light => ("#ffffff", "#f8fafc", "#0f172a"),
        ThemeMode::Dark => ("#0f172a", "#1e293b", "#f1f5f9"),
    };

    [
        ("primary", "#3b82f6"),
        ("secondary", "#8b5cf6"),
        ("accent", "#06b6d4"),
        ("background", background),
        ("surface", surface),
        ("text", text),
        ("success", "#22c55e"),
        ("warning", "#f59e0b"),
        ("error", "#ef4444"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeState {
    pub mode: ThemeMode,
    pub colors: ColorMap,
    pub module_colors: BTreeMap<String, ColorMap>,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Light,
            colors: default_colors(ThemeMode::Light),
            module_colors: BTreeMap::new(),
        }
    }
}

impl ThemeState {
    /// CSS custom properties for the current theme, base colours first.
    pub fn css_variables(&self) -> Vec<(String, String)> {
        let base = self
            .colors
            .iter()
            .map(|(key, value)| (format!("--color-{}", key), value.clone()));
        let modules = self.module_colors.iter().flat_map(|(module, colors)| {
            colors
                .iter()
                .map(move |(key, value)| (format!("--{}-{}", module, key), value.clone()))
        });
        base.chain(modules).collect()
    }

    /// Colour for `key` as seen by `module`, falling back to the base map.
    pub fn resolve(&self, module: &str, key: &str) -> Option<&str> {
        self.module_colors
            .get(module)
            .and_then(|colors| colors.get(key))
            .or_else(|| self.colors.get(key))
            .map(String::as_str)
    }

    pub fn to_config(&self) -> ThemeConfig {
        ThemeConfig {
            version: THEME_FORMAT_VERSION,
            mode: self.mode,
            colors: self.colors.clone(),
            module_colors: self.module_colors.clone(),
            exported_at: Some(Utc::now()),
        }
    }
}

/// Exported theme document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub mode: ThemeMode,
    pub colors: ColorMap,
    #[serde(default)]
    pub module_colors: BTreeMap<String, ColorMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
}

fn default_version() -> u32 {
    THEME_FORMAT_VERSION
}

impl ThemeConfig {
    pub fn to_json(&self) -> Result<String, AdminError> {
        serde_json::to_string_pretty(self).map_err(|e| AdminError::Unknown(e.to_string()))
    }

    pub fn from_json(raw: &str) -> Result<Self, AdminError> {
        let config: ThemeConfig =
            serde_json::from_str(raw).map_err(|e| AdminError::ImportError(e.to_string()))?;
        if config.version > THEME_FORMAT_VERSION {
            return Err(AdminError::ImportError(format!(
                "unsupported theme version {}",
                config.version
            )));
        }
        Ok(config)
    }

    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<(), AdminError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Unreadable files are reported the same way as malformed documents.
    pub fn import_from_file(path: impl AsRef<Path>) -> Result<Self, AdminError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| AdminError::ImportError(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ThemeAction {
    SetMode(ThemeMode),
    ToggleMode,
    SetColor { key: String, value: String },
    SetModuleColor { module: String, key: String, value: String },
    ResetModule(String),
    Reset,
    Import(ThemeConfig),
}

pub fn reduce(state: &mut ThemeState, action: ThemeAction) {
    match action {
        ThemeAction::SetMode(mode) => apply_mode(state, mode),
        ThemeAction::ToggleMode => {
            let mode = state.mode.toggled();
            apply_mode(state, mode);
        }
        ThemeAction::SetColor { key, value } => {
            state.colors.insert(key, value);
        }
        ThemeAction::SetModuleColor { module, key, value } => {
            state.module_colors.entry(module).or_default().insert(key, value);
        }
        ThemeAction::ResetModule(module) => {
            state.module_colors.remove(&module);
        }
        ThemeAction::Reset => {
            *state = ThemeState {
                mode: state.mode,
                colors: default_colors(state.mode),
                module_colors: BTreeMap::new(),
            };
        }
        ThemeAction::Import(config) => {
            state.mode = config.mode;
            state.colors = config.colors;
            state.module_colors = config.module_colors;
        }
    }
}

// Switching mode swaps the surface colours that still hold the previous
// mode's defaults; user-picked values stay.
fn apply_mode(state: &mut ThemeState, mode: ThemeMode) {
    if state.mode == mode {
        return;
    }
    let old = default_colors(state.mode);
    let new = default_colors(mode);
    for (key, value) in state.colors.iter_mut() {
        if old.get(key).map(String::as_str) == Some(value.as_str()) {
            if let Some(replacement) = new.get(key) {
                *value = replacement.clone();
            }
        }
    }
    state.mode = mode;
}
