//! Site options: the compiler catalogue and per-host defaults, stored as RON.
use std::fs;
use std::path::Path;
use std::time::Duration;

use compiler_panel_core::{
    CompilerInfo, FilterToggle, PanelDefaults, PanelSettings, DEFAULT_DEBOUNCE,
};
use compiler_panel_engine::ClientSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("could not read options file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse options: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteOptions {
    #[serde(default)]
    pub compilers: Vec<CompilerInfo>,
    /// Falls back to the first catalogue entry when unset.
    #[serde(default)]
    pub default_compiler: Option<String>,
    #[serde(default)]
    pub compile_options: String,
    #[serde(default = "default_filter_toggles")]
    pub filters: Vec<FilterToggle>,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            compilers: Vec::new(),
            default_compiler: None,
            compile_options: String::new(),
            filters: default_filter_toggles(),
            endpoint: default_endpoint(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl SiteOptions {
    pub fn from_ron_str(text: &str) -> Result<Self, OptionsError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let text = fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    pub fn default_compiler(&self) -> String {
        self.default_compiler
            .clone()
            .or_else(|| self.compilers.first().map(|compiler| compiler.id.clone()))
            .unwrap_or_default()
    }

    pub fn panel_settings(&self) -> PanelSettings {
        PanelSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            compilers: self.compilers.clone(),
            filter_toggles: self.filters.clone(),
        }
    }

    pub fn panel_defaults(&self) -> PanelDefaults {
        PanelDefaults::from_toggles(
            self.default_compiler(),
            self.compile_options.clone(),
            &self.filters,
        )
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            ..ClientSettings::default()
        }
    }
}

fn default_filter_toggles() -> Vec<FilterToggle> {
    [
        ("binary", "11010", false),
        ("labels", ".LX0:", true),
        ("directives", ".text", true),
        ("commentOnly", "//", true),
        ("intel", "Intel", true),
    ]
    .into_iter()
    .map(|(name, label, enabled_by_default)| FilterToggle {
        name: name.to_string(),
        label: label.to_string(),
        enabled_by_default,
    })
    .collect()
}

fn default_endpoint() -> String {
    ClientSettings::default().endpoint
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE.as_millis() as u64
}
