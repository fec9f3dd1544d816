use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::SourceId;

/// Quiet period after the last trigger before a compile is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Set of enabled output filters.
///
/// Serialized the way the compile service and saved layouts expect it: a map
/// from filter name to `true`. Entries mapped to `false` are dropped on load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, bool>", into = "BTreeMap<String, bool>")]
pub struct FilterSet(BTreeSet<String>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Enables or disables `name`. Returns `true` if membership changed.
    pub fn set(&mut self, name: &str, enabled: bool) -> bool {
        if enabled {
            self.0.insert(name.to_string())
        } else {
            self.0.remove(name)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FilterSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, bool>> for FilterSet {
    fn from(map: BTreeMap<String, bool>) -> Self {
        map.into_iter()
            .filter_map(|(name, enabled)| enabled.then_some(name))
            .collect()
    }
}

impl From<FilterSet> for BTreeMap<String, bool> {
    fn from(set: FilterSet) -> Self {
        set.0.into_iter().map(|name| (name, true)).collect()
    }
}

/// One entry of the compiler catalogue offered in the compiler picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerInfo {
    pub id: String,
    pub name: String,
}

/// A filter toggle rendered in the panel's top bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterToggle {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub enabled_by_default: bool,
}

/// Static, per-host settings shared by every compiler panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSettings {
    pub debounce: Duration,
    pub compilers: Vec<CompilerInfo>,
    pub filter_toggles: Vec<FilterToggle>,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            compilers: Vec::new(),
            filter_toggles: Vec::new(),
        }
    }
}

/// Values used for any field missing from a restored panel state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelDefaults {
    pub compiler: String,
    pub options: String,
    pub filters: FilterSet,
    pub source: SourceId,
}

impl PanelDefaults {
    /// Defaults whose filter set is whatever the toggles start out enabled with.
    pub fn from_toggles(
        compiler: impl Into<String>,
        options: impl Into<String>,
        toggles: &[FilterToggle],
    ) -> Self {
        Self {
            compiler: compiler.into(),
            options: options.into(),
            filters: toggles
                .iter()
                .filter(|toggle| toggle.enabled_by_default)
                .map(|toggle| toggle.name.clone())
                .collect(),
            source: SourceId::default(),
        }
    }
}

/// Panel state as found in the layout system's state slot. Every field may be
/// absent: the slot can come from an older layout or be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedPanelState {
    pub compiler: Option<String>,
    pub options: Option<String>,
    pub source: Option<SourceId>,
    pub filters: Option<FilterSet>,
}

/// Configuration of one compiler panel. Mutated only by user interaction and
/// written back to the layout system after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub compiler: String,
    pub options: String,
    pub source: SourceId,
    pub filters: FilterSet,
}

impl PanelConfig {
    /// Merges restored state with `defaults`, field by field.
    ///
    /// An empty compiler id counts as missing; an empty options string is kept.
    pub fn resolve(restored: PersistedPanelState, defaults: &PanelDefaults) -> Self {
        Self {
            compiler: restored
                .compiler
                .filter(|compiler| !compiler.is_empty())
                .unwrap_or_else(|| defaults.compiler.clone()),
            options: restored
                .options
                .unwrap_or_else(|| defaults.options.clone()),
            source: restored
                .source
                .unwrap_or_else(|| defaults.source.clone()),
            filters: restored
                .filters
                .unwrap_or_else(|| defaults.filters.clone()),
        }
    }

    pub fn to_persisted(&self) -> PersistedPanelState {
        PersistedPanelState {
            compiler: Some(self.compiler.clone()),
            options: Some(self.options.clone()),
            source: Some(self.source.clone()),
            filters: Some(self.filters.clone()),
        }
    }
}
