#![forbid(unsafe_code)]

//! Table layout persistence.
//!
//! Column widths and sort state are stored under
//!
//! ```text
//! <base>/pages/<page>/tables/<table>/<version>/columns/widths   "120,40,40"
//! <base>/pages/<page>/tables/<table>/<version>/sort/column       "2"
//! <base>/pages/<page>/tables/<table>/<version>/sort/order        "0" | "1"
//! ```
//!
//! The owning page picks `version` and bumps it when the column schema or
//! sort meaning changes; label edits keep it. Storage itself is a
//! [`SettingsBackend`] supplied by the host.
//!
//! # Save suppression
//!
//! If stored state already exists when persistence is enabled, saves are
//! ignored until the first [`TablePersistence::restore`] has run, so initial
//! layout cannot overwrite what the user saved last time.

use std::collections::BTreeMap;
use std::fmt;

use panelkit_widgets::{ColumnSet, ConfigurationWarning, PanelChrome, SortOrder, TableBody};
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_VERSION: &str = "v1";
const DEFAULT_BASE_PREFIX: &str = "ui";
const WIDTHS: &str = "columns/widths";
const SORT_COLUMN: &str = "sort/column";
const SORT_ORDER: &str = "sort/order";

/// Unreadable persisted data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    MalformedValue { key: String, value: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedValue { key, value } => {
                write!(f, "malformed value {value:?} at {key}")
            }
        }
    }
}

impl std::error::Error for SettingsError {}

/// Key-value storage for UI settings.
pub trait SettingsBackend {
    fn value(&self, key: &str) -> Option<String>;
    fn set_value(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str) -> Option<String>;
}

/// In-memory backend, serializable for tests and simple hosts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemorySettings {
    values: BTreeMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl SettingsBackend for MemorySettings {
    fn value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }
}

/// Namespaced accessors over a backend.
#[derive(Debug, Clone)]
pub struct SettingsStore<B> {
    backend: B,
    base_prefix: String,
}

impl<B: SettingsBackend> SettingsStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            base_prefix: DEFAULT_BASE_PREFIX.to_owned(),
        }
    }

    /// Replace the base prefix. An empty prefix stores keys unprefixed.
    #[must_use]
    pub fn base_prefix(mut self, prefix: &str) -> Self {
        prefix.trim().trim_matches('/').clone_into(&mut self.base_prefix);
        self
    }

    /// Join key parts, dropping blank parts and stray slashes.
    pub fn key(&self, parts: &[&str]) -> String {
        std::iter::once(self.base_prefix.as_str())
            .chain(parts.iter().map(|p| p.trim().trim_matches('/')))
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn value(&self, parts: &[&str]) -> Option<String> {
        self.backend.value(&self.key(parts))
    }

    pub fn set_value(&mut self, parts: &[&str], value: impl Into<String>) {
        let key = self.key(parts);
        self.backend.set_value(&key, value.into());
    }

    pub fn remove(&mut self, parts: &[&str]) -> Option<String> {
        let key = self.key(parts);
        self.backend.remove(&key)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}

/// Identifies one persisted table surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableKey {
    pub page_id: String,
    pub table_id: String,
    pub version: String,
}

impl TableKey {
    pub fn new(page_id: impl Into<String>, table_id: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
            table_id: table_id.into(),
            version: DEFAULT_VERSION.to_owned(),
        }
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// `pages/<page>/tables/<table>/<version>`.
    pub fn prefix(&self) -> String {
        format!(
            "pages/{}/tables/{}/{}",
            self.page_id, self.table_id, self.version
        )
    }
}

/// Values read back from storage, before being applied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersistedTableState {
    /// One entry per persisted column; `0` keeps the current width.
    pub widths: Vec<u32>,
    pub sort: Option<(usize, SortOrder)>,
}

/// Result of one restore pass.
#[derive(Debug, Clone, Default)]
pub struct Restored {
    pub state: PersistedTableState,
    /// Entries that could not be parsed and were skipped.
    pub errors: Vec<SettingsError>,
    pub warnings: Vec<ConfigurationWarning>,
}

/// Save/restore policy for one table.
#[derive(Debug, Clone)]
pub struct TablePersistence {
    key: TableKey,
    prefix: String,
    ready: bool,
    restored_once: bool,
}

impl TablePersistence {
    /// Start persisting `key`. Saves stay suppressed until the first restore
    /// if the store already holds state for it.
    pub fn enable<B: SettingsBackend>(store: &SettingsStore<B>, key: TableKey) -> Self {
        let prefix = key.prefix();
        let has_existing = [WIDTHS, SORT_COLUMN].into_iter().any(|leaf| {
            store
                .value(&[prefix.as_str(), leaf])
                .is_some_and(|v| !v.is_empty())
        });
        debug!(table = %prefix, has_existing, "table persistence enabled");
        Self {
            key,
            prefix,
            ready: !has_existing,
            restored_once: false,
        }
    }

    pub fn key(&self) -> &TableKey {
        &self.key
    }

    pub fn restored_once(&self) -> bool {
        self.restored_once
    }

    /// Whether saves are currently written.
    pub fn accepts_saves(&self) -> bool {
        self.ready
    }

    /// Store column widths. The last column is skipped when it stretches.
    ///
    /// Returns whether anything was written.
    pub fn save_widths<B: SettingsBackend>(
        &self,
        store: &mut SettingsStore<B>,
        columns: &ColumnSet,
    ) -> bool {
        if !self.accepts_saves() {
            return false;
        }
        let widths = columns.widths();
        let persisted = &widths[..persist_count(columns)];
        let value = persisted
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        store.set_value(&[self.prefix.as_str(), WIDTHS], value);
        true
    }

    /// Store the sort column and order.
    pub fn save_sort<B: SettingsBackend>(
        &self,
        store: &mut SettingsStore<B>,
        column: usize,
        order: SortOrder,
    ) -> bool {
        if !self.accepts_saves() {
            return false;
        }
        store.set_value(&[self.prefix.as_str(), SORT_COLUMN], column.to_string());
        store.set_value(&[self.prefix.as_str(), SORT_ORDER], order.as_u8().to_string());
        true
    }

    /// Read persisted state for `columns`.
    ///
    /// Malformed entries are skipped and reported; nothing here fails. After
    /// the first call, saves are accepted.
    pub fn restore<B: SettingsBackend>(
        &mut self,
        store: &SettingsStore<B>,
        columns: &ColumnSet,
    ) -> Restored {
        let mut out = Restored::default();

        if let Some(raw) = store
            .value(&[self.prefix.as_str(), WIDTHS])
            .filter(|v| !v.trim().is_empty())
        {
            let key = store.key(&[self.prefix.as_str(), WIDTHS]);
            let mut widths = Vec::new();
            for part in raw.split(',') {
                match part.trim().parse::<u32>() {
                    Ok(width) => widths.push(width),
                    Err(_) => {
                        out.errors.push(SettingsError::MalformedValue {
                            key: key.clone(),
                            value: part.to_owned(),
                        });
                        widths.push(0);
                    }
                }
            }
            let expected = persist_count(columns);
            if widths.len() != expected {
                let warning = ConfigurationWarning::PersistedWidthCount {
                    expected,
                    found: widths.len(),
                };
                warning.emit();
                out.warnings.push(warning);
            }
            widths.truncate(expected);
            out.state.widths = widths;
        }

        if let Some(raw_column) = store.value(&[self.prefix.as_str(), SORT_COLUMN]) {
            let raw_order = store.value(&[self.prefix.as_str(), SORT_ORDER]).unwrap_or_default();
            let column = raw_column
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&c| c < columns.len());
            let order = raw_order
                .trim()
                .parse::<u8>()
                .ok()
                .and_then(SortOrder::from_u8);
            match (column, order) {
                (Some(column), Some(order)) => out.state.sort = Some((column, order)),
                (None, _) => out.errors.push(SettingsError::MalformedValue {
                    key: store.key(&[self.prefix.as_str(), SORT_COLUMN]),
                    value: raw_column,
                }),
                (_, None) => out.errors.push(SettingsError::MalformedValue {
                    key: store.key(&[self.prefix.as_str(), SORT_ORDER]),
                    value: raw_order,
                }),
            }
        }

        self.ready = true;
        self.restored_once = true;
        debug!(
            table = %self.prefix,
            widths = out.state.widths.len(),
            sorted = out.state.sort.is_some(),
            errors = out.errors.len(),
            "table state restored"
        );
        out
    }

    /// Restore into a table chrome: resize the shared columns (header and
    /// body together) and re-apply the sort.
    ///
    /// Does nothing beyond reading when the chrome holds no [`TableBody`].
    pub fn restore_into<B: SettingsBackend>(
        &mut self,
        store: &SettingsStore<B>,
        chrome: &mut PanelChrome,
    ) -> Restored {
        let columns = chrome
            .body_as::<TableBody>()
            .map(|table| table.columns().clone())
            .unwrap_or_default();
        let restored = self.restore(store, &columns);
        if chrome.body_as::<TableBody>().is_none() {
            return restored;
        }

        if !restored.state.widths.is_empty() {
            chrome.set_table_columns(&columns.with_widths(&restored.state.widths));
        }
        if let Some((column, order)) = restored.state.sort
            && let Some(table) = chrome.body_as_mut::<TableBody>()
        {
            table.sort_by(column, order);
        }
        restored
    }
}

fn persist_count(columns: &ColumnSet) -> usize {
    if columns.stretches_last() {
        columns.len().saturating_sub(1)
    } else {
        columns.len()
    }
}
