use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use super::StorageBackend;
use crate::{
    errors::LedgerError,
    ledger::{Ledger, CURRENT_SCHEMA_VERSION},
    utils::{
        app_data_dir,
        persistence::{load_ledger_from_file, save_ledger_to_file},
    },
};

const LEDGER_DIR: &str = "ledgers";
const STATE_FILE: &str = "state.json";

/// JSON-file storage rooted at the application data directory.
///
/// Ledgers live under `ledgers/<canonical-name>.json`; `state.json` tracks
/// the last opened ledger name. Collections serialize in insertion order, so
/// a reloaded ledger aggregates identically to the one that was saved.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    ledgers_dir: PathBuf,
    state_file: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    #[serde(default)]
    last_ledger: Option<String>,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self, LedgerError> {
        let root = root.unwrap_or_else(app_data_dir);
        let ledgers_dir = root.join(LEDGER_DIR);
        fs::create_dir_all(&ledgers_dir)?;
        let state_file = root.join(STATE_FILE);
        Ok(Self {
            root,
            ledgers_dir,
            state_file,
        })
    }

    pub fn new_default() -> Result<Self, LedgerError> {
        Self::new(None)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_state(&self) -> Result<StoreState, LedgerError> {
        if self.state_file.exists() {
            let data = fs::read_to_string(&self.state_file)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(StoreState::default())
        }
    }

    fn ensure_schema_support(ledger: &Ledger) -> Result<(), LedgerError> {
        if ledger.schema_version() > CURRENT_SCHEMA_VERSION {
            return Err(LedgerError::UnsupportedSchema {
                found: ledger.schema_version(),
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn load_named(&self, name: &str) -> Result<Ledger, LedgerError> {
        let ledger = load_ledger_from_file(&self.ledger_path(name))?;
        Self::ensure_schema_support(&ledger)?;
        Ok(ledger)
    }

    fn save_named(&self, ledger: &Ledger, name: &str) -> Result<PathBuf, LedgerError> {
        let path = self.ledger_path(name);
        save_ledger_to_file(ledger, &path)?;
        Ok(path)
    }

    fn ledger_path(&self, name: &str) -> PathBuf {
        self.ledgers_dir
            .join(format!("{}.json", canonical_name(name)))
    }

    fn last_ledger(&self) -> Result<Option<String>, LedgerError> {
        Ok(self.read_state()?.last_ledger)
    }

    fn record_last_ledger(&self, name: Option<&str>) -> Result<(), LedgerError> {
        let mut state = self.read_state()?;
        state.last_ledger = name.map(canonical_name);
        let json = serde_json::to_string_pretty(&state)?;
        let tmp = self.state_file.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(tmp, &self.state_file)?;
        Ok(())
    }
}

/// Lowercases and underscores a ledger name into a stable file stem.
fn canonical_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_name_is_a_stable_slug() {
        assert_eq!(canonical_name("My Ledger"), "my_ledger");
        assert_eq!(canonical_name("  Spaced   Out  "), "spaced_out");
        assert_eq!(canonical_name("plain"), "plain");
    }
}
