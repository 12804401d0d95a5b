// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Keys follow the historical local-storage names.
pub const TOUR_SEEN: &str = "hasViewedTour";
pub const ONBOARDED: &str = "elite_onboarded";

/// Durable per-identity flags (the local-storage analog). Backed by a JSON
/// file when a path is given; purely in-memory otherwise (tests, `--demo`).
#[derive(Debug, Default)]
pub struct Prefs {
    flags: BTreeMap<String, bool>,
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default)]
    flags: BTreeMap<String, bool>,
}

impl Prefs {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads from `path` if it exists; a missing file is an empty prefs set,
    /// not an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let flags = match std::fs::read_to_string(&path) {
            Ok(raw) => {
                let file: PrefsFile = serde_json::from_str(&raw)
                    .map_err(|source| PrefsError::Malformed {
                        path: path.clone(),
                        source,
                    })?;
                file.flags
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(PrefsError::Io {
                    path: path.clone(),
                    source,
                })
            }
        };
        Ok(Self {
            flags,
            path: Some(path),
        })
    }

    pub fn flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    /// Sets and, when file-backed, persists. Persistence failures are
    /// returned but leave the in-memory flag set, so the session keeps
    /// working with at-most-weaker durability.
    pub fn set_flag(&mut self, key: &str, value: bool) -> Result<(), PrefsError> {
        self.flags.insert(key.to_owned(), value);
        self.persist()
    }

    /// Drops every flag (account deletion / logout clears local state).
    pub fn clear(&mut self) -> Result<(), PrefsError> {
        self.flags.clear();
        self.persist()
    }

    fn persist(&self) -> Result<(), PrefsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let file = PrefsFile {
            flags: self.flags.clone(),
        };
        let raw = serde_json::to_string_pretty(&file).map_err(|source| PrefsError::Malformed {
            path: path.clone(),
            source,
        })?;
        write_atomic(path, &raw).map_err(|source| PrefsError::Io {
            path: path.clone(),
            source,
        })
    }
}

fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)
}

#[derive(Debug)]
pub enum PrefsError {
    Io { path: PathBuf, source: io::Error },
    Malformed { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for PrefsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "prefs io error at {}: {source}", path.display())
            }
            Self::Malformed { path, source } => {
                write!(f, "malformed prefs file {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for PrefsError {}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn temp_path() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "halide-prefs-{}-{nanos}-{counter}.json",
            std::process::id()
        ))
    }

    #[test]
    fn in_memory_flags_default_to_false() {
        let mut prefs = Prefs::in_memory();
        assert!(!prefs.flag(TOUR_SEEN));
        prefs.set_flag(TOUR_SEEN, true).expect("set");
        assert!(prefs.flag(TOUR_SEEN));
        prefs.clear().expect("clear");
        assert!(!prefs.flag(TOUR_SEEN));
    }

    #[test]
    fn file_backed_flags_survive_reload() {
        let path = temp_path();
        {
            let mut prefs = Prefs::load(&path).expect("load fresh");
            prefs.set_flag(TOUR_SEEN, true).expect("set");
        }
        let prefs = Prefs::load(&path).expect("reload");
        assert!(prefs.flag(TOUR_SEEN));
        assert!(!prefs.flag(ONBOARDED));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_an_empty_prefs_set() {
        let prefs = Prefs::load(temp_path()).expect("load missing");
        assert!(!prefs.flag(TOUR_SEEN));
    }
}
