//! Roster loading
//!
//! Reads the cardinal roster from a `cardinals.json` file and the
//! referenced biography files, producing a validated [`Roster`]. The core
//! never touches the filesystem itself; by the time a roster reaches the
//! orchestrator it is fully loaded and checked.

use conclave_domain::{Cardinal, CardinalId, ConfigError, Leaning, Roster};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid roster file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// One entry of `cardinals.json`. Unknown fields are ignored so roster
/// files carrying extra bookkeeping keys still load.
#[derive(Debug, Deserialize)]
struct RosterEntry {
    name: String,
    bio_file: PathBuf,
    /// -1.0 (very conservative) to 1.0 (very liberal).
    political_leaning: f64,
}

pub struct RosterLoader;

impl RosterLoader {
    /// Load and validate a roster.
    ///
    /// Ids are assigned in file order starting at 1. Relative biography
    /// paths resolve against the roster file's directory.
    pub fn load(path: &Path) -> Result<Roster, RosterError> {
        let raw = std::fs::read_to_string(path).map_err(|source| RosterError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<RosterEntry> =
            serde_json::from_str(&raw).map_err(|source| RosterError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let base = path.parent().unwrap_or(Path::new("."));
        let mut cardinals = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let bio_path = if entry.bio_file.is_absolute() {
                entry.bio_file
            } else {
                base.join(&entry.bio_file)
            };
            let biography =
                std::fs::read_to_string(&bio_path).map_err(|source| RosterError::Read {
                    path: bio_path.clone(),
                    source,
                })?;

            cardinals.push(Cardinal::new(
                CardinalId::new(index as u32 + 1),
                entry.name,
                biography.trim(),
                Leaning::new(entry.political_leaning),
            ));
        }

        let roster = Roster::new(cardinals)?;
        info!(path = %path.display(), electors = roster.len(), "roster loaded");
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_roster(dir: &Path, entries: &[(&str, f64)]) -> PathBuf {
        let mut records = Vec::new();
        for (name, leaning) in entries {
            let file_stem = name.to_lowercase().replace(' ', "_");
            let bio_file = format!("{file_stem}_bio.txt");
            fs::write(dir.join(&bio_file), format!("Biography of {name}.")).unwrap();
            records.push(serde_json::json!({
                "name": name,
                "bio_file": bio_file,
                "political_leaning": leaning,
            }));
        }
        let path = dir.join("cardinals.json");
        fs::write(&path, serde_json::to_string_pretty(&records).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_load_assigns_ids_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_roster(dir.path(), &[("Pietro Rossi", -0.5), ("Jean Moreau", 0.3)]);

        let roster = RosterLoader::load(&path).unwrap();

        assert_eq!(roster.len(), 2);
        let first = roster.get(CardinalId::new(1)).unwrap();
        assert_eq!(first.name(), "Pietro Rossi");
        assert_eq!(first.biography(), "Biography of Pietro Rossi.");
        assert_eq!(first.leaning().score(), -0.5);
        assert_eq!(
            roster.get(CardinalId::new(2)).unwrap().name(),
            "Jean Moreau"
        );
    }

    #[test]
    fn test_missing_bio_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cardinals.json");
        fs::write(
            &path,
            r#"[{"name": "Pietro", "bio_file": "missing.txt", "political_leaning": 0.0}]"#,
        )
        .unwrap();

        assert!(matches!(
            RosterLoader::load(&path),
            Err(RosterError::Read { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cardinals.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            RosterLoader::load(&path),
            Err(RosterError::Parse { .. })
        ));
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_roster(dir.path(), &[("Pietro Rossi", 0.0), ("Pietro Rossi", 0.1)]);

        assert!(matches!(
            RosterLoader::load(&path),
            Err(RosterError::Invalid(ConfigError::DuplicateName(_)))
        ));
    }

    #[test]
    fn test_extra_keys_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bio.txt"), "Bio.").unwrap();
        let path = dir.path().join("cardinals.json");
        fs::write(
            &path,
            r#"[{"name": "Pietro", "bio_file": "bio.txt", "political_leaning": 0.0,
                "voting_history_file": "unused.json"}]"#,
        )
        .unwrap();

        assert!(RosterLoader::load(&path).is_ok());
    }
}
