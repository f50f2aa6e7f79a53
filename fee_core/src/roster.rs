//! Specialty roster persistence with file locking.
//!
//! The roster is the list of specialties a patient tracks between runs. The
//! engine never reads it directly; callers load the roster and pass its
//! entries to `calculate`.

use crate::{Error, Result, SpecialtyEntry};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// The specialties tracked by one patient
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Roster {
    #[serde(default)]
    pub specialties: Vec<SpecialtyEntry>,
}

impl Roster {
    /// Load a roster from a file with shared locking
    ///
    /// Returns an empty roster if the file doesn't exist. A file that exists
    /// but cannot be parsed is an error; entries are never silently dropped.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No roster found at {:?}, starting empty", path);
            return Ok(Self::default());
        }

        let file = File::open(path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        let roster = Self::parse(&contents).map_err(|e| {
            Error::Roster(format!("Failed to parse roster {:?}: {}", path, e))
        })?;
        tracing::debug!(
            "Loaded {} specialties from {:?}",
            roster.specialties.len(),
            path
        );
        Ok(roster)
    }

    /// Parse entries from JSON, either `{"specialties": [...]}` or `[...]`
    pub fn parse(contents: &str) -> Result<Self> {
        if contents.trim_start().starts_with('[') {
            let specialties: Vec<SpecialtyEntry> = serde_json::from_str(contents)?;
            Ok(Roster { specialties })
        } else {
            Ok(serde_json::from_str(contents)?)
        }
    }

    /// Save the roster to a file with exclusive locking
    ///
    /// Atomically writes the roster by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, self)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} specialties to {:?}", self.specialties.len(), path);
        Ok(())
    }

    /// Load the roster, modify it, and save it back atomically
    pub fn update<F, T>(path: &Path, f: F) -> Result<T>
    where
        F: FnOnce(&mut Roster) -> Result<T>,
    {
        let mut roster = Self::load(path)?;
        let outcome = f(&mut roster)?;
        roster.save(path)?;
        Ok(outcome)
    }

    /// Append an entry, assigning a correlation key if it has none
    ///
    /// Returns the entry's id.
    pub fn add(&mut self, mut entry: SpecialtyEntry) -> Result<String> {
        let id = entry
            .id
            .get_or_insert_with(|| uuid::Uuid::new_v4().to_string())
            .clone();

        if self.find(&id).is_some() {
            return Err(Error::Roster(format!("Duplicate specialty id '{}'", id)));
        }

        self.specialties.push(entry);
        Ok(id)
    }

    /// Remove the entry with the given id, returning it if present
    pub fn remove(&mut self, id: &str) -> Option<SpecialtyEntry> {
        let index = self
            .specialties
            .iter()
            .position(|e| e.id.as_deref() == Some(id))?;
        Some(self.specialties.remove(index))
    }

    pub fn find(&self, id: &str) -> Option<&SpecialtyEntry> {
        self.specialties.iter().find(|e| e.id.as_deref() == Some(id))
    }

    pub fn entries(&self) -> &[SpecialtyEntry] {
        &self.specialties
    }
}
