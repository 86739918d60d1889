//! Save/Load for trainer progress, the graveyard, and live pets.
//!
//! Everything lives under one root directory as pretty-printed JSON:
//!
//! ```text
//! <root>/trainer_data.json   trainer ledger
//! <root>/graveyard.json      array of grave records
//! <root>/dogs/<id>.json      one document per live pet, id = file stem
//! ```
//!
//! Reads never fail the caller: a missing or corrupt document falls back to
//! its default and logs a warning. Writes go to a temporary sibling file
//! which is then renamed over the target, so a failed write leaves the
//! previous document intact.

use std::borrow::Borrow;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use inubiyori_logic::{Graveyard, Pet, TrainerLedger};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::PersistError;

pub const TRAINER_FILE: &str = "trainer_data.json";
pub const GRAVEYARD_FILE: &str = "graveyard.json";
pub const DOGS_DIR: &str = "dogs";

/// Stable identifier of a live pet; doubles as its save file stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(String);

impl PetId {
    /// Accepts a file stem. Separators and parent references are rejected
    /// so an id can never point outside the dogs directory.
    pub fn from_stem(stem: &str) -> Option<Self> {
        let ok = !stem.is_empty()
            && stem != "."
            && stem != ".."
            && !stem.contains(['/', '\\'])
            && !stem.starts_with('.');
        ok.then(|| PetId(stem.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Durable storage rooted at a single directory.
#[derive(Debug, Clone)]
pub struct PersistenceStore {
    root: PathBuf,
}

impl PersistenceStore {
    /// Open (creating if needed) the save tree at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let store = Self { root: root.into() };
        let dogs = store.dogs_dir();
        fs::create_dir_all(&dogs).map_err(|e| PersistError::io("create", dogs, e))?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn trainer_path(&self) -> PathBuf {
        self.root.join(TRAINER_FILE)
    }

    pub fn graveyard_path(&self) -> PathBuf {
        self.root.join(GRAVEYARD_FILE)
    }

    pub fn dogs_dir(&self) -> PathBuf {
        self.root.join(DOGS_DIR)
    }

    pub fn pet_path(&self, id: &PetId) -> PathBuf {
        self.dogs_dir().join(format!("{}.json", id.as_str()))
    }

    // ── Trainer ────────────────────────────────────────────────────────

    pub fn load_trainer(&self) -> TrainerLedger {
        let path = self.trainer_path();
        let mut ledger = load_or_default::<TrainerLedger>(&path, "trainer data");
        if ledger.sanitize() {
            log::warn!(
                "Discarded implausible trainer experience in {}",
                path.display()
            );
        }
        ledger
    }

    pub fn save_trainer(&self, ledger: &TrainerLedger) -> Result<(), PersistError> {
        write_json_atomic(&self.trainer_path(), ledger)
    }

    // ── Graveyard ──────────────────────────────────────────────────────

    pub fn load_graveyard(&self) -> Graveyard {
        load_or_default(&self.graveyard_path(), "graveyard")
    }

    pub fn save_graveyard(&self, graveyard: &Graveyard) -> Result<(), PersistError> {
        write_json_atomic(&self.graveyard_path(), graveyard)
    }

    // ── Pets ───────────────────────────────────────────────────────────

    /// Every readable pet document, ordered by id. Unreadable ones are skipped.
    pub fn load_pets(&self) -> Vec<(PetId, Pet)> {
        let dir = self.dogs_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                log::warn!("Could not list {}: {}; starting with no dogs", dir.display(), e);
                return Vec::new();
            }
        };

        let mut pets = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|x| x.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(PetId::from_stem)
            else {
                continue;
            };
            match read_json::<Pet>(&path) {
                Ok(Some(mut pet)) => {
                    pet.sanitize();
                    pets.push((id, pet));
                }
                Ok(None) => {}
                Err(e) => log::warn!("Skipping unreadable dog save: {}", e),
            }
        }
        pets.sort_by(|a, b| a.0.cmp(&b.0));
        pets
    }

    pub fn load_pet(&self, id: &PetId) -> Option<Pet> {
        match read_json::<Pet>(&self.pet_path(id)) {
            Ok(Some(mut pet)) => {
                pet.sanitize();
                Some(pet)
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("Skipping unreadable dog save: {}", e);
                None
            }
        }
    }

    pub fn save_pet(&self, id: &PetId, pet: &Pet) -> Result<(), PersistError> {
        write_json_atomic(&self.pet_path(id), pet)
    }

    /// Remove a pet's document. Already gone is fine.
    pub fn delete_pet(&self, id: &PetId) -> Result<(), PersistError> {
        let path = self.pet_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistError::io("delete", path, e)),
        }
    }

    /// Fresh id `dog_<unix seconds>`, suffixed `_2`, `_3`, … when that stem
    /// is already on disk or `in_use` claims it.
    pub fn allocate_id(&self, now: f64, in_use: impl Fn(&PetId) -> bool) -> PetId {
        let base = format!("dog_{}", now.max(0.0).floor() as i64);
        let mut candidate = PetId(base.clone());
        let mut n = 2u32;
        while in_use(&candidate) || self.pet_path(&candidate).exists() {
            candidate = PetId(format!("{base}_{n}"));
            n += 1;
        }
        candidate
    }
}

/// Read a JSON document. `Ok(None)` when the file does not exist.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(PersistError::io("read", path, e)),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| PersistError::Json {
            path: path.to_path_buf(),
            source,
        })
}

fn load_or_default<T: DeserializeOwned + Default>(path: &Path, what: &str) -> T {
    match read_json(path) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("Falling back to fresh {}: {}", what, e);
            T::default()
        }
    }
}

fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    let mut bytes = serde_json::to_vec_pretty(value).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    bytes.push(b'\n');

    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let write = || -> io::Result<()> {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        Ok(())
    };
    if let Err(e) = write() {
        let _ = fs::remove_file(&tmp);
        return Err(PersistError::io("write", tmp, e));
    }
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        PersistError::io("replace", path, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use inubiyori_logic::Species;
    use tempfile::TempDir;

    fn store() -> (TempDir, PersistenceStore) {
        let dir = TempDir::new().expect("tempdir");
        let store = PersistenceStore::open(dir.path().join("saves")).expect("open");
        (dir, store)
    }

    #[test]
    fn test_open_creates_tree() {
        let (_dir, store) = store();
        assert!(store.dogs_dir().is_dir());
    }

    #[test]
    fn test_missing_documents_default() {
        let (_dir, store) = store();
        assert_eq!(store.load_trainer(), TrainerLedger::default());
        assert!(store.load_graveyard().is_empty());
        assert!(store.load_pets().is_empty());
    }

    #[test]
    fn test_corrupt_documents_default() {
        let (_dir, store) = store();
        fs::write(store.trainer_path(), "{ not json").unwrap();
        fs::write(store.graveyard_path(), "[1, 2").unwrap();
        fs::write(store.dogs_dir().join("dog_1.json"), "garbage").unwrap();
        assert_eq!(store.load_trainer(), TrainerLedger::default());
        assert!(store.load_graveyard().is_empty());
        assert!(store.load_pets().is_empty());
    }

    #[test]
    fn test_absurd_trainer_experience_is_discarded() {
        let (_dir, store) = store();
        fs::write(
            store.trainer_path(),
            r#"{"trainer_level": 3, "trainer_exp": 1e30, "total_deaths": 7}"#,
        )
        .unwrap();
        let ledger = store.load_trainer();
        assert_eq!(ledger.level(), 3);
        assert_eq!(ledger.experience(), 0.0);
        assert_eq!(ledger.total_deaths(), 7);
    }

    #[test]
    fn test_trainer_round_trip() {
        let (_dir, store) = store();
        let mut ledger = TrainerLedger::default();
        ledger.add_experience(250.0);
        store.save_trainer(&ledger).unwrap();
        assert_eq!(store.load_trainer(), ledger);
    }

    #[test]
    fn test_pet_round_trip_without_id_field() {
        let (_dir, store) = store();
        let mut pet = Pet::named(Species::Shiba, "Kotaro", 1_700_000_000.75).unwrap();
        pet.train(None);
        pet.advance(1.5);
        let id = PetId::from_stem("dog_1700000000").unwrap();
        store.save_pet(&id, &pet).unwrap();

        let text = fs::read_to_string(store.pet_path(&id)).unwrap();
        assert!(!text.contains("\"id\""));
        assert_eq!(store.load_pet(&id), Some(pet.clone()));
        assert_eq!(store.load_pets(), vec![(id, pet)]);
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let (_dir, store) = store();
        let id = PetId::from_stem("dog_5").unwrap();
        store.save_pet(&id, &Pet::new(Species::Corgi, 0.0)).unwrap();
        store.save_pet(&id, &Pet::new(Species::Corgi, 1.0)).unwrap();
        let names: Vec<_> = fs::read_dir(store.dogs_dir())
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["dog_5.json"]);
    }

    #[test]
    fn test_delete_pet_is_idempotent() {
        let (_dir, store) = store();
        let id = PetId::from_stem("dog_9").unwrap();
        store.save_pet(&id, &Pet::new(Species::Corgi, 0.0)).unwrap();
        store.delete_pet(&id).unwrap();
        assert!(!store.pet_path(&id).exists());
        store.delete_pet(&id).unwrap();
    }

    #[test]
    fn test_allocate_id_avoids_collisions() {
        let (_dir, store) = store();
        let first = store.allocate_id(1_700_000_000.9, |_| false);
        assert_eq!(first.as_str(), "dog_1700000000");
        store.save_pet(&first, &Pet::new(Species::Corgi, 0.0)).unwrap();

        let second = store.allocate_id(1_700_000_000.2, |_| false);
        assert_eq!(second.as_str(), "dog_1700000000_2");

        let third = store.allocate_id(1_700_000_000.2, |id| id == &second);
        assert_eq!(third.as_str(), "dog_1700000000_3");
    }

    #[test]
    fn test_pet_id_rejects_paths() {
        assert!(PetId::from_stem("dog_1").is_some());
        assert!(PetId::from_stem("").is_none());
        assert!(PetId::from_stem("..").is_none());
        assert!(PetId::from_stem("../evil").is_none());
        assert!(PetId::from_stem("a\\b").is_none());
        assert!(PetId::from_stem(".hidden").is_none());
    }

    #[test]
    fn test_non_json_files_ignored() {
        let (_dir, store) = store();
        fs::write(store.dogs_dir().join("notes.txt"), "hi").unwrap();
        fs::write(store.dogs_dir().join("dog_1.json.tmp"), "{}").unwrap();
        assert!(store.load_pets().is_empty());
    }
}
