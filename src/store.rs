//! Drink persistence: bundled seed plus on-device overlay.
//!
//! The app ships with a read-only seed file. The first time the user saves a
//! change, the whole collection is written to an overlay file in the data
//! directory, and from then on the overlay supersedes the seed entirely
//! (overwrite, not merge). A malformed overlay is treated as "no persisted
//! data": the seed is served, the corrupt file is left on disk, and the next
//! save overwrites it.
//!
//! Saves are whole-file: serialize everything, write to a temp sibling,
//! atomic rename. A concurrent load never observes a partial write.

use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use crate::config::Config;
use crate::error::DataError;
use crate::models::Drink;

/// Loads and persists the drink collection.
#[derive(Debug, Clone)]
pub struct DrinkStore {
    seed_path: PathBuf,
    overlay_path: PathBuf,
}

impl DrinkStore {
    pub fn new(config: &Config) -> Self {
        Self {
            seed_path: config.seed_path.clone(),
            overlay_path: config.overlay_path(),
        }
    }

    /// Build a store from explicit paths.
    pub fn with_paths(seed_path: impl Into<PathBuf>, overlay_path: impl Into<PathBuf>) -> Self {
        Self {
            seed_path: seed_path.into(),
            overlay_path: overlay_path.into(),
        }
    }

    pub fn overlay_path(&self) -> &PathBuf {
        &self.overlay_path
    }

    /// Load the collection. The overlay wins outright when present and
    /// decodable; otherwise the bundled seed is served.
    pub fn load(&self) -> Result<Vec<Drink>, DataError> {
        if self.overlay_path.exists() {
            match fs::read_to_string(&self.overlay_path) {
                Ok(text) => match serde_json::from_str::<Vec<Drink>>(&text) {
                    Ok(drinks) => {
                        tracing::debug!(count = drinks.len(), "loaded drinks from overlay");
                        return Ok(drinks);
                    }
                    Err(err) => {
                        // Left in place until the next save overwrites it.
                        tracing::warn!(
                            path = %self.overlay_path.display(),
                            "overlay is malformed ({}), falling back to seed",
                            err
                        );
                    }
                },
                Err(err) => {
                    tracing::warn!(
                        path = %self.overlay_path.display(),
                        "overlay is unreadable ({}), falling back to seed",
                        err
                    );
                }
            }
        }

        self.load_seed()
    }

    fn load_seed(&self) -> Result<Vec<Drink>, DataError> {
        if !self.seed_path.exists() {
            return Err(DataError::SeedMissing { path: self.seed_path.clone() });
        }

        let text = fs::read_to_string(&self.seed_path).map_err(|e| DataError::Io {
            path: self.seed_path.clone(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&text).map_err(|e| DataError::SeedMalformed {
            path: self.seed_path.clone(),
            message: e.to_string(),
        })
    }

    /// Persist the whole collection to the overlay. Write-to-temp then
    /// rename keeps racing saves from interleaving partial writes.
    pub fn save(&self, drinks: &[Drink]) -> Result<(), DataError> {
        let json = serde_json::to_string_pretty(drinks)
            .map_err(|e| DataError::Serialize { message: e.to_string() })?;

        if let Some(parent) = self.overlay_path.parent() {
            fs::create_dir_all(parent).map_err(|e| DataError::Io {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }

        let tmp = self
            .overlay_path
            .with_extension(format!("tmp-{}", Uuid::new_v4().simple()));
        fs::write(&tmp, json).map_err(|e| DataError::Io {
            path: tmp.clone(),
            message: e.to_string(),
        })?;

        fs::rename(&tmp, &self.overlay_path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            DataError::Io {
                path: self.overlay_path.clone(),
                message: e.to_string(),
            }
        })?;

        tracing::debug!(count = drinks.len(), "saved drinks overlay");
        Ok(())
    }

    /// Apply one edited or created record: replace the record with the same
    /// id, or append when it is new. Persists the full collection.
    pub fn upsert(&self, drinks: &mut Vec<Drink>, drink: Drink) -> Result<(), DataError> {
        match drinks.iter().position(|d| d.id == drink.id) {
            Some(index) => drinks[index] = drink,
            None => drinks.push(drink),
        }
        self.save(drinks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed_drinks() -> Vec<Drink> {
        vec![
            Drink::new("Mojito", "m.png", "rum, mint, lime", "muddle and shake"),
            Drink::new("Negroni", "n.png", "gin, campari, vermouth", "stir over ice"),
            Drink::new("Margarita", "marg.png", "tequila, lime", "shake with salt rim"),
        ]
    }

    fn store_with_seed(dir: &TempDir) -> (DrinkStore, Vec<Drink>) {
        let seed_path = dir.path().join("seed.json");
        let drinks = seed_drinks();
        fs::write(&seed_path, serde_json::to_string(&drinks).unwrap()).unwrap();
        let store = DrinkStore::with_paths(seed_path, dir.path().join("data").join("drinks.json"));
        (store, drinks)
    }

    #[test]
    fn test_load_without_overlay_serves_seed() {
        let dir = TempDir::new().unwrap();
        let (store, seed) = store_with_seed(&dir);

        let loaded = store.load().unwrap();
        assert_eq!(loaded, seed);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let (store, mut drinks) = store_with_seed(&dir);

        drinks[0].directions = "shake harder".to_string();
        store.save(&drinks).unwrap();

        assert_eq!(store.load().unwrap(), drinks);
    }

    #[test]
    fn test_overlay_supersedes_seed_entirely() {
        let dir = TempDir::new().unwrap();
        let (store, _) = store_with_seed(&dir);

        // Overlay with a single record: seed content must not leak back in.
        let mine = vec![Drink::new("House special", "", "secret", "ask the bartender")];
        store.save(&mine).unwrap();

        assert_eq!(store.load().unwrap(), mine);
    }

    #[test]
    fn test_corrupt_overlay_falls_back_to_seed_and_stays_on_disk() {
        let dir = TempDir::new().unwrap();
        let (store, seed) = store_with_seed(&dir);

        fs::create_dir_all(store.overlay_path().parent().unwrap()).unwrap();
        fs::write(store.overlay_path(), "{ definitely not a drink array").unwrap();

        assert_eq!(store.load().unwrap(), seed);
        // Not auto-repaired.
        assert!(store.overlay_path().exists());

        // A save overwrites the corruption.
        store.save(&seed).unwrap();
        assert_eq!(store.load().unwrap(), seed);
    }

    #[test]
    fn test_missing_seed_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = DrinkStore::with_paths(
            dir.path().join("nope.json"),
            dir.path().join("drinks.json"),
        );

        let err = store.load().unwrap_err();
        assert!(matches!(err, DataError::SeedMissing { .. }));
    }

    #[test]
    fn test_append_preserves_order() {
        let dir = TempDir::new().unwrap();
        let (store, mut drinks) = store_with_seed(&dir);
        store.save(&drinks).unwrap();

        let fourth = Drink::new("Daiquiri", "d.png", "rum, lime, sugar", "shake");
        store.upsert(&mut drinks, fourth.clone()).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 4);
        assert_eq!(loaded[3], fourth);
        assert_eq!(loaded[..3], drinks[..3]);
    }

    #[test]
    fn test_upsert_replaces_by_id_not_position() {
        let dir = TempDir::new().unwrap();
        let (store, mut drinks) = store_with_seed(&dir);

        // Reorder, then edit the record that used to be first.
        drinks.reverse();
        let mut edited = drinks[2].clone();
        edited.directions = "stir, do not shake".to_string();
        store.upsert(&mut drinks, edited.clone()).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[2], edited);
    }

    #[test]
    fn test_save_creates_data_dir() {
        let dir = TempDir::new().unwrap();
        let (store, drinks) = store_with_seed(&dir);

        assert!(!store.overlay_path().parent().unwrap().exists());
        store.save(&drinks).unwrap();
        assert!(store.overlay_path().exists());
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = TempDir::new().unwrap();
        let (store, drinks) = store_with_seed(&dir);
        store.save(&drinks).unwrap();

        let data_dir = store.overlay_path().parent().unwrap();
        let leftovers: Vec<_> = fs::read_dir(data_dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path() != *store.overlay_path())
            .collect();
        assert!(leftovers.is_empty(), "unexpected files: {:?}", leftovers);
    }
}
