//! JSON-file-backed cart persistence for the CLI.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use grillside_core::{Cart, CartStorage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileStorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cart record parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Stores one pretty-printed JSON document per store key inside a directory.
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    fn record_path(&self, store_key: &str) -> PathBuf {
        self.dir.join(format!("{store_key}.json"))
    }
}

impl CartStorage for JsonFileStorage {
    type Error = FileStorageError;

    fn save_cart(&self, store_key: &str, cart: &Cart) -> Result<(), Self::Error> {
        fs::create_dir_all(&self.dir)?;
        let text = serde_json::to_string_pretty(cart)?;
        fs::write(self.record_path(store_key), text)?;
        Ok(())
    }

    fn load_cart(&self, store_key: &str) -> Result<Option<Cart>, Self::Error> {
        match fs::read_to_string(self.record_path(store_key)) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn delete_cart(&self, store_key: &str) -> Result<(), Self::Error> {
        match fs::remove_file(self.record_path(store_key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("grillside-{label}-{}", std::process::id()))
    }

    #[test]
    fn roundtrips_the_cart_record() {
        let dir = temp_dir("roundtrip");
        let storage = JsonFileStorage::new(&dir);

        assert!(storage.load_cart("cart").unwrap().is_none());
        let cart = Cart::new();
        storage.save_cart("cart", &cart).unwrap();
        assert_eq!(storage.load_cart("cart").unwrap(), Some(cart));

        storage.delete_cart("cart").unwrap();
        assert!(storage.load_cart("cart").unwrap().is_none());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn deleting_a_missing_record_is_not_an_error() {
        let storage = JsonFileStorage::new(&temp_dir("missing"));
        storage.delete_cart("cart").unwrap();
    }
}
