//! Persistence boundary for the cart record.

use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

use crate::cart::Cart;

/// Trait for abstracting cart persistence.
/// Platform-specific implementations should provide this: browser local
/// storage on wasm, a JSON file for the CLI, an in-memory map for tests.
pub trait CartStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist the full cart record under the given store key.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save_cart(&self, store_key: &str, cart: &Cart) -> Result<(), Self::Error>;

    /// Load the cart record, or `None` if nothing was persisted yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be read or parsed.
    fn load_cart(&self, store_key: &str) -> Result<Option<Cart>, Self::Error>;

    /// Drop the persisted record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be deleted.
    fn delete_cart(&self, store_key: &str) -> Result<(), Self::Error>;
}

/// Infallible in-memory storage. Clones share the same underlying map, so a
/// test can hand one clone to a store and reopen another over the same state.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    carts: Rc<RefCell<HashMap<String, Cart>>>,
}

impl CartStorage for MemoryStorage {
    type Error = Infallible;

    fn save_cart(&self, store_key: &str, cart: &Cart) -> Result<(), Self::Error> {
        self.carts
            .borrow_mut()
            .insert(store_key.to_string(), cart.clone());
        Ok(())
    }

    fn load_cart(&self, store_key: &str) -> Result<Option<Cart>, Self::Error> {
        Ok(self.carts.borrow().get(store_key).cloned())
    }

    fn delete_cart(&self, store_key: &str) -> Result<(), Self::Error> {
        self.carts.borrow_mut().remove(store_key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_roundtrips_and_deletes() {
        let storage = MemoryStorage::default();
        assert!(storage.load_cart("k").unwrap().is_none());

        let cart = Cart::new();
        storage.save_cart("k", &cart).unwrap();
        assert_eq!(storage.load_cart("k").unwrap(), Some(cart));

        storage.delete_cart("k").unwrap();
        assert!(storage.load_cart("k").unwrap().is_none());
    }

    #[test]
    fn clones_share_state() {
        let storage = MemoryStorage::default();
        let other = storage.clone();
        storage.save_cart("k", &Cart::new()).unwrap();
        assert!(other.load_cart("k").unwrap().is_some());
    }
}
