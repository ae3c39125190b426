//! Synchronous key-value storage.
//!
//! The diary keeps its whole collection under one key of a small string
//! store, the way a browser keeps it in local storage. [`FileStorage`] maps
//! each key to a JSON file in the data directory; [`MemoryStorage`] keeps
//! everything in memory and is what the tests use.

mod file;

#[cfg(test)]
mod tests;

pub use file::{ensure_data_directory_exists, FileStorage};

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::rc::Rc;

pub trait KeyValueStorage {
    /// Returns the stored value, or `None` if the key has never been written.
    fn get_item(&self, key: &str) -> io::Result<Option<String>>;
    /// Replaces the value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> io::Result<()>;
}

/// In-memory storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
