// In-process settings store: session fallback when GSettings is unavailable

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::{ChangeHandler, SettingsStore};
use crate::error::{WelcomeError, WelcomeResult};

/// Volatile `SettingsStore` kept in memory for the lifetime of the process.
///
/// Writes of an already-stored value are dropped without notifying
/// observers, matching how the desktop store collapses no-op writes.
#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, i32>>,
    handlers: RefCell<Vec<(String, Rc<dyn Fn(i32)>)>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a single key
    pub fn with_value(key: &str, value: i32) -> Self {
        let store = Self::new();
        store.values.borrow_mut().insert(key.to_string(), value);
        store
    }

    /// Number of `set_enum` calls that reached the store
    #[cfg(test)]
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Change a value as another process would: observers are notified but
    /// the write counter is left alone.
    #[cfg(test)]
    pub fn set_external(&self, key: &str, value: i32) {
        if self.store_value(key, value) {
            self.notify(key, value);
        }
    }

    fn store_value(&self, key: &str, value: i32) -> bool {
        let previous = self.values.borrow_mut().insert(key.to_string(), value);
        previous != Some(value)
    }

    fn notify(&self, key: &str, value: i32) {
        // Handlers may write back into the store, so call them on a snapshot.
        let handlers: Vec<Rc<dyn Fn(i32)>> = self
            .handlers
            .borrow()
            .iter()
            .filter(|(watched, _)| watched == key)
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            handler(value);
        }
    }
}

impl SettingsStore for MemoryStore {
    fn get_enum(&self, key: &str) -> WelcomeResult<i32> {
        self.values
            .borrow()
            .get(key)
            .copied()
            .ok_or_else(|| WelcomeError::UnknownKey(key.to_string()))
    }

    fn set_enum(&self, key: &str, value: i32) -> WelcomeResult<()> {
        self.writes.set(self.writes.get() + 1);
        if self.store_value(key, value) {
            self.notify(key, value);
        }
        Ok(())
    }

    fn connect_changed(&self, key: &str, handler: ChangeHandler) {
        self.handlers
            .borrow_mut()
            .push((key.to_string(), Rc::from(handler)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_an_error() {
        let store = MemoryStore::new();
        assert!(matches!(store.get_enum("color-scheme"), Err(WelcomeError::UnknownKey(_))));
    }

    #[test]
    fn read_after_write_returns_written_value() {
        let store = MemoryStore::new();
        store.set_enum("color-scheme", 1).unwrap();
        assert_eq!(store.get_enum("color-scheme").unwrap(), 1);
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn observers_only_see_real_changes_of_their_key() {
        let store = MemoryStore::with_value("color-scheme", 0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.connect_changed("color-scheme", Box::new(move |v| sink.borrow_mut().push(v)));

        store.set_enum("color-scheme", 0).unwrap();
        store.set_enum("gtk-theme", 3).unwrap();
        store.set_external("color-scheme", 1);
        store.set_enum("color-scheme", 2).unwrap();

        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(store.write_count(), 3);
    }
}
