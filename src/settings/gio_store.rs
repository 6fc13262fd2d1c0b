// GSettings-backed store for the desktop interface schema

use gio::prelude::*;
use gio::{Settings, SettingsBackend, SettingsSchema, SettingsSchemaSource};
use tracing::{debug, trace, warn};

use super::{ChangeHandler, SettingsStore};
use crate::error::{WelcomeError, WelcomeResult};

/// `SettingsStore` over a single GSettings schema
pub struct GioSettingsStore {
    settings: Settings,
    schema: SettingsSchema,
}

impl GioSettingsStore {
    /// Open `schema_id` from the default schema source and backend.
    pub fn open(schema_id: &str) -> WelcomeResult<Self> {
        let source = SettingsSchemaSource::default()
            .ok_or_else(|| WelcomeError::store_unavailable("no GSettings schema source"))?;
        Self::from_source(&source, schema_id, None)
    }

    /// Open `schema_id` from `source`, on `backend` or the default one.
    ///
    /// `gio::Settings::new` aborts the process on a missing schema, so the
    /// schema is looked up first and a missing one is reported as an error.
    pub fn from_source(
        source: &SettingsSchemaSource,
        schema_id: &str,
        backend: Option<&SettingsBackend>,
    ) -> WelcomeResult<Self> {
        let schema = source
            .lookup(schema_id, true)
            .ok_or_else(|| WelcomeError::store_unavailable(format!("schema {} is not installed", schema_id)))?;
        let settings = Settings::new_full(&schema, backend, None);
        debug!(schema = schema_id, "opened settings store");
        Ok(Self { settings, schema })
    }

    fn ensure_key(&self, key: &str) -> WelcomeResult<()> {
        if self.schema.has_key(key) {
            Ok(())
        } else {
            Err(WelcomeError::UnknownKey(key.to_string()))
        }
    }
}

impl SettingsStore for GioSettingsStore {
    fn get_enum(&self, key: &str) -> WelcomeResult<i32> {
        self.ensure_key(key)?;
        Ok(self.settings.enum_(key))
    }

    fn set_enum(&self, key: &str, value: i32) -> WelcomeResult<()> {
        self.ensure_key(key)?;
        self.settings
            .set_enum(key, value)
            .map_err(|e| WelcomeError::store_write(key, e))
    }

    fn connect_changed(&self, key: &str, handler: ChangeHandler) {
        if let Err(e) = self.ensure_key(key) {
            warn!(key, error = %e, "cannot watch settings key, external changes will not be shown");
            return;
        }
        self.settings.connect_changed(Some(key), move |settings, changed| {
            let value = settings.enum_(changed);
            trace!(key = changed, value, "settings key changed");
            handler(value);
        });
        // GSettings only emits `changed` for keys read while a handler is connected.
        let _ = self.settings.enum_(key);
    }
}
