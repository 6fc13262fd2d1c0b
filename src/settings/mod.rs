//! Desktop settings store abstraction and the color scheme value domain

mod gio_store;
mod memory;

pub use gio_store::GioSettingsStore;
pub use memory::MemoryStore;

use crate::config::settings::{COLOR_SCHEME_DARK, COLOR_SCHEME_LIGHT};
use crate::error::WelcomeResult;

/// Callback invoked with the new raw enum value of a watched key
pub type ChangeHandler = Box<dyn Fn(i32)>;

/// Key-value store holding enumerated desktop preferences.
///
/// Implementations are single-threaded and may deliver change notifications
/// synchronously from inside `set_enum`.
pub trait SettingsStore {
    /// Read the raw enum value stored under `key`
    fn get_enum(&self, key: &str) -> WelcomeResult<i32>;

    /// Write a raw enum value under `key`
    fn set_enum(&self, key: &str, value: i32) -> WelcomeResult<()>;

    /// Register `handler` for changes of `key`, including changes made by other processes
    fn connect_changed(&self, key: &str, handler: ChangeHandler);
}

/// Value of the desktop color scheme preference as seen by the dark-mode switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    Dark,
    /// Any variant the store defines beyond light and dark (e.g. "prefer-light")
    Other(i32),
}

impl ColorScheme {
    /// Assumed when the store cannot be read
    pub const DEFAULT: ColorScheme = ColorScheme::Light;

    pub fn from_raw(value: i32) -> Self {
        match value {
            COLOR_SCHEME_LIGHT => ColorScheme::Light,
            COLOR_SCHEME_DARK => ColorScheme::Dark,
            other => ColorScheme::Other(other),
        }
    }

    pub fn value(self) -> i32 {
        match self {
            ColorScheme::Light => COLOR_SCHEME_LIGHT,
            ColorScheme::Dark => COLOR_SCHEME_DARK,
            ColorScheme::Other(value) => value,
        }
    }

    /// Projection onto the switch state: only `Dark` is on.
    pub fn is_dark(self) -> bool {
        matches!(self, ColorScheme::Dark)
    }

    /// Injection from the switch state. Never yields `Other`.
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        }
    }
}
