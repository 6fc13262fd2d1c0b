//! Two-way binding between a boolean switch and the color scheme setting

use std::cell::Cell;
use std::rc::Rc;

use bitflags::bitflags;
use tracing::{debug, trace, warn};

use crate::settings::{ColorScheme, SettingsStore};

/// A widget with a boolean "active" state
pub trait Toggle {
    fn is_on(&self) -> bool;

    /// Set the state. Implementations notify `connect_toggled` handlers only
    /// when the state actually changes.
    fn set_on(&self, on: bool);

    fn connect_toggled(&self, handler: Box<dyn Fn()>);
}

bitflags! {
    /// Directions a binding propagates in
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BindFlags: u32 {
        /// Store changes update the control
        const GET = 0x0001;
        /// Control changes are written to the store
        const SET = 0x0002;
        const DEFAULT = Self::GET.bits() | Self::SET.bits();
    }
}

/// Keeps one `Toggle` and one enumerated store key consistent.
///
/// Dark maps to on, every other stored value maps to off; off is written
/// back as light.
pub struct BindingBridge<T: Toggle> {
    control: T,
    store: Rc<dyn SettingsStore>,
    key: String,
    flags: BindFlags,
    syncing: Cell<bool>,
}

impl<T: Toggle + 'static> BindingBridge<T> {
    pub fn new(control: T, store: Rc<dyn SettingsStore>, key: &str, flags: BindFlags) -> Self {
        Self {
            control,
            store,
            key: key.to_string(),
            flags,
            syncing: Cell::new(false),
        }
    }

    /// Create the bridge, wire the directions selected by `flags` and load
    /// the initial state into the control.
    ///
    /// The store subscription is registered before the initial read so the
    /// store reports every change after it. The control handler keeps the
    /// bridge alive for as long as the control exists; the store only holds
    /// it weakly.
    pub fn bind(control: T, store: Rc<dyn SettingsStore>, key: &str, flags: BindFlags) -> Rc<Self> {
        let bridge = Rc::new(Self::new(control, store, key, flags));

        if flags.contains(BindFlags::GET) {
            let weak = Rc::downgrade(&bridge);
            bridge.store.connect_changed(
                &bridge.key,
                Box::new(move |value| {
                    if let Some(bridge) = weak.upgrade() {
                        bridge.on_setting_changed(value);
                    }
                }),
            );
        }

        bridge.initialize();

        if flags.contains(BindFlags::SET) {
            let strong = Rc::clone(&bridge);
            bridge
                .control
                .connect_toggled(Box::new(move || strong.on_control_changed()));
        }

        bridge
    }

    /// Load the stored value into the control. Falls back to
    /// `ColorScheme::DEFAULT` when the key cannot be read.
    pub fn initialize(&self) -> ColorScheme {
        let scheme = match self.store.get_enum(&self.key) {
            Ok(value) => ColorScheme::from_raw(value),
            Err(e) => {
                warn!(key = %self.key, error = %e, "cannot read color scheme, using default");
                ColorScheme::DEFAULT
            }
        };
        debug!(key = %self.key, ?scheme, "initializing dark mode switch");
        self.apply_to_control(scheme.is_dark());
        scheme
    }

    /// Write the control state to the store unless it already holds it.
    /// A failed write is logged and the control keeps the user's choice.
    pub fn on_control_changed(&self) {
        if self.syncing.get() {
            trace!(key = %self.key, "control updated from store, not writing back");
            return;
        }
        if !self.flags.contains(BindFlags::SET) {
            return;
        }

        let target = ColorScheme::from_dark(self.control.is_on());
        match self.store.get_enum(&self.key) {
            Ok(current) if current == target.value() => {
                trace!(key = %self.key, ?target, "store already up to date");
                return;
            }
            Ok(_) => {}
            Err(e) => debug!(key = %self.key, error = %e, "cannot read current value before write"),
        }

        debug!(key = %self.key, ?target, "writing color scheme");
        if let Err(e) = self.store.set_enum(&self.key, target.value()) {
            warn!(key = %self.key, error = %e, "failed to store color scheme");
        }
    }

    /// Apply an externally changed store value to the control.
    pub fn on_setting_changed(&self, value: i32) {
        if !self.flags.contains(BindFlags::GET) {
            return;
        }
        let scheme = ColorScheme::from_raw(value);
        debug!(key = %self.key, ?scheme, "color scheme changed in store");
        self.apply_to_control(scheme.is_dark());
    }

    fn apply_to_control(&self, on: bool) {
        if self.control.is_on() == on {
            return;
        }
        self.syncing.set(true);
        let _reset = scopeguard::guard(&self.syncing, |syncing| syncing.set(false));
        self.control.set_on(on);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{COLOR_SCHEME_DARK, COLOR_SCHEME_KEY, COLOR_SCHEME_LIGHT};
    use crate::error::{WelcomeError, WelcomeResult};
    use crate::settings::{ChangeHandler, MemoryStore};
    use std::cell::RefCell;

    /// Switch double that notifies like a GTK property: only on change.
    #[derive(Clone, Default)]
    struct FakeSwitch {
        inner: Rc<FakeSwitchInner>,
    }

    #[derive(Default)]
    struct FakeSwitchInner {
        on: Cell<bool>,
        updates: Cell<usize>,
        handlers: RefCell<Vec<Rc<dyn Fn()>>>,
    }

    impl FakeSwitch {
        fn updates(&self) -> usize {
            self.inner.updates.get()
        }

        /// Simulate a click
        fn click(&self) {
            self.set_on(!self.is_on());
        }
    }

    impl Toggle for FakeSwitch {
        fn is_on(&self) -> bool {
            self.inner.on.get()
        }

        fn set_on(&self, on: bool) {
            if self.inner.on.replace(on) == on {
                return;
            }
            self.inner.updates.set(self.inner.updates.get() + 1);
            let handlers: Vec<_> = self.inner.handlers.borrow().clone();
            for handler in handlers {
                handler();
            }
        }

        fn connect_toggled(&self, handler: Box<dyn Fn()>) {
            self.inner.handlers.borrow_mut().push(Rc::from(handler));
        }
    }

    struct UnreachableStore;

    impl SettingsStore for UnreachableStore {
        fn get_enum(&self, _key: &str) -> WelcomeResult<i32> {
            Err(WelcomeError::store_unavailable("no session bus"))
        }

        fn set_enum(&self, key: &str, _value: i32) -> WelcomeResult<()> {
            Err(WelcomeError::store_write(key, "no session bus"))
        }

        fn connect_changed(&self, _key: &str, _handler: ChangeHandler) {}
    }

    /// Store that records the order of reads and subscriptions
    #[derive(Default)]
    struct RecordingStore {
        events: RefCell<Vec<&'static str>>,
    }

    impl SettingsStore for RecordingStore {
        fn get_enum(&self, _key: &str) -> WelcomeResult<i32> {
            self.events.borrow_mut().push("read");
            Ok(COLOR_SCHEME_DARK)
        }

        fn set_enum(&self, _key: &str, _value: i32) -> WelcomeResult<()> {
            self.events.borrow_mut().push("write");
            Ok(())
        }

        fn connect_changed(&self, _key: &str, _handler: ChangeHandler) {
            self.events.borrow_mut().push("subscribe");
        }
    }

    fn bound(store: &Rc<MemoryStore>, flags: BindFlags) -> (Rc<BindingBridge<FakeSwitch>>, FakeSwitch) {
        let switch = FakeSwitch::default();
        let dyn_store: Rc<dyn SettingsStore> = store.clone();
        let bridge = BindingBridge::bind(switch.clone(), dyn_store, COLOR_SCHEME_KEY, flags);
        (bridge, switch)
    }

    #[test]
    fn store_is_read_after_subscribing() {
        let store = Rc::new(RecordingStore::default());
        let switch = FakeSwitch::default();
        let dyn_store: Rc<dyn SettingsStore> = store.clone();
        let _bridge = BindingBridge::bind(switch.clone(), dyn_store, COLOR_SCHEME_KEY, BindFlags::DEFAULT);

        assert_eq!(*store.events.borrow(), vec!["subscribe", "read"]);
        assert!(switch.is_on());
    }

    #[test]
    fn absent_key_initializes_switch_off() {
        let store = Rc::new(MemoryStore::new());
        let (bridge, switch) = bound(&store, BindFlags::DEFAULT);
        assert!(!switch.is_on());
        assert_eq!(bridge.initialize(), ColorScheme::DEFAULT);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn unreachable_store_falls_back_and_keeps_user_choice() {
        let switch = FakeSwitch::default();
        let store: Rc<dyn SettingsStore> = Rc::new(UnreachableStore);
        let _bridge = BindingBridge::bind(switch.clone(), store, COLOR_SCHEME_KEY, BindFlags::DEFAULT);
        assert!(!switch.is_on());

        switch.click();
        assert!(switch.is_on());
    }

    #[test]
    fn dark_store_initializes_switch_on_without_writing() {
        let store = Rc::new(MemoryStore::with_value(COLOR_SCHEME_KEY, COLOR_SCHEME_DARK));
        let (_bridge, switch) = bound(&store, BindFlags::DEFAULT);
        assert!(switch.is_on());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn clicking_on_writes_dark() {
        let store = Rc::new(MemoryStore::with_value(COLOR_SCHEME_KEY, COLOR_SCHEME_LIGHT));
        let (_bridge, switch) = bound(&store, BindFlags::DEFAULT);

        switch.click();

        assert_eq!(store.get_enum(COLOR_SCHEME_KEY).unwrap(), COLOR_SCHEME_DARK);
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn control_change_matching_store_is_not_written() {
        let store = Rc::new(MemoryStore::with_value(COLOR_SCHEME_KEY, COLOR_SCHEME_DARK));
        let (bridge, _switch) = bound(&store, BindFlags::DEFAULT);

        bridge.on_control_changed();
        bridge.on_control_changed();

        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn external_dark_flips_switch_once_without_write_back() {
        let store = Rc::new(MemoryStore::with_value(COLOR_SCHEME_KEY, COLOR_SCHEME_LIGHT));
        let (_bridge, switch) = bound(&store, BindFlags::DEFAULT);

        store.set_external(COLOR_SCHEME_KEY, COLOR_SCHEME_DARK);

        assert!(switch.is_on());
        assert_eq!(switch.updates(), 1);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn external_light_turns_switch_off_without_loop() {
        let store = Rc::new(MemoryStore::with_value(COLOR_SCHEME_KEY, COLOR_SCHEME_DARK));
        let (_bridge, switch) = bound(&store, BindFlags::DEFAULT);
        assert!(switch.is_on());

        store.set_external(COLOR_SCHEME_KEY, COLOR_SCHEME_LIGHT);

        assert!(!switch.is_on());
        assert_eq!(store.write_count(), 0);
        assert_eq!(store.get_enum(COLOR_SCHEME_KEY).unwrap(), COLOR_SCHEME_LIGHT);
    }

    #[test]
    fn third_variant_reads_as_off_and_is_kept_until_user_writes() {
        let store = Rc::new(MemoryStore::with_value(COLOR_SCHEME_KEY, COLOR_SCHEME_DARK));
        let (_bridge, switch) = bound(&store, BindFlags::DEFAULT);

        store.set_external(COLOR_SCHEME_KEY, 2);
        assert!(!switch.is_on());
        assert_eq!(store.get_enum(COLOR_SCHEME_KEY).unwrap(), 2);
        assert_eq!(store.write_count(), 0);

        switch.click();
        switch.click();
        assert_eq!(store.get_enum(COLOR_SCHEME_KEY).unwrap(), COLOR_SCHEME_LIGHT);
    }

    #[test]
    fn write_only_binding_ignores_store_changes() {
        let store = Rc::new(MemoryStore::with_value(COLOR_SCHEME_KEY, COLOR_SCHEME_LIGHT));
        let (_bridge, switch) = bound(&store, BindFlags::SET);

        store.set_external(COLOR_SCHEME_KEY, COLOR_SCHEME_DARK);
        assert!(!switch.is_on());

        switch.click();
        assert!(switch.is_on());
        assert_eq!(store.get_enum(COLOR_SCHEME_KEY).unwrap(), COLOR_SCHEME_DARK);
    }

    #[test]
    fn read_only_binding_never_writes() {
        let store = Rc::new(MemoryStore::with_value(COLOR_SCHEME_KEY, COLOR_SCHEME_LIGHT));
        let (_bridge, switch) = bound(&store, BindFlags::GET);

        switch.click();
        assert!(switch.is_on());
        assert_eq!(store.get_enum(COLOR_SCHEME_KEY).unwrap(), COLOR_SCHEME_LIGHT);

        store.set_external(COLOR_SCHEME_KEY, COLOR_SCHEME_DARK);
        assert!(switch.is_on());
        store.set_external(COLOR_SCHEME_KEY, COLOR_SCHEME_LIGHT);
        assert!(!switch.is_on());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn dropped_bridge_stops_listening_to_store() {
        let store = Rc::new(MemoryStore::with_value(COLOR_SCHEME_KEY, COLOR_SCHEME_LIGHT));
        let switch = FakeSwitch::default();
        let dyn_store: Rc<dyn SettingsStore> = store.clone();
        drop(BindingBridge::bind(switch.clone(), dyn_store, COLOR_SCHEME_KEY, BindFlags::GET));

        store.set_external(COLOR_SCHEME_KEY, COLOR_SCHEME_DARK);
        assert!(!switch.is_on());
    }
}
