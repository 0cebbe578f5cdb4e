//! Local mirror of background-owned settings

use crate::observable::{Observable, Subscription};
use async_trait::async_trait;
use quell_channel::MessageChannel;
use quell_core::{QuellResult, SettingName, SettingValue};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of wall-clock time in milliseconds since the Unix epoch
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// [`Clock`] reading the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// The one write path for settings, as seen by other stores
#[async_trait(?Send)]
pub trait SettingsWriter {
    async fn set_setting(&self, name: SettingName, value: SettingValue) -> QuellResult<()>;
}

/// Mirror of the background settings plus values derived from them.
///
/// Only [`SettingsStore::set_setting`] and the sync methods mutate the
/// mirror.
pub struct SettingsStore {
    channel: Rc<dyn MessageChannel>,
    clock: Rc<dyn Clock>,
    settings: RefCell<HashMap<SettingName, SettingValue>>,
    pause_expires: Observable<u64>,
    current_time: Cell<u64>,
}

impl SettingsStore {
    pub fn new(channel: Rc<dyn MessageChannel>, clock: Rc<dyn Clock>) -> Self {
        let current_time = clock.now_ms();
        Self {
            channel,
            clock,
            settings: RefCell::new(HashMap::new()),
            pause_expires: Observable::new(0),
            current_time: Cell::new(current_time),
        }
    }

    /// Hydrate the mirror from the background snapshot
    pub async fn load(&self) -> QuellResult<()> {
        let snapshot = self.channel.get_settings().await?;
        log::debug!("Loaded {} settings from background", snapshot.len());
        self.apply_snapshot(snapshot);
        Ok(())
    }

    /// Replace mirrored values with a background snapshot. Values of the
    /// wrong kind are skipped.
    pub fn apply_snapshot(&self, snapshot: HashMap<SettingName, SettingValue>) {
        for (name, value) in snapshot {
            if let Err(e) = self.sync_setting(name, value) {
                log::warn!("Skipping setting from snapshot: {}", e);
            }
        }
    }

    /// Apply a value pushed by the background, e.g. an expired pause
    pub fn sync_setting(&self, name: SettingName, value: SettingValue) -> QuellResult<()> {
        name.check(&value)?;
        self.store_value(name, value);
        Ok(())
    }

    /// Persist a setting through the background, then mirror it.
    ///
    /// On failure the mirror is left untouched.
    pub async fn set_setting(
        &self,
        name: SettingName,
        value: impl Into<SettingValue>,
    ) -> QuellResult<()> {
        let value = value.into();
        name.check(&value)?;

        log::debug!("Setting {} = {:?}", name, value);
        self.channel.set_setting(name, value.clone()).await?;
        self.store_value(name, value);
        Ok(())
    }

    /// [`set_setting`](Self::set_setting) for a wire name coming from view
    /// code. Unknown names fail before any channel traffic.
    pub async fn set_setting_by_name(
        &self,
        name: &str,
        value: impl Into<SettingValue>,
    ) -> QuellResult<()> {
        let name: SettingName = name.parse()?;
        self.set_setting(name, value).await
    }

    /// Mirrored value, or the setting's default before the first load
    pub fn get(&self, name: SettingName) -> SettingValue {
        self.settings
            .borrow()
            .get(&name)
            .cloned()
            .unwrap_or_else(|| name.default_value())
    }

    pub fn is_wizard_enabled(&self) -> bool {
        self.get(SettingName::PopupV3WizardEnabled)
            .as_bool()
            .unwrap_or(true)
    }

    pub fn is_protection_enabled(&self) -> bool {
        self.get(SettingName::ProtectionEnabled)
            .as_bool()
            .unwrap_or(true)
    }

    /// Pause end timestamp in ms, 0 when protection is not paused
    pub fn protection_pause_expires(&self) -> u64 {
        self.pause_expires.get()
    }

    /// Observe changes of [`protection_pause_expires`](Self::protection_pause_expires)
    pub fn subscribe_protection_pause_expires(
        &self,
        equals: impl Fn(&u64, &u64) -> bool + 'static,
        callback: impl Fn(&u64) + 'static,
    ) -> Subscription {
        self.pause_expires.subscribe_with(equals, callback)
    }

    /// Snapshot of "now" used by the pause countdown
    pub fn current_time(&self) -> u64 {
        self.current_time.get()
    }

    pub fn reset_current_time(&self) {
        self.current_time.set(self.clock.now_ms());
    }

    pub fn is_protection_paused(&self) -> bool {
        self.protection_pause_expires() > self.current_time()
    }

    /// Time left on the pause as of the last reset
    pub fn protection_pause_remaining(&self) -> Duration {
        Duration::from_millis(
            self.protection_pause_expires()
                .saturating_sub(self.current_time()),
        )
    }

    fn store_value(&self, name: SettingName, value: SettingValue) {
        let expires = match (name, &value) {
            // check() guarantees a whole, non-negative value
            (SettingName::ProtectionPauseExpires, SettingValue::Number(n)) => Some(*n as u64),
            _ => None,
        };

        self.settings.borrow_mut().insert(name, value);

        // Notify after the mirror borrow is released
        if let Some(expires) = expires {
            self.pause_expires.set(expires);
        }
    }
}

#[async_trait(?Send)]
impl SettingsWriter for SettingsStore {
    async fn set_setting(&self, name: SettingName, value: SettingValue) -> QuellResult<()> {
        SettingsStore::set_setting(self, name, value).await
    }
}
