//! Composition root of the popup stores

use crate::observable::Subscription;
use crate::settings_store::{Clock, SettingsStore, SettingsWriter, SystemClock};
use crate::wizard_store::WizardStore;
use quell_channel::MessageChannel;
use quell_core::QuellResult;
use std::rc::Rc;

/// Whether a pause-expiry transition should refresh the countdown clock.
///
/// Every transition counts except staying at 0. In particular a pause
/// ending (non-zero to 0) does refresh it.
pub fn pause_expiry_changed(prev: u64, next: u64) -> bool {
    !(prev == 0 && next == 0)
}

/// Owns the popup stores for the lifetime of the popup
pub struct RootStore {
    settings_store: Rc<SettingsStore>,
    wizard_store: WizardStore,
    _pause_reaction: Subscription,
}

impl RootStore {
    pub fn new(channel: Rc<dyn MessageChannel>) -> Self {
        Self::with_clock(channel, Rc::new(SystemClock))
    }

    pub fn with_clock(channel: Rc<dyn MessageChannel>, clock: Rc<dyn Clock>) -> Self {
        let settings_store = Rc::new(SettingsStore::new(channel, clock));
        let wizard_store =
            WizardStore::new(Rc::clone(&settings_store) as Rc<dyn SettingsWriter>);

        // Weak so the subscription does not keep the store alive
        let target = Rc::downgrade(&settings_store);
        let pause_reaction = settings_store.subscribe_protection_pause_expires(
            |prev, next| !pause_expiry_changed(*prev, *next),
            move |expires| {
                if let Some(settings) = target.upgrade() {
                    log::trace!("Pause expiry now {}, resetting clock", expires);
                    settings.reset_current_time();
                }
            },
        );
        settings_store.reset_current_time();

        Self {
            settings_store,
            wizard_store,
            _pause_reaction: pause_reaction,
        }
    }

    /// Hydrate the stores from the background process
    pub async fn init(&self) -> QuellResult<()> {
        self.settings_store.load().await
    }

    pub fn settings_store(&self) -> &SettingsStore {
        &self.settings_store
    }

    pub fn wizard_store(&self) -> &WizardStore {
        &self.wizard_store
    }
}
