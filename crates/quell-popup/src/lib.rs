//! Popup state for Quell
//!
//! The [`RootStore`] owns a [`SettingsStore`] mirroring background settings
//! and a [`WizardStore`] driving the onboarding steps. Derived values are
//! published through [`Observable`] so views can re-render on change.

pub mod observable;
pub mod root_store;
pub mod settings_store;
pub mod wizard_store;

pub use observable::{Observable, Subscription};
pub use root_store::{pause_expiry_changed, RootStore};
pub use settings_store::{Clock, SettingsStore, SettingsWriter, SystemClock};
pub use wizard_store::{StepInfo, WizardStore, INITIAL_STEP, LAST_STEP};
