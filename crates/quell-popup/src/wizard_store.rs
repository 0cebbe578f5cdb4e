//! Onboarding wizard shown in the popup

use crate::observable::{Observable, Subscription};
use crate::settings_store::SettingsWriter;
use quell_core::{QuellError, QuellResult, SettingName, SettingValue};
use std::rc::Rc;

pub const INITIAL_STEP: u8 = 1;
pub const LAST_STEP: u8 = 4;

pub const NEXT_BUTTON_KEY: &str = "popup_wizard_next_button";
pub const START_BUTTON_KEY: &str = "popup_wizard_start_button";

/// Display metadata of one wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    pub name_key: &'static str,
    pub description_key: &'static str,
    pub icon: &'static str,
}

static STEPS: [StepInfo; LAST_STEP as usize] = [
    StepInfo {
        name_key: "popup_steps_experimental_title",
        description_key: "popup_steps_experimental_description",
        icon: "experiment",
    },
    StepInfo {
        name_key: "popup_steps_new_tech_title",
        description_key: "popup_steps_new_tech_description",
        icon: "new_tech",
    },
    StepInfo {
        name_key: "popup_steps_fast_work_title",
        description_key: "popup_steps_fast_work_description",
        icon: "fast_work",
    },
    StepInfo {
        name_key: "popup_steps_v3_manifest_title",
        description_key: "popup_steps_v3_manifest_description",
        icon: "chrome_logo",
    },
];

/// Current wizard step, always within `INITIAL_STEP..=LAST_STEP`
pub struct WizardStore {
    settings: Rc<dyn SettingsWriter>,
    step: Observable<u8>,
}

impl WizardStore {
    pub fn new(settings: Rc<dyn SettingsWriter>) -> Self {
        Self {
            settings,
            step: Observable::new(INITIAL_STEP),
        }
    }

    pub fn step(&self) -> u8 {
        self.step.get()
    }

    pub fn is_last_step(&self) -> bool {
        self.step() == LAST_STEP
    }

    pub fn step_info(&self) -> &'static StepInfo {
        &STEPS[usize::from(self.step() - INITIAL_STEP)]
    }

    /// Translation key of the primary button
    pub fn button_text_key(&self) -> &'static str {
        match self.step() {
            LAST_STEP => START_BUTTON_KEY,
            _ => NEXT_BUTTON_KEY,
        }
    }

    /// Jump to `step`. Out-of-range steps are rejected and leave the
    /// current step as is.
    pub fn set_step(&self, step: u8) -> QuellResult<()> {
        if !(INITIAL_STEP..=LAST_STEP).contains(&step) {
            return Err(QuellError::InvalidStep(step));
        }
        self.step.set(step);
        Ok(())
    }

    /// Advance one step; stays on the last step.
    pub fn set_next_step(&self) {
        let step = self.step();
        if step < LAST_STEP {
            self.step.set(step + 1);
        }
    }

    /// Disable the wizard, then rewind it to the first step.
    ///
    /// If the setting cannot be written the step is kept.
    pub async fn skip_wizard(&self) -> QuellResult<()> {
        self.settings
            .set_setting(SettingName::PopupV3WizardEnabled, SettingValue::Bool(false))
            .await?;

        log::info!("Onboarding wizard disabled at step {}", self.step());
        self.step.set(INITIAL_STEP);
        Ok(())
    }

    /// Observe step changes
    pub fn subscribe(&self, callback: impl Fn(&u8) + 'static) -> Subscription {
        self.step.subscribe(callback)
    }
}
