//! PIN lock use cases

use crate::domain::UserSettings;
use crate::error::{MjourError, Result};
use crate::infrastructure::JournalStore;

pub struct PinService<'a, S: JournalStore> {
    store: &'a S,
}

impl<'a, S: JournalStore> PinService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        PinService { store }
    }

    /// Settings row, creating an empty one on first access
    pub fn settings(&self) -> Result<UserSettings> {
        match self.store.load_settings()? {
            Some(settings) => Ok(settings),
            None => {
                let settings = UserSettings::default();
                self.store.save_settings(&settings)?;
                Ok(settings)
            }
        }
    }

    pub fn is_enabled(&self) -> Result<bool> {
        Ok(self.settings()?.is_pin_enabled())
    }

    pub fn set_pin(&self, pin: &str) -> Result<()> {
        let mut settings = self.settings()?;
        settings.set_pin(pin)?;
        self.store.save_settings(&settings)?;
        log::info!("PIN lock enabled");
        Ok(())
    }

    /// True when no PIN is set or `pin` matches
    pub fn validate_pin(&self, pin: &str) -> Result<bool> {
        Ok(self.settings()?.verify_pin(pin))
    }

    /// Like `validate_pin` but a mismatch is an error
    pub fn require_pin(&self, pin: &str) -> Result<()> {
        if self.validate_pin(pin)? {
            Ok(())
        } else {
            log::warn!("Rejected PIN attempt");
            Err(MjourError::Auth("Incorrect PIN".to_string()))
        }
    }

    pub fn remove_pin(&self) -> Result<()> {
        let mut settings = self.settings()?;
        settings.clear_pin();
        self.store.save_settings(&settings)?;
        log::info!("PIN lock removed");
        Ok(())
    }
}
