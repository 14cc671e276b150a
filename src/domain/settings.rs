//! Single-row user settings holding the PIN lock

use crate::error::{MjourError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::RngCore;
use sha2::{Digest, Sha256};

pub const MIN_PIN_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserSettings {
    /// Base64 SHA-256 of salt || pin
    pub pin_hash: Option<String>,
    /// Base64 random salt
    pub pin_salt: Option<String>,
}

impl UserSettings {
    pub fn is_pin_enabled(&self) -> bool {
        self.pin_hash.is_some() && self.pin_salt.is_some()
    }

    /// Replace the PIN with a freshly salted hash
    pub fn set_pin(&mut self, pin: &str) -> Result<()> {
        if pin.chars().count() < MIN_PIN_LEN {
            return Err(MjourError::Validation(format!(
                "PIN must be at least {} characters",
                MIN_PIN_LEN
            )));
        }

        let mut salt = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut salt);
        self.pin_hash = Some(hash_pin(pin, &salt));
        self.pin_salt = Some(STANDARD.encode(salt));
        Ok(())
    }

    pub fn clear_pin(&mut self) {
        self.pin_hash = None;
        self.pin_salt = None;
    }

    /// True when no PIN is set or `pin` matches the stored hash
    pub fn verify_pin(&self, pin: &str) -> bool {
        let (Some(hash), Some(salt)) = (&self.pin_hash, &self.pin_salt) else {
            return true;
        };
        match STANDARD.decode(salt) {
            Ok(salt) => hash_pin(pin, &salt) == *hash,
            Err(_) => false,
        }
    }
}

fn hash_pin(pin: &str, salt: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(pin.as_bytes());
    STANDARD.encode(hasher.finalize())
}
