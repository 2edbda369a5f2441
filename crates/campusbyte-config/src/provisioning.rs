//! Account provisioning settings.
//!
//! The default password is resolved once at startup and passed explicitly to
//! the provisioning service through application state.

use std::env;

pub const DEFAULT_PASSWORD: &str = "campus-default-pass";

#[derive(Clone)]
pub struct ProvisioningConfig {
    /// Password assigned when the caller does not supply one.
    pub default_password: String,
    /// bcrypt work factor (4..=31).
    pub bcrypt_cost: u32,
}

impl ProvisioningConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let default_password = env::var("DEFAULT_PASS")
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(raw) => match raw.parse::<u32>() {
                Ok(cost) if (4..=31).contains(&cost) => cost,
                _ => {
                    tracing::warn!(value = %raw, "Ignoring invalid BCRYPT_COST");
                    bcrypt::DEFAULT_COST
                }
            },
            Err(_) => bcrypt::DEFAULT_COST,
        };

        Self {
            default_password,
            bcrypt_cost,
        }
    }

    /// Picks the caller's password when present and non-empty, otherwise the default.
    ///
    /// The boolean is `true` when the default was used.
    pub fn effective_password<'a>(&'a self, supplied: Option<&'a str>) -> (&'a str, bool) {
        match supplied {
            Some(p) if !p.is_empty() => (p, false),
            _ => (self.default_password.as_str(), true),
        }
    }
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            default_password: DEFAULT_PASSWORD.to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for ProvisioningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvisioningConfig")
            .field("default_password", &"<redacted>")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}
