// Steam id format checks.
// Individual 64-bit account ids are 17 digits starting with 7656119.

use crate::error::{Result, SteamError};

pub const STEAM_ID_LEN: usize = 17;
const INDIVIDUAL_PREFIX: &str = "7656119";

/// Validate a 64-bit individual-account Steam id.
pub fn validate(steam_id: &str) -> Result<()> {
    if steam_id.len() != STEAM_ID_LEN {
        return Err(invalid(
            steam_id,
            format!(
                "incorrect length ({}), must be {} numbers",
                steam_id.len(),
                STEAM_ID_LEN
            ),
        ));
    }
    if !steam_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(steam_id, "must be numeric only"));
    }
    if !steam_id.starts_with(INDIVIDUAL_PREFIX) {
        return Err(invalid(
            steam_id,
            format!("must start with {INDIVIDUAL_PREFIX}"),
        ));
    }
    Ok(())
}

/// Validate a storefront app id: non-empty and all ASCII digits.
pub fn validate_app_id(app_id: &str) -> Result<()> {
    if app_id.is_empty() || !app_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SteamError::InvalidAppId(app_id.to_string()));
    }
    Ok(())
}

fn invalid(steam_id: &str, reason: impl Into<String>) -> SteamError {
    SteamError::InvalidSteamId {
        steam_id: steam_id.to_string(),
        reason: reason.into(),
    }
}
