pub mod activities;
pub mod applets;
pub mod services;

use crate::error::AppError;

/// Parse a numeric path id. Anything non-numeric cannot resolve, so it is a
/// 404 rather than a 400.
pub(crate) fn parse_id(kind: &str, raw: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| AppError::not_found(format!("{kind} not found: {raw}")))
}
