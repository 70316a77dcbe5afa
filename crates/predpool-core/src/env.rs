//! Environment variable utilities
//!
//! Generic `env_get<T>` parsing with defaults, used by `PoolConfig::from_env`
//! and the logging init. All predpool variables live in the `PP_` namespace.
//!
//! # Usage
//!
//! ```ignore
//! use predpool_core::env::{env_get, env_get_bool};
//!
//! let replicas: usize = env_get("PP_REPLICAS", 4);
//! let flush: bool = env_get_bool("PP_FLUSH_EPRINT", false);
//! ```

use std::str::FromStr;

/// Get environment variable parsed as type T, or return default.
///
/// Unset or unparseable values fall back to the default.
#[inline]
pub fn env_get<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Get environment variable as boolean.
///
/// Accepts "1", "true", "yes", "on" (case-insensitive) as true.
/// Anything else set counts as false; unset returns the default.
#[inline]
pub fn env_get_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => matches!(val.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

/// Get environment variable as optional value.
///
/// `Some(T)` only when the variable is set and parses.
#[inline]
pub fn env_get_opt<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Check if environment variable is set (regardless of value).
#[inline]
pub fn env_is_set(key: &str) -> bool {
    std::env::var(key).is_ok()
}
