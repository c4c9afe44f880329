//! # Environment Variables
//!
//! Utilities for reading environment variables.

use std::env;

/// Get an environment variable, falling back to a default when unset.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_or_prefers_set_value() {
        env::set_var("LIB_UTILS_ENVS_TEST_VAR", "configured");
        assert_eq!(
            get_env_or("LIB_UTILS_ENVS_TEST_VAR", "fallback"),
            "configured"
        );
        env::remove_var("LIB_UTILS_ENVS_TEST_VAR");
    }

    #[test]
    fn test_get_env_or_falls_back_when_unset() {
        assert_eq!(get_env_or("LIB_UTILS_ENVS_TEST_UNSET", "fallback"), "fallback");
    }
}
