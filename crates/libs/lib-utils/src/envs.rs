//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get an environment variable, falling back to `default` when unset.
///
/// Empty values count as unset so `FOO=` in a `.env` file behaves like a
/// missing key.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    get_env(name)
        .ok()
        .filter(|val| !val.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parse an optional environment variable.
///
/// Unset yields `default`; a value that is set but does not parse is still an
/// error so typos surface at startup.
pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match get_env(name) {
        Ok(val) if !val.trim().is_empty() => {
            val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name))
        }
        _ => Ok(default),
    }
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        let val: u64 = get_env_parse_or("LIB_UTILS_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(val, 42);
    }

    #[test]
    fn test_parse_or_rejects_garbage() {
        env::set_var("LIB_UTILS_TEST_GARBAGE_VAR", "not-a-number");
        let res: Result<u64, Error> = get_env_parse_or("LIB_UTILS_TEST_GARBAGE_VAR", 1);
        assert!(matches!(res, Err(Error::WrongFormat("LIB_UTILS_TEST_GARBAGE_VAR"))));
    }

    #[test]
    fn test_get_env_or_treats_blank_as_unset() {
        env::set_var("LIB_UTILS_TEST_BLANK_VAR", "  ");
        assert_eq!(get_env_or("LIB_UTILS_TEST_BLANK_VAR", "fallback"), "fallback");
    }
}
