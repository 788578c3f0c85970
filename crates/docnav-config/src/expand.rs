//! `${VAR}` expansion for configured data paths.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a path string.
///
/// Unset variables without a default are an error naming `field`. Strings
/// without `${` are returned as is, so a bare `$` is never expanded.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |var: &str| match std::env::var(var) {
        Ok(val) => Ok(Some(val)),
        Err(_) => Err(UnsetVar(var.to_owned())),
    };

    shellexpand::env_with_context(value, lookup)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.cause.0),
        })
}

/// Name of a variable that is not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_data_dir_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCNAV_TEST_DATA_DIR", "/srv/site/.temp");
        }
        let result = expand_env("${DOCNAV_TEST_DATA_DIR}/sidebar.json", "data.structure").unwrap();
        assert_eq!(result, "/srv/site/.temp/sidebar.json");
        unsafe {
            std::env::remove_var("DOCNAV_TEST_DATA_DIR");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCNAV_TEST_UNSET_DIR");
        }
        let result = expand_env("${DOCNAV_TEST_UNSET_DIR:-build}/routes.json", "data.routes").unwrap();
        assert_eq!(result, "build/routes.json");
    }

    #[test]
    fn test_expand_unset_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCNAV_TEST_MISSING");
        }
        let err = expand_env("${DOCNAV_TEST_MISSING}/routes.json", "data.routes").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("DOCNAV_TEST_MISSING"));
        assert!(err.to_string().contains("data.routes"));
    }

    #[test]
    fn test_plain_paths_untouched() {
        assert_eq!(expand_env("data/sidebar.json", "data.structure").unwrap(), "data/sidebar.json");
        assert_eq!(expand_env("$HOME/sidebar.json", "data.structure").unwrap(), "$HOME/sidebar.json");
    }
}
