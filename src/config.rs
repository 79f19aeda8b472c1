//! Runtime settings read from the environment (and `.env`, if the binary loaded one).

use std::path::PathBuf;

pub const DEFAULT_RECORDS_PATH: &str = "student_records.csv";
pub const DEFAULT_LOG_FILE_PATH: &str = "logs/student_records.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// CSV file holding the roster. `STUDENT_RECORDS_PATH`.
    pub records_path: PathBuf,
    /// Rolling JSON log file. `LOG_FILE_PATH`.
    pub log_file_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            records_path: PathBuf::from(DEFAULT_RECORDS_PATH),
            log_file_path: PathBuf::from(DEFAULT_LOG_FILE_PATH),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable source. Unset or blank
    /// variables fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            records_path: var("STUDENT_RECORDS_PATH", DEFAULT_RECORDS_PATH),
            log_file_path: var("LOG_FILE_PATH", DEFAULT_LOG_FILE_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_overrides_and_blank_values() {
        let vars: HashMap<&str, &str> =
            HashMap::from([("STUDENT_RECORDS_PATH", "/data/class.csv"), ("LOG_FILE_PATH", "  ")]);
        let settings = Settings::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(settings.records_path, PathBuf::from("/data/class.csv"));
        assert_eq!(settings.log_file_path, PathBuf::from(DEFAULT_LOG_FILE_PATH));
    }
}
