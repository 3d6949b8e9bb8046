//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading leave
//! policies from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{PolicyFile, PolicyMetadata, VacationPolicy};

/// Loads and provides access to a leave policy.
///
/// # Directory Structure
///
/// ```text
/// config/clt/
/// └── policy.yaml   # Policy metadata and vacation thresholds
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/clt")?;
/// println!("Cap: {} days", loader.vacation_policy().annual_cap_days);
/// # Ok::<(), leave_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    metadata: PolicyMetadata,
    vacation: VacationPolicy,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `policy.yaml` is missing, is not valid YAML, or
    /// describes inconsistent thresholds.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let policy_path = path.as_ref().join("policy.yaml");
        let file = Self::load_yaml::<PolicyFile>(&policy_path)?;
        file.vacation.validate()?;

        debug!(
            code = %file.policy.code,
            version = %file.policy.version,
            "Loaded leave policy"
        );

        Ok(Self {
            metadata: file.policy,
            vacation: file.vacation,
        })
    }

    /// Builds a loader from an in-memory policy, validating its thresholds.
    pub fn from_parts(metadata: PolicyMetadata, vacation: VacationPolicy) -> EngineResult<Self> {
        vacation.validate()?;
        Ok(Self { metadata, vacation })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the policy metadata.
    pub fn metadata(&self) -> &PolicyMetadata {
        &self.metadata
    }

    /// Returns the vacation thresholds.
    pub fn vacation_policy(&self) -> VacationPolicy {
        self.vacation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/clt"
    }

    fn scratch_dir(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "leave-engine-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("policy.yaml"), contents).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().code, "CLT");
        assert_eq!(loader.vacation_policy(), VacationPolicy::default());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        match ConfigLoader::load("/nonexistent/path") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("policy.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_malformed_yaml_returns_parse_error() {
        let dir = scratch_dir("malformed", "policy: [unclosed\n");
        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("policy.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_inconsistent_thresholds_returns_invalid_policy() {
        let dir = scratch_dir(
            "inconsistent",
            r#"
policy:
  code: TEST
  name: Test
  version: "1"
  source_url: https://example.com
vacation:
  annual_cap_days: 20
  min_split_days: 5
  long_split_days: 25
"#,
        );
        assert!(matches!(
            ConfigLoader::load(&dir),
            Err(EngineError::InvalidPolicy { .. })
        ));
    }

    #[test]
    fn test_from_parts_accepts_custom_thresholds() {
        let metadata = PolicyMetadata {
            code: "CUSTOM".to_string(),
            name: "Custom".to_string(),
            version: "1".to_string(),
            source_url: "https://example.com".to_string(),
        };
        let policy = VacationPolicy {
            annual_cap_days: 20,
            min_split_days: 3,
            long_split_days: 10,
            concessive_months: 6,
        };
        let loader = ConfigLoader::from_parts(metadata, policy).unwrap();
        assert_eq!(loader.vacation_policy().annual_cap_days, 20);
    }
}
