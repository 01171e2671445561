//! Configuration management with environment variable support.
//!
//! Centralized configuration for Test Trail, supporting:
//! - Environment variables for all configurable values
//! - Sensible defaults matching the conventional on-disk layout
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `TEST_TRAIL_RESULTS_DIR` | Name of the per-script results directory | `results` |
//! | `TEST_TRAIL_ECHO` | Echo report lines to stdout (`0`/`false` to disable) | `1` |
//! | `TEST_TRAIL_TIMESTAMP_FORMAT` | Timestamp format for artifact file names | `%Y%m%d_%H%M%S` |

use std::env;
use std::sync::OnceLock;

// ============================================================================
// Default Values
// ============================================================================

/// Default name of the results directory created next to each test script
pub const DEFAULT_RESULTS_DIR_NAME: &str = "results";

/// Default console echo for report lines
pub const DEFAULT_ECHO: bool = true;

/// Default timestamp format for artifact file names
pub const DEFAULT_ARTIFACT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// ============================================================================
// Environment Variable Names
// ============================================================================

/// Environment variable for the results directory name
pub const ENV_RESULTS_DIR: &str = "TEST_TRAIL_RESULTS_DIR";

/// Environment variable for report line echo
pub const ENV_ECHO: &str = "TEST_TRAIL_ECHO";

/// Environment variable for the artifact timestamp format
pub const ENV_ARTIFACT_TIMESTAMP_FORMAT: &str = "TEST_TRAIL_TIMESTAMP_FORMAT";

// ============================================================================
// Configuration Getters (with caching)
// ============================================================================

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration (initialized from environment on first access)
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Centralized configuration for Test Trail
#[derive(Debug, Clone)]
pub struct Config {
    /// Report-related settings
    pub report: ReportSettings,
    /// Artifact-naming settings
    pub artifacts: ArtifactSettings,
}

/// Report-related settings
#[derive(Debug, Clone)]
pub struct ReportSettings {
    /// Name of the per-script results directory
    pub results_dir_name: String,
    /// Whether report lines are echoed to stdout
    pub echo: bool,
}

/// Artifact-naming settings
#[derive(Debug, Clone)]
pub struct ArtifactSettings {
    /// Timestamp format for artifact file names
    pub timestamp_format: String,
}

impl Config {
    /// Create configuration from environment variables, falling back to
    /// defaults
    pub fn from_env() -> Self {
        Self {
            report: ReportSettings::from_env(),
            artifacts: ArtifactSettings::from_env(),
        }
    }

    /// Create configuration with all defaults (ignoring environment)
    pub fn defaults() -> Self {
        Self {
            report: ReportSettings::defaults(),
            artifacts: ArtifactSettings::defaults(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ReportSettings {
    /// Create report settings from environment variables
    pub fn from_env() -> Self {
        Self {
            results_dir_name: env::var(ENV_RESULTS_DIR)
                .unwrap_or_else(|_| DEFAULT_RESULTS_DIR_NAME.to_string()),
            echo: env::var(ENV_ECHO)
                .ok()
                .map(|s| parse_bool(&s))
                .unwrap_or(DEFAULT_ECHO),
        }
    }

    /// Create report settings with defaults
    pub fn defaults() -> Self {
        Self {
            results_dir_name: DEFAULT_RESULTS_DIR_NAME.to_string(),
            echo: DEFAULT_ECHO,
        }
    }
}

impl ArtifactSettings {
    /// Create artifact settings from environment variables
    pub fn from_env() -> Self {
        Self {
            timestamp_format: env::var(ENV_ARTIFACT_TIMESTAMP_FORMAT)
                .unwrap_or_else(|_| DEFAULT_ARTIFACT_TIMESTAMP_FORMAT.to_string()),
        }
    }

    /// Create artifact settings with defaults
    pub fn defaults() -> Self {
        Self {
            timestamp_format: DEFAULT_ARTIFACT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse a boolean-ish environment value; "0", "false", "off" and "no"
/// (any case) read as false, everything else as true
fn parse_bool(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}

/// Get the results directory name (convenience function)
pub fn results_dir_name() -> String {
    get().report.results_dir_name.clone()
}

/// Get whether report lines are echoed to stdout (convenience function)
pub fn echo_report_lines() -> bool {
    get().report.echo
}

/// Get the artifact timestamp format (convenience function)
pub fn artifact_timestamp_format() -> String {
    get().artifacts.timestamp_format.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_falsy_values() {
        assert!(!parse_bool("0"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("FALSE"));
        assert!(!parse_bool("off"));
        assert!(!parse_bool(" no "));
    }

    #[test]
    fn test_parse_bool_truthy_values() {
        assert!(parse_bool("1"));
        assert!(parse_bool("true"));
        assert!(parse_bool("yes"));
        assert!(parse_bool("anything"));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::defaults();
        assert_eq!(config.report.results_dir_name, DEFAULT_RESULTS_DIR_NAME);
        assert!(config.report.echo);
        assert_eq!(
            config.artifacts.timestamp_format,
            DEFAULT_ARTIFACT_TIMESTAMP_FORMAT
        );
    }

    #[test]
    fn test_from_env_overrides_and_fallback() {
        // Force the cached global to initialize before touching the
        // environment; concurrent readers go through it, so the variables set
        // below stay invisible outside the freshly built settings.
        let _ = get();

        unsafe {
            env::set_var(ENV_RESULTS_DIR, "artifacts");
            env::set_var(ENV_ECHO, "0");
            env::set_var(ENV_ARTIFACT_TIMESTAMP_FORMAT, "%Y");
        }
        let report = ReportSettings::from_env();
        let artifacts = ArtifactSettings::from_env();
        unsafe {
            env::remove_var(ENV_RESULTS_DIR);
            env::remove_var(ENV_ECHO);
            env::remove_var(ENV_ARTIFACT_TIMESTAMP_FORMAT);
        }

        assert_eq!(report.results_dir_name, "artifacts");
        assert!(!report.echo);
        assert_eq!(artifacts.timestamp_format, "%Y");

        // With the variables unset again, from_env falls back to defaults
        let report = ReportSettings::from_env();
        let artifacts = ArtifactSettings::from_env();
        assert_eq!(report.results_dir_name, DEFAULT_RESULTS_DIR_NAME);
        assert!(report.echo);
        assert_eq!(
            artifacts.timestamp_format,
            DEFAULT_ARTIFACT_TIMESTAMP_FORMAT
        );
    }
}
