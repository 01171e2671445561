//! Deterministic artifact path construction.
//!
//! Pure string assembly over a fixed base directory: no filesystem access,
//! no existence checks. Two specs that resolve to the same path will silently
//! overwrite each other at write time.

use std::path::{Path, PathBuf};

use crate::config;
use crate::engine::clock;

/// Describes how to build one artifact path under a base directory.
///
/// Ephemeral value: carries no identity beyond the call that produced it.
#[derive(Debug, Clone)]
pub struct PathSpec {
    /// Base file name, without extension
    pub file_name: String,

    /// Extension to append with a `.`; a leading dot from the caller is
    /// stripped, anything else is concatenated unvalidated
    pub extension: Option<String>,

    /// Whether to prefix the file name with a timestamp, joined by `_`
    pub add_timestamp: bool,

    /// chrono format string for the timestamp prefix
    pub timestamp_format: String,
}

impl PathSpec {
    /// Spec for a bare file name: no extension, no timestamp, default
    /// timestamp format
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            extension: None,
            add_timestamp: false,
            timestamp_format: config::artifact_timestamp_format(),
        }
    }

    /// Set the extension
    pub fn extension(mut self, extension: &str) -> Self {
        self.extension = Some(extension.to_string());
        self
    }

    /// Set whether a timestamp prefix is added
    pub fn timestamped(mut self, add_timestamp: bool) -> Self {
        self.add_timestamp = add_timestamp;
        self
    }

    /// Set the timestamp prefix format
    pub fn timestamp_format(mut self, format: &str) -> Self {
        self.timestamp_format = format.to_string();
        self
    }
}

/// Builds artifact paths under a fixed base directory
#[derive(Debug, Clone)]
pub struct PathBuilder {
    base_dir: PathBuf,
}

impl PathBuilder {
    /// Create a builder over `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The base directory all built paths are joined onto
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a spec to a concrete path under the base directory
    pub fn build(&self, spec: &PathSpec) -> PathBuf {
        let mut file_name = spec.file_name.clone();

        if spec.add_timestamp {
            let stamp = clock::now_datetime().format(&spec.timestamp_format);
            file_name = format!("{}_{}", stamp, file_name);
        }

        if let Some(extension) = &spec.extension {
            file_name = format!("{}.{}", file_name, extension.trim_start_matches('.'));
        }

        self.base_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn file_name(path: &Path) -> String {
        path.file_name().unwrap().to_string_lossy().to_string()
    }

    #[test]
    fn test_bare_name_is_joined_unchanged() {
        let builder = PathBuilder::new("/tmp/run");
        let path = builder.build(&PathSpec::new("x"));
        assert_eq!(path, PathBuf::from("/tmp/run/x"));
    }

    #[test]
    fn test_extension_is_appended_with_dot() {
        let builder = PathBuilder::new("/tmp/run");
        let path = builder.build(&PathSpec::new("x").extension("png"));
        assert_eq!(path, PathBuf::from("/tmp/run/x.png"));
    }

    #[test]
    fn test_leading_dot_in_extension_is_stripped() {
        let builder = PathBuilder::new("/tmp/run");
        let path = builder.build(&PathSpec::new("x").extension(".png"));
        assert_eq!(path, PathBuf::from("/tmp/run/x.png"));
    }

    #[test]
    fn test_timestamped_name_matches_default_pattern() {
        let builder = PathBuilder::new("/tmp/run");
        let path = builder.build(&PathSpec::new("x").extension("png").timestamped(true));
        let name = file_name(&path);

        // YYYYMMDD_HHMMSS_x.png
        assert_eq!(name.len(), "00000000_000000_x.png".len());
        assert!(name[..8].chars().all(|c| c.is_ascii_digit()), "{}", name);
        assert_eq!(&name[8..9], "_");
        assert!(name[9..15].chars().all(|c| c.is_ascii_digit()), "{}", name);
        assert_eq!(&name[15..], "_x.png");
    }

    #[test]
    fn test_custom_timestamp_format() {
        let builder = PathBuilder::new("/tmp/run");
        let path = builder.build(
            &PathSpec::new("x")
                .timestamped(true)
                .timestamp_format("%Y"),
        );
        let name = file_name(&path);

        assert_eq!(name.len(), "0000_x".len());
        assert!(name[..4].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(&name[4..], "_x");
    }

    #[test]
    fn test_empty_name_still_gets_timestamp_and_extension() {
        let builder = PathBuilder::new("/tmp/run");
        let path = builder.build(&PathSpec::new("").extension("png").timestamped(true));
        let name = file_name(&path);

        assert!(name.ends_with("_.png"), "{}", name);
        assert!(name[..8].chars().all(|c| c.is_ascii_digit()));
    }
}
