//! Screenshot saving bound to a result directory.

use std::path::{Path, PathBuf};

use crate::engine::paths::{PathBuilder, PathSpec};
use crate::engine::types::EngineResult;

/// Externally supplied capability that writes a screenshot to a path.
///
/// Implementations are bound to a live browser/automation session by the
/// caller; this crate never talks to the browser itself. Any closure
/// `FnMut(&Path) -> EngineResult<()>` qualifies.
pub trait CaptureTarget {
    /// Capture the current screen into the file at `path`
    fn capture_to(&mut self, path: &Path) -> EngineResult<()>;
}

impl<F> CaptureTarget for F
where
    F: FnMut(&Path) -> EngineResult<()>,
{
    fn capture_to(&mut self, path: &Path) -> EngineResult<()> {
        self(path)
    }
}

/// Binds a base directory and a capture capability into a reusable save
/// operation.
///
/// Plain value binding, fixed once per run: step helpers call `save(name)`
/// repeatedly without re-threading the directory. Not shared mutable state;
/// construct one per run.
#[derive(Debug)]
pub struct ArtifactCapture<C> {
    builder: PathBuilder,
    capability: C,
}

impl<C: CaptureTarget> ArtifactCapture<C> {
    /// Bind `capability` to `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>, capability: C) -> Self {
        Self {
            builder: PathBuilder::new(base_dir),
            capability,
        }
    }

    /// Directory screenshots are saved under
    pub fn base_dir(&self) -> &Path {
        self.builder.base_dir()
    }

    /// Save a screenshot under the default naming: timestamp prefix and a
    /// `png` extension. Returns the resolved path. A colliding path silently
    /// overwrites; a capability failure propagates uncaught.
    pub fn save(&mut self, name: &str) -> EngineResult<PathBuf> {
        self.save_with(PathSpec::new(name).extension("png").timestamped(true))
    }

    /// Save a screenshot with full control over the file name
    pub fn save_with(&mut self, spec: PathSpec) -> EngineResult<PathBuf> {
        let path = self.builder.build(&spec);
        self.capability.capture_to(&path)?;
        Ok(path)
    }

    /// Hand the capability back, e.g. to release the underlying session
    pub fn into_capability(self) -> C {
        self.capability
    }
}
