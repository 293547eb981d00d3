//! Output sinks for generated sources
//!
//! The engine composes every unit fully in memory and hands it over in a
//! single call, so a sink only needs to map a qualified name to a destination
//! and persist the text. The filesystem sink scopes the file handle inside
//! the call; it is released whether the write succeeds or fails.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::GenerationError;

/// Destination for generated source units, keyed by qualified name.
pub trait SourceSink {
    /// Persists one fully composed source unit.
    fn write_source(&mut self, qualified_name: &str, contents: &str)
        -> Result<(), GenerationError>;
}

/// Sink writing `.java` files under a root directory, one directory per
/// package segment.
#[derive(Debug)]
pub struct FsSourceSink {
    root: PathBuf,
}

impl FsSourceSink {
    /// A sink rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The file path a qualified name maps to.
    pub fn path_for(&self, qualified_name: &str) -> PathBuf {
        let (package, simple_name) = match qualified_name.rsplit_once('.') {
            Some((package, simple_name)) => (package, simple_name),
            None => ("", qualified_name),
        };
        let mut path = self.root.clone();
        for segment in package.split('.').filter(|segment| !segment.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{simple_name}.java"));
        path
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceSink for FsSourceSink {
    fn write_source(
        &mut self,
        qualified_name: &str,
        contents: &str,
    ) -> Result<(), GenerationError> {
        let path = self.path_for(qualified_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        debug!(path = %path.display(), "source unit written");
        Ok(())
    }
}

/// Sink collecting units in memory, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySourceSink {
    sources: BTreeMap<String, String>,
}

impl MemorySourceSink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All collected units, keyed by qualified name.
    pub fn sources(&self) -> &BTreeMap<String, String> {
        &self.sources
    }

    /// One collected unit.
    pub fn get(&self, qualified_name: &str) -> Option<&str> {
        self.sources.get(qualified_name).map(String::as_str)
    }
}

impl SourceSink for MemorySourceSink {
    fn write_source(
        &mut self,
        qualified_name: &str,
        contents: &str,
    ) -> Result<(), GenerationError> {
        self.sources
            .insert(qualified_name.to_string(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_mapping() {
        let sink = FsSourceSink::new("/tmp/out");
        assert_eq!(
            sink.path_for("com.example.CalcCallables"),
            PathBuf::from("/tmp/out/com/example/CalcCallables.java")
        );
        assert_eq!(
            sink.path_for("CalcCallables"),
            PathBuf::from("/tmp/out/CalcCallables.java")
        );
    }

    #[test]
    fn test_fs_sink_writes_and_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FsSourceSink::new(dir.path());
        sink.write_source("com.example.CalcCallables", "class CalcCallables {}\n")
            .unwrap();

        let written = fs::read_to_string(dir.path().join("com/example/CalcCallables.java")).unwrap();
        assert_eq!(written, "class CalcCallables {}\n");
    }

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySourceSink::new();
        sink.write_source("A", "a").unwrap();
        sink.write_source("B", "b").unwrap();
        assert_eq!(sink.sources().len(), 2);
        assert_eq!(sink.get("A"), Some("a"));
        assert_eq!(sink.get("C"), None);
    }
}
