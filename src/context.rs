//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::LiveFileSystem;
use crate::adapters::recording::RecordingFileSystem;
use crate::adapters::replaying::ReplayingFileSystem;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;

/// Bundles the port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live,
/// replaying, recording). The filesystem is reference counted so worker
/// tasks can hold it past the borrow of the context.
pub struct ServiceContext {
    /// Filesystem for directory enumeration and file I/O.
    pub fs: Arc<dyn FileSystem>,
    /// Optional cassette recorder; written to disk on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context backed by the real disk.
    #[must_use]
    pub fn live() -> Self {
        Self { fs: Arc::new(LiveFileSystem), recorder: None }
    }

    /// Creates a recording context that writes a cassette file on drop.
    ///
    /// Uses the live filesystem for actual work. This is the developer-only
    /// mechanism for capturing cassettes via the `NAMESPACER_RECORD` env var.
    #[must_use]
    pub fn recording(path: &Path) -> Self {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, "namespacer-session")));
        Self {
            fs: Arc::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder))),
            recorder: Some(recorder),
        }
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(Self::replaying_cassette(&cassette))
    }

    /// Creates a replaying context from an in-memory cassette.
    #[must_use]
    pub fn replaying_cassette(cassette: &Cassette) -> Self {
        Self {
            fs: Arc::new(ReplayingFileSystem::new(CassetteReplayer::new(cassette))),
            recorder: None,
        }
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let Some(recorder) = self.recorder.take() else {
            return;
        };
        let saved = match recorder.lock() {
            Ok(guard) => guard.save(),
            Err(poisoned) => poisoned.into_inner().save(),
        };
        match saved {
            Ok(path) => eprintln!("Recording saved to: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to write cassette: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replaying_context_from_cassette_file() {
        let dir = std::env::temp_dir().join("namespacer_ctx_test_replay");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("full.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "ctx");
        recorder.record("fs", "is_dir", json!({"path": "/project"}), json!(true));
        recorder.record(
            "fs",
            "read_to_string",
            json!({"path": "/project/A.cs"}),
            json!({"ok": "namespace A;\n"}),
        );
        recorder.save().unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        assert!(ctx.fs.is_dir(Path::new("/project")));
        assert_eq!(ctx.fs.read_to_string(Path::new("/project/A.cs")).unwrap(), "namespace A;\n");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn recording_context_saves_cassette_on_drop() {
        let dir = std::env::temp_dir().join("namespacer_ctx_test_record");
        std::fs::create_dir_all(&dir).unwrap();
        let cassette_path = dir.join("session.cassette.yaml");

        {
            let ctx = ServiceContext::recording(&cassette_path);
            assert!(ctx.fs.is_dir(&dir));
        }

        let content = std::fs::read_to_string(&cassette_path).unwrap();
        let cassette: Cassette = serde_yaml::from_str(&content).unwrap();
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.interactions[0].method, "is_dir");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_cassette_is_an_error() {
        let result = ServiceContext::replaying(Path::new("/no/such/cassette.yaml"));
        assert!(result.is_err());
    }
}
