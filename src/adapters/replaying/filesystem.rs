//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use crate::cassette::format::Interaction;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::{FileSystem, PortResult};

const PORT: &str = "fs";

/// Replays recorded filesystem operations from a cassette.
///
/// Writes are not applied anywhere; they only consume the matching
/// recorded interaction, so a missing `write` entry fails loudly. Written
/// contents must equal the recorded ones.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn next(&self, method: &str, path: &Path) -> Interaction {
        let path = path.display().to_string();
        let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
        replayer.next_interaction(PORT, method, Some(&path)).clone()
    }

    fn next_output(&self, method: &str, path: &Path) -> serde_json::Value {
        self.next(method, path).output
    }
}

/// Extracts a Result from a cassette output JSON value.
///
/// Expects `{"ok": <value>}` or `{"err": "message"}`.
fn extract_result<T: serde::de::DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> PortResult<T> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(&self, path: &Path) -> PortResult<String> {
        extract_result(&self.next_output("read_to_string", path), "fs::read_to_string")
    }

    fn write(&self, path: &Path, contents: &str) -> PortResult<()> {
        let interaction = self.next("write", path);
        if let Some(recorded) = interaction.input.get("contents").and_then(|c| c.as_str()) {
            assert_eq!(
                contents,
                recorded,
                "fs::write: contents for {} differ from the recording",
                path.display()
            );
        }
        if let Some(err) = interaction.output.get("err") {
            let msg = err.as_str().unwrap_or("unknown error").to_string();
            return Err(msg.into());
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.next_output("exists", path).as_bool().expect("fs::exists: expected boolean output")
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.next_output("is_dir", path).as_bool().expect("fs::is_dir: expected boolean output")
    }

    fn list_child_dirs(&self, path: &Path) -> PortResult<Vec<String>> {
        extract_result(&self.next_output("list_child_dirs", path), "fs::list_child_dirs")
    }

    fn list_files(&self, path: &Path, _extension: &str) -> PortResult<Vec<String>> {
        extract_result(&self.next_output("list_files", path), "fs::list_files")
    }
}
