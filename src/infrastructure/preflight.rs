//! Local prerequisite checks

use std::fs::File;
use std::path::Path;

use crate::domain::ports::Preflight;

use super::process::tool_responds;

/// Checks against the real system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPreflight;

impl Preflight for SystemPreflight {
    fn tool_available(&self, tool: &str) -> bool {
        tool_responds(tool)
    }

    fn file_readable(&self, path: &Path) -> bool {
        path.is_file() && File::open(path).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_file_is_detected() {
        let dir = tempfile::tempdir().unwrap();
        let key = dir.path().join("id_ed25519");
        std::fs::write(&key, "key").unwrap();

        assert!(SystemPreflight.file_readable(&key));
        assert!(!SystemPreflight.file_readable(&dir.path().join("missing")));
        assert!(!SystemPreflight.file_readable(dir.path()));
    }

    #[test]
    fn missing_tool_is_unavailable() {
        assert!(!SystemPreflight.tool_available("shipyard-no-such-tool"));
    }
}
