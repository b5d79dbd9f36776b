//! Test helpers for staging request files in temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use roam_core::RouteRequest;
use roam_core::test_support::locations;
use tempfile::TempDir;

/// A temporary directory addressed through UTF-8 paths.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

/// Four locations, start 0, target 3, 50 minutes.
pub(super) fn square_request() -> RouteRequest {
    RouteRequest::new(locations(4), 0, 3, 50.0)
}

pub(super) fn write_request(path: &Utf8Path, request: &RouteRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}
