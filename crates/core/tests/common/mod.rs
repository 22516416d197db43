#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use sectiongen_core::{RegistryFile, RegistryPaths, RegistryRole, SchemaSource, SourceError};

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

pub fn fixture_project() -> PathBuf {
    workspace_root().join("fixtures/about-project")
}

/// Copy the fixture project into a fresh temp dir.
pub fn project_copy() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().expect("temp dir");
    copy_dir(&fixture_project(), tmp.path());
    tmp
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).expect("create dir");
    for entry in fs::read_dir(from).expect("read fixture dir") {
        let entry = entry.expect("dir entry");
        let target = to.join(entry.file_name());
        if entry.file_type().expect("file type").is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).expect("copy fixture file");
        }
    }
}

pub fn read(root: &Path, rel: &Path) -> String {
    fs::read_to_string(root.join(rel))
        .unwrap_or_else(|e| panic!("failed to read '{}': {}", rel.display(), e))
}

/// The four fixture registry files, loaded in memory.
pub fn fixture_registry() -> Vec<RegistryFile> {
    let paths = RegistryPaths::default();
    RegistryRole::ALL
        .iter()
        .map(|role| {
            let rel = role.path_in(&paths).clone();
            let content = read(&fixture_project(), &rel);
            RegistryFile::new(*role, rel, content)
        })
        .collect()
}

/// A schema source that can never reach the service.
pub struct Unreachable;

impl SchemaSource for Unreachable {
    fn fetch(&self, _prompt: &str) -> Result<String, SourceError> {
        Err(SourceError::Transport("connection refused".to_string()))
    }
}

/// A schema source that always answers with the same text.
pub struct Answering(pub String);

impl SchemaSource for Answering {
    fn fetch(&self, _prompt: &str) -> Result<String, SourceError> {
        Ok(self.0.clone())
    }
}
