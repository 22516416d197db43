use std::path::PathBuf;

use crate::registry::RegistryRole;

/// Failure of the generative service call. Never fatal: the resolver
/// logs it and falls back to the canned schema.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("no API key: environment variable {0} is not set")]
    MissingCredentials(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service returned HTTP {0}")]
    Status(u16),
    #[error("unexpected response envelope: {0}")]
    Envelope(String),
    #[error("generative service disabled")]
    Disabled,
}

/// A schema rejected before any file is touched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("component name '{0}' is not a lowercase kebab-case slug")]
    InvalidSlug(String),
    #[error("field name '{0}' is not a safe identifier")]
    InvalidFieldName(String),
    #[error("field '{field}' has unsupported type '{ty}'")]
    InvalidFieldType { field: String, ty: String },
    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),
    #[error("component name '{0}' is already registered")]
    DuplicateComponentName(String),
    #[error("component file '{}' already exists", .0.display())]
    ComponentFileExists(PathBuf),
    #[error("component file '{}' is the {role} file", .path.display())]
    ComponentIsRegistry { role: RegistryRole, path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatchError {
    #[error("{role}: anchor not found: {anchor}")]
    AnchorNotFound {
        role: RegistryRole,
        anchor: &'static str,
    },
    #[error("invalid anchor pattern: {0}")]
    InvalidPattern(String),
}

/// Failure that halts a generation run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{role} not found: {}", .path.display())]
    RegistryFileMissing { role: RegistryRole, path: PathBuf },
    #[error(transparent)]
    Patch(#[from] PatchError),
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
