//! Registry patch engine.
//!
//! Four pre-existing files enumerate every variant of a section: the type
//! union, the rendering dispatcher, the style picker and the default-data
//! factory. Each patch takes a [`RegistryFile`] by value, locates its anchors
//! with regular expressions plus a small bracket matcher, splices the new
//! fragments in, and hands the file back. Text outside the insertion points
//! is left byte-identical. Nothing here touches the filesystem.

mod dispatcher;
mod factory;
mod picker;
mod types_file;

use std::fmt;
use std::path::PathBuf;

use regex::Regex;

use crate::error::PatchError;
use crate::ident::VariantNames;
use crate::profile::{RegistryPaths, SectionProfile};
use crate::schema::ComponentSchema;
use crate::types_gen::{synthesize_type, TypeArtifacts};

/// Which registry a file plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryRole {
    Types,
    Dispatcher,
    Picker,
    Factory,
}

impl RegistryRole {
    /// Patch order used by the pipeline.
    pub const ALL: [RegistryRole; 4] = [
        RegistryRole::Types,
        RegistryRole::Dispatcher,
        RegistryRole::Picker,
        RegistryRole::Factory,
    ];

    pub fn path_in<'a>(&self, paths: &'a RegistryPaths) -> &'a PathBuf {
        match self {
            RegistryRole::Types => &paths.types,
            RegistryRole::Dispatcher => &paths.dispatcher,
            RegistryRole::Picker => &paths.picker,
            RegistryRole::Factory => &paths.factory,
        }
    }
}

impl fmt::Display for RegistryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RegistryRole::Types => "type registry",
            RegistryRole::Dispatcher => "dispatcher",
            RegistryRole::Picker => "picker list",
            RegistryRole::Factory => "factory",
        })
    }
}

/// A registry file's full text, carried through a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryFile {
    pub role: RegistryRole,
    pub path: PathBuf,
    pub content: String,
}

impl RegistryFile {
    pub fn new(role: RegistryRole, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        RegistryFile {
            role,
            path: path.into(),
            content: content.into(),
        }
    }

    /// Whether `value` appears anywhere as a double-quoted literal.
    pub fn contains_literal(&self, value: &str) -> bool {
        self.content.contains(&format!("\"{}\"", value))
    }
}

/// Everything derived from one schema that the four patches need.
pub struct VariantPatch<'a> {
    schema: &'a ComponentSchema,
    profile: &'a SectionProfile,
    names: VariantNames,
    types: TypeArtifacts,
}

impl<'a> VariantPatch<'a> {
    pub fn new(schema: &'a ComponentSchema, profile: &'a SectionProfile) -> Self {
        VariantPatch {
            schema,
            profile,
            names: VariantNames::derive(&schema.component_name),
            types: synthesize_type(schema),
        }
    }

    pub fn names(&self) -> &VariantNames {
        &self.names
    }

    pub fn types(&self) -> &TypeArtifacts {
        &self.types
    }

    /// Apply the patch matching `file.role`.
    pub fn apply(&self, file: RegistryFile) -> Result<RegistryFile, PatchError> {
        log::debug!("patching {} ({})", file.role, file.path.display());
        match file.role {
            RegistryRole::Types => types_file::patch(file, &self.names, &self.types, self.profile),
            RegistryRole::Dispatcher => dispatcher::patch(file, &self.names, self.profile),
            RegistryRole::Picker => picker::patch(file, self.schema, &self.names, self.profile),
            RegistryRole::Factory => factory::patch(file, &self.names, self.profile),
        }
    }
}

// ── Anchor helpers ───────────────────────────────────────────────────────────

fn compile(pattern: &str) -> Result<Regex, PatchError> {
    Regex::new(pattern).map_err(|e| PatchError::InvalidPattern(e.to_string()))
}

/// Byte offset of the start of the line containing `idx`.
fn line_start(text: &str, idx: usize) -> usize {
    text[..idx].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Leading whitespace of the line starting at `start`.
fn indent_at(text: &str, start: usize) -> &str {
    let line = &text[start..];
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}

/// Prefix every non-empty line of `block` with `indent`.
fn indent_block(block: &str, indent: &str) -> String {
    block
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splice fragments in, last offset first so earlier offsets stay valid.
fn apply_inserts(content: &mut String, mut inserts: Vec<(usize, String)>) {
    inserts.sort_by(|a, b| b.0.cmp(&a.0));
    for (at, fragment) in inserts {
        content.insert_str(at, &fragment);
    }
}

/// Find the bracket closing the one at `open`, skipping string literals and
/// comments. Only the bracket kind found at `open` is counted.
fn matching_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let (open_ch, close_ch) = match bytes.get(open)? {
        b'[' => (b'[', b']'),
        b'{' => (b'{', b'}'),
        b'(' => (b'(', b')'),
        _ => return None,
    };
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' | b'`' => {
                let quote = bytes[i];
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 1;
            }
            c if c == open_ch => depth += 1,
            c if c == close_ch => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}
