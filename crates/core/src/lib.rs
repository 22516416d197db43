//! sectiongen-core: turns a section schema into a new component and wires
//! it into the project's variant registries.
//!
//! # Public API
//!
//! - [`resolve()`] -- prompt to [`ComponentSchema`], with a canned fallback
//! - [`VariantNames`] -- identifiers derived from a slug
//! - [`synthesize_type()`] / [`synthesize_component()`] -- generated source
//! - [`VariantPatch`] -- anchored edits to the four registry files
//! - [`Pipeline`] -- the ordered, file-writing generation run

pub mod balance;
pub mod component;
pub mod error;
pub mod ident;
pub mod layout;
pub mod pipeline;
pub mod profile;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod types_gen;
pub mod validate;

// ── Convenience re-exports ───────────────────────────────────────────

pub use balance::{check_balance, BalanceReport};
pub use component::synthesize_component;
pub use error::{PatchError, PipelineError, SourceError, ValidationError};
pub use ident::VariantNames;
pub use layout::{render_skeleton, Capabilities};
pub use pipeline::{Pipeline, RunReport, Step, StepStatus};
pub use profile::{RegistryPaths, SectionProfile};
pub use registry::{RegistryFile, RegistryRole, VariantPatch};
pub use resolver::{resolve, Resolution, SchemaOrigin, SchemaSource};
pub use schema::{ComponentSchema, FieldSpec, LayoutType};
pub use types_gen::{synthesize_type, TypeArtifacts};
pub use validate::{validate_component_path, validate_schema};
