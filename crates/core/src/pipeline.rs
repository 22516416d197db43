//! The generation run: resolve, validate, synthesize, patch.
//!
//! This is the only module that reads or writes project files. Steps run
//! strictly in order and the run halts at the first failure. Files already
//! written by earlier steps are left in place.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;

use crate::balance::check_balance;
use crate::component::synthesize_component;
use crate::error::PipelineError;
use crate::profile::{RegistryPaths, SectionProfile};
use crate::registry::{RegistryFile, RegistryRole, VariantPatch};
use crate::resolver::{resolve, Resolution, SchemaOrigin, SchemaSource};
use crate::schema::ComponentSchema;
use crate::validate::{validate_component_path, validate_schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ResolveSchema,
    Validate,
    UpdateTypes,
    CreateComponent,
    UpdateDispatcher,
    UpdatePicker,
    UpdateFactory,
}

impl Step {
    fn for_role(role: RegistryRole) -> Self {
        match role {
            RegistryRole::Types => Step::UpdateTypes,
            RegistryRole::Dispatcher => Step::UpdateDispatcher,
            RegistryRole::Picker => Step::UpdatePicker,
            RegistryRole::Factory => Step::UpdateFactory,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::ResolveSchema => "resolve schema",
            Step::Validate => "validate schema",
            Step::UpdateTypes => "update type registry",
            Step::CreateComponent => "create component file",
            Step::UpdateDispatcher => "update dispatcher",
            Step::UpdatePicker => "update picker list",
            Step::UpdateFactory => "update factory",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepStatus {
    Done,
    /// The step ran but the file already held the change.
    Unchanged,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct StepReport {
    pub step: Step,
    pub status: StepStatus,
    pub detail: String,
}

/// Outcome of one run, in the order things happened.
#[derive(Debug)]
pub struct RunReport {
    pub schema: ComponentSchema,
    pub origin: SchemaOrigin,
    pub dry_run: bool,
    pub steps: Vec<StepReport>,
    /// Project files written (or, in a dry run, that would be written).
    pub files: Vec<PathBuf>,
    pub warnings: Vec<String>,
    pub next_steps: Vec<String>,
    pub error: Option<PipelineError>,
}

impl RunReport {
    pub fn success(&self) -> bool {
        self.error.is_none()
    }

    fn record(&mut self, step: Step, status: StepStatus, detail: impl Into<String>) {
        let detail = detail.into();
        match &status {
            StepStatus::Failed(reason) => log::error!("{} failed: {}", step, reason),
            _ => log::info!("{}: {}", step, detail),
        }
        self.steps.push(StepReport {
            step,
            status,
            detail,
        });
    }
}

/// A generator bound to one project tree.
pub struct Pipeline<'a> {
    root: &'a Path,
    profile: &'a SectionProfile,
    paths: &'a RegistryPaths,
    dry_run: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(root: &'a Path, profile: &'a SectionProfile, paths: &'a RegistryPaths) -> Self {
        Pipeline {
            root,
            profile,
            paths,
            dry_run: false,
        }
    }

    /// Compute every change but write nothing.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Resolve `request` through `source` and apply the resulting schema.
    pub fn run<S, R>(&self, source: &S, request: &str, rng: &mut R) -> RunReport
    where
        S: SchemaSource + ?Sized,
        R: Rng,
    {
        log::info!("resolving schema for request: {}", request);
        self.apply(resolve(source, request, self.profile, rng))
    }

    /// Apply an already resolved schema to the project.
    pub fn apply(&self, resolution: Resolution) -> RunReport {
        let Resolution { schema, origin } = resolution;
        let mut report = RunReport {
            schema,
            origin,
            dry_run: self.dry_run,
            steps: Vec::new(),
            files: Vec::new(),
            warnings: Vec::new(),
            next_steps: Vec::new(),
            error: None,
        };

        let detail = match &report.origin {
            SchemaOrigin::Service => format!("{} (from service)", report.schema.component_name),
            SchemaOrigin::Supplied => format!("{} (supplied)", report.schema.component_name),
            SchemaOrigin::Fallback { reason } => {
                report.warnings.push(format!("fallback schema used: {}", reason));
                format!("{} (fallback)", report.schema.component_name)
            }
        };
        report.record(Step::ResolveSchema, StepStatus::Done, detail);

        let schema = report.schema.clone();
        if let Err(e) = self.execute(&schema, &mut report) {
            report.error = Some(e);
            return report;
        }

        report.next_steps = vec![
            format!(
                "Add preview image: public{}",
                self.profile.preview_url(&schema.component_name)
            ),
            "Test the new component in your builder".to_string(),
            "Adjust styling as needed".to_string(),
        ];
        report
    }

    fn execute(
        &self,
        schema: &ComponentSchema,
        report: &mut RunReport,
    ) -> Result<(), PipelineError> {
        let validated = self.validate(schema);
        finish(report, Step::Validate, validated.map(|_| (StepStatus::Done, "ok".to_string())))?;

        let patch = VariantPatch::new(schema, self.profile);

        let types = self.patch_registry(RegistryRole::Types, &patch, report);
        finish(report, Step::UpdateTypes, types)?;

        let component = self.write_component(schema, report);
        finish(report, Step::CreateComponent, component)?;

        for role in [
            RegistryRole::Dispatcher,
            RegistryRole::Picker,
            RegistryRole::Factory,
        ] {
            let outcome = self.patch_registry(role, &patch, report);
            finish(report, Step::for_role(role), outcome)?;
        }
        Ok(())
    }

    fn validate(&self, schema: &ComponentSchema) -> Result<(), PipelineError> {
        let rel = &self.paths.types;
        let path = self.root.join(rel);
        let registry = if path.is_file() {
            let content = fs::read_to_string(&path).map_err(|source| PipelineError::Io {
                path: path.clone(),
                source,
            })?;
            Some(RegistryFile::new(RegistryRole::Types, rel.clone(), content))
        } else {
            None
        };
        validate_schema(schema, registry.as_ref())?;

        let component = self.paths.component_file(&schema.component_name);
        let exists = self.root.join(&component).exists();
        validate_component_path(&component, self.paths, exists)?;
        Ok(())
    }

    fn patch_registry(
        &self,
        role: RegistryRole,
        patch: &VariantPatch<'_>,
        report: &mut RunReport,
    ) -> Result<(StepStatus, String), PipelineError> {
        let rel = role.path_in(self.paths);
        let path = self.root.join(rel);
        if !path.is_file() {
            return Err(PipelineError::RegistryFileMissing { role, path });
        }
        let original = fs::read_to_string(&path).map_err(|source| PipelineError::Io {
            path: path.clone(),
            source,
        })?;

        let patched = patch.apply(RegistryFile::new(role, rel.clone(), original.clone()))?;
        if patched.content == original {
            return Ok((StepStatus::Unchanged, rel.display().to_string()));
        }
        self.write(&path, &patched.content)?;
        report.files.push(rel.clone());
        Ok((StepStatus::Done, rel.display().to_string()))
    }

    fn write_component(
        &self,
        schema: &ComponentSchema,
        report: &mut RunReport,
    ) -> Result<(StepStatus, String), PipelineError> {
        let rel = self.paths.component_file(&schema.component_name);
        let path = self.root.join(&rel);
        let module = synthesize_component(schema, self.profile);

        for warning in check_balance(&module).warnings() {
            log::warn!("{}: {}", rel.display(), warning);
            report.warnings.push(format!("{}: {}", rel.display(), warning));
        }

        if !self.dry_run {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| PipelineError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        self.write(&path, &module)?;
        report.files.push(rel.clone());
        Ok((StepStatus::Done, rel.display().to_string()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), PipelineError> {
        if self.dry_run {
            log::debug!("dry run: skipping write of {}", path.display());
            return Ok(());
        }
        fs::write(path, content).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Record a step's outcome and pass its error on.
fn finish(
    report: &mut RunReport,
    step: Step,
    outcome: Result<(StepStatus, String), PipelineError>,
) -> Result<(), PipelineError> {
    match outcome {
        Ok((status, detail)) => {
            report.record(step, status, detail);
            Ok(())
        }
        Err(e) => {
            report.record(step, StepStatus::Failed(e.to_string()), String::new());
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_names_read_as_log_lines() {
        assert_eq!(Step::UpdateTypes.to_string(), "update type registry");
        assert_eq!(Step::for_role(RegistryRole::Picker), Step::UpdatePicker);
    }

    #[test]
    fn missing_root_fails_at_first_registry_step() {
        let dir = tempfile::tempdir().unwrap();
        let profile = SectionProfile::default();
        let paths = RegistryPaths::default();
        let schema = crate::resolver::fallback_schema(&profile, &mut rand::thread_rng());
        let report = Pipeline::new(dir.path(), &profile, &paths).apply(Resolution {
            schema,
            origin: SchemaOrigin::Supplied,
        });
        assert!(!report.success());
        assert!(matches!(
            report.error,
            Some(PipelineError::RegistryFileMissing {
                role: RegistryRole::Types,
                ..
            })
        ));
        let last = report.steps.last().unwrap();
        assert_eq!(last.step, Step::UpdateTypes);
        assert!(matches!(last.status, StepStatus::Failed(_)));
        assert!(report.files.is_empty());
        assert!(report.next_steps.is_empty());
    }
}
