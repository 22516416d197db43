//! Checks a schema must pass before any registry file is touched.

use std::collections::HashSet;
use std::path::Path;

use crate::error::ValidationError;
use crate::profile::RegistryPaths;
use crate::registry::{RegistryFile, RegistryRole};
use crate::schema::{ComponentSchema, DISCRIMINANT_FIELD};

/// Validate slug, field names and field types; when the type registry is
/// available, also reject a slug it already lists.
pub fn validate_schema(
    schema: &ComponentSchema,
    type_registry: Option<&RegistryFile>,
) -> Result<(), ValidationError> {
    if !is_kebab_slug(&schema.component_name) {
        return Err(ValidationError::InvalidSlug(schema.component_name.clone()));
    }

    let mut seen = HashSet::new();
    for field in &schema.fields {
        if !is_identifier(&field.name) || field.name == DISCRIMINANT_FIELD {
            return Err(ValidationError::InvalidFieldName(field.name.clone()));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(ValidationError::DuplicateField(field.name.clone()));
        }
        if !is_type_name(&field.ty) {
            return Err(ValidationError::InvalidFieldType {
                field: field.name.clone(),
                ty: field.ty.clone(),
            });
        }
    }

    if let Some(registry) = type_registry {
        if registry.contains_literal(&schema.component_name) {
            return Err(ValidationError::DuplicateComponentName(
                schema.component_name.clone(),
            ));
        }
    }
    Ok(())
}

/// The component file must be new, and must not be one of the registries.
pub fn validate_component_path(
    component: &Path,
    paths: &RegistryPaths,
    exists: bool,
) -> Result<(), ValidationError> {
    if let Some(role) = RegistryRole::ALL
        .iter()
        .find(|role| role.path_in(paths).as_path() == component)
    {
        return Err(ValidationError::ComponentIsRegistry {
            role: *role,
            path: component.to_path_buf(),
        });
    }
    if exists {
        return Err(ValidationError::ComponentFileExists(component.to_path_buf()));
    }
    Ok(())
}

fn is_kebab_slug(s: &str) -> bool {
    !s.is_empty()
        && s.split('-').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// A named type optionally followed by `[]` suffixes (`string`, `TeamMember[]`).
fn is_type_name(s: &str) -> bool {
    let mut base = s.trim();
    while let Some(inner) = base.strip_suffix("[]") {
        base = inner;
    }
    is_identifier(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, LayoutType};

    fn schema(slug: &str, fields: Vec<FieldSpec>) -> ComponentSchema {
        ComponentSchema {
            component_name: slug.to_string(),
            display_name: "X".to_string(),
            description: String::new(),
            fields,
            layout_type: LayoutType::Minimal,
            has_image: false,
            has_stats: false,
            has_team_members: false,
            custom_features: vec![],
        }
    }

    #[test]
    fn accepts_well_formed_schema() {
        let s = schema(
            "about-modern-team-2",
            vec![
                FieldSpec::new("title", "string", true),
                FieldSpec::new("teamMembers", "TeamMember[]", false),
                FieldSpec::new("grid", "number[][]", false),
            ],
        );
        assert_eq!(validate_schema(&s, None), Ok(()));
    }

    #[test]
    fn rejects_bad_slugs() {
        for slug in ["", "About-Us", "about_us", "about--us", "-about", "about us"] {
            assert_eq!(
                validate_schema(&schema(slug, vec![]), None),
                Err(ValidationError::InvalidSlug(slug.to_string())),
                "slug {:?}",
                slug
            );
        }
    }

    #[test]
    fn rejects_unsafe_field_names() {
        for name in ["1title", "my-field", "title;", "template"] {
            let s = schema("about-x", vec![FieldSpec::new(name, "string", true)]);
            assert_eq!(
                validate_schema(&s, None),
                Err(ValidationError::InvalidFieldName(name.to_string()))
            );
        }
    }

    #[test]
    fn rejects_repeated_field() {
        let s = schema(
            "about-x",
            vec![
                FieldSpec::new("title", "string", true),
                FieldSpec::new("title", "string", false),
            ],
        );
        assert_eq!(
            validate_schema(&s, None),
            Err(ValidationError::DuplicateField("title".to_string()))
        );
    }

    #[test]
    fn rejects_unsupported_type() {
        let s = schema("about-x", vec![FieldSpec::new("title", "string | null", true)]);
        assert!(matches!(
            validate_schema(&s, None),
            Err(ValidationError::InvalidFieldType { .. })
        ));
    }

    #[test]
    fn rejects_registered_slug() {
        let registry = RegistryFile::new(
            RegistryRole::Types,
            "about.ts",
            "export interface AboutXData {\n  template: \"about-x\";\n}\n",
        );
        assert_eq!(
            validate_schema(&schema("about-x", vec![]), Some(&registry)),
            Err(ValidationError::DuplicateComponentName("about-x".to_string()))
        );
        assert_eq!(validate_schema(&schema("about-y", vec![]), Some(&registry)), Ok(()));
    }

    #[test]
    fn component_path_may_not_alias_a_registry() {
        let paths = RegistryPaths::default();
        assert_eq!(
            validate_component_path(&paths.component_file("about-component"), &paths, true),
            Err(ValidationError::ComponentIsRegistry {
                role: RegistryRole::Dispatcher,
                path: paths.dispatcher.clone(),
            })
        );
        assert!(matches!(
            validate_component_path(&paths.component_file("about-styles-dialog"), &paths, false),
            Err(ValidationError::ComponentIsRegistry {
                role: RegistryRole::Picker,
                ..
            })
        ));
    }

    #[test]
    fn component_path_must_be_new() {
        let paths = RegistryPaths::default();
        let file = paths.component_file("about-x");
        assert_eq!(
            validate_component_path(&file, &paths, true),
            Err(ValidationError::ComponentFileExists(file.clone()))
        );
        assert_eq!(validate_component_path(&file, &paths, false), Ok(()));
    }
}
