//! Type declaration and default-value synthesis.

use crate::ident::VariantNames;
use crate::schema::{ComponentSchema, FieldSpec, DISCRIMINANT_FIELD};

/// The interface declaration and its matching default constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeArtifacts {
    pub type_decl: String,
    pub default_literal: String,
}

impl TypeArtifacts {
    /// Both declarations as the block inserted into the type registry.
    pub fn block(&self) -> String {
        format!("{}\n\n{}", self.type_decl, self.default_literal)
    }
}

/// Produce the interface and default constant for a schema.
pub fn synthesize_type(schema: &ComponentSchema) -> TypeArtifacts {
    let names = VariantNames::derive(&schema.component_name);
    let discriminant = quote(&schema.component_name);

    let mut members = vec![format!("  {}: {};", DISCRIMINANT_FIELD, discriminant)];
    for field in &schema.fields {
        let optional = if field.required { "" } else { "?" };
        members.push(format!("  {}{}: {};", field.name, optional, field.ty));
    }

    let mut values = vec![format!("  {}: {},", DISCRIMINANT_FIELD, discriminant)];
    for field in &schema.fields {
        if let Some(value) = render_default(field) {
            values.push(format!("  {}: {},", field.name, value));
        }
    }

    TypeArtifacts {
        type_decl: format!(
            "export interface {} {{\n{}\n}}",
            names.interface,
            members.join("\n")
        ),
        default_literal: format!(
            "export const {}: {} = {{\n{}\n}};",
            names.default_const,
            names.interface,
            values.join("\n")
        ),
    }
}

/// Render a field's default in its declared type's literal syntax.
fn render_default(field: &FieldSpec) -> Option<String> {
    let value = field.effective_default()?;
    let rendered = if is_string_like(&field.ty) {
        match value {
            serde_json::Value::String(s) => quote(s),
            other => quote(&other.to_string()),
        }
    } else {
        match value {
            // Non-string types given a string default carry a source expression.
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    };
    Some(rendered)
}

fn is_string_like(ty: &str) -> bool {
    ty.trim() == "string"
}

/// Double-quoted literal with JSON escaping, which is also valid TypeScript.
pub(crate) fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
