//! Factory: picks the default data for a chosen variant.

use super::{apply_inserts, compile, indent_at, RegistryFile, RegistryRole};
use crate::error::PatchError;
use crate::ident::VariantNames;
use crate::profile::SectionProfile;
use crate::types_gen::quote;

/// Import the default constant, add a case after the anchor case and widen
/// the factory's `template` parameter. Applied unconditionally.
pub(super) fn patch(
    mut file: RegistryFile,
    names: &VariantNames,
    profile: &SectionProfile,
) -> Result<RegistryFile, PatchError> {
    let content = &file.content;
    let mut inserts = Vec::new();

    let import_re = compile(&format!(
        r#"import\s*\{{([^}}]*)\}}\s*from\s*["']{}["']"#,
        regex::escape(&profile.types_import)
    ))?;
    let list = import_re
        .captures(content)
        .and_then(|caps| caps.get(1))
        .ok_or(PatchError::AnchorNotFound {
            role: RegistryRole::Factory,
            anchor: "default-data import",
        })?;
    inserts.push(extend_import_list(content, list.start(), list.as_str(), &names.default_const));

    let case_re = compile(&format!(
        r#"(?m)^[ \t]*case\s+"{}"\s*:\s*{}\s*=\s*[\w.]+\s*;\s*break\s*;"#,
        regex::escape(&profile.factory_anchor_case),
        regex::escape(&profile.factory_variable)
    ))?;
    let anchor = case_re.find(content).ok_or(PatchError::AnchorNotFound {
        role: RegistryRole::Factory,
        anchor: "anchor case",
    })?;
    let indent = indent_at(content, anchor.start());
    inserts.push((
        anchor.end(),
        format!(
            "\n{indent}case {slug}:\n{indent}  {var} = {default};\n{indent}  break;",
            indent = indent,
            slug = quote(&names.slug),
            var = profile.factory_variable,
            default = names.default_const,
        ),
    ));

    let signature_re = compile(&format!(
        r"{}\s*=\s*\(\s*template\s*:\s*([^)]+?)\s*\)\s*=>\s*\{{",
        regex::escape(&profile.factory_function)
    ))?;
    let widen_at = signature_re
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.end())
        .ok_or(PatchError::AnchorNotFound {
            role: RegistryRole::Factory,
            anchor: "template selector signature",
        })?;
    inserts.push((widen_at, format!(" | {}", quote(&names.slug))));

    apply_inserts(&mut file.content, inserts);
    Ok(file)
}

/// Insertion that appends `name` to an import list, keeping its layout.
fn extend_import_list(content: &str, start: usize, list: &str, name: &str) -> (usize, String) {
    let trimmed = list.trim_end();
    if trimmed.trim().is_empty() {
        return (start, format!(" {} ", name));
    }
    let at = start + trimmed.len();
    let trailing_comma = trimmed.ends_with(',');
    if list.contains('\n') {
        let last_line_start = trimmed.rfind('\n').map(|i| start + i + 1).unwrap_or(start);
        let indent = indent_at(content, last_line_start);
        if trailing_comma {
            (at, format!("\n{}{},", indent, name))
        } else {
            (at, format!(",\n{}{}", indent, name))
        }
    } else if trailing_comma {
        (at, format!(" {},", name))
    } else {
        (at, format!(", {}", name))
    }
}
