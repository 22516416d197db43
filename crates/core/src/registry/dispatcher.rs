//! Dispatcher: imports every template and switches on the variant slug.

use super::{
    apply_inserts, compile, indent_at, indent_block, matching_close, RegistryFile,
    RegistryRole,
};
use crate::error::PatchError;
use crate::ident::VariantNames;
use crate::profile::SectionProfile;
use crate::schema::DISCRIMINANT_FIELD;

/// One import statement. Only a `{ ... }` list may span lines, and the
/// closing semicolon is optional.
const IMPORT_STATEMENT: &str =
    r#"(?m)^import\b(?:[^;{}\n]|\{[^}]*\})*?["'][^"'\n]*["'][ \t]*;?[^\n]*\n?"#;

/// Import the template after the last import and add a case right before
/// the `default:` branch of the switch on the discriminant. The import is
/// skipped when it already exists, and follows the file's semicolon style.
pub(super) fn patch(
    mut file: RegistryFile,
    names: &VariantNames,
    profile: &SectionProfile,
) -> Result<RegistryFile, PatchError> {
    let mut inserts = Vec::new();

    let import_stem = format!(
        "import {{ {} }} from \"./{}\"",
        names.template_component, names.slug
    );
    if !file.content.contains(&import_stem) {
        let import_re = compile(IMPORT_STATEMENT)?;
        let last = import_re
            .find_iter(&file.content)
            .last()
            .ok_or(PatchError::AnchorNotFound {
                role: RegistryRole::Dispatcher,
                anchor: "import statement",
            })?;
        let statement = last.as_str();
        let tail = statement
            .rfind(['"', '\''])
            .map_or("", |i| &statement[i + 1..]);
        let terminator = if tail.trim_start().starts_with(';') {
            ";"
        } else {
            ""
        };
        let fragment = if last.as_str().ends_with('\n') {
            format!("{}{}\n", import_stem, terminator)
        } else {
            format!("\n{}{}", import_stem, terminator)
        };
        inserts.push((last.end(), fragment));
    }

    let switch_re = compile(&format!(
        r"switch\s*\(\s*[\w.]*\b{}\s*\)\s*\{{",
        DISCRIMINANT_FIELD
    ))?;
    let switch_anchor = PatchError::AnchorNotFound {
        role: RegistryRole::Dispatcher,
        anchor: "template switch",
    };
    let open = switch_re
        .find(&file.content)
        .map(|m| m.end() - 1)
        .ok_or_else(|| switch_anchor.clone())?;
    let close = matching_close(&file.content, open).ok_or(switch_anchor)?;

    let default_re = compile(r"(?m)^[ \t]*default\s*:")?;
    let branch = default_re
        .find(&file.content[open..close])
        .ok_or(PatchError::AnchorNotFound {
            role: RegistryRole::Dispatcher,
            anchor: "default branch",
        })?;
    let at = open + branch.start();
    let indent = indent_at(&file.content, at);
    let case = format!(
        r#"case "{slug}":
  return (
    <{template}
      {prop}={{component.data as {iface}}}
      isEditable={{isEditable}}
      onUpdate={{handleUpdate}}
    />
  );
"#,
        slug = names.slug,
        template = names.template_component,
        prop = profile.data_prop,
        iface = names.interface,
    );
    inserts.push((at, format!("{}\n", indent_block(&case, indent))));

    apply_inserts(&mut file.content, inserts);
    Ok(file)
}
