//! Style picker: the callback's accepted slugs and the list of choices.

use super::{
    apply_inserts, compile, indent_at, indent_block, line_start, matching_close, RegistryFile,
    RegistryRole,
};
use crate::error::PatchError;
use crate::ident::VariantNames;
use crate::profile::SectionProfile;
use crate::schema::ComponentSchema;
use crate::types_gen::quote;

/// Widen the callback's `template` parameter and append a descriptor to the
/// `templates` list. A file that already mentions the slug is left as is.
pub(super) fn patch(
    mut file: RegistryFile,
    schema: &ComponentSchema,
    names: &VariantNames,
    profile: &SectionProfile,
) -> Result<RegistryFile, PatchError> {
    if file.contains_literal(&names.slug) {
        log::info!("{} already lists '{}', leaving it unchanged", file.role, names.slug);
        return Ok(file);
    }

    let signature_re = compile(&format!(
        r"{}\s*:\s*\(\s*\w+\s*:\s*([^)]+?)\s*\)\s*=>\s*void",
        regex::escape(&profile.picker_callback)
    ))?;
    let widen_at = signature_re
        .captures(&file.content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.end())
        .ok_or(PatchError::AnchorNotFound {
            role: RegistryRole::Picker,
            anchor: "style-select callback signature",
        })?;

    let list_re = compile(r"\btemplates\b[^=;\n]*=\s*\[")?;
    let close = list_re
        .find(&file.content)
        .and_then(|m| matching_close(&file.content, m.end() - 1))
        .ok_or(PatchError::AnchorNotFound {
            role: RegistryRole::Picker,
            anchor: "templates list",
        })?;

    let content = &file.content;
    let close_line = line_start(content, close);
    let base_indent = indent_at(content, close_line);
    let entry_indent = format!("{}  ", base_indent);
    let last_item = content[..close].trim_end();
    let needs_comma = !last_item.ends_with(',') && !last_item.ends_with('[');
    let own_line = content[close_line..close].trim().is_empty();

    let mut fragment = String::new();
    if needs_comma {
        fragment.push(',');
    }
    fragment.push('\n');
    fragment.push_str(&indent_block(&descriptor(schema, names, profile), &entry_indent));
    if !own_line {
        fragment.push('\n');
        fragment.push_str(base_indent);
    }
    let list_at = last_item.len();

    apply_inserts(
        &mut file.content,
        vec![
            (widen_at, format!(" | {}", quote(&names.slug))),
            (list_at, fragment),
        ],
    );
    Ok(file)
}

fn descriptor(schema: &ComponentSchema, names: &VariantNames, profile: &SectionProfile) -> String {
    let display = quote(&schema.display_name);
    format!(
        r#"{{
  id: {slug} as const,
  name: {display},
  preview: (
    <Image
      src="{src}"
      alt={{{display}}}
      width={{800}}
      height={{400}}
      className="rounded-md"
    />
  ),
}},"#,
        slug = quote(&names.slug),
        display = display,
        src = profile.preview_url(&names.slug),
    )
}
