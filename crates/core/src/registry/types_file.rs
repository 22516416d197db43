//! Type registry: the variant union and the per-variant declarations.

use super::{apply_inserts, compile, line_start, RegistryFile, RegistryRole};
use crate::error::PatchError;
use crate::ident::VariantNames;
use crate::profile::SectionProfile;
use crate::types_gen::TypeArtifacts;

/// Add `| <Interface>` to the union and put the declarations right above it.
///
/// A file without the union gets the declarations appended followed by a
/// fresh single-arm union.
pub(super) fn patch(
    mut file: RegistryFile,
    names: &VariantNames,
    artifacts: &TypeArtifacts,
    profile: &SectionProfile,
) -> Result<RegistryFile, PatchError> {
    let union_re = compile(&format!(
        r"(?m)^export\s+type\s+{}\s*=",
        regex::escape(&profile.union_type)
    ))?;

    let Some(decl) = union_re.find(&file.content) else {
        let content = &mut file.content;
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(&format!(
            "\n{}\n\nexport type {} = {};\n",
            artifacts.block(),
            profile.union_type,
            names.interface
        ));
        return Ok(file);
    };

    // The union body runs to the first `;` and may only hold arm tokens.
    let body_start = decl.end();
    let terminator = file.content[body_start..]
        .find(';')
        .map(|i| body_start + i)
        .filter(|&end| {
            file.content[body_start..end]
                .chars()
                .all(|c| c.is_alphanumeric() || c.is_whitespace() || "|_$.<>[],".contains(c))
        })
        .ok_or(PatchError::AnchorNotFound {
            role: RegistryRole::Types,
            anchor: "union type terminator",
        })?;

    let arm_at = file.content[..terminator].trim_end().len();
    let union_line = line_start(&file.content, decl.start());
    apply_inserts(
        &mut file.content,
        vec![
            (arm_at, format!("\n  | {}", names.interface)),
            (union_line, format!("{}\n\n", artifacts.block())),
        ],
    );
    Ok(file)
}
