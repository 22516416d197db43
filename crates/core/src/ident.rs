//! Identifier derivation from a component slug.

/// The family of names derived from one `componentName`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantNames {
    /// The slug itself, used as the registry case value.
    pub slug: String,
    /// PascalCase form of the slug (`about-modern-team` -> `AboutModernTeam`).
    pub base: String,
    /// `<base>Data`
    pub interface: String,
    /// `default<base>Data`
    pub default_const: String,
    /// `<base>Template`
    pub template_component: String,
}

impl VariantNames {
    pub fn derive(slug: &str) -> Self {
        let base = slug_to_pascal(slug);
        VariantNames {
            slug: slug.to_string(),
            interface: format!("{}Data", base),
            default_const: format!("default{}Data", base),
            template_component: format!("{}Template", base),
            base,
        }
    }
}

/// Convert a kebab-case slug to PascalCase, dropping the hyphens.
pub fn slug_to_pascal(slug: &str) -> String {
    slug.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
            }
        })
        .collect()
}
