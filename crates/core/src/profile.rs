//! Per-project settings: which section family is generated and where its
//! registry files live.
//!
//! Defaults describe the "About Us" section of the site builder.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Names the generator weaves into synthesized and patched text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionProfile {
    /// Prefix for fallback slugs (`<prefix>-custom-<hex>`).
    pub slug_prefix: String,
    /// Human name of the section family, used in prompts and fallback text.
    pub section_label: String,
    /// Union type in the type registry that lists every variant's data type.
    pub union_type: String,
    /// Prop through which a template receives its data.
    pub data_prop: String,
    /// Module specifier of the type registry, as imported by components.
    pub types_import: String,
    /// Variable the factory assigns the chosen default to.
    pub factory_variable: String,
    /// Existing factory case after which new cases are inserted.
    pub factory_anchor_case: String,
    /// Factory function whose `template` parameter is widened.
    pub factory_function: String,
    /// Picker callback whose `template` parameter is widened.
    pub picker_callback: String,
    /// Public path of picker preview images.
    pub preview_dir: String,
    /// Upload folder used by the image editor.
    pub image_folder: String,
}

impl Default for SectionProfile {
    fn default() -> Self {
        SectionProfile {
            slug_prefix: "about".to_string(),
            section_label: "About Us".to_string(),
            union_type: "AboutUsData".to_string(),
            data_prop: "aboutUsData".to_string(),
            types_import: "@/types/owner-site/components/about".to_string(),
            factory_variable: "aboutUsData".to_string(),
            factory_anchor_case: "about-4".to_string(),
            factory_function: "handleAboutUsTemplateSelect".to_string(),
            picker_callback: "onStyleSelect".to_string(),
            preview_dir: "/images/site-owners/about".to_string(),
            image_folder: "about-us-images".to_string(),
        }
    }
}

impl SectionProfile {
    /// Public URL of the preview image the picker entry points to.
    pub fn preview_url(&self, slug: &str) -> String {
        format!("{}/{}.png", self.preview_dir.trim_end_matches('/'), slug)
    }
}

/// Project-relative locations of the registry files and new components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryPaths {
    pub types: PathBuf,
    pub dispatcher: PathBuf,
    pub picker: PathBuf,
    pub factory: PathBuf,
    pub components_dir: PathBuf,
}

impl Default for RegistryPaths {
    fn default() -> Self {
        RegistryPaths {
            types: PathBuf::from("src/types/owner-site/components/about.ts"),
            dispatcher: PathBuf::from("src/components/site-owners/about/about-component.tsx"),
            picker: PathBuf::from("src/components/site-owners/about/about-styles-dialog.tsx"),
            factory: PathBuf::from("src/components/site-owners/builder/builder-layout.tsx"),
            components_dir: PathBuf::from("src/components/site-owners/about"),
        }
    }
}

impl RegistryPaths {
    /// Where the component for `slug` is written, relative to the project root.
    pub fn component_file(&self, slug: &str) -> PathBuf {
        self.components_dir.join(format!("{}.tsx", slug))
    }
}
