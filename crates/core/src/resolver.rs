//! Schema resolution: prompt in, [`ComponentSchema`] out, always.
//!
//! The generative service is reached through the [`SchemaSource`] trait.
//! Any failure on that path (no credentials, transport, status, malformed
//! or incomplete JSON) is logged and replaced by a deterministic fallback
//! schema, so resolution never fails.

use rand::Rng;

use crate::error::SourceError;
use crate::profile::SectionProfile;
use crate::schema::{ComponentSchema, FieldSpec, LayoutType};

/// A backend that turns a full instruction prompt into raw response text.
pub trait SchemaSource {
    fn fetch(&self, prompt: &str) -> Result<String, SourceError>;
}

/// Where a resolved schema came from.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaOrigin {
    Service,
    /// Provided directly by the caller, bypassing the service.
    Supplied,
    Fallback { reason: String },
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub schema: ComponentSchema,
    pub origin: SchemaOrigin,
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, SchemaOrigin::Fallback { .. })
    }
}

const INSTRUCTION: &str = r#"You are a TypeScript component generator for a Next.js website builder.
Analyze the user's prompt and generate a structured response for a page section.

Based on the prompt, determine:
1. Component name (unique kebab-case identifier like 'about-modern-team', 'about-stats-focus')
2. Required fields and their types
3. Default data structure
4. Component layout

Respond with a JSON object shaped like:
{
  "componentName": "about-modern-team",
  "displayName": "Modern Team Layout",
  "description": "A modern about us section with team focus",
  "fields": [
    {"name": "title", "type": "string", "required": true, "default": "About Us"},
    {"name": "subtitle", "type": "string", "required": false},
    {"name": "description", "type": "string", "required": true},
    {"name": "imageUrl", "type": "string", "required": false},
    {"name": "teamMembers", "type": "TeamMember[]", "required": false},
    {"name": "stats", "type": "AboutUsStat[]", "required": false}
  ],
  "layoutType": "split-layout" | "full-width" | "card-grid" | "minimal",
  "hasImage": true/false,
  "hasStats": true/false,
  "hasTeamMembers": true/false,
  "customFeatures": ["feature1", "feature2"]
}

Only return valid JSON, no markdown or explanations."#;

/// Wrap a raw client request into a structured design brief for a
/// section called `label`.
pub fn enhance_prompt(request: &str, label: &str) -> String {
    format!(
        r#"Create a visually stunning '{}' section based on the client request:
"{}"

The design should include:
- A clean, professional layout
- Modern typography with proper spacing
- Sections for company story, mission/vision, and values
- Optionally include stats, milestones, and team members
- Use engaging visuals like background images or illustrations
- Ensure responsiveness for desktop and mobile
- Output in a well-structured React + Tailwind component"#,
        label,
        request.trim()
    )
}

/// The exact text sent to the service for a user request.
pub fn build_prompt(request: &str, label: &str) -> String {
    format!(
        "{}\n\nUser prompt: {}",
        INSTRUCTION,
        enhance_prompt(request, label)
    )
}

/// Resolve a user request to a schema, falling back on any failure.
pub fn resolve<S, R>(
    source: &S,
    request: &str,
    profile: &SectionProfile,
    rng: &mut R,
) -> Resolution
where
    S: SchemaSource + ?Sized,
    R: Rng,
{
    match source
        .fetch(&build_prompt(request, &profile.section_label))
        .map_err(|e| e.to_string())
        .and_then(|text| parse_schema(&text))
    {
        Ok(schema) => Resolution {
            schema,
            origin: SchemaOrigin::Service,
        },
        Err(reason) => {
            log::warn!("schema service unavailable, using fallback: {}", reason);
            Resolution {
                schema: fallback_schema(profile, rng),
                origin: SchemaOrigin::Fallback { reason },
            }
        }
    }
}

/// Parse service text into a schema, stripping a surrounding code fence.
pub fn parse_schema(text: &str) -> Result<ComponentSchema, String> {
    serde_json::from_str(strip_code_fences(text))
        .map_err(|e| format!("malformed schema JSON: {}", e))
}

/// Drop a markdown fence around a payload. Each side is handled on its own,
/// so a reply cut off before its closing fence still parses. The opening
/// fence may carry a language tag.
pub fn strip_code_fences(s: &str) -> &str {
    let mut body = s.trim();
    if let Some(rest) = body.strip_prefix("```") {
        body = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    }
    if let Some(rest) = body.trim_end().strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

/// The canned split-layout schema used whenever the service cannot help.
pub fn fallback_schema<R: Rng>(profile: &SectionProfile, rng: &mut R) -> ComponentSchema {
    let suffix: u32 = rng.gen_range(0..=0xFF_FFFF);
    ComponentSchema {
        component_name: format!("{}-custom-{:06x}", profile.slug_prefix, suffix),
        display_name: format!("Custom {}", profile.section_label),
        description: format!(
            "Custom {} section based on user prompt",
            profile.section_label.to_lowercase()
        ),
        fields: vec![
            FieldSpec::new("title", "string", true).with_default(profile.section_label.as_str()),
            FieldSpec::new("subtitle", "string", false).with_default(""),
            FieldSpec::new("description", "string", true).with_default(""),
            FieldSpec::new("imageUrl", "string", false).with_default(""),
        ],
        layout_type: LayoutType::SplitLayout,
        has_image: true,
        has_stats: false,
        has_team_members: false,
        custom_features: vec![],
    }
}
