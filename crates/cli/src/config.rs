//! Generator configuration, read from `sectiongen.toml`.
//!
//! # Example
//!
//! ```toml
//! [service]
//! model = "gemini-2.0-flash"
//! api_key_env = "GEMINI_API_KEY"
//! timeout_secs = 30
//!
//! [section]
//! slug_prefix = "about"
//! section_label = "About Us"
//! factory_anchor_case = "about-4"
//!
//! [paths]
//! components_dir = "src/components/site-owners/about"
//! ```
//!
//! Every key is optional. The API key itself never lives in the file, only
//! the name of the environment variable holding it.

use std::path::{Path, PathBuf};

use sectiongen_core::{RegistryPaths, SectionProfile};
use serde::{Deserialize, Serialize};

/// File looked up in the project root when `--config` is not given.
pub const CONFIG_FILE: &str = "sectiongen.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub service: ServiceConfig,
    pub section: SectionProfile,
    pub paths: RegistryPaths,
}

/// `[service]` section: where schemas come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// API base, without the `/models/...` suffix.
    pub endpoint: String,
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Load configuration for a project.
///
/// An explicit path must exist. Without one, `<root>/sectiongen.toml` is used
/// when present and built-in defaults otherwise.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<GeneratorConfig, String> {
    let path: PathBuf = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let candidate = root.join(CONFIG_FILE);
            if !candidate.is_file() {
                log::debug!("no {} in {}, using defaults", CONFIG_FILE, root.display());
                return Ok(GeneratorConfig::default());
            }
            candidate
        }
    };
    let content = std::fs::read_to_string(&path)
        .map_err(|e| format!("could not read config '{}': {}", path.display(), e))?;
    log::info!("loaded config from {}", path.display());
    parse_config(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

pub fn parse_config(content: &str) -> Result<GeneratorConfig, toml::de::Error> {
    toml::from_str(content)
}
