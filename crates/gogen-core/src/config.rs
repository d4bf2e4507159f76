use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

/// Top-level project configuration loaded from `.gogen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GogenConfig {
    pub input: String,
    /// File names skipped when `input` is a directory (shared includes).
    pub exclude: Vec<String>,
    pub output: String,
    pub packages: PackagesConfig,
    /// Template for set-typed fields, with a single `{type}` placeholder.
    pub set_type_format: String,
    /// Synthesize named enum types for inline string enums.
    pub convert_enums: bool,
    /// Suffix appended to synthesized enum type names.
    pub enum_suffix: String,
    /// Maps type-name package prefixes to import paths.
    #[serde(default)]
    pub type_prefix_packages: IndexMap<String, String>,
    /// Owning import paths for models maintained outside the generated
    /// model package (shared includes). Keyed by model name.
    #[serde(default)]
    pub reference_packages: IndexMap<String, String>,
    /// Extra hand-written struct members appended to named models, one
    /// Go source line per entry.
    #[serde(default)]
    pub additional_fields: IndexMap<String, Vec<String>>,
}

impl Default for GogenConfig {
    fn default() -> Self {
        Self {
            input: "specs".to_string(),
            exclude: vec!["common.yaml".to_string()],
            output: "generated.go".to_string(),
            packages: PackagesConfig::default(),
            set_type_format: "map[{type}]struct{}".to_string(),
            convert_enums: true,
            enum_suffix: String::new(),
            type_prefix_packages: IndexMap::new(),
            reference_packages: IndexMap::new(),
            additional_fields: IndexMap::new(),
        }
    }
}

/// Owning import paths for generated types.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PackagesConfig {
    pub model: String,
    pub resource: String,
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            model: "model".to_string(),
            resource: "resource".to_string(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".gogen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<GogenConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: GogenConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# gogen configuration
input: specs            # spec file or directory of spec files
exclude:
  - common.yaml         # shared include files to skip in directory mode
output: generated.go

packages:
  model: github.com/prizem-io/gateway/models
  resource: github.com/prizem-io/gateway/apis

set_type_format: "map[{type}]struct{}"   # how `uniqueItems` arrays render
convert_enums: true     # synthesize named enum types for inline string enums
enum_suffix: ""
type_prefix_packages: {}
  # time: time          # map a type-name prefix to an import path
reference_packages: {}
  # Entity: github.com/prizem-io/common/models
additional_fields: {}
  # PluginConfig:
  #   - "Raw []byte `json:\"-\" yaml:\"-\" msgpack:\"-\"`"
"#
}
