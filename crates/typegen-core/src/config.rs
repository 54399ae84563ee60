use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Per-run generation switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Global nullable mode: every generated type becomes nullable unless
    /// its schema explicitly says otherwise.
    pub nullable: bool,
}

/// Load options from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_options(path: &Path) -> Result<Option<GeneratorOptions>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read options {}: {}", path.display(), e))?;
    let options: GeneratorOptions = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse options {}: {}", path.display(), e))?;
    Ok(Some(options))
}
