use pay_roi_core::EngineConfig;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON file as a generic serde_json::Value.
pub fn read_json_value(path: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let value: Value = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    Ok(value)
}

/// Load engine configuration. YAML is chosen by the `.yaml`/`.yml`
/// extension, anything else is parsed as JSON. No path means built-in
/// defaults.
pub fn read_config(path: Option<&str>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let is_yaml = matches!(
        canonical.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let config: EngineConfig = if is_yaml {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    config.check()?;
    tracing::debug!(path = %canonical.display(), "engine config loaded");
    Ok(config)
}

/// Contents of `path`, or None when it does not exist yet.
pub fn read_text_if_exists(path: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let p = absolute(path)?;
    if !p.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(&p)
        .map_err(|e| format!("Failed to read '{}': {}", p.display(), e))?;
    Ok(Some(contents))
}

pub fn write_text(path: &str, contents: &str) -> Result<(), Box<dyn std::error::Error>> {
    let p = absolute(path)?;
    fs::write(&p, contents).map_err(|e| format!("Failed to write '{}': {}", p.display(), e))?;
    Ok(())
}

fn absolute(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    Ok(if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    })
}

/// Resolve the path and check it names an existing file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let canonical = absolute(path)?;

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}
