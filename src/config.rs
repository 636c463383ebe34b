//! Configuration for shred.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (SHRED_IMAGE_TO_ALT, SHRED_WRAP_WIDTH,
//!    SHRED_DECORATE, SHRED_KEY_MAX_LEN, SHRED_MISSING_ELEMENTS,
//!    SHRED_ELEMENTS_ENCODING)
//! 2. Config file (.shred/config.yaml, then <config dir>/shred/config.yaml)
//! 3. Defaults
//!
//! Config file discovery:
//! - Searches current directory and parents for .shred/config.yaml
//! - Falls back to the per-user config directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::{
    encoding_for_label, ConcatOptions, MissingElementPolicy, RenderOptions, ResolveOptions,
    DEFAULT_ELEMENTS_ENCODING, DEFAULT_MAX_LEN, DEFAULT_WIDTH,
};

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub render: Option<RenderConfig>,
    #[serde(default)]
    pub keys: Option<KeysConfig>,
    #[serde(default)]
    pub elements: Option<ElementsConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    /// Render images as alt text during `concat`
    pub image_to_alt: Option<bool>,
    pub width: Option<usize>,
    pub decorate: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeysConfig {
    pub max_len: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElementsConfig {
    /// Encoding label of elements.json
    pub encoding: Option<String>,
    pub missing: Option<MissingElementPolicy>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Images as alt text during `concat` (`process` always keeps references)
    pub image_to_alt: bool,
    pub width: usize,
    pub decorate: bool,
    /// Cap for each sanitized key part
    pub key_max_len: usize,
    pub elements_encoding: String,
    pub missing_elements: MissingElementPolicy,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            image_to_alt: true,
            width: DEFAULT_WIDTH,
            decorate: true,
            key_max_len: DEFAULT_MAX_LEN,
            elements_encoding: DEFAULT_ELEMENTS_ENCODING.to_string(),
            missing_elements: MissingElementPolicy::Fail,
        }
    }
}

impl ResolvedConfig {
    /// Render settings for `process`
    pub fn process_render_options(&self) -> RenderOptions {
        RenderOptions {
            image_to_alt: false,
            width: self.width,
            decorate: self.decorate,
        }
    }

    /// Settings for `concat`
    pub fn concat_options(&self) -> Result<ConcatOptions> {
        Ok(ConcatOptions {
            resolve: ResolveOptions {
                render: RenderOptions {
                    image_to_alt: self.image_to_alt,
                    width: self.width,
                    decorate: self.decorate,
                },
                missing_elements: self.missing_elements,
                key_max_len: self.key_max_len,
            },
            elements_encoding: encoding_for_label(&self.elements_encoding)?,
        })
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".shred").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join("shred").join("config.yaml"))
        .filter(|path| path.exists())
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse an environment override, naming the variable on failure
fn env_override<T>(env: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {} ({})", name, raw, e)),
        None => Ok(None),
    }
}

fn env_flag(env: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<bool>> {
    match env(name).as_deref().map(str::trim) {
        Some("1") | Some("true") | Some("yes") | Some("on") => Ok(Some(true)),
        Some("0") | Some("false") | Some("no") | Some("off") => Ok(Some(false)),
        Some(other) => anyhow::bail!("Invalid value for {}: {}", name, other),
        None => Ok(None),
    }
}

/// Merge file settings and environment overrides over the defaults
fn resolve_config(
    file: Option<ConfigFile>,
    config_file: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let file = file.unwrap_or_default();
    let render = file.render.unwrap_or_default();
    let keys = file.keys.unwrap_or_default();
    let elements = file.elements.unwrap_or_default();
    let defaults = ResolvedConfig::default();

    let config = ResolvedConfig {
        config_file,
        image_to_alt: env_flag(&env, "SHRED_IMAGE_TO_ALT")?
            .or(render.image_to_alt)
            .unwrap_or(defaults.image_to_alt),
        width: env_override(&env, "SHRED_WRAP_WIDTH")?
            .or(render.width)
            .unwrap_or(defaults.width),
        decorate: env_flag(&env, "SHRED_DECORATE")?
            .or(render.decorate)
            .unwrap_or(defaults.decorate),
        key_max_len: env_override(&env, "SHRED_KEY_MAX_LEN")?
            .or(keys.max_len)
            .unwrap_or(defaults.key_max_len),
        elements_encoding: env("SHRED_ELEMENTS_ENCODING")
            .or(elements.encoding)
            .unwrap_or(defaults.elements_encoding),
        missing_elements: env_override(&env, "SHRED_MISSING_ELEMENTS")?
            .or(elements.missing)
            .unwrap_or(defaults.missing_elements),
    };

    if config.width == 0 {
        anyhow::bail!("Wrap width must be at least 1");
    }
    encoding_for_label(&config.elements_encoding)?;

    Ok(config)
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = find_config_file();
    let file = match config_file {
        Some(ref path) => Some(load_config_file(path)?),
        None => None,
    };

    resolve_config(file, config_file, |name| std::env::var(name).ok())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_file() {
        let config = resolve_config(None, None, no_env).unwrap();

        assert!(config.image_to_alt);
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.key_max_len, DEFAULT_MAX_LEN);
        assert_eq!(config.elements_encoding, DEFAULT_ELEMENTS_ENCODING);
        assert_eq!(config.missing_elements, MissingElementPolicy::Fail);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let shred_dir = temp.path().join(".shred");
        std::fs::create_dir_all(&shred_dir).unwrap();

        let config_path = shred_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
render:
  image_to_alt: false
  width: 120
keys:
  max_len: 40
elements:
  encoding: utf-8
  missing: skip
"#
        )
        .unwrap();

        let parsed = load_config_file(&config_path).unwrap();

        let config = resolve_config(Some(parsed), Some(config_path.clone()), no_env).unwrap();
        assert!(!config.image_to_alt);
        assert_eq!(config.width, 120);
        assert!(config.decorate);
        assert_eq!(config.key_max_len, 40);
        assert_eq!(config.elements_encoding, "utf-8");
        assert_eq!(config.missing_elements, MissingElementPolicy::Skip);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = ConfigFile {
            render: Some(RenderConfig {
                width: Some(100),
                ..Default::default()
            }),
            ..Default::default()
        };
        let env: HashMap<&str, &str> = [
            ("SHRED_WRAP_WIDTH", "60"),
            ("SHRED_IMAGE_TO_ALT", "no"),
            ("SHRED_MISSING_ELEMENTS", "skip"),
        ]
        .into_iter()
        .collect();

        let config =
            resolve_config(Some(file), None, |name| env.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(config.width, 60);
        assert!(!config.image_to_alt);
        assert_eq!(config.missing_elements, MissingElementPolicy::Skip);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_width = |name: &str| (name == "SHRED_WRAP_WIDTH").then(|| "wide".to_string());
        assert!(resolve_config(None, None, bad_width).is_err());

        let zero_width = |name: &str| (name == "SHRED_WRAP_WIDTH").then(|| "0".to_string());
        assert!(resolve_config(None, None, zero_width).is_err());

        let bad_encoding =
            |name: &str| (name == "SHRED_ELEMENTS_ENCODING").then(|| "klingon".to_string());
        assert!(resolve_config(None, None, bad_encoding).is_err());
    }

    #[test]
    fn test_option_builders() {
        let config = ResolvedConfig::default();

        assert!(!config.process_render_options().image_to_alt);

        let concat = config.concat_options().unwrap();
        assert!(concat.resolve.render.image_to_alt);
        assert_eq!(concat.resolve.key_max_len, DEFAULT_MAX_LEN);
    }
}
