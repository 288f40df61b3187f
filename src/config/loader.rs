// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_HEIGHT, DEFAULT_MAX_BODY_BYTES, DEFAULT_SKIP_PATTERN, DEFAULT_TAB_SIZE,
};
use crate::errors::{ConsoleError, ConsoleResult, ValidationError};
use crate::log::compile_skip_pattern;
use crate::observability::messages::{config::ConfigLoaded, StructuredLog};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Console configuration.
///
/// Every field is optional in the file; anything left out falls back to the
/// built-in defaults from [`crate::config::consts`]. Loaded from YAML or TOML
/// depending on the file extension.
///
/// # Example
/// ```yaml
/// enabled: true
/// height: 300
/// tab_size: 8
/// document_root: /srv/www/app
/// skip_pattern: "my_app::debug::.*"
/// max_body_bytes: 2000000
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub height: u32,
    pub tab_size: usize,
    pub document_root: Option<String>,
    pub skip_pattern: Option<String>,
    pub script_path: Option<PathBuf>,
    pub max_body_bytes: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            height: DEFAULT_HEIGHT,
            tab_size: DEFAULT_TAB_SIZE,
            document_root: None,
            skip_pattern: Some(DEFAULT_SKIP_PATTERN.to_string()),
            script_path: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ConsoleConfig {
    /// Check every value and collect all problems instead of stopping at the first.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.tab_size == 0 {
            errors.push(ValidationError::ZeroTabSize);
        }
        if self.height == 0 {
            errors.push(ValidationError::ZeroHeight);
        }
        if self.max_body_bytes == 0 {
            errors.push(ValidationError::ZeroBodyLimit);
        }
        if let Some(pattern) = &self.skip_pattern {
            if let Err(e) = compile_skip_pattern(pattern) {
                errors.push(ValidationError::InvalidSkipPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// On-disk format of a configuration file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

/// Parse configuration text in the given format.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<ConsoleConfig, String> {
    match format {
        // An empty YAML document means "all defaults".
        ConfigFormat::Yaml if content.trim().is_empty() => Ok(ConsoleConfig::default()),
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    }
}

/// Load a config from a YAML or TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> ConsoleResult<ConsoleConfig> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| ConsoleError::UnsupportedConfigFormat(path.to_path_buf()))?;

    let content = fs::read_to_string(path).map_err(|source| ConsoleError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let cfg = parse_config(&content, format).map_err(|message| ConsoleError::ConfigParse {
        path: path.to_path_buf(),
        message,
    })?;

    ConfigLoaded {
        path,
        format,
        enabled: cfg.enabled,
    }
    .log();

    Ok(cfg)
}

/// Load and validate a config file
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> ConsoleResult<ConsoleConfig> {
    let cfg = load_config(path)?;
    cfg.validate().map_err(ConsoleError::InvalidConfig)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parse_yaml_config() {
        let yaml = r#"
height: 250
tab_size: 8
document_root: /srv/www
"#;

        let cfg = parse_config(yaml, ConfigFormat::Yaml).unwrap();
        assert_eq!(cfg.height, 250);
        assert_eq!(cfg.tab_size, 8);
        assert_eq!(cfg.document_root.as_deref(), Some("/srv/www"));
        // untouched fields keep their defaults
        assert!(cfg.enabled);
        assert_eq!(cfg.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(cfg.skip_pattern.as_deref(), Some(DEFAULT_SKIP_PATTERN));
    }

    #[test]
    fn parse_toml_config() {
        let toml = r#"
enabled = false
height = 120
skip_pattern = "my_app::debug::.*"
"#;

        let cfg = parse_config(toml, ConfigFormat::Toml).unwrap();
        assert!(!cfg.enabled);
        assert_eq!(cfg.height, 120);
        assert_eq!(cfg.tab_size, DEFAULT_TAB_SIZE);
        assert_eq!(cfg.skip_pattern.as_deref(), Some("my_app::debug::.*"));
    }

    #[test]
    fn empty_yaml_is_all_defaults() {
        let cfg = parse_config("", ConfigFormat::Yaml).unwrap();
        assert_eq!(cfg, ConsoleConfig::default());
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.yaml")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.YML")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), None);
    }

    #[test]
    fn test_load_and_validate_valid_config() {
        let file = write_temp(".yaml", "height: 320\n");
        let cfg = load_and_validate_config(file.path()).unwrap();
        assert_eq!(cfg.height, 320);
    }

    #[test]
    fn test_load_config_unsupported_extension() {
        let file = write_temp(".ini", "height=1");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConsoleError::UnsupportedConfigFormat(_)));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/definitely/not/here/console.yaml").unwrap_err();
        assert!(matches!(err, ConsoleError::ConfigRead { .. }));
    }

    #[test]
    fn test_load_config_parse_error() {
        let file = write_temp(".toml", "height = \"tall\"");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConsoleError::ConfigParse { .. }));
    }

    #[test]
    fn test_validation_collects_every_error() {
        let file = write_temp(
            ".yaml",
            "tab_size: 0\nheight: 0\nmax_body_bytes: 0\nskip_pattern: \"(unclosed\"\n",
        );
        let err = load_and_validate_config(file.path()).unwrap_err();

        match err {
            ConsoleError::InvalidConfig(errors) => {
                assert_eq!(errors.len(), 4);
                assert_eq!(errors[0], ValidationError::ZeroTabSize);
                assert_eq!(errors[1], ValidationError::ZeroHeight);
                assert_eq!(errors[2], ValidationError::ZeroBodyLimit);
                assert!(matches!(
                    errors[3],
                    ValidationError::InvalidSkipPattern { .. }
                ));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_skip_pattern_must_stay_inside_its_anchors() {
        let config = ConsoleConfig {
            skip_pattern: Some("a)|(?:b".into()),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ValidationError::InvalidSkipPattern { pattern, .. } if pattern == "a)|(?:b"
        ));
    }

    #[test]
    fn default_skip_pattern_compiles() {
        assert!(ConsoleConfig::default().validate().is_ok());
    }
}
