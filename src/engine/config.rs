//! Rule options loaded from TOML at runtime for the CLI binaries.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Optional rules and engine knobs. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Third six in a row within one turn voids the roll and passes the turn.
    pub three_sixes_skip_turn: bool,
    /// Seed for the random dice; entropy when absent.
    pub random_seed: Option<u64>,
}

/// Top-level TOML file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesFile {
    #[serde(default)]
    pub rules: RulesConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load rules from a TOML file at the given path.
pub fn load_rules(path: &Path) -> Result<RulesConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: RulesFile = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file.rules)
}

/// Try well-known paths, returning the defaults if none loads.
pub fn load_default_rules() -> RulesConfig {
    let candidates = [
        "ludo_rules.toml",
        "../ludo_rules.toml",
        "/etc/ludo/ludo_rules.toml",
    ];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_rules(p) {
                Ok(rules) => {
                    tracing::info!(
                        path = %p.display(),
                        three_sixes = rules.three_sixes_skip_turn,
                        "loaded rules"
                    );
                    return rules;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load rules");
                }
            }
        }
    }
    tracing::info!("no ludo_rules.toml found, using built-in defaults");
    RulesConfig::default()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_toml(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_rules_table() {
        let file = write_toml("[rules]\nthree_sixes_skip_turn = true\nrandom_seed = 99\n");
        let rules = load_rules(file.path()).unwrap();
        assert!(rules.three_sixes_skip_turn);
        assert_eq!(rules.random_seed, Some(99));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let file = write_toml("[rules]\n");
        assert_eq!(load_rules(file.path()).unwrap(), RulesConfig::default());

        let file = write_toml("");
        assert_eq!(load_rules(file.path()).unwrap(), RulesConfig::default());
    }

    #[test]
    fn test_parse_error() {
        let file = write_toml("[rules]\nthree_sixes_skip_turn = \"sometimes\"\n");
        let err = load_rules(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse"));
    }

    #[test]
    fn test_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_rules(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_defaults() {
        let rules = RulesConfig::default();
        assert!(!rules.three_sixes_skip_turn);
        assert_eq!(rules.random_seed, None);
    }
}
