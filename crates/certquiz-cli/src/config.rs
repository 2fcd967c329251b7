//! Application configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level certquiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the question bank JSON file.
    #[serde(default = "default_question_bank")]
    pub question_bank: PathBuf,
    /// Directory where result records are stored.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    /// How many questions to draw per test.
    #[serde(default = "default_questions_per_test")]
    pub questions_per_test: usize,
}

fn default_question_bank() -> PathBuf {
    PathBuf::from("data/questions.json")
}
fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}
fn default_questions_per_test() -> usize {
    certquiz_core::session::QUESTIONS_PER_TEST
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            question_bank: default_question_bank(),
            results_dir: default_results_dir(),
            questions_per_test: default_questions_per_test(),
        }
    }
}

/// Load config from an explicit path, or `certquiz.toml` in the current
/// directory, falling back to defaults when neither exists.
pub fn load_config_from(path: Option<&Path>) -> Result<AppConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("certquiz.toml");
        local.exists().then_some(local)
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))
        }
        None => Ok(AppConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AppConfig::default();
        assert_eq!(config.question_bank, PathBuf::from("data/questions.json"));
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert_eq!(config.questions_per_test, 40);
    }

    #[test]
    fn parse_partial_config_fills_defaults() {
        let config: AppConfig = toml::from_str(r#"questions_per_test = 10"#).unwrap();
        assert_eq!(config.questions_per_test, 10);
        assert_eq!(config.results_dir, PathBuf::from("results"));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        assert!(load_config_from(Some(Path::new("/no/such/certquiz.toml"))).is_err());
    }
}
