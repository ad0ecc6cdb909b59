use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Where the population comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSource {
    /// Precomputed score matrix plus gender files
    Matrix,
    /// Survey records scored by the built-in scorer
    Survey,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputSettings {
    #[serde(default = "default_source")]
    pub source: InputSource,
    #[serde(default = "default_scores_path")]
    pub scores_path: String,
    #[serde(default = "default_genders_path")]
    pub genders_path: String,
    #[serde(default = "default_gender_preferences_path")]
    pub gender_preferences_path: String,
    #[serde(default = "default_survey_path")]
    pub survey_path: String,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            source: default_source(),
            scores_path: default_scores_path(),
            genders_path: default_genders_path(),
            gender_preferences_path: default_gender_preferences_path(),
            survey_path: default_survey_path(),
        }
    }
}

fn default_source() -> InputSource { InputSource::Matrix }
fn default_scores_path() -> String { "data/raw_scores.txt".to_string() }
fn default_genders_path() -> String { "data/genders.txt".to_string() }
fn default_gender_preferences_path() -> String { "data/gender_preferences.txt".to_string() }
fn default_survey_path() -> String { "data/survey.json".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    /// Seed for the role split; drawn from entropy when absent
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_grad_year_weights")]
    pub grad_year: Vec<f64>,
    #[serde(default = "default_mutual_bonus")]
    pub mutual_bonus: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            grad_year: default_grad_year_weights(),
            mutual_bonus: default_mutual_bonus(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            grad_year: config.grad_year.clone(),
            mutual_bonus: config.mutual_bonus,
        }
    }
}

fn default_grad_year_weights() -> Vec<f64> { vec![1.0, 0.9, 0.7, 0.5] }
fn default_mutual_bonus() -> f64 { 1.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// Report file; stdout when absent
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: None,
            pretty: default_pretty(),
        }
    }
}

fn default_pretty() -> bool { true }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MATCH)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MATCH__MATCHING__SEED -> matching.seed
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.grad_year, vec![1.0, 0.9, 0.7, 0.5]);
        assert_eq!(weights.mutual_bonus, 1.0);
        assert_eq!(ScoringWeights::from(&weights), ScoringWeights::default());
    }

    #[test]
    fn test_sections_default_when_missing() {
        let settings: Settings = Config::builder()
            .set_override("matching.seed", 42i64)
            .unwrap()
            .set_override("input.source", "survey")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.matching.seed, Some(42));
        assert_eq!(settings.input.source, InputSource::Survey);
        assert_eq!(settings.input.survey_path, "data/survey.json");
        assert!(settings.output.path.is_none());
        assert!(settings.output.pretty);
    }
}
