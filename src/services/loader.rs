use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

use crate::config::{InputSettings, InputSource};
use crate::models::{MatchRequest, ParseGenderError, Participant, ScoringWeights, SurveyDocument};

/// Errors that can occur while loading a population
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("participant {index} failed validation: {source}")]
    Validation {
        index: usize,
        #[source]
        source: validator::ValidationErrors,
    },
}

/// Load the population described by `settings` as a matching request
pub fn load_request(
    settings: &InputSettings,
    weights: &ScoringWeights,
) -> Result<MatchRequest, LoaderError> {
    let request = match settings.source {
        InputSource::Matrix => MatchRequest {
            scores: load_score_rows(&settings.scores_path)?,
            gender_identity: load_labels(&settings.genders_path)?,
            gender_preference: load_labels(&settings.gender_preferences_path)?,
        },
        InputSource::Survey => {
            let participants = load_survey(&settings.survey_path)?;
            MatchRequest::from_participants(&participants, weights)
        }
    };

    tracing::info!(
        source = ?settings.source,
        population = request.population(),
        "Population loaded"
    );

    Ok(request)
}

/// Read a whitespace-separated score matrix, one row per line
pub fn load_score_rows<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<f64>>, LoaderError> {
    let path = path.as_ref();
    let text = read(path)?;

    non_blank_lines(&text)
        .map(|(line, content)| {
            content
                .split_whitespace()
                .map(|token| {
                    token.parse::<f64>().map_err(|e| LoaderError::Parse {
                        path: path.to_path_buf(),
                        line,
                        message: format!("invalid score {:?}: {}", token, e),
                    })
                })
                .collect::<Result<Vec<f64>, LoaderError>>()
        })
        .collect()
}

/// Read one gender label per line
pub fn load_labels<T, P>(path: P) -> Result<Vec<T>, LoaderError>
where
    T: FromStr<Err = ParseGenderError>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = read(path)?;

    non_blank_lines(&text)
        .map(|(line, content)| {
            content.parse::<T>().map_err(|e| LoaderError::Parse {
                path: path.to_path_buf(),
                line,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Read and validate survey records; ids follow record order
pub fn load_survey<P: AsRef<Path>>(path: P) -> Result<Vec<Participant>, LoaderError> {
    let text = read(path.as_ref())?;
    let document: SurveyDocument = serde_json::from_str(&text)?;

    let mut participants = document.participants;
    for (index, participant) in participants.iter_mut().enumerate() {
        participant
            .validate()
            .map_err(|source| LoaderError::Validation { index, source })?;
        participant.id = index;
    }

    tracing::debug!("Loaded {} survey records", participants.len());

    Ok(participants)
}

fn read(path: &Path) -> Result<String, LoaderError> {
    fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Non-blank lines with their 1-based line numbers
fn non_blank_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GenderIdentity, GenderPreference};

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", uuid::Uuid::new_v4(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_score_rows() {
        let path = write_temp("scores.txt", "0 0.5 1e-1\n0.25 0 3\n\n0.1 0.2 0\n");
        let rows = load_score_rows(&path).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![0.0, 0.5, 0.1]);
        assert_eq!(rows[1][2], 3.0);
    }

    #[test]
    fn test_score_parse_error_reports_line() {
        let path = write_temp("scores.txt", "0 1\n1 oops\n");
        let err = load_score_rows(&path).unwrap_err();

        assert!(matches!(err, LoaderError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_load_gender_labels() {
        let path = write_temp("genders.txt", "Male\nNon-binary\r\nFemale\n");
        let identities = load_labels::<GenderIdentity, _>(&path).unwrap();
        assert_eq!(
            identities,
            vec![GenderIdentity::Male, GenderIdentity::NonBinary, GenderIdentity::Female]
        );

        let path = write_temp("prefs.txt", "Women\nPansexual\n");
        let err = load_labels::<GenderPreference, _>(&path).unwrap_err();
        assert!(matches!(err, LoaderError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_empty_matrix_files_give_empty_population() {
        let settings = InputSettings {
            source: InputSource::Matrix,
            scores_path: write_temp("scores.txt", "").display().to_string(),
            genders_path: write_temp("genders.txt", "\n").display().to_string(),
            gender_preferences_path: write_temp("prefs.txt", "").display().to_string(),
            ..InputSettings::default()
        };

        let request = load_request(&settings, &ScoringWeights::default()).unwrap();
        assert_eq!(request.population(), 0);
        assert!(request.scores.is_empty());

        let outcome = crate::core::run_matching(
            &request.scores,
            &request.gender_identity,
            &request.gender_preference,
            3,
        )
        .unwrap();
        assert!(outcome.pairs.is_empty());
        assert!(outcome.unmatched.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = load_score_rows("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, LoaderError::Io { .. }));
    }

    #[test]
    fn test_load_survey_assigns_ids_and_validates() {
        let path = write_temp(
            "survey.json",
            r#"{"participants": [
                {"name": "Ann", "gender": "Female", "preference": "Men", "gradYear": 2024, "responses": [1, 2]},
                {"name": "Bob", "gender": "Male", "preference": "Women", "gradYear": 2025, "responses": [1, 3]}
            ]}"#,
        );
        let participants = load_survey(&path).unwrap();
        assert_eq!(participants[1].id, 1);
        assert_eq!(participants[1].gender_preference, GenderPreference::Women);

        let path = write_temp(
            "survey.json",
            r#"{"participants": [{"name": "", "gender": "Female", "preference": "Men", "gradYear": 2024}]}"#,
        );
        let err = load_survey(&path).unwrap_err();
        assert!(matches!(err, LoaderError::Validation { index: 0, .. }));
    }
}
