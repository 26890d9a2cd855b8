use crate::errors::AppError;
use crate::models::Dataset;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

/// Reads the dataset file. A missing file is an empty dataset, not an error.
pub async fn load_dataset(path: &Path) -> Result<Dataset, AppError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("no dataset at {}, starting empty", path.display());
            return Ok(Dataset::default());
        }
        Err(err) => {
            error!("failed to read dataset file: {err}");
            return Err(err.into());
        }
    };

    serde_json::from_slice(&bytes).map_err(|err| {
        error!("failed to parse dataset file: {err}");
        AppError::internal(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("gest_dashboard_{}_{name}.json", std::process::id()));
        path
    }

    #[tokio::test]
    async fn missing_file_is_empty_dataset() {
        let dataset = load_dataset(&temp_path("missing")).await.unwrap();
        assert_eq!(dataset, Dataset::default());
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let path = temp_path("malformed");
        fs::write(&path, b"{ \"patients\": 3 }").await.unwrap();
        let err = load_dataset(&path).await.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn parses_patients_and_averages() {
        let path = temp_path("valid");
        let payload = serde_json::json!({
            "patients": [{
                "id": "p-1",
                "name": "Amina",
                "address": "North Ward",
                "status": "active",
                "appointments": ["2026-10-19"],
                "observations": [{ "GESTATIONAL_AGE_WEEKS": 12, "MATERNAL_WEIGHT": 61.5 }],
                "predictions": [{ "GESTATIONAL_AGE_WEEKS": 16, "PREDICTED_WEIGHT": 64.0 }]
            }],
            "averages": [{ "GESTATIONAL_AGE_WEEKS": 12, "AVG_WEIGHT": 60.0, "AVG_HB": null }]
        });
        fs::write(&path, serde_json::to_vec(&payload).unwrap()).await.unwrap();

        let dataset = load_dataset(&path).await.unwrap();
        let patient = dataset.patient("p-1").expect("missing patient");
        assert_eq!(patient.observations[0].weight, Some(61.5));
        assert_eq!(patient.observations[0].hemoglobin, None);
        assert_eq!(patient.delivery, None);
        assert_eq!(dataset.averages[0].weight, Some(60.0));
        assert_eq!(dataset.averages[0].hemoglobin, None);
        let _ = fs::remove_file(&path).await;
    }
}
