use crate::chart::{AlignPolicy, chart_view};
use crate::errors::AppError;
use crate::models::{ChartView, Dataset, Metric};
use crate::storage::load_dataset;
use serde::Serialize;
use std::{collections::HashMap, path::PathBuf, sync::Arc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded { revision: u64 },
    #[serde(rename = "error")]
    Failed { message: String },
}

type ChartKey = (String, Metric, AlignPolicy);

#[derive(Debug, Default)]
pub struct DashboardStore {
    load: LoadState,
    dataset: Dataset,
    revision: u64,
    // Ticket of the most recent begin_load; only that load may finish.
    latest_load: u64,
    charts: HashMap<ChartKey, Arc<ChartView>>,
}

impl DashboardStore {
    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn begin_load(&mut self) -> u64 {
        self.latest_load += 1;
        self.load = LoadState::Loading;
        self.latest_load
    }

    /// Applies the result of the load started with `ticket`. Results of a load that has
    /// since been superseded are dropped and `false` is returned.
    pub fn finish_load(&mut self, ticket: u64, result: Result<Dataset, AppError>) -> bool {
        if ticket != self.latest_load {
            debug!(ticket, latest = self.latest_load, "dropping superseded dataset load");
            return false;
        }

        match result {
            Ok(dataset) => {
                self.revision += 1;
                self.dataset = dataset;
                self.charts.clear();
                self.load = LoadState::Loaded {
                    revision: self.revision,
                };
            }
            Err(err) => {
                self.dataset = Dataset::default();
                self.charts.clear();
                self.load = LoadState::Failed {
                    message: err.message,
                };
            }
        }
        true
    }

    pub fn dataset(&self) -> Result<&Dataset, AppError> {
        match &self.load {
            LoadState::Loaded { .. } => Ok(&self.dataset),
            LoadState::Idle | LoadState::Loading => {
                Err(AppError::unavailable("dataset is still loading"))
            }
            LoadState::Failed { message } => {
                Err(AppError::unavailable(format!("dataset unavailable: {message}")))
            }
        }
    }

    pub fn chart(
        &mut self,
        patient_id: &str,
        metric: Metric,
        policy: AlignPolicy,
    ) -> Result<Arc<ChartView>, AppError> {
        let dataset = self.dataset()?;
        let key = (patient_id.to_string(), metric, policy);
        if let Some(view) = self.charts.get(&key) {
            return Ok(Arc::clone(view));
        }

        let patient = dataset
            .patient(patient_id)
            .ok_or_else(|| AppError::not_found(format!("unknown patient '{patient_id}'")))?;
        let view = Arc::new(chart_view(
            metric,
            policy,
            &patient.observations,
            &dataset.averages,
            &patient.predictions,
        ));
        debug!(patient = patient_id, %metric, revision = self.revision, "computed chart");

        self.charts.insert(key, Arc::clone(&view));
        Ok(view)
    }

    #[cfg(test)]
    fn memoized_charts(&self) -> usize {
        self.charts.len()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub week_policy: AlignPolicy,
    pub store: Arc<Mutex<DashboardStore>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, week_policy: AlignPolicy) -> Self {
        Self {
            data_path,
            week_policy,
            store: Arc::new(Mutex::new(DashboardStore::default())),
        }
    }

    /// Re-reads the dataset file. The store reports `loading` while the read is in flight.
    pub async fn reload(&self) -> LoadState {
        let ticket = self.store.lock().await.begin_load();

        let result = load_dataset(&self.data_path).await;
        let mut store = self.store.lock().await;
        if !store.finish_load(ticket, result) {
            return store.load_state().clone();
        }

        match store.load_state() {
            LoadState::Loaded { revision } => {
                info!(
                    revision,
                    patients = store.dataset.patients.len(),
                    "dataset loaded from {}",
                    self.data_path.display()
                );
            }
            LoadState::Failed { message } => warn!("dataset load failed: {message}"),
            LoadState::Idle | LoadState::Loading => {}
        }
        store.load_state().clone()
    }
}
