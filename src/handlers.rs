use crate::chart::{chart_view, split_points};
use crate::errors::AppError;
use crate::models::{
    AddressesResponse, AlignRequest, ChartView, HomeSummary, Metric, PatientListItem, SummaryQuery,
};
use crate::state::{AppState, LoadState};
use crate::summary::{address_options, build_summary};
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    let summary = store
        .dataset()
        .map(|data| build_summary(data, None))
        .unwrap_or_default();
    Html(render_index(&summary))
}

pub async fn status(State(state): State<AppState>) -> Json<LoadState> {
    let store = state.store.lock().await;
    Json(store.load_state().clone())
}

pub async fn reload(State(state): State<AppState>) -> Json<LoadState> {
    Json(state.reload().await)
}

pub async fn home_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<HomeSummary>, AppError> {
    let store = state.store.lock().await;
    let data = store.dataset()?;
    Ok(Json(build_summary(data, query.address.as_deref())))
}

pub async fn patient_addresses(
    State(state): State<AppState>,
) -> Result<Json<AddressesResponse>, AppError> {
    let store = state.store.lock().await;
    let data = store.dataset()?;
    Ok(Json(AddressesResponse {
        success: true,
        addresses: address_options(data),
    }))
}

pub async fn patients(State(state): State<AppState>) -> Result<Json<Vec<PatientListItem>>, AppError> {
    let store = state.store.lock().await;
    let data = store.dataset()?;
    let items = data
        .patients
        .iter()
        .map(|patient| PatientListItem {
            id: patient.id.clone(),
            name: patient.name.clone(),
            address: patient.address.clone(),
            status: patient.status,
        })
        .collect();
    Ok(Json(items))
}

pub async fn patient_chart(
    State(state): State<AppState>,
    Path((patient_id, metric)): Path<(String, String)>,
) -> Result<Json<ChartView>, AppError> {
    let metric: Metric = metric.parse().map_err(AppError::bad_request)?;
    let mut store = state.store.lock().await;
    let view = store.chart(&patient_id, metric, state.week_policy)?;
    Ok(Json(ChartView::clone(&view)))
}

pub async fn align_chart(
    State(state): State<AppState>,
    Json(payload): Json<AlignRequest>,
) -> Json<ChartView> {
    let AlignRequest {
        metric,
        mut observed,
        mut average,
        mut predicted,
        points,
    } = payload;
    let (tagged_observed, tagged_average, tagged_predicted) = split_points(&points);
    observed.extend(tagged_observed);
    average.extend(tagged_average);
    predicted.extend(tagged_predicted);

    Json(chart_view(
        metric,
        state.week_policy,
        &observed,
        &average,
        &predicted,
    ))
}
