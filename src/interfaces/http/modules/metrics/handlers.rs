//! Prometheus metrics endpoint

use axum::extract::State;
use metrics_exporter_prometheus::PrometheusHandle;

/// State for the metrics route
#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Monitoring",
    responses(
        (status = 200, description = "Prometheus text exposition", body = String)
    )
)]
pub async fn get_metrics(State(state): State<MetricsState>) -> String {
    state.handle.render()
}
