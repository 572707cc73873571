// Status page and telemetry endpoint
//
// The control loop publishes kinematic snapshots into a watch channel; the
// HTTP handlers only ever borrow the latest value, so readers never see a
// half-written state.

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use tokio::sync::watch;
use tracing::info;

use crate::config::STATUS_REFRESH_MS;
use crate::telemetry::KinematicState;

/// Format a value to two decimals, sanitizing NaN/Inf to a placeholder.
/// The estimator should never produce non-finite values, but the page must
/// not depend on that.
fn fmt2(value: f32) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        "--".to_string()
    }
}

/// Render the auto-refreshing status page for one snapshot
pub fn render(state: KinematicState) -> String {
    let kmh = state.velocity * 3.6;
    format!(
        concat!(
            "<!DOCTYPE html><html><head><title>Vehicle Status</title></head><body>",
            "<h1>Vehicle Status</h1>",
            "<p>Velocity: {} m/s ({} km/h)</p>",
            "<p>Acceleration: {} m/s&sup2;</p>",
            "<p>Power: {} W</p>",
            "<script>setTimeout(()=>{{location.reload()}}, {});</script>",
            "</body></html>"
        ),
        fmt2(state.velocity),
        fmt2(kmh),
        fmt2(state.acceleration),
        fmt2(state.power),
        STATUS_REFRESH_MS,
    )
}

async fn index(State(rx): State<watch::Receiver<KinematicState>>) -> Html<String> {
    Html(render(*rx.borrow()))
}

async fn telemetry(State(rx): State<watch::Receiver<KinematicState>>) -> Json<KinematicState> {
    Json(*rx.borrow())
}

/// Build the status routes over a snapshot receiver
pub fn router(rx: watch::Receiver<KinematicState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/telemetry", get(telemetry))
        .with_state(rx)
}

/// Serve the status page until the process exits
pub async fn serve(addr: &str, rx: watch::Receiver<KinematicState>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Status page listening on http://{}", addr);
    axum::serve(listener, router(rx)).await
}
