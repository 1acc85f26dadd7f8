//! ==============================================================================
//! api.rs - http facade
//! ==============================================================================
//!
//! endpoints:
//!
//!     GET  /health       {"status":"healthy","timestamp":...}
//!     GET  /info         identity, port, sensor types, start time
//!     POST /temperature  {"value":"23.41"|null,"unit":"°C"}
//!     POST /humidity     {"value":...,"unit":"%"}
//!     POST /vibration    {"value":...,"unit":"mm/s"}
//!
//! request order:
//!     1. method check (axum method router, fallback answers 405; HEAD is
//!        refused explicitly since axum would otherwise serve it via GET)
//!     2. one snapshot read from the store
//!     3. failure gate (500 while the device is failed)
//!     4. json body
//!
//! an absent sensor value is a normal 200 with "value": null.
//!
//! ==============================================================================

use crate::domain::{
    rfc3339, HealthResponse, InfoResponse, SensorKind, SensorResponse, SimulatorIdentity,
};
use crate::error::ApiError;
use crate::gate;
use crate::store::SensorStore;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post, MethodRouter},
    Router,
};
use chrono::Utc;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// everything a handler can see
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<SensorStore>,
    pub identity: Arc<SimulatorIdentity>,
    pub port: String,
}

pub fn router(ctx: AppContext) -> Router {
    let sensor_route = |kind: SensorKind| -> MethodRouter<AppContext> {
        post(move |State(ctx): State<AppContext>| read_sensor(ctx, kind)).fallback(method_not_allowed)
    };

    let mut app = Router::new()
        .route(
            "/health",
            get(health_handler).head(method_not_allowed).fallback(method_not_allowed),
        )
        .route(
            "/info",
            get(info_handler).head(method_not_allowed).fallback(method_not_allowed),
        );
    for kind in SensorKind::ALL {
        app = app.route(kind.path(), sensor_route(kind));
    }

    app.layer(TraceLayer::new_for_http()).with_state(ctx)
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn health_handler(State(ctx): State<AppContext>) -> Result<Json<HealthResponse>, ApiError> {
    gate::check(&*ctx.store.current().await)?;
    Ok(Json(HealthResponse { status: "healthy", timestamp: rfc3339(Utc::now()) }))
}

async fn info_handler(State(ctx): State<AppContext>) -> Result<Json<InfoResponse>, ApiError> {
    gate::check(&*ctx.store.current().await)?;
    Ok(Json(InfoResponse {
        simulator_id: ctx.identity.id.clone(),
        port: ctx.port.clone(),
        sensor_types: SensorKind::ALL.iter().map(|k| k.name()).collect(),
        start_time: rfc3339(ctx.identity.start_time),
    }))
}

async fn read_sensor(ctx: AppContext, kind: SensorKind) -> Result<Json<SensorResponse>, ApiError> {
    let state = ctx.store.current().await;
    gate::check(&state)?;
    Ok(Json(SensorResponse::from(state.reading(kind))))
}
