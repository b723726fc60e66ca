// src/server.rs
//! HTTP boundary: five GET routes over a [`QueryService`].

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;

use crate::{error::QueryError, query::QueryService};

#[derive(Serialize)]
struct Message {
    message: String,
}

fn message(status: StatusCode, text: impl Into<String>) -> Response {
    (status, Json(Message { message: text.into() })).into_response()
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        message(StatusCode::NOT_FOUND, self.to_string())
    }
}

pub fn router(service: QueryService) -> Router {
    Router::new()
        .route("/activities", get(all_activities))
        .route("/activities/category/:category", get(activities_by_category))
        .route("/activities/dossier/:dossier", get(activities_by_dossier))
        .route("/categories", get(categories))
        .route("/dossiers", get(dossiers))
        .fallback(unknown_route)
        .with_state(service)
}

async fn all_activities(State(svc): State<QueryService>) -> Response {
    Json(svc.all()).into_response()
}

async fn activities_by_category(
    State(svc): State<QueryService>,
    Path(category): Path<String>,
) -> Result<Response, QueryError> {
    tracing::debug!(%category, "by category");
    Ok(Json(svc.by_category(&category)?).into_response())
}

async fn activities_by_dossier(
    State(svc): State<QueryService>,
    Path(dossier): Path<String>,
) -> Result<Response, QueryError> {
    tracing::debug!(%dossier, "by dossier");
    Ok(Json(svc.by_dossier(&dossier)?).into_response())
}

async fn categories(State(svc): State<QueryService>) -> Json<Vec<crate::model::CategorySummary>> {
    Json(svc.category_summary())
}

async fn dossiers(State(svc): State<QueryService>) -> Json<Vec<crate::model::DossierSummary>> {
    Json(svc.dossier_summary())
}

async fn unknown_route() -> Response {
    message(StatusCode::NOT_FOUND, "no such route")
}

/// Bind and serve until Ctrl-C. The catalog inside `service` must already be
/// loaded; nothing here touches the dataset file.
pub async fn serve(service: QueryService, listen: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen).await?;
    tracing::info!(addr = %listener.local_addr()?, rows = service.all().len(), "serving activities");
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
