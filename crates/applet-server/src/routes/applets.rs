use applet_core::catalog::{AppletRecord, Catalog};
use axum::extract::{Path, Query, State};
use axum::Json;

use crate::error::AppError;
use crate::routes::parse_id;
use crate::routes::services::service_json;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct ListParams {
    pub enabled: Option<bool>,
}

/// Wire shape of an applet with both services inlined.
pub fn applet_json(a: &AppletRecord) -> serde_json::Value {
    serde_json::json!({
        "id": a.id.to_string(),
        "name": a.name,
        "description": a.description,
        "enabled": a.enabled,
        "triggerService": service_json(&a.trigger_service),
        "actionService": service_json(&a.action_service),
        "createdAt": a.created_at,
        "updatedAt": a.updated_at,
    })
}

/// GET /api/applets?enabled=<bool>: list applets with their services.
pub async fn list_applets(
    State(app): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let catalog = Catalog::load_or_seed(&root)?;
        let list: Vec<serde_json::Value> = catalog
            .applets(params.enabled)?
            .iter()
            .map(applet_json)
            .collect();
        Ok::<_, applet_core::FeedError>(serde_json::json!(list))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/applets/:id: one applet.
pub async fn get_applet(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_id("applet", &id)?;
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let catalog = Catalog::load_or_seed(&root)?;
        Ok::<_, applet_core::FeedError>(applet_json(&catalog.applet(id)?))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// POST /api/applets/:id/toggle: flip the enabled flag and persist.
pub async fn toggle_applet(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_id("applet", &id)?;
    let root = app.root.clone();
    let _guard = app.catalog_write.lock().await;
    let result = tokio::task::spawn_blocking(move || {
        let mut catalog = Catalog::load_or_seed(&root)?;
        let applet = catalog.toggle(id)?;
        catalog.save(&root)?;
        tracing::info!(applet_id = id, enabled = applet.enabled, "applet toggled");
        Ok::<_, applet_core::FeedError>(applet_json(&applet))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
