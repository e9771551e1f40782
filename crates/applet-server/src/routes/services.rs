use applet_core::catalog::{Catalog, Service};
use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppError;
use crate::routes::parse_id;
use crate::state::AppState;

/// Wire shape of a service: camelCase keys, string id.
pub fn service_json(s: &Service) -> serde_json::Value {
    serde_json::json!({
        "id": s.id.to_string(),
        "name": s.name,
        "slug": s.slug,
        "iconUrl": s.icon_url,
        "brandColor": s.brand_color,
        "createdAt": s.created_at,
        "updatedAt": s.updated_at,
    })
}

/// GET /api/services: list all services.
pub async fn list_services(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let catalog = Catalog::load_or_seed(&root)?;
        let list: Vec<serde_json::Value> = catalog.services().iter().map(service_json).collect();
        Ok::<_, applet_core::FeedError>(serde_json::json!(list))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/services/:id: one service.
pub async fn get_service(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_id("service", &id)?;
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let catalog = Catalog::load_or_seed(&root)?;
        let service = catalog.service(id)?;
        Ok::<_, applet_core::FeedError>(service_json(service))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
