use applet_core::catalog::Catalog;
use applet_core::feed::{ActivityFeed, FeedFilter, PageRequest};
use applet_core::window::TimeInput;
use axum::extract::{Path, Query, State};
use axum::Json;

use crate::error::AppError;
use crate::routes::parse_id;
use crate::state::AppState;

/// Query string for the activity feed. Numbers arrive as text so that
/// malformed values degrade to defaults instead of rejecting the request.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub since_time: Option<String>,
    pub before_time: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl ActivityParams {
    fn filter(&self) -> FeedFilter {
        FeedFilter {
            since: self.since_time.clone().map(TimeInput::Text),
            before: self.before_time.clone().map(TimeInput::Text),
            status: self.status.clone(),
            search: self.search.clone(),
        }
    }
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct LatestParams {
    pub since: Option<String>,
    pub limit: Option<String>,
}

/// Leading-integer parse: `"12abc"` is 12, anything without digits is 0.
/// Digit runs past the `i64` range saturate.
fn lenient_int(raw: &str) -> i64 {
    let raw = raw.trim();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return 0;
    }
    let signed = if negative {
        format!("-{digits}")
    } else {
        digits.to_string()
    };
    signed
        .parse::<i64>()
        .unwrap_or(if negative { i64::MIN } else { i64::MAX })
}

/// GET /api/applets/:id/activities: one page of the activity feed.
pub async fn list_activities(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ActivityParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_id("applet", &id)?;
    let root = app.root.clone();
    let feed_config = app.config.feed.clone();
    let result = tokio::task::spawn_blocking(move || {
        let catalog = Catalog::load_or_seed(&root)?;
        let feed = ActivityFeed::new(&catalog, id)?.with_config(feed_config);
        let page = params.page.as_deref().map_or(1, lenient_int);
        let per_page = params
            .per_page
            .as_deref()
            .map_or(feed.default_per_page(), lenient_int);
        let page = feed.page(&PageRequest::new(page, per_page), &params.filter());
        Ok::<_, applet_core::FeedError>(serde_json::to_value(page)?)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/applets/:id/activities/latest?since=<ts>&limit=<n>: polling.
pub async fn latest_activities(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<LatestParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_id("applet", &id)?;
    let root = app.root.clone();
    let feed_config = app.config.feed.clone();
    let result = tokio::task::spawn_blocking(move || {
        let catalog = Catalog::load_or_seed(&root)?;
        let feed = ActivityFeed::new(&catalog, id)?.with_config(feed_config);
        let limit = params
            .limit
            .as_deref()
            .map_or(feed.default_per_page(), lenient_int);
        let since = TimeInput::Text(params.since.unwrap_or_default());
        let activities = feed.fetch_since(since, limit);
        Ok::<_, applet_core::FeedError>(serde_json::json!({ "activities": activities }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
