//! Visit logging endpoints.

use axum::{Extension, Json};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::{
    AppResources,
    api::rfc3339,
    client_ip::ClientIp,
    entity::visit,
    error::{ApiError, ApiJson, ErrorBody},
};

/// Tag for OpenAPI documentation.
pub const VISITS_TAG: &str = "Visits";

/// Maximum number of rows returned by `GET /visits`.
pub const VISIT_WINDOW: u64 = 100;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VisitLog {
    /// Client supplied user agent, stored as-is.
    pub user_agent: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VisitLogged {
    pub message: String,
    pub ip: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VisitEntry {
    pub id: i32,
    pub ip: String,
    pub timestamp: String,
    pub user_agent: String,
}

impl From<visit::Model> for VisitEntry {
    fn from(model: visit::Model) -> Self {
        Self {
            id: model.id,
            ip: model.ip_address,
            timestamp: rfc3339(model.timestamp),
            user_agent: model.user_agent,
        }
    }
}

#[tracing::instrument(skip(resources, payload))]
#[utoipa::path(
    post,
    path = "/log-visit",
    tag = VISITS_TAG,
    operation_id = "Log Visit",
    summary = "Record a visit from the calling client",
    description = "Stores the caller IP (first `X-Forwarded-For` entry, else the peer address) \
                   together with the supplied user agent and the current server time.",
    request_body(content = VisitLog, description = "Visitor metadata"),
    responses(
        (status = 200, description = "Visit stored", body = VisitLogged),
        (status = 403, description = "Caller IP is blocked", body = ErrorBody),
        (status = 500, description = "Database error", body = ErrorBody)
    )
)]
pub async fn log_visit(
    Extension(resources): Extension<AppResources>,
    ClientIp(ip): ClientIp,
    ApiJson(payload): ApiJson<VisitLog>,
) -> Result<Json<VisitLogged>, ApiError> {
    visit::ActiveModel {
        ip_address: Set(ip.clone()),
        timestamp: Set(OffsetDateTime::now_utc()),
        user_agent: Set(payload.user_agent),
        ..Default::default()
    }
    .insert(resources.db.as_ref())
    .await?;

    Ok(Json(VisitLogged {
        message: "Visit logged successfully".to_string(),
        ip,
    }))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/visits",
    tag = VISITS_TAG,
    operation_id = "List Visits",
    summary = "Most recent visits",
    description = "Returns at most 100 visits, newest first.",
    responses(
        (status = 200, description = "Newest visits", body = Vec<VisitEntry>),
        (status = 403, description = "Caller IP is blocked", body = ErrorBody)
    )
)]
pub async fn list_visits(
    Extension(resources): Extension<AppResources>,
) -> Result<Json<Vec<VisitEntry>>, ApiError> {
    let visits = visit::Entity::find()
        .order_by_desc(visit::Column::Timestamp)
        .order_by_desc(visit::Column::Id)
        .limit(VISIT_WINDOW)
        .all(resources.db.as_ref())
        .await?;

    Ok(Json(visits.into_iter().map(VisitEntry::from).collect()))
}
