//! IP blocklist endpoints and the lookup used by the request guard.

use axum::{Extension, Json};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::{
    AppResources,
    api::MessageResponse,
    entity::blocked_ip,
    error::{ApiError, ApiJson, ErrorBody},
};

/// Tag for OpenAPI documentation.
pub const BLOCKLIST_TAG: &str = "Blocklist";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IpRequest {
    /// Address exactly as it should be matched, e.g. `10.0.0.5`.
    pub ip: String,
}

/// Whether `ip` has a row in the blocklist.
pub async fn is_ip_blocked<C: ConnectionTrait>(db: &C, ip: &str) -> Result<bool, DbErr> {
    let count = blocked_ip::Entity::find()
        .filter(blocked_ip::Column::IpAddress.eq(ip))
        .count(db)
        .await?;
    Ok(count > 0)
}

fn already_blocked() -> ApiError {
    ApiError::AlreadyExists("IP is already blocked".to_string())
}

#[tracing::instrument(skip(resources, payload), fields(ip = %payload.ip))]
#[utoipa::path(
    post,
    path = "/block-ip",
    tag = BLOCKLIST_TAG,
    operation_id = "Block IP",
    summary = "Add an IP address to the blocklist",
    request_body(content = IpRequest, description = "Address to block"),
    responses(
        (status = 200, description = "Address blocked", body = MessageResponse),
        (status = 400, description = "Address is already blocked", body = ErrorBody),
        (status = 403, description = "Caller IP is blocked", body = ErrorBody)
    )
)]
pub async fn block_ip(
    Extension(resources): Extension<AppResources>,
    ApiJson(payload): ApiJson<IpRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let db = resources.db.as_ref();
    if is_ip_blocked(db, &payload.ip).await? {
        return Err(already_blocked());
    }

    let row = blocked_ip::ActiveModel {
        ip_address: Set(payload.ip.clone()),
        blocked_at: Set(OffsetDateTime::now_utc()),
        reason: Set(blocked_ip::DEFAULT_REASON.to_string()),
        ..Default::default()
    };
    match row.insert(db).await {
        Ok(_) => {}
        // A concurrent request blocked the same address between check and insert.
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Err(already_blocked());
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!(ip = %payload.ip, "IP blocked");
    Ok(Json(MessageResponse::new(format!(
        "IP {} blocked successfully",
        payload.ip
    ))))
}

#[tracing::instrument(skip(resources, payload), fields(ip = %payload.ip))]
#[utoipa::path(
    post,
    path = "/unblock-ip",
    tag = BLOCKLIST_TAG,
    operation_id = "Unblock IP",
    summary = "Remove an IP address from the blocklist",
    request_body(content = IpRequest, description = "Address to unblock"),
    responses(
        (status = 200, description = "Address unblocked", body = MessageResponse),
        (status = 404, description = "Address is not on the blocklist", body = ErrorBody),
        (status = 403, description = "Caller IP is blocked", body = ErrorBody)
    )
)]
pub async fn unblock_ip(
    Extension(resources): Extension<AppResources>,
    ApiJson(payload): ApiJson<IpRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let db = resources.db.as_ref();
    let row = blocked_ip::Entity::find()
        .filter(blocked_ip::Column::IpAddress.eq(payload.ip.as_str()))
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound("IP not found in blocked list".to_string()))?;

    blocked_ip::Entity::delete_by_id(row.id).exec(db).await?;

    tracing::info!(ip = %payload.ip, "IP unblocked");
    Ok(Json(MessageResponse::new(format!(
        "IP {} unblocked successfully",
        payload.ip
    ))))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/blocked-ips",
    tag = BLOCKLIST_TAG,
    operation_id = "List Blocked IPs",
    summary = "All blocked addresses, most recently blocked first",
    responses(
        (status = 200, description = "Blocked addresses", body = Vec<String>),
        (status = 403, description = "Caller IP is blocked", body = ErrorBody)
    )
)]
pub async fn list_blocked_ips(
    Extension(resources): Extension<AppResources>,
) -> Result<Json<Vec<String>>, ApiError> {
    let ips = blocked_ip::Entity::find()
        .select_only()
        .column(blocked_ip::Column::IpAddress)
        .order_by_desc(blocked_ip::Column::BlockedAt)
        .order_by_desc(blocked_ip::Column::Id)
        .into_tuple::<String>()
        .all(resources.db.as_ref())
        .await?;

    Ok(Json(ips))
}
