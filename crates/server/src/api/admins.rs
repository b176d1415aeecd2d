//! Telegram admin management endpoints.
//!
//! - `GET /admins` - list active admins
//! - `POST /admins` - create an admin
//! - `DELETE /admins/{id}` - remove an admin

use axum::{Extension, Json};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::{
    AppResources,
    api::{MessageResponse, rfc3339},
    entity::telegram_admin,
    error::{ApiError, ApiJson, ApiPath, ErrorBody},
};

/// Tag for OpenAPI documentation.
pub const ADMINS_TAG: &str = "Admins";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminCreate {
    pub name: String,
    pub telegram_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminCreated {
    pub id: i32,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminEntry {
    pub id: i32,
    pub name: String,
    pub telegram_id: String,
    pub created_at: String,
}

impl From<telegram_admin::Model> for AdminEntry {
    fn from(model: telegram_admin::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            telegram_id: model.telegram_id,
            created_at: rfc3339(model.created_at),
        }
    }
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/admins",
    tag = ADMINS_TAG,
    operation_id = "List Admins",
    summary = "List active Telegram admins",
    description = "Returns every admin with `is_active = true`, in insertion order.",
    responses(
        (status = 200, description = "Active admins", body = Vec<AdminEntry>),
        (status = 403, description = "Caller IP is blocked", body = ErrorBody)
    )
)]
pub async fn list_admins(
    Extension(resources): Extension<AppResources>,
) -> Result<Json<Vec<AdminEntry>>, ApiError> {
    let admins = telegram_admin::Entity::find()
        .filter(telegram_admin::Column::IsActive.eq(true))
        .order_by_asc(telegram_admin::Column::Id)
        .all(resources.db.as_ref())
        .await?;

    Ok(Json(admins.into_iter().map(AdminEntry::from).collect()))
}

#[tracing::instrument(skip(resources, payload), fields(telegram_id = %payload.telegram_id))]
#[utoipa::path(
    post,
    path = "/admins",
    tag = ADMINS_TAG,
    operation_id = "Create Admin",
    summary = "Register a new Telegram admin",
    description = "Creates an admin. The Telegram ID must be unique; a duplicate is rejected \
                   either by the pre-check or by the unique constraint at commit time.",
    request_body(content = AdminCreate, description = "Admin name and Telegram ID"),
    responses(
        (status = 200, description = "Admin created", body = AdminCreated),
        (status = 400, description = "Telegram ID already registered", body = ErrorBody),
        (status = 403, description = "Caller IP is blocked", body = ErrorBody)
    )
)]
pub async fn create_admin(
    Extension(resources): Extension<AppResources>,
    ApiJson(payload): ApiJson<AdminCreate>,
) -> Result<Json<AdminCreated>, ApiError> {
    let txn = resources.db.begin().await?;

    let existing = telegram_admin::Entity::find()
        .filter(telegram_admin::Column::TelegramId.eq(payload.telegram_id.as_str()))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(ApiError::AlreadyExists(
            "Admin with this Telegram ID already exists".to_string(),
        ));
    }

    let new_admin = telegram_admin::ActiveModel {
        name: Set(payload.name),
        telegram_id: Set(payload.telegram_id),
        created_at: Set(OffsetDateTime::now_utc()),
        is_active: Set(true),
        ..Default::default()
    };

    let created = match new_admin.insert(&txn).await {
        Ok(model) => model,
        Err(e) => {
            tracing::warn!(
                name = "api.create_admin.insert_failed",
                target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                error = ?e,
                message = "Failed to insert admin, rolling back"
            );
            if let Err(e) = txn.rollback().await {
                tracing::error!(error = ?e, "Rollback after failed admin insert failed");
            }
            return Err(create_failed());
        }
    };

    if let Err(e) = txn.commit().await {
        tracing::warn!(
            name = "api.create_admin.commit_failed",
            target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
            error = ?e,
            message = "Failed to commit new admin"
        );
        return Err(create_failed());
    }

    tracing::info!(id = created.id, "Admin created");
    Ok(Json(AdminCreated {
        id: created.id,
        message: "Admin created successfully".to_string(),
    }))
}

fn create_failed() -> ApiError {
    ApiError::CreateFailed("Failed to create admin - possibly duplicate Telegram ID".to_string())
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    delete,
    path = "/admins/{id}",
    tag = ADMINS_TAG,
    operation_id = "Delete Admin",
    summary = "Remove a Telegram admin",
    params(
        ("id" = i64, Path, description = "Numeric admin id", example = 1)
    ),
    responses(
        (status = 200, description = "Admin deleted", body = MessageResponse),
        (status = 400, description = "Id is not an integer", body = ErrorBody),
        (status = 404, description = "No admin with this id", body = ErrorBody),
        (status = 403, description = "Caller IP is blocked", body = ErrorBody)
    )
)]
pub async fn delete_admin(
    Extension(resources): Extension<AppResources>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let not_found = || ApiError::NotFound("Admin not found".to_string());
    // Ids outside the column range cannot name a row.
    let id = i32::try_from(id).map_err(|_| not_found())?;

    let db = resources.db.as_ref();
    let admin = telegram_admin::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(not_found)?;

    telegram_admin::Entity::delete_by_id(admin.id).exec(db).await?;

    tracing::info!(id, "Admin deleted");
    Ok(Json(MessageResponse::new("Admin deleted successfully")))
}
