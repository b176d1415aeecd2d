//! OpenAPI/Utoipa configuration.

use crate::api::{
    admins::ADMINS_TAG, blocklist::BLOCKLIST_TAG, health::MISC_TAG, visits::VISITS_TAG,
};
use utoipa::OpenApi;

/// OpenAPI documentation configuration.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Visitwatch API",
        version = "1.0.0",
        description = "Visitor logging, IP blocklist and Telegram admin registry.\n\n\
                       Every `/api` route except `/api/health` answers 403 to callers on the blocklist."
    ),
    tags(
        (name = MISC_TAG, description = "Miscellaneous endpoints"),
        (name = VISITS_TAG, description = "Visitor log"),
        (name = ADMINS_TAG, description = "Telegram admin registry"),
        (name = BLOCKLIST_TAG, description = "IP blocklist management")
    )
)]
pub struct ApiDoc;
