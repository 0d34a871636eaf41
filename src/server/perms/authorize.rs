use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::dto::{AuthorizeRequest, AuthorizeResponse};
use crate::server::response::{ApiError, ApiResponse};
use crate::types::Principal;

pub async fn authorize(
    State(state): State<Arc<AppState>>,
    Path(namespace): Path<String>,
    Json(req): Json<AuthorizeRequest>,
) -> impl IntoResponse {
    let principal = Principal::parse(&req.principal)?;

    let can_perform = state
        .authorizer
        .authorize(&namespace, &principal, &req.groups)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(AuthorizeResponse { can_perform })))
}
