use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::dto::{CreateGroupRequest, GroupResponse};
use crate::server::response::{ApiError, ApiResponse};
use crate::server::validation::validate_group_name;

pub async fn list_groups(
    State(state): State<Arc<AppState>>,
    Path(namespace): Path<String>,
) -> impl IntoResponse {
    let groups: Vec<GroupResponse> = state
        .registry
        .list(&namespace)?
        .into_iter()
        .map(GroupResponse::from)
        .collect();

    Ok::<_, ApiError>(Json(ApiResponse::success(groups)))
}

pub async fn create_group(
    State(state): State<Arc<AppState>>,
    Path(namespace): Path<String>,
    Json(req): Json<CreateGroupRequest>,
) -> impl IntoResponse {
    validate_group_name(&req.name)?;

    let group = state
        .registry
        .create(&namespace, &req.name, &req.description)?;

    Ok::<_, ApiError>((
        StatusCode::CREATED,
        Json(ApiResponse::success(GroupResponse::from(group))),
    ))
}

pub async fn delete_group(
    State(state): State<Arc<AppState>>,
    Path((namespace, name)): Path<(String, String)>,
) -> impl IntoResponse {
    let group = state.registry.delete(&namespace, &name)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(GroupResponse::from(group))))
}
