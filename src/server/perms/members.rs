use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::dto::{AddMemberRequest, GroupResponse, MemberResponse};
use crate::server::response::{ApiError, ApiResponse};
use crate::types::Principal;

pub async fn list_members(
    State(state): State<Arc<AppState>>,
    Path((namespace, name)): Path<(String, String)>,
) -> impl IntoResponse {
    let members: Vec<String> = state
        .membership
        .list_members(&namespace, &name)?
        .into_iter()
        .map(String::from)
        .collect();

    Ok::<_, ApiError>(Json(ApiResponse::success(members)))
}

pub async fn add_member(
    State(state): State<Arc<AppState>>,
    Path((namespace, name)): Path<(String, String)>,
    Json(req): Json<AddMemberRequest>,
) -> impl IntoResponse {
    let principal = Principal::parse(&req.principal)?;

    state.membership.add_member(&namespace, &name, &principal)?;

    Ok::<_, ApiError>((
        StatusCode::CREATED,
        Json(ApiResponse::success(MemberResponse {
            group: name,
            principal: principal.into(),
        })),
    ))
}

pub async fn remove_member(
    State(state): State<Arc<AppState>>,
    Path((namespace, name, principal)): Path<(String, String, String)>,
) -> impl IntoResponse {
    let principal = Principal::parse(&principal)?;

    state
        .membership
        .remove_member(&namespace, &name, &principal)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(MemberResponse {
        group: name,
        principal: principal.into(),
    })))
}

pub async fn list_principal_groups(
    State(state): State<Arc<AppState>>,
    Path((namespace, principal)): Path<(String, String)>,
) -> impl IntoResponse {
    let principal = Principal::parse(&principal)?;

    let groups: Vec<GroupResponse> = state
        .membership
        .list_groups_for_principal(&namespace, &principal)?
        .into_iter()
        .map(GroupResponse::from)
        .collect();

    Ok::<_, ApiError>(Json(ApiResponse::success(groups)))
}
