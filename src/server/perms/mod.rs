mod authorize;
mod groups;
mod members;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::server::AppState;

pub fn perms_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/{namespace}/authorize", post(authorize::authorize))
        // Group routes
        .route("/{namespace}/groups", get(groups::list_groups))
        .route("/{namespace}/groups", post(groups::create_group))
        .route("/{namespace}/groups/{name}", delete(groups::delete_group))
        // Membership routes
        .route(
            "/{namespace}/groups/{name}/members",
            get(members::list_members),
        )
        .route(
            "/{namespace}/groups/{name}/members",
            post(members::add_member),
        )
        .route(
            "/{namespace}/groups/{name}/members/{principal}",
            delete(members::remove_member),
        )
        .route(
            "/{namespace}/principals/{principal}/groups",
            get(members::list_principal_groups),
        )
}
