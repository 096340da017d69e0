//! Group and membership handlers.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};

use serde_json::Value;

use scaffold_core::domain::Group;
use scaffold_core::validation::GroupPayload;
use scaffold_infra::database::{begin, commit};
use scaffold_shared::dto::{GroupResponse, MembershipRequest};

use super::users::user_response;
use crate::middleware::error::AppResult;
use crate::paging::{page_request, page_response};
use crate::state::AppState;

fn group_response(group: Group) -> GroupResponse {
    GroupResponse {
        id: group.id,
        group_name: group.group_name,
        description: group.description,
        created: group.created.to_rfc3339(),
    }
}

/// GET /api/groups
pub async fn list_groups(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> AppResult<HttpResponse> {
    let request = page_request(&query, &state.paging)?;
    let session = begin(&state.db).await?;
    let page = state.group_view(&session).collection(&request).await?;
    commit(session).await?;

    Ok(HttpResponse::Ok().json(page_response(page, group_response)))
}

/// POST /api/groups
pub async fn create_group(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let payload = GroupPayload::from_json(&body);
    let session = begin(&state.db).await?;
    let group = state.group_view(&session).post(payload).await?;
    commit(session).await?;

    Ok(HttpResponse::Created().json(group_response(group)))
}

/// GET /api/groups/{object_id}
pub async fn get_group(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let session = begin(&state.db).await?;
    let group = state.group_view(&session).get(path.into_inner()).await?;
    commit(session).await?;

    Ok(HttpResponse::Ok().json(group_response(group)))
}

/// GET /api/groups/{object_id}/users
pub async fn list_members(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    query: web::Query<HashMap<String, String>>,
) -> AppResult<HttpResponse> {
    let request = page_request(&query, &state.paging)?;
    let session = begin(&state.db).await?;
    let page = state
        .group_view(&session)
        .members(path.into_inner(), &request)
        .await?;
    commit(session).await?;

    Ok(HttpResponse::Ok().json(page_response(page, user_response)))
}

/// POST /api/groups/{object_id}/users
pub async fn add_member(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<MembershipRequest>,
) -> AppResult<HttpResponse> {
    let session = begin(&state.db).await?;
    state
        .group_view(&session)
        .add_member(path.into_inner(), body.user_id)
        .await?;
    commit(session).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/groups/{object_id}/users/{user_id}
pub async fn remove_member(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> AppResult<HttpResponse> {
    let (object_id, user_id) = path.into_inner();
    let session = begin(&state.db).await?;
    state
        .group_view(&session)
        .remove_member(object_id, user_id)
        .await?;
    commit(session).await?;

    Ok(HttpResponse::NoContent().finish())
}
