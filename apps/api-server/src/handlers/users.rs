//! User handlers. Each request runs in its own transaction, committed only
//! when the view succeeds.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};

use serde_json::Value;

use scaffold_core::domain::User;
use scaffold_core::validation::UserPayload;
use scaffold_infra::database::{begin, commit};
use scaffold_shared::dto::UserResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::paging::{page_request, page_response};
use crate::state::AppState;

pub(crate) fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        user_name: user.user_name,
        email: user.email,
    }
}

/// GET /api/users
pub async fn list_users(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> AppResult<HttpResponse> {
    let request = page_request(&query, &state.paging)?;
    let session = begin(&state.db).await?;
    let page = state.user_view(&session).collection(&request).await?;
    commit(session).await?;

    Ok(HttpResponse::Ok().json(page_response(page, user_response)))
}

/// POST /api/users
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let payload = UserPayload::from_json(&body);
    let session = begin(&state.db).await?;
    let user = state.user_view(&session).post(payload).await?;
    commit(session).await?;

    Ok(HttpResponse::Created().json(user_response(user)))
}

/// GET /api/users/{object_id}
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let session = begin(&state.db).await?;
    let user = state.user_view(&session).get(path.into_inner()).await?;
    commit(session).await?;

    Ok(HttpResponse::Ok().json(user_response(user)))
}

/// PATCH /api/users/{object_id}
///
/// An unknown id is a 404 whatever the body holds, so the body is only
/// decoded once the record is known to exist.
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let object_id = path.into_inner();
    let session = begin(&state.db).await?;
    let view = state.user_view(&session);
    view.get(object_id).await?;

    let body: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Json deserialize error: {e}")))?;
    let user = view.patch(object_id, UserPayload::from_json(&body)).await?;
    commit(session).await?;

    Ok(HttpResponse::Ok().json(user_response(user)))
}

/// DELETE /api/users/{object_id}
pub async fn delete_user(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let session = begin(&state.db).await?;
    state.user_view(&session).delete(path.into_inner()).await?;
    commit(session).await?;

    Ok(HttpResponse::NoContent().finish())
}
