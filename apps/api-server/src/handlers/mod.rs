//! HTTP handlers and route configuration.

mod groups;
mod health;
mod users;

use actix_web::{error::JsonPayloadError, web};

use crate::middleware::error::AppError;

fn json_error(err: JsonPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/users")
                        .route("", web::get().to(users::list_users))
                        .route("", web::post().to(users::create_user))
                        .route("/{object_id}", web::get().to(users::get_user))
                        .route("/{object_id}", web::patch().to(users::update_user))
                        .route("/{object_id}", web::delete().to(users::delete_user)),
                )
                .service(
                    web::scope("/groups")
                        .route("", web::get().to(groups::list_groups))
                        .route("", web::post().to(groups::create_group))
                        .route("/{object_id}", web::get().to(groups::get_group))
                        .route("/{object_id}/users", web::get().to(groups::list_members))
                        .route("/{object_id}/users", web::post().to(groups::add_member))
                        .route(
                            "/{object_id}/users/{user_id}",
                            web::delete().to(groups::remove_member),
                        ),
                ),
        );
}
