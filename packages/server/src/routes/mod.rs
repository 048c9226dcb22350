use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

/// Everything served under `/api`.
pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/bumbu", bumbu_routes())
        .nest("/potong", potong_routes())
        .nest("/content", content_routes())
        .nest("/users", user_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::sign_up))
        .routes(routes!(handlers::auth::sign_in))
        .routes(routes!(handlers::auth::sign_out))
}

fn bumbu_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::bumbu::list_bumbu,
            handlers::bumbu::create_bumbu
        ))
        .routes(routes!(
            handlers::bumbu::get_bumbu,
            handlers::bumbu::update_bumbu,
            handlers::bumbu::delete_bumbu
        ))
}

fn potong_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::potong::list_potong,
            handlers::potong::create_potong
        ))
        .routes(routes!(
            handlers::potong::get_potong,
            handlers::potong::update_potong,
            handlers::potong::delete_potong
        ))
}

fn content_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::content::list_content,
            handlers::content::create_content,
            handlers::content::update_content
        ))
        .routes(routes!(
            handlers::content::get_content,
            handlers::content::update_content_by_key,
            handlers::content::delete_content
        ))
}

fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::user::list_users,
            handlers::user::create_user
        ))
        .routes(routes!(
            handlers::user::get_user,
            handlers::user::update_user,
            handlers::user::delete_user
        ))
}
